//! Minimal PDF writer: one page per artboard, each visible item drawn as a
//! filled rectangle in artboard-relative coordinates.

use crate::export::ExportOptions;
use crate::geometry::rects_overlap;
use crate::models::{Artboard, LayerTree};
use kurbo::{Rect, Vec2};
use std::fmt::Write as _;

const PRODUCER: &str = concat!("artboard-export ", env!("CARGO_PKG_VERSION"));

/// Render `artboards` as a multi-page PDF.
///
/// An item is drawn when it is visible, its layer and every ancestor layer are
/// visible, and its bounds are readable. With artboard clipping on, items not
/// intersecting the page's artboard are skipped entirely.
pub fn render(
    title: &str,
    artboards: &[&Artboard],
    layers: &LayerTree,
    options: &ExportOptions,
) -> Vec<u8> {
    let mut writer = PdfWriter::new(options.compatibility.pdf_version());

    // Object numbers: 1 catalog, 2 page tree, 3 info, then (page, content) pairs
    let page_ids: Vec<usize> = (0..artboards.len()).map(|i| 4 + i * 2).collect();

    writer.object(1, "<< /Type /Catalog /Pages 2 0 R >>");
    let kids = page_ids
        .iter()
        .map(|id| format!("{id} 0 R"))
        .collect::<Vec<_>>()
        .join(" ");
    writer.object(
        2,
        &format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", artboards.len()),
    );
    writer.object(3, &info_dictionary(title, options));

    for (artboard, page_id) in artboards.iter().zip(&page_ids) {
        let rect = artboard.rect();
        let content = page_content(artboard, layers, options);
        writer.object(
            *page_id,
            &format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Contents {} 0 R >>",
                num(rect.width()),
                num(rect.height()),
                page_id + 1
            ),
        );
        writer.stream(page_id + 1, &content);
    }

    writer.finish(1, 3)
}

fn info_dictionary(title: &str, options: &ExportOptions) -> String {
    let flag = |on: bool| if on { "(yes)" } else { "(no)" };
    format!(
        "<< /Title {} /Producer {} /WebOptimized {} /Thumbnails {} >>",
        string_literal(title),
        string_literal(PRODUCER),
        flag(options.optimize),
        flag(options.thumbnails)
    )
}

fn page_content(artboard: &Artboard, layers: &LayerTree, options: &ExportOptions) -> String {
    let page = artboard.rect();
    let origin = Vec2::new(page.x0, page.y0);
    let mut out = String::new();

    if options.view_clip {
        let _ = writeln!(
            out,
            "0 0 {} {} re W n",
            num(page.width()),
            num(page.height())
        );
    }
    out.push_str("0.5 g\n");

    let order = layers.flatten();
    let shown = layers.effective_visibility(&order);
    for id in order {
        if !shown[id.index()] {
            continue;
        }
        let layer = layers.layer(id);
        for item in layer.items().iter().filter(|item| item.visible) {
            let Ok(bounds) = item.visible_bounds() else {
                continue;
            };
            if options.artboard_clipping && !rects_overlap(bounds, page) {
                continue;
            }
            if !options.optimize {
                let label = item.name.as_deref().unwrap_or("item");
                let _ = writeln!(
                    out,
                    "% {} / {}",
                    comment_text(layer.name()),
                    comment_text(label)
                );
            }
            let local: Rect = bounds - origin;
            let _ = writeln!(
                out,
                "{} {} {} {} re f",
                num(local.x0),
                num(local.y0),
                num(local.width()),
                num(local.height())
            );
        }
    }

    out
}

/// Format a coordinate with at most three decimals and no trailing zeros
fn num(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Text safe inside a `%` comment: a line break would end the comment early,
/// so control and non-ASCII characters become `?`
fn comment_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect()
}

/// PDF literal string with `\`, `(` and `)` escaped; non-ASCII becomes `?`
fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => out.push('?'),
        }
    }
    out.push(')');
    out
}

struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl PdfWriter {
    fn new(version: &str) -> Self {
        let mut buf = format!("%PDF-{version}\n").into_bytes();
        // Binary marker so transfer tools treat the file as binary
        buf.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: usize, body: &str) {
        self.offsets.push((id, self.buf.len()));
        self.buf
            .extend_from_slice(format!("{id} 0 obj\n{body}\nendobj\n").as_bytes());
    }

    fn stream(&mut self, id: usize, content: &str) {
        self.offsets.push((id, self.buf.len()));
        self.buf.extend_from_slice(
            format!(
                "{id} 0 obj\n<< /Length {} >>\nstream\n{content}endstream\nendobj\n",
                content.len()
            )
            .as_bytes(),
        );
    }

    fn finish(mut self, root: usize, info: usize) -> Vec<u8> {
        self.offsets.sort_unstable();
        let size = self.offsets.len() + 1;
        let xref_offset = self.buf.len();

        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for (_, offset) in &self.offsets {
            let _ = writeln!(xref, "{offset:010} 00000 n ");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {size} /Root {root} 0 R /Info {info} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        );
        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}
