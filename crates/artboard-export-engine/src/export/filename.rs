use crate::models::Artboard;
use regex::Regex;
use std::sync::LazyLock;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("valid regex"));

pub const OUTPUT_EXTENSION: &str = "pdf";

/// Replace every character outside `[A-Za-z0-9_-]` with `_`
pub fn sanitize(name: &str) -> String {
    UNSAFE_CHARS.replace_all(name, "_").into_owned()
}

/// Output file name for an artboard, e.g. `My_Artboard__1.pdf`
pub fn artboard_file_name(artboard: &Artboard) -> String {
    format!("{}.{OUTPUT_EXTENSION}", sanitize(&artboard.display_name()))
}
