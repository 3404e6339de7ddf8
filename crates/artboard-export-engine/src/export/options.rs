use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// PDF compatibility level, named after the Acrobat release that introduced it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfCompatibility {
    Acrobat4,
    Acrobat5,
    Acrobat6,
    #[default]
    Acrobat7,
    Acrobat8,
}

impl PdfCompatibility {
    /// Version written to the `%PDF-x.y` header
    pub fn pdf_version(self) -> &'static str {
        match self {
            Self::Acrobat4 => "1.3",
            Self::Acrobat5 => "1.4",
            Self::Acrobat6 => "1.5",
            Self::Acrobat7 => "1.6",
            Self::Acrobat8 => "1.7",
        }
    }
}

/// Settings passed to every export call
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub optimize: bool,
    pub thumbnails: bool,
    pub compatibility: PdfCompatibility,
    pub preserve_editability: bool,
    /// Only content intersecting the artboard is written
    pub artboard_clipping: bool,
    /// Page content is clipped to the artboard rectangle
    pub view_clip: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            optimize: true,
            thumbnails: false,
            compatibility: PdfCompatibility::default(),
            preserve_editability: false,
            artboard_clipping: true,
            view_clip: true,
        }
    }
}

/// Inclusive, 1-based artboard range written as `"start-end"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtboardRange {
    start: usize,
    end: usize,
}

impl ArtboardRange {
    /// Range covering exactly the artboard at zero-based `index`
    pub fn single(index: usize) -> Self {
        Self {
            start: index + 1,
            end: index + 1,
        }
    }

    /// Zero-based artboard indices, or `None` if the range exceeds `count`
    pub fn indices(&self, count: usize) -> Option<RangeInclusive<usize>> {
        (self.end <= count).then(|| (self.start - 1)..=(self.end - 1))
    }
}

impl fmt::Display for ArtboardRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
