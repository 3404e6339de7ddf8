use crate::geometry::Bounds;
use kurbo::Rect;

/// A named export region of a document
#[derive(Debug, Clone, PartialEq)]
pub struct Artboard {
    index: usize,
    name: String,
    bounds: Bounds,
}

impl Artboard {
    /// Create an artboard, normalizing the two diagonal points of its rect
    pub fn new(index: usize, name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            index,
            name: name.into(),
            bounds: bounds.normalized(),
        }
    }

    /// Zero-based position in the document's artboard list
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw artboard name, possibly empty
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn rect(&self) -> Rect {
        self.bounds.to_rect()
    }

    /// Name shown to users: the artboard name, or `Artboard_N` (1-based) when empty
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("Artboard_{}", self.index + 1)
        } else {
            self.name.clone()
        }
    }

    pub(crate) fn reindex(&mut self, index: usize) {
        self.index = index;
    }
}
