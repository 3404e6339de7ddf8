//! Document-space rectangles and the artboard intersection test.
//!
//! Document coordinates grow upwards: a well-formed rectangle has
//! `top > bottom` and `right > left`. Internally rectangles are normalized
//! into [`kurbo::Rect`] with `y0` as the bottom edge and `y1` as the top edge.

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Axis-aligned rectangle given as `[left, top, right, bottom]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("bounding box is not available")]
    Missing,
    #[error("bounding box has non-finite coordinates: {0:?}")]
    NonFinite(Bounds),
}

impl Bounds {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }

    /// Normalized rectangle: `x0 <= x1`, `y0` (bottom) `<= y1` (top).
    pub fn to_rect(self) -> Rect {
        Rect::new(self.left, self.bottom, self.right, self.top).abs()
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.x0, rect.y1, rect.x1, rect.y0)
    }

    /// Same rectangle with the diagonal points swapped into canonical order.
    pub fn normalized(self) -> Self {
        Self::from_rect(self.to_rect())
    }

    /// Readable geometry, or an error when any coordinate is NaN or infinite.
    pub fn readable(self) -> Result<Rect, GeometryError> {
        if self.is_finite() {
            Ok(self.to_rect())
        } else {
            Err(GeometryError::NonFinite(self))
        }
    }
}

impl From<[f64; 4]> for Bounds {
    fn from([left, top, right, bottom]: [f64; 4]) -> Self {
        Self::new(left, top, right, bottom)
    }
}

impl From<Bounds> for [f64; 4] {
    fn from(b: Bounds) -> Self {
        [b.left, b.top, b.right, b.bottom]
    }
}

/// Inclusive overlap test between two normalized rectangles.
///
/// Touching edges count as intersecting.
pub fn rects_overlap(item: Rect, artboard: Rect) -> bool {
    !(item.x1 < artboard.x0 || item.x0 > artboard.x1 || item.y0 > artboard.y1 || item.y1 < artboard.y0)
}

/// Whether an item belongs to the artboard.
///
/// Unreadable geometry fails closed: the item is treated as outside.
pub fn intersects_artboard(item: Result<Rect, GeometryError>, artboard: Rect) -> bool {
    match item {
        Ok(rect) => rects_overlap(rect, artboard),
        Err(e) => {
            log::debug!("Treating item as outside artboard: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn artboard() -> Rect {
        Bounds::new(0.0, 100.0, 100.0, 0.0).to_rect()
    }

    #[rstest]
    #[case::strictly_inside(Bounds::new(10.0, 20.0, 20.0, 10.0), true)]
    #[case::covers_artboard(Bounds::new(-50.0, 150.0, 150.0, -50.0), true)]
    #[case::straddles_left_edge(Bounds::new(-10.0, 20.0, 10.0, 10.0), true)]
    #[case::left_of(Bounds::new(-30.0, 20.0, -10.0, 10.0), false)]
    #[case::right_of(Bounds::new(110.0, 20.0, 130.0, 10.0), false)]
    #[case::above(Bounds::new(10.0, 130.0, 20.0, 110.0), false)]
    #[case::below(Bounds::new(10.0, -10.0, 20.0, -30.0), false)]
    #[case::touches_right_edge(Bounds::new(100.0, 20.0, 120.0, 10.0), true)]
    #[case::touches_top_edge(Bounds::new(10.0, 120.0, 20.0, 100.0), true)]
    #[case::touches_corner(Bounds::new(-20.0, 0.0, 0.0, -20.0), true)]
    fn test_intersection(#[case] item: Bounds, #[case] expected: bool) {
        assert_eq!(
            intersects_artboard(item.readable(), artboard()),
            expected,
            "item {item:?}"
        );
    }

    #[test]
    fn test_unreadable_bounds_fail_closed() {
        let nan = Bounds::new(f64::NAN, 20.0, 20.0, 10.0);
        assert!(!intersects_artboard(nan.readable(), artboard()));
        assert!(!intersects_artboard(Err(GeometryError::Missing), artboard()));
    }

    #[test]
    fn test_inverted_diagonal_is_normalized() {
        // Diagonal given bottom-right to top-left
        let flipped = Bounds::new(100.0, 0.0, 0.0, 100.0);
        assert_eq!(flipped.normalized(), Bounds::new(0.0, 100.0, 100.0, 0.0));
        assert_eq!(flipped.to_rect(), artboard());
    }

    #[test]
    fn test_bounds_serialize_as_array() {
        let bounds: Bounds = serde_json::from_str("[1, 4, 3, 2]").unwrap();
        assert_eq!(bounds, Bounds::new(1.0, 4.0, 3.0, 2.0));
        assert_eq!(serde_json::to_string(&bounds).unwrap(), "[1.0,4.0,3.0,2.0]");
    }
}
