use serde::{Deserialize, Serialize};

/// A point in PDF user space (origin at the bottom-left of the page).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// A resolved location inside a rendered document.
///
/// `page_index` is zero-based and always relative to the document the
/// destination was extracted from, never to a document that later had
/// pages spliced in front of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub page_index: usize,
    pub point: Point,
}

impl Destination {
    pub fn new(page_index: usize, point: Point) -> Self {
        Self { page_index, point }
    }

    /// One-based page number as printed in a table of contents.
    pub fn page_number(&self) -> usize {
        self.page_index + 1
    }
}

/// An axis-aligned rectangle in PDF user space, stored as `[x1, y1, x2, y2]`
/// normalized so that `x1 <= x2` and `y1 <= y2`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Rect {
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x1: a.0.min(b.0),
            y1: a.1.min(b.1),
            x2: a.0.max(b.0),
            y2: a.1.max(b.1),
        }
    }

    /// The lower vertical bound, which is where a text run's baseline sits.
    pub fn min_y(&self) -> f64 {
        self.y1
    }

    pub fn max_y(&self) -> f64 {
        self.y2
    }
}
