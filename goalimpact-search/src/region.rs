//! Render-boundary geometry for outside-click detection
//!
//! Hosts report where the widget's input and dropdown were drawn; a
//! pointer-down is "inside" when it lands on either visible part.

/// A point in host coordinates (terminal cells, pixels, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, half-open on the right and bottom edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Bounds {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        let right = u32::from(self.x) + u32::from(self.width);
        let bottom = u32::from(self.y) + u32::from(self.height);
        point.x >= self.x
            && point.y >= self.y
            && u32::from(point.x) < right
            && u32::from(point.y) < bottom
    }
}

/// Last rendered layout of one widget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Region {
    pub input: Option<Bounds>,
    pub dropdown: Option<Bounds>,
}

impl Region {
    /// Whether `point` hits the input, or the dropdown while it is shown
    pub fn contains(&self, point: Point, dropdown_open: bool) -> bool {
        let in_input = self.input.is_some_and(|b| b.contains(point));
        let in_dropdown = dropdown_open && self.dropdown.is_some_and(|b| b.contains(point));
        in_input || in_dropdown
    }
}
