//! Geometric primitives for slide layout.
//!
//! All coordinates are expressed in centimeters from the top-left corner of
//! the slide, matching how the layout tables are specified.

/// A rectangle on a slide, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Distance from the left edge of the slide
    pub left: f32,
    /// Distance from the top edge of the slide
    pub top: f32,
    /// Width of the rectangle
    pub width: f32,
    /// Height of the rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pla_deck::geometry::Rect;
    ///
    /// let rect = Rect::new(0.25, 2.1, 3.25, 3.0);
    /// assert_eq!(rect.left, 0.25);
    /// assert_eq!(rect.height, 3.0);
    /// ```
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}
