//! Pointer events as seen by the interaction controllers.

use kurbo::Point;

/// A pointer (mouse/touch) event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in client (viewport) coordinates.
    pub client: Point,
    default_prevented: bool,
}

impl PointerEvent {
    pub fn new(client: Point) -> Self {
        Self {
            client,
            default_prevented: false,
        }
    }

    pub fn at(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y))
    }

    /// Ask the host to suppress the default action (text selection, native drag).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
