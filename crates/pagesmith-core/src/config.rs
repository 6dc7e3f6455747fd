//! Editor configuration.

use crate::interaction::{DragController, ResizeController};
use crate::item::MINIMUM_ITEM_SIZE;
use crate::page::PageSize;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Fixed margins kept visible when an item is dragged toward the right and
/// bottom page edges.
pub const DRAG_MARGIN: Vec2 = Vec2::new(100.0, 40.0);

/// Editor-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub page: PageSize,
    /// Smallest width/height an item can be resized to, in pixels.
    pub min_item_size: f64,
    /// Right/bottom clamp margins for dragging, in pixels.
    pub drag_margin: Vec2,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            page: PageSize::A4,
            min_item_size: MINIMUM_ITEM_SIZE,
            drag_margin: DRAG_MARGIN,
        }
    }
}

impl EditorConfig {
    /// Load settings from JSON, using defaults for missing keys.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn drag_controller(&self) -> DragController {
        DragController::with_margin(self.drag_margin)
    }

    pub fn resize_controller(&self) -> ResizeController {
        ResizeController::with_min_size(self.min_item_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{"minItemSize": 20}"#).unwrap();
        assert_eq!(config.min_item_size, 20.0);
        assert_eq!(config.page, PageSize::A4);
        assert_eq!(config.drag_margin, DRAG_MARGIN);
    }
}
