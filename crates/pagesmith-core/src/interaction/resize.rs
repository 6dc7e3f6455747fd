//! Pointer-driven resizing of a single item.

use super::PointerEvent;
use crate::item::{Item, ItemId, MINIMUM_ITEM_SIZE};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Which edges a resize handle moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeDirection {
    /// Right edge: width only.
    #[serde(rename = "e")]
    East,
    /// Bottom edge: height only.
    #[serde(rename = "s")]
    South,
    /// Bottom-right corner: both.
    #[serde(rename = "se")]
    SouthEast,
}

impl ResizeDirection {
    pub fn affects_width(&self) -> bool {
        matches!(self, ResizeDirection::East | ResizeDirection::SouthEast)
    }

    pub fn affects_height(&self) -> bool {
        matches!(self, ResizeDirection::South | ResizeDirection::SouthEast)
    }

    /// Parse the handle codes used by hosts (`e`, `s`, `se`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "e" => Some(ResizeDirection::East),
            "s" => Some(ResizeDirection::South),
            "se" => Some(ResizeDirection::SouthEast),
            _ => None,
        }
    }
}

/// Snapshot taken when a resize gesture starts.
#[derive(Debug, Clone)]
struct ResizeGesture {
    item: ItemId,
    direction: ResizeDirection,
    start_size: Size,
    start_pointer: Point,
}

/// Tracks an in-progress resize of one item.
///
/// Sizes are always computed from the gesture's start snapshot, never from the
/// previous frame.
#[derive(Debug, Clone)]
pub struct ResizeController {
    gesture: Option<ResizeGesture>,
    min_size: f64,
}

impl Default for ResizeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ResizeController {
    pub fn new() -> Self {
        Self::with_min_size(MINIMUM_ITEM_SIZE)
    }

    pub fn with_min_size(min_size: f64) -> Self {
        Self {
            gesture: None,
            min_size,
        }
    }

    pub fn is_resizing(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn active_item(&self) -> Option<&str> {
        self.gesture.as_ref().map(|g| g.item.as_str())
    }

    pub fn direction(&self) -> Option<ResizeDirection> {
        self.gesture.as_ref().map(|g| g.direction)
    }

    /// Start resizing `item` from the handle in `direction`.
    pub fn begin(&mut self, event: &PointerEvent, item: &Item, direction: ResizeDirection) {
        log::debug!("Resize {:?} started on {}", direction, item.id);
        self.gesture = Some(ResizeGesture {
            item: item.id.clone(),
            direction,
            start_size: item.size,
            start_pointer: event.client,
        });
    }

    /// Resize the active item to follow the pointer. No-op when idle.
    pub fn resize_to(&mut self, event: &PointerEvent, items: &mut [Item]) {
        let Some(gesture) = &self.gesture else {
            return;
        };
        let Some(item) = items.iter_mut().find(|item| item.id == gesture.item) else {
            return;
        };

        let delta = event.client - gesture.start_pointer;
        let mut size = gesture.start_size;
        if gesture.direction.affects_width() {
            size.width = (gesture.start_size.width + delta.x).max(self.min_size);
        }
        if gesture.direction.affects_height() {
            size.height = (gesture.start_size.height + delta.y).max(self.min_size);
        }
        item.size = size;
    }

    /// Clear all resize state.
    pub fn end(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            log::debug!("Resize ended on {}", gesture.item);
        }
    }
}
