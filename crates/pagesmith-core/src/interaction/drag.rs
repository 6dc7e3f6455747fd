//! Pointer-driven translation of a single item.

use super::PointerEvent;
use crate::config::DRAG_MARGIN;
use crate::item::{Item, ItemId};
use kurbo::{Point, Rect, Vec2};

/// Tracks an in-progress drag of one item.
#[derive(Debug, Clone)]
pub struct DragController {
    /// The item being dragged.
    active: Option<ItemId>,
    /// Vector from the item's top-left corner to the grab point.
    pointer_offset: Vec2,
    /// Right/bottom clamp margins.
    margin: Vec2,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self::with_margin(DRAG_MARGIN)
    }

    pub fn with_margin(margin: Vec2) -> Self {
        Self {
            active: None,
            pointer_offset: Vec2::ZERO,
            margin,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_item(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn pointer_offset(&self) -> Vec2 {
        self.pointer_offset
    }

    /// Start dragging `item`, grabbed at `event` on its on-screen `element_bounds`.
    ///
    /// Starting while another drag is active retargets the controller.
    pub fn begin(&mut self, event: &mut PointerEvent, item: &Item, element_bounds: Rect) {
        event.prevent_default();
        self.pointer_offset = event.client - element_bounds.origin();
        self.active = Some(item.id.clone());
        log::debug!("Drag started on {} (offset {:?})", item.id, self.pointer_offset);
    }

    /// Move the active item under the pointer.
    ///
    /// `page_bounds` is the page container's on-screen bounding box; nothing
    /// happens when it is unknown or no drag is active.
    pub fn drag_to(&mut self, event: &PointerEvent, page_bounds: Option<Rect>, items: &mut [Item]) {
        let (Some(id), Some(page)) = (self.active.as_deref(), page_bounds) else {
            return;
        };
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return;
        };
        let candidate = event.client - page.origin() - self.pointer_offset;
        item.position = self.clamp(candidate.to_point(), page);
    }

    /// Release the active item.
    pub fn end(&mut self) {
        if let Some(id) = self.active.take() {
            log::debug!("Drag ended on {}", id);
        }
    }

    /// Clamp a page-local top-left corner to `[0, page - margin]` on each axis.
    fn clamp(&self, candidate: Point, page: Rect) -> Point {
        let max_x = page.width() - self.margin.x;
        let max_y = page.height() - self.margin.y;
        Point::new(candidate.x.min(max_x).max(0.0), candidate.y.min(max_y).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageSize;
    use kurbo::Size;

    fn page_at(origin: Point) -> Rect {
        Rect::from_origin_size(origin, PageSize::A4.size_px())
    }

    fn item_at(x: f64, y: f64) -> Item {
        Item::text("Name", "name", Point::new(x, y)).with_id("item")
    }

    #[test]
    fn test_begin_records_offset_and_prevents_default() {
        let item = item_at(10.0, 10.0);
        let mut drag = DragController::new();
        let mut event = PointerEvent::at(125.0, 70.0);

        drag.begin(&mut event, &item, Rect::new(110.0, 60.0, 310.0, 92.0));

        assert!(event.default_prevented());
        assert!(drag.is_dragging());
        assert_eq!(drag.active_item(), Some("item"));
        assert_eq!(drag.pointer_offset(), Vec2::new(15.0, 10.0));
    }

    #[test]
    fn test_drag_moves_relative_to_page() {
        let mut items = vec![item_at(10.0, 10.0)];
        let page = page_at(Point::new(100.0, 50.0));
        let mut drag = DragController::new();

        // Item is rendered at page origin + position.
        let element = Rect::from_origin_size(Point::new(110.0, 60.0), Size::new(200.0, 32.0));
        drag.begin(&mut PointerEvent::at(115.0, 65.0), &items[0], element);
        drag.drag_to(&PointerEvent::at(215.0, 165.0), Some(page), &mut items);

        assert_eq!(items[0].position, Point::new(110.0, 110.0));
    }

    #[test]
    fn test_drag_clamps_to_page_margins() {
        let mut items = vec![item_at(10.0, 10.0)];
        let page = page_at(Point::ZERO);
        let mut drag = DragController::new();
        drag.begin(&mut PointerEvent::at(10.0, 10.0), &items[0], items[0].bounds());

        for (x, y) in [(1.0e9, 1.0e9), (-1.0e9, -1.0e9), (1.0e9, -5.0), (-5.0, 1.0e9)] {
            drag.drag_to(&PointerEvent::at(x, y), Some(page), &mut items);
            let pos = items[0].position;
            assert!(pos.x >= 0.0 && pos.x <= page.width() - 100.0, "x out of range: {pos:?}");
            assert!(pos.y >= 0.0 && pos.y <= page.height() - 40.0, "y out of range: {pos:?}");
        }

        drag.drag_to(&PointerEvent::at(1.0e9, 1.0e9), Some(page), &mut items);
        assert_eq!(
            items[0].position,
            Point::new(page.width() - 100.0, page.height() - 40.0)
        );
    }

    #[test]
    fn test_noops_without_preconditions() {
        let mut items = vec![item_at(10.0, 10.0)];
        let page = page_at(Point::ZERO);
        let mut drag = DragController::new();

        // Not dragging.
        drag.drag_to(&PointerEvent::at(300.0, 300.0), Some(page), &mut items);
        assert_eq!(items[0].position, Point::new(10.0, 10.0));

        // Page container missing.
        drag.begin(&mut PointerEvent::at(10.0, 10.0), &items[0], items[0].bounds());
        drag.drag_to(&PointerEvent::at(300.0, 300.0), None, &mut items);
        assert_eq!(items[0].position, Point::new(10.0, 10.0));

        // Released.
        drag.end();
        assert!(!drag.is_dragging());
        drag.drag_to(&PointerEvent::at(300.0, 300.0), Some(page), &mut items);
        assert_eq!(items[0].position, Point::new(10.0, 10.0));
        drag.end();
    }

    #[test]
    fn test_second_begin_retargets() {
        let mut items = vec![item_at(0.0, 0.0), item_at(50.0, 50.0).with_id("other")];
        let page = page_at(Point::ZERO);
        let mut drag = DragController::new();

        drag.begin(&mut PointerEvent::at(0.0, 0.0), &items[0], items[0].bounds());
        drag.begin(&mut PointerEvent::at(50.0, 50.0), &items[1], items[1].bounds());
        drag.drag_to(&PointerEvent::at(80.0, 90.0), Some(page), &mut items);

        assert_eq!(items[0].position, Point::ZERO);
        assert_eq!(items[1].position, Point::new(80.0, 90.0));
    }
}
