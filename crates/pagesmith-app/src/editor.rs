//! Editor session: the page plus the pointer gestures acting on it.

use kurbo::Rect;
use pagesmith_core::{
    DragController, EditorConfig, ImportError, Item, ItemId, Page, PointerEvent, ResizeController,
    ResizeDirection,
};
use pagesmith_render::{Download, ExportError, ExportFormat, PrintHost, PrintJob, export, print_template};
use thiserror::Error;

/// Errors surfaced by editor commands.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),
}

/// Result type for editor commands.
pub type EditorResult<T> = Result<T, EditorError>;

/// Routes host pointer events to the drag and resize controllers and runs
/// export, import and print against the current page.
#[derive(Debug, Clone)]
pub struct Editor {
    config: EditorConfig,
    page: Page,
    drag: DragController,
    resize: ResizeController,
    /// On-screen bounding box of the page container, as last reported by the host.
    page_bounds: Option<Rect>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            page: Page::new(),
            drag: config.drag_controller(),
            resize: config.resize_controller(),
            page_bounds: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn items(&self) -> &[Item] {
        self.page.items()
    }

    pub fn set_page_bounds(&mut self, bounds: Option<Rect>) {
        self.page_bounds = bounds;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_resizing()
    }

    /// Pointer pressed on the body of item `id`, rendered at `element_bounds`.
    pub fn pointer_down_on_item(
        &mut self,
        event: &mut PointerEvent,
        id: &str,
        element_bounds: Rect,
    ) -> EditorResult<()> {
        let item = self
            .page
            .get(id)
            .ok_or_else(|| EditorError::UnknownItem(id.to_string()))?;
        self.drag.begin(event, item, element_bounds);
        Ok(())
    }

    /// Pointer pressed on one of the resize handles of item `id`.
    ///
    /// The event is consumed so the item body does not start a drag too.
    pub fn pointer_down_on_handle(
        &mut self,
        event: &mut PointerEvent,
        id: &str,
        direction: ResizeDirection,
    ) -> EditorResult<()> {
        let item = self
            .page
            .get(id)
            .ok_or_else(|| EditorError::UnknownItem(id.to_string()))?;
        event.prevent_default();
        self.resize.begin(event, item, direction);
        Ok(())
    }

    /// Pointer moved anywhere in the document.
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        if self.resize.is_resizing() {
            self.resize.resize_to(event, self.page.items_mut());
        } else if self.drag.is_dragging() {
            self.drag.drag_to(event, self.page_bounds, self.page.items_mut());
        }
    }

    /// Pointer released anywhere in the document: both gestures end.
    pub fn pointer_up(&mut self) {
        self.drag.end();
        self.resize.end();
    }

    /// Export the page as `<file_name>.<ext>` through `sink`.
    pub fn export<D: Download + ?Sized>(
        &self,
        format: ExportFormat,
        file_name: &str,
        sink: &mut D,
    ) -> EditorResult<()> {
        export(self.page.items(), format, file_name, sink)?;
        Ok(())
    }

    /// Replace the page with the items in an exported JSON document.
    ///
    /// Gestures in flight are dropped, since their items may be gone.
    pub fn import_json(&mut self, text: &str) -> EditorResult<usize> {
        let count = self.page.import_json(text)?;
        self.pointer_up();
        Ok(count)
    }

    /// Start printing the page through `host`.
    pub fn print<H: PrintHost>(&self, host: &mut H) -> Option<PrintJob<H::Context>> {
        print_template(self.page.items(), host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Size};
    use pagesmith_core::{ExportDocument, PageSize};
    use pagesmith_render::Artifact;

    fn editor_with_item() -> Editor {
        let mut editor = Editor::default();
        editor
            .page_mut()
            .add_item(Item::text("Name", "name", Point::new(10.0, 10.0)).with_id("a"));
        editor.set_page_bounds(Some(Rect::from_origin_size(
            Point::new(100.0, 50.0),
            PageSize::A4.size_px(),
        )));
        editor
    }

    fn element_bounds(editor: &Editor) -> Rect {
        let item = editor.page().get("a").unwrap();
        Rect::from_origin_size(Point::new(100.0, 50.0) + item.position.to_vec2(), item.size)
    }

    #[test]
    fn test_drag_gesture() {
        let mut editor = editor_with_item();
        let bounds = element_bounds(&editor);
        let mut down = PointerEvent::at(120.0, 70.0);
        editor.pointer_down_on_item(&mut down, "a", bounds).unwrap();
        assert!(down.default_prevented());
        assert!(editor.is_dragging());

        editor.pointer_move(&PointerEvent::at(220.0, 170.0));
        assert_eq!(editor.page().get("a").unwrap().position, Point::new(110.0, 110.0));

        editor.pointer_up();
        assert!(!editor.is_dragging());
        editor.pointer_move(&PointerEvent::at(500.0, 500.0));
        assert_eq!(editor.page().get("a").unwrap().position, Point::new(110.0, 110.0));
    }

    #[test]
    fn test_drag_without_page_bounds_is_noop() {
        let mut editor = editor_with_item();
        let bounds = element_bounds(&editor);
        editor.set_page_bounds(None);
        editor
            .pointer_down_on_item(&mut PointerEvent::at(120.0, 70.0), "a", bounds)
            .unwrap();
        editor.pointer_move(&PointerEvent::at(300.0, 300.0));
        assert_eq!(editor.page().get("a").unwrap().position, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_resize_takes_precedence_over_drag() {
        let mut editor = editor_with_item();
        let mut down = PointerEvent::at(310.0, 92.0);
        editor
            .pointer_down_on_handle(&mut down, "a", ResizeDirection::SouthEast)
            .unwrap();
        assert!(down.default_prevented());
        assert!(!editor.is_dragging());

        editor.pointer_move(&PointerEvent::at(200.0, 102.0));
        let item = editor.page().get("a").unwrap();
        assert_eq!(item.size, Size::new(90.0, 50.0));
        assert_eq!(item.position, Point::new(10.0, 10.0));

        editor.pointer_up();
        assert!(!editor.is_resizing());
    }

    #[test]
    fn test_unknown_item() {
        let mut editor = editor_with_item();
        let err = editor
            .pointer_down_on_handle(&mut PointerEvent::at(0.0, 0.0), "missing", ResizeDirection::East)
            .unwrap_err();
        assert!(matches!(err, EditorError::UnknownItem(id) if id == "missing"));
    }

    #[test]
    fn test_export_then_import() {
        let editor = editor_with_item();
        let mut downloads: Vec<Artifact> = Vec::new();
        editor.export(ExportFormat::Json, "template", &mut downloads).unwrap();
        let json = String::from_utf8(downloads[0].bytes.clone()).unwrap();

        let mut other = Editor::default();
        assert_eq!(other.import_json(&json).unwrap(), 1);
        assert_eq!(other.items(), editor.items());
    }

    #[test]
    fn test_failed_import_keeps_page() {
        let mut editor = editor_with_item();
        let err = editor.import_json(r#"{"pageItems": 3}"#).unwrap_err();
        assert!(matches!(err, EditorError::Import(ImportError::InvalidFormat)));
        assert_eq!(editor.items().len(), 1);

        let empty = ExportDocument::new(&[]).to_json().unwrap();
        assert_eq!(editor.import_json(&empty).unwrap(), 0);
        assert!(editor.page().is_empty());
    }
}
