//! WebAssembly entry point and browser bindings.

use crate::editor::Editor;
use kurbo::Rect;
use pagesmith_core::{Item, PointerEvent, ResizeDirection};
use pagesmith_render::{Download, ExportError, ExportFormat, ExportResult, PrintContext, PrintHost, PrintJob};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

fn delivery_error(file_name: &str, err: JsValue) -> ExportError {
    ExportError::Delivery {
        file_name: file_name.to_string(),
        reason: format!("{:?}", err),
    }
}

/// Triggers a browser download through a temporary object URL.
#[derive(Debug, Default)]
pub struct BrowserDownload;

impl Download for BrowserDownload {
    fn save(&mut self, file_name: &str, mime_type: &str, bytes: &[u8]) -> ExportResult<()> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| delivery_error(file_name, JsValue::from_str("no document")))?;

        let uint8_array = js_sys::Uint8Array::from(bytes);
        let blob_parts = js_sys::Array::new();
        blob_parts.push(&uint8_array);

        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime_type);

        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&blob_parts, &options)
            .map_err(|e| delivery_error(file_name, e))?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| delivery_error(file_name, e))?;

        let a = document
            .create_element("a")
            .map_err(|e| delivery_error(file_name, e))?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|e| delivery_error(file_name, e.into()))?;
        a.set_href(&url);
        a.set_download(file_name);
        a.click();

        web_sys::Url::revoke_object_url(&url).ok();
        Ok(())
    }
}

/// A window opened for printing.
#[derive(Debug, Clone)]
pub struct BrowserPrintWindow {
    window: web_sys::Window,
}

impl PrintContext for BrowserPrintWindow {
    fn write_document(&mut self, html: &str) {
        let Some(document) = self.window.document() else {
            log::error!("Print window has no document");
            return;
        };
        if let Err(e) = document.write(&js_sys::Array::of1(&JsValue::from_str(html))) {
            log::error!("Failed to write print document: {:?}", e);
        }
        document.close().ok();
    }

    fn print(&mut self) {
        if let Err(e) = self.window.print() {
            log::error!("Print failed: {:?}", e);
        }
    }

    fn close(&mut self) {
        self.window.close().ok();
    }
}

/// Opens blank `_blank` windows from the current window.
#[derive(Debug, Default)]
pub struct BrowserPrintHost;

impl PrintHost for BrowserPrintHost {
    type Context = BrowserPrintWindow;

    fn open_blank(&mut self) -> Option<BrowserPrintWindow> {
        let window = web_sys::window()?;
        match window.open_with_url_and_target("", "_blank") {
            Ok(Some(window)) => Some(BrowserPrintWindow { window }),
            Ok(None) => None,
            Err(e) => {
                log::warn!("window.open failed: {:?}", e);
                None
            }
        }
    }
}

/// Wire the window's load and after-print events to `job`.
fn attach_print_job(job: PrintJob<BrowserPrintWindow>) {
    let window = job.context().window.clone();
    let job = Rc::new(RefCell::new(job));

    let on_load_job = job.clone();
    let onload = Closure::<dyn FnMut()>::new(move || on_load_job.borrow_mut().on_load());
    window.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    let onafterprint = Closure::<dyn FnMut()>::new(move || job.borrow_mut().on_after_print());
    window.set_onafterprint(Some(onafterprint.as_ref().unchecked_ref()));
    onafterprint.forget();
}

fn parse_format(format: &str) -> Result<ExportFormat, JsValue> {
    match format.to_ascii_lowercase().as_str() {
        "json" => Ok(ExportFormat::Json),
        "html" => Ok(ExportFormat::Html),
        "pdf" => Ok(ExportFormat::Pdf),
        other => Err(JsValue::from_str(&format!("Unknown export format: {}", other))),
    }
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Editor handle exposed to the page script.
#[wasm_bindgen]
pub struct WebEditor {
    editor: Editor,
}

impl Default for WebEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            editor: Editor::default(),
        }
    }

    /// Add an item given as JSON (the exported item shape).
    #[wasm_bindgen(js_name = addItem)]
    pub fn add_item(&mut self, json: &str) -> Result<String, JsValue> {
        let item: Item = serde_json::from_str(json).map_err(js_error)?;
        let id = item.id.clone();
        self.editor.page_mut().add_item(item);
        Ok(id)
    }

    #[wasm_bindgen(js_name = removeItem)]
    pub fn remove_item(&mut self, id: &str) -> bool {
        self.editor.page_mut().remove_item(id).is_some()
    }

    /// Current items as a JSON array.
    pub fn items(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.editor.items()).map_err(js_error)
    }

    /// Report the page container's bounding client rect.
    #[wasm_bindgen(js_name = setPageBounds)]
    pub fn set_page_bounds(&mut self, left: f64, top: f64, width: f64, height: f64) {
        self.editor
            .set_page_bounds(Some(Rect::new(left, top, left + width, top + height)));
    }

    #[wasm_bindgen(js_name = clearPageBounds)]
    pub fn clear_page_bounds(&mut self) {
        self.editor.set_page_bounds(None);
    }

    /// Returns whether the host should call `preventDefault` on the event.
    #[wasm_bindgen(js_name = pointerDownOnItem)]
    #[allow(clippy::too_many_arguments)]
    pub fn pointer_down_on_item(
        &mut self,
        id: &str,
        client_x: f64,
        client_y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> Result<bool, JsValue> {
        let mut event = PointerEvent::at(client_x, client_y);
        let bounds = Rect::new(left, top, left + width, top + height);
        self.editor
            .pointer_down_on_item(&mut event, id, bounds)
            .map_err(js_error)?;
        Ok(event.default_prevented())
    }

    /// `direction` is one of `e`, `s`, `se`.
    #[wasm_bindgen(js_name = pointerDownOnHandle)]
    pub fn pointer_down_on_handle(
        &mut self,
        id: &str,
        direction: &str,
        client_x: f64,
        client_y: f64,
    ) -> Result<bool, JsValue> {
        let direction = ResizeDirection::from_code(direction)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown resize direction: {}", direction)))?;
        let mut event = PointerEvent::at(client_x, client_y);
        self.editor
            .pointer_down_on_handle(&mut event, id, direction)
            .map_err(js_error)?;
        Ok(event.default_prevented())
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) {
        self.editor.pointer_move(&PointerEvent::at(client_x, client_y));
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.editor.pointer_up();
    }

    /// Download the page as `<fileName>.<format>`.
    pub fn export(&self, format: &str, file_name: &str) -> Result<(), JsValue> {
        let format = parse_format(format)?;
        self.editor
            .export(format, file_name, &mut BrowserDownload)
            .map_err(js_error)
    }

    /// Replace the page with an exported JSON document; returns the item count.
    #[wasm_bindgen(js_name = importJson)]
    pub fn import_json(&mut self, text: &str) -> Result<usize, JsValue> {
        self.editor.import_json(text).map_err(js_error)
    }

    pub fn print(&self) {
        if let Some(job) = self.editor.print(&mut BrowserPrintHost) {
            attach_print_job(job);
        }
    }
}

/// Initialize logging for the WASM module.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&JsValue::from_str(&format!("Failed to initialize logger: {}", e)));
    }

    log::info!("Starting pagesmith (WASM)");
}
