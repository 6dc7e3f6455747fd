//! Pagesmith Core Library
//!
//! Platform-agnostic data model, drag/resize interaction state and the JSON
//! interchange format for the pagesmith template editor.

pub mod config;
pub mod document;
pub mod import;
pub mod interaction;
pub mod item;
pub mod page;

pub use config::{DRAG_MARGIN, EditorConfig};
pub use document::ExportDocument;
pub use import::{ImportError, import_from_json, validate_imported_data};
pub use interaction::{DragController, PointerEvent, ResizeController, ResizeDirection};
pub use item::{
    FontStyle, FontWeight, Item, ItemId, ItemKind, MINIMUM_ITEM_SIZE, TableColumn, TableSpec,
    TextAlign, TextDecoration,
};
pub use page::{PX_PER_MM, Page, PageSize, mm_to_px, px_to_mm};
