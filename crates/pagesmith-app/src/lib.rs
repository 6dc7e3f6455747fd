//! Pagesmith Application
//!
//! Host shells around the editor: browser bindings for the WASM build and a
//! file-writing download sink for the command line.

mod editor;

pub use editor::{Editor, EditorError, EditorResult};

#[cfg(not(target_arch = "wasm32"))]
mod native;

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileDownload;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{BrowserDownload, BrowserPrintHost, BrowserPrintWindow, WebEditor, run_wasm};
