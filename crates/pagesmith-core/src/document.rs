//! The export envelope: the only artifact exchanged between sessions.

use crate::item::Item;
use crate::page::PageSize;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Serialized page state: `{ pageItems, exportDate, pageSize }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub page_items: Vec<Item>,
    /// ISO-8601 timestamp in UTC with millisecond precision.
    pub export_date: String,
    pub page_size: String,
}

impl ExportDocument {
    /// Wrap `items` for an A4 page, stamped with the current time.
    pub fn new(items: &[Item]) -> Self {
        Self::with_page_size(items, PageSize::A4)
    }

    pub fn with_page_size(items: &[Item], page_size: PageSize) -> Self {
        Self {
            page_items: items.to_vec(),
            export_date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            page_size: page_size.tag().to_string(),
        }
    }

    /// Serialize to indented JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize without structural validation. Use
    /// [`crate::import::import_from_json`] for untrusted input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
