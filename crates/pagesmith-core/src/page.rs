//! The fixed-size page canvas and its ordered item collection.

use crate::import::{ImportError, import_from_json};
use crate::item::{Item, ItemId};
use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Rendering scale: CSS pixels per millimetre at 96 dpi.
pub const PX_PER_MM: f64 = 96.0 / 25.4;

/// Convert pixels to millimetres.
pub fn px_to_mm(px: f64) -> f64 {
    px / PX_PER_MM
}

/// Convert millimetres to pixels.
pub fn mm_to_px(mm: f64) -> f64 {
    mm * PX_PER_MM
}

/// Physical page dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

impl PageSize {
    /// ISO A4, portrait.
    pub const A4: PageSize = PageSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    /// Size tag written into export documents.
    pub fn tag(&self) -> &'static str {
        if *self == Self::A4 { "A4" } else { "custom" }
    }

    /// Rendered size in pixels.
    pub fn size_px(&self) -> Size {
        Size::new(mm_to_px(self.width_mm), mm_to_px(self.height_mm))
    }

    /// Rendered bounds in page-local pixels (origin at the top-left corner).
    pub fn bounds_px(&self) -> Rect {
        Rect::from_origin_size(kurbo::Point::ZERO, self.size_px())
    }
}

/// A page holding items in render order (back to front).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub size: PageSize,
    items: Vec<Item>,
}

impl Page {
    /// Create an empty A4 page.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            size: PageSize::A4,
            items,
        }
    }

    /// Append an item on top of the others.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove an item by id.
    pub fn remove_item(&mut self, id: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Items in render order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Mutable access for the interaction controllers.
    pub fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    /// Ids in render order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter().map(|item| &item.id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Replace the page contents with items imported from exported JSON.
    ///
    /// The page is left untouched when the text fails to parse or validate.
    pub fn import_json(&mut self, text: &str) -> Result<usize, ImportError> {
        let items = import_from_json(text)?;
        self.items = items;
        Ok(self.items.len())
    }
}
