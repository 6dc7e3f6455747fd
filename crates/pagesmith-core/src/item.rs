//! Page items: the positioned, styled, typed elements placed on a page.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an item, unique within a page.
pub type ItemId = String;

/// Smallest width or height an item may be resized to, in pixels.
pub const MINIMUM_ITEM_SIZE: f64 = 50.0;

/// Font size used by renderers when an item does not specify one, in pixels.
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// Default width of a table column, in pixels.
pub const DEFAULT_COLUMN_WIDTH: f64 = 120.0;

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// CSS keyword for this alignment.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }

    /// All accepted alignments.
    pub fn all() -> &'static [TextAlign] {
        &[TextAlign::Left, TextAlign::Center, TextAlign::Right]
    }
}

/// Font weight options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }

    pub fn all() -> &'static [FontWeight] {
        &[FontWeight::Normal, FontWeight::Bold]
    }
}

/// Font style options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }

    pub fn all() -> &'static [FontStyle] {
        &[FontStyle::Normal, FontStyle::Italic]
    }
}

/// Text decoration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
}

impl TextDecoration {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDecoration::None => "none",
            TextDecoration::Underline => "underline",
        }
    }

    pub fn all() -> &'static [TextDecoration] {
        &[TextDecoration::None, TextDecoration::Underline]
    }
}

/// A column of a table item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    /// Lookup key of the column.
    pub value: String,
    /// Header text.
    pub label: String,
    /// Column width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Alignment of the header cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
}

impl TableColumn {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            width: None,
            text_align: None,
        }
    }

    /// Width in pixels, falling back to [`DEFAULT_COLUMN_WIDTH`].
    pub fn width_or_default(&self) -> f64 {
        self.width.unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    /// Alignment, falling back to left.
    pub fn align_or_default(&self) -> TextAlign {
        self.text_align.unwrap_or_default()
    }
}

/// Table payload: column definitions plus row cell text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSpec {
    #[serde(default)]
    pub data_columns: Vec<TableColumn>,
    /// One entry per body row, one cell per column.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<Vec<String>>,
}

/// What an item renders as. Serialized as the `type` tag of the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Text,
    Image,
    Table(TableSpec),
}

impl ItemKind {
    /// The `type` tag string.
    pub fn tag(&self) -> &'static str {
        match self {
            ItemKind::Text => "text",
            ItemKind::Image => "image",
            ItemKind::Table(_) => "table",
        }
    }

    /// Size a freshly dropped item of this kind starts with.
    pub fn default_size(&self) -> Size {
        match self {
            ItemKind::Text => Size::new(200.0, 32.0),
            ItemKind::Image => Size::new(100.0, 100.0),
            ItemKind::Table(_) => Size::new(300.0, 150.0),
        }
    }
}

/// A single positioned, styled, typed element on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    #[serde(flatten)]
    pub kind: ItemKind,
    /// Human-readable label.
    pub label: String,
    /// Stable lookup key, e.g. the data field this item binds to.
    pub value: String,
    /// Top-left corner relative to the page, in pixels.
    pub position: Point,
    pub size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default)]
    pub text_decoration: TextDecoration,
}

impl Item {
    /// Create an item of the given kind at `position` with the kind's default size
    /// and a fresh id.
    pub fn new(kind: ItemKind, label: impl Into<String>, value: impl Into<String>, position: Point) -> Self {
        let size = kind.default_size();
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            label: label.into(),
            value: value.into(),
            position,
            size,
            font_family: None,
            font_size: None,
            color: None,
            text_align: TextAlign::default(),
            font_weight: FontWeight::default(),
            font_style: FontStyle::default(),
            text_decoration: TextDecoration::default(),
        }
    }

    pub fn text(label: impl Into<String>, value: impl Into<String>, position: Point) -> Self {
        Self::new(ItemKind::Text, label, value, position)
    }

    pub fn image(label: impl Into<String>, value: impl Into<String>, position: Point) -> Self {
        Self::new(ItemKind::Image, label, value, position)
    }

    pub fn table(
        label: impl Into<String>,
        value: impl Into<String>,
        position: Point,
        columns: Vec<TableColumn>,
    ) -> Self {
        Self::new(
            ItemKind::Table(TableSpec {
                data_columns: columns,
                rows: Vec::new(),
            }),
            label,
            value,
            position,
        )
    }

    /// Replace the generated id.
    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Bounding box in page pixels.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Font size in pixels, falling back to [`DEFAULT_FONT_SIZE`].
    pub fn font_size_or_default(&self) -> f64 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// Table payload, if this is a table item.
    pub fn table_spec(&self) -> Option<&TableSpec> {
        match &self.kind {
            ItemKind::Table(spec) => Some(spec),
            ItemKind::Text | ItemKind::Image => None,
        }
    }
}
