//! Single-page A4 PDF rendering.

use crate::metrics::{FontFace, FontFamily, StandardFont};
use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, StringFormat, Stream, dictionary};
use pagesmith_core::{Item, ItemKind, PageSize, TableSpec, TextAlign, TextDecoration, px_to_mm};
use peniko::color::{Srgb, parse_color};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Points per millimetre.
const PT_PER_MM: f64 = 72.0 / 25.4;

/// CSS pixels to points.
const PT_PER_PX: f64 = 0.75;

/// PDF generation errors.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to encode page content: {0}")]
    Content(String),
    #[error("Failed to write PDF: {0}")]
    Write(String),
}

/// Layout constants for PDF output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PdfOptions {
    pub page: PageSize,
    /// Offset added to every item position, matching the print container padding.
    pub page_padding_mm: f64,
    /// Height of a table band.
    pub row_height_mm: f64,
    /// Inset of cell text from the cell's left and bottom edges.
    pub cell_padding_mm: f64,
    /// Line height as a multiple of the font size.
    pub line_height_factor: f64,
    /// Document title written to the info dictionary.
    pub title: String,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            page: PageSize::A4,
            page_padding_mm: px_to_mm(20.0),
            row_height_mm: 8.0,
            cell_padding_mm: 2.0,
            line_height_factor: 1.5,
            title: "template".to_string(),
        }
    }
}

/// Render `items` onto a single page and return the PDF bytes.
pub fn render_pdf(items: &[Item], options: &PdfOptions) -> Result<Vec<u8>, PdfError> {
    let mut canvas = PageCanvas::new(options);
    for item in items {
        canvas.draw_item(item);
    }
    build_document(canvas.operations, options)
}

fn build_document(operations: Vec<Operation>, options: &PdfOptions) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::with_version("1.4");
    let id_pages = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in StandardFont::ALL {
        let id_font = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), id_font);
    }
    let id_resources = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let content = Content { operations };
    let encoded = content
        .encode()
        .map_err(|e| PdfError::Content(e.to_string()))?;
    let id_content = doc.add_object(Stream::new(dictionary! {}, encoded));

    let id_page = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => id_pages,
        "Contents" => id_content,
        "Resources" => id_resources,
    });

    let kids: Vec<Object> = vec![id_page.into()];
    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        pt(options.page.width_mm * PT_PER_MM),
        pt(options.page.height_mm * PT_PER_MM),
    ];
    doc.set_object(
        id_pages,
        dictionary! {
            "Type" => "Pages",
            "Count" => 1,
            "Kids" => kids,
            "MediaBox" => media_box,
        },
    );

    let id_catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => id_pages,
    });
    doc.trailer.set("Root", id_catalog);

    let date = Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
    let id_info = doc.add_object(dictionary! {
        "Title" => Object::string_literal(options.title.as_str()),
        "Creator" => Object::string_literal("pagesmith"),
        "CreationDate" => Object::string_literal(date.as_str()),
    });
    doc.trailer.set("Info", id_info);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| PdfError::Write(e.to_string()))?;
    Ok(buffer)
}

/// Accumulates content-stream operations in page millimetre coordinates.
struct PageCanvas<'a> {
    options: &'a PdfOptions,
    operations: Vec<Operation>,
}

impl<'a> PageCanvas<'a> {
    fn new(options: &'a PdfOptions) -> Self {
        Self {
            options,
            operations: Vec::new(),
        }
    }

    fn draw_item(&mut self, item: &Item) {
        match &item.kind {
            ItemKind::Text => self.draw_text_item(item),
            ItemKind::Image => self.draw_image_placeholder(item),
            ItemKind::Table(table) => self.draw_table(item, table),
        }
    }

    /// Item top-left and width in page millimetres.
    fn item_origin(&self, item: &Item) -> (f64, f64, f64) {
        let padding = self.options.page_padding_mm;
        (
            px_to_mm(item.position.x) + padding,
            px_to_mm(item.position.y) + padding,
            px_to_mm(item.size.width),
        )
    }

    fn draw_text_item(&mut self, item: &Item) {
        let (x, y, width) = self.item_origin(item);
        let font = item_font(item);
        let font_px = item.font_size_or_default();
        let size_pt = font_px * PT_PER_PX;
        let size_mm = px_to_mm(font_px);
        let line_height = size_mm * self.options.line_height_factor;

        self.set_fill_color(item.color.as_deref());
        for (index, line) in text_lines(&item.label).enumerate() {
            let text_width = font.text_width(line, size_pt) / PT_PER_MM;
            let line_x = match item.text_align {
                TextAlign::Left => x,
                TextAlign::Center => x + width / 2.0 - text_width / 2.0,
                TextAlign::Right => x + width - text_width,
            };
            let baseline = y + size_mm + index as f64 * line_height;
            self.text(line, font, size_pt, line_x, baseline);

            if item.text_decoration == TextDecoration::Underline && !line.is_empty() {
                let underline_y = baseline + size_mm * 0.1;
                self.set_stroke_color(item.color.as_deref());
                self.line(line_x, underline_y, line_x + text_width, underline_y, size_pt / 15.0);
            }
        }
    }

    fn draw_image_placeholder(&mut self, item: &Item) {
        let (x, y, width) = self.item_origin(item);
        let height = px_to_mm(item.size.height);
        self.push("q", vec![]);
        self.push("RG", rgb(209, 213, 219));
        self.push("d", vec![vec![pt(1.0), pt(1.0)].into(), 0.into()]);
        self.rect(x, y, width, height, 0.75);
        self.push("Q", vec![]);
    }

    /// Header band then one band per row; an empty band when there are no rows.
    fn draw_table(&mut self, item: &Item, table: &TableSpec) {
        let columns = table.data_columns.len();
        if columns == 0 {
            return;
        }
        let (x, y, width) = self.item_origin(item);
        let cell_width = width / columns as f64;
        let row_height = self.options.row_height_mm;
        let inset = self.options.cell_padding_mm;
        let size_pt = item.font_size_or_default() * PT_PER_PX;
        let family = FontFamily::from_css(item.font_family.as_deref());
        let header_font = StandardFont::new(family, FontFace::Bold);
        let body_font = StandardFont::new(family, FontFace::Normal);

        let header: Vec<&str> = table.data_columns.iter().map(|c| c.label.as_str()).collect();
        let mut bands = vec![(header, header_font)];
        if table.rows.is_empty() {
            bands.push((vec![""; columns], body_font));
        }
        for row in &table.rows {
            let cells = (0..columns)
                .map(|i| row.get(i).map(String::as_str).unwrap_or_default())
                .collect();
            bands.push((cells, body_font));
        }

        self.push("RG", rgb(209, 213, 219));
        self.set_fill_color(item.color.as_deref());
        for (band, (cells, font)) in bands.iter().enumerate() {
            let top = y + band as f64 * row_height;
            for (column, cell) in cells.iter().enumerate() {
                let left = x + column as f64 * cell_width;
                self.rect(left, top, cell_width, row_height, 0.5);
                if !cell.is_empty() {
                    self.text(cell, *font, size_pt, left + inset, top + row_height - inset);
                }
            }
        }
    }

    fn text(&mut self, text: &str, font: StandardFont, size_pt: f64, x_mm: f64, baseline_mm: f64) {
        self.push("BT", vec![]);
        self.push(
            "Tf",
            vec![font.resource_name().as_str().into(), pt(size_pt)],
        );
        self.push("Td", vec![pt(x_mm * PT_PER_MM), pt(self.pdf_y(baseline_mm))]);
        self.push(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    fn rect(&mut self, x_mm: f64, top_mm: f64, width_mm: f64, height_mm: f64, line_width: f64) {
        self.push("w", vec![pt(line_width)]);
        self.push(
            "re",
            vec![
                pt(x_mm * PT_PER_MM),
                pt(self.pdf_y(top_mm + height_mm)),
                pt(width_mm * PT_PER_MM),
                pt(height_mm * PT_PER_MM),
            ],
        );
        self.push("S", vec![]);
    }

    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, line_width: f64) {
        self.push("w", vec![pt(line_width)]);
        self.push("m", vec![pt(x0 * PT_PER_MM), pt(self.pdf_y(y0))]);
        self.push("l", vec![pt(x1 * PT_PER_MM), pt(self.pdf_y(y1))]);
        self.push("S", vec![]);
    }

    fn set_fill_color(&mut self, css: Option<&str>) {
        let (r, g, b) = css_rgb(css);
        self.push("rg", rgb(r, g, b));
    }

    fn set_stroke_color(&mut self, css: Option<&str>) {
        let (r, g, b) = css_rgb(css);
        self.push("RG", rgb(r, g, b));
    }

    /// PDF y grows upward from the bottom edge.
    fn pdf_y(&self, y_mm: f64) -> f64 {
        (self.options.page.height_mm - y_mm) * PT_PER_MM
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }
}

/// Split on `\r\n`, `\n` and lone `\r`. A trailing line break adds no line.
fn text_lines(text: &str) -> impl Iterator<Item = &str> {
    let text = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix(['\n', '\r']))
        .unwrap_or(text);
    (!text.is_empty())
        .then_some(text)
        .into_iter()
        .flat_map(|text| text.split('\n'))
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

fn item_font(item: &Item) -> StandardFont {
    StandardFont::new(
        FontFamily::from_css(item.font_family.as_deref()),
        FontFace::from_style(item.font_weight, item.font_style),
    )
}

fn pt(value: f64) -> Object {
    (value as f32).into()
}

fn rgb(r: u8, g: u8, b: u8) -> Vec<Object> {
    [r, g, b]
        .into_iter()
        .map(|channel| pt(f64::from(channel) / 255.0))
        .collect()
}

/// Resolve a CSS color, falling back to black for absent or unparseable values.
fn css_rgb(css: Option<&str>) -> (u8, u8, u8) {
    let Some(css) = css else {
        return (0, 0, 0);
    };
    match parse_color(css) {
        Ok(color) => {
            let rgba = color.to_alpha_color::<Srgb>().to_rgba8();
            (rgba.r, rgba.g, rgba.b)
        }
        Err(_) => {
            log::warn!("Unsupported color {:?}, using black", css);
            (0, 0, 0)
        }
    }
}

/// Encode for the WinAnsi standard font encoding; unmappable characters become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(byte) if byte >= 0x20 && !(0x7f..0xa0).contains(&byte) => byte,
            _ => b'?',
        })
        .collect()
}
