//! Standalone HTML rendering of a page.

use crate::escape::escape;
use pagesmith_core::{Item, ItemKind, TableSpec};

/// Border/padding shared by header and body cells.
const CELL_STYLE: &str = "border:1px solid #d1d5db;padding:8px";

/// Placeholder drawn for image items; no image data is embedded.
const IMAGE_PLACEHOLDER: &str = r##"<div style="width:100%;height:100%;display:flex;align-items:center;justify-content:center;">
          <div style="width:100%;height:100%;background:#f1f5f9;border:1px dashed #d1d5db;border-radius:6px;display:flex;align-items:center;justify-content:center;">
            <svg width="20" height="16" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg" aria-hidden="true">
              <rect x="3" y="3" width="18" height="14" rx="1.5" stroke="#6b7280" stroke-width="1.2" fill="none" />
              <circle cx="8" cy="8" r="1.5" fill="#6b7280" />
              <path d="M3 17l5-6 4 5 3-4 6 6" stroke="#6b7280" stroke-width="1.2" fill="none" stroke-linecap="round" stroke-linejoin="round" />
            </svg>
          </div>
        </div>"##;

const EXPORT_CSS: &str = r#"
    .preview-container {
      overflow: auto;
      padding: 20px;
      display: flex;
      justify-content: center;
    }

    .page {
      width: 210mm;
      min-height: 297mm;
      background: white;
      position: relative;
      box-shadow: 0 0 10px rgba(0, 0, 0, 0.1);
      margin: 0 auto;
    }

    .item {
      position: absolute;
      line-height: 1.5;
    }

    @media print {
      .preview-container {
        padding: 0;
      }
      .page {
        margin: 0;
        padding: 20px;
        -webkit-print-color-adjust: exact;
        print-color-adjust: exact;
        box-shadow: none;
      }
    }
"#;

const PRINT_CSS: &str = r#"
    @page {
      size: A4;
      margin: 0;
    }

    body {
      margin: 0;
      padding: 0;
      font-family: Arial, sans-serif;
    }

    .print-container {
      width: 210mm;
      min-height: 297mm;
      background: white;
      position: relative;
      padding: 20px;
      margin: 0 auto;
    }

    .item {
      position: absolute;
      line-height: 1.5;
    }

    @media print {
      body {
        -webkit-print-color-adjust: exact;
        print-color-adjust: exact;
      }
      .print-container {
        margin: 0;
        padding: 20px;
        box-shadow: none;
      }
    }
"#;

/// Which document shell to wrap the items in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlLayout {
    /// Downloadable preview page.
    Export,
    /// Document written into a print window.
    Print,
}

impl HtmlLayout {
    fn css(&self) -> &'static str {
        match self {
            HtmlLayout::Export => EXPORT_CSS,
            HtmlLayout::Print => PRINT_CSS,
        }
    }

    fn default_font_family(&self) -> &'static str {
        match self {
            HtmlLayout::Export => "sans-serif",
            HtmlLayout::Print => "Arial, sans-serif",
        }
    }
}

/// Render a complete, dependency-free HTML document.
pub fn render_document(items: &[Item], title: &str, layout: HtmlLayout) -> String {
    let mut body = String::new();
    for item in items {
        body.push_str(&render_item(item, layout));
    }

    let page = match layout {
        HtmlLayout::Export => format!(
            "<div class=\"preview-container\">\n    <div class=\"page\">\n{body}    </div>\n  </div>"
        ),
        HtmlLayout::Print => format!("<div class=\"print-container\">\n{body}  </div>"),
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n  <title>{}</title>\n  <style>{}  </style>\n</head>\n<body>\n  {}\n</body>\n</html>\n",
        escape(title),
        layout.css(),
        page
    )
}

/// Render one absolutely positioned item.
pub fn render_item(item: &Item, layout: HtmlLayout) -> String {
    let content = match &item.kind {
        ItemKind::Text => escape(&item.label).into_owned(),
        ItemKind::Image => IMAGE_PLACEHOLDER.to_string(),
        ItemKind::Table(table) => render_table(table),
    };

    format!(
        "      <div class=\"item\" data-type=\"{}\" data-key=\"{}\" style=\"{}\">\n        {}\n      </div>\n",
        item.kind.tag(),
        escape(&item.value),
        item_style(item, layout),
        content
    )
}

/// Inline style from the item's geometry and style fields.
fn item_style(item: &Item, layout: HtmlLayout) -> String {
    let font_family = css_value(item.font_family.as_deref(), layout.default_font_family());
    let color = css_value(item.color.as_deref(), "#000");

    format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; min-height: {}px; \
         font-family: {}; font-size: {}px; color: {}; text-align: {}; font-weight: {}; \
         font-style: {}; text-decoration: {}; line-height: 1.5;",
        item.position.x,
        item.position.y,
        item.size.width,
        item.size.height,
        escape(font_family),
        item.font_size_or_default(),
        escape(color),
        item.text_align.as_str(),
        item.font_weight.as_str(),
        item.font_style.as_str(),
        item.text_decoration.as_str(),
    )
}

/// A single CSS declaration value; anything that could end the declaration
/// or open a block falls back to `default`.
fn css_value<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(value) if value.contains([';', '{', '}']) => {
            log::warn!("Ignoring unsafe style value {:?}", value);
            default
        }
        Some(value) => value,
        None => default,
    }
}

/// Bordered table: one header cell per column, one body cell per column and row.
fn render_table(table: &TableSpec) -> String {
    let mut header = String::new();
    for column in &table.data_columns {
        header.push_str(&format!(
            "<th data-key=\"{}\" style=\"{CELL_STYLE};text-align:{};width:{}px\">{}</th>",
            escape(&column.value),
            column.align_or_default().as_str(),
            column.width_or_default(),
            escape(&column.label)
        ));
    }

    let empty_row = [Vec::new()];
    let rows: &[Vec<String>] = if table.rows.is_empty() {
        &empty_row
    } else {
        &table.rows
    };

    let mut body = String::new();
    for row in rows {
        body.push_str("<tr>");
        for (index, _) in table.data_columns.iter().enumerate() {
            let cell = row.get(index).map(String::as_str).unwrap_or_default();
            body.push_str(&format!(
                "<td style=\"{CELL_STYLE};text-align:left\">{}</td>",
                escape(cell)
            ));
        }
        body.push_str("</tr>");
    }

    format!(
        "<table style=\"border-collapse:collapse;width:100%;min-width:100%\">\
         <thead><tr>{header}</tr></thead><tbody>{body}</tbody></table>"
    )
}
