//! Glyph widths of the PDF standard fonts used for text placement.

use pagesmith_core::{FontStyle, FontWeight};

/// Helvetica advance widths for WinAnsi codes 32..=126, in 1/1000 em.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Helvetica-Bold advance widths for WinAnsi codes 32..=126, in 1/1000 em.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0..?
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // P.._
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // `..o
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // p..~
];

/// Width used for characters outside the table.
const FALLBACK_WIDTH: u16 = 556;

/// Courier is monospaced.
const COURIER_WIDTH: u16 = 600;

/// Standard font families available without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Helvetica,
    Courier,
}

impl FontFamily {
    /// Pick a standard family for a CSS `font-family` value.
    pub fn from_css(css: Option<&str>) -> Self {
        let Some(css) = css else {
            return FontFamily::Helvetica;
        };
        let css = css.to_ascii_lowercase();
        if css.contains("mono") || css.contains("courier") {
            FontFamily::Courier
        } else {
            FontFamily::Helvetica
        }
    }
}

/// One of the four faces of a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl FontFace {
    pub fn from_style(weight: FontWeight, style: FontStyle) -> Self {
        match (weight, style) {
            (FontWeight::Normal, FontStyle::Normal) => FontFace::Normal,
            (FontWeight::Bold, FontStyle::Normal) => FontFace::Bold,
            (FontWeight::Normal, FontStyle::Italic) => FontFace::Italic,
            (FontWeight::Bold, FontStyle::Italic) => FontFace::BoldItalic,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, FontFace::Bold | FontFace::BoldItalic)
    }
}

/// A concrete standard font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StandardFont {
    pub family: FontFamily,
    pub face: FontFace,
}

impl StandardFont {
    /// Every font the PDF renderer registers, in resource order.
    pub const ALL: [StandardFont; 8] = [
        StandardFont::new(FontFamily::Helvetica, FontFace::Normal),
        StandardFont::new(FontFamily::Helvetica, FontFace::Bold),
        StandardFont::new(FontFamily::Helvetica, FontFace::Italic),
        StandardFont::new(FontFamily::Helvetica, FontFace::BoldItalic),
        StandardFont::new(FontFamily::Courier, FontFace::Normal),
        StandardFont::new(FontFamily::Courier, FontFace::Bold),
        StandardFont::new(FontFamily::Courier, FontFace::Italic),
        StandardFont::new(FontFamily::Courier, FontFace::BoldItalic),
    ];

    pub const fn new(family: FontFamily, face: FontFace) -> Self {
        Self { family, face }
    }

    /// PostScript name of the font.
    pub fn base_font(&self) -> &'static str {
        match (self.family, self.face) {
            (FontFamily::Helvetica, FontFace::Normal) => "Helvetica",
            (FontFamily::Helvetica, FontFace::Bold) => "Helvetica-Bold",
            (FontFamily::Helvetica, FontFace::Italic) => "Helvetica-Oblique",
            (FontFamily::Helvetica, FontFace::BoldItalic) => "Helvetica-BoldOblique",
            (FontFamily::Courier, FontFace::Normal) => "Courier",
            (FontFamily::Courier, FontFace::Bold) => "Courier-Bold",
            (FontFamily::Courier, FontFace::Italic) => "Courier-Oblique",
            (FontFamily::Courier, FontFace::BoldItalic) => "Courier-BoldOblique",
        }
    }

    /// Resource name (`F1`..`F8`) under which the font is registered.
    pub fn resource_name(&self) -> String {
        let index = Self::ALL
            .iter()
            .position(|font| font == self)
            .unwrap_or_default();
        format!("F{}", index + 1)
    }

    /// Advance width of `text` in points at `size` points.
    pub fn text_width(&self, text: &str, size: f64) -> f64 {
        let units: u32 = text.chars().map(|c| u32::from(self.glyph_width(c))).sum();
        f64::from(units) * size / 1000.0
    }

    fn glyph_width(&self, c: char) -> u16 {
        if self.family == FontFamily::Courier {
            return COURIER_WIDTH;
        }
        // Oblique faces share the upright widths.
        let table = if self.face.is_bold() {
            &HELVETICA_BOLD
        } else {
            &HELVETICA
        };
        let code = c as u32;
        if (32..=126).contains(&code) {
            table[(code - 32) as usize]
        } else {
            FALLBACK_WIDTH
        }
    }
}
