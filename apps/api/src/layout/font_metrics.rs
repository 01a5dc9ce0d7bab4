//! Static glyph-width tables and printable page geometry.
//!
//! Widths are in em units (fraction of the font size) taken from the standard
//! Helvetica, Times and Courier metrics, which stand in for the sans, serif and
//! mono stacks the templates use. They are only precise enough to estimate
//! where content crosses a page boundary; nothing is truncated on their account.
//! Tables cover ASCII 0x20..=0x7E; index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    Sans,
    Serif,
    Mono,
}

impl FontFamily {
    /// Maps a user font override to a family. Accepts generic names and a few
    /// common face names; anything else returns `None` and the template default applies.
    pub fn parse(raw: &str) -> Option<Self> {
        let lower = raw.trim().to_ascii_lowercase();
        let family = match lower.as_str() {
            "sans" | "sans-serif" | "inter" | "helvetica" | "arial" | "lato" | "roboto" => {
                FontFamily::Sans
            }
            "serif" | "times" | "georgia" | "garamond" | "merriweather" => FontFamily::Serif,
            "mono" | "monospace" | "courier" | "jetbrains mono" | "fira code" => FontFamily::Mono,
            _ => return None,
        };
        Some(family)
    }

    /// Class token applied to the render root.
    pub fn token(&self) -> &'static str {
        match self {
            FontFamily::Sans => "font-sans",
            FontFamily::Serif => "font-serif",
            FontFamily::Mono => "font-mono",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperSize {
    A4,
    Letter,
}

impl PaperSize {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "a4" => Some(PaperSize::A4),
            "letter" | "us-letter" => Some(PaperSize::Letter),
            _ => None,
        }
    }
}

/// One printable page, in PostScript points (1/72 in).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageGeometry {
    pub paper: PaperSize,
    pub width_pt: f32,
    pub height_pt: f32,
    /// Inner padding applied on every side of the page (15mm on A4).
    pub padding_pt: f32,
    /// Base body font size.
    pub body_size_pt: f32,
}

/// Returns the geometry for the given paper size.
pub fn page_geometry(paper: PaperSize) -> PageGeometry {
    let (width_pt, height_pt) = match paper {
        PaperSize::A4 => (595.28, 841.89),
        PaperSize::Letter => (612.0, 792.0),
    };
    PageGeometry {
        paper,
        width_pt,
        height_pt,
        padding_pt: 42.52,
        body_size_pt: 10.5,
    }
}

impl PageGeometry {
    /// Usable text width of a column taking `fraction` of the page, in em at `size_pt`.
    pub fn column_width_em(&self, fraction: f32, size_pt: f32) -> f32 {
        let inner = self.width_pt * fraction - 2.0 * self.padding_pt;
        (inner.max(size_pt) / size_pt).max(1.0)
    }

    /// Height available for content on one page.
    pub fn usable_height_pt(&self) -> f32 {
        self.height_pt - 2.0 * self.padding_pt
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Metric table
// ────────────────────────────────────────────────────────────────────────────

pub struct FontMetricTable {
    pub font: FontFamily,
    widths: [f32; 95],
    /// Used for characters outside printable ASCII.
    pub fallback_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Width of `s` in em.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.fallback_width
        }
    }

    /// Number of lines `text` occupies when greedily word-wrapped into `width_em`.
    ///
    /// Hard line breaks in `text` start new paragraphs; an empty paragraph still
    /// takes one line. Empty or whitespace-only text takes none.
    pub fn wrapped_lines(&self, text: &str, width_em: f32) -> u32 {
        if text.trim().is_empty() {
            return 0;
        }
        text.split('\n')
            .map(|paragraph| self.paragraph_lines(paragraph, width_em))
            .sum()
    }

    fn paragraph_lines(&self, paragraph: &str, width_em: f32) -> u32 {
        let mut lines = 1u32;
        let mut current = 0.0_f32;
        for word in paragraph.split_whitespace() {
            let w = self.measure_str(word);
            if current == 0.0 {
                current = w;
            } else if current + self.space_width + w > width_em {
                lines += 1;
                current = w;
            } else {
                current += self.space_width + w;
            }
        }
        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

static SANS_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Sans,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0-9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A-M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N-Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a-m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n-z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    fallback_width: 0.556,
    space_width: 0.278,
};

static SERIF_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Serif,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0-9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A-M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N-Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a-m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n-z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    fallback_width: 0.500,
    space_width: 0.250,
};

static MONO_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Mono,
    widths: [0.600; 95],
    fallback_width: 0.600,
    space_width: 0.600,
};

pub fn get_metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Sans => &SANS_TABLE,
        FontFamily::Serif => &SERIF_TABLE,
        FontFamily::Mono => &MONO_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
