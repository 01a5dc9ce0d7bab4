//! Output types of the renderer.
//!
//! A `RenderTree` is plain data: the print/export side walks it and maps tokens
//! to markup. Nothing here knows about template ids.

use serde::Serialize;

use crate::layout::font_metrics::{FontFamily, PageGeometry};
use crate::layout::sections::{Region, SectionKind};
use crate::models::resume::ColorScheme;
use crate::templates::LayoutShape;

/// Element id of the single addressable root the print side captures.
pub const PREVIEW_ROOT_ID: &str = "resume-preview";

/// Skills strictly above this level (1–5 scale) carry a star marker.
pub const SKILL_STAR_THRESHOLD: u8 = 3;

#[derive(Debug, Clone, Serialize)]
pub struct RenderTree {
    pub root_id: &'static str,
    pub template_id: &'static str,
    pub layout_shape: LayoutShape,
    pub font: FontFamily,
    /// Template container classes with the family class matching `font`.
    pub container_token: String,
    pub colors: ColorScheme,
    pub compact: bool,
    pub spacing: SpacingTokens,
    pub page: PageGeometry,
    pub header: HeaderBlock,
    /// Regions in visual left-to-right order.
    pub regions: Vec<RegionNode>,
    pub page_breaks: Vec<PageBreak>,
    /// Estimated number of printed pages, at least 1.
    pub page_count: u32,
}

impl RenderTree {
    pub fn region(&self, region: Region) -> Option<&RegionNode> {
        self.regions.iter().find(|r| r.region == region)
    }

    /// All section blocks, region by region in visual order.
    pub fn sections(&self) -> impl Iterator<Item = &SectionBlock> {
        self.regions.iter().flat_map(|r| r.sections.iter())
    }

    pub fn titles(&self) -> Vec<&str> {
        self.sections().map(|s| s.title).collect()
    }
}

/// Vertical rhythm. Compact mode swaps in the tight set; content is unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpacingTokens {
    pub section_gap_pt: f32,
    pub item_gap_pt: f32,
    pub line_height: f32,
    pub section_token: &'static str,
    pub item_token: &'static str,
}

pub const NORMAL_SPACING: SpacingTokens = SpacingTokens {
    section_gap_pt: 24.0,
    item_gap_pt: 16.0,
    line_height: 1.5,
    section_token: "mb-6",
    item_token: "space-y-4",
};

pub const COMPACT_SPACING: SpacingTokens = SpacingTokens {
    section_gap_pt: 14.0,
    item_gap_pt: 8.0,
    line_height: 1.25,
    section_token: "mb-3",
    item_token: "space-y-2",
};

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct HeaderBlock {
    pub region: Region,
    pub token: &'static str,
    pub name_token: &'static str,
    pub headline_token: &'static str,
    pub contact_token: &'static str,
    pub name: String,
    pub headline: Option<String>,
    pub contacts: Vec<ContactEntry>,
    pub contact_placement: ContactPlacement,
    pub photo: PhotoSlot,
    /// Name block is centred across the page (single-column, no photo).
    pub centered: bool,
    pub estimated_height_pt: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Email,
    Phone,
    Location,
    Website,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactEntry {
    pub kind: ContactKind,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactPlacement {
    /// Inside the name block, directly under the headline.
    WithName,
    /// On its own row under the photo and name row.
    BelowRow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhotoSlot {
    Absent,
    /// Round photo beside the name.
    Inline { src: String },
    /// Avatar circle above the name in a coloured sidebar; drawn as a
    /// placeholder glyph when `src` is `None`.
    Avatar { src: Option<String> },
}

// ────────────────────────────────────────────────────────────────────────────
// Regions and sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RegionNode {
    pub region: Region,
    pub token: &'static str,
    pub sections: Vec<SectionBlock>,
    /// Header (if placed here) plus every section block.
    pub content_height_pt: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemArrangement {
    Stacked,
    /// Wrapped row of chips; used for skills in the main column.
    Chips,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionBlock {
    pub kind: SectionKind,
    pub region: Region,
    pub title: &'static str,
    pub title_token: &'static str,
    pub arrangement: ItemArrangement,
    pub items: Vec<ItemNode>,
    pub estimated_height_pt: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemNode {
    Text {
        text: String,
    },
    Entry {
        id: String,
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        period: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        tags: Vec<String>,
    },
    Skill {
        id: String,
        name: String,
        level: u8,
        starred: bool,
        token: &'static str,
    },
    Language {
        id: String,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fluency: Option<String>,
    },
}

/// Advisory marker where a region's content crosses a printed page boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageBreak {
    pub region: Region,
    /// Page that begins at this marker (2 for the first boundary).
    pub page: u32,
    /// Distance from the top of the region's content.
    pub offset_pt: f32,
    /// Section straddling the boundary; `None` when it falls inside the header.
    pub within: Option<SectionKind>,
}
