//! Built-in template descriptors and the lookup that resolves a template id to one.
//!
//! Descriptors are plain data. Rendering code branches on `layout_shape`,
//! `header_placement` and the token fields, never on template ids.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::layout::font_metrics::FontFamily;
use crate::layout::sections::{Region, SectionKind};

/// Template used for new documents and for any id not present in the table.
pub const DEFAULT_TEMPLATE_ID: &str = "onyx";

// ────────────────────────────────────────────────────────────────────────────
// Descriptor types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutShape {
    SingleColumn,
    TwoColumnLeft,
    TwoColumnRight,
}

impl LayoutShape {
    pub fn has_sidebar(&self) -> bool {
        !matches!(self, LayoutShape::SingleColumn)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "single-column" => Some(LayoutShape::SingleColumn),
            "two-column-left" => Some(LayoutShape::TwoColumnLeft),
            "two-column-right" => Some(LayoutShape::TwoColumnRight),
            _ => None,
        }
    }
}

/// Reads an optional stored shape tag; unrecognized values read as absent.
pub fn deserialize_shape_lenient<'de, D>(deserializer: D) -> Result<Option<LayoutShape>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|name| {
        let shape = LayoutShape::parse(&name);
        if shape.is_none() {
            debug!("ignoring unknown layout shape '{name}' on stored layout");
        }
        shape
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleFamily {
    Modern,
    Classic,
    Minimal,
    Bold,
}

/// Where the identity block (name, headline, contacts, photo) is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderPlacement {
    /// Top of the main column (or of the page for single-column templates).
    Main,
    /// Top of the coloured sidebar, with a round avatar slot above the name.
    Sidebar,
}

/// CSS-like class tokens handed through to the consumer untouched.
#[derive(Debug, Clone, Serialize)]
pub struct StyleTokens {
    pub container: &'static str,
    pub header: &'static str,
    pub name: &'static str,
    pub headline: &'static str,
    pub contact_row: &'static str,
    pub main: &'static str,
    pub sidebar: &'static str,
    pub section_title_main: &'static str,
    pub section_title_sidebar: &'static str,
    pub skill_chip: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateStyle {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub style: StyleFamily,
    pub layout_shape: LayoutShape,
    pub has_photo: bool,
    pub header_placement: HeaderPlacement,
    pub font: FontFamily,
    /// Share of the page width taken by the sidebar; 0.0 for single-column templates.
    pub sidebar_fraction: f32,
    pub tokens: StyleTokens,
    /// Heading overrides for specific kinds; anything absent uses the kind's default title.
    #[serde(skip)]
    pub title_overrides: &'static [(SectionKind, &'static str)],
}

impl TemplateStyle {
    pub fn section_title(&self, kind: SectionKind) -> &'static str {
        self.title_overrides
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, title)| *title)
            .unwrap_or_else(|| kind.default_title())
    }

    /// Title token for a section block in the given region.
    pub fn title_token(&self, region: Region) -> &'static str {
        match region {
            Region::Main => self.tokens.section_title_main,
            Region::Sidebar => self.tokens.section_title_sidebar,
        }
    }
}

/// Catalog entry consumed by the template gallery.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateCatalogEntry {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub layout_shape: LayoutShape,
    pub style: StyleFamily,
    pub tags: &'static [&'static str],
    pub has_photo: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Lookup
// ────────────────────────────────────────────────────────────────────────────

/// Resolves a template id to its descriptor. Unknown ids fall back to
/// [`DEFAULT_TEMPLATE_ID`]; this never fails.
pub fn resolve_style(template_id: &str) -> &'static TemplateStyle {
    let wanted = template_id.trim();
    if let Some(style) = TEMPLATES.iter().find(|t| t.id.eq_ignore_ascii_case(wanted)) {
        return style;
    }
    warn!("unknown template id '{wanted}', falling back to '{DEFAULT_TEMPLATE_ID}'");
    default_style()
}

fn default_style() -> &'static TemplateStyle {
    // The table is a compile-time constant and index 0 is the default.
    &TEMPLATES[0]
}

/// All built-in templates in display order.
pub fn catalog() -> Vec<TemplateCatalogEntry> {
    TEMPLATES
        .iter()
        .map(|t| TemplateCatalogEntry {
            id: t.id,
            display_name: t.display_name,
            description: t.description,
            layout_shape: t.layout_shape,
            style: t.style,
            tags: t.tags,
            has_photo: t.has_photo,
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Table
// ────────────────────────────────────────────────────────────────────────────

const NO_OVERRIDES: &[(SectionKind, &str)] = &[];

static TEMPLATES: [TemplateStyle; 10] = [
    TemplateStyle {
        id: "onyx",
        display_name: "Onyx",
        description: "Standard ATS-optimized single column layout.",
        tags: &["ATS-Friendly", "Minimal"],
        style: StyleFamily::Minimal,
        layout_shape: LayoutShape::SingleColumn,
        has_photo: true,
        header_placement: HeaderPlacement::Main,
        font: FontFamily::Sans,
        sidebar_fraction: 0.0,
        tokens: StyleTokens {
            container: "font-sans bg-white text-gray-900",
            header: "border-b-2 border-gray-900 pb-6 mb-6",
            name: "text-4xl font-bold uppercase tracking-tight",
            headline: "text-xl text-gray-600 mt-1 font-light",
            contact_row: "flex flex-wrap gap-4 mt-4 text-sm text-gray-600",
            main: "",
            sidebar: "",
            section_title_main: "text-xs font-bold uppercase tracking-widest border-b border-gray-200 pb-1 mb-4 text-gray-500",
            section_title_sidebar: "text-xs font-bold uppercase tracking-widest border-b border-gray-200 pb-1 mb-4 text-gray-500",
            skill_chip: "bg-gray-100 px-2 py-1 rounded text-gray-700",
        },
        title_overrides: NO_OVERRIDES,
    },
    TemplateStyle {
        id: "azurill",
        display_name: "Azurill",
        description: "Clean layout with blue accents, high readability.",
        tags: &["ATS-Friendly", "Modern"],
        style: StyleFamily::Modern,
        layout_shape: LayoutShape::TwoColumnLeft,
        has_photo: true,
        header_placement: HeaderPlacement::Main,
        font: FontFamily::Sans,
        sidebar_fraction: 0.32,
        tokens: StyleTokens {
            container: "font-sans bg-white flex h-full",
            header: "mb-8 border-b border-gray-100 pb-8",
            name: "text-3xl font-bold text-slate-900 leading-tight mb-2",
            headline: "text-lg text-blue-600 font-medium mb-6",
            contact_row: "flex flex-wrap gap-4 mt-4 text-sm",
            main: "flex-1 p-8 pt-12 text-slate-800",
            sidebar: "w-[32%] bg-slate-100 p-8 h-full border-r border-slate-200 text-slate-700 pt-12",
            section_title_main: "text-xl font-bold text-slate-900 mb-4",
            section_title_sidebar: "text-sm font-bold uppercase tracking-wider text-slate-900 mb-3 mt-8 border-b-2 border-blue-200 pb-1",
            skill_chip: "bg-gray-100 px-2 py-1 rounded text-gray-700",
        },
        title_overrides: NO_OVERRIDES,
    },
    TemplateStyle {
        id: "bronzor",
        display_name: "Bronzor",
        description: "Professional serif typography for executives.",
        tags: &["Executive", "Classic"],
        style: StyleFamily::Classic,
        layout_shape: LayoutShape::SingleColumn,
        has_photo: true,
        header_placement: HeaderPlacement::Main,
        font: FontFamily::Serif,
        sidebar_fraction: 0.0,
        tokens: StyleTokens {
            container: "font-serif bg-[#fdfbf7] text-[#2c2420]",
            header: "text-center border-b border-double border-[#8c7b75] pb-6 mb-8",
            name: "text-4xl font-serif font-bold text-[#4a3b32]",
            headline: "text-lg italic text-[#8c7b75] mt-2",
            contact_row: "flex justify-center gap-6 mt-4 text-sm text-[#5d4d44]",
            main: "",
            sidebar: "",
            section_title_main: "text-center text-lg font-bold uppercase tracking-widest text-[#4a3b32] mb-6 border-b border-[#e5e0d8] pb-2",
            section_title_sidebar: "text-center text-lg font-bold uppercase tracking-widest text-[#4a3b32] mb-6 border-b border-[#e5e0d8] pb-2",
            skill_chip: "bg-gray-100 px-2 py-1 rounded text-gray-700",
        },
        title_overrides: NO_OVERRIDES,
    },
    TemplateStyle {
        id: "chikorita",
        display_name: "Chikorita",
        description: "Nature-inspired green, balanced spacing.",
        tags: &["Creative", "Soft"],
        style: StyleFamily::Modern,
        layout_shape: LayoutShape::TwoColumnRight,
        has_photo: true,
        header_placement: HeaderPlacement::Main,
        font: FontFamily::Sans,
        sidebar_fraction: 0.30,
        tokens: StyleTokens {
            container: "font-sans bg-white flex h-full",
            header: "mb-8",
            name: "text-3xl font-bold text-emerald-800",
            headline: "text-lg text-emerald-600 mb-6",
            contact_row: "flex flex-wrap gap-4 mt-4 text-sm",
            main: "flex-1 p-8 pt-10 text-gray-800 order-1",
            sidebar: "w-[30%] bg-emerald-50 p-6 h-full border-l border-emerald-100 text-emerald-900 pt-10 order-2",
            section_title_main: "text-lg font-bold text-emerald-900 mb-4 border-b border-emerald-100 pb-2",
            section_title_sidebar: "text-xs font-bold uppercase text-emerald-700 mb-3 mt-6",
            skill_chip: "bg-gray-100 px-2 py-1 rounded text-gray-700",
        },
        title_overrides: &[
            (SectionKind::Summary, "Professional Summary"),
            (SectionKind::Experience, "Work Experience"),
        ],
    },
    TemplateStyle {
        id: "ditto",
        display_name: "Ditto",
        description: "Adaptable layout that fits any content length.",
        tags: &["Versatile", "Modern"],
        style: StyleFamily::Bold,
        layout_shape: LayoutShape::SingleColumn,
        has_photo: true,
        header_placement: HeaderPlacement::Main,
        font: FontFamily::Sans,
        sidebar_fraction: 0.0,
        tokens: StyleTokens {
            container: "font-sans bg-white text-black",
            header: "bg-black text-white p-8 mb-8",
            name: "text-4xl font-bold",
            headline: "text-gray-300 text-lg",
            contact_row: "flex flex-wrap gap-6 mt-4 text-sm text-gray-400",
            main: "",
            sidebar: "",
            section_title_main: "text-xl font-black uppercase mb-4 border-b-4 border-black inline-block",
            section_title_sidebar: "text-xl font-black uppercase mb-4 border-b-4 border-black inline-block",
            skill_chip: "bg-gray-100 px-2 py-1 rounded text-gray-700",
        },
        title_overrides: NO_OVERRIDES,
    },
    TemplateStyle {
        id: "gengar",
        display_name: "Gengar",
        description: "Bold headers with high contrast.",
        tags: &["Bold", "High Contrast"],
        style: StyleFamily::Bold,
        layout_shape: LayoutShape::TwoColumnLeft,
        has_photo: true,
        header_placement: HeaderPlacement::Sidebar,
        font: FontFamily::Sans,
        sidebar_fraction: 0.35,
        tokens: StyleTokens {
            container: "font-sans bg-white flex h-full",
            header: "mb-8",
            name: "text-3xl font-bold text-white mb-2",
            headline: "text-purple-200 text-lg mb-8",
            contact_row: "flex flex-col gap-2 text-sm opacity-80 mt-4",
            main: "flex-1 p-10 pt-16 text-gray-800",
            sidebar: "w-[35%] bg-[#1e1b4b] text-white p-8 h-full pt-16",
            section_title_main: "text-2xl font-bold text-[#1e1b4b] mb-6 border-l-4 border-[#1e1b4b] pl-3 uppercase tracking-tight",
            section_title_sidebar: "text-sm font-bold uppercase tracking-wider text-purple-200 mb-4 mt-8 border-b border-purple-800 pb-1",
            skill_chip: "text-purple-100 bg-white/10 px-2 py-1 rounded",
        },
        title_overrides: NO_OVERRIDES,
    },
    TemplateStyle {
        id: "glalie",
        display_name: "Glalie",
        description: "Ice cool tones, extremely structured data.",
        tags: &["Structured", "Technical"],
        style: StyleFamily::Modern,
        layout_shape: LayoutShape::SingleColumn,
        has_photo: false,
        header_placement: HeaderPlacement::Main,
        font: FontFamily::Mono,
        sidebar_fraction: 0.0,
        tokens: StyleTokens {
            container: "font-mono text-sm bg-white text-gray-800",
            header: "mb-8 p-6 bg-gray-50 border-b border-gray-200",
            name: "text-2xl font-bold text-black",
            headline: "text-gray-500",
            contact_row: "grid grid-cols-2 gap-2 mt-4 text-xs",
            main: "",
            sidebar: "",
            section_title_main: "text-sm font-bold bg-gray-100 p-1 pl-2 mb-4 border-l-4 border-gray-400",
            section_title_sidebar: "text-sm font-bold bg-gray-100 p-1 pl-2 mb-4 border-l-4 border-gray-400",
            skill_chip: "font-mono bg-gray-100 px-2 py-1 rounded text-gray-700",
        },
        title_overrides: NO_OVERRIDES,
    },
    TemplateStyle {
        id: "kakuna",
        display_name: "Kakuna",
        description: "Tough, reliable, no-nonsense format.",
        tags: &["ATS-Friendly", "Simple"],
        style: StyleFamily::Minimal,
        layout_shape: LayoutShape::SingleColumn,
        has_photo: false,
        header_placement: HeaderPlacement::Main,
        font: FontFamily::Sans,
        sidebar_fraction: 0.0,
        tokens: StyleTokens {
            container: "font-sans bg-white text-gray-900 border-l-[12px] border-yellow-500",
            header: "pl-8 pt-8 pb-8 mb-4 border-b border-gray-100",
            name: "text-5xl font-extrabold tracking-tighter text-gray-900",
            headline: "text-xl font-medium text-yellow-600 mt-2",
            contact_row: "flex flex-col gap-1 mt-4 text-sm font-medium text-gray-500",
            main: "",
            sidebar: "",
            section_title_main: "text-xl font-bold text-gray-900 mb-4 mt-6 inline-block bg-yellow-100 px-3 py-1 -rotate-1",
            section_title_sidebar: "text-xl font-bold text-gray-900 mb-4 mt-6 inline-block bg-yellow-100 px-3 py-1 -rotate-1",
            skill_chip: "bg-yellow-50 px-2 py-0.5 rounded border border-yellow-200",
        },
        title_overrides: NO_OVERRIDES,
    },
    TemplateStyle {
        id: "lapras",
        display_name: "Lapras",
        description: "Elegant flow with ample whitespace.",
        tags: &["Elegant", "Clean"],
        style: StyleFamily::Classic,
        layout_shape: LayoutShape::SingleColumn,
        has_photo: true,
        header_placement: HeaderPlacement::Main,
        font: FontFamily::Serif,
        sidebar_fraction: 0.0,
        tokens: StyleTokens {
            container: "font-serif bg-white text-slate-800",
            header: "text-center pb-8 mb-8",
            name: "text-4xl text-slate-900 tracking-wide",
            headline: "text-lg text-blue-800 italic mt-2",
            contact_row: "flex justify-center gap-4 mt-6 text-sm text-slate-500 font-sans",
            main: "",
            sidebar: "",
            section_title_main: "text-center text-sm font-bold uppercase tracking-[0.2em] text-blue-900 mb-6 mt-8",
            section_title_sidebar: "text-center text-sm font-bold uppercase tracking-[0.2em] text-blue-900 mb-6 mt-8",
            skill_chip: "bg-gray-100 px-2 py-1 rounded text-gray-700",
        },
        title_overrides: NO_OVERRIDES,
    },
    TemplateStyle {
        id: "leafish",
        display_name: "Leafish",
        description: "Organic layout for creative professionals.",
        tags: &["Creative", "Unique"],
        style: StyleFamily::Minimal,
        layout_shape: LayoutShape::TwoColumnLeft,
        has_photo: true,
        header_placement: HeaderPlacement::Sidebar,
        font: FontFamily::Sans,
        sidebar_fraction: 0.28,
        tokens: StyleTokens {
            container: "font-sans bg-white flex h-full",
            header: "mb-8",
            name: "text-2xl font-bold text-green-100 mb-1",
            headline: "text-sm text-green-300 mb-6",
            contact_row: "flex flex-col gap-2 text-sm opacity-80 mt-4",
            main: "flex-1 p-8 pt-10 text-gray-800",
            sidebar: "w-[28%] bg-green-900 text-green-50 p-6 h-full pt-10",
            section_title_main: "text-xl text-green-800 mb-4 font-light border-b border-green-100 pb-2 uppercase tracking-wide",
            section_title_sidebar: "text-xs font-bold uppercase tracking-widest text-green-400 mb-3 mt-8",
            skill_chip: "text-green-50",
        },
        title_overrides: NO_OVERRIDES,
    },
];

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_is_first_entry() {
        assert_eq!(TEMPLATES[0].id, DEFAULT_TEMPLATE_ID);
    }

    #[test]
    fn test_unknown_template_falls_back_to_default() {
        let style = resolve_style("nonexistent-xyz");
        assert_eq!(style.id, DEFAULT_TEMPLATE_ID);
        assert_eq!(style.layout_shape, LayoutShape::SingleColumn);
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_trimmed() {
        assert_eq!(resolve_style(" Gengar ").id, "gengar");
    }

    #[test]
    fn test_template_ids_are_unique() {
        let mut ids: Vec<&str> = TEMPLATES.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), TEMPLATES.len());
    }

    #[test]
    fn test_sidebar_fraction_matches_shape() {
        for t in TEMPLATES.iter() {
            if t.layout_shape.has_sidebar() {
                assert!(t.sidebar_fraction > 0.2 && t.sidebar_fraction < 0.5, "{}", t.id);
            } else {
                assert_eq!(t.sidebar_fraction, 0.0, "{}", t.id);
                assert_eq!(t.header_placement, HeaderPlacement::Main, "{}", t.id);
            }
        }
    }

    #[test]
    fn test_section_title_overrides() {
        let chikorita = resolve_style("chikorita");
        assert_eq!(chikorita.section_title(SectionKind::Summary), "Professional Summary");
        assert_eq!(chikorita.section_title(SectionKind::Skills), "Skills");
        assert_eq!(resolve_style("onyx").section_title(SectionKind::Summary), "Profile");
    }

    #[test]
    fn test_catalog_lists_every_template() {
        let entries = catalog();
        assert_eq!(entries.len(), 10);
        let chikorita = entries.iter().find(|e| e.id == "chikorita").unwrap();
        assert_eq!(chikorita.layout_shape, LayoutShape::TwoColumnRight);
    }

    #[test]
    fn test_layout_shape_parse_matches_serde_names() {
        for shape in [
            LayoutShape::SingleColumn,
            LayoutShape::TwoColumnLeft,
            LayoutShape::TwoColumnRight,
        ] {
            let json = serde_json::to_string(&shape).unwrap();
            assert_eq!(LayoutShape::parse(json.trim_matches('"')), Some(shape));
        }
        assert_eq!(LayoutShape::parse("three-column"), None);
    }

    #[test]
    fn test_layout_shape_serializes_kebab_case() {
        let json = serde_json::to_string(&LayoutShape::TwoColumnLeft).unwrap();
        assert_eq!(json, "\"two-column-left\"");
    }
}
