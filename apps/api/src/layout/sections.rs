//! Section registry: the closed set of resume section kinds and the two regions
//! a section can live in.
//!
//! `Basics` is a real section kind (it is what the identity header renders from),
//! but it is never a layout slot: each template pins the header to a fixed place.
//! Everything in [`PLACEABLE_KINDS`] must end up in exactly one region.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Section kinds
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Basics,
    Summary,
    Experience,
    Education,
    Skills,
    Certificates,
    Activities,
    Languages,
    Projects,
}

/// Canonical order of every kind that occupies a layout slot.
///
/// Backfill appends missing kinds in this order, and the single-column default
/// is exactly this list.
pub const PLACEABLE_KINDS: [SectionKind; 8] = [
    SectionKind::Summary,
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Projects,
    SectionKind::Certificates,
    SectionKind::Languages,
    SectionKind::Activities,
];

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Basics => "basics",
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Certificates => "certificates",
            SectionKind::Activities => "activities",
            SectionKind::Languages => "languages",
            SectionKind::Projects => "projects",
        }
    }

    /// Parses a stored kind name. Returns `None` for anything this build does not know.
    pub fn parse(raw: &str) -> Option<Self> {
        let kind = match raw.trim() {
            "basics" => SectionKind::Basics,
            "summary" => SectionKind::Summary,
            "experience" => SectionKind::Experience,
            "education" => SectionKind::Education,
            "skills" => SectionKind::Skills,
            "certificates" => SectionKind::Certificates,
            "activities" => SectionKind::Activities,
            "languages" => SectionKind::Languages,
            "projects" => SectionKind::Projects,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether this kind occupies a slot in `main`/`sidebar`.
    pub fn is_placeable(&self) -> bool {
        !matches!(self, SectionKind::Basics)
    }

    /// Default heading shown above the section block.
    pub fn default_title(&self) -> &'static str {
        match self {
            SectionKind::Basics => "Basics",
            SectionKind::Summary => "Profile",
            SectionKind::Experience => "Experience",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Certificates => "Certificates",
            SectionKind::Activities => "Activities",
            SectionKind::Languages => "Languages",
            SectionKind::Projects => "Projects",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Regions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Main,
    Sidebar,
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient deserialization
// ────────────────────────────────────────────────────────────────────────────

/// Deserializes a stored kind list, silently dropping names this build does not know.
///
/// Documents written by older or newer clients may carry kinds such as `"design"`;
/// they must load rather than fail.
pub fn deserialize_kinds_lenient<'de, D>(deserializer: D) -> Result<Vec<SectionKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    let raw = raw.unwrap_or_default();
    let mut kinds = Vec::with_capacity(raw.len());
    for name in &raw {
        match SectionKind::parse(name) {
            Some(kind) => kinds.push(kind),
            None => tracing::debug!("dropping unknown section kind '{name}' from stored layout"),
        }
    }
    Ok(kinds)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
