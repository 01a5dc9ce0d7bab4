use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use tracing::debug;
use uuid::Uuid;

use crate::layout::sections::{deserialize_kinds_lenient, SectionKind};
use crate::templates::{deserialize_shape_lenient, LayoutShape, DEFAULT_TEMPLATE_ID};

pub const DEFAULT_RESUME_NAME: &str = "Untitled Resume";
pub const DEFAULT_PRIMARY_COLOR: &str = "#dc2626";
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
/// Level assigned to skills added without an explicit level.
pub const DEFAULT_SKILL_LEVEL: u8 = 3;
pub const MIN_SKILL_LEVEL: u8 = 1;
pub const MAX_SKILL_LEVEL: u8 = 5;

fn visible_by_default() -> bool {
    true
}

fn default_skill_level() -> u8 {
    DEFAULT_SKILL_LEVEL
}

/// Clamps a proficiency level into 1..=5.
fn clamp_skill_level(level: i64) -> u8 {
    level.clamp(MIN_SKILL_LEVEL as i64, MAX_SKILL_LEVEL as i64) as u8
}

/// Accepts integer, float or numeric-string levels and clamps them into range.
/// Anything else reads as the default level.
fn deserialize_level_lenient<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let level = match &raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    };
    Ok(match level {
        Some(level) => clamp_skill_level(level),
        None => {
            debug!("unreadable skill level {raw}, using default");
            DEFAULT_SKILL_LEVEL
        }
    })
}

/// Reads RFC 3339 timestamps; anything else (e.g. a client-side timestamp
/// object) reads as now.
fn deserialize_timestamp_lenient<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let parsed = raw
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));
    Ok(parsed.unwrap_or_else(|| {
        debug!("unreadable updated_at {raw}, using now");
        Utc::now()
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Content
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeBasics {
    pub name: String,
    pub headline: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceItem {
    /// Assigned by the editing session; blank on new-item payloads.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, alias = "startDate")]
    pub start_date: String,
    #[serde(default, alias = "endDate")]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default, alias = "startDate")]
    pub start_date: String,
    #[serde(default, alias = "endDate")]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// 1–5 proficiency.
    #[serde(default = "default_skill_level", deserialize_with = "deserialize_level_lenient")]
    pub level: u8,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub issuer: String,
    /// Issue date as entered by the user.
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// "Native", "Fluent", "Intermediate", "Beginner"; free text.
    #[serde(default)]
    pub fluency: String,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, alias = "techStack")]
    pub tech_stack: Vec<String>,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

/// Structured resume content. Collections keep their stored (insertion/reorder) order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeContent {
    pub basics: ResumeBasics,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub skills: Vec<SkillItem>,
    pub certificates: Vec<CertificateItem>,
    pub activities: Vec<ActivityItem>,
    pub languages: Vec<LanguageItem>,
    pub projects: Vec<ProjectItem>,
}

impl ResumeContent {
    /// Whether the section has anything to render: a non-blank summary, or at least
    /// one visible item in the backing collection.
    pub fn has_renderable(&self, kind: SectionKind) -> bool {
        match kind {
            SectionKind::Basics => true,
            SectionKind::Summary => !self.basics.summary.trim().is_empty(),
            SectionKind::Experience => self.experience.iter().any(|i| i.visible),
            SectionKind::Education => self.education.iter().any(|i| i.visible),
            SectionKind::Skills => self.skills.iter().any(|i| i.visible),
            SectionKind::Certificates => self.certificates.iter().any(|i| i.visible),
            SectionKind::Activities => self.activities.iter().any(|i| i.visible),
            SectionKind::Languages => self.languages.iter().any(|i| i.visible),
            SectionKind::Projects => self.projects.iter().any(|i| i.visible),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Render metadata
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub primary: String,
    pub text: String,
    pub background: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme {
            primary: DEFAULT_PRIMARY_COLOR.to_string(),
            text: DEFAULT_TEXT_COLOR.to_string(),
            background: DEFAULT_BACKGROUND_COLOR.to_string(),
        }
    }
}

/// User-arranged assignment of section kinds to regions.
///
/// `shape` records which layout shape the arrangement was made for; legacy
/// documents have none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLayout {
    #[serde(default, deserialize_with = "deserialize_kinds_lenient")]
    pub main: Vec<SectionKind>,
    #[serde(default, deserialize_with = "deserialize_kinds_lenient")]
    pub sidebar: Vec<SectionKind>,
    #[serde(
        default,
        deserialize_with = "deserialize_shape_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub shape: Option<LayoutShape>,
}

impl SectionLayout {
    pub fn new(main: Vec<SectionKind>, sidebar: Vec<SectionKind>) -> Self {
        SectionLayout {
            main,
            sidebar,
            shape: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.sidebar.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderMetadata {
    #[serde(alias = "template")]
    pub template_id: String,
    #[serde(default)]
    pub colors: ColorScheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, alias = "layout", skip_serializing_if = "Option::is_none")]
    pub section_layout: Option<SectionLayout>,
    #[serde(default, alias = "compactMode")]
    pub compact_mode: bool,
}

impl Default for RenderMetadata {
    fn default() -> Self {
        RenderMetadata {
            template_id: DEFAULT_TEMPLATE_ID.to_string(),
            colors: ColorScheme::default(),
            font: None,
            section_layout: None,
            compact_mode: false,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Root aggregate
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub id: Uuid,
    #[serde(default = "default_resume_name")]
    pub name: String,
    #[serde(default, alias = "data")]
    pub content: ResumeContent,
    #[serde(default, alias = "metadata")]
    pub render_metadata: RenderMetadata,
    #[serde(
        default = "Utc::now",
        alias = "updatedAt",
        deserialize_with = "deserialize_timestamp_lenient"
    )]
    pub updated_at: DateTime<Utc>,
}

fn default_resume_name() -> String {
    DEFAULT_RESUME_NAME.to_string()
}

impl ResumeDocument {
    /// Creates an empty document with default render metadata.
    pub fn new(name: Option<&str>, template_id: Option<&str>, primary_color: Option<&str>) -> Self {
        let mut metadata = RenderMetadata::default();
        if let Some(template_id) = template_id.filter(|t| !t.trim().is_empty()) {
            metadata.template_id = template_id.trim().to_string();
        }
        if let Some(color) = primary_color.filter(|c| !c.trim().is_empty()) {
            metadata.colors.primary = color.trim().to_string();
        }
        ResumeDocument {
            id: Uuid::new_v4(),
            name: name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(DEFAULT_RESUME_NAME)
                .to_string(),
            content: ResumeContent::default(),
            render_metadata: metadata,
            updated_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> ResumeSummary {
        ResumeSummary {
            id: self.id,
            name: self.name.clone(),
            template_id: self.render_metadata.template_id.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// Listing projection of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeSummary {
    pub id: Uuid,
    pub name: String,
    pub template_id: String,
    pub updated_at: DateTime<Utc>,
}

/// Row shape of the `resumes` table. The document itself is stored as `jsonb`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub name: String,
    pub document: Value,
    pub updated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_defaults() {
        let doc = ResumeDocument::new(None, None, None);
        assert_eq!(doc.name, DEFAULT_RESUME_NAME);
        assert_eq!(doc.render_metadata.template_id, "onyx");
        assert_eq!(doc.render_metadata.colors.primary, "#dc2626");
        assert!(doc.render_metadata.section_layout.is_none());
        assert!(!doc.render_metadata.compact_mode);
        assert_eq!(doc.content, ResumeContent::default());
    }

    #[test]
    fn test_new_document_honours_template_and_color() {
        let doc = ResumeDocument::new(Some("  Backend CV "), Some("gengar"), Some("#112233"));
        assert_eq!(doc.name, "Backend CV");
        assert_eq!(doc.render_metadata.template_id, "gengar");
        assert_eq!(doc.render_metadata.colors.primary, "#112233");
    }

    #[test]
    fn test_legacy_document_deserializes() {
        // Older documents: `data`/`metadata`/`template`/`layout` keys, no visibility on
        // skills, missing collections, and an unknown "design" kind in the layout.
        let raw = r##"{
            "id": "6f1c1d4e-6a43-4c1e-9d55-2f7d2b1a9e10",
            "name": "Legacy",
            "data": {
                "basics": {"name": "Ada", "summary": "Engineer"},
                "experience": [],
                "education": [],
                "skills": [{"id": "1", "name": "Rust", "level": 5}]
            },
            "metadata": {
                "template": "azurill",
                "colors": {"primary": "#000", "text": "#111", "background": "#fff"},
                "layout": {"main": ["summary", "design"], "sidebar": ["skills"]}
            }
        }"##;
        let doc: ResumeDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.render_metadata.template_id, "azurill");
        assert!(doc.content.skills[0].visible);
        assert!(doc.content.projects.is_empty());
        let layout = doc.render_metadata.section_layout.unwrap();
        assert_eq!(layout.main, vec![SectionKind::Summary]);
        assert_eq!(layout.sidebar, vec![SectionKind::Skills]);
        assert_eq!(layout.shape, None);
    }

    #[test]
    fn test_camel_case_document_keeps_dates_and_flags() {
        let raw = r#"{
            "id": "0b6a4f3c-1d2e-4f5a-8b9c-0d1e2f3a4b5c",
            "userId": "u-1",
            "name": "Imported",
            "updatedAt": "2024-03-01T10:00:00Z",
            "data": {
                "basics": {"name": "Ada"},
                "experience": [{"id": "e1", "company": "Acme", "position": "Dev",
                                "location": "", "startDate": "2020", "endDate": "2024",
                                "description": "", "visible": true}],
                "education": [{"id": "d1", "school": "MIT", "degree": "BSc", "field": "CS",
                               "startDate": "2014", "endDate": "2018", "description": "",
                               "visible": true}],
                "projects": [{"id": "p1", "name": "Tool", "description": "",
                              "techStack": ["Rust", "SQL"], "visible": true}]
            },
            "metadata": {"template": "onyx", "compactMode": true}
        }"#;
        let doc: ResumeDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.content.experience[0].start_date, "2020");
        assert_eq!(doc.content.experience[0].end_date, "2024");
        assert_eq!(doc.content.education[0].start_date, "2014");
        assert_eq!(doc.content.education[0].end_date, "2018");
        assert_eq!(doc.content.projects[0].tech_stack, vec!["Rust", "SQL"]);
        assert!(doc.render_metadata.compact_mode);
        assert_eq!(doc.updated_at.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[test]
    fn test_unreadable_timestamp_reads_as_now() {
        let raw = r#"{
            "id": "0b6a4f3c-1d2e-4f5a-8b9c-0d1e2f3a4b5c",
            "updatedAt": {"seconds": 1700000000, "nanoseconds": 0}
        }"#;
        let before = Utc::now();
        let doc: ResumeDocument = serde_json::from_str(raw).unwrap();
        assert!(doc.updated_at >= before);
    }

    #[test]
    fn test_skill_level_is_read_leniently_and_clamped() {
        let skills: Vec<SkillItem> = serde_json::from_str(
            r#"[
                {"name": "a", "level": 4.0},
                {"name": "b", "level": 9},
                {"name": "c", "level": 0},
                {"name": "d", "level": "2"},
                {"name": "e", "level": null},
                {"name": "f"}
            ]"#,
        )
        .unwrap();
        let levels: Vec<u8> = skills.iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![4, 5, 1, 2, 3, 3]);
    }

    #[test]
    fn test_unknown_layout_shape_reads_as_absent() {
        let layout: SectionLayout =
            serde_json::from_str(r#"{"main":["summary"],"sidebar":[],"shape":"three-column"}"#)
                .unwrap();
        assert_eq!(layout.shape, None);
        assert_eq!(layout.main, vec![SectionKind::Summary]);
    }

    #[test]
    fn test_has_renderable_respects_visibility() {
        let mut content = ResumeContent::default();
        assert!(!content.has_renderable(SectionKind::Experience));
        content.experience.push(ExperienceItem {
            id: "a".to_string(),
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            location: String::new(),
            start_date: "2020".to_string(),
            end_date: "Present".to_string(),
            description: String::new(),
            visible: false,
        });
        assert!(!content.has_renderable(SectionKind::Experience));
        content.experience[0].visible = true;
        assert!(content.has_renderable(SectionKind::Experience));
    }

    #[test]
    fn test_blank_summary_is_not_renderable() {
        let mut content = ResumeContent::default();
        content.basics.summary = "   \n".to_string();
        assert!(!content.has_renderable(SectionKind::Summary));
    }
}
