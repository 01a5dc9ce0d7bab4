//! Editing session: the single owner of a `ResumeDocument` and its only write path.
//!
//! Every content mutation replaces one field or collection wholesale and bumps
//! `updated_at`. Layout changes go through `reorder`, either directly or as the
//! result of a completed drag gesture.

use std::collections::HashSet;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::editor::reorder::{
    validate_reorder, DragController, DragError, DragOutcome, DropTarget, ReorderError,
};
use crate::layout::font_metrics::PageGeometry;
use crate::layout::resolver::resolve_layout;
use crate::layout::sections::SectionKind;
use crate::models::resume::{
    ActivityItem, CertificateItem, ColorScheme, EducationItem, ExperienceItem, LanguageItem,
    ProjectItem, ResumeBasics, ResumeDocument, SectionLayout, SkillItem, DEFAULT_SKILL_LEVEL,
};
use crate::render::{render, RenderTree};
use crate::templates::{resolve_style, TemplateStyle};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("no {kind} item with id '{id}'")]
    ItemNotFound { kind: SectionKind, id: String },

    #[error("'{0}' is not an item collection")]
    NotACollection(SectionKind),
}

// ────────────────────────────────────────────────────────────────────────────
// Mutation payloads
// ────────────────────────────────────────────────────────────────────────────

/// A whole collection, tagged by section kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum Collection {
    Experience(Vec<ExperienceItem>),
    Education(Vec<EducationItem>),
    Skills(Vec<SkillItem>),
    Certificates(Vec<CertificateItem>),
    Activities(Vec<ActivityItem>),
    Languages(Vec<LanguageItem>),
    Projects(Vec<ProjectItem>),
}

/// One item, tagged by section kind. Used for both adding and updating; the
/// `id` inside is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", content = "item", rename_all = "snake_case")]
pub enum ItemInput {
    Experience(ExperienceItem),
    Education(EducationItem),
    Skills(SkillItem),
    Certificates(CertificateItem),
    Activities(ActivityItem),
    Languages(LanguageItem),
    Projects(ProjectItem),
}

impl ItemInput {
    pub fn kind(&self) -> SectionKind {
        match self {
            ItemInput::Experience(_) => SectionKind::Experience,
            ItemInput::Education(_) => SectionKind::Education,
            ItemInput::Skills(_) => SectionKind::Skills,
            ItemInput::Certificates(_) => SectionKind::Certificates,
            ItemInput::Activities(_) => SectionKind::Activities,
            ItemInput::Languages(_) => SectionKind::Languages,
            ItemInput::Projects(_) => SectionKind::Projects,
        }
    }
}

/// Partial render-metadata update; absent fields are left alone. An empty
/// `font` clears the override.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetadataPatch {
    pub name: Option<String>,
    #[serde(alias = "template")]
    pub template_id: Option<String>,
    pub colors: Option<ColorScheme>,
    pub font: Option<String>,
    pub compact_mode: Option<bool>,
}

// Every item type has an `id` and a `visible` flag; this lets the collection
// helpers below stay generic.
trait CollectionItem {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn set_visible(&mut self, visible: bool);
}

macro_rules! impl_collection_item {
    ($($ty:ty),+) => {
        $(impl CollectionItem for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn set_id(&mut self, id: String) {
                self.id = id;
            }
            fn set_visible(&mut self, visible: bool) {
                self.visible = visible;
            }
        })+
    };
}

impl_collection_item!(
    ExperienceItem,
    EducationItem,
    SkillItem,
    CertificateItem,
    ActivityItem,
    LanguageItem,
    ProjectItem
);

fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

/// Gives blank or repeated ids a fresh one; existing unique ids are kept.
fn ensure_ids<T: CollectionItem>(items: &mut [T]) {
    let mut seen = HashSet::new();
    for item in items.iter_mut() {
        if item.id().trim().is_empty() || !seen.insert(item.id().to_string()) {
            let id = new_item_id();
            seen.insert(id.clone());
            item.set_id(id);
        }
    }
}

fn push_new<T: CollectionItem>(items: &mut Vec<T>, mut item: T) -> String {
    let id = new_item_id();
    item.set_id(id.clone());
    items.push(item);
    id
}

fn replace_by_id<T: CollectionItem>(items: &mut [T], id: &str, mut item: T) -> bool {
    match items.iter_mut().find(|i| i.id() == id) {
        Some(slot) => {
            item.set_id(id.to_string());
            *slot = item;
            true
        }
        None => false,
    }
}

fn remove_by_id<T: CollectionItem>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|i| i.id() != id);
    items.len() != before
}

fn set_visible_by_id<T: CollectionItem>(items: &mut [T], id: &str, visible: bool) -> bool {
    match items.iter_mut().find(|i| i.id() == id) {
        Some(item) => {
            item.set_visible(visible);
            true
        }
        None => false,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Session
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct EditingSession {
    doc: ResumeDocument,
    drag: DragController,
}

impl EditingSession {
    pub fn new(doc: ResumeDocument) -> Self {
        EditingSession {
            doc,
            drag: DragController::new(),
        }
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.doc
    }

    pub fn into_document(self) -> ResumeDocument {
        self.doc
    }

    pub fn style(&self) -> &'static TemplateStyle {
        resolve_style(&self.doc.render_metadata.template_id)
    }

    /// Effective layout under the current template. Does not persist the backfill.
    pub fn resolved_layout(&self) -> SectionLayout {
        resolve_layout(&self.doc, self.style())
    }

    pub fn render(&self, page: &PageGeometry) -> RenderTree {
        let style = self.style();
        let layout = resolve_layout(&self.doc, style);
        render(&self.doc, style, &layout, page)
    }

    fn touch(&mut self) {
        self.doc.updated_at = Utc::now();
    }

    // ── content ─────────────────────────────────────────────────────────────

    pub fn update_basics(&mut self, basics: ResumeBasics) {
        self.doc.content.basics = basics;
        self.touch();
    }

    /// Replaces the summary text, whether typed or generated.
    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.doc.content.basics.summary = summary.into();
        self.touch();
    }

    pub fn replace_collection(&mut self, collection: Collection) {
        let content = &mut self.doc.content;
        match collection {
            Collection::Experience(mut items) => {
                ensure_ids(&mut items);
                content.experience = items;
            }
            Collection::Education(mut items) => {
                ensure_ids(&mut items);
                content.education = items;
            }
            Collection::Skills(mut items) => {
                ensure_ids(&mut items);
                content.skills = items;
            }
            Collection::Certificates(mut items) => {
                ensure_ids(&mut items);
                content.certificates = items;
            }
            Collection::Activities(mut items) => {
                ensure_ids(&mut items);
                content.activities = items;
            }
            Collection::Languages(mut items) => {
                ensure_ids(&mut items);
                content.languages = items;
            }
            Collection::Projects(mut items) => {
                ensure_ids(&mut items);
                content.projects = items;
            }
        }
        self.touch();
    }

    /// Appends a new item and returns its freshly assigned id.
    pub fn add_item(&mut self, item: ItemInput) -> String {
        let content = &mut self.doc.content;
        let id = match item {
            ItemInput::Experience(i) => push_new(&mut content.experience, i),
            ItemInput::Education(i) => push_new(&mut content.education, i),
            ItemInput::Skills(i) => push_new(&mut content.skills, i),
            ItemInput::Certificates(i) => push_new(&mut content.certificates, i),
            ItemInput::Activities(i) => push_new(&mut content.activities, i),
            ItemInput::Languages(i) => push_new(&mut content.languages, i),
            ItemInput::Projects(i) => push_new(&mut content.projects, i),
        };
        self.touch();
        id
    }

    /// Replaces the item with `id` in place; its id and position are kept.
    pub fn update_item(&mut self, id: &str, item: ItemInput) -> Result<(), EditError> {
        let kind = item.kind();
        let content = &mut self.doc.content;
        let found = match item {
            ItemInput::Experience(i) => replace_by_id(&mut content.experience, id, i),
            ItemInput::Education(i) => replace_by_id(&mut content.education, id, i),
            ItemInput::Skills(i) => replace_by_id(&mut content.skills, id, i),
            ItemInput::Certificates(i) => replace_by_id(&mut content.certificates, id, i),
            ItemInput::Activities(i) => replace_by_id(&mut content.activities, id, i),
            ItemInput::Languages(i) => replace_by_id(&mut content.languages, id, i),
            ItemInput::Projects(i) => replace_by_id(&mut content.projects, id, i),
        };
        self.finish_item_edit(found, kind, id)
    }

    pub fn remove_item(&mut self, kind: SectionKind, id: &str) -> Result<(), EditError> {
        let content = &mut self.doc.content;
        let found = match kind {
            SectionKind::Experience => remove_by_id(&mut content.experience, id),
            SectionKind::Education => remove_by_id(&mut content.education, id),
            SectionKind::Skills => remove_by_id(&mut content.skills, id),
            SectionKind::Certificates => remove_by_id(&mut content.certificates, id),
            SectionKind::Activities => remove_by_id(&mut content.activities, id),
            SectionKind::Languages => remove_by_id(&mut content.languages, id),
            SectionKind::Projects => remove_by_id(&mut content.projects, id),
            SectionKind::Basics | SectionKind::Summary => {
                return Err(EditError::NotACollection(kind))
            }
        };
        self.finish_item_edit(found, kind, id)
    }

    /// Hides or shows an item without deleting it.
    pub fn set_item_visibility(
        &mut self,
        kind: SectionKind,
        id: &str,
        visible: bool,
    ) -> Result<(), EditError> {
        let content = &mut self.doc.content;
        let found = match kind {
            SectionKind::Experience => set_visible_by_id(&mut content.experience, id, visible),
            SectionKind::Education => set_visible_by_id(&mut content.education, id, visible),
            SectionKind::Skills => set_visible_by_id(&mut content.skills, id, visible),
            SectionKind::Certificates => set_visible_by_id(&mut content.certificates, id, visible),
            SectionKind::Activities => set_visible_by_id(&mut content.activities, id, visible),
            SectionKind::Languages => set_visible_by_id(&mut content.languages, id, visible),
            SectionKind::Projects => set_visible_by_id(&mut content.projects, id, visible),
            SectionKind::Basics | SectionKind::Summary => {
                return Err(EditError::NotACollection(kind))
            }
        };
        self.finish_item_edit(found, kind, id)
    }

    fn finish_item_edit(&mut self, found: bool, kind: SectionKind, id: &str) -> Result<(), EditError> {
        if !found {
            return Err(EditError::ItemNotFound {
                kind,
                id: id.to_string(),
            });
        }
        self.touch();
        Ok(())
    }

    /// Appends suggested skill names at the default level, skipping blanks and
    /// names already present (case-insensitive). Returns the ids added.
    pub fn add_suggested_skills(&mut self, names: Vec<String>) -> Vec<String> {
        let mut known: HashSet<String> = self
            .doc
            .content
            .skills
            .iter()
            .map(|s| s.name.trim().to_lowercase())
            .collect();

        let mut added = Vec::new();
        for name in names {
            let name = name.trim();
            if name.is_empty() || !known.insert(name.to_lowercase()) {
                continue;
            }
            let skill = SkillItem {
                id: String::new(),
                name: name.to_string(),
                level: DEFAULT_SKILL_LEVEL,
                visible: true,
            };
            added.push(push_new(&mut self.doc.content.skills, skill));
        }
        if !added.is_empty() {
            debug!("added {} suggested skills", added.len());
            self.touch();
        }
        added
    }

    // ── render metadata ─────────────────────────────────────────────────────

    /// Applies a metadata patch. Switching templates keeps the stored layout;
    /// the resolver rebuilds it if it was arranged for a different shape.
    pub fn update_metadata(&mut self, patch: MetadataPatch) {
        if let Some(name) = patch.name.map(|n| n.trim().to_string()) {
            if !name.is_empty() {
                self.doc.name = name;
            }
        }
        let metadata = &mut self.doc.render_metadata;
        if let Some(template_id) = patch.template_id {
            metadata.template_id = template_id.trim().to_string();
        }
        if let Some(colors) = patch.colors {
            metadata.colors = colors;
        }
        if let Some(font) = patch.font {
            let font = font.trim();
            metadata.font = (!font.is_empty()).then(|| font.to_string());
        }
        if let Some(compact) = patch.compact_mode {
            metadata.compact_mode = compact;
        }
        self.touch();
    }

    // ── layout ──────────────────────────────────────────────────────────────

    /// Replaces the stored section layout wholesale. Rejected pairs leave the
    /// document untouched.
    pub fn reorder(
        &mut self,
        main: Vec<SectionKind>,
        sidebar: Vec<SectionKind>,
    ) -> Result<(), ReorderError> {
        let shape = self.style().layout_shape;
        match validate_reorder(&main, &sidebar, shape) {
            Ok(layout) => {
                self.doc.render_metadata.section_layout = Some(layout);
                self.touch();
                Ok(())
            }
            Err(e) => {
                warn!("rejected reorder for resume {}: {e}", self.doc.id);
                Err(e)
            }
        }
    }

    /// Starts dragging `kind` from the current resolved layout.
    pub fn begin_drag(&mut self, kind: SectionKind) -> Result<(), DragError> {
        let layout = self.resolved_layout();
        self.drag.begin(&layout, kind)
    }

    /// Ends the active drag. A drop commits through `reorder`; a drop outside
    /// any valid region cancels.
    pub fn drop_at(&mut self, target: Option<DropTarget>) -> Result<DragOutcome, DragError> {
        let shape = self.style().layout_shape;
        let outcome = self.drag.drop_at(target, shape)?;
        if let DragOutcome::Dropped { layout } = &outcome {
            if self.reorder(layout.main.clone(), layout.sidebar.clone()).is_err() {
                return Ok(DragOutcome::Cancelled);
            }
        }
        Ok(outcome)
    }

    /// Abandons the active drag; the layout is left as it was.
    pub fn cancel_drag(&mut self) -> Result<DragOutcome, DragError> {
        self.drag.cancel()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
