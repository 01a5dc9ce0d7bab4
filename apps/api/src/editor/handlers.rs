use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::editor::reorder::{DragOutcome, DropTarget};
use crate::editor::session::{Collection, EditingSession, ItemInput, MetadataPatch};
use crate::errors::AppError;
use crate::layout::page_fill::{
    analyze_page_fill, recommend_fill_action, FillAction, PageFillAnalysis,
};
use crate::layout::sections::SectionKind;
use crate::models::resume::{ResumeBasics, ResumeDocument, ResumeSummary, SectionLayout};
use crate::render::RenderTree;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateResumeRequest {
    pub name: Option<String>,
    #[serde(alias = "template")]
    pub template_id: Option<String>,
    pub primary_color: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ItemCreatedResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestedSkillsRequest {
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestedSkillsResponse {
    pub added: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub visible: bool,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub main: Vec<SectionKind>,
    #[serde(default)]
    pub sidebar: Vec<SectionKind>,
}

/// `applied` is false when the pair was rejected; `layout` is the effective
/// layout either way.
#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub applied: bool,
    pub layout: SectionLayout,
}

#[derive(Debug, Deserialize)]
pub struct MoveSectionRequest {
    pub kind: SectionKind,
    /// Absent when the section was released outside any region.
    pub target: Option<DropTarget>,
}

#[derive(Debug, Serialize)]
pub struct MoveSectionResponse {
    pub outcome: DragOutcome,
    pub layout: SectionLayout,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub tree: RenderTree,
    pub fill: PageFillAnalysis,
    pub recommended_action: FillAction,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn load_session(state: &AppState, id: Uuid) -> Result<EditingSession, AppError> {
    let doc = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(EditingSession::new(doc))
}

async fn commit(state: &AppState, session: EditingSession) -> Result<ResumeDocument, AppError> {
    let doc = session.into_document();
    state.store.put(&doc).await?;
    Ok(doc)
}

// ────────────────────────────────────────────────────────────────────────────
// Documents
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(req): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeDocument>), AppError> {
    let doc = ResumeDocument::new(
        req.name.as_deref(),
        req.template_id.as_deref(),
        req.primary_color.as_deref(),
    );
    state.store.put(&doc).await?;
    info!("created resume {} ({})", doc.id, doc.render_metadata.template_id);
    Ok((StatusCode::CREATED, Json(doc)))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    Ok(Json(state.store.list().await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeDocument>, AppError> {
    let session = load_session(&state, id).await?;
    Ok(Json(session.into_document()))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    info!("deleted resume {id}");
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Content
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/resumes/:id/basics
pub async fn handle_update_basics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(basics): Json<ResumeBasics>,
) -> Result<Json<ResumeDocument>, AppError> {
    let mut session = load_session(&state, id).await?;
    session.update_basics(basics);
    Ok(Json(commit(&state, session).await?))
}

/// PUT /api/v1/resumes/:id/collections
pub async fn handle_replace_collection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(collection): Json<Collection>,
) -> Result<Json<ResumeDocument>, AppError> {
    let mut session = load_session(&state, id).await?;
    session.replace_collection(collection);
    Ok(Json(commit(&state, session).await?))
}

/// POST /api/v1/resumes/:id/items
pub async fn handle_add_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(item): Json<ItemInput>,
) -> Result<(StatusCode, Json<ItemCreatedResponse>), AppError> {
    let mut session = load_session(&state, id).await?;
    let item_id = session.add_item(item);
    commit(&state, session).await?;
    Ok((StatusCode::CREATED, Json(ItemCreatedResponse { id: item_id })))
}

/// PUT /api/v1/resumes/:id/items/:item_id
pub async fn handle_update_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, String)>,
    Json(item): Json<ItemInput>,
) -> Result<Json<ResumeDocument>, AppError> {
    let mut session = load_session(&state, id).await?;
    session.update_item(&item_id, item)?;
    Ok(Json(commit(&state, session).await?))
}

/// DELETE /api/v1/resumes/:id/items/:kind/:item_id
pub async fn handle_remove_item(
    State(state): State<AppState>,
    Path((id, kind, item_id)): Path<(Uuid, SectionKind, String)>,
) -> Result<StatusCode, AppError> {
    let mut session = load_session(&state, id).await?;
    session.remove_item(kind, &item_id)?;
    commit(&state, session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/resumes/:id/items/:kind/:item_id/visibility
pub async fn handle_set_item_visibility(
    State(state): State<AppState>,
    Path((id, kind, item_id)): Path<(Uuid, SectionKind, String)>,
    Json(req): Json<VisibilityRequest>,
) -> Result<Json<ResumeDocument>, AppError> {
    let mut session = load_session(&state, id).await?;
    session.set_item_visibility(kind, &item_id, req.visible)?;
    Ok(Json(commit(&state, session).await?))
}

/// POST /api/v1/resumes/:id/skills/suggested
pub async fn handle_add_suggested_skills(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SuggestedSkillsRequest>,
) -> Result<Json<SuggestedSkillsResponse>, AppError> {
    let mut session = load_session(&state, id).await?;
    let added = session.add_suggested_skills(req.skills);
    if !added.is_empty() {
        commit(&state, session).await?;
    }
    Ok(Json(SuggestedSkillsResponse { added }))
}

/// PATCH /api/v1/resumes/:id/metadata
pub async fn handle_update_metadata(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<MetadataPatch>,
) -> Result<Json<ResumeDocument>, AppError> {
    let mut session = load_session(&state, id).await?;
    session.update_metadata(patch);
    Ok(Json(commit(&state, session).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resumes/:id/layout
pub async fn handle_get_layout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SectionLayout>, AppError> {
    let session = load_session(&state, id).await?;
    Ok(Json(session.resolved_layout()))
}

/// PUT /api/v1/resumes/:id/layout
///
/// Rejected layouts are not an HTTP error: the document is left as it was and
/// the response says `applied: false`.
pub async fn handle_reorder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<ReorderResponse>, AppError> {
    let mut session = load_session(&state, id).await?;
    let applied = session.reorder(req.main, req.sidebar).is_ok();
    let layout = session.resolved_layout();
    if applied {
        commit(&state, session).await?;
    }
    Ok(Json(ReorderResponse { applied, layout }))
}

/// POST /api/v1/resumes/:id/layout/move
///
/// One completed drag gesture: pick up `kind`, release it at `target`.
pub async fn handle_move_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveSectionRequest>,
) -> Result<Json<MoveSectionResponse>, AppError> {
    let mut session = load_session(&state, id).await?;
    session
        .begin_drag(req.kind)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let outcome = match req.target {
        Some(target) => session.drop_at(Some(target)),
        None => session.cancel_drag(),
    }
    .map_err(|e| AppError::Validation(e.to_string()))?;
    let layout = session.resolved_layout();
    if matches!(outcome, DragOutcome::Dropped { .. }) {
        commit(&state, session).await?;
    }
    Ok(Json(MoveSectionResponse { outcome, layout }))
}

// ────────────────────────────────────────────────────────────────────────────
// Render
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resumes/:id/render
pub async fn handle_render(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RenderResponse>, AppError> {
    let session = load_session(&state, id).await?;
    let tree = session.render(&state.page);
    let fill = analyze_page_fill(&tree);
    let recommended_action = recommend_fill_action(&fill, &tree);
    Ok(Json(RenderResponse {
        tree,
        fill,
        recommended_action,
    }))
}
