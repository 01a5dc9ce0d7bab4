use axum::{extract::Path, Json};

use crate::templates::{catalog, resolve_style, TemplateCatalogEntry, TemplateStyle};

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateCatalogEntry>> {
    Json(catalog())
}

/// GET /api/v1/templates/:id/style
///
/// Unknown ids answer with the fallback descriptor, never 404.
pub async fn handle_get_style(Path(id): Path<String>) -> Json<&'static TemplateStyle> {
    Json(resolve_style(&id))
}
