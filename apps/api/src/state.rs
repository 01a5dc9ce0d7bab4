use std::sync::Arc;

use crate::config::Config;
use crate::layout::PageGeometry;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResumeStore>,
    pub config: Config,
    /// Printable page used for page-boundary markers and fill analysis.
    pub page: PageGeometry,
}
