// Document store boundary.
// Persistence is an external collaborator; the editor only needs get/put/delete/list.
// Last write wins.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, ResumeSummary};

pub use memory::MemoryResumeStore;
pub use postgres::PgResumeStore;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<ResumeDocument>, AppError>;

    /// Inserts or overwrites the document with the same id.
    async fn put(&self, doc: &ResumeDocument) -> Result<(), AppError>;

    /// Returns `false` when nothing was stored under `id`.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Listing projections, most recently updated first.
    async fn list(&self) -> Result<Vec<ResumeSummary>, AppError>;
}
