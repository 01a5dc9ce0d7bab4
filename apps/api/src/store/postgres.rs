use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, ResumeRow, ResumeSummary};
use crate::store::ResumeStore;
use crate::templates::DEFAULT_TEMPLATE_ID;

/// Documents live whole in a `jsonb` column; `name` and `updated_at` are
/// duplicated into columns for listing.
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        PgResumeStore { pool }
    }

    /// Opens a pool against `database_url` and makes sure the `resumes` table exists.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        info!("PostgreSQL connection pool established");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS resumes (
                id          UUID PRIMARY KEY,
                name        TEXT NOT NULL,
                document    JSONB NOT NULL,
                updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self::new(pool))
    }
}

impl TryFrom<ResumeRow> for ResumeDocument {
    type Error = AppError;

    fn try_from(row: ResumeRow) -> Result<Self, Self::Error> {
        let mut doc: ResumeDocument = serde_json::from_value(row.document)?;
        // Columns are authoritative for identity.
        doc.id = row.id;
        Ok(doc)
    }
}

impl From<ResumeRow> for ResumeSummary {
    /// Built from the columns alone so an unreadable `document` never hides the
    /// row from listings. The template id is read from the json when present.
    fn from(row: ResumeRow) -> Self {
        let template_id = ["/render_metadata/template_id", "/metadata/template"]
            .iter()
            .find_map(|path| row.document.pointer(path).and_then(|v| v.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| {
                warn!("resume {} has no readable template id", row.id);
                DEFAULT_TEMPLATE_ID.to_string()
            });
        ResumeSummary {
            id: row.id,
            name: row.name,
            template_id,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn get(&self, id: Uuid) -> Result<Option<ResumeDocument>, AppError> {
        let row: Option<ResumeRow> = sqlx::query_as(
            "SELECT id, name, document, updated_at FROM resumes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(ResumeDocument::try_from).transpose()
    }

    async fn put(&self, doc: &ResumeDocument) -> Result<(), AppError> {
        let document = serde_json::to_value(doc)?;
        sqlx::query(
            r#"
            INSERT INTO resumes (id, name, document, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                document = EXCLUDED.document,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(doc.id)
        .bind(&doc.name)
        .bind(document)
        .bind(doc.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<ResumeSummary>, AppError> {
        let rows: Vec<ResumeRow> = sqlx::query_as(
            "SELECT id, name, document, updated_at FROM resumes ORDER BY updated_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ResumeSummary::from).collect())
    }
}
