use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, ResumeSummary};
use crate::store::ResumeStore;

/// Process-local store used when no database is configured, and in tests.
#[derive(Default)]
pub struct MemoryResumeStore {
    docs: RwLock<HashMap<Uuid, ResumeDocument>>,
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn get(&self, id: Uuid) -> Result<Option<ResumeDocument>, AppError> {
        Ok(self.docs.read().await.get(&id).cloned())
    }

    async fn put(&self, doc: &ResumeDocument) -> Result<(), AppError> {
        self.docs.write().await.insert(doc.id, doc.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.docs.write().await.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<ResumeSummary>, AppError> {
        let mut summaries: Vec<ResumeSummary> =
            self.docs.read().await.values().map(|d| d.summary()).collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn make_doc(name: &str) -> ResumeDocument {
        ResumeDocument::new(Some(name), None, None)
    }

    #[tokio::test]
    async fn test_put_then_get_returns_document() {
        let store = MemoryResumeStore::new();
        let doc = make_doc("A");
        store.put(&doc).await.unwrap();
        assert_eq!(store.get(doc.id).await.unwrap(), Some(doc));
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemoryResumeStore::new();
        let mut doc = make_doc("A");
        store.put(&doc).await.unwrap();
        doc.name = "B".to_string();
        store.put(&doc).await.unwrap();
        assert_eq!(store.get(doc.id).await.unwrap().unwrap().name, "B");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let store = MemoryResumeStore::new();
        let doc = make_doc("A");
        store.put(&doc).await.unwrap();
        assert!(store.delete(doc.id).await.unwrap());
        assert!(!store.delete(doc.id).await.unwrap());
        assert_eq!(store.get(doc.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = MemoryResumeStore::new();
        let mut old = make_doc("old");
        old.updated_at = Utc::now() - Duration::hours(1);
        let new = make_doc("new");
        store.put(&old).await.unwrap();
        store.put(&new).await.unwrap();
        let names: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["new", "old"]);
    }
}
