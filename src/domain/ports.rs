//! Ports the domain exposes to adapters.
//!
//! The archive has a single port: the document repository. The Diesel
//! adapter in `outbound::persistence` implements it for production; the
//! fixture implementation below backs handler tests without any I/O.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

use super::document::{Document, DocumentDraft, DocumentPatch, SearchFilter};

/// Failures surfaced by repository implementations.
///
/// Missing ids are not errors: lookups return `Option`/`bool` so callers can
/// translate absence into their own NotFound signal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentRepositoryError {
    /// Failed to obtain a store connection.
    #[error("document store connection failure: {message}")]
    Connection { message: String },

    /// A query or statement failed.
    #[error("document store query failure: {message}")]
    Query { message: String },

    /// The blocking task running the query died.
    #[error("document store runtime failure: {message}")]
    Runtime { message: String },
}

impl DocumentRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a runtime error with the given message.
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
        }
    }
}

/// Persistence port for document records.
///
/// The store is the sole point of concurrency control: id assignment is
/// atomic, and concurrent update/delete on the same id race with
/// last-writer-wins semantics.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Persist a new record, assigning its id and registration timestamp.
    async fn create(&self, draft: DocumentDraft) -> Result<Document, DocumentRepositoryError>;

    /// Fetch one record; `None` when the id has no row.
    async fn get(&self, id: i32) -> Result<Option<Document>, DocumentRepositoryError>;

    /// All records, ordered by id.
    async fn list(&self) -> Result<Vec<Document>, DocumentRepositoryError>;

    /// Records matching the filter; an unconstrained filter lists everything.
    async fn search(&self, filter: SearchFilter) -> Result<Vec<Document>, DocumentRepositoryError>;

    /// Merge the patch over the current record. `None` when the id has no
    /// row; an empty patch returns the record unchanged.
    async fn update(
        &self,
        id: i32,
        patch: DocumentPatch,
    ) -> Result<Option<Document>, DocumentRepositoryError>;

    /// Permanently remove a record; `false` when the id had no row.
    async fn delete(&self, id: i32) -> Result<bool, DocumentRepositoryError>;

    /// Number of records held, for the store health probe.
    async fn count(&self) -> Result<i64, DocumentRepositoryError>;
}

/// In-memory repository for handler tests.
///
/// Mirrors the store semantics that matter to handlers: monotonically
/// increasing ids that are never reused, server-stamped registration
/// timestamps, and case-insensitive ANDed substring search.
#[derive(Debug, Default)]
pub struct FixtureDocumentRepository {
    state: Mutex<FixtureState>,
}

#[derive(Debug, Default)]
struct FixtureState {
    next_id: i32,
    rows: Vec<Document>,
}

impl FixtureDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FixtureState> {
        // Mutex poisoning only happens if a test thread panicked mid-call.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn matches(filter: &SearchFilter, document: &Document) -> bool {
    let title_ok = filter.title.as_ref().is_none_or(|needle| {
        document
            .title
            .to_lowercase()
            .contains(&needle.to_lowercase())
    });
    let department_ok = filter.department.as_ref().is_none_or(|needle| {
        document
            .department
            .as_ref()
            .is_some_and(|dept| dept.to_lowercase().contains(&needle.to_lowercase()))
    });
    title_ok && department_ok
}

#[async_trait]
impl DocumentRepository for FixtureDocumentRepository {
    async fn create(&self, draft: DocumentDraft) -> Result<Document, DocumentRepositoryError> {
        let mut state = self.lock();
        state.next_id += 1;
        let document = Document {
            id: state.next_id,
            title: draft.title,
            description: draft.description,
            department: draft.department,
            owner_name: draft.owner_name,
            owner_contact: draft.owner_contact,
            shelf_code: draft.shelf_code,
            box_number: draft.box_number,
            folder_number: draft.folder_number,
            date_registered: Utc::now(),
        };
        state.rows.push(document.clone());
        Ok(document)
    }

    async fn get(&self, id: i32) -> Result<Option<Document>, DocumentRepositoryError> {
        Ok(self.lock().rows.iter().find(|d| d.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        Ok(self.lock().rows.clone())
    }

    async fn search(&self, filter: SearchFilter) -> Result<Vec<Document>, DocumentRepositoryError> {
        Ok(self
            .lock()
            .rows
            .iter()
            .filter(|d| matches(&filter, d))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: i32,
        patch: DocumentPatch,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut state = self.lock();
        let Some(row) = state.rows.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        *row = patch.apply_to(row.clone());
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, DocumentRepositoryError> {
        let mut state = self.lock();
        let before = state.rows.len();
        state.rows.retain(|d| d.id != id);
        Ok(state.rows.len() < before)
    }

    async fn count(&self) -> Result<i64, DocumentRepositoryError> {
        Ok(self.lock().rows.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft(title: &str, department: Option<&str>) -> DocumentDraft {
        DocumentDraft {
            title: title.into(),
            description: None,
            department: department.map(Into::into),
            owner_name: None,
            owner_contact: None,
            shelf_code: None,
            box_number: None,
            folder_number: None,
        }
    }

    #[tokio::test]
    async fn fixture_ids_are_never_reused() {
        let repo = FixtureDocumentRepository::new();
        let first = repo.create(draft("Report A", None)).await.expect("create");
        assert!(repo.delete(first.id).await.expect("delete"));

        let second = repo.create(draft("Report B", None)).await.expect("create");
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn fixture_search_is_case_insensitive_and_anded() {
        let repo = FixtureDocumentRepository::new();
        repo.create(draft("Report A", Some("Legal")))
            .await
            .expect("create");
        repo.create(draft("Invoice B", Some("Finance")))
            .await
            .expect("create");

        let by_title = repo
            .search(SearchFilter::new(Some("rep".into()), None))
            .await
            .expect("search");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Report A");

        let both = repo
            .search(SearchFilter::new(Some("rep".into()), Some("fin".into())))
            .await
            .expect("search");
        assert!(both.is_empty());

        let unconstrained = repo
            .search(SearchFilter::new(None, None))
            .await
            .expect("search");
        assert_eq!(unconstrained.len(), 2);
    }

    #[rstest]
    fn repository_error_messages_carry_context() {
        let err = DocumentRepositoryError::connection("pool exhausted");
        assert!(err.to_string().contains("pool exhausted"));
    }
}
