//! SQLite-backed `DocumentRepository` implementation using Diesel ORM.
//!
//! The adapter translates between Diesel rows and domain records; no
//! business logic lives here. Diesel's SQLite connection is synchronous, so
//! every operation checks a connection out of the pool and runs on the
//! blocking thread pool, keeping the async executor free.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use tracing::debug;

use crate::domain::ports::{DocumentRepository, DocumentRepositoryError};
use crate::domain::{Document, DocumentDraft, DocumentPatch, SearchFilter};

use super::models::{DocumentChangeset, DocumentRow, NewDocumentRow};
use super::pool::{DbPool, PoolError};
use super::schema::documents;

/// Diesel-backed implementation of the `DocumentRepository` port.
#[derive(Clone)]
pub struct DieselDocumentRepository {
    pool: DbPool,
}

impl DieselDocumentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Check out a connection and run `op` on the blocking thread pool.
    async fn run_blocking<T, F>(&self, op: F) -> Result<T, DocumentRepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T, DocumentRepositoryError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(map_pool_error)?;
            op(&mut conn)
        })
        .await
        .map_err(|err| DocumentRepositoryError::runtime(err.to_string()))?
    }
}

/// Map pool errors to repository errors.
fn map_pool_error(error: PoolError) -> DocumentRepositoryError {
    match error {
        PoolError::Checkout { message }
        | PoolError::Build { message }
        | PoolError::Migration { message } => DocumentRepositoryError::connection(message),
    }
}

/// Map Diesel errors to repository errors, preserving the underlying
/// message so callers can surface it.
fn map_diesel_error(error: diesel::result::Error) -> DocumentRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            DocumentRepositoryError::connection(info.message().to_owned())
        }
        other => DocumentRepositoryError::query(other.to_string()),
    }
}

#[async_trait]
impl DocumentRepository for DieselDocumentRepository {
    async fn create(&self, draft: DocumentDraft) -> Result<Document, DocumentRepositoryError> {
        self.run_blocking(move |conn| {
            let new_row = NewDocumentRow {
                title: &draft.title,
                description: draft.description.as_deref(),
                department: draft.department.as_deref(),
                owner_name: draft.owner_name.as_deref(),
                owner_contact: draft.owner_contact.as_deref(),
                shelf_code: draft.shelf_code.as_deref(),
                box_number: draft.box_number.as_deref(),
                folder_number: draft.folder_number.as_deref(),
                // Server clock wins; any caller-supplied value was discarded
                // at the inbound boundary.
                date_registered: Utc::now().naive_utc(),
            };

            let row: DocumentRow = diesel::insert_into(documents::table)
                .values(&new_row)
                .returning(DocumentRow::as_returning())
                .get_result(conn)
                .map_err(map_diesel_error)?;

            Ok(row.into_document())
        })
        .await
    }

    async fn get(&self, id: i32) -> Result<Option<Document>, DocumentRepositoryError> {
        self.run_blocking(move |conn| {
            let row: Option<DocumentRow> = documents::table
                .find(id)
                .select(DocumentRow::as_select())
                .first(conn)
                .optional()
                .map_err(map_diesel_error)?;

            Ok(row.map(DocumentRow::into_document))
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        self.run_blocking(|conn| {
            let rows: Vec<DocumentRow> = documents::table
                .select(DocumentRow::as_select())
                .order(documents::id.asc())
                .load(conn)
                .map_err(map_diesel_error)?;

            Ok(rows.into_iter().map(DocumentRow::into_document).collect())
        })
        .await
    }

    async fn search(&self, filter: SearchFilter) -> Result<Vec<Document>, DocumentRepositoryError> {
        self.run_blocking(move |conn| {
            let mut query = documents::table
                .select(DocumentRow::as_select())
                .into_boxed();

            // SQLite LIKE is case-insensitive for ASCII, matching the
            // store contract for both filters.
            if let Some(title) = &filter.title {
                query = query.filter(documents::title.like(format!("%{title}%")));
            }
            if let Some(department) = &filter.department {
                query = query.filter(documents::department.like(format!("%{department}%")));
            }

            let rows: Vec<DocumentRow> = query
                .order(documents::id.asc())
                .load(conn)
                .map_err(map_diesel_error)?;

            Ok(rows.into_iter().map(DocumentRow::into_document).collect())
        })
        .await
    }

    async fn update(
        &self,
        id: i32,
        patch: DocumentPatch,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        self.run_blocking(move |conn| {
            let current: Option<DocumentRow> = documents::table
                .find(id)
                .select(DocumentRow::as_select())
                .first(conn)
                .optional()
                .map_err(map_diesel_error)?;

            let Some(current) = current else {
                return Ok(None);
            };

            let merged = patch.apply_to(current.into_document());
            if patch.is_empty() {
                return Ok(Some(merged));
            }

            // Last writer wins: the merged record overwrites whatever is in
            // the row by the time this statement runs.
            diesel::update(documents::table.find(id))
                .set(&DocumentChangeset::from_document(&merged))
                .execute(conn)
                .map_err(map_diesel_error)?;

            Ok(Some(merged))
        })
        .await
    }

    async fn delete(&self, id: i32) -> Result<bool, DocumentRepositoryError> {
        self.run_blocking(move |conn| {
            let deleted = diesel::delete(documents::table.find(id))
                .execute(conn)
                .map_err(map_diesel_error)?;

            Ok(deleted > 0)
        })
        .await
    }

    async fn count(&self) -> Result<i64, DocumentRepositoryError> {
        self.run_blocking(|conn| {
            documents::table
                .count()
                .get_result(conn)
                .map_err(map_diesel_error)
        })
        .await
    }
}
