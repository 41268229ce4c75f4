//! Document CRUD and search handlers.
//!
//! ```text
//! GET    /documents           List every record
//! GET    /documents/search    Filtered search with result count
//! GET    /documents/{id}      Fetch one record
//! POST   /documents           Register a new record
//! PUT    /documents/{id}      Partial update
//! DELETE /documents/{id}      Permanent removal
//! ```
//!
//! `/documents/search` must be registered before `/documents/{id}` so the
//! literal segment is not captured as an id.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::DocumentRepositoryError;
use crate::domain::{Document, DocumentDraft, DocumentPatch, Error, SearchFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Payload for registering a document.
///
/// Only `title` is required. `id` and `dateRegistered` are always assigned
/// by the server; unknown keys (including a caller-supplied
/// `dateRegistered`) are silently discarded.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    pub title: String,
    pub description: Option<String>,
    pub department: Option<String>,
    pub owner_name: Option<String>,
    pub owner_contact: Option<String>,
    pub shelf_code: Option<String>,
    pub box_number: Option<String>,
    pub folder_number: Option<String>,
}

/// Partial update payload: absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub department: Option<String>,
    pub owner_name: Option<String>,
    pub owner_contact: Option<String>,
    pub shelf_code: Option<String>,
    pub box_number: Option<String>,
    pub folder_number: Option<String>,
}

/// Optional search filters; blank values behave like absent ones.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub department: Option<String>,
}

/// Envelope for a single record.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DocumentEnvelope {
    pub document: Document,
}

/// Envelope for the unfiltered list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DocumentList {
    pub documents: Vec<Document>,
}

/// Search results plus their count.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResults {
    pub documents: Vec<Document>,
    pub count: usize,
}

/// Deletion confirmation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteConfirmation {
    pub message: String,
}

/// The archive requires a title on every record.
fn validated_title(title: &str) -> Result<(), Error> {
    if title.trim().is_empty() {
        return Err(Error::invalid_request("title must not be blank")
            .with_details(json!({ "field": "title", "code": "blank_title" })));
    }
    Ok(())
}

/// Store failures surface as internal errors with the cause attached.
pub(super) fn map_repository_error(err: DocumentRepositoryError) -> Error {
    error!(error = %err, "document store failure");
    Error::internal(format!("document store failure: {err}"))
}

pub(super) fn document_not_found() -> Error {
    Error::not_found("Document not found")
}

/// List every record, unfiltered and unpaginated.
#[utoipa::path(
    get,
    path = "/documents",
    responses(
        (status = 200, description = "All records", body = DocumentList),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["documents"],
    operation_id = "listDocuments"
)]
#[get("/documents")]
pub async fn list_documents(state: web::Data<HttpState>) -> ApiResult<web::Json<DocumentList>> {
    let documents = state.documents.list().await.map_err(map_repository_error)?;
    Ok(web::Json(DocumentList { documents }))
}

/// Search by title and/or department substring, case-insensitively.
///
/// Filters are ANDed; no filters means the full list.
#[utoipa::path(
    get,
    path = "/documents/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching records and their count", body = SearchResults),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["documents"],
    operation_id = "searchDocuments"
)]
#[get("/documents/search")]
pub async fn search_documents(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<SearchResults>> {
    let query = query.into_inner();
    let filter = SearchFilter::new(query.title, query.department);

    let documents = state
        .documents
        .search(filter)
        .await
        .map_err(map_repository_error)?;
    let count = documents.len();

    Ok(web::Json(SearchResults { documents, count }))
}

/// Fetch one record by id.
#[utoipa::path(
    get,
    path = "/documents/{id}",
    params(("id" = i32, Path, description = "Record id")),
    responses(
        (status = 200, description = "The record", body = DocumentEnvelope),
        (status = 404, description = "Unknown id", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["documents"],
    operation_id = "getDocument"
)]
#[get("/documents/{id}")]
pub async fn get_document(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DocumentEnvelope>> {
    let id = path.into_inner();
    let document = state
        .documents
        .get(id)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(document_not_found)?;

    Ok(web::Json(DocumentEnvelope { document }))
}

/// Register a new record. The server assigns `id` and `dateRegistered`.
#[utoipa::path(
    post,
    path = "/documents",
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "The created record", body = Document),
        (status = 400, description = "Missing or blank title", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["documents"],
    operation_id = "createDocument"
)]
#[post("/documents")]
pub async fn create_document(
    state: web::Data<HttpState>,
    payload: web::Json<CreateDocumentRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    validated_title(&body.title)?;

    let draft = DocumentDraft {
        title: body.title,
        description: body.description,
        department: body.department,
        owner_name: body.owner_name,
        owner_contact: body.owner_contact,
        shelf_code: body.shelf_code,
        box_number: body.box_number,
        folder_number: body.folder_number,
    };

    let document = state
        .documents
        .create(draft)
        .await
        .map_err(map_repository_error)?;

    Ok(HttpResponse::Created().json(document))
}

/// Merge a partial payload over the current record.
///
/// Only supplied fields change; a supplied title must not be blank.
#[utoipa::path(
    put,
    path = "/documents/{id}",
    params(("id" = i32, Path, description = "Record id")),
    request_body = UpdateDocumentRequest,
    responses(
        (status = 200, description = "The updated record", body = Document),
        (status = 400, description = "Blank title", body = Error),
        (status = 404, description = "Unknown id", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["documents"],
    operation_id = "updateDocument"
)]
#[put("/documents/{id}")]
pub async fn update_document(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateDocumentRequest>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let body = payload.into_inner();
    if let Some(title) = &body.title {
        validated_title(title)?;
    }

    let patch = DocumentPatch {
        title: body.title,
        description: body.description,
        department: body.department,
        owner_name: body.owner_name,
        owner_contact: body.owner_contact,
        shelf_code: body.shelf_code,
        box_number: body.box_number,
        folder_number: body.folder_number,
    };

    let document = state
        .documents
        .update(id, patch)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(document_not_found)?;

    Ok(HttpResponse::Ok().json(document))
}

/// Permanently remove a record.
#[utoipa::path(
    delete,
    path = "/documents/{id}",
    params(("id" = i32, Path, description = "Record id")),
    responses(
        (status = 200, description = "Deletion confirmation", body = DeleteConfirmation),
        (status = 404, description = "Unknown id", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["documents"],
    operation_id = "deleteDocument"
)]
#[delete("/documents/{id}")]
pub async fn delete_document(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DeleteConfirmation>> {
    let id = path.into_inner();
    let deleted = state
        .documents
        .delete(id)
        .await
        .map_err(map_repository_error)?;

    if !deleted {
        return Err(document_not_found().into());
    }

    Ok(web::Json(DeleteConfirmation {
        message: format!("Document with ID {id} deleted successfully!"),
    }))
}

#[cfg(test)]
#[path = "documents_tests.rs"]
mod tests;
