//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST surface. The
//! JSON document is served at `/api-docs/openapi.json` in debug builds.

use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelfmark archive API",
        description = "Document-archive records plus QR and PDF receipt artefacts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::liveness,
        crate::inbound::http::health::store_health,
        crate::inbound::http::documents::list_documents,
        crate::inbound::http::documents::search_documents,
        crate::inbound::http::documents::get_document,
        crate::inbound::http::documents::create_document,
        crate::inbound::http::documents::update_document,
        crate::inbound::http::documents::delete_document,
        crate::inbound::http::receipts::document_qr_code,
        crate::inbound::http::receipts::generate_receipt,
    ),
    components(schemas(
        crate::domain::Document,
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::inbound::http::documents::CreateDocumentRequest,
        crate::inbound::http::documents::UpdateDocumentRequest,
        crate::inbound::http::documents::DocumentEnvelope,
        crate::inbound::http::documents::DocumentList,
        crate::inbound::http::documents::SearchResults,
        crate::inbound::http::documents::DeleteConfirmation,
        crate::inbound::http::health::ProbeMessage,
    )),
    tags(
        (name = "documents", description = "Record CRUD and search"),
        (name = "artifacts", description = "QR image and PDF receipt generation"),
        (name = "health", description = "Liveness and store probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn every_endpoint_is_documented() {
        let spec = ApiDoc::openapi();
        let paths: Vec<_> = spec.paths.paths.keys().cloned().collect();

        for expected in [
            "/",
            "/health/store",
            "/documents",
            "/documents/search",
            "/documents/{id}",
            "/documents/{id}/qr-code",
            "/documents/{id}/generate-receipt",
        ] {
            assert!(
                paths.iter().any(|p| p == expected),
                "missing path {expected} in {paths:?}"
            );
        }
    }
}
