//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_cors::Cors;
use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::documents::{
    create_document, delete_document, get_document, list_documents, search_documents,
    update_document,
};
use crate::inbound::http::health::{liveness, store_health};
use crate::inbound::http::receipts::{document_qr_code, generate_receipt};
use crate::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;

/// Cross-origin policy: one configured origin, any method, any header,
/// credentials allowed.
fn cors_policy(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

/// Assemble the application served by every worker.
///
/// Also used directly by the handler tests, so the routing table and CORS
/// policy under test are exactly the production ones.
pub fn build_app(
    state: web::Data<HttpState>,
    allowed_origin: &str,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let app = App::new()
        .app_data(state)
        .wrap(cors_policy(allowed_origin))
        .service(liveness)
        .service(store_health)
        // The literal `search` segment must be registered before `{id}`.
        .service(search_documents)
        .service(list_documents)
        .service(create_document)
        .service(document_qr_code)
        .service(generate_receipt)
        .service(get_document)
        .service(update_document)
        .service(delete_document);

    #[cfg(debug_assertions)]
    let app = app.route(
        "/api-docs/openapi.json",
        web::get().to(|| async { actix_web::HttpResponse::Ok().json(ApiDoc::openapi()) }),
    );
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}
