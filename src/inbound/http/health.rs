//! Liveness and store health probes.
//!
//! ```text
//! GET /              Liveness message
//! GET /health/store  Store reachability plus record count
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

use super::documents::map_repository_error;

/// Human-readable probe response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProbeMessage {
    pub message: String,
}

/// Liveness message confirming the process is serving requests.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = ProbeMessage)),
    tags = ["health"],
    operation_id = "liveness"
)]
#[get("/")]
pub async fn liveness() -> web::Json<ProbeMessage> {
    web::Json(ProbeMessage {
        message: "Archive system is running!".to_owned(),
    })
}

/// Store probe: proves the database answers queries.
#[utoipa::path(
    get,
    path = "/health/store",
    responses(
        (status = 200, description = "Store reachable", body = ProbeMessage),
        (status = 500, description = "Store unreachable", body = crate::domain::Error)
    ),
    tags = ["health"],
    operation_id = "storeHealth"
)]
#[get("/health/store")]
pub async fn store_health(state: web::Data<HttpState>) -> ApiResult<web::Json<ProbeMessage>> {
    let count = state
        .documents
        .count()
        .await
        .map_err(map_repository_error)?;

    Ok(web::Json(ProbeMessage {
        message: format!("Database connected! Documents count: {count}"),
    }))
}
