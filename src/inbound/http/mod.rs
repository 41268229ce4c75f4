//! HTTP inbound adapter exposing the archive's REST endpoints.

pub mod documents;
pub mod error;
pub mod health;
pub mod receipts;
pub mod state;

pub use error::{ApiError, ApiResult};
