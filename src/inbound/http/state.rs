//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::DocumentRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub documents: Arc<dyn DocumentRepository>,
}

impl HttpState {
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }
}
