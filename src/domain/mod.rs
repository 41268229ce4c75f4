//! Domain primitives and contracts.
//!
//! Purpose: define the strongly typed document record and the repository
//! port the adapters implement, with invariants and serde contracts
//! documented on each type.
//!
//! Public surface:
//! - `Document`, `DocumentDraft`, `DocumentPatch`, `SearchFilter` — the
//!   record and its value objects.
//! - `Error` / `ErrorCode` — transport-agnostic error envelope.
//! - `ports::DocumentRepository` — persistence port.

pub mod document;
pub mod error;
pub mod ports;

pub use self::document::{Document, DocumentDraft, DocumentPatch, SearchFilter};
pub use self::error::{Error, ErrorCode, ErrorValidationError};

/// Convenient domain result alias.
pub type DomainResult<T> = Result<T, Error>;
