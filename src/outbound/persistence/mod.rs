//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides the concrete implementation of the domain's
//! `DocumentRepository` port, backed by an embedded SQLite database.
//!
//! # Architecture
//!
//! - **Thin adapters**: the repository only translates between Diesel rows
//!   and domain records. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are implementation details, never exposed to
//!   the domain layer.
//! - **Scoped connections**: each operation checks a connection out of the
//!   r2d2 pool and the guard returns it on drop, success or failure.
//! - **Strongly typed errors**: database failures are mapped to the
//!   domain's repository error type with the underlying message preserved.

mod diesel_document_repository;
mod models;
mod pool;
mod schema;

pub use diesel_document_repository::DieselDocumentRepository;
pub use pool::{DbPool, MIGRATIONS, PoolConfig, PoolError};
