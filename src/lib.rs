//! Shelfmark: a document-archive record keeper.
//!
//! Stores metadata about physical documents (title, department, owner,
//! shelf/box/folder location) and serves CRUD plus two derived artefacts
//! over HTTP: a QR code encoding a record's metadata and a printable PDF
//! receipt embedding that QR code.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod render;
pub mod server;
