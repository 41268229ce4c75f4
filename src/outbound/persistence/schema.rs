//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the embedded migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// The archive's single table: one row per physical document.
    ///
    /// `id` uses SQLite AUTOINCREMENT so deleted ids are never reassigned.
    documents (id) {
        /// Primary key, assigned by the store.
        id -> Integer,
        /// Required document title.
        title -> Text,
        /// Free-form description, unbounded length.
        description -> Nullable<Text>,
        /// Owning department.
        department -> Nullable<Text>,
        /// Contact person for the document.
        owner_name -> Nullable<Text>,
        owner_contact -> Nullable<Text>,
        /// Physical location triple: shelf, box, folder.
        shelf_code -> Nullable<Text>,
        box_number -> Nullable<Text>,
        folder_number -> Nullable<Text>,
        /// Creation instant (UTC), immutable after insert.
        date_registered -> Timestamp,
    }
}
