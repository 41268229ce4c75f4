//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::Document;

use super::schema::documents;

/// Row struct for reading from the documents table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct DocumentRow {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub department: Option<String>,
    pub owner_name: Option<String>,
    pub owner_contact: Option<String>,
    pub shelf_code: Option<String>,
    pub box_number: Option<String>,
    pub folder_number: Option<String>,
    pub date_registered: NaiveDateTime,
}

impl DocumentRow {
    /// Convert the row into the domain entity. Stored timestamps are naive
    /// UTC; the offset is reattached here.
    pub(crate) fn into_document(self) -> Document {
        Document {
            id: self.id,
            title: self.title,
            description: self.description,
            department: self.department,
            owner_name: self.owner_name,
            owner_contact: self.owner_contact,
            shelf_code: self.shelf_code,
            box_number: self.box_number,
            folder_number: self.folder_number,
            date_registered: self.date_registered.and_utc(),
        }
    }
}

/// Insertable struct for registering new documents. The id comes from the
/// store; the registration timestamp is stamped by the adapter.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = documents)]
pub(crate) struct NewDocumentRow<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub department: Option<&'a str>,
    pub owner_name: Option<&'a str>,
    pub owner_contact: Option<&'a str>,
    pub shelf_code: Option<&'a str>,
    pub box_number: Option<&'a str>,
    pub folder_number: Option<&'a str>,
    pub date_registered: NaiveDateTime,
}

/// Changeset writing a fully merged record back.
///
/// The merge happens in the domain (`DocumentPatch::apply_to`), so every
/// column is written explicitly; `None` here genuinely means NULL, not
/// "skip this column". `id` and `date_registered` are immutable and absent.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = documents)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct DocumentChangeset<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub department: Option<&'a str>,
    pub owner_name: Option<&'a str>,
    pub owner_contact: Option<&'a str>,
    pub shelf_code: Option<&'a str>,
    pub box_number: Option<&'a str>,
    pub folder_number: Option<&'a str>,
}

impl<'a> DocumentChangeset<'a> {
    pub(crate) fn from_document(document: &'a Document) -> Self {
        Self {
            title: &document.title,
            description: document.description.as_deref(),
            department: document.department.as_deref(),
            owner_name: document.owner_name.as_deref(),
            owner_contact: document.owner_contact.as_deref(),
            shelf_code: document.shelf_code.as_deref(),
            box_number: document.box_number.as_deref(),
            folder_number: document.folder_number.as_deref(),
        }
    }
}
