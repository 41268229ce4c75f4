//! Document records and the value objects used to create, amend, and find
//! them.
//!
//! A [`Document`] is one physical document's metadata row: what it is, who
//! owns it, and where it sits in the archive (shelf/box/folder). Records are
//! created from a [`DocumentDraft`], amended through a [`DocumentPatch`], and
//! located with a [`SearchFilter`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One document's metadata row.
///
/// `id` is assigned by the store on creation and never reused after
/// deletion. `date_registered` is stamped by the server at creation and is
/// immutable thereafter. Every other field except `title` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub department: Option<String>,
    pub owner_name: Option<String>,
    pub owner_contact: Option<String>,
    pub shelf_code: Option<String>,
    pub box_number: Option<String>,
    pub folder_number: Option<String>,
    #[schema(format = "date-time")]
    pub date_registered: DateTime<Utc>,
}

/// Fields supplied when registering a new document.
///
/// The store assigns `id` and `date_registered`; a draft carries everything
/// else. Title validation happens at the inbound boundary, before a draft is
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDraft {
    pub title: String,
    pub description: Option<String>,
    pub department: Option<String>,
    pub owner_name: Option<String>,
    pub owner_contact: Option<String>,
    pub shelf_code: Option<String>,
    pub box_number: Option<String>,
    pub folder_number: Option<String>,
}

/// A partial update: only fields present in the patch change.
///
/// An absent field leaves the current value untouched, so a patch cannot
/// clear a field back to empty. The merge is an explicit field-by-field
/// overlay, shared by every repository implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub department: Option<String>,
    pub owner_name: Option<String>,
    pub owner_contact: Option<String>,
    pub shelf_code: Option<String>,
    pub box_number: Option<String>,
    pub folder_number: Option<String>,
}

impl DocumentPatch {
    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.department.is_none()
            && self.owner_name.is_none()
            && self.owner_contact.is_none()
            && self.shelf_code.is_none()
            && self.box_number.is_none()
            && self.folder_number.is_none()
    }

    /// Overlay the patch on `current`, returning the merged record.
    ///
    /// `id` and `date_registered` are never touched.
    pub fn apply_to(&self, mut current: Document) -> Document {
        if let Some(title) = &self.title {
            current.title = title.clone();
        }
        if let Some(description) = &self.description {
            current.description = Some(description.clone());
        }
        if let Some(department) = &self.department {
            current.department = Some(department.clone());
        }
        if let Some(owner_name) = &self.owner_name {
            current.owner_name = Some(owner_name.clone());
        }
        if let Some(owner_contact) = &self.owner_contact {
            current.owner_contact = Some(owner_contact.clone());
        }
        if let Some(shelf_code) = &self.shelf_code {
            current.shelf_code = Some(shelf_code.clone());
        }
        if let Some(box_number) = &self.box_number {
            current.box_number = Some(box_number.clone());
        }
        if let Some(folder_number) = &self.folder_number {
            current.folder_number = Some(folder_number.clone());
        }
        current
    }
}

/// Search criteria for the archive.
///
/// Each supplied filter is a case-insensitive substring match; filters are
/// ANDed. Blank values are normalised away so `?title=` behaves like an
/// absent parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub title: Option<String>,
    pub department: Option<String>,
}

impl SearchFilter {
    /// Build a filter, discarding blank (whitespace-only) values.
    pub fn new(title: Option<String>, department: Option<String>) -> Self {
        Self {
            title: normalise(title),
            department: normalise(department),
        }
    }

    /// True when no filter is set, i.e. the search degenerates to a list.
    pub fn is_unconstrained(&self) -> bool {
        self.title.is_none() && self.department.is_none()
    }
}

fn normalise(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_document() -> Document {
        Document {
            id: 7,
            title: "Report A".into(),
            description: Some("Quarterly figures".into()),
            department: Some("Finance".into()),
            owner_name: None,
            owner_contact: None,
            shelf_code: Some("S1".into()),
            box_number: None,
            folder_number: None,
            date_registered: DateTime::from_timestamp(1_754_000_000, 0).expect("valid timestamp"),
        }
    }

    #[rstest]
    fn patch_overlays_only_supplied_fields() {
        let patch = DocumentPatch {
            description: Some("Amended".into()),
            owner_name: Some("Ada".into()),
            ..DocumentPatch::default()
        };

        let merged = patch.apply_to(sample_document());

        assert_eq!(merged.description.as_deref(), Some("Amended"));
        assert_eq!(merged.owner_name.as_deref(), Some("Ada"));
        // Untouched fields keep their prior values.
        assert_eq!(merged.title, "Report A");
        assert_eq!(merged.department.as_deref(), Some("Finance"));
        assert_eq!(merged.box_number, None);
    }

    #[rstest]
    fn patch_never_touches_id_or_registration_time() {
        let original = sample_document();
        let patch = DocumentPatch {
            title: Some("Renamed".into()),
            ..DocumentPatch::default()
        };

        let merged = patch.apply_to(original.clone());

        assert_eq!(merged.id, original.id);
        assert_eq!(merged.date_registered, original.date_registered);
    }

    #[rstest]
    fn empty_patch_is_a_no_op() {
        let original = sample_document();
        let patch = DocumentPatch::default();

        assert!(patch.is_empty());
        assert_eq!(patch.apply_to(original.clone()), original);
    }

    #[rstest]
    #[case(None, None, true)]
    #[case(Some("".into()), Some("   ".into()), true)]
    #[case(Some("rep".into()), None, false)]
    fn blank_filters_are_normalised_away(
        #[case] title: Option<String>,
        #[case] department: Option<String>,
        #[case] unconstrained: bool,
    ) {
        let filter = SearchFilter::new(title, department);
        assert_eq!(filter.is_unconstrained(), unconstrained);
    }
}
