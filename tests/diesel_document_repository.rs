//! Integration tests for the Diesel-backed document repository.
//!
//! Each test opens a fresh SQLite database in a temp directory; the pool
//! runs the embedded migrations, so no setup beyond `open_repository` is
//! needed.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tempfile::TempDir;

use shelfmark::domain::ports::DocumentRepository;
use shelfmark::domain::{DocumentDraft, DocumentPatch, SearchFilter};
use shelfmark::outbound::persistence::{DbPool, DieselDocumentRepository, PoolConfig};

fn open_repository() -> (TempDir, DieselDocumentRepository) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("archive.db");
    let config = PoolConfig::new(path.to_string_lossy())
        .with_max_size(4)
        .with_connection_timeout(Duration::from_secs(5));
    let pool = DbPool::new(config).expect("pool with migrations");
    (dir, DieselDocumentRepository::new(pool))
}

fn draft(title: &str, department: Option<&str>) -> DocumentDraft {
    DocumentDraft {
        title: title.into(),
        description: None,
        department: department.map(Into::into),
        owner_name: None,
        owner_contact: None,
        shelf_code: None,
        box_number: None,
        folder_number: None,
    }
}

#[tokio::test]
async fn create_assigns_sequential_ids_and_server_timestamp() {
    let (_dir, repo) = open_repository();

    let before = Utc::now();
    let first = repo.create(draft("Report A", None)).await.expect("create");
    let second = repo.create(draft("Invoice B", None)).await.expect("create");
    let after = Utc::now();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert!(first.date_registered >= before - chrono::Duration::seconds(1));
    assert!(first.date_registered <= after + chrono::Duration::seconds(1));
}

#[tokio::test]
async fn deleted_ids_are_never_reassigned() {
    let (_dir, repo) = open_repository();

    let first = repo.create(draft("Report A", None)).await.expect("create");
    assert!(repo.delete(first.id).await.expect("delete"));

    let second = repo.create(draft("Report B", None)).await.expect("create");
    assert!(
        second.id > first.id,
        "id {} was reused after deletion",
        first.id
    );
}

#[tokio::test]
async fn get_round_trips_the_full_record() {
    let (_dir, repo) = open_repository();

    let created = repo
        .create(DocumentDraft {
            title: "Report A".into(),
            description: Some("Quarterly figures".into()),
            department: Some("Finance".into()),
            owner_name: Some("Ada Lovelace".into()),
            owner_contact: Some("ada@example.org".into()),
            shelf_code: Some("S1".into()),
            box_number: Some("B2".into()),
            folder_number: Some("F3".into()),
        })
        .await
        .expect("create");

    let fetched = repo
        .get(created.id)
        .await
        .expect("get")
        .expect("record exists");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_missing_id_is_none() {
    let (_dir, repo) = open_repository();
    assert_eq!(repo.get(99).await.expect("get"), None);
}

#[tokio::test]
async fn list_returns_records_in_id_order() {
    let (_dir, repo) = open_repository();
    repo.create(draft("Report A", None)).await.expect("create");
    repo.create(draft("Invoice B", None)).await.expect("create");

    let all = repo.list().await.expect("list");
    let ids: Vec<_> = all.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn search_matches_substrings_case_insensitively_and_ands_filters() {
    let (_dir, repo) = open_repository();
    repo.create(draft("Report A", Some("Legal")))
        .await
        .expect("create");
    repo.create(draft("Invoice B", Some("Finance")))
        .await
        .expect("create");
    repo.create(draft("Shipping Report", None))
        .await
        .expect("create");

    let by_title = repo
        .search(SearchFilter::new(Some("REP".into()), None))
        .await
        .expect("search");
    let titles: Vec<_> = by_title.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["Report A", "Shipping Report"]);

    // A department filter never matches records without a department.
    let by_department = repo
        .search(SearchFilter::new(None, Some("fin".into())))
        .await
        .expect("search");
    assert_eq!(by_department.len(), 1);
    assert_eq!(by_department[0].title, "Invoice B");

    let anded = repo
        .search(SearchFilter::new(Some("rep".into()), Some("fin".into())))
        .await
        .expect("search");
    assert!(anded.is_empty());

    let unconstrained = repo
        .search(SearchFilter::new(None, None))
        .await
        .expect("search");
    assert_eq!(unconstrained.len(), 3);
}

#[tokio::test]
async fn update_merges_only_patch_fields() {
    let (_dir, repo) = open_repository();
    let created = repo
        .create(DocumentDraft {
            title: "Report A".into(),
            description: Some("Original".into()),
            department: Some("Finance".into()),
            owner_name: None,
            owner_contact: None,
            shelf_code: Some("S1".into()),
            box_number: None,
            folder_number: None,
        })
        .await
        .expect("create");

    let updated = repo
        .update(
            created.id,
            DocumentPatch {
                description: Some("Amended".into()),
                box_number: Some("B9".into()),
                ..DocumentPatch::default()
            },
        )
        .await
        .expect("update")
        .expect("record exists");

    assert_eq!(updated.description.as_deref(), Some("Amended"));
    assert_eq!(updated.box_number.as_deref(), Some("B9"));
    assert_eq!(updated.title, "Report A");
    assert_eq!(updated.department.as_deref(), Some("Finance"));
    assert_eq!(updated.shelf_code.as_deref(), Some("S1"));
    assert_eq!(updated.date_registered, created.date_registered);

    // The merge is persisted, not just returned.
    let fetched = repo
        .get(created.id)
        .await
        .expect("get")
        .expect("record exists");
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_with_empty_patch_returns_the_record_unchanged() {
    let (_dir, repo) = open_repository();
    let created = repo.create(draft("Report A", None)).await.expect("create");

    let updated = repo
        .update(created.id, DocumentPatch::default())
        .await
        .expect("update")
        .expect("record exists");

    assert_eq!(updated, created);
}

#[tokio::test]
async fn update_missing_id_is_none() {
    let (_dir, repo) = open_repository();

    let result = repo
        .update(
            42,
            DocumentPatch {
                description: Some("anything".into()),
                ..DocumentPatch::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(result, None);
}

#[tokio::test]
async fn delete_is_permanent_and_reports_missing_ids() {
    let (_dir, repo) = open_repository();
    let created = repo.create(draft("Report A", None)).await.expect("create");

    assert!(repo.delete(created.id).await.expect("delete"));
    assert_eq!(repo.get(created.id).await.expect("get"), None);
    assert!(!repo.delete(created.id).await.expect("second delete"));
}

#[tokio::test]
async fn count_tracks_the_number_of_records() {
    let (_dir, repo) = open_repository();
    assert_eq!(repo.count().await.expect("count"), 0);

    repo.create(draft("Report A", None)).await.expect("create");
    repo.create(draft("Invoice B", None)).await.expect("create");
    assert_eq!(repo.count().await.expect("count"), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_assign_distinct_ids() {
    let (_dir, repo) = open_repository();
    let repo = Arc::new(repo);

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..8 {
        let repo = Arc::clone(&repo);
        tasks.spawn(async move { repo.create(draft(&format!("Document {i}"), None)).await });
    }

    let mut ids = HashSet::new();
    while let Some(result) = tasks.join_next().await {
        let document = result.expect("task join").expect("create");
        assert!(ids.insert(document.id), "duplicate id {}", document.id);
    }
    assert_eq!(ids.len(), 8);
}
