//! Integration tests for cleanups that rewrite the bookmarks file.

mod helpers;

use dashmark_core::types::BookmarkId;

use helpers::TestProfile;

#[tokio::test]
async fn test_dedupe_rewrites_file() {
    let profile = TestProfile::new();
    let cleanup = profile.cleanup().await;

    let report = cleanup.dedupe().await.unwrap();
    assert_eq!(
        report.removed,
        vec![BookmarkId::from("13"), BookmarkId::from("21")]
    );
    assert!(report.is_clean());

    let written = profile.read_json();
    assert!(written.get("checksum").is_none());
    assert_eq!(written["version"], 1);

    let reopened = profile.scan().await;
    assert!(reopened.find_duplicates().await.unwrap().is_empty());
    assert_eq!(reopened.list_bookmarks().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_backup_keeps_original_contents() {
    let profile = TestProfile::new();
    let original = std::fs::read(&profile.path).unwrap();

    let cleanup = profile.cleanup().await;
    cleanup.dedupe().await.unwrap();
    cleanup.prune_empty_folders().await.unwrap();

    let backup = profile.dir.path().join("Bookmarks.dashmark.bak");
    assert_eq!(std::fs::read(backup).unwrap(), original);
    assert!(!profile.dir.path().join("Bookmarks.dashmark.tmp").exists());
}

#[tokio::test]
async fn test_prune_keeps_root_folders() {
    let profile = TestProfile::new();
    let cleanup = profile.cleanup().await;

    let report = cleanup.prune_empty_folders().await.unwrap();
    assert_eq!(
        report.removed,
        vec![BookmarkId::from("14"), BookmarkId::from("23")]
    );

    let reopened = profile.scan().await;
    let folders = reopened.find_empty_folders().await.unwrap();
    let ids: Vec<&str> = folders.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["3"]);
}

#[tokio::test]
async fn test_remove_mixed_batch() {
    let profile = TestProfile::new();
    let cleanup = profile.cleanup().await;

    let batch = [
        BookmarkId::from("11"),
        BookmarkId::from("1"),
        BookmarkId::from("15"),
        BookmarkId::from("999"),
    ];
    let report = cleanup.delete(&batch, false).await;

    assert_eq!(report.removed, vec![BookmarkId::from("15")]);
    assert_eq!(report.missing, vec![BookmarkId::from("999")]);
    let failed: Vec<&str> = report.failed.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(failed, vec!["11", "1"]);

    let report = cleanup.delete(&[BookmarkId::from("11")], true).await;
    assert_eq!(report.removed, vec![BookmarkId::from("11")]);

    let reopened = profile.scan().await;
    let ids: Vec<String> = reopened
        .list_bookmarks()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.id.into_string())
        .collect();
    assert_eq!(ids, vec!["10", "21", "22"]);
}
