//! Integration tests for scans over on-disk bookmark stores.

mod helpers;

use dashmark_entity::scan::{EMPTY_FOLDER_URL, QueryMode};
use dashmark_service::scan::{ScanService, ScanSummary, filter_entries};

use helpers::{TestProfile, ids_and_paths, test_config};

#[tokio::test]
async fn test_duplicates_in_chromium_profile() {
    let profile = TestProfile::new();
    let scan = profile.scan().await;

    let duplicates = scan.find_duplicates().await.unwrap();
    assert_eq!(
        ids_and_paths(&duplicates),
        vec![
            ("10", "Bookmarks bar"),
            ("13", "Bookmarks bar -> Dev"),
            ("15", "Bookmarks bar"),
            ("21", "Other bookmarks -> Reading"),
        ]
    );

    let summary = ScanSummary::from_entries(&duplicates);
    assert_eq!(summary.total_urls, 4);
    assert_eq!(summary.distinct_urls, 2);
}

#[tokio::test]
async fn test_empty_folders_in_chromium_profile() {
    let profile = TestProfile::new();
    let scan = profile.scan().await;

    let folders = scan.find_empty_folders().await.unwrap();
    assert_eq!(
        ids_and_paths(&folders),
        vec![
            ("14", "Bookmarks bar -> Dev"),
            ("23", "Other bookmarks"),
            ("3", "Mobile bookmarks"),
        ]
    );
    assert!(folders.iter().all(|e| e.url == EMPTY_FOLDER_URL));
}

#[tokio::test]
async fn test_all_bookmarks_grouped_by_first_seen_url() {
    let profile = TestProfile::new();
    let scan = profile.scan().await;

    let all = scan.list_bookmarks().await.unwrap();
    let ids: Vec<&str> = all.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["10", "13", "12", "15", "21", "22"]);

    let rust = filter_entries(&all, "rust");
    let ids: Vec<&str> = rust.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["10", "13", "22"]);
}

#[tokio::test]
async fn test_scan_does_not_modify_file() {
    let profile = TestProfile::new();
    let before = std::fs::read(&profile.path).unwrap();

    let scan = profile.scan().await;
    for mode in [
        QueryMode::Duplicates,
        QueryMode::EmptyFolders,
        QueryMode::AllBookmarks,
    ] {
        scan.query(mode).await.unwrap();
    }

    assert_eq!(std::fs::read(&profile.path).unwrap(), before);
}

#[tokio::test]
async fn test_snapshot_provider_from_config() {
    let config = test_config();
    let store = dashmark_store::open_store(&config.store).await.unwrap();
    let scan = ScanService::new(store, config.scan);

    let duplicates = scan.find_duplicates().await.unwrap();
    assert_eq!(
        ids_and_paths(&duplicates),
        vec![("5", "Bookmarks bar"), ("7", "Bookmarks bar -> Work")]
    );

    let folders = scan.find_empty_folders().await.unwrap();
    assert_eq!(
        ids_and_paths(&folders),
        vec![("8", "Bookmarks bar -> Work"), ("2", "Other bookmarks")]
    );
}
