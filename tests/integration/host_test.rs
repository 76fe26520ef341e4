//! Integration tests for the JSON-lines host loop.

mod helpers;

use serde_json::Value;

use dashmark::host;
use dashmark_service::scan::ScanService;

use helpers::test_config;

async fn service() -> ScanService {
    let config = test_config();
    let store = dashmark_store::open_store(&config.store).await.unwrap();
    ScanService::new(store, config.scan)
}

async fn exchange(input: &str) -> (usize, Vec<Value>) {
    let service = service().await;
    let mut output = Vec::new();
    let answered = host::serve(&service, input.as_bytes(), &mut output)
        .await
        .unwrap();

    let responses = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (answered, responses)
}

#[tokio::test]
async fn test_one_response_per_request() {
    let input = concat!(
        r#"{"mode":"duplicates"}"#,
        "\n",
        "\n",
        r#"{"mode":"emptyFolders"}"#,
        "\n",
        r#"{"mode":"allBookmarks"}"#,
        "\n",
    );
    let (answered, responses) = exchange(input).await;
    assert_eq!(answered, 3);
    assert_eq!(responses.len(), 3);

    let duplicates = responses[0]["results"].as_array().unwrap();
    assert_eq!(duplicates.len(), 2);
    assert_eq!(duplicates[1]["id"], "7");
    assert_eq!(duplicates[1]["folderPath"], "Bookmarks bar -> Work");
    assert_eq!(duplicates[1]["url"], "https://example.com/");

    let folders = responses[1]["results"].as_array().unwrap();
    assert_eq!(folders[0]["title"], "Archive");
    assert_eq!(folders[0]["url"], "");

    assert_eq!(responses[2]["results"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_malformed_lines_get_error_responses() {
    let input = "not json\n{\"mode\":\"sortByDate\"}\n{\"mode\":\"duplicates\"}\n";
    let (answered, responses) = exchange(input).await;
    assert_eq!(answered, 3);

    assert!(responses[0]["error"].as_str().unwrap().starts_with("Invalid request"));
    assert!(responses[1]["error"].is_string());
    assert!(responses[2]["results"].is_array());
}

#[tokio::test]
async fn test_eof_without_requests() {
    let (answered, responses) = exchange("").await;
    assert_eq!(answered, 0);
    assert!(responses.is_empty());
}
