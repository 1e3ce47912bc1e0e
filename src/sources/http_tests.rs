//! Tests for the HTTP sources against a mock server

use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn sources_with_mock(mock_uri: &str) -> HttpSources {
    let mut sources = HttpSources::new("test_key".to_string());
    sources.card_feed_url = format!("{}/api/v7/cardinfo.php", mock_uri);
    sources.sheets_base_url = mock_uri.to_string();
    sources.spreadsheet_id = "test-sheet".to_string();
    sources
}

fn sheet_path() -> wiremock::matchers::PathRegexMatcher {
    path_regex(r"^/v4/spreadsheets/test-sheet/values/.+$")
}

// ── card feed ────────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_cards_success() {
    let mock_server = MockServer::start().await;
    let sources = sources_with_mock(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v7/cardinfo.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "id": 46986414,
                    "name": "Dark Magician",
                    "type": "Normal Monster",
                    "desc": "The ultimate wizard.",
                    "atk": 2500,
                    "def": 2100,
                    "level": 7,
                    "card_sets": [{ "set_code": "LOB-005", "set_name": "Legend of Blue Eyes White Dragon" }],
                    "card_images": []
                },
                {
                    "id": 1,
                    "name": "Some Token",
                    "type": "Token",
                    "desc": ""
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let cards = sources.fetch_cards().await.unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].name, "Dark Magician");
    assert!(cards[1].card_sets.is_none());
}

#[tokio::test]
async fn fetch_cards_error_payload() {
    let mock_server = MockServer::start().await;
    let sources = sources_with_mock(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v7/cardinfo.php"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "Too many requests"
        })))
        .mount(&mock_server)
        .await;

    let err = sources.fetch_cards().await.unwrap_err();
    assert!(matches!(err, PoolError::SourcePayload { .. }));
}

#[tokio::test]
async fn fetch_cards_malformed_json() {
    let mock_server = MockServer::start().await;
    let sources = sources_with_mock(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v7/cardinfo.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&mock_server)
        .await;

    let err = sources.fetch_cards().await.unwrap_err();
    assert!(matches!(err, PoolError::Parse(_)));
}

#[tokio::test]
async fn fetch_cards_server_error_without_json() {
    let mock_server = MockServer::start().await;
    let sources = sources_with_mock(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v7/cardinfo.php"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let err = sources.fetch_cards().await.unwrap_err();
    match err {
        PoolError::HttpStatus(status) => assert_eq!(status.as_u16(), 502),
        other => panic!("unexpected error: {other}"),
    }
}

// ── spreadsheet tables ───────────────────────────────────────────────

#[tokio::test]
async fn fetch_table_rows() {
    let mock_server = MockServer::start().await;
    let sources = sources_with_mock(&mock_server.uri());

    Mock::given(method("GET"))
        .and(sheet_path())
        .and(query_param("key", "test_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "range": "Sheet1!A2:E3",
            "majorDimension": "ROWS",
            "values": [
                ["Dark Magician", "Limited", "", ""],
                ["Pot of Greed", "Forbidden"]
            ]
        })))
        .mount(&mock_server)
        .await;

    let rows = sources.fetch_table(Table::Legality).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], vec!["Pot of Greed".to_string(), "Forbidden".to_string()]);
}

#[tokio::test]
async fn fetch_table_error_payload() {
    let mock_server = MockServer::start().await;
    let sources = sources_with_mock(&mock_server.uri());

    Mock::given(method("GET"))
        .and(sheet_path())
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {
                "code": 429,
                "message": "Quota exceeded for quota metric 'Read requests'",
                "status": "RESOURCE_EXHAUSTED"
            }
        })))
        .mount(&mock_server)
        .await;

    let err = sources.fetch_table(Table::Exceptions).await.unwrap_err();
    match err {
        PoolError::SourcePayload {
            feed, code, status, ..
        } => {
            assert_eq!(feed, "exception sheet");
            assert_eq!(code, 429);
            assert_eq!(status, "RESOURCE_EXHAUSTED");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn fetch_empty_table() {
    let mock_server = MockServer::start().await;
    let sources = sources_with_mock(&mock_server.uri());

    Mock::given(method("GET"))
        .and(sheet_path())
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "range": "Decklists!A1:B1000",
            "majorDimension": "ROWS"
        })))
        .mount(&mock_server)
        .await;

    let rows = sources.fetch_table(Table::Decklists).await.unwrap();
    assert!(rows.is_empty());
}

// ── url building ─────────────────────────────────────────────────────

#[test]
fn sheet_url_encodes_range_and_key() {
    let mut sources = HttpSources::new("k&y".to_string());
    sources.sheets_base_url = "http://sheets.test/".to_string();
    sources.spreadsheet_id = "abc".to_string();
    sources.exceptions_range = "AddList!A2:D".to_string();

    assert_eq!(
        sources.sheet_url(Table::Exceptions),
        "http://sheets.test/v4/spreadsheets/abc/values/AddList%21A2%3AD?key=k%26y"
    );
}
