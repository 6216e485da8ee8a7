//! Integration tests for data URL decoding and the fetcher.

use domql_common::{DataURL, FetchConfig, FetchError, Fetcher};

fn fetcher() -> Fetcher {
    Fetcher::new(&FetchConfig::default()).unwrap()
}

// ========== DataURL ==========

#[test]
fn test_data_url_base64() {
    let url = DataURL::new("data:text/html;base64,PHA+SGk8L3A+".to_string());
    assert_eq!(url.decode().unwrap(), b"<p>Hi</p>");
    assert_eq!(url.media_type().unwrap(), "text/html");
}

#[test]
fn test_data_url_percent_encoded() {
    let url = DataURL::new("data:text/html,%3Cp%3EHello%20World%3C%2Fp%3E".to_string());
    assert_eq!(url.decode().unwrap(), b"<p>Hello World</p>");
}

#[test]
fn test_data_url_plain_payload() {
    let url = DataURL::new("data:,<b>bold</b>".to_string());
    assert_eq!(url.decode().unwrap(), b"<b>bold</b>");
}

#[test]
fn test_data_url_default_media_type() {
    let url = DataURL::new("data:,hello".to_string());
    assert_eq!(url.media_type().unwrap(), "text/plain;charset=US-ASCII");
}

#[test]
fn test_data_url_parameters_without_type() {
    let url = DataURL::new("data:;charset=utf-8,hello".to_string());
    assert_eq!(url.media_type().unwrap(), "text/plain;charset=utf-8");
}

#[test]
fn test_data_url_missing_comma() {
    let url = DataURL::new("data:text/html".to_string());
    assert!(matches!(
        url.decode(),
        Err(FetchError::InvalidDataUrl { .. })
    ));
}

#[test]
fn test_data_url_bad_base64() {
    let url = DataURL::new("data:text/html;base64,!!!".to_string());
    let err = url.decode().unwrap_err();
    assert!(err.to_string().starts_with("invalid data URL: base64 decode error"));
}

// ========== Fetcher ==========

#[tokio::test]
async fn test_fetch_data_url() {
    let page = fetcher()
        .fetch("data:text/html,<title>T</title><p>x</p>")
        .await
        .unwrap();

    assert_eq!(page.status_code, 200);
    assert_eq!(page.status_message, "200 OK");
    assert_eq!(page.content_type, "text/html");
    assert_eq!(page.body, "<title>T</title><p>x</p>");
}

#[tokio::test]
async fn test_fetch_invalid_data_url() {
    let result = fetcher().fetch("data:nothing-here").await;
    assert!(matches!(result, Err(FetchError::InvalidDataUrl { .. })));
}

#[tokio::test]
async fn test_fetch_unreachable() {
    // Port 1 on loopback is never served in test environments.
    let err = fetcher().fetch("http://127.0.0.1:1/").await.unwrap_err();
    assert!(matches!(err, FetchError::Unreachable { .. }));
    assert!(err.to_string().starts_with("http://127.0.0.1:1/ is not accessible"));
}

#[tokio::test]
async fn test_fetch_malformed_url_is_unreachable() {
    let err = fetcher().fetch("not a url").await.unwrap_err();
    assert!(matches!(err, FetchError::Unreachable { .. }));
}
