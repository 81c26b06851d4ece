//! Release resolution through the reqwest client against a mock API

use super::common::release_json;
use chrono::{TimeZone, Utc};
use relfetch::core::RelfetchError;
use relfetch::download::Client;
use relfetch::github::{AssetFinder, PagingLimits, ResolutionRequest};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn asset(server: &MockServer, name: &str) -> (String, String) {
    (name.to_string(), format!("{}/download/{}", server.uri(), name))
}

#[tokio::test]
async fn test_exact_tag() {
    let server = MockServer::start().await;
    let body = release_json(
        "v1.0.0",
        false,
        "2024-01-01T00:00:00Z",
        &[asset(&server, "tool-linux.tar.gz")],
    );
    Mock::given(method("GET"))
        .and(path("/repos/owner/tool/releases/tags/v1.0.0"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let finder = AssetFinder::new(server.uri());
    let request = ResolutionRequest::new("owner/tool", "tags/v1.0.0");
    let assets = finder.find(&request, &Client::default()).await.unwrap();

    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].name, "tool-linux.tar.gz");
    assert_eq!(
        assets[0].download_url,
        format!("{}/download/tool-linux.tar.gz", server.uri())
    );
}

#[tokio::test]
async fn test_partial_tag_falls_back_to_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/tool/releases/tags/v2"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"message":"Not Found"}"#),
        )
        .mount(&server)
        .await;

    let page = serde_json::json!([
        release_json("v3.0.0", false, "2024-03-01T00:00:00Z", &[asset(&server, "v3.zip")]),
        release_json("v2.1.0", false, "2024-02-01T00:00:00Z", &[asset(&server, "v21.zip")]),
        release_json("v2.0.0", false, "2024-01-01T00:00:00Z", &[asset(&server, "v20.zip")]),
    ]);
    Mock::given(method("GET"))
        .and(path("/repos/owner/tool/releases"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page))
        .expect(1)
        .mount(&server)
        .await;

    let finder = AssetFinder::new(server.uri());
    let request = ResolutionRequest::new("owner/tool", "tags/v2");
    let assets = finder.find(&request, &Client::default()).await.unwrap();

    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].name, "v21.zip");
}

#[tokio::test]
async fn test_missing_tag_reports_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/tool/releases/tags/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/tool/releases"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let finder = AssetFinder::new(server.uri()).with_paging(PagingLimits::new(2, 5));
    let request = ResolutionRequest::new("owner/tool", "tags/nope");
    let err = finder.find(&request, &Client::default()).await.unwrap_err();

    assert!(matches!(err, RelfetchError::NoMatchingTag(ref t) if t == "nope"));
}

#[tokio::test]
async fn test_prerelease_latest_resolves_tag_first() {
    let server = MockServer::start().await;
    let latest = release_json("v5.0.0-rc1", true, "2024-05-01T00:00:00Z", &[]);
    Mock::given(method("GET"))
        .and(path("/repos/owner/tool/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(latest))
        .expect(1)
        .mount(&server)
        .await;
    let rc = release_json(
        "v5.0.0-rc1",
        true,
        "2024-05-01T00:00:00Z",
        &[asset(&server, "rc.zip")],
    );
    Mock::given(method("GET"))
        .and(path("/repos/owner/tool/releases/tags/v5.0.0-rc1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rc))
        .expect(1)
        .mount(&server)
        .await;

    let finder = AssetFinder::new(server.uri());
    let request = ResolutionRequest::new("owner/tool", "latest").with_prerelease(true);
    let assets = finder.find(&request, &Client::default()).await.unwrap();

    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].name, "rc.zip");
}

#[tokio::test]
async fn test_prerelease_latest_failure_is_wrapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/tool/releases/latest"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let finder = AssetFinder::new(server.uri());
    let request = ResolutionRequest::new("owner/tool", "latest").with_prerelease(true);
    let err = finder.find(&request, &Client::default()).await.unwrap_err();

    assert!(matches!(err, RelfetchError::LatestTag(_)));
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_old_release_is_no_upgrade() {
    let server = MockServer::start().await;
    let body = release_json("v1.0.0", false, "2024-01-01T00:00:00Z", &[]);
    Mock::given(method("GET"))
        .and(path("/repos/owner/tool/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let finder = AssetFinder::new(server.uri());
    let request = ResolutionRequest::new("owner/tool", "latest")
        .with_min_time(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    let err = finder.find(&request, &Client::default()).await.unwrap_err();

    assert!(err.is_no_upgrade());
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/tool/releases/latest"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"{"message":"boom"}"#),
        )
        .mount(&server)
        .await;

    let finder = AssetFinder::new(server.uri());
    let request = ResolutionRequest::new("owner/tool", "latest");
    let err = finder.find(&request, &Client::default()).await.unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert!(err.to_string().contains("boom"));
}
