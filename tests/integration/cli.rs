//! Tests for the `relfetch` binary

use super::common::{relfetch_command, release_json, write_config};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_release(server: &MockServer, tag: &str, created_at: &str, names: &[&str]) {
    let assets: Vec<(String, String)> = names
        .iter()
        .map(|n| (n.to_string(), format!("{}/download/{}", server.uri(), n)))
        .collect();
    let body = release_json(tag, false, created_at, &assets);

    Mock::given(method("GET"))
        .and(path(format!("/repos/owner/tool/releases/tags/{}", tag)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;

    for name in names {
        Mock::given(method("GET"))
            .and(path(format!("/download/{}", name)))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(format!("contents of {}", name)))
            .mount(server)
            .await;
    }
}

#[test]
fn test_help() {
    relfetch_command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("owner/name"));
}

#[test]
fn test_missing_repo_argument() {
    relfetch_command().assert().failure();
}

#[test]
fn test_since_requires_upgrade_only() {
    relfetch_command()
        .args(["owner/tool", "--since", "2024-01-01T00:00:00Z"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_since_timestamp() {
    relfetch_command()
        .args(["owner/tool", "--upgrade-only", "--since", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RFC 3339"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_selected_asset() {
    let server = MockServer::start().await;
    mount_release(
        &server,
        "v1.2.0",
        "2024-01-01T00:00:00Z",
        &["tool-linux-amd64.tar.gz", "tool-darwin-amd64.tar.gz"],
    )
    .await;

    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri());
    let out = temp.path().join("tool.tar.gz");

    relfetch_command()
        .arg("owner/tool")
        .args(["--tag", "v1.2.0", "--asset", "linux", "--quiet"])
        .arg("--config")
        .arg(&config)
        .arg("--to")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "contents of tool-linux-amd64.tar.gz"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_into_directory() {
    let server = MockServer::start().await;
    mount_release(&server, "v1.0.0", "2024-01-01T00:00:00Z", &["tool.zip"]).await;

    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri());
    let dir = temp.path().join("bin");
    fs::create_dir(&dir).unwrap();

    relfetch_command()
        .args(["owner/tool", "--tag", "v1.0.0", "--quiet"])
        .arg("--config")
        .arg(&config)
        .arg("--to")
        .arg(&dir)
        .assert()
        .success();

    assert!(dir.join("tool.zip").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_to_stdout() {
    let server = MockServer::start().await;
    mount_release(&server, "v1.0.0", "2024-01-01T00:00:00Z", &["tool.txt"]).await;

    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri());

    relfetch_command()
        .args(["owner/tool", "--tag", "v1.0.0", "--to", "-"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout("contents of tool.txt");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_assets() {
    let server = MockServer::start().await;
    mount_release(&server, "v1.0.0", "2024-01-01T00:00:00Z", &["a.zip", "b.tar.gz"]).await;

    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri());

    relfetch_command()
        .args(["owner/tool", "--tag", "v1.0.0", "--list"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout("a.zip\nb.tar.gz\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ambiguous_asset_fails() {
    let server = MockServer::start().await;
    mount_release(&server, "v1.0.0", "2024-01-01T00:00:00Z", &["a.zip", "b.zip"]).await;

    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri());

    relfetch_command()
        .args(["owner/tool", "--tag", "v1.0.0"])
        .arg("--config")
        .arg(&config)
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 assets match"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_no_upgrade_exits_successfully() {
    let server = MockServer::start().await;
    mount_release(&server, "v1.0.0", "2024-01-01T00:00:00Z", &["tool.zip"]).await;

    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri());

    relfetch_command()
        .args(["owner/tool", "--tag", "v1.0.0", "--upgrade-only"])
        .args(["--since", "2025-06-01T00:00:00Z"])
        .arg("--config")
        .arg(&config)
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("not more recent"));

    assert!(!temp.path().join("tool.zip").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unmatched_tag_fails_with_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/tool/releases/tags/v9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/tool/releases"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri());

    relfetch_command()
        .args(["owner/tool", "--tag", "v9"])
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no matching tag for 'v9'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_download_keeps_existing_file() {
    let server = MockServer::start().await;
    let assets = vec![(
        "tool".to_string(),
        format!("{}/download/tool", server.uri()),
    )];
    Mock::given(method("GET"))
        .and(path("/repos/owner/tool/releases/tags/v1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(release_json(
            "v1.0.0",
            false,
            "2024-01-01T00:00:00Z",
            &assets,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/download/tool"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri());
    let installed = temp.path().join("tool");
    fs::write(&installed, "installed v0.9 binary").unwrap();

    relfetch_command()
        .args(["owner/tool", "--tag", "v1.0.0", "--quiet"])
        .arg("--config")
        .arg(&config)
        .arg("--to")
        .arg(&installed)
        .assert()
        .failure()
        .stderr(predicate::str::contains("500"));

    assert_eq!(
        fs::read_to_string(&installed).unwrap(),
        "installed v0.9 binary"
    );
    let names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 2, "staged file left behind: {:?}", names);
}
