//! Common utilities for integration tests

use assert_cmd::Command;
use relfetch::config::{Config, TOKEN_ENV_VARS};
use std::path::{Path, PathBuf};

/// The relfetch binary with token variables cleared
pub fn relfetch_command() -> Command {
    let mut cmd = Command::cargo_bin("relfetch").unwrap();
    for name in TOKEN_ENV_VARS {
        cmd.env_remove(name);
    }
    cmd
}

/// Write a config file pointing the API at `api_url`
pub fn write_config(dir: &Path, api_url: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    let config = Config {
        api_url: api_url.to_string(),
        ..Default::default()
    };
    config.save_to(&path).unwrap();
    path
}

/// A release object as the API returns it
pub fn release_json(
    tag: &str,
    prerelease: bool,
    created_at: &str,
    assets: &[(String, String)],
) -> serde_json::Value {
    let assets: Vec<serde_json::Value> = assets
        .iter()
        .map(|(name, url)| serde_json::json!({ "name": name, "browser_download_url": url }))
        .collect();
    serde_json::json!({
        "tag_name": tag,
        "prerelease": prerelease,
        "created_at": created_at,
        "assets": assets,
    })
}
