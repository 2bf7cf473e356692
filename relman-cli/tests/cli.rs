use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const RELEASES_ONLY: &str = r#"
releases:
  owner: acme
  repo: plugin
  platform_versions: ["193"]
  asset_version_tpl: "$tag-$version"
  artifactory_url_tpl: "https://repo.example.com/$tpl_version.zip"
"#;

const SITE_ONLY: &str = r#"
update_site:
  plugin_repos:
    acme/plugin:
      id: x
      name: X
      versions: ["193"]
      version_tpl: "$tag-$version"
"#;

fn relman_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("relman"));
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env_remove("GITHUB_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.yaml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn help_lists_every_subcommand() {
    let home = TempDir::new().unwrap();
    relman_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("sync"))
        .stdout(contains("delete-assets"))
        .stdout(contains("generate"))
        .stdout(contains("diff"))
        .stdout(contains("status"));
}

#[test]
fn missing_default_config_is_reported() {
    let home = TempDir::new().unwrap();
    relman_cmd(home.path())
        .arg("sync")
        .assert()
        .failure()
        .stderr(contains("failed to load config"))
        .stderr(contains(".relman"));
}

#[test]
fn explicit_config_path_that_does_not_exist_is_reported() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("elsewhere.yaml");
    relman_cmd(home.path())
        .args(["--config", missing.to_str().unwrap(), "status"])
        .assert()
        .failure()
        .stderr(contains("elsewhere.yaml"));
}

#[test]
fn sync_without_releases_section_fails() {
    let home = TempDir::new().unwrap();
    let config = write_config(&home, SITE_ONLY);
    relman_cmd(home.path())
        .args(["--config", config.to_str().unwrap(), "--token", "t", "sync"])
        .assert()
        .failure()
        .stderr(contains("releases"));
}

#[test]
fn generate_without_update_site_section_fails() {
    let home = TempDir::new().unwrap();
    let config = write_config(&home, RELEASES_ONLY);
    relman_cmd(home.path())
        .args(["--config", config.to_str().unwrap(), "--token", "t", "generate"])
        .assert()
        .failure()
        .stderr(contains("update_site"));
}

#[test]
fn missing_token_fails_before_any_request() {
    let home = TempDir::new().unwrap();
    let config = write_config(&home, RELEASES_ONLY);
    relman_cmd(home.path())
        .args(["--config", config.to_str().unwrap(), "sync", "--dry-run"])
        .assert()
        .failure()
        .stderr(contains("no API token"));
}

#[test]
fn default_config_location_is_used() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".relman");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yaml"), SITE_ONLY).unwrap();
    relman_cmd(home.path())
        .args(["status"])
        .assert()
        .failure()
        .stderr(contains("needs a `releases` section"));
}
