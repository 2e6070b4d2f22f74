#![allow(clippy::unwrap_used)]
//! End-to-end tests for `locmap config`

mod common;

use common::{locmap_cmd, write_file};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn shows_defaults_when_file_is_missing() {
    let dir = tempdir().unwrap();

    locmap_cmd(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("not found, using defaults"))
        .stdout(predicate::str::contains(r#"fallback_language = "en_US""#))
        .stdout(predicate::str::contains("default_view_priority = 16"))
        .stdout(predicate::str::contains(r#"code_prefix = "es""#));
}

#[test]
fn shows_values_from_file() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "config.toml",
        "[defaults]\nfallback_language = \"nl_NL\"\n",
    );

    locmap_cmd(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"fallback_language = "nl_NL""#))
        .stdout(predicate::str::contains("priority_scale = 32.0"))
        .stdout(predicate::str::contains("using defaults").not());
}

#[test]
fn path_flag_prints_config_location() {
    let dir = tempdir().unwrap();
    let expected = dir.path().join("config.toml");

    locmap_cmd(dir.path())
        .args(["config", "--path"])
        .assert()
        .success()
        .stdout(format!("{}\n", expected.display()));
}

#[test]
fn config_flag_overrides_environment() {
    let dir = tempdir().unwrap();
    let other = write_file(
        dir.path(),
        "other.toml",
        "[defaults]\ndefault_view_priority = 20\n",
    );

    locmap_cmd(dir.path())
        .arg("--config")
        .arg(&other)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default_view_priority = 20"));
}

#[test]
fn malformed_config_fails() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "config.toml", "[defaults\n");

    locmap_cmd(dir.path())
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"))
        .stderr(predicate::str::contains("Failed to parse config"));

    // The path is still available for fixing the file
    locmap_cmd(dir.path())
        .args(["config", "--path"])
        .assert()
        .success();
}

#[test]
fn invalid_priority_scale_fails() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "config.toml", "[defaults]\npriority_scale = -1.0\n");

    locmap_cmd(dir.path())
        .args(["localize", "--default", "en_US", "--lang", "es_MX", "/a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("priority_scale must be positive"));
}
