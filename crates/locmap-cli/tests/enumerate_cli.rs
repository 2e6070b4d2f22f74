#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end tests for `locmap enumerate`

mod common;

use common::{SITE_JSON, locmap_cmd, write_file};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn piped_output_defaults_to_json() {
    let dir = tempdir().unwrap();
    let snapshot = write_file(dir.path(), "site.json", SITE_JSON);

    let output = locmap_cmd(dir.path())
        .args(["enumerate", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .get_output()
        .clone();

    let entries = stdout_json(&output);
    let locs: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["loc"].as_str().unwrap())
        .collect();
    assert_eq!(
        locs,
        ["/about", "/es/about", "/blog/hello-1", "/es/blog/hello-1"]
    );
    assert_eq!(entries[0]["priority"], 0.8);
    assert_eq!(entries[0]["lastmod"], "2024-03-05");
    assert!(entries[2].get("priority").is_none());

    // Machine output keeps stderr free of warnings
    assert!(output.stderr.is_empty());
}

#[test]
fn text_output_lists_one_location_per_line() {
    let dir = tempdir().unwrap();
    let snapshot = write_file(dir.path(), "site.json", SITE_JSON);

    locmap_cmd(dir.path())
        .args(["enumerate", "--format", "text", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::eq(
            "/about  priority 0.8  lastmod 2024-03-05\n\
             /es/about  priority 0.8  lastmod 2024-03-05\n\
             /blog/hello-1\n\
             /es/blog/hello-1\n",
        ))
        .stderr(predicate::str::contains("4 URLs from 1 page and 2 blog posts"))
        .stderr(predicate::str::contains("2 blog post URLs skipped"))
        .stderr(predicate::str::contains("Error generating URL for blog post"));
}

#[test]
fn quiet_text_output_has_no_summary() {
    let dir = tempdir().unwrap();
    let snapshot = write_file(dir.path(), "site.json", SITE_JSON);

    locmap_cmd(dir.path())
        .args(["-q", "enumerate", "-f", "text", "-s"])
        .arg(&snapshot)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn ndjson_output_has_one_entry_per_line() {
    let dir = tempdir().unwrap();
    let snapshot = write_file(dir.path(), "site.json", SITE_JSON);

    let output = locmap_cmd(dir.path())
        .args(["enumerate", "--format", "ndjson", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[3]["loc"], "/es/blog/hello-1");
}

#[test]
fn force_includes_unpublished_pages() {
    let dir = tempdir().unwrap();
    let snapshot = write_file(dir.path(), "site.json", SITE_JSON);

    locmap_cmd(dir.path())
        .args(["enumerate", "--force", "--format", "ndjson", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"loc":"/draft"}"#))
        .stdout(predicate::str::contains(r#"{"loc":"/es/draft"}"#))
        .stdout(predicate::str::contains(r#""loc":"/es""#).not());
}

#[test]
fn filter_restricts_pages() {
    let dir = tempdir().unwrap();
    let snapshot = write_file(dir.path(), "site.json", SITE_JSON);

    let output = locmap_cmd(dir.path())
        .args(["enumerate", "--filter", "nothing-matches", "--format", "json", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .get_output()
        .clone();

    let locs: Vec<String> = stdout_json(&output)
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["loc"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(locs, ["/blog/hello-1", "/es/blog/hello-1"]);
}

#[test]
fn config_short_prefixes_apply() {
    let dir = tempdir().unwrap();
    let snapshot = write_file(dir.path(), "site.json", SITE_JSON);
    write_file(
        dir.path(),
        "config.toml",
        "[localization]\nshort_prefixes = []\n",
    );

    locmap_cmd(dir.path())
        .args(["enumerate", "--format", "ndjson", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""loc":"/es_MX/about""#));
}

#[test]
fn missing_snapshot_fails() {
    let dir = tempdir().unwrap();

    locmap_cmd(dir.path())
        .args(["enumerate", "--snapshot"])
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load snapshot"));
}

#[test]
fn unknown_website_fails_with_not_found() {
    let dir = tempdir().unwrap();
    let snapshot = write_file(
        dir.path(),
        "site.json",
        &SITE_JSON.replace(r#""current_website_id": 1"#, r#""current_website_id": 9"#),
    );

    locmap_cmd(dir.path())
        .args(["enumerate", "--format", "json", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Enumeration failed"))
        .stderr(predicate::str::contains("Not found: website 9"));
}

#[test]
fn unsupported_snapshot_extension_fails() {
    let dir = tempdir().unwrap();
    let snapshot = write_file(dir.path(), "site.yaml", "websites: []");

    locmap_cmd(dir.path())
        .args(["enumerate", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported snapshot format"));
}
