#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Two languages, four visible URLs and one blog post with a broken URL.
#[allow(dead_code)]
pub const SITE_JSON: &str = r#"{
  "current_website_id": 1,
  "websites": [
    {"id": 1, "name": "Example", "domain": "https://example.com",
     "default_lang_id": 1, "language_ids": [1, 2]}
  ],
  "languages": [
    {"id": 1, "code": "en_US"},
    {"id": 2, "code": "es_MX"}
  ],
  "pages": [
    {"id": 1, "url": "/", "website_published": true},
    {"id": 2, "url": "/about", "website_published": true,
     "write_date": "2024-03-05 10:00:00", "view": {"priority": 24}},
    {"id": 3, "url": "/draft", "website_published": false}
  ],
  "blog_posts": [
    {"id": 1, "website_published": true, "url": "https://example.com/blog/hello-1"},
    {"id": 2, "website_published": true, "url": "::bad::"}
  ]
}"#;

/// Create a configured `locmap` command suitable for integration tests.
///
/// The configuration file points into `config_dir`, so the user's real
/// configuration is never read.
#[allow(dead_code)]
pub fn locmap_cmd(config_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("locmap"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("LOCMAP_CONFIG", config_dir.join("config.toml"));
    cmd.env_remove("LOCMAP_OUTPUT_FORMAT");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write `content` to `dir/name` and return the path.
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write test file");
    path
}
