//! Language prefixing of site paths.
//!
//! URLs in the default language are left untouched. Every other language
//! gets a leading path segment: its full code (`/fr_FR/about`), or a shorter
//! segment when one of the [`ShortPrefix`] rules matches the code
//! (`/es/about` for any code starting with `es`).
//!
//! ```rust
//! use locmap_core::LocalePrefixer;
//!
//! let prefixer = LocalePrefixer::new("en_US");
//! assert_eq!(prefixer.localize("en_US", "/about"), "/about");
//! assert_eq!(prefixer.localize("es-MX", "/about"), "/es/about");
//! assert_eq!(prefixer.localize("fr_FR", "/"), "/fr_FR");
//! ```

use serde::{Deserialize, Serialize};

/// Replaces the full language code with a shorter path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortPrefix {
    /// Language codes starting with this string use `path_prefix`.
    pub code_prefix: String,
    /// Path segment to emit, without slashes.
    pub path_prefix: String,
}

impl ShortPrefix {
    /// Create a rule.
    pub fn new(code_prefix: impl Into<String>, path_prefix: impl Into<String>) -> Self {
        Self {
            code_prefix: code_prefix.into(),
            path_prefix: path_prefix.into(),
        }
    }
}

/// The rules used when nothing is configured: Spanish variants share `/es`.
pub fn default_short_prefixes() -> Vec<ShortPrefix> {
    vec![ShortPrefix::new("es", "es")]
}

/// Localizes paths for one website.
#[derive(Debug, Clone)]
pub struct LocalePrefixer {
    default_code: String,
    short_prefixes: Vec<ShortPrefix>,
}

impl LocalePrefixer {
    /// Create a prefixer with the default short-prefix rules.
    pub fn new(default_code: impl Into<String>) -> Self {
        Self::with_short_prefixes(default_code, default_short_prefixes())
    }

    /// Create a prefixer with explicit short-prefix rules.
    pub fn with_short_prefixes(
        default_code: impl Into<String>,
        short_prefixes: Vec<ShortPrefix>,
    ) -> Self {
        Self {
            default_code: default_code.into(),
            short_prefixes,
        }
    }

    /// Code of the language whose paths are left untouched.
    pub fn default_code(&self) -> &str {
        &self.default_code
    }

    /// Path segment used for `lang_code`, or `None` for the default language.
    pub fn segment_for<'a>(&'a self, lang_code: &'a str) -> Option<&'a str> {
        if lang_code == self.default_code {
            return None;
        }
        let segment = self
            .short_prefixes
            .iter()
            .find(|rule| lang_code.starts_with(rule.code_prefix.as_str()))
            .map_or(lang_code, |rule| rule.path_prefix.as_str());
        Some(segment)
    }

    /// Localize `path` for the language `lang_code`.
    ///
    /// The root path becomes the bare segment (`/es`, never `/es/`). Other
    /// paths are concatenated to the segment as-is.
    pub fn localize(&self, lang_code: &str, path: &str) -> String {
        match self.segment_for(lang_code) {
            None => path.to_string(),
            Some(segment) if path == "/" => format!("/{segment}"),
            Some(segment) => format!("/{segment}{path}"),
        }
    }
}
