//! Localize command implementation

use anyhow::{Result, bail};
use locmap_core::{Config, LocalePrefixer};

/// Execute the localize command
pub fn execute(config: &Config, default_lang: &str, lang: &str, path: &str) -> Result<()> {
    println!("{}", localized(config, default_lang, lang, path)?);
    Ok(())
}

fn localized(config: &Config, default_lang: &str, lang: &str, path: &str) -> Result<String> {
    if !path.starts_with('/') {
        bail!("Path must start with '/': {path}");
    }
    let prefixer = LocalePrefixer::with_short_prefixes(
        default_lang,
        config.localization.short_prefixes.clone(),
    );
    Ok(prefixer.localize(lang, path))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use locmap_core::ShortPrefix;

    #[test]
    fn test_localized_paths() {
        let config = Config::default();
        assert_eq!(localized(&config, "en_US", "en_US", "/about").unwrap(), "/about");
        assert_eq!(localized(&config, "en_US", "es_MX", "/about").unwrap(), "/es/about");
        assert_eq!(localized(&config, "en_US", "es_MX", "/").unwrap(), "/es");
        assert_eq!(localized(&config, "en_US", "fr_FR", "/").unwrap(), "/fr_FR");
    }

    #[test]
    fn test_configured_prefixes() {
        let mut config = Config::default();
        config.localization.short_prefixes = vec![ShortPrefix::new("pt", "pt")];
        assert_eq!(localized(&config, "en_US", "pt_BR", "/a").unwrap(), "/pt/a");
        assert_eq!(localized(&config, "en_US", "es_MX", "/a").unwrap(), "/es_MX/a");
    }

    #[test]
    fn test_relative_path_is_rejected() {
        let err = localized(&Config::default(), "en_US", "es_MX", "about").unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));
    }
}
