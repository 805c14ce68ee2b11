//! The language registry: which file extension each `--language` token
//! selects. Definitions are embedded from `languages.toml` and parsed once
//! on first use; the table is read-only afterwards.

use log::debug;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Sentinel token selecting every registered extension.
pub const ALL_TOKEN: &str = "all";

// --- Data structures that mirror languages.toml ---

#[derive(Debug, Deserialize)]
struct LanguageDefinition {
    extension: String,
}

#[derive(Debug, Deserialize)]
struct LanguagesFile {
    languages: BTreeMap<String, LanguageDefinition>,
}

// --- Registry holding all loaded languages ---

#[derive(Debug)]
pub struct LanguageRegistry {
    extensions: BTreeMap<String, String>,
}

impl LanguageRegistry {
    fn load() -> Self {
        let toml_str = include_str!("languages.toml");
        let languages_file: LanguagesFile =
            toml::from_str(toml_str).expect("Failed to parse languages.toml");

        let extensions = languages_file
            .languages
            .into_iter()
            .map(|(name, def)| (name, def.extension))
            .collect();

        Self { extensions }
    }

    /// Looks up the extension (including the leading dot) for a token.
    pub fn extension(&self, token: &str) -> Option<&str> {
        self.extensions.get(token).map(String::as_str)
    }

    pub fn all_extensions(&self) -> Vec<&str> {
        self.extensions.values().map(String::as_str).collect()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.extensions.keys().map(String::as_str)
    }
}

static REGISTRY: Lazy<LanguageRegistry> = Lazy::new(LanguageRegistry::load);

/// The process-wide language registry.
pub fn registry() -> &'static LanguageRegistry {
    &REGISTRY
}

/// Maps requested language tokens to the extensions to match.
///
/// If `all` is among the tokens every registered extension is returned.
/// Tokens the registry does not know are dropped without an error.
pub fn resolve_extensions<'a, I>(tokens: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let tokens: Vec<&str> = tokens.into_iter().collect();
    let registry = registry();

    if tokens.contains(&ALL_TOKEN) {
        return registry.all_extensions();
    }

    tokens
        .into_iter()
        .filter_map(|token| {
            let ext = registry.extension(token);
            if ext.is_none() {
                debug!("Ignoring unknown language token '{}'", token);
            }
            ext
        })
        .collect()
}
