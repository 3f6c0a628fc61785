use std::collections::{btree_map::Entry, BTreeMap};
use std::path::Path;

use crate::{
    error::{config::ConfigError, AppError},
    model::nation::title_case,
};

/// Read-only mapping from canonical nation name to display emoji.
///
/// Loaded once at startup from a flat JSON object such as
/// `{ "France": "🇫🇷", "Japan": "🇯🇵" }` and shared for the lifetime of the process.
/// Names are stored title-cased so they match what members type after
/// canonicalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NationCatalog {
    nations: BTreeMap<String, String>,
}

impl NationCatalog {
    /// Builds a catalog from `(name, emoji)` pairs, title-casing every name.
    ///
    /// When two names title-case to the same nation, the first pair is kept and the
    /// other is dropped with a warning.
    pub fn from_entries<I, N, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, E)>,
        N: AsRef<str>,
        E: Into<String>,
    {
        let mut nations = BTreeMap::new();

        for (name, emoji) in entries {
            let canonical = title_case(name.as_ref());
            match nations.entry(canonical) {
                Entry::Vacant(slot) => {
                    slot.insert(emoji.into());
                }
                Entry::Occupied(slot) => tracing::warn!(
                    "Nation catalog entry '{}' duplicates '{}'; keeping {}",
                    name.as_ref(),
                    slot.key(),
                    slot.get()
                ),
            }
        }

        Self { nations }
    }

    /// Loads the catalog from a JSON file.
    ///
    /// # Arguments
    /// - `path` - Path of the catalog file
    ///
    /// # Returns
    /// - `Ok(NationCatalog)` - Catalog with every entry of the file
    /// - `Err(ConfigError::ReadFile)` - The file could not be read
    /// - `Err(ConfigError::ParseFile)` - The file is not a flat object of strings
    pub async fn load(path: &Path) -> Result<Self, AppError> {
        let display_path = path.display().to_string();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ConfigError::ReadFile {
                path: display_path.clone(),
                source,
            })?;

        let raw: BTreeMap<String, String> =
            serde_json::from_slice(&bytes).map_err(|source| ConfigError::ParseFile {
                path: display_path.clone(),
                source,
            })?;

        for name in raw.keys() {
            if title_case(name) != *name {
                tracing::warn!(
                    "Nation catalog entry '{}' in {} is not title-cased; using '{}'",
                    name,
                    display_path,
                    title_case(name)
                );
            }
        }

        let catalog = Self::from_entries(raw);

        tracing::info!("Loaded {} nations from {}", catalog.len(), display_path);

        Ok(catalog)
    }

    pub fn emoji(&self, name: &str) -> Option<&str> {
        self.nations.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nations.contains_key(name)
    }

    /// Iterates `(name, emoji)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nations
            .iter()
            .map(|(name, emoji)| (name.as_str(), emoji.as_str()))
    }

    pub fn len(&self) -> usize {
        self.nations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nations.is_empty()
    }
}
