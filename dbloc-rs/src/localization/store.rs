//! Resource store boundary. The real store (database, files) lives outside this crate;
//! handlers only see `dyn ResourceStore`. `InMemoryResourceStore` backs tests and the CLI.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Language tag of the invariant (culture-neutral) translation.
pub const INVARIANT_CULTURE: &str = "";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot read resources: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid resource JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTranslation {
    #[serde(default)]
    pub language: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationResource {
    pub key: String,
    #[serde(default)]
    pub translations: Vec<ResourceTranslation>,
}

impl LocalizationResource {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            translations: Vec::new(),
        }
    }

    pub fn with_translation(mut self, language: impl Into<String>, value: impl Into<String>) -> Self {
        self.translations.push(ResourceTranslation {
            language: language.into(),
            value: value.into(),
        });
        self
    }

    /// Translation for exactly `language`.
    pub fn translation(&self, language: &str) -> Option<&str> {
        self.translations
            .iter()
            .find(|t| t.language == language)
            .map(|t| t.value.as_str())
    }
}

/// Read side of the localization store.
pub trait ResourceStore: Send + Sync {
    fn find(&self, key: &str) -> Option<LocalizationResource>;
    fn resources(&self) -> Vec<LocalizationResource>;
}

/// Shared store handle, as registered in the service container.
pub type SharedResourceStore = Arc<dyn ResourceStore>;

#[derive(Clone, Debug, Default)]
pub struct InMemoryResourceStore {
    resources: Vec<LocalizationResource>,
}

impl InMemoryResourceStore {
    pub fn new(resources: Vec<LocalizationResource>) -> Self {
        Self { resources }
    }

    /// JSON array of `{ "key": ..., "translations": [{ "language": ..., "value": ... }] }`.
    pub fn from_json_str(input: &str) -> Result<Self, StoreError> {
        Ok(Self::new(serde_json::from_str(input)?))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn into_shared(self) -> SharedResourceStore {
        Arc::new(self)
    }
}

impl ResourceStore for InMemoryResourceStore {
    fn find(&self, key: &str) -> Option<LocalizationResource> {
        self.resources.iter().find(|r| r.key == key).cloned()
    }

    fn resources(&self) -> Vec<LocalizationResource> {
        self.resources.clone()
    }
}
