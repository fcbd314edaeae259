//! Settings: flags read by the resolver and by localization handlers. Loadable from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::MediatorError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Extra logging during resolution; also visible to handlers that ask for the context.
    pub diagnostics_enabled: bool,
    /// When false, the default disable-localization callback reports localization as disabled.
    pub enable_localization: bool,
    /// Culture used when a caller does not pass one.
    pub default_resource_culture: String,
    /// Use the invariant (empty tag) translation when the requested culture has none.
    pub enable_invariant_culture_fallback: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            diagnostics_enabled: false,
            enable_localization: true,
            default_resource_culture: "en".to_string(),
            enable_invariant_culture_fallback: false,
        }
    }
}

impl Settings {
    pub fn from_toml_str(input: &str) -> Result<Self, MediatorError> {
        toml::from_str(input).map_err(|e| MediatorError::Settings(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MediatorError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
