//! Localization provider: what a host framework calls. Every lookup goes through the query executor.

use std::sync::Arc;

use dbloc_core::{ConfigurationContext, MediatorError};
use tracing::debug;

use super::queries::{
    AvailableLanguagesQuery, DetermineDefaultCultureQuery, GetAllTranslationsQuery, GetTranslationQuery,
    ResourceItem,
};
use crate::core::{QueryExecutor, TypeFactory};

#[derive(Clone, Debug)]
pub struct LocalizationProvider {
    context: Arc<ConfigurationContext>,
    queries: QueryExecutor,
}

impl LocalizationProvider {
    /// Uses whatever handlers are bound in `context` (see `register_localization_handlers`).
    pub fn new(context: Arc<ConfigurationContext>) -> Self {
        let queries = QueryExecutor::new(TypeFactory::new(Arc::clone(&context)));
        Self { context, queries }
    }

    /// Translation of `key`. With localization disabled the key itself is returned.
    /// `culture = None` asks `DetermineDefaultCultureQuery`.
    pub async fn get_string(&self, key: &str, culture: Option<&str>) -> Result<Option<String>, MediatorError> {
        if self.context.localization_disabled() {
            debug!(key, "localization disabled, returning key");
            return Ok(Some(key.to_string()));
        }
        let culture = self.resolve_culture(culture).await?;
        self.queries
            .execute(GetTranslationQuery {
                key: key.to_string(),
                culture,
            })
            .await
    }

    pub async fn available_languages(&self) -> Result<Vec<String>, MediatorError> {
        self.queries.execute(AvailableLanguagesQuery).await
    }

    pub async fn get_all_strings(
        &self,
        key_prefix: &str,
        culture: Option<&str>,
    ) -> Result<Vec<ResourceItem>, MediatorError> {
        let culture = self.resolve_culture(culture).await?;
        self.queries
            .execute(GetAllTranslationsQuery {
                key_prefix: key_prefix.to_string(),
                culture,
            })
            .await
    }

    async fn resolve_culture(&self, culture: Option<&str>) -> Result<String, MediatorError> {
        match culture {
            Some(c) => Ok(c.to_string()),
            None => self.queries.execute(DetermineDefaultCultureQuery).await,
        }
    }
}
