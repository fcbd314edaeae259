//! Localization queries and their default handlers.

use std::collections::BTreeSet;

use async_trait::async_trait;
use dbloc_core::{HandlerError, Settings};

use super::store::{SharedResourceStore, INVARIANT_CULTURE};
use crate::core::{Inject, TypeFactory};
use crate::request::{Construct, Handler};
use crate::Query;

/// Culture to use when the caller passes none.
#[derive(Clone, Debug, Default, Query)]
#[query(output = String)]
pub struct DetermineDefaultCultureQuery;

/// Translation of `key` in `culture`, `None` when missing.
#[derive(Clone, Debug, Query)]
#[query(output = Option<String>)]
pub struct GetTranslationQuery {
    pub key: String,
    pub culture: String,
}

/// Languages that have at least one translation (invariant excluded), sorted.
#[derive(Clone, Debug, Default, Query)]
#[query(output = Vec<String>)]
pub struct AvailableLanguagesQuery;

/// Every resource whose key starts with `key_prefix`, translated to `culture`.
#[derive(Clone, Debug, Query)]
#[query(output = Vec<ResourceItem>)]
pub struct GetAllTranslationsQuery {
    pub key_prefix: String,
    pub culture: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceItem {
    pub key: String,
    pub value: String,
    pub culture: String,
}

pub struct DetermineDefaultCultureHandler {
    settings: Settings,
}

impl Construct for DetermineDefaultCultureHandler {
    type Deps = Settings;

    fn construct(settings: Settings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Handler<DetermineDefaultCultureQuery> for DetermineDefaultCultureHandler {
    async fn execute(&self, _query: DetermineDefaultCultureQuery) -> Result<String, HandlerError> {
        Ok(self.settings.default_resource_culture.clone())
    }
}

pub struct GetTranslationHandler {
    store: SharedResourceStore,
    invariant_fallback: bool,
}

impl Construct for GetTranslationHandler {
    type Deps = (Inject<SharedResourceStore>, Settings);

    fn construct((store, settings): Self::Deps) -> Self {
        Self {
            store: store.into_inner(),
            invariant_fallback: settings.enable_invariant_culture_fallback,
        }
    }
}

#[async_trait]
impl Handler<GetTranslationQuery> for GetTranslationHandler {
    async fn execute(&self, query: GetTranslationQuery) -> Result<Option<String>, HandlerError> {
        let Some(resource) = self.store.find(&query.key) else {
            return Ok(None);
        };
        let value = resource.translation(&query.culture).or_else(|| {
            self.invariant_fallback
                .then(|| resource.translation(INVARIANT_CULTURE))
                .flatten()
        });
        Ok(value.map(str::to_string))
    }
}

pub struct AvailableLanguagesHandler {
    store: SharedResourceStore,
}

impl Construct for AvailableLanguagesHandler {
    type Deps = Inject<SharedResourceStore>;

    fn construct(store: Self::Deps) -> Self {
        Self {
            store: store.into_inner(),
        }
    }
}

#[async_trait]
impl Handler<AvailableLanguagesQuery> for AvailableLanguagesHandler {
    async fn execute(&self, _query: AvailableLanguagesQuery) -> Result<Vec<String>, HandlerError> {
        let languages: BTreeSet<String> = self
            .store
            .resources()
            .into_iter()
            .flat_map(|r| r.translations)
            .map(|t| t.language)
            .filter(|language| language != INVARIANT_CULTURE)
            .collect();
        Ok(languages.into_iter().collect())
    }
}

pub struct GetAllTranslationsHandler {
    store: SharedResourceStore,
    invariant_fallback: bool,
}

impl Construct for GetAllTranslationsHandler {
    type Deps = (Inject<SharedResourceStore>, Settings);

    fn construct((store, settings): Self::Deps) -> Self {
        Self {
            store: store.into_inner(),
            invariant_fallback: settings.enable_invariant_culture_fallback,
        }
    }
}

#[async_trait]
impl Handler<GetAllTranslationsQuery> for GetAllTranslationsHandler {
    async fn execute(&self, query: GetAllTranslationsQuery) -> Result<Vec<ResourceItem>, HandlerError> {
        let mut items: Vec<ResourceItem> = self
            .store
            .resources()
            .into_iter()
            .filter(|r| r.key.starts_with(&query.key_prefix))
            .filter_map(|r| {
                let value = r.translation(&query.culture).or_else(|| {
                    self.invariant_fallback
                        .then(|| r.translation(INVARIANT_CULTURE))
                        .flatten()
                })?;
                Some(ResourceItem {
                    key: r.key.clone(),
                    value: value.to_string(),
                    culture: query.culture.clone(),
                })
            })
            .collect();
        items.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(items)
    }
}

/// Bind the default localization handlers. Later registrations replace them as usual.
pub fn register_localization_handlers(factory: &TypeFactory) {
    factory
        .for_query::<DetermineDefaultCultureQuery>()
        .set_handler::<DetermineDefaultCultureHandler>()
        .for_query::<GetTranslationQuery>()
        .set_handler::<GetTranslationHandler>()
        .for_query::<AvailableLanguagesQuery>()
        .set_handler::<AvailableLanguagesHandler>()
        .for_query::<GetAllTranslationsQuery>()
        .set_handler::<GetAllTranslationsHandler>();
}
