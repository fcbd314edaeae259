//! Localization glue on top of the mediator: queries, default handlers, provider, store boundary.

mod provider;
pub mod queries;
pub mod store;

pub use provider::LocalizationProvider;
pub use queries::{
    register_localization_handlers, AvailableLanguagesQuery, DetermineDefaultCultureQuery, GetAllTranslationsQuery,
    GetTranslationQuery, ResourceItem,
};
pub use store::{
    InMemoryResourceStore, LocalizationResource, ResourceStore, ResourceTranslation, SharedResourceStore,
    StoreError, INVARIANT_CULTURE,
};
