//! Configuration context: composition root for one process or test scope.
//! Owns the registry and the service container; settings and the disable
//! callback are fixed once built.

use std::fmt;
use std::sync::Arc;

use crate::container::Container;
use crate::registry::Registry;
use crate::settings::Settings;

/// Hook deciding whether localization is switched off right now.
pub type DisableCallback = Arc<dyn Fn() -> bool + Send + Sync>;

pub struct ConfigurationContext {
    settings: Settings,
    disable_localization: DisableCallback,
    registry: Registry,
    services: Container,
}

impl ConfigurationContext {
    /// Context with default settings.
    pub fn new() -> Arc<Self> {
        Self::builder().build()
    }

    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn diagnostics_enabled(&self) -> bool {
        self.settings.diagnostics_enabled
    }

    /// Asks the disable callback. Defaults to `!settings.enable_localization`.
    pub fn localization_disabled(&self) -> bool {
        (self.disable_localization)()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn services(&self) -> &Container {
        &self.services
    }
}

impl fmt::Debug for ConfigurationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationContext")
            .field("settings", &self.settings)
            .field("registry", &self.registry)
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct ContextBuilder {
    settings: Settings,
    disable_localization: Option<DisableCallback>,
}

impl ContextBuilder {
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn diagnostics_enabled(mut self, enabled: bool) -> Self {
        self.settings.diagnostics_enabled = enabled;
        self
    }

    pub fn default_resource_culture(mut self, culture: impl Into<String>) -> Self {
        self.settings.default_resource_culture = culture.into();
        self
    }

    pub fn invariant_culture_fallback(mut self, enabled: bool) -> Self {
        self.settings.enable_invariant_culture_fallback = enabled;
        self
    }

    /// Replace the default disable-localization callback.
    pub fn disable_localization_when<F>(mut self, f: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.disable_localization = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Arc<ConfigurationContext> {
        let disable_localization = self.disable_localization.unwrap_or_else(|| {
            let disabled = !self.settings.enable_localization;
            Arc::new(move || disabled)
        });
        Arc::new(ConfigurationContext {
            settings: self.settings,
            disable_localization,
            registry: Registry::new(),
            services: Container::new(),
        })
    }
}
