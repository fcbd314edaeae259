//! Localization provider on top of the query executor.

use std::sync::Arc;

use dbloc_rs::localization::{
    register_localization_handlers, DetermineDefaultCultureQuery, InMemoryResourceStore, LocalizationResource,
    ResourceItem, ResourceStore, SharedResourceStore, StoreError,
};
use dbloc_rs::{
    async_trait, ConfigurationContext, Construct, Handler, HandlerError, LocalizationProvider, MediatorError,
    TypeFactory,
};

const RESOURCES: &str = r#"[
    { "key": "home.title", "translations": [
        { "language": "en", "value": "Home" },
        { "language": "sv", "value": "Hem" },
        { "language": "", "value": "Home (invariant)" }
    ] },
    { "key": "home.footer", "translations": [
        { "language": "", "value": "Footer" }
    ] },
    { "key": "about.title", "translations": [
        { "language": "no", "value": "Om oss" }
    ] }
]"#;

fn store() -> SharedResourceStore {
    InMemoryResourceStore::from_json_str(RESOURCES).unwrap().into_shared()
}

fn provider(ctx: Arc<ConfigurationContext>) -> LocalizationProvider {
    ctx.services().register_instance(store());
    register_localization_handlers(&TypeFactory::new(ctx.clone()));
    LocalizationProvider::new(ctx)
}

#[tokio::test]
async fn get_string_in_requested_culture() {
    let sut = provider(ConfigurationContext::new());

    assert_eq!(sut.get_string("home.title", Some("sv")).await.unwrap().as_deref(), Some("Hem"));
    assert_eq!(sut.get_string("missing.key", Some("sv")).await.unwrap(), None);
}

#[tokio::test]
async fn get_string_uses_default_culture() {
    let ctx = ConfigurationContext::builder().default_resource_culture("sv").build();
    let sut = provider(ctx);

    assert_eq!(sut.get_string("home.title", None).await.unwrap().as_deref(), Some("Hem"));
}

#[tokio::test]
async fn invariant_fallback_only_when_enabled() {
    let sut = provider(ConfigurationContext::new());
    assert_eq!(sut.get_string("home.footer", Some("en")).await.unwrap(), None);

    let ctx = ConfigurationContext::builder().invariant_culture_fallback(true).build();
    let sut = provider(ctx);
    assert_eq!(
        sut.get_string("home.footer", Some("en")).await.unwrap().as_deref(),
        Some("Footer")
    );
}

#[tokio::test]
async fn disabled_localization_returns_key() {
    let ctx = ConfigurationContext::builder().disable_localization_when(|| true).build();
    let sut = provider(ctx);

    assert_eq!(
        sut.get_string("home.title", Some("sv")).await.unwrap().as_deref(),
        Some("home.title")
    );
}

#[tokio::test]
async fn available_languages_excludes_invariant() {
    let sut = provider(ConfigurationContext::new());

    assert_eq!(sut.available_languages().await.unwrap(), vec!["en", "no", "sv"]);
}

#[tokio::test]
async fn all_strings_by_prefix() {
    let ctx = ConfigurationContext::builder().invariant_culture_fallback(true).build();
    let sut = provider(ctx);

    let items = sut.get_all_strings("home.", Some("sv")).await.unwrap();

    assert_eq!(
        items,
        vec![
            ResourceItem {
                key: "home.footer".into(),
                value: "Footer".into(),
                culture: "sv".into(),
            },
            ResourceItem {
                key: "home.title".into(),
                value: "Hem".into(),
                culture: "sv".into(),
            },
        ]
    );
}

struct FixedCultureHandler;

impl Construct for FixedCultureHandler {
    type Deps = ();

    fn construct(_: ()) -> Self {
        Self
    }
}

#[async_trait]
impl Handler<DetermineDefaultCultureQuery> for FixedCultureHandler {
    async fn execute(&self, _query: DetermineDefaultCultureQuery) -> Result<String, HandlerError> {
        Ok("no".to_string())
    }
}

#[tokio::test]
async fn default_culture_handler_can_be_replaced() {
    let ctx = ConfigurationContext::new();
    let sut = provider(ctx.clone());
    TypeFactory::new(ctx)
        .for_query::<DetermineDefaultCultureQuery>()
        .set_handler::<FixedCultureHandler>();

    assert_eq!(
        sut.get_string("about.title", None).await.unwrap().as_deref(),
        Some("Om oss")
    );
}

#[tokio::test]
async fn missing_store_is_dependency_error() {
    let ctx = ConfigurationContext::new();
    register_localization_handlers(&TypeFactory::new(ctx.clone()));
    let sut = LocalizationProvider::new(ctx);

    let err = sut.get_string("home.title", Some("en")).await.unwrap_err();
    assert!(matches!(err, MediatorError::DependencyResolution { .. }));
}

#[test]
fn resource_builder_and_lookup() {
    let resource = LocalizationResource::new("k").with_translation("en", "v");
    assert_eq!(resource.translation("en"), Some("v"));
    assert_eq!(resource.translation("sv"), None);
}

#[test]
fn store_from_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("dbloc-no-such-resources.json");

    match InMemoryResourceStore::from_file(&path) {
        Err(StoreError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        Err(other) => panic!("expected Io, got {other:?}"),
        Ok(_) => panic!("expected Io, got a store"),
    }
}

#[test]
fn store_from_file_reads_json() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/resources.json");
    let store = InMemoryResourceStore::from_file(path).unwrap();

    let resource = store.find("home.title").unwrap();
    assert_eq!(resource.translation("sv"), Some("Hem"));
}
