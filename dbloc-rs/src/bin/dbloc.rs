//! CLI for dbloc: look up translations from a JSON resource file through the query executor.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dbloc_rs::localization::{register_localization_handlers, InMemoryResourceStore, SharedResourceStore};
use dbloc_rs::logging::init_logging;
use dbloc_rs::{ConfigurationContext, LocalizationProvider, Settings, TypeFactory};
use tracing::info;

#[derive(Parser)]
#[command(name = "dbloc")]
#[command(about = "dbloc localization CLI")]
struct Cli {
    /// JSON resource file (array of { key, translations: [{ language, value }] })
    #[arg(long, global = true, default_value = "resources.json")]
    resources: PathBuf,
    /// TOML settings file
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the translation of one key.
    GetString {
        key: String,
        /// Culture tag (e.g. en, sv); default culture from settings when omitted
        #[arg(long)]
        culture: Option<String>,
    },
    /// List languages with at least one translation.
    Languages,
    /// Print every key starting with PREFIX and its translation.
    Strings {
        prefix: String,
        #[arg(long)]
        culture: Option<String>,
    },
}

fn build_provider(cli: &Cli) -> Result<LocalizationProvider, Box<dyn std::error::Error + Send + Sync>> {
    let settings = match &cli.settings {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    let store: SharedResourceStore = InMemoryResourceStore::from_file(&cli.resources)?.into_shared();
    info!(resources = %cli.resources.display(), "resources loaded");

    let ctx = ConfigurationContext::builder().settings(settings).build();
    ctx.services().register_instance(store);
    register_localization_handlers(&TypeFactory::new(ctx.clone()));
    Ok(LocalizationProvider::new(ctx))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging("warn");
    let cli = Cli::parse();
    let provider = build_provider(&cli)?;

    match &cli.command {
        Commands::GetString { key, culture } => match provider.get_string(key, culture.as_deref()).await? {
            Some(value) => println!("{value}"),
            None => {
                eprintln!("no translation for {key:?}");
                std::process::exit(1);
            }
        },
        Commands::Languages => {
            for language in provider.available_languages().await? {
                println!("{language}");
            }
        }
        Commands::Strings { prefix, culture } => {
            for item in provider.get_all_strings(prefix, culture.as_deref()).await? {
                println!("{}\t{}", item.key, item.value);
            }
        }
    }
    Ok(())
}
