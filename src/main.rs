use anyhow::{Context, Result};
use catalog_extractor::db::Database;
use catalog_extractor::environment::Config;
use catalog_extractor::extract::{self, EntityKind, MatchableKind, NamedKind};
use catalog_extractor::{Catalog, InMemoryCatalog};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read the catalog from a JSON file instead of the database
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// SQLite database path (overrides CATALOG_DATABASE_PATH)
    #[arg(short, long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the normalized form of a string
    Normalize { text: String },

    /// Print the ids of every catalog entity referenced by the text
    Extract {
        text: String,

        /// Restrict extraction to these kinds (labels, actors, studios, scenes, movies, fields)
        #[arg(short, long)]
        kind: Vec<EntityKind>,
    },

    /// Load a JSON catalog export into the database
    Import { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    catalog_extractor::logging::configure_logging(&config.log_dir, true);

    let database_path = cli.database.unwrap_or(config.database_path);

    match cli.command {
        Commands::Normalize { text } => {
            println!("{}", extract::normalize(&text));
        }

        Commands::Extract { text, kind } => {
            let catalog: Box<dyn Catalog> = match cli.catalog {
                Some(path) => Box::new(InMemoryCatalog::from_json_file(path)?),
                None => Box::new(
                    Database::new(&database_path)
                        .await
                        .context("Failed to connect to database")?,
                ),
            };

            let kinds = if kind.is_empty() {
                config.default_kinds
            } else {
                kind
            };

            let output = if kinds.is_empty() {
                serde_json::to_value(extract::extract_all(catalog.as_ref(), &text).await?)?
            } else {
                let mut found = serde_json::Map::new();
                for kind in kinds {
                    let ids = extract_kind(catalog.as_ref(), kind, &text).await?;
                    found.insert(kind.to_string(), serde_json::to_value(ids)?);
                }
                serde_json::Value::Object(found)
            };

            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Import { file } => {
            let catalog = InMemoryCatalog::from_json_file(&file)?;
            let db = Database::new(&database_path)
                .await
                .context("Failed to connect to database")?;

            info!("Importing {} into {}", file.display(), database_path);
            let count = db.import_catalog(&catalog).await?;
            println!("Imported {} records into {}", count, database_path);
        }
    }

    Ok(())
}

async fn extract_kind(catalog: &dyn Catalog, kind: EntityKind, text: &str) -> Result<Vec<String>> {
    let ids = match kind {
        EntityKind::Matchable(MatchableKind::Label) => {
            extract::extract_labels(catalog, text).await?
        }
        EntityKind::Matchable(MatchableKind::Actor) => {
            extract::extract_actors(catalog, text).await?
        }
        EntityKind::Matchable(MatchableKind::Studio) => {
            extract::extract_studios(catalog, text).await?
        }
        EntityKind::Named(NamedKind::Scene) => extract::extract_scenes(catalog, text).await?,
        EntityKind::Named(NamedKind::Movie) => extract::extract_movies(catalog, text).await?,
        EntityKind::Named(NamedKind::CustomField) => {
            extract::extract_fields(catalog, text).await?
        }
    };
    Ok(ids)
}
