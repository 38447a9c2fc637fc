//! Cosmere Engine - command line entry point.
//!
//! Run with: `cosmere-engine <command>`

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cosmere_engine::{load_catalog, AppConfig, DocumentKind, Models};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Validate and derive Cosmere RPG documents
#[derive(Parser, Debug)]
#[command(name = "cosmere-engine")]
#[command(about = "Validate and derive Cosmere RPG actor and item documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a stored document and print it with derived fields filled in
    Derive {
        #[arg(value_enum)]
        kind: DocumentKind,

        /// Stored document (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print a new document built from initial values
    New {
        #[arg(value_enum)]
        kind: DocumentKind,
    },

    /// Print the loaded catalog tables
    Catalog,
}

fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cosmere_engine=info,cosmere_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    let catalog = load_catalog(config.catalog_path.as_deref())?;

    let output = match cli.command {
        Command::Derive { kind, file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read document {}", file.display()))?;
            let document: Value = serde_json::from_str(&json)
                .with_context(|| format!("Document {} is not valid JSON", file.display()))?;

            let models = Models::compose(&catalog).context("Failed to compose data models")?;
            let derived = models.derive(kind, document, &catalog)?;
            tracing::info!(%kind, "Derived document");
            derived
        }
        Command::New { kind } => {
            let models = Models::compose(&catalog).context("Failed to compose data models")?;
            models.create(kind, &catalog)?
        }
        Command::Catalog => serde_json::to_value(catalog.tables())?,
    };

    let rendered = if config.pretty_output {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_derive_with_typed_kind() {
        let cli = Cli::try_parse_from(["cosmere-engine", "derive", "weapon", "sword.json"]).unwrap();
        match cli.command {
            Command::Derive { kind, file } => {
                assert_eq!(kind, DocumentKind::Weapon);
                assert_eq!(file, PathBuf::from("sword.json"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_reported_by_name() {
        let err = Cli::try_parse_from(["cosmere-engine", "derive", "weapon"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert!(err.to_string().contains("<FILE>"));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = Cli::try_parse_from(["cosmere-engine", "new", "vehicle"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_help_is_available() {
        let err = Cli::try_parse_from(["cosmere-engine", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("derive"));
    }
}
