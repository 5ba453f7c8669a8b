//! Front Desk Register - Command Line Binary
//!
//! # Usage
//!
//! ```bash
//! # Preview a bill
//! clinic-register settle visit.json
//!
//! # Confirm the payment and print the statement data
//! clinic-register settle visit.json --complete --document statement
//!
//! # Match a name-only record against the roster
//! clinic-register match-pet --roster roster.json --pet ミケ --owner 田中花子
//! ```
//!
//! # Environment Variables
//!
//! * `REGISTER_CLINIC_NAME` - Clinic name printed on documents
//! * `REGISTER_TIMEZONE` - IANA time zone (default: Asia/Tokyo)
//! * `REGISTER_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `REGISTER_LOG_JSON` - Emit JSON logs (default: false)
//! * `REGISTER_DEFAULT_INSURANCE_RATIO` - 0.5, 0.7, 0.9 or 1.0 (default: 0.5)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use chrono::Utc;
use serde::Serialize;

use domain_accounting::DocumentKind;
use domain_patient::{Roster, DEFAULT_SEARCH_LIMIT};
use interface_cli::dto::SettleRequest;
use interface_cli::telemetry::init_tracing;
use interface_cli::{match_pet, parse_json, search_roster, settle, RegisterConfig, SettleMode};

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
enum DocumentArg {
    Receipt,
    Statement,
}

impl From<DocumentArg> for DocumentKind {
    fn from(arg: DocumentArg) -> Self {
        match arg {
            DocumentArg::Receipt => DocumentKind::Receipt,
            DocumentArg::Statement => DocumentKind::Statement,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "clinic-register")]
#[command(about = "Veterinary clinic front desk register")]
#[command(version)]
struct Args {
    /// Overrides REGISTER_LOG_LEVEL
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate a settlement from a JSON request
    Settle {
        /// Path to the settle request
        request: PathBuf,

        /// Confirm the payment and prepare a document
        #[arg(long)]
        complete: bool,

        /// Document to prepare on completion
        #[arg(long, value_enum, default_value = "receipt")]
        document: DocumentArg,
    },

    /// Find the roster entry for a name-only record
    MatchPet {
        /// Path to the roster JSON array
        #[arg(long)]
        roster: PathBuf,

        /// Pet name as recorded
        #[arg(long)]
        pet: String,

        /// Owner name as recorded
        #[arg(long)]
        owner: String,
    },

    /// Filter the roster like the pet selection screen
    Search {
        /// Path to the roster JSON array
        #[arg(long)]
        roster: PathBuf,

        /// Text to look for; empty lists the roster
        #[arg(default_value = "")]
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = RegisterConfig::from_env().context("invalid REGISTER_* configuration")?;

    init_tracing(
        args.log_level.as_deref().unwrap_or(&config.log_level),
        config.log_json,
    );

    tracing::debug!(timezone = %config.timezone, "configuration loaded");

    match args.command {
        Command::Settle { request, complete, document } => {
            let body = read_json::<SettleRequest>(&request)?;
            let mode = if complete {
                SettleMode::Complete(document.into())
            } else {
                SettleMode::Preview
            };
            let response = settle(body, &config, mode, Utc::now())?;
            print_json(&response)
        }
        Command::MatchPet { roster, pet, owner } => {
            let roster = read_json::<Roster>(&roster)?;
            print_json(&match_pet(&roster, &pet, &owner))
        }
        Command::Search { roster, query, limit } => {
            let roster = read_json::<Roster>(&roster)?;
            print_json(&search_roster(&roster, &query, limit))
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_json(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
