//! Command-line and environment configuration

use clap::Parser;
use std::time::Duration;

use crate::error::{PoolError, Result};
use crate::legality::{LegalityRules, DEFAULT_JUMP_CUTOFF, DEFAULT_YCSW_CUTOFF};
use crate::sources::{DEFAULT_CARD_FEED_URL, DEFAULT_SHEETS_BASE_URL, DEFAULT_SPREADSHEET_ID};

pub const DEFAULT_LEGALITY_RANGE: &str = "A2:E";
pub const DEFAULT_EXCEPTIONS_RANGE: &str = "AddList!A2:D";
pub const DEFAULT_DECKLISTS_RANGE: &str = "Decklists!A1:B";
/// Build attempts before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// One year
pub const MAX_REFRESH_HOURS: u64 = 24 * 365;

/// Legal card pool server - serves the banlist, exception list and decklists
#[derive(Parser, Debug, Clone)]
#[command(name = "ygo_pool")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Port for the HTTP server
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// API key for the spreadsheet source (required)
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub google_api_key: Option<String>,

    /// Spreadsheet holding the banlist, exception and decklist tables
    #[arg(long, env = "SPREADSHEET_ID", default_value = DEFAULT_SPREADSHEET_ID)]
    pub spreadsheet_id: String,

    /// Banlist range (A1 notation)
    #[arg(long, default_value = DEFAULT_LEGALITY_RANGE)]
    pub legality_range: String,

    /// Exception list range (A1 notation)
    #[arg(long, default_value = DEFAULT_EXCEPTIONS_RANGE)]
    pub exceptions_range: String,

    /// Decklist range (A1 notation)
    #[arg(long, default_value = DEFAULT_DECKLISTS_RANGE)]
    pub decklists_range: String,

    /// Bulk card feed URL
    #[arg(long, default_value = DEFAULT_CARD_FEED_URL)]
    pub card_feed_url: String,

    /// Spreadsheet API base URL
    #[arg(long, default_value = DEFAULT_SHEETS_BASE_URL)]
    pub sheets_base_url: String,

    /// Build attempts before the server gives up
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Per-fetch timeout in seconds (0 disables it)
    #[arg(long, default_value_t = 120)]
    pub fetch_timeout_secs: u64,

    /// Shonen Jump promos numbered below this are legal
    #[arg(long, default_value_t = DEFAULT_JUMP_CUTOFF)]
    pub jump_cutoff: u32,

    /// YCS prize cards numbered below this are legal
    #[arg(long, default_value_t = DEFAULT_YCSW_CUTOFF)]
    pub ycsw_cutoff: u32,

    /// Origins allowed by CORS (repeatable)
    #[arg(
        long = "allowed-origin",
        default_values_t = [
            "https://ygo-reborn.xyz".to_string(),
            "http://localhost:3000".to_string(),
        ]
    )]
    pub allowed_origins: Vec<String>,

    /// Rebuild the snapshot every N hours (default: build once)
    #[arg(long)]
    pub refresh_hours: Option<u64>,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub google_api_key: String,
    pub spreadsheet_id: String,
    pub legality_range: String,
    pub exceptions_range: String,
    pub decklists_range: String,
    pub card_feed_url: String,
    pub sheets_base_url: String,
    pub max_attempts: u32,
    pub fetch_timeout: Option<Duration>,
    pub rules: LegalityRules,
    pub allowed_origins: Vec<String>,
    pub refresh_interval: Option<Duration>,
}

impl Config {
    /// Validates arguments; a missing API key is fatal
    pub fn from_args(args: Args) -> Result<Self> {
        let google_api_key = args
            .google_api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| PoolError::MissingConfig("GOOGLE_API_KEY".to_string()))?;

        if args.max_attempts == 0 {
            return Err(PoolError::MissingConfig(
                "--max-attempts must be at least 1".to_string(),
            ));
        }

        let refresh_interval = match args.refresh_hours.filter(|hours| *hours > 0) {
            Some(hours) if hours > MAX_REFRESH_HOURS => {
                return Err(PoolError::MissingConfig(format!(
                    "--refresh-hours must be at most {}",
                    MAX_REFRESH_HOURS
                )));
            }
            Some(hours) => Some(Duration::from_secs(hours * 3600)),
            None => None,
        };

        Ok(Self {
            port: args.port,
            google_api_key,
            spreadsheet_id: args.spreadsheet_id,
            legality_range: args.legality_range,
            exceptions_range: args.exceptions_range,
            decklists_range: args.decklists_range,
            card_feed_url: args.card_feed_url,
            sheets_base_url: args.sheets_base_url,
            max_attempts: args.max_attempts,
            fetch_timeout: (args.fetch_timeout_secs > 0)
                .then(|| Duration::from_secs(args.fetch_timeout_secs)),
            rules: LegalityRules {
                jump_cutoff: args.jump_cutoff,
                ycsw_cutoff: args.ycsw_cutoff,
            },
            allowed_origins: args.allowed_origins,
            refresh_interval,
        })
    }
}
