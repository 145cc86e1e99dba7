//! Command line options and migration configuration.

use std::path::PathBuf;

use clap::Args;
use thiserror::Error;

/// Configuration errors detected before any request is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither API credentials nor export files were given
    #[error("No Trello source: pass --trello-key and --trello-token, or --trello-export")]
    MissingTrelloSource,

    /// Only half of the API credentials were given
    #[error("Both --trello-key and --trello-token are required for the Trello API")]
    IncompleteTrelloCredentials,

    /// Deck URL missing or not http(s)
    #[error("Invalid Deck URL '{0}': expected http:// or https://")]
    InvalidDeckUrl(String),

    /// Deck user missing
    #[error("Missing Deck user: pass --deck-user or set DECK_USER")]
    MissingDeckUser,
}

/// Options of the migrate command.
#[derive(Debug, Clone, Default, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct MigrateArgs {
    /// Trello API key (https://trello.com/app-key)
    #[arg(long, env = "TRELLO_API_KEY", hide_env_values = true)]
    pub trello_key: Option<String>,

    /// Trello token
    #[arg(long, env = "TRELLO_TOKEN", hide_env_values = true)]
    pub trello_token: Option<String>,

    /// Read boards from Trello JSON exports instead of the API
    #[arg(long = "trello-export", value_name = "FILE")]
    pub trello_exports: Vec<PathBuf>,

    /// Nextcloud URL, e.g. https://cloud.example.com
    #[arg(long, env = "DECK_URL", default_value = "")]
    pub deck_url: String,

    /// Nextcloud user
    #[arg(long, env = "DECK_USER")]
    pub deck_user: Option<String>,

    /// Nextcloud password or app password (prompted when absent)
    #[arg(long, env = "DECK_PASSWORD", hide_env_values = true)]
    pub deck_password: Option<String>,

    /// Trello board id to migrate (repeatable; default: choose interactively)
    #[arg(long = "board", value_name = "ID")]
    pub boards: Vec<String>,

    /// Do not upload attachments
    #[arg(long)]
    pub skip_attachments: bool,

    /// Do not migrate comments
    #[arg(long)]
    pub skip_comments: bool,

    /// Only check that the Deck instance is compatible
    #[arg(long)]
    pub check_only: bool,

    /// Skip interactive prompts (migrate all boards)
    #[arg(long)]
    pub non_interactive: bool,

    /// Print the migration report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Where Trello data comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrelloSourceConfig {
    /// Live Trello API
    Api { key: String, token: String },
    /// JSON export files
    Export { paths: Vec<PathBuf> },
}

/// Validated migration configuration
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct MigrationConfig {
    /// Trello source, `None` when only the compatibility check runs
    pub source: Option<TrelloSourceConfig>,
    /// Nextcloud URL without trailing slash
    pub deck_url: String,
    /// Nextcloud user
    pub deck_user: String,
    /// Nextcloud password, prompted for when `None`
    pub deck_password: Option<String>,
    /// Selected board ids, empty for "ask"
    pub boards: Vec<String>,
    /// What to migrate
    pub options: MigrationOptions,
    /// Only run the compatibility check
    pub check_only: bool,
    /// Never prompt
    pub non_interactive: bool,
    /// Print the report as JSON
    pub json: bool,
}

/// Parts of a card that can be left out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationOptions {
    /// Do not upload attachments
    pub skip_attachments: bool,
    /// Do not migrate comments
    pub skip_comments: bool,
}

impl MigrateArgs {
    /// Validate the options and build the configuration.
    pub fn into_config(self) -> Result<MigrationConfig, ConfigError> {
        let key = self.trello_key.filter(|s| !s.is_empty());
        let token = self.trello_token.filter(|s| !s.is_empty());

        // The compatibility check never reads from Trello.
        let source = if self.trello_exports.is_empty() {
            match (key, token) {
                (Some(key), Some(token)) => Some(TrelloSourceConfig::Api { key, token }),
                (None, None) if self.check_only => None,
                (None, None) => return Err(ConfigError::MissingTrelloSource),
                _ => return Err(ConfigError::IncompleteTrelloCredentials),
            }
        } else {
            Some(TrelloSourceConfig::Export {
                paths: self.trello_exports,
            })
        };

        let deck_url = self.deck_url.trim().trim_end_matches('/').to_string();
        if !(deck_url.starts_with("http://") || deck_url.starts_with("https://")) {
            return Err(ConfigError::InvalidDeckUrl(deck_url));
        }

        let deck_user = self
            .deck_user
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingDeckUser)?;

        Ok(MigrationConfig {
            source,
            deck_url,
            deck_user,
            deck_password: self.deck_password.filter(|s| !s.is_empty()),
            boards: self.boards,
            options: MigrationOptions {
                skip_attachments: self.skip_attachments,
                skip_comments: self.skip_comments,
            },
            check_only: self.check_only,
            non_interactive: self.non_interactive,
            json: self.json,
        })
    }
}
