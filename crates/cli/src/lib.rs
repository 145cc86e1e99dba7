//! Migrate Trello boards to Nextcloud Deck.
//!
//! Boards are read through a [`BoardSource`](integrations::pm::trello::BoardSource)
//! (the Trello API or JSON exports) and recreated through
//! [`DeckClient`](integrations::pm::deck::DeckClient):
//!
//! ```no_run
//! use integrations::pm::deck::DeckClient;
//! use integrations::pm::trello::TrelloClient;
//! use trello_to_deck::{config::MigrationOptions, migrate::Migrator};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let trello = TrelloClient::new("api-key", "token")?;
//! let deck = DeckClient::new("https://cloud.example.com", "alice", "app-password")?;
//!
//! let report = Migrator::new(&trello, &deck, MigrationOptions::default())
//!     .run(&["5f2d7a0c9e1b".to_string()])
//!     .await?;
//! println!("Migrated {} cards", report.total(|b| b.cards));
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod config;
pub mod mapping;
pub mod migrate;
pub mod ui;

pub use config::{MigrateArgs, MigrationConfig, MigrationOptions, TrelloSourceConfig};
pub use migrate::{MigrateError, MigrationReport, Migrator};
