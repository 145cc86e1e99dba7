//! Trello and Nextcloud Deck API clients for trello-to-deck.
//!
//! This crate provides:
//! - REST client for the Nextcloud Deck API
//! - REST client for the Trello API
//! - Trello JSON export reader
//! - Type definitions for Trello and Deck entities

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Every API method can fail

pub mod pm;

pub use pm::deck::{DeckClient, DeckError};
pub use pm::trello::{BoardSource, ExportSource, TrelloClient, TrelloError};
