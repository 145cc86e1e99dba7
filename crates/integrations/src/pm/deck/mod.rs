//! Nextcloud Deck integration.
//!
//! A thin authenticated client over the Deck REST API: one method per
//! resource, a uniform `200 OK` check, and typed responses.

pub mod client;
pub mod error;
pub mod models;

pub use client::{format_duedate, version_at_least, DeckClient, MIN_DECK_VERSION};
pub use error::DeckError;
pub use models::{Board, Card, CardCreateInput, Label, Stack};
