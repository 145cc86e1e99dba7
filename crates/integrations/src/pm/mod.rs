//! Project management integrations.
//!
//! - **Trello** - source boards, read through the REST API or JSON exports
//! - **Nextcloud Deck** - destination boards, written through the REST API
//!
//! # Example
//!
//! ```no_run
//! use integrations::pm::deck::DeckClient;
//! use integrations::pm::trello::{BoardSource, TrelloClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let trello = TrelloClient::new("api-key", "token")?;
//! let deck = DeckClient::new("https://cloud.example.com", "alice", "app-password")?;
//!
//! deck.check_compatibility().await?;
//! for board in trello.list_boards().await? {
//!     println!("Board: {}", board.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod deck;
pub mod trello;
