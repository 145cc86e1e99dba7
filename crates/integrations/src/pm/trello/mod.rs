//! Trello integration.
//!
//! Reads boards with their lists, cards, labels, checklists, comments and
//! attachments, either live from the REST API or from JSON exports.

pub mod client;
pub mod error;
pub mod models;
pub mod source;

pub use client::TrelloClient;
pub use error::TrelloError;
pub use models::{
    BoardSummary, CheckItemState, TrelloAction, TrelloAttachment, TrelloBoard, TrelloCard,
    TrelloChecklist, TrelloLabel, TrelloList,
};
pub use source::{BoardSource, ExportSource};
