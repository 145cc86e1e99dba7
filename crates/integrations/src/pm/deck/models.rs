//! Nextcloud Deck entity type definitions.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Deck sends `null` instead of an empty list for some collections.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deck board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique identifier
    pub id: i64,
    /// Board title
    pub title: String,
    /// Hex color without leading `#`
    #[serde(default)]
    pub color: String,
    /// Whether the board is archived
    #[serde(default)]
    pub archived: bool,
    /// Labels defined on the board
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<Label>,
    /// Stacks, only present on some responses
    #[serde(default, deserialize_with = "null_as_default")]
    pub stacks: Vec<Stack>,
}

/// Deck label
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Unique identifier
    pub id: i64,
    /// Label title
    pub title: String,
    /// Hex color without leading `#`
    #[serde(default)]
    pub color: String,
    /// Owning board
    #[serde(default)]
    pub board_id: Option<i64>,
}

/// Deck stack (a column on a board)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stack {
    /// Unique identifier
    pub id: i64,
    /// Stack title
    pub title: String,
    /// Owning board
    #[serde(default)]
    pub board_id: Option<i64>,
    /// Position on the board
    #[serde(default)]
    pub order: i64,
    /// Cards in the stack; Deck omits the key for empty stacks
    #[serde(default, deserialize_with = "null_as_default")]
    pub cards: Vec<Card>,
}

/// Deck card.
///
/// Fields the client does not model are kept in `extra` so a card can be
/// sent back to Deck unchanged apart from the fields we touch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier
    pub id: i64,
    /// Card title
    pub title: String,
    /// Markdown description
    #[serde(default)]
    pub description: Option<String>,
    /// Card type, `plain` for regular cards
    #[serde(rename = "type", default)]
    pub card_type: String,
    /// Position within the stack
    #[serde(default)]
    pub order: i64,
    /// Due date as returned by Deck (ISO-8601)
    #[serde(default)]
    pub duedate: Option<String>,
    /// Whether the card is archived
    #[serde(default)]
    pub archived: bool,
    /// Owning stack
    #[serde(default)]
    pub stack_id: Option<i64>,
    /// Assigned labels
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<Label>,
    /// Everything else Deck returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Input for creating a card
#[derive(Debug, Clone, Serialize)]
pub struct CardCreateInput {
    /// Card title
    pub title: String,
    /// Card type
    #[serde(rename = "type")]
    pub card_type: String,
    /// Position within the stack
    pub order: i64,
    /// Markdown description
    pub description: String,
    /// ISO-8601 due date, sent as `null` when absent
    pub duedate: Option<String>,
}

/// OCS response envelope (`{"ocs": {"meta": ..., "data": ...}}`)
#[derive(Debug, Clone, Deserialize)]
pub struct OcsEnvelope<T> {
    /// Envelope body
    pub ocs: Ocs<T>,
}

/// OCS envelope body
#[derive(Debug, Clone, Deserialize)]
pub struct Ocs<T> {
    /// Request outcome
    pub meta: OcsMeta,
    /// Payload
    pub data: T,
}

/// OCS request outcome
#[derive(Debug, Clone, Deserialize)]
pub struct OcsMeta {
    /// `ok` on success, `failure` otherwise
    pub status: String,
    /// OCS status code
    #[serde(default)]
    pub statuscode: Option<i64>,
    /// Human readable message
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of `/ocs/v1.php/cloud/capabilities`
#[derive(Debug, Clone, Deserialize)]
pub struct CapabilitiesData {
    /// Capabilities by app id
    #[serde(default)]
    pub capabilities: HashMap<String, Value>,
}

/// The `deck` entry of the capabilities payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckCapability {
    /// Installed Deck version
    pub version: String,
    /// Whether the user may create boards
    #[serde(default)]
    pub can_create_boards: Option<bool>,
}
