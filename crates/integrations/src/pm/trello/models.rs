//! Trello entity type definitions.
//!
//! The same shapes are returned by `GET /boards/{id}` with nested resources
//! and written by Trello's "Export as JSON" board menu.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Board as listed by `GET /members/me/boards`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    /// Unique identifier
    pub id: String,
    /// Board name
    pub name: String,
    /// Whether the board is closed
    #[serde(default)]
    pub closed: bool,
    /// URL to the board
    #[serde(default)]
    pub url: Option<String>,
}

/// Trello board with everything needed to migrate it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloBoard {
    /// Unique identifier
    pub id: String,
    /// Board name
    pub name: String,
    /// Board description
    #[serde(default)]
    pub desc: String,
    /// Whether the board is closed
    #[serde(default)]
    pub closed: bool,
    /// Board appearance
    #[serde(default)]
    pub prefs: BoardPrefs,
    /// Lists, open and closed
    #[serde(default)]
    pub lists: Vec<TrelloList>,
    /// Cards, open and closed
    #[serde(default)]
    pub cards: Vec<TrelloCard>,
    /// Labels defined on the board
    #[serde(default)]
    pub labels: Vec<TrelloLabel>,
    /// Checklists of all cards
    #[serde(default)]
    pub checklists: Vec<TrelloChecklist>,
    /// Board actions; only `commentCard` is used
    #[serde(default)]
    pub actions: Vec<TrelloAction>,
}

impl TrelloBoard {
    /// Lists ordered by position
    #[must_use]
    pub fn sorted_lists(&self) -> Vec<&TrelloList> {
        let mut lists: Vec<_> = self.lists.iter().collect();
        lists.sort_by(|a, b| a.pos.total_cmp(&b.pos));
        lists
    }

    /// Cards of a list ordered by position
    #[must_use]
    pub fn cards_in_list(&self, list_id: &str) -> Vec<&TrelloCard> {
        let mut cards: Vec<_> = self
            .cards
            .iter()
            .filter(|c| c.id_list == list_id)
            .collect();
        cards.sort_by(|a, b| a.pos.total_cmp(&b.pos));
        cards
    }

    /// Checklists of a card ordered by position
    #[must_use]
    pub fn checklists_for(&self, card_id: &str) -> Vec<&TrelloChecklist> {
        let mut checklists: Vec<_> = self
            .checklists
            .iter()
            .filter(|c| c.id_card == card_id)
            .collect();
        checklists.sort_by(|a, b| a.pos.total_cmp(&b.pos));
        checklists
    }

    /// Comments on a card, oldest first
    #[must_use]
    pub fn comments_for(&self, card_id: &str) -> Vec<&TrelloAction> {
        let mut comments: Vec<_> = self
            .actions
            .iter()
            .filter(|a| a.is_comment() && a.card_id() == Some(card_id))
            .collect();
        comments.sort_by_key(|a| a.date);
        comments
    }
}

/// Board appearance preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPrefs {
    /// Named background (`blue`, `green`, ...) or an image id
    #[serde(default)]
    pub background: Option<String>,
    /// Hex color (`#0079BF`), absent for image backgrounds
    #[serde(default)]
    pub background_color: Option<String>,
}

/// Trello list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloList {
    /// Unique identifier
    pub id: String,
    /// List name
    pub name: String,
    /// Whether the list is archived
    #[serde(default)]
    pub closed: bool,
    /// Position on the board
    #[serde(default)]
    pub pos: f64,
}

/// Trello card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloCard {
    /// Unique identifier
    pub id: String,
    /// Card title
    pub name: String,
    /// Markdown description
    #[serde(default)]
    pub desc: String,
    /// Due date
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
    /// Whether the card is archived
    #[serde(default)]
    pub closed: bool,
    /// Position within its list
    #[serde(default)]
    pub pos: f64,
    /// Owning list
    pub id_list: String,
    /// Assigned board labels
    #[serde(default)]
    pub id_labels: Vec<String>,
    /// Checklists on the card
    #[serde(default)]
    pub id_checklists: Vec<String>,
    /// File and link attachments
    #[serde(default)]
    pub attachments: Vec<TrelloAttachment>,
}

/// Trello label
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloLabel {
    /// Unique identifier
    pub id: String,
    /// Label name, may be empty
    #[serde(default)]
    pub name: String,
    /// Color name (`green`, `sky_dark`, ...), absent for colorless labels
    #[serde(default)]
    pub color: Option<String>,
}

/// Trello checklist
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloChecklist {
    /// Unique identifier
    pub id: String,
    /// Checklist title
    pub name: String,
    /// Owning card
    pub id_card: String,
    /// Position on the card
    #[serde(default)]
    pub pos: f64,
    /// Items
    #[serde(default)]
    pub check_items: Vec<CheckItem>,
}

/// Checklist item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckItem {
    /// Unique identifier
    pub id: String,
    /// Item text
    pub name: String,
    /// Completion state
    pub state: CheckItemState,
    /// Position in the checklist
    #[serde(default)]
    pub pos: f64,
}

/// Checklist item state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckItemState {
    /// Ticked
    Complete,
    /// Not ticked
    Incomplete,
}

/// Trello board action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloAction {
    /// Unique identifier
    pub id: String,
    /// Action type, e.g. `commentCard`
    #[serde(rename = "type")]
    pub action_type: String,
    /// When the action happened
    pub date: DateTime<Utc>,
    /// Action payload
    #[serde(default)]
    pub data: ActionData,
    /// Member who performed the action
    #[serde(default)]
    pub member_creator: Option<TrelloMember>,
}

impl TrelloAction {
    /// Whether this is a comment on a card
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.action_type == "commentCard"
    }

    /// Card the action refers to
    #[must_use]
    pub fn card_id(&self) -> Option<&str> {
        self.data.card.as_ref().map(|c| c.id.as_str())
    }

    /// Display name of the author
    #[must_use]
    pub fn author(&self) -> &str {
        self.member_creator
            .as_ref()
            .map_or("Unknown", |m| {
                if m.full_name.is_empty() {
                    m.username.as_str()
                } else {
                    m.full_name.as_str()
                }
            })
    }
}

/// Action payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData {
    /// Comment text
    #[serde(default)]
    pub text: Option<String>,
    /// Card the action refers to
    #[serde(default)]
    pub card: Option<ActionCard>,
}

/// Card reference inside an action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionCard {
    /// Unique identifier
    pub id: String,
    /// Card title at the time of the action
    #[serde(default)]
    pub name: Option<String>,
}

/// Trello member
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloMember {
    /// Unique identifier
    #[serde(default)]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub full_name: String,
    /// Login name
    #[serde(default)]
    pub username: String,
}

/// Card attachment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloAttachment {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Download URL for uploads, target URL for links
    pub url: String,
    /// MIME type reported by Trello
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Whether the file is hosted by Trello
    #[serde(default)]
    pub is_upload: bool,
    /// Original file name
    #[serde(default)]
    pub file_name: Option<String>,
    /// Size in bytes
    #[serde(default)]
    pub bytes: Option<u64>,
}

impl TrelloAttachment {
    /// File name to upload under; falls back to the display name
    #[must_use]
    pub fn upload_name(&self) -> &str {
        self.file_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.name)
    }
}
