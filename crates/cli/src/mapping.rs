//! Translation of Trello values into their Deck equivalents.

use integrations::pm::trello::{
    CheckItemState, TrelloAction, TrelloAttachment, TrelloBoard, TrelloCard, TrelloChecklist,
    TrelloLabel,
};
use tracing::warn;

/// Board color used when the Trello background has no color equivalent
pub const DEFAULT_BOARD_COLOR: &str = "0800fd";

/// Label color used for Trello labels without a color
pub const DEFAULT_LABEL_COLOR: &str = "cccccc";

/// Card type of every migrated card
pub const CARD_TYPE: &str = "plain";

/// Longest comment Deck accepts, in characters
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Fallback content type for attachments
const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Deck color for a board.
///
/// Deck only accepts hex colors; Trello gives a hex `backgroundColor` for
/// plain backgrounds and a color name or image id in `background`.
#[must_use]
pub fn board_color(board: &TrelloBoard) -> String {
    if let Some(hex) = board
        .prefs
        .background_color
        .as_deref()
        .and_then(normalize_hex)
    {
        return hex;
    }

    let named = match board.prefs.background.as_deref() {
        Some("blue") => "0079bf",
        Some("orange") => "d29034",
        Some("green") => "519839",
        Some("red") => "b04632",
        Some("purple") => "89609e",
        Some("pink") => "cd5a91",
        Some("lime") => "4bbf6b",
        Some("sky") => "00aecc",
        Some("grey") => "838c91",
        _ => DEFAULT_BOARD_COLOR,
    };
    named.to_string()
}

/// Deck color for a Trello label color name.
///
/// `_dark` and `_light` variants map to their base color.
#[must_use]
pub fn label_color(color: Option<&str>) -> &'static str {
    let Some(color) = color else {
        return DEFAULT_LABEL_COLOR;
    };
    let base = color
        .strip_suffix("_dark")
        .or_else(|| color.strip_suffix("_light"))
        .unwrap_or(color);

    match base {
        "green" => "61bd4f",
        "yellow" => "f2d600",
        "orange" => "ff9f1a",
        "red" => "eb5a46",
        "purple" => "c377e0",
        "blue" => "0079bf",
        "sky" => "00c2e0",
        "lime" => "51e898",
        "pink" => "ff78cb",
        "black" => "344563",
        _ => DEFAULT_LABEL_COLOR,
    }
}

/// Deck title for a label; Trello allows unnamed labels, Deck does not.
#[must_use]
pub fn label_title(label: &TrelloLabel) -> String {
    let name = label.name.trim();
    if !name.is_empty() {
        return name.to_string();
    }
    label
        .color
        .clone()
        .unwrap_or_else(|| "unnamed".to_string())
}

/// Markdown description of a card.
///
/// The Trello description, then each checklist as a task list, then link
/// attachments, separated by blank lines.
#[must_use]
pub fn card_description(card: &TrelloCard, checklists: &[&TrelloChecklist]) -> String {
    let mut sections = Vec::new();

    let desc = card.desc.trim();
    if !desc.is_empty() {
        sections.push(desc.to_string());
    }

    for checklist in checklists {
        let mut items: Vec<_> = checklist.check_items.iter().collect();
        items.sort_by(|a, b| a.pos.total_cmp(&b.pos));

        let mut section = format!("## {}", checklist.name);
        for item in items {
            let mark = match item.state {
                CheckItemState::Complete => "x",
                CheckItemState::Incomplete => " ",
            };
            section.push_str(&format!("\n- [{mark}] {}", item.name));
        }
        sections.push(section);
    }

    let links: Vec<_> = card.attachments.iter().filter(|a| !a.is_upload).collect();
    if !links.is_empty() {
        let mut section = String::from("## Links");
        for link in links {
            section.push_str(&format!("\n- [{}]({})", link.name, link.url));
        }
        sections.push(section);
    }

    sections.join("\n\n")
}

/// Text of a migrated comment, attributed to its Trello author.
///
/// Cut to [`MAX_COMMENT_LENGTH`] characters, ending in `…`, when longer.
#[must_use]
pub fn comment_message(action: &TrelloAction) -> String {
    let text = action.data.text.as_deref().unwrap_or_default();
    let message = format!(
        "{} on {}:\n\n{text}",
        action.author(),
        action.date.format("%Y-%m-%d %H:%M UTC")
    );

    let length = message.chars().count();
    if length <= MAX_COMMENT_LENGTH {
        return message;
    }
    warn!(
        comment_id = %action.id,
        length,
        "Comment exceeds the Deck limit of {MAX_COMMENT_LENGTH} characters, truncating"
    );
    let mut truncated: String = message.chars().take(MAX_COMMENT_LENGTH - 1).collect();
    truncated.push('…');
    truncated
}

/// Content type for an uploaded attachment.
#[must_use]
pub fn attachment_mime(attachment: &TrelloAttachment) -> String {
    if let Some(mime) = attachment.mime_type.as_deref().filter(|m| !m.is_empty()) {
        return mime.to_string();
    }
    mime_guess::from_path(attachment.upload_name())
        .first_raw()
        .unwrap_or(DEFAULT_MIME_TYPE)
        .to_string()
}

fn normalize_hex(value: &str) -> Option<String> {
    let hex = value.trim().trim_start_matches('#');
    (hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())).then(|| hex.to_lowercase())
}
