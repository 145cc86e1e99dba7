//! REST client for the Nextcloud Deck API.
//!
//! Routes follow <https://deck.readthedocs.io/en/latest/API/>.

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, instrument};

use super::error::DeckError;
use super::models::{
    Board, CapabilitiesData, Card, CardCreateInput, DeckCapability, Label, OcsEnvelope, Stack,
};

/// Prefix of the regular Deck REST routes
const API_PREFIX: &str = "/index.php/apps/deck/api/v1.0";

/// Prefix of the OCS Deck routes (comments)
const OCS_API_PREFIX: &str = "/ocs/v2.php/apps/deck/api/v1.0";

/// Nextcloud capabilities route
const CAPABILITIES_ROUTE: &str = "/ocs/v1.php/cloud/capabilities?format=json";

/// Oldest Deck release with the API this client speaks
pub const MIN_DECK_VERSION: &str = "1.1.0";

/// Deck REST client
#[derive(Debug, Clone)]
pub struct DeckClient {
    client: reqwest::Client,
    base_url: String,
    user: String,
    password: String,
}

impl DeckClient {
    /// Create a new Deck client.
    ///
    /// # Arguments
    /// * `base_url` - Nextcloud root URL, e.g. `https://cloud.example.com`
    /// * `user` - Nextcloud user name
    /// * `password` - Password or app password of `user`
    pub fn new(base_url: &str, user: &str, password: &str) -> Result<Self, DeckError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(DeckError::InvalidUrl(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert("OCS-APIRequest", HeaderValue::from_static("true"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            user: user.to_string(),
            password: password.to_string(),
        })
    }

    /// Nextcloud root URL without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, route: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{route}", self.base_url))
            .basic_auth(&self.user, Some(&self.password))
    }

    /// Send a request, failing on anything but `200 OK`.
    async fn send(&self, request: RequestBuilder) -> Result<Response, DeckError> {
        let response = request.send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "The response was: {body}");
            return Err(DeckError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, DeckError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    // =========================================================================
    // Verbs
    // =========================================================================

    /// `GET {base_url}{route}`
    pub async fn get(&self, route: &str) -> Result<Response, DeckError> {
        self.send(self.request(Method::GET, route)).await
    }

    /// `POST {base_url}{route}` with a JSON body
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        route: &str,
        json: &B,
    ) -> Result<Response, DeckError> {
        self.send(self.request(Method::POST, route).json(json)).await
    }

    /// `POST {base_url}{route}` with a multipart form body
    pub async fn post_files(&self, route: &str, form: Form) -> Result<Response, DeckError> {
        self.send(self.request(Method::POST, route).multipart(form)).await
    }

    /// `PUT {base_url}{route}` with a JSON body
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        route: &str,
        json: &B,
    ) -> Result<Response, DeckError> {
        self.send(self.request(Method::PUT, route).json(json)).await
    }

    /// `DELETE {base_url}{route}`
    pub async fn delete(&self, route: &str) -> Result<Response, DeckError> {
        self.send(self.request(Method::DELETE, route)).await
    }

    // =========================================================================
    // Capabilities
    // =========================================================================

    /// Verify that Deck is installed and recent enough.
    ///
    /// Returns [`DeckError::Incompatible`] with a user facing message when
    /// the instance cannot be migrated to.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn check_compatibility(&self) -> Result<(), DeckError> {
        let response = self.get(CAPABILITIES_ROUTE).await?;
        let envelope: OcsEnvelope<Value> = Self::decode(response).await?;

        if envelope.ocs.meta.status != "ok" {
            return Err(DeckError::Incompatible(
                "The compatibility check failed".to_string(),
            ));
        }

        let data: CapabilitiesData = serde_json::from_value(envelope.ocs.data)?;
        let Some(deck) = data.capabilities.get("deck") else {
            return Err(DeckError::Incompatible(
                "Please install deck on your nextcloud instance".to_string(),
            ));
        };

        let deck: DeckCapability = serde_json::from_value(deck.clone())?;
        debug!(version = %deck.version, "Deck capability found");

        if !version_at_least(&deck.version, MIN_DECK_VERSION) {
            return Err(DeckError::Incompatible(format!(
                "This script only supports version {MIN_DECK_VERSION} and above"
            )));
        }

        Ok(())
    }

    // =========================================================================
    // Board Operations
    // =========================================================================

    /// List the boards visible to the user
    #[instrument(skip(self))]
    pub async fn get_boards(&self) -> Result<Vec<Board>, DeckError> {
        let response = self.get(&format!("{API_PREFIX}/boards")).await?;
        Self::decode(response).await
    }

    /// Get a board with its labels
    #[instrument(skip(self))]
    pub async fn get_board_details(&self, board_id: i64) -> Result<Board, DeckError> {
        let response = self.get(&format!("{API_PREFIX}/boards/{board_id}")).await?;
        Self::decode(response).await
    }

    /// Create a board.
    ///
    /// Deck seeds new boards with a set of default labels; they are deleted
    /// so the board only carries migrated labels.
    #[instrument(skip(self), fields(title = %title))]
    pub async fn create_board(&self, title: &str, color: &str) -> Result<Board, DeckError> {
        let response = self
            .post(
                &format!("{API_PREFIX}/boards"),
                &json!({ "title": title, "color": color }),
            )
            .await?;
        let board: Board = Self::decode(response).await?;

        for label in &board.labels {
            debug!(label_id = label.id, title = %label.title, "Removing default label");
            self.delete(&format!(
                "{API_PREFIX}/boards/{}/labels/{}",
                board.id, label.id
            ))
            .await?;
        }

        Ok(board)
    }

    // =========================================================================
    // Label Operations
    // =========================================================================

    /// Create a label on a board
    #[instrument(skip(self), fields(title = %title))]
    pub async fn create_label(
        &self,
        title: &str,
        color: &str,
        board_id: i64,
    ) -> Result<Label, DeckError> {
        let response = self
            .post(
                &format!("{API_PREFIX}/boards/{board_id}/labels"),
                &json!({ "title": title, "color": color }),
            )
            .await?;
        Self::decode(response).await
    }

    /// Attach a board label to a card
    #[instrument(skip(self))]
    pub async fn assign_label(
        &self,
        label_id: i64,
        card_id: i64,
        board_id: i64,
        stack_id: i64,
    ) -> Result<(), DeckError> {
        self.put(
            &format!(
                "{API_PREFIX}/boards/{board_id}/stacks/{stack_id}/cards/{card_id}/assignLabel"
            ),
            &json!({ "labelId": label_id }),
        )
        .await?;
        Ok(())
    }

    // =========================================================================
    // Stack Operations
    // =========================================================================

    /// List the stacks of a board, with their cards
    #[instrument(skip(self))]
    pub async fn get_stacks(&self, board_id: i64) -> Result<Vec<Stack>, DeckError> {
        let response = self
            .get(&format!("{API_PREFIX}/boards/{board_id}/stacks"))
            .await?;
        Self::decode(response).await
    }

    /// List the stacks of a board holding archived cards
    #[instrument(skip(self))]
    pub async fn get_stacks_archived(&self, board_id: i64) -> Result<Vec<Stack>, DeckError> {
        let response = self
            .get(&format!("{API_PREFIX}/boards/{board_id}/stacks/archived"))
            .await?;
        Self::decode(response).await
    }

    /// Create a stack on a board
    #[instrument(skip(self), fields(title = %title))]
    pub async fn create_stack(
        &self,
        title: &str,
        order: i64,
        board_id: i64,
    ) -> Result<Stack, DeckError> {
        let response = self
            .post(
                &format!("{API_PREFIX}/boards/{board_id}/stacks"),
                &json!({ "title": title, "order": order }),
            )
            .await?;
        Self::decode(response).await
    }

    // =========================================================================
    // Card Operations
    // =========================================================================

    /// Create a card in a stack
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_card(
        &self,
        input: &CardCreateInput,
        board_id: i64,
        stack_id: i64,
    ) -> Result<Card, DeckError> {
        let response = self
            .post(
                &format!("{API_PREFIX}/boards/{board_id}/stacks/{stack_id}/cards"),
                input,
            )
            .await?;
        Self::decode(response).await
    }

    /// Archive a card by sending it back with `archived` set
    #[instrument(skip(self, card), fields(card_id = card.id))]
    pub async fn archive_card(
        &self,
        card: &Card,
        board_id: i64,
        stack_id: i64,
    ) -> Result<(), DeckError> {
        let mut card = card.clone();
        card.archived = true;
        self.put(
            &format!(
                "{API_PREFIX}/boards/{board_id}/stacks/{stack_id}/cards/{}",
                card.id
            ),
            &card,
        )
        .await?;
        Ok(())
    }

    /// Post a comment on a card, optionally as a reply to `parent_id`
    #[instrument(skip(self, message))]
    pub async fn comment_on_card(
        &self,
        card_id: i64,
        message: &str,
        parent_id: Option<i64>,
    ) -> Result<(), DeckError> {
        self.post(
            &format!("{OCS_API_PREFIX}/cards/{card_id}/comments"),
            &json!({ "message": message, "parentId": parent_id }),
        )
        .await?;
        Ok(())
    }

    /// Upload a file as a card attachment
    #[instrument(skip(self, content), fields(size = content.len()))]
    pub async fn attach_to_card(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
        file_name: &str,
        content: Vec<u8>,
        mime_type: &str,
    ) -> Result<(), DeckError> {
        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str(mime_type)?;
        let form = Form::new().text("type", "file").part("file", part);

        self.post_files(
            &format!(
                "{API_PREFIX}/boards/{board_id}/stacks/{stack_id}/cards/{card_id}/attachments"
            ),
            form,
        )
        .await?;
        Ok(())
    }
}

/// Format a due date the way Deck expects it
#[must_use]
pub fn format_duedate(due: Option<DateTime<Utc>>) -> Option<String> {
    due.map(|d| d.to_rfc3339())
}

/// Compare dotted version strings numerically.
///
/// Missing components count as zero and anything after the leading digits
/// of a component (`0-beta`) is ignored.
#[must_use]
pub fn version_at_least(version: &str, minimum: &str) -> bool {
    fn components(v: &str) -> Vec<u64> {
        v.trim()
            .trim_start_matches('v')
            .split('.')
            .map(|part| {
                let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
                digits.parse().unwrap_or(0)
            })
            .collect()
    }

    let actual = components(version);
    let wanted = components(minimum);
    let len = actual.len().max(wanted.len());

    for i in 0..len {
        let a = actual.get(i).copied().unwrap_or(0);
        let w = wanted.get(i).copied().unwrap_or(0);
        if a != w {
            return a > w;
        }
    }
    true
}
