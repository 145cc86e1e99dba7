//! REST client for the Trello API.

use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

use super::error::TrelloError;
use super::models::{BoardSummary, TrelloAttachment, TrelloBoard};

/// Trello API endpoint
const TRELLO_API_URL: &str = "https://api.trello.com/1";

/// Query used to load a board with every nested resource in one call
const BOARD_QUERY: &[(&str, &str)] = &[
    ("lists", "all"),
    ("cards", "all"),
    ("card_attachments", "true"),
    ("labels", "all"),
    ("checklists", "all"),
    ("actions", "commentCard"),
    ("actions_limit", "1000"),
    ("action_memberCreator_fields", "fullName,username"),
];

/// Trello REST client
#[derive(Debug, Clone)]
pub struct TrelloClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    token: String,
}

impl TrelloClient {
    /// Create a new Trello client.
    ///
    /// # Arguments
    /// * `api_key` - Trello API key
    /// * `token` - Trello token
    pub fn new(api_key: &str, token: &str) -> Result<Self, TrelloError> {
        Self::with_url(api_key, token, TRELLO_API_URL)
    }

    /// Create a client with custom API URL (for testing)
    pub fn with_url(api_key: &str, token: &str, api_url: &str) -> Result<Self, TrelloError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            token: token.to_string(),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.query(&[("key", &self.api_key), ("token", &self.token)])
    }

    /// Header Trello requires for downloading uploaded attachments
    fn oauth_header(&self) -> String {
        format!(
            "OAuth oauth_consumer_key=\"{}\", oauth_token=\"{}\"",
            self.api_key, self.token
        )
    }

    async fn check(response: Response) -> Result<Response, TrelloError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "Trello request failed: {body}");
            return Err(TrelloError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TrelloError> {
        let request = self
            .client
            .get(format!("{}{path}", self.api_url))
            .query(query);
        let response = self.authorized(request).send().await?;
        let body = Self::check(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Open boards of the token's member
    #[instrument(skip(self))]
    pub async fn get_boards(&self) -> Result<Vec<BoardSummary>, TrelloError> {
        let boards: Vec<BoardSummary> = self
            .get_json(
                "/members/me/boards",
                &[("filter", "open"), ("fields", "name,closed,url")],
            )
            .await?;
        debug!(count = boards.len(), "Retrieved Trello boards");
        Ok(boards)
    }

    /// A board with lists, cards, labels, checklists, attachments and comments
    #[instrument(skip(self))]
    pub async fn get_board(&self, board_id: &str) -> Result<TrelloBoard, TrelloError> {
        let board: TrelloBoard = self
            .get_json(&format!("/boards/{board_id}"), BOARD_QUERY)
            .await?;
        debug!(
            name = %board.name,
            lists = board.lists.len(),
            cards = board.cards.len(),
            "Retrieved Trello board"
        );
        Ok(board)
    }

    /// Download the content of an uploaded attachment.
    ///
    /// Returns `None` for link attachments, which have nothing to download.
    #[instrument(skip(self, attachment), fields(attachment_id = %attachment.id))]
    pub async fn download_attachment(
        &self,
        attachment: &TrelloAttachment,
    ) -> Result<Option<Vec<u8>>, TrelloError> {
        if !attachment.is_upload {
            return Ok(None);
        }

        let response = self
            .client
            .get(&attachment.url)
            .header(AUTHORIZATION, self.oauth_header())
            .send()
            .await?;
        let bytes = Self::check(response).await?.bytes().await?;
        debug!(size = bytes.len(), "Downloaded attachment");
        Ok(Some(bytes.to_vec()))
    }
}
