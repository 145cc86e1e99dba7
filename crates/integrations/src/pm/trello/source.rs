//! Board sources: where Trello data is read from.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::client::TrelloClient;
use super::error::TrelloError;
use super::models::{BoardSummary, TrelloAttachment, TrelloBoard};

/// Trait for Trello board sources (live API, JSON export).
#[async_trait]
pub trait BoardSource: Send + Sync {
    /// Get the name of this source.
    fn name(&self) -> &'static str;

    /// Boards that can be migrated.
    async fn list_boards(&self) -> Result<Vec<BoardSummary>, TrelloError>;

    /// Load a board with all nested resources.
    async fn load_board(&self, board_id: &str) -> Result<TrelloBoard, TrelloError>;

    /// Content of an attachment, or `None` when the source cannot provide it.
    async fn fetch_attachment(
        &self,
        attachment: &TrelloAttachment,
    ) -> Result<Option<Vec<u8>>, TrelloError>;
}

#[async_trait]
impl BoardSource for TrelloClient {
    fn name(&self) -> &'static str {
        "trello-api"
    }

    async fn list_boards(&self) -> Result<Vec<BoardSummary>, TrelloError> {
        self.get_boards().await
    }

    async fn load_board(&self, board_id: &str) -> Result<TrelloBoard, TrelloError> {
        self.get_board(board_id).await
    }

    async fn fetch_attachment(
        &self,
        attachment: &TrelloAttachment,
    ) -> Result<Option<Vec<u8>>, TrelloError> {
        self.download_attachment(attachment).await
    }
}

/// Boards read from Trello "Export as JSON" files.
///
/// Exports carry no credentials, so uploaded files cannot be fetched.
#[derive(Debug, Clone, Default)]
pub struct ExportSource {
    boards: Vec<TrelloBoard>,
}

impl ExportSource {
    /// Create a source from already parsed boards.
    #[must_use]
    pub fn from_boards(boards: Vec<TrelloBoard>) -> Self {
        Self { boards }
    }

    /// Read and parse export files.
    pub async fn from_files(paths: &[PathBuf]) -> Result<Self, TrelloError> {
        let mut boards = Vec::with_capacity(paths.len());
        for path in paths {
            boards.push(Self::read_file(path).await?);
        }
        info!(count = boards.len(), "Loaded Trello exports");
        Ok(Self { boards })
    }

    async fn read_file(path: &Path) -> Result<TrelloBoard, TrelloError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| TrelloError::Export {
                path: path.to_path_buf(),
                source,
            })?;
        let board: TrelloBoard = serde_json::from_str(&content)?;
        debug!(path = %path.display(), name = %board.name, "Parsed Trello export");
        Ok(board)
    }
}

#[async_trait]
impl BoardSource for ExportSource {
    fn name(&self) -> &'static str {
        "trello-export"
    }

    async fn list_boards(&self) -> Result<Vec<BoardSummary>, TrelloError> {
        Ok(self
            .boards
            .iter()
            .map(|b| BoardSummary {
                id: b.id.clone(),
                name: b.name.clone(),
                closed: b.closed,
                url: None,
            })
            .collect())
    }

    async fn load_board(&self, board_id: &str) -> Result<TrelloBoard, TrelloError> {
        self.boards
            .iter()
            .find(|b| b.id == board_id)
            .cloned()
            .ok_or_else(|| TrelloError::BoardNotFound(board_id.to_string()))
    }

    async fn fetch_attachment(
        &self,
        attachment: &TrelloAttachment,
    ) -> Result<Option<Vec<u8>>, TrelloError> {
        if attachment.is_upload {
            warn!(
                name = %attachment.name,
                "Uploaded attachments cannot be fetched from an export"
            );
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EXPORT: &str = r##"{
        "id": "b1",
        "name": "Roadmap",
        "prefs": { "background": "green", "backgroundColor": "#519839" },
        "lists": [{ "id": "l1", "name": "Todo", "pos": 1 }],
        "cards": [{ "id": "c1", "name": "Plan", "idList": "l1", "pos": 1 }]
    }"##;

    #[tokio::test]
    async fn test_export_source_reads_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();

        let source = ExportSource::from_files(&[file.path().to_path_buf()])
            .await
            .unwrap();

        let boards = source.list_boards().await.unwrap();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].name, "Roadmap");

        let board = source.load_board("b1").await.unwrap();
        assert_eq!(board.cards.len(), 1);
        assert_eq!(board.prefs.background_color.as_deref(), Some("#519839"));
    }

    #[tokio::test]
    async fn test_export_source_unknown_board() {
        let source = ExportSource::default();
        let err = source.load_board("missing").await.unwrap_err();
        assert!(matches!(err, TrelloError::BoardNotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_export_source_missing_file() {
        let err = ExportSource::from_files(&[PathBuf::from("/nonexistent/board.json")])
            .await
            .unwrap_err();
        assert!(matches!(err, TrelloError::Export { .. }));
    }
}
