//! Migration of Trello boards onto Deck.
//!
//! One forward pass per board: board, labels, stacks, then each card with
//! its labels, comments, attachments and archive state. The first failing
//! request aborts the run.

use std::collections::HashMap;

use indicatif::{ProgressBar, ProgressStyle};
use integrations::pm::deck::{format_duedate, CardCreateInput, DeckClient, DeckError};
use integrations::pm::trello::{BoardSource, TrelloBoard, TrelloCard, TrelloError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::config::MigrationOptions;
use crate::mapping;

/// Errors that abort a migration.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Writing to Deck failed
    #[error("Deck request failed: {0}")]
    Deck(#[from] DeckError),

    /// Reading from Trello failed
    #[error("Trello request failed: {0}")]
    Trello(#[from] TrelloError),
}

/// What was created for one board
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoardReport {
    /// Trello board id
    pub trello_id: String,
    /// Board title
    pub title: String,
    /// Id of the created Deck board
    pub deck_id: i64,
    /// Labels created
    pub labels: usize,
    /// Stacks created
    pub stacks: usize,
    /// Cards created
    pub cards: usize,
    /// Comments posted
    pub comments: usize,
    /// Files uploaded
    pub attachments: usize,
    /// Uploads the source could not provide
    pub skipped_attachments: usize,
    /// Cards archived
    pub archived: usize,
}

/// Outcome of a migration run
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    /// One entry per migrated board, in migration order
    pub boards: Vec<BoardReport>,
}

impl MigrationReport {
    /// Sum a counter over all boards
    pub fn total(&self, counter: impl Fn(&BoardReport) -> usize) -> usize {
        self.boards.iter().map(counter).sum()
    }
}

/// Per-stack state shared by the cards of one Trello list
struct CardContext<'b> {
    board: &'b TrelloBoard,
    labels: &'b HashMap<&'b str, i64>,
    board_id: i64,
    stack_id: i64,
    list_closed: bool,
}

/// Copies Trello boards from a [`BoardSource`] to Deck.
pub struct Migrator<'a> {
    source: &'a dyn BoardSource,
    deck: &'a DeckClient,
    options: MigrationOptions,
    progress: bool,
}

impl<'a> Migrator<'a> {
    /// Create a migrator without progress output.
    pub fn new(
        source: &'a dyn BoardSource,
        deck: &'a DeckClient,
        options: MigrationOptions,
    ) -> Self {
        Self {
            source,
            deck,
            options,
            progress: false,
        }
    }

    /// Show a progress bar over the cards of each board.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Migrate the given boards in order.
    pub async fn run(&self, board_ids: &[String]) -> Result<MigrationReport, MigrateError> {
        let mut report = MigrationReport::default();
        for board_id in board_ids {
            let board = self.source.load_board(board_id).await?;
            report.boards.push(self.migrate_board(&board).await?);
        }
        info!(
            boards = report.boards.len(),
            cards = report.total(|b| b.cards),
            source = self.source.name(),
            "Migration finished"
        );
        Ok(report)
    }

    /// Recreate one Trello board on Deck.
    #[instrument(skip(self, board), fields(board = %board.name))]
    pub async fn migrate_board(&self, board: &TrelloBoard) -> Result<BoardReport, MigrateError> {
        info!("Migrating board");

        let deck_board = self
            .deck
            .create_board(&board.name, &mapping::board_color(board))
            .await?;
        let mut report = BoardReport {
            trello_id: board.id.clone(),
            title: board.name.clone(),
            deck_id: deck_board.id,
            ..BoardReport::default()
        };

        let mut labels = HashMap::new();
        for label in &board.labels {
            let created = self
                .deck
                .create_label(
                    &mapping::label_title(label),
                    mapping::label_color(label.color.as_deref()),
                    deck_board.id,
                )
                .await?;
            labels.insert(label.id.as_str(), created.id);
            report.labels += 1;
        }

        let progress = self.progress_bar(board.cards.len());
        for (index, list) in board.sorted_lists().into_iter().enumerate() {
            let stack = self
                .deck
                .create_stack(&list.name, to_order(index), deck_board.id)
                .await?;
            report.stacks += 1;

            let context = CardContext {
                board,
                labels: &labels,
                board_id: deck_board.id,
                stack_id: stack.id,
                list_closed: list.closed,
            };

            for (index, card) in board.cards_in_list(&list.id).into_iter().enumerate() {
                progress.set_message(card.name.clone());
                self.migrate_card(&context, card, to_order(index), &mut report)
                    .await?;
                progress.inc(1);
            }
        }
        progress.finish_and_clear();

        info!(
            deck_board_id = report.deck_id,
            stacks = report.stacks,
            cards = report.cards,
            "Board migrated"
        );
        Ok(report)
    }

    async fn migrate_card(
        &self,
        context: &CardContext<'_>,
        card: &TrelloCard,
        order: i64,
        report: &mut BoardReport,
    ) -> Result<(), MigrateError> {
        let checklists = context.board.checklists_for(&card.id);
        let input = CardCreateInput {
            title: card.name.clone(),
            card_type: mapping::CARD_TYPE.to_string(),
            order,
            description: mapping::card_description(card, &checklists),
            duedate: format_duedate(card.due),
        };
        let created = self
            .deck
            .create_card(&input, context.board_id, context.stack_id)
            .await?;
        report.cards += 1;
        debug!(card = %card.name, deck_card_id = created.id, "Card created");

        for label_id in &card.id_labels {
            match context.labels.get(label_id.as_str()) {
                Some(deck_label_id) => {
                    self.deck
                        .assign_label(
                            *deck_label_id,
                            created.id,
                            context.board_id,
                            context.stack_id,
                        )
                        .await?;
                }
                None => {
                    warn!(label_id = %label_id, card = %card.name, "Card references unknown label");
                }
            }
        }

        if !self.options.skip_comments {
            for comment in context.board.comments_for(&card.id) {
                self.deck
                    .comment_on_card(created.id, &mapping::comment_message(comment), None)
                    .await?;
                report.comments += 1;
            }
        }

        if !self.options.skip_attachments {
            for attachment in card.attachments.iter().filter(|a| a.is_upload) {
                let Some(content) = self.source.fetch_attachment(attachment).await? else {
                    report.skipped_attachments += 1;
                    continue;
                };
                self.deck
                    .attach_to_card(
                        context.board_id,
                        context.stack_id,
                        created.id,
                        attachment.upload_name(),
                        content,
                        &mapping::attachment_mime(attachment),
                    )
                    .await?;
                report.attachments += 1;
            }
        }

        if card.closed || context.list_closed {
            self.deck
                .archive_card(&created, context.board_id, context.stack_id)
                .await?;
            report.archived += 1;
        }

        Ok(())
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len as u64);
        let template = "{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}";
        if let Ok(style) = ProgressStyle::with_template(template) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar
    }
}

fn to_order(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}
