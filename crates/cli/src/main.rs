//! trello-to-deck CLI.
//!
//! Reads boards from Trello and recreates them, with labels, lists, cards,
//! checklists, comments and attachments, on a Nextcloud Deck instance.

use anyhow::{bail, Context, Result};
use clap::Parser;
use dialoguer::{theme::ColorfulTheme, MultiSelect, Password};
use integrations::pm::deck::{DeckClient, DeckError};
use integrations::pm::trello::{BoardSource, ExportSource, TrelloClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

use trello_to_deck::config::{ConfigError, MigrateArgs, MigrationConfig, TrelloSourceConfig};
use trello_to_deck::migrate::Migrator;
use trello_to_deck::ui;

/// Migrate Trello boards to Nextcloud Deck.
#[derive(Parser)]
#[command(
    name = "trello-to-deck",
    version,
    about = "Migrate Trello boards to Nextcloud Deck",
    long_about = "Copy Trello boards to Nextcloud Deck.\n\n\
                  Boards, labels, lists, cards, checklists, comments and attachments\n\
                  are recreated in a single pass. The run stops at the first error;\n\
                  boards created up to that point are left in place."
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    args: MigrateArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("info,integrations=debug,trello_to_deck=debug")
    } else {
        EnvFilter::new("warn,integrations=warn,trello_to_deck=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.args.into_config()?;
    run(config).await
}

async fn run(config: MigrationConfig) -> Result<()> {
    let total = if config.check_only { 1 } else { 3 };
    // stdout carries only the report in JSON mode
    let console = !config.json;

    if console {
        ui::print_progress_step(1, total, "Checking Deck compatibility");
    }
    let password = deck_password(&config)?;
    let deck = DeckClient::new(&config.deck_url, &config.deck_user, &password)?;
    match deck.check_compatibility().await {
        Ok(()) if console => ui::print_success("Deck instance is compatible"),
        Ok(()) => {}
        Err(DeckError::Incompatible(message)) => {
            ui::print_error(&message);
            bail!(message);
        }
        Err(e) => return Err(e).context("Failed to query Nextcloud capabilities"),
    }

    if config.check_only {
        return Ok(());
    }

    if console {
        ui::print_progress_step(2, total, "Selecting Trello boards");
    }
    let source = board_source(&config).await?;
    let board_ids = select_boards(source.as_ref(), &config).await?;
    if board_ids.is_empty() && console {
        ui::print_warning("No boards selected, nothing to do.");
        return Ok(());
    }
    info!(count = board_ids.len(), source = source.name(), "Boards selected");

    if console {
        ui::print_progress_step(3, total, "Migrating boards");
    }
    let report = Migrator::new(source.as_ref(), &deck, config.options)
        .with_progress(console)
        .run(&board_ids)
        .await
        .context("Migration aborted")?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        ui::print_report(&report, deck.base_url());
    }

    Ok(())
}

fn deck_password(config: &MigrationConfig) -> Result<String> {
    if let Some(password) = &config.deck_password {
        return Ok(password.clone());
    }
    if config.non_interactive {
        bail!("Missing Deck password: pass --deck-password or set DECK_PASSWORD");
    }

    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Password for {} on {}", config.deck_user, config.deck_url))
        .interact()?;
    Ok(password)
}

async fn board_source(config: &MigrationConfig) -> Result<Box<dyn BoardSource>> {
    let Some(source) = &config.source else {
        bail!(ConfigError::MissingTrelloSource);
    };
    let source: Box<dyn BoardSource> = match source {
        TrelloSourceConfig::Api { key, token } => Box::new(TrelloClient::new(key, token)?),
        TrelloSourceConfig::Export { paths } => Box::new(
            ExportSource::from_files(paths)
                .await
                .context("Failed to load Trello exports")?,
        ),
    };
    Ok(source)
}

async fn select_boards(source: &dyn BoardSource, config: &MigrationConfig) -> Result<Vec<String>> {
    if !config.boards.is_empty() {
        return Ok(config.boards.clone());
    }

    let boards = source
        .list_boards()
        .await
        .context("Failed to list Trello boards")?;
    if config.non_interactive {
        return Ok(boards.into_iter().map(|b| b.id).collect());
    }

    let names: Vec<_> = boards.iter().map(|b| b.name.as_str()).collect();
    let defaults = vec![true; names.len()];
    let selected = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Boards to migrate (space to toggle, enter to confirm)")
        .items(&names)
        .defaults(&defaults)
        .interact()?;

    Ok(selected.into_iter().map(|i| boards[i].id.clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_flag() {
        let cli = Cli::try_parse_from(["trello-to-deck", "-v", "--check-only"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.args.check_only);
    }
}
