//! UI helpers for the migration CLI.
//!
//! Provides consistent formatting for console output during a migration.

use colored::Colorize;

use crate::migrate::MigrationReport;

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", "═".repeat(60).bright_black());
    println!("{}", title.cyan().bold());
    println!("{}", "═".repeat(60).bright_black());
    println!();
}

/// Print a progress step with step number.
pub fn print_progress_step(current: u8, total: u8, message: &str) {
    println!(
        "{} {} {}",
        format!("[{current}/{total}]").bright_black(),
        "▶".cyan(),
        message.bold()
    );
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message.yellow());
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

/// Print the per-board summary of a migration.
pub fn print_report(report: &MigrationReport, deck_url: &str) {
    print_section("Migration summary");

    for board in &report.boards {
        println!(
            "{} {} {}",
            "📋".bold(),
            board.title.cyan().bold(),
            format!("{deck_url}/index.php/apps/deck/#/board/{}", board.deck_id).bright_black()
        );
        println!(
            "   {} labels, {} stacks, {} cards ({} archived), {} comments, {} attachments",
            board.labels,
            board.stacks,
            board.cards,
            board.archived,
            board.comments,
            board.attachments
        );
        if board.skipped_attachments > 0 {
            print_warning(&format!(
                "{} uploaded attachments could not be fetched from the source",
                board.skipped_attachments
            ));
        }
    }

    println!();
    print_success(&format!(
        "Migrated {} boards with {} cards",
        report.boards.len(),
        report.total(|b| b.cards)
    ));
}
