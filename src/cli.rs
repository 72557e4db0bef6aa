use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::color::Rgba;
use crate::metadata::{PKG_DESCRIPTION, PKG_NAME, PKG_VERSION};
use crate::types::Difficulty;

#[derive(Parser, Debug, Clone)]
#[command(name = PKG_NAME)]
#[command(version = PKG_VERSION)]
#[command(about = PKG_DESCRIPTION, long_about = None)]
pub struct Cli {
    /// Home directory holding the .zingo folder (defaults to the user's home)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Log what is being read and written
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Ids may be given in full or as any unique prefix. Columns may also be
/// named by title.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List workspaces
    Workspaces,
    /// Create a workspace with a starter board
    Create { title: String },
    /// Rename a workspace
    Rename { workspace: String, title: String },
    /// Delete a workspace and its board
    Delete { workspace: String },
    /// Show a workspace's board
    Board { workspace: String },
    /// Add, rename, delete or reorder columns
    #[command(subcommand)]
    Column(ColumnCommand),
    /// Add, edit, delete or move cards
    #[command(subcommand)]
    Card(CardCommand),
    /// Assign people to cards
    #[command(subcommand)]
    Person(PersonCommand),
    /// Show the current settings
    Settings,
    /// Switch between the light and dark theme
    Theme,
    /// Open an interactive editor for settings.json
    Config,
    /// Print version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ColumnCommand {
    Add {
        workspace: String,
        title: String,
    },
    Rename {
        workspace: String,
        column: String,
        title: String,
    },
    /// Delete a column and every card in it
    Delete {
        workspace: String,
        column: String,
    },
    /// Move a column to a zero-based position
    Move {
        workspace: String,
        column: String,
        index: usize,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum CardCommand {
    Add {
        workspace: String,
        column: String,
        text: String,
        #[command(flatten)]
        fields: CardFields,
    },
    Edit {
        workspace: String,
        card: String,
        /// New text
        #[arg(long)]
        text: Option<String>,
        #[command(flatten)]
        fields: CardFields,
    },
    Delete {
        workspace: String,
        card: String,
    },
    /// Move a card to another column (appended unless --index is given)
    Move {
        workspace: String,
        card: String,
        to: String,
        #[arg(long)]
        index: Option<usize>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct CardFields {
    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, value_enum)]
    pub difficulty: Option<Difficulty>,

    /// #RRGGBB or #AARRGGBB
    #[arg(long, value_parser = parse_color)]
    pub color: Option<Rgba>,

    /// YYYY-MM-DD
    #[arg(long, value_parser = parse_date, conflicts_with = "clear_deadline")]
    pub deadline: Option<NaiveDate>,

    #[arg(long)]
    pub clear_deadline: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PersonCommand {
    Add {
        workspace: String,
        card: String,
        name: String,
    },
    Remove {
        workspace: String,
        card: String,
        person: String,
    },
}

fn parse_color(raw: &str) -> Result<Rgba, String> {
    raw.parse().map_err(|e: crate::color::ParseColorError| e.to_string())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("invalid date '{raw}': {e}"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_card_add() {
        let cli = Cli::try_parse_from([
            "zingo",
            "--home",
            "/tmp/h",
            "card",
            "add",
            "01J",
            "todo",
            "Write docs",
            "--difficulty",
            "hard",
            "--color",
            "#ff7043",
            "--deadline",
            "2025-03-01",
        ])
        .unwrap();

        assert_eq!(cli.home, Some(PathBuf::from("/tmp/h")));
        let Command::Card(CardCommand::Add { text, fields, .. }) = cli.command else {
            panic!("expected card add");
        };
        assert_eq!(text, "Write docs");
        assert_eq!(fields.difficulty, Some(Difficulty::Hard));
        assert_eq!(fields.color, Some(Rgba(0xFFFF7043)));
        assert_eq!(fields.deadline, NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["zingo", "card", "add", "w", "c", "t", "--deadline", "03/01/2025"]).is_err());
        assert!(Cli::try_parse_from(["zingo", "card", "add", "w", "c", "t", "--color", "red"]).is_err());
        assert!(Cli::try_parse_from(["zingo", "card", "add", "w", "c", "t", "--difficulty", "extreme"]).is_err());
        assert!(
            Cli::try_parse_from([
                "zingo",
                "card",
                "edit",
                "w",
                "c",
                "--deadline",
                "2025-01-01",
                "--clear-deadline"
            ])
            .is_err()
        );
    }
}
