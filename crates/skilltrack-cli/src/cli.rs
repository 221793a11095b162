//! CLI argument definitions for skilltrack.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! wiring and dispatch.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use skilltrack_core::{Category, Level};

use crate::config::Backend;

/// skilltrack -- a checklist of skills to learn.
#[derive(Parser)]
#[command(
    name = "skilltrack",
    version,
    about = "Track the skills you are learning",
    long_about = "A checklist of skills to learn, grouped by category and weighted by level. \
                  Completing a skill earns its level's points."
)]
pub struct Cli {
    /// Path to a TOML config file (default: $SKILLTRACK_CONFIG or ./skilltrack.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage location, overriding config and environment.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Storage backend, overriding config and environment.
    #[arg(long, global = true, value_enum)]
    pub backend: Option<Backend>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List skills, optionally narrowed to one category.
    List {
        /// Only show this category.
        #[arg(long, short)]
        category: Option<Category>,

        /// Only show skills not yet completed.
        #[arg(long, conflicts_with = "done")]
        pending: bool,

        /// Only show completed skills.
        #[arg(long)]
        done: bool,
    },

    /// Mark a skill complete, or back to pending.
    Toggle {
        /// Skill id or a unique prefix of it.
        id: String,
    },

    /// Add a new skill.
    Add {
        /// The skill name.
        name: String,

        /// Category: language, ui, architecture, networking, persistence, testing, cicd.
        #[arg(long, short)]
        category: Category,

        /// Level: beginner, intermediate, advanced, expert.
        #[arg(long, short, default_value = "beginner")]
        level: Level,

        /// Optional free-text notes.
        #[arg(long, short, default_value = "")]
        notes: String,
    },

    /// Delete a skill.
    Delete {
        /// Skill id or a unique prefix of it.
        id: String,
    },

    /// Show progress, points and per-category completion.
    Stats,

    /// List the categories and levels.
    Categories,

    /// Replace every skill with the default list.
    Reset {
        /// Confirm discarding the current list.
        #[arg(long)]
        yes: bool,
    },

    /// Start an interactive session; the category filter lasts until exit.
    Session,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_tags() {
        let cli = Cli::try_parse_from([
            "skilltrack", "add", "Snapshot Tests", "--category", "testing", "--level", "expert",
        ])
        .unwrap();
        match cli.command {
            Commands::Add {
                name,
                category,
                level,
                notes,
            } => {
                assert_eq!(name, "Snapshot Tests");
                assert_eq!(category, Category::Testing);
                assert_eq!(level, Level::Expert);
                assert!(notes.is_empty());
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(Cli::try_parse_from(["skilltrack", "list", "--category", "cooking"]).is_err());
    }

    #[test]
    fn pending_and_done_conflict() {
        assert!(Cli::try_parse_from(["skilltrack", "list", "--pending", "--done"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["skilltrack", "stats", "--backend", "json", "--no-color"]).unwrap();
        assert_eq!(cli.backend, Some(Backend::Json));
        assert!(cli.no_color);
    }
}
