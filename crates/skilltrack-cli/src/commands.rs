//! Command execution shared by one-shot subcommands and the session.

use std::io::Write;

use anyhow::{Context, Result};
use skilltrack_core::{Category, Level, Skill, SkillStore};
use tracing::info;

use crate::display::{self, Style};

/// Which completion states `list` shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Done,
}

impl StatusFilter {
    fn accepts(self, skill: &Skill) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !skill.is_completed,
            Self::Done => skill.is_completed,
        }
    }
}

/// A user request against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show the filtered list.
    List { status: StatusFilter },
    /// Change the category filter; `None` clears it.
    Filter(Option<Category>),
    /// Flip completion of the skill matching an id prefix.
    Toggle { id: String },
    Add {
        name: String,
        category: Category,
        level: Level,
        notes: String,
    },
    Delete { id: String },
    Stats,
    Categories,
    /// Restore the default list. Does nothing unless confirmed.
    Reset { confirmed: bool },
    Help,
    Quit,
}

/// Whether the caller should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply `action` to `store`, writing human-readable output to `out`.
///
/// Lookup and validation failures come back as errors and leave the store
/// unchanged.
pub fn execute(
    store: &mut SkillStore,
    action: Action,
    out: &mut dyn Write,
    style: Style,
) -> Result<Flow> {
    match action {
        Action::List { status } => list(store, status, out, style)?,

        Action::Filter(category) => {
            store.set_filter(category);
            match category {
                Some(category) => writeln!(out, "  Showing {}", category.display_name())?,
                None => writeln!(out, "  Showing all categories")?,
            }
        }

        Action::Toggle { id } => {
            let id = store.resolve_prefix(&id)?.id.clone();
            let skill = store.toggle_completion(&id)?;
            if skill.is_completed {
                writeln!(
                    out,
                    "  [x] Completed {} (+{} pts)",
                    style.bold(&skill.name),
                    skill.level.points()
                )?;
            } else {
                writeln!(out, "  [ ] Reopened {}", style.bold(&skill.name))?;
            }
        }

        Action::Add {
            name,
            category,
            level,
            notes,
        } => {
            let skill = store.add_skill(Skill::new(name, category, level).with_notes(notes))?;
            writeln!(out, "  Added {} ({})", style.bold(&skill.name), skill.id)?;
        }

        Action::Delete { id } => {
            let id = store.resolve_prefix(&id)?.id.clone();
            let removed = store.delete_skill(&id)?;
            writeln!(out, "  Deleted {}", style.bold(&removed.name))?;
        }

        Action::Stats => {
            writeln!(out, "{}", display::header(&store.stats(), style))?;
            writeln!(out)?;
            for line in display::breakdown(&store.category_breakdown(), style) {
                writeln!(out, "{line}")?;
            }
        }

        Action::Categories => categories(store, out, style)?,

        Action::Reset { confirmed } => {
            if confirmed {
                store.reset_to_defaults();
                writeln!(out, "  Restored {} default skills", store.len())?;
            } else {
                writeln!(
                    out,
                    "  Reset replaces every skill with the defaults. Confirm with `reset --yes`."
                )?;
            }
        }

        Action::Help => writeln!(out, "{HELP}")?,

        Action::Quit => {
            info!("session ended by user");
            return Ok(Flow::Quit);
        }
    }
    Ok(Flow::Continue)
}

fn list(store: &SkillStore, status: StatusFilter, out: &mut dyn Write, style: Style) -> Result<()> {
    writeln!(out, "{}", display::header(&store.stats(), style))?;
    if let Some(category) = store.selected_category() {
        writeln!(out, "  Filter: {}", category.display_name())?;
    }
    writeln!(out)?;

    let id_len = display::short_id_len(store.skills());
    let rows: Vec<&Skill> = store
        .filtered_skills()
        .into_iter()
        .filter(|s| status.accepts(s))
        .collect();

    if rows.is_empty() {
        writeln!(out, "  No skills to show.")?;
    }
    for skill in rows {
        writeln!(out, "{}", display::skill_row(skill, id_len, style))?;
    }
    Ok(())
}

fn categories(store: &SkillStore, out: &mut dyn Write, style: Style) -> Result<()> {
    writeln!(out, "  Categories")?;
    for category in Category::ALL {
        let count = store
            .skills()
            .iter()
            .filter(|s| s.category == category)
            .count();
        writeln!(
            out,
            "    {:<14} {} {count:>3} skills",
            category.as_str(),
            style.paint(
                &format!("{:<24}", category.display_name()),
                display::category_color(category)
            ),
        )?;
    }

    writeln!(out)?;
    writeln!(out, "  Levels")?;
    for level in Level::ALL {
        writeln!(
            out,
            "    {} {:<14} {:>3} pts",
            style.paint(&format!("({})", level.initial()), display::level_color(level)),
            level.as_str(),
            level.points(),
        )?;
    }
    out.flush().context("failed to flush output")
}

const HELP: &str = "\
  Commands:
    list [pending|done]                  Show skills in the current filter
    filter <category|all>                Narrow the list to one category
    toggle <id>                          Mark complete, or back to pending
    add <category> <level> <name> [-- notes]
                                         Add a skill
    delete <id>                          Remove a skill
    stats                                Progress and per-category completion
    categories                           Categories and level points
    reset --yes                          Replace every skill with the defaults
    help                                 Show this help
    quit                                 Leave the session

  <id> is any unique prefix of a skill id.";

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
