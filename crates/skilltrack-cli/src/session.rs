//! Interactive session.
//!
//! Reads one command per line until `quit` or end of input. The category
//! filter set with `filter` lasts for the session only. After every command
//! the session drains the store's change bus and reprints the progress
//! header if the list changed.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use skilltrack_core::{Category, Level, SkillStore, StoreEvent};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info};

use crate::commands::{self, Action, Flow, StatusFilter};
use crate::display::{self, Style};

/// Run the session loop over `input`, writing to `out`.
pub fn run(
    store: &mut SkillStore,
    input: impl BufRead,
    out: &mut dyn Write,
    style: Style,
) -> Result<()> {
    let mut events = store.subscribe();
    info!(skills = store.len(), "session started");

    writeln!(out)?;
    writeln!(out, "  skilltrack v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "  Type `help` for commands, `quit` to exit.")?;
    writeln!(out)?;
    writeln!(out, "{}", display::header(&store.stats(), style))?;
    prompt(out)?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;

        let flow = match parse_line(&line) {
            Ok(None) => Flow::Continue,
            Ok(Some(action)) => match commands::execute(store, action, out, style) {
                Ok(flow) => flow,
                Err(e) => {
                    debug!(error = %e, "command failed");
                    writeln!(out, "  Error: {e}")?;
                    Flow::Continue
                }
            },
            Err(e) => {
                writeln!(out, "  {e}")?;
                Flow::Continue
            }
        };

        drain_events(store, &mut events, out, style)?;
        if flow == Flow::Quit {
            break;
        }
        prompt(out)?;
    }

    info!("session closed");
    Ok(())
}

fn prompt(out: &mut dyn Write) -> Result<()> {
    write!(out, "> ")?;
    out.flush().context("failed to flush output")
}

/// Consume pending change events; reprint the header when skills changed.
fn drain_events(
    store: &SkillStore,
    events: &mut broadcast::Receiver<Arc<StoreEvent>>,
    out: &mut dyn Write,
    style: Style,
) -> Result<()> {
    let mut changed = false;
    loop {
        match events.try_recv() {
            Ok(event) => {
                debug!(?event, "store event");
                if !matches!(*event, StoreEvent::FilterChanged { .. }) {
                    changed = true;
                }
            }
            Err(TryRecvError::Lagged(skipped)) => {
                debug!(skipped, "store events dropped");
                changed = true;
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }

    if changed {
        writeln!(out, "{}", display::header(&store.stats(), style))?;
    }
    Ok(())
}

// -------------------------------------------------------------------------
// Parsing
// -------------------------------------------------------------------------

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Action>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let action = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => Action::List {
            status: parse_status(rest)?,
        },
        "filter" => Action::Filter(parse_filter(rest)?),
        "toggle" => Action::Toggle {
            id: required(rest, "toggle <id>")?,
        },
        "add" => parse_add(rest)?,
        "delete" | "rm" => Action::Delete {
            id: required(rest, "delete <id>")?,
        },
        "stats" => Action::Stats,
        "categories" => Action::Categories,
        "reset" => Action::Reset {
            confirmed: matches!(rest, "--yes" | "-y" | "yes"),
        },
        "help" | "?" => Action::Help,
        "quit" | "exit" => Action::Quit,
        other => bail!("unknown command `{other}`, try `help`"),
    };
    Ok(Some(action))
}

fn required(arg: &str, usage: &str) -> Result<String> {
    if arg.is_empty() {
        bail!("usage: {usage}");
    }
    Ok(arg.to_owned())
}

fn parse_status(arg: &str) -> Result<StatusFilter> {
    Ok(match arg.to_ascii_lowercase().as_str() {
        "" | "all" => StatusFilter::All,
        "pending" | "todo" => StatusFilter::Pending,
        "done" | "completed" => StatusFilter::Done,
        other => bail!("unknown list filter `{other}` (expected pending, done or all)"),
    })
}

fn parse_filter(arg: &str) -> Result<Option<Category>> {
    if arg.is_empty() {
        bail!("usage: filter <category|all>");
    }
    if arg.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    Ok(Some(arg.parse()?))
}

/// `add <category> <level> <name...> [-- notes...]`
fn parse_add(rest: &str) -> Result<Action> {
    let (head, notes) = match rest.split_once(" -- ") {
        Some((head, notes)) => (head, notes.trim()),
        None => (rest, ""),
    };

    let words: Vec<&str> = head.split_whitespace().collect();
    let [category, level, name @ ..] = words.as_slice() else {
        bail!("usage: add <category> <level> <name> [-- notes]");
    };
    if name.is_empty() {
        bail!("usage: add <category> <level> <name> [-- notes]");
    }

    Ok(Action::Add {
        name: name.join(" "),
        category: category.parse::<Category>()?,
        level: level.parse::<Level>()?,
        notes: notes.to_owned(),
    })
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
