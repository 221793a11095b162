//! Terminal presentation for skills.
//!
//! Colors and glyphs for categories and levels live here so the core enums
//! stay data-only.

use std::io::IsTerminal;

use crossterm::style::{Attribute, Color, Stylize, style};
use skilltrack_core::{Category, CategoryProgress, Level, ProgressStats, Skill};

/// Shortest identifier prefix ever shown.
pub const MIN_ID_LEN: usize = 8;

const BAR_WIDTH: usize = 24;

// -------------------------------------------------------------------------
// Palette
// -------------------------------------------------------------------------

pub fn category_color(category: Category) -> Color {
    match category {
        Category::Language => Color::Rgb { r: 0x7F, g: 0x52, b: 0xFF },
        Category::Ui => Color::Rgb { r: 0x42, g: 0x85, b: 0xF4 },
        Category::Architecture => Color::Rgb { r: 0x34, g: 0xA8, b: 0x53 },
        Category::Networking => Color::Rgb { r: 0xEA, g: 0x43, b: 0x35 },
        Category::Persistence => Color::Rgb { r: 0xFB, g: 0xBC, b: 0x04 },
        Category::Testing => Color::Rgb { r: 0x9C, g: 0x27, b: 0xB0 },
        Category::CiCd => Color::Rgb { r: 0x00, g: 0xBC, b: 0xD4 },
    }
}

pub fn level_color(level: Level) -> Color {
    match level {
        Level::Beginner => Color::Green,
        Level::Intermediate => Color::Blue,
        Level::Advanced => Color::DarkYellow,
        Level::Expert => Color::Red,
    }
}

// -------------------------------------------------------------------------
// Style
// -------------------------------------------------------------------------

/// Whether output carries ANSI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    /// No escape sequences at all.
    pub const PLAIN: Self = Self { color: false };

    /// Color only when stdout is a terminal and neither `--no-color` nor
    /// `NO_COLOR` asks otherwise.
    pub fn detect(no_color: bool) -> Self {
        if no_color || std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal() {
            return Self::PLAIN;
        }
        Self { color: true }
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            style(text).with(color).to_string()
        } else {
            text.to_owned()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        self.attr(text, Attribute::Bold)
    }

    pub fn dim(&self, text: &str) -> String {
        self.attr(text, Attribute::Dim)
    }

    fn attr(&self, text: &str, attribute: Attribute) -> String {
        if self.color {
            style(text).attribute(attribute).to_string()
        } else {
            text.to_owned()
        }
    }
}

// -------------------------------------------------------------------------
// Identifiers
// -------------------------------------------------------------------------

/// Length of the shortest prefix that tells every identifier in `skills`
/// apart, never below [`MIN_ID_LEN`].
pub fn short_id_len(skills: &[Skill]) -> usize {
    let mut ids: Vec<&str> = skills.iter().map(|s| s.id.as_str()).collect();
    ids.sort_unstable();

    let shared = ids
        .windows(2)
        .map(|pair| common_prefix_len(pair[0], pair[1]))
        .max()
        .unwrap_or(0);
    (shared + 1).max(MIN_ID_LEN)
}

/// The first `len` bytes of `id`, or all of it when shorter.
pub fn short_id(id: &str, len: usize) -> &str {
    id.get(..len).unwrap_or(id)
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}

// -------------------------------------------------------------------------
// Rendering
// -------------------------------------------------------------------------

/// One skill as a list row, with its notes on a second line when present.
pub fn skill_row(skill: &Skill, id_len: usize, style: Style) -> String {
    let check = if skill.is_completed { "[x]" } else { "[ ]" };
    let badge = format!("({})", skill.level.initial());
    let name = if skill.is_completed {
        style.dim(&skill.name)
    } else {
        style.bold(&skill.name)
    };

    let mut row = format!(
        "  {check} {}  {} {name}\n        {} · {} · {} pts",
        style.dim(short_id(skill.id.as_str(), id_len)),
        style.paint(&badge, level_color(skill.level)),
        style.paint(skill.category.as_str(), category_color(skill.category)),
        skill.level.as_str(),
        skill.level.points(),
    );
    if !skill.notes.is_empty() {
        row.push_str("\n        ");
        row.push_str(&style.dim(&skill.notes));
    }
    row
}

/// Headline progress: percent, completed count, points and a bar.
pub fn header(stats: &ProgressStats, style: Style) -> String {
    format!(
        "  {} {}  {}/{} completed · {} pts",
        style.bold(&format!("{:>3}%", stats.percent())),
        style.paint(&progress_bar(stats.percentage), Color::Cyan),
        stats.completed,
        stats.total,
        stats.points,
    )
}

/// A fixed-width bar for a fraction in `[0, 1]`.
pub fn progress_bar(fraction: f64) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// One line per category that has skills.
pub fn breakdown(rows: &[CategoryProgress], style: Style) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let fraction = if row.total == 0 {
                0.0
            } else {
                row.completed as f64 / row.total as f64
            };
            format!(
                "  {} {:>2}/{:<2} {}",
                style.paint(
                    &format!("{:<24}", row.category.display_name()),
                    category_color(row.category)
                ),
                row.completed,
                row.total,
                progress_bar(fraction),
            )
        })
        .collect()
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(id: &str) -> Skill {
        Skill::new("Sample", Category::Testing, Level::Beginner).with_id(id)
    }

    #[test]
    fn every_category_has_a_distinct_color() {
        let colors: std::collections::HashSet<String> = Category::ALL
            .iter()
            .map(|c| format!("{:?}", category_color(*c)))
            .collect();
        assert_eq!(colors.len(), Category::ALL.len());
    }

    #[test]
    fn short_ids_never_go_below_minimum() {
        let skills = vec![skill("aaaaaaaaaaaa"), skill("bbbbbbbbbbbb")];
        assert_eq!(short_id_len(&skills), MIN_ID_LEN);
        assert_eq!(short_id_len(&[]), MIN_ID_LEN);
    }

    #[test]
    fn short_ids_grow_past_shared_prefix() {
        let skills = vec![
            skill("0192f0c1-7a11-7000-8000-000000000001"),
            skill("0192f0c1-7a11-7000-8000-000000000002"),
            skill("0192f0c1-7a12-7000-8000-000000000003"),
        ];
        let len = short_id_len(&skills);
        assert_eq!(len, 36);

        let shown: std::collections::HashSet<&str> = skills
            .iter()
            .map(|s| short_id(s.id.as_str(), len))
            .collect();
        assert_eq!(shown.len(), 3);
    }

    #[test]
    fn short_id_keeps_short_identifiers_whole() {
        assert_eq!(short_id("abc", 8), "abc");
        assert_eq!(short_id("abcdefghij", 8), "abcdefgh");
    }

    #[test]
    fn plain_row_has_no_escapes() {
        let mut s = skill("0123456789").with_notes("read the guide");
        s.toggle_completion(chrono::Utc::now());

        let row = skill_row(&s, 8, Style::PLAIN);
        assert!(!row.contains('\u{1b}'));
        assert!(row.starts_with("  [x] 01234567  (B) Sample"));
        assert!(row.contains("Testing · Beginner · 10 pts"));
        assert!(row.ends_with("read the guide"));
    }

    #[test]
    fn pending_row_without_notes_is_two_lines() {
        let row = skill_row(&skill("0123456789"), 8, Style::PLAIN);
        assert!(row.starts_with("  [ ] "));
        assert_eq!(row.lines().count(), 2);
    }

    #[test]
    fn colored_output_uses_escapes() {
        let style = Style { color: true };
        assert!(style.paint("x", Color::Red).contains('\u{1b}'));
        assert!(style.bold("x").contains('\u{1b}'));
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(1.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(0.5).matches('#').count(), BAR_WIDTH / 2);
        assert_eq!(progress_bar(7.0), progress_bar(1.0));
    }

    #[test]
    fn header_shows_floor_percent() {
        let stats = ProgressStats {
            total: 25,
            completed: 4,
            points: 110,
            percentage: 0.16,
        };
        let line = header(&stats, Style::PLAIN);
        assert!(line.contains(" 16%"));
        assert!(line.contains("4/25 completed · 110 pts"));
    }
}
