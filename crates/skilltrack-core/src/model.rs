//! Skill record and its enumerations.
//!
//! The enums here are data-only: they carry the persisted tag, a display
//! name and (for [`Level`]) the point value. Colors, icons and other styling
//! belong to whichever presentation shell renders them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

// ═══════════════════════════════════════════════════════════════════════
//  Identifiers
// ═══════════════════════════════════════════════════════════════════════

/// Unique, immutable identifier of a [`Skill`].
///
/// Fresh identifiers are UUID v7 strings. Identifiers read back from storage
/// are accepted as-is, whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(String);

impl SkillId {
    /// Generate a new time-ordered identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SkillId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SkillId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SkillId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Category
// ═══════════════════════════════════════════════════════════════════════

/// Subject-matter tag used to group and filter skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Language fundamentals.
    #[serde(rename = "Language")]
    Language,
    /// UI framework.
    #[serde(rename = "UI")]
    Ui,
    /// Architecture patterns.
    #[serde(rename = "Architecture")]
    Architecture,
    /// Networking.
    #[serde(rename = "Networking")]
    Networking,
    /// Local persistence.
    #[serde(rename = "Persistence")]
    Persistence,
    /// Testing.
    #[serde(rename = "Testing")]
    Testing,
    /// Continuous integration and delivery.
    #[serde(rename = "CI/CD")]
    CiCd,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 7] = [
        Self::Language,
        Self::Ui,
        Self::Architecture,
        Self::Networking,
        Self::Persistence,
        Self::Testing,
        Self::CiCd,
    ];

    /// The tag written to storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Language => "Language",
            Self::Ui => "UI",
            Self::Architecture => "Architecture",
            Self::Networking => "Networking",
            Self::Persistence => "Persistence",
            Self::Testing => "Testing",
            Self::CiCd => "CI/CD",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Language => "Language Fundamentals",
            Self::Ui => "UI Framework",
            Self::Architecture => "Architecture",
            Self::Networking => "Networking",
            Self::Persistence => "Persistence",
            Self::Testing => "Testing",
            Self::CiCd => "CI/CD",
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Self::Language => "language",
            Self::Ui => "ui",
            Self::Architecture => "architecture",
            Self::Networking => "networking",
            Self::Persistence => "persistence",
            Self::Testing => "testing",
            Self::CiCd => "cicd",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    /// Accepts the storage tag, the display name or the lower-case variant
    /// name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| {
                s.eq_ignore_ascii_case(c.as_str())
                    || s.eq_ignore_ascii_case(c.display_name())
                    || s.eq_ignore_ascii_case(c.variant_name())
            })
            .ok_or_else(|| CoreError::UnknownTag {
                kind: "category",
                value: s.to_owned(),
            })
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Level
// ═══════════════════════════════════════════════════════════════════════

/// Difficulty tier. Each tier is worth a fixed number of points once the
/// skill is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Level {
    /// Every level, easiest first.
    pub const ALL: [Self; 4] = [
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
        Self::Expert,
    ];

    /// Points awarded when a skill at this level is completed.
    pub fn points(&self) -> u32 {
        match self {
            Self::Beginner => 10,
            Self::Intermediate => 25,
            Self::Advanced => 50,
            Self::Expert => 100,
        }
    }

    /// The tag written to storage, which doubles as the display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }

    /// Single-letter badge.
    pub fn initial(&self) -> char {
        match self {
            Self::Beginner => 'B',
            Self::Intermediate => 'I',
            Self::Advanced => 'A',
            Self::Expert => 'E',
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|l| s.eq_ignore_ascii_case(l.as_str()))
            .ok_or_else(|| CoreError::UnknownTag {
                kind: "level",
                value: s.to_owned(),
            })
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Skill
// ═══════════════════════════════════════════════════════════════════════

/// A single trackable learning item.
///
/// `completed_date` is `Some` exactly when `is_completed` is true. The store
/// restores that invariant on every record it accepts, see
/// [`Skill::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    /// Assigned at creation, never changes.
    pub id: SkillId,
    /// Free-text label.
    pub name: String,
    pub category: Category,
    pub level: Level,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub notes: String,
    /// When the skill was last marked complete, millisecond precision.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub completed_date: Option<DateTime<Utc>>,
}

impl Skill {
    /// Create an uncompleted skill with a fresh identifier and empty notes.
    pub fn new(name: impl Into<String>, category: Category, level: Level) -> Self {
        Self {
            id: SkillId::new(),
            name: name.into(),
            category,
            level,
            is_completed: false,
            notes: String::new(),
            completed_date: None,
        }
    }

    /// Replace the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<SkillId>) -> Self {
        self.id = id.into();
        self
    }

    /// Attach free-text notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Points this skill currently contributes: its level's value when
    /// completed, zero otherwise.
    pub fn points(&self) -> u32 {
        if self.is_completed {
            self.level.points()
        } else {
            0
        }
    }

    /// Flip completion. Completing stamps `now`; un-completing clears the
    /// stamp.
    pub fn toggle_completion(&mut self, now: DateTime<Utc>) {
        self.is_completed = !self.is_completed;
        self.completed_date = self.is_completed.then(|| truncate_to_millis(now));
    }

    /// Restore the completion invariant and trim the stamp to what storage
    /// can hold. Returns `true` if anything changed.
    pub fn normalize(&mut self, now: DateTime<Utc>) -> bool {
        let before = self.completed_date;
        self.completed_date = match (self.is_completed, self.completed_date) {
            (true, Some(date)) => Some(truncate_to_millis(date)),
            (true, None) => Some(truncate_to_millis(now)),
            (false, _) => None,
        };
        before != self.completed_date
    }
}

/// Drop sub-millisecond precision so timestamps survive the epoch-millis
/// encoding unchanged.
pub fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}

// ── tests ────────────────────────────────────────────────────────────
