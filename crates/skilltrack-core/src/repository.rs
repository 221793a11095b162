//! Persistence seam between the store and a storage medium.
//!
//! A [`SkillRepository`] owns a single named slot holding the whole skill
//! list as UTF-8 JSON. The store only ever loads the slot once at startup and
//! rewrites it after each mutation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{CoreError, CoreResult};
use crate::model::Skill;

/// Name of the slot the skill list is stored under.
pub const STORAGE_KEY: &str = "learning_progress";

/// Load/save contract consumed by [`SkillStore`](crate::SkillStore).
pub trait SkillRepository {
    /// Read the saved list.
    ///
    /// `Ok(None)` means nothing has been saved yet. `Err` means something is
    /// stored but cannot be read; the store treats both the same way and
    /// falls back to the seed list.
    fn load(&self) -> CoreResult<Option<Vec<Skill>>>;

    /// Replace the saved list.
    fn save(&self, skills: &[Skill]) -> CoreResult<()>;
}

impl<R: SkillRepository + ?Sized> SkillRepository for Arc<R> {
    fn load(&self) -> CoreResult<Option<Vec<Skill>>> {
        (**self).load()
    }

    fn save(&self, skills: &[Skill]) -> CoreResult<()> {
        (**self).save(skills)
    }
}

impl<R: SkillRepository + ?Sized> SkillRepository for Box<R> {
    fn load(&self) -> CoreResult<Option<Vec<Skill>>> {
        (**self).load()
    }

    fn save(&self, skills: &[Skill]) -> CoreResult<()> {
        (**self).save(skills)
    }
}

/// Serialize a skill list to the persisted JSON shape.
pub fn encode_skills(skills: &[Skill]) -> CoreResult<String> {
    Ok(serde_json::to_string(skills)?)
}

/// Parse the persisted JSON shape back into a skill list.
pub fn decode_skills(raw: &str) -> CoreResult<Vec<Skill>> {
    Ok(serde_json::from_str(raw)?)
}

// ═══════════════════════════════════════════════════════════════════════
//  In-memory repository
// ═══════════════════════════════════════════════════════════════════════

/// Repository that keeps the serialized slot in memory.
///
/// Goes through the same JSON encoding as the on-disk adapters, so it is a
/// faithful stand-in for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    slot: Mutex<Option<String>>,
    saves: AtomicUsize,
}

impl MemoryRepository {
    /// An empty repository: the first load reports nothing saved.
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose slot already holds `raw`, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
            saves: AtomicUsize::new(0),
        }
    }

    /// The raw slot contents.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    /// How many successful saves have happened.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

impl SkillRepository for MemoryRepository {
    fn load(&self) -> CoreResult<Option<Vec<Skill>>> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| CoreError::Persistence(format!("mutex poisoned: {e}")))?;
        slot.as_deref().map(decode_skills).transpose()
    }

    fn save(&self, skills: &[Skill]) -> CoreResult<()> {
        let encoded = encode_skills(skills)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| CoreError::Persistence(format!("mutex poisoned: {e}")))?;
        *slot = Some(encoded);
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
