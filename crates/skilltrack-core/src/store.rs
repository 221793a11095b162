//! The skill checklist state container.
//!
//! [`SkillStore`] owns the canonical ordered skill list and the session's
//! category filter. Reads are plain getters; every list mutation is applied
//! in memory, written through the [`SkillRepository`], then announced on the
//! [`ChangeBus`]. The filter is session state and is never persisted.
//!
//! All operations run to completion on the caller's thread. Mutations take
//! `&mut self`, so two of them can never interleave.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::events::{ChangeBus, StoreEvent};
use crate::model::{Category, Skill, SkillId};
use crate::repository::SkillRepository;
use crate::seed;
use crate::stats::{self, CategoryProgress, ProgressStats};

/// Where the store's initial list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// A previously saved list was read back.
    Restored,
    /// Nothing usable was saved; the default seed list was installed.
    Seeded,
}

/// Ordered skill list plus session filter, backed by a repository.
pub struct SkillStore {
    skills: Vec<Skill>,
    selected_category: Option<Category>,
    origin: LoadOrigin,
    repository: Box<dyn SkillRepository>,
    bus: ChangeBus,
}

impl SkillStore {
    /// Load the saved list from `repository`, or seed and persist the
    /// default list when nothing readable is stored.
    pub fn open(repository: impl SkillRepository + 'static) -> Self {
        Self::open_with_bus(repository, ChangeBus::default())
    }

    /// Like [`SkillStore::open`], publishing changes on an existing bus.
    pub fn open_with_bus(repository: impl SkillRepository + 'static, bus: ChangeBus) -> Self {
        let repository: Box<dyn SkillRepository> = Box::new(repository);

        let loaded = match repository.load() {
            Ok(Some(skills)) => Some(skills),
            Ok(None) => {
                info!("no saved skills found, seeding defaults");
                None
            }
            Err(e) => {
                warn!(error = %e, "saved skills unreadable, seeding defaults");
                None
            }
        };

        let mut store = Self {
            skills: Vec::new(),
            selected_category: None,
            origin: LoadOrigin::Seeded,
            repository,
            bus,
        };

        match loaded {
            Some(skills) => {
                let (skills, repaired) = sanitize(skills);
                info!(count = skills.len(), "restored saved skills");
                store.skills = skills;
                store.origin = LoadOrigin::Restored;
                if repaired {
                    store.persist();
                }
            }
            None => {
                store.skills = seed::default_skills();
                store.persist();
            }
        }

        store
    }

    // ── reads ────────────────────────────────────────────────────────

    /// The full list in insertion order.
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Number of skills, ignoring the filter.
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Where the initial list came from.
    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    /// The current category filter, `None` when unfiltered.
    pub fn selected_category(&self) -> Option<Category> {
        self.selected_category
    }

    /// Look up a skill by exact identifier.
    pub fn get(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.iter().find(|s| &s.id == id)
    }

    /// Find the one skill whose identifier starts with `prefix`.
    ///
    /// An exact match always wins. An empty, unmatched or ambiguous prefix
    /// is [`CoreError::NotFound`].
    pub fn resolve_prefix(&self, prefix: &str) -> CoreResult<&Skill> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(CoreError::not_found(prefix));
        }
        if let Some(exact) = self.skills.iter().find(|s| s.id.as_str() == prefix) {
            return Ok(exact);
        }

        let mut matches = self
            .skills
            .iter()
            .filter(|s| s.id.as_str().starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(skill), None) => Ok(skill),
            (Some(_), Some(_)) => {
                debug!(prefix, "ambiguous skill id prefix");
                Err(CoreError::not_found(prefix))
            }
            _ => Err(CoreError::not_found(prefix)),
        }
    }

    /// The list narrowed to the selected category, relative order kept. With
    /// no filter this is the whole list.
    pub fn filtered_skills(&self) -> Vec<&Skill> {
        match self.selected_category {
            None => self.skills.iter().collect(),
            Some(category) => self
                .skills
                .iter()
                .filter(|s| s.category == category)
                .collect(),
        }
    }

    /// Number of completed skills.
    pub fn completed_count(&self) -> usize {
        stats::completed_count(&self.skills)
    }

    /// Sum of level points over completed skills.
    pub fn total_points(&self) -> u32 {
        stats::total_points(&self.skills)
    }

    /// `completed / total` in `[0, 1]`; exactly `0.0` when empty.
    pub fn progress_percentage(&self) -> f64 {
        stats::progress_percentage(&self.skills)
    }

    /// All headline numbers at once.
    pub fn stats(&self) -> ProgressStats {
        ProgressStats::from_skills(&self.skills)
    }

    /// Completion per non-empty category.
    pub fn category_breakdown(&self) -> Vec<CategoryProgress> {
        stats::category_breakdown(&self.skills)
    }

    /// Observe future changes.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<StoreEvent>> {
        self.bus.subscribe()
    }

    // ── mutations ────────────────────────────────────────────────────

    /// Flip a skill's completion, stamping or clearing its completion date.
    pub fn toggle_completion(&mut self, id: &SkillId) -> CoreResult<&Skill> {
        let index = self.index_of(id)?;
        self.skills[index].toggle_completion(Utc::now());
        let completed = self.skills[index].is_completed;
        debug!(skill_id = %id, completed, "skill toggled");

        self.persist();
        self.bus.publish(StoreEvent::SkillToggled {
            id: id.clone(),
            completed,
        });
        Ok(&self.skills[index])
    }

    /// Append a skill to the end of the list.
    ///
    /// Rejects a blank name and an identifier already in use. A completion
    /// date that disagrees with the completion flag is repaired first.
    pub fn add_skill(&mut self, mut skill: Skill) -> CoreResult<&Skill> {
        if skill.name.trim().is_empty() {
            return Err(CoreError::InvalidName);
        }
        if self.get(&skill.id).is_some() {
            return Err(CoreError::DuplicateId {
                id: skill.id.to_string(),
            });
        }
        skill.normalize(Utc::now());

        let id = skill.id.clone();
        debug!(skill_id = %id, name = %skill.name, "skill added");
        self.skills.push(skill);

        self.persist();
        self.bus.publish(StoreEvent::SkillAdded { id });
        Ok(&self.skills[self.skills.len() - 1])
    }

    /// Remove a skill and hand it back.
    pub fn delete_skill(&mut self, id: &SkillId) -> CoreResult<Skill> {
        let index = self.index_of(id)?;
        let removed = self.skills.remove(index);
        debug!(skill_id = %id, "skill deleted");

        self.persist();
        self.bus.publish(StoreEvent::SkillDeleted { id: id.clone() });
        Ok(removed)
    }

    /// Replace the category filter. Publishes only when the value changes.
    pub fn set_filter(&mut self, category: Option<Category>) {
        if self.selected_category == category {
            return;
        }
        self.selected_category = category;
        debug!(?category, "filter changed");
        self.bus.publish(StoreEvent::FilterChanged { category });
    }

    /// Replace the whole list with a fresh copy of the seed list. The filter
    /// is left as it was.
    pub fn reset_to_defaults(&mut self) {
        self.skills = seed::default_skills();
        let count = self.skills.len();
        info!(count, "skills reset to defaults");

        self.persist();
        self.bus.publish(StoreEvent::Reset { count });
    }

    // ── internals ────────────────────────────────────────────────────

    fn index_of(&self, id: &SkillId) -> CoreResult<usize> {
        self.skills
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| CoreError::not_found(id))
    }

    /// Write the list through. Failures are logged and dropped; the
    /// in-memory state stands.
    fn persist(&self) {
        match self.repository.save(&self.skills) {
            Ok(()) => debug!(count = self.skills.len(), "skills saved"),
            Err(e) => warn!(error = %e, count = self.skills.len(), "failed to save skills"),
        }
    }
}

impl fmt::Debug for SkillStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkillStore")
            .field("skills", &self.skills.len())
            .field("selected_category", &self.selected_category)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Drop repeated identifiers (first wins) and repair completion dates.
/// Returns the cleaned list and whether anything changed.
fn sanitize(skills: Vec<Skill>) -> (Vec<Skill>, bool) {
    let now = Utc::now();
    let mut seen = HashSet::with_capacity(skills.len());
    let mut repaired = false;
    let mut clean = Vec::with_capacity(skills.len());

    for mut skill in skills {
        if !seen.insert(skill.id.clone()) {
            warn!(skill_id = %skill.id, "dropping saved skill with duplicate id");
            repaired = true;
            continue;
        }
        repaired |= skill.normalize(now);
        clean.push(skill);
    }

    (clean, repaired)
}

// ── tests ────────────────────────────────────────────────────────────
