//! # skilltrack-core
//!
//! State container for a "skills to learn" checklist.
//!
//! - **[`model`]** -- [`Skill`] records with a data-only [`Category`] and
//!   point-bearing [`Level`].
//! - **[`seed`]** -- the canonical default list installed on first run.
//! - **[`store`]** -- [`SkillStore`]: ordered list, session filter, toggle /
//!   add / delete / reset, derived statistics.
//! - **[`events`]** -- [`ChangeBus`] publish/subscribe for presentation shells.
//! - **[`repository`]** -- the [`SkillRepository`] persistence seam and an
//!   in-memory implementation.
//!
//! ```rust
//! use skilltrack_core::{MemoryRepository, SkillStore};
//!
//! let mut store = SkillStore::open(MemoryRepository::new());
//! let id = store.skills()[0].id.clone();
//! store.toggle_completion(&id)?;
//! assert_eq!(store.completed_count(), 1);
//! # Ok::<(), skilltrack_core::CoreError>(())
//! ```

pub mod error;
pub mod events;
pub mod model;
pub mod repository;
pub mod seed;
pub mod stats;
pub mod store;

// ── re-exports ───────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use events::{ChangeBus, StoreEvent};
pub use model::{Category, Level, Skill, SkillId};
pub use repository::{MemoryRepository, STORAGE_KEY, SkillRepository, decode_skills, encode_skills};
pub use seed::{SEED_SIZE, default_skills};
pub use stats::{CategoryProgress, ProgressStats};
pub use store::{LoadOrigin, SkillStore};
