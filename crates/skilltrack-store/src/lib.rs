//! # skilltrack-store
//!
//! Persistence adapters for the skilltrack state container.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  SkillRepository (skilltrack-core)           │
//! ├──────────────────────┬───────────────────────┤
//! │ SqliteSkillRepository│  JsonFileRepository   │
//! │  KeyValueStore       │  (one UTF-8 file)     │
//! │  Database (rusqlite) │                       │
//! │  Migrations          │                       │
//! └──────────────────────┴───────────────────────┘
//! ```
//!
//! ```ignore
//! use skilltrack_core::SkillStore;
//! use skilltrack_store::SqliteSkillRepository;
//!
//! let repo = SqliteSkillRepository::open("data/skilltrack.db")?;
//! let store = SkillStore::open(repo);
//! ```

pub mod db;
pub mod error;
pub mod kv;
pub mod migration;
pub mod repository;

// ── re-exports ───────────────────────────────────────────────────────

pub use db::Database;
pub use error::{StoreError, StoreResult};
pub use kv::KeyValueStore;
pub use repository::{JsonFileRepository, SqliteSkillRepository};
