//! [`SkillRepository`] implementations over real storage.
//!
//! Both adapters keep the whole skill list as one JSON document in a single
//! named slot: a `kv_store` row for SQLite, a file for the JSON backend.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use skilltrack_core::{CoreResult, STORAGE_KEY, Skill, SkillRepository, decode_skills, encode_skills};
use tracing::{debug, instrument};

use crate::db::Database;
use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;

// ═══════════════════════════════════════════════════════════════════════
//  SQLite
// ═══════════════════════════════════════════════════════════════════════

/// Skill list stored under one key of the SQLite key-value table.
#[derive(Debug, Clone)]
pub struct SqliteSkillRepository {
    kv: KeyValueStore,
    key: String,
}

impl SqliteSkillRepository {
    /// Use the default slot, [`STORAGE_KEY`].
    pub fn new(db: Database) -> Self {
        Self::with_key(db, STORAGE_KEY)
    }

    /// Use a custom slot name.
    pub fn with_key(db: Database, key: impl Into<String>) -> Self {
        Self {
            kv: KeyValueStore::new(db),
            key: key.into(),
        }
    }

    /// Open (and migrate) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(Database::open_and_migrate(path)?))
    }

    /// The slot name in use.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl SkillRepository for SqliteSkillRepository {
    #[instrument(skip(self), fields(key = %self.key))]
    fn load(&self) -> CoreResult<Option<Vec<Skill>>> {
        let Some(raw) = self.kv.get(&self.key)? else {
            debug!("slot empty");
            return Ok(None);
        };
        decode_skills(&raw).map(Some)
    }

    #[instrument(skip(self, skills), fields(key = %self.key, count = skills.len()))]
    fn save(&self, skills: &[Skill]) -> CoreResult<()> {
        let encoded = encode_skills(skills)?;
        self.kv.set(&self.key, &encoded)?;
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  JSON file
// ═══════════════════════════════════════════════════════════════════════

/// Skill list stored as one UTF-8 JSON file.
///
/// Writes go to a sibling temp file that is then renamed over the target,
/// so a failed write leaves the previous list intact.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file backing this repository.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw(&self) -> StoreResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_raw(&self, raw: &str) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path).map_err(StoreError::from)
    }
}

impl SkillRepository for JsonFileRepository {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> CoreResult<Option<Vec<Skill>>> {
        let Some(raw) = self.read_raw()? else {
            debug!("file missing");
            return Ok(None);
        };
        decode_skills(&raw).map(Some)
    }

    #[instrument(skip(self, skills), fields(path = %self.path.display(), count = skills.len()))]
    fn save(&self, skills: &[Skill]) -> CoreResult<()> {
        let encoded = encode_skills(skills)?;
        self.write_raw(&encoded)?;
        Ok(())
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use skilltrack_core::{Category, CoreError, Level};

    use super::*;

    fn sqlite_repo() -> SqliteSkillRepository {
        let db = Database::open_in_memory().unwrap();
        db.run_migrations().unwrap();
        SqliteSkillRepository::new(db)
    }

    #[test]
    fn sqlite_empty_slot_loads_none() {
        assert!(sqlite_repo().load().unwrap().is_none());
    }

    #[test]
    fn sqlite_uses_learning_progress_key() {
        let repo = sqlite_repo();
        repo.save(&[Skill::new("Intents", Category::Ui, Level::Beginner)])
            .unwrap();

        assert_eq!(repo.key(), "learning_progress");
        let raw = repo.kv.get("learning_progress").unwrap().unwrap();
        assert!(raw.contains("\"isCompleted\":false"));
    }

    #[test]
    fn sqlite_corrupt_slot_is_json_error() {
        let repo = sqlite_repo();
        repo.kv.set(STORAGE_KEY, "[{]").unwrap();
        assert!(matches!(repo.load(), Err(CoreError::Json(_))));
    }

    #[test]
    fn custom_keys_are_independent() {
        let db = Database::open_in_memory().unwrap();
        db.run_migrations().unwrap();
        let a = SqliteSkillRepository::with_key(db.clone(), "a");
        let b = SqliteSkillRepository::with_key(db, "b");

        a.save(&[Skill::new("Only in a", Category::Testing, Level::Expert)])
            .unwrap();
        assert!(b.load().unwrap().is_none());
        assert_eq!(a.load().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn sqlite_without_migrations_reports_persistence_error() {
        let repo = SqliteSkillRepository::new(Database::open_in_memory().unwrap());
        assert!(matches!(repo.save(&[]), Err(CoreError::Persistence(_))));
    }

    #[test]
    fn json_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("skills.json"));
        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn json_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("data").join("skills.json"));

        repo.save(&[]).unwrap();

        assert!(repo.path().exists());
        assert!(!repo.path().with_extension("json.tmp").exists());
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), "[]");
    }
}
