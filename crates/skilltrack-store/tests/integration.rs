//! Integration tests for the skilltrack-store crate.
//!
//! These run the core store on top of each on-disk adapter (via tempfile)
//! and check that a second session sees exactly what the first one left.

use skilltrack_core::{
    Category, Level, LoadOrigin, SEED_SIZE, Skill, SkillRepository, SkillStore,
};
use skilltrack_store::{Database, JsonFileRepository, KeyValueStore, SqliteSkillRepository};

fn sample_list() -> Vec<Skill> {
    let mut done = Skill::new("Dependency Injection", Category::Architecture, Level::Advanced)
        .with_notes("constructor injection first");
    done.toggle_completion(chrono::Utc::now());

    vec![
        Skill::new("Pagination", Category::Networking, Level::Intermediate),
        done,
        Skill::new("Release Pipelines", Category::CiCd, Level::Expert).with_notes(""),
    ]
}

// ═══════════════════════════════════════════════════════════════════════
//  Round-trips
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn sqlite_round_trip_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    let repo = SqliteSkillRepository::open(dir.path().join("skills.db")).unwrap();

    let list = sample_list();
    repo.save(&list).unwrap();
    assert_eq!(repo.load().unwrap(), Some(list));
}

#[test]
fn json_round_trip_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::new(dir.path().join("skills.json"));

    let list = sample_list();
    repo.save(&list).unwrap();
    assert_eq!(repo.load().unwrap(), Some(list));
}

#[test]
fn sqlite_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skills.db");

    let list = sample_list();
    SqliteSkillRepository::open(&path).unwrap().save(&list).unwrap();

    let reopened = SqliteSkillRepository::open(&path).unwrap();
    assert_eq!(reopened.load().unwrap(), Some(list));
}

// ═══════════════════════════════════════════════════════════════════════
//  Store sessions on disk
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn store_sessions_over_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skilltrack.db");

    let (toggled, added) = {
        let mut store = SkillStore::open(SqliteSkillRepository::open(&path).unwrap());
        assert_eq!(store.origin(), LoadOrigin::Seeded);

        let toggled = store.skills()[0].id.clone();
        store.toggle_completion(&toggled).unwrap();
        let added = store
            .add_skill(Skill::new("Offline Sync", Category::Persistence, Level::Expert))
            .unwrap()
            .id
            .clone();
        (toggled, added)
    };

    let store = SkillStore::open(SqliteSkillRepository::open(&path).unwrap());
    assert_eq!(store.origin(), LoadOrigin::Restored);
    assert_eq!(store.len(), SEED_SIZE + 1);
    assert!(store.get(&toggled).unwrap().is_completed);
    assert_eq!(store.skills().last().unwrap().id, added);
}

#[test]
fn store_sessions_over_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skills.json");

    let deleted = {
        let mut store = SkillStore::open(JsonFileRepository::new(&path));
        let id = store.skills()[1].id.clone();
        store.delete_skill(&id).unwrap();
        id
    };

    let store = SkillStore::open(JsonFileRepository::new(&path));
    assert_eq!(store.len(), SEED_SIZE - 1);
    assert!(store.get(&deleted).is_none());
}

#[test]
fn corrupt_sqlite_slot_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skilltrack.db");

    let db = Database::open_and_migrate(&path).unwrap();
    KeyValueStore::new(db.clone())
        .set(skilltrack_core::STORAGE_KEY, "definitely not json")
        .unwrap();

    let store = SkillStore::open(SqliteSkillRepository::new(db));
    assert_eq!(store.origin(), LoadOrigin::Seeded);
    assert_eq!(store.len(), SEED_SIZE);

    // The seed list replaced the corrupt slot.
    let reopened = SqliteSkillRepository::open(&path).unwrap();
    assert_eq!(reopened.load().unwrap().unwrap().len(), SEED_SIZE);
}

#[test]
fn corrupt_json_file_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skills.json");
    std::fs::write(&path, "[{\"id\": 42}]").unwrap();

    let store = SkillStore::open(JsonFileRepository::new(&path));
    assert_eq!(store.origin(), LoadOrigin::Seeded);
}

#[test]
fn unwritable_json_path_keeps_session_working() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be makes every write fail.
    let path = dir.path().join("blocked");
    std::fs::create_dir(&path).unwrap();
    std::fs::create_dir(path.with_extension("json.tmp")).unwrap();

    let mut store = SkillStore::open(JsonFileRepository::new(&path));
    let id = store.skills()[0].id.clone();
    store.toggle_completion(&id).unwrap();
    assert_eq!(store.completed_count(), 1);
}
