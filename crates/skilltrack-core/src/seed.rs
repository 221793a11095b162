//! Canonical default skill list.
//!
//! Used to initialize a fresh store and by reset-to-defaults. Every category
//! has at least one entry and the levels cover all four tiers.

use crate::model::{Category, Level, Skill};

/// Number of skills in the seed list.
pub const SEED_SIZE: usize = 25;

const SEED: [(&str, Category, Level); SEED_SIZE] = [
    // Language fundamentals
    ("Variables & Types", Category::Language, Level::Beginner),
    ("Optionals & Null Safety", Category::Language, Level::Beginner),
    ("Collections", Category::Language, Level::Beginner),
    ("Functions & Closures", Category::Language, Level::Intermediate),
    ("Generics", Category::Language, Level::Advanced),
    // UI framework
    ("Views & Layouts", Category::Ui, Level::Beginner),
    ("State Management", Category::Ui, Level::Intermediate),
    ("Lists & Navigation", Category::Ui, Level::Intermediate),
    ("Animations", Category::Ui, Level::Advanced),
    ("Custom Layouts", Category::Ui, Level::Expert),
    // Architecture
    ("MVVM Pattern", Category::Architecture, Level::Intermediate),
    ("Repository Pattern", Category::Architecture, Level::Intermediate),
    ("Clean Architecture", Category::Architecture, Level::Advanced),
    ("Modular Architecture", Category::Architecture, Level::Expert),
    // Networking
    ("HTTP Client Basics", Category::Networking, Level::Beginner),
    ("JSON Parsing", Category::Networking, Level::Beginner),
    ("Authentication (OAuth, JWT)", Category::Networking, Level::Advanced),
    ("WebSockets", Category::Networking, Level::Advanced),
    // Persistence
    ("Key-Value Storage", Category::Persistence, Level::Beginner),
    ("Local Database", Category::Persistence, Level::Intermediate),
    // Testing
    ("Unit Testing", Category::Testing, Level::Beginner),
    ("Mock Objects", Category::Testing, Level::Intermediate),
    ("UI Testing", Category::Testing, Level::Advanced),
    ("Test-Driven Development", Category::Testing, Level::Expert),
    // CI/CD
    ("Automated Builds", Category::CiCd, Level::Intermediate),
];

/// Build the default skill list. Each call assigns fresh identifiers.
pub fn default_skills() -> Vec<Skill> {
    SEED
        .iter()
        .map(|&(name, category, level)| Skill::new(name, category, level))
        .collect()
}
