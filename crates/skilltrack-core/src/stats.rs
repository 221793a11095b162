//! Derived, read-only statistics over a skill list.

use serde::Serialize;

use crate::model::{Category, Skill};

/// Snapshot of overall progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressStats {
    /// Number of skills in the list.
    pub total: usize,
    /// Number of completed skills.
    pub completed: usize,
    /// Sum of level points over completed skills.
    pub points: u32,
    /// `completed / total`, in `[0, 1]`; exactly `0.0` for an empty list.
    pub percentage: f64,
}

impl ProgressStats {
    /// Compute statistics for `skills`.
    pub fn from_skills(skills: &[Skill]) -> Self {
        let total = skills.len();
        let completed = completed_count(skills);
        Self {
            total,
            completed,
            points: total_points(skills),
            percentage: ratio(completed, total),
        }
    }

    /// Whole-number percentage, rounded down. Integer arithmetic on the
    /// counts, so 29 of 100 is 29.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.completed * 100 / self.total) as u32
    }
}

/// Completion of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryProgress {
    pub category: Category,
    pub completed: usize,
    pub total: usize,
}

/// Number of completed skills.
pub fn completed_count(skills: &[Skill]) -> usize {
    skills.iter().filter(|s| s.is_completed).count()
}

/// Sum of level points over completed skills only.
pub fn total_points(skills: &[Skill]) -> u32 {
    skills.iter().map(Skill::points).sum()
}

/// Fraction of completed skills; `0.0` when the list is empty.
pub fn progress_percentage(skills: &[Skill]) -> f64 {
    ratio(completed_count(skills), skills.len())
}

/// Per-category completion in [`Category::ALL`] order. Categories with no
/// skills are left out.
pub fn category_breakdown(skills: &[Skill]) -> Vec<CategoryProgress> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let (completed, total) = skills
                .iter()
                .filter(|s| s.category == category)
                .fold((0, 0), |(done, all), s| {
                    (done + usize::from(s.is_completed), all + 1)
                });
            (total > 0).then_some(CategoryProgress {
                category,
                completed,
                total,
            })
        })
        .collect()
}

fn ratio(completed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::Level;

    fn completed(name: &str, category: Category, level: Level) -> Skill {
        let mut skill = Skill::new(name, category, level);
        skill.toggle_completion(Utc::now());
        skill
    }

    #[test]
    fn empty_list_is_zero_everywhere() {
        let stats = ProgressStats::from_skills(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.points, 0);
        assert_eq!(stats.percentage, 0.0);
        assert_eq!(stats.percent(), 0);
        assert!(category_breakdown(&[]).is_empty());
    }

    #[test]
    fn points_count_only_completed_skills() {
        let skills = vec![
            completed("a", Category::Language, Level::Beginner),
            completed("b", Category::Ui, Level::Expert),
            Skill::new("c", Category::Ui, Level::Advanced),
        ];
        assert_eq!(total_points(&skills), 110);
        assert_eq!(completed_count(&skills), 2);
    }

    #[test]
    fn percent_rounds_down() {
        let skills = vec![
            completed("a", Category::Testing, Level::Beginner),
            Skill::new("b", Category::Testing, Level::Beginner),
            Skill::new("c", Category::Testing, Level::Beginner),
        ];
        let stats = ProgressStats::from_skills(&skills);
        assert!((stats.percentage - 1.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(stats.percent(), 33);
    }

    #[test]
    fn percent_is_exact_where_float_math_is_not() {
        let stats = ProgressStats {
            total: 100,
            completed: 29,
            points: 0,
            percentage: 0.29,
        };
        assert_eq!(stats.percent(), 29);
    }

    #[test]
    fn breakdown_follows_category_order_and_skips_empty() {
        let skills = vec![
            Skill::new("t", Category::Testing, Level::Beginner),
            completed("l", Category::Language, Level::Beginner),
            Skill::new("l2", Category::Language, Level::Beginner),
        ];
        let breakdown = category_breakdown(&skills);
        assert_eq!(
            breakdown,
            vec![
                CategoryProgress {
                    category: Category::Language,
                    completed: 1,
                    total: 2,
                },
                CategoryProgress {
                    category: Category::Testing,
                    completed: 0,
                    total: 1,
                },
            ]
        );
    }
}
