use crate::models::{LearningProgress, POINTS_PER_ARTICLE};

/// Score a submitted quiz as a percentage of exactly-matching answers.
pub fn grade_quiz(selected: &[String], key: &[String]) -> f64 {
    if key.is_empty() {
        return 0.0;
    }
    let correct = selected.iter().zip(key).filter(|(s, k)| s == k).count();
    correct as f64 / key.len() as f64 * 100.0
}

/// Record a quiz result for a module. Points are awarded only on the
/// first attempt (a module with any existing progress entry earns
/// nothing more); the stored percentage is always overwritten.
pub fn record_quiz(mut learning: LearningProgress, module: &str, pct: f64) -> LearningProgress {
    let first_attempt = !learning.progress.contains_key(module);
    learning.progress.insert(module.to_string(), pct);
    if first_attempt {
        learning.points += pct;
    }
    learning
}

/// Toggle an article module between complete (100) and not started (0),
/// granting or revoking its points along with it.
pub fn toggle_article(mut learning: LearningProgress, module: &str) -> LearningProgress {
    if learning.progress.get(module) == Some(&100.0) {
        learning.progress.insert(module.to_string(), 0.0);
        learning.points -= POINTS_PER_ARTICLE;
    } else {
        learning.progress.insert(module.to_string(), 100.0);
        learning.points += POINTS_PER_ARTICLE;
    }
    learning
}

/// Average completion of a section, given the names of the modules it
/// contains. Modules with no progress entry count as zero.
pub fn section_progress(learning: &LearningProgress, modules: &[String]) -> f64 {
    if modules.is_empty() {
        return 0.0;
    }
    let total: f64 = modules
        .iter()
        .filter_map(|module| learning.progress.get(module))
        .sum();
    total / modules.len() as f64
}
