use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Points granted for completing an article module (and taken back when
/// it is marked incomplete again).
pub const POINTS_PER_ARTICLE: f64 = 25.0;

/// A user's progress through the educational modules: completion
/// percentage per module name, plus the points earned so far.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LearningProgress {
    pub progress: BTreeMap<String, f64>,
    pub points: f64,
}
