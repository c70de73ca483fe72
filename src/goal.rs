//! Goals and their progress

use serde::{Deserialize, Serialize};

use crate::item::ItemId;

/// A goal, as returned by `GET /goals`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    id: Option<ItemId>,
    #[serde(default)]
    title: String,
    /// Completion percentage, from 0 to 100
    #[serde(default)]
    progress: Option<f64>,
}

impl Goal {
    pub fn new<S: ToString>(title: S, progress: Option<f64>) -> Self {
        Self { id: None, title: title.to_string(), progress }
    }

    pub fn id(&self) -> Option<&ItemId> { self.id.as_ref() }
    pub fn title(&self) -> &str         { &self.title }

    /// The progress of this goal. A missing progress counts as 0
    pub fn progress(&self) -> f64 {
        self.progress.unwrap_or(0.0)
    }
}

/// The rounded mean progress of some goals (0 when there are none)
pub fn overall_progress(goals: &[Goal]) -> u32 {
    if goals.is_empty() {
        return 0;
    }
    let sum: f64 = goals.iter().map(|g| g.progress()).sum();
    let mean = (sum / goals.len() as f64).round();
    if mean <= 0.0 { 0 } else { mean as u32 }
}
