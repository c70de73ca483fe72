//! The daily overview returned by `GET /dashboard`

use serde::{Deserialize, Serialize};

use crate::item::ItemId;
use crate::task::Task;
use crate::timestamp::Timestamp;

/// The daily overview. Every field may be missing from the API response
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub energy: Option<serde_json::Value>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub events: Vec<UpcomingEvent>,
}

/// An event, as summarized in the overview.
///
/// Unlike [`Event`](crate::Event), every field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UpcomingEvent {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    #[serde(default)]
    pub title: String,
    #[serde(default, with = "crate::utils::optional_timestamp", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Timestamp>,
    #[serde(default, with = "crate::utils::optional_timestamp", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,
}

/// Something that needs attention today
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl Alert {
    /// A birthday alert shows a name, any other alert is a deadline and shows a title
    pub fn label(&self) -> String {
        if self.kind == "birthday" {
            format!("Birthday: {}", self.name.as_deref().unwrap_or_default())
        } else {
            format!("Deadline: {}", self.title.as_deref().unwrap_or_default())
        }
    }
}

/// A daily habit and how much of it has been done today
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub done_today: f64,
    #[serde(default)]
    pub target_per_day: f64,
}

impl Habit {
    /// Percentage of today's target, capped to 100.
    /// A habit without a target is complete as soon as something has been done.
    pub fn progress_percent(&self) -> f64 {
        if self.target_per_day <= 0.0 {
            return if self.done_today > 0.0 { 100.0 } else { 0.0 };
        }
        (self.done_today / self.target_per_day * 100.0).min(100.0).max(0.0)
    }
}
