//! To-do tasks

use serde::{Deserialize, Serialize};
use crate::item::ItemId;
use crate::timestamp::Timestamp;

/// Default scope of the tasks created from this client
pub const DEFAULT_SCOPE: &str = "personal";
/// Default priority of the tasks created from this client
pub const DEFAULT_PRIORITY: &str = "medium";

/// A to-do task, as returned by `GET /tasks`.
///
/// Tasks nested in other documents (the dashboard, an AI suggested order) may come without an id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    id: Option<ItemId>,
    #[serde(default)]
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<String>,
    #[serde(default)]
    completed: bool,
    #[serde(default, with = "crate::utils::optional_timestamp", skip_serializing_if = "Option::is_none")]
    due_date: Option<Timestamp>,
}

impl Task {
    pub fn new<S: ToString>(id: Option<ItemId>, title: S) -> Self {
        Self {
            id,
            title: title.to_string(),
            scope: None,
            priority: None,
            completed: false,
            due_date: None,
        }
    }

    pub fn id(&self) -> Option<&ItemId>             { self.id.as_ref() }
    pub fn title(&self) -> &str                     { &self.title }
    pub fn scope(&self) -> Option<&str>             { self.scope.as_deref() }
    pub fn priority(&self) -> Option<&str>          { self.priority.as_deref() }
    pub fn completed(&self) -> bool                 { self.completed }
    pub fn due_date(&self) -> Option<&Timestamp>    { self.due_date.as_ref() }

    /// The priority, or a dash when there is none
    pub fn priority_label(&self) -> &str {
        match self.priority.as_deref() {
            Some(p) if p.is_empty() == false => p,
            _ => "—",
        }
    }
}

/// The body of a `POST /tasks` request
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewTask {
    pub user_id: String,
    pub title: String,
    pub scope: String,
    pub priority: String,
    pub completed: bool,
}

impl NewTask {
    /// A new, uncompleted task with the default scope and priority
    pub fn new(user_id: String, title: String) -> Self {
        Self {
            user_id,
            title,
            scope: DEFAULT_SCOPE.to_string(),
            priority: DEFAULT_PRIORITY.to_string(),
            completed: false,
        }
    }
}
