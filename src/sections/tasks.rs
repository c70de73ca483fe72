//! The to-do list

use serde_json::Value;

use crate::ai::{AiRelay, AiRequest};
use crate::app::SessionContext;
use crate::resource::ResourceKind;
use crate::section::{required, ResourceList, ResourceView, Submission};
use crate::task::{NewTask, Task};
use crate::traits::Gateway;
use crate::BoxError;

/// How many priorities are suggested for the day
pub const TOP_PRIORITIES_COUNT: usize = 3;
/// The priorities shown until the AI has suggested some
pub const FALLBACK_PRIORITIES: [&str; TOP_PRIORITIES_COUNT] = [
    "Finish the proposal",
    "Prepare the meeting",
    "45 min workout",
];

pub struct TasksSection<G> {
    tasks: ResourceList<Task, G>,
    relay: AiRelay<G>,
}

impl<G: Gateway + 'static> TasksSection<G> {
    pub fn new(ctx: SessionContext<G>) -> Self {
        Self {
            tasks: ResourceView::new(ctx.clone(), ResourceKind::Tasks),
            relay: AiRelay::new(ctx),
        }
    }

    pub fn view(&self) -> &ResourceList<Task, G> {
        &self.tasks
    }

    pub async fn load(&self) {
        self.tasks.load().await
    }

    /// The tasks, as they have been loaded
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.items()
    }

    /// Add a personal, medium-priority task, then reload the tasks. A blank title is skipped
    pub async fn add_task(&self, title: &str) -> Result<Submission, BoxError> {
        let title = match required(title) {
            None => return Ok(Submission::Skipped),
            Some(t) => t,
        };
        let body = NewTask::new(self.tasks.ctx().user_id().to_string(), title.to_string());
        self.tasks.create(&body).await?;
        Ok(Submission::Saved)
    }

    /// Ask the AI for a suggested order of the tasks
    pub async fn prioritize(&self) -> Result<Value, BoxError> {
        self.relay.run(AiRequest::Prioritize).await
    }

    /// The order suggested by the AI, if it has suggested one
    pub fn suggested_order(&self) -> Option<Vec<Task>> {
        let result = self.relay.last_result()?;
        let order = result.get("suggested_order")?;
        match serde_json::from_value(order.clone()) {
            Ok(tasks) => Some(tasks),
            Err(err) => {
                log::debug!("Ignoring a suggested order that is not a list of tasks: {}", err);
                None
            }
        }
    }

    /// The tasks in the order they should be displayed: the AI order when there is one, the loaded order otherwise
    pub fn display_order(&self) -> Vec<Task> {
        self.suggested_order().unwrap_or_else(|| self.tasks())
    }

    /// The titles of the top priorities of the day
    pub fn top_priorities(&self) -> Vec<String> {
        match self.suggested_order() {
            Some(order) => order.iter()
                .take(TOP_PRIORITIES_COUNT)
                .map(|t| t.title().to_string())
                .collect(),
            None => FALLBACK_PRIORITIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;
    use serde_json::json;

    use crate::local::LocalGateway;
    use crate::session::Session;

    fn section(gateway: &Arc<LocalGateway>) -> TasksSection<LocalGateway> {
        let session = Session { user_id: "u1".into(), name: "Demo".into(), email: "demo@user.com".into() };
        TasksSection::new(SessionContext::new(session, Arc::clone(gateway)))
    }

    #[tokio::test]
    async fn add_task() {
        let gateway = Arc::new(LocalGateway::new());
        let tasks = section(&gateway);

        assert_eq!(tasks.add_task("   ").await.unwrap(), Submission::Skipped);
        assert!(gateway.history().is_empty());

        assert_eq!(tasks.add_task(" Call the bank ").await.unwrap(), Submission::Saved);
        assert_eq!(gateway.history()[0].body, Some(json!({
            "user_id": "u1",
            "title": "Call the bank",
            "scope": "personal",
            "priority": "medium",
            "completed": false,
        })));
        assert_eq!(tasks.tasks()[0].title(), "Call the bank");
        assert_eq!(tasks.tasks()[0].priority_label(), "medium");
    }

    #[tokio::test]
    async fn ai_order_overrides_the_loaded_order() {
        let gateway = Arc::new(LocalGateway::new());
        gateway.insert_item("/tasks", json!({"title": "A"})).unwrap();
        gateway.insert_item("/tasks", json!({"title": "B"})).unwrap();
        let tasks = section(&gateway);
        tasks.load().await;

        let titles = |list: Vec<Task>| list.iter().map(|t| t.title().to_string()).collect::<Vec<_>>();
        assert_eq!(titles(tasks.display_order()), vec!["A", "B"]);
        assert_eq!(tasks.top_priorities(), FALLBACK_PRIORITIES.to_vec());

        gateway.set_reply("/ai/prioritize", json!({"suggested_order": [
            {"title": "B"}, {"title": "A"}, {"title": "C"}, {"title": "D"},
        ]}));
        tasks.prioritize().await.unwrap();
        assert_eq!(titles(tasks.display_order()), vec!["B", "A", "C", "D"]);
        assert_eq!(tasks.top_priorities(), vec!["B", "A", "C"]);
    }

    #[tokio::test]
    async fn reply_without_order() {
        let gateway = Arc::new(LocalGateway::new());
        gateway.insert_item("/tasks", json!({"title": "A"})).unwrap();
        gateway.set_reply("/ai/prioritize", json!({"advice": "Rest"}));
        let tasks = section(&gateway);
        tasks.load().await;
        tasks.prioritize().await.unwrap();

        assert!(tasks.suggested_order().is_none());
        assert_eq!(tasks.display_order().len(), 1);
        assert_eq!(tasks.top_priorities().len(), TOP_PRIORITIES_COUNT);
    }
}
