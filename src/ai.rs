//! Relay to the AI endpoints of the API
//!
//! The replies are opaque JSON documents. They are kept and displayed as they are.

use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::app::SessionContext;
use crate::traits::Gateway;
use crate::utils::lock;
use crate::BoxError;


/// What is asked to the AI
#[derive(Clone, Debug, PartialEq)]
pub enum AiRequest {
    /// A plan for the coming week, out of the agenda
    WeeklyPlan,
    /// A suggested order for the tasks
    Prioritize,
    /// A review of the goals, and suggestions for next week
    GoalsReview,
    /// A free-form prompt to the central assistant
    Center { prompt: String },
}

impl AiRequest {
    pub fn path(&self) -> &'static str {
        match self {
            Self::WeeklyPlan => "/ai/weekly-plan",
            Self::Prioritize => "/ai/prioritize",
            Self::GoalsReview => "/ai/goals-review",
            Self::Center{ .. } => "/ai/center",
        }
    }

    /// The request body, for a given user
    pub fn payload(&self, user_id: &str) -> Value {
        match self {
            Self::Center{ prompt } => json!({ "user_id": user_id, "prompt": prompt }),
            _ => json!({ "user_id": user_id }),
        }
    }
}

impl Display for AiRequest {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.path().trim_start_matches("/ai/"))
    }
}


/// Sends [`AiRequest`]s on behalf of the signed-in user, and keeps the last reply
pub struct AiRelay<G> {
    ctx: SessionContext<G>,
    last_result: Arc<Mutex<Option<Value>>>,
}

impl<G: Gateway> AiRelay<G> {
    pub fn new(ctx: SessionContext<G>) -> Self {
        Self { ctx, last_result: Arc::new(Mutex::new(None)) }
    }

    /// Forward a request, and return the reply as is.
    ///
    /// The reply is also kept (see [`Self::last_result`]). On failure, the previous reply is kept.
    pub async fn run(&self, request: AiRequest) -> Result<Value, BoxError> {
        let payload = request.payload(self.ctx.user_id());
        log::debug!("Asking the AI for {}", request);
        let reply = self.ctx.gateway().post(request.path(), &payload).await?;
        *lock(&self.last_result) = Some(reply.clone());
        Ok(reply)
    }

    /// The last reply, if any
    pub fn last_result(&self) -> Option<Value> {
        lock(&self.last_result).clone()
    }

    /// The last reply as pretty-printed JSON, or `placeholder` if there is none yet
    pub fn render(&self, placeholder: &str) -> String {
        render(self.last_result().as_ref(), placeholder)
    }
}

/// Pretty-print a reply, indented by 2 spaces
pub fn render(result: Option<&Value>, placeholder: &str) -> String {
    match result {
        None => placeholder.to_string(),
        Some(value) => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
    }
}


#[cfg(test)]
mod test {
    use super::*;

    use crate::local::LocalGateway;
    use crate::session::Session;

    #[test]
    fn test_payloads() {
        assert_eq!(AiRequest::WeeklyPlan.payload("u1"), json!({"user_id": "u1"}));
        assert_eq!(
            AiRequest::Center{ prompt: "Organize my week".into() }.payload("u1"),
            json!({"user_id": "u1", "prompt": "Organize my week"})
        );
        assert_eq!(AiRequest::GoalsReview.path(), "/ai/goals-review");
    }

    #[test]
    fn test_render() {
        assert_eq!(render(None, "Nothing yet"), "Nothing yet");
        assert_eq!(render(Some(&json!({"a": 1})), ""), "{\n  \"a\": 1\n}");
    }

    #[tokio::test]
    async fn test_relay() {
        let gateway = Arc::new(LocalGateway::new());
        gateway.set_reply("/ai/prioritize", json!({"suggested_order": []}));
        let session = Session { user_id: "u1".into(), name: "Demo".into(), email: "demo@user.com".into() };
        let relay = AiRelay::new(SessionContext::new(session, Arc::clone(&gateway)));

        let reply = relay.run(AiRequest::Prioritize).await.unwrap();
        assert_eq!(reply, json!({"suggested_order": []}));
        assert_eq!(relay.last_result(), Some(reply));

        // No reply registered: the error is returned, and the previous reply is kept
        assert!(relay.run(AiRequest::WeeklyPlan).await.is_err());
        assert!(relay.last_result().is_some());
        assert_eq!(gateway.history()[1].body, Some(json!({"user_id": "u1"})));
    }
}
