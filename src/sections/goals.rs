//! Goals, and their weekly AI review

use serde_json::Value;

use crate::ai::{AiRelay, AiRequest};
use crate::app::SessionContext;
use crate::goal::{self, Goal};
use crate::resource::ResourceKind;
use crate::section::{ResourceList, ResourceView};
use crate::traits::Gateway;
use crate::BoxError;

/// Shown until a review has been asked for
pub const REVIEW_PLACEHOLDER: &str = "Click \"AI review\" to get recommendations.";

pub struct GoalsSection<G> {
    goals: ResourceList<Goal, G>,
    relay: AiRelay<G>,
}

impl<G: Gateway + 'static> GoalsSection<G> {
    pub fn new(ctx: SessionContext<G>) -> Self {
        Self {
            goals: ResourceView::new(ctx.clone(), ResourceKind::Goals),
            relay: AiRelay::new(ctx),
        }
    }

    pub fn view(&self) -> &ResourceList<Goal, G> {
        &self.goals
    }

    pub async fn load(&self) {
        self.goals.load().await
    }

    pub fn goals(&self) -> Vec<Goal> {
        self.goals.items()
    }

    /// The mean progress of the goals, rounded to an integer percentage
    pub fn overall_progress(&self) -> u32 {
        self.goals.with_data(|goals| goal::overall_progress(goals.map(|g| g.as_slice()).unwrap_or(&[])))
    }

    /// Ask the AI for a review of the goals
    pub async fn review(&self) -> Result<Value, BoxError> {
        self.relay.run(AiRequest::GoalsReview).await
    }

    pub fn review_text(&self) -> String {
        self.relay.render(REVIEW_PLACEHOLDER)
    }
}
