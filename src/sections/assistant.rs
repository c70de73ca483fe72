//! The central AI assistant: a free-form prompt and its reply

use serde_json::Value;

use crate::ai::{AiRelay, AiRequest};
use crate::app::SessionContext;
use crate::traits::Gateway;
use crate::BoxError;

pub const DEFAULT_PROMPT: &str = "Organize my week";

/// Prompts that can be picked instead of typing one
pub const QUICK_SUGGESTIONS: [&str; 4] = [
    "Organize my week",
    "Create my meal plan",
    "Rethink my priorities",
    "Do the monthly review of my goals",
];

/// Shown until the assistant has replied
pub const RESULT_PLACEHOLDER: &str = "No result yet.";

pub struct AssistantSection<G> {
    relay: AiRelay<G>,
    prompt: String,
}

impl<G: Gateway> AssistantSection<G> {
    pub fn new(ctx: SessionContext<G>) -> Self {
        Self {
            relay: AiRelay::new(ctx),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt<S: ToString>(&mut self, prompt: S) {
        self.prompt = prompt.to_string();
    }

    /// Replace the prompt with one of the [`QUICK_SUGGESTIONS`]. Returns `false` if there is no such suggestion
    pub fn pick_suggestion(&mut self, index: usize) -> bool {
        match QUICK_SUGGESTIONS.get(index) {
            None => false,
            Some(s) => {
                self.set_prompt(s);
                true
            }
        }
    }

    /// Send the current prompt to the assistant
    pub async fn run(&self) -> Result<Value, BoxError> {
        self.relay.run(AiRequest::Center { prompt: self.prompt.clone() }).await
    }

    pub fn result_text(&self) -> String {
        self.relay.render(RESULT_PLACEHOLDER)
    }
}
