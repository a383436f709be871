//! Conversation orchestration: wires session state, image handling, and the
//! agent client together.
//!
//! The orchestrator owns nothing mutable itself; the agent handle is injected at
//! construction and the session is passed into each operation, so one
//! orchestrator can serve any number of sessions.

use crate::agent::IngredientAgent;
use crate::error::{LabelwiseError, Result};
use crate::imaging::{ImageData, TempImage};
use crate::prompts::compose_question_prompt;
use crate::session::Session;
use std::sync::Arc;
use tracing::{info, warn};

pub struct Orchestrator {
    agent: Arc<IngredientAgent>,
}

impl Orchestrator {
    pub fn new(agent: Arc<IngredientAgent>) -> Self {
        Self { agent }
    }

    /// Run ingredient analysis for the session's selected source.
    ///
    /// Returns `Ok(None)` when the state machine suppresses the call (nothing
    /// selected, analysis in flight, or an already-analyzed bundled example).
    /// Upload and capture buffers are written to a temp file that is deleted
    /// before this method returns, on success and on failure alike. On failure
    /// the session phase rolls back and the previously extracted ingredients
    /// are left untouched.
    pub async fn analyze(
        &self,
        session: &mut Session,
        source: &ImageData,
    ) -> Result<Option<String>> {
        if !session.begin_analysis() {
            info!("Analysis request suppressed by session state");
            return Ok(None);
        }

        let result = match source {
            ImageData::Path(path) => self.agent.analyze_image(path).await,
            ImageData::Bytes(bytes) => match TempImage::persist(bytes) {
                // Temp file lives exactly as long as the agent call
                Ok(temp) => self.agent.analyze_image(temp.path()).await,
                Err(e) => Err(e),
            },
        };

        match result {
            Ok(ingredients) => {
                session.complete_analysis(ingredients.clone());
                Ok(Some(ingredients))
            }
            Err(e) => {
                warn!(error = %e, "Analysis failed");
                session.fail_analysis();
                Err(e)
            }
        }
    }

    /// Answer a follow-up question, grounding it in the session's current
    /// extracted ingredients when available. Never mutates the session.
    pub async fn handle_question(&self, session: &Session, question: &str) -> Result<String> {
        if question.trim().is_empty() {
            return Err(LabelwiseError::InvalidArgument(
                "question must not be empty".to_string(),
            ));
        }

        let prompt = compose_question_prompt(session.extracted_ingredients(), question);

        self.agent.ask(&prompt).await
    }
}
