//! Analysis and draft generation

use crate::ai::prompts::compose_analysis_prompt;
use crate::ai::{GenerateRequest, TextGenerator};
use crate::app::App;
use crate::mail::CanonicalEmail;

impl<G: TextGenerator> App<G> {
    /// Bilingual analysis of `email`. Failures come back as inline text.
    pub(crate) async fn analyze(&self, email: &CanonicalEmail) -> String {
        let prompt = compose_analysis_prompt(email.body());
        match self.generator.generate(&prompt).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!("Analysis failed: {}", e);
                format!("Error analyzing email: {}", e)
            }
        }
    }

    /// Produce a fresh batch for the current email. A quick action applies to
    /// this batch only; the next plain request generates without it.
    pub async fn generate(&mut self, request: GenerateRequest) {
        let Some(email) = self.state.input.email() else {
            self.state
                .set_error("Please paste an email or upload a file to get started!");
            return;
        };
        if email.is_blank() {
            self.state
                .set_error("Please paste an email or upload a file to get started!");
            return;
        }

        let config = self.state.settings.snapshot(request.action);
        self.drafts
            .generate_batch(&self.generator, email, &config)
            .await;

        self.state.last_action = request.action;
        self.state.set_status(format!(
            "Generated {} reply draft(s)",
            self.drafts.len()
        ));
    }
}
