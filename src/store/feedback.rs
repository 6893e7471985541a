//! Feedback-specific store operations.

use super::{Action, CrudStore};
use crate::client::segment;
use crate::errors::AppError;
use crate::models::{Feedback, FeedbackChange};

impl CrudStore<Feedback> {
    /// Flip whether the feedback is shown on the public website.
    pub async fn toggle_show_on_website(&self, id: &str) -> Result<Feedback, AppError> {
        let path = format!("/feedback/show/{}", segment(id)?);
        let feedback: Feedback = self.client.put_empty(&path).await?;
        self.store.dispatch(Action::Change {
            key: id.to_string(),
            change: FeedbackChange::VisibilityToggled(feedback.clone()),
        });
        Ok(feedback)
    }
}
