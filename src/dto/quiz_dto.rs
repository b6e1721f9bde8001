use crate::models::question::Question;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct QuizQuery {
    #[validate(length(max = 200))]
    pub topic: Option<String>,
    pub next: Option<String>,
}

impl QuizQuery {
    /// The requested topic, or `default` when absent or blank.
    pub fn topic_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(default)
    }

    pub fn is_next(&self) -> bool {
        self.next.as_deref() == Some("true")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub questions: Vec<Question>,
}
