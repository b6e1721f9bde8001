use serde::{Deserialize, Serialize};

pub const OPTION_COUNT: usize = 4;

/// Sentinel answer index for an answer that matches none of the options.
pub const NO_MATCHING_ANSWER: i32 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub topic: String,
    pub text: String,
    pub options: [String; OPTION_COUNT],
    pub correct_answer_index: i32,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    Solo,
    Group,
}

/// A parsed question row that has not been given an id, type or topic yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionFragment {
    pub text: String,
    pub options: [String; OPTION_COUNT],
    pub correct_answer_index: i32,
    pub explanation: String,
}

impl QuestionFragment {
    pub fn into_question(self, id: i64, topic: impl Into<String>) -> Question {
        Question {
            id,
            question_type: QuestionType::Solo,
            topic: topic.into(),
            text: self.text,
            options: self.options,
            correct_answer_index: self.correct_answer_index,
            explanation: self.explanation,
        }
    }
}

impl Question {
    /// The canned question served when no AI backend is configured.
    pub fn sample(id: i64, topic: impl Into<String>) -> Self {
        Self {
            id,
            question_type: QuestionType::Solo,
            topic: topic.into(),
            text: "What is the boiling point of water at sea level?".to_string(),
            options: [
                "90°C".to_string(),
                "100°C".to_string(),
                "120°C".to_string(),
                "80°C".to_string(),
            ],
            correct_answer_index: 1,
            explanation: "Water boils at 100°C (212°F) at sea level, due to the standard atmospheric pressure.".to_string(),
        }
    }

    pub fn correct_option(&self) -> Option<&str> {
        usize::try_from(self.correct_answer_index)
            .ok()
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }
}
