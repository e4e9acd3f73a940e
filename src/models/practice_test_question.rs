use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One question inside a practice test. `user_answer` and `is_correct`
/// stay `None` until an answer has been submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeTestQuestion {
    pub id: Uuid,
    pub question: String,
    pub correct_answer: String,
    #[serde(default)]
    pub user_answer: Option<String>,
    #[serde(default)]
    pub is_correct: Option<bool>,
}

impl PracticeTestQuestion {
    pub fn new(question: impl Into<String>, correct_answer: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            question: question.into(),
            correct_answer: correct_answer.into(),
            user_answer: None,
            is_correct: None,
        }
    }

    pub fn record_answer(&mut self, user_answer: String, is_correct: bool) {
        self.user_answer = Some(user_answer);
        self.is_correct = Some(is_correct);
    }
}
