use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::practice_test::{PracticeTest, TestProgress};
use crate::models::practice_test_question::PracticeTestQuestion;
use crate::services::test_service::AnswerVerdict;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTestPayload {
    pub deck_id: Uuid,
    #[validate(range(min = 1))]
    pub num_questions: Option<usize>,
}

/// An empty answer is legal input; it just grades as incorrect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswerPayload {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TestListQuery {
    pub deck_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestQuestionResponse {
    pub id: Uuid,
    pub question: String,
    pub correct_answer: String,
    pub user_answer: Option<String>,
    pub is_correct: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResponse {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub deck_name: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub score: Option<f64>,
    pub questions: Vec<TestQuestionResponse>,
    pub progress: TestProgress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestListResponse {
    pub tests: Vec<TestResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub question_id: Uuid,
    pub is_correct: bool,
    pub correct_answer: String,
}

impl From<PracticeTestQuestion> for TestQuestionResponse {
    fn from(value: PracticeTestQuestion) -> Self {
        Self {
            id: value.id,
            question: value.question,
            correct_answer: value.correct_answer,
            user_answer: value.user_answer,
            is_correct: value.is_correct,
        }
    }
}

impl From<PracticeTest> for TestResponse {
    fn from(value: PracticeTest) -> Self {
        let progress = value.progress();
        Self {
            id: value.id,
            deck_id: value.deck_id,
            deck_name: value.deck_name,
            created_at: value.created_at,
            completed_at: value.completed_at,
            is_completed: value.is_completed,
            score: value.score,
            questions: value.questions.into_iter().map(Into::into).collect(),
            progress,
        }
    }
}

impl From<AnswerVerdict> for AnswerResponse {
    fn from(value: AnswerVerdict) -> Self {
        Self {
            question_id: value.question_id,
            is_correct: value.is_correct,
            correct_answer: value.correct_answer,
        }
    }
}
