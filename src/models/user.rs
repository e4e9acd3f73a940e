use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The study profile with lifetime statistics. The application is
/// single-profile: one user record lives in the data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub total_study_sessions: i64,
    #[serde(default)]
    pub total_cards_studied: i64,
    #[serde(default)]
    pub total_correct: i64,
    #[serde(default)]
    pub total_incorrect: i64,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "Default User".to_string(),
            created_at: Utc::now(),
            total_study_sessions: 0,
            total_cards_studied: 0,
            total_correct: 0,
            total_incorrect: 0,
        }
    }
}

impl User {
    pub fn record_study_session(&mut self, cards_studied: i64, correct: i64, incorrect: i64) {
        self.total_study_sessions += 1;
        self.total_cards_studied += cards_studied;
        self.total_correct += correct;
        self.total_incorrect += incorrect;
    }

    pub fn overall_accuracy(&self) -> f64 {
        if self.total_cards_studied == 0 {
            return 0.0;
        }
        (self.total_correct as f64 / self.total_cards_studied as f64) * 100.0
    }
}
