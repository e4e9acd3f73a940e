use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single flashcard: a front/back text pair with accumulated study counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: Uuid,
    pub front: String,
    pub back: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub times_studied: i64,
    #[serde(default)]
    pub correct_count: i64,
    #[serde(default)]
    pub incorrect_count: i64,
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            front: front.into(),
            back: back.into(),
            created_at: Utc::now(),
            times_studied: 0,
            correct_count: 0,
            incorrect_count: 0,
        }
    }

    pub fn record_study_result(&mut self, is_correct: bool) {
        self.times_studied += 1;
        if is_correct {
            self.correct_count += 1;
        } else {
            self.incorrect_count += 1;
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.times_studied == 0 {
            return 0.0;
        }
        (self.correct_count as f64 / self.times_studied as f64) * 100.0
    }
}
