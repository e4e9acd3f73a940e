use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::deck::DeckStats;
use crate::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyResultEntry {
    pub card_id: Uuid,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordStudyPayload {
    #[validate(length(min = 1))]
    pub results: Vec<StudyResultEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckProgress {
    pub deck_id: Uuid,
    pub deck_name: String,
    #[serde(flatten)]
    pub stats: DeckStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub user: User,
    pub total_decks: usize,
    pub total_cards: usize,
    pub deck_stats: Vec<DeckProgress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySessionResponse {
    pub cards_studied: usize,
    pub overall_accuracy: f64,
}
