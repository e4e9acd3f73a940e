use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::deck::Deck;
use crate::models::flashcard::Flashcard;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDeckPayload {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCardPayload {
    #[validate(length(min = 1))]
    pub front: String,
    #[validate(length(min = 1))]
    pub back: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardResponse {
    pub id: Uuid,
    pub front: String,
    pub back: String,
    pub created_at: DateTime<Utc>,
    pub times_studied: i64,
    pub correct_count: i64,
    pub incorrect_count: i64,
    pub accuracy: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub cards: Vec<CardResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckListResponse {
    pub decks: Vec<DeckResponse>,
}

impl From<Flashcard> for CardResponse {
    fn from(value: Flashcard) -> Self {
        let accuracy = value.accuracy();
        Self {
            id: value.id,
            front: value.front,
            back: value.back,
            created_at: value.created_at,
            times_studied: value.times_studied,
            correct_count: value.correct_count,
            incorrect_count: value.incorrect_count,
            accuracy,
        }
    }
}

impl From<Deck> for DeckResponse {
    fn from(value: Deck) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            created_at: value.created_at,
            cards: value.cards.into_iter().map(Into::into).collect(),
        }
    }
}
