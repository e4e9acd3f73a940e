use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::flashcard::Flashcard;

/// A named collection of flashcards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub cards: Vec<Flashcard>,
}

/// Aggregate study statistics for one deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckStats {
    pub total_cards: usize,
    pub total_studied: i64,
    pub total_correct: i64,
    pub total_incorrect: i64,
    pub accuracy: f64,
}

impl Deck {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            created_at: Utc::now(),
            cards: Vec::new(),
        }
    }

    pub fn add_card(&mut self, front: impl Into<String>, back: impl Into<String>) -> &Flashcard {
        self.cards.push(Flashcard::new(front, back));
        self.cards.last().expect("card was just pushed")
    }

    pub fn remove_card(&mut self, card_id: Uuid) -> bool {
        let before = self.cards.len();
        self.cards.retain(|card| card.id != card_id);
        self.cards.len() != before
    }

    pub fn card(&self, card_id: Uuid) -> Option<&Flashcard> {
        self.cards.iter().find(|card| card.id == card_id)
    }

    pub fn card_mut(&mut self, card_id: Uuid) -> Option<&mut Flashcard> {
        self.cards.iter_mut().find(|card| card.id == card_id)
    }

    pub fn study_stats(&self) -> DeckStats {
        let total_studied: i64 = self.cards.iter().map(|c| c.times_studied).sum();
        let total_correct: i64 = self.cards.iter().map(|c| c.correct_count).sum();
        let total_incorrect: i64 = self.cards.iter().map(|c| c.incorrect_count).sum();

        let accuracy = if total_studied > 0 {
            (total_correct as f64 / total_studied as f64) * 100.0
        } else {
            0.0
        };

        DeckStats {
            total_cards: self.cards.len(),
            total_studied,
            total_correct,
            total_incorrect,
            accuracy: (accuracy * 100.0).round() / 100.0,
        }
    }
}
