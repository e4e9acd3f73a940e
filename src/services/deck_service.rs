use uuid::Uuid;

use crate::dto::deck_dto::{CreateCardPayload, CreateDeckPayload};
use crate::dto::study_dto::{DeckProgress, ProgressReport, StudyResultEntry};
use crate::error::{Error, Result};
use crate::models::{deck::Deck, flashcard::Flashcard, user::User};
use crate::storage::store::Storage;

#[derive(Clone)]
pub struct DeckService {
    storage: Storage,
}

impl DeckService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub async fn list(&self) -> Vec<Deck> {
        self.storage.decks().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Deck> {
        self.storage.deck(id).await
    }

    pub async fn create(&self, payload: CreateDeckPayload) -> Result<Deck> {
        let deck = Deck::new(payload.name, payload.description.unwrap_or_default());
        self.storage.insert_deck(deck.clone()).await?;
        Ok(deck)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.storage.delete_deck(id).await
    }

    pub async fn add_card(&self, deck_id: Uuid, payload: CreateCardPayload) -> Result<Flashcard> {
        let mut deck = self.storage.deck(deck_id).await?;
        let card = deck.add_card(payload.front, payload.back).clone();
        self.storage.update_deck(deck).await?;
        Ok(card)
    }

    /// Remove a card from whichever deck holds it.
    pub async fn delete_card(&self, card_id: Uuid) -> Result<()> {
        let decks = self.storage.decks().await;
        for mut deck in decks {
            if deck.remove_card(card_id) {
                return self.storage.update_deck(deck).await;
            }
        }
        Err(Error::NotFound("Card not found".to_string()))
    }

    /// Record per-card study results against a deck and roll the session
    /// totals into the user profile. Results naming unknown cards are
    /// skipped; the session totals still count every submitted entry.
    pub async fn record_study_results(
        &self,
        deck_id: Uuid,
        results: &[StudyResultEntry],
    ) -> Result<User> {
        let mut deck = self.storage.deck(deck_id).await?;
        for entry in results {
            if let Some(card) = deck.card_mut(entry.card_id) {
                card.record_study_result(entry.is_correct);
            }
        }
        self.storage.update_deck(deck).await?;

        let correct = results.iter().filter(|r| r.is_correct).count() as i64;
        let incorrect = results.len() as i64 - correct;

        let mut user = self.storage.user().await;
        user.record_study_session(results.len() as i64, correct, incorrect);
        self.storage.save_user(user.clone()).await?;
        Ok(user)
    }

    pub async fn progress(&self) -> Result<ProgressReport> {
        let user = self.storage.user().await;
        let decks = self.storage.decks().await;

        let total_decks = decks.len();
        let total_cards = decks.iter().map(|d| d.cards.len()).sum();

        let deck_stats = decks
            .iter()
            .map(|deck| DeckProgress {
                deck_id: deck.id,
                deck_name: deck.name.clone(),
                stats: deck.study_stats(),
            })
            .collect();

        Ok(ProgressReport {
            user,
            total_decks,
            total_cards,
            deck_stats,
        })
    }
}
