use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::practice_test::PracticeTest;
use crate::services::ai_service::AIService;
use crate::services::grading_service::GradingService;
use crate::storage::store::Storage;

#[derive(Clone)]
pub struct TestService {
    storage: Storage,
}

/// Outcome of grading one submitted answer.
#[derive(Debug, Clone)]
pub struct AnswerVerdict {
    pub question_id: Uuid,
    pub is_correct: bool,
    pub correct_answer: String,
}

impl TestService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Build a practice test for a deck. Question generation never fails on
    /// AI unavailability; the only hard precondition is a non-empty deck.
    pub async fn create_practice_test(
        &self,
        ai_service: &AIService,
        deck_id: Uuid,
        num_questions: usize,
    ) -> Result<PracticeTest> {
        let deck = self.storage.deck(deck_id).await?;
        if deck.cards.is_empty() {
            return Err(Error::BadRequest(
                "Deck has no flashcards to generate questions from".to_string(),
            ));
        }

        let max_questions = crate::config::get_config().max_ai_questions.max(1);
        let requested = num_questions
            .max(1)
            .min(max_questions)
            .min(deck.cards.len() * 2);

        let generated = ai_service
            .generate_practice_questions(&deck.cards, requested)
            .await;

        let mut test = PracticeTest::new(deck.id, deck.name.clone());
        for item in generated {
            test.add_question(item.question, item.correct_answer);
        }

        tracing::info!(
            deck_id = %deck.id,
            questions = test.questions.len(),
            "Created practice test {}",
            test.id
        );
        self.storage.insert_practice_test(test.clone()).await?;
        Ok(test)
    }

    pub async fn list(&self, deck_id: Option<Uuid>) -> Vec<PracticeTest> {
        let tests = self.storage.practice_tests().await;
        match deck_id {
            Some(id) => tests.into_iter().filter(|t| t.deck_id == id).collect(),
            None => tests,
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<PracticeTest> {
        self.storage.practice_test(id).await
    }

    /// Grade a submitted answer and record it against the question.
    pub async fn submit_answer(
        &self,
        test_id: Uuid,
        question_id: Uuid,
        answer: String,
    ) -> Result<AnswerVerdict> {
        let mut test = self.storage.practice_test(test_id).await?;
        if test.is_completed {
            return Err(Error::BadRequest(
                "Practice test is already completed".to_string(),
            ));
        }

        let question = test
            .question_mut(question_id)
            .ok_or_else(|| Error::NotFound("Question not found".to_string()))?;

        let is_correct = GradingService::grade(&answer, &question.correct_answer);
        let correct_answer = question.correct_answer.clone();
        question.record_answer(answer, is_correct);

        self.storage.update_practice_test(test).await?;
        Ok(AnswerVerdict {
            question_id,
            is_correct,
            correct_answer,
        })
    }

    pub async fn complete(&self, id: Uuid) -> Result<PracticeTest> {
        let mut test = self.storage.practice_test(id).await?;
        test.complete();
        self.storage.update_practice_test(test.clone()).await?;
        Ok(test)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.storage.delete_practice_test(id).await
    }
}
