use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::models::flashcard::Flashcard;

const GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// A question/answer pair extracted from (or synthesized for) a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub question: String,
    pub correct_answer: String,
}

#[derive(Clone)]
pub struct AIService {
    client: Client,
    api_key: String,
    api_url: String,
}

impl AIService {
    pub fn new(api_key: String, api_url: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            api_url,
        }
    }

    /// Generate up to `num_questions` practice questions for the given cards.
    /// Any upstream failure (network, non-2xx, undecodable body, missing
    /// choices, nothing parseable) falls back to deterministic questions
    /// built from the cards themselves, so a non-empty deck always yields a
    /// non-empty result.
    pub async fn generate_practice_questions(
        &self,
        flashcards: &[Flashcard],
        num_questions: usize,
    ) -> Vec<GeneratedQuestion> {
        if flashcards.is_empty() {
            return Vec::new();
        }

        match self.request_generation(flashcards, num_questions).await {
            Ok(content) => {
                let questions = self.parse_question_lines(&content, num_questions);
                if questions.is_empty() {
                    tracing::warn!("Model response contained no Q/A pairs, using fallback");
                    self.fallback_questions(flashcards, num_questions)
                } else {
                    questions
                }
            }
            Err(e) => {
                tracing::warn!("Question generation failed, using fallback: {}", e);
                self.fallback_questions(flashcards, num_questions)
            }
        }
    }

    async fn request_generation(
        &self,
        flashcards: &[Flashcard],
        num_questions: usize,
    ) -> Result<String> {
        let flashcard_content = flashcards
            .iter()
            .map(|card| format!("Q: {}\nA: {}", card.front, card.back))
            .collect::<Vec<_>>()
            .join("\n");

        // A plain Q:/A: line format is requested instead of JSON because
        // models often wrap JSON or add commentary around it.
        let prompt = format!(
            "You are an educational assistant that creates creative, exam-style practice questions.\n\
             Based on the following flashcards, generate {num_questions} diverse practice test questions.\n\n\
             Requirements:\n\
             - Test deep understanding and application of the concepts, not just memorization\n\
             - Vary formats (short answer, conceptual, scenario-based, fill-in-the-blank, etc.)\n\
             - Keep each correct answer concise\n\n\
             Flashcards:\n{flashcard_content}\n\n\
             Output format (MUST follow exactly, no extra text before or after):\n\
             Q: <question 1 text>\n\
             A: <answer 1 text>\n\
             Q: <question 2 text>\n\
             A: <answer 2 text>\n\
             ... and so on for all questions."
        );

        let payload = serde_json::json!({
            "model": GROQ_MODEL,
            "messages": [
                {
                    "role": "system",
                    "content": "You are an educational assistant that creates practice test questions from study materials. Always respond with valid JSON only."
                },
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.7,
            "max_tokens": 2000
        });

        let res = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(Duration::from_secs(30))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Groq API error {}: {}", status, text).into());
        }

        let body: JsonValue = res.json().await?;
        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(|s| s.trim().to_string())
            .ok_or_else(|| anyhow::anyhow!("Invalid Groq response format").into())
    }

    /// Line-oriented scan for `Q:`/`A:` pairs. A `Q:` line opens a pending
    /// question (a later `Q:` replaces it, the earlier one is discarded); an
    /// `A:` line pairs with the pending question and emits one item; an `A:`
    /// with nothing pending is ignored, as is a dangling question at end of
    /// input. At most `limit` items are kept, in encountered order.
    pub fn parse_question_lines(&self, content: &str, limit: usize) -> Vec<GeneratedQuestion> {
        let mut questions = Vec::new();
        let mut pending_question: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(rest) = line.strip_prefix("Q:") {
                pending_question = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix("A:") {
                if let Some(question) = pending_question.take() {
                    questions.push(GeneratedQuestion {
                        question,
                        correct_answer: rest.trim().to_string(),
                    });
                }
            }
        }

        if questions.len() > limit {
            questions.truncate(limit);
        }
        questions
    }

    /// Deterministic fallback: wrap the cards themselves as questions,
    /// cycling through the deck when more questions are requested than
    /// cards exist.
    pub fn fallback_questions(
        &self,
        flashcards: &[Flashcard],
        num_questions: usize,
    ) -> Vec<GeneratedQuestion> {
        (0..num_questions.min(flashcards.len()))
            .map(|i| {
                let card = &flashcards[i % flashcards.len()];
                GeneratedQuestion {
                    question: format!("What is the answer to: {}?", card.front),
                    correct_answer: card.back.clone(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AIService {
        AIService::new(
            "sk-test".to_string(),
            "http://127.0.0.1:9/v1/chat/completions".to_string(),
            Client::new(),
        )
    }

    fn cards(pairs: &[(&str, &str)]) -> Vec<Flashcard> {
        pairs
            .iter()
            .map(|(front, back)| Flashcard::new(*front, *back))
            .collect()
    }

    #[test]
    fn parses_well_formed_pairs() {
        let svc = service();
        let content = "Q: What is 2+2?\nA: 4\nQ: Capital of France?\nA: Paris";
        let parsed = svc.parse_question_lines(content, 5);
        assert_eq!(
            parsed,
            vec![
                GeneratedQuestion {
                    question: "What is 2+2?".to_string(),
                    correct_answer: "4".to_string(),
                },
                GeneratedQuestion {
                    question: "Capital of France?".to_string(),
                    correct_answer: "Paris".to_string(),
                },
            ]
        );
    }

    #[test]
    fn truncates_to_requested_count() {
        let svc = service();
        let content = (1..=5)
            .map(|i| format!("Q: question {i}\nA: answer {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let parsed = svc.parse_question_lines(&content, 3);
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].question, "question 1");
        assert_eq!(parsed[2].question, "question 3");
    }

    #[test]
    fn dangling_question_is_discarded() {
        let svc = service();
        assert!(svc.parse_question_lines("Q: Orphan question?\n", 5).is_empty());
    }

    #[test]
    fn answer_without_question_is_ignored() {
        let svc = service();
        let parsed = svc.parse_question_lines("A: stray answer\nQ: real?\nA: yes", 5);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].question, "real?");
    }

    #[test]
    fn later_question_replaces_unanswered_one() {
        let svc = service();
        let parsed = svc.parse_question_lines("Q: first?\nQ: second?\nA: answer", 5);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].question, "second?");
        assert_eq!(parsed[0].correct_answer, "answer");
    }

    #[test]
    fn blank_lines_and_prose_are_skipped() {
        let svc = service();
        let content = "Here are your questions:\n\n  Q: trimmed?  \n\n  A: indeed  \nThanks!";
        let parsed = svc.parse_question_lines(content, 5);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].question, "trimmed?");
        assert_eq!(parsed[0].correct_answer, "indeed");
    }

    #[test]
    fn fallback_is_deterministic_and_capped() {
        let svc = service();
        let cards = cards(&[("a", "1"), ("b", "2")]);
        let questions = svc.fallback_questions(&cards, 5);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "What is the answer to: a?");
        assert_eq!(questions[0].correct_answer, "1");
        assert_eq!(questions[1].question, "What is the answer to: b?");
        assert_eq!(questions[1].correct_answer, "2");
    }

    #[test]
    fn fallback_on_empty_card_list_is_empty() {
        let svc = service();
        assert!(svc.fallback_questions(&[], 5).is_empty());
    }

    #[tokio::test]
    async fn unreachable_api_falls_back() {
        // Port 9 (discard) refuses connections, so the request errors fast
        // and the fallback path produces card-derived questions.
        let svc = service();
        let cards = cards(&[("front", "back")]);
        let questions = svc.generate_practice_questions(&cards, 3).await;
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "What is the answer to: front?");
    }
}
