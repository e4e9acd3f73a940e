pub mod deck;
pub mod flashcard;
pub mod practice_test_question;
pub mod user;
