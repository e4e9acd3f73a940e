pub mod auth;
pub mod decks;
pub mod health;
pub mod study;
