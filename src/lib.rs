pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;

use crate::services::{
    ai_service::AIService, deck_service::DeckService, test_service::TestService,
};
use crate::storage::store::Storage;
use reqwest::Client;

#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub deck_service: DeckService,
    pub test_service: TestService,
    pub ai_service: AIService,
}

impl AppState {
    pub fn new(storage: Storage) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap();

        let deck_service = DeckService::new(storage.clone());
        let test_service = TestService::new(storage.clone());
        let ai_service = AIService::new(
            config.openai_api_key.clone(),
            config.groq_api_url.clone(),
            http_client,
        );

        Self {
            storage,
            deck_service,
            test_service,
            ai_service,
        }
    }
}
