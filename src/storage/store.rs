use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tokio::fs;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{deck::Deck, practice_test::PracticeTest, user::User};

/// On-disk shape of the single JSON data file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
struct StoreData {
    decks: Vec<Deck>,
    user: Option<User>,
    practice_tests: Vec<PracticeTest>,
}

/// Shared handle over the JSON data file. All state is loaded once at
/// startup and the whole file is rewritten after every mutation.
#[derive(Clone)]
pub struct Storage {
    path: PathBuf,
    data: Arc<RwLock<StoreData>>,
}

impl Storage {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).await?;
            }
        }

        let data = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<JsonValue>(&bytes) {
                Ok(raw) => Self::deserialize_lenient(raw),
                Err(e) => {
                    tracing::warn!("Data file is not valid JSON, starting fresh: {}", e);
                    StoreData::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
            Err(e) => return Err(e.into()),
        };

        let storage = Self {
            path,
            data: Arc::new(RwLock::new(data)),
        };
        storage.persist().await?;
        Ok(storage)
    }

    /// Records that fail to deserialize individually are skipped so one
    /// corrupt deck or test does not take the whole file down.
    fn deserialize_lenient(raw: JsonValue) -> StoreData {
        let mut data = StoreData::default();

        if let Some(decks) = raw.get("decks").and_then(|v| v.as_array()) {
            for value in decks {
                match serde_json::from_value::<Deck>(value.clone()) {
                    Ok(deck) => data.decks.push(deck),
                    Err(e) => tracing::warn!("Skipping undecodable deck record: {}", e),
                }
            }
        }

        if let Some(user) = raw.get("user") {
            match serde_json::from_value::<User>(user.clone()) {
                Ok(user) => data.user = Some(user),
                Err(e) => tracing::warn!("Skipping undecodable user record: {}", e),
            }
        }

        if let Some(tests) = raw.get("practice_tests").and_then(|v| v.as_array()) {
            for value in tests {
                match serde_json::from_value::<PracticeTest>(value.clone()) {
                    Ok(test) => data.practice_tests.push(test),
                    Err(e) => tracing::warn!("Skipping undecodable practice test record: {}", e),
                }
            }
        }

        data
    }

    async fn persist(&self) -> Result<()> {
        let data = self.data.read().await;
        let bytes = serde_json::to_vec_pretty(&*data)?;
        fs::write(&self.path, bytes).await?;
        Ok(())
    }

    pub async fn decks(&self) -> Vec<Deck> {
        self.data.read().await.decks.clone()
    }

    pub async fn deck(&self, id: Uuid) -> Result<Deck> {
        self.data
            .read()
            .await
            .decks
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Deck not found".to_string()))
    }

    pub async fn insert_deck(&self, deck: Deck) -> Result<()> {
        self.data.write().await.decks.push(deck);
        self.persist().await
    }

    pub async fn update_deck(&self, deck: Deck) -> Result<()> {
        {
            let mut data = self.data.write().await;
            let slot = data
                .decks
                .iter_mut()
                .find(|d| d.id == deck.id)
                .ok_or_else(|| Error::NotFound("Deck not found".to_string()))?;
            *slot = deck;
        }
        self.persist().await
    }

    pub async fn delete_deck(&self, id: Uuid) -> Result<()> {
        {
            let mut data = self.data.write().await;
            let before = data.decks.len();
            data.decks.retain(|d| d.id != id);
            if data.decks.len() == before {
                return Err(Error::NotFound("Deck not found".to_string()));
            }
            // Tests derived from the deck go with it.
            data.practice_tests.retain(|t| t.deck_id != id);
        }
        self.persist().await
    }

    pub async fn user(&self) -> User {
        let existing = self.data.read().await.user.clone();
        match existing {
            Some(user) => user,
            None => {
                let user = User::default();
                self.data.write().await.user = Some(user.clone());
                user
            }
        }
    }

    pub async fn save_user(&self, user: User) -> Result<()> {
        self.data.write().await.user = Some(user);
        self.persist().await
    }

    pub async fn practice_tests(&self) -> Vec<PracticeTest> {
        self.data.read().await.practice_tests.clone()
    }

    pub async fn practice_test(&self, id: Uuid) -> Result<PracticeTest> {
        self.data
            .read()
            .await
            .practice_tests
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Practice test not found".to_string()))
    }

    pub async fn insert_practice_test(&self, test: PracticeTest) -> Result<()> {
        self.data.write().await.practice_tests.push(test);
        self.persist().await
    }

    pub async fn update_practice_test(&self, test: PracticeTest) -> Result<()> {
        {
            let mut data = self.data.write().await;
            let slot = data
                .practice_tests
                .iter_mut()
                .find(|t| t.id == test.id)
                .ok_or_else(|| Error::NotFound("Practice test not found".to_string()))?;
            *slot = test;
        }
        self.persist().await
    }

    pub async fn delete_practice_test(&self, id: Uuid) -> Result<()> {
        {
            let mut data = self.data.write().await;
            let before = data.practice_tests.len();
            data.practice_tests.retain(|t| t.id != id);
            if data.practice_tests.len() == before {
                return Err(Error::NotFound("Practice test not found".to_string()));
            }
        }
        self.persist().await
    }
}
