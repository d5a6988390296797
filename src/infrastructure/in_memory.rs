use crate::domain::card::Card;
use crate::domain::ports::CardStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory card registry.
///
/// Uses `Arc<RwLock<HashMap<String, Card>>>` keyed by card number, so clones
/// share the same registry. Contents are lost when the process exits.
#[derive(Default, Clone)]
pub struct InMemoryCardStore {
    cards: Arc<RwLock<HashMap<String, Card>>>,
}

impl InMemoryCardStore {
    /// Creates a new, empty in-memory card store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CardStore for InMemoryCardStore {
    async fn store(&self, card: Card) -> Result<()> {
        let mut cards = self.cards.write().await;
        cards.insert(card.number().to_string(), card);
        Ok(())
    }

    async fn get(&self, number: &str) -> Result<Option<Card>> {
        let cards = self.cards.read().await;
        Ok(cards.get(number).cloned())
    }

    async fn all_cards(&self) -> Result<Vec<Card>> {
        let cards = self.cards.read().await;
        Ok(cards.values().cloned().collect())
    }
}
