use super::card::Card;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CardStore: Send + Sync {
    async fn store(&self, card: Card) -> Result<()>;
    async fn get(&self, number: &str) -> Result<Option<Card>>;
    async fn all_cards(&self) -> Result<Vec<Card>>;
}

pub type CardStoreBox = Box<dyn CardStore>;
