use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::{
    entities::card::{Card, Category, NewCardRequest, SeedExportResponse, UpdateCardRequest},
    errors::AppError,
    repositories::cards::{CardRepository, StorageStatus, WriteBack},
};

/// Creation stamps double as card ids. Strictly increasing even when two
/// adds land in the same millisecond.
pub struct CardIdGenerator {
    last: AtomicI64,
}

impl CardIdGenerator {
    pub fn new() -> Self {
        CardIdGenerator {
            last: AtomicI64::new(0),
        }
    }

    pub fn next(&self) -> i64 {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = Utc::now().timestamp_millis().max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}

impl Default for CardIdGenerator {
    fn default() -> Self {
        CardIdGenerator::new()
    }
}

/// Outcome of a mutating operation: the card as stored plus whether the
/// change reached the snapshot.
#[derive(Debug)]
pub struct CardMutation {
    pub card: Card,
    pub write: WriteBack,
}

pub struct CardHandler<R>
where
    R: CardRepository,
{
    pub card_repo: R,
    id_gen: CardIdGenerator,
}

impl<R> CardHandler<R>
where
    R: CardRepository,
{
    pub fn new(card_repo: R) -> Self {
        CardHandler {
            card_repo,
            id_gen: CardIdGenerator::new(),
        }
    }

    /// Validates and stores a new card at the front of the collection.
    pub async fn add_card(&self, request: NewCardRequest) -> Result<CardMutation, AppError> {
        let card = request.into_card(self.id_gen.next())?;
        let write = self.card_repo.add_card(&card).await?;
        Ok(CardMutation { card, write })
    }

    /// Applies a partial update to an existing card.
    pub async fn update_card(
        &self,
        id: &str,
        request: UpdateCardRequest,
    ) -> Result<CardMutation, AppError> {
        if request.is_empty() {
            return Err(AppError::InvalidInput(
                "Update request carries no fields".to_string(),
            ));
        }

        let current = self.card_repo.get_card(id).await?;
        let merged = request.merge_into(current)?;
        let write = self.card_repo.update_card(&merged).await?;
        Ok(CardMutation {
            card: merged,
            write,
        })
    }

    /// Removes a card once the client has confirmed the removal.
    pub async fn delete_card(&self, id: &str, confirmed: bool) -> Result<WriteBack, AppError> {
        if !confirmed {
            return Err(AppError::InvalidInput(
                "Deleting a card must be confirmed with confirm=true".to_string(),
            ));
        }
        self.card_repo.delete_card(id).await
    }

    pub async fn get_card(&self, id: &str) -> Result<Card, AppError> {
        self.card_repo.get_card(id).await
    }

    pub async fn list_cards(
        &self,
        category: Option<Category>,
        search: &str,
    ) -> Result<Vec<Card>, AppError> {
        self.card_repo.filter_cards(category, search).await
    }

    /// Renders the whole collection as a pretty-printed seed literal the
    /// owner can paste over the built-in collection.
    pub async fn export_seed(&self) -> Result<SeedExportResponse, AppError> {
        let cards = self.card_repo.all_cards().await?;
        let content = serde_json::to_string_pretty(&cards)
            .map_err(|e| AppError::InternalError(format!("Failed to render seed export: {}", e)))?;
        Ok(SeedExportResponse {
            count: cards.len(),
            content,
        })
    }

    pub async fn storage_status(&self) -> StorageStatus {
        self.card_repo.storage_status().await
    }
}
