use async_trait::async_trait;
use mockall::automock;
use parking_lot::RwLock;
use tracing::{error, info, warn};

use crate::{
    entities::card::{Card, Category},
    errors::AppError,
    repositories::snapshot_repo::SnapshotCardRepo,
    storage::snapshot::SnapshotStore,
};

/// Durability outcome of a mutation. `Failed` means the collection kept
/// the change in memory but the snapshot write did not land, callers
/// surface that as a warning instead of failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteBack {
    Saved,
    Disabled,
    Failed,
}

impl WriteBack {
    /// User-facing note for a degraded write. `Disabled` is a deliberate
    /// configuration, only `Failed` warrants a warning.
    pub fn warning(&self) -> Option<String> {
        match self {
            WriteBack::Failed => Some(
                "The change is live but could not be saved to disk, it will be lost on restart"
                    .to_string(),
            ),
            _ => None,
        }
    }
}

/// Point-in-time storage facts for the health endpoint.
#[derive(Debug, Clone)]
pub struct StorageStatus {
    pub persist_enabled: bool,
    pub snapshot_present: bool,
    pub card_count: usize,
}

#[automock]
#[async_trait]
pub trait CardRepository: Sync + Send {
    /// Prepend `card` so the collection stays newest first.
    async fn add_card(&self, card: &Card) -> Result<WriteBack, AppError>;
    async fn update_card(&self, card: &Card) -> Result<WriteBack, AppError>;
    async fn delete_card(&self, id: &str) -> Result<WriteBack, AppError>;
    async fn get_card(&self, id: &str) -> Result<Card, AppError>;
    async fn all_cards(&self) -> Result<Vec<Card>, AppError>;
    async fn filter_cards(
        &self,
        category: Option<Category>,
        search: &str,
    ) -> Result<Vec<Card>, AppError>;
    async fn storage_status(&self) -> StorageStatus;
}

impl SnapshotCardRepo {
    /// Load the snapshot if one exists, otherwise start from `seed`.
    /// An unreadable snapshot is logged and left on disk untouched, the
    /// collection starts from the seed in that case.
    pub async fn open(store: SnapshotStore, seed: Vec<Card>, persist: bool) -> Self {
        let cards = match store.load().await {
            Ok(Some(cards)) => {
                info!(
                    count = cards.len(),
                    "Loaded card snapshot from {}",
                    store.path().display()
                );
                cards
            }
            Ok(None) => {
                info!(
                    count = seed.len(),
                    "No card snapshot found, starting from the seed collection"
                );
                seed
            }
            Err(e) => {
                error!("Card snapshot unreadable, starting from the seed collection: {e:#}");
                seed
            }
        };

        SnapshotCardRepo {
            cards: RwLock::new(cards),
            store,
            persist,
        }
    }

    async fn write_back(&self) -> WriteBack {
        if !self.persist {
            return WriteBack::Disabled;
        }

        let cards = self.cards.read().clone();
        match self.store.save(&cards).await {
            Ok(()) => WriteBack::Saved,
            Err(e) => {
                warn!("Card snapshot write failed, collection kept in memory: {e:#}");
                WriteBack::Failed
            }
        }
    }
}

#[async_trait]
impl CardRepository for SnapshotCardRepo {
    async fn add_card(&self, card: &Card) -> Result<WriteBack, AppError> {
        {
            let mut cards = self.cards.write();
            if cards.iter().any(|c| c.id == card.id) {
                return Err(AppError::Conflict(format!(
                    "A card with id {} already exists",
                    card.id
                )));
            }
            cards.insert(0, card.clone());
        }
        Ok(self.write_back().await)
    }

    async fn update_card(&self, card: &Card) -> Result<WriteBack, AppError> {
        {
            let mut cards = self.cards.write();
            let slot = cards
                .iter_mut()
                .find(|c| c.id == card.id)
                .ok_or_else(|| AppError::NotFound(format!("Card {} not found", card.id)))?;
            *slot = card.clone();
        }
        Ok(self.write_back().await)
    }

    async fn delete_card(&self, id: &str) -> Result<WriteBack, AppError> {
        {
            let mut cards = self.cards.write();
            let before = cards.len();
            cards.retain(|c| c.id != id);
            if cards.len() == before {
                return Err(AppError::NotFound(format!("Card {} not found", id)));
            }
        }
        Ok(self.write_back().await)
    }

    async fn get_card(&self, id: &str) -> Result<Card, AppError> {
        self.cards
            .read()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Card {} not found", id)))
    }

    async fn all_cards(&self) -> Result<Vec<Card>, AppError> {
        Ok(self.cards.read().clone())
    }

    async fn filter_cards(
        &self,
        category: Option<Category>,
        search: &str,
    ) -> Result<Vec<Card>, AppError> {
        let needle = search.to_lowercase();
        let cards = self.cards.read();

        Ok(cards
            .iter()
            .filter(|card| category.is_none_or(|c| card.category == c))
            .filter(|card| {
                needle.is_empty()
                    || card.title.to_lowercase().contains(&needle)
                    || card.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn storage_status(&self) -> StorageStatus {
        StorageStatus {
            persist_enabled: self.persist,
            snapshot_present: self.store.path().exists(),
            card_count: self.cards.read().len(),
        }
    }
}
