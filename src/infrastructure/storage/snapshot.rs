use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;

use crate::constants::SNAPSHOT_FILE_NAME;
use crate::entities::card::Card;

/// Durable home of the card collection: one JSON file holding the full
/// serialized array, replaced wholesale on every write.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: &Path) -> Self {
        SnapshotStore {
            path: data_dir.join(SNAPSHOT_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ok(None) when no snapshot has been written yet.
    pub async fn load(&self) -> anyhow::Result<Option<Vec<Card>>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("reading snapshot {}", self.path.display()));
            }
        };

        let cards: Vec<Card> = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing snapshot {}", self.path.display()))?;
        Ok(Some(cards))
    }

    /// Write the whole collection through a sibling temp file, then move
    /// it over the snapshot.
    pub async fn save(&self, cards: &[Card]) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("creating data directory {}", dir.display()))?;
        }

        let bytes = serde_json::to_vec_pretty(cards).context("serializing card collection")?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &bytes)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing snapshot {}", self.path.display()))?;
        Ok(())
    }
}
