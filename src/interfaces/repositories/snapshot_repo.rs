use parking_lot::RwLock;

use crate::entities::card::Card;
use crate::storage::snapshot::SnapshotStore;

/// The live card collection. Reads are served from memory, every
/// mutation is written back to the snapshot file when persistence is on.
pub struct SnapshotCardRepo {
    pub(crate) cards: RwLock<Vec<Card>>,
    pub(crate) store: SnapshotStore,
    pub(crate) persist: bool,
}
