use std::path::Path;
use std::time::Duration;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{media, storage, utils};

use repositories::snapshot_repo::SnapshotCardRepo;
use storage::snapshot::SnapshotStore;
use use_cases::auth::{LoginAttemptGuard, SessionGate};
use use_cases::cards::CardHandler;

pub type AppCardHandler = CardHandler<SnapshotCardRepo>;

pub struct AppState {
    pub card_handler: AppCardHandler,
    pub session_gate: SessionGate,
    pub login_guard: LoginAttemptGuard,
}

impl AppState {
    pub async fn new(config: &settings::AppConfig) -> Self {
        let store = SnapshotStore::new(Path::new(&config.data_dir));
        let card_repo =
            SnapshotCardRepo::open(store, constants::seed_cards(), config.persist_writes).await;

        AppState {
            card_handler: CardHandler::new(card_repo),
            session_gate: SessionGate::new(config),
            login_guard: LoginAttemptGuard::new(
                config.login_max_attempts,
                Duration::from_secs(config.login_window_secs),
            ),
        }
    }
}
