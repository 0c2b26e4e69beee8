pub mod cards;
pub mod snapshot_repo;
