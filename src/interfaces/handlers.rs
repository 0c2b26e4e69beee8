pub mod auth;
pub mod cards;
pub mod dashboard;
pub mod home;
pub mod images;
pub mod system;
pub mod timeline;
