pub mod card;
pub mod option_fields;
pub mod session;
pub mod timeline;
pub mod view;
