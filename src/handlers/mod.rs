pub mod app;
pub mod auth;
pub mod dashboard;
pub mod payees;
pub mod protocol;
pub mod reports;
pub mod settings;
pub mod summary;
pub mod users;
