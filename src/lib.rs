pub mod config;
pub mod crm;
pub mod dashboard;
pub mod engine;
pub mod feed;
pub mod notify;
pub mod tui;
