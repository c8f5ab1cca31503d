pub mod analyzer;
pub mod chat;
pub mod reports;
