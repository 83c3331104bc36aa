mod auth;
mod history;

pub use auth::TokenManager;
pub use history::{HistoryManager, HistorySnapshot};
