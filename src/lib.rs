//! Spotify Context History CLI Library
//!
//! Remembers, for every album, artist and playlist a user listened to on
//! Spotify, the most recently played track inside it, and resumes playback of
//! a context at that track.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loaded from environment variables and `.env`
//! - `history` - Context history engine (classification, enrichment, merge, pagination)
//! - `management` - Token and history persistence
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementing [`history::PlaybackApi`]
//! - `types` - Wire and domain data structures
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use sporlctx::{config, history::ContextHistoryTracker, spotify::SpotifyApi};
//!
//! #[tokio::main]
//! async fn main() -> sporlctx::Res<()> {
//!     config::load_env().await?;
//!     let tracker = ContextHistoryTracker::new(SpotifyApi::from_cache().await?);
//!     let report = tracker.update().await?;
//!     println!("merged {} entries", report.merged);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod history;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Boxed dynamic error with Send + Sync bounds so it can cross `.await`
/// points and task boundaries. Used at the transport seam, where errors from
/// reqwest, serde and the token manager meet.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching recently played tracks...");
/// info!("Found {} contexts", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for the CLI layer. Library code returns errors instead, since
/// this macro terminates the process with exit code 1.
///
/// # Example
///
/// ```
/// error!("Failed to load token. Please run sporlctx auth");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// The history engine reports every soft failure through this macro: an
/// unrecognised context kind, a playlist that could not be fetched, a failed
/// bulk lookup or a resume attempt that had to fall back.
///
/// # Example
///
/// ```
/// warning!("Unrecognised context type: {}", kind);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
