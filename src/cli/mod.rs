//! # CLI Module
//!
//! User-facing commands of `sporlctx`. Each command wires the management
//! layer (persisted token and history) to the history engine and the Spotify
//! client, and reports progress with the crate's output macros.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the OAuth 2.0 PKCE flow and stores the token
//! - [`update`] - Pulls recently played tracks into the stored context history
//! - [`history`] - Lists the last played track of every context
//! - [`play`] - Resumes a context at its last played track
//!
//! ## Usage
//!
//! ```bash
//! sporlctx auth                                  # Authenticate with Spotify
//! sporlctx update                                # Merge new plays into the history
//! sporlctx history --kind playlist --limit 10    # Recently played playlists
//! sporlctx play spotify:playlist:37i9dQZF1DX0XUsuxWHRQd
//! ```
//!
//! Spotify only keeps the last 50 plays, so `update` should run regularly
//! (e.g. from cron) to avoid gaps in the history.

mod auth;
mod history;
mod play;
mod update;

pub use auth::auth;
pub use history::history;
pub use play::play;
pub use update::update;
