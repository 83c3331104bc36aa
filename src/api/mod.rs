//! # API Module
//!
//! HTTP endpoints of the temporary server started by `sporlctx auth`.
//!
//! - [`callback`] - Receives Spotify's OAuth redirect and exchanges the
//!   authorization code for a token (PKCE flow).
//! - [`health`] - Reports status, name and version.
//!
//! Both are plain async functions mounted by [`crate::server::start_api_server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
