use async_trait::async_trait;

use super::{ContextId, ContextKind, Cursor};
use crate::{
    Res,
    types::{Context, PlayRequest, RecentlyPlayedPage},
};

/// Everything the history engine needs from the outside world.
///
/// Authentication, rate limiting and HTTP retries live behind this trait.
/// [`crate::spotify::SpotifyApi`] is the production implementation.
#[async_trait]
pub trait PlaybackApi: Send + Sync {
    /// One page of play events strictly after `after`, at most `limit` items.
    async fn recently_played(&self, after: Option<&Cursor>, limit: u32)
    -> Res<RecentlyPlayedPage>;

    /// Bulk lookup. The result is parallel to `ids`; `None` marks an id the
    /// source does not know.
    async fn fetch_contexts(&self, kind: ContextKind, ids: &[ContextId])
    -> Res<Vec<Option<Context>>>;

    /// Single lookup for kinds without a bulk endpoint.
    async fn fetch_context(&self, kind: ContextKind, id: &ContextId) -> Res<Context>;

    /// Starts playback on the user's active device.
    async fn play(&self, request: &PlayRequest) -> Res<()>;
}
