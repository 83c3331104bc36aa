use std::collections::{HashMap, HashSet};

use futures_util::future::join_all;

use super::{ContextId, ContextKind, ContextPlay, PlaybackApi};
use crate::{types::Context, warning};

/// How contexts of one kind are looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    /// One request for all ids of the bucket.
    Bulk,
    /// One request per unique id, issued concurrently.
    PerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindHandler {
    pub kind: ContextKind,
    pub strategy: LookupStrategy,
}

impl KindHandler {
    pub fn new(kind: ContextKind, strategy: LookupStrategy) -> Self {
        Self { kind, strategy }
    }
}

/// Turns classified plays into full context metadata.
///
/// The handler order is also the classification order, so the buckets
/// produced by [`super::classify`] with [`Enricher::kinds`] line up with the
/// handlers one to one.
#[derive(Debug, Clone)]
pub struct Enricher {
    handlers: Vec<KindHandler>,
}

impl Default for Enricher {
    /// Spotify has `GET /albums` and `GET /artists` for several ids at once
    /// but nothing equivalent for playlists.
    fn default() -> Self {
        Self::new(vec![
            KindHandler::new(ContextKind::Album, LookupStrategy::Bulk),
            KindHandler::new(ContextKind::Artist, LookupStrategy::Bulk),
            KindHandler::new(ContextKind::Playlist, LookupStrategy::PerId),
        ])
    }
}

impl Enricher {
    pub fn new(handlers: Vec<KindHandler>) -> Self {
        Self { handlers }
    }

    pub fn kinds(&self) -> Vec<ContextKind> {
        self.handlers.iter().map(|h| h.kind).collect()
    }

    /// Looks up the context of every play, bucket by bucket.
    ///
    /// The output has the same shape as `buckets`. `None` marks a play whose
    /// context could not be fetched this cycle. Buckets are enriched
    /// concurrently and lookup failures never escape as errors.
    pub async fn enrich<A>(
        &self,
        api: &A,
        buckets: &[Vec<ContextPlay>],
    ) -> Vec<Vec<Option<Context>>>
    where
        A: PlaybackApi + ?Sized,
    {
        let lookups = self
            .handlers
            .iter()
            .zip(buckets)
            .map(|(handler, bucket)| enrich_bucket(api, *handler, bucket));

        join_all(lookups).await
    }
}

async fn enrich_bucket<A>(
    api: &A,
    handler: KindHandler,
    bucket: &[ContextPlay],
) -> Vec<Option<Context>>
where
    A: PlaybackApi + ?Sized,
{
    if bucket.is_empty() {
        return Vec::new();
    }

    let ids: Vec<&ContextId> = bucket.iter().map(|play| &play.id).collect();
    let unique = unique_ids(&ids);

    let found = match handler.strategy {
        LookupStrategy::Bulk => fetch_bulk(api, handler.kind, &unique).await,
        LookupStrategy::PerId => fetch_each(api, handler.kind, &unique).await,
    };

    ids.into_iter().map(|id| found.get(id).cloned()).collect()
}

/// Distinct ids in order of first appearance.
fn unique_ids(ids: &[&ContextId]) -> Vec<ContextId> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(**id))
        .map(|id| (*id).clone())
        .collect()
}

async fn fetch_bulk<A>(
    api: &A,
    kind: ContextKind,
    ids: &[ContextId],
) -> HashMap<ContextId, Context>
where
    A: PlaybackApi + ?Sized,
{
    match api.fetch_contexts(kind, ids).await {
        Ok(contexts) => ids
            .iter()
            .cloned()
            .zip(contexts)
            .filter_map(|(id, context)| context.map(|c| (id, c)))
            .collect(),
        Err(e) => {
            warning!("Failed to get {}s (they will be ignored): {}", kind, e);
            HashMap::new()
        }
    }
}

async fn fetch_each<A>(
    api: &A,
    kind: ContextKind,
    ids: &[ContextId],
) -> HashMap<ContextId, Context>
where
    A: PlaybackApi + ?Sized,
{
    let lookups = ids
        .iter()
        .map(|id| async move { (id, api.fetch_context(kind, id).await) });

    join_all(lookups)
        .await
        .into_iter()
        .filter_map(|(id, result)| match result {
            Ok(context) => Some((id.clone(), context)),
            Err(e) => {
                warning!("Failed to get {} {} (it will be ignored): {}", kind, id, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_ids_keep_first_seen_order() {
        let a = ContextId::from_uri("spotify:playlist:A");
        let b = ContextId::from_uri("spotify:playlist:B");
        let a_alias = ContextId::from_uri("spotify:playlist:A?si=1");

        let unique = unique_ids(&[&b, &a, &b, &a_alias]);
        assert_eq!(unique, vec![b.clone(), a.clone()]);
    }

    #[test]
    fn default_handlers_follow_spotify_endpoints() {
        let enricher = Enricher::default();
        assert_eq!(enricher.kinds(), ContextKind::ALL.to_vec());
        assert_eq!(enricher.handlers[2].strategy, LookupStrategy::PerId);
    }
}
