use super::SpotifyApi;
use crate::types::PlayRequest;

impl SpotifyApi {
    /// Starts or resumes playback of a context on the active device.
    ///
    /// Spotify answers `204 No Content` on success. An offset pointing at a
    /// track that is no longer part of the context, an artist context with an
    /// offset, or a missing active device all come back as 4xx errors.
    ///
    /// Requires the `user-modify-playback-state` scope.
    pub async fn start_playback(&self, request: &PlayRequest) -> Result<(), reqwest::Error> {
        let api_url = self.url("/me/player/play");
        self.send(|client| client.put(&api_url).json(request))
            .await
            .map(|_| ())
    }
}
