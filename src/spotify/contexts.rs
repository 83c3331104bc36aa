use super::SpotifyApi;
use crate::types::{
    Album, Artist, GetSeveralAlbumsResponse, GetSeveralArtistsResponse, Playlist,
};

/// Maximum ids per `GET /albums` request.
const ALBUMS_PER_REQUEST: usize = 20;
/// Maximum ids per `GET /artists` request.
const ARTISTS_PER_REQUEST: usize = 50;

const PLAYLIST_FIELDS: &str = "id,name,uri,description,owner(id,display_name),snapshot_id";

impl SpotifyApi {
    /// Retrieves several albums, 20 ids per request.
    ///
    /// The result is parallel to `ids`: Spotify answers `null` for unknown
    /// ids, which becomes `None`.
    pub async fn get_several_albums(
        &self,
        ids: &[&str],
    ) -> Result<Vec<Option<Album>>, reqwest::Error> {
        let mut albums = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(ALBUMS_PER_REQUEST) {
            let api_url = self.url(&format!("/albums?ids={}", chunk.join(",")));
            let response = self.send(|client| client.get(&api_url)).await?;
            let mut json = response.json::<GetSeveralAlbumsResponse>().await?;

            json.albums.resize(chunk.len(), None);
            albums.extend(json.albums);
        }

        Ok(albums)
    }

    /// Retrieves several artists, 50 ids per request. Parallel to `ids`.
    pub async fn get_several_artists(
        &self,
        ids: &[&str],
    ) -> Result<Vec<Option<Artist>>, reqwest::Error> {
        let mut artists = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(ARTISTS_PER_REQUEST) {
            let api_url = self.url(&format!("/artists?ids={}", chunk.join(",")));
            let response = self.send(|client| client.get(&api_url)).await?;
            let mut json = response.json::<GetSeveralArtistsResponse>().await?;

            json.artists.resize(chunk.len(), None);
            artists.extend(json.artists);
        }

        Ok(artists)
    }

    pub async fn get_album(&self, id: &str) -> Result<Album, reqwest::Error> {
        let api_url = self.url(&format!("/albums/{}", id));
        self.send(|client| client.get(&api_url))
            .await?
            .json::<Album>()
            .await
    }

    pub async fn get_artist(&self, id: &str) -> Result<Artist, reqwest::Error> {
        let api_url = self.url(&format!("/artists/{}", id));
        self.send(|client| client.get(&api_url))
            .await?
            .json::<Artist>()
            .await
    }

    /// Retrieves a single playlist without its track listing.
    ///
    /// Private playlists of other users and deleted playlists answer with
    /// 403/404, which is returned as an error.
    pub async fn get_playlist(&self, id: &str) -> Result<Playlist, reqwest::Error> {
        let api_url = self.url(&format!("/playlists/{}?fields={}", id, PLAYLIST_FIELDS));
        self.send(|client| client.get(&api_url))
            .await?
            .json::<Playlist>()
            .await
    }
}
