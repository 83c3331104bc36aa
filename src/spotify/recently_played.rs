use super::SpotifyApi;
use crate::{history::Cursor, types::RecentlyPlayedPage};

impl SpotifyApi {
    /// Retrieves one page of the user's recently played tracks.
    ///
    /// `after` is exclusive: only plays strictly newer than the cursor are
    /// returned. Spotify caps `limit` at 50. The page's `cursors.after` is the
    /// cursor for the next request and is absent once there is nothing newer.
    ///
    /// Requires the `user-read-recently-played` scope.
    pub async fn get_recently_played(
        &self,
        after: Option<&Cursor>,
        limit: u32,
    ) -> Result<RecentlyPlayedPage, reqwest::Error> {
        let mut api_url = self.url(&format!("/me/player/recently-played?limit={}", limit));
        if let Some(after) = after {
            api_url.push_str(&format!("&after={}", after));
        }

        let response = self.send(|client| client.get(&api_url)).await?;
        response.json::<RecentlyPlayedPage>().await
    }
}
