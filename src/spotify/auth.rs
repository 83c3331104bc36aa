use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    Res, config,
    server::start_api_server,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// Maximum time to wait for the user to finish authorizing in the browser.
const AUTH_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the OAuth 2.0 PKCE flow and returns the obtained token.
///
/// # Authentication Flow
///
/// 1. **PKCE Setup**: Generates a random code verifier and its SHA256 challenge
/// 2. **Server Start**: Launches the local callback server in the background
/// 3. **Browser Launch**: Opens the Spotify authorization URL
/// 4. **Callback Handling**: The `/callback` handler exchanges the code for a token
///    and stores it in `shared_state`
/// 5. **Waiting**: Polls `shared_state` until the token arrives or 60 seconds pass
///
/// The caller is responsible for persisting the token.
///
/// # Errors
///
/// Returns an error if a required configuration value is missing or the flow
/// times out without a token.
pub async fn authorize(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Res<Token> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let auth_url = utils::build_authorize_url(
        &config::spotify_apiauth_url(),
        &config::spotify_client_id()?,
        &config::spotify_redirect_uri()?,
        &code_challenge,
        &config::spotify_scope(),
    );

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    wait_for_token(shared_state, AUTH_TIMEOUT)
        .await
        .ok_or_else(|| "Authentication failed or timed out.".into())
}

/// Polls the shared state once per second until the callback handler stored
/// a token or `max_wait` elapsed.
async fn wait_for_token(
    shared_state: Arc<Mutex<Option<PkceToken>>>,
    max_wait: Duration,
) -> Option<Token> {
    let start = tokio::time::Instant::now();

    while start.elapsed() < max_wait {
        {
            let lock = shared_state.lock().await;
            if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.clone()) {
                return Some(token);
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a new access token.
///
/// Spotify may or may not rotate the refresh token. When the response does
/// not contain one, the returned token carries the old one.
pub async fn refresh_token(refresh_token: &str) -> Res<Token> {
    let client_id = config::spotify_client_id()?;

    let client = Client::new();
    let response = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<TokenResponse>().await?;
    Ok(into_token(json, Some(refresh_token)))
}

/// Exchanges the authorization code from the callback for an access token.
///
/// `verifier` must be the code verifier whose challenge was sent with the
/// authorization request.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Res<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;

    let client = Client::new();
    let response = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<TokenResponse>().await?;
    Ok(into_token(json, None))
}

fn into_token(response: TokenResponse, previous_refresh_token: Option<&str>) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .or_else(|| previous_refresh_token.map(str::to_string))
            .unwrap_or_default(),
        scope: response.scope.unwrap_or_default(),
        expires_in: response.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
