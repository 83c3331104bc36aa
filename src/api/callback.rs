use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{spotify, types::PkceToken, warning};

/// Receives Spotify's redirect and completes the PKCE exchange.
///
/// The obtained token is written into the shared state, where
/// [`spotify::auth::authorize`] picks it up.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PkceToken>>>>,
) -> Html<&'static str> {
    if let Some(reason) = params.get("error") {
        warning!("Authorization was denied: {}", reason);
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let verifier = {
        let state = shared_state.lock().await;
        match state.as_ref() {
            Some(pkce) => pkce.code_verifier.clone(),
            None => return Html("<h4>Missing PKCE code verifier.</h4>"),
        }
    };

    match spotify::auth::exchange_code_pkce(code, &verifier).await {
        Ok(token) => {
            if let Some(pkce) = shared_state.lock().await.as_mut() {
                pkce.token = Some(token);
            }
            Html("<h2>Authentication successful.</h2><p>You can close this browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
