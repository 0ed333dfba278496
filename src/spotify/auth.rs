use reqwest::Client;

use crate::{CurateError, Res, config::SpotifySettings, types::TokenResponse};

/// Exchanges the configured refresh token for a fresh access token.
///
/// The client id and secret travel as a basic authorization header, the
/// refresh token as a form field. Nothing is cached: one curation run asks for
/// one token.
///
/// # Errors
///
/// Every failure, from transport errors to a response without an
/// `access_token`, is reported as [`CurateError::Auth`] so the caller can stop
/// before any catalog request is issued.
pub async fn refresh_access_token(settings: &SpotifySettings) -> Res<String> {
    let response = Client::new()
        .post(&settings.token_url)
        .basic_auth(&settings.client_id, Some(&settings.client_secret))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", settings.refresh_token.as_str()),
        ])
        .send()
        .await
        .map_err(|e| CurateError::Auth(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CurateError::Auth(format!(
            "token endpoint answered {status}: {body}"
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| CurateError::Auth(e.to_string()))?;

    if token.access_token.is_empty() {
        return Err(CurateError::Auth(
            "token endpoint returned an empty access token".to_string(),
        ));
    }
    Ok(token.access_token)
}
