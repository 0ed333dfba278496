use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, StatusCode, header::RETRY_AFTER};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    CurateError, Res, info,
    spotify::rate_limit::{RateLimitGate, parse_retry_after},
    warning,
};

/// Query parameters attached to a single request.
pub type Params<'a> = [(&'a str, &'a str)];

/// Issues single authorized requests behind the shared backoff gate.
///
/// Every request waits for the gate to be open, is logged, and on a 429 the
/// fetcher backs off through the gate and sends the same request again. A
/// retried request may itself be throttled; the loop simply goes around again.
/// Any other non-success status is returned as [`CurateError::Upstream`].
#[derive(Clone)]
pub struct Fetcher {
    http: Client,
    access_token: String,
    gate: Arc<RateLimitGate>,
}

impl Fetcher {
    pub fn new(access_token: impl Into<String>, gate: Arc<RateLimitGate>) -> Self {
        Self {
            http: Client::new(),
            access_token: access_token.into(),
            gate,
        }
    }

    pub fn gate(&self) -> &Arc<RateLimitGate> {
        &self.gate
    }

    /// GETs `url` and decodes the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, url: &str, params: &Params<'_>) -> Res<T> {
        self.send::<T, ()>(Method::GET, url, params, None).await
    }

    /// Sends `body` as JSON with the given method and decodes the JSON reply.
    pub async fn send_json<T, B>(&self, method: Method, url: &str, body: &B) -> Res<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(method, url, &[], Some(body)).await
    }

    async fn send<T, B>(
        &self,
        method: Method,
        url: &str,
        params: &Params<'_>,
        body: Option<&B>,
    ) -> Res<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        loop {
            self.gate.wait_until_open().await;

            info!("fetching {} {}", method, url);
            let response = self
                .request(method.clone(), url, params, body)
                .send()
                .await
                .map_err(|source| CurateError::Network {
                    url: url.to_string(),
                    source,
                })?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                let delay = parse_retry_after(
                    response
                        .headers()
                        .get(RETRY_AFTER)
                        .and_then(|v| v.to_str().ok()),
                );
                warning!("caught 429 for {}, retrying after {:?}", url, delay);
                self.gate.back_off(delay).await;
                continue; // retry
            }

            let text = response
                .text()
                .await
                .map_err(|source| CurateError::Network {
                    url: url.to_string(),
                    source,
                })?;

            if !status.is_success() {
                return Err(CurateError::Upstream {
                    url: url.to_string(),
                    status,
                    body: text,
                });
            }

            // Some write endpoints answer with an empty body.
            let text = if text.trim().is_empty() { "null" } else { &text };
            return serde_json::from_str(text).map_err(|source| CurateError::Decode {
                url: url.to_string(),
                source,
            });
        }
    }

    fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        params: &Params<'_>,
        body: Option<&B>,
    ) -> RequestBuilder {
        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&self.access_token);
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request
    }
}
