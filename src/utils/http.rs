// src/utils/http.rs

//! HTTP client utilities.
//!
//! [`HttpTransport`] performs one GET against the wiki API and decodes JSON.
//! [`HttpFetcher`] wraps any [`ApiTransport`] with the retry discipline: a
//! bounded number of attempts with linear backoff, folding the final failure
//! into a [`FetchFailure`] value instead of an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::error::Result;
use crate::models::{FetchFailure, HttpConfig, WikiConfig};

/// Query string as `(name, value)` pairs.
pub type QueryParams = [(&'static str, String)];

/// Create a configured asynchronous HTTP client.
pub fn create_client(wiki: &WikiConfig, http: &HttpConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&wiki.user_agent)
        .timeout(http.timeout())
        .build()?;
    Ok(client)
}

/// One round trip to the wiki API.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// GET the endpoint with `params` and decode the body as JSON.
    async fn get_json(&self, params: &QueryParams) -> Result<Value>;
}

/// reqwest-backed transport bound to a single `api.php` endpoint.
pub struct HttpTransport {
    client: Client,
    api_url: Url,
}

impl HttpTransport {
    pub fn new(wiki: &WikiConfig, http: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(wiki, http)?,
            api_url: Url::parse(&wiki.api_url)?,
        })
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get_json(&self, params: &QueryParams) -> Result<Value> {
        let text = self
            .client
            .get(self.api_url.clone())
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Attempt budget and backoff base for a single logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Delay after failed attempt `attempt` (1-based): `backoff * attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }
}

impl From<&HttpConfig> for RetryPolicy {
    fn from(config: &HttpConfig) -> Self {
        Self {
            attempts: config.retries,
            backoff: config.backoff(),
        }
    }
}

/// Retrying JSON fetcher.
pub struct HttpFetcher<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: ApiTransport> HttpFetcher<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Fetch JSON, retrying transport and decode failures.
    ///
    /// Never returns an error: after the last attempt the failure is reported
    /// as a value so callers can skip this unit of work and carry on.
    pub async fn fetch(&self, params: &QueryParams) -> std::result::Result<Value, FetchFailure> {
        let attempts = self.policy.attempts.max(1);
        let mut reason = String::new();

        for attempt in 1..=attempts {
            match self.transport.get_json(params).await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    log::warn!("Request failed (attempt {attempt}/{attempts}): {error}");
                    reason = error.to_string();

                    if attempt < attempts {
                        let delay = self.policy.delay_after(attempt);
                        if !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }
                    }
                }
            }
        }

        log::warn!("Giving up on request after {attempts} attempts");
        Err(FetchFailure { attempts, reason })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport double for network-facing tests.

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::Value;

    use super::{ApiTransport, QueryParams};
    use crate::error::{AppError, Result};

    #[derive(Default)]
    struct Script {
        replies: VecDeque<std::result::Result<Value, String>>,
        calls: Vec<Vec<(String, String)>>,
    }

    /// Replays queued replies in order and records every request.
    #[derive(Clone, Default)]
    pub struct ScriptedTransport {
        inner: Arc<Mutex<Script>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, value: Value) -> Self {
            self.inner.lock().unwrap().replies.push_back(Ok(value));
            self
        }

        pub fn fail(self, message: &str) -> Self {
            self.inner
                .lock()
                .unwrap()
                .replies
                .push_back(Err(message.to_string()));
            self
        }

        pub fn call_count(&self) -> usize {
            self.inner.lock().unwrap().calls.len()
        }

        /// Value of `name` in the `index`-th request.
        pub fn param(&self, index: usize, name: &str) -> Option<String> {
            self.inner.lock().unwrap().calls.get(index).and_then(|call| {
                call.iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| value.clone())
            })
        }
    }

    #[async_trait]
    impl ApiTransport for ScriptedTransport {
        async fn get_json(&self, params: &QueryParams) -> Result<Value> {
            let mut script = self.inner.lock().unwrap();
            script.calls.push(
                params
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.clone()))
                    .collect(),
            );
            match script.replies.pop_front() {
                Some(Ok(value)) => Ok(value),
                Some(Err(message)) => Err(AppError::api(message)),
                None => Err(AppError::api("no scripted reply left")),
            }
        }
    }
}
