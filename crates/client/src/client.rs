//! HTTP transport for the Code Insight API.
//!
//! Every endpoint goes through [`ApiClient::send`], which attaches the
//! bearer token, enforces the configured timeout and turns failures into
//! [`InsightError`] with the server's message already extracted.

use crate::retry::{execute_with_retry, RetryConfig};
use common::{error_from_response, InsightError, InsightResult, OperationTimer};
use domain::config::ApiConfig;
use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use tracing::debug;

pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: RwLock<Option<String>>,
    retry: RetryConfig,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.token.read().is_some())
            .field("retry", &self.retry)
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> InsightResult<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/')).map_err(|e| {
            InsightError::Configuration(format!("invalid base_url '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(InsightError::Configuration(format!(
                "base_url cannot be used as a base: {}",
                config.base_url
            )));
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("code-insight/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| InsightError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            token: RwLock::new(None),
            retry: RetryConfig::from_api(config),
        })
    }

    pub fn with_token(self, token: Option<String>) -> Self {
        *self.token.write() = token;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Base URL with `segments` appended, each percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> InsightResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| InsightError::Configuration("base_url cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.token.read().as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and check the status. `fallback` is the message used when the
    /// error body carries none.
    pub async fn send(&self, builder: RequestBuilder, fallback: &str) -> InsightResult<Response> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Response received");

        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_from_response(status.as_u16(), &body, fallback))
    }

    /// Run `operation` under the client's 5xx retry policy
    pub async fn retrying<F, Fut, T>(&self, operation_name: &str, operation: F) -> InsightResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = InsightResult<T>>,
    {
        let timer = OperationTimer::new(operation_name);
        let result = execute_with_retry(&self.retry, operation_name, operation).await;
        timer.finish_with_result(&result);
        result
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        fallback: &str,
    ) -> InsightResult<T> {
        let url = self.endpoint(segments)?;
        let response = self
            .send(self.request(Method::GET, url).query(query), fallback)
            .await?;
        decode_json(response).await
    }

    pub async fn get_text(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        fallback: &str,
    ) -> InsightResult<String> {
        let url = self.endpoint(segments)?;
        let response = self
            .send(self.request(Method::GET, url).query(query), fallback)
            .await?;
        response.text().await.map_err(transport_error)
    }

    pub async fn post_json<B, T>(&self, segments: &[&str], body: &B, fallback: &str) -> InsightResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let response = self
            .send(self.request(Method::POST, url).json(body), fallback)
            .await?;
        decode_json(response).await
    }

    pub async fn put_json<B, T>(&self, segments: &[&str], body: &B, fallback: &str) -> InsightResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let response = self
            .send(self.request(Method::PUT, url).json(body), fallback)
            .await?;
        decode_json(response).await
    }

    /// POST without a body; `query` carries the parameters
    pub async fn post_query<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        fallback: &str,
    ) -> InsightResult<T> {
        let url = self.endpoint(segments)?;
        let response = self
            .send(self.request(Method::POST, url).query(query), fallback)
            .await?;
        decode_json(response).await
    }

    /// DELETE, ignoring the response body
    pub async fn delete(&self, segments: &[&str], fallback: &str) -> InsightResult<()> {
        let url = self.endpoint(segments)?;
        self.send(self.request(Method::DELETE, url), fallback).await?;
        Ok(())
    }
}

pub(crate) fn transport_error(err: reqwest::Error) -> InsightError {
    if err.is_timeout() {
        InsightError::Network(format!("request timed out: {}", err))
    } else {
        InsightError::Network(err.to_string())
    }
}

pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> InsightResult<T> {
    let bytes = response.bytes().await.map_err(transport_error)?;
    Ok(serde_json::from_slice(&bytes)?)
}
