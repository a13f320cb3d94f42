//! API client.
//!
//! Every verb builds `base_url + path`, attaches the identification, content
//! type and auth headers, runs one round trip through the configured transport
//! and wraps the result in an [`Envelope`].

use crate::client::envelope::Envelope;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Request, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Content type sent with every request.
const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP client for envelope-style JSON APIs.
///
/// Methods that take a result type decode the body as
/// `{ "code": ..., "data": T }`. The `*_status` variants, [`Client::head`] and
/// [`Client::delete`] never read the body and only report the status code.
#[derive(Debug, Clone)]
pub struct Client {
    /// Shared configuration.
    config: Arc<ClientConfig>,
    /// Auth token. Empty means unauthenticated.
    token: String,
}

impl Client {
    /// Creates an unauthenticated client.
    pub fn new(config: impl Into<Arc<ClientConfig>>) -> Self {
        Self {
            config: config.into(),
            token: String::new(),
        }
    }

    /// Returns the shared configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sets the token for all future requests. An empty string switches back
    /// to unauthenticated requests.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    /// Switches back to unauthenticated requests.
    pub fn clear_token(&mut self) {
        self.token.clear();
    }

    /// Returns the current token, if any.
    pub fn token(&self) -> Option<&str> {
        if self.token.is_empty() {
            None
        } else {
            Some(&self.token)
        }
    }

    /// Returns true when requests carry an Authorization header.
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// Issues a GET and decodes the envelope payload as `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>> {
        self.read_request(Method::GET, path, true).await
    }

    /// Issues a GET and reports only the status code.
    pub async fn get_status(&self, path: &str) -> Result<Envelope> {
        self.read_request(Method::GET, path, false).await
    }

    /// Issues a HEAD and reports only the status code.
    pub async fn head(&self, path: &str) -> Result<Envelope> {
        self.read_request(Method::HEAD, path, false).await
    }

    /// Sends `data` as a JSON POST body and decodes the envelope payload as `T`.
    pub async fn post<B, T>(&self, path: &str, data: &B) -> Result<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.write_request(Method::POST, path, data, true).await
    }

    /// Sends `data` as a JSON POST body and reports only the status code.
    pub async fn post_status<B>(&self, path: &str, data: &B) -> Result<Envelope>
    where
        B: Serialize + ?Sized,
    {
        self.write_request(Method::POST, path, data, false).await
    }

    /// Sends `data` as a JSON PUT body and decodes the envelope payload as `T`.
    pub async fn put<B, T>(&self, path: &str, data: &B) -> Result<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.write_request(Method::PUT, path, data, true).await
    }

    /// Sends `data` as a JSON PUT body and reports only the status code.
    pub async fn put_status<B>(&self, path: &str, data: &B) -> Result<Envelope>
    where
        B: Serialize + ?Sized,
    {
        self.write_request(Method::PUT, path, data, false).await
    }

    /// Issues a DELETE with `params` appended to the query string.
    ///
    /// Parameters already present in `path` are kept. The whole query is
    /// re-encoded sorted by key. The body is never read.
    ///
    /// # Arguments
    /// * `path` - Path appended to the base URL
    /// * `params` - Query parameters, e.g. `&HashMap<String, String>`
    pub async fn delete<I, K, V>(&self, path: &str, params: I) -> Result<Envelope>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut url = self.request_url(path)?;
        append_query(&mut url, params);

        let request = self.prepare(Method::DELETE, url, None)?;
        self.execute(request, false).await
    }

    /// Runs a body-less read. Only GET and HEAD are accepted.
    pub(crate) async fn read_request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        decode: bool,
    ) -> Result<Envelope<T>> {
        if method != Method::GET && method != Method::HEAD {
            return Err(ClientError::unsupported_method(method.as_str()));
        }

        let url = self.request_url(path)?;
        let request = self.prepare(method, url, None)?;
        self.execute(request, decode).await
    }

    async fn write_request<B, T>(
        &self,
        method: Method,
        path: &str,
        data: &B,
        decode: bool,
    ) -> Result<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(data).map_err(ClientError::Encode)?;

        let url = self.request_url(path)?;
        let request = self.prepare(method, url, Some(body))?;
        self.execute(request, decode).await
    }

    /// Joins the base URL and path verbatim.
    fn request_url(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.config.base_url(), path);
        Url::parse(&raw)
            .map_err(|e| ClientError::request_with_source(format!("invalid URL '{}'", raw), e))
    }

    fn prepare(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<Request> {
        debug!(
            method = %method,
            url = %url,
            authenticated = self.is_authenticated(),
            "Building request"
        );

        let mut builder = self
            .config
            .transport()
            .request(method, url)
            .header(USER_AGENT, self.config.user_agent())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);

        if self.is_authenticated() {
            builder = builder.header(AUTHORIZATION, format!("Token {}", self.token));
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        builder
            .build()
            .map_err(|e| ClientError::request_with_source("Failed to build request", e))
    }

    /// Runs the round trip. The response is dropped, and its connection
    /// released, on every return path.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: Request,
        decode: bool,
    ) -> Result<Envelope<T>> {
        let target = request.url().to_string();

        let response = self
            .config
            .transport()
            .execute(request)
            .await
            .map_err(|e| {
                warn!(url = %target, error = %e, "Request failed");
                ClientError::transport(&target, e)
            })?;

        let code = response.status().as_u16();
        debug!(url = %target, status = code, "Received response");

        if !decode {
            return Ok(Envelope::status(code));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::transport(&target, e))?;

        Envelope::decode(code, &body).inspect_err(|e| {
            warn!(url = %target, status = code, error = %e, "Failed to decode response");
        })
    }
}

/// Merges `params` into the URL query, sorted by key.
fn append_query<I, K, V>(url: &mut Url, params: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    pairs.extend(
        params
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string())),
    );

    if pairs.is_empty() {
        url.set_query(None);
        return;
    }

    // Stable, so repeated keys keep their order.
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    url.query_pairs_mut().clear().extend_pairs(pairs);
}
