//! HTTP transport for the Siswa Manager API with consistent timeouts and error
//! handling. Resource wrappers in `features` use these helpers so request setup,
//! bearer headers and envelope decoding live in one place. The client never
//! stores tokens; callers pass them per request.

pub mod config;
pub mod endpoints;
pub mod envelope;
pub mod error;

pub use self::config::ApiConfig;
pub use self::envelope::{Envelope, Page, Paginated, Pagination};
pub use self::error::{ApiError, FieldMessages};

use reqwest::{header, Client, Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info_span, Instrument};

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Build a client for the configured API.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the underlying HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET a resource, optionally authenticated.
    ///
    /// # Errors
    /// Returns an `ApiError` for transport failures, non-2xx answers or undecodable bodies.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&SecretString>,
    ) -> Result<Envelope<T>, ApiError> {
        self.send::<(), (), T>(Method::GET, path, None, None, token)
            .await
    }

    /// GET a resource with query parameters (pagination, search).
    ///
    /// # Errors
    /// Returns an `ApiError` for transport failures, non-2xx answers or undecodable bodies.
    pub async fn get_with_query<Q: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
        token: Option<&SecretString>,
    ) -> Result<Envelope<T>, ApiError> {
        self.send::<Q, (), T>(Method::GET, path, Some(query), None, token)
            .await
    }

    /// POST an optional JSON body.
    ///
    /// # Errors
    /// Returns an `ApiError` for transport failures, non-2xx answers or undecodable bodies.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
        token: Option<&SecretString>,
    ) -> Result<Envelope<T>, ApiError> {
        self.send::<(), B, T>(Method::POST, path, None, body, token)
            .await
    }

    /// PUT a JSON body.
    ///
    /// # Errors
    /// Returns an `ApiError` for transport failures, non-2xx answers or undecodable bodies.
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&SecretString>,
    ) -> Result<Envelope<T>, ApiError> {
        self.send::<(), B, T>(Method::PUT, path, None, Some(body), token)
            .await
    }

    /// DELETE a resource; some endpoints (account deletion) expect a JSON body.
    ///
    /// # Errors
    /// Returns an `ApiError` for transport failures, non-2xx answers or undecodable bodies.
    pub async fn delete<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
        token: Option<&SecretString>,
    ) -> Result<Envelope<T>, ApiError> {
        self.send::<(), B, T>(Method::DELETE, path, None, body, token)
            .await
    }

    async fn send<Q, B, T>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
        token: Option<&SecretString>,
    ) -> Result<Envelope<T>, ApiError>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.url(path);
        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(header::ACCEPT, "application/json");

        if let Some(query) = query {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = with_json_body(builder, body)?;
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token.expose_secret());
        }

        let span = info_span!(
            "http.request",
            http.method = %method,
            url = %url
        );

        async move {
            let response = builder.send().await.map_err(map_request_error)?;
            let status = response.status();
            let text = response.text().await.map_err(map_request_error)?;

            debug!(status = status.as_u16(), "response received");

            if status.is_success() {
                envelope::decode(&text)
            } else {
                Err(envelope::http_error(status.as_u16(), &text))
            }
        }
        .instrument(span)
        .await
    }
}

/// Serialize the body up front so encoding failures surface as request errors.
fn with_json_body<B: Serialize + ?Sized>(
    builder: RequestBuilder,
    body: &B,
) -> Result<RequestBuilder, ApiError> {
    let payload = serde_json::to_vec(body)
        .map_err(|err| ApiError::Serialization(format!("Failed to encode request: {err}")))?;
    Ok(builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(payload))
}

/// Maps transport errors into operator-facing variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_decode() {
        ApiError::Parse(format!("Failed to read response: {err}"))
    } else {
        ApiError::Network(format!(
            "Network error. Please check your connection. ({err})"
        ))
    }
}
