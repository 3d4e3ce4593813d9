//! HTTP transport for the marketplace API.
//!
//! One `reqwest` client behind every request the console makes: joins paths
//! onto the configured base URL, attaches the session bearer token, maps
//! non-2xx responses into typed errors, and retries an idempotent read once
//! on transport failure.

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{ApiErrorBody, AppError};
use crate::session::SessionStore;

/// Whether a request must carry the session bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Attach `Authorization: Bearer <token>`; fail fast if not logged in
    Required,
    /// Send unauthenticated (login only)
    None,
}

/// HTTP transport shared by all resource clients.
pub struct Transport {
    client: Client,
    base_url: Url,
    session: Arc<SessionStore>,
}

impl Transport {
    pub fn new(base_url: Url, session: Arc<SessionStore>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    /// Resolve an API path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| AppError::Config(format!("Invalid API path {}: {}", path, e)))
    }

    fn authorize(&self, builder: RequestBuilder, auth: Auth) -> Result<RequestBuilder, AppError> {
        match auth {
            // Missing token is detected before any network traffic
            Auth::Required => match self.session.token() {
                Some(token) => Ok(builder.bearer_auth(token)),
                None => Err(AppError::MissingToken),
            },
            Auth::None => Ok(builder),
        }
    }

    /// GET a JSON document. Retries exactly once on transport failure.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        auth: Auth,
    ) -> Result<T, AppError> {
        let builder = self
            .authorize(self.client.request(Method::GET, self.endpoint(path)?), auth)?
            .query(query);
        let retry = builder.try_clone();

        match Self::send_and_decode(builder).await {
            Err(AppError::Transport(msg)) => {
                let Some(second) = retry else {
                    return Err(AppError::Transport(msg));
                };
                tracing::warn!("GET {} failed ({}), retrying once", path, msg);
                Self::send_and_decode(second).await
            }
            other => other,
        }
    }

    /// POST a JSON body and decode a JSON response.
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<T, AppError> {
        let builder = self
            .authorize(self.client.request(Method::POST, self.endpoint(path)?), auth)?
            .json(body);
        Self::send_and_decode(builder).await
    }

    /// POST a JSON body, discarding the response body.
    pub async fn post_empty<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<(), AppError> {
        let builder = self
            .authorize(self.client.request(Method::POST, self.endpoint(path)?), auth)?
            .json(body);
        Self::send_and_check(builder).await
    }

    /// POST a multipart form (file-bearing creates), discarding the response body.
    pub async fn post_multipart(&self, path: &str, form: Form, auth: Auth) -> Result<(), AppError> {
        let builder = self
            .authorize(self.client.request(Method::POST, self.endpoint(path)?), auth)?
            .multipart(form);
        Self::send_and_check(builder).await
    }

    /// PATCH a JSON body, discarding the response body.
    pub async fn patch_empty<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<(), AppError> {
        let builder = self
            .authorize(self.client.request(Method::PATCH, self.endpoint(path)?), auth)?
            .json(body);
        Self::send_and_check(builder).await
    }

    /// DELETE a record.
    pub async fn delete(&self, path: &str, auth: Auth) -> Result<(), AppError> {
        let builder =
            self.authorize(self.client.request(Method::DELETE, self.endpoint(path)?), auth)?;
        Self::send_and_check(builder).await
    }

    async fn send_and_decode<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, AppError> {
        let response = builder.send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_and_check(builder: RequestBuilder) -> Result<(), AppError> {
        let response = builder.send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    /// Map a non-2xx response into a typed error carrying the API's message.
    async fn check_status(response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized(message));
        }
        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
