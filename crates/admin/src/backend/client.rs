//! Backend HTTP client core.

use std::sync::Arc;

use axum::http::StatusCode;
use reqwest::header::COOKIE;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::BackendError;
use super::types::ImageField;

/// Name of the JWT cookie issued by the backend at login.
pub(super) const TOKEN_COOKIE: &str = "token";

/// Typed client for the Bazaar REST backend.
///
/// Cheap to clone; all state lives behind an `Arc`. The client itself is
/// stateless with respect to authentication - the session JWT is passed
/// into each admin call so one client instance serves every session.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: String,
}

/// Collections are returned either as a bare array or wrapped in a
/// `{"data": [...]}` envelope depending on the backend route's vintage.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Plain(Vec<T>),
    Wrapped {
        #[serde(default = "Vec::new")]
        data: Vec<T>,
    },
}

impl<T> ListEnvelope<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Plain(items) | Self::Wrapped { data: items } => items,
        }
    }
}

/// Error body shapes the backend is known to produce.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl BackendClient {
    /// Create a new client for the given backend origin.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: Arc::new(BackendClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
            }),
        }
    }

    /// The configured backend origin.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    pub(super) fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    /// Request builder for an admin endpoint, carrying the session JWT.
    pub(super) fn authed(
        &self,
        method: reqwest::Method,
        path: &str,
        token: &str,
    ) -> reqwest::RequestBuilder {
        self.inner
            .client
            .request(method, self.url(path))
            .header(COOKIE, format!("{TOKEN_COOKIE}={token}"))
    }

    /// Map a response's status to the error taxonomy.
    ///
    /// 401 becomes [`BackendError::Unauthorized`]; any other non-success
    /// status becomes [`BackendError::Api`] with the body's JSON error
    /// message (or the raw body) as the detail.
    pub(super) async fn check(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, BackendError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(BackendError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error.or(b.message))
                .unwrap_or(body);
            return Err(BackendError::Api {
                status: StatusCode::from_u16(status.as_u16())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                detail,
            });
        }

        Ok(response)
    }

    /// Send a request and deserialize the JSON body.
    pub(super) async fn send_json<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = Self::check(request.send().await?).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a request expecting a collection, tolerating both envelope shapes.
    pub(super) async fn send_list<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<Vec<T>, BackendError> {
        let envelope: ListEnvelope<T> = Self::send_json(request).await?;
        Ok(envelope.into_items())
    }

    /// Send a request where only the status matters.
    pub(super) async fn send_ok(request: reqwest::RequestBuilder) -> Result<(), BackendError> {
        Self::check(request.send().await?).await?;
        Ok(())
    }

    /// Attach the image slot of a form to a multipart body.
    ///
    /// Field names are snake_cased to match the backend schema; the image
    /// part carries either the upload bytes or the reference string.
    pub(super) fn attach_image(
        form: reqwest::multipart::Form,
        image: &ImageField,
    ) -> reqwest::multipart::Form {
        match image {
            ImageField::Unchanged => form,
            ImageField::Reference(reference) => form.text("image", reference.clone()),
            ImageField::Upload {
                filename,
                content_type,
                bytes,
            } => {
                let part = reqwest::multipart::Part::bytes(bytes.clone())
                    .file_name(filename.clone())
                    .mime_str(content_type)
                    .unwrap_or_else(|_| {
                        reqwest::multipart::Part::bytes(bytes.clone()).file_name(filename.clone())
                    });
                form.part("image", part)
            }
        }
    }
}
