//! HTTP request layer.
//!
//! Every outgoing request picks up the stored bearer token when one is
//! present; an empty credential store simply means the authorization header
//! is omitted, requests are never queued or blocked on it. When a request
//! that carried the stored token comes back 401, the client raises the
//! authentication-lost signal before propagating the failure to the caller.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tracing::{debug, instrument, trace, warn};

use nexusmind_core::error::{AuthError, NetworkError, ServerError};
use nexusmind_core::{AccessToken, ApiUrl, CredentialStore, Error, Result};

use crate::wire::ErrorBody;

/// Capacity of the authentication-lost channel. Concurrent 401s beyond this
/// collapse into a lagged receiver, which the subscriber treats the same as
/// one signal.
const AUTH_LOST_CHANNEL_CAPACITY: usize = 16;

/// Notification that the stored credential was rejected by the backend.
#[derive(Debug, Clone, Copy)]
pub struct AuthLost;

/// Where the bearer token for a request came from. Only rejections of the
/// *stored* token mean the current session died.
enum TokenSource {
    /// No authorization header.
    None,
    /// The token currently in the credential store, if any.
    Stored,
    /// An explicit token not yet persisted (login handshake).
    Explicit,
}

/// Low-level HTTP client for the NexusMind backend.
///
/// Clone is cheap; the reqwest client shares its connection pool.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    api: ApiUrl,
    store: Arc<dyn CredentialStore>,
    auth_lost: broadcast::Sender<AuthLost>,
}

impl HttpClient {
    /// Create a new client for the given backend, reading bearer tokens from
    /// the given credential store.
    pub fn new(api: ApiUrl, store: Arc<dyn CredentialStore>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("nexusmind/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        let (auth_lost, _) = broadcast::channel(AUTH_LOST_CHANNEL_CAPACITY);

        Self {
            client,
            api,
            store,
            auth_lost,
        }
    }

    /// Returns the backend base URL this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Subscribe to the authentication-lost signal.
    pub fn subscribe_auth_lost(&self) -> broadcast::Receiver<AuthLost> {
        self.auth_lost.subscribe()
    }

    /// Make an authenticated GET request using the stored token.
    #[instrument(skip(self), fields(api = %self.api))]
    pub async fn get_json<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!(path, "API GET");
        let request = self.client.get(self.api.endpoint(path));
        let (request, source) = self.attach_stored_token(request);
        let response = request.send().await.map_err(map_transport)?;
        self.handle_response(response, source).await
    }

    /// Make a GET request with an explicit token that is not yet stored.
    #[instrument(skip(self, token), fields(api = %self.api))]
    pub async fn get_json_with_token<R>(&self, path: &str, token: &AccessToken) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!(path, "API GET (explicit token)");
        let response = self
            .client
            .get(self.api.endpoint(path))
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(map_transport)?;
        self.handle_response(response, TokenSource::Explicit).await
    }

    /// Make an authenticated POST request with a JSON body.
    #[instrument(skip(self, body), fields(api = %self.api))]
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        debug!(path, "API POST");
        let request = self.client.post(self.api.endpoint(path)).json(body);
        let (request, source) = self.attach_stored_token(request);
        let response = request.send().await.map_err(map_transport)?;
        self.handle_response(response, source).await
    }

    /// Make an unauthenticated POST request with a form-encoded body.
    /// Used for the credential exchange.
    #[instrument(skip(self, form), fields(api = %self.api))]
    pub async fn post_form<B, R>(&self, path: &str, form: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        debug!(path, "API POST (form)");
        let response = self
            .client
            .post(self.api.endpoint(path))
            .form(form)
            .send()
            .await
            .map_err(map_transport)?;
        self.handle_response(response, TokenSource::None).await
    }

    /// Make an authenticated POST request with a multipart body.
    #[instrument(skip(self, form), fields(api = %self.api))]
    pub async fn post_multipart<R>(&self, path: &str, form: reqwest::multipart::Form) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!(path, "API POST (multipart)");
        let request = self.client.post(self.api.endpoint(path)).multipart(form);
        let (request, source) = self.attach_stored_token(request);
        let response = request.send().await.map_err(map_transport)?;
        self.handle_response(response, source).await
    }

    /// Attach the stored bearer token if one is present.
    fn attach_stored_token(
        &self,
        request: reqwest::RequestBuilder,
    ) -> (reqwest::RequestBuilder, TokenSource) {
        match self.stored_token() {
            Some(token) => (request.bearer_auth(token.as_str()), TokenSource::Stored),
            None => (request, TokenSource::None),
        }
    }

    /// Read the current token from the credential store. A store failure
    /// degrades to sending the request unauthenticated.
    fn stored_token(&self) -> Option<AccessToken> {
        match self.store.load() {
            Ok(credential) => credential.map(|c| c.token),
            Err(e) => {
                warn!(error = %e, "Credential store unavailable, sending unauthenticated");
                None
            }
        }
    }

    /// Handle an API response, decoding the body or mapping the error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        source: TokenSource,
    ) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            return response.json::<R>().await.map_err(map_transport);
        }

        if status == StatusCode::UNAUTHORIZED {
            return match source {
                TokenSource::Stored => {
                    // Raise the signal before control returns to the caller,
                    // then still propagate the failure.
                    debug!("Stored token rejected, raising authentication-lost signal");
                    let _ = self.auth_lost.send(AuthLost);
                    Err(AuthError::TokenRejected.into())
                }
                TokenSource::None | TokenSource::Explicit => {
                    Err(AuthError::InvalidCredentials.into())
                }
            };
        }

        let detail = parse_error_detail(response).await;
        Err(ServerError::new(status.as_u16(), detail).into())
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient").field("api", &self.api).finish()
    }
}

/// Extract the structured `detail` message from an error body, when present.
async fn parse_error_detail(response: reqwest::Response) -> Option<String> {
    match response.json::<ErrorBody>().await {
        Ok(body) => body.detail,
        Err(_) => None,
    }
}

/// Map a reqwest transport failure into the crate error taxonomy.
fn map_transport(err: reqwest::Error) -> Error {
    let network = if err.is_timeout() {
        NetworkError::Timeout
    } else if err.is_connect() {
        NetworkError::Connection {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        NetworkError::Decode {
            message: err.to_string(),
        }
    } else {
        NetworkError::Http {
            message: err.to_string(),
        }
    };
    Error::Network(network)
}
