// Router JSON-RPC session
//
// Wraps `reqwest::Client` with the router's JSON-RPC envelope, session-token
// injection and `result` unwrapping. Login/logout live in `auth.rs`, the
// record-producing calls in `system.rs`, `status.rs` and `ipv4.rs`.

use std::fmt;

use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, error, trace};
use url::Url;

use crate::error::Error;
use crate::transport::{TransportConfig, normalize_endpoint};

/// Envelope id for ordinary calls. Calls are strictly sequential, so the
/// id is never used to correlate responses.
pub(crate) const REQUEST_ID: u32 = 1;

/// Outgoing JSON-RPC 2.0 envelope.
#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    params: Value,
}

/// Everything needed to open a [`Session`] against one router.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Router host or URL; `http://` is assumed when no scheme is given.
    pub endpoint: String,
    pub username: String,
    pub password: SecretString,
    pub transport: TransportConfig,
}

impl SessionConfig {
    /// Build an unauthorized [`Session`] from this config.
    pub fn connect(&self) -> Result<Session, Error> {
        Session::new(
            &self.endpoint,
            self.username.clone(),
            self.password.clone(),
            &self.transport,
        )
    }
}

/// Authenticated channel to a single router.
///
/// Every call after [`authorize`](Self::authorize) carries the session
/// token inside the request parameters; the router uses no cookies or
/// headers. Methods that change the token take `&mut self`, so one
/// `Session` can never run two calls at once. Poll several routers with
/// one `Session` each.
pub struct Session {
    http: reqwest::Client,
    endpoint: Url,
    username: String,
    password: SecretString,
    session_id: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.endpoint.as_str())
            .field("username", &self.username)
            .field("authorized", &self.is_authorized())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session for `host` with a client built from `transport`.
    pub fn new(
        host: &str,
        username: impl Into<String>,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let endpoint = normalize_endpoint(host)?;
        let http = transport.build_client()?;
        Ok(Self::with_client(http, endpoint, username, password))
    }

    /// Create a session with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        endpoint: Url,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            http,
            endpoint,
            username: username.into(),
            password,
            session_id: None,
        }
    }

    /// The JSON-RPC endpoint every call is posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The current session token, if authorized.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn is_authorized(&self) -> bool {
        self.session_id.is_some()
    }

    pub(crate) fn password(&self) -> &SecretString {
        &self.password
    }

    pub(crate) fn set_session_id(&mut self, token: Option<String>) {
        self.session_id = token;
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Invoke `method` with the session token merged into `params`.
    ///
    /// Returns the whole decoded response body. Fails with
    /// [`Error::Unauthorized`] before touching the network when no token
    /// is held, and with [`Error::Protocol`] when the body is not JSON or
    /// has no `result` member.
    pub async fn invoke(&self, method: &str, params: Map<String, Value>) -> Result<Value, Error> {
        let token = self.session_id.as_deref().ok_or(Error::Unauthorized)?;

        let mut payload = Map::new();
        payload.insert("sessionid".into(), Value::String(token.to_owned()));
        payload.extend(params);

        let body = self.post(REQUEST_ID, method, Value::Object(payload)).await?;
        decode_envelope(&body)
    }

    /// Invoke a method without parameters and return the raw response.
    pub async fn query(&self, method: &str) -> Result<Value, Error> {
        self.invoke(method, Map::new()).await
    }

    /// Invoke a method without parameters and deserialize its `result`.
    pub(crate) async fn call<T: DeserializeOwned>(&self, method: &str) -> Result<T, Error> {
        let response = self.query(method).await?;
        serde_json::from_value(take_result(response))
            .map_err(|e| Error::shape(method, e.to_string()))
    }

    /// POST one envelope and return the raw body text.
    pub(crate) async fn post(&self, id: u32, method: &str, params: Value) -> Result<String, Error> {
        debug!(method, "POST {}", self.endpoint);

        let request = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(method, %status, bytes = body.len(), "response received");
        Ok(body)
    }
}

/// Parse a response body and check for the `result` member.
pub(crate) fn decode_envelope(body: &str) -> Result<Value, Error> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        error!("router didn't respond with JSON, check that the credentials are correct");
        return Err(Error::Protocol {
            message: "an unknown response".into(),
            body: body.to_owned(),
        });
    };

    if value.get("result").is_none() {
        return Err(Error::Protocol {
            message: "router didn't respond with a result".into(),
            body: body.to_owned(),
        });
    }
    Ok(value)
}

/// Move the `result` member out of a decoded envelope.
pub(crate) fn take_result(mut envelope: Value) -> Value {
    envelope
        .get_mut("result")
        .map(Value::take)
        .unwrap_or(Value::Null)
}
