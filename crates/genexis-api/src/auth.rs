// Session login/logout
//
// `session.login` trades the credentials for an opaque session token that
// every later call carries in its params. `session.destroy` invalidates it
// on the router side.

use secrecy::ExposeSecret;
use serde_json::{Map, Value, json};
use tracing::{debug, error, warn};

use crate::client::Session;
use crate::error::Error;
use crate::models::RpcStatus;

const LOGIN_REQUEST_ID: u32 = 90;

impl Session {
    /// Log in and store the session token.
    ///
    /// Returns `Ok(true)` when the router accepted the credentials and
    /// `Ok(false)` when it rejected them or answered with something that is
    /// not a login response (the latter is logged at `error` level). Only
    /// transport failures such as a timeout are returned as `Err`.
    pub async fn authorize(&mut self) -> Result<bool, Error> {
        match self.login().await {
            Ok(token) => {
                self.set_session_id(Some(token));
                debug!("login successful");
                Ok(true)
            }
            Err(Error::Authentication { message }) => {
                warn!("login failed: {message}");
                self.set_session_id(None);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn login(&self) -> Result<String, Error> {
        debug!(username = self.username(), "logging in at {}", self.endpoint());

        let params = json!({
            "username": self.username(),
            "password": self.password().expose_secret(),
        });
        let body = self.post(LOGIN_REQUEST_ID, "session.login", params).await?;

        let malformed = |reason: &str| {
            error!(
                response = %body,
                "couldn't fetch session token: {reason}"
            );
            Error::Authentication {
                message: format!("unexpected login response: {reason}"),
            }
        };

        let envelope: Value =
            serde_json::from_str(&body).map_err(|e| malformed(&e.to_string()))?;
        let result = envelope
            .get("result")
            .cloned()
            .ok_or_else(|| malformed("missing result"))?;
        let status: RpcStatus =
            serde_json::from_value(result).map_err(|e| malformed(&e.to_string()))?;

        match status.result {
            0 => status
                .sessionid
                .filter(|token| !token.is_empty())
                .ok_or_else(|| malformed("missing sessionid")),
            -1 => Err(Error::Authentication {
                message: "username or password is incorrect".into(),
            }),
            code => Err(malformed(&format!("result code {code}"))),
        }
    }

    /// End the session.
    ///
    /// Best effort: a failing `session.destroy` is logged, never returned.
    /// The local token is always cleared.
    pub async fn logout(&mut self) {
        if self.is_authorized() {
            debug!("logging out");
            if let Err(e) = self.invoke("session.destroy", Map::<String, Value>::new()).await {
                error!("logout failed: {e}");
            }
        }
        self.set_session_id(None);
    }
}
