use thiserror::Error;

/// Top-level error type for the `genexis-api` crate.
///
/// Covers every failure mode of a router session: login, transport,
/// JSON-RPC envelope decoding, router-reported failures, and mapping raw
/// results into domain records. A rejected login is not an error at the
/// public surface; [`Session::authorize`](crate::Session::authorize)
/// reports it as `Ok(false)`.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login was rejected or the login response had an unexpected shape.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A privileged call was attempted before a session token was obtained.
    #[error("Not authorized -- call authorize() first")]
    Unauthorized,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── JSON-RPC ────────────────────────────────────────────────────
    /// The body was not JSON or lacked the `result` envelope.
    /// Carries the raw response text for diagnostics.
    #[error("Protocol error: {message} - {body}")]
    Protocol { message: String, body: String },

    /// The router answered with a non-zero result code.
    #[error("Router reported failure: {message}")]
    RemoteOperation { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// A required field was absent or had the wrong type.
    #[error("Unexpected {context} response: {message}")]
    DataShape { context: String, message: String },

    /// A hardware address was not a well-formed 6-byte value.
    #[error("Invalid MAC address: {0:?}")]
    InvalidMacAddress(String),

    /// An address field was not a dotted-quad IPv4 address.
    #[error("Invalid IPv4 address: {0:?}")]
    InvalidIpv4Address(String),
}

impl Error {
    /// Build a [`Error::DataShape`] for a missing or mistyped field.
    pub(crate) fn shape(context: &str, message: impl Into<String>) -> Self {
        Self::DataShape {
            context: context.to_owned(),
            message: message.into(),
        }
    }

    /// Returns `true` if re-authorizing the session might resolve this error.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::Unauthorized)
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// The raw response body attached to a protocol error, if any.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Protocol { body, .. } => Some(body),
            _ => None,
        }
    }
}
