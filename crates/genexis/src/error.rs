//! CLI error types with miette diagnostics.
//!
//! Maps `genexis_api::Error` and `ConfigError` into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use genexis_api::Error as ApiError;
use genexis_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PROTOCOL: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to router at {url}")]
    #[diagnostic(
        code(genexis::connection_failed),
        help(
            "Check that the router is reachable from this machine.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(genexis::tls_error),
        help(
            "Routers usually serve a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or configure ca_cert in your profile."
        )
    )]
    TlsError { message: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(genexis::timeout),
        help("Increase timeout with --timeout or check router responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed")]
    #[diagnostic(
        code(genexis::auth_failed),
        help(
            "Verify the username and password for profile '{profile}'.\n\
             Pass --password or set GENEXIS_PASSWORD."
        )
    )]
    AuthFailed { profile: String },

    #[error("No password configured for profile '{profile}'")]
    #[diagnostic(
        code(genexis::no_credentials),
        help(
            "Set GENEXIS_PASSWORD, pass --password, or store it in the keyring\n\
             under service 'genexis', user '{profile}/password'."
        )
    )]
    NoCredentials { profile: String },

    // ── Router responses ─────────────────────────────────────────────

    #[error("Unexpected router response: {message}")]
    #[diagnostic(
        code(genexis::protocol),
        help("Raw response: {body}")
    )]
    Protocol { message: String, body: String },

    #[error("Router rejected the request: {message}")]
    #[diagnostic(code(genexis::remote_operation))]
    RemoteOperation { message: String },

    #[error("Could not interpret router data: {message}")]
    #[diagnostic(
        code(genexis::data_shape),
        help("The firmware may report this field differently. Try: genexis query <method>")
    )]
    DataShape { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(genexis::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(genexis::profile_not_found),
        help("Add a [profiles.{name}] section to {path}")
    )]
    ProfileNotFound { name: String, path: String },

    #[error("No router configured")]
    #[diagnostic(
        code(genexis::no_config),
        help(
            "Pass --host, set GENEXIS_HOST, or add a profile to the config file.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(genexis::config))]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(genexis::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(genexis::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::ProfileNotFound { .. } | Self::NoConfig { .. } => exit_code::NOT_FOUND,
            Self::Protocol { .. } | Self::DataShape { .. } => exit_code::PROTOCOL,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── genexis_api::Error → CliError mapping ────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(e) if e.is_timeout() => CliError::Timeout,
            ApiError::Transport(e) => CliError::ConnectionFailed {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
                source: Box::new(e),
            },
            ApiError::Tls(message) => CliError::TlsError { message },
            ApiError::InvalidUrl(e) => CliError::Validation {
                field: "host".into(),
                reason: e.to_string(),
            },
            ApiError::Authentication { .. } | ApiError::Unauthorized => CliError::AuthFailed {
                profile: "current".into(),
            },
            ApiError::Protocol { message, body } => CliError::Protocol { message, body },
            ApiError::RemoteOperation { message } => CliError::RemoteOperation { message },
            err @ (ApiError::DataShape { .. }
            | ApiError::InvalidMacAddress(_)
            | ApiError::InvalidIpv4Address(_)) => CliError::DataShape {
                message: err.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { profile } => CliError::ProfileNotFound {
                name: profile,
                path: genexis_config::config_path().display().to_string(),
            },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Io(e) => CliError::Io(e),
            other @ (ConfigError::Serialization(_) | ConfigError::Figment(_)) => {
                CliError::Config {
                    message: other.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_map_to_exit_codes() {
        let auth: CliError = ApiError::Unauthorized.into();
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let protocol: CliError = ApiError::Protocol {
            message: "an unknown response".into(),
            body: "<html/>".into(),
        }
        .into();
        assert_eq!(protocol.exit_code(), exit_code::PROTOCOL);

        let mac: CliError = ApiError::InvalidMacAddress("zz".into()).into();
        assert!(matches!(mac, CliError::DataShape { ref message } if message.contains("zz")));

        let remote: CliError = ApiError::RemoteOperation {
            message: "busy".into(),
        }
        .into();
        assert_eq!(remote.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn config_errors_map_to_exit_codes() {
        let missing: CliError = ConfigError::UnknownProfile {
            profile: "cabin".into(),
        }
        .into();
        assert_eq!(missing.exit_code(), exit_code::NOT_FOUND);

        let creds: CliError = ConfigError::NoCredentials {
            profile: "home".into(),
        }
        .into();
        assert_eq!(creds.exit_code(), exit_code::AUTH);
    }
}
