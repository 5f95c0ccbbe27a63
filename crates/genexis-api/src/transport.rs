// Transport configuration for the router's HTTP endpoint.
//
// Holds the TLS policy and per-request timeout used to build the
// `reqwest::Client`, plus endpoint normalization for bare host names.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::Error;

/// TLS verification mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (routers ship self-signed certificates).
    DangerAcceptInvalid,
}

/// Transport configuration for building the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("genexis-api/", env!("CARGO_PKG_VERSION")));

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// Turn a router host or URL into the JSON-RPC endpoint.
///
/// Bare hosts (`192.168.1.1`, `router.lan:8080`) get an `http://` prefix.
pub fn normalize_endpoint(host: &str) -> Result<Url, Error> {
    let host = host.trim();
    if host.starts_with("http://") || host.starts_with("https://") {
        Ok(Url::parse(host)?)
    } else {
        Ok(Url::parse(&format!("http://{host}"))?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_http_scheme() {
        let url = normalize_endpoint("192.168.1.1").unwrap();
        assert_eq!(url.as_str(), "http://192.168.1.1/");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        let url = normalize_endpoint("https://router.lan:8443").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.port(), Some(8443));
    }

    #[test]
    fn invalid_host_is_rejected() {
        let result = normalize_endpoint("http://exa mple");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn default_transport_builds() {
        let config = TransportConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.build_client().is_ok());
    }
}
