//! Shared configuration for Genexis router tools.
//!
//! TOML profiles, password resolution (env + keyring + plaintext),
//! and translation to `genexis_api::SessionConfig`. The CLI adds
//! flag-aware wrappers on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use genexis_api::{SessionConfig, TlsMode, TransportConfig};

/// Environment variable consulted first for the router password.
pub const PASSWORD_ENV: &str = "GENEXIS_PASSWORD";

/// Keyring service name under which passwords are stored.
pub const KEYRING_SERVICE: &str = "genexis";

/// Factory default login on Genexis routers.
pub const DEFAULT_USERNAME: &str = "admin";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' not found in config")]
    UnknownProfile { profile: String },

    #[error("no password configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named router profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// A named router profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Router host or URL (e.g., "192.168.1.1" or "http://router.lan").
    pub host: String,

    /// Login name; `admin` when unset.
    pub username: Option<String>,

    /// Password (plaintext -- prefer keyring or env var).
    pub password: Option<String>,

    /// Path to custom CA certificate for HTTPS endpoints.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout in seconds.
    pub timeout: Option<u64>,
}

impl Profile {
    /// Login name, falling back to the router default.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_USERNAME)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "genexis", "genexis").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("genexis");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// A missing file is not an error; defaults and `GENEXIS_*` variables
/// still apply. Nested keys use a double underscore, e.g.
/// `GENEXIS_DEFAULTS__TIMEOUT=30`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("GENEXIS_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Profile selection ───────────────────────────────────────────────

impl Config {
    /// Name of the selected profile: `name`, else `default_profile`, else `default`.
    pub fn profile_name<'a>(&'a self, name: Option<&'a str>) -> &'a str {
        name.or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    /// Look up a profile by name, or the default profile when `name` is `None`.
    pub fn profile(&self, name: Option<&str>) -> Result<(&str, &Profile), ConfigError> {
        let name = self.profile_name(name);
        self.profiles
            .get_key_value(name)
            .map(|(key, profile)| (key.as_str(), profile))
            .ok_or_else(|| ConfigError::UnknownProfile {
                profile: name.into(),
            })
    }
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the router password for a profile.
///
/// Order: `GENEXIS_PASSWORD`, the system keyring entry
/// `genexis / <profile>/password`, then plaintext in the profile.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Env var
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    // 2. Keyring
    if let Some(pw) = keyring_password(profile_name) {
        return Ok(pw);
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

fn keyring_password(profile_name: &str) -> Option<SecretString> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password")).ok()?;
    entry.get_password().ok().map(SecretString::from)
}

/// TLS policy for a profile: `insecure` wins, then a custom CA, then the
/// system store when verification was explicitly requested. Routers ship
/// self-signed certificates, so an unset `insecure` accepts them.
pub fn tls_mode(insecure: Option<bool>, ca_cert: Option<&Path>) -> TlsMode {
    match (insecure, ca_cert) {
        (Some(true), _) => TlsMode::DangerAcceptInvalid,
        (_, Some(path)) => TlsMode::CustomCa(path.to_path_buf()),
        (Some(false), None) => TlsMode::System,
        (None, None) => TlsMode::DangerAcceptInvalid,
    }
}

/// Build a `SessionConfig` from a profile -- no CLI flag overrides.
pub fn profile_to_session_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<SessionConfig, ConfigError> {
    let password = resolve_password(profile, profile_name)?;
    session_config_with_password(profile, profile_name, password)
}

/// Build a `SessionConfig` from a profile with an already resolved password.
pub fn session_config_with_password(
    profile: &Profile,
    profile_name: &str,
    password: SecretString,
) -> Result<SessionConfig, ConfigError> {
    if profile.host.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: format!("profile '{profile_name}' has no host"),
        });
    }

    Ok(SessionConfig {
        endpoint: profile.host.clone(),
        username: profile.username().to_owned(),
        password,
        transport: TransportConfig {
            tls: tls_mode(profile.insecure, profile.ca_cert.as_deref()),
            timeout: Duration::from_secs(profile.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        },
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    const SAMPLE: &str = r#"
default_profile = "home"

[defaults]
output = "json"
timeout = 20

[profiles.home]
host = "192.168.1.1"
password = "hunter2"

[profiles.office]
host = "https://10.0.0.1"
username = "ops"
insecure = false
timeout = 5
"#;

    fn write_sample(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn loads_profiles_and_defaults_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&write_sample(&dir)).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("home"));
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.timeout, 20);
        assert!(!cfg.defaults.insecure);
        assert_eq!(cfg.profiles.len(), 2);
        assert_eq!(cfg.profiles["office"].username(), "ops");
        assert_eq!(cfg.profiles["home"].username(), "admin");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.defaults.timeout, 10);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn save_then_load_preserves_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                host: "172.16.0.1".into(),
                timeout: Some(3),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles["lab"].host, "172.16.0.1");
        assert_eq!(loaded.profiles["lab"].timeout, Some(3));
    }

    #[test]
    fn profile_selection() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&write_sample(&dir)).unwrap();

        let (name, profile) = cfg.profile(None).unwrap();
        assert_eq!(name, "home");
        assert_eq!(profile.host, "192.168.1.1");

        let (name, _) = cfg.profile(Some("office")).unwrap();
        assert_eq!(name, "office");

        assert_eq!(cfg.profile_name(Some("cabin")), "cabin");
        assert_eq!(Config::default().profile_name(None), "default");
        assert!(matches!(
            cfg.profile(Some("cabin")),
            Err(ConfigError::UnknownProfile { profile }) if profile == "cabin"
        ));
    }

    #[test]
    fn tls_mode_precedence() {
        let ca = Path::new("/etc/router-ca.pem");
        assert_eq!(tls_mode(None, None), TlsMode::DangerAcceptInvalid);
        assert_eq!(tls_mode(Some(true), Some(ca)), TlsMode::DangerAcceptInvalid);
        assert_eq!(tls_mode(None, Some(ca)), TlsMode::CustomCa(ca.to_path_buf()));
        assert_eq!(tls_mode(Some(false), None), TlsMode::System);
    }

    #[test]
    fn session_config_requires_host() {
        let profile = Profile {
            password: Some("pw".into()),
            ..Profile::default()
        };
        assert!(matches!(
            profile_to_session_config(&profile, "empty"),
            Err(ConfigError::Validation { field, .. }) if field == "host"
        ));
    }

    #[test]
    fn session_config_from_profile() {
        let profile = Profile {
            host: "192.168.1.1".into(),
            password: Some("hunter2".into()),
            timeout: Some(4),
            ..Profile::default()
        };
        let session = profile_to_session_config(&profile, "genexis-config-test").unwrap();

        assert_eq!(session.endpoint, "192.168.1.1");
        assert_eq!(session.username, "admin");
        assert_eq!(session.transport.timeout, Duration::from_secs(4));
        assert_eq!(session.transport.tls, TlsMode::DangerAcceptInvalid);
        if std::env::var(PASSWORD_ENV).is_err() {
            assert_eq!(session.password.expose_secret(), "hunter2");
        }
    }

    #[test]
    fn explicit_password_skips_resolution() {
        let profile = Profile {
            host: "192.168.1.1".into(),
            insecure: Some(false),
            ..Profile::default()
        };
        let session =
            session_config_with_password(&profile, "lab", SecretString::from("given".to_owned()))
                .unwrap();

        assert_eq!(session.password.expose_secret(), "given");
        assert_eq!(session.transport.tls, TlsMode::System);
        assert_eq!(session.transport.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
