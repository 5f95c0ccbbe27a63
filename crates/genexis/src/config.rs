//! CLI configuration -- thin wrapper around `genexis_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--host, --username, --password, --insecure, --timeout).

use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;

use genexis_api::{SessionConfig, TransportConfig};
use genexis_config::{Config, DEFAULT_USERNAME, Profile, config_path, tls_mode};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use genexis_config::load_config_or_default;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref()).to_owned()
}

/// Fill in the output format from the config defaults when no flag was given.
pub fn apply_output_default(global: &mut GlobalOpts, config: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&config.defaults.output, true).ok();
    }
}

/// Build a `SessionConfig` from the config file, profile, and CLI overrides.
///
/// A named profile that does not exist is an error; the implicit default
/// profile may be absent as long as `--host` is given.
pub fn build_session_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<SessionConfig, CliError> {
    match config.profile(global.profile.as_deref()) {
        Ok((name, profile)) => return resolve_profile(profile, name, global, config),
        Err(err) if global.profile.is_some() => return Err(err.into()),
        Err(_) => {}
    }
    let profile_name = active_profile_name(global, config);

    // No profile -- build from CLI flags / env vars alone
    let host = global.host.clone().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let password = global
        .password
        .clone()
        .map(SecretString::from)
        .ok_or(CliError::NoCredentials {
            profile: profile_name,
        })?;

    Ok(SessionConfig {
        endpoint: host,
        username: global
            .username
            .clone()
            .unwrap_or_else(|| DEFAULT_USERNAME.into()),
        password,
        transport: TransportConfig {
            tls: tls_mode(
                (global.insecure || config.defaults.insecure).then_some(true),
                None,
            ),
            timeout: Duration::from_secs(global.timeout.unwrap_or(config.defaults.timeout)),
        },
    })
}

/// Apply global flag overrides to a profile and build its `SessionConfig`.
///
/// CLI flag overrides take priority over profile values.
fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    config: &Config,
) -> Result<SessionConfig, CliError> {
    let mut effective = profile.clone();

    // 1. Host and username (flag > env > profile)
    if let Some(ref host) = global.host {
        effective.host.clone_from(host);
    }
    if global.username.is_some() {
        effective.username.clone_from(&global.username);
    }

    // 2. TLS verification
    if global.insecure || config.defaults.insecure {
        effective.insecure = Some(true);
    }

    // 3. Timeout (flag > profile > defaults)
    effective.timeout = Some(
        global
            .timeout
            .or(profile.timeout)
            .unwrap_or(config.defaults.timeout),
    );

    // 4. Password (flag > shared resolution chain)
    let password = match global.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => genexis_config::resolve_password(&effective, profile_name)?,
    };

    genexis_config::session_config_with_password(&effective, profile_name, password)
        .map_err(CliError::from)
}
