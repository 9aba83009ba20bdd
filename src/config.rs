//! Configuration for the APP client
//!
//! Centralized configuration with sensible defaults.

use std::fmt;
use std::time::Duration;

use crate::error::{AppError, Result};

/// Default connect/read/write timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Main configuration for an APP session
#[derive(Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Endpoint
    // -------------------------------------------------------------------------
    /// Server host name or address
    pub host: String,

    /// Server TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Transport
    // -------------------------------------------------------------------------
    /// Connect, read and write timeout. Zero disables the timeout.
    pub timeout: Duration,

    /// Echo every sent and received line to the observer
    pub debug: bool,

    // -------------------------------------------------------------------------
    // Automatic login
    // -------------------------------------------------------------------------
    pub user: Option<String>,
    pub domain: Option<String>,
    pub password: Option<String>,
}

/// Login credentials, present only when user, domain and password are all set
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub domain: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("domain", &self.domain)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .field("debug", &self.debug)
            .field("user", &self.user)
            .field("domain", &self.domain)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            timeout: DEFAULT_TIMEOUT,
            debug: false,
            user: None,
            domain: None,
            password: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Build a config from `(key, value)` option pairs.
    ///
    /// Recognized keys (case-insensitive): `Timeout` (seconds), `Debug`,
    /// `User`, `Domain`, `Password`. Unknown keys are ignored.
    pub fn from_options<I, K, V>(host: impl Into<String>, port: u16, options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut builder = Config::builder().host(host).port(port);

        for (key, value) in options {
            let key = key.as_ref();
            let value = value.as_ref();
            builder = match key.to_ascii_lowercase().as_str() {
                "timeout" => {
                    let secs = value.trim().parse::<u64>().map_err(|_| {
                        AppError::Config(format!("Timeout must be whole seconds, got {:?}", value))
                    })?;
                    builder.timeout(Duration::from_secs(secs))
                }
                "debug" => builder.debug(parse_flag(value)?),
                "user" => builder.user(value),
                "domain" => builder.domain(value),
                "password" => builder.password(value),
                _ => {
                    tracing::debug!("Ignoring unknown option {}", key);
                    builder
                }
            };
        }

        Ok(builder.build())
    }

    /// Credentials for automatic login, if all three parts were supplied
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.user, &self.domain, &self.password) {
            (Some(user), Some(domain), Some(password)) => Some(Credentials {
                user: user.clone(),
                domain: domain.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }

    /// Timeout to apply to the socket, `None` meaning block forever
    pub fn socket_timeout(&self) -> Option<Duration> {
        if self.timeout.is_zero() {
            None
        } else {
            Some(self.timeout)
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(AppError::Config(format!(
            "Debug must be a boolean flag, got {:?}",
            other
        ))),
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the connect/read/write timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Enable or disable wire tracing
    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.config.user = Some(user.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.config.domain = Some(domain.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = Some(password.into());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
