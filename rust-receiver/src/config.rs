//! Configuration module for environment variable parsing.
//!
//! The listen port is fixed at 9090; only logging is configurable. Bad values
//! fall back to defaults and are reported back to the caller, since the
//! subscriber that would print them is itself configured from here.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

/// Port the receiver always listens on.
pub const LISTEN_PORT: u16 = 9090;

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable lines, one event per line
    #[default]
    Text,
    /// Structured JSON, one object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// An environment variable that was set but could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidVar {
    pub name: &'static str,
    pub value: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Log line format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Also returns every variable whose value was rejected, so they can be
    /// logged once tracing is up.
    pub fn from_env() -> (Self, Vec<InvalidVar>) {
        let mut invalid = Vec::new();

        let config = Config {
            log_format: parse_var("LOG_FORMAT", LogFormat::default(), &mut invalid),
        };

        (config, invalid)
    }

    /// Address to bind: all interfaces on port 9090.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], LISTEN_PORT))
    }
}

/// Parse an environment variable, falling back to `default` when it is unset
/// or unparseable. Unparseable values are pushed onto `invalid`.
fn parse_var<T>(name: &'static str, default: T, invalid: &mut Vec<InvalidVar>) -> T
where
    T: FromStr,
{
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            invalid.push(InvalidVar { name, value: raw });
            default
        }
    }
}
