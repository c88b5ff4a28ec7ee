//! Core data models for the Achilles lab

use crate::error::AchillesError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Behavioral profile of a demo app
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Variant {
    /// Ships the textbook version of each bug
    Vulnerable,
    /// Same routes with the fixes applied
    Hardened,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Vulnerable => write!(f, "vulnerable"),
            Variant::Hardened => write!(f, "hardened"),
        }
    }
}

impl FromStr for Variant {
    type Err = AchillesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vulnerable" => Ok(Variant::Vulnerable),
            "hardened" => Ok(Variant::Hardened),
            other => Err(AchillesError::ConfigError(format!(
                "unknown variant '{other}', expected 'vulnerable' or 'hardened'"
            ))),
        }
    }
}

impl Variant {
    /// Returns the home-page banner for this variant
    pub fn banner(&self) -> &'static str {
        match self {
            Variant::Vulnerable => "Vulnerable App - DO NOT USE IN PRODUCTION",
            Variant::Hardened => "Hardened App - Best Practices Applied",
        }
    }
}

/// Configuration for the lab tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabConfig {
    /// Address the demo apps bind to
    #[serde(default = "default_bind_host")]
    pub bind_host: String,
    /// Port the demo apps listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Fetch timeout in seconds (bounded mode)
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
    /// User-Agent header value for outgoing requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Probe connect deadline in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
    /// Port probed when none is given
    #[serde(default = "default_probe_port")]
    pub probe_default_port: u16,
}

fn default_bind_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_fetch_timeout() -> u64 {
    crate::fetch::DEFAULT_FETCH_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    "Achilles-Lab/0.1.0".to_string()
}

fn default_probe_timeout() -> u64 {
    crate::probe::DEFAULT_PROBE_TIMEOUT_SECS
}

fn default_probe_port() -> u16 {
    80
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            bind_host: default_bind_host(),
            port: default_port(),
            fetch_timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
            probe_timeout_secs: default_probe_timeout(),
            probe_default_port: default_probe_port(),
        }
    }
}

/// Result of a single reachability check
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    /// Host or IP that was probed
    pub host: String,
    /// TCP port that was probed
    pub port: u16,
    /// Whether a connection was established within the deadline
    pub reachable: bool,
    /// Time the attempt took
    pub elapsed_ms: u64,
    /// When the check ran (local timezone)
    pub checked_at: DateTime<Local>,
}
