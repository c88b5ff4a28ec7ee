//! Configuration management for the Achilles lab

use crate::error::{AchillesError, Result};
use crate::models::LabConfig;
use serde::Deserialize;
use std::path::Path;

/// File-based configuration structure matching default.toml
#[derive(Debug, Deserialize)]
struct FileConfig {
    server: Option<ServerSection>,
    fetch: Option<FetchSection>,
    probe: Option<ProbeSection>,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct FetchSection {
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeSection {
    timeout_secs: Option<u64>,
    default_port: Option<u16>,
}

/// Loads configuration from a TOML file and merges with defaults
pub fn load_config(path: &Path) -> Result<LabConfig> {
    let content = std::fs::read_to_string(path).map_err(AchillesError::IoError)?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Result<LabConfig> {
    let file_config: FileConfig = toml::from_str(content)?;

    let mut config = LabConfig::default();

    if let Some(server) = file_config.server {
        if let Some(host) = server.host {
            config.bind_host = host;
        }
        if let Some(port) = server.port {
            config.port = port;
        }
    }

    if let Some(fetch) = file_config.fetch {
        if let Some(timeout) = fetch.timeout_secs {
            config.fetch_timeout_secs = timeout;
        }
        if let Some(ua) = fetch.user_agent {
            config.user_agent = ua;
        }
    }

    if let Some(probe) = file_config.probe {
        if let Some(timeout) = probe.timeout_secs {
            config.probe_timeout_secs = timeout;
        }
        if let Some(port) = probe.default_port {
            config.probe_default_port = port;
        }
    }

    Ok(config)
}

/// Merges CLI arguments into an existing LabConfig
pub fn merge_cli_args(config: &mut LabConfig, host: Option<String>, port: Option<u16>) {
    if let Some(h) = host {
        config.bind_host = h;
    }
    if let Some(p) = port {
        config.port = p;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let content = r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [fetch]
            timeout_secs = 3
            user_agent = "Test/1.0"

            [probe]
            timeout_secs = 1
            default_port = 443
        "#;

        let config = parse_config(content).expect("valid config");
        assert_eq!(config.bind_host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.fetch_timeout_secs, 3);
        assert_eq!(config.user_agent, "Test/1.0");
        assert_eq!(config.probe_timeout_secs, 1);
        assert_eq!(config.probe_default_port, 443);
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = parse_config("[server]\nport = 9000\n").expect("valid config");
        assert_eq!(config.port, 9000);
        assert_eq!(config.bind_host, "127.0.0.1");
        assert_eq!(config.fetch_timeout_secs, 10);
        assert_eq!(config.probe_default_port, 80);
    }

    #[test]
    fn test_merge_cli_args() {
        let mut config = LabConfig::default();
        merge_cli_args(&mut config, Some("10.0.0.1".to_string()), Some(3000));
        assert_eq!(config.bind_host, "10.0.0.1");
        assert_eq!(config.port, 3000);
    }
}
