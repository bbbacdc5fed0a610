//! Configuration types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Deadline for a whole request, streaming included.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Whether to enable permissive CORS.
    #[serde(default)]
    pub cors_permissive: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl ServerConfig {
    /// The configured host and port as `host:port`.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The request deadline.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
            cors_permissive: false,
        }
    }
}

/// Locations of the external diagnostic binaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolsConfig {
    /// Binary used for latency probes.
    #[serde(default = "default_ping_binary")]
    pub ping_binary: String,
    /// Binary used for route traces.
    #[serde(default = "default_mtr_binary")]
    pub mtr_binary: String,
}

fn default_ping_binary() -> String {
    "ping".to_string()
}

fn default_mtr_binary() -> String {
    "mtr".to_string()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ping_binary: default_ping_binary(),
            mtr_binary: default_mtr_binary(),
        }
    }
}

/// Process-wide configuration, built once at startup and shared read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}
