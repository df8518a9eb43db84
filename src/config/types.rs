//! Configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggrepConfig {
    /// Glob patterns of searchable log files.
    pub log_files: Vec<String>,
    /// Basic auth user name.
    pub username: String,
    /// Basic auth password.
    pub password: String,
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Line parser settings.
    pub parsers: ParserSettings,
}

impl Default for LoggrepConfig {
    fn default() -> Self {
        Self {
            log_files: Vec::new(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            server: ServerSettings::default(),
            parsers: ParserSettings::default(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding `images/` and other static assets.
    pub public_dir: PathBuf,
}

/// Default port for the search server.
pub const DEFAULT_PORT: u16 = 8080;

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            public_dir: PathBuf::from("./public"),
        }
    }
}

/// Which optional parser stages run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Rewrite `path:hh:mm:ss` prefixes.
    pub timestamps: bool,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self { timestamps: true }
    }
}
