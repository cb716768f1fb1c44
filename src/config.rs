//! Server-config document parsing
//!
//! A server's behavior is configured with a small YAML document authored
//! in a markup editor:
//!
//! ```yaml
//! aliases:
//!   "c *": |
//!     cast $1
//! ```
//!
//! Parsing is three stages: YAML load, shape check, and a trial alias
//! compilation, so a `ServerConfig` that exists always compiles cleanly
//! later. Each stage maps to its own error variant for user-facing
//! display in the editor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alias::{AliasMatcher, PatternError};

/// Starter configuration for newly created servers
pub const DEFAULT_CONFIG_MARKUP: &str = r#"aliases:
  "sac": |
    sac cuerpo
  "cc *": |
    coger $1 cuerpo
  "coc": |
    coger oro cuerpo
  "c * *": |
    prepare $1
    cast $1 $2
  "h *": |
    heal $1
"#;

/// A parsed, validated server configuration.
///
/// `markup` keeps the raw document so the editor can re-open it verbatim;
/// `aliases` is the extracted pattern -> template mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub markup: String,
    pub aliases: BTreeMap<String, String>,
}

/// Expected document shape. Unknown top-level keys are ignored.
#[derive(Debug, Deserialize)]
struct ConfigDocument {
    aliases: BTreeMap<String, String>,
}

/// Why a config document was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid YAML: {0}")]
    InvalidDocument(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Invalid aliases: {}", format_pattern_errors(.0))]
    InvalidAliases(Vec<PatternError>),
}

fn format_pattern_errors(errors: &[PatternError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse and validate a config document.
///
/// All alias patterns are validated up front; `InvalidAliases` carries
/// every offending pattern so the editor can display them all at once.
pub fn parse_server_config(markup: &str) -> Result<ServerConfig, ConfigError> {
    let value: serde_yaml::Value = serde_yaml::from_str(markup)
        .map_err(|err| ConfigError::InvalidDocument(err.to_string()))?;

    let document: ConfigDocument = serde_yaml::from_value(value)
        .map_err(|err| ConfigError::InvalidSchema(err.to_string()))?;

    AliasMatcher::compile(&document.aliases).map_err(ConfigError::InvalidAliases)?;

    Ok(ServerConfig {
        markup: markup.to_string(),
        aliases: document.aliases,
    })
}

impl ServerConfig {
    /// Compile this config's alias set.
    ///
    /// Cannot fail for configs built by [`parse_server_config`]; a config
    /// whose aliases were mutated into an invalid state yields the error
    /// list instead.
    pub fn compile_aliases(&self) -> Result<AliasMatcher, Vec<PatternError>> {
        AliasMatcher::compile(&self.aliases)
    }
}
