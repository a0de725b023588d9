//! Global CLI options shared across all commands
//!
//! A single struct for the global flags so handlers take one parameter
//! instead of threading each flag through.

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; config defaults are resolved in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format; `None` defers to `preferences.format` in the config
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.applegal/config.yaml)
    pub config: Option<String>,

    /// Main backend URL override
    pub api_url: Option<String>,

    /// Request timeout override in milliseconds
    pub timeout_ms: Option<u64>,

    /// Keep the session token in memory only
    pub ephemeral: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_url: cli.api_url.clone(),
            timeout_ms: cli.timeout_ms,
            ephemeral: cli.ephemeral,
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get API URL override as `Option<&str>`.
    pub fn api_url_ref(&self) -> Option<&str> {
        self.api_url.as_deref()
    }
}
