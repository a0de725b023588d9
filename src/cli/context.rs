//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, session lookup and client initialization.

use std::path::PathBuf;
use std::sync::Arc;

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::LegalClient;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::session::SessionStore;

/// File name of the persisted session, next to the config file
const SESSION_FILE: &str = "session.yaml";

/// Context for command execution containing config, session, client, and
/// runtime options.
pub struct CommandContext {
    /// Loaded configuration with CLI overrides applied
    pub config: Config,
    /// Session token store shared with the client
    pub session: Arc<SessionStore>,
    /// API client (Arc-wrapped so it can be shared with background tasks)
    pub client: Arc<LegalClient>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Loads config (defaults when the file is missing), applies `--api-url`
    /// and `--timeout-ms`, opens the session store and builds the client.
    /// Does not require a session; see [`require_session`](Self::require_session).
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let mut config = Config::load_from(&config_path)?;

        if let Some(url) = opts.api_url_ref() {
            config.api_url = url.to_string();
        }
        if let Some(timeout) = opts.timeout_ms {
            config.timeout_ms = timeout;
        }
        config.validate()?;

        let format = opts
            .format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(OutputFormat::from_preference)
            })
            .unwrap_or_default();

        let session = Arc::new(open_session(opts)?);
        let client = Arc::new(LegalClient::new(&config, Arc::clone(&session))?);

        debug!(
            "Context ready: api={} docs={} ai={} timeout={}ms",
            config.api_url, config.docs_url, config.ai_url, config.timeout_ms
        );

        Ok(Self {
            config,
            session,
            client,
            format,
        })
    }

    /// Fail early when no session token is stored.
    pub async fn require_session(&self) -> Result<()> {
        if self.session.is_authenticated().await {
            Ok(())
        } else {
            Err(ApiError::MissingToken.into())
        }
    }
}

/// Session store selected by the global options: in memory for
/// `--ephemeral`, otherwise a file next to the config.
pub fn open_session(opts: &GlobalOptions) -> Result<SessionStore> {
    if opts.ephemeral {
        return Ok(SessionStore::in_memory());
    }
    Ok(SessionStore::with_file(session_path(opts)?))
}

/// Path of the persisted session file
pub fn session_path(opts: &GlobalOptions) -> Result<PathBuf> {
    let config_path = Config::resolve_path(opts.config_ref())?;
    let dir = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok(dir.join(SESSION_FILE))
}
