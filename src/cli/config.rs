//! Local configuration commands

use colored::Colorize;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::output::json;

/// Keys accepted by `config set`
const SETTABLE_KEYS: [&str; 5] = ["api_url", "docs_url", "ai_url", "timeout_ms", "format"];

/// Print the configuration file contents (defaults when absent)
pub fn show(opts: &GlobalOptions) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;
    let config = Config::load_from(&path)?;

    if opts.format == Some(OutputFormat::Json) {
        println!("{}", json::format_json_item(&config)?);
        return Ok(());
    }

    println!("{} {}\n", "#".dimmed(), path.display().to_string().dimmed());
    let yaml =
        serde_yaml::to_string(&config).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    print!("{}", yaml);
    Ok(())
}

/// Store the client id used by the realtime listener
pub fn set_client(opts: &GlobalOptions, client_id: i64) -> Result<()> {
    if client_id <= 0 {
        return Err(ConfigError::Invalid(format!(
            "client id must be a positive number (got {})",
            client_id
        ))
        .into());
    }
    update(opts, |config| {
        config.client_id = Some(client_id);
        Ok(())
    })?;
    println!("{} Client id set to {}", "✓".green(), client_id);
    Ok(())
}

/// Set one configuration value
pub fn set(opts: &GlobalOptions, key: &str, value: &str) -> Result<()> {
    update(opts, |config| apply(config, key, value))?;
    println!("{} {} = {}", "✓".green(), key.bold(), value);
    Ok(())
}

/// Load, modify, validate and save the configuration file
fn update(opts: &GlobalOptions, change: impl FnOnce(&mut Config) -> Result<()>) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;
    let mut config = Config::load_from(&path)?;
    change(&mut config)?;
    config.validate()?;
    config.save_to(&path)
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let value = value.trim();
    match key {
        "api_url" => config.api_url = value.trim_end_matches('/').to_string(),
        "docs_url" => config.docs_url = value.trim_end_matches('/').to_string(),
        "ai_url" => config.ai_url = value.trim_end_matches('/').to_string(),
        "timeout_ms" => {
            config.timeout_ms = value.parse().map_err(|_| {
                ConfigError::Invalid(format!("timeout_ms must be a number (got '{}')", value))
            })?;
        }
        "format" => {
            if OutputFormat::from_preference(value).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "format must be pretty, table or json (got '{}')",
                    value
                ))
                .into());
            }
            config.preferences.format = Some(value.to_lowercase());
        }
        other => {
            return Err(ConfigError::Invalid(format!(
                "unknown key '{}' (expected one of: {})",
                other,
                SETTABLE_KEYS.join(", ")
            ))
            .into());
        }
    }
    Ok(())
}
