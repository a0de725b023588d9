//! Status command implementation

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::context::{open_session, session_path};
use crate::config::Config;
use crate::error::Result;
use crate::session::{jwt_expiry, mask};

/// Run the status command to display configuration and session status
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "APP LEGAL Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    let config = if config_path.exists() {
        println!("Config file: {}", config_path.display().to_string().cyan());
        Config::load_from(&config_path)?
    } else {
        println!(
            "Config file: {} {}",
            config_path.display().to_string().cyan(),
            "(not created, using defaults)".dimmed()
        );
        Config::default()
    };

    let api_url = opts.api_url_ref().unwrap_or(&config.api_url);
    println!();
    println!("Backend:      {}", api_url);
    println!("Documents:    {}", config.docs_url);
    println!("AI summaries: {}", config.ai_url);
    println!(
        "Timeout:      {}ms",
        opts.timeout_ms.unwrap_or(config.timeout_ms)
    );
    println!();

    if let Some(client_id) = config.client_id {
        println!("{} Client id: {}", "✓".green(), client_id);
    } else {
        println!("{} No client id set", "○".dimmed());
        println!("  → Run 'applegal config set-client <ID>' to enable notes watch");
    }

    let session = open_session(opts)?;
    match session.read().await {
        Some(token) => {
            println!("{} Signed in (token {})", "✓".green(), mask(&token).dimmed());
            if let Some(expires) = jwt_expiry(&token) {
                println!("  {}", describe_expiry(expires, Utc::now()));
            }
        }
        None => {
            println!("{} Not signed in", "✗".red());
            println!("  → Run 'applegal login -e <EMAIL>' to sign in");
        }
    }

    if !opts.ephemeral {
        println!(
            "\nSession file: {}",
            session_path(opts)?.display().to_string().dimmed()
        );
    }
    println!();

    Ok(())
}

fn describe_expiry(expires: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = expires.signed_duration_since(now);
    if remaining.num_seconds() <= 0 {
        format!(
            "{} Token expired at {}",
            "⚠".yellow(),
            expires.format("%Y-%m-%d %H:%M UTC")
        )
    } else {
        format!(
            "Token expires in {}h {}m",
            remaining.num_hours(),
            remaining.num_minutes() % 60
        )
    }
}
