//! Login, registration and logout commands

use colored::Colorize;
use dialoguer::{Password, theme::ColorfulTheme};
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::client::models::{LoginRequest, RegisterRequest};
use crate::client::AuthApi;
use crate::error::{Error, Result};
use crate::session::mask;

/// Run the login command
pub async fn login(opts: &GlobalOptions, email: &str, password: Option<String>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let password = password_or_prompt(password, "Password")?;

    let request = LoginRequest {
        email: email.trim().to_string(),
        password,
    };
    let response = ctx.client.login(&request).await?;
    debug!("Logged in, token {}", mask(&response.token));

    println!("{} Signed in as {}", "✓".green(), request.email.bold());
    if opts.ephemeral {
        println!(
            "  {}",
            "Session kept in memory only; it ends with this command.".dimmed()
        );
    }
    Ok(())
}

/// Run the register command
pub async fn register(
    opts: &GlobalOptions,
    client_id: i64,
    email: &str,
    phone: &str,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let phone = phone.trim();
    if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::Other(format!(
            "Invalid phone number '{}': digits only",
            phone
        )));
    }

    let password = match password {
        Some(p) => p,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Choose a password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };

    let request = RegisterRequest {
        id_cliente: client_id,
        email: email.trim().to_string(),
        telefono: phone.to_string(),
        password,
    };
    ctx.client.register(&request).await?;

    println!("{} Account created for {}", "✓".green(), request.email.bold());
    println!(
        "  → Run '{}' to sign in",
        format!("applegal login -e {}", request.email).cyan()
    );
    Ok(())
}

/// Run the logout command. Works without a session.
pub async fn logout(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let was_signed_in = ctx.session.is_authenticated().await;
    ctx.client.logout().await;

    if was_signed_in {
        println!("{} Signed out", "✓".green());
    } else {
        println!("{} No session to clear", "○".dimmed());
    }
    Ok(())
}

fn password_or_prompt(password: Option<String>, prompt: &str) -> Result<String> {
    match password {
        Some(p) => Ok(p),
        None => Ok(Password::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .interact()?),
    }
}
