//! Push device registration

use colored::Colorize;

use crate::cli::args::{GlobalOptions, PlatformArg};
use crate::cli::context::CommandContext;
use crate::client::models::DeviceRegistration;
use crate::client::NoteApi;
use crate::error::{Error, Result};

/// Run the device register command
pub async fn register(opts: &GlobalOptions, push_token: &str, platform: PlatformArg) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_session().await?;

    let push_token = push_token.trim();
    if push_token.is_empty() {
        return Err(Error::Other("Push token cannot be empty".to_string()));
    }

    let registration = DeviceRegistration {
        push_token: push_token.to_string(),
        platform: platform.into(),
    };
    ctx.client.register_device(&registration).await?;

    println!(
        "{} Device registered for note notifications ({:?})",
        "✓".green(),
        registration.platform
    );
    Ok(())
}
