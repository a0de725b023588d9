//! Generic list command handler
//!
//! Provides a reusable pattern for list commands that follow the standard flow:
//! 1. Fetch data, offering a retry on failure
//! 2. Convert to display type
//! 3. Print output

use std::future::Future;
use std::io::IsTerminal;

use colored::Colorize;
use dialoguer::Confirm;
use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::CommandContext;
use crate::error::Result;
use crate::output::Formattable;

/// Whether the user can answer prompts
pub fn can_prompt() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Run `fetch`, offering a `Retry?` prompt after each non-401 failure.
///
/// Retries only happen when the user asks for them. Without a terminal, or
/// when the user declines, the last error is returned. 401s are never
/// retried so the caller can reset the session.
pub async fn fetch_with_retry<T, Fut, F>(resource_name: &str, fetch: F) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
    F: FnMut() -> Fut,
{
    retry_loop(resource_name, can_prompt(), fetch).await
}

async fn retry_loop<T, Fut, F>(resource_name: &str, interactive: bool, mut fetch: F) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
    F: FnMut() -> Fut,
{
    loop {
        let err = match fetch().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if err.is_unauthorized() || !interactive {
            return Err(err);
        }

        eprintln!("{} Could not load {}: {}", "✗".red(), resource_name, err);
        let retry = Confirm::new()
            .with_prompt("Retry?")
            .default(true)
            .interact()?;
        if !retry {
            return Err(err);
        }
        debug!("Retrying {}", resource_name);
    }
}

/// Run a standard list command with the common fetch → display → print pattern.
///
/// # Type Parameters
///
/// * `T` - The API model type returned by the fetcher (e.g., `Note`)
/// * `D` - The display type that implements `From<T>`, `Tabled`, and `Serialize`
///
/// # Example
///
/// ```ignore
/// run_list_command::<Note, NoteDisplay, _, _>(&ctx, "notes", || {
///     ctx.client.list_my_notes(&params)
/// })
/// .await
/// ```
pub async fn run_list_command<T, D, Fut, F>(
    ctx: &CommandContext,
    resource_name: &str,
    fetch: F,
) -> Result<()>
where
    D: From<T> + Tabled + Serialize,
    Fut: Future<Output = Result<Vec<T>>>,
    F: FnMut() -> Fut,
{
    debug!("Fetching {}", resource_name);
    let items = fetch_with_retry(resource_name, fetch).await?;
    debug!("Fetched {} {}", items.len(), resource_name);

    let display_items: Vec<D> = items.into_iter().map(D::from).collect();
    display_items.print(ctx.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, Error};
    use std::cell::Cell;

    #[tokio::test]
    async fn test_success_is_returned() {
        let calls = Cell::new(0);
        let value = retry_loop("notes", false, || {
            calls.set(calls.get() + 1);
            async { Ok::<_, Error>(vec![1, 2, 3]) }
        })
        .await
        .unwrap();

        assert_eq!(value, vec![1, 2, 3]);
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_retried() {
        let calls = Cell::new(0);
        let err = retry_loop("notes", true, || {
            calls.set(calls.get() + 1);
            async { Err::<Vec<i32>, _>(Error::from(ApiError::Unauthorized)) }
        })
        .await
        .unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_failure_without_terminal_returns_error() {
        let err = retry_loop("documents", false, || async {
            Err::<Vec<i32>, _>(Error::from(ApiError::Http {
                status: 500,
                message: "HTTP 500".to_string(),
            }))
        })
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "HTTP 500");
    }
}
