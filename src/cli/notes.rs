//! Note commands

use std::time::Duration;

use colored::Colorize;
use log::{debug, warn};
use tokio::sync::broadcast::error::RecvError;

use crate::cli::args::{GlobalOptions, NoteFilterArgs, PaginationArgs};
use crate::cli::context::CommandContext;
use crate::cli::handlers::{fetch_with_retry, run_list_command};
use crate::client::models::Note;
use crate::client::params::NoteFilterParams;
use crate::client::NoteApi;
use crate::error::Result;
use crate::models::NoteDisplay;
use crate::output::Formattable;
use crate::realtime::RealtimeListener;

/// How often `watch` checks that the realtime channel is still open
const CONNECTION_CHECK: Duration = Duration::from_secs(2);

/// Run the notes list command
pub async fn list(
    opts: &GlobalOptions,
    filters: &NoteFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_session().await?;

    let params = filters.to_params(pagination);
    run_list_command::<Note, NoteDisplay, _, _>(&ctx, "notes", || {
        ctx.client.list_my_notes(&params)
    })
    .await
}

/// Run the notes watch command.
///
/// Prints the note list, then listens on the realtime channel and prints
/// it again after every new note until Ctrl-C. Dropped connections are
/// retried by the listener.
pub async fn watch(
    opts: &GlobalOptions,
    filters: &NoteFilterArgs,
    pagination: &PaginationArgs,
    client_id: Option<i64>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let client_id = match client_id {
        Some(id) => id,
        None => ctx.config.require_client_id()?,
    };
    ctx.require_session().await?;

    let params = filters.to_params(pagination);
    render(&ctx, &params).await?;

    let listener = RealtimeListener::websocket(ctx.config.api_url.clone());
    let mut refetch = listener.subscribe();
    listener.init(client_id).await?;
    eprintln!(
        "{}",
        format!("Watching notes for client {} (Ctrl-C to stop)", client_id).dimmed()
    );

    let mut health = tokio::time::interval(CONNECTION_CHECK);
    let result = loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break Ok(()),
            _ = health.tick() => {}
            received = refetch.recv() => match received {
                Ok(event) => {
                    debug!("Note {} arrived for case {}", event.id_nota, event.id_expediente);
                    if let Err(e) = render(&ctx, &params).await {
                        if e.is_unauthorized() {
                            break Err(e);
                        }
                        warn!("Could not refresh notes: {}", e);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!("Skipped {} note signals, refreshing once", skipped);
                    if let Err(e) = render(&ctx, &params).await {
                        warn!("Could not refresh notes: {}", e);
                    }
                }
                Err(RecvError::Closed) => break Ok(()),
            },
        }
        if !listener.is_connected().await {
            eprintln!("{}", "Realtime listener stopped.".yellow());
            break Ok(());
        }
    };

    listener.shutdown().await;
    result
}

async fn render(ctx: &CommandContext, params: &NoteFilterParams) -> Result<()> {
    let notes = fetch_with_retry("notes", || ctx.client.list_my_notes(params)).await?;
    let rows: Vec<NoteDisplay> = notes.into_iter().map(NoteDisplay::from).collect();
    rows.print(ctx.format)
}
