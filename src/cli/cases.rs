//! Case file commands

use crate::cli::args::{CaseFilterArgs, GlobalOptions, PaginationArgs};
use crate::cli::context::CommandContext;
use crate::cli::handlers::run_list_command;
use crate::client::models::CaseFile;
use crate::client::CaseApi;
use crate::error::Result;
use crate::models::CaseFileDisplay;

/// Run the cases list command
pub async fn list(
    opts: &GlobalOptions,
    filters: &CaseFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_session().await?;

    let params = filters.to_params(pagination);
    run_list_command::<CaseFile, CaseFileDisplay, _, _>(&ctx, "case files", || {
        ctx.client.list_my_cases(&params)
    })
    .await
}
