//! Deadline commands
//!
//! All reads and writes go through [`DeadlineBoard`], the same engine a
//! long-lived view would use.

use std::sync::Arc;

use chrono::Local;
use colored::Colorize;
use dialoguer::{Confirm, Select, theme::ColorfulTheme};
use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::cli::handlers::{can_prompt, fetch_with_retry};
use crate::client::models::CaseFile;
use crate::client::params::CaseFilterParams;
use crate::client::CaseApi;
use crate::deadlines::{
    AnnotatedDeadline, DeadlineBoard, DeadlineFilter, DeadlineStatus, LoadOutcome, StatusCounts,
};
use crate::error::{Error, Result};
use crate::models::DeadlineDisplay;
use crate::output::{json, table};

/// Run the deadlines list command
pub async fn list(
    opts: &GlobalOptions,
    case_id: Option<i64>,
    search: Option<&str>,
    filter: DeadlineFilter,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_session().await?;

    let case_id = match case_id {
        Some(id) => id,
        None => match choose_case(&ctx, search).await? {
            Some(case) => case.id,
            None => {
                match search {
                    Some(q) => println!("{}", format!("No case file matches '{}'.", q).dimmed()),
                    None => println!("{}", "You have no case files yet.".dimmed()),
                }
                return Ok(());
            }
        },
    };

    let board = DeadlineBoard::new(Arc::clone(&ctx.client));
    let outcome = fetch_with_retry("deadlines", || board.load(case_id)).await?;
    if outcome == LoadOutcome::Superseded {
        return Ok(());
    }

    let now = Local::now();
    let view = board.view(filter, now).await;
    let counts = StatusCounts::tally(&board.items().await, now);
    debug!("Case {}: {} deadlines shown, {:?}", case_id, view.len(), counts);

    println!("{}", render(view, counts, case_id, filter, ctx.format)?);
    Ok(())
}

/// Run the deadlines complete command
pub async fn complete(opts: &GlobalOptions, deadline_id: i64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_session().await?;

    let board = DeadlineBoard::new(Arc::clone(&ctx.client));
    let updated = board.mark_completed(deadline_id).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json_item(&updated)?),
        _ => println!(
            "{} Deadline #{} marked as completed: {}",
            "✓".green(),
            updated.id,
            updated.description
        ),
    }
    Ok(())
}

/// Run the deadlines delete command
pub async fn delete(opts: &GlobalOptions, deadline_id: i64, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_session().await?;

    if !yes {
        if !can_prompt() {
            return Err(Error::Other(
                "Refusing to delete without confirmation; pass --yes".to_string(),
            ));
        }
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Delete deadline #{}? This cannot be undone.",
                deadline_id
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let board = DeadlineBoard::new(Arc::clone(&ctx.client));
    board.delete(deadline_id).await?;

    println!("{} Deadline #{} deleted", "✓".green(), deadline_id);
    Ok(())
}

/// Pick the case file whose deadlines to show: none, the only one, or the
/// one the user selects.
async fn choose_case(ctx: &CommandContext, search: Option<&str>) -> Result<Option<CaseFile>> {
    let params = CaseFilterParams::new();
    let cases = fetch_with_retry("case files", || ctx.client.list_my_cases(&params)).await?;
    let mut cases = narrow(cases, search);

    match cases.len() {
        0 => Ok(None),
        1 => {
            let case = cases.remove(0);
            eprintln!("Case file: {}", case.label().bold());
            Ok(Some(case))
        }
        n => {
            if !can_prompt() {
                return Err(Error::Other(format!(
                    "You have {} case files; pass --case <ID> to choose one",
                    n
                )));
            }
            let labels: Vec<String> = cases.iter().map(CaseFile::label).collect();
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Case file")
                .items(&labels)
                .default(0)
                .interact()?;
            Ok(Some(cases.swap_remove(selection)))
        }
    }
}

/// Case files whose id or title contains `search`
fn narrow(cases: Vec<CaseFile>, search: Option<&str>) -> Vec<CaseFile> {
    match search {
        Some(q) => cases.into_iter().filter(|c| c.matches(q)).collect(),
        None => cases,
    }
}

fn render(
    view: Vec<AnnotatedDeadline>,
    counts: StatusCounts,
    case_id: i64,
    filter: DeadlineFilter,
    format: OutputFormat,
) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(json::format_json(&view)?);
    }

    let overdue_ids: Vec<i64> = view
        .iter()
        .filter(|d| matches!(d.status, DeadlineStatus::Overdue { .. }))
        .map(|d| d.deadline.id)
        .collect();

    let rows: Vec<DeadlineDisplay> = view.into_iter().map(DeadlineDisplay::from).collect();
    let empty = match filter_word(filter) {
        Some(word) => format!("No {} deadlines for case file #{}.", word, case_id),
        None => format!("No deadlines for case file #{}.", case_id),
    };
    let mut out = table::format_table_or(&rows, &empty);

    if format == OutputFormat::Pretty {
        out.push_str(&format!(
            "\n\n{}  {}  {}",
            format!("{} pending", counts.pending).cyan(),
            format!("{} overdue", counts.overdue).red(),
            format!("{} completed", counts.completed).green()
        ));
        if !overdue_ids.is_empty() {
            out.push_str(&format!(
                "\n{} Overdue: {}",
                "⚠".yellow(),
                overdue_ids
                    .iter()
                    .map(|id| format!("#{}", id))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
    }
    Ok(out)
}

fn filter_word(filter: DeadlineFilter) -> Option<&'static str> {
    match filter {
        DeadlineFilter::Pending => Some("pending"),
        DeadlineFilter::Overdue => Some("overdue"),
        DeadlineFilter::Completed => Some("completed"),
        DeadlineFilter::All => None,
    }
}
