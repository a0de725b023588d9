//! Deadline (plazo) state engine
//!
//! Turns the raw deadline list of a case file into a status-annotated,
//! filtered and sorted view, and applies mark-completed / delete actions to
//! the local copy once the backend has accepted them.
//!
//! Status is derived from the wall clock on every call and never stored.

mod due_date;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local};
use futures::future::{AbortHandle, Abortable};
use log::debug;
use serde::Serialize;
use tokio::sync::Mutex;

pub use due_date::DueDate;

use crate::client::DeadlineApi;
use crate::client::models::Deadline;
use crate::error::{ActionError, Result};

/// Display status of a deadline at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeadlineStatus {
    Completed,
    Overdue { days_late: i64 },
    DueToday,
    Pending { days_remaining: i64 },
}

impl DeadlineStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, DeadlineStatus::Completed)
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, DeadlineStatus::Overdue { .. })
    }

    /// Days left for display; `None` once completed.
    pub fn days_remaining(&self) -> Option<i64> {
        match self {
            DeadlineStatus::Completed => None,
            DeadlineStatus::Overdue { days_late } => Some(-days_late),
            DeadlineStatus::DueToday => Some(0),
            DeadlineStatus::Pending { days_remaining } => Some(*days_remaining),
        }
    }
}

impl fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeadlineStatus::Completed => f.write_str("Completed"),
            DeadlineStatus::Overdue { days_late: 1 } => f.write_str("Overdue (1 day)"),
            DeadlineStatus::Overdue { days_late } => write!(f, "Overdue ({} days)", days_late),
            DeadlineStatus::DueToday => f.write_str("Due today"),
            DeadlineStatus::Pending { days_remaining: 1 } => f.write_str("1 day left"),
            DeadlineStatus::Pending { days_remaining } => {
                write!(f, "{} days left", days_remaining)
            }
        }
    }
}

/// Whole local calendar days from `now` to the due day.
///
/// 0 for anything due today, whatever the time of day; negative only once
/// local midnight after the due day has passed.
pub fn days_remaining(due: &DueDate, now: DateTime<Local>) -> i64 {
    (due.date() - now.date_naive()).num_days()
}

/// Derive the display status of one deadline.
pub fn derive_status(deadline: &Deadline, now: DateTime<Local>) -> DeadlineStatus {
    if deadline.completed {
        return DeadlineStatus::Completed;
    }

    match days_remaining(&deadline.due_date, now) {
        d if d < 0 => DeadlineStatus::Overdue { days_late: -d },
        0 => DeadlineStatus::DueToday,
        d => DeadlineStatus::Pending { days_remaining: d },
    }
}

/// Category selected by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DeadlineFilter {
    /// Not completed and not overdue
    #[default]
    Pending,
    /// Not completed and past due
    Overdue,
    Completed,
    All,
}

impl DeadlineFilter {
    pub fn includes(&self, status: DeadlineStatus) -> bool {
        match self {
            DeadlineFilter::Pending => !status.is_completed() && !status.is_overdue(),
            DeadlineFilter::Overdue => status.is_overdue(),
            DeadlineFilter::Completed => status.is_completed(),
            DeadlineFilter::All => true,
        }
    }
}

/// A deadline paired with its status at render time
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedDeadline {
    #[serde(flatten)]
    pub deadline: Deadline,
    #[serde(flatten)]
    pub status: DeadlineStatus,
}

/// Annotate, filter and sort `items` ascending by due date.
///
/// Equal due dates keep their server order.
pub fn filter_and_sort(
    items: &[Deadline],
    filter: DeadlineFilter,
    now: DateTime<Local>,
) -> Vec<AnnotatedDeadline> {
    let mut view: Vec<AnnotatedDeadline> = items
        .iter()
        .map(|d| AnnotatedDeadline {
            status: derive_status(d, now),
            deadline: d.clone(),
        })
        .filter(|a| filter.includes(a.status))
        .collect();

    // `sort_by` is stable
    view.sort_by(|a, b| a.deadline.due_date.cmp(&b.deadline.due_date));
    view
}

/// Per-category totals shown under the list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub overdue: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn tally(items: &[Deadline], now: DateTime<Local>) -> Self {
        items
            .iter()
            .fold(Self::default(), |mut acc, d| {
                match derive_status(d, now) {
                    DeadlineStatus::Completed => acc.completed += 1,
                    DeadlineStatus::Overdue { .. } => acc.overdue += 1,
                    _ => acc.pending += 1,
                }
                acc
            })
    }
}

/// Result of [`DeadlineBoard::load`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was committed; carries the number of deadlines.
    Loaded(usize),
    /// A newer load started before this one finished; nothing was committed.
    Superseded,
}

#[derive(Debug, Default)]
struct BoardState {
    case_id: Option<i64>,
    items: Vec<Deadline>,
    generation: u64,
    in_flight: Option<AbortHandle>,
}

/// Deadline list of the selected case file.
///
/// Only the most recently started load may commit: starting a load aborts
/// the previous in-flight request, and a response that still races past the
/// abort is discarded by generation check.
pub struct DeadlineBoard<C: DeadlineApi + ?Sized> {
    client: Arc<C>,
    state: Mutex<BoardState>,
}

impl<C: DeadlineApi + ?Sized> DeadlineBoard<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            state: Mutex::new(BoardState::default()),
        }
    }

    /// Fetch the deadlines of `case_id` and make them the current list.
    ///
    /// Selecting a different case file empties the list immediately so the
    /// previous case's deadlines are never shown under the new selection.
    pub async fn load(&self, case_id: i64) -> Result<LoadOutcome> {
        let (handle, registration) = AbortHandle::new_pair();

        let generation = {
            let mut state = self.state.lock().await;
            if let Some(previous) = state.in_flight.replace(handle) {
                debug!("Aborting in-flight deadline load for case {:?}", state.case_id);
                previous.abort();
            }
            if state.case_id != Some(case_id) {
                state.items.clear();
                state.case_id = Some(case_id);
            }
            state.generation += 1;
            state.generation
        };

        let fetched = Abortable::new(self.client.list_deadlines(case_id), registration).await;

        let mut state = self.state.lock().await;
        let result = match fetched {
            Ok(result) if state.generation == generation => result,
            _ => {
                debug!("Discarding superseded deadline load for case {}", case_id);
                return Ok(LoadOutcome::Superseded);
            }
        };
        state.in_flight = None;

        let items = result?;
        let count = items.len();
        state.items = items;
        Ok(LoadOutcome::Loaded(count))
    }

    /// Mark a deadline completed on the server and adopt the returned record.
    ///
    /// A deadline already completed locally is returned as is. On failure
    /// the local list is untouched; 401 propagates unchanged, anything else
    /// becomes an [`ActionError`].
    pub async fn mark_completed(&self, deadline_id: i64) -> Result<Deadline> {
        let existing = self.find(deadline_id).await;
        if let Some(d) = existing.filter(|d| d.completed) {
            debug!("Deadline {} already completed", deadline_id);
            return Ok(d);
        }

        let updated = match self.client.complete_deadline(deadline_id).await {
            Ok(updated) => updated,
            Err(e) if e.is_unauthorized() => return Err(e),
            Err(e) => {
                let action = format!("mark deadline {} as completed", deadline_id);
                return Err(ActionError::new(action, &e).into());
            }
        };

        let mut state = self.state.lock().await;
        if let Some(slot) = state.items.iter_mut().find(|d| d.id == deadline_id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Delete a deadline on the server, then drop it from the local list.
    pub async fn delete(&self, deadline_id: i64) -> Result<()> {
        match self.client.delete_deadline(deadline_id).await {
            Ok(()) => {}
            Err(e) if e.is_unauthorized() => return Err(e),
            Err(e) => {
                let action = format!("delete deadline {}", deadline_id);
                return Err(ActionError::new(action, &e).into());
            }
        }

        self.state.lock().await.items.retain(|d| d.id != deadline_id);
        Ok(())
    }

    /// Case file whose deadlines are (being) loaded
    #[cfg(test)]
    pub async fn case_id(&self) -> Option<i64> {
        self.state.lock().await.case_id
    }

    /// Snapshot of the current list in server order
    pub async fn items(&self) -> Vec<Deadline> {
        self.state.lock().await.items.clone()
    }

    /// Current list as seen through `filter` at `now`
    pub async fn view(&self, filter: DeadlineFilter, now: DateTime<Local>) -> Vec<AnnotatedDeadline> {
        filter_and_sort(&self.state.lock().await.items, filter, now)
    }

    async fn find(&self, deadline_id: i64) -> Option<Deadline> {
        self.state
            .lock()
            .await
            .items
            .iter()
            .find(|d| d.id == deadline_id)
            .cloned()
    }
}
