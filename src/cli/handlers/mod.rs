//! Shared command handler patterns

pub mod list;

pub use list::{can_prompt, fetch_with_retry, run_list_command};
