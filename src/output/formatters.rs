//! Reusable formatting utilities for CLI output
//!
//! Byte sizes, server timestamps and file names shared by several commands.

use chrono::{DateTime, Local};

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Characters that may not appear in a saved file name
const FORBIDDEN_IN_FILENAME: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Format a byte count with binary units and one decimal.
///
/// # Example output
/// - `0 B`
/// - `1023.0 B`
/// - `1.0 KB`
/// - `-` when the size is unknown
pub fn format_bytes(bytes: Option<u64>) -> String {
    let Some(bytes) = bytes else {
        return "-".to_string();
    };
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", scaled, SIZE_UNITS[unit])
}

/// Format an ISO timestamp from the server as local date and time.
///
/// Bare dates are shown as is; anything unparseable is returned unchanged,
/// empty input gives `-`.
///
/// # Example output
/// `2025-01-15 14:30`
pub fn format_timestamp_local(iso: &str) -> String {
    let iso = iso.trim();
    if iso.is_empty() {
        return "-".to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
    }
    iso.to_string()
}

/// Calendar date part of a server date or timestamp, `-` when absent.
pub fn format_date(value: Option<&str>) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => "-".to_string(),
        Some(v) => match DateTime::parse_from_rfc3339(v) {
            Ok(dt) => dt.with_timezone(&Local).format("%Y-%m-%d").to_string(),
            Err(_) => v.chars().take(10).collect(),
        },
    }
}

/// Replace path separators and other reserved characters with `_`.
///
/// Runs of reserved characters collapse into a single `_`; an empty result
/// falls back to `fallback`.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let source = if name.trim().is_empty() { fallback } else { name };

    let mut out = String::with_capacity(source.len());
    let mut in_run = false;
    for c in source.chars() {
        if FORBIDDEN_IN_FILENAME.contains(&c) {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }

    let out = out.trim();
    if out.is_empty() {
        fallback.to_string()
    } else {
        out.to_string()
    }
}

/// Truncate to `max` characters, marking the cut with `…`.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
