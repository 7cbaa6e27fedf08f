//! Output formatting helpers for CLI commands

use crate::feed::{CheckType, FeedState, LogEntry, ServiceStatus};
use chrono::{DateTime, FixedOffset, Utc};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use std::fmt::Write;

/// JSON view of one feed update
#[derive(Debug, Serialize)]
pub struct FeedView<'a> {
    pub status: Option<&'a ServiceStatus>,
    pub logs: &'a [LogEntry],
    pub is_loading: bool,
}

impl<'a> From<&'a FeedState> for FeedView<'a> {
    fn from(state: &'a FeedState) -> Self {
        Self {
            status: state.status.as_ref(),
            logs: &state.logs,
            is_loading: state.is_loading,
        }
    }
}

/// "N seconds ago" style age of `past` relative to `now`.
pub fn format_relative(past: DateTime<FixedOffset>, now: DateTime<Utc>) -> String {
    let secs = (now.timestamp() - past.timestamp()).max(0);

    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("{} {} ago", n, unit)
        } else {
            format!("{} {}s ago", n, unit)
        }
    };

    if secs < 60 {
        format!("{} seconds ago", secs)
    } else if secs < 3600 {
        plural(secs / 60, "minute")
    } else if secs < 86400 {
        plural(secs / 3600, "hour")
    } else {
        plural(secs / 86400, "day")
    }
}

/// Format a service status snapshot as a table
pub fn format_status_table(status: &ServiceStatus, now: DateTime<Utc>) -> String {
    let mut output = String::new();

    let state = if status.status {
        "Running".green().bold()
    } else {
        "Stopped".red().bold()
    };
    let updated = status
        .last_updated_at()
        .map(|ts| format_relative(ts, now))
        .unwrap_or_else(|| status.last_updated.clone());
    let check = match status.check_type {
        CheckType::Log => "log activity".to_string(),
        CheckType::Endpoint => match &status.health_check_url {
            Some(url) => format!("endpoint {}", url),
            None => "endpoint".to_string(),
        },
    };

    writeln!(output, "Service: {}   Last Updated: {}", state, updated).unwrap();
    writeln!(output, "Check: {}", check).unwrap();
    if let Some(err) = &status.last_error {
        writeln!(output, "Last error: {}", err.red()).unwrap();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["24h Uptime", "7d Uptime", "30d Uptime"]);
    table.add_row(vec![
        Cell::new(format!("{:.1}%", status.uptime_24h)),
        Cell::new(format!("{:.1}%", status.uptime_7d)),
        Cell::new(format!("{:.1}%", status.uptime_30d)),
    ]);
    write!(output, "{}", table).unwrap();

    output
}

/// Format the last `tail` log entries, oldest first
pub fn format_logs(logs: &[LogEntry], tail: usize) -> String {
    let mut output = String::new();
    writeln!(output, "{}", "Service Logs".bold()).unwrap();

    if logs.is_empty() {
        writeln!(output, "{}", "(no log lines yet)".dimmed()).unwrap();
        return output;
    }

    let start = logs.len().saturating_sub(tail);
    for entry in &logs[start..] {
        match &entry.timestamp {
            Some(ts) => writeln!(output, "{} {}", ts.dimmed(), entry.message).unwrap(),
            None => writeln!(output, "{}", entry.message).unwrap(),
        }
    }

    output
}

/// Full screen for one feed update
pub fn format_dashboard(
    state: &FeedState,
    tail: usize,
    monitor: Option<&str>,
    now: DateTime<Utc>,
) -> String {
    let mut output = String::new();
    writeln!(output, "{}", "YugoSM Dashboard".blue().bold()).unwrap();
    if let Some(target) = monitor {
        writeln!(output, "Monitoring: {}", target).unwrap();
    }
    writeln!(output).unwrap();

    match (&state.status, state.is_loading) {
        (Some(status), false) => {
            writeln!(output, "{}", format_status_table(status, now)).unwrap();
            writeln!(output).unwrap();
            output.push_str(&format_logs(&state.logs, tail));
        }
        _ => {
            writeln!(output, "{}", "Loading dashboard...".yellow()).unwrap();
        }
    }

    output
}

/// Format a feed update as a single JSON line
pub fn format_feed_json(state: &FeedState) -> Result<String, serde_json::Error> {
    serde_json::to_string(&FeedView::from(state))
}
