//! Markdown report files for agent responses.

use super::{FailureKind, RunFailure};
use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Replace characters that would break a file name.
pub fn sanitize_topic(topic: &str) -> String {
    topic.replace([' ', '/', '\\'], "_")
}

/// `{agent}_{topic}_{YYYYMMDDHHMMSS}.md`
pub fn report_file_name<Tz: TimeZone>(agent_label: &str, topic: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}_{}_{}.md",
        agent_label,
        sanitize_topic(topic),
        now.format("%Y%m%d%H%M%S")
    )
}

/// Report body: header block followed by the raw response.
pub fn report_contents<Tz: TimeZone>(
    agent_label: &str,
    topic: &str,
    content: &str,
    now: &DateTime<Tz>,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "# {} Report - {}\n\nGenerated on: {}\n\n---\n\n{}",
        agent_label,
        topic,
        now.format("%Y-%m-%d %H:%M:%S"),
        content
    )
}

/// Write a report into `dir`, creating it if needed.
pub fn write_report<Tz: TimeZone>(
    dir: &Path,
    agent_label: &str,
    topic: &str,
    content: &str,
    now: &DateTime<Tz>,
) -> Result<PathBuf, RunFailure>
where
    Tz::Offset: std::fmt::Display,
{
    let path = dir.join(report_file_name(agent_label, topic, now));

    std::fs::create_dir_all(dir)
        .and_then(|_| std::fs::write(&path, report_contents(agent_label, topic, content, now)))
        .map_err(|e| RunFailure::new(FailureKind::FileWrite, format!("Error creating file: {}", e)))?;

    debug!("Wrote report {}", path.display());
    Ok(path)
}
