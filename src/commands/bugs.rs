//! `redgreen bugs`: the top bugs page from a local bug list.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::client::{ClientError, TrackerClient};
use crate::config::ReportConfig;
use crate::models::{Bug, BugListEntry};
use crate::report::{BugReport, BugRow};

pub async fn run(config: &ReportConfig, list_file: &Path) -> Result<PathBuf> {
    let list = fs::read_to_string(list_file)
        .with_context(|| format!("Failed to read bug list {}", list_file.display()))?;
    let client = super::connect(config).await?;
    write_report(&client, config, &list, Utc::now()).await
}

/// Build and write the bug report from the contents of a bug list file.
///
/// Lines with a bad id and bugs that cannot be fetched are logged and skipped.
pub async fn write_report(
    client: &TrackerClient,
    config: &ReportConfig,
    list: &str,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let (entries, errors) = BugListEntry::parse_list(list);
    for error in errors {
        tracing::error!("Skipping bug list line: {}", error);
    }

    let mut report = BugReport::default();
    for entry in &entries {
        tracing::info!("parsing bug: {}", entry.id);
        match fetch_bug(client, entry.id).await {
            Ok(bug) => report.push(BugRow::build(entry, &bug, &config.project)),
            Err(e) => tracing::error!("Skipping bug {}: {}", entry.id, e),
        }
    }
    tracing::info!(
        "{} bugs need attention, {} assigned",
        report.needs_attention.len(),
        report.assigned.len()
    );

    let html = report.render_page(&config.display_name, config.top_issues_url.as_deref(), now);
    let path = config.bugs_file();
    super::write_page(&path, &html)?;
    Ok(path)
}

/// Fetch a bug together with all of its tasks.
pub async fn fetch_bug(client: &TrackerClient, id: u64) -> Result<Bug, ClientError> {
    let bug = client.get_bug(id).await?;
    let tasks = client.bug_tasks(&bug).await?;
    for task in &tasks {
        tracing::debug!("looking at task: {}", task.bug_target_name);
    }
    Ok(bug.into_bug(tasks))
}
