//! `redgreen features`: one red/green tracker page per series.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::classify::Classifier;
use crate::client::{ClientError, SeriesEntry, SpecificationEntry, TrackerClient};
use crate::config::ReportConfig;
use crate::models::{FeatureRecord, Milestone};
use crate::report::features::render_page;
use crate::report::FeatureTracker;
use crate::schema::{ColorTable, WORK_ITEMS};

/// Connect, then write a tracker page for each of `series` (or the
/// configured series when empty).
pub async fn run(config: &ReportConfig, series: &[String]) -> Result<Vec<PathBuf>> {
    let client = super::connect(config).await?;
    write_reports(&client, config, series, Utc::now()).await
}

/// Write tracker pages using an already connected client.
///
/// A missing project or series, or a series name that is not a plain file
/// name component, aborts; a feature that cannot be resolved,
/// parsed or classified is logged and left off its page.
pub async fn write_reports(
    client: &TrackerClient,
    config: &ReportConfig,
    series: &[String],
    now: DateTime<Utc>,
) -> Result<Vec<PathBuf>> {
    let project = client
        .get_project(&config.project)
        .await
        .with_context(|| format!("Project name does not exist: {}", config.project))?;

    let names = if series.is_empty() {
        config.series.clone()
    } else {
        series.to_vec()
    };

    let classifier = Classifier::new(&WORK_ITEMS, ColorTable::STANDARD, config.near_deadline()?);
    let mut written = Vec::with_capacity(names.len());

    for name in &names {
        let path = config.series_file(name)?;
        let series = client
            .find_series(&project, name)
            .await
            .with_context(|| format!("Series does not exist: {}", name))?;

        let records = fetch_records(client, &series).await?;

        let mut tracker = FeatureTracker::new(classifier.clone(), now);
        for record in &records {
            tracker.add(record);
        }
        let report = tracker.finish();
        tracing::info!(
            "Series {}: {} features reported, {} dropped",
            name,
            report.row_count(),
            report.dropped.len()
        );

        let heading = format!("{} {}", config.display_name, name);
        let html = render_page(
            &report,
            &classifier,
            &heading,
            &config.release_schedule,
            now,
        );
        super::write_page(&path, &html)?;
        written.push(path);
    }

    Ok(written)
}

/// Fetch the specifications of `series` with their milestones and owners.
pub async fn fetch_records(
    client: &TrackerClient,
    series: &SeriesEntry,
) -> Result<Vec<FeatureRecord>> {
    let specs = client
        .specifications(series)
        .await
        .with_context(|| format!("Failed to list specifications of series {}", series.name))?;

    let mut links = LinkCache::default();
    let mut records = Vec::with_capacity(specs.len());
    for spec in &specs {
        match links.resolve(client, spec).await {
            Ok(record) => records.push(record),
            Err(e) => tracing::error!("Skipping feature \"{}\": {}", spec.title, e),
        }
    }
    Ok(records)
}

/// Milestones and people already fetched during this run, keyed by link.
#[derive(Debug, Default)]
struct LinkCache {
    milestones: HashMap<String, Milestone>,
    owners: HashMap<String, String>,
}

impl LinkCache {
    async fn resolve(
        &mut self,
        client: &TrackerClient,
        spec: &SpecificationEntry,
    ) -> Result<FeatureRecord, ClientError> {
        let milestone = match &spec.milestone_link {
            Some(link) => Some(self.milestone(client, link).await?),
            None => None,
        };
        let owner = match &spec.assignee_link {
            Some(link) => Some(self.owner(client, link).await?),
            None => None,
        };

        Ok(FeatureRecord {
            title: spec.title.clone(),
            web_link: spec.web_link.clone(),
            owner,
            milestone,
            work_items_text: spec.workitems_text.clone().unwrap_or_default(),
        })
    }

    async fn milestone(
        &mut self,
        client: &TrackerClient,
        link: &str,
    ) -> Result<Milestone, ClientError> {
        if let Some(milestone) = self.milestones.get(link) {
            return Ok(milestone.clone());
        }
        let milestone = client.milestone(link).await?;
        self.milestones.insert(link.to_string(), milestone.clone());
        Ok(milestone)
    }

    async fn owner(&mut self, client: &TrackerClient, link: &str) -> Result<String, ClientError> {
        if let Some(owner) = self.owners.get(link) {
            return Ok(owner.clone());
        }
        let person = client.person(link).await?;
        let owner = person.label().to_string();
        self.owners.insert(link.to_string(), owner.clone());
        Ok(owner)
    }
}
