//! Wire types for the tracker's JSON API.
//!
//! Field names follow the Launchpad web service. Related records are linked
//! by absolute URL (`*_link`) and collections are paginated.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::{Bug, BugTask, Milestone};

/// A page of a collection resource.
#[derive(Debug, Deserialize)]
pub struct Collection<T> {
    pub entries: Vec<T>,
    #[serde(default)]
    pub next_collection_link: Option<String>,
}

/// The service root. Only used to check connectivity and credentials.
#[derive(Debug, Deserialize)]
pub struct ServiceRoot {
    #[serde(default)]
    pub projects_collection_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub series_collection_link: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesEntry {
    pub name: String,
    pub all_specifications_collection_link: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpecificationEntry {
    pub title: String,
    pub web_link: String,
    #[serde(default)]
    pub assignee_link: Option<String>,
    #[serde(default)]
    pub milestone_link: Option<String>,
    #[serde(default)]
    pub workitems_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MilestoneEntry {
    pub name: String,
    #[serde(default)]
    pub date_targeted: Option<DateTime<Utc>>,
}

impl From<MilestoneEntry> for Milestone {
    fn from(entry: MilestoneEntry) -> Self {
        Milestone {
            name: entry.name,
            target: entry.date_targeted,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonEntry {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl PersonEntry {
    /// Display name, falling back to the account name.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BugEntry {
    pub id: u64,
    pub title: String,
    pub web_link: String,
    pub bug_tasks_collection_link: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BugTaskEntry {
    pub bug_target_name: String,
    #[serde(default)]
    pub assignee_link: Option<String>,
    pub status: String,
}

impl From<BugTaskEntry> for BugTask {
    fn from(entry: BugTaskEntry) -> Self {
        BugTask {
            target_name: entry.bug_target_name,
            assignee_link: entry.assignee_link,
            status: entry.status,
        }
    }
}

impl BugEntry {
    pub fn into_bug(self, tasks: Vec<BugTaskEntry>) -> Bug {
        Bug {
            id: self.id,
            title: self.title,
            web_link: self.web_link,
            tasks: tasks.into_iter().map(BugTask::from).collect(),
        }
    }
}
