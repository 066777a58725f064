use serde::{Deserialize, Serialize};

use super::{Milestone, WorkItem};

/// A feature specification as fetched from the tracker.
///
/// `work_items_text` is the owner-maintained block: a header line followed by
/// one `<name> (<date>): <status>` line per tracked checkpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub title: String,
    pub web_link: String,
    /// Display name of the assignee.
    pub owner: Option<String>,
    pub milestone: Option<Milestone>,
    pub work_items_text: String,
}

/// A feature whose work-item block matched the expected schema.
///
/// `work_items` always has one entry per schema item, in schema order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub web_link: String,
    pub owner: Option<String>,
    pub milestone: Option<Milestone>,
    pub work_items: Vec<WorkItem>,
}
