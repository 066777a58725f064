use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named release checkpoint.
///
/// Work-item deadlines are derived from `target` unless the item carries its
/// own inline date. Milestones without a target date are common on trackers
/// early in a cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Milestone {
    pub name: String,
    pub target: Option<DateTime<Utc>>,
}
