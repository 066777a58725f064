use serde::{Deserialize, Serialize};

/// One checkpoint of a feature, parsed from a line of the work-item block.
///
/// The `name` always equals the expected schema name at the item's position;
/// anything else is rejected by the parser before a `WorkItem` exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkItem {
    pub name: String,
    pub status: WorkItemStatus,
    /// Inline override date as written between the parentheses (`day/month/year`).
    /// Parsed lazily by the classifier.
    pub deadline: Option<String>,
}

/// The progress of a work item as written by the feature owner.
///
/// - `Todo`: Not started
/// - `InProgress`: Being worked on
/// - `Done`: Finished
/// - `Postponed`: Moved out of the release
/// - `NotApplicable`: Marked `(n/a)`; the written status is ignored
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemStatus {
    Todo,
    InProgress,
    Done,
    Postponed,
    NotApplicable,
}

impl WorkItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inprogress",
            Self::Done => "done",
            Self::Postponed => "postponed",
            Self::NotApplicable => "n/a",
        }
    }

    /// Parse a written status token. `n/a` is not a status token: it only
    /// comes from the `(n/a)` marker, so it is rejected here.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Self::Todo),
            "inprogress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            "postponed" => Some(Self::Postponed),
            _ => None,
        }
    }
}

/// The display category of a work item on the red/green report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Todo,
    InProgress,
    Done,
    NearDeadline,
    Overdue,
    Postponed,
    NotApplicable,
}

impl Category {
    /// All categories in color-key order.
    pub const ALL: [Category; 7] = [
        Self::Todo,
        Self::InProgress,
        Self::Done,
        Self::NearDeadline,
        Self::Overdue,
        Self::Postponed,
        Self::NotApplicable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inprogress",
            Self::Done => "done",
            Self::NearDeadline => "near deadline",
            Self::Overdue => "overdue",
            Self::Postponed => "postponed",
            Self::NotApplicable => "n/a",
        }
    }

    /// Label used in the color key.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN PROGRESS",
            Self::Done => "DONE",
            Self::NearDeadline => "NEAR DEADLINE",
            Self::Overdue => "OVERDUE",
            Self::Postponed => "POSTPONED",
            Self::NotApplicable => "N/A",
        }
    }

    /// Whether the category color is dark enough to need white text.
    pub fn is_dark(&self) -> bool {
        matches!(
            self,
            Self::Done | Self::Overdue | Self::Postponed | Self::NotApplicable
        )
    }
}
