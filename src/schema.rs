//! Static report configuration: the tracked work items and the color table.

use crate::models::Category;

/// One tracked checkpoint of every feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItemSpec {
    /// Name as written (lower-case) in the work-item block.
    pub name: &'static str,
    /// Column heading on the report.
    pub column: &'static str,
    /// Days after the milestone target date the item is due.
    pub offset_days: i64,
}

/// Work items every feature must list, in order.
pub const WORK_ITEMS: [WorkItemSpec; 9] = [
    WorkItemSpec {
        name: "feature one-pager approved",
        column: "One Pager",
        offset_days: 0,
    },
    WorkItemSpec {
        name: "design spec",
        column: "Design Spec",
        offset_days: 0,
    },
    WorkItemSpec {
        name: "implementation",
        column: "Code Complete",
        offset_days: 0,
    },
    WorkItemSpec {
        name: "demo",
        column: "Demo",
        offset_days: 7,
    },
    WorkItemSpec {
        name: "ci tests",
        column: "CI Tests",
        offset_days: 7,
    },
    WorkItemSpec {
        name: "release notes",
        column: "Release Notes",
        offset_days: 7,
    },
    WorkItemSpec {
        name: "stakeholder signoff",
        column: "Stakeholder Signoff",
        offset_days: 14,
    },
    WorkItemSpec {
        name: "documentation draft",
        column: "Documentation Submitted",
        offset_days: 14,
    },
    WorkItemSpec {
        name: "documentation complete",
        column: "Documentation Published",
        offset_days: 21,
    },
];

/// Background color per display category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTable {
    pub done: &'static str,
    pub in_progress: &'static str,
    pub postponed: &'static str,
    pub todo: &'static str,
    pub near_deadline: &'static str,
    pub overdue: &'static str,
    pub not_applicable: &'static str,
}

impl ColorTable {
    pub const STANDARD: ColorTable = ColorTable {
        done: "DarkGreen",
        in_progress: "LightGreen",
        postponed: "Maroon",
        todo: "LightGray",
        near_deadline: "DarkOrange",
        overdue: "Red",
        not_applicable: "Black",
    };

    pub fn color(&self, category: Category) -> &'static str {
        match category {
            Category::Done => self.done,
            Category::InProgress => self.in_progress,
            Category::Postponed => self.postponed,
            Category::Todo => self.todo,
            Category::NearDeadline => self.near_deadline,
            Category::Overdue => self.overdue,
            Category::NotApplicable => self.not_applicable,
        }
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Background of table header cells.
pub const HEADER_COLOR: &str = "DarkGray";
