//! Work-item status classification.
//!
//! Maps a parsed [`WorkItem`] to the [`Category`] shown on the report, using
//! the item's deadline relative to the current instant.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

use crate::models::{Category, Milestone, WorkItem, WorkItemStatus};
use crate::schema::{ColorTable, WorkItemSpec, WORK_ITEMS};

/// Format of inline override dates.
pub const INLINE_DATE_FORMAT: &str = "%d/%m/%Y";

/// Items due within this many days are flagged as near their deadline.
pub const NEAR_DEADLINE_DAYS: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("work item `{name}`: invalid date `{value}`, expected day/month/year")]
    InvalidDate { name: String, value: String },

    #[error("unknown work item `{0}`")]
    UnknownWorkItem(String),
}

/// Classifies work items against a fixed schema and color table.
#[derive(Debug, Clone)]
pub struct Classifier {
    schema: &'static [WorkItemSpec],
    colors: ColorTable,
    near_deadline: Duration,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(
            &WORK_ITEMS,
            ColorTable::STANDARD,
            Duration::days(NEAR_DEADLINE_DAYS),
        )
    }
}

impl Classifier {
    pub fn new(schema: &'static [WorkItemSpec], colors: ColorTable, near_deadline: Duration) -> Self {
        Self {
            schema,
            colors,
            near_deadline,
        }
    }

    pub fn schema(&self) -> &'static [WorkItemSpec] {
        self.schema
    }

    pub fn color(&self, category: Category) -> &'static str {
        self.colors.color(category)
    }

    /// Category of `item` as of `now`.
    ///
    /// Done and postponed items ignore dates entirely. Open items are overdue
    /// once their deadline has passed, near their deadline when it falls within
    /// the window, and otherwise keep their written status. An open item with
    /// no resolvable deadline keeps its written status.
    pub fn category(
        &self,
        item: &WorkItem,
        milestone: Option<&Milestone>,
        now: DateTime<Utc>,
    ) -> Result<Category, ClassifyError> {
        let literal = match item.status {
            WorkItemStatus::NotApplicable => return Ok(Category::NotApplicable),
            WorkItemStatus::Done => return Ok(Category::Done),
            WorkItemStatus::Postponed => return Ok(Category::Postponed),
            WorkItemStatus::Todo => Category::Todo,
            WorkItemStatus::InProgress => Category::InProgress,
        };

        let Some(deadline) = self.deadline(item, milestone)? else {
            return Ok(literal);
        };

        if deadline < now {
            Ok(Category::Overdue)
        } else if deadline - now <= self.near_deadline {
            Ok(Category::NearDeadline)
        } else {
            Ok(literal)
        }
    }

    /// Resolve the deadline of `item`: its inline date if present, otherwise
    /// the milestone target shifted by the item's offset.
    pub fn deadline(
        &self,
        item: &WorkItem,
        milestone: Option<&Milestone>,
    ) -> Result<Option<DateTime<Utc>>, ClassifyError> {
        if let Some(value) = &item.deadline {
            let date = NaiveDate::parse_from_str(value.trim(), INLINE_DATE_FORMAT).map_err(|_| {
                ClassifyError::InvalidDate {
                    name: item.name.clone(),
                    value: value.clone(),
                }
            })?;
            return Ok(Some(date.and_time(NaiveTime::MIN).and_utc()));
        }

        let spec = self
            .schema
            .iter()
            .find(|spec| spec.name == item.name)
            .ok_or_else(|| ClassifyError::UnknownWorkItem(item.name.clone()))?;

        Ok(milestone
            .and_then(|m| m.target)
            .map(|target| target + Duration::days(spec.offset_days)))
    }
}
