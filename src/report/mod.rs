//! HTML report assembly and rendering.

pub mod bugs;
pub mod features;
pub mod html;
mod natural;

pub use bugs::{BugReport, BugRow, BugTable};
pub use features::{FeatureError, FeatureReport, FeatureTracker, MilestoneGroup};
pub use natural::natural_cmp;

use chrono::{DateTime, Utc};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Closing rule and "last updated" line shared by every page.
pub fn footer(now: DateTime<Utc>) -> String {
    format!(
        "<hr>\n<i>Last updated: {}</i>\n",
        now.format(TIMESTAMP_FORMAT)
    )
}
