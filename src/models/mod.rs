//! Domain models for redgreen.
//!
//! # Core Concepts
//!
//! ## Feature tracker
//!
//! - [`FeatureRecord`]: A specification as fetched from the tracker, with its
//!   work-item block still in free-text form.
//! - [`Feature`]: A validated feature whose work-item block parsed into exactly
//!   one [`WorkItem`] per tracked checkpoint.
//! - [`Milestone`]: The release checkpoint a feature targets.
//! - [`Category`]: The display category (and therefore color) of a work item.
//!
//! ## Bug list
//!
//! - [`BugListEntry`]: One line of the locally maintained bug list.
//! - [`Bug`] and [`BugTask`]: A bug and its per-target tasks from the tracker.

mod bug;
mod feature;
mod milestone;
mod work_item;

pub use bug::*;
pub use feature::*;
pub use milestone::*;
pub use work_item::*;
