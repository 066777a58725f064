//! Work-item block parser.
//!
//! A block looks like:
//!
//! ```text
//! Work items:
//! feature one-pager approved (): done
//! design spec (15/01/2016): inprogress
//! implementation (n/a): todo
//! ...
//! ```
//!
//! The first line is a header. Every following line must name the schema item
//! at its position; a single bad line invalidates the whole block.

use thiserror::Error;

use crate::models::{Feature, FeatureRecord, WorkItem, WorkItemStatus};
use crate::schema::{WorkItemSpec, WORK_ITEMS};

/// Why a work-item block was rejected. Positions are 0-based, counted after
/// the header line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("work item {position}: expected `<name> (<date>): <status>`")]
    MissingSeparator { position: usize },

    #[error("work item {position}: expected a `(...)` after the name")]
    MissingParenthetical { position: usize },

    #[error("work item {position}: expected `{expected}`, found `{found}`")]
    UnexpectedName {
        position: usize,
        expected: &'static str,
        found: String,
    },

    #[error("work item {position}: only {expected} work items are tracked")]
    TooManyItems { position: usize, expected: usize },

    #[error("expected {expected} work items, found {found}")]
    MissingItems { expected: usize, found: usize },

    #[error("work item {position} (`{name}`): invalid status `{status}`")]
    InvalidStatus {
        position: usize,
        name: &'static str,
        status: String,
    },
}

/// Parses work-item blocks against a fixed schema.
#[derive(Debug, Clone, Copy)]
pub struct WorkItemParser {
    schema: &'static [WorkItemSpec],
}

impl Default for WorkItemParser {
    fn default() -> Self {
        Self::new(&WORK_ITEMS)
    }
}

impl WorkItemParser {
    pub fn new(schema: &'static [WorkItemSpec]) -> Self {
        Self { schema }
    }

    /// Validate a fetched record into a [`Feature`].
    pub fn parse_feature(&self, record: &FeatureRecord) -> Result<Feature, ParseError> {
        let work_items = self.parse_block(&record.work_items_text)?;
        Ok(Feature {
            title: record.title.clone(),
            web_link: record.web_link.clone(),
            owner: record.owner.clone(),
            milestone: record.milestone.clone(),
            work_items,
        })
    }

    /// Parse a whole block. The result has exactly one item per schema entry.
    pub fn parse_block(&self, text: &str) -> Result<Vec<WorkItem>, ParseError> {
        let items = text
            .trim_end()
            .lines()
            .skip(1)
            .enumerate()
            .map(|(position, line)| self.parse_line(line, position))
            .collect::<Result<Vec<_>, _>>()?;

        if items.len() != self.schema.len() {
            return Err(ParseError::MissingItems {
                expected: self.schema.len(),
                found: items.len(),
            });
        }
        Ok(items)
    }

    /// Parse the line at `position` (0-based, header excluded).
    pub fn parse_line(&self, line: &str, position: usize) -> Result<WorkItem, ParseError> {
        let line = line.to_lowercase();

        let segments: Vec<&str> = line.split(':').collect();
        let [name_segment, status_segment] = segments.as_slice() else {
            return Err(ParseError::MissingSeparator { position });
        };

        let spec = self
            .schema
            .get(position)
            .ok_or(ParseError::TooManyItems {
                position,
                expected: self.schema.len(),
            })?;

        let parts: Vec<&str> = name_segment.trim().split('(').collect();
        let [name, annotation] = parts.as_slice() else {
            return Err(ParseError::MissingParenthetical { position });
        };

        let name = name.trim();
        if name != spec.name {
            return Err(ParseError::UnexpectedName {
                position,
                expected: spec.name,
                found: name.to_string(),
            });
        }

        let annotation = annotation.trim().trim_end_matches(')').trim();
        if annotation == "n/a" {
            return Ok(WorkItem {
                name: spec.name.to_string(),
                status: WorkItemStatus::NotApplicable,
                deadline: None,
            });
        }

        let token = status_segment.trim();
        let status = WorkItemStatus::from_str(token).ok_or_else(|| ParseError::InvalidStatus {
            position,
            name: spec.name,
            status: token.to_string(),
        })?;

        Ok(WorkItem {
            name: spec.name.to_string(),
            status,
            deadline: (!annotation.is_empty()).then(|| annotation.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[String]) -> String {
        let mut text = String::from("Work items:\n");
        text.push_str(&lines.join("\n"));
        text
    }

    fn all_with_status(status: &str) -> Vec<String> {
        WORK_ITEMS
            .iter()
            .map(|spec| format!("{} (): {}", spec.name, status))
            .collect()
    }

    #[test]
    fn parses_complete_block() {
        let parser = WorkItemParser::default();
        let items = parser.parse_block(&block(&all_with_status("todo"))).unwrap();

        assert_eq!(items.len(), 9);
        assert_eq!(items[0].name, "feature one-pager approved");
        assert!(items.iter().all(|i| i.status == WorkItemStatus::Todo));
        assert!(items.iter().all(|i| i.deadline.is_none()));
    }

    #[test]
    fn ignores_case_and_trailing_whitespace() {
        let parser = WorkItemParser::default();
        let mut lines = all_with_status("TODO");
        lines[1] = "Design Spec (): InProgress".to_string();
        let text = format!("{}\n\n  \n", block(&lines));

        let items = parser.parse_block(&text).unwrap();
        assert_eq!(items[1].status, WorkItemStatus::InProgress);
    }

    #[test]
    fn rejects_any_misnamed_item() {
        let parser = WorkItemParser::default();
        for (position, spec) in WORK_ITEMS.iter().enumerate() {
            let mut lines = all_with_status("done");
            lines[position] = format!("{} extra (): done", spec.name);

            let err = parser.parse_block(&block(&lines)).unwrap_err();
            assert_eq!(
                err,
                ParseError::UnexpectedName {
                    position,
                    expected: spec.name,
                    found: format!("{} extra", spec.name),
                }
            );
        }
    }

    #[test]
    fn rejects_items_out_of_order() {
        let parser = WorkItemParser::default();
        let mut lines = all_with_status("done");
        lines.swap(0, 1);

        let err = parser.parse_block(&block(&lines)).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedName { position: 0, .. }));
    }

    #[test]
    fn rejects_line_without_colon() {
        let parser = WorkItemParser::default();
        let err = parser.parse_line("design spec (inprogress)", 1).unwrap_err();
        assert_eq!(err, ParseError::MissingSeparator { position: 1 });
    }

    #[test]
    fn rejects_line_with_extra_colon() {
        let parser = WorkItemParser::default();
        let err = parser.parse_line("design spec (12:00): todo", 1).unwrap_err();
        assert_eq!(err, ParseError::MissingSeparator { position: 1 });
    }

    #[test]
    fn rejects_line_without_parenthetical() {
        let parser = WorkItemParser::default();
        let err = parser.parse_line("design spec: todo", 1).unwrap_err();
        assert_eq!(err, ParseError::MissingParenthetical { position: 1 });
    }

    #[test]
    fn rejects_invalid_status() {
        let parser = WorkItemParser::default();
        let err = parser.parse_line("demo (): blocked", 3).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidStatus {
                position: 3,
                name: "demo",
                status: "blocked".to_string(),
            }
        );
    }

    #[test]
    fn not_applicable_ignores_status() {
        let parser = WorkItemParser::default();
        let item = parser.parse_line("demo (n/a): whatever", 3).unwrap();
        assert_eq!(item.status, WorkItemStatus::NotApplicable);
        assert_eq!(item.deadline, None);
    }

    #[test]
    fn keeps_inline_date() {
        let parser = WorkItemParser::default();
        let item = parser
            .parse_line("implementation (01/01/2099): todo", 2)
            .unwrap();
        assert_eq!(item.status, WorkItemStatus::Todo);
        assert_eq!(item.deadline.as_deref(), Some("01/01/2099"));
    }

    #[test]
    fn rejects_extra_lines() {
        let parser = WorkItemParser::default();
        let mut lines = all_with_status("done");
        lines.push("bonus (): done".to_string());

        let err = parser.parse_block(&block(&lines)).unwrap_err();
        assert_eq!(
            err,
            ParseError::TooManyItems {
                position: 9,
                expected: 9
            }
        );
    }

    #[test]
    fn rejects_short_block() {
        let parser = WorkItemParser::default();
        let lines = all_with_status("done")[..5].to_vec();

        let err = parser.parse_block(&block(&lines)).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingItems {
                expected: 9,
                found: 5
            }
        );
    }

    #[test]
    fn rejects_empty_block() {
        let parser = WorkItemParser::default();
        assert!(matches!(
            parser.parse_block(""),
            Err(ParseError::MissingItems { found: 0, .. })
        ));
    }
}
