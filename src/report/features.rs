//! Red/green feature tracker: assembly and page rendering.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::html::{escape, link, Align, Table, TableCell};
use super::natural::natural_cmp;
use crate::classify::{ClassifyError, Classifier};
use crate::config::ScheduleEntry;
use crate::models::{Category, FeatureRecord, Milestone};
use crate::parse::{ParseError, WorkItemParser};

/// Group name for features that do not target a milestone.
pub const NO_MILESTONE: &str = "No milestone";

const TITLE_WIDTH: u32 = 300;
const OWNER_WIDTH: u32 = 200;
const ITEM_WIDTH: u32 = 90;
const KEY_WIDTH: u32 = 150;
const GROUP_COLOR: &str = "Gainsboro";

/// Why a feature was left off the report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    #[error("malformed work items: {0}")]
    Parse(#[from] ParseError),

    #[error("cannot classify work items: {0}")]
    Classify(#[from] ClassifyError),
}

/// A classified feature, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRow {
    pub title: String,
    pub web_link: String,
    pub owner: Option<String>,
    /// One category per schema work item, in schema order.
    pub categories: Vec<Category>,
}

/// Features sharing a milestone, in the order the tracker returned them.
#[derive(Debug, Clone)]
pub struct MilestoneGroup {
    pub milestone: Option<Milestone>,
    pub rows: Vec<FeatureRow>,
}

impl MilestoneGroup {
    pub fn name(&self) -> &str {
        self.milestone
            .as_ref()
            .map(|m| m.name.as_str())
            .unwrap_or(NO_MILESTONE)
    }
}

#[derive(Debug, Clone)]
pub struct DroppedFeature {
    pub title: String,
    pub error: FeatureError,
}

/// The assembled report: milestone groups in natural order of their names,
/// with the "no milestone" group last.
#[derive(Debug, Clone, Default)]
pub struct FeatureReport {
    pub groups: Vec<MilestoneGroup>,
    pub dropped: Vec<DroppedFeature>,
}

impl FeatureReport {
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }
}

/// Accumulates features into milestone groups.
///
/// Each feature either becomes exactly one row or is dropped with a logged
/// error; there are no partial rows.
#[derive(Debug, Clone)]
pub struct FeatureTracker {
    parser: WorkItemParser,
    classifier: Classifier,
    now: DateTime<Utc>,
    report: FeatureReport,
}

impl FeatureTracker {
    pub fn new(classifier: Classifier, now: DateTime<Utc>) -> Self {
        Self {
            parser: WorkItemParser::new(classifier.schema()),
            classifier,
            now,
            report: FeatureReport::default(),
        }
    }

    /// Parse and classify one record without adding it.
    pub fn evaluate(&self, record: &FeatureRecord) -> Result<FeatureRow, FeatureError> {
        let feature = self.parser.parse_feature(record)?;
        let categories = feature
            .work_items
            .iter()
            .map(|item| {
                self.classifier
                    .category(item, feature.milestone.as_ref(), self.now)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureRow {
            title: feature.title,
            web_link: feature.web_link,
            owner: feature.owner,
            categories,
        })
    }

    /// Add a record to its milestone group. Returns `false` if it was dropped.
    pub fn add(&mut self, record: &FeatureRecord) -> bool {
        match self.evaluate(record) {
            Ok(row) => {
                self.insert(record.milestone.as_ref(), row);
                true
            }
            Err(error) => {
                tracing::error!("Dropping feature \"{}\": {}", record.title, error);
                self.report.dropped.push(DroppedFeature {
                    title: record.title.clone(),
                    error,
                });
                false
            }
        }
    }

    fn insert(&mut self, milestone: Option<&Milestone>, row: FeatureRow) {
        let name = milestone.map(|m| m.name.as_str());
        let existing = self
            .report
            .groups
            .iter_mut()
            .find(|g| g.milestone.as_ref().map(|m| m.name.as_str()) == name);

        match existing {
            Some(group) => group.rows.push(row),
            None => self.report.groups.push(MilestoneGroup {
                milestone: milestone.cloned(),
                rows: vec![row],
            }),
        }
    }

    pub fn finish(mut self) -> FeatureReport {
        self.report
            .groups
            .sort_by(|a, b| match (&a.milestone, &b.milestone) {
                (Some(a), Some(b)) => natural_cmp(&a.name, &b.name),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
        self.report
    }
}

/// Render the full tracker page for one series.
///
/// `heading` is e.g. `"Juju 2.0"`. Schedule entries are trusted markup.
pub fn render_page(
    report: &FeatureReport,
    classifier: &Classifier,
    heading: &str,
    schedule: &[ScheduleEntry],
    now: DateTime<Utc>,
) -> String {
    let heading = escape(heading);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{heading} Feature Tracker</title>
</head>
<body>
<h1>{heading} Feature Tracker</h1>
{features}<p>
{key}<p>
<h2>{heading} Release Schedule</h2>
{schedule}<p>
{footer}</body>
</html>
"#,
        features = feature_table(report, classifier),
        key = color_key(classifier),
        schedule = schedule_table(schedule),
        footer = super::footer(now),
    )
}

/// The main table: a separator row per milestone, then its features.
pub fn feature_table(report: &FeatureReport, classifier: &Classifier) -> Table {
    let schema = classifier.schema();

    let mut header = vec![TableCell::header("Feature"), TableCell::header("Owner")];
    header.extend(schema.iter().map(|spec| TableCell::header(spec.column)));

    let mut widths = vec![TITLE_WIDTH, OWNER_WIDTH];
    widths.extend(std::iter::repeat(ITEM_WIDTH).take(schema.len()));

    let mut table = Table::new().with_header(header).col_widths(&widths);

    for group in &report.groups {
        let target = group
            .milestone
            .as_ref()
            .and_then(|m| m.target)
            .map(|t| format!(" (target {})", t.format("%Y-%m-%d")))
            .unwrap_or_default();
        table.push_row(vec![TableCell::new(format!(
            "<b>{}</b>{}",
            escape(group.name()),
            target
        ))
        .colspan(schema.len() + 2)
        .bgcolor(GROUP_COLOR)]);

        for row in &group.rows {
            let mut cells = vec![
                TableCell::new(link(&row.web_link, &row.title)),
                TableCell::new(
                    row.owner
                        .as_deref()
                        .map(|owner| format!("<center>{}</center>", escape(owner)))
                        .unwrap_or_default(),
                ),
            ];
            cells.extend(
                row.categories
                    .iter()
                    .map(|c| TableCell::new("").bgcolor(classifier.color(*c))),
            );
            table.push_row(cells);
        }
    }

    table
}

/// One-row legend mapping each category label to its color.
pub fn color_key(classifier: &Classifier) -> Table {
    let mut table = Table::new()
        .col_widths(&[KEY_WIDTH; Category::ALL.len()])
        .col_aligns(&[Align::Center; Category::ALL.len()]);

    table.push_row(
        Category::ALL
            .iter()
            .map(|category| {
                let label = if category.is_dark() {
                    format!("<font color=\"White\">{}</font>", category.label())
                } else {
                    category.label().to_string()
                };
                TableCell::new(label).bgcolor(classifier.color(*category))
            })
            .collect(),
    );
    table
}

pub fn schedule_table(schedule: &[ScheduleEntry]) -> Table {
    let mut table = Table::new()
        .with_header(vec![TableCell::header("Date"), TableCell::header("Milestone")])
        .col_widths(&[200, 600])
        .col_aligns(&[Align::Center, Align::Left]);

    for entry in schedule {
        table.push_row(vec![
            TableCell::new(entry.date.clone()),
            TableCell::new(entry.milestone.clone()),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 11, 10, 12, 0, 0).unwrap()
    }

    fn record(title: &str, milestone: Option<&str>, status: &str) -> FeatureRecord {
        let mut text = String::from("Work items:\n");
        for spec in crate::schema::WORK_ITEMS.iter() {
            text.push_str(&format!("{} (): {}\n", spec.name, status));
        }
        FeatureRecord {
            title: title.to_string(),
            web_link: format!("https://blueprints.example.com/{}", title),
            owner: None,
            milestone: milestone.map(|name| Milestone {
                name: name.to_string(),
                target: Some(now() + Duration::days(60)),
            }),
            work_items_text: text,
        }
    }

    #[test]
    fn groups_by_milestone_in_natural_order() {
        let mut tracker = FeatureTracker::new(Classifier::default(), now());
        assert!(tracker.add(&record("a", Some("2.0-alpha10"), "todo")));
        assert!(tracker.add(&record("b", None, "todo")));
        assert!(tracker.add(&record("c", Some("2.0-alpha2"), "done")));
        assert!(tracker.add(&record("d", Some("2.0-alpha10"), "inprogress")));

        let report = tracker.finish();
        let names: Vec<&str> = report.groups.iter().map(|g| g.name()).collect();
        assert_eq!(names, ["2.0-alpha2", "2.0-alpha10", NO_MILESTONE]);

        let titles: Vec<&str> = report.groups[1]
            .rows
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, ["a", "d"]);
        assert_eq!(report.row_count(), 4);
    }

    #[test]
    fn drops_malformed_feature_without_creating_group() {
        let mut tracker = FeatureTracker::new(Classifier::default(), now());
        let mut bad = record("bad", Some("2.0-beta1"), "todo");
        bad.work_items_text = bad.work_items_text.replace("demo ()", "demos ()");

        assert!(!tracker.add(&bad));
        let report = tracker.finish();
        assert!(report.groups.is_empty());
        assert_eq!(report.dropped.len(), 1);
        assert!(matches!(
            report.dropped[0].error,
            FeatureError::Parse(ParseError::UnexpectedName { position: 3, .. })
        ));
    }

    #[test]
    fn drops_feature_with_bad_date() {
        let mut tracker = FeatureTracker::new(Classifier::default(), now());
        let mut bad = record("bad", Some("2.0-beta1"), "todo");
        bad.work_items_text = bad.work_items_text.replace("demo ()", "demo (soon)");

        assert!(!tracker.add(&bad));
        let report = tracker.finish();
        assert!(matches!(
            report.dropped[0].error,
            FeatureError::Classify(ClassifyError::InvalidDate { .. })
        ));
    }

    #[test]
    fn feature_row_has_one_colored_cell_per_item() {
        let classifier = Classifier::default();
        let mut tracker = FeatureTracker::new(classifier.clone(), now());
        let mut owned = record("Owned & <shared>", Some("1.26.0"), "done");
        owned.owner = Some("Alice".to_string());
        tracker.add(&owned);

        let table = feature_table(&tracker.finish(), &classifier);
        let rows = table.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0].colspan, Some(11));
        assert_eq!(rows[1].len(), 11);
        assert!(rows[1][0].content.contains("Owned &amp; &lt;shared&gt;"));
        assert_eq!(rows[1][1].content, "<center>Alice</center>");
        assert!(rows[1][2..]
            .iter()
            .all(|c| c.bgcolor.as_deref() == Some("DarkGreen")));
    }

    #[test]
    fn color_key_lists_every_category() {
        let html = color_key(&Classifier::default()).to_string();
        for category in Category::ALL {
            assert!(html.contains(category.label()));
        }
        assert!(html.contains("bgcolor=\"DarkOrange\""));
        assert!(html.contains("<font color=\"White\">OVERDUE</font>"));
        assert!(!html.contains("<font color=\"White\">TODO</font>"));
    }
}
