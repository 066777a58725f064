//! Top bugs report.

use chrono::{DateTime, Utc};

use super::html::{escape, link, Table, TableCell};
use crate::models::{Bug, BugListEntry};

const COL_WIDTHS: [u32; 4] = [80, 500, 150, 500];

/// Which table a bug is listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BugTable {
    /// No project task has an assignee yet.
    NeedsAttention,
    Assigned,
}

/// An assigned task of the reporting project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub target: String,
    pub assignee: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugRow {
    pub id: u64,
    pub title: String,
    pub web_link: String,
    pub stakeholder: String,
    pub notes: String,
    pub assignments: Vec<Assignment>,
}

impl BugRow {
    /// Combine a bug list entry with the fetched bug. Only tasks targeting
    /// `project` (by name prefix) are considered.
    pub fn build(entry: &BugListEntry, bug: &Bug, project: &str) -> Self {
        let assignments = bug
            .tasks
            .iter()
            .filter(|task| task.targets_project(project))
            .filter_map(|task| {
                task.assignee_name().map(|assignee| Assignment {
                    target: task.target_name.clone(),
                    assignee: assignee.to_string(),
                    status: task.status.clone(),
                })
            })
            .collect();

        Self {
            id: bug.id,
            title: bug.title.clone(),
            web_link: bug.web_link.clone(),
            stakeholder: entry.stakeholder.clone(),
            notes: entry.notes.clone(),
            assignments,
        }
    }

    pub fn table(&self) -> BugTable {
        if self.assignments.is_empty() {
            BugTable::NeedsAttention
        } else {
            BugTable::Assigned
        }
    }

    fn notes_html(&self) -> String {
        let mut html = escape(&self.notes);
        if self.assignments.is_empty() {
            return html;
        }

        html.push_str("<ul>");
        for a in &self.assignments {
            html.push_str(&format!(
                "<li><b>{}</b><ul><li><b>Assignee:\t</b>{}</li><li><b>Status:\t</b>{}</li></ul></li>",
                escape(&a.target),
                escape(&a.assignee),
                escape(&a.status)
            ));
        }
        html.push_str("</ul>");
        html
    }

    fn cells(&self) -> Vec<TableCell> {
        vec![
            TableCell::new(format!(
                "<center>{}</center>",
                link(&self.web_link, &self.id.to_string())
            )),
            TableCell::new(link(&self.web_link, &self.title)),
            TableCell::new(format!("<center>{}</center>", escape(&self.stakeholder))),
            TableCell::new(self.notes_html()),
        ]
    }
}

/// Bugs split into the two report tables, in bug list order.
#[derive(Debug, Clone, Default)]
pub struct BugReport {
    pub needs_attention: Vec<BugRow>,
    pub assigned: Vec<BugRow>,
}

impl BugReport {
    pub fn push(&mut self, row: BugRow) {
        match row.table() {
            BugTable::NeedsAttention => self.needs_attention.push(row),
            BugTable::Assigned => self.assigned.push(row),
        }
    }

    pub fn len(&self) -> usize {
        self.needs_attention.len() + self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the full page. `display_name` is e.g. `"Juju"`.
    pub fn render_page(
        &self,
        display_name: &str,
        top_issues_url: Option<&str>,
        now: DateTime<Utc>,
    ) -> String {
        let name = escape(display_name);
        let top_issues = top_issues_url
            .map(|url| format!("<h2>{}</h2>\n", link(url, "Top CI Issues")))
            .unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{name} Top Bugs Report</title>
</head>
<body>
<h1>{name} Top Bugs Report</h1>
{top_issues}<h2>Stakeholder bugs which need attention</h2>
{needs_attention}<p>
<h2>Assigned stakeholder bugs</h2>
{assigned}<p>
{footer}</body>
</html>
"#,
            needs_attention = bug_table(&self.needs_attention),
            assigned = bug_table(&self.assigned),
            footer = super::footer(now),
        )
    }
}

pub fn bug_table(rows: &[BugRow]) -> Table {
    let mut table = Table::new()
        .with_header(
            ["Number", "Title", "Stakeholder", "Notes"]
                .iter()
                .map(|label| TableCell::header(label))
                .collect(),
        )
        .col_widths(&COL_WIDTHS);
    for row in rows {
        table.push_row(row.cells());
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BugTask;

    fn task(target: &str, assignee: Option<&str>, status: &str) -> BugTask {
        BugTask {
            target_name: target.to_string(),
            assignee_link: assignee.map(|a| format!("https://api.launchpad.net/devel/~{}", a)),
            status: status.to_string(),
        }
    }

    fn bug(tasks: Vec<BugTask>) -> Bug {
        Bug {
            id: 1512345,
            title: "juju status hangs".to_string(),
            web_link: "https://bugs.launchpad.net/bugs/1512345".to_string(),
            tasks,
        }
    }

    fn entry() -> BugListEntry {
        BugListEntry {
            id: 1512345,
            stakeholder: "IS".to_string(),
            notes: "blocks deploys".to_string(),
        }
    }

    #[test]
    fn unassigned_bug_needs_attention() {
        let row = BugRow::build(
            &entry(),
            &bug(vec![task("juju-core", None, "New")]),
            "juju-core",
        );
        assert_eq!(row.table(), BugTable::NeedsAttention);
        assert_eq!(row.notes_html(), "blocks deploys");
    }

    #[test]
    fn other_projects_are_ignored() {
        let row = BugRow::build(
            &entry(),
            &bug(vec![task("juju-gui", Some("bob"), "In Progress")]),
            "juju-core",
        );
        assert_eq!(row.table(), BugTable::NeedsAttention);
    }

    #[test]
    fn assigned_project_task_is_listed_in_notes() {
        let row = BugRow::build(
            &entry(),
            &bug(vec![
                task("juju-core", None, "Triaged"),
                task("juju-core/1.25", Some("alice"), "In Progress"),
            ]),
            "juju-core",
        );

        assert_eq!(row.table(), BugTable::Assigned);
        assert_eq!(
            row.assignments,
            vec![Assignment {
                target: "juju-core/1.25".to_string(),
                assignee: "alice".to_string(),
                status: "In Progress".to_string(),
            }]
        );
        let notes = row.notes_html();
        assert!(notes.starts_with("blocks deploys<ul><li><b>juju-core/1.25</b>"));
        assert!(notes.contains("<b>Assignee:\t</b>alice"));
    }

    #[test]
    fn report_splits_rows_by_table() {
        let mut report = BugReport::default();
        report.push(BugRow::build(&entry(), &bug(vec![]), "juju-core"));
        report.push(BugRow::build(
            &entry(),
            &bug(vec![task("juju-core", Some("alice"), "Fix Committed")]),
            "juju-core",
        ));

        assert_eq!(report.needs_attention.len(), 1);
        assert_eq!(report.assigned.len(), 1);
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn assignee_link_without_tilde_still_counts_as_assigned() {
        let mut bug = bug(vec![task("juju-core", None, "In Progress")]);
        bug.tasks[0].assignee_link = Some("https://api.example.com/people/alice".to_string());

        let row = BugRow::build(&entry(), &bug, "juju-core");
        assert_eq!(row.table(), BugTable::Assigned);
        assert!(row
            .notes_html()
            .contains("<b>Assignee:\t</b>https://api.example.com/people/alice"));
    }
}
