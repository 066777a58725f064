use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A bug fetched from the tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bug {
    pub id: u64,
    pub title: String,
    pub web_link: String,
    pub tasks: Vec<BugTask>,
}

/// A bug's task against one target (project, series or package).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BugTask {
    /// e.g. `juju-core` or `juju-core/1.25`.
    pub target_name: String,
    /// Link to the assignee's person record, e.g. `https://api.launchpad.net/devel/~alice`.
    pub assignee_link: Option<String>,
    pub status: String,
}

impl BugTask {
    /// Account name of the assignee: the part of the link after `~`, or the
    /// whole link when it has none. `None` only when the task is unassigned.
    pub fn assignee_name(&self) -> Option<&str> {
        let link = self.assignee_link.as_deref()?;
        Some(link.split_once('~').map_or(link, |(_, name)| name))
    }

    pub fn targets_project(&self, project: &str) -> bool {
        self.target_name.starts_with(project)
    }
}

/// One line of the bug list file: `<id>:<stakeholder>:<notes>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugListEntry {
    pub id: u64,
    pub stakeholder: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid bug id `{0}`")]
pub struct InvalidBugId(pub String);

impl BugListEntry {
    /// Parse one line. Notes keep any further `:` characters.
    pub fn parse(line: &str) -> Result<Self, InvalidBugId> {
        let mut fields = line.splitn(3, ':');
        let raw_id = fields.next().unwrap_or_default().trim();
        let id = raw_id
            .parse::<u64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| InvalidBugId(raw_id.to_string()))?;
        let stakeholder = fields.next().unwrap_or_default().trim().to_string();
        let notes = fields.next().unwrap_or_default().trim().to_string();

        Ok(Self {
            id,
            stakeholder,
            notes,
        })
    }

    /// Parse a whole bug list, skipping blank lines. Bad lines are returned
    /// alongside the good ones so the caller can report them.
    pub fn parse_list(text: &str) -> (Vec<Self>, Vec<InvalidBugId>) {
        let mut entries = Vec::new();
        let mut errors = Vec::new();
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            match Self::parse(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => errors.push(e),
            }
        }
        (entries, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_line() {
        let entry = BugListEntry::parse("1512345:canonical-is:needs a fix: soon").unwrap();
        assert_eq!(entry.id, 1512345);
        assert_eq!(entry.stakeholder, "canonical-is");
        assert_eq!(entry.notes, "needs a fix: soon");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let entry = BugListEntry::parse("42").unwrap();
        assert_eq!(entry.stakeholder, "");
        assert_eq!(entry.notes, "");
    }

    #[test]
    fn rejects_non_numeric_id() {
        assert_eq!(
            BugListEntry::parse("abc:foo:bar"),
            Err(InvalidBugId("abc".to_string()))
        );
        assert!(BugListEntry::parse("0:foo:bar").is_err());
    }

    #[test]
    fn parse_list_skips_blank_lines_and_collects_errors() {
        let (entries, errors) = BugListEntry::parse_list("1:a:b\n\nx:y:z\n2:c:d\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn assignee_name_is_after_tilde() {
        let task = BugTask {
            target_name: "juju-core".to_string(),
            assignee_link: Some("https://api.launchpad.net/devel/~alice".to_string()),
            status: "Triaged".to_string(),
        };
        assert_eq!(task.assignee_name(), Some("alice"));
        assert!(task.targets_project("juju-core"));
        assert!(!task.targets_project("juju-gui"));
    }

    #[test]
    fn assignee_name_falls_back_to_link_without_tilde() {
        let task = BugTask {
            target_name: "juju-core".to_string(),
            assignee_link: Some("https://api.example.com/people/alice".to_string()),
            status: "Triaged".to_string(),
        };
        assert_eq!(task.assignee_name(), Some("https://api.example.com/people/alice"));

        let unassigned = BugTask {
            assignee_link: None,
            ..task
        };
        assert_eq!(unassigned.assignee_name(), None);
    }
}
