//! Data types for MediaWiki API responses.

use serde::{Deserialize, Serialize};

/// One revision of an article, as returned by `prop=revisions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Revision {
    /// ISO-8601-like timestamp (e.g. `"2020-06-01T12:30:00Z"`). Sorts
    /// lexicographically in chronological order.
    pub timestamp: String,

    /// Name of the editing user. Empty when the user was hidden.
    #[serde(default)]
    pub user: String,

    /// Page size in bytes after the edit.
    #[serde(default)]
    pub size: u64,

    /// Edit summary. Absent when the comment was redacted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Marker the API substitutes for a redacted comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commenthidden: Option<String>,
}

impl Revision {
    /// The text to scan for move-log phrasings: the comment, or the
    /// redaction marker when the comment is hidden.
    #[must_use]
    pub fn effective_comment(&self) -> &str {
        self.comment
            .as_deref()
            .or(self.commenthidden.as_deref())
            .unwrap_or("")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_full_record() {
        let revision: Revision = serde_json::from_value(json!({
            "timestamp": "2020-06-01T12:30:00Z",
            "user": "ExampleUser",
            "size": 2048,
            "comment": "typo fix"
        }))
        .unwrap();

        assert_eq!(revision.timestamp, "2020-06-01T12:30:00Z");
        assert_eq!(revision.user, "ExampleUser");
        assert_eq!(revision.size, 2048);
        assert_eq!(revision.effective_comment(), "typo fix");
    }

    #[test]
    fn hidden_comment_falls_back_to_marker() {
        let revision: Revision = serde_json::from_value(json!({
            "timestamp": "2020-06-01T12:30:00Z",
            "user": "ExampleUser",
            "size": 2048,
            "commenthidden": ""
        }))
        .unwrap();

        assert_eq!(revision.comment, None);
        assert_eq!(revision.effective_comment(), "");
    }

    #[test]
    fn tolerates_absent_optional_fields() {
        let revision: Revision =
            serde_json::from_value(json!({"timestamp": "2020-06-01T12:30:00Z"})).unwrap();

        assert_eq!(revision.user, "");
        assert_eq!(revision.size, 0);
        assert_eq!(revision.effective_comment(), "");
    }

    #[test]
    fn ignores_unknown_fields() {
        let revision: Revision = serde_json::from_value(json!({
            "timestamp": "2020-06-01T12:30:00Z",
            "parentid": 123,
            "minor": ""
        }))
        .unwrap();

        assert_eq!(revision.timestamp, "2020-06-01T12:30:00Z");
    }
}
