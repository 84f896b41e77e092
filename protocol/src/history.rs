use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

/// One persisted question turn as the history store returns it.
///
/// Older records carry `createdAt` instead of `timestamp`. Both are accepted
/// here so the rest of the workspace only ever sees [`HistoryEntry`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Scalars read as text; null and anything else read as empty.
    #[serde(default, deserialize_with = "deserialize_question")]
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body of a successful `GET /api/qa/history` call.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryPage {
    #[serde(default)]
    pub history: Option<Vec<HistoryRecord>>,
}

impl HistoryPage {
    /// Normalized entries in the order the store returned them. A missing or
    /// null `history` field is an empty page.
    pub fn into_entries(self) -> Vec<HistoryEntry> {
        self.history
            .unwrap_or_default()
            .into_iter()
            .map(HistoryEntry::from)
            .collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub question: String,
    /// ISO-8601. `None` only when the store recorded neither timestamp field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl From<HistoryRecord> for HistoryEntry {
    fn from(record: HistoryRecord) -> Self {
        let HistoryRecord {
            question,
            timestamp,
            created_at,
        } = record;
        let timestamp = timestamp
            .filter(|ts| !ts.is_empty())
            .or(created_at.filter(|ts| !ts.is_empty()));
        Self {
            question,
            timestamp,
        }
    }
}

fn deserialize_question<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(question)) => question,
        Some(Value::Number(question)) => question.to_string(),
        Some(Value::Bool(question)) => question.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn prefers_timestamp_over_created_at() {
        let record: HistoryRecord = serde_json::from_value(json!({
            "question": "What is X?",
            "timestamp": "2024-01-01T00:00:00Z",
            "createdAt": "2023-12-31T23:59:59Z",
        }))
        .expect("valid record");

        assert_eq!(
            HistoryEntry::from(record),
            HistoryEntry {
                question: "What is X?".to_string(),
                timestamp: Some("2024-01-01T00:00:00Z".to_string()),
            }
        );
    }

    #[test]
    fn falls_back_to_created_at() {
        let record: HistoryRecord = serde_json::from_value(json!({
            "question": "Why?",
            "createdAt": "2024-02-02T10:00:00.000Z",
            "answer": "ignored",
        }))
        .expect("valid record");

        let entry = HistoryEntry::from(record);
        assert_eq!(entry.timestamp.as_deref(), Some("2024-02-02T10:00:00.000Z"));
    }

    #[test]
    fn empty_timestamp_does_not_shadow_created_at() {
        let record = HistoryRecord {
            question: "q".to_string(),
            timestamp: Some(String::new()),
            created_at: Some("2024-03-03T00:00:00Z".to_string()),
        };

        assert_eq!(
            HistoryEntry::from(record).timestamp.as_deref(),
            Some("2024-03-03T00:00:00Z")
        );
    }

    #[test]
    fn null_history_is_empty() {
        let page: HistoryPage =
            serde_json::from_value(json!({ "history": null, "total": 0 })).expect("valid page");
        assert!(page.into_entries().is_empty());

        let page: HistoryPage = serde_json::from_value(json!({})).expect("valid page");
        assert!(page.into_entries().is_empty());
    }

    #[test]
    fn page_preserves_store_order() {
        let page: HistoryPage = serde_json::from_value(json!({
            "history": [
                { "question": "second", "timestamp": "2024-01-02T00:00:00Z" },
                { "question": "first", "timestamp": "2024-01-01T00:00:00Z" },
            ]
        }))
        .expect("valid page");

        let questions = page
            .into_entries()
            .into_iter()
            .map(|entry| entry.question)
            .collect::<Vec<_>>();
        assert_eq!(questions, vec!["second".to_string(), "first".to_string()]);
    }

    #[test]
    fn odd_question_values_do_not_fail_the_page() {
        let page: HistoryPage = serde_json::from_value(json!({
            "history": [
                { "question": null, "timestamp": "2024-01-01T00:00:00Z" },
                { "question": 42, "timestamp": "2024-01-02T00:00:00Z" },
                { "question": { "text": "nested" }, "timestamp": "2024-01-03T00:00:00Z" },
                { "question": "ok", "timestamp": "2024-01-04T00:00:00Z" },
            ]
        }))
        .expect("valid page");

        let questions = page
            .into_entries()
            .into_iter()
            .map(|entry| entry.question)
            .collect::<Vec<_>>();
        assert_eq!(
            questions,
            vec![
                String::new(),
                "42".to_string(),
                String::new(),
                "ok".to_string()
            ]
        );
    }
}
