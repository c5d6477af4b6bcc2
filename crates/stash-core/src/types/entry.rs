//! Entry types

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A stored text entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub text: String,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Build a new entry with a fresh id and the current time.
    ///
    /// `text` is expected to be the output of [`normalize_text`].
    pub fn new(text: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text,
            // Millisecond precision, same as the wire format.
            created_at: Utc::now().trunc_subsecs(3),
        }
    }
}

/// Trim `raw` and reject it if nothing is left.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// `2024-05-01T12:00:00.123Z` on the wire, any RFC 3339 string accepted back.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  hello  "), Some("hello".to_string()));
        assert_eq!(normalize_text("a b"), Some("a b".to_string()));
        assert_eq!(normalize_text(""), None);
        assert_eq!(normalize_text(" \t\n "), None);
    }

    #[test]
    fn test_new_entries_get_distinct_ids() {
        let a = Entry::new("one".to_string());
        let b = Entry::new("one".to_string());
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(a.text, "one");
    }

    #[test]
    fn test_new_entry_survives_json() {
        let entry = Entry::new("stored".to_string());
        let json = serde_json::to_string(&entry).unwrap();
        let back: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_wire_format() {
        let entry = Entry {
            id: "42".to_string(),
            text: "hello".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "42",
                "text": "hello",
                "createdAt": "2024-05-01T12:00:00.000Z"
            })
        );
    }

    #[test]
    fn test_reads_entries_written_by_other_clients() {
        // Timestamp ids and a different key order are both fine.
        let raw = r#"{"text":"legacy","createdAt":"2023-11-14T22:13:20.000Z","id":"1700000000000"}"#;
        let entry: Entry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.id, "1700000000000");
        assert_eq!(entry.text, "legacy");
        assert_eq!(entry.created_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_rejects_bad_timestamp() {
        let raw = r#"{"id":"1","text":"x","createdAt":"yesterday"}"#;
        assert!(serde_json::from_str::<Entry>(raw).is_err());
    }
}
