//! Timestamp normalization for stored entries

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Entry, EntryRecord};

/// A persisted timestamp in any of the shapes the backend has used over
/// time: epoch milliseconds, an RFC 3339 string, or the store's native
/// `{seconds, nanos}` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Millis(i64),
    Rfc3339(String),
    Split {
        seconds: i64,
        #[serde(default)]
        nanos: u32,
    },
}

#[derive(Debug, Error)]
pub enum TimeError {
    #[error("entry has neither a date nor a creation timestamp")]
    NoDate,
    #[error("invalid timestamp: {value}")]
    InvalidTimestamp { value: String },
    #[error("timestamp out of range: {0}")]
    OutOfRange(i64),
}

impl RawTimestamp {
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, TimeError> {
        match self {
            RawTimestamp::Millis(ms) => Utc
                .timestamp_millis_opt(*ms)
                .single()
                .ok_or(TimeError::OutOfRange(*ms)),
            RawTimestamp::Rfc3339(text) => DateTime::parse_from_rfc3339(text)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| TimeError::InvalidTimestamp {
                    value: text.clone(),
                }),
            RawTimestamp::Split { seconds, nanos } => Utc
                .timestamp_opt(*seconds, *nanos)
                .single()
                .ok_or(TimeError::OutOfRange(*seconds)),
        }
    }
}

/// Turns a raw store record into an [`Entry`] with one canonical display
/// timestamp: `date` when present, otherwise `created_at`. A record with
/// neither is invalid.
pub fn normalize_entry(id: &str, record: EntryRecord) -> Result<Entry, TimeError> {
    let created_at = record
        .created_at
        .as_ref()
        .map(RawTimestamp::to_datetime)
        .transpose()?;
    let updated_at = record
        .updated_at
        .as_ref()
        .map(RawTimestamp::to_datetime)
        .transpose()?;
    let date = match record.date.as_ref() {
        Some(raw) => raw.to_datetime()?,
        None => created_at.ok_or(TimeError::NoDate)?,
    };
    Ok(Entry {
        id: id.to_string(),
        title: record.title,
        content: record.content,
        tags: record.tags,
        mood: record.mood,
        location: record.location,
        date,
        created_at,
        updated_at,
        kind: record.kind,
        media: record.media,
        embed_url: record.embed_url,
        image_urls: record.image_urls,
        title_size: record.title_size,
        line_height: record.line_height,
        is_published: record.is_published,
        owner_id: record.owner_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(date: Option<RawTimestamp>, created_at: Option<RawTimestamp>) -> EntryRecord {
        EntryRecord {
            date,
            created_at,
            ..EntryRecord::default()
        }
    }

    #[test]
    fn millis_round_to_datetime() {
        let raw = RawTimestamp::Millis(1_700_000_000_000);
        let dt = raw.to_datetime().expect("timestamp should convert");
        assert_eq!(dt.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn rfc3339_parses() {
        let raw = RawTimestamp::Rfc3339("2024-03-01T12:30:00Z".to_string());
        let dt = raw.to_datetime().expect("timestamp should convert");
        assert_eq!(dt.to_rfc3339(), "2024-03-01T12:30:00+00:00");
    }

    #[test]
    fn split_pair_parses() {
        let raw = RawTimestamp::Split {
            seconds: 1_700_000_000,
            nanos: 500_000_000,
        };
        let dt = raw.to_datetime().expect("timestamp should convert");
        assert_eq!(dt.timestamp(), 1_700_000_000);
        assert_eq!(dt.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn garbage_string_is_invalid() {
        let raw = RawTimestamp::Rfc3339("yesterday".to_string());
        assert!(matches!(
            raw.to_datetime(),
            Err(TimeError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn date_wins_over_created_at() {
        let record = record_with(
            Some(RawTimestamp::Rfc3339("2024-06-01T00:00:00Z".to_string())),
            Some(RawTimestamp::Rfc3339("2024-01-01T00:00:00Z".to_string())),
        );
        let entry = normalize_entry("e1", record).expect("entry should normalize");
        assert_eq!(entry.date.to_rfc3339(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn created_at_fills_in_for_missing_date() {
        let record = record_with(
            None,
            Some(RawTimestamp::Rfc3339("2024-01-01T00:00:00Z".to_string())),
        );
        let entry = normalize_entry("e1", record).expect("entry should normalize");
        assert_eq!(entry.date.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(entry.created_at, Some(entry.date));
    }

    #[test]
    fn missing_both_dates_is_rejected() {
        let record = record_with(None, None);
        assert!(matches!(
            normalize_entry("e1", record),
            Err(TimeError::NoDate)
        ));
    }

    #[test]
    fn untagged_shapes_deserialize() {
        let millis: RawTimestamp = serde_json::from_str("1700000000000").expect("millis");
        assert_eq!(millis, RawTimestamp::Millis(1_700_000_000_000));

        let text: RawTimestamp =
            serde_json::from_str(r#""2024-03-01T12:30:00Z""#).expect("string");
        assert_eq!(text, RawTimestamp::Rfc3339("2024-03-01T12:30:00Z".to_string()));

        let split: RawTimestamp =
            serde_json::from_str(r#"{"seconds": 1700000000, "nanos": 0}"#).expect("split");
        assert_eq!(
            split,
            RawTimestamp::Split {
                seconds: 1_700_000_000,
                nanos: 0
            }
        );
    }
}
