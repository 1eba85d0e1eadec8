//! A note row as read from the Apple Notes store.

use chrono::{DateTime, Utc};

/// Seconds between the Unix epoch and Apple's reference date (2001-01-01 UTC).
pub const APPLE_EPOCH_OFFSET: i64 = 978_307_200;

/// One note as stored by Apple Notes, before its body is decoded.
///
/// `body` holds the raw (usually gzip-compressed) protobuf blob; `snippet`
/// is the plain-text preview Apple keeps alongside it and serves as the body
/// when no blob is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AppleNote {
    pub id: i64,
    pub identifier: Option<String>,
    pub title: String,
    pub snippet: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub folder: Option<String>,
    pub body: Option<Vec<u8>>,
}

impl AppleNote {
    /// Creates a note with only a primary key and a title.
    ///
    /// An empty or whitespace-only title becomes `"Untitled"`.
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        let title = title.into();
        let title = match title.trim() {
            "" => "Untitled".to_string(),
            trimmed => trimmed.to_string(),
        };
        Self {
            id,
            identifier: None,
            title,
            snippet: None,
            created: None,
            modified: None,
            folder: None,
            body: None,
        }
    }

    /// Returns true if the note sits in the given folder (case-insensitive).
    pub fn in_folder(&self, folder: &str) -> bool {
        self.folder
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case(folder.trim()))
    }
}

/// Converts an Apple Core Data timestamp (seconds since 2001-01-01 UTC).
///
/// Returns `None` for values that are not finite or out of chrono's range.
///
/// ```
/// use noteport::domain::from_apple_timestamp;
///
/// let dt = from_apple_timestamp(0.0).unwrap();
/// assert_eq!(dt.to_rfc3339(), "2001-01-01T00:00:00+00:00");
/// ```
pub fn from_apple_timestamp(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    if whole.abs() > i64::MAX as f64 / 2.0 {
        return None;
    }
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    let unix = (whole as i64).checked_add(APPLE_EPOCH_OFFSET)?;
    DateTime::from_timestamp(unix, nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_note_trims_title() {
        let note = AppleNote::new(1, "  Groceries  ");
        assert_eq!(note.title, "Groceries");
        assert!(note.body.is_none());
    }

    #[test]
    fn new_note_with_blank_title_is_untitled() {
        assert_eq!(AppleNote::new(1, "   ").title, "Untitled");
    }

    #[test]
    fn folder_match_is_case_insensitive() {
        let mut note = AppleNote::new(1, "A");
        assert!(!note.in_folder("Work"));
        note.folder = Some("Work".into());
        assert!(note.in_folder("work"));
        assert!(!note.in_folder("Home"));
    }

    #[test]
    fn apple_timestamp_epoch() {
        let dt = from_apple_timestamp(0.0).unwrap();
        assert_eq!(dt.timestamp(), APPLE_EPOCH_OFFSET);
    }

    #[test]
    fn apple_timestamp_known_date() {
        // 2024-01-15T10:30:00Z
        let dt = from_apple_timestamp(727_007_400.0).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn apple_timestamp_keeps_fraction() {
        let dt = from_apple_timestamp(1.5).unwrap();
        assert_eq!(dt.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn apple_timestamp_rejects_garbage() {
        assert!(from_apple_timestamp(f64::NAN).is_none());
        assert!(from_apple_timestamp(f64::INFINITY).is_none());
        assert!(from_apple_timestamp(1e300).is_none());
    }
}
