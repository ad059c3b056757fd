//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the immutable record written once per day by the composer.
//! - Derive the entry kind from its content instead of storing it.
//!
//! # Invariants
//! - `date` is an RFC 3339 timestamp and doubles as the entry key.
//! - `kind()` always agrees with `(text, image_ref)`; a stored `type` field is
//!   ignored on read.
//! - An empty image reference is treated as no image.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Content shape of an entry, derived from text and image presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    Text,
    Image,
    ImageAndText,
}

impl EntryKind {
    /// `ImageAndText` when both an image and non-blank text are present,
    /// `Image` for an image alone, `Text` otherwise.
    pub fn derive(text: &str, image_ref: Option<&str>) -> Self {
        match (image_ref.is_some(), text.trim().is_empty()) {
            (true, false) => Self::ImageAndText,
            (true, true) => Self::Image,
            (false, _) => Self::Text,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::ImageAndText => "imageAndText",
        }
    }
}

/// Validation failures for entry construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Neither non-blank text nor an image was supplied.
    Empty,
    /// `date` is not an RFC 3339 timestamp.
    InvalidDate(String),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "entry needs text or an image"),
            Self::InvalidDate(value) => write!(f, "invalid entry date `{value}`"),
        }
    }
}

impl Error for EntryValidationError {}

/// One journal record. Immutable once saved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "StoredEntry")]
pub struct Entry {
    date: String,
    created_at: DateTime<FixedOffset>,
    text: String,
    image_ref: Option<String>,
}

impl Entry {
    /// Creates an entry stamped with the current instant.
    pub fn new(text: impl Into<String>, image_ref: Option<String>) -> Self {
        Self::at(&Utc::now(), text, image_ref)
    }

    /// Creates an entry stamped with `created_at`.
    ///
    /// The key is the UTC instant with millisecond precision, e.g.
    /// `2024-01-01T10:00:00.000Z`.
    pub fn at<Tz: TimeZone>(
        created_at: &DateTime<Tz>,
        text: impl Into<String>,
        image_ref: Option<String>,
    ) -> Self {
        let utc = created_at.with_timezone(&Utc);
        Self {
            date: utc.to_rfc3339_opts(SecondsFormat::Millis, true),
            created_at: utc.fixed_offset(),
            text: text.into(),
            image_ref: normalize_image_ref(image_ref),
        }
    }

    /// Creates an entry with a caller-provided date key.
    ///
    /// Used by import paths and tests where the key already exists. The key
    /// is kept byte-for-byte so `delete_by_date` matches it exactly.
    pub fn with_date(
        date: impl Into<String>,
        text: impl Into<String>,
        image_ref: Option<String>,
    ) -> Result<Self, EntryValidationError> {
        let date = date.into();
        let created_at = DateTime::parse_from_rfc3339(&date)
            .map_err(|_| EntryValidationError::InvalidDate(date.clone()))?;
        Ok(Self {
            date,
            created_at,
            text: text.into(),
            image_ref: normalize_image_ref(image_ref),
        })
    }

    /// Entry key: the creation timestamp exactly as persisted.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }

    pub fn kind(&self) -> EntryKind {
        EntryKind::derive(&self.text, self.image_ref())
    }

    /// Whether the entry has non-blank text or an image.
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty() || self.image_ref.is_some()
    }

    /// Calendar day of the entry in the given time zone.
    pub fn day_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.created_at.with_timezone(tz).date_naive()
    }

    /// Long US-English date in the device's local zone, e.g. `January 1, 2024`.
    pub fn display_date(&self) -> String {
        format_display_date(self.day_in(&Local))
    }
}

/// Formats a calendar day as `Month D, YYYY`.
pub fn format_display_date(day: NaiveDate) -> String {
    day.format("%B %-d, %Y").to_string()
}

fn normalize_image_ref(image_ref: Option<String>) -> Option<String> {
    image_ref.filter(|value| !value.is_empty())
}

/// Persisted shape. Unknown fields, including the stored `type`, are ignored.
#[derive(Deserialize)]
struct StoredEntry {
    date: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    uri: Option<String>,
}

impl TryFrom<StoredEntry> for Entry {
    type Error = EntryValidationError;

    fn try_from(value: StoredEntry) -> Result<Self, Self::Error> {
        Entry::with_date(value.date, value.text.unwrap_or_default(), value.uri)
    }
}

#[derive(Serialize)]
struct StoredEntryRef<'a> {
    date: &'a str,
    #[serde(rename = "type")]
    kind: EntryKind,
    text: &'a str,
    uri: Option<&'a str>,
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        StoredEntryRef {
            date: &self.date,
            kind: self.kind(),
            text: &self.text,
            uri: self.image_ref(),
        }
        .serialize(serializer)
    }
}
