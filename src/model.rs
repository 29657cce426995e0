//! Announcement record and the pagination value objects around it.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Stored announcement. `date_time` is the server-assigned creation timestamp,
/// kept as the exact string written to the table so cursors never re-format it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub title: String,
    pub description: String,
    #[serde(rename = "date-time")]
    pub date_time: String,
}

impl Announcement {
    pub fn key(&self) -> PrimaryKey {
        PrimaryKey {
            title: self.title.clone(),
            date_time: self.date_time.clone(),
        }
    }
}

/// Validated create payload, before the store assigns a timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAnnouncement {
    pub title: String,
    pub description: String,
}

impl NewAnnouncement {
    pub fn stamp(self, at: DateTime<Utc>) -> Announcement {
        Announcement {
            title: self.title,
            description: self.description,
            date_time: format_timestamp(at),
        }
    }
}

/// Composite table key `(title, date-time)`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrimaryKey {
    pub title: String,
    pub date_time: String,
}

/// Where the next scan resumes and which page number it produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageCursor {
    pub last_key: PrimaryKey,
    pub next_page_number: u32,
}

/// One store page of a full-table scan.
#[derive(Clone, Debug, Default)]
pub struct ScanPage {
    pub items: Vec<Announcement>,
    /// Present when the store has more items after this page.
    pub last_key: Option<PrimaryKey>,
}

/// `details` of a successful list response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListPage {
    pub page: u32,
    pub announcements: Vec<Announcement>,
    pub next_page: Option<String>,
}

/// ISO-8601 UTC with microseconds and an explicit `+00:00` offset (32 chars).
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}
