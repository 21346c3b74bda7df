//! Blog entry records.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Default value of [`Entry::allow_comments`] when the record does not set it.
pub const DEFAULT_ALLOW_COMMENTS: i32 = -1;

/// Default value of [`Entry::allow_pings`] when the record does not set it.
pub const DEFAULT_ALLOW_PINGS: i32 = -1;

/// Publication status of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Not published.
    Draft,
    /// Published.
    Publish,
    /// Scheduled for publication.
    Future,
}

impl Status {
    /// Returns the literal used in the export format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Publish => "Publish",
            Self::Future => "Future",
        }
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Draft" => Ok(Self::Draft),
            "Publish" => Ok(Self::Publish),
            "Future" => Ok(Self::Future),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single blog post record.
///
/// Multi-line fields (`body`, `extended_body`, `excerpt`, `keywords`,
/// `comment`) hold every captured line followed by `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    /// Author name.
    pub author: String,
    /// Entry title.
    pub title: String,
    /// URL basename.
    pub basename: String,
    /// Publication status, `None` when the record has no `STATUS` line.
    pub status: Option<Status>,
    /// Whether comments are allowed: 0, 1, or [`DEFAULT_ALLOW_COMMENTS`].
    pub allow_comments: i32,
    /// Whether pings are allowed: 0, 1, or [`DEFAULT_ALLOW_PINGS`].
    pub allow_pings: i32,
    /// Line break conversion setting, passed through unchanged.
    pub convert_breaks: String,
    /// Publication date, `None` when the record has no `DATE` line.
    pub date: Option<NaiveDateTime>,
    /// Primary category name.
    pub primary_category: String,
    /// Categories in order of appearance.
    pub categories: Vec<String>,
    /// Featured image path.
    pub image: String,
    /// Main content.
    pub body: String,
    /// Extended content.
    pub extended_body: String,
    /// Excerpt.
    pub excerpt: String,
    /// Keywords.
    pub keywords: String,
    /// Comments on the entry.
    pub comment: String,
}

impl Entry {
    /// Creates an entry with default values.
    ///
    /// `allow_comments` and `allow_pings` start at -1; everything else is empty.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            author: String::new(),
            title: String::new(),
            basename: String::new(),
            status: None,
            allow_comments: DEFAULT_ALLOW_COMMENTS,
            allow_pings: DEFAULT_ALLOW_PINGS,
            convert_breaks: String::new(),
            date: None,
            primary_category: String::new(),
            categories: Vec::new(),
            image: String::new(),
            body: String::new(),
            extended_body: String::new(),
            excerpt: String::new(),
            keywords: String::new(),
            comment: String::new(),
        }
    }

    /// Returns the status literal, or `""` when unset.
    #[must_use]
    pub fn status_str(&self) -> &'static str {
        self.status.map_or("", Status::as_str)
    }

    /// Returns the date interpreted as UTC.
    #[must_use]
    pub fn date_utc(&self) -> Option<DateTime<Utc>> {
        self.date.map(|date| date.and_utc())
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}
