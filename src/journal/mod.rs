//! Journal data
//!
//! Journals are read-only records attached to calendar days by ISO key. The
//! dataset stores dates as `dd/mm/yyyy`; they are parsed once at load time and
//! malformed records are skipped (and remembered) instead of failing the whole
//! book.

pub mod provider;

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::dates::{iso_key, parse_external_date, DateParseError};

pub use provider::{load_book, provider_for, BundledJournals, FileJournals, JournalProvider};

/// Highest allowed rating
pub const MAX_RATING: f32 = 5.0;

/// One journal record as stored in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journal {
    pub img_url: String,
    pub rating: f32,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Display date, `dd/mm/yyyy`
    pub date: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("failed to read journals: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid journal JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("journal #{position}: {source}")]
    Date {
        position: usize,
        #[source]
        source: DateParseError,
    },

    #[error("journal for {key} has rating {rating}, expected 0-5")]
    RatingOutOfRange { key: String, rating: f32 },

    #[error("more than one journal for {key}")]
    DuplicateDate { key: String },
}

/// A journal together with its parsed date
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub key: String,
    pub journal: Journal,
}

impl JournalEntry {
    /// Number of filled stars; a partial star counts as filled
    pub fn stars(&self) -> usize {
        self.journal.rating.clamp(0.0, MAX_RATING).ceil() as usize
    }
}

/// All journals, ordered by date and indexed by ISO key
#[derive(Debug, Default)]
pub struct JournalBook {
    entries: Vec<JournalEntry>,
    by_key: HashMap<String, usize>,
    rejected: Vec<JournalError>,
}

impl JournalBook {
    /// Build a book from raw records, skipping the ones that do not validate
    pub fn from_journals(journals: Vec<Journal>) -> Self {
        let mut entries: Vec<JournalEntry> = Vec::with_capacity(journals.len());
        let mut rejected = Vec::new();

        for (position, journal) in journals.into_iter().enumerate() {
            match validate(position, journal) {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    warn!("JOURNAL: skipping record: {}", err);
                    rejected.push(err);
                }
            }
        }

        entries.sort_by_key(|entry| entry.date);

        // First record for a date wins; later ones are reported
        let mut by_key = HashMap::with_capacity(entries.len());
        let mut unique = Vec::with_capacity(entries.len());
        for entry in entries {
            if by_key.contains_key(&entry.key) {
                let err = JournalError::DuplicateDate { key: entry.key.clone() };
                warn!("JOURNAL: skipping record: {}", err);
                rejected.push(err);
                continue;
            }
            by_key.insert(entry.key.clone(), unique.len());
            unique.push(entry);
        }

        debug!("JOURNAL: loaded {} journal(s), rejected {}", unique.len(), rejected.len());
        Self {
            entries: unique,
            by_key,
            rejected,
        }
    }

    /// Parse a JSON array of journal records
    pub fn from_json(json: &str) -> Result<Self, JournalError> {
        let journals: Vec<Journal> = serde_json::from_str(json)?;
        Ok(Self::from_journals(journals))
    }

    pub fn lookup(&self, key: &str) -> Option<&JournalEntry> {
        self.by_key.get(key).map(|&index| &self.entries[index])
    }

    pub fn lookup_date(&self, date: NaiveDate) -> Option<&JournalEntry> {
        self.lookup(&iso_key(date))
    }

    /// Journals ascending by date
    pub fn ordered(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Position of the journal for `key` within [`ordered`](Self::ordered)
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records skipped while loading
    pub fn rejected(&self) -> &[JournalError] {
        &self.rejected
    }
}

fn validate(position: usize, journal: Journal) -> Result<JournalEntry, JournalError> {
    let date = parse_external_date(&journal.date)
        .map_err(|source| JournalError::Date { position, source })?;
    let key = iso_key(date);
    if !(0.0..=MAX_RATING).contains(&journal.rating) {
        return Err(JournalError::RatingOutOfRange {
            key,
            rating: journal.rating,
        });
    }
    Ok(JournalEntry { date, key, journal })
}
