//! Statistic records and their citation metadata
//!
//! A [`StatisticRecord`] is one research finding shown to the user. Records have
//! no identifier; two records are considered the same finding when their titles
//! are equal, which is what every deduplication step in this crate keys on.

use serde::{Deserialize, Serialize};

/// Placeholder shown for citation fields that were never filled in
pub const NOT_SPECIFIED: &str = "Not specified";

/// One research finding shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticRecord {
    /// Headline claim
    pub title: String,

    /// The salient number or short token shown large ("76%", "€69,000")
    pub figure: String,

    /// One to three sentences of elaboration
    #[serde(default)]
    pub description: String,

    /// Short citation label
    #[serde(default)]
    pub source: String,

    /// URL to the source, may be absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Extended citation metadata
    #[serde(default)]
    pub details: DetailRecord,
}

impl StatisticRecord {
    /// Whether two records describe the same finding
    pub fn same_title(&self, other: &StatisticRecord) -> bool {
        self.title == other.title
    }

    /// Source link, ignoring blank values
    pub fn link(&self) -> Option<&str> {
        non_blank(self.link.as_deref())
    }

    /// Labelled detail rows for a citation view, in display order
    ///
    /// Missing fields render as [`NOT_SPECIFIED`]. The link row falls back to
    /// the record's own link before giving up.
    pub fn detail_lines(&self) -> Vec<(&'static str, &str)> {
        let link = non_blank(self.details.link.as_deref())
            .or_else(|| self.link())
            .unwrap_or(NOT_SPECIFIED);

        vec![
            ("Title", self.details.title_or_default()),
            ("Publication", self.details.publication_or_default()),
            ("Authors", self.details.authors_or_default()),
            ("Date", self.details.date_or_default()),
            ("Description", self.details.description_or_default()),
            ("Link", link),
        ]
    }
}

/// Extended citation metadata, every field best-effort
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl DetailRecord {
    pub fn title_or_default(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or(NOT_SPECIFIED)
    }

    pub fn publication_or_default(&self) -> &str {
        non_blank(self.publication.as_deref()).unwrap_or(NOT_SPECIFIED)
    }

    pub fn authors_or_default(&self) -> &str {
        non_blank(self.authors.as_deref()).unwrap_or(NOT_SPECIFIED)
    }

    pub fn date_or_default(&self) -> &str {
        non_blank(self.date.as_deref()).unwrap_or(NOT_SPECIFIED)
    }

    pub fn description_or_default(&self) -> &str {
        non_blank(self.description.as_deref()).unwrap_or(NOT_SPECIFIED)
    }

    pub fn link_or_default(&self) -> &str {
        non_blank(self.link.as_deref()).unwrap_or(NOT_SPECIFIED)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A goal slot as authored: either one canonical record or several variants
///
/// Only exists at the asset boundary. Catalogs store the normalized form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum GoalEntry {
    Many(Vec<StatisticRecord>),
    One(StatisticRecord),
}

impl GoalEntry {
    pub(crate) fn into_records(self) -> Vec<StatisticRecord> {
        match self {
            GoalEntry::Many(records) => records,
            GoalEntry::One(record) => vec![record],
        }
    }
}

/// Drop records whose title was already seen, keeping the first occurrence
pub fn dedup_by_title(records: Vec<StatisticRecord>) -> Vec<StatisticRecord> {
    let mut seen = std::collections::HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.title.clone()))
        .collect()
}
