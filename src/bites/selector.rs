//! Naming records from the command line.
//!
//! Ids are millisecond timestamps, which nobody wants to type, so a
//! selector may also be a 1-based position in the list. An exact id match
//! always wins: with the sample data, `2` is the record with id `"2"`,
//! wherever it sits.

use crate::model::RestaurantRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSelector(String);

impl RecordSelector {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Position of the selected record in `records`.
    pub fn locate(&self, records: &[RestaurantRecord]) -> Option<usize> {
        if let Some(pos) = records.iter().position(|r| r.id == self.0) {
            return Some(pos);
        }
        let n: usize = self.0.parse().ok()?;
        (1..=records.len()).contains(&n).then(|| n - 1)
    }

    pub fn resolve<'a>(&self, records: &'a [RestaurantRecord]) -> Option<&'a RestaurantRecord> {
        self.locate(records).map(|i| &records[i])
    }
}

impl std::fmt::Display for RecordSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordSelector {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RecordSelector {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A record together with its 1-based list position.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedRecord {
    pub position: usize,
    pub record: RestaurantRecord,
}

pub fn number_records(records: Vec<RestaurantRecord>) -> Vec<ListedRecord> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| ListedRecord {
            position: i + 1,
            record,
        })
        .collect()
}
