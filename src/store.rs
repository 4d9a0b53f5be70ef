// src/store.rs
// In-memory tables handed from the scrapers to the exporters.

use std::collections::HashSet;

use crate::record::{Column, ProductRecord};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    /// Header row from the column labels, one row per record.
    pub fn from_records(columns: &[Column], records: &[ProductRecord]) -> Self {
        Self {
            headers: Some(columns.iter().map(|(label, _)| s!(*label)).collect()),
            rows: records.iter().map(|r| r.row(columns)).collect(),
        }
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

/// A URL that could not be fetched or read, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skipped {
    pub url: String,
    pub reason: String,
}

/// Keep the first record for each product URL, in original order.
/// Returns how many were dropped.
pub fn dedup_by_url(records: &mut Vec<ProductRecord>) -> usize {
    let before = records.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(before);
    records.retain(|r| seen.insert(r.url.clone()));
    before - records.len()
}

/// `Site, URL, Reason` table for the skipped report.
pub fn skipped_dataset<'a, 'b, I>(entries: I) -> DataSet
where
    I: IntoIterator<Item = (&'a str, &'b Skipped)>,
{
    DataSet {
        headers: Some(vec![s!("Site"), s!("URL"), s!("Reason")]),
        rows: entries
            .into_iter()
            .map(|(site, sk)| vec![s!(site), sk.url.clone(), sk.reason.clone()])
            .collect(),
    }
}
