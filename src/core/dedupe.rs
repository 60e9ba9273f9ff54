use crate::domain::model::{DedupeResult, Record};
use std::collections::HashSet;

/// Keeps the first record for each (name, phone, email) triple, preserving order.
pub fn dedupe(records: Vec<Record>) -> DedupeResult {
    let total = records.len();
    let mut seen: HashSet<(String, String, String)> = HashSet::with_capacity(total);
    let mut unique = Vec::with_capacity(total);

    for record in records {
        let (name, phone, email) = record.identity();
        let key = (name.to_string(), phone.to_string(), email.to_string());
        if seen.insert(key) {
            unique.push(record);
        }
    }

    DedupeResult {
        duplicates_removed: total - unique.len(),
        records: unique,
    }
}
