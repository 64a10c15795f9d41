//! Read-side projections over `records`. Recomputed on every call.

use crate::{
    dialog::types::{LogbookRow, VaultRow},
    records::types::Record,
};

const RECENT_ENTRIES: usize = 3;

pub fn vault_rows(records: &[Record]) -> Vec<VaultRow> {
    records
        .iter()
        .map(|record| VaultRow {
            record_id: record.id.clone(),
            kind: record.kind,
            title: record.title(),
            subtitle: record.subtitle(),
            log_count: record.logbook.len(),
            doc_count: record.uploaded_files.len(),
            recent_entries: record.logbook.iter().take(RECENT_ENTRIES).cloned().collect(),
        })
        .collect()
}

/// Every logbook entry of every record, record order first, entry order
/// second. No chronological sort.
pub fn logbook_rows(records: &[Record]) -> Vec<LogbookRow> {
    records
        .iter()
        .flat_map(|record| {
            let title = record.title();
            record.logbook.iter().map(move |entry| LogbookRow {
                record_id: record.id.clone(),
                kind: record.kind,
                record_title: title.clone(),
                entry: entry.entry.clone(),
                date: entry.date.clone(),
                time: entry.time.clone(),
            })
        })
        .collect()
}
