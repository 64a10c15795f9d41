use std::collections::BTreeSet;

use crate::{
    dialog::{
        error::{DialogError, invariant_violation},
        types::{SessionState, Step},
    },
    records::{mint::is_record_id, types::Record},
};

pub fn assert_session_invariants(state: &SessionState) -> Result<(), DialogError> {
    if state.step == Step::Unknown {
        return Err(invariant_violation("session step is not a known step"));
    }

    let mut seen = BTreeSet::new();
    for record in &state.records {
        if !is_record_id(&record.id) {
            return Err(invariant_violation(format!(
                "record id '{}' does not match dtc_ + 6 base36 chars",
                record.id
            )));
        }
        if !seen.insert(record.id.as_str()) {
            return Err(invariant_violation(format!(
                "record id '{}' appears more than once",
                record.id
            )));
        }
        if record.logbook.is_empty() {
            return Err(invariant_violation(format!(
                "record '{}' has an empty logbook",
                record.id
            )));
        }
    }

    Ok(())
}

/// `after` must extend `before`: same records in the same order, unchanged,
/// with each logbook keeping its prefix.
pub fn assert_append_only(before: &[Record], after: &[Record]) -> Result<(), DialogError> {
    if after.len() < before.len() {
        return Err(invariant_violation(format!(
            "records shrank from {} to {}",
            before.len(),
            after.len()
        )));
    }

    for (prior, current) in before.iter().zip(after) {
        let unchanged = prior.id == current.id
            && prior.kind == current.kind
            && prior.hash == current.hash
            && prior.created_at == current.created_at
            && prior.fields == current.fields
            && prior.uploaded_files == current.uploaded_files;
        if !unchanged {
            return Err(invariant_violation(format!(
                "record '{}' was modified after minting",
                prior.id
            )));
        }
        if !current.logbook.starts_with(&prior.logbook) {
            return Err(invariant_violation(format!(
                "logbook of record '{}' lost or rewrote entries",
                prior.id
            )));
        }
    }

    Ok(())
}
