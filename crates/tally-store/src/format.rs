//! Line codec for the snapshot format.
//!
//! One record per line, `debtor creditor amount`, single-space separated.
//! Rendering and parsing are exact inverses for every record set the ledger
//! can hold, which is what makes the snapshot round-trip safe.

use tally_types::{Amount, Obligation, PartyId};

use crate::error::{StoreError, StoreResult};

/// Render one record as a snapshot line, without the trailing newline.
pub fn render_record(record: &Obligation) -> String {
    format!("{} {} {}", record.debtor, record.creditor, record.amount)
}

/// Render the full record set, one newline-terminated line per record.
pub fn render(records: &[Obligation]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&render_record(record));
        out.push('\n');
    }
    out
}

/// Parse a full snapshot.
///
/// Blank lines are skipped. Any malformed line poisons the entire parse: a
/// snapshot is read back in full or rejected as corrupt, never partially.
pub fn parse(text: &str) -> StoreResult<Vec<Obligation>> {
    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        records.push(parse_line(line, idx + 1)?);
    }
    Ok(records)
}

/// Parse a single `debtor creditor amount` line. `line_no` is 1-based.
fn parse_line(line: &str, line_no: usize) -> StoreResult<Obligation> {
    let corrupt = |reason: String| StoreError::CorruptLine {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() != 3 {
        return Err(corrupt(format!(
            "expected 3 space-separated fields, found {}",
            fields.len()
        )));
    }

    let debtor = PartyId::new(fields[0]).map_err(|e| corrupt(e.to_string()))?;
    let creditor = PartyId::new(fields[1]).map_err(|e| corrupt(e.to_string()))?;
    let amount: Amount = fields[2]
        .parse()
        .map_err(|_| corrupt(format!("amount {:?} is not a positive integer", fields[2])))?;

    Obligation::new(debtor, creditor, amount).map_err(|e| corrupt(e.to_string()))
}
