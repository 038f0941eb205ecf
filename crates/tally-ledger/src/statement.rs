use tally_types::{Amount, PartyId};

use crate::ledger::Ledger;

/// Deterministic text renderings of the ledger.
///
/// Statements are pure reads. Lines are sorted by counterpart id (per-party
/// view) or by debtor then creditor (full listing), so the same ledger
/// always renders the same text regardless of insertion history.
pub struct StatementBuilder;

impl StatementBuilder {
    /// Statement for one party: the debts they owe, then the credits owed
    /// to them. Falls back to a not-found line when the party appears
    /// nowhere in the ledger.
    pub fn for_party(ledger: &Ledger, party: &PartyId) -> String {
        let mut debts: Vec<(&PartyId, Amount)> = Vec::new();
        let mut credits: Vec<(&PartyId, Amount)> = Vec::new();

        for (_, record) in ledger.iter() {
            if &record.debtor == party {
                debts.push((&record.creditor, record.amount));
            } else if &record.creditor == party {
                credits.push((&record.debtor, record.amount));
            }
        }

        if debts.is_empty() && credits.is_empty() {
            return format!("Could not find debts involving: {party}.");
        }

        debts.sort_by(|a, b| a.0.cmp(b.0));
        credits.sort_by(|a, b| a.0.cmp(b.0));

        let mut lines = Vec::new();
        if !debts.is_empty() {
            lines.push(format!("{party}'s debts:"));
            for (creditor, amount) in debts {
                lines.push(format!("  {creditor}: {amount}"));
            }
        }
        if !credits.is_empty() {
            lines.push(format!("{party}'s credits:"));
            for (debtor, amount) in credits {
                lines.push(format!("  {debtor}: {amount}"));
            }
        }
        lines.join("\n")
    }

    /// Full listing of every record, or a placeholder for an empty ledger.
    pub fn all(ledger: &Ledger) -> String {
        if ledger.is_empty() {
            return "No debts have yet been added.".into();
        }

        let mut records = ledger.to_records();
        records.sort_by(|a, b| {
            a.debtor
                .cmp(&b.debtor)
                .then_with(|| a.creditor.cmp(&b.creditor))
        });

        let mut lines = vec!["Showing all debts:".to_string()];
        for record in records {
            lines.push(format!("  {record}"));
        }
        lines.join("\n")
    }
}
