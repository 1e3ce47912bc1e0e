//! Banlist sheet parsing.
//!
//! Columns: card name, legality, remark, notes. Rows with an empty name are
//! sheet formatting gaps. Resolved rows are bucketed by their legality text and
//! write the tier back onto the card in the index.

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{CardIndex, LegalityEntry, LegalityTable, LegalityTier};

use super::{cell, Row};

const TABLE: &str = "banlist sheet";

/// Parses banlist rows into a [`LegalityTable`], updating card tiers in `index`.
///
/// Every card gets at most one row applied; a later row for the same card is
/// logged and ignored. Unknown legality text is dropped.
pub fn parse_legality_table(rows: &[Row], index: &mut CardIndex) -> LegalityTable {
    let mut table = LegalityTable::default();
    let mut applied: HashSet<String> = HashSet::new();

    for (row_num, row) in rows.iter().enumerate() {
        let name = cell(row, 0);
        if name.is_empty() {
            continue;
        }

        let Some(card) = index.get_mut(name) else {
            log::warn!("{}: card not in the legal pool, skipping: {}", TABLE, name);
            continue;
        };

        let legality = cell(row, 1);
        let Some(tier) = LegalityTier::from_sheet_text(legality) else {
            log::debug!(
                "{} row {}: unrecognised legality '{}' for {}",
                TABLE,
                row_num + 1,
                legality,
                name
            );
            continue;
        };

        if !applied.insert(name.to_string()) {
            log::warn!("{}: {} is listed more than once, keeping the first row", TABLE, name);
            continue;
        }

        if tier != LegalityTier::Unlimited {
            Arc::make_mut(card).legality = tier;
        }
        table.bucket_mut(tier).push(LegalityEntry {
            id: card.id,
            card: Arc::clone(card),
            legality: legality.to_string(),
            remark: cell(row, 2).to_string(),
            notes: cell(row, 3).to_string(),
        });
    }

    log::info!(
        "Parsed banlist: {} forbidden, {} limited, {} semi-limited, {} unlimited",
        table.forbidden.len(),
        table.limited.len(),
        table.semi_limited.len(),
        table.unlimited.len()
    );
    table
}

#[cfg(test)]
#[path = "legality_table_tests.rs"]
mod tests;
