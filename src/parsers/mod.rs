//! Row-stream parsers for the spreadsheet tables.
//!
//! Spreadsheet exports carry their structure only through blank cells and
//! column position, so each table gets its own small parser:
//!
//! - [`legality_table`] - flat filter-map of banlist rows into tier buckets
//! - [`exception_groups`] - header/data/blank blocks into named groups
//! - [`decklists`] - name/description/image/main/extra blocks into decklists
//!
//! Rows naming a card that is not in the legal pool are skipped with a warning.

pub mod decklists;
pub mod exception_groups;
pub mod legality_table;

use std::sync::Arc;

use crate::models::{Card, CardIndex};

pub use decklists::parse_decklists;
pub use exception_groups::{always_legal_names, parse_exception_groups};
pub use legality_table::parse_legality_table;

/// One spreadsheet row; trailing empty cells may be missing
pub type Row = Vec<String>;

/// Trimmed cell text, empty when the row is too short
pub fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map(|c| c.trim()).unwrap_or("")
}

/// Look a card up by name, warning when it is not in the pool
pub(crate) fn resolve_card(index: &CardIndex, name: &str, table: &str) -> Option<Arc<Card>> {
    let card = index.get(name).cloned();
    if card.is_none() {
        log::warn!("{}: card not in the legal pool, skipping: {}", table, name);
    }
    card
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn cell_trims_and_defaults() {
        let r = row(&["  Dark Magician ", "Limited"]);
        assert_eq!(cell(&r, 0), "Dark Magician");
        assert_eq!(cell(&r, 1), "Limited");
        assert_eq!(cell(&r, 5), "");
        assert_eq!(cell(&[], 0), "");
    }

    #[test]
    fn resolve_card_misses_return_none() {
        let index = make_index(&["Dark Magician"]);
        assert!(resolve_card(&index, "Dark Magician", "test").is_some());
        assert!(resolve_card(&index, "Blue-Eyes White Dragon", "test").is_none());
    }
}
