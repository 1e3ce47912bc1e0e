//! Exception sheet parsing.
//!
//! The sheet is a sequence of blocks:
//!
//! ```text
//! | (empty)      | Group name |            |       |
//! | Card name    | Set code   | Date       | Notes |
//! | ...          |            |            |       |
//! | (empty)      |            |            |       |   <- closes the group
//! ```
//!
//! The last group does not need a closing blank row.

use std::collections::HashSet;

use crate::models::{CardIndex, ExceptionEntry, ExceptionGroup};

use super::{cell, resolve_card, Row};

const TABLE: &str = "exception sheet";

enum State {
    AwaitingHeader,
    InGroup(ExceptionGroup),
}

/// Names on the exception sheet; these are legal whatever their printings
pub fn always_legal_names(rows: &[Row]) -> HashSet<String> {
    rows.iter()
        .map(|row| cell(row, 0))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses exception sheet rows into ordered groups.
pub fn parse_exception_groups(rows: &[Row], index: &CardIndex) -> Vec<ExceptionGroup> {
    let mut groups = Vec::new();
    let mut state = State::AwaitingHeader;

    for (row_num, row) in rows.iter().enumerate() {
        let first = cell(row, 0);
        let second = cell(row, 1);

        state = match state {
            State::AwaitingHeader if first.is_empty() && !second.is_empty() => {
                log::debug!("{} row {}: group '{}'", TABLE, row_num + 1, second);
                State::InGroup(ExceptionGroup {
                    name: second.to_string(),
                    cards: Vec::new(),
                })
            }
            State::AwaitingHeader => {
                if !first.is_empty() {
                    log::warn!(
                        "{} row {}: card '{}' outside of any group, skipping",
                        TABLE,
                        row_num + 1,
                        first
                    );
                }
                State::AwaitingHeader
            }
            State::InGroup(group) if first.is_empty() => {
                groups.push(group);
                if second.is_empty() {
                    State::AwaitingHeader
                } else {
                    // Header straight after a data row: it both closes and opens
                    log::debug!("{} row {}: group '{}'", TABLE, row_num + 1, second);
                    State::InGroup(ExceptionGroup {
                        name: second.to_string(),
                        cards: Vec::new(),
                    })
                }
            }
            State::InGroup(mut group) => {
                if let Some(card) = resolve_card(index, first, TABLE) {
                    let notes = cell(row, 3);
                    group.cards.push(ExceptionEntry {
                        id: card.id,
                        card,
                        set_code: second.to_string(),
                        release_date: cell(row, 2).to_string(),
                        notes: (!notes.is_empty()).then(|| notes.to_string()),
                    });
                }
                State::InGroup(group)
            }
        };
    }

    if let State::InGroup(group) = state {
        groups.push(group);
    }

    log::info!(
        "Parsed {} exception groups with {} cards",
        groups.len(),
        groups.iter().map(|g| g.cards.len()).sum::<usize>()
    );
    groups
}

#[cfg(test)]
#[path = "exception_groups_tests.rs"]
mod tests;
