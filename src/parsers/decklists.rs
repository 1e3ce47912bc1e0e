//! Decklist sheet parsing.
//!
//! Decklists sit back to back with no explicit markers:
//!
//! ```text
//! | (empty) | Deck name         |
//! | (empty) | Description       |   optional
//! | (empty) | Image URL         |   optional
//! | 3       | Main deck card    |
//! | ...     |                   |
//! | (empty) | (empty)           |   ends the main deck
//! | 1       | Extra deck card   |
//! | ...     |                   |
//! | (empty) | (empty)           |   ends the decklist
//! ```
//!
//! Each row is fed to a [`DecklistParser`] whose state says where in the
//! block it is. A state can hand the same row on to the next state instead of
//! consuming it, which is how missing descriptions and images are handled.

use crate::models::{CardIndex, Decklist, DecklistEntry};

use super::{cell, resolve_card, Row};

const TABLE: &str = "decklist sheet";

/// Legal main deck size
pub const MAIN_DECK_MIN: u32 = 40;
pub const MAIN_DECK_MAX: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeckState {
    NewSection,
    Description,
    ImageUrl,
    MainDeck,
    ExtraDeck,
}

/// What to do after handling a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    /// Row consumed, continue with the next row in this state
    Next(DeckState),
    /// Row not consumed, handle it again in this state
    Reprocess(DeckState),
}

/// Shape of a row, as far as the parser cares
enum RowShape<'a> {
    /// First column empty, second set
    Text(&'a str),
    /// Both columns set
    Card { quantity: &'a str, name: &'a str },
    /// Anything else, usually a blank row
    Other,
}

impl<'a> RowShape<'a> {
    fn of(row: &'a [String]) -> Self {
        match (cell(row, 0), cell(row, 1)) {
            ("", "") => RowShape::Other,
            ("", text) => RowShape::Text(text),
            (_, "") => RowShape::Other,
            (quantity, name) => RowShape::Card { quantity, name },
        }
    }
}

/// Row-at-a-time decklist state machine
pub struct DecklistParser<'a> {
    index: &'a CardIndex,
    state: DeckState,
    current: Decklist,
    decklists: Vec<Decklist>,
}

impl<'a> DecklistParser<'a> {
    pub fn new(index: &'a CardIndex) -> Self {
        Self {
            index,
            state: DeckState::NewSection,
            current: Decklist::default(),
            decklists: Vec::new(),
        }
    }

    /// Feed one row
    pub fn push_row(&mut self, row_num: usize, row: &[String]) {
        loop {
            match self.step(row_num, row) {
                Transition::Next(state) => {
                    self.state = state;
                    return;
                }
                Transition::Reprocess(state) => {
                    log::debug!(
                        "{} row {}: {:?} -> {:?} (reprocess)",
                        TABLE,
                        row_num,
                        self.state,
                        state
                    );
                    self.state = state;
                }
            }
        }
    }

    fn step(&mut self, row_num: usize, row: &[String]) -> Transition {
        let shape = RowShape::of(row);

        match self.state {
            DeckState::NewSection => match shape {
                RowShape::Text(name) => {
                    log::debug!("{} row {}: decklist '{}'", TABLE, row_num, name);
                    self.current.name = name.to_string();
                    Transition::Next(DeckState::Description)
                }
                _ => Transition::Next(DeckState::NewSection),
            },
            DeckState::Description => match shape {
                RowShape::Text(description) => {
                    self.current.description = description.to_string();
                    Transition::Next(DeckState::ImageUrl)
                }
                _ => Transition::Reprocess(DeckState::MainDeck),
            },
            DeckState::ImageUrl => match shape {
                RowShape::Text(url) => {
                    self.current.image_url = url.to_string();
                    Transition::Next(DeckState::MainDeck)
                }
                _ => Transition::Reprocess(DeckState::MainDeck),
            },
            DeckState::MainDeck => match shape {
                RowShape::Card { quantity, name } => {
                    if let Some(entry) = self.entry(row_num, quantity, name) {
                        self.current.main_deck.push(entry);
                    }
                    Transition::Next(DeckState::MainDeck)
                }
                _ => Transition::Next(DeckState::ExtraDeck),
            },
            DeckState::ExtraDeck => match shape {
                RowShape::Card { quantity, name } => {
                    if let Some(entry) = self.entry(row_num, quantity, name) {
                        self.current.extra_deck.push(entry);
                    }
                    Transition::Next(DeckState::ExtraDeck)
                }
                _ => {
                    self.close_current();
                    Transition::Next(DeckState::NewSection)
                }
            },
        }
    }

    fn entry(&self, row_num: usize, quantity: &str, name: &str) -> Option<DecklistEntry> {
        let quantity = match quantity.parse::<u32>() {
            Ok(q) if q > 0 => q,
            _ => {
                log::warn!(
                    "{} row {}: invalid quantity '{}' for {}, skipping",
                    TABLE,
                    row_num,
                    quantity,
                    name
                );
                return None;
            }
        };
        let card = resolve_card(self.index, name, TABLE)?;
        Some(DecklistEntry { quantity, card })
    }

    fn close_current(&mut self) {
        let decklist = std::mem::take(&mut self.current);
        validate_main_deck(&decklist);
        self.decklists.push(decklist);
    }

    /// Finish the sheet, emitting a decklist still in progress
    pub fn finish(mut self) -> Vec<Decklist> {
        if self.state != DeckState::NewSection {
            self.close_current();
        }
        self.decklists
    }
}

/// Logs main decks outside the legal size; they are kept regardless
pub fn validate_main_deck(decklist: &Decklist) -> bool {
    let count = decklist.main_deck_count();
    let valid = (MAIN_DECK_MIN..=MAIN_DECK_MAX).contains(&count);
    if !valid {
        log::warn!(
            "Decklist '{}' has {} main deck cards (expected {}-{})",
            decklist.name,
            count,
            MAIN_DECK_MIN,
            MAIN_DECK_MAX
        );
    }
    valid
}

/// Parses decklist sheet rows into decklists.
pub fn parse_decklists(rows: &[Row], index: &CardIndex) -> Vec<Decklist> {
    let mut parser = DecklistParser::new(index);
    for (row_num, row) in rows.iter().enumerate() {
        parser.push_row(row_num + 1, row);
    }
    let decklists = parser.finish();

    log::info!("Parsed {} decklists", decklists.len());
    decklists
}

#[cfg(test)]
#[path = "decklists_tests.rs"]
mod tests;
