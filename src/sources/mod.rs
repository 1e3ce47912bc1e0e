//! External data sources: the bulk card feed and the three spreadsheet tables
//!
//! Each response is discriminated into success or structured error exactly
//! once, here, so nothing downstream ever looks at raw payload shapes.

mod http;
mod payload;

use std::future::Future;

pub use http::{
    HttpSources, DEFAULT_CARD_FEED_URL, DEFAULT_SHEETS_BASE_URL, DEFAULT_SPREADSHEET_ID,
};
pub use payload::{CardFeedResponse, SheetError, SheetResponse, ValueRange};

use crate::error::Result;
use crate::models::RawCardRecord;
use crate::parsers::Row;

/// The spreadsheet tables the build reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// Forbidden/limited list
    Legality,
    /// Cards legal regardless of printing
    Exceptions,
    /// Tournament decklists
    Decklists,
}

impl Table {
    pub fn label(self) -> &'static str {
        match self {
            Table::Legality => "banlist sheet",
            Table::Exceptions => "exception sheet",
            Table::Decklists => "decklist sheet",
        }
    }
}

/// Fetchers the snapshot builder depends on
pub trait Sources: Send + Sync {
    /// Every card in the bulk feed
    fn fetch_cards(&self) -> impl Future<Output = Result<Vec<RawCardRecord>>> + Send;

    /// The ordered rows of one table
    fn fetch_table(&self, table: Table) -> impl Future<Output = Result<Vec<Row>>> + Send;
}
