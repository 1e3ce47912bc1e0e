//! HTTP fetchers for the card feed and the spreadsheet values API

use reqwest::Client;

use super::payload::{CardFeedResponse, SheetResponse};
use super::{Sources, Table};
use crate::config::Config;
use crate::error::{PoolError, Result};
use crate::models::RawCardRecord;
use crate::parsers::Row;

pub const DEFAULT_CARD_FEED_URL: &str = "https://db.ygoprodeck.com/api/v7/cardinfo.php";
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_SPREADSHEET_ID: &str = "1zJcbfYTG8HF_p3HmJYi_2M7kQ9JhpdJ8UcbJZc5H4ZM";

const USER_AGENT: &str = "ygo_pool/1.0";
const CARD_FEED: &str = "card feed";

/// Live sources over HTTP
pub struct HttpSources {
    pub(crate) client: Client,
    pub(crate) card_feed_url: String,
    pub(crate) sheets_base_url: String,
    pub(crate) spreadsheet_id: String,
    pub(crate) api_key: String,
    pub(crate) legality_range: String,
    pub(crate) exceptions_range: String,
    pub(crate) decklists_range: String,
}

impl HttpSources {
    /// Sources for the default card feed and spreadsheet
    #[cfg(test)]
    pub(crate) fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            card_feed_url: DEFAULT_CARD_FEED_URL.to_string(),
            sheets_base_url: DEFAULT_SHEETS_BASE_URL.to_string(),
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            api_key,
            legality_range: crate::config::DEFAULT_LEGALITY_RANGE.to_string(),
            exceptions_range: crate::config::DEFAULT_EXCEPTIONS_RANGE.to_string(),
            decklists_range: crate::config::DEFAULT_DECKLISTS_RANGE.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            client: Client::new(),
            card_feed_url: config.card_feed_url.clone(),
            sheets_base_url: config.sheets_base_url.clone(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            api_key: config.google_api_key.clone(),
            legality_range: config.legality_range.clone(),
            exceptions_range: config.exceptions_range.clone(),
            decklists_range: config.decklists_range.clone(),
        }
    }

    fn range_for(&self, table: Table) -> &str {
        match table {
            Table::Legality => &self.legality_range,
            Table::Exceptions => &self.exceptions_range,
            Table::Decklists => &self.decklists_range,
        }
    }

    /// Values API URL for one table
    pub fn sheet_url(&self, table: Table) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}?key={}",
            self.sheets_base_url.trim_end_matches('/'),
            self.spreadsheet_id,
            urlencoding::encode(self.range_for(table)),
            urlencoding::encode(&self.api_key)
        )
    }

    /// GET a URL and return status plus body text
    async fn get_body(&self, url: &str) -> Result<(reqwest::StatusCode, String)> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

/// Decode a body, preferring its own error payload over the bare status
fn decode<T: serde::de::DeserializeOwned>(status: reqwest::StatusCode, body: &str) -> Result<T> {
    match serde_json::from_str::<T>(body) {
        Ok(parsed) => Ok(parsed),
        Err(_) if !status.is_success() => Err(PoolError::HttpStatus(status)),
        Err(e) => Err(PoolError::Parse(e)),
    }
}

impl Sources for HttpSources {
    async fn fetch_cards(&self) -> Result<Vec<RawCardRecord>> {
        log::info!("Fetching card feed from {}", self.card_feed_url);

        let (status, body) = self.get_body(&self.card_feed_url).await?;
        log::debug!("Card feed responded {} with {} bytes", status, body.len());

        let cards = decode::<CardFeedResponse>(status, &body)?.into_cards(CARD_FEED)?;
        log::info!("Fetched {} cards from the card feed", cards.len());
        Ok(cards)
    }

    async fn fetch_table(&self, table: Table) -> Result<Vec<Row>> {
        log::info!(
            "Fetching {} (range {})",
            table.label(),
            self.range_for(table)
        );

        let (status, body) = self.get_body(&self.sheet_url(table)).await?;
        let rows = decode::<SheetResponse>(status, &body)?.into_rows(table.label())?;
        log::info!("Fetched {} rows from the {}", rows.len(), table.label());
        Ok(rows)
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
