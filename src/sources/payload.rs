//! Response payloads of the card feed and the spreadsheet values API

use serde::Deserialize;

use crate::error::{PoolError, Result};
use crate::models::RawCardRecord;
use crate::parsers::Row;

/// Card feed body: the card list, or an error message
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CardFeedResponse {
    Error { error: String },
    Data { data: Vec<RawCardRecord> },
}

impl CardFeedResponse {
    pub fn into_cards(self, feed: &str) -> Result<Vec<RawCardRecord>> {
        match self {
            CardFeedResponse::Data { data } => Ok(data),
            CardFeedResponse::Error { error } => Err(PoolError::SourcePayload {
                feed: feed.to_string(),
                code: 0,
                message: error,
                status: String::new(),
            }),
        }
    }
}

/// Error object returned by the spreadsheet API
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SheetError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub status: String,
}

/// Successful values response
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub major_dimension: String,
    /// Omitted by the API when the range is empty
    #[serde(default)]
    pub values: Vec<Row>,
}

/// Spreadsheet body: a value range, or an error object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SheetResponse {
    Error { error: SheetError },
    Values(ValueRange),
}

impl SheetResponse {
    pub fn into_rows(self, feed: &str) -> Result<Vec<Row>> {
        match self {
            SheetResponse::Values(range) => Ok(range.values),
            SheetResponse::Error { error } => Err(PoolError::SourcePayload {
                feed: feed.to_string(),
                code: error.code,
                message: error.message,
                status: error.status,
            }),
        }
    }
}
