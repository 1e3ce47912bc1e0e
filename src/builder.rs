//! Snapshot building
//!
//! One attempt fetches all four sources concurrently, waits for every one of
//! them, then classifies and parses sequentially. A failed attempt is retried
//! from scratch, immediately, up to the configured number of attempts.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::config::{Config, DEFAULT_MAX_ATTEMPTS};
use crate::error::{PoolError, Result};
use crate::legality::LegalityRules;
use crate::models::{RawCardRecord, Snapshot};
use crate::parsers::{
    always_legal_names, parse_decklists, parse_exception_groups, parse_legality_table, Row,
};
use crate::sources::{Sources, Table};
use crate::store::SnapshotStore;

const CARD_FEED: &str = "card feed";

/// Raw payloads of one successful fetch round
#[derive(Debug, Clone, Default)]
pub struct SourceData {
    pub cards: Vec<RawCardRecord>,
    pub legality_rows: Vec<Row>,
    pub exception_rows: Vec<Row>,
    pub decklist_rows: Vec<Row>,
}

/// Turns source payloads into a [`Snapshot`].
///
/// The banlist runs first because it is the only step that changes card
/// tiers; exception groups and decklists then share the final cards.
pub fn assemble(rules: &LegalityRules, data: SourceData) -> Snapshot {
    let always_legal = always_legal_names(&data.exception_rows);
    let mut card_index = rules.build_card_index(data.cards, &always_legal);

    let legality_table = parse_legality_table(&data.legality_rows, &mut card_index);
    let exception_groups = parse_exception_groups(&data.exception_rows, &card_index);
    let decklists = parse_decklists(&data.decklist_rows, &card_index);

    Snapshot {
        card_index,
        decklists,
        legality_table,
        exception_groups,
    }
}

/// Builds snapshots from a set of [`Sources`]
pub struct SnapshotBuilder<S> {
    sources: S,
    rules: LegalityRules,
    max_attempts: u32,
    fetch_timeout: Option<Duration>,
}

impl<S: Sources> SnapshotBuilder<S> {
    /// Builder with default rules, three attempts and no fetch timeout
    pub fn new(sources: S) -> Self {
        Self {
            sources,
            rules: LegalityRules::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            fetch_timeout: None,
        }
    }

    pub fn from_config(sources: S, config: &Config) -> Self {
        Self::new(sources)
            .with_rules(config.rules)
            .with_max_attempts(config.max_attempts)
            .with_fetch_timeout(config.fetch_timeout)
    }

    pub fn with_rules(mut self, rules: LegalityRules) -> Self {
        self.rules = rules;
        self
    }

    /// At least one attempt is always made
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Option<Duration>) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub fn sources(&self) -> &S {
        &self.sources
    }

    /// Build a snapshot, retrying transient failures.
    ///
    /// Returns [`PoolError::RetriesExhausted`] once every attempt has failed.
    pub async fn build(&self) -> Result<Snapshot> {
        let started = Instant::now();
        let mut attempt = 1;

        loop {
            match self.attempt().await {
                Ok(snapshot) => {
                    log::info!(
                        "Snapshot built on attempt {}: {} cards, {} banlist entries, {} exception groups, {} decklists ({:.1}s)",
                        attempt,
                        snapshot.card_index.len(),
                        snapshot.legality_table.len(),
                        snapshot.exception_groups.len(),
                        snapshot.decklists.len(),
                        started.elapsed().as_secs_f64()
                    );
                    return Ok(snapshot);
                }
                Err(e) if e.is_transient() && attempt < self.max_attempts => {
                    log::warn!(
                        "Build attempt {}/{} failed: {}",
                        attempt,
                        self.max_attempts,
                        e
                    );
                    attempt += 1;
                }
                Err(e) if e.is_transient() => {
                    log::error!(
                        "Build attempt {}/{} failed: {}",
                        attempt,
                        self.max_attempts,
                        e
                    );
                    return Err(PoolError::RetriesExhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Build and, only on success, replace the store's snapshot
    pub async fn build_and_publish(&self, store: &SnapshotStore) -> Result<()> {
        let snapshot = self.build().await?;
        store.publish(snapshot).await;
        Ok(())
    }

    async fn attempt(&self) -> Result<Snapshot> {
        let data = self.fetch_all().await?;
        Ok(assemble(&self.rules, data))
    }

    /// Fan out all fetches and wait for every one of them
    async fn fetch_all(&self) -> Result<SourceData> {
        let (cards, legality_rows, exception_rows, decklist_rows) = tokio::join!(
            self.timed(CARD_FEED, self.sources.fetch_cards()),
            self.timed_table(Table::Legality),
            self.timed_table(Table::Exceptions),
            self.timed_table(Table::Decklists),
        );

        Ok(SourceData {
            cards: cards?,
            legality_rows: legality_rows?,
            exception_rows: exception_rows?,
            decklist_rows: decklist_rows?,
        })
    }

    async fn timed_table(&self, table: Table) -> Result<Vec<Row>> {
        self.timed(table.label(), self.sources.fetch_table(table))
            .await
    }

    async fn timed<T>(&self, feed: &str, fetch: impl Future<Output = Result<T>>) -> Result<T> {
        match self.fetch_timeout {
            Some(after) => tokio::time::timeout(after, fetch)
                .await
                .map_err(|_| PoolError::Timeout {
                    feed: feed.to_string(),
                    after,
                })?,
            None => fetch.await,
        }
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
