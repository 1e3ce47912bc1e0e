//! YGO Pool - legal card pool snapshot server
//!
//! Pulls the bulk card feed and the banlist, exception and decklist sheets,
//! classifies every card against the legal product list and publishes one
//! immutable [`Snapshot`] that the web layer reads from.

pub mod builder;
pub mod config;
pub mod error;
pub mod legality;
pub mod models;
pub mod parsers;
pub mod sources;
pub mod store;
pub mod web;

pub use builder::SnapshotBuilder;
pub use config::{Args, Config};
pub use error::{PoolError, Result};
pub use legality::LegalityRules;
pub use models::{Card, CardIndex, LegalityTier, Snapshot};
pub use sources::{HttpSources, Sources};
pub use store::SnapshotStore;
