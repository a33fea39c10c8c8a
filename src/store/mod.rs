// src/store/mod.rs
use anyhow::Result;
use std::future::Future;

use crate::import::Record;

pub mod rest;

pub use rest::{RestTableStore, StoreConfig};

/// A remote table that accepts bulk inserts.
pub trait TableStore {
    /// Insert all `rows` into `table` as a single request.
    fn insert(&self, table: &str, rows: &[Record]) -> impl Future<Output = Result<()>> + Send;
}
