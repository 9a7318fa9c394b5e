//! Read-through price cache with staleness tracking.
//!
//! The table is shared mutable state: every lookup in a batch runs as its
//! own task against it. Locks are only held for a single check or store,
//! never across the call to the source.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::{CacheConfig, Error, Result};
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, warn};

use crate::source::PriceSource;

/// A cached price with staleness tracking.
#[derive(Debug, Clone, Copy)]
pub struct PriceReading {
    pub value: f64,
    pub observed_at: Instant,
}

impl PriceReading {
    pub fn is_stale(&self, max_age: Duration) -> bool {
        self.observed_at.elapsed() > max_age
    }
}

/// Thread-safe price table — item code → most recent reading.
pub type PriceTable = Arc<RwLock<HashMap<String, PriceReading>>>;

/// Read-through cache wrapping a slow [`PriceSource`].
///
/// Serves a cached reading while it is younger than `max_age`, and refetches
/// from the source once it is not. Entries are replaced, never deleted; the
/// table grows with the set of distinct codes ever requested.
#[derive(Clone)]
pub struct TransparentCache {
    source: Arc<dyn PriceSource>,
    max_age: Duration,
    prices: PriceTable,
}

impl TransparentCache {
    pub fn new(source: Arc<dyn PriceSource>, max_age: Duration) -> Self {
        Self {
            source,
            max_age,
            prices: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Build a cache from validated construction parameters.
    pub fn from_config(source: Arc<dyn PriceSource>, config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(source, config.max_age()))
    }

    /// Get the price for one item, from the cache if a fresh reading
    /// exists, otherwise from the source.
    ///
    /// A source failure is returned as [`Error::SourceFetch`] and leaves
    /// any prior reading for the code untouched.
    pub async fn price_for(&self, item_code: &str) -> Result<f64> {
        {
            let prices = self.prices.read().await;
            if let Some(reading) = prices.get(item_code) {
                if !reading.is_stale(self.max_age) {
                    debug!(
                        "{}: cache hit ({}ms old)",
                        item_code,
                        reading.observed_at.elapsed().as_millis()
                    );
                    return Ok(reading.value);
                }
                debug!("{}: cached reading is stale, refetching", item_code);
            }
        }

        let value = self.source.price_for(item_code).await.map_err(|e| {
            warn!("{}: source fetch failed: {}", item_code, e);
            Error::source_fetch(item_code, e)
        })?;

        let reading = PriceReading {
            value,
            observed_at: Instant::now(),
        };
        self.prices
            .write()
            .await
            .insert(item_code.to_string(), reading);

        Ok(value)
    }

    /// Get prices for several items at once, fetching concurrently.
    ///
    /// One task is spawned per requested code (duplicates included, each an
    /// independent attempt). All tasks run to completion before the result
    /// is assembled. If any attempt failed, the call returns the first
    /// failure drained from the result channel — which one is unspecified
    /// when several attempts fail at once. On success the returned values
    /// are in completion order, not request order.
    pub async fn prices_for(&self, item_codes: &[String]) -> Result<Vec<f64>> {
        if item_codes.is_empty() {
            return Ok(Vec::new());
        }

        let (tx, mut rx) = mpsc::channel(item_codes.len());
        let mut workers = Vec::with_capacity(item_codes.len());
        for item_code in item_codes {
            let cache = self.clone();
            let item_code = item_code.clone();
            let tx = tx.clone();
            workers.push(tokio::spawn(async move {
                let outcome = cache.price_for(&item_code).await;
                // Capacity covers every worker, so the send cannot block.
                let _ = tx.send(outcome).await;
            }));
        }
        drop(tx);

        for worker in workers {
            worker
                .await
                .map_err(|e| Error::Other(format!("price fetch task failed: {e}")))?;
        }

        let mut values = Vec::with_capacity(item_codes.len());
        while let Some(outcome) = rx.recv().await {
            values.push(outcome?);
        }
        Ok(values)
    }

    /// Snapshot the stored reading for a code, if any.
    pub async fn reading(&self, item_code: &str) -> Option<PriceReading> {
        let prices = self.prices.read().await;
        prices.get(item_code).copied()
    }

    /// Number of distinct codes in the table.
    pub async fn len(&self) -> usize {
        self.prices.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.prices.read().await.is_empty()
    }
}
