//! The upstream price lookup capability consumed by the cache.

use async_trait::async_trait;
use common::Result;

/// A service that can supply the current price for an item.
///
/// Calls are expensive (network or computation bound) and may fail; the
/// cache treats any failure as opaque and wraps it when propagating.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Get the current price for `item_code`.
    async fn price_for(&self, item_code: &str) -> Result<f64>;
}
