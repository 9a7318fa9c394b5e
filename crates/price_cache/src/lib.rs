//! Transparent read-through cache over an expensive price source.
//!
//! Wraps a slow [`PriceSource`] and remembers the prices it returns, so
//! repeat lookups within `max_age` are served without another call.

pub mod cache;
pub mod source;

pub use cache::{PriceReading, PriceTable, TransparentCache};
pub use source::PriceSource;
