//! Cache construction parameters.

use std::time::Duration;

use serde::Deserialize;

use crate::{Error, Result};

fn default_max_age_secs() -> u64 {
    60
}

/// Parameters the embedding process supplies when building a cache.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum age of a cached reading before it must be refetched.
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age_secs: default_max_age_secs(),
        }
    }
}

impl CacheConfig {
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_age_secs == 0 {
            return Err(Error::Config("max_age_secs must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CacheConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_age(), Duration::from_secs(60));
    }

    #[test]
    fn test_zero_max_age_rejected() {
        let config = CacheConfig { max_age_secs: 0 };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
