// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::error::DataCollectorError;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::env;
use std::time::Duration;

/// Default API call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default batch size ceiling, in serialized bytes. Leaves headroom under
/// the service's 30MB-per-request limit for headers and array separators.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 30_000_000;

/// How rows are split into per-request batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Accumulate rows in order until the next row would push the running
    /// serialized size past the ceiling, then start a new batch. Never
    /// exceeds the ceiling except for a single row that is itself larger
    /// than the ceiling, which still gets its own batch.
    #[default]
    Greedy,
    /// Estimate the serialized size of the whole payload, derive a target
    /// batch count, and slice the rows into contiguous chunks of equal row
    /// count. A chunk can exceed the ceiling when row sizes are uneven.
    EvenChunks,
}

/// Configuration for the Data Collector API client
#[derive(Debug, Clone)]
pub struct DataCollectorConfig {
    /// Log Analytics workspace (customer) id; also selects the endpoint host
    pub customer_id: String,
    /// Base64-encoded shared key used to sign requests
    pub shared_key: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Batch size ceiling in serialized bytes
    pub max_batch_size: usize,
    /// Optional HTTPS proxy URL
    pub https_proxy: Option<String>,
    /// Batching policy
    pub batch_policy: BatchPolicy,
    /// Overrides the derived endpoint URL. Intended for tests.
    pub endpoint_override: Option<String>,
}

impl DataCollectorConfig {
    pub fn new(customer_id: impl Into<String>, shared_key: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            shared_key: shared_key.into(),
            timeout: DEFAULT_TIMEOUT,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            https_proxy: None,
            batch_policy: BatchPolicy::default(),
            endpoint_override: None,
        }
    }

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, DataCollectorError> {
        let customer_id = env::var("AZURE_LOG_CUSTOMER_ID").unwrap_or_default();
        let shared_key = env::var("AZURE_LOG_SHARED_KEY").unwrap_or_default();
        let timeout = env::var("AZURE_LOG_TIMEOUT_SECONDS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        let max_batch_size = env::var("AZURE_LOG_MAX_BATCH_SIZE")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_BATCH_SIZE);
        let https_proxy = env::var("HTTPS_PROXY").ok();

        let config = Self {
            customer_id,
            shared_key,
            timeout,
            max_batch_size,
            https_proxy,
            batch_policy: BatchPolicy::default(),
            endpoint_override: None,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    pub fn with_https_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.https_proxy = Some(proxy.into());
        self
    }

    pub fn with_batch_policy(mut self, policy: BatchPolicy) -> Self {
        self.batch_policy = policy;
        self
    }

    pub fn with_endpoint_override(mut self, url: impl Into<String>) -> Self {
        self.endpoint_override = Some(url.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), DataCollectorError> {
        if self.customer_id.trim().is_empty() {
            return Err(DataCollectorError::InvalidConfig(
                "customer id cannot be empty".to_string(),
            ));
        }

        if self.shared_key.trim().is_empty() {
            return Err(DataCollectorError::InvalidConfig(
                "shared key cannot be empty".to_string(),
            ));
        }

        // The shared key must decode to usable HMAC key material
        STANDARD.decode(&self.shared_key)?;

        if self.timeout.is_zero() {
            return Err(DataCollectorError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> DataCollectorConfig {
        DataCollectorConfig::new("customer_id", "c2hhcmVkX2tleQ==")
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = valid_config();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_batch_size, 30_000_000);
        assert_eq!(config.batch_policy, BatchPolicy::Greedy);
        assert!(config.https_proxy.is_none());
    }

    #[test]
    fn test_empty_customer_id() {
        let config = DataCollectorConfig::new("  ", "c2hhcmVkX2tleQ==");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_shared_key() {
        let config = DataCollectorConfig::new("customer_id", "");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_shared_key_must_be_base64() {
        let config = DataCollectorConfig::new("customer_id", "not base64!!");
        assert!(matches!(
            config.validate(),
            Err(DataCollectorError::InvalidSharedKey(_))
        ));
    }

    #[test]
    fn test_zero_timeout() {
        let config = valid_config().with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_setters() {
        let config = valid_config()
            .with_timeout(Duration::from_secs(60))
            .with_max_batch_size(29_000_000)
            .with_https_proxy("http://proxy.internal:3128")
            .with_batch_policy(BatchPolicy::EvenChunks);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.max_batch_size, 29_000_000);
        assert_eq!(
            config.https_proxy.as_deref(),
            Some("http://proxy.internal:3128")
        );
        assert_eq!(config.batch_policy, BatchPolicy::EvenChunks);
    }
}
