// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Client for the Azure Monitor Log Analytics Data Collector API.
//!
//! Rows of structured log data are serialized to JSON, split into batches
//! that stay under a configurable byte ceiling, and posted one request per
//! batch. Each request carries a SharedKey HMAC-SHA256 signature computed
//! over the request metadata and a fresh `x-ms-date` timestamp.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod signature;

pub use client::DataCollectorClient;
pub use config::{BatchPolicy, DataCollectorConfig};
pub use error::DataCollectorError;
