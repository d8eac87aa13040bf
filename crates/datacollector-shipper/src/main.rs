// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Reads newline-delimited JSON rows from stdin and posts them to the
//! Azure Monitor Data Collector API.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use std::env;
use std::io::BufRead;
use std::process::ExitCode;

use datacollector::{DataCollectorClient, DataCollectorConfig};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_TYPE: &str = "CustomLog";

#[tokio::main]
pub async fn main() -> ExitCode {
    let log_level = env::var("LOG_LEVEL")
        .map(|val| val.to_lowercase())
        .unwrap_or("info".to_string());

    let env_filter = format!("hyper=off,rustls=off,{}", log_level);

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_new(env_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_level(true)
        .with_target(true)
        .without_time()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("failed to set up logging subsystem");
        return ExitCode::FAILURE;
    }

    debug!("Logging subsystem enabled");

    let config = match DataCollectorConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Error creating config on shipper startup: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_type = env::var("AZURE_LOG_TYPE").unwrap_or_else(|_| DEFAULT_LOG_TYPE.to_string());

    let client = match DataCollectorClient::new(config) {
        Ok(c) => c,
        Err(e) => {
            error!("Error creating Data Collector client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let rows = match read_rows(std::io::stdin().lock()) {
        Ok(rows) => rows,
        Err(e) => {
            error!("Error reading rows from stdin: {e}");
            return ExitCode::FAILURE;
        }
    };

    if rows.is_empty() {
        warn!("No rows on stdin, nothing to ship");
        return ExitCode::SUCCESS;
    }

    match client.post_logs(&rows, &log_type).await {
        Ok(metric) => {
            info!(
                "Shipped {} rows to {log_type} in {} batches",
                metric.iter().sum::<usize>(),
                metric.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error shipping rows: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Parses newline-delimited JSON. Blank lines are skipped; a malformed
/// line is a hard error so bad rows never reach the API.
fn read_rows<R: BufRead>(reader: R) -> std::io::Result<Vec<serde_json::Value>> {
    let mut rows = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(&line)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        rows.push(row);
    }
    Ok(rows)
}
