// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The Data Collector API client: batches rows, signs each request, and
//! posts the batches strictly in order.

use crate::batch::split_rows;
use crate::config::DataCollectorConfig;
use crate::error::DataCollectorError;
use crate::signature::build_authorization_headers;
use chrono::Utc;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, error};

const API_VERSION: &str = "2016-04-01";

/// Client for the Azure Monitor Log Analytics Data Collector API.
///
/// The client holds no connection state; each [`post_logs`] call acquires
/// its own HTTP client for the duration of the batch sequence and releases
/// it on every exit path.
///
/// [`post_logs`]: DataCollectorClient::post_logs
#[derive(Debug, Clone)]
pub struct DataCollectorClient {
    config: DataCollectorConfig,
    request_uri: String,
}

impl DataCollectorClient {
    /// Creates a client from a validated configuration.
    pub fn new(config: DataCollectorConfig) -> Result<Self, DataCollectorError> {
        config.validate()?;
        let request_uri = match &config.endpoint_override {
            Some(url) => format!("{url}/api/logs?api-version={API_VERSION}"),
            None => format!(
                "https://{}.ods.opinsights.azure.com/api/logs?api-version={API_VERSION}",
                config.customer_id
            ),
        };
        Ok(Self {
            config,
            request_uri,
        })
    }

    pub fn config(&self) -> &DataCollectorConfig {
        &self.config
    }

    /// Posts `rows` to the `log_type` table, one request per batch.
    ///
    /// Batches are sent sequentially in row order. The first non-200
    /// response aborts the sequence with
    /// [`DataCollectorError::UploadFailure`]; later batches are not
    /// attempted and no partial result is returned. On success, returns
    /// the number of rows accepted per batch.
    pub async fn post_logs<T: Serialize>(
        &self,
        rows: &[T],
        log_type: &str,
    ) -> Result<Vec<usize>, DataCollectorError> {
        // Serialize once; the same strings feed both size accounting and
        // the request bodies.
        let serialized: Vec<String> = rows
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<_, _>>()?;

        let batches = split_rows(
            &serialized,
            self.config.max_batch_size,
            self.config.batch_policy,
        );

        debug!(
            "Posting {} rows to {log_type} in {} batches",
            rows.len(),
            batches.len()
        );

        let mut builder = reqwest::Client::builder().timeout(self.config.timeout);
        if let Some(proxy) = &self.config.https_proxy {
            builder = builder.proxy(reqwest::Proxy::https(proxy)?);
        }
        let client = builder.build()?;

        let mut metric = Vec::with_capacity(batches.len());

        for batch in batches {
            let body = format!("[{}]", batch.join(","));

            // The signature embeds the timestamp, so it must be fresh for
            // every request.
            let headers = build_authorization_headers(
                &self.config.customer_id,
                &self.config.shared_key,
                body.len(),
                log_type,
                Utc::now(),
            )?;

            let response = client
                .post(&self.request_uri)
                .headers(headers)
                .body(body)
                .send()
                .await?;

            let status = response.status();
            if status != StatusCode::OK {
                let body = response.text().await.unwrap_or_default();
                error!("{status}: failed to upload batch to {log_type}: {body}");
                return Err(DataCollectorError::UploadFailure { status, body });
            }

            metric.push(batch.len());
        }

        Ok(metric)
    }
}
