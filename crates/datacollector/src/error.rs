// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use reqwest::header::InvalidHeaderValue;
use reqwest::StatusCode;

/// Errors returned by the Data Collector API client
#[derive(Debug, thiserror::Error)]
pub enum DataCollectorError {
    /// The API answered with a non-200 status. Carries the status and the
    /// response body so callers can surface what the service said.
    #[error("Error uploading, status code: {status}. {body}")]
    UploadFailure { status: StatusCode, body: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Shared key is not valid base64: {0}")]
    InvalidSharedKey(#[from] base64::DecodeError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    #[error("Failed to serialize rows: {0}")]
    Serialize(#[from] serde_json::Error),

    // Network-level failures (connection refused, timeout) pass through
    // untranslated.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
