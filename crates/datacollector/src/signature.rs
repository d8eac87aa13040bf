// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! SharedKey request signing for the Data Collector API.
//!
//! The service authenticates each POST with an HMAC-SHA256 signature over a
//! canonical string of the request metadata. The signature embeds the
//! `x-ms-date` header value, so headers must be rebuilt for every request
//! with a fresh timestamp.

use crate::error::DataCollectorError;
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub(crate) const CONTENT_TYPE_JSON: &str = "application/json";
pub(crate) const RESOURCE: &str = "/api/logs";

/// Formats a timestamp the way the service expects it in `x-ms-date`:
/// RFC 1123 with English abbreviations and a literal `GMT` suffix,
/// e.g. `Sat, 01 Jan 2000 01:01:01 GMT`.
pub fn rfc1123(x_ms_date: DateTime<Utc>) -> String {
    x_ms_date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Builds the signed header set for one request.
///
/// The canonical string is
/// `POST\n{content_length}\n{content_type}\nx-ms-date:{date}\n{resource}`;
/// any deviation (including date formatting) invalidates the signature and
/// the service rejects the request.
pub fn build_authorization_headers(
    customer_id: &str,
    shared_key: &str,
    content_length: usize,
    log_type: &str,
    x_ms_date: DateTime<Utc>,
) -> Result<HeaderMap, DataCollectorError> {
    let x_ms_date_str = rfc1123(x_ms_date);

    let string_to_hash = format!(
        "POST\n{content_length}\n{CONTENT_TYPE_JSON}\nx-ms-date:{x_ms_date_str}\n{RESOURCE}"
    );

    let decoded_key = STANDARD.decode(shared_key)?;
    // HMAC-SHA256 accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(&decoded_key)
        .map_err(|_| DataCollectorError::InvalidConfig("shared key is unusable".to_string()))?;
    mac.update(string_to_hash.as_bytes());
    let encoded_hash = STANDARD.encode(mac.finalize().into_bytes());

    let authorization = format!("SharedKey {customer_id}:{encoded_hash}");

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
    headers.insert(AUTHORIZATION, HeaderValue::from_str(&authorization)?);
    headers.insert("Log-Type", HeaderValue::from_str(log_type)?);
    headers.insert("x-ms-date", HeaderValue::from_str(&x_ms_date_str)?);

    Ok(headers)
}
