//! HTTP client for the update check.
//!
//! Short timeouts and a hard size cap: the version file is tiny and the check
//! must never hold up startup for long.

use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, Response};
use std::io::Read;
use std::time::Duration;

pub(crate) const HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;
pub(crate) const HTTP_REQUEST_TIMEOUT_SECS: u64 = 10;

pub(crate) fn create_http_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
        .user_agent(concat!("beepbeep/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}

/// Validate HTTP response status code and return a descriptive error if not successful.
pub(crate) fn validate_response_status(response: &Response, context: &str) -> Result<()> {
    if !response.status().is_success() {
        let status = response.status();
        bail!(
            "{}: HTTP {} - {}",
            context,
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error")
        );
    }
    Ok(())
}

/// Read a response body as UTF-8, refusing anything larger than `max_size`.
pub(crate) fn download_text_with_limit(
    response: Response,
    max_size: u64,
    context: &str,
) -> Result<String> {
    let declared = response.content_length();
    let bytes = read_with_limit(response, declared, max_size, context)?;
    String::from_utf8(bytes).context("Response contains invalid UTF-8")
}

/// Checks the declared length first, then enforces the limit while reading.
pub(crate) fn read_with_limit<R: Read>(
    mut reader: R,
    declared_length: Option<u64>,
    max_size: u64,
    context: &str,
) -> Result<Vec<u8>> {
    if let Some(length) = declared_length {
        if length > max_size {
            bail!(
                "{context}: Content-Length {length} bytes exceeds maximum allowed size of {max_size} bytes"
            );
        }
    }

    let mut bytes = Vec::new();
    let mut buffer = [0u8; 1024];
    loop {
        let n = reader
            .read(&mut buffer)
            .context("Failed to read response body")?;
        if n == 0 {
            break;
        }
        if (bytes.len() + n) as u64 > max_size {
            bail!("{context}: Download size exceeds maximum allowed size of {max_size} bytes");
        }
        bytes.extend_from_slice(&buffer[..n]);
    }

    Ok(bytes)
}
