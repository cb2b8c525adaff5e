//! Request dispatch: one request body in, one report sent (or one error out).
//!
//! This is the transport-agnostic half of the request router.  The HTTP layer
//! picks the device class from the path and hands the raw body bytes here;
//! everything between "bytes received" and "report written" happens in
//! [`dispatch`]:
//!
//! ```text
//! class ──► registry.resolve ──► check_content_type ──► decode_body ──► build_report ──► channel.send
//!              │ 501                   │ 400                  │ 400            │ 400           │ 503 / 500
//! ```
//!
//! The class is resolved before the body is inspected, so a request for an
//! unavailable class is answered the same way whatever its body contains.
//! A rejected request never touches a channel.
//!
//! A non-empty body must be labelled `application/json`.  An empty body needs
//! no content type and means "all fields at their defaults".

use openctrl_core::{build_report, DeviceClass, Report, ValidationError};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::channel::SendError;
use super::registry::{DeviceRegistry, DeviceUnavailable};

/// Everything that can stop a request from producing a delivered report.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Unavailable(#[from] DeviceUnavailable),

    #[error(transparent)]
    Send(#[from] SendError),
}

/// The only media type accepted for a non-empty body.
pub const JSON_MEDIA_TYPE: &str = "application/json";

fn is_empty_body(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

/// Checks that a non-empty `body` is labelled as JSON.
///
/// Parameters such as `; charset=utf-8` are ignored and the media type is
/// compared case-insensitively.
///
/// # Errors
///
/// [`ValidationError::WrongShape`] if the body is non-empty and
/// `content_type` is missing or names another media type.
pub fn check_content_type(content_type: Option<&str>, body: &[u8]) -> Result<(), ValidationError> {
    if is_empty_body(body) {
        return Ok(());
    }
    let media_type = content_type
        .and_then(|value| value.split(';').next())
        .map(str::trim);
    match media_type {
        Some(media) if media.eq_ignore_ascii_case(JSON_MEDIA_TYPE) => Ok(()),
        _ => {
            debug!(?content_type, "request body is not labelled as JSON");
            Err(ValidationError::WrongShape {
                found: "non-JSON content type",
            })
        }
    }
}

/// Decodes raw request body bytes into a JSON value.
///
/// An empty (or whitespace-only) body decodes to `null`, which the codec
/// treats as "all fields absent".
///
/// # Errors
///
/// [`ValidationError::WrongShape`] if the bytes are not valid JSON.
pub fn decode_body(body: &[u8]) -> Result<Value, ValidationError> {
    if is_empty_body(body) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| {
        debug!("request body is not valid JSON: {e}");
        ValidationError::WrongShape {
            found: "malformed JSON",
        }
    })
}

/// Runs one request for `class` through the registry, codec and channel.
///
/// Returns the report that was delivered.
///
/// # Errors
///
/// - [`DispatchError::Unavailable`] if `class` has no channel.
/// - [`DispatchError::Validation`] if the body is not labelled as JSON or is
///   not a JSON object.
/// - [`DispatchError::Send`] if the channel could not deliver the report.
pub async fn dispatch(
    registry: &DeviceRegistry,
    class: DeviceClass,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<Report, DispatchError> {
    let channel = registry.resolve(class)?;

    let report = check_content_type(content_type, body)
        .and_then(|()| decode_body(body))
        .and_then(|value| build_report(class, &value))
        .map_err(|e| {
            warn!(%class, "rejected request body: {e}");
            e
        })?;

    channel.send(report).await?;
    Ok(report)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
