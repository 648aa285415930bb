//! Lossless encoding of a [`Destination`] into a short URL-fragment-safe token.
//!
//! The token is `percent(base64(json({"page", "x", "y"})))`.

use crate::error::MarkerError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use toclink_types::{Destination, Point};

/// Characters escaped inside a marker payload. Covers the URL fragment set
/// plus the characters that would break an HTML attribute or the fragment itself.
pub(crate) const MARKER_PAYLOAD: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'/')
    .add(b'=');

#[derive(Serialize, Deserialize)]
struct Wire {
    page: usize,
    x: f64,
    y: f64,
}

/// Encodes a destination into a token.
///
/// Only finite coordinates are representable; JSON has no spelling for NaN
/// or infinity.
pub fn encode_destination(destination: &Destination) -> String {
    let wire = Wire {
        page: destination.page_index,
        x: destination.point.x,
        y: destination.point.y,
    };
    // Serializing a plain struct of numbers cannot fail.
    let json = serde_json::to_vec(&wire).unwrap_or_default();
    utf8_percent_encode(&STANDARD.encode(json), MARKER_PAYLOAD).to_string()
}

/// Inverts [`encode_destination`].
pub fn decode_destination(token: &str) -> Result<Destination, MarkerError> {
    let unescaped = percent_decode_str(token).decode_utf8()?;
    let bytes = STANDARD.decode(unescaped.trim().as_bytes())?;
    let wire: Wire = serde_json::from_slice(&bytes)?;
    Ok(Destination::new(wire.page, Point::new(wire.x, wire.y)))
}

pub(crate) fn encode_identifier(identifier: &str) -> String {
    utf8_percent_encode(identifier, MARKER_PAYLOAD).to_string()
}

pub(crate) fn decode_identifier(payload: &str) -> String {
    percent_decode_str(payload).decode_utf8_lossy().into_owned()
}
