use crate::error::MarkerError;
use crate::token;
use toclink_types::Destination;

/// The default URI prefix that identifies a marker link.
pub const DEFAULT_MARKER_PREFIX: &str = "http://dummy/#";

/// A URI prefix reserved for marker links.
///
/// Markers come in two flavours that share the same prefix:
/// heading markers carry a heading identifier, and table of contents
/// placeholders carry an encoded [`Destination`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerScheme {
    prefix: String,
}

impl Default for MarkerScheme {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_PREFIX)
    }
}

impl MarkerScheme {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The marker URI for a heading identifier.
    pub fn heading_marker(&self, identifier: &str) -> String {
        format!("{}{}", self.prefix, token::encode_identifier(identifier))
    }

    /// The placeholder URI for an already resolved destination.
    pub fn destination_marker(&self, destination: &Destination) -> String {
        format!("{}{}", self.prefix, token::encode_destination(destination))
    }

    /// Returns the opaque payload following the prefix, or `None` if `uri`
    /// is not a marker.
    pub fn payload<'a>(&self, uri: &'a str) -> Option<&'a str> {
        uri.strip_prefix(self.prefix.as_str())
    }

    /// Decodes the heading identifier carried by a heading marker payload.
    pub fn decode_identifier(&self, payload: &str) -> String {
        token::decode_identifier(payload)
    }

    /// Decodes the destination carried by a placeholder payload.
    pub fn decode_destination(&self, payload: &str) -> Result<Destination, MarkerError> {
        token::decode_destination(payload)
    }
}
