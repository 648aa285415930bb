use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkerError {
    #[error("Marker payload is not valid UTF-8 after percent-decoding: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Marker token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Marker token does not hold a destination: {0}")]
    Json(#[from] serde_json::Error),
}
