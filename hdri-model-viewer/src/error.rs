//! Error types for the asset pipeline

use thiserror::Error;

/// Result type for asset pipeline stages
pub type AssetResult<T> = Result<T, AssetError>;

/// Errors that can end an asset pipeline stage.
///
/// Cloneable so a background job can hand its outcome across the mailbox and the
/// main schedule can still log it after deciding what to do.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("request for {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("could not decode HDR image: {0}")]
    Decode(String),

    #[error("image is {width}x{height} but {texels} texels were supplied")]
    InvalidDimensions {
        width: u32,
        height: u32,
        texels: usize,
    },

    #[error("settings file {path} unusable: {reason}")]
    Settings { path: String, reason: String },

    #[error("failed to load model {path}: {reason}")]
    Model { path: String, reason: String },
}

#[cfg(not(target_arch = "wasm32"))]
impl AssetError {
    pub(crate) fn request(url: &str, err: reqwest::Error) -> Self {
        AssetError::Request {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}
