use thiserror::Error;

/// Failure while writing a reason to the response
///
/// Renderers panic with this as the payload. It is not one of the shapes
/// the recovery layer understands, so it always unwinds past the layer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Reason could not be encoded as JSON
    #[error("failed to serialize reason: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Recovery configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration text could not be parsed
    #[error("invalid recovery configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Content type is not a valid header value
    #[error("invalid content type: {0:?}")]
    ContentType(String),

    /// Content type was given for a format that writes no body
    #[error("content type is only used by the json formats")]
    UnusedContentType,
}
