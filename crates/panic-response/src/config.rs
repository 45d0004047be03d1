use http::header::HeaderValue;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::layer::GracefullyLayer;
use crate::reason::Reason;
use crate::render::{Json, Renderer, StatusOnly};
use crate::sink::ResponseSink;

/// How recovered reasons are presented to the client
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderFormat {
    /// Status code only, no body
    #[default]
    Status,
    /// JSON body with `error` and `explanation`
    Json,
    /// JSON body with `error`, `status` and `explanation`
    JsonWithStatus,
}

/// Recovery layer configuration
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecoveryConfig {
    #[serde(default)]
    pub format: RenderFormat,
    /// Overrides the `content-type` of the json formats
    #[serde(default)]
    pub content_type: Option<String>,
}

impl RecoveryConfig {
    /// Parse configuration from TOML
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or contains unknown keys
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Build the renderer described by this configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the content type is not a valid header value, or
    /// is set for a format that writes no body
    pub fn renderer(&self) -> Result<ConfiguredRenderer, ConfigError> {
        let content_type = self
            .content_type
            .as_deref()
            .map(|value| HeaderValue::from_str(value).map_err(|_| ConfigError::ContentType(value.to_owned())))
            .transpose()?;

        let json = match self.format {
            RenderFormat::Status if content_type.is_some() => return Err(ConfigError::UnusedContentType),
            RenderFormat::Status => return Ok(ConfiguredRenderer::StatusOnly(StatusOnly)),
            RenderFormat::Json => Json::new(),
            RenderFormat::JsonWithStatus => Json::new().include_status(),
        };

        Ok(ConfiguredRenderer::Json(match content_type {
            Some(content_type) => json.content_type(content_type),
            None => json,
        }))
    }

    /// Build a recovery layer using the configured renderer
    ///
    /// # Errors
    ///
    /// Same as [`RecoveryConfig::renderer`]
    pub fn layer(&self) -> Result<GracefullyLayer<ConfiguredRenderer>, ConfigError> {
        Ok(GracefullyLayer::with_renderer(self.renderer()?))
    }
}

/// Renderer selected at runtime from a [`RecoveryConfig`]
#[derive(Debug, Clone)]
pub enum ConfiguredRenderer {
    StatusOnly(StatusOnly),
    Json(Json),
}

impl Renderer for ConfiguredRenderer {
    fn render(&self, sink: &mut ResponseSink, reason: &Reason) {
        match self {
            Self::StatusOnly(renderer) => renderer.render(sink, reason),
            Self::Json(renderer) => renderer.render(sink, reason),
        }
    }
}
