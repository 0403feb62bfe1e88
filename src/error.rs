use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lab_quantize::QuantizeError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("No colors available")]
    NoColors,

    #[error("Failed to fetch colors: {0}")]
    Palette(#[from] PaletteSourceError),

    #[error("Image error: {0}")]
    Codec(#[from] CodecError),

    #[error("Quantization error: {0}")]
    Quantize(QuantizeError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<QuantizeError> for ApiError {
    fn from(e: QuantizeError) -> Self {
        match e {
            QuantizeError::EmptyPalette => ApiError::NoColors,
            other => ApiError::Quantize(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum PaletteSourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid palette JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Embedded asset missing: {0}")]
    MissingAsset(&'static str),
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("PNG decode error: {0}")]
    Decode(String),

    #[error("Unsupported PNG format: {0}")]
    Unsupported(String),

    #[error("Pixel buffer does not match {width}x{height}")]
    SizeMismatch { width: u32, height: u32 },

    #[error("PNG encode error: {0}")]
    Encode(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) | ApiError::NoColors => StatusCode::BAD_REQUEST,
            ApiError::Palette(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Codec(CodecError::Encode(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Codec(_) => StatusCode::BAD_REQUEST,
            ApiError::Quantize(e) if e.is_input_error() => StatusCode::BAD_REQUEST,
            ApiError::Quantize(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
