use thiserror::Error;

/// Errors produced by the assistant client and configuration layer
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Request Error: {0}")]
    RequestError(String),

    #[error("Response Error: {0}")]
    ResponseError(String),

    #[error("Parsing Error: {0}")]
    ParsingError(String),

    #[error("HTTP Error: {status_code} - {message}")]
    HttpError { status_code: u16, message: String },
}

/// Result type for widget operations
pub type WidgetResult<T> = Result<T, WidgetError>;
