use axum::{
    extract::{multipart::MultipartRejection, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("No file uploaded")]
    NoFileProvided,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to extract text: {0}")]
    ExtractionFailed(String),

    #[error("Invalid response data structure: {0}")]
    InvalidResponseShape(String),

    #[error("Error processing quiz content: {0}")]
    MalformedContent(String),

    #[error("Upstream AI call failed: {0}")]
    UpstreamCallFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Machine-readable failure class sent alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BadRequest,
    PayloadTooLarge,
    NoFileProvided,
    MethodNotAllowed,
    UnsupportedFileType,
    IoError,
    ExtractionFailed,
    InvalidResponseShape,
    MalformedContent,
    UpstreamCallFailed,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Multipart(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                ErrorKind::PayloadTooLarge
            }
            Error::BadRequest(_) | Error::Validation(_) | Error::Multipart(_) => {
                ErrorKind::BadRequest
            }
            Error::NoFileProvided => ErrorKind::NoFileProvided,
            Error::MethodNotAllowed => ErrorKind::MethodNotAllowed,
            Error::UnsupportedFileType(_) => ErrorKind::UnsupportedFileType,
            Error::Io(_) => ErrorKind::IoError,
            Error::ExtractionFailed(_) => ErrorKind::ExtractionFailed,
            Error::InvalidResponseShape(_) => ErrorKind::InvalidResponseShape,
            Error::MalformedContent(_) => ErrorKind::MalformedContent,
            Error::UpstreamCallFailed(_) => ErrorKind::UpstreamCallFailed,
            Error::Config(_) | Error::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        if let Error::Multipart(err) = self {
            return err.status();
        }
        match self.kind() {
            ErrorKind::BadRequest | ErrorKind::NoFileProvided => StatusCode::BAD_REQUEST,
            ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = ?self.kind(), "{}", self);
        }

        let body = Json(json!({ "error": self.to_string(), "kind": self.kind() }));
        (status, body).into_response()
    }
}

/// A request that is not a readable multipart form carries no file.
impl From<MultipartRejection> for Error {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::debug!("Rejected upload body: {}", rejection.body_text());
        Error::NoFileProvided
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::UpstreamCallFailed(format!("request timed out: {}", err))
        } else {
            Error::UpstreamCallFailed(err.to_string())
        }
    }
}
