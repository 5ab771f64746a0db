use serde::Deserialize;

/// User-facing messages for each classified failure.
pub mod messages {
    pub const TIMEOUT: &str = "The request took too long to complete.";
    pub const NETWORK: &str = "Connection error. Check that the backend is running.";
    pub const UNAUTHORIZED: &str = "You do not have permission to perform this action.";
    pub const NOT_FOUND: &str = "The requested resource was not found.";
    pub const SERVER: &str = "Internal server error. Please try again later.";
    pub const INVALID_FILE_TYPE: &str = "Only PDF files are allowed.";
}

/// What went wrong on the wire, before classification.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("could not reach backend: {0}")]
    Connect(String),

    #[error("Request failed with status code {status}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return TransportError::Timeout(err.to_string());
        }
        #[cfg(not(target_arch = "wasm32"))]
        if err.is_connect() {
            return TransportError::Connect(err.to_string());
        }
        if err.is_decode() {
            return TransportError::Decode(err.to_string());
        }
        TransportError::Other(err.to_string())
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode(err.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    Network,
    Unauthorized,
    NotFound,
    Server,
    Validation,
    Unknown,
}

/// Normalized failure of a backend call.
///
/// The display text is the message shown to the user; the transport failure
/// it came from stays reachable through `source()`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("{}", messages::TIMEOUT)]
    Timeout(#[source] TransportError),

    #[error("{}", messages::NETWORK)]
    Network(#[source] TransportError),

    #[error("{}", messages::UNAUTHORIZED)]
    Unauthorized(#[source] TransportError),

    #[error("{}", messages::NOT_FOUND)]
    NotFound(#[source] TransportError),

    #[error("{}", messages::SERVER)]
    Server(#[source] TransportError),

    #[error("{}", messages::INVALID_FILE_TYPE)]
    InvalidFileType { mime_type: String },

    #[error("{message}")]
    Other {
        message: String,
        #[source]
        cause: Option<TransportError>,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Deserialize)]
struct DetailBody {
    detail: serde_json::Value,
}

impl ApiError {
    pub fn from_transport(cause: TransportError) -> Self {
        match &cause {
            TransportError::Timeout(_) => ApiError::Timeout(cause),
            TransportError::Connect(_) => ApiError::Network(cause),
            TransportError::Status { status: 401, .. } => ApiError::Unauthorized(cause),
            TransportError::Status { status: 404, .. } => ApiError::NotFound(cause),
            TransportError::Status { status, .. } if *status >= 500 => ApiError::Server(cause),
            TransportError::Status { body, .. } => ApiError::Other {
                message: backend_detail(body).unwrap_or_else(|| cause.to_string()),
                cause: Some(cause),
            },
            TransportError::Decode(_) | TransportError::Other(_) => ApiError::Other {
                message: cause.to_string(),
                cause: Some(cause),
            },
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        ApiError::Other {
            message: message.into(),
            cause: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Timeout(_) => ErrorKind::Timeout,
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Unauthorized(_) => ErrorKind::Unauthorized,
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::Server(_) => ErrorKind::Server,
            ApiError::InvalidFileType { .. } => ErrorKind::Validation,
            ApiError::Other { .. } => ErrorKind::Unknown,
        }
    }

    /// The transport failure behind this error, if any.
    pub fn cause(&self) -> Option<&TransportError> {
        match self {
            ApiError::Timeout(cause)
            | ApiError::Network(cause)
            | ApiError::Unauthorized(cause)
            | ApiError::NotFound(cause)
            | ApiError::Server(cause) => Some(cause),
            ApiError::InvalidFileType { .. } => None,
            ApiError::Other { cause, .. } => cause.as_ref(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(cause: TransportError) -> Self {
        ApiError::from_transport(cause)
    }
}

// FastAPI reports failures as {"detail": "..."}; validation errors use a list.
fn backend_detail(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<DetailBody>(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(detail) if !detail.is_empty() => Some(detail),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
