/// Backend access for the CV screener
///
/// # Architecture
///
/// - `transport` - raw request/response exchange (`reqwest` in production)
/// - `client` - middleware chain and error normalization around the transport
/// - `gateway` - typed operations over the backend's REST surface
/// - `call` - loading/error bookkeeping around a single gateway call
///
/// # Usage
///
/// ```rust,no_run
/// use cv_screener::api::CvScreenerApi;
/// use cv_screener::config::{ApiConfig, EnvSnapshot};
///
/// # async fn example() -> Result<(), cv_screener::api::ApiError> {
/// let config = ApiConfig::resolve(&EnvSnapshot::from_process());
/// let api = CvScreenerApi::from_config(config)?;
/// let listing = api.list_cvs().await?;
/// println!("{} CVs", listing.total);
/// # Ok(())
/// # }
/// ```
pub mod call;
mod client;
mod error;
mod gateway;
pub mod models;
mod transport;

pub use call::{CallStatus, CallStatusSink, CallTracker, execute};
pub use client::{DebugLog, HttpClient, Middleware};
pub use error::{ApiError, ApiResult, ErrorKind, TransportError, messages};
pub use gateway::{CvScreenerApi, UploadFile, mime_type_for_filename};
pub use transport::{ApiRequest, ApiResponse, FilePart, Method, RequestBody, ReqwestTransport, Transport};

/// Headers sent with every JSON request. Names are lowercase so they can be
/// used as static header names.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[
    ("content-type", "application/json"),
    ("accept", "application/json"),
];

pub mod endpoints {
    pub const ANALYZE_CV: &str = "/screening/analyze";
    pub const UPLOAD_CV: &str = "/screening/upload";
    pub const CRITERIA: &str = "/screening/criteria";
    pub const HEALTH: &str = "/health";
    pub const HEALTH_DETAILED: &str = "/health/detailed";
    pub const FILES: &str = "/files";
    pub const CHAT: &str = "/chat";

    /// Path of one stored CV; the uuid is percent-encoded as a single segment.
    pub fn file(uuid: &str) -> String {
        let segment = reqwest::Url::parse("http://localhost/")
            .ok()
            .and_then(|mut url| {
                url.path_segments_mut().ok()?.clear().push(uuid);
                Some(url.path().trim_start_matches('/').to_string())
            })
            .unwrap_or_else(|| uuid.to_string());
        format!("{FILES}/{segment}")
    }

}
