use super::client::HttpClient;
use super::endpoints;
use super::error::{ApiError, ApiResult};
use super::models::{
    AnalyzeRequest, ChatRequest, ChatResponse, DeleteResponse, DetailedHealth, FileListResponse,
    HealthStatus, ScreeningCriteria, ScreeningResult, UploadResponse,
};
use super::transport::{FilePart, RequestBody, Transport};
use crate::config::ApiConfig;
use std::path::Path;
use std::sync::Arc;

const UPLOAD_FIELD: &str = "file";

/// A CV picked by the user, as handed to [`CvScreenerApi::upload_cv`].
#[derive(Clone, Debug, PartialEq)]
pub struct UploadFile {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Builds an upload whose declared type comes from the file extension.
    pub fn from_name(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let mime_type = mime_type_for_filename(&filename).to_string();
        Self {
            filename,
            mime_type,
            bytes,
        }
    }

    /// Local guard only; the backend decides what it accepts.
    pub fn validate(&self) -> ApiResult<()> {
        if self.mime_type.to_ascii_lowercase().contains("pdf") {
            Ok(())
        } else {
            Err(ApiError::InvalidFileType {
                mime_type: self.mime_type.clone(),
            })
        }
    }
}

/// Declared MIME type for the extensions a user is likely to pick.
pub fn mime_type_for_filename(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("txt") => "text/plain",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Typed operations over the screening backend.
#[derive(Clone)]
pub struct CvScreenerApi {
    http: HttpClient,
}

impl CvScreenerApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn from_config(config: ApiConfig) -> ApiResult<Self> {
        Ok(Self::new(HttpClient::from_config(config)?))
    }

    pub fn with_transport(config: ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self::new(HttpClient::new(config, transport))
    }

    pub fn config(&self) -> &ApiConfig {
        self.http.config()
    }

    pub async fn analyze_cv(&self, request: &AnalyzeRequest) -> ApiResult<ScreeningResult> {
        let body = serde_json::to_value(request)
            .map_err(|err| ApiError::other(format!("could not encode request: {err}")))?;
        self.http.post(endpoints::ANALYZE_CV, RequestBody::Json(body)).await
    }

    pub async fn upload_cv(&self, file: UploadFile) -> ApiResult<UploadResponse> {
        file.validate()?;
        tracing::info!(filename = %file.filename, bytes = file.bytes.len(), "uploading CV");
        let part = FilePart {
            field: UPLOAD_FIELD.to_string(),
            filename: file.filename,
            mime_type: file.mime_type,
            bytes: file.bytes,
        };
        self.http.post(endpoints::UPLOAD_CV, RequestBody::Multipart(part)).await
    }

    pub async fn get_screening_criteria(&self) -> ApiResult<ScreeningCriteria> {
        self.http.get(endpoints::CRITERIA).await
    }

    pub async fn health_check(&self) -> ApiResult<HealthStatus> {
        self.http.get(endpoints::HEALTH).await
    }

    pub async fn detailed_health_check(&self) -> ApiResult<DetailedHealth> {
        self.http.get(endpoints::HEALTH_DETAILED).await
    }

    pub async fn list_cvs(&self) -> ApiResult<FileListResponse> {
        self.http.get(endpoints::FILES).await
    }

    pub async fn delete_cv(&self, uuid: &str) -> ApiResult<DeleteResponse> {
        self.http.delete(&endpoints::file(uuid)).await
    }

    pub async fn send_chat_message(&self, message: &str) -> ApiResult<ChatResponse> {
        let body = serde_json::to_value(ChatRequest { message })
            .map_err(|err| ApiError::other(format!("could not encode request: {err}")))?;
        self.http.post(endpoints::CHAT, RequestBody::Json(body)).await
    }
}
