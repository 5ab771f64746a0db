use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

static NEXT_MESSAGE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Processing state of an uploaded CV as reported by the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    #[default]
    Uploaded,
    Processing,
    Processed,
    Error,
}

impl FileStatus {
    /// Whether moving from `self` to `next` keeps the status moving forward.
    ///
    /// `Processed` and `Error` are terminal; only a re-upload or a server
    /// listing can move a record out of them.
    pub fn advances_to(self, next: FileStatus) -> bool {
        use FileStatus::*;
        match (self, next) {
            (a, b) if a == b => true,
            (Uploaded, Processing | Processed | Error) => true,
            (Processing, Processed | Error) => true,
            _ => false,
        }
    }

    /// No further backend processing is expected.
    pub fn is_terminal(self) -> bool {
        matches!(self, FileStatus::Processed | FileStatus::Error)
    }

    pub fn label(self) -> &'static str {
        match self {
            FileStatus::Uploaded => "uploaded",
            FileStatus::Processing => "processing",
            FileStatus::Processed => "processed",
            FileStatus::Error => "error",
        }
    }
}

/// Scoring result for one CV against a job description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub score: f64,
    pub match_percentage: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub detailed_analysis: HashMap<String, f64>,
}

/// One uploaded CV tracked by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub uuid: String,
    pub original_filename: String,
    #[serde(with = "time::serde::rfc3339")]
    pub upload_date: OffsetDateTime,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub status: FileStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_errors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ScreeningResult>,
}

impl FileMetadata {
    pub fn new(uuid: impl Into<String>, original_filename: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            original_filename: original_filename.into(),
            upload_date: OffsetDateTime::now_utc(),
            file_size: 0,
            status: FileStatus::Uploaded,
            chunks_count: None,
            processing_errors: None,
            analysis: None,
        }
    }
}

/// Partial changes merged into a [`FileMetadata`] by identifier.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileUpdate {
    pub status: Option<FileStatus>,
    pub chunks_count: Option<u32>,
    pub processing_errors: Option<Vec<String>>,
    pub analysis: Option<ScreeningResult>,
}

impl FileUpdate {
    pub fn status(status: FileStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub(crate) fn apply(self, file: &mut FileMetadata) {
        if let Some(status) = self.status {
            if file.status.advances_to(status) {
                file.status = status;
            } else {
                tracing::debug!(
                    uuid = %file.uuid,
                    from = file.status.label(),
                    to = status.label(),
                    "ignoring status regression"
                );
            }
        }
        if let Some(chunks) = self.chunks_count {
            file.chunks_count = Some(chunks);
        }
        if let Some(errors) = self.processing_errors {
            file.processing_errors = Some(errors);
        }
        if let Some(analysis) = self.analysis {
            file.analysis = Some(analysis);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct JobDescription {
    pub id: String,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub role: Role,
    pub timestamp: OffsetDateTime,
    pub sources: Option<Vec<String>>,
    pub confidence: Option<f32>,
    pub is_error: bool,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        let id = NEXT_MESSAGE_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("msg-{id}"),
            content: content.into(),
            role,
            timestamp: OffsetDateTime::now_utc(),
            sources: None,
            confidence: None,
            is_error: false,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Assistant turn carrying the files the answer was drawn from.
    pub fn assistant_with_sources(
        content: impl Into<String>,
        sources: Vec<String>,
        confidence: f32,
    ) -> Self {
        let mut msg = Self::new(Role::Assistant, content);
        msg.sources = (!sources.is_empty()).then_some(sources);
        msg.confidence = Some(if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        });
        msg
    }

    /// Assistant turn shown in place of an answer when the backend call failed.
    pub fn assistant_error(content: impl Into<String>) -> Self {
        let mut msg = Self::new(Role::Assistant, content);
        msg.is_error = true;
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_only_moves_forward() {
        assert!(FileStatus::Uploaded.advances_to(FileStatus::Processing));
        assert!(FileStatus::Processing.advances_to(FileStatus::Processed));
        assert!(FileStatus::Processing.advances_to(FileStatus::Error));
        assert!(!FileStatus::Processed.advances_to(FileStatus::Processing));
        assert!(!FileStatus::Error.advances_to(FileStatus::Uploaded));
        assert!(FileStatus::Processed.advances_to(FileStatus::Processed));
    }

    #[test]
    fn only_processed_and_error_are_terminal() {
        assert!(!FileStatus::Uploaded.is_terminal());
        assert!(!FileStatus::Processing.is_terminal());
        assert!(FileStatus::Processed.is_terminal());
        assert!(FileStatus::Error.is_terminal());
    }

    #[test]
    fn message_ids_are_unique() {
        let a = ChatMessage::user("one");
        let b = ChatMessage::user("two");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn confidence_is_clamped() {
        let msg = ChatMessage::assistant_with_sources("hi", vec![], 1.7);
        assert_eq!(msg.confidence, Some(1.0));
        assert!(msg.sources.is_none());
        let msg = ChatMessage::assistant_with_sources("hi", vec!["a.pdf".into()], -0.2);
        assert_eq!(msg.confidence, Some(0.0));
    }

    #[test]
    fn parses_backend_file_metadata() {
        let raw = r#"{
            "uuid": "4f1c",
            "original_filename": "jane.pdf",
            "upload_date": "2024-05-01T10:20:30.123456Z",
            "file_size": 2048,
            "status": "processed",
            "chunks_count": 12,
            "pinecone_prefix": "cv_4f1c",
            "processing_errors": []
        }"#;
        let file: FileMetadata = serde_json::from_str(raw).unwrap();
        assert_eq!(file.uuid, "4f1c");
        assert_eq!(file.status, FileStatus::Processed);
        assert_eq!(file.chunks_count, Some(12));
        assert_eq!(file.processing_errors, Some(vec![]));
    }
}
