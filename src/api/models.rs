//! Request and response bodies of the screening backend.

use crate::types::{FileMetadata, FileStatus};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

pub use crate::types::ScreeningResult;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub job_description: String,
    pub cv_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screening_criteria: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub uuid: String,
    pub filename: String,
    #[serde(default)]
    pub status: FileStatus,
    #[serde(default)]
    pub chunks_count: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ScreeningCriteria {
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub experience_levels: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DetailedHealth {
    pub status: String,
    #[serde(default)]
    pub components: HashMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FileStats {
    #[serde(default)]
    pub total_files: u64,
    #[serde(default)]
    pub total_size_bytes: u64,
    #[serde(default)]
    pub total_size_mb: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FileListResponse {
    #[serde(default, deserialize_with = "skip_malformed_files")]
    pub files: Vec<FileMetadata>,
    #[serde(default)]
    pub stats: FileStats,
    #[serde(default)]
    pub total: u64,
}

impl FileListResponse {
    pub fn count_with_status(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }
}

// One unreadable row (unknown status, naive timestamp) must not hide the rest
// of the listing.
fn skip_malformed_files<'de, D>(deserializer: D) -> Result<Vec<FileMetadata>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<FileMetadata>(row) {
            Ok(file) => Some(file),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable file listing entry");
                None
            }
        })
        .collect())
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub uuid: String,
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub source_files: Vec<String>,
    #[serde(default)]
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_skips_unreadable_rows() {
        let raw = r#"{
            "files": [
                {"uuid":"a","original_filename":"a.pdf","upload_date":"2024-05-01T10:00:00Z","status":"processed"},
                {"uuid":"b","original_filename":"b.pdf","upload_date":"2024-05-01T10:00:00Z","status":"queued"},
                {"uuid":"c","original_filename":"c.pdf","upload_date":"2024-05-01T10:00:00","status":"uploaded"}
            ],
            "total": 3
        }"#;
        let listing: FileListResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(listing.files.len(), 1);
        assert_eq!(listing.files[0].uuid, "a");
        assert_eq!(listing.total, 3);
    }
}
