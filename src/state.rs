//! Client-side file/chat state.
//!
//! [`ClientState`] is an immutable snapshot; [`Action`] is the closed set of
//! transitions and [`ClientState::reduce`] the only way to apply one.

use crate::api::CallStatusSink;
use crate::types::{ChatMessage, FileMetadata, FileUpdate, JobDescription};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientState {
    pub files: Vec<FileMetadata>,
    pub job_descriptions: Vec<JobDescription>,
    pub chat_messages: Vec<ChatMessage>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    SetLoading(bool),
    SetError(Option<String>),
    /// Adds a file, or replaces the record tracked under the same uuid.
    AddFile(FileMetadata),
    UpdateFile { uuid: String, changes: FileUpdate },
    RemoveFile(String),
    /// Replace the file list with a server-confirmed listing.
    SetFiles(Vec<FileMetadata>),
    AddJobDescription(JobDescription),
    AddChatMessage(ChatMessage),
    ClearChatMessages,
}

impl ClientState {
    pub fn reduce(mut self, action: Action) -> ClientState {
        match action {
            Action::SetLoading(loading) => self.is_loading = loading,
            Action::SetError(error) => self.error = error,
            // A known uuid is replaced in place; re-uploads keep their position.
            Action::AddFile(file) => match self.files.iter_mut().find(|f| f.uuid == file.uuid) {
                Some(existing) => *existing = file,
                None => self.files.push(file),
            },
            Action::UpdateFile { uuid, changes } => {
                if let Some(file) = self.files.iter_mut().find(|f| f.uuid == uuid) {
                    changes.apply(file);
                }
            }
            Action::RemoveFile(uuid) => self.files.retain(|f| f.uuid != uuid),
            Action::SetFiles(files) => self.files = files,
            Action::AddJobDescription(job) => self.job_descriptions.push(job),
            Action::AddChatMessage(message) => self.chat_messages.push(message),
            Action::ClearChatMessages => self.chat_messages.clear(),
        }
        self
    }

    pub fn file(&self, uuid: &str) -> Option<&FileMetadata> {
        self.files.iter().find(|f| f.uuid == uuid)
    }

    /// Whether any file is still waiting on backend processing.
    pub fn has_pending_files(&self) -> bool {
        self.files.iter().any(|f| !f.status.is_terminal())
    }
}

/// Owner of the current [`ClientState`].
///
/// Held by the application root and handed to screens; there is no global
/// instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Store {
    state: ClientState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        let current = std::mem::take(&mut self.state);
        self.state = current.reduce(action);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.dispatch(Action::SetLoading(loading));
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.dispatch(Action::SetError(error));
    }

    pub fn add_file(&mut self, file: FileMetadata) {
        self.dispatch(Action::AddFile(file));
    }

    pub fn update_file(&mut self, uuid: impl Into<String>, changes: FileUpdate) {
        self.dispatch(Action::UpdateFile {
            uuid: uuid.into(),
            changes,
        });
    }

    pub fn remove_file(&mut self, uuid: impl Into<String>) {
        self.dispatch(Action::RemoveFile(uuid.into()));
    }

    pub fn set_files(&mut self, files: Vec<FileMetadata>) {
        self.dispatch(Action::SetFiles(files));
    }

    pub fn add_job_description(&mut self, job: JobDescription) {
        self.dispatch(Action::AddJobDescription(job));
    }

    pub fn add_chat_message(&mut self, message: ChatMessage) {
        self.dispatch(Action::AddChatMessage(message));
    }

    pub fn clear_chat_messages(&mut self) {
        self.dispatch(Action::ClearChatMessages);
    }
}

impl CallStatusSink for &mut Store {
    fn begin(&mut self) {
        self.set_loading(true);
        self.set_error(None);
    }

    fn fail(&mut self, message: String) {
        self.set_error(Some(message));
    }

    fn finish(&mut self) {
        self.set_loading(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileStatus;

    #[test]
    fn update_of_unknown_file_is_noop() {
        let mut store = Store::new();
        store.add_file(FileMetadata::new("a", "a.pdf"));
        let before = store.state().clone();
        store.update_file("missing", FileUpdate::status(FileStatus::Processed));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn transitions_leave_other_fields_alone() {
        let mut store = Store::new();
        store.add_chat_message(ChatMessage::user("hi"));
        store.set_loading(true);
        store.set_error(Some("oops".into()));
        store.add_file(FileMetadata::new("a", "a.pdf"));

        let state = store.state();
        assert!(state.is_loading);
        assert_eq!(state.error.as_deref(), Some("oops"));
        assert_eq!(state.chat_messages.len(), 1);
        assert_eq!(state.files.len(), 1);
    }

    #[tokio::test]
    async fn store_tracks_call_status() {
        let mut store = Store::new();
        let result: crate::api::ApiResult<u8> =
            crate::api::execute(&mut store, async { Err(crate::api::ApiError::other("down")) })
                .await;
        assert!(result.is_err());
        assert!(!store.state().is_loading);
        assert_eq!(store.state().error.as_deref(), Some("down"));
    }
}
