//! Integration tests for the client state store

use cv_screener::state::{Action, ClientState, Store};
use cv_screener::types::{ChatMessage, FileMetadata, FileStatus, FileUpdate, JobDescription, Role};
use time::OffsetDateTime;

fn uuids(store: &Store) -> Vec<&str> {
    store.state().files.iter().map(|f| f.uuid.as_str()).collect()
}

mod file_tests {
    use super::*;

    #[test]
    fn test_add_remove_keeps_insertion_order() {
        let mut store = Store::new();
        store.add_file(FileMetadata::new("a", "alice.pdf"));
        store.add_file(FileMetadata::new("b", "bob.pdf"));
        store.add_file(FileMetadata::new("c", "carol.pdf"));
        assert_eq!(uuids(&store), ["a", "b", "c"]);

        store.remove_file("b");
        assert_eq!(uuids(&store), ["a", "c"]);

        store.remove_file("missing");
        assert_eq!(uuids(&store), ["a", "c"]);
    }

    #[test]
    fn test_update_merges_only_given_fields() {
        let mut store = Store::new();
        let mut file = FileMetadata::new("a", "alice.pdf");
        file.file_size = 2048;
        store.add_file(file);

        store.update_file(
            "a",
            FileUpdate {
                status: Some(FileStatus::Processed),
                chunks_count: Some(12),
                ..FileUpdate::default()
            },
        );

        let file = store.state().file("a").expect("file present");
        assert_eq!(file.status, FileStatus::Processed);
        assert_eq!(file.chunks_count, Some(12));
        assert_eq!(file.file_size, 2048);
        assert_eq!(file.original_filename, "alice.pdf");
        assert!(file.processing_errors.is_none());
    }

    #[test]
    fn test_status_regression_is_ignored() {
        let mut store = Store::new();
        store.add_file(FileMetadata::new("a", "alice.pdf"));
        store.update_file("a", FileUpdate::status(FileStatus::Processed));
        store.update_file(
            "a",
            FileUpdate {
                status: Some(FileStatus::Processing),
                chunks_count: Some(4),
                ..FileUpdate::default()
            },
        );

        let file = store.state().file("a").expect("file present");
        assert_eq!(file.status, FileStatus::Processed);
        assert_eq!(file.chunks_count, Some(4));
    }

    #[test]
    fn test_error_status_records_processing_errors() {
        let mut store = Store::new();
        store.add_file(FileMetadata::new("a", "alice.pdf"));
        store.update_file(
            "a",
            FileUpdate {
                status: Some(FileStatus::Error),
                processing_errors: Some(vec!["unreadable page".to_string()]),
                ..FileUpdate::default()
            },
        );

        let file = store.state().file("a").expect("file present");
        assert_eq!(file.status, FileStatus::Error);
        assert_eq!(file.processing_errors.as_deref(), Some(&["unreadable page".to_string()][..]));
    }

    #[test]
    fn test_adding_known_uuid_replaces_in_place() {
        let mut store = Store::new();
        store.add_file(FileMetadata::new("a", "alice.pdf"));
        store.add_file(FileMetadata::new("b", "bob.pdf"));
        store.update_file("a", FileUpdate::status(FileStatus::Processed));

        store.add_file(FileMetadata::new("a", "alice-v2.pdf"));
        store.update_file("a", FileUpdate::status(FileStatus::Processing));

        assert_eq!(uuids(&store), ["a", "b"]);
        let file = store.state().file("a").expect("file present");
        assert_eq!(file.original_filename, "alice-v2.pdf");
        assert_eq!(file.status, FileStatus::Processing);
    }

    #[test]
    fn test_pending_files_include_uploaded() {
        let mut store = Store::new();
        assert!(!store.state().has_pending_files());

        store.add_file(FileMetadata::new("a", "alice.pdf"));
        assert!(store.state().has_pending_files());

        store.update_file("a", FileUpdate::status(FileStatus::Processing));
        assert!(store.state().has_pending_files());

        store.update_file("a", FileUpdate::status(FileStatus::Error));
        assert!(!store.state().has_pending_files());
    }

    #[test]
    fn test_set_files_replaces_listing() {
        let mut store = Store::new();
        store.add_file(FileMetadata::new("a", "alice.pdf"));
        store.update_file("a", FileUpdate::status(FileStatus::Processed));

        let mut reprocessing = FileMetadata::new("a", "alice.pdf");
        reprocessing.status = FileStatus::Processing;
        store.set_files(vec![reprocessing, FileMetadata::new("d", "dave.pdf")]);

        assert_eq!(uuids(&store), ["a", "d"]);
        assert_eq!(store.state().file("a").map(|f| f.status), Some(FileStatus::Processing));
    }
}

mod chat_tests {
    use super::*;

    #[test]
    fn test_messages_keep_order_and_identity() {
        let mut store = Store::new();
        let question = ChatMessage::user("Who knows Rust?");
        let answer = ChatMessage::assistant("Alice does.");
        store.add_chat_message(question.clone());
        store.add_chat_message(answer.clone());

        let messages = &store.state().chat_messages;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], question);
        assert_eq!(messages[1], answer);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_ne!(messages[0].id, messages[1].id);
        assert!(messages[0].timestamp <= messages[1].timestamp);
    }

    #[test]
    fn test_clear_empties_only_chat() {
        let mut store = Store::new();
        store.add_file(FileMetadata::new("a", "alice.pdf"));
        store.add_chat_message(ChatMessage::user("hello"));
        store.add_chat_message(ChatMessage::assistant_error("backend down"));

        store.clear_chat_messages();
        assert!(store.state().chat_messages.is_empty());
        assert_eq!(store.state().files.len(), 1);
    }

    #[test]
    fn test_sources_and_confidence_survive_in_state() {
        let mut store = Store::new();
        store.add_chat_message(ChatMessage::assistant_with_sources(
            "Bob has five years of Go.",
            vec!["bob.pdf".to_string()],
            1.4,
        ));

        let message = &store.state().chat_messages[0];
        assert_eq!(message.sources.as_deref(), Some(&["bob.pdf".to_string()][..]));
        assert_eq!(message.confidence, Some(1.0));
        assert!(!message.is_error);
    }
}

mod reducer_tests {
    use super::*;

    #[test]
    fn test_reduce_is_pure_over_snapshot() {
        let before = ClientState::default();
        let after = before.clone().reduce(Action::SetLoading(true));
        assert!(!before.is_loading);
        assert!(after.is_loading);
    }

    #[test]
    fn test_loading_and_error_transitions() {
        let mut store = Store::new();
        store.dispatch(Action::SetLoading(true));
        store.dispatch(Action::SetError(Some("Only PDF files are allowed.".into())));
        assert!(store.state().is_loading);
        assert_eq!(store.state().error.as_deref(), Some("Only PDF files are allowed."));

        store.dispatch(Action::SetError(None));
        store.dispatch(Action::SetLoading(false));
        assert_eq!(store.state(), Store::new().state());
    }

    #[test]
    fn test_job_descriptions_append() {
        let mut store = Store::new();
        store.add_job_description(JobDescription {
            id: "jd-1".into(),
            title: "Backend engineer".into(),
            description: "Rust services".into(),
            requirements: vec!["Rust".into(), "PostgreSQL".into()],
            created_at: OffsetDateTime::now_utc(),
        });
        store.add_job_description(JobDescription {
            id: "jd-2".into(),
            title: "Data engineer".into(),
            description: "Pipelines".into(),
            requirements: vec![],
            created_at: OffsetDateTime::now_utc(),
        });

        let ids: Vec<&str> = store
            .state()
            .job_descriptions
            .iter()
            .map(|j| j.id.as_str())
            .collect();
        assert_eq!(ids, ["jd-1", "jd-2"]);
    }
}

mod sequence_tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::Config;

    #[derive(Clone, Debug)]
    enum Op {
        Add(u8, u8),
        Remove(u8),
        Update(u8, FileStatus),
    }

    fn status() -> impl Strategy<Value = FileStatus> {
        prop_oneof![
            Just(FileStatus::Uploaded),
            Just(FileStatus::Processing),
            Just(FileStatus::Processed),
            Just(FileStatus::Error),
        ]
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..4, 0u8..3).prop_map(|(id, version)| Op::Add(id, version)),
            (0u8..4).prop_map(Op::Remove),
            (0u8..4, status()).prop_map(|(id, status)| Op::Update(id, status)),
        ]
    }

    proptest! {
        #![proptest_config(Config::with_cases(256))]
        #[test]
        fn test_file_sequences_match_list_model(ops in prop::collection::vec(op(), 0..40)) {
            let mut store = Store::new();
            // (uuid, filename, status) in insertion order
            let mut model: Vec<(String, String, FileStatus)> = Vec::new();

            for step in ops {
                match step {
                    Op::Add(id, version) => {
                        let uuid = format!("cv-{id}");
                        let name = format!("cv-{id}-v{version}.pdf");
                        store.add_file(FileMetadata::new(uuid.clone(), name.clone()));
                        match model.iter_mut().find(|(u, _, _)| *u == uuid) {
                            Some(entry) => *entry = (uuid, name, FileStatus::Uploaded),
                            None => model.push((uuid, name, FileStatus::Uploaded)),
                        }
                    }
                    Op::Remove(id) => {
                        let uuid = format!("cv-{id}");
                        store.remove_file(uuid.clone());
                        model.retain(|(u, _, _)| *u != uuid);
                    }
                    Op::Update(id, next) => {
                        let uuid = format!("cv-{id}");
                        store.update_file(uuid.clone(), FileUpdate::status(next));
                        if let Some(entry) = model.iter_mut().find(|(u, _, _)| *u == uuid) {
                            if entry.2.advances_to(next) {
                                entry.2 = next;
                            }
                        }
                    }
                }
            }

            let actual: Vec<(String, String, FileStatus)> = store
                .state()
                .files
                .iter()
                .map(|f| (f.uuid.clone(), f.original_filename.clone(), f.status))
                .collect();
            prop_assert_eq!(actual, model);
        }
    }
}
