use crate::api::{UploadFile, execute};
use crate::state::Store;
use crate::theme::status_class;
use crate::types::{FileMetadata, FileUpdate};
use crate::views::shared::{
    ApiCall, Backend, ErrorBanner, format_size, format_upload_date, refresh_files, use_api_call,
    use_processing_poll,
};
use dioxus::prelude::*;
use std::path::Path;

async fn upload_one(
    backend: Backend,
    call: ApiCall,
    mut store: Signal<Store>,
    mut notice: Signal<Option<String>>,
    file: UploadFile,
) {
    let size = file.bytes.len() as u64;
    let Ok(response) = execute(call, backend.api.upload_cv(file)).await else {
        return;
    };
    tracing::info!(uuid = %response.uuid, status = response.status.label(), "CV uploaded");

    let mut record = FileMetadata::new(response.uuid.clone(), response.filename.clone());
    record.file_size = size;
    store.with_mut(|s| {
        s.add_file(record);
        s.update_file(
            response.uuid.clone(),
            FileUpdate {
                status: Some(response.status),
                chunks_count: response.chunks_count,
                ..FileUpdate::default()
            },
        );
    });
    notice.set(Some(response.message));

    // Processing status only ever comes from the server listing.
    let _ = refresh_files(&backend.api, store).await;
}

async fn delete_one(backend: Backend, call: ApiCall, mut store: Signal<Store>, uuid: String) {
    if execute(call, backend.api.delete_cv(&uuid)).await.is_ok() {
        store.with_mut(|s| s.remove_file(uuid));
        let _ = refresh_files(&backend.api, store).await;
    }
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string()
}

#[component]
pub fn UploadView(backend: Backend, store: Signal<Store>) -> Element {
    let call = use_api_call();
    let notice = use_signal(|| Option::<String>::None);
    use_processing_poll(backend.clone(), store);

    let on_files = {
        let backend = backend.clone();
        move |evt: FormEvent| {
            let backend = backend.clone();
            spawn(async move {
                let Some(engine) = evt.files() else {
                    return;
                };
                // One at a time so each refresh sees the previous upload.
                for path in engine.files() {
                    let Some(bytes) = engine.read_file(&path).await else {
                        tracing::warn!(path = %path, "could not read selected file");
                        continue;
                    };
                    let file = UploadFile::from_name(display_name(&path), bytes);
                    upload_one(backend.clone(), call, store, notice, file).await;
                }
            });
        }
    };

    let files = store.read().state().files.clone();
    let loading = (call.loading)();

    rsx! {
        div { class: "main-container",
            div { class: "page-header",
                h2 { "Upload CVs" }
                p { class: "text-muted", "Upload PDF CVs for AI analysis" }
            }
            div { class: "upload-area",
                p { "Choose a PDF file to upload" }
                input {
                    r#type: "file",
                    accept: ".pdf,application/pdf",
                    multiple: true,
                    disabled: loading,
                    onchange: on_files,
                }
                if loading {
                    span { class: "shimmer-text", "Working…" }
                }
            }
            if let Some(message) = (call.error)() {
                ErrorBanner { message }
            }
            if let Some(message) = notice() {
                div { class: "success-banner", "{message}" }
            }
            div { class: "panel",
                h3 { "Uploaded files ({files.len()})" }
                if files.is_empty() {
                    p { class: "text-muted", "No files uploaded yet." }
                }
                for file in files.into_iter() {
                    FileRow {
                        key: "{file.uuid}",
                        file,
                        disabled: loading,
                        on_delete: {
                            let backend = backend.clone();
                            move |uuid: String| {
                                spawn(delete_one(backend.clone(), call, store, uuid));
                            }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn FileRow(file: FileMetadata, disabled: bool, on_delete: EventHandler<String>) -> Element {
    let uploaded = format_upload_date(file.upload_date);
    let size = format_size(file.file_size);
    let errors = file
        .processing_errors
        .as_ref()
        .filter(|errors| !errors.is_empty())
        .map(|errors| errors.join("; "));
    let uuid = file.uuid.clone();

    rsx! {
        div { class: "file-row",
            div { class: "file-details",
                span { class: "file-name", "{file.original_filename}" }
                span { class: "text-muted", "Uploaded {uploaded} · {size}" }
                if let Some(chunks) = file.chunks_count {
                    span { class: "text-muted", "{chunks} chunks" }
                }
                if let Some(errors) = errors {
                    span { class: "text-error", "{errors}" }
                }
            }
            span { class: status_class(file.status), "{file.status.label()}" }
            button {
                class: "btn btn-ghost",
                title: "Delete",
                aria_label: "Delete file",
                disabled,
                onclick: move |_| on_delete.call(uuid.clone()),
                dangerous_inner_html: "&times;"
            }
        }
    }
}
