use crate::api::models::FileStats;
use crate::state::Store;
use crate::theme::status_class;
use crate::types::FileStatus;
use crate::ui::AppTab;
use crate::views::shared::{Backend, ErrorBanner, format_size, format_upload_date, refresh_files};
use dioxus::prelude::*;

const RECENT_LIMIT: usize = 5;

#[component]
pub fn DashboardView(backend: Backend, store: Signal<Store>, active_tab: Signal<AppTab>) -> Element {
    let mut active_tab = active_tab;
    let mut stats = use_signal(FileStats::default);
    let mut backend_online = use_signal(|| Option::<bool>::None);

    {
        let backend = backend.clone();
        use_effect(move || {
            let backend = backend.clone();
            spawn(async move {
                let (listing, health) =
                    futures::join!(refresh_files(&backend.api, store), backend.api.health_check());
                if let Ok(latest) = listing {
                    stats.set(latest);
                }
                backend_online.set(Some(health.is_ok()));
            });
        });
    }

    let state = store.read().state().clone();
    let processed = state
        .files
        .iter()
        .filter(|f| f.status == FileStatus::Processed)
        .count();
    let total_chunks: u32 = state.files.iter().filter_map(|f| f.chunks_count).sum();
    let status_label = match backend_online() {
        None => "checking",
        Some(true) => "online",
        Some(false) => "offline",
    };

    let cards = [
        ("CVs uploaded", state.files.len().to_string()),
        ("CVs processed", processed.to_string()),
        ("Job descriptions", state.job_descriptions.len().to_string()),
        ("Indexed chunks", total_chunks.to_string()),
    ];

    rsx! {
        div { class: "main-container",
            div { class: "page-header",
                h2 { "Dashboard" }
                p { class: "text-muted", "Overview of the AI CV screening system" }
                span { class: format_args!("backend-status {}", status_label), "Backend {status_label}" }
            }
            if let Some(message) = state.error.clone() {
                ErrorBanner { message }
            }
            div { class: "stats-grid",
                for (name, value) in cards.iter() {
                    div { key: "{name}", class: "stat-card",
                        span { class: "stat-name", "{name}" }
                        span { class: "stat-value", "{value}" }
                    }
                }
            }
            p { class: "text-muted", "Storage used: {format_size(stats().total_size_bytes)}" }
            div { class: "panel-row",
                div { class: "panel",
                    h3 { "Recent CVs" }
                    if state.files.is_empty() {
                        p { class: "text-muted", "No CVs uploaded yet." }
                    }
                    for file in state.files.iter().take(RECENT_LIMIT) {
                        div { key: "{file.uuid}", class: "file-row",
                            span { class: "file-name", "{file.original_filename}" }
                            span { class: "text-muted", "{format_upload_date(file.upload_date)}" }
                            span { class: status_class(file.status), "{file.status.label()}" }
                        }
                    }
                }
                div { class: "panel",
                    h3 { "Quick actions" }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| active_tab.set(AppTab::Upload),
                        "Upload a new CV"
                    }
                    button {
                        class: "btn",
                        onclick: move |_| active_tab.set(AppTab::Chat),
                        "Start an AI chat"
                    }
                    button {
                        class: "btn",
                        disabled: store.read().state().is_loading,
                        onclick: {
                            let backend = backend.clone();
                            move |_| {
                                let backend = backend.clone();
                                spawn(async move {
                                    if let Ok(latest) = refresh_files(&backend.api, store).await {
                                        stats.set(latest);
                                    }
                                });
                            }
                        },
                        "Refresh"
                    }
                }
            }
        }
    }
}
