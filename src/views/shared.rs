use crate::api::{ApiResult, CallStatusSink, CvScreenerApi, execute};
use crate::api::models::FileStats;
use crate::config::{ApiConfig, EnvSnapshot};
use crate::state::Store;
use comrak::{ComrakOptions, markdown_to_html as render_markdown};
use dioxus::prelude::*;
use once_cell::sync::Lazy;
use std::time::Duration;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const PROCESSING_POLL_INTERVAL: Duration = Duration::from_secs(5);

static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.extension.autolink = true;
    options
});

const UPLOAD_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:short] [day padding:zero], [year]");

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

/// Backend handle and the environment it was resolved from.
#[derive(Clone)]
pub struct Backend {
    pub api: CvScreenerApi,
    pub env: EnvSnapshot,
}

impl Backend {
    pub fn from_env() -> Result<Self, String> {
        let env = EnvSnapshot::from_process();
        let config = ApiConfig::resolve(&env);
        let api = CvScreenerApi::from_config(config).map_err(|err| err.to_string())?;
        Ok(Self { api, env })
    }

    pub fn config(&self) -> &ApiConfig {
        self.api.config()
    }
}

impl PartialEq for Backend {
    fn eq(&self, other: &Self) -> bool {
        self.config() == other.config()
    }
}

/// Screen-local loading/error flags fed by [`execute`].
#[derive(Clone, Copy, PartialEq)]
pub struct ApiCall {
    pub loading: Signal<bool>,
    pub error: Signal<Option<String>>,
}

pub fn use_api_call() -> ApiCall {
    ApiCall {
        loading: use_signal(|| false),
        error: use_signal(|| None),
    }
}

impl CallStatusSink for ApiCall {
    fn begin(&mut self) {
        self.loading.set(true);
        self.error.set(None);
    }

    fn fail(&mut self, message: String) {
        self.error.set(Some(message));
    }

    fn finish(&mut self) {
        self.loading.set(false);
    }
}

/// Global loading/error flags of the shared store.
#[derive(Clone, Copy)]
pub struct StoreStatus(pub Signal<Store>);

impl CallStatusSink for StoreStatus {
    fn begin(&mut self) {
        self.0.with_mut(|store| {
            store.set_loading(true);
            store.set_error(None);
        });
    }

    fn fail(&mut self, message: String) {
        self.0.with_mut(|store| store.set_error(Some(message)));
    }

    fn finish(&mut self) {
        self.0.with_mut(|store| store.set_loading(false));
    }
}

/// Replaces the store's file list with the backend listing.
pub async fn refresh_files(api: &CvScreenerApi, store: Signal<Store>) -> ApiResult<FileStats> {
    let mut store = store;
    let listing = execute(StoreStatus(store), api.list_cvs()).await?;
    tracing::debug!(total = listing.total, "file list refreshed");
    store.with_mut(|s| s.set_files(listing.files));
    Ok(listing.stats)
}

/// Re-reads the listing while any CV is still waiting on the backend.
pub fn use_processing_poll(backend: Backend, store: Signal<Store>) {
    use_future(move || {
        let backend = backend.clone();
        async move {
            loop {
                tokio::time::sleep(PROCESSING_POLL_INTERVAL).await;
                let pending = store.peek().state().has_pending_files();
                if pending {
                    let _ = refresh_files(&backend.api, store).await;
                }
            }
        }
    });
}

pub fn markdown_to_html(md: &str) -> String {
    render_markdown(md, &MARKDOWN_OPTIONS)
}

pub fn format_upload_date(date: OffsetDateTime) -> String {
    date.to_offset(local_offset())
        .format(UPLOAD_DATE_FORMAT)
        .unwrap_or_else(|_| "Unknown date".to_string())
}

pub fn format_message_time(timestamp: OffsetDateTime) -> String {
    timestamp
        .to_offset(local_offset())
        .format(MESSAGE_TIME_FORMAT)
        .unwrap_or_default()
}

fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.0} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

#[component]
pub fn ErrorBanner(message: String) -> Element {
    rsx! {
        div { class: "error-banner", role: "alert", "{message}" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sizes() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn renders_markdown_tables() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }
}
