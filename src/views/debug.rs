use crate::config::check_backend_health;
use crate::views::shared::Backend;
use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BackendStatus {
    Checking,
    Online,
    Offline,
}

impl BackendStatus {
    fn label(self) -> &'static str {
        match self {
            BackendStatus::Checking => "checking",
            BackendStatus::Online => "online",
            BackendStatus::Offline => "offline",
        }
    }
}

/// Connection details overlay; rendered in development mode only.
#[component]
pub fn ApiDebugPanel(backend: Backend) -> Element {
    let info = backend.config().debug_info(&backend.env);
    let mut status = use_signal(|| BackendStatus::Checking);
    let mut expanded = use_signal(|| false);

    {
        let config = backend.config().clone();
        let is_development = info.is_development;
        use_hook(move || {
            if is_development {
                spawn(async move {
                    let online = check_backend_health(&config).await;
                    status.set(if online {
                        BackendStatus::Online
                    } else {
                        BackendStatus::Offline
                    });
                });
            }
        });
    }

    if !info.is_development {
        return rsx! {};
    }

    let current = status();

    rsx! {
        div { class: "debug-panel",
            div { class: "debug-header", onclick: move |_| expanded.set(!expanded()),
                span { class: "debug-title", "API Debug" }
                span { class: format_args!("backend-status {}", current.label()), "{current.label()}" }
                span { class: "text-muted", if expanded() { "▼" } else { "▶" } }
            }
            if expanded() {
                dl { class: "debug-info",
                    dt { "Environment" }
                    dd { "{info.environment}" }
                    dt { "Base URL" }
                    dd { "{info.base_url}" }
                    dt { "Backend URL" }
                    dd { "{info.backend_url}" }
                    dt { "Proxy" }
                    dd { if info.proxy_enabled { "enabled" } else { "disabled" } }
                    dt { "Timeout" }
                    dd { "{backend.config().timeout.as_millis()} ms" }
                }
            }
        }
    }
}
