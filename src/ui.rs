use crate::state::Store;
use crate::theme::{BASE_CSS, ThemeMode, theme_css};
use crate::views::shared::{Backend, ErrorBanner};
use crate::views::{ApiDebugPanel, ChatView, DashboardView, UploadView};
use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppTab {
    Dashboard,
    Upload,
    Chat,
}

#[component]
pub fn App() -> Element {
    let backend = use_hook(Backend::from_env);
    let store = use_signal(Store::new);
    let active_tab = use_signal(|| AppTab::Dashboard);
    let theme = use_signal(ThemeMode::default);

    rsx! {
        ThemeStyles { theme }
        AppHeader { active_tab, theme }
        match backend {
            Ok(backend) => rsx! {
                TabPanels { backend: backend.clone(), store, active_tab }
                ApiDebugPanel { backend }
            },
            Err(message) => rsx! {
                div { class: "main-container",
                    ErrorBanner { message }
                }
            },
        }
    }
}

#[component]
fn ThemeStyles(theme: Signal<ThemeMode>) -> Element {
    rsx! {
        style { dangerous_inner_html: "{BASE_CSS}" }
        style { dangerous_inner_html: "{theme_css(theme())}" }
    }
}

#[component]
fn AppHeader(active_tab: Signal<AppTab>, theme: Signal<ThemeMode>) -> Element {
    let mut theme = theme;
    let toggle_label = match theme() {
        ThemeMode::Light => "Dark",
        ThemeMode::Dark => "Light",
    };
    rsx! {
        div { class: "header",
            h1 { class: "header-title", "CV Screener" }
            TabNavigation { active_tab }
            button {
                class: "btn btn-ghost",
                onclick: move |_| theme.set(theme().toggled()),
                "{toggle_label}"
            }
        }
    }
}

#[component]
fn TabPanels(backend: Backend, store: Signal<Store>, active_tab: Signal<AppTab>) -> Element {
    rsx! {
        div { class: "tab-panels",
            TabPanel {
                active_tab,
                tab: AppTab::Dashboard,
                children: rsx!( DashboardView { backend: backend.clone(), store, active_tab } ),
            }
            TabPanel {
                active_tab,
                tab: AppTab::Upload,
                children: rsx!( UploadView { backend: backend.clone(), store } ),
            }
            TabPanel {
                active_tab,
                tab: AppTab::Chat,
                children: rsx!( ChatView { backend: backend.clone(), store } ),
            }
        }
    }
}

#[component]
fn TabPanel(active_tab: Signal<AppTab>, tab: AppTab, children: Element) -> Element {
    let is_active = active_tab() == tab;
    let class_suffix = if is_active { "active" } else { "" };
    rsx! {
        div {
            class: format_args!("tab-panel {}", class_suffix),
            aria_hidden: (!is_active).to_string(),
            {children}
        }
    }
}

#[component]
fn TabNavigation(active_tab: Signal<AppTab>) -> Element {
    rsx! {
        div { class: "tabs",
            TabButton { active_tab, tab: AppTab::Dashboard, label: "Dashboard" }
            TabButton { active_tab, tab: AppTab::Upload, label: "Upload" }
            TabButton { active_tab, tab: AppTab::Chat, label: "Chat" }
        }
    }
}

#[component]
fn TabButton(active_tab: Signal<AppTab>, tab: AppTab, label: &'static str) -> Element {
    let mut active_tab = active_tab;
    let class = if active_tab() == tab {
        "tab active"
    } else {
        "tab"
    };
    rsx! {
        h2 {
            class: class,
            onclick: move |_| active_tab.set(tab),
            "{label}"
        }
    }
}
