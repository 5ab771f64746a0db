use crate::api::execute;
use crate::state::Store;
use crate::types::{ChatMessage, Role};
use crate::views::shared::{
    Backend, ErrorBanner, format_message_time, markdown_to_html, use_api_call,
};
use dioxus::events::Key;
use dioxus::prelude::*;

const SCROLL_TO_LATEST_JS: &str =
    "document.getElementById('chat-end')?.scrollIntoView({ behavior: 'smooth' });";

const CAPABILITIES: &[&str] = &[
    "Matching CVs against job descriptions",
    "Recommendations for improving CVs",
    "Comparisons between candidates",
    "Trends across the uploaded CVs",
];

fn role_class(role: &Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

fn confidence_label(confidence: f32) -> String {
    format!("{:.0}% confidence", confidence * 100.0)
}

#[component]
pub fn ChatView(backend: Backend, store: Signal<Store>) -> Element {
    let mut store = store;
    let mut input = use_signal(String::new);
    let call = use_api_call();
    // Signal handle keeps the send closure `Copy` for both input handlers.
    let backend = use_signal(|| backend.clone());

    use_effect(move || {
        let _count = store.read().state().chat_messages.len();
        let _ = document::eval(SCROLL_TO_LATEST_JS);
    });

    let mut send_message = {
        let mut input = input;
        move |text: String| {
            let trimmed = text.trim().to_string();
            if trimmed.is_empty() || (call.loading)() {
                return;
            }

            store.with_mut(|s| s.add_chat_message(ChatMessage::user(trimmed.clone())));
            input.set(String::new());

            let backend = backend();
            spawn(async move {
                let reply = match execute(call, backend.api.send_chat_message(&trimmed)).await {
                    Ok(response) => ChatMessage::assistant_with_sources(
                        response.response,
                        response.source_files,
                        response.confidence,
                    ),
                    Err(err) => ChatMessage::assistant_error(format!(
                        "Sorry, I could not answer that. {err}"
                    )),
                };
                store.with_mut(|s| s.add_chat_message(reply));
            });
        }
    };

    let messages = store.read().state().chat_messages.clone();
    let sending = (call.loading)();

    rsx! {
        div { class: "main-container",
            div { class: "page-header",
                h2 { "AI Chat" }
                p { class: "text-muted", "Ask questions about the processed CVs" }
                if !messages.is_empty() {
                    button {
                        class: "btn btn-ghost",
                        disabled: sending,
                        onclick: move |_| store.with_mut(|s| s.clear_chat_messages()),
                        "Clear chat"
                    }
                }
            }
            div { class: "chat-wrap",
                div { id: "chat-list", class: "chat-list",
                    if messages.is_empty() {
                        div { class: "chat-empty",
                            p { "Hi! I am your AI assistant for CV analysis. I can help with:" }
                            ul {
                                for item in CAPABILITIES.iter() {
                                    li { "{item}" }
                                }
                            }
                        }
                    }
                    for msg in messages.into_iter() {
                        MessageRow { key: "{msg.id}", msg }
                    }
                    if sending {
                        div { class: "message-row assistant",
                            div { class: "shimmer-line",
                                span { class: "shimmer-text", "Thinking…" }
                            }
                        }
                    }
                    div { id: "chat-end" }
                }
            }
            if let Some(message) = (call.error)() {
                ErrorBanner { message }
            }
            form { class: "composer no-divider",
                div { class: "composer-inner",
                    div { class: "hstack", style: "gap: 0.5rem; width: 100%; align-items: flex-end;",
                        textarea {
                            rows: "1",
                            placeholder: "Type your message…",
                            value: "{input}",
                            oninput: move |ev| input.set(ev.value()),
                            onkeydown: move |ev| {
                                if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                    ev.prevent_default();
                                    let text = input();
                                    send_message(text);
                                }
                            },
                            disabled: sending,
                            autofocus: true,
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: sending || input().trim().is_empty(),
                            onclick: move |_| {
                                let text = input();
                                send_message(text);
                            },
                            "Send"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MessageRow(msg: ChatMessage) -> Element {
    let role = role_class(&msg.role);
    let time = format_message_time(msg.timestamp);
    let sources = msg.sources.clone().unwrap_or_default();
    let bubble_class = if msg.is_error {
        format!("bubble {role} error")
    } else {
        format!("bubble {role}")
    };

    rsx! {
        div { class: format_args!("message-row {}", role),
            div { class: "message-stack",
                div { class: "{bubble_class}",
                    if matches!(msg.role, Role::Assistant) && !msg.is_error {
                        div { class: "md", dangerous_inner_html: "{markdown_to_html(&msg.content)}" }
                    } else {
                        "{msg.content}"
                    }
                }
                if !sources.is_empty() {
                    div { class: "bubble-tags",
                        for source in sources.iter() {
                            span { class: "tag-pill tag-pill-compact", "{source}" }
                        }
                    }
                }
                div { class: format_args!("message-meta {}", if msg.role == Role::User { "align-end" } else { "align-start" }),
                    span { class: "message-timestamp", "{time}" }
                    if let Some(confidence) = msg.confidence {
                        span { class: "message-metrics", "{confidence_label(confidence)}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_confidence_as_percentage() {
        assert_eq!(confidence_label(0.873), "87% confidence");
        assert_eq!(confidence_label(1.0), "100% confidence");
    }
}
