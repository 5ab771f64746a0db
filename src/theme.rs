use crate::types::FileStatus;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

pub fn theme_css(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => LIGHT_THEME,
        ThemeMode::Dark => DARK_THEME,
    }
}

/// Pill class for a file's processing status.
pub fn status_class(status: FileStatus) -> &'static str {
    match status {
        FileStatus::Uploaded => "status-pill status-uploaded",
        FileStatus::Processing => "status-pill status-processing",
        FileStatus::Processed => "status-pill status-processed",
        FileStatus::Error => "status-pill status-error",
    }
}

pub const BASE_CSS: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: 'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; background: var(--color-bg-primary); color: var(--color-text-primary); }
.header { display: flex; align-items: center; justify-content: space-between; padding: 0.75rem 1.5rem; border-bottom: 1px solid var(--color-border); }
.header-title { font-size: 1.25rem; font-weight: 700; margin: 0; }
.tabs { display: flex; gap: 1rem; }
.tab { cursor: pointer; font-size: 1rem; margin: 0; color: var(--color-text-muted); }
.tab.active { color: var(--color-accent); }
.tab-panel { display: none; }
.tab-panel.active { display: block; }
.main-container { max-width: 960px; margin: 0 auto; padding: 1.5rem; }
.page-header { display: flex; flex-wrap: wrap; align-items: baseline; gap: 0.75rem; margin-bottom: 1rem; }
.page-header h2 { margin: 0; }
.text-muted { color: var(--color-text-muted); }
.text-error { color: var(--color-error); }
.btn { border: 1px solid var(--color-border); background: transparent; color: var(--color-text-primary); padding: 0.5rem 1rem; border-radius: 8px; cursor: pointer; font-weight: 600; }
.btn-primary { background: var(--color-accent); border-color: var(--color-accent); color: #ffffff; }
.btn-ghost { border-color: transparent; }
.btn:disabled { opacity: 0.5; cursor: default; }
.error-banner { border: 1px solid var(--color-error); color: var(--color-error); padding: 0.75rem 1rem; border-radius: 8px; margin: 0.75rem 0; }
.success-banner { border: 1px solid var(--color-success); color: var(--color-success); padding: 0.75rem 1rem; border-radius: 8px; margin: 0.75rem 0; }
.stats-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 1rem; }
.stat-card { display: flex; flex-direction: column; padding: 1rem; border: 1px solid var(--color-border); border-radius: 8px; background: var(--color-surface); }
.stat-value { font-size: 1.75rem; font-weight: 700; }
.panel-row { display: grid; grid-template-columns: 2fr 1fr; gap: 1rem; margin-top: 1rem; }
.panel { display: flex; flex-direction: column; gap: 0.5rem; padding: 1rem; border: 1px solid var(--color-border); border-radius: 8px; background: var(--color-surface); }
.file-row { display: flex; align-items: center; gap: 0.75rem; padding: 0.5rem 0; border-bottom: 1px solid var(--color-border); }
.file-details { display: flex; flex-direction: column; flex: 1; }
.file-name { font-weight: 600; }
.status-pill { font-size: 0.75rem; padding: 0.15rem 0.6rem; border-radius: 999px; }
.status-uploaded { background: var(--color-surface-muted); }
.status-processing { background: #fef3c7; color: #92400e; }
.status-processed { background: #dcfce7; color: #166534; }
.status-error { background: #fee2e2; color: #991b1b; }
.backend-status.online { color: var(--color-success); }
.backend-status.offline { color: var(--color-error); }
.backend-status.checking { color: #ca8a04; }
.upload-area { border: 2px dashed var(--color-border); border-radius: 8px; padding: 2rem; text-align: center; margin-bottom: 1rem; }
.chat-list { display: flex; flex-direction: column; gap: 0.75rem; min-height: 320px; max-height: 60vh; overflow-y: auto; }
.message-row { display: flex; }
.message-row.user { justify-content: flex-end; }
.message-stack { max-width: 75%; display: flex; flex-direction: column; gap: 0.25rem; }
.bubble { padding: 0.6rem 0.9rem; border-radius: 12px; }
.bubble.user { background: var(--color-chat-user-bg); color: var(--color-chat-user-text); }
.bubble.assistant { background: var(--color-chat-assistant-bg); color: var(--color-chat-assistant-text); }
.bubble.error { border: 1px solid var(--color-error); }
.bubble-tags { display: flex; flex-wrap: wrap; gap: 0.25rem; }
.tag-pill { font-size: 0.75rem; padding: 0.1rem 0.5rem; border-radius: 999px; border: 1px solid var(--color-border); }
.message-meta { display: flex; gap: 0.5rem; font-size: 0.75rem; color: var(--color-text-muted); }
.message-meta.align-end { justify-content: flex-end; }
.composer { margin-top: 1rem; }
.composer textarea { flex: 1; resize: none; padding: 0.6rem; border-radius: 8px; border: 1px solid var(--color-border); background: var(--color-surface); color: var(--color-text-primary); }
.hstack { display: flex; }
.shimmer-text { color: var(--color-text-muted); font-style: italic; }
.debug-panel { position: fixed; bottom: 1rem; right: 1rem; max-width: 22rem; padding: 0.75rem 1rem; border: 1px solid var(--color-border); border-radius: 8px; background: var(--color-surface); font-size: 0.85rem; }
.debug-header { display: flex; gap: 0.5rem; cursor: pointer; justify-content: space-between; }
.debug-info dt { font-weight: 600; }
.debug-info dd { margin: 0 0 0.4rem 0; word-break: break-all; }
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #f9fafb;
    --color-surface: #ffffff;
    --color-surface-muted: #f3f4f6;
    --color-text-primary: #111827;
    --color-text-muted: #6b7280;
    --color-border: #e5e7eb;
    --color-accent: #2563eb;
    --color-error: #dc2626;
    --color-success: #16a34a;
    --color-chat-user-bg: #2563eb;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #f3f4f6;
    --color-chat-assistant-text: #111827;
}
"#;

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #000000;
    --color-surface: #050505;
    --color-surface-muted: #111111;
    --color-text-primary: #ffffff;
    --color-text-muted: #cfcfcf;
    --color-border: #2a2a2a;
    --color-accent: #ff3509;
    --color-error: #f87171;
    --color-success: #4ade80;
    --color-chat-user-bg: #ffffff;
    --color-chat-user-text: #000000;
    --color-chat-assistant-bg: #111111;
    --color-chat-assistant-text: #ffffff;
}
"#;
