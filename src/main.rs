use cv_screener::config::{ApiConfig, EnvSnapshot};
use tracing::Level;

/// Bundled config for builds that ship without a .env file
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    // First try to load from .env file (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }

    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {
    load_bundled_config();
}

fn load_bundled_config() {
    for line in BUNDLED_CONFIG.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim();
            // Only set if not already set (allow env override)
            if std::env::var(key).is_err() {
                // SAFETY: We're setting env vars at startup before any threads are spawned
                unsafe {
                    std::env::set_var(key, value);
                }
            }
        }
    }
}

fn init_tracing(config: &ApiConfig) {
    let level = if config.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();
}

fn main() {
    load_dotenv();
    let config = ApiConfig::resolve(&EnvSnapshot::from_process());
    init_tracing(&config);
    tracing::info!(
        base_url = %config.base_url,
        mode = config.mode.name(),
        debug = config.debug,
        "starting CV screener"
    );
    dioxus::launch(cv_screener::ui::App);
}
