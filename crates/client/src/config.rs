//! Client configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

const APP_NAME: &str = "chronicle";

/// Everything the client needs to assemble a session.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding `rpg_save_{code}.json` files.
    pub save_dir: PathBuf,
    /// Directory for the client log file.
    pub log_dir: PathBuf,
    /// Save code to start with, if any.
    pub save_code: Option<String>,
    pub autosave: bool,
    /// Name given to freshly seeded characters.
    pub hero_name: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            save_dir: data_dir(),
            log_dir: log_dir(),
            save_code: None,
            autosave: true,
            hero_name: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CHRONICLE_SAVE_DIR` - Directory for save files (default: platform data dir)
    /// - `CHRONICLE_LOG_DIR` - Directory for the log file (default: platform cache dir)
    /// - `CHRONICLE_SAVE_CODE` - Save code to start with (default: none)
    /// - `CHRONICLE_AUTOSAVE` - Save after every change (default: true)
    /// - `CHRONICLE_HERO_NAME` - Name for new characters (default: "Unnamed Hero")
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("CHRONICLE_SAVE_DIR") {
            config.save_dir = dir;
        }

        if let Some(dir) = read_env::<PathBuf>("CHRONICLE_LOG_DIR") {
            config.log_dir = dir;
        }

        config.save_code = env::var("CHRONICLE_SAVE_CODE")
            .ok()
            .filter(|code| !code.trim().is_empty());

        if let Some(enable) = read_env_bool("CHRONICLE_AUTOSAVE") {
            config.autosave = enable;
        }

        config.hero_name = env::var("CHRONICLE_HERO_NAME")
            .ok()
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty());

        config
    }
}

/// Platform data directory, falling back to `./save_data`.
fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Platform cache directory for logs, falling back to `./logs`.
fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    parse_bool(&env::var(key).ok()?)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
