use std::path::PathBuf;
use tracing::info;

use crate::error::{ImportError, Result};

pub const AUDIT_LOG_DIR: &str = "AUDIT_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub audit_log_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            audit_log_dir: PathBuf::from("."),
        }
    }
}

/// Loads `.env` from the working directory if present, then reads settings
/// from the environment. Variables already set in the process win over `.env`.
pub fn load_settings() -> Result<Settings> {
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded settings from {:?}", path),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(ImportError::Config(format!("invalid .env file: {}", e))),
    }

    settings_from(|key| std::env::var(key).ok())
}

fn settings_from<F>(lookup: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::default();
    if let Some(dir) = lookup(AUDIT_LOG_DIR) {
        if dir.is_empty() {
            return Err(ImportError::Config(format!("{} is empty", AUDIT_LOG_DIR)));
        }
        settings.audit_log_dir = PathBuf::from(dir);
    }
    Ok(settings)
}
