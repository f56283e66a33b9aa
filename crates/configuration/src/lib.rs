use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{DatabaseSettings, LoggingSettings, Secret, ServerArgs, ServerSettings, Settings};

/// The optional settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "dashboard.toml";

/// Loads the application settings once at startup.
///
/// A `.env` file is loaded first if present, then defaults, `dashboard.toml`,
/// `DASHBOARD__*` variables and finally the conventional flat variables
/// (`PORT`, `DATABASE_URL`, `DB_HOST`, ...) are layered on top of each other.
pub fn load_settings() -> Result<Settings, ConfigError> {
    // A missing .env is normal in production, where the real environment is used.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(ConfigError::ValidationError(format!("unreadable .env file: {e}")));
        }
    }

    let env: HashMap<String, String> = std::env::vars().collect();
    let file = Path::new(SETTINGS_FILE);
    let settings = Settings::build(file.exists().then_some(file), &env)?;
    tracing::debug!(
        host = %settings.server.host,
        port = settings.server.port,
        database = %settings.database.name,
        "Settings loaded."
    );
    Ok(settings)
}
