//! Tether Services Layer
//!
//! Process-wide settings, initialized once at startup.

pub mod settings;

pub use settings::{DemoSettings, RuntimeSettings, Settings, SettingsError};

use once_cell::sync::OnceCell;
use thiserror::Error;

static SETTINGS: OnceCell<Settings> = OnceCell::new();

#[derive(Debug, Error)]
pub enum ServicesError {
    #[error("services are already initialized")]
    AlreadyInitialized,
}

/// Install the process-wide settings. Can only be done once.
pub fn init_services(settings: Settings) -> Result<(), ServicesError> {
    SETTINGS
        .set(settings)
        .map_err(|_| ServicesError::AlreadyInitialized)?;
    tracing::debug!("services initialized");
    Ok(())
}

/// The installed settings, or the defaults if `init_services` never ran.
pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(Settings::default)
}
