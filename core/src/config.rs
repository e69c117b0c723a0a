//! Tracker configuration persistence.
//!
//! The config type itself lives in tickmeter-types so frontends can share it;
//! this module adds confy-backed load/save.

use thiserror::Error;

pub use tickmeter_types::TrackerConfig;

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),
}

/// Extension trait for TrackerConfig persistence
pub trait TrackerConfigExt: Sized {
    fn load() -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
}

impl TrackerConfigExt for TrackerConfig {
    fn load() -> Result<Self, ConfigError> {
        confy::load("tickmeter", "config").map_err(ConfigError::Load)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store("tickmeter", "config", self.clone()).map_err(ConfigError::Save)
    }
}
