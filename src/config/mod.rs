mod structs;

use log::warn;
pub use structs::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    Json,
    InvalidAddress(u8),
}

impl G3Config {
    /// Parses a JSON object, missing fields keep their defaults.
    pub fn from_json(body: &[u8]) -> Result<Self, ConfigError> {
        let Ok((config, _)) = serde_json_core::from_slice::<G3Config>(body) else {
            warn!("error decoding g3 config json");
            return Err(ConfigError::Json);
        };

        if !config.validate() {
            warn!("g3 config has invalid bus address {:#04x}", config.address);
            return Err(ConfigError::InvalidAddress(config.address));
        }

        Ok(config)
    }
}
