//! Runtime configuration.
//!
//! Values come from an optional JSON file named by `PARKING_CONFIG_FILE`,
//! then from `PARKING_CAPACITY` and `PARKING_BIND_ADDR`, which override
//! anything the file sets.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CAPACITY: usize = 20;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilityConfig {
    /// Number of spaces in the lot.
    pub capacity: usize,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl FacilityConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("PARKING_CONFIG_FILE") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(raw) = lookup("PARKING_CAPACITY") {
            config.capacity = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidCapacity(raw.clone()))?;
        }
        if let Some(addr) = lookup("PARKING_BIND_ADDR") {
            config.bind_addr = addr;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidCapacity(self.capacity.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = FacilityConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, FacilityConfig::default());
        assert_eq!(config.capacity, 20);
    }

    #[test]
    fn test_env_overrides() {
        let config = FacilityConfig::from_lookup(lookup(&[
            ("PARKING_CAPACITY", "5"),
            ("PARKING_BIND_ADDR", "0.0.0.0:8080"),
        ]))
        .unwrap();
        assert_eq!(config.capacity, 5);
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_capacity() {
        for raw in ["0", "-3", "many"] {
            let err = FacilityConfig::from_lookup(lookup(&[("PARKING_CAPACITY", raw)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidCapacity(_)), "{raw}");
        }
    }

    #[test]
    fn test_file_then_env() {
        let path = std::env::temp_dir().join(format!("parking_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"capacity": 7, "bind_addr": "127.0.0.1:4000"}"#).unwrap();
        let path_str = path.display().to_string();

        let config = FacilityConfig::from_lookup(lookup(&[("PARKING_CONFIG_FILE", path_str.as_str())])).unwrap();
        assert_eq!(config.capacity, 7);
        assert_eq!(config.bind_addr, "127.0.0.1:4000");

        let config = FacilityConfig::from_lookup(lookup(&[
            ("PARKING_CONFIG_FILE", path_str.as_str()),
            ("PARKING_CAPACITY", "3"),
        ]))
        .unwrap();
        assert_eq!(config.capacity, 3);
        assert_eq!(config.bind_addr, "127.0.0.1:4000");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = FacilityConfig::from_lookup(lookup(&[(
            "PARKING_CONFIG_FILE",
            "/nonexistent/parking.json",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
