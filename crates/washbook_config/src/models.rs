// --- File: crates/washbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use thiserror::Error;

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

// --- Service Catalog Entry ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServiceTypeConfig {
    pub name: String,
    pub duration_minutes: u32,
}

impl ServiceTypeConfig {
    pub fn new(name: &str, duration_minutes: u32) -> Self {
        Self {
            name: name.to_string(),
            duration_minutes,
        }
    }
}

// --- Scheduler Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SchedulerConfig {
    /// Duration used for service names missing from the catalog.
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,
    /// IANA zone used to read zone-less datetimes (e.g. from a `datetime-local` input).
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default = "default_services")]
    pub services: Vec<ServiceTypeConfig>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: default_duration_minutes(),
            time_zone: default_time_zone(),
            services: default_services(),
        }
    }
}

fn default_duration_minutes() -> u32 {
    60
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

fn default_services() -> Vec<ServiceTypeConfig> {
    vec![
        ServiceTypeConfig::new("Basic Wash", 60),
        ServiceTypeConfig::new("Interior Clean", 90),
        ServiceTypeConfig::new("Full Detail", 180),
    ]
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("default_duration_minutes must be positive")]
    ZeroDefaultDuration,
    #[error("service '{0}' must have a positive duration")]
    ZeroServiceDuration(String),
    #[error("service '{0}' is listed more than once")]
    DuplicateService(String),
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),
}

impl AppConfig {
    /// Checks invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let scheduler = &self.scheduler;
        if scheduler.default_duration_minutes == 0 {
            return Err(ConfigValidationError::ZeroDefaultDuration);
        }

        let mut seen = HashSet::new();
        for service in &scheduler.services {
            if service.duration_minutes == 0 {
                return Err(ConfigValidationError::ZeroServiceDuration(
                    service.name.clone(),
                ));
            }
            if !seen.insert(service.name.as_str()) {
                return Err(ConfigValidationError::DuplicateService(
                    service.name.clone(),
                ));
            }
        }

        chrono_tz::Tz::from_str(&scheduler.time_zone)
            .map_err(|_| ConfigValidationError::UnknownTimeZone(scheduler.time_zone.clone()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.scheduler.default_duration_minutes, 60);
        assert_eq!(config.scheduler.services.len(), 3);
        assert_eq!(config.server.port, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_default_duration() {
        let mut config = AppConfig::default();
        config.scheduler.default_duration_minutes = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroDefaultDuration)
        );
    }

    #[test]
    fn test_rejects_duplicate_service() {
        let mut config = AppConfig::default();
        config
            .scheduler
            .services
            .push(ServiceTypeConfig::new("Basic Wash", 45));
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::DuplicateService(
                "Basic Wash".to_string()
            ))
        );
    }

    #[test]
    fn test_rejects_zero_service_duration() {
        let mut config = AppConfig::default();
        config.scheduler.services = vec![ServiceTypeConfig::new("Quick Rinse", 0)];
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroServiceDuration(
                "Quick Rinse".to_string()
            ))
        );
    }

    #[test]
    fn test_rejects_unknown_time_zone() {
        let mut config = AppConfig::default();
        config.scheduler.time_zone = "Mars/Olympus_Mons".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::UnknownTimeZone(_))
        ));
    }
}
