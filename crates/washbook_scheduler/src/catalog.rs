// --- File: crates/washbook_scheduler/src/catalog.rs ---
//! Fixed catalog of bookable services and their durations.

use chrono::Duration;
use serde::Serialize;
use tracing::debug;
use washbook_config::SchedulerConfig;

/// Duration applied to service names the catalog does not know.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// A bookable service with a fixed duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceType {
    pub name: String,
    pub duration_minutes: u32,
}

impl ServiceType {
    pub fn new(name: &str, duration_minutes: u32) -> Self {
        Self {
            name: name.to_string(),
            duration_minutes,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }
}

/// Immutable lookup table from service name to duration.
///
/// Lookups never fail: unknown names resolve to the default duration.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    services: Vec<ServiceType>,
    default_duration_minutes: u32,
}

impl ServiceCatalog {
    pub fn new(services: Vec<ServiceType>, default_duration_minutes: u32) -> Self {
        Self {
            services,
            default_duration_minutes,
        }
    }

    /// The stock catalog: Basic Wash, Interior Clean and Full Detail.
    pub fn builtin() -> Self {
        Self::new(
            vec![
                ServiceType::new("Basic Wash", 60),
                ServiceType::new("Interior Clean", 90),
                ServiceType::new("Full Detail", 180),
            ],
            DEFAULT_DURATION_MINUTES,
        )
    }

    pub fn from_config(config: &SchedulerConfig) -> Self {
        let services = config
            .services
            .iter()
            .map(|service| ServiceType::new(&service.name, service.duration_minutes))
            .collect();
        Self::new(services, config.default_duration_minutes)
    }

    pub fn get(&self, name: &str) -> Option<&ServiceType> {
        self.services.iter().find(|service| service.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn duration_minutes_of(&self, name: &str) -> u32 {
        match self.get(name) {
            Some(service) => service.duration_minutes,
            None => {
                debug!(
                    "Unknown service '{}', using default duration of {} minutes",
                    name, self.default_duration_minutes
                );
                self.default_duration_minutes
            }
        }
    }

    pub fn duration_of(&self, name: &str) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes_of(name)))
    }

    pub fn services(&self) -> &[ServiceType] {
        &self.services
    }

    pub fn default_duration_minutes(&self) -> u32 {
        self.default_duration_minutes
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use washbook_config::ServiceTypeConfig;

    #[test]
    fn test_builtin_durations() {
        let catalog = ServiceCatalog::builtin();
        assert_eq!(catalog.duration_of("Basic Wash"), Duration::minutes(60));
        assert_eq!(catalog.duration_of("Interior Clean"), Duration::minutes(90));
        assert_eq!(catalog.duration_of("Full Detail"), Duration::minutes(180));
    }

    #[test]
    fn test_unknown_service_uses_default() {
        let catalog = ServiceCatalog::builtin();
        assert!(!catalog.contains("Ceramic Coating"));
        assert_eq!(catalog.duration_of("Ceramic Coating"), Duration::minutes(60));
        // lookups are case sensitive
        assert_eq!(catalog.duration_minutes_of("basic wash"), 60);
    }

    #[test]
    fn test_from_config() {
        let config = SchedulerConfig {
            default_duration_minutes: 120,
            time_zone: "UTC".to_string(),
            services: vec![ServiceTypeConfig::new("Quick Rinse", 20)],
        };
        let catalog = ServiceCatalog::from_config(&config);
        assert_eq!(catalog.services(), &[ServiceType::new("Quick Rinse", 20)]);
        assert_eq!(catalog.duration_minutes_of("Quick Rinse"), 20);
        assert_eq!(catalog.duration_minutes_of("Basic Wash"), 120);
    }
}
