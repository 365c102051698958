//! Named breakers, one per logical resource.
//!
//! # Responsibilities
//! - Create breakers on first use from a template configuration
//! - Look breakers up by name for the HTTP layer and the admin API
//!
//! # Design Decisions
//! - Breakers are independent; the registry never coordinates them
//! - Template is validated once, up front

use std::sync::Arc;

use dashmap::DashMap;

use crate::config::{validate_breaker, BreakerConfig, ConfigError};
use crate::resilience::circuit_breaker::{Breaker, Snapshot};

/// Concurrent map of breakers keyed by name.
#[derive(Debug)]
pub struct BreakerRegistry {
    template: BreakerConfig,
    breakers: DashMap<String, Arc<Breaker>>,
}

impl BreakerRegistry {
    /// Create a registry whose breakers copy `template` apart from the name.
    pub fn new(template: BreakerConfig) -> Result<Self, ConfigError> {
        validate_breaker(&template).map_err(ConfigError::Validation)?;
        Ok(Self {
            template,
            breakers: DashMap::new(),
        })
    }

    /// Register a breaker built elsewhere, replacing any with the same name.
    pub fn insert(&self, breaker: Arc<Breaker>) {
        self.breakers.insert(breaker.name().to_string(), breaker);
    }

    pub fn get(&self, name: &str) -> Option<Arc<Breaker>> {
        self.breakers.get(name).map(|entry| entry.value().clone())
    }

    /// Fetch the named breaker, creating it from the template if absent.
    pub fn get_or_create(&self, name: &str) -> Result<Arc<Breaker>, ConfigError> {
        if let Some(existing) = self.get(name) {
            return Ok(existing);
        }

        let config = BreakerConfig {
            name: name.to_string(),
            ..self.template.clone()
        };
        let breaker = Arc::new(Breaker::from_config(&config)?);
        let entry = self
            .breakers
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::info!(name = %name, "Breaker registered");
                breaker
            });
        Ok(entry.value().clone())
    }

    /// Snapshots of every breaker, sorted by name.
    pub fn snapshots(&self) -> Vec<Snapshot> {
        let mut snapshots: Vec<_> = self
            .breakers
            .iter()
            .map(|entry| entry.value().snapshot())
            .collect();
        snapshots.sort_by(|a, b| a.name.cmp(&b.name));
        snapshots
    }

    pub fn len(&self) -> usize {
        self.breakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resilience::state::State;

    #[test]
    fn test_get_or_create_is_idempotent() {
        let registry = BreakerRegistry::new(BreakerConfig::default()).unwrap();
        let a = registry.get_or_create("orders").unwrap();
        let b = registry.get_or_create("orders").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.name(), "orders");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_breakers_are_independent() {
        let registry = BreakerRegistry::new(BreakerConfig::default()).unwrap();
        registry.get_or_create("a").unwrap().open();
        registry.get_or_create("b").unwrap();

        let snapshots = registry.snapshots();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].name, "a");
        assert_eq!(snapshots[0].state, State::Open);
        assert_eq!(snapshots[1].state, State::Closed);
    }

    #[test]
    fn test_invalid_template() {
        let template = BreakerConfig {
            timeout_secs: 0,
            ..BreakerConfig::default()
        };
        assert!(BreakerRegistry::new(template).is_err());
    }
}
