use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: ComponentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub details: BTreeMap<String, Value>,
}

impl ComponentHealth {
    pub fn healthy(response_time_ms: u64) -> Self {
        Self {
            status: ComponentStatus::Healthy,
            message: None,
            response_time_ms: Some(response_time_ms),
            details: BTreeMap::new(),
        }
    }

    pub fn degraded<S: Into<String>>(message: S, response_time_ms: Option<u64>) -> Self {
        Self {
            status: ComponentStatus::Degraded,
            message: Some(message.into()),
            response_time_ms,
            details: BTreeMap::new(),
        }
    }

    pub fn unhealthy<S: Into<String>>(message: S) -> Self {
        Self {
            status: ComponentStatus::Unhealthy,
            message: Some(message.into()),
            response_time_ms: None,
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail<K: Into<String>>(mut self, key: K, value: Value) -> Self {
        self.details.insert(key.into(), value);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: ComponentStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: BTreeMap<String, ComponentHealth>,
}

impl HealthCheckResponse {
    pub fn new(version: String, uptime_seconds: u64) -> Self {
        Self {
            status: ComponentStatus::Healthy,
            timestamp: Utc::now(),
            version,
            uptime_seconds,
            components: BTreeMap::new(),
        }
    }

    /// The overall status is the worst component status.
    pub fn add_component<S: Into<String>>(&mut self, name: S, health: ComponentHealth) {
        self.status = self.status.max(health.status);
        self.components.insert(name.into(), health);
    }

    pub fn is_healthy(&self) -> bool {
        self.status == ComponentStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_status_is_the_worst_component() {
        let mut response = HealthCheckResponse::new("0.1.0".to_string(), 5);
        response.add_component("database", ComponentHealth::healthy(3));
        assert!(response.is_healthy());

        response.add_component("storage", ComponentHealth::degraded("slow", Some(1500)));
        assert_eq!(response.status, ComponentStatus::Degraded);

        response.add_component("other", ComponentHealth::unhealthy("down"));
        response.add_component("last", ComponentHealth::healthy(1));
        assert_eq!(response.status, ComponentStatus::Unhealthy);
    }

    #[test]
    fn empty_details_are_omitted() {
        let json = serde_json::to_value(ComponentHealth::healthy(2)).unwrap();
        assert!(json.get("details").is_none());
        assert_eq!(json["status"], "healthy");
    }
}
