//! Injectable product-analytics client.
//!
//! One [`AnalyticsClient`] is built at startup and passed to whatever needs
//! to record events. Vendors plug in through [`AnalyticsSink`].

use crate::config::GridConfig;
use crate::error::AnalyticsError;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Standard event names.
pub mod events {
    pub const PAGE_VIEW: &str = "Page View";
    pub const USER_LOGIN: &str = "User Login";
    pub const USER_LOGOUT: &str = "User Logout";
    pub const CUSTOMER_CREATED: &str = "Customer Created";
    pub const CUSTOMER_UPDATED: &str = "Customer Updated";
    pub const TASK_CREATED: &str = "Task Created";
    pub const TASK_UPDATED: &str = "Task Updated";
    pub const INSIGHT_VIEWED: &str = "Insight Viewed";
    pub const INSIGHT_ACTION: &str = "Insight Action";
    pub const INSIGHT_FILTER_CHANGED: &str = "Insight Filter Changed";
    pub const MEETING_SCHEDULED: &str = "Meeting Scheduled";
    pub const EMAIL_SENT: &str = "Email Sent";
    pub const GRID_CELL_SAVED: &str = "Grid Cell Saved";
    pub const GRID_SAVE_FAILED: &str = "Grid Save Failed";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
    pub token: Option<String>,
    pub enabled: bool,
    /// Reported as the `environment` property on every event.
    pub environment: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            token: None,
            enabled: false,
            environment: default_environment().to_string(),
        }
    }
}

impl AnalyticsConfig {
    pub fn from_grid_config(config: &GridConfig) -> Self {
        Self {
            token: config.analytics_token.clone(),
            enabled: config.analytics_enabled,
            ..Self::default()
        }
    }
}

fn default_environment() -> &'static str {
    if cfg!(debug_assertions) {
        "development"
    } else {
        "production"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub name: String,
    pub distinct_id: String,
    pub properties: Map<String, Value>,
}

/// Destination for analytics calls.
pub trait AnalyticsSink: Send + Sync {
    fn init(&self, _token: &str) -> Result<(), AnalyticsError> {
        Ok(())
    }

    fn track(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError>;

    fn identify(
        &self,
        distinct_id: &str,
        properties: &Map<String, Value>,
    ) -> Result<(), AnalyticsError>;

    fn reset(&self) -> Result<(), AnalyticsError> {
        Ok(())
    }
}

/// Writes events to the `tracing` log at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn track(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        let properties = serde_json::to_string(&event.properties)
            .map_err(|err| AnalyticsError::Sink(err.to_string()))?;
        info!(
            event = %event.name,
            distinct_id = %event.distinct_id,
            %properties,
            "analytics event"
        );
        Ok(())
    }

    fn identify(
        &self,
        distinct_id: &str,
        properties: &Map<String, Value>,
    ) -> Result<(), AnalyticsError> {
        info!(distinct_id, properties = properties.len(), "analytics identify");
        Ok(())
    }
}

/// Keeps every call in memory; used by tests and headless harnesses.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<AnalyticsEvent>>,
    identities: Mutex<Vec<(String, Map<String, Value>)>>,
    resets: Mutex<usize>,
}

fn recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("analytics memory sink mutex was poisoned; recovering");
            poisoned.into_inner()
        }
    }
}

impl MemorySink {
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        recover(&self.events).clone()
    }

    pub fn identities(&self) -> Vec<(String, Map<String, Value>)> {
        recover(&self.identities).clone()
    }

    pub fn reset_count(&self) -> usize {
        *recover(&self.resets)
    }
}

impl AnalyticsSink for MemorySink {
    fn track(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        recover(&self.events).push(event.clone());
        Ok(())
    }

    fn identify(
        &self,
        distinct_id: &str,
        properties: &Map<String, Value>,
    ) -> Result<(), AnalyticsError> {
        recover(&self.identities).push((distinct_id.to_string(), properties.clone()));
        Ok(())
    }

    fn reset(&self) -> Result<(), AnalyticsError> {
        *recover(&self.resets) += 1;
        Ok(())
    }
}

pub struct AnalyticsClient {
    config: AnalyticsConfig,
    sink: Arc<dyn AnalyticsSink>,
    initialized: bool,
    distinct_id: String,
    user_id: Option<String>,
}

impl std::fmt::Debug for AnalyticsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsClient")
            .field("enabled", &self.config.enabled)
            .field("initialized", &self.initialized)
            .field("distinct_id", &self.distinct_id)
            .finish()
    }
}

impl AnalyticsClient {
    pub fn new(config: AnalyticsConfig, sink: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            config,
            sink,
            initialized: false,
            distinct_id: anonymous_id(),
            user_id: None,
        }
    }

    /// A client that never sends anything.
    pub fn disabled() -> Self {
        Self::new(AnalyticsConfig::default(), Arc::new(TracingSink))
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn distinct_id(&self) -> &str {
        &self.distinct_id
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Initializes the sink once; later calls are no-ops.
    ///
    /// # Errors
    /// [`AnalyticsError::Disabled`] or [`AnalyticsError::MissingToken`] when the
    /// configuration does not allow sending, or the sink's own init error.
    pub fn init(&mut self) -> Result<(), AnalyticsError> {
        if self.initialized {
            return Ok(());
        }
        if !self.config.enabled {
            return Err(AnalyticsError::Disabled);
        }
        let token = self
            .config
            .token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or(AnalyticsError::MissingToken)?;
        self.sink.init(token)?;
        self.initialized = true;
        info!(environment = %self.config.environment, "analytics initialized");
        Ok(())
    }

    fn ensure_initialized(&mut self, action: &str) -> Result<(), AnalyticsError> {
        if self.initialized {
            return Ok(());
        }
        self.init().inspect_err(|err| {
            debug!(action, error = %err, "analytics not initialized; dropping call");
        })
    }

    /// Records `name` with common properties merged under `properties`.
    ///
    /// # Errors
    /// Returns the lazy-init failure when the client cannot send; the event
    /// is dropped in that case.
    pub fn track(
        &mut self,
        name: &str,
        properties: Map<String, Value>,
    ) -> Result<(), AnalyticsError> {
        self.ensure_initialized(name)?;
        let mut merged = self.common_properties();
        merged.extend(properties);
        let event = AnalyticsEvent {
            name: name.to_string(),
            distinct_id: self.distinct_id.clone(),
            properties: merged,
        };
        self.sink.track(&event)
    }

    /// Associates later events with `user_id`.
    pub fn identify(
        &mut self,
        user_id: &str,
        properties: Map<String, Value>,
    ) -> Result<(), AnalyticsError> {
        self.ensure_initialized("identify")?;
        self.distinct_id = user_id.to_string();
        self.user_id = Some(user_id.to_string());
        let mut merged = properties;
        merged.insert("$last_seen".into(), Value::String(now_rfc3339()));
        merged.insert(
            "environment".into(),
            Value::String(self.config.environment.clone()),
        );
        self.sink.identify(user_id, &merged)
    }

    /// Forgets the identified user and starts a fresh anonymous id.
    pub fn reset(&mut self) -> Result<(), AnalyticsError> {
        if !self.config.enabled {
            return Ok(());
        }
        self.user_id = None;
        self.distinct_id = anonymous_id();
        self.sink.reset()
    }

    fn common_properties(&self) -> Map<String, Value> {
        let mut props = Map::new();
        props.insert("timestamp".into(), Value::String(now_rfc3339()));
        props.insert(
            "environment".into(),
            Value::String(self.config.environment.clone()),
        );
        props.insert(
            "distinct_id".into(),
            Value::String(self.distinct_id.clone()),
        );
        if let Some(user_id) = &self.user_id {
            props.insert("user_id".into(), Value::String(user_id.clone()));
        }
        props
    }
}

fn anonymous_id() -> String {
    Uuid::new_v4().to_string()
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn enabled_config() -> AnalyticsConfig {
        AnalyticsConfig {
            token: Some("token".into()),
            enabled: true,
            environment: "test".into(),
        }
    }

    #[test]
    fn track_initializes_lazily_and_merges_common_properties() {
        let sink = Arc::new(MemorySink::default());
        let mut client = AnalyticsClient::new(enabled_config(), sink.clone());
        assert!(!client.is_initialized());

        let mut props = Map::new();
        props.insert("column".into(), json!("amount"));
        props.insert("environment".into(), json!("override"));
        client
            .track(events::GRID_CELL_SAVED, props)
            .expect("track");

        assert!(client.is_initialized());
        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Grid Cell Saved");
        assert_eq!(events[0].properties["column"], json!("amount"));
        assert_eq!(events[0].properties["environment"], json!("override"));
        assert!(events[0].properties.contains_key("timestamp"));
        assert_eq!(
            events[0].properties["distinct_id"],
            json!(client.distinct_id())
        );
    }

    #[test]
    fn disabled_or_tokenless_clients_drop_events() {
        let sink = Arc::new(MemorySink::default());
        let mut disabled = AnalyticsClient::new(AnalyticsConfig::default(), sink.clone());
        assert_eq!(
            disabled.track(events::PAGE_VIEW, Map::new()),
            Err(AnalyticsError::Disabled)
        );

        let config = AnalyticsConfig {
            token: None,
            ..enabled_config()
        };
        let mut tokenless = AnalyticsClient::new(config, sink.clone());
        assert_eq!(tokenless.init(), Err(AnalyticsError::MissingToken));
        assert!(sink.events().is_empty());
    }

    #[test]
    fn identify_then_reset_rotates_identity() {
        let sink = Arc::new(MemorySink::default());
        let mut client = AnalyticsClient::new(enabled_config(), sink.clone());
        client.identify("user-7", Map::new()).expect("identify");
        assert_eq!(client.distinct_id(), "user-7");
        assert_eq!(client.user_id(), Some("user-7"));
        let identities = sink.identities();
        assert_eq!(identities[0].0, "user-7");
        assert!(identities[0].1.contains_key("$last_seen"));

        client.reset().expect("reset");
        assert_eq!(client.user_id(), None);
        assert_ne!(client.distinct_id(), "user-7");
        assert_eq!(sink.reset_count(), 1);
    }
}
