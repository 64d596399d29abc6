//! # Telemetry
//!
//! Fire-and-forget usage beacon, attached once at startup. Nothing here
//! feeds back into application state.
//!
//! `NoopTelemetry` is used when no endpoint is configured (and in tests);
//! `BeaconTelemetry` POSTs a small JSON event on a detached tokio task.

use std::sync::Arc;

use log::{debug, info};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::core::config::ResolvedConfig;

pub const LAUNCH_EVENT: &str = "app_launch";

pub trait Telemetry: Send + Sync {
    /// Records an event. Must never block or fail visibly.
    fn track(&self, event: &str);
}

/// Discards every event.
pub struct NoopTelemetry;

impl Telemetry for NoopTelemetry {
    fn track(&self, event: &str) {
        debug!("Telemetry disabled, dropping event '{}'", event);
    }
}

#[derive(Serialize, Debug)]
struct BeaconEvent<'a> {
    event: &'a str,
    app: &'static str,
    version: &'static str,
}

/// Posts events to an HTTP collector.
pub struct BeaconTelemetry {
    endpoint: String,
    client: reqwest::Client,
}

impl BeaconTelemetry {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    /// Spawns the POST and returns its handle, or `None` outside a tokio runtime.
    pub fn send(&self, event: &str) -> Option<JoinHandle<()>> {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(h) => h,
            Err(_) => {
                debug!("No tokio runtime, dropping telemetry event '{}'", event);
                return None;
            }
        };

        let body = BeaconEvent {
            event,
            app: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        };
        let request = self.client.post(&self.endpoint).json(&body);
        let event = event.to_string();

        Some(handle.spawn(async move {
            match request.send().await {
                Ok(response) => debug!("Telemetry '{}' sent: HTTP {}", event, response.status()),
                Err(e) => debug!("Telemetry '{}' failed: {}", event, e),
            }
        }))
    }
}

impl Telemetry for BeaconTelemetry {
    fn track(&self, event: &str) {
        let _ = self.send(event);
    }
}

/// Picks the telemetry backend for the resolved config.
pub fn from_config(config: &ResolvedConfig) -> Arc<dyn Telemetry> {
    match &config.telemetry_endpoint {
        Some(endpoint) => {
            info!("Telemetry enabled: {}", endpoint);
            Arc::new(BeaconTelemetry::new(endpoint.clone()))
        }
        None => {
            info!("Telemetry disabled");
            Arc::new(NoopTelemetry)
        }
    }
}
