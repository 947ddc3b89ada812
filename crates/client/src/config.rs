//! Client configuration from environment variables.

use std::collections::HashMap;

use thiserror::Error;

use crate::api::Service;

/// Errors caused by missing deployment configuration.
///
/// These are fatal: a missing base URL is a deployment defect, not a runtime
/// condition to recover from.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing base URL for service `{0}` (set {var})", var = .0.env_var())]
    MissingBaseUrl(Service),
    #[error("missing realtime endpoint (set INCIDENTES_API_WEBSOCKETS)")]
    MissingWebsocketUrl,
}

/// Base URLs for the four HTTP backends plus the realtime endpoint.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    base_urls: HashMap<Service, String>,
    websocket_url: Option<String>,
}

impl ClientConfig {
    /// Read the configuration from environment variables.
    ///
    /// Environment variables:
    /// - `INCIDENTES_API_USUARIOS`: users backend base URL
    /// - `INCIDENTES_API_REPORTES`: reports backend base URL
    /// - `INCIDENTES_API_ANALITICA`: analytics backend base URL
    /// - `INCIDENTES_API_LOGS`: logs backend base URL
    /// - `INCIDENTES_API_WEBSOCKETS`: realtime notification endpoint
    ///
    /// Missing variables are not an error here; they surface as
    /// [`ConfigError`] when the corresponding service is first used.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        for service in Service::ALL {
            if let Ok(url) = std::env::var(service.env_var()) {
                if !url.is_empty() {
                    config.base_urls.insert(service, url);
                }
            }
        }
        if let Ok(url) = std::env::var("INCIDENTES_API_WEBSOCKETS") {
            if !url.is_empty() {
                config.websocket_url = Some(url);
            }
        }
        config
    }

    /// Set the base URL for one service.
    pub fn with_base_url(mut self, service: Service, url: impl Into<String>) -> Self {
        self.base_urls.insert(service, url.into());
        self
    }

    /// Set the realtime notification endpoint.
    pub fn with_websocket_url(mut self, url: impl Into<String>) -> Self {
        self.websocket_url = Some(url.into());
        self
    }

    /// Base URL for a service, with the trailing slash normalized away.
    pub fn base_url(&self, service: Service) -> Result<&str, ConfigError> {
        self.base_urls
            .get(&service)
            .map(|url| url.trim_end_matches('/'))
            .ok_or(ConfigError::MissingBaseUrl(service))
    }

    /// The realtime notification endpoint.
    pub fn websocket_url(&self) -> Result<&str, ConfigError> {
        self.websocket_url
            .as_deref()
            .ok_or(ConfigError::MissingWebsocketUrl)
    }
}
