//! Incidentes Client - SDK for the campus incident reporting platform
//!
//! This crate contains the client-side core: a token-synchronized API
//! client registry over the four backends (usuarios, reportes, analitica,
//! logs), a reconnecting WebSocket notification client, and the token
//! store / session bridge that keeps both in sync.

pub mod api;
pub mod config;
pub mod session;
pub mod storage;

pub mod services;
pub mod stores;
pub mod ws;

pub use api::{ApiClient, ApiRegistry, Service};
pub use config::{ClientConfig, ConfigError};
pub use session::{SessionEvents, SessionManager, SessionSubscription, TokenStore};
pub use ws::{
    subscribe_notifications, ConnectionState, NotificationSubscription, RealtimeClient,
    ReconnectConfig,
};
