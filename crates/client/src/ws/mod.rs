//! Realtime notification layer.

pub mod bridge;
pub mod connection;

pub use bridge::{subscribe_notifications, NotificationSubscription};
pub use connection::{ConnectionState, RealtimeClient, ReconnectConfig};
