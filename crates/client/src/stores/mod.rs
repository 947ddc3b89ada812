//! In-memory stores fed by the realtime layer.

pub mod notifications;

pub use notifications::{DisplayedNotification, NotificationQueue};
