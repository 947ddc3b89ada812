//! Bridges one consumer's lifecycle to the shared realtime client.
//!
//! Subscribing acquires the connection and registers the callback; dropping
//! the returned guard releases both. This replaces implicit UI effect
//! cleanup with scoped-resource acquisition: every exit path unregisters
//! the callback and disconnects.

use incidentes_shared::Notificacion;

use super::connection::RealtimeClient;

/// Guard for an active notification subscription.
///
/// On drop the callback is unregistered and the shared client disconnected.
#[must_use = "dropping the subscription disconnects the realtime client"]
pub struct NotificationSubscription {
    client: RealtimeClient,
    key: String,
}

impl NotificationSubscription {
    pub fn is_connected(&self) -> bool {
        self.client.is_connected()
    }
}

impl Drop for NotificationSubscription {
    fn drop(&mut self) {
        self.client.remove_listener(&self.key);
        self.client.disconnect();
    }
}

/// Connect the shared client with `token` and register `callback` under a
/// stable `key`.
///
/// Returns `None` when there is no token (logged out) — nothing is
/// registered and no connection is made. The key gives re-subscriptions a
/// stable identity, so subscribing again with the same key never duplicates
/// the registration.
pub fn subscribe_notifications(
    client: &RealtimeClient,
    token: Option<&str>,
    key: impl Into<String>,
    callback: impl Fn(&Notificacion) + Send + Sync + 'static,
) -> Option<NotificationSubscription> {
    let token = token?;
    client.connect(token);
    let key = key.into();
    client.add_listener(key.clone(), callback);
    Some(NotificationSubscription {
        client: client.clone(),
        key,
    })
}
