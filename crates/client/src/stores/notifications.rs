//! Bounded queue of notifications awaiting display.
//!
//! Each accepted notification gets a locally generated display id so a UI
//! can render and dismiss individual toasts. Only the most recent entries
//! are kept.

use incidentes_shared::Notificacion;

/// A notification paired with its local display id.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedNotification {
    pub id: String,
    pub notificacion: Notificacion,
}

/// Most-recent-first queue of at most `capacity` notifications.
#[derive(Debug)]
pub struct NotificationQueue {
    capacity: usize,
    items: Vec<DisplayedNotification>,
}

impl NotificationQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    /// Add a notification, evicting the oldest entries beyond capacity.
    /// Returns the display id assigned to it.
    pub fn push(&mut self, notificacion: Notificacion) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.items.insert(
            0,
            DisplayedNotification {
                id: id.clone(),
                notificacion,
            },
        );
        self.items.truncate(self.capacity);
        id
    }

    /// Dismiss a notification by display id; a no-op for unknown ids.
    pub fn dismiss(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
    }

    /// Current entries, most recent first.
    pub fn items(&self) -> &[DisplayedNotification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use incidentes_shared::TipoNotificacion;

    fn notificacion(titulo: &str) -> Notificacion {
        Notificacion {
            tipo: TipoNotificacion::IncidenteCreado,
            titulo: titulo.to_string(),
            mensaje: "mensaje".to_string(),
            incidente_id: "i-1".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn keeps_only_the_most_recent() {
        let mut queue = NotificationQueue::new(2);
        queue.push(notificacion("a"));
        queue.push(notificacion("b"));
        queue.push(notificacion("c"));
        let titles: Vec<_> = queue
            .items()
            .iter()
            .map(|item| item.notificacion.titulo.as_str())
            .collect();
        assert_eq!(titles, ["c", "b"]);
    }

    #[test]
    fn dismiss_removes_by_id() {
        let mut queue = NotificationQueue::new(5);
        let id = queue.push(notificacion("a"));
        queue.push(notificacion("b"));
        queue.dismiss(&id);
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].notificacion.titulo, "b");
        queue.dismiss("missing");
        assert_eq!(queue.items().len(), 1);
    }
}
