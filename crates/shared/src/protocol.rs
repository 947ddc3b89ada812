//! Realtime notification protocol.
//!
//! The notification service pushes one JSON object per text frame over the
//! WebSocket connection. Field names are the backend's wire names (Spanish)
//! and must not be renamed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Incident lifecycle event kinds pushed by the notification service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TipoNotificacion {
    #[serde(rename = "incidente_creado")]
    IncidenteCreado,
    #[serde(rename = "incidente_actualizado")]
    IncidenteActualizado,
}

/// A single notification frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notificacion {
    pub tipo: TipoNotificacion,
    pub titulo: String,
    pub mensaje: String,
    pub incidente_id: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_frame() {
        let raw = r#"{"tipo":"incidente_creado","titulo":"X","mensaje":"Y","incidente_id":"i-1","timestamp":"2024-01-01T00:00:00Z"}"#;
        let n: Notificacion = serde_json::from_str(raw).unwrap();
        assert_eq!(n.tipo, TipoNotificacion::IncidenteCreado);
        assert_eq!(n.titulo, "X");
        assert_eq!(n.mensaje, "Y");
        assert_eq!(n.incidente_id, "i-1");
        assert_eq!(n.timestamp.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn rejects_unknown_kind() {
        let raw = r#"{"tipo":"otro_evento","titulo":"X","mensaje":"Y","incidente_id":"i-1","timestamp":"2024-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<Notificacion>(raw).is_err());
    }

    #[test]
    fn roundtrips_kind_names() {
        let json = serde_json::to_string(&TipoNotificacion::IncidenteActualizado).unwrap();
        assert_eq!(json, "\"incidente_actualizado\"");
    }
}
