//! Domain models for the campus incident reporting backends.
//!
//! Field and variant names follow the backend wire contracts (Spanish);
//! serde renames are only used where the wire name is not a valid or
//! conventional Rust identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Users ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Rol {
    Estudiante,
    PersonalAdministrativo,
    Autoridad,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Usuario {
    pub correo: String,
    pub nombre: String,
    pub rol: Rol,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub correo: String,
    pub contrasena: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterRequest {
    pub nombre: String,
    pub correo: String,
    pub contrasena: String,
    pub rol: Rol,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub usuario: Usuario,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsuarioResponse {
    pub usuario: Usuario,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateUsuarioRequest {
    /// Current email, identifying the account to modify.
    pub correo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nuevo_correo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsuarioMessageResponse {
    pub message: String,
    pub usuario: Usuario,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateUsuarioRequest {
    pub nombre: String,
    pub correo: String,
    pub contrasena: String,
    pub rol: Rol,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteUsuarioRequest {
    pub correo: String,
}

// --- Incidents ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EstadoIncidente {
    Reportado,
    EnProgreso,
    Resuelto,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TipoIncidente {
    Mantenimiento,
    Seguridad,
    Limpieza,
    #[serde(rename = "TI")]
    Ti,
    Otro,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NivelUrgencia {
    Bajo,
    Medio,
    Alto,
    Critico,
}

/// Position on a floor plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Ubicacion {
    pub x: f64,
    pub y: f64,
}

/// Attachment uploaded with an incident, base64-encoded inline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Evidencia {
    pub filename: String,
    pub content_type: String,
    pub file_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Incidente {
    pub incidente_id: String,
    pub titulo: String,
    pub descripcion: String,
    pub piso: i32,
    pub ubicacion: Ubicacion,
    pub tipo: TipoIncidente,
    pub nivel_urgencia: NivelUrgencia,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<EstadoIncidente>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_correo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrearIncidenteRequest {
    pub titulo: String,
    pub descripcion: String,
    pub piso: i32,
    pub ubicacion: Ubicacion,
    pub tipo: TipoIncidente,
    pub nivel_urgencia: NivelUrgencia,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidencias: Option<Vec<Evidencia>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActualizarIncidenteRequest {
    pub incidente_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub piso: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ubicacion: Option<Ubicacion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<TipoIncidente>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nivel_urgencia: Option<NivelUrgencia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidencias: Option<Vec<Evidencia>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActualizarEstadoRequest {
    pub incidente_id: String,
    pub estado: EstadoIncidente,
    /// Required by the backend when the new state is `en_progreso`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empleado_correo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comentario_resolucion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncidenteMessageResponse {
    pub message: String,
    pub incidente: Incidente,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuscarIncidenteRequest {
    pub incidente_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuscarIncidenteResponse {
    pub incidente: Incidente,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListarIncidentesRequest {
    pub page: u32,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Paginated listing envelope used by the reports and logs backends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paginado<T> {
    pub contents: Vec<T>,
    pub page: u32,
    pub size: u32,
    #[serde(rename = "totalElements")]
    pub total_elements: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

pub type ListarIncidentesResponse = Paginado<Incidente>;

// --- Logs ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TipoLog {
    Sistema,
    Auditoria,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum NivelLog {
    Info,
    Warning,
    Error,
    Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetallesSistema {
    pub mensaje: String,
    pub servicio: String,
    pub contexto: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetallesAuditoria {
    pub entidad: String,
    pub entidad_id: String,
    pub operacion: String,
    pub usuario_correo: String,
    pub valores_previos: serde_json::Value,
    pub valores_nuevos: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub registro_id: String,
    pub tipo: TipoLog,
    pub nivel: NivelLog,
    pub marca_tiempo: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detalles_sistema: Option<DetallesSistema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detalles_auditoria: Option<DetallesAuditoria>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListarLogsRequest {
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nivel: Option<NivelLog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<TipoLog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servicio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_inicio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<String>,
}

pub type ListarLogsResponse = Paginado<LogEntry>;

// --- Analytics ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriggerEtlResponse {
    pub message: String,
    pub dag_id: String,
    pub dag_run_id: String,
    pub estado: String,
    pub airflow_url: String,
    pub instrucciones: Vec<String>,
}

/// Envelope for analytics query results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultadoAnalitica<T> {
    pub descripcion: String,
    pub resultados: Vec<T>,
    pub total_filas: u64,
}

// The warehouse returns aggregates as strings; they are passed through as-is.

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncidentePorPiso {
    pub piso: String,
    pub estado: String,
    pub total_incidentes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncidentePorTipo {
    pub tipo: String,
    pub nivel_urgencia: String,
    pub cantidad: String,
    pub porcentaje: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TiempoResolucionDetalle {
    pub incidente_id: String,
    pub titulo: String,
    pub tipo: String,
    pub nivel_urgencia: String,
    pub creado_en: String,
    pub actualizado_en: Option<String>,
    pub estado: String,
    pub horas_resolucion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportePorUsuario {
    pub usuario_correo: String,
    pub nombre: String,
    pub rol: String,
    pub total_reportes: String,
    pub reportes_resueltos: String,
    pub reportes_en_progreso: String,
    pub reportes_pendientes: String,
}
