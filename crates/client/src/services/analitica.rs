//! Analytics queries on the analytics backend.

use incidentes_shared::{
    IncidentePorPiso, IncidentePorTipo, ReportePorUsuario, ResultadoAnalitica,
    TiempoResolucionDetalle, TriggerEtlResponse,
};

use super::ClientError;
use crate::api::{ApiRegistry, Service};

/// `POST /analitica/trigger-etl` — kick off the warehouse ETL run.
pub async fn trigger_etl(registry: &ApiRegistry) -> Result<TriggerEtlResponse, ClientError> {
    let api = registry.client(Service::Analitica)?;
    Ok(api.post_empty("/analitica/trigger-etl").await?)
}

/// `GET /analitica/incidentes-por-piso`
pub async fn incidentes_por_piso(
    registry: &ApiRegistry,
) -> Result<ResultadoAnalitica<IncidentePorPiso>, ClientError> {
    let api = registry.client(Service::Analitica)?;
    Ok(api.get_json("/analitica/incidentes-por-piso").await?)
}

/// `GET /analitica/incidentes-por-tipo`
pub async fn incidentes_por_tipo(
    registry: &ApiRegistry,
) -> Result<ResultadoAnalitica<IncidentePorTipo>, ClientError> {
    let api = registry.client(Service::Analitica)?;
    Ok(api.get_json("/analitica/incidentes-por-tipo").await?)
}

/// `GET /analitica/tiempo-resolucion`
pub async fn tiempo_resolucion(
    registry: &ApiRegistry,
) -> Result<ResultadoAnalitica<TiempoResolucionDetalle>, ClientError> {
    let api = registry.client(Service::Analitica)?;
    Ok(api.get_json("/analitica/tiempo-resolucion").await?)
}

/// `GET /analitica/reportes-por-usuario`
pub async fn reportes_por_usuario(
    registry: &ApiRegistry,
) -> Result<ResultadoAnalitica<ReportePorUsuario>, ClientError> {
    let api = registry.client(Service::Analitica)?;
    Ok(api.get_json("/analitica/reportes-por-usuario").await?)
}
