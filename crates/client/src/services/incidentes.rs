//! Incident operations on the reports backend.

use incidentes_shared::{
    ActualizarEstadoRequest, ActualizarIncidenteRequest, BuscarIncidenteRequest,
    BuscarIncidenteResponse, CrearIncidenteRequest, IncidenteMessageResponse,
    ListarIncidentesRequest, ListarIncidentesResponse,
};

use super::ClientError;
use crate::api::{ApiRegistry, Service};

/// `POST /incidentes/crear` (student)
pub async fn crear_incidente(
    registry: &ApiRegistry,
    req: &CrearIncidenteRequest,
) -> Result<IncidenteMessageResponse, ClientError> {
    let api = registry.client(Service::Reportes)?;
    Ok(api.post_json("/incidentes/crear", req).await?)
}

/// `PUT /incidentes/update` (student)
pub async fn actualizar_incidente(
    registry: &ApiRegistry,
    req: &ActualizarIncidenteRequest,
) -> Result<IncidenteMessageResponse, ClientError> {
    let api = registry.client(Service::Reportes)?;
    Ok(api.put_json("/incidentes/update", req).await?)
}

/// `PUT /incidentes/update_estado` (administrative staff)
pub async fn actualizar_estado(
    registry: &ApiRegistry,
    req: &ActualizarEstadoRequest,
) -> Result<IncidenteMessageResponse, ClientError> {
    let api = registry.client(Service::Reportes)?;
    Ok(api.put_json("/incidentes/update_estado", req).await?)
}

/// `POST /incidentes/buscar` (authority)
pub async fn buscar_incidente(
    registry: &ApiRegistry,
    incidente_id: &str,
) -> Result<BuscarIncidenteResponse, ClientError> {
    let api = registry.client(Service::Reportes)?;
    let req = BuscarIncidenteRequest {
        incidente_id: incidente_id.to_string(),
    };
    Ok(api.post_json("/incidentes/buscar", &req).await?)
}

/// `POST /incidentes/listar` (paginated)
pub async fn listar_incidentes(
    registry: &ApiRegistry,
    req: &ListarIncidentesRequest,
) -> Result<ListarIncidentesResponse, ClientError> {
    let api = registry.client(Service::Reportes)?;
    Ok(api.post_json("/incidentes/listar", req).await?)
}
