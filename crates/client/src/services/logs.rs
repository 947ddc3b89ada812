//! System and audit log queries on the logs backend.

use incidentes_shared::{ListarLogsRequest, ListarLogsResponse};

use super::ClientError;
use crate::api::{ApiRegistry, Service};

/// `POST /logs/listar` with pagination and optional level/type/date filters.
pub async fn listar_logs(
    registry: &ApiRegistry,
    req: &ListarLogsRequest,
) -> Result<ListarLogsResponse, ClientError> {
    let api = registry.client(Service::Logs)?;
    Ok(api.post_json("/logs/listar", req).await?)
}
