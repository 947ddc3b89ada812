//! User account operations on the users backend.

use incidentes_shared::{
    CreateUsuarioRequest, DeleteUsuarioRequest, UpdateUsuarioRequest, UsuarioMessageResponse,
    UsuarioResponse,
};

use super::ClientError;
use crate::api::{ApiRegistry, Service};

/// `GET /usuario/mi`
pub async fn get_my_user(registry: &ApiRegistry) -> Result<UsuarioResponse, ClientError> {
    let api = registry.client(Service::Usuarios)?;
    Ok(api.get_json("/usuario/mi").await?)
}

/// `PUT /usuario/modificar`
pub async fn update_my_user(
    registry: &ApiRegistry,
    req: &UpdateUsuarioRequest,
) -> Result<UsuarioMessageResponse, ClientError> {
    let api = registry.client(Service::Usuarios)?;
    Ok(api.put_json("/usuario/modificar", req).await?)
}

/// `GET /usuario/obtener?correo=...`
pub async fn get_user_by_correo(
    registry: &ApiRegistry,
    correo: &str,
) -> Result<UsuarioResponse, ClientError> {
    let api = registry.client(Service::Usuarios)?;
    Ok(api
        .get_json_with_query("/usuario/obtener", &[("correo", correo)])
        .await?)
}

/// `POST /usuario/crear` as an authority (no token exchange).
pub async fn create_user(
    registry: &ApiRegistry,
    req: &CreateUsuarioRequest,
) -> Result<UsuarioMessageResponse, ClientError> {
    let api = registry.client(Service::Usuarios)?;
    Ok(api.post_json("/usuario/crear", req).await?)
}

/// `DELETE /usuario/eliminar`
pub async fn delete_user(registry: &ApiRegistry, correo: &str) -> Result<(), ClientError> {
    let api = registry.client(Service::Usuarios)?;
    let req = DeleteUsuarioRequest {
        correo: correo.to_string(),
    };
    Ok(api.delete_json("/usuario/eliminar", &req).await?)
}
