//! Login and registration against the users backend.

use incidentes_shared::{AuthResponse, LoginRequest, RegisterRequest};

use super::ClientError;
use crate::api::{ApiRegistry, Service};

/// `POST /usuario/login`
///
/// On success the issued token is pushed into the registry so every API
/// client is authorized immediately; persisting it is the caller's job
/// (see `SessionManager::establish`).
pub async fn login(registry: &ApiRegistry, req: &LoginRequest) -> Result<AuthResponse, ClientError> {
    let api = registry.client(Service::Usuarios)?;
    let resp: AuthResponse = api.post_json("/usuario/login", req).await?;
    registry.set_token(Some(&resp.token));
    Ok(resp)
}

/// `POST /usuario/crear` (self-registration)
pub async fn register(
    registry: &ApiRegistry,
    req: &RegisterRequest,
) -> Result<AuthResponse, ClientError> {
    let api = registry.client(Service::Usuarios)?;
    let resp: AuthResponse = api.post_json("/usuario/crear", req).await?;
    registry.set_token(Some(&resp.token));
    Ok(resp)
}
