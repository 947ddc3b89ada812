//! Authenticated HTTP access to the named backend services.
//!
//! One [`ApiClient`] exists per backend service, produced lazily and cached
//! by the [`ApiRegistry`]. All clients share one logical session token: the
//! registry pushes token updates into every cached client synchronously, so
//! a request issued after `set_token` returns always carries the new value.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use incidentes_shared::ApiError;

use crate::config::{ClientConfig, ConfigError};
use crate::session::SessionEvents;

/// The fixed set of independently deployed backend services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Usuarios,
    Reportes,
    Analitica,
    Logs,
}

impl Service {
    pub const ALL: [Service; 4] = [
        Service::Usuarios,
        Service::Reportes,
        Service::Analitica,
        Service::Logs,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Service::Usuarios => "usuarios",
            Service::Reportes => "reportes",
            Service::Analitica => "analitica",
            Service::Logs => "logs",
        }
    }

    /// Environment variable holding this service's base URL.
    pub fn env_var(&self) -> &'static str {
        match self {
            Service::Usuarios => "INCIDENTES_API_USUARIOS",
            Service::Reportes => "INCIDENTES_API_REPORTES",
            Service::Analitica => "INCIDENTES_API_ANALITICA",
            Service::Logs => "INCIDENTES_API_LOGS",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// HTTP client bound to one backend service.
///
/// Holds its own copy of the session token; the registry keeps the copies in
/// sync. Every request carries `Authorization: Bearer <token or empty>` and
/// `Content-Type: application/json`.
#[derive(Debug)]
pub struct ApiClient {
    service: Service,
    base_url: String,
    http: reqwest::Client,
    token: RwLock<Option<String>>,
    session: SessionEvents,
}

impl ApiClient {
    fn new(
        service: Service,
        base_url: String,
        http: reqwest::Client,
        token: Option<String>,
        session: SessionEvents,
    ) -> Self {
        Self {
            service,
            base_url,
            http,
            token: RwLock::new(token),
            session,
        }
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub(crate) fn set_token(&self, token: Option<&str>) {
        *self.token.write().unwrap() = token.map(str::to_owned);
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    /// Issue a request and decode the JSON response.
    ///
    /// A 401, 403 or 404 response emits the session-cleared signal exactly
    /// once and is then propagated to the caller unchanged; any other
    /// failure is propagated without side effects. The request/response
    /// tracing is diagnostics only.
    async fn request<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: Option<&TReq>,
        query: &[(&str, &str)],
    ) -> Result<TRes, ApiError>
    where
        TReq: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        let url = self.url(path);
        let token = self.token.read().unwrap().clone();
        let bearer = format!("Bearer {}", token.as_deref().unwrap_or(""));

        tracing::debug!(service = self.service.name(), %method, %url, "api request");

        let mut rb = self
            .http
            .request(method, &url)
            .header("Authorization", bearer)
            .header("Content-Type", "application/json");
        if !query.is_empty() {
            rb = rb.query(query);
        }
        if let Some(body) = body {
            rb = rb.json(body);
        }

        let resp = rb
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;

        if !is_success {
            tracing::warn!(service = self.service.name(), %url, status, "api error response");
            let err = ApiError::Http { status, body: text };
            if err.is_auth_failure() {
                tracing::warn!(status, "authentication failure, clearing session");
                self.session.emit_cleared();
            }
            return Err(err);
        }

        tracing::debug!(service = self.service.name(), %url, status, "api response");

        if text.is_empty() {
            serde_json::from_str("null").map_err(|e| ApiError::Deserialize(e.to_string()))
        } else {
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialize(e.to_string()))
        }
    }

    /// GET request.
    pub async fn get_json<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        self.request::<(), TRes>(Method::GET, path, None, &[]).await
    }

    /// GET request with query parameters.
    pub async fn get_json_with_query<TRes: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<TRes, ApiError> {
        self.request::<(), TRes>(Method::GET, path, None, query).await
    }

    /// POST request with a JSON body.
    pub async fn post_json<TReq, TRes>(&self, path: &str, body: &TReq) -> Result<TRes, ApiError>
    where
        TReq: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body), &[]).await
    }

    /// POST request without a body.
    pub async fn post_empty<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        self.request::<(), TRes>(Method::POST, path, None, &[]).await
    }

    /// PUT request with a JSON body.
    pub async fn put_json<TReq, TRes>(&self, path: &str, body: &TReq) -> Result<TRes, ApiError>
    where
        TReq: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(body), &[]).await
    }

    /// DELETE request with a JSON body.
    pub async fn delete_json<TReq>(&self, path: &str, body: &TReq) -> Result<(), ApiError>
    where
        TReq: Serialize + ?Sized,
    {
        self.request::<TReq, serde_json::Value>(Method::DELETE, path, Some(body), &[])
            .await
            .map(|_| ())
    }
}

/// Produces and caches one [`ApiClient`] per service, and keeps their tokens
/// consistent.
pub struct ApiRegistry {
    config: ClientConfig,
    http: reqwest::Client,
    session: SessionEvents,
    // Lock order: `last_token` before `clients`.
    last_token: Mutex<Option<String>>,
    clients: Mutex<HashMap<Service, Arc<ApiClient>>>,
}

impl ApiRegistry {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            session: SessionEvents::default(),
            last_token: Mutex::new(None),
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// The session-cleared broadcast owned by this registry.
    pub fn session_events(&self) -> &SessionEvents {
        &self.session
    }

    /// The client for `service`, creating it on first use.
    ///
    /// The first call resolves the service's base URL from configuration;
    /// a missing base URL is a fatal [`ConfigError`]. New clients are seeded
    /// with the last token set registry-wide.
    pub fn client(&self, service: Service) -> Result<Arc<ApiClient>, ConfigError> {
        let base_url = self.config.base_url(service)?.to_string();
        let last_token = self.last_token.lock().unwrap();
        let mut clients = self.clients.lock().unwrap();
        let client = clients.entry(service).or_insert_with(|| {
            Arc::new(ApiClient::new(
                service,
                base_url,
                self.http.clone(),
                last_token.clone(),
                self.session.clone(),
            ))
        });
        Ok(client.clone())
    }

    /// Update the registry-wide token and push it into every cached client.
    ///
    /// By the time this returns, every existing client's next request uses
    /// the new token; clients created afterwards are seeded with it.
    pub fn set_token(&self, token: Option<&str>) {
        let mut last_token = self.last_token.lock().unwrap();
        *last_token = token.map(str::to_owned);
        for client in self.clients.lock().unwrap().values() {
            client.set_token(token);
        }
    }
}
