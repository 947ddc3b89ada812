//! Integration tests for the API client registry against a mock backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use incidentes_client::api::{ApiRegistry, Service};
use incidentes_client::config::{ClientConfig, ConfigError};
use incidentes_client::session::{SessionManager, TokenStore};
use incidentes_client::services;
use incidentes_shared::{ApiError, LoginRequest};

type Seen = Arc<Mutex<Vec<String>>>;

async fn eco(State(seen): State<Seen>, headers: HeaderMap) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    seen.lock().unwrap().push(auth.clone());
    Json(json!({ "authorization": auth }))
}

async fn login() -> Json<Value> {
    Json(json!({
        "message": "bienvenido",
        "token": "abc123",
        "usuario": { "correo": "ana@uni.edu", "nombre": "Ana", "rol": "estudiante" }
    }))
}

/// Mock backend recording the Authorization header of every `/eco` request.
async fn spawn_backend() -> (String, Seen) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/eco", get(eco))
        .route("/usuario/login", post(login))
        .route(
            "/prohibido",
            get(|| async { (StatusCode::UNAUTHORIZED, "token invalido") }),
        )
        .route(
            "/averiado",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/vacio", delete(|| async { StatusCode::OK }))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), seen)
}

fn config_for(base_url: &str) -> ClientConfig {
    let mut config = ClientConfig::default();
    for service in Service::ALL {
        config = config.with_base_url(service, base_url);
    }
    config
}

#[tokio::test]
async fn set_token_reaches_every_cached_client() {
    let (base_url, seen) = spawn_backend().await;
    let registry = ApiRegistry::new(config_for(&base_url));

    let usuarios = registry.client(Service::Usuarios).unwrap();
    let reportes = registry.client(Service::Reportes).unwrap();

    registry.set_token(Some("tok1"));
    usuarios.get_json::<Value>("/eco").await.unwrap();
    reportes.get_json::<Value>("/eco").await.unwrap();

    registry.set_token(None);
    usuarios.get_json::<Value>("/eco").await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec!["Bearer tok1", "Bearer tok1", "Bearer "]
    );
}

#[tokio::test]
async fn new_clients_are_seeded_with_last_token() {
    let (base_url, seen) = spawn_backend().await;
    let registry = ApiRegistry::new(config_for(&base_url));

    registry.set_token(Some("tok2"));
    let logs = registry.client(Service::Logs).unwrap();
    logs.get_json::<Value>("/eco").await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["Bearer tok2"]);
}

#[tokio::test]
async fn repeated_lookups_return_the_same_client() {
    let (base_url, _seen) = spawn_backend().await;
    let registry = ApiRegistry::new(config_for(&base_url));

    let a = registry.client(Service::Analitica).unwrap();
    let b = registry.client(Service::Analitica).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[tokio::test]
async fn auth_failure_emits_session_cleared_once() {
    let (base_url, _seen) = spawn_backend().await;
    let registry = ApiRegistry::new(config_for(&base_url));
    let fired = Arc::new(AtomicUsize::new(0));
    let _sub = registry.session_events().subscribe({
        let fired = fired.clone();
        move || {
            fired.fetch_add(1, Ordering::SeqCst);
        }
    });

    let api = registry.client(Service::Usuarios).unwrap();
    let err = api.get_json::<Value>("/prohibido").await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 401, .. }));
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // Non-auth failures propagate without touching the session.
    let err = api.get_json::<Value>("/averiado").await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 500, .. }));
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn auth_failure_clears_the_stored_token() {
    let (base_url, _seen) = spawn_backend().await;
    let dir = std::env::temp_dir().join("incidentes-test-auth-failure");
    std::fs::create_dir_all(&dir).unwrap();
    let store = TokenStore::with_dir(Some(dir));
    store.write(Some("caducado"));

    let registry = Arc::new(ApiRegistry::new(config_for(&base_url)));
    let session = SessionManager::new(store, registry.clone());
    assert!(session.is_authenticated());

    let api = registry.client(Service::Reportes).unwrap();
    let err = api.get_json::<Value>("/prohibido").await.unwrap_err();
    assert!(err.is_auth_failure());
    assert_eq!(session.token(), None);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn login_authorizes_every_subsequent_request() {
    let (base_url, seen) = spawn_backend().await;
    let registry = Arc::new(ApiRegistry::new(config_for(&base_url)));

    let resp = services::auth::login(
        &registry,
        &LoginRequest {
            correo: "ana@uni.edu".into(),
            contrasena: "secreta".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(resp.token, "abc123");

    // A client created before and one created after the login both carry
    // the issued token.
    let usuarios = registry.client(Service::Usuarios).unwrap();
    let analitica = registry.client(Service::Analitica).unwrap();
    usuarios.get_json::<Value>("/eco").await.unwrap();
    analitica.get_json::<Value>("/eco").await.unwrap();

    registry.set_token(None);
    usuarios.get_json::<Value>("/eco").await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec!["Bearer abc123", "Bearer abc123", "Bearer "]
    );
}

#[tokio::test]
async fn empty_response_body_decodes() {
    let (base_url, _seen) = spawn_backend().await;
    let registry = ApiRegistry::new(config_for(&base_url));

    let api = registry.client(Service::Usuarios).unwrap();
    api.delete_json("/vacio", &json!({ "correo": "ana@uni.edu" }))
        .await
        .unwrap();
}

#[tokio::test]
async fn missing_base_url_is_fatal() {
    let registry = ApiRegistry::new(ClientConfig::default());
    let err = registry.client(Service::Logs).unwrap_err();
    assert_eq!(err, ConfigError::MissingBaseUrl(Service::Logs));
}
