//! Thin typed accessors over the API registry, one module per backend.

pub mod analitica;
pub mod auth;
pub mod incidentes;
pub mod logs;
pub mod usuario;

use incidentes_shared::ApiError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the service layer.
///
/// Configuration errors are fatal deployment defects; API errors carry the
/// transport/status failure unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
