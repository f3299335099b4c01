//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::client::RentalApi;
use crate::config::environment::EnvironmentConfig;
use crate::session::SessionStore;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub rental_api: Arc<RentalApi>,
    pub session: Arc<SessionStore>,
}

impl AppState {
    pub async fn new(config: EnvironmentConfig) -> AppResult<Self> {
        let rental_api = RentalApi::new(config.rental_api_url.clone(), config.upstream_timeout_secs)?;
        let session = SessionStore::ouvrir(config.session_file.clone()).await;

        Ok(Self {
            config,
            rental_api: Arc::new(rental_api),
            session: Arc::new(session),
        })
    }
}
