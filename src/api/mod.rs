//! API endpoints
//!
//! Este módulo contiene los endpoints del gateway: una operación por
//! cada acción de datos de las pantallas de la app móvil.

pub mod auth;
pub mod contrats;
pub mod dashboard;
pub mod disponibilite;
pub mod profil;
pub mod reservations;
pub mod vehicules;

use axum::Router;

use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::create_auth_router())
        .nest("/vehicules", vehicules::create_vehicules_router())
        .nest("/disponibilite", disponibilite::create_disponibilite_router())
        .nest("/reservations", reservations::create_reservations_router())
        .nest("/contrats", contrats::create_contrats_router())
        .nest("/profil", profil::create_profil_router())
        .nest("/dashboard", dashboard::create_dashboard_router())
}
