//! Handlers del catálogo de vehículos

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::models::vehicule::Vehicule;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_vehicules_router() -> Router<AppState> {
    Router::new()
        .route("/", get(lister_vehicules))
        .route("/:num_immatriculation", get(detail_vehicule))
}

/// Catálogo completo, tal cual lo expone el servidor de alquiler
pub async fn lister_vehicules(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<Vehicule>>> {
    let vehicules = app_state.rental_api.vehicules().await?;
    Ok(Json(vehicules))
}

/// Detalle de un vehículo por matrícula (pantallas de detalle de
/// contrato y de reserva)
pub async fn detail_vehicule(
    State(app_state): State<AppState>,
    Path(num_immatriculation): Path<String>,
) -> AppResult<Json<Vehicule>> {
    let vehicule = app_state
        .rental_api
        .vehicule_par_immatriculation(&num_immatriculation)
        .await?;
    Ok(Json(vehicule))
}
