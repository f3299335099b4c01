//! Handlers de contratos
//!
//! Los contratos son de solo lectura: la app los consulta por cliente y
//! muestra el detalle del vehículo asociado a través de /api/vehicules.

use axum::{extract::State, routing::get, Json, Router};

use crate::models::contrat::Contrat;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_contrats_router() -> Router<AppState> {
    Router::new().route("/", get(lister_contrats))
}

/// Contratos del cliente conectado
pub async fn lister_contrats(State(app_state): State<AppState>) -> AppResult<Json<Vec<Contrat>>> {
    let session = app_state.session.exiger().await?;
    let contrats = app_state
        .rental_api
        .contrats_du_client(&session.cin_client)
        .await?;
    Ok(Json(contrats))
}
