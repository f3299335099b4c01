//! Handlers del perfil de cliente

use axum::{extract::State, routing::get, Json, Router};
use tracing::info;

use crate::models::client_profil::{ClientProfil, ClientProfilUpdate};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_profil_router() -> Router<AppState> {
    Router::new().route("/", get(consulter_profil).put(modifier_profil))
}

/// Perfil del cliente conectado
pub async fn consulter_profil(
    State(app_state): State<AppState>,
) -> AppResult<Json<ClientProfil>> {
    let session = app_state.session.exiger().await?;
    let profil = app_state
        .rental_api
        .profil_client(session.id_client)
        .await?;
    Ok(Json(profil))
}

/// Edición del perfil: el cuerpo se reenvía tal cual al servidor de
/// alquiler, que es quien valida y persiste
pub async fn modifier_profil(
    State(app_state): State<AppState>,
    Json(update): Json<ClientProfilUpdate>,
) -> AppResult<Json<serde_json::Value>> {
    let session = app_state.session.exiger().await?;
    let reponse = app_state
        .rental_api
        .modifier_profil(session.id_client, &update)
        .await?;
    info!("📝 Profil du client {} modifié", session.id_client);
    Ok(Json(reponse))
}
