//! Handler de búsqueda de disponibilidad
//!
//! Valida el formulario de fechas/horas, y solo después de la validación
//! lanza los tres feeds y el motor de disponibilidad.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use validator::Validate;

use crate::services::disponibilite::PlageLocation;
use crate::services::reservation_service::{rechercher_disponibilites, ResultatDisponibilite};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{validate_date, validate_heure};

/// Formulario de búsqueda: fecha y hora elegidas por separado, como en
/// los pickers de la app
#[derive(Debug, Deserialize, Validate)]
pub struct RechercheDisponibiliteRequest {
    pub date_debut: String,

    #[validate(regex(
        path = "crate::utils::validation::RE_HEURE",
        message = "Veuillez saisir les heures au format HH:MM (ex: 09:00)."
    ))]
    pub heure_debut: String,

    pub date_retour: String,

    #[validate(regex(
        path = "crate::utils::validation::RE_HEURE",
        message = "Veuillez saisir les heures au format HH:MM (ex: 09:00)."
    ))]
    pub heure_retour: String,

    /// Al editar una reserva, su propia reserva no debe bloquearse a sí misma
    pub exclure_reservation: Option<i64>,
}

impl RechercheDisponibiliteRequest {
    /// Convertir el formulario en una ventana de alquiler validada
    pub fn plage(&self) -> AppResult<PlageLocation> {
        let date_debut = validate_date(&self.date_debut)
            .map_err(|_| AppError::BadRequest("Date de début invalide (YYYY-MM-DD).".into()))?;
        let date_retour = validate_date(&self.date_retour)
            .map_err(|_| AppError::BadRequest("Date de retour invalide (YYYY-MM-DD).".into()))?;
        let heure_debut = validate_heure(&self.heure_debut)
            .map_err(|_| AppError::BadRequest("Heure de début invalide (HH:MM).".into()))?;
        let heure_retour = validate_heure(&self.heure_retour)
            .map_err(|_| AppError::BadRequest("Heure de retour invalide (HH:MM).".into()))?;

        let plage =
            PlageLocation::depuis_formulaire(date_debut, heure_debut, date_retour, heure_retour);
        if !plage.est_valide() {
            return Err(AppError::BadRequest(
                "La date de retour doit être postérieure à la date de début.".to_string(),
            ));
        }
        Ok(plage)
    }
}

pub fn create_disponibilite_router() -> Router<AppState> {
    Router::new().route("/", post(rechercher))
}

/// Vehículos libres para la ventana pedida, con duración y presupuesto
pub async fn rechercher(
    State(app_state): State<AppState>,
    Json(request): Json<RechercheDisponibiliteRequest>,
) -> AppResult<Json<ResultatDisponibilite>> {
    request.validate().map_err(AppError::Validation)?;
    let plage = request.plage()?;

    let resultat =
        rechercher_disponibilites(&app_state.rental_api, &plage, request.exclure_reservation)
            .await?;
    Ok(Json(resultat))
}
