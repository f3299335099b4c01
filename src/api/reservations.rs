//! Handlers de reservas
//!
//! Listado, creación, edición y anulación de las reservas del cliente
//! conectado. El presupuesto (`Prix_total`) se recalcula siempre en el
//! gateway, nunca se acepta del exterior.

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::services::disponibilite::PlageLocation;
use crate::services::reservation_service::{self, DemandeReservation, ReservationAvecVehicule};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{validate_date, validate_heure};

/// Formulario de creación/edición de una reserva
#[derive(Debug, Deserialize, Validate)]
pub struct ReservationRequest {
    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub num_immatriculation: String,

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
}

impl ReservationRequest {
    fn demande(&self) -> AppResult<DemandeReservation> {
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

        Ok(DemandeReservation {
            num_immatriculation: self.num_immatriculation.clone(),
            plage,
            heure_debut: self.heure_debut.clone(),
            heure_retour: self.heure_retour.clone(),
        })
    }
}

pub fn create_reservations_router() -> Router<AppState> {
    Router::new()
        .route("/", get(lister_reservations).post(creer_reservation))
        .route(
            "/:id_reservation",
            put(modifier_reservation).delete(annuler_reservation),
        )
}

/// Reservas del cliente conectado, pendientes primero, con los detalles
/// de cada vehículo
pub async fn lister_reservations(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<ReservationAvecVehicule>>> {
    let session = app_state.session.exiger().await?;
    let reservations =
        reservation_service::reservations_du_client(&app_state.rental_api, &session.cin_client)
            .await?;
    Ok(Json(reservations))
}

pub async fn creer_reservation(
    State(app_state): State<AppState>,
    Json(request): Json<ReservationRequest>,
) -> AppResult<Json<serde_json::Value>> {
    request.validate().map_err(AppError::Validation)?;
    let session = app_state.session.exiger().await?;
    let demande = request.demande()?;

    let reponse =
        reservation_service::creer_reservation(&app_state.rental_api, &session, &demande).await?;
    info!(
        "📅 Réservation créée pour {} ({})",
        session.cin_client, demande.num_immatriculation
    );
    Ok(Json(reponse))
}

pub async fn modifier_reservation(
    State(app_state): State<AppState>,
    Path(id_reservation): Path<i64>,
    Json(request): Json<ReservationRequest>,
) -> AppResult<Json<serde_json::Value>> {
    request.validate().map_err(AppError::Validation)?;
    let session = app_state.session.exiger().await?;
    let demande = request.demande()?;

    let reponse = reservation_service::modifier_reservation(
        &app_state.rental_api,
        &session,
        id_reservation,
        &demande,
    )
    .await?;
    info!("✏️ Réservation {} modifiée", id_reservation);
    Ok(Json(reponse))
}

pub async fn annuler_reservation(
    State(app_state): State<AppState>,
    Path(id_reservation): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    let session = app_state.session.exiger().await?;
    reservation_service::annuler_reservation(&app_state.rental_api, &session, id_reservation)
        .await?;
    info!("🗑️ Réservation {} supprimée", id_reservation);
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_valide() -> ReservationRequest {
        ReservationRequest {
            num_immatriculation: "123-TUN-456".to_string(),
            date_debut: "2024-01-12".to_string(),
            heure_debut: "09:00".to_string(),
            date_retour: "2024-01-16".to_string(),
            heure_retour: "17:00".to_string(),
        }
    }

    #[test]
    fn test_demande_valide() {
        let demande = request_valide().demande().unwrap();
        assert_eq!(demande.num_immatriculation, "123-TUN-456");
        assert!(demande.plage.est_valide());
    }

    #[test]
    fn test_matricule_vide_rejete() {
        let mut request = request_valide();
        request.num_immatriculation = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_plage_inversee_rejetee() {
        let mut request = request_valide();
        request.date_debut = "2024-01-20".to_string();
        assert!(matches!(
            request.demande().unwrap_err(),
            AppError::BadRequest(_)
        ));
    }
}
