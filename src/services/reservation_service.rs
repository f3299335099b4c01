//! Servicio de reservas
//!
//! Orquesta las operaciones de reserva contra el servidor de alquiler:
//! búsqueda de disponibilidad (punto de unión de los tres feeds), listado
//! con detalles de vehículo, y creación/edición/anulación con el
//! presupuesto calculado en el gateway.

use futures::future::join_all;
use serde::Serialize;

use crate::client::RentalApi;
use crate::models::reservation::{Reservation, ReservationPayload};
use crate::models::vehicule::Vehicule;
use crate::services::disponibilite::{vehicules_disponibles, PlageLocation};
use crate::services::tarification::{devis, duree_jours};
use crate::session::SessionClient;
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};

/// Vehículo libre para la ventana pedida, con su presupuesto.
/// `prix_total` es None cuando el vehículo no tiene precio por día.
#[derive(Debug, Serialize)]
pub struct VehiculeDisponible {
    #[serde(flatten)]
    pub vehicule: Vehicule,
    pub prix_total: Option<f64>,
}

/// Resultado de una búsqueda de disponibilidad
#[derive(Debug, Serialize)]
pub struct ResultatDisponibilite {
    pub duree_jours: i64,
    pub vehicules: Vec<VehiculeDisponible>,
}

/// Reserva del cliente enriquecida con los datos de su vehículo
#[derive(Debug, Serialize)]
pub struct ReservationAvecVehicule {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub vehicule: Option<Vehicule>,
}

/// Datos de una solicitud de reserva ya validada por el handler
#[derive(Debug, Clone)]
pub struct DemandeReservation {
    pub num_immatriculation: String,
    pub plage: PlageLocation,
    pub heure_debut: String,
    pub heure_retour: String,
}

/// Buscar los vehículos libres para la ventana pedida.
///
/// Los tres feeds (vehículos, contratos, reservas) se piden en paralelo y
/// el motor solo corre cuando los tres han llegado; si uno falla, la
/// búsqueda entera falla — nunca se filtra sobre datos parciales.
pub async fn rechercher_disponibilites(
    api: &RentalApi,
    plage: &PlageLocation,
    exclure_reservation: Option<i64>,
) -> AppResult<ResultatDisponibilite> {
    let date_debut = plage.debut.date_naive();
    let date_retour = plage.retour.date_naive();

    let (vehicules, contrats, reservations) = tokio::try_join!(
        api.vehicules(),
        api.contrats_periode(date_debut, date_retour),
        api.reservations_periode(date_debut, date_retour),
    )?;

    let duree = duree_jours(plage);
    let libres = vehicules_disponibles(plage, vehicules, &contrats, &reservations, exclure_reservation);

    Ok(ResultatDisponibilite {
        duree_jours: duree,
        vehicules: libres
            .into_iter()
            .map(|vehicule| VehiculeDisponible {
                prix_total: devis(vehicule.prix_jour, duree),
                vehicule,
            })
            .collect(),
    })
}

/// Reservas del cliente, pendientes primero, con el detalle de cada
/// vehículo resuelto en paralelo. Un detalle que falla degrada a None en
/// lugar de tumbar la lista.
pub async fn reservations_du_client(
    api: &RentalApi,
    cin_client: &str,
) -> AppResult<Vec<ReservationAvecVehicule>> {
    let mut reservations = api.reservations_du_client(cin_client).await?;
    reservations.sort_by_key(|r| r.etat().ordre_affichage());

    let details = join_all(reservations.iter().map(|reservation| async {
        match reservation.num_immatriculation.as_deref() {
            Some(num) => api.vehicule_par_immatriculation(num).await.ok(),
            None => None,
        }
    }))
    .await;

    Ok(reservations
        .into_iter()
        .zip(details)
        .map(|(reservation, vehicule)| ReservationAvecVehicule {
            reservation,
            vehicule,
        })
        .collect())
}

pub async fn creer_reservation(
    api: &RentalApi,
    session: &SessionClient,
    demande: &DemandeReservation,
) -> AppResult<serde_json::Value> {
    let vehicule = api
        .vehicule_par_immatriculation(&demande.num_immatriculation)
        .await?;
    let payload = payload_pour(&vehicule, session, demande)?;
    api.creer_reservation(&payload).await
}

pub async fn modifier_reservation(
    api: &RentalApi,
    session: &SessionClient,
    id_reservation: i64,
    demande: &DemandeReservation,
) -> AppResult<serde_json::Value> {
    let reservations = api.reservations_du_client(&session.cin_client).await?;
    verifier_modifiable(&reservations, id_reservation)?;

    let vehicule = api
        .vehicule_par_immatriculation(&demande.num_immatriculation)
        .await?;
    let payload = payload_pour(&vehicule, session, demande)?;
    api.modifier_reservation(id_reservation, &payload).await
}

pub async fn annuler_reservation(
    api: &RentalApi,
    session: &SessionClient,
    id_reservation: i64,
) -> AppResult<()> {
    let reservations = api.reservations_du_client(&session.cin_client).await?;
    verifier_modifiable(&reservations, id_reservation)?;
    api.supprimer_reservation(id_reservation).await
}

/// Construir el cuerpo POST/PUT para el servidor. Falla si la ventana es
/// inválida o si el vehículo no tiene precio por día: una reserva sin
/// `Prix_total` definido no se envía nunca.
fn payload_pour(
    vehicule: &Vehicule,
    session: &SessionClient,
    demande: &DemandeReservation,
) -> AppResult<ReservationPayload> {
    if !demande.plage.est_valide() {
        return Err(bad_request_error(
            "La date de retour doit être postérieure à la date de début.",
        ));
    }

    let duree = duree_jours(&demande.plage);
    let prix_total = devis(vehicule.prix_jour, duree).ok_or_else(|| {
        AppError::PricingUnavailable(
            "Ce véhicule n'a pas de prix journalier, impossible de calculer le prix total."
                .to_string(),
        )
    })?;

    let num_immatriculation = vehicule.num_immatriculation.clone().ok_or_else(|| {
        AppError::BadRequest("Ce véhicule n'a pas de numéro d'immatriculation.".to_string())
    })?;

    Ok(ReservationPayload {
        num_immatriculation,
        cin_client: session.cin_client.clone(),
        prix_total,
        duree_location: duree,
        date_debut: demande.plage.debut,
        date_retour: demande.plage.retour,
        heure_debut: demande.heure_debut.clone(),
        heure_retour: demande.heure_retour.clone(),
        action: "en attent".to_string(),
        login_id: None,
    })
}

/// Una reserva solo se puede editar o anular mientras está pendiente;
/// la transición accepte/rejecte pertenece al servidor.
fn verifier_modifiable(reservations: &[Reservation], id_reservation: i64) -> AppResult<&Reservation> {
    let reservation = reservations
        .iter()
        .find(|r| r.id_reservation == id_reservation)
        .ok_or_else(|| not_found_error("Réservation", &id_reservation.to_string()))?;

    if !reservation.est_en_attente() {
        return Err(bad_request_error(
            "Seules les réservations en attente peuvent être modifiées ou supprimées.",
        ));
    }
    Ok(reservation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn dt(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn session() -> SessionClient {
        SessionClient {
            id_client: 3,
            cin_client: "09876543".to_string(),
            nom: None,
            prenom: None,
        }
    }

    fn vehicule(prix_jour: Option<f64>) -> Vehicule {
        Vehicule {
            num_immatriculation: Some("123-TUN-456".to_string()),
            marque: None,
            modele: None,
            energie: None,
            prix_jour,
            image: None,
        }
    }

    fn demande(debut: &str, retour: &str) -> DemandeReservation {
        DemandeReservation {
            num_immatriculation: "123-TUN-456".to_string(),
            plage: PlageLocation::new(dt(debut), dt(retour)),
            heure_debut: "09:00".to_string(),
            heure_retour: "17:00".to_string(),
        }
    }

    fn reservation(id: i64, action: &str) -> Reservation {
        Reservation {
            id_reservation: id,
            date_debut: dt("2024-01-12T09:00:00Z"),
            date_retour: dt("2024-01-16T17:00:00Z"),
            heure_debut: None,
            heure_retour: None,
            num_immatriculation: Some("123-TUN-456".to_string()),
            cin_client: Some("09876543".to_string()),
            prix_total: None,
            duree_location: None,
            action: Some(action.to_string()),
        }
    }

    #[test]
    fn test_payload_complet() {
        let payload = payload_pour(
            &vehicule(Some(133.5)),
            &session(),
            &demande("2024-01-12T09:00:00Z", "2024-01-16T09:00:00Z"),
        )
        .unwrap();
        assert_eq!(payload.duree_location, 4);
        assert_eq!(payload.prix_total, 635.46);
        assert_eq!(payload.action, "en attent");
        assert_eq!(payload.cin_client, "09876543");
        assert!(payload.login_id.is_none());
    }

    #[test]
    fn test_payload_sans_prix_refuse() {
        let erreur = payload_pour(
            &vehicule(None),
            &session(),
            &demande("2024-01-12T09:00:00Z", "2024-01-16T09:00:00Z"),
        )
        .unwrap_err();
        assert!(matches!(erreur, AppError::PricingUnavailable(_)));
    }

    #[test]
    fn test_payload_plage_invalide_refuse() {
        let erreur = payload_pour(
            &vehicule(Some(100.0)),
            &session(),
            &demande("2024-01-16T09:00:00Z", "2024-01-12T09:00:00Z"),
        )
        .unwrap_err();
        assert!(matches!(erreur, AppError::BadRequest(_)));
    }

    #[test]
    fn test_verifier_modifiable_en_attente() {
        let reservations = vec![reservation(42, "en attent")];
        assert!(verifier_modifiable(&reservations, 42).is_ok());
    }

    #[test]
    fn test_verifier_modifiable_acceptee_refusee() {
        let reservations = vec![reservation(42, "accepte")];
        let erreur = verifier_modifiable(&reservations, 42).unwrap_err();
        assert!(matches!(erreur, AppError::BadRequest(_)));
    }

    #[test]
    fn test_verifier_modifiable_introuvable() {
        let reservations = vec![reservation(42, "en attent")];
        let erreur = verifier_modifiable(&reservations, 99).unwrap_err();
        assert!(matches!(erreur, AppError::NotFound(_)));
    }
}
