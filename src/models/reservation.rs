//! Modelo de Reservation
//!
//! Reservas creadas por el cliente. Una reserva nace "en attent", puede
//! editarse o borrarse solo en ese estado, y pasa a "accepte"/"rejecte"
//! únicamente por acción del servidor o de un administrador.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Estado tipado de una reserva. El servidor envía strings franceses con
/// variantes con y sin acento; el parseo las trata como sinónimos.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EtatReservation {
    EnAttente,
    Accepte,
    Rejete,
    Inconnu,
}

impl EtatReservation {
    /// Parsear el campo `action` del servidor (insensible a mayúsculas
    /// y tolerante a acentos)
    pub fn depuis_action(action: &str) -> Self {
        match action.trim().to_lowercase().as_str() {
            "en attent" | "en attente" => EtatReservation::EnAttente,
            "accepte" | "accepté" => EtatReservation::Accepte,
            "rejecte" | "rejeté" | "rejete" => EtatReservation::Rejete,
            _ => EtatReservation::Inconnu,
        }
    }

    /// Orden de aparición en las listas: pendientes primero, luego
    /// aceptadas, luego rechazadas, estados desconocidos al final
    pub fn ordre_affichage(self) -> u8 {
        match self {
            EtatReservation::EnAttente => 0,
            EtatReservation::Accepte => 1,
            EtatReservation::Rejete => 2,
            EtatReservation::Inconnu => 3,
        }
    }
}

/// Reserva - mapea la respuesta de GET /reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id_reservation: i64,
    #[serde(rename = "Date_debut")]
    pub date_debut: DateTime<Utc>,
    #[serde(rename = "Date_retour")]
    pub date_retour: DateTime<Utc>,
    #[serde(rename = "Heure_debut", default)]
    pub heure_debut: Option<String>,
    #[serde(rename = "Heure_retour", default)]
    pub heure_retour: Option<String>,
    pub num_immatriculation: Option<String>,
    #[serde(default)]
    pub cin_client: Option<String>,
    #[serde(
        rename = "Prix_total",
        default,
        deserialize_with = "crate::models::de_montant"
    )]
    pub prix_total: Option<f64>,
    #[serde(rename = "Duree_location", default)]
    pub duree_location: Option<i64>,
    /// Estado crudo tal cual lo envía el servidor
    #[serde(default)]
    pub action: Option<String>,
}

impl Reservation {
    pub fn etat(&self) -> EtatReservation {
        self.action
            .as_deref()
            .map(EtatReservation::depuis_action)
            .unwrap_or(EtatReservation::Inconnu)
    }

    pub fn est_en_attente(&self) -> bool {
        self.etat() == EtatReservation::EnAttente
    }
}

/// Cuerpo de POST /reservation y PUT /reservation/{id}, con el formato
/// exacto que espera el servidor de alquiler.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationPayload {
    pub num_immatriculation: String,
    pub cin_client: String,
    #[serde(rename = "Prix_total")]
    pub prix_total: f64,
    #[serde(rename = "Duree_location")]
    pub duree_location: i64,
    #[serde(rename = "Date_debut")]
    pub date_debut: DateTime<Utc>,
    #[serde(rename = "Date_retour")]
    pub date_retour: DateTime<Utc>,
    #[serde(rename = "Heure_debut")]
    pub heure_debut: String,
    #[serde(rename = "Heure_retour")]
    pub heure_retour: String,
    /// Siempre "en attent": la transición a accepte/rejecte es del servidor
    pub action: String,
    pub login_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depuis_action_variantes() {
        assert_eq!(
            EtatReservation::depuis_action("en attent"),
            EtatReservation::EnAttente
        );
        assert_eq!(
            EtatReservation::depuis_action("En Attente"),
            EtatReservation::EnAttente
        );
        assert_eq!(
            EtatReservation::depuis_action("accepté"),
            EtatReservation::Accepte
        );
        assert_eq!(
            EtatReservation::depuis_action("ACCEPTE"),
            EtatReservation::Accepte
        );
        assert_eq!(
            EtatReservation::depuis_action("rejeté"),
            EtatReservation::Rejete
        );
        assert_eq!(
            EtatReservation::depuis_action("rejecte"),
            EtatReservation::Rejete
        );
        assert_eq!(
            EtatReservation::depuis_action("annulée"),
            EtatReservation::Inconnu
        );
    }

    #[test]
    fn test_ordre_affichage() {
        assert!(
            EtatReservation::EnAttente.ordre_affichage()
                < EtatReservation::Accepte.ordre_affichage()
        );
        assert!(
            EtatReservation::Accepte.ordre_affichage() < EtatReservation::Rejete.ordre_affichage()
        );
        assert!(
            EtatReservation::Rejete.ordre_affichage() < EtatReservation::Inconnu.ordre_affichage()
        );
    }

    #[test]
    fn test_deserialize_reservation() {
        let json = r#"{
            "id_reservation": 42,
            "Date_debut": "2024-01-12T09:00:00.000Z",
            "Date_retour": "2024-01-20T17:00:00.000Z",
            "Heure_debut": "09:00",
            "Heure_retour": "17:00",
            "num_immatriculation": "123-TUN-456",
            "cin_client": "09876543",
            "Prix_total": 952.0,
            "Duree_location": 8,
            "action": "en attent"
        }"#;
        let r: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(r.id_reservation, 42);
        assert!(r.est_en_attente());
        assert_eq!(r.etat(), EtatReservation::EnAttente);
    }

    #[test]
    fn test_serialize_payload_noms_de_champs() {
        let payload = ReservationPayload {
            num_immatriculation: "123-TUN-456".to_string(),
            cin_client: "09876543".to_string(),
            prix_total: 635.46,
            duree_location: 4,
            date_debut: "2024-01-12T09:00:00Z".parse().unwrap(),
            date_retour: "2024-01-16T09:00:00Z".parse().unwrap(),
            heure_debut: "09:00".to_string(),
            heure_retour: "09:00".to_string(),
            action: "en attent".to_string(),
            login_id: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["Prix_total"], 635.46);
        assert_eq!(value["Duree_location"], 4);
        assert_eq!(value["Heure_debut"], "09:00");
        assert_eq!(value["action"], "en attent");
        assert!(value["login_id"].is_null());
    }
}
