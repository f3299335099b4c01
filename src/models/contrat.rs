//! Modelo de Contrat
//!
//! Contrato de alquiler finalizado. Solo lectura: el cliente lo consulta
//! pero nunca lo crea ni lo modifica.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contrato - mapea la respuesta de GET /contrat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contrat {
    #[serde(rename = "Date_debut")]
    pub date_debut: DateTime<Utc>,
    #[serde(rename = "Date_retour")]
    pub date_retour: DateTime<Utc>,
    pub num_immatriculation: Option<String>,
    #[serde(
        rename = "Prix_total",
        default,
        deserialize_with = "crate::models::de_montant"
    )]
    pub prix_total: Option<f64>,
    #[serde(default)]
    pub cin_client: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_contrat() {
        let json = r#"{
            "Date_debut": "2024-01-10T09:00:00.000Z",
            "Date_retour": "2024-01-15T17:00:00.000Z",
            "num_immatriculation": "123-TUN-456",
            "Prix_total": "714.00",
            "cin_client": "09876543"
        }"#;
        let c: Contrat = serde_json::from_str(json).unwrap();
        assert_eq!(c.prix_total, Some(714.0));
        assert!(c.date_debut < c.date_retour);
    }

    #[test]
    fn test_deserialize_contrat_champs_absents() {
        let json = r#"{
            "Date_debut": "2024-01-10T09:00:00Z",
            "Date_retour": "2024-01-15T17:00:00Z"
        }"#;
        let c: Contrat = serde_json::from_str(json).unwrap();
        assert!(c.num_immatriculation.is_none());
        assert!(c.prix_total.is_none());
        assert!(c.cin_client.is_none());
    }
}
