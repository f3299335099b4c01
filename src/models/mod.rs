//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al JSON del servidor de gestión de alquiler (nombres de campos en francés,
//! tal cual los envía el servidor).

pub mod client_profil;
pub mod contrat;
pub mod reservation;
pub mod vehicule;

use serde::{Deserialize, Deserializer};

/// Deserializar un importe monetario que el servidor puede enviar como
/// número, string numérico, null o campo ausente.
pub fn de_montant<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Montant {
        Nombre(f64),
        Texte(String),
        Nul(()),
    }

    match Option::<Montant>::deserialize(deserializer)? {
        Some(Montant::Nombre(n)) => Ok(Some(n)),
        Some(Montant::Texte(s)) => Ok(s.trim().parse::<f64>().ok()),
        Some(Montant::Nul(())) | None => Ok(None),
    }
}
