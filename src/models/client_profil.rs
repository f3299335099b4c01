//! Modelos de perfil de cliente y movimientos de dinero
//!
//! El perfil se lee/edita con GET y PUT /client/{id}. Los pagos y avances
//! solo se consultan para los totales del tablero.

use serde::{Deserialize, Serialize};

/// Perfil de un cliente - mapea GET /client/{id_client}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientProfil {
    pub id_client: i64,
    #[serde(default)]
    pub cin_client: Option<String>,
    #[serde(default)]
    pub nom_fr: Option<String>,
    #[serde(default)]
    pub prenom_fr: Option<String>,
    #[serde(default)]
    pub nom_ar: Option<String>,
    #[serde(default)]
    pub prenom_ar: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date_naiss: Option<String>,
    #[serde(default)]
    pub adresse_fr: Option<String>,
    #[serde(default)]
    pub adresse_ar: Option<String>,
    #[serde(default)]
    pub num_tel: Option<String>,
    #[serde(default)]
    pub profession_fr: Option<String>,
    #[serde(default)]
    pub profession_ar: Option<String>,
    #[serde(default)]
    pub nationalite_origine: Option<String>,
    #[serde(rename = "Numero_Permis", default)]
    pub numero_permis: Option<String>,
    #[serde(default)]
    pub date_cin: Option<String>,
    #[serde(default)]
    pub date_permis: Option<String>,
}

/// Cuerpo de PUT /client/{id_client}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientProfilUpdate {
    #[serde(default)]
    pub nom_fr: Option<String>,
    #[serde(default)]
    pub prenom_fr: Option<String>,
    #[serde(default)]
    pub nom_ar: Option<String>,
    #[serde(default)]
    pub prenom_ar: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date_naiss: Option<String>,
    #[serde(default)]
    pub adresse_fr: Option<String>,
    #[serde(default)]
    pub adresse_ar: Option<String>,
    #[serde(default)]
    pub num_tel: Option<String>,
    #[serde(default)]
    pub profession_fr: Option<String>,
    #[serde(default)]
    pub profession_ar: Option<String>,
    #[serde(default)]
    pub nationalite_origine: Option<String>,
    #[serde(default)]
    pub cin_client: Option<String>,
    #[serde(rename = "Numero_Permis", default)]
    pub numero_permis: Option<String>,
    #[serde(default)]
    pub date_cin: Option<String>,
    #[serde(default)]
    pub date_permis: Option<String>,
}

/// Pago registrado - mapea GET /paiement/client/{cin}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paiement {
    #[serde(default, deserialize_with = "crate::models::de_montant")]
    pub montant_cheque1: Option<f64>,
    #[serde(default, deserialize_with = "crate::models::de_montant")]
    pub montant_cheque2: Option<f64>,
    #[serde(default, deserialize_with = "crate::models::de_montant")]
    pub montant_espace: Option<f64>,
    #[serde(default, deserialize_with = "crate::models::de_montant")]
    pub montant_virement: Option<f64>,
}

impl Paiement {
    /// Suma de los cuatro medios de pago, campos ausentes valen 0
    pub fn total(&self) -> f64 {
        self.montant_cheque1.unwrap_or(0.0)
            + self.montant_cheque2.unwrap_or(0.0)
            + self.montant_espace.unwrap_or(0.0)
            + self.montant_virement.unwrap_or(0.0)
    }
}

/// Avance registrado - mapea GET /avance/client/{cin}; mismo desglose de
/// importes que un pago
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avance {
    #[serde(default, deserialize_with = "crate::models::de_montant")]
    pub montant_cheque1: Option<f64>,
    #[serde(default, deserialize_with = "crate::models::de_montant")]
    pub montant_cheque2: Option<f64>,
    #[serde(default, deserialize_with = "crate::models::de_montant")]
    pub montant_espace: Option<f64>,
    #[serde(default, deserialize_with = "crate::models::de_montant")]
    pub montant_virement: Option<f64>,
}

impl Avance {
    pub fn total(&self) -> f64 {
        self.montant_cheque1.unwrap_or(0.0)
            + self.montant_cheque2.unwrap_or(0.0)
            + self.montant_espace.unwrap_or(0.0)
            + self.montant_virement.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_paiement() {
        let p: Paiement = serde_json::from_str(
            r#"{"montant_cheque1": 100.0, "montant_espace": "50.5", "montant_virement": null}"#,
        )
        .unwrap();
        assert_eq!(p.total(), 150.5);
    }

    #[test]
    fn test_profil_numero_permis_renomme() {
        let json = r#"{"id_client": 7, "Numero_Permis": "P-123", "nom_fr": "Ben Salah"}"#;
        let profil: ClientProfil = serde_json::from_str(json).unwrap();
        assert_eq!(profil.numero_permis.as_deref(), Some("P-123"));
        assert_eq!(profil.nom_fr.as_deref(), Some("Ben Salah"));
    }
}
