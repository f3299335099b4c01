//! Cliente HTTP para el servidor de gestión de alquiler
//!
//! Este módulo contiene el cliente HTTP para el servidor REST que posee
//! los datos (vehículos, contratos, reservas, clientes, pagos). Todas las
//! respuestas de lectura llegan en un sobre `{ "data": ... }`.

use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::models::client_profil::{Avance, ClientProfil, ClientProfilUpdate, Paiement};
use crate::models::contrat::Contrat;
use crate::models::reservation::{Reservation, ReservationPayload};
use crate::models::vehicule::Vehicule;
use crate::utils::errors::{AppError, AppResult};

/// Sobre estándar de las respuestas del servidor
#[derive(Debug, Deserialize)]
struct Enveloppe<T> {
    data: T,
}

/// Mensaje de error que el servidor adjunta a los estados no exitosos
#[derive(Debug, Deserialize)]
struct MessageErreur {
    #[serde(default)]
    message: Option<String>,
}

/// Datos de sesión devueltos por POST /client/login
#[derive(Debug, Clone, Deserialize)]
pub struct DonneesLogin {
    pub id_client: i64,
    pub cin_client: Option<String>,
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub prenom: Option<String>,
}

/// Cliente HTTP del servidor de alquiler
pub struct RentalApi {
    client: Client,
    base_url: String,
}

impl RentalApi {
    /// Crear el cliente con URL base y timeout de petición configurables.
    /// Un feed colgado se convierte en error de fetch al vencer el timeout.
    pub fn new(base_url: String, timeout_secs: u64) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Recuperar el `message` del cuerpo de un estado no exitoso, cuando existe
    async fn message_erreur(reponse: reqwest::Response) -> (reqwest::StatusCode, String) {
        let statut = reponse.status();
        let message = reponse
            .json::<MessageErreur>()
            .await
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| format!("HTTP {}", statut));
        (statut, message)
    }

    /// Error tipado para búsquedas de un recurso concreto y escrituras:
    /// un 404 significa "no existe" y se propaga como tal
    async fn erreur_depuis(reponse: reqwest::Response) -> AppError {
        let (statut, message) = Self::message_erreur(reponse).await;
        if statut == reqwest::StatusCode::NOT_FOUND {
            AppError::NotFound(message)
        } else {
            AppError::Upstream(format!("{} ({})", message, statut))
        }
    }

    /// Error tipado para los feeds de listas: cualquier estado no exitoso,
    /// 404 incluido, es un fallo de fetch del servidor de alquiler
    async fn erreur_feed(reponse: reqwest::Response) -> AppError {
        let (statut, message) = Self::message_erreur(reponse).await;
        AppError::Upstream(format!("{} ({})", message, statut))
    }

    /// GET de un feed con desempaquetado del sobre `{data: ...}`
    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.url(path);
        debug!("GET {}", url);
        let reponse = self.client.get(&url).send().await?;
        if !reponse.status().is_success() {
            return Err(Self::erreur_feed(reponse).await);
        }
        let enveloppe: Enveloppe<T> = reponse.json().await?;
        Ok(enveloppe.data)
    }

    /// GET de un recurso concreto: como `get_data` pero conservando el 404
    async fn get_data_detail<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.url(path);
        debug!("GET {}", url);
        let reponse = self.client.get(&url).send().await?;
        if !reponse.status().is_success() {
            return Err(Self::erreur_depuis(reponse).await);
        }
        let enveloppe: Enveloppe<T> = reponse.json().await?;
        Ok(enveloppe.data)
    }

    // --- Vehículos -------------------------------------------------------

    pub async fn vehicules(&self) -> AppResult<Vec<Vehicule>> {
        self.get_data("/vehicules").await
    }

    pub async fn vehicule_par_immatriculation(&self, num: &str) -> AppResult<Vehicule> {
        self.get_data_detail(&format!("/vehicules/immatriculation/{}", num))
            .await
    }

    // --- Contratos -------------------------------------------------------

    /// Contratos de un período. El filtro de fechas del servidor es solo
    /// indicativo: el motor de disponibilidad revalida el solapamiento.
    pub async fn contrats_periode(
        &self,
        date_debut: NaiveDate,
        date_retour: NaiveDate,
    ) -> AppResult<Vec<Contrat>> {
        self.get_data(&format!(
            "/contrat?startDate={}&endDate={}",
            date_debut.format("%Y-%m-%d"),
            date_retour.format("%Y-%m-%d")
        ))
        .await
    }

    pub async fn contrats_du_client(&self, cin: &str) -> AppResult<Vec<Contrat>> {
        self.get_data(&format!("/contrat/cin/{}", cin)).await
    }

    // --- Reservas --------------------------------------------------------

    pub async fn reservations_periode(
        &self,
        date_debut: NaiveDate,
        date_retour: NaiveDate,
    ) -> AppResult<Vec<Reservation>> {
        self.get_data(&format!(
            "/reservation?startDate={}&endDate={}",
            date_debut.format("%Y-%m-%d"),
            date_retour.format("%Y-%m-%d")
        ))
        .await
    }

    pub async fn reservations_du_client(&self, cin: &str) -> AppResult<Vec<Reservation>> {
        self.get_data(&format!("/reservation/cin/{}", cin)).await
    }

    pub async fn creer_reservation(
        &self,
        payload: &ReservationPayload,
    ) -> AppResult<serde_json::Value> {
        let reponse = self
            .client
            .post(self.url("/reservation"))
            .json(payload)
            .send()
            .await?;
        if !reponse.status().is_success() {
            return Err(Self::erreur_depuis(reponse).await);
        }
        Ok(reponse.json().await?)
    }

    pub async fn modifier_reservation(
        &self,
        id_reservation: i64,
        payload: &ReservationPayload,
    ) -> AppResult<serde_json::Value> {
        let reponse = self
            .client
            .put(self.url(&format!("/reservation/{}", id_reservation)))
            .json(payload)
            .send()
            .await?;
        if !reponse.status().is_success() {
            return Err(Self::erreur_depuis(reponse).await);
        }
        Ok(reponse.json().await?)
    }

    pub async fn supprimer_reservation(&self, id_reservation: i64) -> AppResult<()> {
        let reponse = self
            .client
            .delete(self.url(&format!("/reservation/{}", id_reservation)))
            .send()
            .await?;
        if !reponse.status().is_success() {
            return Err(Self::erreur_depuis(reponse).await);
        }
        Ok(())
    }

    // --- Clientes y dinero -----------------------------------------------

    pub async fn login(&self, email: &str, password: &str) -> AppResult<DonneesLogin> {
        let reponse = self
            .client
            .post(self.url("/client/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        if !reponse.status().is_success() {
            let statut = reponse.status();
            let message = reponse
                .json::<MessageErreur>()
                .await
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Identifiants invalides".to_string());
            return Err(if statut.is_client_error() {
                AppError::Unauthorized(message)
            } else {
                AppError::Upstream(format!("{} ({})", message, statut))
            });
        }
        let enveloppe: Enveloppe<DonneesLogin> = reponse.json().await?;
        Ok(enveloppe.data)
    }

    pub async fn envoyer_mail_mot_de_passe(&self, email: &str) -> AppResult<()> {
        let reponse = self
            .client
            .post(self.url("/client/send-password-email"))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;
        if !reponse.status().is_success() {
            return Err(Self::erreur_depuis(reponse).await);
        }
        Ok(())
    }

    pub async fn profil_client(&self, id_client: i64) -> AppResult<ClientProfil> {
        self.get_data_detail(&format!("/client/{}", id_client)).await
    }

    pub async fn modifier_profil(
        &self,
        id_client: i64,
        payload: &ClientProfilUpdate,
    ) -> AppResult<serde_json::Value> {
        let reponse = self
            .client
            .put(self.url(&format!("/client/{}", id_client)))
            .json(payload)
            .send()
            .await?;
        if !reponse.status().is_success() {
            return Err(Self::erreur_depuis(reponse).await);
        }
        Ok(reponse.json().await?)
    }

    pub async fn paiements_du_client(&self, cin: &str) -> AppResult<Vec<Paiement>> {
        self.get_data(&format!("/paiement/client/{}", cin)).await
    }

    pub async fn avances_du_client(&self, cin: &str) -> AppResult<Vec<Avance>> {
        self.get_data(&format!("/avance/client/{}", cin)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_sans_double_slash() {
        let api = RentalApi::new("http://localhost:7001/".to_string(), 30).unwrap();
        assert_eq!(api.url("/vehicules"), "http://localhost:7001/vehicules");
    }

    #[test]
    fn test_enveloppe_deserialise() {
        let json = r#"{"data": [{"marque": "Kia"}]}"#;
        let enveloppe: Enveloppe<Vec<Vehicule>> = serde_json::from_str(json).unwrap();
        assert_eq!(enveloppe.data.len(), 1);
        assert_eq!(enveloppe.data[0].marque.as_deref(), Some("Kia"));
    }

    fn reponse_http(statut: u16, corps: &'static str) -> reqwest::Response {
        let reponse = axum::http::Response::builder()
            .status(statut)
            .body(corps)
            .unwrap();
        reqwest::Response::from(reponse)
    }

    #[tokio::test]
    async fn test_erreur_feed_404_reste_un_fetch_error() {
        // Un feed de lista que responde 404 es un fallo del servidor de
        // alquiler, no un recurso no encontrado del gateway
        let erreur =
            RentalApi::erreur_feed(reponse_http(404, r#"{"message":"introuvable"}"#)).await;
        assert!(matches!(erreur, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_erreur_depuis_conserve_le_404() {
        let erreur =
            RentalApi::erreur_depuis(reponse_http(404, r#"{"message":"introuvable"}"#)).await;
        assert!(matches!(erreur, AppError::NotFound(_)));

        let erreur = RentalApi::erreur_depuis(reponse_http(500, "boom")).await;
        assert!(matches!(erreur, AppError::Upstream(_)));
    }

    #[test]
    fn test_donnees_login_deserialise() {
        let json = r#"{"data": {"id_client": 3, "cin_client": "09876543", "nom": "Ben Salah", "prenom": "Amine"}}"#;
        let enveloppe: Enveloppe<DonneesLogin> = serde_json::from_str(json).unwrap();
        assert_eq!(enveloppe.data.id_client, 3);
        assert_eq!(enveloppe.data.cin_client.as_deref(), Some("09876543"));
    }
}
