//! Sesión de cliente persistida en disco
//!
//! Equivalente al almacenamiento local del teléfono: un único objeto de
//! sesión con ciclo de vida cargar/guardar/borrar, persistido como JSON y
//! compartido por los handlers a través del estado de la aplicación.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;

use crate::utils::errors::{AppError, AppResult};

/// Identidad del cliente conectado, tal como la devuelve el login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClient {
    pub id_client: i64,
    pub cin_client: String,
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub prenom: Option<String>,
}

/// Almacén de sesión: una sesión en memoria respaldada por un fichero JSON
pub struct SessionStore {
    chemin: PathBuf,
    courante: RwLock<Option<SessionClient>>,
}

impl SessionStore {
    /// Abrir el almacén, recuperando la sesión previa si el fichero existe.
    /// Un fichero corrupto se ignora con aviso (arranque sin sesión).
    pub async fn ouvrir(chemin: PathBuf) -> Self {
        let courante = match tokio::fs::read(&chemin).await {
            Ok(contenu) => match serde_json::from_slice::<SessionClient>(&contenu) {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!("Fichier de session illisible ({}), session ignorée", e);
                    None
                }
            },
            Err(_) => None,
        };
        Self {
            chemin,
            courante: RwLock::new(courante),
        }
    }

    pub async fn courante(&self) -> Option<SessionClient> {
        self.courante.read().await.clone()
    }

    /// Sesión obligatoria: los handlers de pantallas autenticadas fallan
    /// con 401 si no hay cliente conectado
    pub async fn exiger(&self) -> AppResult<SessionClient> {
        self.courante().await.ok_or_else(|| {
            AppError::Unauthorized("Identifiant client manquant. Veuillez vous reconnecter.".into())
        })
    }

    pub async fn enregistrer(&self, session: SessionClient) -> AppResult<()> {
        let contenu = serde_json::to_vec_pretty(&session)
            .map_err(|e| AppError::Session(e.to_string()))?;
        if let Some(parent) = self.chemin.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Session(e.to_string()))?;
        }
        tokio::fs::write(&self.chemin, contenu)
            .await
            .map_err(|e| AppError::Session(e.to_string()))?;
        *self.courante.write().await = Some(session);
        Ok(())
    }

    pub async fn effacer(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.chemin).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(AppError::Session(e.to_string())),
        }
        *self.courante.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chemin_temporaire(nom: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rental_gateway_test_{}_{}.json", nom, std::process::id()))
    }

    fn session_exemple() -> SessionClient {
        SessionClient {
            id_client: 3,
            cin_client: "09876543".to_string(),
            nom: Some("Ben Salah".to_string()),
            prenom: Some("Amine".to_string()),
        }
    }

    #[tokio::test]
    async fn test_cycle_enregistrer_recharger_effacer() {
        let chemin = chemin_temporaire("cycle");
        let store = SessionStore::ouvrir(chemin.clone()).await;
        assert!(store.courante().await.is_none());

        store.enregistrer(session_exemple()).await.unwrap();
        assert_eq!(store.courante().await, Some(session_exemple()));

        // Un almacén nuevo sobre el mismo fichero recupera la sesión
        let relu = SessionStore::ouvrir(chemin.clone()).await;
        assert_eq!(relu.courante().await, Some(session_exemple()));

        store.effacer().await.unwrap();
        assert!(store.courante().await.is_none());
        let vide = SessionStore::ouvrir(chemin).await;
        assert!(vide.courante().await.is_none());
    }

    #[tokio::test]
    async fn test_exiger_sans_session() {
        let chemin = chemin_temporaire("exiger");
        let store = SessionStore::ouvrir(chemin).await;
        let erreur = store.exiger().await.unwrap_err();
        assert!(matches!(erreur, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_fichier_corrompu_ignore() {
        let chemin = chemin_temporaire("corrompu");
        tokio::fs::write(&chemin, b"pas du json").await.unwrap();
        let store = SessionStore::ouvrir(chemin.clone()).await;
        assert!(store.courante().await.is_none());
        tokio::fs::remove_file(chemin).await.ok();
    }

    #[tokio::test]
    async fn test_effacer_sans_fichier_est_idempotent() {
        let chemin = chemin_temporaire("idempotent");
        let store = SessionStore::ouvrir(chemin).await;
        store.effacer().await.unwrap();
        store.effacer().await.unwrap();
    }
}
