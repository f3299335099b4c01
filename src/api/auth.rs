//! Handlers de autenticación
//!
//! Login contra el servidor de alquiler y ciclo de vida de la sesión
//! persistida (el equivalente del almacenamiento local del teléfono).

use axum::{extract::State, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::session::SessionClient;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

/// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email invalide"))]
    pub email: String,

    #[validate(length(min = 1, message = "Mot de passe requis"))]
    pub password: String,
}

/// Response de login exitoso
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub client: SessionClient,
}

/// Request de recuperación de contraseña
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Email invalide"))]
    pub email: String,
}

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session))
        .route("/forgot-password", post(forgot_password))
}

/// Handler de login: delega las credenciales al servidor de alquiler y
/// persiste la identidad devuelta
pub async fn login(
    State(app_state): State<AppState>,
    Json(login_data): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    login_data.validate().map_err(AppError::Validation)?;

    let donnees = app_state
        .rental_api
        .login(&login_data.email, &login_data.password)
        .await?;

    // Como en la app: sin cin_client la sesión no sirve para nada
    let cin_client = donnees
        .cin_client
        .ok_or_else(|| AppError::Unauthorized("Identifiants invalides".to_string()))?;

    let session = SessionClient {
        id_client: donnees.id_client,
        cin_client,
        nom: donnees.nom,
        prenom: donnees.prenom,
    };
    app_state.session.enregistrer(session.clone()).await?;

    info!("✅ Client {} connecté", session.id_client);
    Ok(Json(LoginResponse {
        success: true,
        client: session,
    }))
}

/// Handler de logout: borra la sesión persistida
pub async fn logout(State(app_state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    app_state.session.effacer().await?;
    info!("👋 Session effacée");
    Ok(Json(json!({ "success": true })))
}

/// Sesión actual, 401 si nadie está conectado
pub async fn session(State(app_state): State<AppState>) -> AppResult<Json<SessionClient>> {
    let session = app_state.session.exiger().await?;
    Ok(Json(session))
}

/// Reenvío del correo de recuperación de contraseña
pub async fn forgot_password(
    State(app_state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> AppResult<Json<serde_json::Value>> {
    request.validate().map_err(AppError::Validation)?;
    app_state
        .rental_api
        .envoyer_mail_mot_de_passe(&request.email)
        .await?;
    Ok(Json(json!({ "success": true })))
}
