mod api;
mod client;
mod config;
mod middleware;
mod models;
mod services;
mod session;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

use tower_http::trace::TraceLayer;

use config::environment::EnvironmentConfig;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(if config.is_development() {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    info!("🚗 Rental Gateway - API mobile de location de véhicules");
    info!("=======================================================");
    info!("🔗 Serveur de location: {}", config.rental_api_url);

    let app_state = match AppState::new(config.clone()).await {
        Ok(state) => state,
        Err(e) => {
            error!("❌ Error inicializando el estado: {}", e);
            return Err(anyhow::anyhow!("Error de inicialización: {}", e));
        }
    };

    // CORS permisivo en desarrollo, orígenes explícitos si se configuran
    let cors = if config.cors_origins.is_empty() {
        if config.is_production() {
            warn!("⚠️ CORS_ORIGINS vacío en producción, CORS permisivo");
        }
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app = Router::new()
        .route("/test", get(test_endpoint))
        .nest("/api", api::create_api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("🔐 Auth:");
    info!("   POST /api/auth/login - Login cliente");
    info!("   POST /api/auth/logout - Borrar sesión");
    info!("   GET  /api/auth/session - Sesión actual");
    info!("   POST /api/auth/forgot-password - Recuperar contraseña");
    info!("🚙 Vehículos:");
    info!("   GET  /api/vehicules - Catálogo");
    info!("   GET  /api/vehicules/:num - Detalle por matrícula");
    info!("📅 Disponibilidad y reservas:");
    info!("   POST /api/disponibilite - Vehículos libres + presupuesto");
    info!("   GET  /api/reservations - Reservas del cliente");
    info!("   POST /api/reservations - Crear reserva");
    info!("   PUT  /api/reservations/:id - Modificar reserva pendiente");
    info!("   DELETE /api/reservations/:id - Anular reserva pendiente");
    info!("📄 Contratos y perfil:");
    info!("   GET  /api/contrats - Contratos del cliente");
    info!("   GET  /api/profil - Perfil del cliente");
    info!("   PUT  /api/profil - Modificar perfil");
    info!("   GET  /api/dashboard - Totales del cliente");

    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Rental Gateway en marche",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
