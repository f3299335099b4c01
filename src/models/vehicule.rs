//! Modelo de Vehicule
//!
//! Entrada del catálogo de vehículos del servidor de alquiler. El catálogo
//! es de solo lectura desde el punto de vista del cliente móvil.

use serde::{Deserialize, Serialize};

/// Vehículo del catálogo - mapea la respuesta de GET /vehicules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicule {
    /// Matrícula - clave del vehículo. Algunas filas históricas llegan sin
    /// matrícula; se conservan y nunca se consideran bloqueadas.
    pub num_immatriculation: Option<String>,
    pub marque: Option<String>,
    pub modele: Option<String>,
    /// Tipo de combustible
    pub energie: Option<String>,
    /// Precio por día. Ausente ⇒ precio no disponible (distinto de gratis)
    #[serde(default, deserialize_with = "crate::models::de_montant")]
    pub prix_jour: Option<f64>,
    /// Imagen en base64, se transporta como string opaco
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
