//! Cálculo de duración y presupuesto
//!
//! Duración en días = techo de la diferencia en milisegundos / 1 día.
//! Presupuesto = precio/día × días × 1.19 (19% de IVA), redondeado a
//! 2 decimales. Sin precio/día no hay presupuesto: None, nunca 0.

use crate::services::disponibilite::PlageLocation;

/// Multiplicador de IVA aplicado a todo presupuesto
pub const TAUX_TVA: f64 = 1.19;

const MILLIS_PAR_JOUR: f64 = 86_400_000.0;

/// Número de días facturables de la ventana: techo sobre la diferencia
/// absoluta fecha+hora, igual que lo calculaba la app
pub fn duree_jours(plage: &PlageLocation) -> i64 {
    let millis = (plage.retour - plage.debut).num_milliseconds().abs() as f64;
    (millis / MILLIS_PAR_JOUR).ceil() as i64
}

/// Presupuesto con IVA para un vehículo, o None si el vehículo no tiene
/// precio por día (caso distinto de "gratis")
pub fn devis(prix_jour: Option<f64>, duree_jours: i64) -> Option<f64> {
    prix_jour.map(|prix| round2(prix * duree_jours as f64 * TAUX_TVA))
}

/// Redondeo a 2 decimales
pub fn round2(valeur: f64) -> f64 {
    (valeur * 100.0).round() / 100.0
}
