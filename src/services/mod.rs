//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: el motor
//! de disponibilidad, el cálculo de presupuestos y la orquestación de
//! reservas contra el servidor de alquiler.

pub mod disponibilite;
pub mod reservation_service;
pub mod tarification;

pub use disponibilite::*;
pub use reservation_service::*;
