//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de fechas
//! y horas recibidas desde los formularios de la app móvil.

use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Formato de hora aceptado por los formularios: HH:MM
    pub static ref RE_HEURE: Regex = Regex::new(r"^\d{2}:\d{2}$").unwrap();
}

/// Validar y convertir string a fecha (YYYY-MM-DD)
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir string a hora (HH:MM)
pub fn validate_heure(value: &str) -> Result<NaiveTime, ValidationError> {
    if !RE_HEURE.is_match(value) {
        let mut error = ValidationError::new("heure");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"HH:MM".to_string());
        return Err(error);
    }
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        let mut error = ValidationError::new("heure");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"HH:MM".to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert_eq!(
            validate_date("2024-01-10").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
        assert!(validate_date("10/01/2024").is_err());
        assert!(validate_date("2024-13-01").is_err());
        assert!(validate_date("").is_err());
    }

    #[test]
    fn test_validate_heure() {
        assert_eq!(
            validate_heure("09:00").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            validate_heure("23:59").unwrap(),
            NaiveTime::from_hms_opt(23, 59, 0).unwrap()
        );
        // Pasa la regex pero no es una hora real
        assert!(validate_heure("99:99").is_err());
        assert!(validate_heure("9:00").is_err());
        assert!(validate_heure("09h00").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("abc").is_ok());
        assert!(validate_not_empty("   ").is_err());
        assert!(validate_not_empty("").is_err());
    }
}
