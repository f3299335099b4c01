//! Motor de disponibilidad
//!
//! Función pura que resta del catálogo los vehículos ya ocupados por
//! contratos o reservas que se solapan con la ventana pedida. Esta lógica
//! estaba duplicada en tres pantallas de la app; aquí vive una sola vez.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::models::contrat::Contrat;
use crate::models::reservation::{EtatReservation, Reservation};
use crate::models::vehicule::Vehicule;

/// Ventana de alquiler pedida: fecha+hora de salida y de retorno.
/// Invariante esperado: `retour` estrictamente posterior a `debut`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlageLocation {
    pub debut: DateTime<Utc>,
    pub retour: DateTime<Utc>,
}

impl PlageLocation {
    pub fn new(debut: DateTime<Utc>, retour: DateTime<Utc>) -> Self {
        Self { debut, retour }
    }

    /// Construir la ventana combinando fecha y hora elegidas por separado
    /// en el formulario
    pub fn depuis_formulaire(
        date_debut: NaiveDate,
        heure_debut: NaiveTime,
        date_retour: NaiveDate,
        heure_retour: NaiveTime,
    ) -> Self {
        Self {
            debut: Utc.from_utc_datetime(&date_debut.and_time(heure_debut)),
            retour: Utc.from_utc_datetime(&date_retour.and_time(heure_retour)),
        }
    }

    pub fn est_valide(&self) -> bool {
        self.retour > self.debut
    }

    /// Solapamiento de intervalos semiabiertos: [debut, retour) toca
    /// [autre_debut, autre_retour) sin contar el contacto en el borde
    pub fn chevauche(&self, autre_debut: DateTime<Utc>, autre_retour: DateTime<Utc>) -> bool {
        autre_debut < self.retour && autre_retour > self.debut
    }
}

/// Calcular los vehículos libres para la ventana pedida.
///
/// - Todo contrato que se solapa bloquea su vehículo, sin importar nada más.
/// - Una reserva solapada bloquea si está aceptada o rechazada (ya decidida),
///   o si está pendiente y no es la propia reserva en edición
///   (`exclure_reservation`).
/// - Los vehículos sin matrícula nunca se bloquean y se conservan en el
///   resultado.
/// - Si la ventana es inválida (retour <= debut) no hay nada disponible.
///
/// El orden relativo del catálogo de entrada se conserva.
pub fn vehicules_disponibles(
    plage: &PlageLocation,
    vehicules: Vec<Vehicule>,
    contrats: &[Contrat],
    reservations: &[Reservation],
    exclure_reservation: Option<i64>,
) -> Vec<Vehicule> {
    if !plage.est_valide() {
        return Vec::new();
    }

    let mut bloquees: HashSet<&str> = HashSet::new();

    for contrat in contrats {
        if plage.chevauche(contrat.date_debut, contrat.date_retour) {
            if let Some(num) = contrat.num_immatriculation.as_deref() {
                bloquees.insert(num);
            }
        }
    }

    for reservation in reservations {
        if !plage.chevauche(reservation.date_debut, reservation.date_retour) {
            continue;
        }
        let bloque = match reservation.etat() {
            // Ya decididas: se mantienen fuera del catálogo para no dar
            // información contradictoria
            EtatReservation::Accepte | EtatReservation::Rejete => true,
            // Pendiente: bloquea salvo que sea la reserva que se está editando
            EtatReservation::EnAttente => exclure_reservation != Some(reservation.id_reservation),
            EtatReservation::Inconnu => false,
        };
        if bloque {
            if let Some(num) = reservation.num_immatriculation.as_deref() {
                bloquees.insert(num);
            }
        }
    }

    vehicules
        .into_iter()
        .filter(|v| match v.num_immatriculation.as_deref() {
            Some(num) => !bloquees.contains(num),
            None => true,
        })
        .collect()
}
