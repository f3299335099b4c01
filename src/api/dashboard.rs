//! Handler del tablero del cliente
//!
//! Totales de la pantalla de inicio: suma de contratos, de pagos y de
//! avances, y el resto a pagar. Los tres feeds se piden en paralelo.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::models::client_profil::{Avance, Paiement};
use crate::models::contrat::Contrat;
use crate::services::tarification::round2;
use crate::state::AppState;
use crate::utils::errors::AppResult;

/// Totales agregados del cliente
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_contrats: f64,
    pub total_paiements: f64,
    pub total_avances: f64,
    pub reste_a_payer: f64,
}

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/", get(consulter_dashboard))
}

pub async fn consulter_dashboard(
    State(app_state): State<AppState>,
) -> AppResult<Json<DashboardResponse>> {
    let session = app_state.session.exiger().await?;
    let cin = &session.cin_client;

    let (contrats, paiements, avances) = tokio::try_join!(
        app_state.rental_api.contrats_du_client(cin),
        app_state.rental_api.paiements_du_client(cin),
        app_state.rental_api.avances_du_client(cin),
    )?;

    Ok(Json(totaux(&contrats, &paiements, &avances)))
}

fn totaux(contrats: &[Contrat], paiements: &[Paiement], avances: &[Avance]) -> DashboardResponse {
    let total_contrats: f64 = contrats.iter().filter_map(|c| c.prix_total).sum();
    let total_paiements: f64 = paiements.iter().map(Paiement::total).sum();
    let total_avances: f64 = avances.iter().map(Avance::total).sum();

    DashboardResponse {
        total_contrats: round2(total_contrats),
        total_paiements: round2(total_paiements),
        total_avances: round2(total_avances),
        reste_a_payer: round2(total_contrats - total_paiements - total_avances),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contrat(prix_total: Option<f64>) -> Contrat {
        Contrat {
            date_debut: "2024-01-10T09:00:00Z".parse().unwrap(),
            date_retour: "2024-01-15T17:00:00Z".parse().unwrap(),
            num_immatriculation: None,
            prix_total,
            cin_client: None,
        }
    }

    #[test]
    fn test_totaux() {
        let contrats = vec![contrat(Some(714.0)), contrat(None), contrat(Some(100.5))];
        let paiements = vec![Paiement {
            montant_cheque1: Some(200.0),
            montant_cheque2: None,
            montant_espace: Some(50.0),
            montant_virement: None,
        }];
        let avances = vec![Avance {
            montant_cheque1: None,
            montant_cheque2: None,
            montant_espace: Some(14.5),
            montant_virement: None,
        }];

        let dashboard = totaux(&contrats, &paiements, &avances);
        assert_eq!(dashboard.total_contrats, 814.5);
        assert_eq!(dashboard.total_paiements, 250.0);
        assert_eq!(dashboard.total_avances, 14.5);
        assert_eq!(dashboard.reste_a_payer, 550.0);
    }

    #[test]
    fn test_totaux_vides() {
        let dashboard = totaux(&[], &[], &[]);
        assert_eq!(dashboard.total_contrats, 0.0);
        assert_eq!(dashboard.reste_a_payer, 0.0);
    }
}
