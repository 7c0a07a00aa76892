// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// 1. Resumo do Dia (Os Cards do Topo da recepção)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub arrivals_today: usize,     // Reservas confirmadas que entram hoje
    pub departures_today: usize,   // Hospedados que saem hoje
    pub in_house: usize,           // Quartos ocupados agora
    pub maintenance_today: usize,  // Quartos bloqueados hoje
    pub pending_balance: Decimal,  // Saldo a cobrar de quem está hospedado
    /// Ocupação do mês corrente (0..=1)
    #[schema(example = "0.64")]
    pub month_occupancy: Decimal,
    pub month_revenue: Decimal,
}
