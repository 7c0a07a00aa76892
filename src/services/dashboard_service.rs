// src/services/dashboard_service.rs

use chrono::{Datelike, NaiveDate};

use crate::{
    common::error::AppError,
    db::HotelScope,
    models::dashboard::DashboardSummary,
    services::booking_service::BookingService,
};

#[derive(Clone)]
pub struct DashboardService {
    booking_service: BookingService,
}

impl DashboardService {
    pub fn new(booking_service: BookingService) -> Self {
        Self { booking_service }
    }

    /// Cards da recepção: chegadas, saídas e hospedados do dia + o mês corrente
    pub async fn get_summary(&self, scope: &HotelScope, today: NaiveDate) -> Result<DashboardSummary, AppError> {
        let calendar = self.booking_service.load_calendar(scope, today.year(), today.month()).await?;
        Ok(calendar.day_summary(today))
    }
}
