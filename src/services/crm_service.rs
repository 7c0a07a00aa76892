// src/services/crm_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CrmRepository, HotelScope},
    domain::links::whatsapp_link,
    models::{
        booking::WhatsappLink,
        crm::{
            CreateHuntedLeadPayload, CreateLeadPayload, HuntedLead, HuntedLeadStatus, Lead, LeadStatus,
            UpdateHuntedLeadPayload,
        },
    },
};

#[derive(Clone)]
pub struct CrmService {
    repo: CrmRepository,
}

impl CrmService {
    pub fn new(repo: CrmRepository) -> Self {
        Self { repo }
    }

    // =========================================================================
    //  1. LEADS DO HOTEL
    // =========================================================================

    /// Captura da landing page. Precisa de ao menos um canal de contato.
    pub async fn capture_lead(&self, scope: &HotelScope, payload: &CreateLeadPayload) -> Result<Lead, AppError> {
        let has_contact = [&payload.phone, &payload.email]
            .iter()
            .any(|c| c.as_deref().is_some_and(|v| !v.trim().is_empty()));
        if !has_contact {
            return Err(AppError::ValidationError(missing_contact()));
        }
        if let (Some(check_in), Some(check_out)) = (payload.check_in, payload.check_out) {
            if check_out <= check_in {
                return Err(AppError::InvalidDateRange);
            }
        }

        let lead = self.repo.create_lead(scope, payload).await?;
        tracing::info!(hotel_id = %scope.hotel_id(), lead_id = %lead.id, "Novo lead capturado");
        Ok(lead)
    }

    pub async fn list_leads(&self, scope: &HotelScope, status: Option<LeadStatus>) -> Result<Vec<Lead>, AppError> {
        self.repo.list_leads(scope, status).await
    }

    pub async fn update_lead_status(
        &self,
        scope: &HotelScope,
        lead_id: Uuid,
        status: LeadStatus,
    ) -> Result<Lead, AppError> {
        self.repo.update_lead_status(scope, lead_id, status).await
    }

    // =========================================================================
    //  2. HUNTER (super-admin)
    // =========================================================================

    pub async fn create_hunted_lead(&self, payload: &CreateHuntedLeadPayload) -> Result<HuntedLead, AppError> {
        self.repo.create_hunted_lead(payload).await
    }

    pub async fn list_hunted_leads(&self, status: Option<HuntedLeadStatus>) -> Result<Vec<HuntedLead>, AppError> {
        self.repo.list_hunted_leads(status).await
    }

    pub async fn update_hunted_lead(
        &self,
        lead_id: Uuid,
        payload: &UpdateHuntedLeadPayload,
    ) -> Result<HuntedLead, AppError> {
        self.repo.update_hunted_lead(lead_id, payload).await
    }

    /// Link de abordagem pelo WhatsApp usando o pitch salvo (ou um texto padrão).
    pub async fn hunted_lead_whatsapp(&self, lead_id: Uuid) -> Result<WhatsappLink, AppError> {
        let lead = self.repo.find_hunted_lead(lead_id).await?;
        let phone = lead.phone.as_deref().filter(|p| !p.trim().is_empty()).ok_or(AppError::InvalidPhone)?;

        let message = lead.pitch.clone().unwrap_or_else(|| default_pitch(&lead.business_name));
        let url = whatsapp_link(phone, &message);
        Ok(WhatsappLink { url, message })
    }
}

fn default_pitch(business_name: &str) -> String {
    format!(
        "Hola, equipo de {business_name}. Les escribo porque ayudamos a hoteles \
         independientes a recibir reservas directas sin comisiones. ¿Les puedo mostrar una demo de 10 minutos?"
    )
}

fn missing_contact() -> validator::ValidationErrors {
    let mut errors = validator::ValidationErrors::new();
    errors.add("phone", validator::ValidationError::new("contact_required").with_message("contact_required".into()));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pitch_names_the_business() {
        let pitch = default_pitch("Hostal La Candelaria");
        assert!(pitch.starts_with("Hola, equipo de Hostal La Candelaria."));
    }

    #[test]
    fn missing_contact_is_reported_on_phone() {
        let errors = missing_contact();
        assert!(errors.field_errors().contains_key("phone"));
    }
}
