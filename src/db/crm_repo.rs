// src/db/crm_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::scope::HotelScope,
    models::crm::{
        CreateHuntedLeadPayload, CreateLeadPayload, HuntedLead, HuntedLeadStatus, Lead, LeadStatus,
        UpdateHuntedLeadPayload,
    },
};

#[derive(Clone)]
pub struct CrmRepository {
    pool: PgPool,
}

impl CrmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  LEADS DO HOTEL (por tenant)
    // =========================================================================

    pub async fn create_lead(&self, scope: &HotelScope, payload: &CreateLeadPayload) -> Result<Lead, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (hotel_id, full_name, phone, email, check_in, check_out, message)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(scope.hotel_id())
        .bind(payload.full_name.trim())
        .bind(payload.phone.as_deref())
        .bind(payload.email.as_deref())
        .bind(payload.check_in)
        .bind(payload.check_out)
        .bind(payload.message.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(lead)
    }

    /// Abas do CRM: `status = None` traz todos
    pub async fn list_leads(&self, scope: &HotelScope, status: Option<LeadStatus>) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>(
            r#"
            SELECT * FROM leads
            WHERE hotel_id = $1 AND ($2::lead_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(scope.hotel_id())
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }

    pub async fn update_lead_status(
        &self,
        scope: &HotelScope,
        lead_id: Uuid,
        status: LeadStatus,
    ) -> Result<Lead, AppError> {
        sqlx::query_as::<_, Lead>("UPDATE leads SET status = $3 WHERE hotel_id = $1 AND id = $2 RETURNING *")
            .bind(scope.hotel_id())
            .bind(lead_id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::LeadNotFound)
    }

    // =========================================================================
    //  HUNTER (plataforma, sem tenant; só o super-admin chega aqui)
    // =========================================================================

    pub async fn create_hunted_lead(&self, payload: &CreateHuntedLeadPayload) -> Result<HuntedLead, AppError> {
        let lead = sqlx::query_as::<_, HuntedLead>(
            r#"
            INSERT INTO hunted_leads (business_name, city, address, phone, website, rating, pitch)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(payload.business_name.trim())
        .bind(payload.city.as_deref())
        .bind(payload.address.as_deref())
        .bind(payload.phone.as_deref())
        .bind(payload.website.as_deref())
        .bind(payload.rating)
        .bind(payload.pitch.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(lead)
    }

    pub async fn list_hunted_leads(&self, status: Option<HuntedLeadStatus>) -> Result<Vec<HuntedLead>, AppError> {
        let leads = sqlx::query_as::<_, HuntedLead>(
            r#"
            SELECT * FROM hunted_leads
            WHERE ($1::hunted_lead_status IS NULL OR status = $1)
            ORDER BY rating DESC NULLS LAST, created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }

    pub async fn find_hunted_lead(&self, lead_id: Uuid) -> Result<HuntedLead, AppError> {
        sqlx::query_as::<_, HuntedLead>("SELECT * FROM hunted_leads WHERE id = $1")
            .bind(lead_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::LeadNotFound)
    }

    pub async fn update_hunted_lead(
        &self,
        lead_id: Uuid,
        payload: &UpdateHuntedLeadPayload,
    ) -> Result<HuntedLead, AppError> {
        sqlx::query_as::<_, HuntedLead>(
            r#"
            UPDATE hunted_leads SET
                status = COALESCE($2, status),
                pitch = COALESCE($3, pitch),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(lead_id)
        .bind(payload.status)
        .bind(payload.pitch.as_deref())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::LeadNotFound)
    }
}
