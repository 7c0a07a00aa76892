// src/services/guest_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{GuestRepository, HotelScope},
    domain::assistant::{parse_document_scan, parse_voice_command},
    models::{
        assistant::{ScanResult, VoiceResult},
        guest::{Guest, UpdateGuestPayload},
    },
};

#[derive(Clone)]
pub struct GuestService {
    guest_repo: GuestRepository,
    pool: PgPool,
}

impl GuestService {
    pub fn new(guest_repo: GuestRepository, pool: PgPool) -> Self {
        Self { guest_repo, pool }
    }

    pub async fn list_guests(&self, scope: &HotelScope, search: Option<&str>) -> Result<Vec<Guest>, AppError> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        self.guest_repo.list(scope, search).await
    }

    pub async fn get_guest(&self, scope: &HotelScope, guest_id: Uuid) -> Result<Guest, AppError> {
        self.guest_repo.find(&self.pool, scope, guest_id).await
    }

    pub async fn update_guest(
        &self,
        scope: &HotelScope,
        guest_id: Uuid,
        payload: &UpdateGuestPayload,
    ) -> Result<Guest, AppError> {
        self.guest_repo.update(scope, guest_id, payload).await
    }

    /// Valida a resposta do OCR e procura o hóspede pelo documento lido
    pub async fn scan_document(&self, scope: &HotelScope, raw: &str) -> Result<ScanResult, AppError> {
        let scan = parse_document_scan(raw).inspect_err(|e| {
            tracing::info!(hotel_id = %scope.hotel_id(), reason = %e, "Documento ilegível");
        })?;

        let existing_guest = self.guest_repo.find_by_document(scope, &scan.doc_number).await?;
        Ok(ScanResult { scan, existing_guest })
    }

    pub fn interpret_voice(&self, raw: &str) -> Result<VoiceResult, AppError> {
        let command = parse_voice_command(raw)?;
        let booking_intent = command.booking_intent();
        Ok(VoiceResult { command, booking_intent })
    }
}
