// src/models/assistant.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    domain::assistant::{BookingIntent, DocumentScan, VoiceCommand},
    models::guest::Guest,
};

/// Texto cru devolvido pela função de IA (pode vir em cercas Markdown)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssistantPayload {
    #[validate(length(min = 1, max = 20000, message = "too_long"))]
    #[schema(example = "```json\n{\"docNumber\": \"1020304050\", \"fullName\": \"ANA GOMEZ\"}\n```")]
    pub raw: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub scan: DocumentScan,
    /// Hóspede já cadastrado com o mesmo documento (o wizard reaproveita)
    pub existing_guest: Option<Guest>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoiceResult {
    pub command: VoiceCommand,
    pub booking_intent: Option<BookingIntent>,
}
