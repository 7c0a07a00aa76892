// src/domain/assistant.rs
//
// Fronteira com as funções de IA (OCR de documento e comando de voz).
// O modelo responde texto livre que *deveria* ser JSON; aqui só validamos o
// envelope e devolvemos tipos fechados. A chamada ao modelo fica fora da API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

/// Recorta o objeto JSON de dentro de cercas Markdown (```json ... ```) ou
/// de qualquer texto ao redor.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

// --- Escaneamento de documento ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScan {
    error: Option<String>,
    doc_number: Option<String>,
    full_name: Option<String>,
    blood_type: Option<String>,
    nationality: Option<String>,
    birth_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentScan {
    pub doc_number: String,
    pub full_name: Option<String>,
    pub blood_type: Option<String>,
    pub nationality: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<NaiveDate>,
}

pub fn parse_document_scan(raw: &str) -> Result<DocumentScan, AppError> {
    let json = extract_json_object(raw).ok_or_else(|| AppError::ScanUnreadable("malformed_json".into()))?;
    let scan: RawScan = serde_json::from_str(json).map_err(|_| AppError::ScanUnreadable("malformed_json".into()))?;

    if let Some(reason) = scan.error {
        return Err(AppError::ScanUnreadable(reason));
    }

    let doc_number = scan
        .doc_number
        .map(|n| n.chars().filter(|c| !c.is_whitespace() && *c != '.').collect::<String>())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::ScanUnreadable("missing_doc_number".into()))?;

    Ok(DocumentScan {
        doc_number,
        full_name: non_blank(scan.full_name),
        blood_type: non_blank(scan.blood_type),
        nationality: non_blank(scan.nationality).map(|n| n.to_uppercase()),
        // O OCR devolve datas em formatos variados; o que não reconhecemos vira None
        birth_date: scan.birth_date.as_deref().and_then(parse_loose_date),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw.trim(), fmt).ok())
}

// --- Comando de voz ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VoiceAction {
    CreateBooking,
    CheckIn,
    CheckOut,
    CancelBooking,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCommand {
    pub action: VoiceAction,
    /// Parâmetros extraídos pelo modelo (quarto, datas, hóspede...)
    #[serde(default)]
    pub data: Value,
    #[serde(default, alias = "confirmation_message")]
    pub confirmation_message: String,
}

/// Intenção de reserva extraída da fala; o front pré-preenche o wizard com ela.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingIntent {
    pub room_id: Option<Uuid>,
    pub room_name: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub check_in: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub check_out: Option<NaiveDate>,
    pub guest_name: Option<String>,
}

impl VoiceCommand {
    pub fn booking_intent(&self) -> Option<BookingIntent> {
        if self.action != VoiceAction::CreateBooking {
            return None;
        }
        serde_json::from_value(self.data.clone()).ok()
    }
}

pub fn parse_voice_command(raw: &str) -> Result<VoiceCommand, AppError> {
    let json = extract_json_object(raw).ok_or_else(|| AppError::VoiceCommandInvalid("malformed_json".into()))?;
    serde_json::from_str(json).map_err(|e| AppError::VoiceCommandInvalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_inside_code_fences_is_accepted() {
        let raw = "```json\n{\"docNumber\": \"1.020.304.050\", \"fullName\": \"ANA GOMEZ\", \"bloodType\": \"O+\", \"nationality\": \"co\", \"birthDate\": \"20/05/1990\"}\n```";
        let scan = parse_document_scan(raw).unwrap();

        assert_eq!(scan.doc_number, "1020304050");
        assert_eq!(scan.full_name.as_deref(), Some("ANA GOMEZ"));
        assert_eq!(scan.nationality.as_deref(), Some("CO"));
        assert_eq!(scan.birth_date, NaiveDate::from_ymd_opt(1990, 5, 20));
    }

    #[test]
    fn unreadable_scans_carry_the_reason() {
        match parse_document_scan(r#"{"error": "ilegible"}"#) {
            Err(AppError::ScanUnreadable(reason)) => assert_eq!(reason, "ilegible"),
            other => panic!("esperava ScanUnreadable, veio {:?}", other),
        }
        assert!(matches!(parse_document_scan("not json at all"), Err(AppError::ScanUnreadable(r)) if r == "malformed_json"));
        assert!(matches!(parse_document_scan(r#"{"fullName": "X", "docNumber": "  "}"#), Err(AppError::ScanUnreadable(r)) if r == "missing_doc_number"));
    }

    #[test]
    fn voice_command_unknown_actions_degrade_gracefully() {
        let cmd = parse_voice_command(r#"{"action": "order_pizza", "data": {}, "confirmationMessage": "¿Qué?"}"#).unwrap();
        assert_eq!(cmd.action, VoiceAction::Unknown);
        assert!(cmd.booking_intent().is_none());
    }

    #[test]
    fn voice_booking_intent_is_extracted() {
        let raw = "```\n{\"action\":\"create_booking\",\"data\":{\"roomName\":\"101\",\"checkIn\":\"2024-03-01\",\"checkOut\":\"2024-03-03\",\"guestName\":\"Ana\"},\"confirmationMessage\":\"Reservo la 101\"}\n```";
        let cmd = parse_voice_command(raw).unwrap();
        let intent = cmd.booking_intent().unwrap();

        assert_eq!(intent.room_name.as_deref(), Some("101"));
        assert_eq!(intent.check_in, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(cmd.confirmation_message, "Reservo la 101");
    }

    #[test]
    fn voice_accepts_snake_case_confirmation() {
        let cmd = parse_voice_command(r#"{"action":"check_in","data":{},"confirmation_message":"Listo, check-in"}"#).unwrap();
        assert_eq!(cmd.action, VoiceAction::CheckIn);
        assert_eq!(cmd.confirmation_message, "Listo, check-in");
    }

    #[test]
    fn voice_without_json_is_rejected() {
        assert!(matches!(parse_voice_command("lo siento"), Err(AppError::VoiceCommandInvalid(_))));
    }
}
