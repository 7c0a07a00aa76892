// src/models/guest.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;
use validator::Validate;

// --- ENUMS ---

// Tipos de documento aceitos pela Migración Colombia (SIRE)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "document_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    /// Cédula de ciudadanía
    Cc,
    /// Cédula de extranjería
    Ce,
    /// Pasaporte
    Pa,
    /// Tarjeta de identidad
    Ti,
    /// Permiso especial de permanencia
    Pep,
}

impl DocumentType {
    pub fn code(self) -> &'static str {
        match self {
            DocumentType::Cc => "CC",
            DocumentType::Ce => "CE",
            DocumentType::Pa => "PA",
            DocumentType::Ti => "TI",
            DocumentType::Pep => "PEP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "gender", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    M,
    F,
    X,
}

// --- HÓSPEDE ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: Uuid,
    #[schema(ignore)]
    pub hotel_id: Uuid,

    #[schema(example = "María Fernanda López")]
    pub full_name: String,
    pub document_type: DocumentType,
    #[schema(example = "1020304050")]
    pub document_number: String,
    /// Código do país (ISO alpha-2), ex: "CO"
    #[schema(example = "CO")]
    pub nationality: String,

    pub phone: Option<String>,
    pub email: Option<String>,
    #[schema(value_type = Option<String>, format = Date, example = "1990-05-20")]
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    #[schema(example = "O+")]
    pub blood_type: Option<String>,

    // Auditoria legal (check-in assinado)
    pub consent_signed_at: Option<DateTime<Utc>>,
    pub signature_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dados de hóspede vindos do wizard/funil. Chave de deduplicação: `document_number`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestInput {
    #[validate(length(min = 1, message = "required"))]
    pub full_name: String,
    pub document_type: DocumentType,
    #[validate(length(min = 3, message = "invalid_document"))]
    pub document_number: String,
    #[validate(length(equal = 2, message = "invalid_country_code"))]
    #[serde(default = "default_nationality")]
    pub nationality: String,
    pub phone: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub blood_type: Option<String>,
}

fn default_nationality() -> String {
    "CO".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGuestPayload {
    #[validate(length(min = 1, message = "required"))]
    pub full_name: Option<String>,
    #[validate(length(equal = 2, message = "invalid_country_code"))]
    pub nationality: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub blood_type: Option<String>,
    pub consent_signed_at: Option<DateTime<Utc>>,
    pub signature_url: Option<String>,
}
