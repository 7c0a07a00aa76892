use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Nosso tipo de erro de domínio/serviço. Os handlers nunca devolvem isto direto:
// passa sempre por `to_api_error` para sair traduzido.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // --- Autenticação / acesso ---
    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Usuário sem acesso ao hotel {0}")]
    HotelAccessDenied(Uuid),

    #[error("Ação restrita ao super-admin")]
    SuperAdminRequired,

    #[error("Assinatura do hotel suspensa")]
    SubscriptionSuspended,

    // --- Não encontrados ---
    #[error("Hotel não encontrado")]
    HotelNotFound,

    #[error("Quarto não encontrado")]
    RoomNotFound,

    #[error("Hóspede não encontrado")]
    GuestNotFound,

    #[error("Reserva não encontrada")]
    BookingNotFound,

    #[error("Item do cardápio {0} não encontrado")]
    MenuItemNotFound(Uuid),

    #[error("Pedido não encontrado")]
    OrderNotFound,

    #[error("Lead não encontrado")]
    LeadNotFound,

    // --- Regras de reserva ---
    #[error("Intervalo de datas inválido")]
    InvalidDateRange,

    #[error("Quarto {room_id} indisponível no período")]
    RoomUnavailable { room_id: Uuid },

    #[error("Quarto em manutenção")]
    RoomInMaintenance,

    #[error("Capacidade do quarto excedida (máx. {capacity})")]
    CapacityExceeded { capacity: i32 },

    #[error("Transição de status inválida: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Reserva encerrada não pode ser alterada")]
    BookingClosed,

    #[error("Saldo pendente de {pending}")]
    PendingBalance { pending: Decimal },

    #[error("Valor inválido")]
    InvalidAmount,

    #[error("Quarto possui reservas ativas")]
    RoomHasActiveBookings,

    #[error("Telefone ausente ou inválido")]
    InvalidPhone,

    // --- Room service ---
    #[error("Item {0} indisponível")]
    MenuItemUnavailable(Uuid),

    #[error("Pedido sem itens")]
    EmptyOrder,

    // --- Adaptadores externos (OCR / voz) ---
    #[error("Documento ilegível: {0}")]
    ScanUnreadable(String),

    #[error("Comando de voz inválido: {0}")]
    VoiceCommandInvalid(String),

    // --- Infra ---
    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Código estável (chave do catálogo de traduções e campo `code` da resposta)
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::EmailAlreadyExists => "email_already_exists",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::UserNotFound => "user_not_found",
            AppError::HotelAccessDenied(_) => "hotel_access_denied",
            AppError::SuperAdminRequired => "super_admin_required",
            AppError::SubscriptionSuspended => "subscription_suspended",
            AppError::HotelNotFound => "hotel_not_found",
            AppError::RoomNotFound => "room_not_found",
            AppError::GuestNotFound => "guest_not_found",
            AppError::BookingNotFound => "booking_not_found",
            AppError::MenuItemNotFound(_) => "menu_item_not_found",
            AppError::OrderNotFound => "order_not_found",
            AppError::LeadNotFound => "lead_not_found",
            AppError::InvalidDateRange => "invalid_date_range",
            AppError::RoomUnavailable { .. } => "room_unavailable",
            AppError::RoomInMaintenance => "room_in_maintenance",
            AppError::CapacityExceeded { .. } => "capacity_exceeded",
            AppError::InvalidStatusTransition { .. } => "invalid_status_transition",
            AppError::BookingClosed => "booking_closed",
            AppError::PendingBalance { .. } => "pending_balance",
            AppError::InvalidAmount => "invalid_amount",
            AppError::RoomHasActiveBookings => "room_has_active_bookings",
            AppError::InvalidPhone => "invalid_phone",
            AppError::MenuItemUnavailable(_) => "menu_item_unavailable",
            AppError::EmptyOrder => "empty_order",
            AppError::ScanUnreadable(_) => "scan_unreadable",
            AppError::VoiceCommandInvalid(_) => "voice_command_invalid",
            AppError::UniqueConstraintViolation(_) => "unique_violation",
            AppError::FontNotFound(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidDateRange
            | AppError::InvalidAmount
            | AppError::InvalidPhone
            | AppError::EmptyOrder
            | AppError::CapacityExceeded { .. } => StatusCode::BAD_REQUEST,

            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::SubscriptionSuspended => StatusCode::PAYMENT_REQUIRED,
            AppError::HotelAccessDenied(_) | AppError::SuperAdminRequired => StatusCode::FORBIDDEN,

            AppError::UserNotFound
            | AppError::HotelNotFound
            | AppError::RoomNotFound
            | AppError::GuestNotFound
            | AppError::BookingNotFound
            | AppError::MenuItemNotFound(_)
            | AppError::OrderNotFound
            | AppError::LeadNotFound => StatusCode::NOT_FOUND,

            AppError::EmailAlreadyExists
            | AppError::RoomUnavailable { .. }
            | AppError::RoomInMaintenance
            | AppError::InvalidStatusTransition { .. }
            | AppError::BookingClosed
            | AppError::PendingBalance { .. }
            | AppError::RoomHasActiveBookings
            | AppError::MenuItemUnavailable(_)
            | AppError::UniqueConstraintViolation(_) => StatusCode::CONFLICT,

            AppError::ScanUnreadable(_) | AppError::VoiceCommandInvalid(_) => StatusCode::UNPROCESSABLE_ENTITY,

            AppError::FontNotFound(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Valores interpolados na mensagem traduzida ("{pending}", "{capacity}"...)
    fn message_args(&self) -> Vec<(&'static str, String)> {
        match self {
            AppError::PendingBalance { pending } => vec![("pending", pending.round_dp(2).to_string())],
            AppError::CapacityExceeded { capacity } => vec![("capacity", capacity.to_string())],
            AppError::InvalidStatusTransition { from, to } => vec![("from", from.clone()), ("to", to.clone())],
            AppError::ScanUnreadable(reason) | AppError::VoiceCommandInvalid(reason) => {
                vec![("reason", reason.clone())]
            }
            _ => Vec::new(),
        }
    }

    fn details(&self, locale: &Locale, store: &I18nStore) -> Option<Value> {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            let code = e.message.as_ref().map(|m| m.to_string()).unwrap_or_else(|| e.code.to_string());
                            store.translate(&locale.0, &format!("validation.{}", code), &[])
                        })
                        .collect();
                    details.insert(field.to_string(), json!(messages));
                }
                Some(Value::Object(details))
            }
            AppError::PendingBalance { pending } => Some(json!({ "pending": pending })),
            AppError::RoomUnavailable { room_id } => Some(json!({ "roomId": room_id })),
            AppError::HotelAccessDenied(hotel_id) => Some(json!({ "hotelId": hotel_id })),
            AppError::MenuItemNotFound(item_id) | AppError::MenuItemUnavailable(item_id) => {
                Some(json!({ "menuItemId": item_id }))
            }
            _ => None,
        }
    }

    /// Converte para a resposta HTTP no idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();

        // O `tracing` loga a mensagem detalhada; o cliente só vê a genérica.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        ApiError {
            status,
            code: self.code().to_string(),
            error: store.translate(&locale.0, self.code(), &self.message_args()),
            details: self.details(locale, store),
        }
    }
}

// Erro pronto para o fio: status + mensagem já traduzida
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub error: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, error: impl Into<String>) -> Self {
        Self { status, code: code.to_string(), error: error.into(), details: None }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "error": self.error, "code": self.code });
        if let Some(details) = self.details {
            body["details"] = details;
        }
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn store() -> I18nStore {
        I18nStore::load_embedded().expect("catálogos embutidos")
    }

    #[test]
    fn pending_balance_is_a_conflict_with_the_amount_in_details() {
        let err = AppError::PendingBalance { pending: Decimal::from(100000) };
        let api = err.to_api_error(&Locale("es".into()), &store());

        assert_eq!(api.status, StatusCode::CONFLICT);
        assert_eq!(api.code, "pending_balance");
        assert!(api.error.contains("100000"), "mensagem: {}", api.error);
        assert_eq!(api.details, Some(json!({ "pending": Decimal::from(100000) })));
    }

    #[test]
    fn suspended_subscription_maps_to_payment_required() {
        assert_eq!(AppError::SubscriptionSuspended.status(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(AppError::RoomUnavailable { room_id: Uuid::nil() }.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::ScanUnreadable("ilegible".into()).status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let err = AppError::InternalServerError(anyhow::anyhow!("pool exhausted at 10.0.0.3"));
        let api = err.to_api_error(&Locale("en".into()), &store());

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("10.0.0.3"));
        assert!(api.details.is_none());
    }

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "required"))]
        name: String,
    }

    #[test]
    fn validation_details_are_translated_per_field() {
        let errors = Probe { name: String::new() }.validate().unwrap_err();
        let api = AppError::from(errors).to_api_error(&Locale("es".into()), &store());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("detalhes por campo");
        let messages = details["name"].as_array().expect("lista de mensagens");
        assert_eq!(messages.len(), 1);
        assert_ne!(messages[0], "validation.required");
    }
}
