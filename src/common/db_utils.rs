use uuid::Uuid;

use crate::common::error::AppError;

// SQLSTATE da constraint de exclusão (reservas sobrepostas no mesmo quarto)
const EXCLUSION_VIOLATION: &str = "23P01";

/// Converte a violação da constraint `bookings_no_overlap` em `RoomUnavailable`.
/// É a última linha de defesa quando duas recepções gravam ao mesmo tempo.
pub(crate) fn map_booking_write_error(e: sqlx::Error, room_id: Uuid) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some(EXCLUSION_VIOLATION) {
            return AppError::RoomUnavailable { room_id };
        }
    }
    e.into()
}

/// Tratamento de erro de chave duplicada
pub(crate) fn map_unique_violation(e: sqlx::Error, message: impl FnOnce() -> String) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::UniqueConstraintViolation(message());
        }
    }
    e.into()
}

/// Linha ainda referenciada por outra tabela (ex: quarto com histórico de reservas)
pub(crate) fn map_foreign_key_violation(e: sqlx::Error, err: AppError) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return err;
        }
    }
    e.into()
}
