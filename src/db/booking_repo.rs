// src/db/booking_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_booking_write_error, error::AppError},
    db::scope::HotelScope,
    models::booking::{Booking, BookingSource, BookingStatus, Charge, Payment, PaymentMethod},
};

/// Linha nova de `bookings` já decidida pelo serviço (preço calculado, status escolhido)
#[derive(Debug, Clone)]
pub struct NewBooking<'a> {
    pub room_id: Uuid,
    pub guest_id: Option<Uuid>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: BookingStatus,
    pub total_price: Decimal,
    pub source: BookingSource,
    pub guests_count: i32,
    pub notes: Option<&'a str>,
}

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  RESERVAS
    // =========================================================================

    /// Reservas que tocam `[from, to)`, em ordem de criação
    /// (a ordem importa para o desempate das células do calendário).
    pub async fn list_in_range(
        &self,
        scope: &HotelScope,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE hotel_id = $1 AND check_in < $3 AND check_out > $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(scope.hotel_id())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Reservas ativas do quarto que colidem com o período, travadas até o fim
    /// da transação para que duas recepções não vendam a mesma noite.
    pub async fn lock_conflicts<'e, E>(
        &self,
        executor: E,
        scope: &HotelScope,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE hotel_id = $1 AND room_id = $2
              AND status NOT IN ('cancelled', 'checked_out')
              AND check_in < $4 AND check_out > $3
            ORDER BY created_at ASC
            FOR UPDATE
            "#,
        )
        .bind(scope.hotel_id())
        .bind(room_id)
        .bind(check_in)
        .bind(check_out)
        .fetch_all(executor)
        .await?;

        Ok(bookings)
    }

    pub async fn find<'e, E>(&self, executor: E, scope: &HotelScope, booking_id: Uuid) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE hotel_id = $1 AND id = $2")
            .bind(scope.hotel_id())
            .bind(booking_id)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::BookingNotFound)
    }

    /// Igual a `find`, mas trava a linha (check-in/out, pagamentos concorrentes)
    pub async fn find_for_update<'e, E>(
        &self,
        executor: E,
        scope: &HotelScope,
        booking_id: Uuid,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE hotel_id = $1 AND id = $2 FOR UPDATE")
            .bind(scope.hotel_id())
            .bind(booking_id)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::BookingNotFound)
    }

    /// Hóspede hospedado agora no quarto (destino da conta do room service)
    pub async fn find_checked_in_for_room<'e, E>(
        &self,
        executor: E,
        scope: &HotelScope,
        room_id: Uuid,
    ) -> Result<Option<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE hotel_id = $1 AND room_id = $2 AND status = 'checked_in'
            ORDER BY check_in DESC
            LIMIT 1
            "#,
        )
        .bind(scope.hotel_id())
        .bind(room_id)
        .fetch_optional(executor)
        .await?;

        Ok(booking)
    }

    pub async fn insert<'e, E>(&self, executor: E, scope: &HotelScope, new: &NewBooking<'_>) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                hotel_id, room_id, guest_id, check_in, check_out,
                status, total_price, source, guests_count, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(scope.hotel_id())
        .bind(new.room_id)
        .bind(new.guest_id)
        .bind(new.check_in)
        .bind(new.check_out)
        .bind(new.status)
        .bind(new.total_price)
        .bind(new.source)
        .bind(new.guests_count)
        .bind(new.notes)
        .fetch_one(executor)
        .await
        .map_err(|e| map_booking_write_error(e, new.room_id))
    }

    /// Grava quarto/datas/preço/hóspedes/notas de uma reserva já validada
    pub async fn update_stay<'e, E>(&self, executor: E, scope: &HotelScope, booking: &Booking) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET
                room_id = $3,
                check_in = $4,
                check_out = $5,
                total_price = $6,
                guests_count = $7,
                notes = $8,
                updated_at = NOW()
            WHERE hotel_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(scope.hotel_id())
        .bind(booking.id)
        .bind(booking.room_id)
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(booking.total_price)
        .bind(booking.guests_count)
        .bind(booking.notes.as_deref())
        .fetch_optional(executor)
        .await
        .map_err(|e| map_booking_write_error(e, booking.room_id))?
        .ok_or(AppError::BookingNotFound)
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        scope: &HotelScope,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $3, updated_at = NOW() WHERE hotel_id = $1 AND id = $2 RETURNING *",
        )
        .bind(scope.hotel_id())
        .bind(booking_id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::BookingNotFound)
    }

    /// Pagamentos e consumos saem junto (ON DELETE CASCADE)
    pub async fn delete(&self, scope: &HotelScope, booking_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE hotel_id = $1 AND id = $2")
            .bind(scope.hotel_id())
            .bind(booking_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::BookingNotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  PAGAMENTOS E CONSUMOS
    // =========================================================================

    pub async fn payments_for<'e, E>(&self, executor: E, scope: &HotelScope, booking_id: Uuid) -> Result<Vec<Payment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE hotel_id = $1 AND booking_id = $2 ORDER BY created_at ASC",
        )
        .bind(scope.hotel_id())
        .bind(booking_id)
        .fetch_all(executor)
        .await?;
        Ok(payments)
    }

    pub async fn charges_for<'e, E>(&self, executor: E, scope: &HotelScope, booking_id: Uuid) -> Result<Vec<Charge>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let charges = sqlx::query_as::<_, Charge>(
            "SELECT * FROM charges WHERE hotel_id = $1 AND booking_id = $2 ORDER BY created_at ASC",
        )
        .bind(scope.hotel_id())
        .bind(booking_id)
        .fetch_all(executor)
        .await?;
        Ok(charges)
    }

    pub async fn payments_for_bookings(&self, scope: &HotelScope, booking_ids: &[Uuid]) -> Result<Vec<Payment>, AppError> {
        if booking_ids.is_empty() {
            return Ok(Vec::new());
        }
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE hotel_id = $1 AND booking_id = ANY($2) ORDER BY created_at ASC",
        )
        .bind(scope.hotel_id())
        .bind(booking_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(payments)
    }

    pub async fn charges_for_bookings(&self, scope: &HotelScope, booking_ids: &[Uuid]) -> Result<Vec<Charge>, AppError> {
        if booking_ids.is_empty() {
            return Ok(Vec::new());
        }
        let charges = sqlx::query_as::<_, Charge>(
            "SELECT * FROM charges WHERE hotel_id = $1 AND booking_id = ANY($2) ORDER BY created_at ASC",
        )
        .bind(scope.hotel_id())
        .bind(booking_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(charges)
    }

    pub async fn insert_payment<'e, E>(
        &self,
        executor: E,
        scope: &HotelScope,
        booking_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (hotel_id, booking_id, amount, method)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(scope.hotel_id())
        .bind(booking_id)
        .bind(amount)
        .bind(method)
        .fetch_one(executor)
        .await?;
        Ok(payment)
    }

    pub async fn insert_charge<'e, E>(
        &self,
        executor: E,
        scope: &HotelScope,
        booking_id: Uuid,
        description: &str,
        price: Decimal,
    ) -> Result<Charge, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let charge = sqlx::query_as::<_, Charge>(
            r#"
            INSERT INTO charges (hotel_id, booking_id, description, price)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(scope.hotel_id())
        .bind(booking_id)
        .bind(description)
        .bind(price)
        .fetch_one(executor)
        .await?;
        Ok(charge)
    }
}
