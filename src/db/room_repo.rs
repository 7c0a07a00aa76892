// src/db/room_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{map_foreign_key_violation, map_unique_violation},
        error::AppError,
    },
    db::scope::HotelScope,
    models::room::{CreateRoomPayload, Room, RoomStatus, UpdateRoomPayload},
};

#[derive(Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura
    // ---

    pub async fn list(&self, scope: &HotelScope) -> Result<Vec<Room>, AppError> {
        let rooms = sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE hotel_id = $1 ORDER BY name ASC")
            .bind(scope.hotel_id())
            .fetch_all(&self.pool)
            .await?;
        Ok(rooms)
    }

    /// Quartos vendáveis (fora de manutenção), usados pelo funil público
    pub async fn list_active(&self, scope: &HotelScope) -> Result<Vec<Room>, AppError> {
        let rooms = sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE hotel_id = $1 AND status = $2 ORDER BY price ASC, name ASC",
        )
        .bind(scope.hotel_id())
        .bind(RoomStatus::Active)
        .fetch_all(&self.pool)
        .await?;
        Ok(rooms)
    }

    pub async fn find<'e, E>(&self, executor: E, scope: &HotelScope, room_id: Uuid) -> Result<Room, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE hotel_id = $1 AND id = $2")
            .bind(scope.hotel_id())
            .bind(room_id)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::RoomNotFound)
    }

    /// Reservas que ainda seguram o quarto (impede a exclusão)
    pub async fn has_active_bookings(&self, scope: &HotelScope, room_id: Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE hotel_id = $1 AND room_id = $2
                  AND status NOT IN ('cancelled', 'checked_out')
            )
            "#,
        )
        .bind(scope.hotel_id())
        .bind(room_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    // ---
    // Escrita
    // ---

    pub async fn create(&self, scope: &HotelScope, payload: &CreateRoomPayload) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (hotel_id, name, price, capacity, per_person_pricing)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(scope.hotel_id())
        .bind(&payload.name)
        .bind(payload.price)
        .bind(payload.capacity)
        .bind(payload.per_person_pricing)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || format!("Já existe um quarto chamado '{}'", payload.name)))
    }

    pub async fn update(
        &self,
        scope: &HotelScope,
        room_id: Uuid,
        payload: &UpdateRoomPayload,
    ) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms SET
                name = COALESCE($3, name),
                price = COALESCE($4, price),
                capacity = COALESCE($5, capacity),
                per_person_pricing = COALESCE($6, per_person_pricing),
                status = COALESCE($7, status),
                updated_at = NOW()
            WHERE hotel_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(scope.hotel_id())
        .bind(room_id)
        .bind(payload.name.as_deref())
        .bind(payload.price)
        .bind(payload.capacity)
        .bind(payload.per_person_pricing)
        .bind(payload.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || "Já existe um quarto com esse nome".to_string()))?
        .ok_or(AppError::RoomNotFound)
    }

    pub async fn delete(&self, scope: &HotelScope, room_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM rooms WHERE hotel_id = $1 AND id = $2")
            .bind(scope.hotel_id())
            .bind(room_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_foreign_key_violation(e, AppError::RoomHasActiveBookings))?;

        if result.rows_affected() == 0 {
            return Err(AppError::RoomNotFound);
        }
        Ok(())
    }
}
