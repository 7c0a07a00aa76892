// src/db/guest_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::scope::HotelScope,
    models::guest::{Guest, GuestInput, UpdateGuestPayload},
};

#[derive(Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reaproveita o hóspede pelo número de documento ou cria um novo.
    /// Dados novos sobrescrevem os antigos; campos ausentes mantêm o que já havia.
    pub async fn upsert_by_document<'e, E>(
        &self,
        executor: E,
        scope: &HotelScope,
        input: &GuestInput,
    ) -> Result<Guest, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let guest = sqlx::query_as::<_, Guest>(
            r#"
            INSERT INTO guests (
                hotel_id, full_name, document_type, document_number, nationality,
                phone, email, birth_date, gender, blood_type
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (hotel_id, document_number) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                document_type = EXCLUDED.document_type,
                nationality = EXCLUDED.nationality,
                phone = COALESCE(EXCLUDED.phone, guests.phone),
                email = COALESCE(EXCLUDED.email, guests.email),
                birth_date = COALESCE(EXCLUDED.birth_date, guests.birth_date),
                gender = COALESCE(EXCLUDED.gender, guests.gender),
                blood_type = COALESCE(EXCLUDED.blood_type, guests.blood_type),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(scope.hotel_id())
        .bind(input.full_name.trim())
        .bind(input.document_type)
        .bind(input.document_number.trim())
        .bind(input.nationality.to_uppercase())
        .bind(input.phone.as_deref())
        .bind(input.email.as_deref())
        .bind(input.birth_date)
        .bind(input.gender)
        .bind(input.blood_type.as_deref())
        .fetch_one(executor)
        .await?;

        Ok(guest)
    }

    pub async fn find<'e, E>(&self, executor: E, scope: &HotelScope, guest_id: Uuid) -> Result<Guest, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE hotel_id = $1 AND id = $2")
            .bind(scope.hotel_id())
            .bind(guest_id)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::GuestNotFound)
    }

    pub async fn find_by_document(&self, scope: &HotelScope, document_number: &str) -> Result<Option<Guest>, AppError> {
        let guest = sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE hotel_id = $1 AND document_number = $2")
            .bind(scope.hotel_id())
            .bind(document_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(guest)
    }

    /// Registro de hóspedes com busca opcional por nome ou documento
    pub async fn list(&self, scope: &HotelScope, search: Option<&str>) -> Result<Vec<Guest>, AppError> {
        let pattern = search.map(|s| format!("%{}%", s.trim()));

        let guests = sqlx::query_as::<_, Guest>(
            r#"
            SELECT * FROM guests
            WHERE hotel_id = $1
              AND ($2::TEXT IS NULL OR full_name ILIKE $2 OR document_number ILIKE $2)
            ORDER BY full_name ASC
            LIMIT 200
            "#,
        )
        .bind(scope.hotel_id())
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(guests)
    }

    pub async fn list_by_ids(&self, scope: &HotelScope, ids: &[Uuid]) -> Result<Vec<Guest>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let guests = sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE hotel_id = $1 AND id = ANY($2)")
            .bind(scope.hotel_id())
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(guests)
    }

    pub async fn update(
        &self,
        scope: &HotelScope,
        guest_id: Uuid,
        payload: &UpdateGuestPayload,
    ) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            r#"
            UPDATE guests SET
                full_name = COALESCE($3, full_name),
                nationality = COALESCE($4, nationality),
                phone = COALESCE($5, phone),
                email = COALESCE($6, email),
                birth_date = COALESCE($7, birth_date),
                gender = COALESCE($8, gender),
                blood_type = COALESCE($9, blood_type),
                consent_signed_at = COALESCE($10, consent_signed_at),
                signature_url = COALESCE($11, signature_url),
                updated_at = NOW()
            WHERE hotel_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(scope.hotel_id())
        .bind(guest_id)
        .bind(payload.full_name.as_deref())
        .bind(payload.nationality.as_ref().map(|n| n.to_uppercase()))
        .bind(payload.phone.as_deref())
        .bind(payload.email.as_deref())
        .bind(payload.birth_date)
        .bind(payload.gender)
        .bind(payload.blood_type.as_deref())
        .bind(payload.consent_signed_at)
        .bind(payload.signature_url.as_deref())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::GuestNotFound)
    }
}
