// src/db/hotel_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::scope::HotelScope,
    models::hotel::{Hotel, UpdateHotelSettingsRequest, UpdateSubscriptionRequest, UserHotel},
};

#[derive(Clone)]
pub struct HotelRepository {
    pool: PgPool,
}

impl HotelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Verifica se um usuário é membro do hotel.
    /// É a verificação de autorização mais importante da API.
    pub async fn check_user_hotel(&self, user_id: Uuid, hotel_id: Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM user_hotels WHERE user_id = $1 AND hotel_id = $2)",
        )
        .bind(user_id)
        .bind(hotel_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Busca sem escopo: usado só pelos guards, pelo funil público e pelo super-admin.
    pub async fn find_by_id(&self, hotel_id: Uuid) -> Result<Option<Hotel>, AppError> {
        let hotel = sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = $1")
            .bind(hotel_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(hotel)
    }

    pub async fn get(&self, scope: &HotelScope) -> Result<Hotel, AppError> {
        self.find_by_id(scope.hotel_id()).await?.ok_or(AppError::HotelNotFound)
    }

    pub async fn create_hotel<'e, E>(
        &self,
        executor: E,
        name: &str,
        phone: Option<&str>,
        trial_ends_at: DateTime<Utc>,
    ) -> Result<Hotel, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let hotel = sqlx::query_as::<_, Hotel>(
            r#"
            INSERT INTO hotels (name, phone, subscription_status, trial_ends_at)
            VALUES ($1, $2, 'trial', $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(trial_ends_at)
        .fetch_one(executor)
        .await?;

        Ok(hotel)
    }

    pub async fn assign_user_to_hotel<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        hotel_id: Uuid,
    ) -> Result<UserHotel, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let link = sqlx::query_as::<_, UserHotel>(
            "INSERT INTO user_hotels (user_id, hotel_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(hotel_id)
        .fetch_one(executor)
        .await?;

        Ok(link)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Hotel>, AppError> {
        let hotels = sqlx::query_as::<_, Hotel>(
            r#"
            SELECT h.* FROM hotels h
            INNER JOIN user_hotels uh ON uh.hotel_id = h.id
            WHERE uh.user_id = $1
            ORDER BY h.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(hotels)
    }

    // Atualização parcial: COALESCE mantém o valor atual quando o campo não veio
    pub async fn update_settings(
        &self,
        scope: &HotelScope,
        req: &UpdateHotelSettingsRequest,
    ) -> Result<Hotel, AppError> {
        sqlx::query_as::<_, Hotel>(
            r#"
            UPDATE hotels SET
                name = COALESCE($2, name),
                brand_color = COALESCE($3, brand_color),
                tax_rate = COALESCE($4, tax_rate),
                phone = COALESCE($5, phone),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(scope.hotel_id())
        .bind(req.name.as_deref())
        .bind(req.brand_color.as_deref())
        .bind(req.tax_rate)
        .bind(req.phone.as_deref())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::HotelNotFound)
    }

    // --- Console do super-admin (sem escopo de tenant) ---

    pub async fn list_all(&self) -> Result<Vec<Hotel>, AppError> {
        let hotels = sqlx::query_as::<_, Hotel>("SELECT * FROM hotels ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(hotels)
    }

    pub async fn update_subscription(
        &self,
        hotel_id: Uuid,
        req: &UpdateSubscriptionRequest,
    ) -> Result<Hotel, AppError> {
        sqlx::query_as::<_, Hotel>(
            r#"
            UPDATE hotels SET
                subscription_status = COALESCE($2, subscription_status),
                trial_ends_at = COALESCE($3, trial_ends_at),
                commission_rate = COALESCE($4, commission_rate),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(hotel_id)
        .bind(req.subscription_status)
        .bind(req.trial_ends_at)
        .bind(req.commission_rate)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::HotelNotFound)
    }
}
