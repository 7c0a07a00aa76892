// src/db/menu_repo.rs

use rust_decimal::Decimal;
use sqlx::{types::Json, Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::scope::HotelScope,
    models::menu::{
        CreateMenuItemPayload, MenuItem, OrderLine, ServiceOrder, ServiceOrderStatus, UpdateMenuItemPayload,
    },
};

#[derive(Clone)]
pub struct MenuRepository {
    pool: PgPool,
}

impl MenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Cardápio
    // ---

    /// `only_available = true` para o cardápio público
    pub async fn list_items(&self, scope: &HotelScope, only_available: bool) -> Result<Vec<MenuItem>, AppError> {
        let items = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT * FROM menu_items
            WHERE hotel_id = $1 AND ($2 = FALSE OR available)
            ORDER BY category ASC NULLS LAST, name ASC
            "#,
        )
        .bind(scope.hotel_id())
        .bind(only_available)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn items_by_ids<'e, E>(&self, executor: E, scope: &HotelScope, ids: &[Uuid]) -> Result<Vec<MenuItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items WHERE hotel_id = $1 AND id = ANY($2)")
            .bind(scope.hotel_id())
            .bind(ids)
            .fetch_all(executor)
            .await?;
        Ok(items)
    }

    pub async fn create_item(&self, scope: &HotelScope, payload: &CreateMenuItemPayload) -> Result<MenuItem, AppError> {
        let item = sqlx::query_as::<_, MenuItem>(
            r#"
            INSERT INTO menu_items (hotel_id, name, description, price, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(scope.hotel_id())
        .bind(&payload.name)
        .bind(payload.description.as_deref())
        .bind(payload.price)
        .bind(payload.category.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    pub async fn update_item(
        &self,
        scope: &HotelScope,
        item_id: Uuid,
        payload: &UpdateMenuItemPayload,
    ) -> Result<MenuItem, AppError> {
        sqlx::query_as::<_, MenuItem>(
            r#"
            UPDATE menu_items SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                category = COALESCE($6, category),
                available = COALESCE($7, available)
            WHERE hotel_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(scope.hotel_id())
        .bind(item_id)
        .bind(payload.name.as_deref())
        .bind(payload.description.as_deref())
        .bind(payload.price)
        .bind(payload.category.as_deref())
        .bind(payload.available)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::MenuItemNotFound(item_id))
    }

    pub async fn delete_item(&self, scope: &HotelScope, item_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM menu_items WHERE hotel_id = $1 AND id = $2")
            .bind(scope.hotel_id())
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::MenuItemNotFound(item_id));
        }
        Ok(())
    }

    // ---
    // Pedidos
    // ---

    pub async fn insert_order<'e, E>(
        &self,
        executor: E,
        scope: &HotelScope,
        room_id: Uuid,
        booking_id: Option<Uuid>,
        lines: Vec<OrderLine>,
        total: Decimal,
        notes: Option<&str>,
    ) -> Result<ServiceOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, ServiceOrder>(
            r#"
            INSERT INTO service_orders (hotel_id, room_id, booking_id, items, total, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(scope.hotel_id())
        .bind(room_id)
        .bind(booking_id)
        .bind(Json(lines))
        .bind(total)
        .bind(notes)
        .fetch_one(executor)
        .await?;
        Ok(order)
    }

    /// Fila da cozinha: `status = None` traz todos, mais recentes primeiro
    pub async fn list_orders(
        &self,
        scope: &HotelScope,
        status: Option<ServiceOrderStatus>,
    ) -> Result<Vec<ServiceOrder>, AppError> {
        let orders = sqlx::query_as::<_, ServiceOrder>(
            r#"
            SELECT * FROM service_orders
            WHERE hotel_id = $1 AND ($2::service_order_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT 200
            "#,
        )
        .bind(scope.hotel_id())
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    pub async fn find_order_for_update<'e, E>(
        &self,
        executor: E,
        scope: &HotelScope,
        order_id: Uuid,
    ) -> Result<ServiceOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ServiceOrder>(
            "SELECT * FROM service_orders WHERE hotel_id = $1 AND id = $2 FOR UPDATE",
        )
        .bind(scope.hotel_id())
        .bind(order_id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::OrderNotFound)
    }

    pub async fn set_order_status<'e, E>(
        &self,
        executor: E,
        scope: &HotelScope,
        order_id: Uuid,
        status: ServiceOrderStatus,
    ) -> Result<ServiceOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ServiceOrder>(
            "UPDATE service_orders SET status = $3 WHERE hotel_id = $1 AND id = $2 RETURNING *",
        )
        .bind(scope.hotel_id())
        .bind(order_id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::OrderNotFound)
    }
}
