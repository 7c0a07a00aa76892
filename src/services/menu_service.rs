// src/services/menu_service.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BookingRepository, HotelScope, MenuRepository, RoomRepository},
    models::menu::{
        CreateMenuItemPayload, MenuItem, OrderLine, PlaceOrderPayload, ServiceOrder, ServiceOrderStatus,
        UpdateMenuItemPayload,
    },
};

#[derive(Clone)]
pub struct MenuService {
    menu_repo: MenuRepository,
    room_repo: RoomRepository,
    booking_repo: BookingRepository,
    pool: PgPool,
}

impl MenuService {
    pub fn new(
        menu_repo: MenuRepository,
        room_repo: RoomRepository,
        booking_repo: BookingRepository,
        pool: PgPool,
    ) -> Self {
        Self { menu_repo, room_repo, booking_repo, pool }
    }

    // ---
    // Cardápio
    // ---

    pub async fn list_menu(&self, scope: &HotelScope) -> Result<Vec<MenuItem>, AppError> {
        self.menu_repo.list_items(scope, false).await
    }

    /// Cardápio que o hóspede vê pelo QR: só o que está disponível
    pub async fn public_menu(&self, scope: &HotelScope) -> Result<Vec<MenuItem>, AppError> {
        self.menu_repo.list_items(scope, true).await
    }

    pub async fn create_item(&self, scope: &HotelScope, payload: &CreateMenuItemPayload) -> Result<MenuItem, AppError> {
        if payload.price < Decimal::ZERO {
            return Err(AppError::InvalidAmount);
        }
        self.menu_repo.create_item(scope, payload).await
    }

    pub async fn update_item(
        &self,
        scope: &HotelScope,
        item_id: Uuid,
        payload: &UpdateMenuItemPayload,
    ) -> Result<MenuItem, AppError> {
        if payload.price.is_some_and(|p| p < Decimal::ZERO) {
            return Err(AppError::InvalidAmount);
        }
        self.menu_repo.update_item(scope, item_id, payload).await
    }

    pub async fn delete_item(&self, scope: &HotelScope, item_id: Uuid) -> Result<(), AppError> {
        self.menu_repo.delete_item(scope, item_id).await
    }

    // ---
    // Pedidos
    // ---

    /// Pedido feito pelo QR do quarto. Preços saem do cardápio (nunca do cliente);
    /// se houver hóspede em casa no quarto, o total entra na conta dele
    /// como um Charge na mesma transação.
    pub async fn place_order(
        &self,
        scope: &HotelScope,
        room_id: Uuid,
        payload: &PlaceOrderPayload,
    ) -> Result<ServiceOrder, AppError> {
        if payload.items.is_empty() {
            return Err(AppError::EmptyOrder);
        }

        let mut tx = self.pool.begin().await?;

        self.room_repo.find(&mut *tx, scope, room_id).await?;

        let ids: Vec<Uuid> = payload.items.iter().map(|l| l.menu_item_id).collect();
        let items: HashMap<Uuid, MenuItem> = self
            .menu_repo
            .items_by_ids(&mut *tx, scope, &ids)
            .await?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();

        let mut lines = Vec::with_capacity(payload.items.len());
        for request in &payload.items {
            let item = items
                .get(&request.menu_item_id)
                .ok_or(AppError::MenuItemNotFound(request.menu_item_id))?;
            if !item.available {
                return Err(AppError::MenuItemUnavailable(item.id));
            }
            lines.push(OrderLine {
                menu_item_id: item.id,
                name: item.name.clone(),
                quantity: request.quantity,
                unit_price: item.price,
            });
        }

        let total: Decimal = lines.iter().map(OrderLine::subtotal).sum();
        let charge_description = charge_description(&lines);

        let booking = self.booking_repo.find_checked_in_for_room(&mut *tx, scope, room_id).await?;
        let booking_id = booking.as_ref().map(|b| b.id);

        let order = self
            .menu_repo
            .insert_order(&mut *tx, scope, room_id, booking_id, lines, total, payload.notes.as_deref())
            .await?;

        if let Some(booking_id) = booking_id {
            self.booking_repo
                .insert_charge(&mut *tx, scope, booking_id, &charge_description, total)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            hotel_id = %scope.hotel_id(),
            room_id = %room_id,
            order_id = %order.id,
            charged_to = ?booking_id,
            "Pedido de room service registrado"
        );
        Ok(order)
    }

    pub async fn list_orders(
        &self,
        scope: &HotelScope,
        status: Option<ServiceOrderStatus>,
    ) -> Result<Vec<ServiceOrder>, AppError> {
        self.menu_repo.list_orders(scope, status).await
    }

    /// Avança o pedido na fila da cozinha. Cancelar um pedido que já foi para a
    /// conta lança o estorno (Charge negativo) na mesma transação.
    pub async fn update_order_status(
        &self,
        scope: &HotelScope,
        order_id: Uuid,
        next: ServiceOrderStatus,
    ) -> Result<ServiceOrder, AppError> {
        let mut tx = self.pool.begin().await?;

        let order = self.menu_repo.find_order_for_update(&mut *tx, scope, order_id).await?;
        if !order.status.can_transition_to(next) {
            return Err(AppError::InvalidStatusTransition {
                from: order.status.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }

        let updated = self.menu_repo.set_order_status(&mut *tx, scope, order_id, next).await?;

        if let (ServiceOrderStatus::Cancelled, Some(booking_id)) = (next, order.booking_id) {
            self.booking_repo
                .insert_charge(&mut *tx, scope, booking_id, "Anulación room service", -order.total)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(order_id = %order_id, status = next.as_str(), "Status do pedido atualizado");
        Ok(updated)
    }
}

/// "Room service: 2x Club sándwich, 1x Limonada"
fn charge_description(lines: &[OrderLine]) -> String {
    let items: Vec<String> = lines.iter().map(|l| format!("{}x {}", l.quantity, l.name)).collect();
    format!("Room service: {}", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_description_lists_quantities() {
        let lines = vec![
            OrderLine {
                menu_item_id: Uuid::new_v4(),
                name: "Club sándwich".into(),
                quantity: 2,
                unit_price: Decimal::from(32000),
            },
            OrderLine {
                menu_item_id: Uuid::new_v4(),
                name: "Limonada".into(),
                quantity: 1,
                unit_price: Decimal::from(8000),
            },
        ];

        assert_eq!(charge_description(&lines), "Room service: 2x Club sándwich, 1x Limonada");
        let total: Decimal = lines.iter().map(OrderLine::subtotal).sum();
        assert_eq!(total, Decimal::from(72000));
    }

    #[test]
    fn kitchen_queue_only_moves_forward() {
        use ServiceOrderStatus::*;
        assert!(Pending.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(Delivered));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
    }
}
