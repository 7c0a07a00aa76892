// src/services/inventory_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{HotelScope, RoomRepository},
    models::room::{CreateRoomPayload, Room, UpdateRoomPayload},
};

#[derive(Clone)]
pub struct InventoryService {
    room_repo: RoomRepository,
}

impl InventoryService {
    pub fn new(room_repo: RoomRepository) -> Self {
        Self { room_repo }
    }

    pub async fn create_room(&self, scope: &HotelScope, payload: &CreateRoomPayload) -> Result<Room, AppError> {
        if payload.price.is_sign_negative() {
            return Err(AppError::InvalidAmount);
        }
        self.room_repo.create(scope, payload).await
    }

    pub async fn list_rooms(&self, scope: &HotelScope) -> Result<Vec<Room>, AppError> {
        self.room_repo.list(scope).await
    }

    pub async fn update_room(
        &self,
        scope: &HotelScope,
        room_id: Uuid,
        payload: &UpdateRoomPayload,
    ) -> Result<Room, AppError> {
        if payload.price.is_some_and(|p| p.is_sign_negative()) {
            return Err(AppError::InvalidAmount);
        }
        self.room_repo.update(scope, room_id, payload).await
    }

    /// Quarto com reserva em aberto não pode sumir do calendário
    pub async fn delete_room(&self, scope: &HotelScope, room_id: Uuid) -> Result<(), AppError> {
        if self.room_repo.has_active_bookings(scope, room_id).await? {
            return Err(AppError::RoomHasActiveBookings);
        }
        self.room_repo.delete(scope, room_id).await?;

        tracing::info!(hotel_id = %scope.hotel_id(), room_id = %room_id, "Quarto removido");
        Ok(())
    }
}
