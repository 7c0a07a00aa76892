// src/services/booking_service.rs
//
// Orquestra reservas: carrega do banco, decide no domínio, grava em transação.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BookingRepository, GuestRepository, HotelRepository, HotelScope, NewBooking, RoomRepository},
    domain::{
        availability::{available_rooms, ensure_transition, find_conflict, quote_stay, validate_stay},
        calendar::{CalendarAction, CalendarSnapshot, CalendarState, CalendarView},
        finance::{calculate_financials, calculate_tax, check_out_gate, quote_payment_link, PaymentQuote, ProcessorFees},
        links::{booking_confirmation_message, whatsapp_link},
        sire::sire_report,
    },
    models::{
        booking::{
            Booking, BookingDetail, BookingKind, BookingSource, BookingStatus, Charge, CreateBookingPayload,
            Payment, PaymentMethod, PublicBookingPayload, UpdateBookingPayload, WhatsappLink,
        },
        guest::GuestInput,
        room::{Room, RoomQuote, RoomStatus},
    },
};

/// Pedido de reserva já normalizado (wizard da recepção ou funil público)
struct BookingRequest<'a> {
    room_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guest: Option<&'a GuestInput>,
    total_price: Option<Decimal>,
    source: BookingSource,
    guests_count: i32,
    notes: Option<&'a str>,
}

#[derive(Clone)]
pub struct BookingService {
    booking_repo: BookingRepository,
    guest_repo: GuestRepository,
    room_repo: RoomRepository,
    hotel_repo: HotelRepository,
    fees: ProcessorFees,
    pool: PgPool,
}

impl BookingService {
    pub fn new(
        booking_repo: BookingRepository,
        guest_repo: GuestRepository,
        room_repo: RoomRepository,
        hotel_repo: HotelRepository,
        pool: PgPool,
    ) -> Self {
        Self { booking_repo, guest_repo, room_repo, hotel_repo, fees: ProcessorFees::default(), pool }
    }

    // =========================================================================
    //  CALENDÁRIO E DISPONIBILIDADE
    // =========================================================================

    /// Carrega o mês inteiro (quartos, reservas, hóspedes, dinheiro) no estado do calendário
    pub async fn load_calendar(&self, scope: &HotelScope, year: i32, month: u32) -> Result<CalendarState, AppError> {
        let mut state = CalendarState::new(year, month)?;
        let (from, to) = state.month_range();

        let rooms = self.room_repo.list(scope).await?;
        let bookings = self.booking_repo.list_in_range(scope, from, to).await?;

        let booking_ids: Vec<Uuid> = bookings.iter().map(|b| b.id).collect();
        let mut guest_ids: Vec<Uuid> = bookings.iter().filter_map(|b| b.guest_id).collect();
        guest_ids.sort_unstable();
        guest_ids.dedup();

        let guests = self.guest_repo.list_by_ids(scope, &guest_ids).await?;
        let payments = self.booking_repo.payments_for_bookings(scope, &booking_ids).await?;
        let charges = self.booking_repo.charges_for_bookings(scope, &booking_ids).await?;

        state.apply(CalendarAction::Load(CalendarSnapshot { rooms, bookings, guests, payments, charges }))?;
        Ok(state)
    }

    pub async fn calendar(&self, scope: &HotelScope, year: i32, month: u32) -> Result<CalendarView, AppError> {
        Ok(self.load_calendar(scope, year, month).await?.view())
    }

    /// Quartos livres no período. Sem datas, devolve todos os quartos.
    pub async fn availability(
        &self,
        scope: &HotelScope,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Room>, AppError> {
        let rooms = self.room_repo.list(scope).await?;

        let (Some(ci), Some(co)) = (check_in, check_out) else {
            return Ok(rooms);
        };
        validate_stay(ci, co)?;

        let bookings = self.booking_repo.list_in_range(scope, ci, co).await?;
        Ok(available_rooms(&rooms, &bookings, check_in, check_out, exclude).into_iter().cloned().collect())
    }

    /// Funil público: só quartos ativos que comportam o grupo, com a cotação da estadia
    pub async fn public_availability(
        &self,
        scope: &HotelScope,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: i32,
    ) -> Result<Vec<RoomQuote>, AppError> {
        let nights = validate_stay(check_in, check_out)?;
        let guests = guests.max(1);

        let rooms = self.room_repo.list_active(scope).await?;
        let bookings = self.booking_repo.list_in_range(scope, check_in, check_out).await?;

        available_rooms(&rooms, &bookings, Some(check_in), Some(check_out), None)
            .into_iter()
            .filter(|room| room.capacity >= guests)
            .map(|room| -> Result<RoomQuote, AppError> {
                let total = quote_stay(room, check_in, check_out, guests)?;
                Ok(RoomQuote { room: room.clone(), nights, total })
            })
            .collect()
    }

    // =========================================================================
    //  CRIAÇÃO
    // =========================================================================

    /// Wizard da recepção: hóspede (upsert pelo documento) ou bloqueio de manutenção
    pub async fn create_booking(&self, scope: &HotelScope, payload: &CreateBookingPayload) -> Result<Booking, AppError> {
        let guest = match &payload.kind {
            BookingKind::Guest { guest } => Some(guest),
            BookingKind::Block => None,
        };

        self.insert_booking(
            scope,
            BookingRequest {
                room_id: payload.room_id,
                check_in: payload.check_in,
                check_out: payload.check_out,
                guest,
                total_price: payload.total_price,
                source: payload.source,
                guests_count: payload.guests_count,
                notes: payload.notes.as_deref(),
            },
        )
        .await
    }

    /// Funil público: sempre reserva direta, preço calculado pelo servidor
    pub async fn create_public_booking(
        &self,
        scope: &HotelScope,
        payload: &PublicBookingPayload,
    ) -> Result<Booking, AppError> {
        self.insert_booking(
            scope,
            BookingRequest {
                room_id: payload.room_id,
                check_in: payload.check_in,
                check_out: payload.check_out,
                guest: Some(&payload.guest),
                total_price: None,
                source: BookingSource::Direct,
                guests_count: payload.guests_count,
                notes: payload.notes.as_deref(),
            },
        )
        .await
    }

    /// Hóspede + reserva numa única transação: se a reserva falhar, o hóspede
    /// também é desfeito.
    async fn insert_booking(&self, scope: &HotelScope, req: BookingRequest<'_>) -> Result<Booking, AppError> {
        validate_stay(req.check_in, req.check_out)?;

        let mut tx = self.pool.begin().await?;

        let room = self.room_repo.find(&mut *tx, scope, req.room_id).await?;

        let (status, total_price) = match req.guest {
            Some(_) => {
                if room.status == RoomStatus::Maintenance {
                    return Err(AppError::RoomInMaintenance);
                }
                let quoted = quote_stay(&room, req.check_in, req.check_out, req.guests_count)?;
                let total = req.total_price.unwrap_or(quoted);
                if total.is_sign_negative() {
                    return Err(AppError::InvalidAmount);
                }
                (BookingStatus::Confirmed, total)
            }
            None => (BookingStatus::Maintenance, Decimal::ZERO),
        };

        let conflicts = self
            .booking_repo
            .lock_conflicts(&mut *tx, scope, room.id, req.check_in, req.check_out)
            .await?;
        if let Some(conflict) = find_conflict(&conflicts, room.id, req.check_in, req.check_out, None) {
            tracing::info!(room_id = %room.id, conflict_id = %conflict.id, "Quarto ocupado no período pedido");
            return Err(AppError::RoomUnavailable { room_id: room.id });
        }

        let guest_id = match req.guest {
            Some(input) => Some(self.guest_repo.upsert_by_document(&mut *tx, scope, input).await?.id),
            None => None,
        };

        let booking = self
            .booking_repo
            .insert(
                &mut *tx,
                scope,
                &NewBooking {
                    room_id: room.id,
                    guest_id,
                    check_in: req.check_in,
                    check_out: req.check_out,
                    status,
                    total_price,
                    source: req.source,
                    guests_count: req.guests_count,
                    notes: req.notes,
                },
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            hotel_id = %scope.hotel_id(),
            booking_id = %booking.id,
            status = booking.status.as_str(),
            "Reserva criada"
        );
        Ok(booking)
    }

    // =========================================================================
    //  EDIÇÃO E CICLO DE VIDA
    // =========================================================================

    /// Troca de datas/quarto/preço; a disponibilidade ignora a própria reserva
    pub async fn update_booking(
        &self,
        scope: &HotelScope,
        booking_id: Uuid,
        payload: &UpdateBookingPayload,
    ) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self.booking_repo.find_for_update(&mut *tx, scope, booking_id).await?;
        if !current.status.is_editable() {
            return Err(AppError::BookingClosed);
        }

        let mut updated = current.clone();
        updated.room_id = payload.room_id.unwrap_or(current.room_id);
        updated.check_in = payload.check_in.unwrap_or(current.check_in);
        updated.check_out = payload.check_out.unwrap_or(current.check_out);
        updated.guests_count = payload.guests_count.unwrap_or(current.guests_count);
        if let Some(notes) = &payload.notes {
            updated.notes = Some(notes.clone());
        }

        validate_stay(updated.check_in, updated.check_out)?;
        let room = self.room_repo.find(&mut *tx, scope, updated.room_id).await?;
        if updated.guests_count > room.capacity {
            return Err(AppError::CapacityExceeded { capacity: room.capacity });
        }

        let moved = updated.room_id != current.room_id
            || updated.check_in != current.check_in
            || updated.check_out != current.check_out;

        if moved {
            let conflicts = self
                .booking_repo
                .lock_conflicts(&mut *tx, scope, updated.room_id, updated.check_in, updated.check_out)
                .await?;
            if find_conflict(&conflicts, updated.room_id, updated.check_in, updated.check_out, Some(booking_id)).is_some() {
                return Err(AppError::RoomUnavailable { room_id: updated.room_id });
            }
        }

        updated.total_price = match payload.total_price {
            Some(price) if price.is_sign_negative() => return Err(AppError::InvalidAmount),
            Some(price) => price,
            // Mudou a estadia e ninguém informou preço: recalcula pela tarifa do quarto
            None if moved && current.status != BookingStatus::Maintenance => {
                quote_stay(&room, updated.check_in, updated.check_out, updated.guests_count)?
            }
            None => current.total_price,
        };

        let saved = self.booking_repo.update_stay(&mut *tx, scope, &updated).await?;
        tx.commit().await?;
        Ok(saved)
    }

    pub async fn check_in(&self, scope: &HotelScope, booking_id: Uuid) -> Result<Booking, AppError> {
        self.transition(scope, booking_id, BookingStatus::CheckedIn).await
    }

    pub async fn cancel(&self, scope: &HotelScope, booking_id: Uuid) -> Result<Booking, AppError> {
        self.transition(scope, booking_id, BookingStatus::Cancelled).await
    }

    /// Saída com saldo pendente exige `force` (confirmação humana no front)
    pub async fn check_out(&self, scope: &HotelScope, booking_id: Uuid, force: bool) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await?;

        let booking = self.booking_repo.find_for_update(&mut *tx, scope, booking_id).await?;
        ensure_transition(booking.status, BookingStatus::CheckedOut)?;

        let payments = self.booking_repo.payments_for(&mut *tx, scope, booking_id).await?;
        let charges = self.booking_repo.charges_for(&mut *tx, scope, booking_id).await?;
        let financials = calculate_financials(booking.total_price, &charges, &payments);
        check_out_gate(&financials, force)?;

        if financials.has_debt() {
            tracing::warn!(booking_id = %booking_id, pending = %financials.pending, "Check-out forçado com saldo pendente");
        }

        let saved = self
            .booking_repo
            .set_status(&mut *tx, scope, booking_id, BookingStatus::CheckedOut)
            .await?;
        tx.commit().await?;
        Ok(saved)
    }

    async fn transition(&self, scope: &HotelScope, booking_id: Uuid, next: BookingStatus) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await?;

        let booking = self.booking_repo.find_for_update(&mut *tx, scope, booking_id).await?;
        ensure_transition(booking.status, next)?;
        let saved = self.booking_repo.set_status(&mut *tx, scope, booking_id, next).await?;

        tx.commit().await?;
        Ok(saved)
    }

    pub async fn delete_booking(&self, scope: &HotelScope, booking_id: Uuid) -> Result<(), AppError> {
        self.booking_repo.delete(scope, booking_id).await?;
        tracing::info!(hotel_id = %scope.hotel_id(), booking_id = %booking_id, "Reserva excluída");
        Ok(())
    }

    // =========================================================================
    //  FICHA, PAGAMENTOS E CONSUMOS
    // =========================================================================

    pub async fn detail(&self, scope: &HotelScope, booking_id: Uuid) -> Result<BookingDetail, AppError> {
        let booking = self.booking_repo.find(&self.pool, scope, booking_id).await?;
        let room = self.room_repo.find(&self.pool, scope, booking.room_id).await?;
        let guest = match booking.guest_id {
            Some(guest_id) => Some(self.guest_repo.find(&self.pool, scope, guest_id).await?),
            None => None,
        };
        let payments = self.booking_repo.payments_for(&self.pool, scope, booking_id).await?;
        let charges = self.booking_repo.charges_for(&self.pool, scope, booking_id).await?;
        let hotel = self.hotel_repo.get(scope).await?;

        let financials = calculate_financials(booking.total_price, &charges, &payments);
        let tax = calculate_tax(financials.total, hotel.tax_rate);

        Ok(BookingDetail { booking, room, guest, payments, charges, financials, tax })
    }

    pub async fn register_payment(
        &self,
        scope: &HotelScope,
        booking_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
    ) -> Result<Payment, AppError> {
        if amount <= Decimal::ZERO {
            return Err(AppError::InvalidAmount);
        }

        let mut tx = self.pool.begin().await?;
        let booking = self.booking_repo.find_for_update(&mut *tx, scope, booking_id).await?;
        // Hóspede que já saiu ainda pode quitar a dívida; reserva cancelada não recebe nada
        if booking.status == BookingStatus::Cancelled {
            return Err(AppError::BookingClosed);
        }

        let payment = self.booking_repo.insert_payment(&mut *tx, scope, booking_id, amount, method).await?;
        tx.commit().await?;
        Ok(payment)
    }

    pub async fn add_charge(
        &self,
        scope: &HotelScope,
        booking_id: Uuid,
        description: &str,
        price: Decimal,
    ) -> Result<Charge, AppError> {
        let mut tx = self.pool.begin().await?;
        let booking = self.booking_repo.find_for_update(&mut *tx, scope, booking_id).await?;
        if !booking.status.is_editable() {
            return Err(AppError::BookingClosed);
        }

        let charge = self
            .booking_repo
            .insert_charge(&mut *tx, scope, booking_id, description.trim(), price)
            .await?;
        tx.commit().await?;
        Ok(charge)
    }

    /// Simulação do link de pagamento: quanto fica para o hotel depois da
    /// comissão e da tarifa do processador. Sem valor informado, cobra o saldo.
    pub async fn payment_quote(
        &self,
        scope: &HotelScope,
        booking_id: Uuid,
        amount_today: Option<Decimal>,
    ) -> Result<PaymentQuote, AppError> {
        let booking = self.booking_repo.find(&self.pool, scope, booking_id).await?;
        let hotel = self.hotel_repo.get(scope).await?;
        let payments = self.booking_repo.payments_for(&self.pool, scope, booking_id).await?;
        let charges = self.booking_repo.charges_for(&self.pool, scope, booking_id).await?;

        let financials = calculate_financials(booking.total_price, &charges, &payments);
        let amount_today = amount_today.unwrap_or(financials.pending);

        quote_payment_link(booking.source, financials.total, amount_today, hotel.commission_rate, &self.fees)
    }

    pub async fn whatsapp_confirmation(&self, scope: &HotelScope, booking_id: Uuid) -> Result<WhatsappLink, AppError> {
        let booking = self.booking_repo.find(&self.pool, scope, booking_id).await?;
        let guest_id = booking.guest_id.ok_or(AppError::GuestNotFound)?;
        let guest = self.guest_repo.find(&self.pool, scope, guest_id).await?;
        let room = self.room_repo.find(&self.pool, scope, booking.room_id).await?;
        let hotel = self.hotel_repo.get(scope).await?;

        let message = booking_confirmation_message(&hotel, &guest, &room, &booking);
        let phone = guest.phone.as_deref().filter(|p| !p.trim().is_empty()).ok_or(AppError::InvalidPhone)?;
        let url = whatsapp_link(phone, &message);
        Ok(WhatsappLink { url, message })
    }

    // =========================================================================
    //  EXPORTAÇÕES
    // =========================================================================

    /// Arquivo SIRE das estadias que tocam `[from, to]`
    pub async fn sire_export(&self, scope: &HotelScope, from: NaiveDate, to: NaiveDate) -> Result<String, AppError> {
        if to < from {
            return Err(AppError::InvalidDateRange);
        }

        let until = to.succ_opt().unwrap_or(to);
        let bookings = self.booking_repo.list_in_range(scope, from, until).await?;

        let mut guest_ids: Vec<Uuid> = bookings.iter().filter_map(|b| b.guest_id).collect();
        guest_ids.sort_unstable();
        guest_ids.dedup();
        let guests = self.guest_repo.list_by_ids(scope, &guest_ids).await?;

        let report = sire_report(
            &bookings,
            |b| b.guest_id.and_then(|id| guests.iter().find(|g| g.id == id)),
            from,
            to,
        );

        tracing::info!(hotel_id = %scope.hotel_id(), %from, %to, lines = report.lines().count(), "Relatório SIRE gerado");
        Ok(report)
    }
}
