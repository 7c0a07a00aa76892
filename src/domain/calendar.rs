// src/domain/calendar.rs
//
// Estado do calendário de um hotel (um mês por vez). Tudo o que muda o estado
// passa por `apply`; as telas leem as visões derivadas (grade, ocupação, caixa).

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    domain::{
        availability::{booking_for_date, ensure_transition, find_conflict, validate_stay},
        finance::{calculate_financials, check_out_gate, Financials},
    },
    models::{
        booking::{Booking, BookingStatus, Charge, Payment},
        dashboard::DashboardSummary,
        guest::Guest,
        room::Room,
    },
};

/// Tudo o que o repositório devolve para montar o calendário
#[derive(Debug, Clone, Default)]
pub struct CalendarSnapshot {
    pub rooms: Vec<Room>,
    pub bookings: Vec<Booking>,
    pub guests: Vec<Guest>,
    pub payments: Vec<Payment>,
    pub charges: Vec<Charge>,
}

#[derive(Debug, Clone)]
pub enum CalendarAction {
    Load(CalendarSnapshot),
    NextMonth,
    PrevMonth,
    GoToMonth { year: i32, month: u32 },
    UpsertBooking(Booking),
    /// Remove a reserva junto com os pagamentos e consumos dela
    RemoveBooking(Uuid),
    AddPayment(Payment),
    AddCharge(Charge),
    CheckIn(Uuid),
    CheckOut { booking_id: Uuid, force: bool },
    Cancel(Uuid),
}

#[derive(Debug, Clone)]
pub struct CalendarState {
    /// Sempre o dia 1 do mês exibido
    cursor: NaiveDate,
    rooms: Vec<Room>,
    bookings: Vec<Booking>,
    guests: HashMap<Uuid, Guest>,
    payments: Vec<Payment>,
    charges: Vec<Charge>,
}

// --- Visões serializáveis ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub booking_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
    pub guest_name: Option<String>,
    /// Primeiro dia da estadia (onde o front desenha o início da barra)
    pub is_check_in_day: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomRow {
    pub room_id: Uuid,
    pub room_name: String,
    pub cells: Vec<CalendarCell>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarView {
    pub year: i32,
    pub month: u32,
    #[schema(value_type = Vec<String>)]
    pub days: Vec<NaiveDate>,
    pub rows: Vec<RoomRow>,
    pub occupancy: Decimal,
    pub revenue: Decimal,
}

impl CalendarState {
    pub fn new(year: i32, month: u32) -> Result<Self, AppError> {
        Ok(Self {
            cursor: first_of_month(year, month)?,
            rooms: Vec::new(),
            bookings: Vec::new(),
            guests: HashMap::new(),
            payments: Vec::new(),
            charges: Vec::new(),
        })
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn booking(&self, id: Uuid) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub fn apply(&mut self, action: CalendarAction) -> Result<(), AppError> {
        match action {
            CalendarAction::Load(snapshot) => {
                self.rooms = snapshot.rooms;
                self.bookings = snapshot.bookings;
                self.guests = snapshot.guests.into_iter().map(|g| (g.id, g)).collect();
                self.payments = snapshot.payments;
                self.charges = snapshot.charges;
            }
            CalendarAction::NextMonth => self.cursor = shift_month(self.cursor, 1)?,
            CalendarAction::PrevMonth => self.cursor = shift_month(self.cursor, -1)?,
            CalendarAction::GoToMonth { year, month } => self.cursor = first_of_month(year, month)?,
            CalendarAction::UpsertBooking(booking) => self.upsert_booking(booking)?,
            CalendarAction::RemoveBooking(id) => {
                let before = self.bookings.len();
                self.bookings.retain(|b| b.id != id);
                if self.bookings.len() == before {
                    return Err(AppError::BookingNotFound);
                }
                self.payments.retain(|p| p.booking_id != id);
                self.charges.retain(|c| c.booking_id != id);
            }
            CalendarAction::AddPayment(payment) => {
                if payment.amount <= Decimal::ZERO {
                    return Err(AppError::InvalidAmount);
                }
                self.require_booking(payment.booking_id)?;
                self.payments.push(payment);
            }
            CalendarAction::AddCharge(charge) => {
                self.require_open_booking(charge.booking_id)?;
                self.charges.push(charge);
            }
            CalendarAction::CheckIn(id) => self.transition(id, BookingStatus::CheckedIn)?,
            CalendarAction::CheckOut { booking_id, force } => {
                self.require_transition(booking_id, BookingStatus::CheckedOut)?;
                let financials = self.booking_financials(booking_id).ok_or(AppError::BookingNotFound)?;
                check_out_gate(&financials, force)?;
                self.transition(booking_id, BookingStatus::CheckedOut)?;
            }
            CalendarAction::Cancel(id) => self.transition(id, BookingStatus::Cancelled)?,
        }
        Ok(())
    }

    fn upsert_booking(&mut self, booking: Booking) -> Result<(), AppError> {
        validate_stay(booking.check_in, booking.check_out)?;

        if booking.status.blocks_inventory()
            && find_conflict(&self.bookings, booking.room_id, booking.check_in, booking.check_out, Some(booking.id)).is_some()
        {
            return Err(AppError::RoomUnavailable { room_id: booking.room_id });
        }

        match self.bookings.iter_mut().find(|b| b.id == booking.id) {
            Some(existing) => *existing = booking,
            None => self.bookings.push(booking),
        }
        Ok(())
    }

    fn require_booking(&self, id: Uuid) -> Result<&Booking, AppError> {
        self.booking(id).ok_or(AppError::BookingNotFound)
    }

    fn require_open_booking(&self, id: Uuid) -> Result<&Booking, AppError> {
        let booking = self.require_booking(id)?;
        if !booking.status.is_editable() {
            return Err(AppError::BookingClosed);
        }
        Ok(booking)
    }

    fn require_transition(&self, id: Uuid, next: BookingStatus) -> Result<(), AppError> {
        ensure_transition(self.require_booking(id)?.status, next)
    }

    fn transition(&mut self, id: Uuid, next: BookingStatus) -> Result<(), AppError> {
        self.require_transition(id, next)?;
        if let Some(booking) = self.bookings.iter_mut().find(|b| b.id == id) {
            booking.status = next;
        }
        Ok(())
    }

    // --- Visões derivadas ---

    /// `[dia 1, dia 1 do mês seguinte)`
    pub fn month_range(&self) -> (NaiveDate, NaiveDate) {
        let end = self.cursor.checked_add_months(Months::new(1)).unwrap_or(NaiveDate::MAX);
        (self.cursor, end)
    }

    pub fn month_days(&self) -> Vec<NaiveDate> {
        let (start, end) = self.month_range();
        start.iter_days().take_while(|d| *d < end).collect()
    }

    pub fn month_grid(&self) -> Vec<RoomRow> {
        let days = self.month_days();

        self.rooms
            .iter()
            .map(|room| RoomRow {
                room_id: room.id,
                room_name: room.name.clone(),
                cells: days
                    .iter()
                    .map(|&date| match booking_for_date(&self.bookings, room.id, date) {
                        Some(b) => CalendarCell {
                            date,
                            booking_id: Some(b.id),
                            status: Some(b.status),
                            guest_name: b.guest_id.and_then(|id| self.guests.get(&id)).map(|g| g.full_name.clone()),
                            is_check_in_day: b.check_in == date,
                        },
                        None => CalendarCell { date, booking_id: None, status: None, guest_name: None, is_check_in_day: false },
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn booking_financials(&self, id: Uuid) -> Option<Financials> {
        let booking = self.booking(id)?;
        let charges: Vec<Charge> = self.charges.iter().filter(|c| c.booking_id == id).cloned().collect();
        let payments: Vec<Payment> = self.payments.iter().filter(|p| p.booking_id == id).cloned().collect();
        Some(calculate_financials(booking.total_price, &charges, &payments))
    }

    /// Noites-quarto ocupadas por hóspedes / noites-quarto do mês (0..=1, 4 casas).
    /// Bloqueios de manutenção não contam como ocupação.
    pub fn occupancy(&self) -> Decimal {
        let days = self.month_days();
        let capacity = self.rooms.len() * days.len();
        if capacity == 0 {
            return Decimal::ZERO;
        }

        let occupied = self
            .rooms
            .iter()
            .flat_map(|room| days.iter().map(move |&date| (room.id, date)))
            .filter(|&(room_id, date)| {
                booking_for_date(&self.bookings, room_id, date).is_some_and(|b| b.status != BookingStatus::Maintenance)
            })
            .count();

        (Decimal::from(occupied) / Decimal::from(capacity)).round_dp(4)
    }

    /// Soma dos totais das estadias que começam no mês
    pub fn month_revenue(&self) -> Decimal {
        let (start, end) = self.month_range();
        self.bookings
            .iter()
            .filter(|b| !matches!(b.status, BookingStatus::Cancelled | BookingStatus::Maintenance))
            .filter(|b| b.check_in >= start && b.check_in < end)
            .map(|b| b.total_price)
            .sum()
    }

    pub fn view(&self) -> CalendarView {
        CalendarView {
            year: self.cursor.year(),
            month: self.cursor.month(),
            days: self.month_days(),
            rows: self.month_grid(),
            occupancy: self.occupancy(),
            revenue: self.month_revenue(),
        }
    }

    /// Cards da recepção para `today`
    pub fn day_summary(&self, today: NaiveDate) -> DashboardSummary {
        let with_status = |status: BookingStatus| self.bookings.iter().filter(move |b| b.status == status);

        let pending_balance = with_status(BookingStatus::CheckedIn)
            .filter_map(|b| self.booking_financials(b.id))
            .map(|f| f.pending.max(Decimal::ZERO))
            .sum();

        DashboardSummary {
            arrivals_today: with_status(BookingStatus::Confirmed).filter(|b| b.check_in == today).count(),
            departures_today: with_status(BookingStatus::CheckedIn).filter(|b| b.check_out == today).count(),
            in_house: with_status(BookingStatus::CheckedIn).count(),
            maintenance_today: with_status(BookingStatus::Maintenance).filter(|b| b.covers(today)).count(),
            pending_balance,
            month_occupancy: self.occupancy(),
            month_revenue: self.month_revenue(),
        }
    }
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, AppError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(AppError::InvalidDateRange)
}

fn shift_month(cursor: NaiveDate, delta: i32) -> Result<NaiveDate, AppError> {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 { cursor.checked_add_months(months) } else { cursor.checked_sub_months(months) };
    shifted.ok_or(AppError::InvalidDateRange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        booking::{BookingSource, PaymentMethod},
        guest::DocumentType,
        room::RoomStatus,
    };
    use chrono::Utc;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn room(name: &str) -> Room {
        Room {
            id: Uuid::new_v4(),
            hotel_id: Uuid::nil(),
            name: name.into(),
            price: Decimal::from(100000),
            capacity: 2,
            per_person_pricing: false,
            status: RoomStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn guest(name: &str) -> Guest {
        Guest {
            id: Uuid::new_v4(),
            hotel_id: Uuid::nil(),
            full_name: name.into(),
            document_type: DocumentType::Cc,
            document_number: "1020304050".into(),
            nationality: "CO".into(),
            phone: None,
            email: None,
            birth_date: None,
            gender: None,
            blood_type: None,
            consent_signed_at: None,
            signature_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn booking(room_id: Uuid, guest_id: Option<Uuid>, check_in: &str, check_out: &str, status: BookingStatus, total: i64) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            hotel_id: Uuid::nil(),
            room_id,
            guest_id,
            check_in: d(check_in),
            check_out: d(check_out),
            status,
            total_price: Decimal::from(total),
            source: BookingSource::Direct,
            guests_count: 1,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn payment(booking_id: Uuid, amount: i64) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            hotel_id: Uuid::nil(),
            booking_id,
            amount: Decimal::from(amount),
            method: PaymentMethod::Card,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn month_navigation_crosses_years() {
        let mut state = CalendarState::new(2024, 12).unwrap();
        state.apply(CalendarAction::NextMonth).unwrap();
        assert_eq!(state.cursor(), d("2025-01-01"));

        state.apply(CalendarAction::PrevMonth).unwrap();
        state.apply(CalendarAction::PrevMonth).unwrap();
        assert_eq!(state.cursor(), d("2024-11-01"));

        state.apply(CalendarAction::GoToMonth { year: 2024, month: 2 }).unwrap();
        assert_eq!(state.month_days().len(), 29);

        assert!(matches!(
            state.apply(CalendarAction::GoToMonth { year: 2024, month: 13 }),
            Err(AppError::InvalidDateRange)
        ));
    }

    #[test]
    fn grid_shows_guest_name_and_check_in_day() {
        let r = room("101");
        let g = guest("Ana Gómez");
        let b = booking(r.id, Some(g.id), "2024-03-01", "2024-03-03", BookingStatus::Confirmed, 200000);

        let mut state = CalendarState::new(2024, 3).unwrap();
        state
            .apply(CalendarAction::Load(CalendarSnapshot { rooms: vec![r], bookings: vec![b.clone()], guests: vec![g], ..Default::default() }))
            .unwrap();

        let grid = state.month_grid();
        assert_eq!(grid.len(), 1);
        let cells = &grid[0].cells;
        assert_eq!(cells.len(), 31);
        assert_eq!(cells[0].booking_id, Some(b.id));
        assert!(cells[0].is_check_in_day);
        assert_eq!(cells[1].guest_name.as_deref(), Some("Ana Gómez"));
        assert!(!cells[1].is_check_in_day);
        assert!(cells[2].booking_id.is_none());
    }

    #[test]
    fn upsert_rejects_overlap_but_allows_editing_itself() {
        let r = room("101");
        let b = booking(r.id, None, "2024-03-01", "2024-03-05", BookingStatus::Confirmed, 0);

        let mut state = CalendarState::new(2024, 3).unwrap();
        state.apply(CalendarAction::Load(CalendarSnapshot { rooms: vec![r.clone()], ..Default::default() })).unwrap();
        state.apply(CalendarAction::UpsertBooking(b.clone())).unwrap();

        let clash = booking(r.id, None, "2024-03-04", "2024-03-06", BookingStatus::Maintenance, 0);
        assert!(matches!(state.apply(CalendarAction::UpsertBooking(clash)), Err(AppError::RoomUnavailable { .. })));

        let mut moved = b.clone();
        moved.check_out = d("2024-03-07");
        state.apply(CalendarAction::UpsertBooking(moved)).unwrap();
        assert_eq!(state.bookings().len(), 1);
        assert_eq!(state.booking(b.id).unwrap().check_out, d("2024-03-07"));

        let adjacent = booking(r.id, None, "2024-03-07", "2024-03-08", BookingStatus::Confirmed, 0);
        state.apply(CalendarAction::UpsertBooking(adjacent)).unwrap();
    }

    #[test]
    fn check_out_is_gated_by_pending_balance() {
        let r = room("A");
        let b = booking(r.id, None, "2024-03-01", "2024-03-03", BookingStatus::Confirmed, 200000);
        let id = b.id;

        let mut state = CalendarState::new(2024, 3).unwrap();
        state.apply(CalendarAction::Load(CalendarSnapshot { rooms: vec![r], bookings: vec![b], ..Default::default() })).unwrap();

        // reserva confirmada, sem check-in: o saldo é que segura a saída
        state.apply(CalendarAction::AddPayment(payment(id, 100000))).unwrap();

        match state.apply(CalendarAction::CheckOut { booking_id: id, force: false }) {
            Err(AppError::PendingBalance { pending }) => assert_eq!(pending, Decimal::from(100000)),
            other => panic!("esperava PendingBalance, veio {:?}", other),
        }
        assert_eq!(state.booking(id).unwrap().status, BookingStatus::Confirmed);

        state.apply(CalendarAction::CheckOut { booking_id: id, force: true }).unwrap();
        assert_eq!(state.booking(id).unwrap().status, BookingStatus::CheckedOut);
    }

    #[test]
    fn charges_are_refused_on_closed_bookings() {
        let r = room("A");
        let b = booking(r.id, None, "2024-03-01", "2024-03-03", BookingStatus::Cancelled, 0);
        let id = b.id;

        let mut state = CalendarState::new(2024, 3).unwrap();
        state.apply(CalendarAction::Load(CalendarSnapshot { bookings: vec![b], ..Default::default() })).unwrap();

        let charge = Charge {
            id: Uuid::new_v4(),
            hotel_id: Uuid::nil(),
            booking_id: id,
            description: "Lavandería".into(),
            price: Decimal::from(15000),
            created_at: Utc::now(),
        };
        assert!(matches!(state.apply(CalendarAction::AddCharge(charge)), Err(AppError::BookingClosed)));
    }

    #[test]
    fn remove_drops_the_booking_money_too() {
        let r = room("A");
        let b = booking(r.id, None, "2024-03-01", "2024-03-03", BookingStatus::Confirmed, 200000);
        let id = b.id;

        let mut state = CalendarState::new(2024, 3).unwrap();
        state
            .apply(CalendarAction::Load(CalendarSnapshot { bookings: vec![b], payments: vec![payment(id, 50000)], ..Default::default() }))
            .unwrap();

        state.apply(CalendarAction::RemoveBooking(id)).unwrap();
        assert!(state.booking_financials(id).is_none());
        assert!(matches!(state.apply(CalendarAction::RemoveBooking(id)), Err(AppError::BookingNotFound)));
    }

    #[test]
    fn occupancy_and_revenue_ignore_maintenance_and_cancellations() {
        let a = room("A");
        let b = room("B");
        let bookings = vec![
            // 10 noites em abril (30 dias × 2 quartos = 60)
            booking(a.id, None, "2024-04-01", "2024-04-11", BookingStatus::CheckedOut, 1_000_000),
            booking(b.id, None, "2024-04-05", "2024-04-10", BookingStatus::Maintenance, 0),
            booking(b.id, None, "2024-04-20", "2024-04-25", BookingStatus::Cancelled, 500_000),
            // começa em março: não entra na receita de abril
            booking(b.id, None, "2024-03-30", "2024-04-02", BookingStatus::Confirmed, 300_000),
        ];

        let mut state = CalendarState::new(2024, 4).unwrap();
        state.apply(CalendarAction::Load(CalendarSnapshot { rooms: vec![a, b], bookings, ..Default::default() })).unwrap();

        // (10 + 1) / 60
        assert_eq!(state.occupancy(), (Decimal::from(11) / Decimal::from(60)).round_dp(4));
        assert_eq!(state.month_revenue(), Decimal::from(1_000_000));
    }

    #[test]
    fn day_summary_counts_the_front_desk_cards() {
        let a = room("A");
        let b = room("B");
        let c = room("C");
        let arriving = booking(a.id, None, "2024-05-10", "2024-05-12", BookingStatus::Confirmed, 200000);
        let leaving = booking(b.id, None, "2024-05-08", "2024-05-10", BookingStatus::CheckedIn, 300000);
        let blocked = booking(c.id, None, "2024-05-09", "2024-05-11", BookingStatus::Maintenance, 0);
        let leaving_id = leaving.id;

        let mut state = CalendarState::new(2024, 5).unwrap();
        state
            .apply(CalendarAction::Load(CalendarSnapshot {
                rooms: vec![a, b, c],
                bookings: vec![arriving, leaving, blocked],
                payments: vec![payment(leaving_id, 100000)],
                ..Default::default()
            }))
            .unwrap();

        let summary = state.day_summary(d("2024-05-10"));
        assert_eq!(summary.arrivals_today, 1);
        assert_eq!(summary.departures_today, 1);
        assert_eq!(summary.in_house, 1);
        assert_eq!(summary.maintenance_today, 1);
        assert_eq!(summary.pending_balance, Decimal::from(200000));
    }
}
