// tests/calendar_flow.rs
//
// Fluxo de recepção de ponta a ponta sobre o estado do calendário:
// reserva, pagamento parcial, check-in e check-out com saldo.

use chrono::{NaiveDate, Utc};
use hotelero::{
    common::error::AppError,
    domain::{
        availability::{available_rooms, overlaps, quote_stay},
        calendar::{CalendarAction, CalendarSnapshot, CalendarState},
        finance::calculate_tax,
    },
    models::{
        booking::{Booking, BookingSource, BookingStatus, Charge, Payment, PaymentMethod},
        room::{Room, RoomStatus},
    },
};
use rust_decimal::Decimal;
use uuid::Uuid;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn room(name: &str, price: i64) -> Room {
    Room {
        id: Uuid::new_v4(),
        hotel_id: Uuid::nil(),
        name: name.into(),
        price: Decimal::from(price),
        capacity: 2,
        per_person_pricing: false,
        status: RoomStatus::Active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn booking(room_id: Uuid, check_in: &str, check_out: &str, total: i64) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        hotel_id: Uuid::nil(),
        room_id,
        guest_id: None,
        check_in: d(check_in),
        check_out: d(check_out),
        status: BookingStatus::Confirmed,
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
        method: PaymentMethod::Cash,
        created_at: Utc::now(),
    }
}

#[test]
fn partial_payment_blocks_check_out_until_forced() {
    let a = room("A", 100000);
    let price = quote_stay(&a, d("2024-03-01"), d("2024-03-03"), 1).unwrap();
    assert_eq!(price, Decimal::from(200000));

    let b = booking(a.id, "2024-03-01", "2024-03-03", 200000);
    let id = b.id;

    let mut state = CalendarState::new(2024, 3).unwrap();
    state
        .apply(CalendarAction::Load(CalendarSnapshot { rooms: vec![a], bookings: vec![b], ..Default::default() }))
        .unwrap();

    // reserva, pagamento parcial e tentativa de saída, sem check-in no meio
    state.apply(CalendarAction::AddPayment(payment(id, 100000))).unwrap();

    let financials = state.booking_financials(id).unwrap();
    assert_eq!(financials.paid, Decimal::from(100000));
    assert_eq!(financials.pending, Decimal::from(100000));

    match state.apply(CalendarAction::CheckOut { booking_id: id, force: false }) {
        Err(AppError::PendingBalance { pending }) => assert_eq!(pending, Decimal::from(100000)),
        other => panic!("esperava PendingBalance, veio {:?}", other),
    }

    state.apply(CalendarAction::CheckOut { booking_id: id, force: true }).unwrap();
    assert_eq!(state.booking(id).unwrap().status, BookingStatus::CheckedOut);

    // encerrada: não aceita mais consumo
    let minibar = Charge {
        id: Uuid::new_v4(),
        hotel_id: Uuid::nil(),
        booking_id: id,
        description: "Minibar".into(),
        price: Decimal::from(12000),
        created_at: Utc::now(),
    };
    assert!(matches!(state.apply(CalendarAction::AddCharge(minibar)), Err(AppError::BookingClosed)));
}

#[test]
fn charges_raise_the_pending_balance() {
    let a = room("A", 100000);
    let b = booking(a.id, "2024-03-10", "2024-03-11", 100000);
    let id = b.id;

    let mut state = CalendarState::new(2024, 3).unwrap();
    state
        .apply(CalendarAction::Load(CalendarSnapshot { rooms: vec![a], bookings: vec![b], ..Default::default() }))
        .unwrap();

    state
        .apply(CalendarAction::AddCharge(Charge {
            id: Uuid::new_v4(),
            hotel_id: Uuid::nil(),
            booking_id: id,
            description: "Lavandería".into(),
            price: Decimal::from(25000),
            created_at: Utc::now(),
        }))
        .unwrap();
    state.apply(CalendarAction::AddPayment(payment(id, 125000))).unwrap();
    state.apply(CalendarAction::CheckIn(id)).unwrap();

    let financials = state.booking_financials(id).unwrap();
    assert_eq!(financials.total, Decimal::from(125000));
    assert!(!financials.has_debt());

    state.apply(CalendarAction::CheckOut { booking_id: id, force: false }).unwrap();
}

#[test]
fn adjacent_stays_share_the_turnover_day() {
    assert!(!overlaps(d("2024-03-01"), d("2024-03-03"), d("2024-03-03"), d("2024-03-05")));
    assert!(overlaps(d("2024-03-01"), d("2024-03-04"), d("2024-03-03"), d("2024-03-05")));

    let a = room("A", 100000);
    let b = room("B", 100000);
    let bookings = vec![booking(a.id, "2024-03-01", "2024-03-03", 200000)];

    let rooms = [a.clone(), b.clone()];
    let free = available_rooms(&rooms, &bookings, Some(d("2024-03-03")), Some(d("2024-03-05")), None);
    assert_eq!(free.len(), 2);

    let free = available_rooms(&rooms, &bookings, Some(d("2024-03-02")), Some(d("2024-03-04")), None);
    assert_eq!(free.iter().map(|r| r.id).collect::<Vec<_>>(), vec![b.id]);

    // editando a própria reserva, o quarto dela continua livre
    let own = bookings[0].id;
    let only_a = [a.clone()];
    let free = available_rooms(&only_a, &bookings, Some(d("2024-03-02")), Some(d("2024-03-04")), Some(own));
    assert_eq!(free.len(), 1);
}

#[test]
fn cancelled_booking_frees_the_room() {
    let a = room("A", 100000);
    let b = booking(a.id, "2024-03-01", "2024-03-05", 400000);
    let id = b.id;

    let mut state = CalendarState::new(2024, 3).unwrap();
    state
        .apply(CalendarAction::Load(CalendarSnapshot { rooms: vec![a.clone()], bookings: vec![b], ..Default::default() }))
        .unwrap();
    state.apply(CalendarAction::Cancel(id)).unwrap();

    let again = booking(a.id, "2024-03-02", "2024-03-04", 200000);
    state.apply(CalendarAction::UpsertBooking(again.clone())).unwrap();

    let grid = state.month_grid();
    assert_eq!(grid[0].cells[1].booking_id, Some(again.id));
}

#[test]
fn tax_is_carved_out_of_the_invoice_total() {
    let t = calculate_tax(Decimal::from(238000), Decimal::from(19));
    assert_eq!(t.base, Decimal::from(200000));
    assert_eq!(t.tax, Decimal::from(38000));
}
