// src/domain/availability.rs
//
// Regras de ocupação de quartos. Nada aqui toca no banco: recebe as listas já
// carregadas (do repositório ou do estado do calendário) e responde.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        booking::{Booking, BookingStatus},
        room::Room,
    },
};

/// Valida `[check_in, check_out)` e devolve o número de noites.
pub fn validate_stay(check_in: NaiveDate, check_out: NaiveDate) -> Result<i64, AppError> {
    let nights = (check_out - check_in).num_days();
    if nights < 1 {
        return Err(AppError::InvalidDateRange);
    }
    Ok(nights)
}

/// Sobreposição de intervalos semiabertos. Reservas "encostadas"
/// (saída de uma = entrada da outra) não conflitam.
pub fn overlaps(a_in: NaiveDate, a_out: NaiveDate, b_in: NaiveDate, b_out: NaiveDate) -> bool {
    a_in < b_out && a_out > b_in
}

/// Primeira reserva que ainda ocupa o quarto e colide com o período pedido.
/// `exclude` é a própria reserva quando estamos editando.
pub fn find_conflict<'a>(
    bookings: &'a [Booking],
    room_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
    exclude: Option<Uuid>,
) -> Option<&'a Booking> {
    bookings.iter().find(|b| {
        b.room_id == room_id
            && Some(b.id) != exclude
            && b.status.blocks_inventory()
            && overlaps(b.check_in, b.check_out, check_in, check_out)
    })
}

/// Qual reserva ocupa a célula (quarto, dia)?
///
/// Dados legados podem ter mais de uma reserva na mesma célula; ganha a de maior
/// prioridade (`checked_in > confirmed > checked_out > maintenance`). Empate:
/// a primeira na ordem da lista.
pub fn booking_for_date(bookings: &[Booking], room_id: Uuid, date: NaiveDate) -> Option<&Booking> {
    bookings
        .iter()
        .filter(|b| b.room_id == room_id && b.covers(date))
        .filter_map(|b| b.status.cell_priority().map(|priority| (priority, b)))
        .fold(None::<(u8, &Booking)>, |best, (priority, booking)| match best {
            Some((best_priority, _)) if best_priority >= priority => best,
            _ => Some((priority, booking)),
        })
        .map(|(_, booking)| booking)
}

/// Ciclo de vida da reserva: falha com `InvalidStatusTransition` fora do grafo permitido.
pub fn ensure_transition(current: BookingStatus, next: BookingStatus) -> Result<(), AppError> {
    if !current.can_transition_to(next) {
        return Err(AppError::InvalidStatusTransition {
            from: current.as_str().to_string(),
            to: next.as_str().to_string(),
        });
    }
    Ok(())
}

/// Quartos livres em `[check_in, check_out)`.
/// Sem uma das datas não há o que filtrar: devolve todos.
pub fn available_rooms<'a>(
    rooms: &'a [Room],
    bookings: &[Booking],
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
    exclude: Option<Uuid>,
) -> Vec<&'a Room> {
    let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
        return rooms.iter().collect();
    };

    rooms
        .iter()
        .filter(|room| find_conflict(bookings, room.id, check_in, check_out, exclude).is_none())
        .collect()
}

/// Preço da estadia: diária × noites (× hóspedes quando o quarto cobra por pessoa).
pub fn quote_stay(
    room: &Room,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests_count: i32,
) -> Result<Decimal, AppError> {
    let nights = validate_stay(check_in, check_out)?;

    if guests_count > room.capacity {
        return Err(AppError::CapacityExceeded { capacity: room.capacity });
    }

    let per_night = if room.per_person_pricing {
        room.price * Decimal::from(guests_count.max(1))
    } else {
        room.price
    };

    Ok(per_night * Decimal::from(nights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{booking::BookingSource, room::RoomStatus};
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

    fn booking(room_id: Uuid, check_in: &str, check_out: &str, status: BookingStatus) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            hotel_id: Uuid::nil(),
            room_id,
            guest_id: None,
            check_in: d(check_in),
            check_out: d(check_out),
            status,
            total_price: Decimal::ZERO,
            source: BookingSource::Direct,
            guests_count: 1,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn overlapping_query_excludes_room_but_adjacent_one_does_not() {
        let rooms = vec![room("X"), room("Y")];
        let bookings = vec![booking(rooms[0].id, "2024-01-10", "2024-01-15", BookingStatus::Confirmed)];

        let free = available_rooms(&rooms, &bookings, Some(d("2024-01-14")), Some(d("2024-01-16")), None);
        assert_eq!(free.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(), vec!["Y"]);

        let free = available_rooms(&rooms, &bookings, Some(d("2024-01-15")), Some(d("2024-01-16")), None);
        assert_eq!(free.len(), 2);
    }

    #[test]
    fn cancelled_and_checked_out_bookings_release_the_room() {
        let rooms = vec![room("X")];
        let bookings = vec![
            booking(rooms[0].id, "2024-01-10", "2024-01-15", BookingStatus::Cancelled),
            booking(rooms[0].id, "2024-01-10", "2024-01-15", BookingStatus::CheckedOut),
        ];

        let free = available_rooms(&rooms, &bookings, Some(d("2024-01-11")), Some(d("2024-01-12")), None);
        assert_eq!(free.len(), 1);
    }

    #[test]
    fn maintenance_blocks_the_room() {
        let rooms = vec![room("X")];
        let bookings = vec![booking(rooms[0].id, "2024-01-10", "2024-01-12", BookingStatus::Maintenance)];

        let free = available_rooms(&rooms, &bookings, Some(d("2024-01-11")), Some(d("2024-01-13")), None);
        assert!(free.is_empty());
    }

    #[test]
    fn editing_a_booking_ignores_itself() {
        let rooms = vec![room("X")];
        let bookings = vec![booking(rooms[0].id, "2024-01-10", "2024-01-15", BookingStatus::Confirmed)];
        let own_id = bookings[0].id;

        let free = available_rooms(&rooms, &bookings, Some(d("2024-01-12")), Some(d("2024-01-17")), Some(own_id));
        assert_eq!(free.len(), 1);
    }

    #[test]
    fn missing_dates_return_every_room() {
        let rooms = vec![room("X"), room("Y")];
        let bookings = vec![booking(rooms[0].id, "2024-01-10", "2024-01-15", BookingStatus::CheckedIn)];

        assert_eq!(available_rooms(&rooms, &bookings, None, Some(d("2024-01-12")), None).len(), 2);
        assert_eq!(available_rooms(&rooms, &bookings, Some(d("2024-01-12")), None, None).len(), 2);
    }

    #[test]
    fn cell_prefers_checked_in_over_confirmed() {
        let room_id = Uuid::new_v4();
        let bookings = vec![
            booking(room_id, "2024-02-01", "2024-02-05", BookingStatus::Confirmed),
            booking(room_id, "2024-02-02", "2024-02-04", BookingStatus::CheckedIn),
        ];

        let cell = booking_for_date(&bookings, room_id, d("2024-02-03")).unwrap();
        assert_eq!(cell.status, BookingStatus::CheckedIn);
    }

    #[test]
    fn cell_ignores_cancelled_and_check_out_day() {
        let room_id = Uuid::new_v4();
        let bookings = vec![
            booking(room_id, "2024-02-01", "2024-02-05", BookingStatus::Cancelled),
            booking(room_id, "2024-02-01", "2024-02-03", BookingStatus::Maintenance),
        ];

        assert_eq!(booking_for_date(&bookings, room_id, d("2024-02-02")).unwrap().status, BookingStatus::Maintenance);
        // 03 é o dia de saída do bloqueio: célula livre
        assert!(booking_for_date(&bookings, room_id, d("2024-02-03")).is_none());
    }

    #[test]
    fn cell_tie_keeps_list_order() {
        let room_id = Uuid::new_v4();
        let bookings = vec![
            booking(room_id, "2024-02-01", "2024-02-05", BookingStatus::Confirmed),
            booking(room_id, "2024-02-01", "2024-02-05", BookingStatus::Confirmed),
        ];

        let cell = booking_for_date(&bookings, room_id, d("2024-02-02")).unwrap();
        assert_eq!(cell.id, bookings[0].id);
    }

    #[test]
    fn closed_bookings_cannot_move_again() {
        assert!(ensure_transition(BookingStatus::Confirmed, BookingStatus::CheckedIn).is_ok());
        match ensure_transition(BookingStatus::CheckedOut, BookingStatus::CheckedIn) {
            Err(AppError::InvalidStatusTransition { from, to }) => {
                assert_eq!(from, "checked_out");
                assert_eq!(to, "checked_in");
            }
            other => panic!("esperava InvalidStatusTransition, veio {:?}", other),
        }
    }

    #[test]
    fn rejects_empty_or_inverted_stays() {
        assert!(matches!(validate_stay(d("2024-03-03"), d("2024-03-03")), Err(AppError::InvalidDateRange)));
        assert!(matches!(validate_stay(d("2024-03-04"), d("2024-03-03")), Err(AppError::InvalidDateRange)));
        assert_eq!(validate_stay(d("2024-03-01"), d("2024-03-03")).unwrap(), 2);
    }

    #[test]
    fn quote_multiplies_by_guests_only_for_per_person_rooms() {
        let mut r = room("Suite");
        assert_eq!(quote_stay(&r, d("2024-03-01"), d("2024-03-03"), 2).unwrap(), Decimal::from(200000));

        r.per_person_pricing = true;
        assert_eq!(quote_stay(&r, d("2024-03-01"), d("2024-03-03"), 2).unwrap(), Decimal::from(400000));

        assert!(matches!(
            quote_stay(&r, d("2024-03-01"), d("2024-03-03"), 3),
            Err(AppError::CapacityExceeded { capacity: 2 })
        ));
    }
}
