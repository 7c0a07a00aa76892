// src/domain/sire.rs
//
// Relatório SIRE (Migración Colombia): uma linha por hóspede-estadia,
// campos separados por '|', datas dd/mm/aaaa.

use chrono::NaiveDate;

use crate::{
    domain::availability::overlaps,
    models::{
        booking::{Booking, BookingStatus},
        guest::{Gender, Guest},
    },
};

const DATE_FMT: &str = "%d/%m/%Y";

/// Só estadias que de fato aconteceram e tocam o período `[from, to]`.
pub fn sire_eligible(booking: &Booking, from: NaiveDate, to: NaiveDate) -> bool {
    matches!(booking.status, BookingStatus::CheckedIn | BookingStatus::CheckedOut)
        && booking.guest_id.is_some()
        && overlaps(booking.check_in, booking.check_out, from, to.succ_opt().unwrap_or(to))
}

fn clean(field: &str) -> String {
    field.replace('|', "").trim().to_string()
}

/// `docType|docNumber|NAME|countryCode|birthDate|gender|checkIn|checkOut`
pub fn sire_line(guest: &Guest, booking: &Booking) -> String {
    let gender = match guest.gender {
        Some(Gender::M) => "M",
        Some(Gender::F) => "F",
        Some(Gender::X) => "X",
        None => "",
    };

    [
        guest.document_type.code().to_string(),
        clean(&guest.document_number),
        clean(&guest.full_name).to_uppercase(),
        clean(&guest.nationality).to_uppercase(),
        guest.birth_date.map(|d| d.format(DATE_FMT).to_string()).unwrap_or_default(),
        gender.to_string(),
        booking.check_in.format(DATE_FMT).to_string(),
        booking.check_out.format(DATE_FMT).to_string(),
    ]
    .join("|")
}

/// Monta o arquivo inteiro (uma linha por estadia elegível, ordenado por entrada).
/// `guest_of` resolve o hóspede da reserva; reservas sem hóspede conhecido são puladas.
pub fn sire_report<'a>(
    bookings: &[Booking],
    guest_of: impl Fn(&Booking) -> Option<&'a Guest>,
    from: NaiveDate,
    to: NaiveDate,
) -> String {
    let mut eligible: Vec<&Booking> = bookings.iter().filter(|b| sire_eligible(b, from, to)).collect();
    eligible.sort_by_key(|b| (b.check_in, b.created_at));

    eligible
        .into_iter()
        .filter_map(|b| guest_of(b).map(|g| sire_line(g, b)))
        .map(|line| line + "\n")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{booking::BookingSource, guest::DocumentType};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn guest() -> Guest {
        Guest {
            id: Uuid::new_v4(),
            hotel_id: Uuid::nil(),
            full_name: "José | Pérez".into(),
            document_type: DocumentType::Pa,
            document_number: "AB123456".into(),
            nationality: "ve".into(),
            phone: None,
            email: None,
            birth_date: Some(d("1985-07-04")),
            gender: Some(Gender::M),
            blood_type: None,
            consent_signed_at: None,
            signature_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn booking(guest_id: Option<Uuid>, check_in: &str, check_out: &str, status: BookingStatus) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            hotel_id: Uuid::nil(),
            room_id: Uuid::nil(),
            guest_id,
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
    fn line_is_pipe_separated_upper_cased_and_sanitized() {
        let g = guest();
        let b = booking(Some(g.id), "2024-03-01", "2024-03-03", BookingStatus::CheckedOut);

        assert_eq!(sire_line(&g, &b), "PA|AB123456|JOSÉ  PÉREZ|VE|04/07/1985|M|01/03/2024|03/03/2024");
    }

    #[test]
    fn only_real_stays_in_range_are_reported() {
        let g = guest();
        let bookings = vec![
            booking(Some(g.id), "2024-03-01", "2024-03-03", BookingStatus::CheckedOut),
            booking(Some(g.id), "2024-03-10", "2024-03-12", BookingStatus::Confirmed),
            booking(None, "2024-03-01", "2024-03-05", BookingStatus::CheckedIn),
            booking(Some(g.id), "2024-04-01", "2024-04-03", BookingStatus::CheckedIn),
        ];

        let report = sire_report(&bookings, |_| Some(&g), d("2024-03-01"), d("2024-03-31"));
        assert_eq!(report.lines().count(), 1);
        assert!(report.ends_with("01/03/2024|03/03/2024\n"));
    }

    #[test]
    fn range_end_is_inclusive() {
        let b = booking(Some(Uuid::nil()), "2024-03-31", "2024-04-02", BookingStatus::CheckedIn);
        assert!(sire_eligible(&b, d("2024-03-01"), d("2024-03-31")));
        assert!(!sire_eligible(&b, d("2024-03-01"), d("2024-03-30")));
    }
}
