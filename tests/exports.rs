// tests/exports.rs
//
// Saídas que vão para fora do sistema: arquivo SIRE e mensagem de WhatsApp.

use chrono::{NaiveDate, Utc};
use hotelero::{
    domain::{
        links::{booking_confirmation_message, whatsapp_link},
        sire::sire_report,
    },
    models::{
        booking::{Booking, BookingSource, BookingStatus},
        guest::{DocumentType, Gender, Guest},
        hotel::{Hotel, SubscriptionStatus},
        room::{Room, RoomStatus},
    },
};
use rust_decimal::Decimal;
use uuid::Uuid;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn guest(name: &str, doc: &str) -> Guest {
    Guest {
        id: Uuid::new_v4(),
        hotel_id: Uuid::nil(),
        full_name: name.into(),
        document_type: DocumentType::Cc,
        document_number: doc.into(),
        nationality: "co".into(),
        phone: Some("300 123 4567".into()),
        email: None,
        birth_date: Some(d("1990-05-20")),
        gender: Some(Gender::F),
        blood_type: Some("O+".into()),
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
        total_price: Decimal::from(200000),
        source: BookingSource::Direct,
        guests_count: 1,
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn sire_lists_each_real_stay_sorted_by_arrival() {
    let ana = guest("Ana Gómez", "1020304050");
    let luis = guest("Luis Díaz", "79888777");
    let guests = [ana.clone(), luis.clone()];

    let bookings = vec![
        booking(Some(luis.id), "2024-03-15", "2024-03-17", BookingStatus::CheckedIn),
        booking(Some(ana.id), "2024-03-01", "2024-03-03", BookingStatus::CheckedOut),
        // nunca chegou
        booking(Some(ana.id), "2024-03-20", "2024-03-21", BookingStatus::Confirmed),
        booking(Some(luis.id), "2024-03-22", "2024-03-23", BookingStatus::Cancelled),
        // bloqueio sem hóspede
        booking(None, "2024-03-05", "2024-03-06", BookingStatus::Maintenance),
    ];

    let report = sire_report(
        &bookings,
        |b| b.guest_id.and_then(|id| guests.iter().find(|g| g.id == id)),
        d("2024-03-01"),
        d("2024-03-31"),
    );

    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines,
        vec![
            "CC|1020304050|ANA GÓMEZ|CO|20/05/1990|F|01/03/2024|03/03/2024",
            "CC|79888777|LUIS DÍAZ|CO|20/05/1990|F|15/03/2024|17/03/2024",
        ]
    );
}

#[test]
fn sire_skips_bookings_whose_guest_is_unknown() {
    let bookings = vec![booking(Some(Uuid::new_v4()), "2024-03-01", "2024-03-03", BookingStatus::CheckedOut)];
    let report = sire_report(&bookings, |_| None, d("2024-03-01"), d("2024-03-31"));
    assert!(report.is_empty());
}

#[test]
fn confirmation_message_goes_to_the_guest_phone() {
    let hotel = Hotel {
        id: Uuid::nil(),
        name: "Casa Colonial".into(),
        brand_color: None,
        tax_rate: Decimal::from(19),
        commission_rate: Decimal::from(15),
        phone: None,
        subscription_status: SubscriptionStatus::Active,
        trial_ends_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let room = Room {
        id: Uuid::new_v4(),
        hotel_id: Uuid::nil(),
        name: "101".into(),
        price: Decimal::from(100000),
        capacity: 2,
        per_person_pricing: false,
        status: RoomStatus::Active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let ana = guest("Ana", "1020304050");
    let stay = booking(Some(ana.id), "2024-03-01", "2024-03-03", BookingStatus::Confirmed);

    let message = booking_confirmation_message(&hotel, &ana, &room, &stay);
    assert!(message.starts_with("¡Hola Ana! Tu reserva en Casa Colonial está confirmada."));
    assert!(message.contains("Noches: 2"));
    assert!(message.contains("Total: $200.000"));

    let link = whatsapp_link(ana.phone.as_deref().unwrap(), &message);
    assert!(link.starts_with("https://wa.me/573001234567?text=%C2%A1Hola%20Ana%21"));
}
