// src/domain/links.rs
//
// Links de saída: WhatsApp (wa.me), URL do room service e imagem de QR.

use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::models::{
    booking::Booking,
    guest::Guest,
    hotel::Hotel,
    room::{Room, RoomQrLinks},
};

const QR_SERVICE: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Só dígitos; celulares colombianos de 10 dígitos (3xx) ganham o DDI 57.
pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 10 && digits.starts_with('3') {
        format!("57{}", digits)
    } else {
        digits
    }
}

pub fn whatsapp_link(phone: &str, text: &str) -> String {
    format!("https://wa.me/{}?text={}", normalize_phone(phone), urlencoding::encode(text))
}

/// Pesos colombianos sem centavos e com ponto de milhar: `$200.000`
pub fn format_cop(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}${}", sign, grouped)
}

pub fn booking_confirmation_message(hotel: &Hotel, guest: &Guest, room: &Room, booking: &Booking) -> String {
    format!(
        "¡Hola {}! Tu reserva en {} está confirmada.\n\
         Habitación: {}\n\
         Entrada: {}\n\
         Salida: {}\n\
         Noches: {}\n\
         Total: {}\n\
         ¡Te esperamos!",
        guest.full_name,
        hotel.name,
        room.name,
        booking.check_in.format("%d/%m/%Y"),
        booking.check_out.format("%d/%m/%Y"),
        booking.nights(),
        format_cop(booking.total_price),
    )
}

/// Página pública do cardápio que o QR do quarto abre
pub fn room_service_url(base_url: &str, hotel_id: Uuid, room_id: Uuid) -> String {
    format!("{}/menu/{}/{}", base_url.trim_end_matches('/'), hotel_id, room_id)
}

pub fn qr_image_url(data: &str) -> String {
    format!("{}?size=300x300&data={}", QR_SERVICE, urlencoding::encode(data))
}

pub fn room_qr_links(base_url: &str, hotel_id: Uuid, room_id: Uuid) -> RoomQrLinks {
    let menu_url = room_service_url(base_url, hotel_id, room_id);
    RoomQrLinks { qr_image_url: qr_image_url(&menu_url), menu_url }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_is_reduced_to_digits_with_country_code() {
        assert_eq!(normalize_phone("+57 300 123 4567"), "573001234567");
        assert_eq!(normalize_phone("300-123-4567"), "573001234567");
        assert_eq!(normalize_phone("+1 (555) 010-9999"), "15550109999");
    }

    #[test]
    fn whatsapp_text_is_percent_encoded() {
        let link = whatsapp_link("3001234567", "Hola Ana & co.\n¿Llegas?");
        assert_eq!(link, "https://wa.me/573001234567?text=Hola%20Ana%20%26%20co.%0A%C2%BFLlegas%3F");
    }

    #[test]
    fn cop_uses_dot_thousands_and_no_cents() {
        assert_eq!(format_cop(Decimal::from(200000)), "$200.000");
        assert_eq!(format_cop(Decimal::from(1_234_567)), "$1.234.567");
        assert_eq!(format_cop(Decimal::new(99950, 2)), "$1.000");
        assert_eq!(format_cop(Decimal::ZERO), "$0");
        assert_eq!(format_cop(Decimal::from(-5000)), "-$5.000");
    }

    #[test]
    fn room_service_url_ignores_trailing_slash() {
        let h = Uuid::nil();
        let r = Uuid::nil();
        assert_eq!(
            room_service_url("https://app.hotelero.co/", h, r),
            format!("https://app.hotelero.co/menu/{}/{}", h, r)
        );
    }

    #[test]
    fn qr_url_encodes_the_payload() {
        assert_eq!(
            qr_image_url("https://x.co/menu/a b"),
            "https://api.qrserver.com/v1/create-qr-code/?size=300x300&data=https%3A%2F%2Fx.co%2Fmenu%2Fa%20b"
        );
    }

    #[test]
    fn qr_links_point_the_image_at_the_menu_page() {
        let h = Uuid::new_v4();
        let r = Uuid::new_v4();
        let links = room_qr_links("https://app.hotelero.co", h, r);

        assert_eq!(links.menu_url, format!("https://app.hotelero.co/menu/{}/{}", h, r));
        assert_eq!(links.qr_image_url, qr_image_url(&links.menu_url));
        assert!(links.qr_image_url.contains("data=https%3A%2F%2Fapp.hotelero.co%2Fmenu%2F"));
    }
}
