// src/services/document_service.rs

use std::path::PathBuf;

use genpdf::{elements, style, Element};
use image::{DynamicImage, ImageOutputFormat, Luma};
use qrcode::QrCode;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{HotelRepository, HotelScope, RoomRepository},
    domain::links::{format_cop, room_qr_links, room_service_url},
    models::{booking::BookingDetail, hotel::Hotel, room::RoomQrLinks},
    services::booking_service::BookingService,
};

#[derive(Clone)]
pub struct DocumentService {
    booking_service: BookingService,
    hotel_repo: HotelRepository,
    room_repo: RoomRepository,
    fonts_dir: PathBuf,
    public_base_url: String,
    pool: PgPool,
}

impl DocumentService {
    pub fn new(
        booking_service: BookingService,
        hotel_repo: HotelRepository,
        room_repo: RoomRepository,
        fonts_dir: PathBuf,
        public_base_url: String,
        pool: PgPool,
    ) -> Self {
        Self { booking_service, hotel_repo, room_repo, fonts_dir, public_base_url, pool }
    }

    /// Documento TRA da estadia: cabeçalho com o hotel e uma linha com hóspede e datas
    pub async fn generate_tra_pdf(&self, scope: &HotelScope, booking_id: Uuid) -> Result<Vec<u8>, AppError> {
        let detail = self.booking_service.detail(scope, booking_id).await?;
        let hotel = self.hotel_repo.get(scope).await?;
        let [title, stay] = tra_lines(&hotel, &detail);

        // Carrega a fonte da pasta configurada em FONTS_DIR
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, "Roboto", None).map_err(|_| {
            AppError::FontNotFound(format!("Fonte Roboto não encontrada em {}", self.fonts_dir.display()))
        })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("TRA {}", detail.booking.id));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        doc.push(elements::Paragraph::new(title).styled(style::Style::new().bold().with_font_size(16)));
        doc.push(elements::Break::new(1));
        doc.push(elements::Paragraph::new(stay).styled(style::Style::new().with_font_size(11)));

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        tracing::info!(hotel_id = %scope.hotel_id(), booking_id = %booking_id, bytes = buffer.len(), "TRA gerado");
        Ok(buffer)
    }

    /// PNG com o QR que leva ao cardápio do room service daquele quarto
    pub async fn room_qr_png(&self, scope: &HotelScope, room_id: Uuid) -> Result<Vec<u8>, AppError> {
        let room = self.room_repo.find(&self.pool, scope, room_id).await?;
        let url = room_service_url(&self.public_base_url, scope.hotel_id(), room.id);
        render_qr_png(&url)
    }

    pub async fn room_qr_links(&self, scope: &HotelScope, room_id: Uuid) -> Result<RoomQrLinks, AppError> {
        let room = self.room_repo.find(&self.pool, scope, room_id).await?;
        Ok(room_qr_links(&self.public_base_url, scope.hotel_id(), room.id))
    }
}

/// As duas linhas do TRA
fn tra_lines(hotel: &Hotel, detail: &BookingDetail) -> [String; 2] {
    let booking = &detail.booking;
    let guest = match &detail.guest {
        Some(g) => format!("{} ({} {})", g.full_name.to_uppercase(), g.document_type.code(), g.document_number),
        None => "BLOQUEO".to_string(),
    };

    [
        format!("{} - Tarjeta de Registro Hotelero", hotel.name),
        format!(
            "{} | Hab. {} | {} a {} | {} noche(s) | {} huésped(es) | Total {}",
            guest,
            detail.room.name,
            booking.check_in.format("%d/%m/%Y"),
            booking.check_out.format("%d/%m/%Y"),
            booking.nights(),
            booking.guests_count,
            format_cop(detail.financials.total),
        ),
    ]
}

pub(crate) fn render_qr_png(data: &str) -> Result<Vec<u8>, AppError> {
    let code = QrCode::new(data.as_bytes())
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

    let image_buffer = code.render::<Luma<u8>>().min_dimensions(300, 300).build();
    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image_buffer)
        .write_to(&mut png, ImageOutputFormat::Png)
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qr_png_has_png_signature() {
        let png = render_qr_png("https://app.example.com/menu/a/b").unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
