// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::domain;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::get_my_hotels,

        // --- Hotels ---
        handlers::hotels::create_hotel,
        handlers::hotels::get_settings,
        handlers::hotels::update_settings,

        // --- Rooms ---
        handlers::inventory::create_room,
        handlers::inventory::list_rooms,
        handlers::inventory::update_room,
        handlers::inventory::delete_room,
        handlers::documents::room_qr,
        handlers::documents::room_qr_links,

        // --- Bookings ---
        handlers::bookings::get_calendar,
        handlers::bookings::get_availability,
        handlers::bookings::create_booking,
        handlers::bookings::get_booking,
        handlers::bookings::update_booking,
        handlers::bookings::delete_booking,
        handlers::bookings::check_in,
        handlers::bookings::check_out,
        handlers::bookings::cancel_booking,
        handlers::bookings::register_payment,
        handlers::bookings::add_charge,
        handlers::bookings::payment_quote,
        handlers::bookings::whatsapp_confirmation,

        // --- Guests ---
        handlers::guests::list_guests,
        handlers::guests::get_guest,
        handlers::guests::update_guest,
        handlers::guests::scan_document,
        handlers::guests::interpret_voice,

        // --- Room service ---
        handlers::menu::list_menu,
        handlers::menu::create_menu_item,
        handlers::menu::update_menu_item,
        handlers::menu::delete_menu_item,
        handlers::menu::list_orders,
        handlers::menu::update_order_status,

        // --- Public ---
        handlers::public::get_hotel_profile,
        handlers::public::get_availability,
        handlers::public::create_booking,
        handlers::public::capture_lead,
        handlers::public::get_menu,
        handlers::public::place_order,

        // --- CRM ---
        handlers::crm::list_leads,
        handlers::crm::update_lead_status,

        // --- Admin ---
        handlers::admin::list_hotels,
        handlers::admin::update_subscription,
        handlers::admin::create_hunted_lead,
        handlers::admin::list_hunted_leads,
        handlers::admin::update_hunted_lead,
        handlers::admin::hunted_lead_whatsapp,

        // --- Exports ---
        handlers::documents::export_sire,
        handlers::documents::generate_tra_pdf,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Hotels ---
            models::hotel::Hotel,
            models::hotel::SubscriptionStatus,
            models::hotel::PublicHotelProfile,
            models::hotel::CreateHotelPayload,
            models::hotel::UpdateHotelSettingsRequest,
            models::hotel::UpdateSubscriptionRequest,
            models::hotel::AdminHotelEntry,

            // --- Rooms ---
            models::room::Room,
            models::room::RoomStatus,
            models::room::CreateRoomPayload,
            models::room::UpdateRoomPayload,
            models::room::RoomQuote,
            models::room::RoomQrLinks,

            // --- Guests ---
            models::guest::Guest,
            models::guest::GuestInput,
            models::guest::UpdateGuestPayload,
            models::guest::DocumentType,
            models::guest::Gender,

            // --- Bookings ---
            models::booking::Booking,
            models::booking::BookingStatus,
            models::booking::BookingSource,
            models::booking::PaymentMethod,
            models::booking::Payment,
            models::booking::Charge,
            models::booking::BookingKind,
            models::booking::CreateBookingPayload,
            models::booking::UpdateBookingPayload,
            models::booking::PublicBookingPayload,
            models::booking::CheckOutPayload,
            models::booking::RegisterPaymentPayload,
            models::booking::AddChargePayload,
            models::booking::PaymentQuotePayload,
            models::booking::BookingDetail,
            models::booking::WhatsappLink,

            // --- Room service ---
            models::menu::MenuItem,
            models::menu::CreateMenuItemPayload,
            models::menu::UpdateMenuItemPayload,
            models::menu::ServiceOrderStatus,
            models::menu::OrderLine,
            models::menu::ServiceOrder,
            models::menu::OrderLineRequest,
            models::menu::PlaceOrderPayload,
            models::menu::UpdateOrderStatusPayload,

            // --- CRM ---
            models::crm::Lead,
            models::crm::LeadStatus,
            models::crm::CreateLeadPayload,
            models::crm::UpdateLeadStatusPayload,
            models::crm::HuntedLead,
            models::crm::HuntedLeadStatus,
            models::crm::CreateHuntedLeadPayload,
            models::crm::UpdateHuntedLeadPayload,

            // --- Dashboard / assistente ---
            models::dashboard::DashboardSummary,
            models::assistant::AssistantPayload,
            models::assistant::ScanResult,
            models::assistant::VoiceResult,

            // --- Domínio ---
            domain::calendar::CalendarView,
            domain::calendar::RoomRow,
            domain::calendar::CalendarCell,
            domain::finance::Financials,
            domain::finance::TaxBreakdown,
            domain::finance::PaymentQuote,
            domain::assistant::DocumentScan,
            domain::assistant::VoiceCommand,
            domain::assistant::VoiceAction,
            domain::assistant::BookingIntent,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e seus hotéis"),
        (name = "Hotels", description = "Cadastro de hotéis"),
        (name = "Settings", description = "Configurações do hotel (impostos, landing, WhatsApp)"),
        (name = "Rooms", description = "Inventário de quartos"),
        (name = "Calendar", description = "Grade mensal de ocupação"),
        (name = "Bookings", description = "Reservas, pagamentos e consumos"),
        (name = "Guests", description = "Cadastro de hóspedes"),
        (name = "Assistant", description = "Leitura de documentos e comandos de voz"),
        (name = "Room Service", description = "Cardápio e pedidos dos quartos"),
        (name = "Public", description = "Landing, funil de reservas e cardápio do QR"),
        (name = "Leads", description = "Leads capturados pela landing"),
        (name = "Admin", description = "Console da plataforma (assinaturas e hunter)"),
        (name = "Exports", description = "SIRE e TRA"),
        (name = "Dashboard", description = "Indicadores do dia")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
