//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use hotelero::{
    config::{AppState, Config},
    docs::ApiDoc,
    handlers,
    middleware::auth::{auth_guard, hotel_guard, super_admin_guard},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env()?;
    let app_state = AppState::new(&config).await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Só login: ainda não há hotel escolhido
    let user_routes = Router::new()
        .route("/users/me", get(handlers::auth::get_me))
        .route("/users/me/hotels", get(handlers::auth::get_my_hotels))
        .route("/hotels", post(handlers::hotels::create_hotel))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    // Recepção: login + X-Hotel-ID verificado (o último layer roda primeiro)
    let hotel_routes = Router::new()
        .route(
            "/settings",
            get(handlers::hotels::get_settings).put(handlers::hotels::update_settings),
        )
        .route(
            "/rooms",
            post(handlers::inventory::create_room).get(handlers::inventory::list_rooms),
        )
        .route(
            "/rooms/{id}",
            put(handlers::inventory::update_room).delete(handlers::inventory::delete_room),
        )
        .route("/rooms/{id}/qr", get(handlers::documents::room_qr))
        .route("/rooms/{id}/qr-links", get(handlers::documents::room_qr_links))
        .route("/calendar", get(handlers::bookings::get_calendar))
        .route("/bookings", post(handlers::bookings::create_booking))
        .route("/bookings/availability", get(handlers::bookings::get_availability))
        .route(
            "/bookings/{id}",
            get(handlers::bookings::get_booking)
                .put(handlers::bookings::update_booking)
                .delete(handlers::bookings::delete_booking),
        )
        .route("/bookings/{id}/check-in", post(handlers::bookings::check_in))
        .route("/bookings/{id}/check-out", post(handlers::bookings::check_out))
        .route("/bookings/{id}/cancel", post(handlers::bookings::cancel_booking))
        .route("/bookings/{id}/payments", post(handlers::bookings::register_payment))
        .route("/bookings/{id}/charges", post(handlers::bookings::add_charge))
        .route("/bookings/{id}/payment-quote", post(handlers::bookings::payment_quote))
        .route("/bookings/{id}/whatsapp", get(handlers::bookings::whatsapp_confirmation))
        .route("/bookings/{id}/tra.pdf", get(handlers::documents::generate_tra_pdf))
        .route("/guests", get(handlers::guests::list_guests))
        .route("/guests/scan", post(handlers::guests::scan_document))
        .route(
            "/guests/{id}",
            get(handlers::guests::get_guest).put(handlers::guests::update_guest),
        )
        .route("/assistant/voice", post(handlers::guests::interpret_voice))
        .route(
            "/menu",
            get(handlers::menu::list_menu).post(handlers::menu::create_menu_item),
        )
        .route(
            "/menu/{id}",
            put(handlers::menu::update_menu_item).delete(handlers::menu::delete_menu_item),
        )
        .route("/orders", get(handlers::menu::list_orders))
        .route("/orders/{id}/status", patch(handlers::menu::update_order_status))
        .route("/leads", get(handlers::crm::list_leads))
        .route("/leads/{id}", patch(handlers::crm::update_lead_status))
        .route("/exports/sire", get(handlers::documents::export_sire))
        .route("/dashboard/summary", get(handlers::dashboard::get_summary))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), hotel_guard))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    // Console da plataforma
    let admin_routes = Router::new()
        .route("/hotels", get(handlers::admin::list_hotels))
        .route("/hotels/{id}/subscription", patch(handlers::admin::update_subscription))
        .route(
            "/hunter",
            post(handlers::admin::create_hunted_lead).get(handlers::admin::list_hunted_leads),
        )
        .route("/hunter/{id}", patch(handlers::admin::update_hunted_lead))
        .route("/hunter/{id}/whatsapp", get(handlers::admin::hunted_lead_whatsapp))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), super_admin_guard))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    // Funil de reservas, landing e cardápio do QR (sem login)
    let public_routes = Router::new()
        .route("/hotels/{hotel_id}", get(handlers::public::get_hotel_profile))
        .route("/hotels/{hotel_id}/availability", get(handlers::public::get_availability))
        .route("/hotels/{hotel_id}/bookings", post(handlers::public::create_booking))
        .route("/hotels/{hotel_id}/leads", post(handlers::public::capture_lead))
        .route("/hotels/{hotel_id}/menu", get(handlers::public::get_menu))
        .route("/hotels/{hotel_id}/rooms/{room_id}/orders", post(handlers::public::place_order));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/public", public_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api", user_routes.merge(hotel_routes))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
