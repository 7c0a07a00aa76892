// src/config.rs

use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;
use axum::extract::FromRef;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{
        BookingRepository, CrmRepository, GuestRepository, HotelRepository, MenuRepository, RoomRepository,
        UserRepository,
    },
    services::{
        auth::AuthService, booking_service::BookingService, crm_service::CrmService,
        dashboard_service::DashboardService, document_service::DocumentService, guest_service::GuestService,
        hotel_service::HotelService, inventory_service::InventoryService, menu_service::MenuService,
    },
};

/// Variáveis de ambiente lidas na inicialização (`.env` é carregado antes)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    pub fonts_dir: PathBuf,
    pub db_max_connections: u32,
    /// Base dos links que vão para o hóspede (QR do room service)
    pub public_base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("BIND_ADDR inválido")?;

        let db_max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse().context("DB_MAX_CONNECTIONS deve ser um número")?,
            Err(_) => 5,
        };

        let fonts_dir = env::var("FONTS_DIR").unwrap_or_else(|_| "./fonts".to_string()).into();
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self { database_url, jwt_secret, bind_addr, fonts_dir, db_max_connections, public_base_url })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: I18nStore,

    pub auth_service: AuthService,
    pub hotel_service: HotelService,
    pub inventory_service: InventoryService,
    pub booking_service: BookingService,
    pub guest_service: GuestService,
    pub menu_service: MenuService,
    pub crm_service: CrmService,
    pub document_service: DocumentService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar no banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let i18n_store = I18nStore::load_embedded()?;
        Ok(Self::from_parts(db_pool, i18n_store, config))
    }

    /// Monta o gráfico de dependências sobre um pool já aberto
    pub fn from_parts(db_pool: PgPool, i18n_store: I18nStore, config: &Config) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let hotel_repo = HotelRepository::new(db_pool.clone());
        let room_repo = RoomRepository::new(db_pool.clone());
        let guest_repo = GuestRepository::new(db_pool.clone());
        let booking_repo = BookingRepository::new(db_pool.clone());
        let menu_repo = MenuRepository::new(db_pool.clone());
        let crm_repo = CrmRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, config.jwt_secret.clone(), db_pool.clone());
        let hotel_service = HotelService::new(hotel_repo.clone(), db_pool.clone());
        let inventory_service = InventoryService::new(room_repo.clone());
        let booking_service = BookingService::new(
            booking_repo.clone(),
            guest_repo.clone(),
            room_repo.clone(),
            hotel_repo.clone(),
            db_pool.clone(),
        );
        let guest_service = GuestService::new(guest_repo, db_pool.clone());
        let menu_service = MenuService::new(menu_repo, room_repo.clone(), booking_repo, db_pool.clone());
        let crm_service = CrmService::new(crm_repo);
        let document_service = DocumentService::new(
            booking_service.clone(),
            hotel_repo,
            room_repo,
            config.fonts_dir.clone(),
            config.public_base_url.clone(),
            db_pool.clone(),
        );
        let dashboard_service = DashboardService::new(booking_service.clone());

        Self {
            db_pool,
            i18n_store,
            auth_service,
            hotel_service,
            inventory_service,
            booking_service,
            guest_service,
            menu_service,
            crm_service,
            document_service,
            dashboard_service,
        }
    }
}

impl FromRef<AppState> for I18nStore {
    fn from_ref(state: &AppState) -> Self {
        state.i18n_store.clone()
    }
}
