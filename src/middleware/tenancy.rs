// src/middleware/tenancy.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use uuid::Uuid;

use crate::{
    common::{
        error::{ApiError, AppError},
        i18n::I18nStore,
    },
    db::HotelScope,
    middleware::i18n::Locale,
};

// O nome do nosso cabeçalho HTTP customizado
pub const HOTEL_ID_HEADER: &str = "x-hotel-id";

/// Hotel que o usuário *quer* acessar (ainda não verificado).
/// Quem transforma isto em `HotelScope` é o `hotel_guard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotelContext(pub Uuid);

fn header_error(parts: &Parts, store: &I18nStore, code: &str) -> ApiError {
    let locale = Locale::from_headers(&parts.headers, store);
    ApiError::new(StatusCode::BAD_REQUEST, code, store.translate(&locale.0, code, &[]))
}

impl<S> FromRequestParts<S> for HotelContext
where
    I18nStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let store = I18nStore::from_ref(state);

        let value = parts
            .headers
            .get(HOTEL_ID_HEADER)
            .ok_or_else(|| header_error(parts, &store, "missing_hotel_header"))?;

        value
            .to_str()
            .ok()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .map(HotelContext)
            .ok_or_else(|| header_error(parts, &store, "invalid_hotel_header"))
    }
}

// O escopo só existe nas extensions se o `hotel_guard` (ou a rota pública) o concedeu
impl<S> FromRequestParts<S> for HotelScope
where
    I18nStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(scope) = parts.extensions.get::<HotelScope>() {
            return Ok(*scope);
        }

        let store = I18nStore::from_ref(state);
        let locale = Locale::from_headers(&parts.headers, &store);
        tracing::error!(uri = %parts.uri, "Rota de hotel sem hotel_guard");
        Err(AppError::InternalServerError(anyhow::anyhow!("HotelScope ausente")).to_api_error(&locale, &store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(hotel_id: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/rooms").header("accept-language", "en");
        if let Some(value) = hotel_id {
            builder = builder.header(HOTEL_ID_HEADER, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn reads_the_hotel_header() {
        let store = I18nStore::load_embedded().unwrap();
        let id = Uuid::new_v4();

        let mut parts = parts_with(Some(&id.to_string()));
        let ctx = HotelContext::from_request_parts(&mut parts, &store).await.unwrap();
        assert_eq!(ctx, HotelContext(id));
    }

    #[tokio::test]
    async fn missing_or_malformed_header_is_a_bad_request() {
        let store = I18nStore::load_embedded().unwrap();

        let mut parts = parts_with(None);
        let err = HotelContext::from_request_parts(&mut parts, &store).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "missing_hotel_header");

        let mut parts = parts_with(Some("hotel-1"));
        let err = HotelContext::from_request_parts(&mut parts, &store).await.unwrap_err();
        assert_eq!(err.code, "invalid_hotel_header");
        assert_ne!(err.error, "invalid_hotel_header");
    }

    #[tokio::test]
    async fn scope_without_guard_is_refused() {
        let store = I18nStore::load_embedded().unwrap();
        let mut parts = parts_with(None);
        let err = HotelScope::from_request_parts(&mut parts, &store).await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
