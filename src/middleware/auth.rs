// src/middleware/auth.rs

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::{
        error::{ApiError, AppError},
        i18n::I18nStore,
    },
    config::AppState,
    middleware::{i18n::Locale, tenancy::HotelContext},
    models::auth::User,
};

// Extrator para obter o usuário autenticado diretamente nos handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Valida o Bearer e guarda o usuário nas extensions da requisição
pub async fn auth_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) =
        bearer.ok_or_else(|| AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store))?;

    let user = app_state
        .auth_service
        .validate_token(bearer.token())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    request.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(request).await)
}

/// Roda depois do `auth_guard`: confere o `X-Hotel-ID` contra a associação do usuário
/// e a assinatura do hotel. Só daqui sai o `HotelScope` das rotas de recepção.
pub async fn hotel_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    HotelContext(hotel_id): HotelContext,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let scope = app_state
        .hotel_service
        .authorize_member(&user, hotel_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    request.extensions_mut().insert(scope);
    Ok(next.run(request).await)
}

/// Console da plataforma (assinaturas, hunter)
pub async fn super_admin_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !user.is_super_admin {
        tracing::warn!(user_id = %user.id, "Acesso ao console negado");
        return Err(AppError::SuperAdminRequired.to_api_error(&locale, &app_state.i18n_store));
    }
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    I18nStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(user.clone());
        }

        let store = I18nStore::from_ref(state);
        let locale = Locale::from_headers(&parts.headers, &store);
        Err(AppError::InvalidToken.to_api_error(&locale, &store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request as HttpRequest, StatusCode};
    use chrono::Utc;
    use uuid::Uuid;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "recepcion@casacolonial.co".into(),
            full_name: Some("Recepción".into()),
            password_hash: String::new(),
            is_super_admin: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn extracts_the_user_placed_by_the_guard() {
        let store = I18nStore::load_embedded().unwrap();
        let expected = user();

        let mut parts = HttpRequest::builder().uri("/api/users/me").body(()).unwrap().into_parts().0;
        parts.extensions.insert(AuthenticatedUser(expected.clone()));

        let AuthenticatedUser(found) = AuthenticatedUser::from_request_parts(&mut parts, &store).await.unwrap();
        assert_eq!(found.id, expected.id);
    }

    #[tokio::test]
    async fn missing_user_is_unauthorized() {
        let store = I18nStore::load_embedded().unwrap();
        let mut parts = HttpRequest::builder().uri("/api/users/me").body(()).unwrap().into_parts().0;

        let err = AuthenticatedUser::from_request_parts(&mut parts, &store).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.code, "invalid_token");
    }
}
