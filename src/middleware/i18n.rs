// src/middleware/i18n.rs

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};

use crate::common::i18n::{I18nStore, DEFAULT_LANG};

// Nosso extrator de idioma
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Locale {
    /// Primeiro idioma do `Accept-Language` (em ordem de qualidade) que temos catálogo.
    /// "pt-BR" vira "pt"; sem cabeçalho ou sem catálogo, cai no padrão.
    pub fn from_headers(headers: &HeaderMap, store: &I18nStore) -> Self {
        let lang = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| {
                accept_language::parse(raw)
                    .into_iter()
                    .map(|tag| tag.split('-').next().unwrap_or_default().to_lowercase())
                    .find(|lang| store.supports(lang))
            })
            .unwrap_or_else(|| DEFAULT_LANG.to_string());

        Locale(lang)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    I18nStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let store = I18nStore::from_ref(state);
        Ok(Locale::from_headers(&parts.headers, &store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(accept_language: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = accept_language {
            builder = builder.header(header::ACCEPT_LANGUAGE, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn picks_the_first_supported_language() {
        let store = I18nStore::load_embedded().unwrap();

        let mut parts = parts_with(Some("fr-FR, pt-BR;q=0.8, en;q=0.5"));
        let locale = Locale::from_request_parts(&mut parts, &store).await.unwrap();
        assert_eq!(locale, Locale("pt".into()));
    }

    #[tokio::test]
    async fn defaults_to_spanish() {
        let store = I18nStore::load_embedded().unwrap();

        let mut parts = parts_with(None);
        let locale = Locale::from_request_parts(&mut parts, &store).await.unwrap();
        assert_eq!(locale.0, DEFAULT_LANG);

        let mut parts = parts_with(Some("de"));
        let locale = Locale::from_request_parts(&mut parts, &store).await.unwrap();
        assert_eq!(locale.0, DEFAULT_LANG);
    }
}
