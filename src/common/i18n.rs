// src/common/i18n.rs

use std::{collections::HashMap, sync::Arc};

use anyhow::Context;

/// Idioma usado quando o pedido não traz `Accept-Language` ou traz um que não temos.
pub const DEFAULT_LANG: &str = "es";

// Catálogos embutidos no binário: nada a ler do disco em produção.
const CATALOGS: [(&str, &str); 3] = [
    ("es", include_str!("../../locales/es.json")),
    ("en", include_str!("../../locales/en.json")),
    ("pt", include_str!("../../locales/pt.json")),
];

#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: Arc<HashMap<String, HashMap<String, String>>>,
}

impl I18nStore {
    pub fn load_embedded() -> anyhow::Result<Self> {
        let mut catalogs = HashMap::new();
        for (lang, raw) in CATALOGS {
            let catalog: HashMap<String, String> = serde_json::from_str(raw)
                .with_context(|| format!("Catálogo de traduções '{}' inválido", lang))?;
            catalogs.insert(lang.to_string(), catalog);
        }
        Ok(Self { catalogs: Arc::new(catalogs) })
    }

    pub fn supports(&self, lang: &str) -> bool {
        self.catalogs.contains_key(lang)
    }

    /// Busca `key` no idioma pedido, depois no idioma padrão e, por fim, devolve a própria chave.
    /// `args` substitui marcadores `{nome}` no texto.
    pub fn translate(&self, lang: &str, key: &str, args: &[(&str, String)]) -> String {
        let template = self
            .lookup(lang, key)
            .or_else(|| self.lookup(DEFAULT_LANG, key))
            .unwrap_or(key);

        args.iter().fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.catalogs.get(lang)?.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_has_the_same_keys_as_the_default() {
        let store = I18nStore::load_embedded().unwrap();
        let default = &store.catalogs[DEFAULT_LANG];

        for (lang, catalog) in store.catalogs.iter() {
            for key in default.keys() {
                assert!(catalog.contains_key(key), "'{}' sem a chave '{}'", lang, key);
            }
        }
    }

    #[test]
    fn falls_back_to_default_language_then_to_the_key() {
        let store = I18nStore::load_embedded().unwrap();

        let fr = store.translate("fr", "booking_not_found", &[]);
        assert_eq!(fr, store.translate(DEFAULT_LANG, "booking_not_found", &[]));

        assert_eq!(store.translate("en", "no.such.key", &[]), "no.such.key");
    }

    #[test]
    fn missing_language_falls_back_to_spanish() {
        let store = I18nStore::load_embedded().unwrap();
        assert_eq!(DEFAULT_LANG, "es");
        assert_eq!(
            store.translate("de", "booking_not_found", &[]),
            store.translate("es", "booking_not_found", &[])
        );
    }

    #[test]
    fn interpolates_named_arguments() {
        let store = I18nStore::load_embedded().unwrap();
        let text = store.translate("en", "capacity_exceeded", &[("capacity", "3".to_string())]);
        assert!(text.contains('3'));
        assert!(!text.contains("{capacity}"));
    }
}
