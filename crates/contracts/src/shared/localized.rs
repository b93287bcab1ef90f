use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Язык по умолчанию для fallback-поиска
pub const DEFAULT_LANG: &str = "en";

/// Многоязычный текст. Хранится как JSON-объект {"en": "...", "hy": "...", "ru": "..."}.
///
/// Поиск значения: запрошенный язык → язык по умолчанию → первое непустое значение.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(pub BTreeMap<String, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Текст на одном языке
    pub fn single(lang: &str, value: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(lang.to_string(), value.into());
        Self(map)
    }

    /// Установить значение для языка
    pub fn set(&mut self, lang: &str, value: impl Into<String>) {
        self.0.insert(lang.to_string(), value.into());
    }

    /// Значение для языка с fallback-цепочкой
    pub fn get(&self, lang: &str) -> &str {
        if let Some(v) = self.0.get(lang).filter(|v| !v.is_empty()) {
            return v;
        }
        if let Some(v) = self.0.get(DEFAULT_LANG).filter(|v| !v.is_empty()) {
            return v;
        }
        self.0
            .values()
            .find(|v| !v.is_empty())
            .map(|v| v.as_str())
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|v| v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_language_wins() {
        let mut t = LocalizedText::single("en", "Sunny flat");
        t.set("hy", "Արևոտ բնակարան");
        assert_eq!(t.get("hy"), "Արևոտ բնակարան");
        assert_eq!(t.get("en"), "Sunny flat");
    }

    #[test]
    fn missing_language_falls_back_to_default() {
        let mut t = LocalizedText::single("en", "Sunny flat");
        t.set("ru", "Светлая квартира");
        assert_eq!(t.get("de"), "Sunny flat");
    }

    #[test]
    fn no_default_falls_back_to_any_entry() {
        let t = LocalizedText::single("ru", "Светлая квартира");
        assert_eq!(t.get("en"), "Светлая квартира");
    }

    #[test]
    fn empty_text_yields_empty_string() {
        let t = LocalizedText::new();
        assert_eq!(t.get("en"), "");
        assert!(t.is_empty());
    }

    #[test]
    fn serde_is_a_plain_json_object() {
        let mut t = LocalizedText::new();
        t.set("en", "Loft");
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"en":"Loft"}"#);
        let back: LocalizedText = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
