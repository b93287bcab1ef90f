use serde::{Deserialize, Serialize};

/// Статус объявления (жизненный цикл квартиры на витрине)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApartmentStatus {
    /// Активно, видно покупателям
    Active,
    /// Скрыто продавцом или администратором
    Hidden,
    /// Продано (видно в истории, не в выдаче)
    Sold,
}

impl ApartmentStatus {
    /// Получить код статуса
    pub fn code(&self) -> &'static str {
        match self {
            ApartmentStatus::Active => "active",
            ApartmentStatus::Hidden => "hidden",
            ApartmentStatus::Sold => "sold",
        }
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(ApartmentStatus::Active),
            "hidden" => Some(ApartmentStatus::Hidden),
            "sold" => Some(ApartmentStatus::Sold),
            _ => None,
        }
    }

    /// Получить все статусы
    pub fn all() -> Vec<ApartmentStatus> {
        vec![
            ApartmentStatus::Active,
            ApartmentStatus::Hidden,
            ApartmentStatus::Sold,
        ]
    }
}

impl std::fmt::Display for ApartmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trips() {
        for status in ApartmentStatus::all() {
            assert_eq!(ApartmentStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(ApartmentStatus::from_code("archived"), None);
    }

    #[test]
    fn serde_uses_lowercase_codes() {
        let json = serde_json::to_string(&ApartmentStatus::Sold).unwrap();
        assert_eq!(json, "\"sold\"");
        let back: ApartmentStatus = serde_json::from_str("\"hidden\"").unwrap();
        assert_eq!(back, ApartmentStatus::Hidden);
    }
}
