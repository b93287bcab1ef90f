use crate::domain::common::{AggregateId, BaseAggregate, EntityMetadata};
use crate::shared::localized::LocalizedText;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор жилого комплекса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComplexId(pub Uuid);

impl ComplexId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ComplexId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ComplexId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Жилой комплекс (группа квартир — дом или застройка)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complex {
    #[serde(flatten)]
    pub base: BaseAggregate<ComplexId>,

    // Специфичные поля агрегата
    pub address: String,
    pub city: String,

    /// Многоязычные названия комплекса
    pub names: LocalizedText,
}

impl Complex {
    /// Создать новый комплекс для вставки в БД
    pub fn new_for_insert(
        code: String,
        description: String,
        address: String,
        city: String,
        names: LocalizedText,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ComplexId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            address,
            city,
            names,
        }
    }

    /// Восстановить комплекс из БД
    pub fn from_parts(
        id: ComplexId,
        code: String,
        description: String,
        comment: Option<String>,
        metadata: EntityMetadata,
        address: String,
        city: String,
        names: LocalizedText,
    ) -> Self {
        Self {
            base: BaseAggregate::with_metadata(id, code, description, comment, metadata),
            address,
            city,
            names,
        }
    }

    /// Название комплекса на запрошенном языке (fallback на description)
    pub fn display_name(&self, lang: &str) -> &str {
        let name = self.names.get(lang);
        if name.is_empty() {
            &self.base.description
        } else {
            name
        }
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &ComplexDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.address = dto.address.clone();
        self.city = dto.city.clone();
        self.names = dto.names.clone();
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Описание не может быть пустым".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if self.address.trim().is_empty() {
            return Err("Адрес не может быть пустым".into());
        }
        if self.city.trim().is_empty() {
            return Err("Город не может быть пустым".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления жилого комплекса
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ComplexDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub names: LocalizedText,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Complex {
        Complex::new_for_insert(
            "CPX-001".into(),
            "Nor Nork Towers".into(),
            "12 Gai Ave".into(),
            "Yerevan".into(),
            LocalizedText::single("en", "Nor Nork Towers"),
            None,
        )
    }

    #[test]
    fn validate_rejects_blank_address() {
        let mut c = sample();
        c.address = "  ".into();
        assert!(c.validate().is_err());
    }

    #[test]
    fn display_name_falls_back_to_description() {
        let mut c = sample();
        c.names = LocalizedText::new();
        assert_eq!(c.display_name("en"), "Nor Nork Towers");
    }
}
