use crate::domain::a002_apartment::aggregate::ApartmentSearchFilter;
use crate::domain::common::{AggregateId, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор сохранённого поиска
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SavedSearchId(pub Uuid);

impl SavedSearchId {
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

impl AggregateId for SavedSearchId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SavedSearchId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Сохранённый поиск пользователя. Фильтр хранится как JSON-блоб.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSearch {
    #[serde(flatten)]
    pub base: BaseAggregate<SavedSearchId>,

    #[serde(rename = "userId")]
    pub user_id: Uuid,

    pub filter: ApartmentSearchFilter,
}

impl SavedSearch {
    /// Создать новый сохранённый поиск для вставки в БД
    pub fn new_for_insert(
        code: String,
        description: String,
        user_id: Uuid,
        filter: ApartmentSearchFilter,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(SavedSearchId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            user_id,
            filter,
        }
    }

    /// Восстановить сохранённый поиск из БД
    pub fn from_parts(
        id: SavedSearchId,
        code: String,
        description: String,
        comment: Option<String>,
        metadata: EntityMetadata,
        user_id: Uuid,
        filter: ApartmentSearchFilter,
    ) -> Self {
        Self {
            base: BaseAggregate::with_metadata(id, code, description, comment, metadata),
            user_id,
            filter,
        }
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Название поиска не может быть пустым".into());
        }
        self.filter.validate()
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

/// DTO для создания сохранённого поиска
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SavedSearchDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    #[serde(default)]
    pub filter: ApartmentSearchFilter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_blank_name_and_bad_filter() {
        let mut search = SavedSearch::new_for_insert(
            "SRCH-1".into(),
            "Cheap 2-rooms".into(),
            Uuid::new_v4(),
            ApartmentSearchFilter {
                rooms: Some(2),
                price_max: Some(100_000.0),
                ..Default::default()
            },
            None,
        );
        assert!(search.validate().is_ok());

        search.base.description = " ".into();
        assert!(search.validate().is_err());

        search.base.description = "ok".into();
        search.filter.price_min = Some(200_000.0);
        assert!(search.validate().is_err());
    }
}
