use crate::domain::common::{AggregateId, BaseAggregate, EntityMetadata};
use crate::enums::apartment_status::ApartmentStatus;
use crate::shared::localized::LocalizedText;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор квартиры
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApartmentId(pub Uuid);

impl ApartmentId {
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

impl AggregateId for ApartmentId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ApartmentId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Квартира (объявление на витрине)
///
/// Статус меняется только через status-сервис: каждая мутация статуса
/// пишет строку аудита в той же транзакции.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apartment {
    #[serde(flatten)]
    pub base: BaseAggregate<ApartmentId>,

    // Специфичные поля агрегата
    pub price: f64,
    pub rooms: i32,
    pub area: f64,
    pub floor: i32,

    pub status: ApartmentStatus,

    /// Продавец-владелец объявления
    #[serde(rename = "sellerId")]
    pub seller_id: Uuid,

    /// Жилой комплекс (опционально)
    #[serde(rename = "complexId")]
    pub complex_id: Option<Uuid>,

    /// Многоязычные заголовки объявления
    pub titles: LocalizedText,
}

impl Apartment {
    /// Создать новую квартиру для вставки в БД
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        description: String,
        price: f64,
        rooms: i32,
        area: f64,
        floor: i32,
        seller_id: Uuid,
        complex_id: Option<Uuid>,
        titles: LocalizedText,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ApartmentId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            price,
            rooms,
            area,
            floor,
            status: ApartmentStatus::Active,
            seller_id,
            complex_id,
            titles,
        }
    }

    /// Восстановить квартиру из БД
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: ApartmentId,
        code: String,
        description: String,
        comment: Option<String>,
        metadata: EntityMetadata,
        price: f64,
        rooms: i32,
        area: f64,
        floor: i32,
        status: ApartmentStatus,
        seller_id: Uuid,
        complex_id: Option<Uuid>,
        titles: LocalizedText,
    ) -> Self {
        Self {
            base: BaseAggregate::with_metadata(id, code, description, comment, metadata),
            price,
            rooms,
            area,
            floor,
            status,
            seller_id,
            complex_id,
            titles,
        }
    }

    /// Заголовок объявления на запрошенном языке (fallback на description)
    pub fn display_title(&self, lang: &str) -> &str {
        let title = self.titles.get(lang);
        if title.is_empty() {
            &self.base.description
        } else {
            title
        }
    }

    /// Квартира принадлежит указанному продавцу
    pub fn is_owned_by(&self, seller_id: Uuid) -> bool {
        self.seller_id == seller_id
    }

    /// Обновить данные из DTO.
    ///
    /// Статус и продавец намеренно не обновляются здесь: статус — только
    /// через status-сервис, владелец неизменен после создания.
    pub fn update(&mut self, dto: &ApartmentDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.price = dto.price;
        self.rooms = dto.rooms;
        self.area = dto.area;
        self.floor = dto.floor;
        self.complex_id = dto
            .complex_id
            .as_ref()
            .and_then(|s| Uuid::parse_str(s).ok());
        self.titles = dto.titles.clone();
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Описание не может быть пустым".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if self.price <= 0.0 {
            return Err("Цена должна быть положительной".into());
        }
        if self.rooms < 1 {
            return Err("Количество комнат должно быть не меньше 1".into());
        }
        if self.area <= 0.0 {
            return Err("Площадь должна быть положительной".into());
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

/// DTO для создания/обновления квартиры.
///
/// Не содержит поля статуса: статус меняется отдельными операциями
/// со строкой аудита.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApartmentDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    pub price: f64,
    pub rooms: i32,
    pub area: f64,
    pub floor: i32,
    /// Продавец-владелец; при создании продавцом заполняется сервером
    #[serde(rename = "sellerId")]
    pub seller_id: Option<String>,
    #[serde(rename = "complexId")]
    pub complex_id: Option<String>,
    #[serde(default)]
    pub titles: LocalizedText,
}

// ============================================================================
// Search filter
// ============================================================================

/// Фильтр поиска квартир. Используется списочным endpoint'ом и
/// сохраняется как JSON в сохранённых поисках.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApartmentSearchFilter {
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub rooms: Option<i32>,
    pub floor_min: Option<i32>,
    pub floor_max: Option<i32>,
    pub status: Option<ApartmentStatus>,
    pub complex_id: Option<Uuid>,
    pub city: Option<String>,
    pub q: Option<String>,
}

impl ApartmentSearchFilter {
    /// Валидация диапазонов фильтра
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(min), Some(max)) = (self.price_min, self.price_max) {
            if min > max {
                return Err("price_min больше price_max".into());
            }
        }
        if let (Some(min), Some(max)) = (self.floor_min, self.floor_max) {
            if min > max {
                return Err("floor_min больше floor_max".into());
            }
        }
        if let Some(min) = self.price_min {
            if min < 0.0 {
                return Err("price_min не может быть отрицательным".into());
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Apartment {
        Apartment::new_for_insert(
            "APT-001".into(),
            "2-room flat, city centre".into(),
            85_000.0,
            2,
            54.3,
            5,
            Uuid::new_v4(),
            None,
            LocalizedText::single("en", "2-room flat"),
            None,
        )
    }

    #[test]
    fn new_apartment_starts_active() {
        assert_eq!(sample().status, ApartmentStatus::Active);
    }

    #[test]
    fn validate_rejects_bad_numbers() {
        let mut a = sample();
        a.price = 0.0;
        assert!(a.validate().is_err());

        let mut a = sample();
        a.rooms = 0;
        assert!(a.validate().is_err());

        let mut a = sample();
        a.area = -1.0;
        assert!(a.validate().is_err());

        let mut a = sample();
        a.base.description = "".into();
        assert!(a.validate().is_err());
    }

    #[test]
    fn update_does_not_touch_status_or_seller() {
        let mut a = sample();
        let seller = a.seller_id;
        a.status = ApartmentStatus::Hidden;

        let dto = ApartmentDto {
            description: "renovated".into(),
            price: 90_000.0,
            rooms: 3,
            area: 61.0,
            floor: 5,
            ..Default::default()
        };
        a.update(&dto);

        assert_eq!(a.status, ApartmentStatus::Hidden);
        assert_eq!(a.seller_id, seller);
        assert_eq!(a.price, 90_000.0);
    }

    #[test]
    fn filter_validate_checks_ranges() {
        let filter = ApartmentSearchFilter {
            price_min: Some(100.0),
            price_max: Some(50.0),
            ..Default::default()
        };
        assert!(filter.validate().is_err());
        assert!(ApartmentSearchFilter::default().validate().is_ok());
    }

    #[test]
    fn display_title_prefers_requested_language() {
        let mut a = sample();
        a.titles.set("hy", "2 սենյականոց");
        assert_eq!(a.display_title("hy"), "2 սենյականոց");
        assert_eq!(a.display_title("de"), "2-room flat");
    }
}
