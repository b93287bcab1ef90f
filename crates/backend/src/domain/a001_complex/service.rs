use super::repository;
use crate::shared::error::AppError;
use contracts::domain::a001_complex::aggregate::{Complex, ComplexDto};
use uuid::Uuid;

/// Создание нового жилого комплекса
pub async fn create(dto: ComplexDto) -> Result<Uuid, AppError> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("CPX-{}", Uuid::new_v4()));
    let mut aggregate = Complex::new_for_insert(
        code,
        dto.description,
        dto.address,
        dto.city,
        dto.names,
        dto.comment,
    );

    // Валидация
    aggregate.validate().map_err(AppError::Validation)?;

    // Before write
    aggregate.before_write();

    // Сохранение через repository
    Ok(repository::insert(&aggregate).await?)
}

/// Обновление существующего комплекса
pub async fn update(dto: ComplexDto) -> Result<(), AppError> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Complex {} not found", id)))?;

    aggregate.update(&dto);

    // Валидация
    aggregate.validate().map_err(AppError::Validation)?;

    // Before write
    aggregate.before_write();

    // Сохранение
    Ok(repository::update(&aggregate).await?)
}

/// Мягкое удаление комплекса
pub async fn delete(id: Uuid) -> Result<bool, AppError> {
    Ok(repository::soft_delete(id).await?)
}

/// Получение комплекса по ID
pub async fn get_by_id(id: Uuid) -> Result<Option<Complex>, AppError> {
    Ok(repository::get_by_id(id).await?)
}

/// Получение списка всех комплексов
pub async fn list_all() -> Result<Vec<Complex>, AppError> {
    Ok(repository::list_all().await?)
}
