use super::repository;
use crate::shared::error::AppError;
use contracts::domain::a005_saved_search::aggregate::{SavedSearch, SavedSearchDto};
use contracts::enums::user_role::UserRole;
use contracts::system::auth::ActorContext;
use uuid::Uuid;

/// Создание сохранённого поиска для текущего пользователя
pub async fn create(dto: SavedSearchDto, actor: &ActorContext) -> Result<Uuid, AppError> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("SRCH-{}", Uuid::new_v4()));
    let mut aggregate = SavedSearch::new_for_insert(
        code,
        dto.description,
        actor.user_id,
        dto.filter,
        dto.comment,
    );

    // Валидация
    aggregate.validate().map_err(AppError::Validation)?;

    // Before write
    aggregate.before_write();

    // Сохранение через repository
    Ok(repository::insert(&aggregate).await?)
}

/// Сохранённые поиски текущего пользователя
pub async fn list(actor: &ActorContext) -> Result<Vec<SavedSearch>, AppError> {
    Ok(repository::list_by_user(actor.user_id).await?)
}

/// Получение сохранённого поиска: владелец или ADMIN и выше
pub async fn get_by_id(id: Uuid, actor: &ActorContext) -> Result<SavedSearch, AppError> {
    let aggregate = repository::get_by_id(id)
        .await?
        .filter(|s| !s.base.metadata.is_deleted)
        .ok_or_else(|| AppError::NotFound(format!("Saved search {} not found", id)))?;

    if aggregate.user_id != actor.user_id && !actor.role.at_least(UserRole::Admin) {
        return Err(AppError::Forbidden(
            "saved search belongs to another user".into(),
        ));
    }

    Ok(aggregate)
}

/// Удаление сохранённого поиска: владелец или ADMIN и выше
pub async fn delete(id: Uuid, actor: &ActorContext) -> Result<bool, AppError> {
    // Проверка владения по тем же правилам, что и чтение
    get_by_id(id, actor).await?;
    Ok(repository::soft_delete(id).await?)
}
