use super::repository;
use crate::shared::error::AppError;
use contracts::domain::a002_apartment::aggregate::{
    Apartment, ApartmentDto, ApartmentSearchFilter,
};
use contracts::enums::user_role::UserRole;
use contracts::system::auth::ActorContext;
use uuid::Uuid;

/// Продавец пишет только свои объявления, ADMIN и выше — любые
fn authorize_write(actor: &ActorContext, apartment: &Apartment) -> Result<(), AppError> {
    if actor.role.at_least(UserRole::Admin) {
        return Ok(());
    }
    if actor.role.at_least(UserRole::Seller) && apartment.is_owned_by(actor.user_id) {
        return Ok(());
    }
    Err(AppError::Forbidden(format!(
        "seller {} does not own apartment {}",
        actor.user_id,
        apartment.base.id.value()
    )))
}

/// Определить продавца-владельца нового объявления
fn resolve_seller(actor: &ActorContext, dto: &ApartmentDto) -> Result<Uuid, AppError> {
    let requested = dto
        .seller_id
        .as_deref()
        .map(|s| {
            Uuid::parse_str(s).map_err(|_| AppError::Validation("Invalid seller ID".into()))
        })
        .transpose()?;

    if actor.role.at_least(UserRole::Admin) {
        // Администратор создаёт объявления для любого продавца
        return requested.ok_or_else(|| AppError::Validation("sellerId is required".into()));
    }
    if !actor.role.at_least(UserRole::Seller) {
        return Err(AppError::Forbidden(
            "only sellers create listings".into(),
        ));
    }
    // Продавец создаёт только свои объявления
    if let Some(requested) = requested {
        if requested != actor.user_id {
            return Err(AppError::Forbidden(
                "seller may not create listings for another seller".into(),
            ));
        }
    }
    Ok(actor.user_id)
}

/// Создание нового объявления
pub async fn create(dto: ApartmentDto, actor: &ActorContext) -> Result<Uuid, AppError> {
    let seller_id = resolve_seller(actor, &dto)?;
    let complex_id = dto
        .complex_id
        .as_deref()
        .map(|s| {
            Uuid::parse_str(s).map_err(|_| AppError::Validation("Invalid complex ID".into()))
        })
        .transpose()?;

    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("APT-{}", Uuid::new_v4()));
    let mut aggregate = Apartment::new_for_insert(
        code,
        dto.description,
        dto.price,
        dto.rooms,
        dto.area,
        dto.floor,
        seller_id,
        complex_id,
        dto.titles,
        dto.comment,
    );

    // Валидация
    aggregate.validate().map_err(AppError::Validation)?;

    // Before write
    aggregate.before_write();

    // Сохранение через repository
    Ok(repository::insert(&aggregate).await?)
}

/// Обновление существующего объявления
pub async fn update(dto: ApartmentDto, actor: &ActorContext) -> Result<(), AppError> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .filter(|a| !a.base.metadata.is_deleted)
        .ok_or_else(|| AppError::NotFound(format!("Apartment {} not found", id)))?;

    authorize_write(actor, &aggregate)?;

    aggregate.update(&dto);

    // Валидация
    aggregate.validate().map_err(AppError::Validation)?;

    // Before write
    aggregate.before_write();

    // Сохранение
    Ok(repository::update(&aggregate).await?)
}

/// Мягкое удаление объявления
pub async fn delete(id: Uuid, actor: &ActorContext) -> Result<bool, AppError> {
    let aggregate = repository::get_by_id(id)
        .await?
        .filter(|a| !a.base.metadata.is_deleted)
        .ok_or_else(|| AppError::NotFound(format!("Apartment {} not found", id)))?;

    authorize_write(actor, &aggregate)?;

    Ok(repository::soft_delete(id).await?)
}

/// Получение объявления по ID
pub async fn get_by_id(id: Uuid) -> Result<Option<Apartment>, AppError> {
    Ok(repository::get_by_id(id)
        .await?
        .filter(|a| !a.base.metadata.is_deleted))
}

/// Постраничный поиск объявлений
pub async fn list_paginated(
    limit: u64,
    offset: u64,
    sort_by: &str,
    sort_desc: bool,
    filter: &ApartmentSearchFilter,
) -> Result<(Vec<Apartment>, u64), AppError> {
    filter.validate().map_err(AppError::Validation)?;
    Ok(repository::list_paginated(limit, offset, sort_by, sort_desc, filter).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::localized::LocalizedText;

    fn actor(role: UserRole) -> ActorContext {
        ActorContext {
            user_id: Uuid::new_v4(),
            username: "actor".into(),
            role,
        }
    }

    fn apartment_of(seller: Uuid) -> Apartment {
        Apartment::new_for_insert(
            "APT-1".into(),
            "flat".into(),
            50_000.0,
            1,
            33.0,
            2,
            seller,
            None,
            LocalizedText::new(),
            None,
        )
    }

    #[test]
    fn seller_writes_own_admin_writes_any() {
        let seller = actor(UserRole::Seller);
        let own = apartment_of(seller.user_id);
        let foreign = apartment_of(Uuid::new_v4());

        assert!(authorize_write(&seller, &own).is_ok());
        assert!(matches!(
            authorize_write(&seller, &foreign),
            Err(AppError::Forbidden(_))
        ));
        assert!(authorize_write(&actor(UserRole::Admin), &foreign).is_ok());
        assert!(authorize_write(&actor(UserRole::User), &foreign).is_err());
    }

    #[test]
    fn resolve_seller_rules() {
        let seller = actor(UserRole::Seller);
        let dto = ApartmentDto::default();
        assert_eq!(resolve_seller(&seller, &dto).unwrap(), seller.user_id);

        // Продавец не может указать чужого владельца
        let dto = ApartmentDto {
            seller_id: Some(Uuid::new_v4().to_string()),
            ..Default::default()
        };
        assert!(resolve_seller(&seller, &dto).is_err());

        // Администратору владелец обязателен
        let admin = actor(UserRole::Admin);
        assert!(resolve_seller(&admin, &ApartmentDto::default()).is_err());
        let target = Uuid::new_v4();
        let dto = ApartmentDto {
            seller_id: Some(target.to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_seller(&admin, &dto).unwrap(), target);

        // Обычный пользователь не создаёт объявления
        assert!(resolve_seller(&actor(UserRole::User), &ApartmentDto::default()).is_err());
    }
}
