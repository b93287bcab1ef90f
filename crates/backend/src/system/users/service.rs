use chrono::Utc;
use contracts::enums::user_role::UserRole;
use contracts::system::auth::ActorContext;
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};

use super::repository;
use crate::shared::error::AppError;

/// An account may only be managed by an actor whose role is strictly
/// above the target's, and the assigned role must stay strictly below
/// the actor's own.
fn authorize_account_write(actor: &ActorContext, target_role: UserRole) -> Result<(), AppError> {
    if !actor.role.at_least(UserRole::Admin) {
        return Err(AppError::Forbidden(
            "only administrators manage accounts".into(),
        ));
    }
    if !actor.role.outranks(target_role) {
        return Err(AppError::Forbidden(format!(
            "role {} may not manage role {}",
            actor.role, target_role
        )));
    }
    Ok(())
}

/// Create a new user
pub async fn create(dto: CreateUserDto, actor: &ActorContext) -> Result<String, AppError> {
    authorize_account_write(actor, dto.role)?;

    if dto.username.trim().is_empty() {
        return Err(AppError::Validation("Username cannot be empty".into()));
    }

    if repository::get_by_username(&dto.username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".into()));
    }

    // Basic email validation
    if let Some(ref email) = dto.email {
        if !email.trim().is_empty() && !email.contains('@') {
            return Err(AppError::Validation("Invalid email format".into()));
        }
    }

    let user_id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    let user = User {
        id: user_id.clone(),
        username: dto.username,
        email: dto.email,
        full_name: dto.full_name,
        role: dto.role,
        is_active: true,
        created_at: now.clone(),
        updated_at: now,
        created_by: Some(actor.user_id.to_string()),
    };

    repository::create(&user).await?;

    Ok(user_id)
}

/// Update user
pub async fn update(dto: UpdateUserDto, actor: &ActorContext) -> Result<(), AppError> {
    let mut user = repository::get_by_id(&dto.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    // Требуются права и на текущую роль учётной записи, и на назначаемую
    authorize_account_write(actor, user.role)?;
    authorize_account_write(actor, dto.role)?;

    if let Some(ref email) = dto.email {
        if !email.trim().is_empty() && !email.contains('@') {
            return Err(AppError::Validation("Invalid email format".into()));
        }
    }

    user.email = dto.email;
    user.full_name = dto.full_name;
    user.role = dto.role;
    user.is_active = dto.is_active;
    user.updated_at = Utc::now().to_rfc3339();

    repository::update(&user).await?;

    Ok(())
}

/// Delete user
pub async fn delete(id: &str, actor: &ActorContext) -> Result<bool, AppError> {
    let user = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    authorize_account_write(actor, user.role)?;

    Ok(repository::delete(id).await?)
}

/// Get user by ID
pub async fn get_by_id(id: &str) -> Result<Option<User>, AppError> {
    Ok(repository::get_by_id(id).await?)
}

/// List all users
pub async fn list_all() -> Result<Vec<User>, AppError> {
    Ok(repository::list_all().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn actor(role: UserRole) -> ActorContext {
        ActorContext {
            user_id: Uuid::new_v4(),
            username: "actor".into(),
            role,
        }
    }

    #[test]
    fn seller_cannot_manage_accounts() {
        let err = authorize_account_write(&actor(UserRole::Seller), UserRole::User);
        assert!(matches!(err, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn admin_manages_only_strictly_below() {
        assert!(authorize_account_write(&actor(UserRole::Admin), UserRole::Seller).is_ok());
        assert!(authorize_account_write(&actor(UserRole::Admin), UserRole::Admin).is_err());
        assert!(
            authorize_account_write(&actor(UserRole::Admin), UserRole::ManagerAdmin).is_err()
        );
    }

    #[test]
    fn manager_admin_creates_admins_owner_creates_managers() {
        assert!(authorize_account_write(&actor(UserRole::ManagerAdmin), UserRole::Admin).is_ok());
        assert!(
            authorize_account_write(&actor(UserRole::OwnerAdmin), UserRole::ManagerAdmin).is_ok()
        );
        assert!(
            authorize_account_write(&actor(UserRole::OwnerAdmin), UserRole::OwnerAdmin).is_err()
        );
    }
}
