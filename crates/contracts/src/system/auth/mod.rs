use crate::enums::user_role::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Контекст действующего пользователя запроса.
///
/// Заполняется middleware по заголовку `X-User-Id` и кладётся в
/// request extensions. Аутентификация (пароли, токены) вне области
/// ответственности сервиса.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorContext {
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
}

impl ActorContext {
    /// Действующий пользователь — администратор (ADMIN и выше)
    pub fn is_admin(&self) -> bool {
        self.role.at_least(UserRole::Admin)
    }
}
