use serde::{Deserialize, Serialize};

/// Роль пользователя. Пятиуровневая иерархия:
/// USER < SELLER < ADMIN < MANAGER_ADMIN < OWNER_ADMIN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    User,
    Seller,
    Admin,
    ManagerAdmin,
    OwnerAdmin,
}

impl UserRole {
    /// Числовой уровень роли в иерархии
    pub fn level(&self) -> u8 {
        match self {
            UserRole::User => 0,
            UserRole::Seller => 1,
            UserRole::Admin => 2,
            UserRole::ManagerAdmin => 3,
            UserRole::OwnerAdmin => 4,
        }
    }

    /// Роль не ниже указанной
    pub fn at_least(&self, other: UserRole) -> bool {
        self.level() >= other.level()
    }

    /// Роль строго выше указанной (для управления учётными записями)
    pub fn outranks(&self, other: UserRole) -> bool {
        self.level() > other.level()
    }

    /// Получить код роли
    pub fn code(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Seller => "SELLER",
            UserRole::Admin => "ADMIN",
            UserRole::ManagerAdmin => "MANAGER_ADMIN",
            UserRole::OwnerAdmin => "OWNER_ADMIN",
        }
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "USER" => Some(UserRole::User),
            "SELLER" => Some(UserRole::Seller),
            "ADMIN" => Some(UserRole::Admin),
            "MANAGER_ADMIN" => Some(UserRole::ManagerAdmin),
            "OWNER_ADMIN" => Some(UserRole::OwnerAdmin),
            _ => None,
        }
    }

    /// Все роли по возрастанию уровня
    pub fn all() -> Vec<UserRole> {
        vec![
            UserRole::User,
            UserRole::Seller,
            UserRole::Admin,
            UserRole::ManagerAdmin,
            UserRole::OwnerAdmin,
        ]
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchy_is_total_order() {
        let all = UserRole::all();
        for pair in all.windows(2) {
            assert!(pair[1].outranks(pair[0]));
            assert!(pair[1].at_least(pair[0]));
            assert!(!pair[0].at_least(pair[1]));
        }
    }

    #[test]
    fn at_least_is_reflexive() {
        for role in UserRole::all() {
            assert!(role.at_least(role));
            assert!(!role.outranks(role));
        }
    }

    #[test]
    fn admin_tiers_manage_strictly_below() {
        assert!(UserRole::ManagerAdmin.outranks(UserRole::Admin));
        assert!(!UserRole::Admin.outranks(UserRole::ManagerAdmin));
        assert!(UserRole::OwnerAdmin.outranks(UserRole::ManagerAdmin));
    }

    #[test]
    fn code_round_trips() {
        for role in UserRole::all() {
            assert_eq!(UserRole::from_code(role.code()), Some(role));
        }
        assert_eq!(UserRole::from_code("SUPERUSER"), None);
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&UserRole::ManagerAdmin).unwrap();
        assert_eq!(json, "\"MANAGER_ADMIN\"");
    }
}
