use super::repository;
use crate::domain::a002_apartment;
use crate::shared::error::AppError;
use contracts::domain::a004_favorite::aggregate::Favorite;
use contracts::system::auth::ActorContext;
use uuid::Uuid;

/// Добавить квартиру в избранное. Повторное добавление идемпотентно.
pub async fn add(actor: &ActorContext, apartment_id: Uuid) -> Result<Favorite, AppError> {
    // Закладка только на существующее объявление
    a002_apartment::service::get_by_id(apartment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Apartment {} not found", apartment_id)))?;

    if let Some(existing) = repository::find(actor.user_id, apartment_id).await? {
        return Ok(existing);
    }

    Ok(repository::insert(actor.user_id, apartment_id).await?)
}

/// Убрать квартиру из избранного
pub async fn remove(actor: &ActorContext, apartment_id: Uuid) -> Result<bool, AppError> {
    Ok(repository::remove(actor.user_id, apartment_id).await?)
}

/// Избранное текущего пользователя
pub async fn list(actor: &ActorContext) -> Result<Vec<Favorite>, AppError> {
    Ok(repository::list_by_user(actor.user_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_apartment::repository as apartment_repository;
    use crate::shared::data::db;
    use contracts::domain::a002_apartment::aggregate::Apartment;
    use contracts::enums::user_role::UserRole;
    use contracts::shared::localized::LocalizedText;
    use once_cell::sync::Lazy;
    use tokio::sync::OnceCell;

    static TEST_DIR: Lazy<tempfile::TempDir> =
        Lazy::new(|| tempfile::tempdir().expect("tempdir"));
    static INIT: OnceCell<()> = OnceCell::const_new();

    async fn setup() {
        INIT.get_or_init(|| async {
            let path = TEST_DIR.path().join("favorite_test.db");
            db::initialize_database(Some(path.to_str().unwrap()))
                .await
                .expect("db init");
        })
        .await;
    }

    fn buyer() -> ActorContext {
        ActorContext {
            user_id: Uuid::new_v4(),
            username: "buyer".into(),
            role: UserRole::User,
        }
    }

    async fn insert_apartment() -> Uuid {
        let apartment = Apartment::new_for_insert(
            format!("APT-{}", Uuid::new_v4()),
            "studio".into(),
            40_000.0,
            1,
            28.0,
            7,
            Uuid::new_v4(),
            None,
            LocalizedText::new(),
            None,
        );
        apartment_repository::insert(&apartment).await.expect("insert")
    }

    #[tokio::test]
    async fn add_is_idempotent() {
        setup().await;
        let actor = buyer();
        let apartment_id = insert_apartment().await;

        let first = add(&actor, apartment_id).await.unwrap();
        let second = add(&actor, apartment_id).await.unwrap();
        assert_eq!(first.id, second.id);

        let favorites = list(&actor).await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].apartment_id, apartment_id);
    }

    #[tokio::test]
    async fn add_missing_apartment_is_not_found() {
        setup().await;
        let err = add(&buyer(), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn remove_reports_whether_anything_was_deleted() {
        setup().await;
        let actor = buyer();
        let apartment_id = insert_apartment().await;

        add(&actor, apartment_id).await.unwrap();
        assert!(remove(&actor, apartment_id).await.unwrap());
        assert!(!remove(&actor, apartment_id).await.unwrap());
        assert!(list(&actor).await.unwrap().is_empty());
    }
}
