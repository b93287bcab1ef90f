//! Смена статуса объявления с аудитом.
//!
//! Каждая успешная мутация статуса пишет ровно одну строку в
//! a003_apartment_status_log в той же транзакции БД (всё или ничего).
//! Таблицы допустимых переходов нет: текущий статус — то, что записала
//! последняя успешная операция; отклоняется только запись того же
//! статуса поверх самого себя.

use chrono::Utc;
use contracts::domain::a002_apartment::aggregate::Apartment;
use contracts::domain::a003_apartment_status_log::aggregate::{
    ApartmentStatusLog, BulkStatusItem, BulkStatusSummary, SaleDetails,
};
use contracts::enums::apartment_status::ApartmentStatus;
use contracts::enums::user_role::UserRole;
use contracts::system::auth::ActorContext;
use sea_orm::TransactionTrait;
use uuid::Uuid;

use super::repository;
use crate::domain::a003_apartment_status_log::repository as log_repository;
use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

/// Статус меняет владелец-продавец или ADMIN и выше
fn authorize_status_change(actor: &ActorContext, apartment: &Apartment) -> Result<(), AppError> {
    if actor.role.at_least(UserRole::Admin) {
        return Ok(());
    }
    if actor.role.at_least(UserRole::Seller) && apartment.is_owned_by(actor.user_id) {
        return Ok(());
    }
    Err(AppError::Forbidden(format!(
        "actor {} may not change status of apartment {}",
        actor.user_id,
        apartment.base.id.value()
    )))
}

/// Продажу фиксирует только владелец-продавец
fn authorize_mark_sold(actor: &ActorContext, apartment: &Apartment) -> Result<(), AppError> {
    if actor.role.at_least(UserRole::Seller) && apartment.is_owned_by(actor.user_id) {
        return Ok(());
    }
    Err(AppError::Forbidden(format!(
        "only the owning seller may mark apartment {} as sold",
        apartment.base.id.value()
    )))
}

async fn load_apartment(apartment_id: Uuid) -> Result<Apartment, AppError> {
    repository::get_by_id(apartment_id)
        .await?
        .filter(|a| !a.base.metadata.is_deleted)
        .ok_or_else(|| AppError::NotFound(format!("Apartment {} not found", apartment_id)))
}

/// Записать новый статус и строку аудита в одной транзакции
async fn apply_status_change(
    apartment: Apartment,
    new_status: ApartmentStatus,
    actor_id: Uuid,
    reason: Option<String>,
    details: Option<serde_json::Value>,
) -> Result<Apartment, AppError> {
    if apartment.status == new_status {
        return Err(AppError::Conflict(format!(
            "apartment {} already has status {}",
            apartment.base.id.value(),
            new_status
        )));
    }

    let apartment_id = apartment.base.id.value();
    let prior_status = apartment.status;
    let now = Utc::now();

    let txn = get_connection().begin().await?;
    repository::set_status(&txn, apartment_id, new_status, now).await?;
    log_repository::insert(
        &txn,
        apartment_id,
        prior_status,
        new_status,
        actor_id,
        reason,
        details,
        now,
    )
    .await?;
    txn.commit().await?;

    tracing::info!(
        "apartment {} status changed {} -> {} by {}",
        apartment_id,
        prior_status,
        new_status,
        actor_id
    );

    let mut updated = apartment;
    updated.status = new_status;
    updated.base.metadata.updated_at = now;
    updated.base.metadata.increment_version();
    Ok(updated)
}

/// Смена статуса объявления. Возвращает обновлённый агрегат.
pub async fn change_status(
    apartment_id: Uuid,
    new_status: ApartmentStatus,
    actor: &ActorContext,
    reason: Option<String>,
) -> Result<Apartment, AppError> {
    let apartment = load_apartment(apartment_id).await?;
    authorize_status_change(actor, &apartment)?;
    apply_status_change(apartment, new_status, actor.user_id, reason, None).await
}

/// Зафиксировать продажу. Детали сделки сохраняются в строке аудита.
pub async fn mark_sold(
    apartment_id: Uuid,
    actor: &ActorContext,
    details: SaleDetails,
    reason: Option<String>,
) -> Result<Apartment, AppError> {
    let apartment = load_apartment(apartment_id).await?;
    authorize_mark_sold(actor, &apartment)?;

    let details_json = if details.is_empty() {
        None
    } else {
        Some(serde_json::to_value(&details).map_err(anyhow::Error::from)?)
    };

    apply_status_change(
        apartment,
        ApartmentStatus::Sold,
        actor.user_id,
        reason,
        details_json,
    )
    .await
}

/// Массовая смена статуса: частичные отказы не прерывают пакет,
/// на каждый входной id приходится ровно один результат.
pub async fn bulk_status_change(
    ids: &[Uuid],
    new_status: ApartmentStatus,
    actor: &ActorContext,
    reason: Option<String>,
) -> BulkStatusSummary {
    let mut results = Vec::with_capacity(ids.len());
    for &id in ids {
        match change_status(id, new_status, actor, reason.clone()).await {
            Ok(_) => results.push(BulkStatusItem {
                apartment_id: id,
                ok: true,
                error: None,
            }),
            Err(e) => results.push(BulkStatusItem {
                apartment_id: id,
                ok: false,
                error: Some(e.to_string()),
            }),
        }
    }
    BulkStatusSummary::from_results(results)
}

/// История смен статуса, новые записи сверху.
/// Продавец видит только свои квартиры, ADMIN и выше — любые.
pub async fn get_history(
    apartment_id: Uuid,
    requester: &ActorContext,
) -> Result<Vec<ApartmentStatusLog>, AppError> {
    let apartment = load_apartment(apartment_id).await?;

    if !requester.role.at_least(UserRole::Admin) {
        let own = requester.role.at_least(UserRole::Seller)
            && apartment.is_owned_by(requester.user_id);
        if !own {
            return Err(AppError::Forbidden(format!(
                "actor {} may not read status history of apartment {}",
                requester.user_id, apartment_id
            )));
        }
    }

    Ok(log_repository::list_for_apartment(apartment_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db;
    use contracts::shared::localized::LocalizedText;
    use once_cell::sync::Lazy;
    use tokio::sync::OnceCell;

    static TEST_DIR: Lazy<tempfile::TempDir> =
        Lazy::new(|| tempfile::tempdir().expect("tempdir"));
    static INIT: OnceCell<()> = OnceCell::const_new();

    async fn setup() {
        INIT.get_or_init(|| async {
            let path = TEST_DIR.path().join("status_test.db");
            db::initialize_database(Some(path.to_str().unwrap()))
                .await
                .expect("db init");
        })
        .await;
    }

    fn actor(role: UserRole) -> ActorContext {
        ActorContext {
            user_id: Uuid::new_v4(),
            username: "actor".into(),
            role,
        }
    }

    async fn insert_apartment(seller_id: Uuid) -> Uuid {
        let apartment = Apartment::new_for_insert(
            format!("APT-{}", Uuid::new_v4()),
            "2-room flat".into(),
            75_000.0,
            2,
            48.0,
            3,
            seller_id,
            None,
            LocalizedText::new(),
            None,
        );
        repository::insert(&apartment).await.expect("insert")
    }

    #[tokio::test]
    async fn change_status_writes_one_audit_row_per_mutation() {
        setup().await;
        let seller = actor(UserRole::Seller);
        let id = insert_apartment(seller.user_id).await;

        let updated = change_status(id, ApartmentStatus::Hidden, &seller, Some("vacation".into()))
            .await
            .unwrap();
        assert_eq!(updated.status, ApartmentStatus::Hidden);

        let history = get_history(id, &seller).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].apartment_id, id);
        assert_eq!(history[0].prior_status, ApartmentStatus::Active);
        assert_eq!(history[0].new_status, ApartmentStatus::Hidden);
        assert_eq!(history[0].actor_id, seller.user_id);
        assert_eq!(history[0].reason.as_deref(), Some("vacation"));

        change_status(id, ApartmentStatus::Active, &seller, None)
            .await
            .unwrap();

        let history = get_history(id, &seller).await.unwrap();
        assert_eq!(history.len(), 2);
        // Новые записи сверху, таймстемпы не убывают
        assert_eq!(history[0].new_status, ApartmentStatus::Active);
        assert!(history[0].changed_at >= history[1].changed_at);
    }

    #[tokio::test]
    async fn missing_apartment_is_not_found() {
        setup().await;
        let admin = actor(UserRole::Admin);
        let err = change_status(Uuid::new_v4(), ApartmentStatus::Hidden, &admin, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn same_status_is_conflict_and_writes_no_audit_row() {
        setup().await;
        let seller = actor(UserRole::Seller);
        let id = insert_apartment(seller.user_id).await;

        let err = change_status(id, ApartmentStatus::Active, &seller, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(log_repository::count_for_apartment(id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn non_owner_cannot_mark_sold() {
        setup().await;
        let owner = actor(UserRole::Seller);
        let id = insert_apartment(owner.user_id).await;

        // Чужой продавец
        let other = actor(UserRole::Seller);
        let err = mark_sold(id, &other, SaleDetails::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        // Продажа — только владелец, без обхода для администратора
        let admin = actor(UserRole::Admin);
        let err = mark_sold(id, &admin, SaleDetails::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        assert_eq!(log_repository::count_for_apartment(id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn mark_sold_stores_sale_details_in_audit_row() {
        setup().await;
        let seller = actor(UserRole::Seller);
        let id = insert_apartment(seller.user_id).await;

        let details = SaleDetails {
            sale_price: Some(71_500.0),
            sale_date: Some(Utc::now()),
        };
        let updated = mark_sold(id, &seller, details, Some("deal closed".into()))
            .await
            .unwrap();
        assert_eq!(updated.status, ApartmentStatus::Sold);

        let history = get_history(id, &seller).await.unwrap();
        assert_eq!(history.len(), 1);
        let stored = history[0].details.as_ref().expect("details stored");
        assert_eq!(stored["salePrice"], serde_json::json!(71_500.0));
    }

    #[tokio::test]
    async fn bulk_outcomes_sum_to_input_length() {
        setup().await;
        let seller = actor(UserRole::Seller);
        let first = insert_apartment(seller.user_id).await;
        let second = insert_apartment(seller.user_id).await;
        let missing = Uuid::new_v4();

        let ids = [first, missing, second];
        let summary =
            bulk_status_change(&ids, ApartmentStatus::Hidden, &seller, Some("bulk".into())).await;

        assert_eq!(summary.results.len(), ids.len());
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.succeeded + summary.failed, ids.len());

        let failed: Vec<_> = summary.results.iter().filter(|r| !r.ok).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].apartment_id, missing);
        assert!(failed[0].error.is_some());
    }

    #[tokio::test]
    async fn history_access_follows_role_rules() {
        setup().await;
        let owner = actor(UserRole::Seller);
        let id = insert_apartment(owner.user_id).await;

        change_status(id, ApartmentStatus::Hidden, &owner, None)
            .await
            .unwrap();

        // Чужой продавец не видит историю
        let other = actor(UserRole::Seller);
        assert!(matches!(
            get_history(id, &other).await.unwrap_err(),
            AppError::Forbidden(_)
        ));

        // Обычный пользователь — тоже нет
        let user = actor(UserRole::User);
        assert!(matches!(
            get_history(id, &user).await.unwrap_err(),
            AppError::Forbidden(_)
        ));

        // Администратор видит любую
        let admin = actor(UserRole::Admin);
        assert_eq!(get_history(id, &admin).await.unwrap().len(), 1);
    }
}
