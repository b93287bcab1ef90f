use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use crate::{api::handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    let require_actor = || middleware::from_fn(system::auth::middleware::require_actor);
    let require_admin = || middleware::from_fn(system::auth::middleware::require_admin);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // A002 APARTMENT (browse is public, mutations need an actor)
        // ========================================
        .route("/api/apartment", get(handlers::a002_apartment::list))
        .route(
            "/api/apartment",
            post(handlers::a002_apartment::upsert).layer(require_actor()),
        )
        .route("/api/apartment/:id", get(handlers::a002_apartment::get_by_id))
        .route(
            "/api/apartment/:id",
            delete(handlers::a002_apartment::delete).layer(require_actor()),
        )
        // Статус: каждая мутация пишет строку аудита
        .route(
            "/api/apartment/:id/visibility",
            patch(handlers::a002_apartment::change_visibility).layer(require_actor()),
        )
        .route(
            "/api/apartment/:id/sold",
            post(handlers::a002_apartment::mark_sold).layer(require_actor()),
        )
        .route(
            "/api/apartment/bulk-status",
            post(handlers::a002_apartment::bulk_status).layer(require_actor()),
        )
        .route(
            "/api/apartment/:id/status-log",
            get(handlers::a002_apartment::status_log).layer(require_actor()),
        )
        // ========================================
        // A001 COMPLEX (mutations are admin-only)
        // ========================================
        .route("/api/complex", get(handlers::a001_complex::list_all))
        .route(
            "/api/complex",
            post(handlers::a001_complex::upsert).layer(require_admin()),
        )
        .route("/api/complex/:id", get(handlers::a001_complex::get_by_id))
        .route(
            "/api/complex/:id",
            delete(handlers::a001_complex::delete).layer(require_admin()),
        )
        // ========================================
        // A004 FAVORITES
        // ========================================
        .route(
            "/api/favorite",
            get(handlers::a004_favorite::list).layer(require_actor()),
        )
        .route(
            "/api/favorite/:apartment_id",
            post(handlers::a004_favorite::add)
                .delete(handlers::a004_favorite::remove)
                .layer(require_actor()),
        )
        // ========================================
        // A005 SAVED SEARCHES
        // ========================================
        .route(
            "/api/saved_search",
            get(handlers::a005_saved_search::list)
                .post(handlers::a005_saved_search::create)
                .layer(require_actor()),
        )
        .route(
            "/api/saved_search/:id",
            get(handlers::a005_saved_search::get_by_id)
                .delete(handlers::a005_saved_search::delete)
                .layer(require_actor()),
        )
        // ========================================
        // SYSTEM USERS (admin only)
        // ========================================
        .route(
            "/api/system/users",
            get(handlers::system_users::list)
                .post(handlers::system_users::create)
                .layer(require_admin()),
        )
        .route(
            "/api/system/users/:id",
            get(handlers::system_users::get_by_id)
                .put(handlers::system_users::update)
                .delete(handlers::system_users::delete)
                .layer(require_admin()),
        )
        // ========================================
        // UTILITIES
        // ========================================
        // Logs handlers
        .route(
            "/api/logs",
            get(handlers::logs::list_all)
                .post(handlers::logs::create)
                .delete(handlers::logs::clear_all),
        )
}
