use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, system};

/// All application routes
pub fn configure_routes() -> Router {
    let public = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/auth/register", post(system::handlers::auth::register))
        .route("/auth/login", post(system::handlers::auth::login))
        .route("/regions", get(handlers::tecopos::list_regions));

    let protected = Router::new()
        .route("/me", get(system::handlers::auth::current_user))
        // Sales and inventory
        .route("/sales", get(handlers::a001_sale::get_sales))
        .route("/inventory", get(handlers::p900_inventory::get_inventory))
        // Conciliations
        .route(
            "/conciliations",
            get(handlers::a002_conciliation::list).post(handlers::a002_conciliation::create),
        )
        // Tecopos linkage
        .route("/me/tecopos/save-token", post(handlers::tecopos::save_token))
        .route(
            "/me/link-tecopos-supplier",
            post(handlers::tecopos::link_supplier),
        )
        .route(
            "/me/tecopos/businesses",
            get(handlers::tecopos::list_businesses),
        )
        .route(
            "/me/tecopos/suppliers",
            get(handlers::tecopos::list_suppliers),
        )
        .route_layer(middleware::from_fn(system::auth::middleware::require_auth));

    public.merge(protected)
}
