use crate::auth::TokenConfig;
use crate::cli::Args;
use anyhow::Context;
use axum::Router;
use axum::handler::Handler;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use deadpool_diesel::Runtime;
use deadpool_diesel::postgres::{Manager, Pool};
use tracing::info;

pub mod auth;
pub mod cli;
pub mod errors;
pub mod extract;
pub mod model;
pub mod payloads;
pub mod response;
pub mod schema;

mod api;

/// Process-scoped resources created once at startup and injected into
/// handlers through axum state.
#[derive(Clone)]
pub struct AppState {
    pub pool: Pool,
    pub tokens: TokenConfig,
}

pub fn init_router(args: &Args) -> anyhow::Result<Router> {
    info!("Initializing database pool...");
    let pool = init_pool(&args.connection_str, args.db_pool_max_size)
        .context("Failed to initialize database pool")?;

    let state = AppState {
        pool,
        tokens: TokenConfig::new(&args.jwt_secret, args.token_ttl_hours),
    };

    info!("Initializing router...");
    Ok(init_router_internal(state))
}

pub fn init_test_router(pool: Pool, jwt_secret: &str) -> Router {
    let state = AppState {
        pool,
        tokens: TokenConfig::new(jwt_secret, 24),
    };
    init_router_internal(state)
}

fn init_router_internal(state: AppState) -> Router {
    let api = public_routes().merge(protected_routes(state.clone()));
    Router::new().nest("/api", api).with_state(state)
}

fn init_pool(conn_str: &str, max_size: u32) -> anyhow::Result<Pool> {
    // Connections are established lazily, so a down database at startup
    // does not stop the server from serving (degraded) health checks.
    let manager = Manager::new(conn_str, Runtime::Tokio1);
    let pool = Pool::builder(manager).max_size(max_size as usize).build()?;
    Ok(pool)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login))
        .route("/health", get(api::health::health))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/reports",
            post(api::report::create_report).get(api::report::list_reports),
        )
        .route("/reports/{id}", get(api::report::get_report))
        .route(
            "/reports/{id}/feedback",
            post(api::report::set_prl_feedback.layer(from_fn(auth::require_prl))),
        )
        .route(
            "/reports/{id}/pl-feedback",
            post(api::report::set_pl_feedback.layer(from_fn(auth::require_pl))),
        )
        .route(
            "/ratings",
            post(api::rating::submit_rating).get(api::rating::list_ratings),
        )
        .route(
            "/courses",
            get(api::course::list_courses)
                .post(api::course::create_course.layer(from_fn(auth::require_pl))),
        )
        .route(
            "/courses/{id}",
            put(api::course::update_course.layer(from_fn(auth::require_pl)))
                .delete(api::course::delete_course.layer(from_fn(auth::require_pl))),
        )
        .route("/feedback", post(api::feedback::submit_feedback))
        .route(
            "/feedback/{report_id}",
            get(api::feedback::list_report_feedback),
        )
        .route("/users", get(api::user::list_users))
        .layer(from_fn_with_state(state, auth::require_auth))
}
