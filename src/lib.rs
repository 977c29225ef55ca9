pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;

use axum::{
    http::{header, HeaderValue},
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use config::{AppConfig, SecurityConfig};
use database::{TodoRepository, UserRepository};

/// Application state injected into every handler. Built once at startup
/// around the single connection pool; no module-level singletons.
#[derive(Clone)]
pub struct AppState {
    pub todos: TodoRepository,
    pub users: UserRepository,
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(pool: PgPool, config: &AppConfig) -> Self {
        Self {
            todos: TodoRepository::new(pool.clone()),
            users: UserRepository::new(pool),
            security: config.security.clone(),
        }
    }
}

/// Build the router: routes, per-route validation middleware, and the
/// global layers (security headers, CORS, request/response logging).
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        // Todos
        .route(
            "/todos",
            get(handlers::todos::list).route_layer(from_fn(middleware::validate_category_query)),
        )
        .route("/todos/:id", get(handlers::todos::get))
        .route(
            "/todos/create",
            post(handlers::todos::create).route_layer(from_fn(middleware::validate_create_body)),
        )
        .route(
            "/todos/update/:id",
            put(handlers::todos::update).route_layer(from_fn(middleware::validate_update_body)),
        )
        .route("/todos/delete/:id", delete(handlers::todos::delete))
        // Auth
        .route("/create/user", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/validate-token", get(handlers::auth::validate_token))
        .route("/logout", post(handlers::auth::logout))
        // Global middleware
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
