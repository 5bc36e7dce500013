use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::handlers::protected::employees;
use crate::handlers::public::{self, auth};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full router with global middleware applied
pub fn app(state: AppState) -> Router {
    let max_body = state.config.server.max_request_size_bytes;
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        // Public
        .route("/health", get(public::health_get))
        .nest("/api/v1", api_routes(state.clone()))
        // Global middleware
        .layer(DefaultBodyLimit::max(max_body))
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(employee_routes(state))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register_post))
        .route("/auth/login", post(auth::login_post))
        .route("/auth/refresh", post(auth::refresh_post))
        .route("/auth/logout", post(auth::logout_post))
}

fn employee_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/employees",
            get(employees::employee_list).post(employees::employee_create),
        )
        .route(
            "/employees/:id",
            get(employees::employee_show)
                .put(employees::employee_update)
                .delete(employees::employee_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            // AllowOrigin::list panics on a wildcard
            if origin == "*" {
                tracing::warn!("Ignoring wildcard CORS origin, list origins explicitly");
                return None;
            }
            match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                    None
                }
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
