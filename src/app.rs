use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{AllowCredentials, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Build the full HTTP application
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(public::health))
        .merge(user_public_routes())
        .merge(protected_routes(state.clone()));

    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .nest("/api", api)
        // Global middleware
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes))
        .layer(cors_layer(&state.config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn user_public_routes() -> Router<AppState> {
    use public::users;

    Router::new()
        .route("/users/register", post(users::register_post))
        .route("/users/login", post(users::login_post))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{todos, users};

    Router::new()
        .route("/users/profile", get(users::profile_get))
        .route("/todos", get(todos::todos_get).post(todos::todos_post))
        .route("/todos/:id", put(todos::todo_put).delete(todos::todo_delete))
        .route("/todos/:id/toggle", patch(todos::todo_toggle))
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

/// CORS limited to the configured origins, with credentials allowed for
/// those origins only. Requests without an `Origin` header get no CORS
/// headers.
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    let trusted = origins.clone();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(AllowCredentials::predicate(move |origin, _| trusted.contains(origin)))
}
