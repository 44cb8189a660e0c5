use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    middleware::from_fn_with_state,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::{roles, AccessPolicy};
use crate::config::SecurityConfig;
use crate::docs;
use crate::handlers::{protected, public};
use crate::middleware::{access_gate, handle_panic, AccessGate};
use crate::state::AppState;

/// Build the complete router with all middleware applied.
pub fn app(state: AppState) -> Router {
    let authenticated = AccessGate::new(state.tokens.clone(), AccessPolicy::Authenticated);
    let moderators = AccessGate::new(state.tokens.clone(), AccessPolicy::any_role([roles::MODERATOR]));

    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Protected
        .merge(auth_routes(authenticated.clone()))
        .merge(flight_routes(authenticated, moderators));

    if !state.config.is_production() {
        router = router.merge(docs::docs_router());
    }

    // Global middleware, outermost first
    let router = router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(state.config.server.request_timeout_secs)))
            .layer(DefaultBodyLimit::max(state.config.server.max_request_size_bytes))
            .layer(CatchPanicLayer::custom(handle_panic)),
    );

    let router = match cors_layer(&state.config.security) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(public::auth::login_post))
        .route("/users/register", post(public::users::register_post))
}

fn auth_routes(authenticated: AccessGate) -> Router<AppState> {
    Router::new()
        .route("/auth/whoami", get(protected::auth::whoami_get))
        .route_layer(from_fn_with_state(authenticated, access_gate))
}

/// Reading flights needs any valid token; writing needs a Moderator.
fn flight_routes(authenticated: AccessGate, moderators: AccessGate) -> Router<AppState> {
    use protected::flights;

    let read = get(flights::flights_get).route_layer(from_fn_with_state(authenticated, access_gate));
    let write = post(flights::flights_post)
        .put(flights::flights_put)
        .route_layer(from_fn_with_state(moderators, access_gate));

    Router::new().route("/flights", read.merge(write))
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    if security.cors_origins.is_empty() || security.cors_origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE]),
    )
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Flights API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Flight records with JWT authentication and role-based access",
        "endpoints": {
            "health": "GET /health (public)",
            "login": "POST /auth/login (public)",
            "register": "POST /users/register (public)",
            "whoami": "GET /auth/whoami (authenticated)",
            "flights": "GET /flights?origin=&destination= (authenticated)",
            "create_flight": "POST /flights (Moderator)",
            "update_flight": "PUT /flights (Moderator)",
            "docs": "GET /swagger-ui, GET /api-docs/openapi.json (outside production)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let now = chrono::Utc::now();
    let backend = state.storage.backend();

    match state.storage.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": backend,
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": backend,
                    "error": "database unavailable",
                })),
            )
        }
    }
}
