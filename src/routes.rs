// src/routes.rs

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{get, patch, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{assessment, attempt, auth},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, assessments, attempts).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (pool, config, collaborator services).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Every assessment route needs a caller identity: students for
    // submissions, authors for authoring and the results dashboard.
    let assessment_routes = Router::new()
        .route(
            "/",
            get(assessment::list_assessments).post(assessment::create_assessment),
        )
        .route("/{id}", get(assessment::get_assessment))
        .route("/{id}/close-at", patch(assessment::update_close_at))
        .route(
            "/{id}/attempts",
            post(attempt::submit_attempt).get(attempt::list_attempts),
        )
        .route("/{id}/attempts/me", get(attempt::get_my_attempt))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/assessments", assessment_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
