// src/routes.rs

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, auth, quiz},
    models::session::SESSION_HEADER,
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Public: school list, start/submit a test, leaderboard, admin login.
/// * Admin (Bearer JWT with admin role): questions, timings, results, analysis.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let session_header = HeaderName::from_static(SESSION_HEADER);

    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, session_header.clone()])
        .expose_headers([session_header]);

    let auth_routes = Router::new().route("/login", post(auth::login));

    let test_routes = Router::new()
        .route("/start", post(quiz::start_test))
        .route("/submit", post(quiz::submit_test));

    let admin_routes = Router::new()
        .route(
            "/questions",
            get(admin::list_questions).post(admin::create_question),
        )
        .route("/questions/reset", post(admin::reset_questions))
        .route("/questions/{id}", delete(admin::delete_question))
        .route("/timings", get(admin::list_timings).put(admin::set_timing))
        .route("/results", delete(admin::reset_leaderboard))
        .route("/analysis", get(admin::get_analysis))
        .route("/data", get(admin::get_admin_data))
        // Double middleware protection: Auth first, then Admin check
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/api/schools", get(quiz::list_schools))
        .route("/api/leaderboard", get(quiz::get_leaderboard))
        .nest("/api/auth", auth_routes)
        .nest("/api/test", test_routes)
        .nest("/api/admin", admin_routes)
        // Global Middleware (outermost first)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
