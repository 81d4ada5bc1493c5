use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use campus_api::config;
use campus_api::database::manager::DatabaseManager;
use campus_api::handlers;
use campus_api::middleware::{jwt_auth_middleware, require_superadmin, validate_tenant_middleware};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting Campus API in {:?} mode", config.environment);

    // The server still comes up when the database is unreachable; /health
    // reports degraded until it recovers
    if config.database.run_migrations_on_start {
        if let Err(e) = DatabaseManager::run_migrations().await {
            tracing::warn!("Migrations not applied at startup: {}", e);
        }
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("CAMPUS_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Campus API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        // Tenant-scoped API
        .merge(api_routes())
        // Platform administration
        .merge(admin_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_public_routes() -> Router {
    use handlers::public::auth;

    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
}

fn api_routes() -> Router {
    use handlers::protected::{
        admissions, enrollments, fees, grades, holidays, schools, sections, sessions, students, terms, transport,
    };

    Router::new()
        // Academic calendar
        .route("/api/sessions", get(sessions::list).post(sessions::create))
        .route("/api/sessions/:id", get(sessions::show))
        .route("/api/sessions/:id/activate", post(sessions::activate))
        .route("/api/sessions/:id/terms", get(terms::list).post(terms::create))
        .route("/api/sessions/:id/holidays", get(holidays::list).post(holidays::create))
        // School directory
        .route("/api/schools", get(schools::list).post(schools::create))
        .route("/api/schools/:id/grades", get(grades::list).post(grades::create))
        .route("/api/schools/:id/transport-routes", get(transport::list).post(transport::create))
        .route("/api/grades/:id/sections", get(sections::list).post(sections::create))
        .route("/api/grades/:id/fees", get(fees::list).post(fees::create))
        .route("/api/students", get(students::list).post(students::create))
        // Admission workflow
        .route("/api/admissions", get(admissions::list).post(admissions::create))
        .route("/api/admissions/:id/approve", post(admissions::approve))
        .route("/api/admissions/:id/reject", post(admissions::reject))
        // Section enrollments
        .route("/api/enrollments", get(enrollments::list).post(enrollments::create))
        .route("/api/enrollments/:id/withdraw", post(enrollments::withdraw))
        .route("/api/enrollments/:id/transfer", post(enrollments::transfer))
        // Outermost layer runs first: JWT, then tenant validation
        .route_layer(from_fn(validate_tenant_middleware))
        .route_layer(from_fn(jwt_auth_middleware))
}

fn admin_routes() -> Router {
    use handlers::admin::tenants;

    Router::new()
        .route("/api/admin/tenants", get(tenants::list).post(tenants::create))
        .route("/api/admin/tenants/:id", get(tenants::show))
        .route_layer(from_fn(require_superadmin))
        .route_layer(from_fn(jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Campus API",
            "version": version,
            "description": "Multi-tenant school management API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/login, /auth/register (public - token acquisition)",
                "calendar": "/api/sessions[/:id], /api/sessions/:id/terms, /api/sessions/:id/holidays (protected)",
                "directory": "/api/schools, /api/schools/:id/grades, /api/grades/:id/sections, /api/students (protected)",
                "billing": "/api/grades/:id/fees, /api/schools/:id/transport-routes (protected)",
                "admissions": "/api/admissions[/:id/approve|reject] (protected)",
                "enrollments": "/api/enrollments[/:id/withdraw|transfer] (protected)",
                "admin": "/api/admin/tenants (superadmin)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
