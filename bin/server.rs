// RTFTI - Real-Time Financial Trust Infrastructure - Web Server
// JSON API over the scoring pipeline, plus a small static dashboard

use axum::{
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use rtfti::{
    count_statuses, execute, generate, Entity, FinancialRecordSet, ProtocolRun, Sector,
    CASE_STUDY_SEED, DEFAULT_MONTHS,
};

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: String) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message),
        }
    }
}

/// Query parameters accepted by /api/run and /api/records
#[derive(Deserialize)]
struct RunParams {
    #[serde(default = "default_seed")]
    seed: u64,

    #[serde(default = "default_months")]
    months: usize,

    // Entity overrides; the case study is the baseline
    name: Option<String>,
    sector: Option<String>,
    turnover_cr: Option<f64>,
    employees: Option<u32>,
}

fn default_seed() -> u64 {
    CASE_STUDY_SEED
}

fn default_months() -> usize {
    DEFAULT_MONTHS
}

impl RunParams {
    fn entity(&self) -> Result<Entity, String> {
        let mut entity = Entity::case_study();

        if let Some(name) = &self.name {
            entity.name = name.clone();
        }
        if let Some(sector) = &self.sector {
            entity.sector = sector.parse::<Sector>()?;
        }
        if let Some(turnover_cr) = self.turnover_cr {
            entity.turnover_cr = turnover_cr;
        }
        if let Some(employees) = self.employees {
            entity.employees = employees;
        }

        Ok(entity)
    }
}

/// Stakeholder views attached to a run response
#[derive(Serialize)]
struct StakeholderViews {
    rating: String,
    lending_decision: String,
    lending_terms: String,
    risk_tier: String,
    risk_guidance: String,
}

#[derive(Serialize)]
struct RunResponse {
    #[serde(flatten)]
    run: ProtocolRun,
    views: StakeholderViews,
    alerts: usize,
    warnings: usize,
}

impl From<ProtocolRun> for RunResponse {
    fn from(run: ProtocolRun) -> Self {
        let trust = &run.trust;
        let counts = count_statuses(&run.validations);
        let decision = trust.lending_decision();
        let tier = trust.risk_tier();

        let views = StakeholderViews {
            rating: trust.rating().as_str().to_string(),
            lending_decision: decision.as_str().to_string(),
            lending_terms: decision.terms().to_string(),
            risk_tier: tier.as_str().to_string(),
            risk_guidance: tier.guidance().to_string(),
        };

        Self {
            views,
            alerts: counts.alerts,
            warnings: counts.warnings,
            run,
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/run - Generate data and execute the full protocol
async fn run_protocol(Query(params): Query<RunParams>) -> impl IntoResponse {
    let entity = match params.entity() {
        Ok(entity) => entity,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ApiResponse::err(e))).into_response();
        }
    };

    let records = generate(&entity, params.months, params.seed);
    let run = execute(&entity, &records);

    (StatusCode::OK, Json(ApiResponse::ok(RunResponse::from(run)))).into_response()
}

/// GET /api/records - Generate and return the four source tables
async fn get_records(Query(params): Query<RunParams>) -> impl IntoResponse {
    let entity = match params.entity() {
        Ok(entity) => entity,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ApiResponse::err(e))).into_response();
        }
    };

    let records: FinancialRecordSet = generate(&entity, params.months, params.seed);

    (StatusCode::OK, Json(ApiResponse::ok(records))).into_response()
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 RTFTI Protocol - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/run", get(run_protocol))
        .route("/records", get(get_records));

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new("web"))
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   API: http://localhost:3000/api/run?seed=42");
    println!("   UI:  http://localhost:3000");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
