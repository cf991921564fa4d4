// Singapore Study-Cost Estimator - Web Server
// JSON API + embedded single-page form

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use sg_study_cost::{
    format_cny, format_sgd, Accommodation, CostBreakdown, CostEstimator, EstimatorConfig,
    EstimatorInput, Food, Tier,
};

/// Shared application state. The estimator is immutable, so handlers
/// share it without locking.
#[derive(Clone)]
struct AppState {
    estimator: Arc<CostEstimator>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// One form submission, catalog selections as stable keys
#[derive(Deserialize)]
struct EstimateRequest {
    tuition_annual_sgd: f64,
    accommodation: String,
    food: String,
    guardian_required: bool,
    exchange_rate_sgd_to_cny: f64,
}

/// Estimate response (breakdown + headline figures + verdict)
#[derive(Serialize)]
struct EstimateResponse {
    breakdown: CostBreakdown,
    first_year_funds_cny: f64,
    monthly_remittance_cny: f64,
    first_year_funds_display: String,
    monthly_remittance_display: String,
    total_annual_cost_display: String,
    tier: Tier,
    tier_label: &'static str,
    advice: &'static str,
}

/// Catalog entry as shown in the form
#[derive(Serialize)]
struct CatalogOption {
    key: &'static str,
    label: &'static str,
    monthly_cost_sgd: f64,
    monthly_cost_display: String,
}

#[derive(Serialize)]
struct CatalogResponse {
    accommodation: Vec<CatalogOption>,
    food: Vec<CatalogOption>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/catalog - The fixed option catalogs
async fn get_catalog() -> impl IntoResponse {
    let accommodation = Accommodation::ALL
        .iter()
        .map(|a| CatalogOption {
            key: a.key(),
            label: a.label(),
            monthly_cost_sgd: a.monthly_cost_sgd(),
            monthly_cost_display: format_sgd(a.monthly_cost_sgd()),
        })
        .collect();

    let food = Food::ALL
        .iter()
        .map(|f| CatalogOption {
            key: f.key(),
            label: f.label(),
            monthly_cost_sgd: f.monthly_cost_sgd(),
            monthly_cost_display: format_sgd(f.monthly_cost_sgd()),
        })
        .collect();

    Json(ApiResponse::ok(CatalogResponse {
        accommodation,
        food,
    }))
}

/// GET /api/config - Active fees and thresholds
async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.estimator.config().clone()))
}

/// POST /api/estimate - Run one calculation
async fn post_estimate(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> impl IntoResponse {
    let accommodation = match Accommodation::from_key(&request.accommodation) {
        Ok(a) => a,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<EstimateResponse>::error(e.to_string())),
            )
                .into_response()
        }
    };

    let food = match Food::from_key(&request.food) {
        Ok(f) => f,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<EstimateResponse>::error(e.to_string())),
            )
                .into_response()
        }
    };

    let input = EstimatorInput {
        tuition_annual_sgd: request.tuition_annual_sgd,
        accommodation,
        food,
        guardian_required: request.guardian_required,
        exchange_rate_sgd_to_cny: request.exchange_rate_sgd_to_cny,
    };

    match state.estimator.estimate(&input) {
        Ok(result) => {
            let response = EstimateResponse {
                first_year_funds_display: format_cny(result.first_year_funds_cny),
                monthly_remittance_display: format_cny(result.monthly_remittance_cny),
                total_annual_cost_display: format_sgd(result.breakdown.total_annual_cost_sgd),
                first_year_funds_cny: result.first_year_funds_cny,
                monthly_remittance_cny: result.monthly_remittance_cny,
                tier: result.tier,
                tier_label: result.tier.label(),
                advice: result.tier.advice(),
                breakdown: result.breakdown,
            };

            (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<EstimateResponse>::error(e.to_string())),
        )
            .into_response(),
    }
}

/// GET / - Serve the form page
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Singapore Study-Cost Estimator - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Optional config file argument
    let config = match std::env::args().nth(1) {
        Some(path) => match EstimatorConfig::from_file(&path) {
            Ok(config) => {
                println!("✓ Config loaded: {}", path);
                config
            }
            Err(e) => {
                eprintln!("❌ Failed to load config {}: {:#}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            println!("✓ Using built-in fee schedule and thresholds");
            EstimatorConfig::default()
        }
    };

    let state = AppState {
        estimator: Arc::new(CostEstimator::new(config)),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/catalog", get(get_catalog))
        .route("/config", get(get_config))
        .route("/estimate", post(post_estimate))
        .with_state(state.clone());

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   API: http://localhost:3000/api/estimate");
    println!("   UI:  http://localhost:3000");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
