// 🌐 JSON API - calculators over HTTP for a browser front-end
// POST the calculator input, get back a Report

use crate::calculators::{
    EpfInput, LumpSumInput, PpfInput, RetirementInput, SipInput, WithdrawalInput,
};
use crate::config::PlannerConfig;
use crate::recommendations::{FundCatalog, InvestorProfile};
use crate::report::{CalculatorInput, CalculatorKind, Report};
use crate::scoring::HlvInput;
use crate::validation::ValidationErrors;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PlannerConfig>,
    pub catalog: Arc<FundCatalog>,
}

impl AppState {
    pub fn from_config(config: PlannerConfig) -> anyhow::Result<Self> {
        let catalog = config.fund_catalog()?;
        Ok(AppState {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        })
    }
}

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
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

#[derive(Serialize)]
struct CalculatorInfo {
    name: &'static str,
    title: &'static str,
    defaults: serde_json::Value,
}

/// Run a typed input and wrap the outcome as an HTTP response
fn respond(input: CalculatorInput, catalog: &FundCatalog) -> Response {
    let kind = input.kind();

    match input.run(catalog) {
        Ok(evaluation) => (StatusCode::OK, Json(ApiResponse::ok(evaluation.report))).into_response(),
        Err(e) if e.downcast_ref::<ValidationErrors>().is_some() => {
            tracing::warn!(calculator = %kind, "invalid input: {}", e);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::<Report>::error(e.to_string())),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(calculator = %kind, "evaluation failed: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Report>::error(format!("{:#}", e))),
            )
                .into_response()
        }
    }
}

/// Body that did not deserialize, keeping axum's status but in the JSON envelope
fn rejected(kind: CalculatorKind, rejection: JsonRejection) -> Response {
    tracing::warn!(calculator = %kind, "rejected body: {}", rejection.body_text());
    (
        rejection.status(),
        Json(ApiResponse::<Report>::error(rejection.body_text())),
    )
        .into_response()
}

/// Extracted body or the enveloped rejection
fn handle<T>(
    kind: CalculatorKind,
    body: Result<Json<T>, JsonRejection>,
    catalog: &FundCatalog,
    wrap: fn(T) -> CalculatorInput,
) -> Response {
    match body {
        Ok(Json(input)) => respond(wrap(input), catalog),
        Err(rejection) => rejected(kind, rejection),
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok(crate::VERSION))
}

/// GET /api/calculators - Names, titles and default inputs
async fn list_calculators(State(state): State<AppState>) -> Response {
    let defaults = &state.config.defaults;

    let infos: serde_json::Result<Vec<CalculatorInfo>> = CalculatorKind::ALL
        .into_iter()
        .map(|kind| -> serde_json::Result<CalculatorInfo> {
            let defaults = match kind {
                CalculatorKind::Sip => serde_json::to_value(&defaults.sip),
                CalculatorKind::LumpSum => serde_json::to_value(&defaults.lump_sum),
                CalculatorKind::Ppf => serde_json::to_value(&defaults.ppf),
                CalculatorKind::Epf => serde_json::to_value(&defaults.epf),
                CalculatorKind::Retirement | CalculatorKind::CorpusScore => {
                    serde_json::to_value(&defaults.retirement)
                }
                CalculatorKind::Withdrawal => serde_json::to_value(&defaults.withdrawal),
                CalculatorKind::Hlv => serde_json::to_value(&defaults.hlv),
                CalculatorKind::Recommendations => serde_json::to_value(&defaults.investor),
            }?;
            Ok(CalculatorInfo {
                name: kind.as_str(),
                title: kind.title(),
                defaults,
            })
        })
        .collect();

    match infos {
        Ok(infos) => (StatusCode::OK, Json(ApiResponse::ok(infos))).into_response(),
        Err(e) => {
            tracing::error!("Error listing calculators: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<CalculatorInfo>>::error(e.to_string())),
            )
                .into_response()
        }
    }
}

/// POST /api/sip
async fn sip(State(state): State<AppState>, body: Result<Json<SipInput>, JsonRejection>) -> Response {
    handle(CalculatorKind::Sip, body, &state.catalog, CalculatorInput::Sip)
}

/// POST /api/lumpsum
async fn lump_sum(
    State(state): State<AppState>,
    body: Result<Json<LumpSumInput>, JsonRejection>,
) -> Response {
    handle(CalculatorKind::LumpSum, body, &state.catalog, CalculatorInput::LumpSum)
}

/// POST /api/ppf
async fn ppf(State(state): State<AppState>, body: Result<Json<PpfInput>, JsonRejection>) -> Response {
    handle(CalculatorKind::Ppf, body, &state.catalog, CalculatorInput::Ppf)
}

/// POST /api/epf
async fn epf(State(state): State<AppState>, body: Result<Json<EpfInput>, JsonRejection>) -> Response {
    handle(CalculatorKind::Epf, body, &state.catalog, CalculatorInput::Epf)
}

/// POST /api/retirement
async fn retirement(
    State(state): State<AppState>,
    body: Result<Json<RetirementInput>, JsonRejection>,
) -> Response {
    handle(CalculatorKind::Retirement, body, &state.catalog, CalculatorInput::Retirement)
}

/// POST /api/withdrawal
async fn withdrawal(
    State(state): State<AppState>,
    body: Result<Json<WithdrawalInput>, JsonRejection>,
) -> Response {
    handle(CalculatorKind::Withdrawal, body, &state.catalog, CalculatorInput::Withdrawal)
}

/// POST /api/hlv
async fn hlv(State(state): State<AppState>, body: Result<Json<HlvInput>, JsonRejection>) -> Response {
    handle(CalculatorKind::Hlv, body, &state.catalog, CalculatorInput::Hlv)
}

/// POST /api/corpus-score - takes the retirement input and scores its plan
async fn corpus_score(
    State(state): State<AppState>,
    body: Result<Json<RetirementInput>, JsonRejection>,
) -> Response {
    handle(CalculatorKind::CorpusScore, body, &state.catalog, CalculatorInput::CorpusScore)
}

/// POST /api/recommendations
async fn recommendations(
    State(state): State<AppState>,
    body: Result<Json<InvestorProfile>, JsonRejection>,
) -> Response {
    handle(CalculatorKind::Recommendations, body, &state.catalog, CalculatorInput::Recommendations)
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/calculators", get(list_calculators))
        .route("/sip", post(sip))
        .route("/lumpsum", post(lump_sum))
        .route("/ppf", post(ppf))
        .route("/epf", post(epf))
        .route("/retirement", post(retirement))
        .route("/withdrawal", post(withdrawal))
        .route("/hlv", post(hlv))
        .route("/corpus-score", post(corpus_score))
        .route("/recommendations", post(recommendations))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::from_config(PlannerConfig::default()).unwrap())
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], crate::VERSION);
    }

    #[tokio::test]
    async fn test_list_calculators() {
        let request = Request::builder().uri("/api/calculators").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        let list = body["data"].as_array().unwrap();
        assert_eq!(list.len(), CalculatorKind::ALL.len());
        assert_eq!(list[0]["name"], "sip");
        assert_eq!(list[0]["defaults"]["monthly_investment"], 10000.0);
    }

    #[tokio::test]
    async fn test_sip_report() {
        let request = post_json(
            "/api/sip",
            serde_json::json!({ "monthly_investment": 10000, "annual_rate": 12, "years": 20 }),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["calculator"], "sip");
        assert_eq!(body["data"]["result"]["total_investment"], 2400000.0);
        assert_eq!(body["data"]["result"]["yearly"].as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_invalid_input_is_unprocessable() {
        let request = post_json(
            "/api/retirement",
            serde_json::json!({
                "current_age": 60,
                "retirement_age": 50,
                "life_expectancy": 85,
                "monthly_expense": 50000,
                "inflation_rate": 6,
                "expected_return": 12
            }),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("retirement_age"));
    }

    #[tokio::test]
    async fn test_missing_field_keeps_envelope() {
        let request = post_json("/api/sip", serde_json::json!({ "monthly_investment": 1000 }));
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert!(body.get("data").is_none());
        assert!(body["error"].as_str().unwrap().contains("annual_rate"));
    }

    #[tokio::test]
    async fn test_malformed_body_keeps_envelope() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/hlv")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_recommendations_use_catalog() {
        let request = post_json(
            "/api/recommendations",
            serde_json::json!({
                "age": 30,
                "risk_profile": "Aggressive",
                "hlv_score": 720,
                "corpus_score": 650,
                "monthly_investment": 20000
            }),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["result"]["mix"]["equity"], 80);
        assert!(!body["data"]["result"]["recommendations"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_withdrawal_and_corpus_score() {
        let request = post_json("/api/withdrawal", serde_json::to_value(WithdrawalInput::default()).unwrap());
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["result"]["will_outlast"].is_boolean());

        let request = post_json("/api/corpus-score", serde_json::to_value(RetirementInput::default()).unwrap());
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        let score = body["data"]["result"]["score"].as_u64().unwrap();
        assert!((300..=900).contains(&score));
    }
}
