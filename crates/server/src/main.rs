use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use denuo_core::{health_status, HealthStatus, VersionResponse, PROJECT_NAME, PROJECT_VERSION};
use ingest::{db_path, open_shared, ScrapeConfig, SharedDb};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::time::Duration;
use std::{env, net::SocketAddr};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;
mod scheduler;
mod tools;

use tools::{Tool, ToolDefinition, ToolOutput};

const SERVICE_NAME: &str = "denuo-api";
const DEFAULT_SCRAPE_INTERVAL_SECS: u64 = 6 * 60 * 60;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: Option<SharedDb>,
    pub metrics: PrometheusHandle,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = AppConfig::from_env();
    let metrics = init_metrics()?;

    let path = db_path(&cfg.data_dir);
    let db = match open_shared(&path) {
        Ok(db) => {
            tracing::info!(db = %path.display(), "database initialized");
            Some(db)
        }
        Err(e) => {
            tracing::error!(db = %path.display(), error = %e, "failed to open database, tools will be unavailable");
            None
        }
    };

    scheduler::start(db.clone(), cfg.scrape.clone(), cfg.scrape_interval);

    let state = AppState {
        config: cfg.clone(),
        db,
        metrics,
    };
    let app = build_router(state);

    let addr: SocketAddr = cfg
        .bind_addr
        .parse()
        .with_context(|| format!("BIND_ADDR must be a socket address, got {:?}", cfg.bind_addr))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}. Hint: set BIND_ADDR=127.0.0.1:3101"))?;

    tracing::info!(
        %addr,
        service = SERVICE_NAME,
        project = PROJECT_NAME,
        env = %cfg.run_env,
        "listening"
    );

    axum::serve(listener, app)
        .await
        .context("server error while serving requests")
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/scrape", post(trigger_scrape))
        .route("/v1/version", get(version))
        .route("/v1/scrape/status", get(scrape_status))
        .route("/v1/tools", get(list_tools))
        .route("/v1/tools/:name", post(call_tool))
        .with_state(state)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hyper=warn,reqwest=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_metrics() -> Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install Prometheus recorder")
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus<'static>> {
    Json(health_status(SERVICE_NAME, state.db.is_some()))
}

async fn version() -> Json<VersionResponse<'static>> {
    Json(VersionResponse {
        service: SERVICE_NAME,
        project: PROJECT_NAME,
        version: PROJECT_VERSION,
    })
}

async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn trigger_scrape(State(state): State<AppState>) -> (StatusCode, &'static str) {
    let Some(db) = state.db else {
        tracing::error!("scrape requested but the database is not available");
        return (StatusCode::SERVICE_UNAVAILABLE, "Database not available");
    };
    scheduler::spawn_scrape(db, state.config.scrape.clone(), "manual");
    (StatusCode::ACCEPTED, "Scraping started")
}

async fn scrape_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, (StatusCode, Json<ApiError>)> {
    let Some(db) = state.db.as_ref() else {
        return Err(ApiError::unavailable());
    };
    let rows = {
        let conn = db.lock().await;
        catalog::list_scrape_metadata(&conn)
    };
    match rows {
        Ok(rows) => Ok(format_response(&headers, &rows)),
        Err(e) => {
            tracing::error!(error = %e, "failed to read scrape status");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError {
                    message: "store_error".to_string(),
                    details: vec![format!("{e:#}")],
                }),
            ))
        }
    }
}

async fn list_tools() -> Json<Vec<ToolDefinition>> {
    Json(tools::definitions())
}

async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Option<Json<serde_json::Value>>,
) -> Result<Json<ToolOutput>, (StatusCode, Json<ApiError>)> {
    let Some(tool) = Tool::from_name(&name) else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiError {
                message: "unknown_tool".to_string(),
                details: vec![format!("Tool {name} not found")],
            }),
        ));
    };
    let args = payload.map(|Json(args)| args).unwrap_or_default();
    Ok(Json(tools::invoke(state.db.as_ref(), tool, args).await))
}

fn format_response<T: Serialize>(headers: &HeaderMap, response: &T) -> Response {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json");

    if accept.contains("yaml") {
        let yaml = serde_yaml::to_string(response).unwrap_or_default();
        ([(header::CONTENT_TYPE, "application/x-yaml")], yaml).into_response()
    } else {
        let json = serde_json::to_string_pretty(response).unwrap_or_default();
        ([(header::CONTENT_TYPE, "application/json")], json).into_response()
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub run_env: String,
    pub data_dir: String,
    /// Zero disables the scheduled trigger.
    pub scrape_interval: Duration,
    pub scrape: ScrapeConfig,
}

impl AppConfig {
    fn from_env() -> Self {
        let interval_secs = env::var("SCRAPE_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_SCRAPE_INTERVAL_SECS);
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3100".to_string()),
            run_env: env::var("RUN_ENV").unwrap_or_else(|_| "local".to_string()),
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            scrape_interval: Duration::from_secs(interval_secs),
            scrape: ScrapeConfig::from_env(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub message: String,
    pub details: Vec<String>,
}

impl ApiError {
    fn unavailable() -> (StatusCode, Json<ApiError>) {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError {
                message: "database_unavailable".to_string(),
                details: vec!["Database not available".to_string()],
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use denuo_core::{ScrapeStatus, Section};
    use tower::ServiceExt;

    fn test_state(db: Option<SharedDb>) -> AppState {
        AppState {
            config: AppConfig {
                bind_addr: "127.0.0.1:0".to_string(),
                run_env: "test".to_string(),
                data_dir: "data".to_string(),
                scrape_interval: Duration::ZERO,
                // Nothing listens here, so a spawned scrape fails fast.
                scrape: ScrapeConfig::with_base_url("http://127.0.0.1:9"),
            },
            db,
            metrics: PrometheusBuilder::new().build_recorder().handle(),
        }
    }

    fn memory_db() -> SharedDb {
        open_shared(std::path::Path::new(":memory:")).unwrap()
    }

    async fn body_text(res: Response) -> String {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_reports_store() {
        let app = build_router(test_state(None));
        let res = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(res).await).unwrap();
        assert_eq!(body["store"], "unavailable");
        assert_eq!(body["service"], SERVICE_NAME);
    }

    #[tokio::test]
    async fn scrape_without_database_is_unavailable() {
        let app = build_router(test_state(None));
        let res = app
            .oneshot(Request::builder().method("POST").uri("/scrape").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_text(res).await, "Database not available");
    }

    #[tokio::test]
    async fn scrape_is_accepted() {
        let app = build_router(test_state(Some(memory_db())));
        let res = app
            .oneshot(Request::builder().method("POST").uri("/scrape").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::ACCEPTED);
        assert_eq!(body_text(res).await, "Scraping started");
    }

    #[tokio::test]
    async fn scrape_status_as_yaml() {
        let db = memory_db();
        ingest::update_scrape_metadata(&*db.lock().await, Section::News, ScrapeStatus::Success, 12, None)
            .unwrap();
        let app = build_router(test_state(Some(db)));
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/v1/scrape/status")
                    .header("accept", "application/x-yaml")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "application/x-yaml");
        let text = body_text(res).await;
        assert!(text.contains("section: news"));
        assert!(text.contains("items_scraped: 12"));
    }

    #[tokio::test]
    async fn lists_tool_definitions() {
        let app = build_router(test_state(None));
        let res = app
            .oneshot(Request::builder().uri("/v1/tools").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(res).await).unwrap();
        let tools = body.as_array().unwrap();
        assert_eq!(tools.len(), Tool::ALL.len());
        assert_eq!(tools[0]["name"], "search_denuo_news");
        assert!(tools[0]["inputSchema"]["properties"]["query"].is_object());
    }

    #[tokio::test]
    async fn calls_tool_by_name() {
        let app = build_router(test_state(Some(memory_db())));
        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/tools/get_denuo_recent_news")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"language":"nl"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(res).await).unwrap();
        assert_eq!(body["isError"], false);
        assert_eq!(body["content"][0]["type"], "text");
        assert_eq!(body["content"][0]["text"], "No recent news found");
    }

    #[tokio::test]
    async fn tool_without_database_is_an_error_result() {
        let app = build_router(test_state(None));
        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/tools/get_denuo_scrape_status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(res).await).unwrap();
        assert_eq!(body["isError"], true);
        assert_eq!(body["content"][0]["text"], "Database not available");
    }

    #[tokio::test]
    async fn unknown_tool_is_not_found() {
        let app = build_router(test_state(None));
        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/tools/delete_everything")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
