use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

use crate::api::{AnalysisResponse, FaceCaptureRequest, StreamQuery, TextAnalysisRequest};
use emotion_sense::config::AppConfig;
use emotion_sense::export::{export_csv, export_file_name};
use emotion_sense::history::{FileBlobStore, HistoryEntry, HistoryLog, HistoryStats};
use emotion_sense::session::{CaptureSession, SyntheticCamera};
use emotion_sense::{AnalysisResult, Analyzer, RandomJitter};

#[derive(Clone)]
struct AppState {
    config: Arc<AppConfig>,
    analyzer: Arc<Mutex<Analyzer<RandomJitter>>>,
    history: Arc<Mutex<HistoryLog<FileBlobStore>>>,
}

impl AppState {
    fn new(config: AppConfig) -> Result<Self, String> {
        let analyzer = Analyzer::new(RandomJitter::from_seed(config.analysis.seed))?;
        let history = HistoryLog::with_config(
            FileBlobStore::new(config.history.dir.clone()),
            &config.history,
        );
        Ok(Self {
            config: Arc::new(config),
            analyzer: Arc::new(Mutex::new(analyzer)),
            history: Arc::new(Mutex::new(history)),
        })
    }
}

pub async fn serve(args: crate::ServeArgs, config: AppConfig) -> Result<(), String> {
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let web_root = args
        .web_root
        .unwrap_or_else(|| config.server.web_root.clone());

    let app = router(AppState::new(config)?, &web_root);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    info!(%addr, "serving emotion analysis");
    axum::serve(tokio::net::TcpListener::bind(addr).await.map_err(|err| {
        format!("failed to bind server: {}", err)
    })?, app)
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

fn router(state: AppState, web_root: &str) -> Router {
    let index_path = format!("{}/index.html", web_root.trim_end_matches('/'));
    let static_service = ServeDir::new(web_root).not_found_service(ServeFile::new(index_path));

    Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze/text", post(analyze_text_handler))
        .route("/api/analyze/face", post(capture_face_handler))
        .route("/api/capture/stream", get(capture_stream_handler))
        .route("/api/history", get(history_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/export", get(export_handler))
        .nest_service("/", static_service)
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_text_handler(
    State(state): State<AppState>,
    Json(request): Json<TextAnalysisRequest>,
) -> Result<Json<AnalysisResponse>, (StatusCode, String)> {
    let save = request.save.unwrap_or(true);
    let text = request
        .into_text()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let latency = state.config.analysis.latency();
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    let result = state.analyzer.lock().await.analyze_text(&text);
    let response = record(&state, result, &text, save).await;
    Ok(Json(response))
}

async fn capture_face_handler(
    State(state): State<AppState>,
    request: Option<Json<FaceCaptureRequest>>,
) -> Result<Json<AnalysisResponse>, (StatusCode, String)> {
    let request = request.map(|Json(request)| request).unwrap_or_default();
    let frame = request
        .into_frame(state.config.capture.width, state.config.capture.height)
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let result = state.analyzer.lock().await.analyze_face(&frame);
    let response = record(&state, result, "", true).await;
    Ok(Json(response))
}

async fn record(state: &AppState, result: AnalysisResult, content: &str, save: bool) -> AnalysisResponse {
    let mut warnings = Vec::new();
    let entry = if save {
        match state.history.lock().await.record(&result, content) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("failed to save analysis: {}", err);
                warnings.push(format!("history not saved: {}", err));
                None
            }
        }
    } else {
        None
    };
    AnalysisResponse::new(result, entry, warnings)
}

async fn capture_stream_handler(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>, (StatusCode, String)>
{
    let period = query
        .interval_ms
        .map(|value| Duration::from_millis(value.max(100)))
        .unwrap_or_else(|| state.config.capture.interval());
    let analyzer = Analyzer::new(RandomJitter::from_seed(state.config.analysis.seed))
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err))?;
    let camera = SyntheticCamera::new(state.config.capture.width, state.config.capture.height);
    let session = CaptureSession::start(analyzer, camera, period);
    let receiver = session.subscribe();

    // The session lives as long as the stream; a client disconnect drops both.
    let stream = BroadcastStream::new(receiver).filter_map(move |event| {
        let _session = &session;
        match event {
            Ok(result) => {
                let data = serde_json::to_string(&result).unwrap_or_default();
                Some(Ok(Event::default().event("analysis").data(data)))
            }
            Err(_) => None,
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(8))))
}

async fn history_handler(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    Json(state.history.lock().await.read_all())
}

async fn stats_handler(State(state): State<AppState>) -> Json<HistoryStats> {
    Json(state.history.lock().await.stats())
}

async fn export_handler(State(state): State<AppState>) -> Response {
    let entries = state.history.lock().await.read_all();
    match export_csv(&entries) {
        Some(csv) => {
            let file_name = export_file_name(chrono::Local::now().date_naive());
            (
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", file_name),
                    ),
                ],
                csv,
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "No data to export".to_string()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router(dir: &std::path::Path) -> Router {
        let mut config = AppConfig::default();
        config.history.dir = dir.to_path_buf();
        config.analysis.latency_ms = 0;
        config.analysis.seed = Some(7);
        let state = AppState::new(config).expect("state");
        router(state, &dir.join("web").to_string_lossy())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    #[tokio::test]
    async fn export_without_history_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let request = Request::builder()
            .uri("/api/export")
            .body(Body::empty())
            .expect("request");

        let (status, body) = send(test_router(dir.path()), request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "No data to export");
    }

    #[tokio::test]
    async fn export_after_analysis_returns_csv() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = test_router(dir.path());
        let analyze = Request::builder()
            .method("POST")
            .uri("/api/analyze/text")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text":"I am so happy and glad"}"#))
            .expect("request");
        let (status, _) = send(app.clone(), analyze).await;
        assert_eq!(status, StatusCode::OK);

        let export = Request::builder()
            .uri("/api/export")
            .body(Body::empty())
            .expect("request");
        let (status, body) = send(app, export).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("happy"));
        assert_eq!(body.lines().count(), 2);
    }

    #[tokio::test]
    async fn blank_text_is_a_bad_request() {
        let dir = tempfile::tempdir().expect("tempdir");
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze/text")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text":"   "}"#))
            .expect("request");

        let (status, body) = send(test_router(dir.path()), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "text is required");
    }
}
