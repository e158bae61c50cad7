//! HTTP + WebSocket API around a single meter
//!
//! Endpoints:
//! - GET  /health             - Health check
//! - GET  /meter              - Current status
//! - POST /meter/message      - Score a chat message
//! - POST /meter/interaction  - Interaction-type update
//! - POST /meter/reset        - Reset or set the level
//! - GET  /meter/history      - Recent releases
//! - GET  /meter/stats        - Release statistics
//! - PUT  /meter/lexicons     - Replace lexicons
//! - POST /meter/save         - Persist to the state file
//! - WS   /ws                 - Live update results
//!
//! Every mutation holds the write lock for its whole read-modify-write.

use axum::{
    extract::{Query, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{error, info};

use crate::core::{EmotionalMeter, Lexicon};
use crate::types::{MeterStatus, ReleaseEvent, ReleaseStats, UpdateResult};

/// Recent releases returned when no limit is given
const DEFAULT_HISTORY_LIMIT: usize = 10;

/// App state
pub struct AppState {
    pub meter: RwLock<EmotionalMeter>,
    pub state_file: Option<PathBuf>,
    pub update_tx: broadcast::Sender<UpdateResult>,
}

/// Score message request
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

/// Interaction request
#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    pub kind: String,
    pub intensity: Option<f64>,
}

/// Reset target: "balanced" | "lust" | "work" | a level
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ResetTarget {
    Level(f64),
    Named(String),
}

/// Reset request
#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub target: ResetTarget,
}

/// Lexicon replacement request, missing tables are kept
#[derive(Debug, Deserialize)]
pub struct LexiconRequest {
    pub lust_words: Option<Lexicon>,
    pub work_words: Option<Lexicon>,
}

/// History query
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub level: f64,
}

/// Save response
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub path: String,
}

/// Create the API router
pub fn create_router(meter: EmotionalMeter, state_file: Option<PathBuf>) -> Router {
    let (tx, _) = broadcast::channel(100);
    let state = Arc::new(AppState {
        meter: RwLock::new(meter),
        state_file,
        update_tx: tx,
    });

    Router::new()
        .route("/health", get(health))
        .route("/meter", get(get_status))
        .route("/meter/message", post(post_message))
        .route("/meter/interaction", post(post_interaction))
        .route("/meter/reset", post(post_reset))
        .route("/meter/history", get(get_history))
        .route("/meter/stats", get(get_stats))
        .route("/meter/lexicons", put(put_lexicons))
        .route("/meter/save", post(post_save))
        .route("/ws", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let meter = state.meter.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        level: meter.level(),
    })
}

/// Current status
async fn get_status(State(state): State<Arc<AppState>>) -> Json<MeterStatus> {
    Json(state.meter.read().await.status())
}

/// Score a chat message
async fn post_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MessageRequest>,
) -> Json<UpdateResult> {
    let result = state.meter.write().await.update_with_message(&req.message);
    let _ = state.update_tx.send(result.clone());
    Json(result)
}

/// Interaction-type update
async fn post_interaction(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InteractionRequest>,
) -> Json<UpdateResult> {
    let result = state
        .meter
        .write()
        .await
        .update_with_interaction_label(&req.kind, req.intensity);
    let _ = state.update_tx.send(result.clone());
    Json(result)
}

/// Reset or set the level
async fn post_reset(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetRequest>,
) -> Result<Json<MeterStatus>, StatusCode> {
    let mut meter = state.meter.write().await;
    let result = match req.target {
        ResetTarget::Level(level) => meter.set_level(level),
        ResetTarget::Named(name) => match name.to_lowercase().as_str() {
            "balanced" => meter.reset(),
            "lust" => meter.reset_to_lust(),
            "work" => meter.reset_to_work(),
            _ => return Err(StatusCode::BAD_REQUEST),
        },
    };
    let _ = state.update_tx.send(result);
    Ok(Json(meter.status()))
}

/// Recent releases, oldest first
async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<ReleaseEvent>> {
    let meter = state.meter.read().await;
    Json(meter.recent_releases(query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT)))
}

/// Release statistics
async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ReleaseStats> {
    Json(state.meter.read().await.release_stats())
}

/// Replace one or both lexicons
async fn put_lexicons(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LexiconRequest>,
) -> StatusCode {
    let mut meter = state.meter.write().await;
    let outcome = match (req.lust_words, req.work_words) {
        (Some(lust), Some(work)) => meter.set_lexicons(lust, work),
        (Some(lust), None) => meter.set_lust_words(lust),
        (None, Some(work)) => meter.set_work_words(work),
        (None, None) => Ok(()),
    };

    match outcome {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(e) => {
            info!("rejected lexicon update: {}", e);
            StatusCode::BAD_REQUEST
        }
    }
}

/// Persist the meter to the configured state file
async fn post_save(State(state): State<Arc<AppState>>) -> Result<Json<SaveResponse>, StatusCode> {
    let path = state.state_file.as_ref().ok_or(StatusCode::CONFLICT)?;
    let meter = state.meter.read().await;

    meter.save_state(path).map_err(|e| {
        error!("save failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(SaveResponse {
        path: path.display().to_string(),
    }))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let rx = state.update_tx.subscribe();
    ws.on_upgrade(move |socket| handle_websocket(socket, rx))
}

/// Forward update results until either side goes away
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<UpdateResult>) {
    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        while let Ok(update) = rx.recv().await {
            let json = serde_json::to_string(&update).unwrap_or_default();
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
}

/// Run the API server
pub async fn run_server(
    addr: &str,
    meter: EmotionalMeter,
    state_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(meter, state_file);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Luna meter API running on {}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}
