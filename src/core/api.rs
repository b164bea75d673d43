//! HTTP API for World Tree
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /analyze - Analyze text without saving
//! - POST /entries - Save an entry and its analysis
//! - GET /suggestions - Ranked writing prompts
//! - GET /prompts - Behavioral prompts
//! - GET /trends - Trends across saved analyses
//! - POST /suggestions/used - Record a picked suggestion
//! - POST /behavior/{sleep,workout,music,location,screen} - Log a signal
//! - DELETE /behavior - Clear all behavioral logs

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use chrono::{Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::core::{
    AnalysisStore, BehavioralPromptGenerator, JsonStore, ReflectionService, SuggestionRanker,
};
use crate::error::StoreError;
use crate::types::{
    Analysis, Coordinates, JournalEntry, LocationRecord, MusicRecord, ScreenTimeRecord,
    SleepRecord, Suggestion, SuggestionType, TrendReport, WorkoutRecord,
};

/// App state
pub struct AppState {
    pub store: RwLock<JsonStore>,
    pub reflection: ReflectionService,
    pub ranker: SuggestionRanker,
    pub behavior: BehavioralPromptGenerator,
}

/// Analyze request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// New entry request
#[derive(Debug, Deserialize)]
pub struct NewEntryRequest {
    pub content: String,
    /// Defaults to the server's local time
    pub date: Option<NaiveDateTime>,
}

/// New entry response
#[derive(Debug, Serialize)]
pub struct NewEntryResponse {
    pub entry_id: String,
    pub analysis: Analysis,
}

/// Suggestion used request
#[derive(Debug, Deserialize)]
pub struct SuggestionUsedRequest {
    #[serde(rename = "type")]
    pub kind: SuggestionType,
}

/// Usage response
#[derive(Debug, Serialize)]
pub struct UsageResponse {
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub count: u32,
}

#[derive(Debug, Deserialize)]
pub struct SleepRequest {
    pub hours: f64,
    pub quality: Option<u8>,
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutRequest {
    pub workout_type: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub intensity: String,
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct MusicRequest {
    pub track: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub mood: String,
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub name: String,
    pub coordinates: Option<Coordinates>,
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct ScreenTimeRequest {
    pub hours: f64,
    #[serde(default)]
    pub app_categories: Vec<String>,
    pub timestamp: Option<NaiveDateTime>,
}

/// Behavior write response
#[derive(Debug, Serialize)]
pub struct BehaviorResponse {
    pub records: usize,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub entries: usize,
    pub analyses: usize,
}

/// Create the API router over an opened store
pub fn create_router(store: JsonStore) -> Router {
    let state = Arc::new(AppState {
        store: RwLock::new(store),
        reflection: ReflectionService::new(),
        ranker: SuggestionRanker::new(),
        behavior: BehavioralPromptGenerator::new(),
    });

    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/entries", post(add_entry))
        .route("/suggestions", get(suggestions))
        .route("/suggestions/used", post(suggestion_used))
        .route("/prompts", get(prompts))
        .route("/trends", get(trends))
        .route("/behavior", delete(clear_behavior))
        .route("/behavior/sleep", post(log_sleep))
        .route("/behavior/workout", post(log_workout))
        .route("/behavior/music", post(log_music))
        .route("/behavior/location", post(log_location))
        .route("/behavior/screen", post(log_screen_time))
        .with_state(state)
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn rng() -> StdRng {
    StdRng::from_entropy()
}

fn internal_error(err: StoreError) -> StatusCode {
    error!(error = %err, "store write failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store = state.store.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        entries: store.entries().len(),
        analyses: store.load_all().len(),
    })
}

/// Analyze text without saving
async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Json<Analysis> {
    Json(state.reflection.analyze(&req.text, now(), &mut rng()))
}

/// Save entry and analysis
async fn add_entry(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewEntryRequest>,
) -> Result<Json<NewEntryResponse>, StatusCode> {
    if req.content.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let date = req.date.unwrap_or_else(now);
    let analysis = state.reflection.analyze(&req.content, date, &mut rng());

    let mut store = state.store.write().await;
    let id = store
        .add_analyzed_entry(JournalEntry::new(date, req.content), analysis.clone())
        .map_err(internal_error)?;

    Ok(Json(NewEntryResponse {
        entry_id: id,
        analysis,
    }))
}

/// Ranked suggestions
async fn suggestions(State(state): State<Arc<AppState>>) -> Json<Vec<Suggestion>> {
    let store = state.store.read().await;
    Json(state.ranker.generate_suggestions(now(), &*store, &mut rng()))
}

/// Record suggestion usage
async fn suggestion_used(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SuggestionUsedRequest>,
) -> Result<Json<UsageResponse>, StatusCode> {
    let mut store = state.store.write().await;
    store.track_suggestion_used(req.kind).map_err(internal_error)?;
    Ok(Json(UsageResponse {
        kind: req.kind,
        count: store.usage().count(req.kind),
    }))
}

/// Behavioral prompts
async fn prompts(State(state): State<Arc<AppState>>) -> Json<Vec<Suggestion>> {
    let store = state.store.read().await;
    Json(state.behavior.generate_contextual_prompts(&*store, now()))
}

/// Trends across saved analyses
async fn trends(State(state): State<Arc<AppState>>) -> Json<TrendReport> {
    let store = state.store.read().await;
    Json(state.reflection.generate_trends(&*store))
}

async fn log_sleep(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SleepRequest>,
) -> Result<Json<BehaviorResponse>, StatusCode> {
    let record = SleepRecord {
        timestamp: req.timestamp.unwrap_or_else(now),
        hours: req.hours,
        quality: req.quality,
    };
    let mut store = state.store.write().await;
    store.update_behavior(|log| log.log_sleep(record)).map_err(internal_error)?;
    Ok(Json(BehaviorResponse { records: store.behavior().sleep().len() }))
}

async fn log_workout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WorkoutRequest>,
) -> Result<Json<BehaviorResponse>, StatusCode> {
    let record = WorkoutRecord {
        timestamp: req.timestamp.unwrap_or_else(now),
        workout_type: req.workout_type,
        duration_minutes: req.duration_minutes,
        intensity: req.intensity,
    };
    let mut store = state.store.write().await;
    store.update_behavior(|log| log.log_workout(record)).map_err(internal_error)?;
    Ok(Json(BehaviorResponse { records: store.behavior().workouts().len() }))
}

async fn log_music(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MusicRequest>,
) -> Result<Json<BehaviorResponse>, StatusCode> {
    let record = MusicRecord {
        timestamp: req.timestamp.unwrap_or_else(now),
        track: req.track,
        genre: req.genre,
        mood: req.mood,
    };
    let mut store = state.store.write().await;
    store.update_behavior(|log| log.log_music(record)).map_err(internal_error)?;
    Ok(Json(BehaviorResponse { records: store.behavior().music().len() }))
}

async fn log_location(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LocationRequest>,
) -> Result<Json<BehaviorResponse>, StatusCode> {
    let record = LocationRecord {
        timestamp: req.timestamp.unwrap_or_else(now),
        name: req.name,
        coordinates: req.coordinates,
    };
    let mut store = state.store.write().await;
    store.update_behavior(|log| log.log_location(record)).map_err(internal_error)?;
    Ok(Json(BehaviorResponse { records: store.behavior().locations().len() }))
}

async fn log_screen_time(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScreenTimeRequest>,
) -> Result<Json<BehaviorResponse>, StatusCode> {
    let record = ScreenTimeRecord {
        timestamp: req.timestamp.unwrap_or_else(now),
        hours: req.hours,
        app_categories: req.app_categories,
    };
    let mut store = state.store.write().await;
    store.update_behavior(|log| log.log_screen_time(record)).map_err(internal_error)?;
    Ok(Json(BehaviorResponse { records: store.behavior().screen_time().len() }))
}

/// Clear every behavioral series
async fn clear_behavior(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BehaviorResponse>, StatusCode> {
    let mut store = state.store.write().await;
    store.clear_behavior().map_err(internal_error)?;
    Ok(Json(BehaviorResponse { records: store.behavior().len() }))
}

/// Run the API server
pub async fn run_server(addr: &str, data_dir: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonStore::open(data_dir)?;
    let router = create_router(store);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, data_dir, "World Tree API listening");
    println!("🌳 World Tree API running on {}", addr);
    println!("  POST   /analyze            - Analyze text");
    println!("  POST   /entries            - Save entry + analysis");
    println!("  GET    /suggestions        - Writing prompts");
    println!("  GET    /prompts            - Behavioral prompts");
    println!("  GET    /trends             - Trends");
    println!("  POST   /suggestions/used   - Track suggestion");
    println!("  POST   /behavior/:kind     - Log sleep|workout|music|location|screen");
    println!("  DELETE /behavior           - Clear behavioral logs");
    println!("  GET    /health             - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
