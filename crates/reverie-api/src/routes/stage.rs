//! Routes driving the stage: snapshot reads and input commands.
//!
//! Commands are queued on the stage loop and answered with `202 Accepted`
//! before the loop applies them; poll `GET /` for the outcome.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{
    Json, Router,
    routing::{get, post},
};
use reverie_core::error::StageError;
use reverie_core::scene_id::SceneId;
use reverie_stage::{StageCommand, StageSnapshot, SurfaceView};
use reverie_transition::EffectHint;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct StageResponse {
    /// Scene, progress and score.
    pub stage: StageSnapshot,
    /// Mounted render tree with its current text.
    pub view: SurfaceView,
}

/// Request body for POST /scene.
#[derive(Debug, Deserialize)]
pub struct SceneRequest {
    /// The scene to show.
    pub scene_id: SceneId,
    /// `tiles`, `iris`, `none` or `auto` (the default).
    #[serde(default)]
    pub effect: EffectHint,
}

/// Response body returned once a command has been queued.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// Identifies the command in the server logs.
    pub correlation_id: Uuid,
}

type Accepted = (StatusCode, Json<CommandResponse>);

fn enqueue(state: &AppState, command: StageCommand) -> Result<Accepted, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, ?command, "queueing stage command");
    state.stage.send(command)?;
    Ok((StatusCode::ACCEPTED, Json(CommandResponse { correlation_id })))
}

/// GET /
async fn show(State(state): State<AppState>) -> Json<StageResponse> {
    let stage = state.snapshot.borrow().clone();
    Json(StageResponse {
        stage,
        view: state.surface.view(),
    })
}

/// POST /scene
#[instrument(skip(state, request), fields(scene_id = %request.scene_id))]
async fn request_scene(
    State(state): State<AppState>,
    Json(request): Json<SceneRequest>,
) -> Result<Accepted, ApiError> {
    if !state.snapshot.borrow().order.contains(&request.scene_id) {
        return Err(StageError::SceneNotFound(request.scene_id).into());
    }
    enqueue(
        &state,
        StageCommand::RequestScene {
            target: request.scene_id,
            hint: request.effect,
        },
    )
}

/// POST /primary
#[instrument(skip(state))]
async fn primary(State(state): State<AppState>) -> Result<Accepted, ApiError> {
    enqueue(&state, StageCommand::PrimaryAction)
}

/// POST /secondary
#[instrument(skip(state))]
async fn secondary(State(state): State<AppState>) -> Result<Accepted, ApiError> {
    enqueue(&state, StageCommand::SecondaryAction)
}

/// POST /tap
#[instrument(skip(state))]
async fn tap(State(state): State<AppState>) -> Result<Accepted, ApiError> {
    enqueue(&state, StageCommand::Tap)
}

/// POST /advance
#[instrument(skip(state))]
async fn advance(State(state): State<AppState>) -> Result<Accepted, ApiError> {
    enqueue(&state, StageCommand::Advance)
}

/// POST /retreat
#[instrument(skip(state))]
async fn retreat(State(state): State<AppState>) -> Result<Accepted, ApiError> {
    enqueue(&state, StageCommand::Retreat)
}

/// POST /reset
#[instrument(skip(state))]
async fn reset(State(state): State<AppState>) -> Result<Accepted, ApiError> {
    enqueue(&state, StageCommand::ResetProgress)
}

/// Returns the router for stage commands and reads.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(show))
        .route("/scene", post(request_scene))
        .route("/primary", post(primary))
        .route("/secondary", post(secondary))
        .route("/tap", post(tap))
        .route("/advance", post(advance))
        .route("/retreat", post(retreat))
        .route("/reset", post(reset))
}
