//! Axum route handlers for the Screening API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::screening::record::CandidateRecord;
use crate::screening::registry::SharedSession;
use crate::screening::session::{Phase, Role, ScreeningSession, Turn};
use crate::screening::walker::Cursor;
use crate::state::AppState;
use crate::store::StoredRecord;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub reply: String,
    pub phase: Phase,
    pub done: bool,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub reply: String,
    pub phase: Phase,
    pub done: bool,
    /// True only on the turn that ended the session and persisted its record.
    pub saved: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionDetailResponse {
    pub session_id: Uuid,
    pub phase: Phase,
    pub done: bool,
    pub cursor: Cursor,
    pub history: Vec<Turn>,
    pub record: CandidateRecord,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Starts a conversation and returns the greeting, which already asks the first question.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), AppError> {
    let mut session = ScreeningSession::new(state.generator.clone(), state.config.llm_timeout);

    let greeting = session
        .greet()
        .await
        .map_err(|e| AppError::Llm(format!("Greeting failed: {e}")))?;
    session.append(Role::Assistant, greeting.clone());

    let phase = session.phase();
    let session_id = state.sessions.insert(session).await;
    info!(%session_id, "Screening session started");

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            reply: greeting,
            phase,
            done: false,
        }),
    ))
}

/// POST /api/v1/sessions/:id/messages
///
/// Runs one turn. The turn that ends the session also appends its record to the
/// store and discards the session. If the append fails the session is kept.
pub async fn handle_post_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let shared = find_session(&state, id).await?;
    let mut session = shared.lock().await;

    let was_done = session.done();
    session.append(Role::User, request.text.clone());
    let reply = session.step(&request.text).await;
    session.append(Role::Assistant, reply.clone());

    let mut saved = false;
    if !was_done && session.done() {
        let stored = StoredRecord::new(id, session.current_record());
        if let Err(source) = state.store.append(&stored).await {
            return Err(AppError::Storage { reply, source });
        }
        saved = true;
        info!(session_id = %id, "Screening record saved");
    }

    let response = MessageResponse {
        reply,
        phase: session.phase(),
        done: session.done(),
        saved,
    };

    // A saved session has nothing left to do; drop it from the registry.
    if saved {
        drop(session);
        state.sessions.remove(id).await;
    }

    Ok(Json(response))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionDetailResponse>, AppError> {
    let shared = find_session(&state, id).await?;
    let session = shared.lock().await;

    Ok(Json(SessionDetailResponse {
        session_id: id,
        phase: session.phase(),
        done: session.done(),
        cursor: session.cursor().clone(),
        history: session.history().to_vec(),
        record: session.current_record(),
    }))
}

/// DELETE /api/v1/sessions/:id
///
/// Discards the conversation so the candidate can start over.
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }
    info!(session_id = %id, "Screening session discarded");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_session(state: &AppState, id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}
