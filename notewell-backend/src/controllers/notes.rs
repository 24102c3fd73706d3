//! Note endpoints: create, read, update, version history, and sharing.
//!
//! Every handler runs the same ladder: establish the caller (401), load the
//! note (404), check access (403), then apply.

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::access;
use crate::auth;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    CreateNoteRequest, ReadAuthRequest, ShareNoteRequest, UpdateNoteRequest, User,
};
use crate::AppState;

/// Resolve the caller on GET endpoints: a bearer token from /login, or
/// credentials in the request body. A present-but-invalid token fails the
/// request rather than falling through to the body.
fn identify_reader(
    data: &web::Data<AppState>,
    req: &HttpRequest,
    body: Option<&ReadAuthRequest>,
) -> Result<User, ApiError> {
    let bearer = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.trim_start_matches("Bearer ").to_string());

    if let Some(token) = bearer {
        let claims = data
            .token_signer
            .verify(&token)
            .ok_or_else(|| ApiError::Unauthenticated("Invalid or expired token".to_string()))?;
        return data
            .db
            .get_user_by_username(&claims.sub)?
            .ok_or_else(|| ApiError::Unauthenticated("Invalid or expired token".to_string()));
    }

    match body {
        Some(creds) => auth::authenticate(
            &data.db,
            data.verifier.as_ref(),
            &creds.username,
            &creds.credential,
        ),
        None => Err(ApiError::Unauthenticated(
            "No credentials provided".to_string(),
        )),
    }
}

#[derive(Debug, Serialize)]
struct NoteResponse {
    note_id: i64,
    content: String,
}

#[derive(Debug, Serialize)]
struct VersionEntryResponse {
    version_id: i64,
    content: String,
    modified_date: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct VersionHistoryResponse {
    note_id: i64,
    version_history: Vec<VersionEntryResponse>,
}

async fn create_note(
    data: web::Data<AppState>,
    body: web::Json<CreateNoteRequest>,
) -> ApiResult<HttpResponse> {
    let user = auth::authenticate(
        &data.db,
        data.verifier.as_ref(),
        &body.username,
        &body.credential,
    )?;

    let note = data.db.create_note(user.id, &body.content)?;
    log::info!("User {} created note {}", user.username, note.id);

    Ok(HttpResponse::Created().json(json!({
        "message": "Note created successfully",
        "note_id": note.id
    })))
}

async fn get_note(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: Option<web::Json<ReadAuthRequest>>,
) -> ApiResult<HttpResponse> {
    let user = identify_reader(&data, &req, body.as_deref())?;
    let note_id = path.into_inner();

    let note = data
        .db
        .get_note(note_id)?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    let access = access::evaluate(&note, &user, data.db.share_exists(note.id, user.id)?);
    if !access.can_read() {
        return Err(ApiError::Unauthorized(
            "You are not authorised to view this note".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(NoteResponse {
        note_id: note.id,
        content: note.content,
    }))
}

async fn update_note(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateNoteRequest>,
) -> ApiResult<HttpResponse> {
    let user = auth::authenticate(
        &data.db,
        data.verifier.as_ref(),
        &body.username,
        &body.credential,
    )?;
    let note_id = path.into_inner();

    let note = data
        .db
        .get_note(note_id)?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    let access = access::evaluate(&note, &user, data.db.share_exists(note.id, user.id)?);
    if !access.can_write() {
        return Err(ApiError::Unauthorized(
            "You are not authorized to update this note".to_string(),
        ));
    }

    data.db.update_note(note.id, &body.content)?;
    log::info!("User {} updated note {}", user.username, note.id);

    Ok(HttpResponse::Ok().json(json!({ "message": "Note updated successfully" })))
}

/// History is gated on authentication and note existence only; the note's
/// read access does not apply here.
async fn version_history(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: Option<web::Json<ReadAuthRequest>>,
) -> ApiResult<HttpResponse> {
    let user = identify_reader(&data, &req, body.as_deref())?;
    let note_id = path.into_inner();

    if data.db.get_note(note_id)?.is_none() {
        return Err(ApiError::NotFound(
            "No notes found for the given ID".to_string(),
        ));
    }

    let versions = data.db.get_version_history(note_id)?;
    log::debug!(
        "User {} viewed {} history entries for note {}",
        user.username,
        versions.len(),
        note_id
    );

    let version_history = versions
        .into_iter()
        .map(|v| VersionEntryResponse {
            version_id: v.id,
            content: v.content,
            modified_date: v.recorded_at,
        })
        .collect();

    Ok(HttpResponse::Ok().json(VersionHistoryResponse {
        note_id,
        version_history,
    }))
}

async fn share_note(
    data: web::Data<AppState>,
    body: web::Json<ShareNoteRequest>,
) -> ApiResult<HttpResponse> {
    let user = auth::authenticate(
        &data.db,
        data.verifier.as_ref(),
        &body.username,
        &body.credential,
    )?;

    let note = data
        .db
        .get_note(body.note_id)?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    // Only the owner grants access; grantees cannot re-share
    if !access::is_owner(&note, &user) {
        return Err(ApiError::Unauthorized(
            "Unauthorized to share this note".to_string(),
        ));
    }

    let grantee = data
        .db
        .get_user_by_id(body.shared_with_user_id)?
        .ok_or_else(|| {
            ApiError::NotFound(format!("User with ID {} not found", body.shared_with_user_id))
        })?;

    data.db.create_share(note.id, user.id, grantee.id)?;
    log::info!(
        "User {} shared note {} with user {}",
        user.username,
        note.id,
        grantee.id
    );

    Ok(HttpResponse::Created().json(json!({ "message": "Note shared successfully" })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notes")
            .route("/create", web::post().to(create_note))
            .route("/share", web::post().to(share_note))
            .route("/version-history/{note_id}", web::get().to(version_history))
            .route("/{note_id}", web::get().to(get_note))
            .route("/{note_id}", web::put().to(update_note)),
    );
}
