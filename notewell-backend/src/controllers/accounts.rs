//! Account endpoints: signup and login.

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::auth;
use crate::error::{ApiError, ApiResult};
use crate::models::{is_valid_email, LoginRequest, SignupRequest};
use crate::AppState;

/// Register a user. Email shape is checked first, then the email and
/// username duplicate probes, in that order.
async fn signup(
    data: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    if !is_valid_email(&body.email) {
        return Err(ApiError::InvalidInput("Invalid email format".to_string()));
    }
    if data.db.email_exists(&body.email)? {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }
    if data.db.username_exists(&body.username)? {
        return Err(ApiError::Conflict("Username already exists".to_string()));
    }

    let user = data
        .db
        .create_user(&body.username, &body.email, &body.credential)?;
    log::info!("New signup: {} (user id {})", user.username, user.id);

    Ok(HttpResponse::Created().json(json!({ "message": "Signup successful" })))
}

async fn login(
    data: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let user = auth::authenticate(
        &data.db,
        data.verifier.as_ref(),
        &body.username,
        &body.credential,
    )?;
    let token = data.token_signer.issue(&user.username);

    log::info!("Login: {}", user.username);

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Login successful: Logged in as {}", user.username),
        "token": token
    })))
}

async fn signup_info() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "This endpoint only accepts POST requests for signup"
    }))
}

async fn login_info() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "This endpoint only accepts POST requests for login"
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/signup")
            .route(web::post().to(signup))
            .route(web::get().to(signup_info)),
    );
    cfg.service(
        web::resource("/login")
            .route(web::post().to(login))
            .route(web::get().to(login_info)),
    );
}
