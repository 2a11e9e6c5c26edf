// ABOUTME: Gateway handlers for the /profiles route group
// ABOUTME: Listing names is open; create derives a verifier, delete re-checks the password and cascades

use axum::{extract::State, Json};

use crate::error::{AppError, Result};
use crate::types::{CreateProfileRequest, DeleteProfileRequest, OkResponse, ProfilesResponse};
use crate::{password, AppState};

pub async fn list_profiles(State(state): State<AppState>) -> Result<Json<ProfilesResponse>> {
    let profiles = state.storage.list_profiles().await?;
    Ok(Json(ProfilesResponse { profiles }))
}

pub async fn create_profile(
    State(state): State<AppState>,
    Json(req): Json<CreateProfileRequest>,
) -> Result<Json<OkResponse>> {
    let (name, pass) = require_name_and_password(req.name.as_deref(), req.password.as_deref())?;

    let verifier = password::derive(pass)?;
    let created = state.storage.create_profile(name, &verifier).await?;
    tracing::info!("created profile {:?}", created.name);

    Ok(Json(OkResponse::new()))
}

pub async fn delete_profile(
    State(state): State<AppState>,
    Json(req): Json<DeleteProfileRequest>,
) -> Result<Json<OkResponse>> {
    let (name, pass) = require_name_and_password(req.name.as_deref(), req.password.as_deref())?;

    let profile = state
        .storage
        .get_profile(name)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found.".to_string()))?;

    if !password::check(pass, &profile.password_hash) {
        return Err(AppError::Unauthorized("Incorrect password.".to_string()));
    }

    tracing::info!("deleting profile {:?} and its entries", profile.name);
    state.storage.delete_profile(profile).await?;

    Ok(Json(OkResponse::new()))
}

fn require_name_and_password<'a>(
    name: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str)> {
    match (name, password) {
        (Some(name), Some(pass)) if !name.trim().is_empty() && !pass.is_empty() => {
            Ok((name, pass))
        }
        _ => Err(AppError::BadRequest("Name and password required.".to_string())),
    }
}
