// ABOUTME: Gateway handlers for the /diary/{profile} route group
// ABOUTME: Every verb re-verifies the profile password before touching the entry store

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::entities::profile;
use crate::error::{AppError, Result};
use crate::storage::Storage;
use crate::types::{
    CreateEntryRequest, CreateEntryResponse, DeleteEntryRequest, EntriesResponse, EntryView,
    ListEntriesQuery, OkResponse, UpdateEntryRequest,
};
use crate::{password, AppState};

pub async fn list_entries(
    Path(profile_name): Path<String>,
    Query(query): Query<ListEntriesQuery>,
    State(state): State<AppState>,
) -> Result<Json<EntriesResponse>> {
    let profile = authenticate(&state.storage, &profile_name, query.password.as_deref()).await?;

    let entries = state
        .storage
        .list_entries(profile.id)
        .await?
        .into_iter()
        .map(EntryView::from)
        .collect();

    Ok(Json(EntriesResponse { entries }))
}

pub async fn create_entry(
    Path(profile_name): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<CreateEntryRequest>,
) -> Result<Json<CreateEntryResponse>> {
    let (title, date, body) = match (
        non_empty(req.title.as_deref()),
        non_empty(req.date.as_deref()),
        non_empty(req.body.as_deref()),
    ) {
        (Some(title), Some(date), Some(body)) => (title, date, body),
        _ => {
            return Err(AppError::BadRequest(
                "password, title, date, body are required.".to_string(),
            ))
        }
    };

    let profile = authenticate(&state.storage, &profile_name, req.password.as_deref()).await?;
    let entry = state.storage.create_entry(profile.id, title, date, body).await?;
    tracing::debug!("created entry {} under profile {:?}", entry.id, profile.name);

    Ok(Json(CreateEntryResponse { ok: true, id: entry.id }))
}

pub async fn update_entry(
    Path(profile_name): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<UpdateEntryRequest>,
) -> Result<Json<OkResponse>> {
    let (id, updates) = match (req.id.as_deref(), req.updates) {
        (Some(id), Some(updates)) => (id, updates),
        _ => {
            return Err(AppError::BadRequest(
                "password, id and updates are required.".to_string(),
            ))
        }
    };
    let id = Uuid::parse_str(id)?;

    let profile = authenticate(&state.storage, &profile_name, req.password.as_deref()).await?;
    state.storage.update_entry(profile.id, id, updates).await?;

    Ok(Json(OkResponse::new()))
}

pub async fn delete_entry(
    Path(profile_name): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<DeleteEntryRequest>,
) -> Result<Json<OkResponse>> {
    let id = req
        .id
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("password and id are required.".to_string()))?;
    let id = Uuid::parse_str(id)?;

    let profile = authenticate(&state.storage, &profile_name, req.password.as_deref()).await?;
    state.storage.delete_entry(profile.id, id).await?;

    Ok(Json(OkResponse::new()))
}

/// The gateway check sequence shared by every diary operation: password
/// present, profile exists, password verifies. Order matters for the
/// resulting status codes (400, then 404, then 401).
async fn authenticate(
    storage: &Storage,
    profile_name: &str,
    password: Option<&str>,
) -> Result<profile::Model> {
    let candidate = password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("Password required.".to_string()))?;

    let profile = storage
        .get_profile(profile_name)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found.".to_string()))?;

    if !password::check(candidate, &profile.password_hash) {
        return Err(AppError::Unauthorized("Incorrect password.".to_string()));
    }

    Ok(profile)
}

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}
