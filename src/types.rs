// ABOUTME: Type definitions for API requests and responses
// ABOUTME: Request fields are optional so missing ones surface as 400s, not framework 422s

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::entry;

// Profile directory types

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteProfileRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfilesResponse {
    pub profiles: Vec<String>,
}

// Diary entry types

#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub password: Option<String>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub body: Option<String>,
}

/// Partial patch over an entry's content fields. Absent fields are left alone.
#[derive(Debug, Default, Deserialize)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub date: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    pub password: Option<String>,
    pub id: Option<String>,
    pub updates: Option<EntryPatch>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteEntryRequest {
    pub password: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EntryView {
    pub id: Uuid,
    pub title: String,
    pub date: String,
    pub body: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<entry::Model> for EntryView {
    fn from(model: entry::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            date: model.date,
            body: model.body,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<EntryView>,
}

#[derive(Debug, Serialize)]
pub struct CreateEntryResponse {
    pub ok: bool,
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}
