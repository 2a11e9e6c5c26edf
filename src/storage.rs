// ABOUTME: Database storage layer for profiles and diary entries
// ABOUTME: Every entry operation is scoped to one profile id; this layer does no password checks

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use crate::entities::{entry, profile};
use crate::error::{AppError, Result};
use crate::types::EntryPatch;

pub struct Storage {
    pub db: DatabaseConnection,
}

impl Storage {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let db = Database::connect(database_url).await?;
        crate::migration::Migrator::up(&db, None).await?;
        Ok(Self { db })
    }

    // ---- profile directory ----

    pub async fn create_profile(&self, name: &str, password_hash: &str) -> Result<profile::Model> {
        if self.get_profile(name).await?.is_some() {
            return Err(AppError::Conflict("Profile name already exists.".to_string()));
        }

        let model = profile::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(Utc::now().timestamp_millis()),
        };

        Ok(model.insert(&self.db).await?)
    }

    // Name matching is exact and case-sensitive
    pub async fn get_profile(&self, name: &str) -> Result<Option<profile::Model>> {
        Ok(profile::Entity::find()
            .filter(profile::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    /// List profile names in creation order. Password hashes stay in this layer.
    pub async fn list_profiles(&self) -> Result<Vec<String>> {
        let profiles = profile::Entity::find()
            .order_by_asc(profile::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(profiles.into_iter().map(|p| p.name).collect())
    }

    /// Remove a profile and purge its entries.
    ///
    /// The profile row goes first; the purge is best-effort on top of the
    /// schema-level cascade. A recreated name gets a fresh id, so rows left
    /// behind by a failed purge are unreachable through any listing.
    pub async fn delete_profile(&self, prof: profile::Model) -> Result<()> {
        let profile_id = prof.id;
        profile::Entity::delete_by_id(profile_id).exec(&self.db).await?;

        if let Err(err) = self.purge_entries(profile_id).await {
            tracing::warn!("entry purge for deleted profile {} failed: {}", profile_id, err);
        }

        Ok(())
    }

    // ---- diary entry store ----

    /// All entries for a profile, newest first.
    pub async fn list_entries(&self, profile_id: Uuid) -> Result<Vec<entry::Model>> {
        Ok(entry::Entity::find()
            .filter(entry::Column::ProfileId.eq(profile_id))
            .order_by_desc(entry::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    pub async fn create_entry(
        &self,
        profile_id: Uuid,
        title: &str,
        date: &str,
        body: &str,
    ) -> Result<entry::Model> {
        let now = Utc::now().timestamp_millis();
        let model = entry::ActiveModel {
            id: Set(Uuid::new_v4()),
            profile_id: Set(profile_id),
            title: Set(title.to_string()),
            date: Set(date.to_string()),
            body: Set(body.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(model.insert(&self.db).await?)
    }

    /// Apply a partial patch to one entry. Fields absent from the patch keep
    /// their prior values; `updated_at` is refreshed on every successful call.
    pub async fn update_entry(
        &self,
        profile_id: Uuid,
        id: Uuid,
        patch: EntryPatch,
    ) -> Result<entry::Model> {
        let existing = entry::Entity::find_by_id(id)
            .filter(entry::Column::ProfileId.eq(profile_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Entry not found.".to_string()))?;

        let mut active = existing.into_active_model();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(date) = patch.date {
            active.date = Set(date);
        }
        if let Some(body) = patch.body {
            active.body = Set(body);
        }
        active.updated_at = Set(Utc::now().timestamp_millis());

        Ok(active.update(&self.db).await?)
    }

    /// Delete one entry. A second delete of the same id reports NotFound.
    pub async fn delete_entry(&self, profile_id: Uuid, id: Uuid) -> Result<()> {
        let result = entry::Entity::delete_many()
            .filter(entry::Column::Id.eq(id))
            .filter(entry::Column::ProfileId.eq(profile_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Entry not found.".to_string()));
        }

        Ok(())
    }

    pub async fn purge_entries(&self, profile_id: Uuid) -> Result<u64> {
        let result = entry::Entity::delete_many()
            .filter(entry::Column::ProfileId.eq(profile_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
