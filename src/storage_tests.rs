// ABOUTME: Tests for the storage layer
// ABOUTME: Covers profile directory operations, entry CRUD, ordering, isolation, and cascade deletes

#[cfg(test)]
mod tests {
    use super::super::storage::Storage;
    use super::super::types::EntryPatch;
    use crate::error::AppError;
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;
    use tempfile::TempDir;
    use uuid::Uuid;

    async fn create_test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
        let db = Database::connect(&db_url).await.unwrap();

        crate::migration::Migrator::up(&db, None).await.unwrap();

        (Storage { db }, temp_dir)
    }

    #[tokio::test]
    async fn test_profile_create_and_get() {
        let (storage, _temp_dir) = create_test_storage().await;

        let created = storage.create_profile("Alice", "hash-a").await.unwrap();
        assert_eq!(created.name, "Alice");

        let fetched = storage.get_profile("Alice").await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.password_hash, "hash-a");
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_profile_name_is_case_sensitive() {
        let (storage, _temp_dir) = create_test_storage().await;

        storage.create_profile("Alice", "hash-a").await.unwrap();

        assert!(storage.get_profile("alice").await.unwrap().is_none());
        // Different case is a different profile, not a conflict
        storage.create_profile("alice", "hash-b").await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_profile_name_is_conflict() {
        let (storage, _temp_dir) = create_test_storage().await;

        storage.create_profile("Alice", "hash-a").await.unwrap();
        let err = storage.create_profile("Alice", "hash-b").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_profiles_in_creation_order() {
        let (storage, _temp_dir) = create_test_storage().await;

        for name in ["first", "second", "third"] {
            storage.create_profile(name, "hash").await.unwrap();
            // Small delay to ensure distinct creation timestamps
            tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        }

        let names = storage.list_profiles().await.unwrap();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_entry_round_trip() {
        let (storage, _temp_dir) = create_test_storage().await;

        let profile = storage.create_profile("Alice", "hash").await.unwrap();
        let created = storage
            .create_entry(profile.id, "Day 1", "2025-01-01", "hello")
            .await
            .unwrap();
        assert_eq!(created.created_at, created.updated_at);

        let entries = storage.list_entries(profile.id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, created.id);
        assert_eq!(entries[0].title, "Day 1");
        assert_eq!(entries[0].date, "2025-01-01");
        assert_eq!(entries[0].body, "hello");
    }

    #[tokio::test]
    async fn test_entries_listed_newest_first() {
        let (storage, _temp_dir) = create_test_storage().await;

        let profile = storage.create_profile("Alice", "hash").await.unwrap();
        for i in 1..=3 {
            storage
                .create_entry(profile.id, &format!("entry {}", i), "2025-01-01", "text")
                .await
                .unwrap();
            tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        }

        let entries = storage.list_entries(profile.id).await.unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["entry 3", "entry 2", "entry 1"]);
    }

    #[tokio::test]
    async fn test_list_entries_empty_profile_is_not_an_error() {
        let (storage, _temp_dir) = create_test_storage().await;

        let profile = storage.create_profile("Alice", "hash").await.unwrap();
        let entries = storage.list_entries(profile.id).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_partial_update_touches_only_patched_fields() {
        let (storage, _temp_dir) = create_test_storage().await;

        let profile = storage.create_profile("Alice", "hash").await.unwrap();
        let created = storage
            .create_entry(profile.id, "old title", "2025-01-01", "old body")
            .await
            .unwrap();

        // Ensure the refreshed updated_at lands on a later timestamp
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        let patch = EntryPatch {
            title: Some("new title".to_string()),
            ..Default::default()
        };
        let updated = storage.update_entry(profile.id, created.id, patch).await.unwrap();

        assert_eq!(updated.title, "new title");
        assert_eq!(updated.date, "2025-01-01");
        assert_eq!(updated.body, "old body");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_entry_is_not_found() {
        let (storage, _temp_dir) = create_test_storage().await;

        let profile = storage.create_profile("Alice", "hash").await.unwrap();
        let err = storage
            .update_entry(profile.id, Uuid::new_v4(), EntryPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_is_scoped_to_the_owning_profile() {
        let (storage, _temp_dir) = create_test_storage().await;

        let alice = storage.create_profile("Alice", "hash-a").await.unwrap();
        let bob = storage.create_profile("Bob", "hash-b").await.unwrap();
        let entry = storage
            .create_entry(alice.id, "private", "2025-01-01", "text")
            .await
            .unwrap();

        let patch = EntryPatch {
            title: Some("hijacked".to_string()),
            ..Default::default()
        };
        let err = storage.update_entry(bob.id, entry.id, patch).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let entries = storage.list_entries(alice.id).await.unwrap();
        assert_eq!(entries[0].title, "private");
    }

    #[tokio::test]
    async fn test_delete_entry_is_idempotent_by_not_found() {
        let (storage, _temp_dir) = create_test_storage().await;

        let profile = storage.create_profile("Alice", "hash").await.unwrap();
        let entry = storage
            .create_entry(profile.id, "Day 1", "2025-01-01", "hello")
            .await
            .unwrap();

        storage.delete_entry(profile.id, entry.id).await.unwrap();
        let err = storage.delete_entry(profile.id, entry.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_entries_are_isolated_between_profiles() {
        let (storage, _temp_dir) = create_test_storage().await;

        let alice = storage.create_profile("Alice", "hash-a").await.unwrap();
        let bob = storage.create_profile("Bob", "hash-b").await.unwrap();

        storage
            .create_entry(alice.id, "alice only", "2025-01-01", "secret")
            .await
            .unwrap();

        let bob_entries = storage.list_entries(bob.id).await.unwrap();
        assert!(bob_entries.is_empty());

        let err = storage
            .delete_entry(bob.id, storage.list_entries(alice.id).await.unwrap()[0].id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_profile_purges_its_entries() {
        let (storage, _temp_dir) = create_test_storage().await;

        let profile = storage.create_profile("Alice", "hash").await.unwrap();
        let profile_id = profile.id;
        for i in 1..=3 {
            storage
                .create_entry(profile_id, &format!("entry {}", i), "2025-01-01", "text")
                .await
                .unwrap();
        }

        storage.delete_profile(profile).await.unwrap();

        assert!(storage.get_profile("Alice").await.unwrap().is_none());
        assert!(storage.list_entries(profile_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recreated_profile_starts_empty() {
        let (storage, _temp_dir) = create_test_storage().await;

        let profile = storage.create_profile("Alice", "hash").await.unwrap();
        storage
            .create_entry(profile.id, "old life", "2025-01-01", "text")
            .await
            .unwrap();
        storage.delete_profile(profile).await.unwrap();

        // Same name, fresh id: the old entries must not resurface
        let recreated = storage.create_profile("Alice", "hash2").await.unwrap();
        assert!(storage.list_entries(recreated.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_purge_entries_reports_row_count() {
        let (storage, _temp_dir) = create_test_storage().await;

        let profile = storage.create_profile("Alice", "hash").await.unwrap();
        for _ in 0..2 {
            storage
                .create_entry(profile.id, "t", "2025-01-01", "b")
                .await
                .unwrap();
        }

        assert_eq!(storage.purge_entries(profile.id).await.unwrap(), 2);
        assert_eq!(storage.purge_entries(profile.id).await.unwrap(), 0);
    }
}
