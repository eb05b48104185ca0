//! Integration tests for the profile lifecycle over the JSON file store.
//!
//! Each test works in its own temporary directory, so the on-disk document is
//! exactly what a previous session would have left behind.

#![allow(clippy::unwrap_used)]

use shopeasy_integration_tests::{profile_document, temp_file_store};
use shopeasy_storefront::profile::{
    DEFAULT_PROFILE_KEY, ProfileField, ProfileManager, ProfileMode,
};
use shopeasy_storefront::storage::{JsonFileStore, KeyValueStore};

// ============================================================================
// First Run
// ============================================================================

#[tokio::test]
async fn test_new_user_starts_in_edit_mode() {
    let (_dir, store) = temp_file_store();
    let mut manager = ProfileManager::new(store);

    assert_eq!(manager.load().await.unwrap(), ProfileMode::Editing);
    let draft = manager.profile().unwrap();
    assert!(!draft.uid().is_empty());
    assert!(draft.uid().as_str().starts_with("user_"));
    assert_eq!(draft.first_name(), "");
    assert_eq!(draft.email(), "");
    assert!(draft.created_at().is_some());
    assert!(!manager.is_persisted());

    // Nothing is written until the first save
    assert!(!manager.store().path().exists());
}

#[tokio::test]
async fn test_save_then_reopen_round_trips() {
    let (dir, store) = temp_file_store();
    let mut manager = ProfileManager::new(store);
    manager.load().await.unwrap();
    manager.update_field(ProfileField::FirstName, "Jane").unwrap();
    manager.update_field(ProfileField::LastName, "Doe").unwrap();
    manager
        .update_field(ProfileField::Email, "jane@example.com")
        .unwrap();
    let saved = manager.save().await.unwrap().clone();
    assert_eq!(manager.mode(), ProfileMode::Loaded);
    assert!(saved.updated_at() >= saved.created_at());

    // A later session over the same directory
    let mut reopened = ProfileManager::new(JsonFileStore::in_dir(dir.path()));
    assert_eq!(reopened.load().await.unwrap(), ProfileMode::Loaded);
    assert_eq!(reopened.profile(), Some(&saved));
    assert_eq!(reopened.initials(), "JD");
}

#[tokio::test]
async fn test_stored_document_uses_camel_case_keys() {
    let (_dir, store) = temp_file_store();
    let mut manager = ProfileManager::new(store);
    manager.load().await.unwrap();
    manager.update_field(ProfileField::FirstName, "Jane").unwrap();
    manager.update_field(ProfileField::LastName, "Doe").unwrap();
    manager
        .update_field(ProfileField::Email, "jane@example.com")
        .unwrap();
    manager.save().await.unwrap();

    let raw = manager.store().get(DEFAULT_PROFILE_KEY).await.unwrap().unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["firstName"], "Jane");
    assert_eq!(doc["phoneNumber"], "");
    assert!(doc["updatedAt"].as_str().unwrap().ends_with('Z'));
}

// ============================================================================
// Editing an Existing Profile
// ============================================================================

#[tokio::test]
async fn test_invalid_email_leaves_stored_document_unchanged() {
    let (_dir, store) = temp_file_store();
    let original = profile_document("user_1_abc", "Jane", "Doe", "jane@example.com");
    store
        .set(DEFAULT_PROFILE_KEY, original.clone())
        .await
        .unwrap();

    let mut manager = ProfileManager::new(store);
    assert_eq!(manager.load().await.unwrap(), ProfileMode::Loaded);
    manager.begin_edit().unwrap();
    manager.update_field(ProfileField::Email, "bad").unwrap();

    let err = manager.save().await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(manager.mode(), ProfileMode::Editing);
    assert_eq!(manager.profile().unwrap().email(), "bad");

    let stored = manager.store().get(DEFAULT_PROFILE_KEY).await.unwrap();
    assert_eq!(stored, Some(original));
}

#[tokio::test]
async fn test_edit_keeps_unrecognised_timestamp_and_keys() {
    let (_dir, store) = temp_file_store();
    let original = r#"{"uid":"user_1_abc","firstName":"Jane","lastName":"Doe","email":"jane@example.com","phoneNumber":"","createdAt":"2024-01-15 10:30:00","updatedAt":"","loyaltyTier":"gold"}"#;
    store
        .set(DEFAULT_PROFILE_KEY, original.to_string())
        .await
        .unwrap();

    let mut manager = ProfileManager::new(store);
    assert_eq!(manager.load().await.unwrap(), ProfileMode::Loaded);
    manager.begin_edit().unwrap();
    manager.update_field(ProfileField::PhoneNumber, "555-0100").unwrap();
    manager.save().await.unwrap();

    let raw = manager.store().get(DEFAULT_PROFILE_KEY).await.unwrap().unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["createdAt"], "2024-01-15 10:30:00");
    assert_eq!(doc["loyaltyTier"], "gold");
    assert_eq!(doc["phoneNumber"], "555-0100");
    assert!(doc["updatedAt"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_cancel_restores_stored_values() {
    let (_dir, store) = temp_file_store();
    store
        .set(
            DEFAULT_PROFILE_KEY,
            profile_document("user_1_abc", "Jane", "Doe", "jane@example.com"),
        )
        .await
        .unwrap();

    let mut manager = ProfileManager::new(store);
    manager.load().await.unwrap();
    manager.begin_edit().unwrap();
    manager.update_field(ProfileField::FirstName, "").unwrap();

    assert_eq!(manager.cancel_edit().await.unwrap(), ProfileMode::Loaded);
    let profile = manager.profile().unwrap();
    assert_eq!(profile.first_name(), "Jane");
    assert_eq!(profile.uid().as_str(), "user_1_abc");
}

#[tokio::test]
async fn test_corrupt_file_starts_a_new_profile_but_is_not_overwritten() {
    let (_dir, store) = temp_file_store();
    tokio::fs::write(store.path(), "{ not json").await.unwrap();

    let mut manager = ProfileManager::new(store);
    assert_eq!(manager.load().await.unwrap(), ProfileMode::Editing);
    manager.update_field(ProfileField::FirstName, "Jane").unwrap();
    manager.update_field(ProfileField::LastName, "Doe").unwrap();
    manager
        .update_field(ProfileField::Email, "jane@example.com")
        .unwrap();

    // The file may hold other keys, so the write is refused rather than
    // replacing the whole document
    let err = manager.save().await.unwrap_err();
    assert!(!err.is_validation());
    assert_eq!(manager.mode(), ProfileMode::Editing);
    assert_eq!(manager.profile().unwrap().first_name(), "Jane");

    let raw = tokio::fs::read_to_string(manager.store().path()).await.unwrap();
    assert_eq!(raw, "{ not json");
}

#[tokio::test]
async fn test_custom_key_is_isolated() {
    let (dir, store) = temp_file_store();
    store
        .set(
            DEFAULT_PROFILE_KEY,
            profile_document("user_1_abc", "Jane", "Doe", "jane@example.com"),
        )
        .await
        .unwrap();

    let mut manager =
        ProfileManager::with_key(JsonFileStore::in_dir(dir.path()), "guestProfile");
    assert_eq!(manager.load().await.unwrap(), ProfileMode::Editing);
    manager.update_field(ProfileField::FirstName, "Guest").unwrap();
    manager.update_field(ProfileField::LastName, "User").unwrap();
    manager
        .update_field(ProfileField::Email, "guest@example.com")
        .unwrap();
    manager.save().await.unwrap();

    // The default key still holds the original profile
    let mut default = ProfileManager::new(JsonFileStore::in_dir(dir.path()));
    default.load().await.unwrap();
    assert_eq!(default.profile().unwrap().first_name(), "Jane");
}
