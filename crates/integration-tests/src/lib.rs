//! Integration tests for `ShopEasy`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopeasy-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `profile_lifecycle` - Profile load/edit/save against the JSON file store
//! - `cart_ledger` - Cart scenarios over the sample catalog
//! - `reveal_sequence` - Reveal timing and teardown on a paused clock
//!
//! Nothing here needs a running service; file-backed tests use a fresh
//! temporary directory each.

use shopeasy_storefront::storage::JsonFileStore;
use tempfile::TempDir;

/// A JSON file store in a fresh temporary directory.
///
/// Keep the returned [`TempDir`] alive for as long as the store is used.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
#[must_use]
pub fn temp_file_store() -> (TempDir, JsonFileStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = JsonFileStore::in_dir(dir.path());
    (dir, store)
}

/// A stored profile document in the on-disk format.
#[must_use]
pub fn profile_document(uid: &str, first: &str, last: &str, email: &str) -> String {
    serde_json::json!({
        "uid": uid,
        "firstName": first,
        "lastName": last,
        "email": email,
        "phoneNumber": "",
        "createdAt": "2024-01-15T10:30:00.000Z",
        "updatedAt": "2024-01-15T10:30:00.000Z",
    })
    .to_string()
}
