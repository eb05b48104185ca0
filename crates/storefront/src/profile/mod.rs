//! Profile load/edit/save lifecycle.
//!
//! [`ProfileManager`] owns the canonical profile and the edit draft and is the
//! only way to change either. The lifecycle is:
//!
//! ```text
//! Loading ──found──▶ Loaded ──begin_edit──▶ Editing ──save──▶ Loaded
//!    │                                        │   ▲
//!    └──absent/unreadable──▶ Editing (new)    └───┴── cancel_edit (reload)
//! ```
//!
//! Storage is touched only by [`ProfileManager::load`], [`ProfileManager::save`]
//! and [`ProfileManager::cancel_edit`]. Every transition takes `&mut self`, so
//! at most one storage call for the profile key is ever in flight.

use core::fmt;

use tracing::{info, instrument, warn};

use shopeasy_core::{Email, ProfileUid, text};

use crate::storage::KeyValueStore;

mod error;
mod model;

pub use error::{PersistenceError, ProfileError, ValidationError};
pub use model::{Profile, ProfileField};

/// Key the profile document is stored under.
pub const DEFAULT_PROFILE_KEY: &str = "userProfile";

/// Where the manager is in the profile lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileMode {
    /// Waiting on the initial (or cancel-triggered) read.
    Loading,
    /// Showing the canonical profile read-only.
    Loaded,
    /// Editing a draft.
    Editing,
}

impl fmt::Display for ProfileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Loading => "loading",
            Self::Loaded => "viewing",
            Self::Editing => "editing",
        })
    }
}

/// Result of reading the stored document.
enum StoredRead {
    Found(Profile),
    Absent,
    Failed,
}

/// Owns a user's profile and drives its lifecycle against a [`KeyValueStore`].
pub struct ProfileManager<S> {
    store: S,
    key: String,
    mode: ProfileMode,
    profile: Option<Profile>,
    draft: Option<Profile>,
    persisted: bool,
}

impl<S: KeyValueStore> ProfileManager<S> {
    /// Create a manager over `store` using [`DEFAULT_PROFILE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_PROFILE_KEY)
    }

    /// Create a manager over `store` that keeps the profile under `key`.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            mode: ProfileMode::Loading,
            profile: None,
            draft: None,
            persisted: false,
        }
    }

    /// Current lifecycle mode.
    pub const fn mode(&self) -> ProfileMode {
        self.mode
    }

    /// The profile to display: the draft while editing, otherwise the
    /// canonical profile. `None` until the first load completes.
    pub fn profile(&self) -> Option<&Profile> {
        match self.mode {
            ProfileMode::Editing => self.draft.as_ref(),
            ProfileMode::Loaded => self.profile.as_ref(),
            ProfileMode::Loading => None,
        }
    }

    /// The edit draft, if editing.
    pub const fn draft(&self) -> Option<&Profile> {
        self.draft.as_ref()
    }

    /// Whether the canonical profile exists in the store.
    pub const fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Avatar initials of the displayed profile.
    pub fn initials(&self) -> String {
        self.profile().map(Profile::initials).unwrap_or_default()
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Read the stored profile, or start a new one.
    ///
    /// A stored, readable document moves the manager to
    /// [`ProfileMode::Loaded`]. Otherwise a blank profile with a fresh uid is
    /// created and the manager goes straight to [`ProfileMode::Editing`].
    /// Read failures are logged and treated like a missing document.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidTransition`] unless the manager is in
    /// [`ProfileMode::Loading`].
    pub async fn load(&mut self) -> Result<ProfileMode, ProfileError> {
        self.require(ProfileMode::Loading, "load")?;
        Ok(self.reload().await)
    }

    /// Start editing the loaded profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidTransition`] unless the manager is in
    /// [`ProfileMode::Loaded`].
    pub fn begin_edit(&mut self) -> Result<(), ProfileError> {
        self.require(ProfileMode::Loaded, "edit")?;
        self.draft = self.profile.clone();
        self.mode = ProfileMode::Editing;
        Ok(())
    }

    /// Replace one field of the draft. No validation happens here.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidTransition`] unless the manager is in
    /// [`ProfileMode::Editing`].
    pub fn update_field(
        &mut self,
        field: ProfileField,
        value: impl Into<String>,
    ) -> Result<(), ProfileError> {
        self.require(ProfileMode::Editing, "update a field")?;
        if let Some(draft) = self.draft.as_mut() {
            draft.set_field(field, value.into());
        }
        Ok(())
    }

    /// Validate the draft and write it to the store.
    ///
    /// On success `updatedAt` is stamped, the draft becomes the canonical
    /// profile and the manager moves to [`ProfileMode::Loaded`]. On any
    /// failure the manager stays in [`ProfileMode::Editing`] with the draft
    /// untouched.
    ///
    /// # Errors
    ///
    /// - [`ProfileError::Validation`] if a required field is blank or the
    ///   email is malformed; nothing is written
    /// - [`ProfileError::Persistence`] if the store write fails
    /// - [`ProfileError::InvalidTransition`] unless editing
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn save(&mut self) -> Result<&Profile, ProfileError> {
        self.require(ProfileMode::Editing, "save")?;
        let Some(draft) = self.draft.as_ref() else {
            return Err(self.invalid("save"));
        };

        if let Err(e) = validate(draft) {
            warn!(error = %e, "Profile save rejected");
            return Err(e.into());
        }

        let mut updated = draft.clone();
        updated.touch(model::now());

        let document = serde_json::to_string(&updated).map_err(PersistenceError::Encode)?;
        if let Err(e) = self.store.set(&self.key, document).await {
            warn!(error = %e, "Profile write failed, keeping draft");
            return Err(PersistenceError::Write(e).into());
        }

        info!(uid = %updated.uid(), "Profile saved");
        self.draft = None;
        self.persisted = true;
        self.mode = ProfileMode::Loaded;
        Ok(&*self.profile.insert(updated))
    }

    /// Throw the draft away by reloading from the store.
    ///
    /// For a profile that was never saved there is nothing to reload, so the
    /// manager re-enters [`ProfileMode::Editing`] with the same in-memory
    /// draft.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidTransition`] unless editing.
    pub async fn cancel_edit(&mut self) -> Result<ProfileMode, ProfileError> {
        self.require(ProfileMode::Editing, "cancel")?;
        Ok(self.reload().await)
    }

    #[instrument(skip(self), fields(key = %self.key))]
    async fn reload(&mut self) -> ProfileMode {
        self.mode = ProfileMode::Loading;

        match self.read_stored().await {
            StoredRead::Found(mut profile) => {
                if profile.uid().is_empty() {
                    let uid = ProfileUid::generate();
                    warn!(%uid, "Stored profile has no uid, assigning one");
                    profile.assign_uid(uid);
                }
                info!(uid = %profile.uid(), "Profile loaded");
                self.profile = Some(profile);
                self.draft = None;
                self.persisted = true;
                self.mode = ProfileMode::Loaded;
            }
            StoredRead::Failed if self.persisted && self.profile.is_some() => {
                warn!("Keeping in-memory profile after failed reload");
                self.draft = None;
                self.mode = ProfileMode::Loaded;
            }
            StoredRead::Absent | StoredRead::Failed => {
                let previous = if self.persisted {
                    None
                } else {
                    self.draft.take().or_else(|| self.profile.clone())
                };
                let draft = previous.unwrap_or_else(|| {
                    let profile = Profile::new_unsaved(model::now());
                    info!(uid = %profile.uid(), "No stored profile, starting a new one");
                    profile
                });
                if self.profile.is_none() || self.persisted {
                    self.profile = Some(draft.clone());
                }
                self.draft = Some(draft);
                self.persisted = false;
                self.mode = ProfileMode::Editing;
            }
        }

        self.mode
    }

    async fn read_stored(&self) -> StoredRead {
        match self.store.get(&self.key).await {
            Ok(Some(document)) => match serde_json::from_str::<Profile>(&document) {
                Ok(profile) => StoredRead::Found(profile),
                Err(e) => {
                    warn!(error = %e, "Stored profile is unreadable, treating as absent");
                    StoredRead::Absent
                }
            },
            Ok(None) => StoredRead::Absent,
            Err(e) => {
                warn!(error = %e, "Profile read failed, treating as absent");
                StoredRead::Failed
            }
        }
    }

    fn require(&self, mode: ProfileMode, operation: &'static str) -> Result<(), ProfileError> {
        if self.mode == mode {
            Ok(())
        } else {
            Err(self.invalid(operation))
        }
    }

    const fn invalid(&self, operation: &'static str) -> ProfileError {
        ProfileError::InvalidTransition {
            operation,
            mode: self.mode,
        }
    }
}

/// Check a draft against the save rules.
///
/// Required fields are checked in order before the email shape. A field holding
/// only [`text::is_whitespace`] characters counts as blank. The email is
/// checked as typed, so surrounding whitespace makes it malformed.
///
/// # Errors
///
/// Returns the first rule the draft violates.
pub fn validate(profile: &Profile) -> Result<(), ValidationError> {
    if let Some(field) = ProfileField::REQUIRED
        .into_iter()
        .find(|field| text::is_blank(profile.field(*field)))
    {
        return Err(ValidationError::MissingRequiredField(field));
    }

    Email::parse(profile.email()).map_err(ValidationError::MalformedEmail)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use shopeasy_core::EmailError;

    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    /// Memory store whose reads and writes can be made to fail.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_get: AtomicBool,
        fail_set: AtomicBool,
    }

    impl KeyValueStore for FlakyStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_get.load(Ordering::SeqCst) {
                return Err(StorageError::Backend("read refused".to_string()));
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
            if self.fail_set.load(Ordering::SeqCst) {
                return Err(StorageError::Backend("write refused".to_string()));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key).await
        }
    }

    fn fill(manager: &mut ProfileManager<impl KeyValueStore>) {
        manager.update_field(ProfileField::FirstName, "Ada").unwrap();
        manager.update_field(ProfileField::LastName, "Lovelace").unwrap();
        manager
            .update_field(ProfileField::Email, "ada@example.com")
            .unwrap();
    }

    async fn saved_manager(store: MemoryStore) -> ProfileManager<MemoryStore> {
        let mut manager = ProfileManager::new(store);
        manager.load().await.unwrap();
        fill(&mut manager);
        manager.save().await.unwrap();
        manager
    }

    #[tokio::test]
    async fn test_new_user_starts_editing() {
        let store = MemoryStore::new();
        let mut manager = ProfileManager::new(store.clone());
        assert_eq!(manager.mode(), ProfileMode::Loading);
        assert!(manager.profile().is_none());

        assert_eq!(manager.load().await.unwrap(), ProfileMode::Editing);
        let profile = manager.profile().unwrap();
        assert!(!profile.uid().is_empty());
        assert_eq!(profile.first_name(), "");
        assert_eq!(profile.last_name(), "");
        assert_eq!(profile.email(), "");
        assert!(profile.created_at().is_some());
        assert!(profile.updated_at().is_none());
        assert!(!manager.is_persisted());
        // Nothing is written until save
        assert_eq!(store.get(DEFAULT_PROFILE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_reload() {
        let store = MemoryStore::new();
        let manager = saved_manager(store.clone()).await;
        assert_eq!(manager.mode(), ProfileMode::Loaded);
        assert!(manager.is_persisted());
        let saved = manager.profile().unwrap().clone();
        assert!(saved.updated_at().is_some());
        assert!(saved.updated_at() >= saved.created_at());

        let mut reopened = ProfileManager::new(store);
        assert_eq!(reopened.load().await.unwrap(), ProfileMode::Loaded);
        assert_eq!(reopened.profile().unwrap(), &saved);
        assert_eq!(reopened.initials(), "AL");
    }

    #[tokio::test]
    async fn test_edit_keeps_uid_and_created_at() {
        let store = MemoryStore::new();
        let mut manager = saved_manager(store).await;
        let original = manager.profile().unwrap().clone();

        manager.begin_edit().unwrap();
        manager
            .update_field(ProfileField::PhoneNumber, "555-0100")
            .unwrap();
        let saved = manager.save().await.unwrap();

        assert_eq!(saved.uid(), original.uid());
        assert_eq!(saved.created_at(), original.created_at());
        assert_eq!(saved.phone_number(), "555-0100");
        assert!(saved.updated_at() >= original.updated_at());
    }

    #[tokio::test]
    async fn test_malformed_email_is_not_written() {
        let store = MemoryStore::new();
        let mut manager = saved_manager(store.clone()).await;
        let stored_before = store.get(DEFAULT_PROFILE_KEY).await.unwrap();

        manager.begin_edit().unwrap();
        manager.update_field(ProfileField::Email, "bad").unwrap();
        let err = manager.save().await.unwrap_err();

        assert!(matches!(
            err,
            ProfileError::Validation(ValidationError::MalformedEmail(
                EmailError::MissingAtSymbol
            ))
        ));
        assert_eq!(manager.mode(), ProfileMode::Editing);
        assert_eq!(manager.draft().unwrap().email(), "bad");
        assert_eq!(store.get(DEFAULT_PROFILE_KEY).await.unwrap(), stored_before);
    }

    #[tokio::test]
    async fn test_blank_required_field() {
        let store = MemoryStore::new();
        let mut manager = ProfileManager::new(store.clone());
        manager.load().await.unwrap();
        fill(&mut manager);
        manager.update_field(ProfileField::LastName, "   ").unwrap();

        let err = manager.save().await.unwrap_err();
        assert!(matches!(
            err,
            ProfileError::Validation(ValidationError::MissingRequiredField(
                ProfileField::LastName
            ))
        ));
        assert_eq!(store.get(DEFAULT_PROFILE_KEY).await.unwrap(), None);
    }

    #[test]
    fn test_phone_number_is_optional() {
        let mut profile = Profile::new_unsaved(model::now());
        profile.set_field(ProfileField::FirstName, "A".to_string());
        profile.set_field(ProfileField::LastName, "B".to_string());
        profile.set_field(ProfileField::Email, "a@b.co".to_string());
        assert!(validate(&profile).is_ok());

        profile.set_field(ProfileField::Email, " a@b.co".to_string());
        assert!(matches!(
            validate(&profile),
            Err(ValidationError::MalformedEmail(_))
        ));
    }

    #[test]
    fn test_form_whitespace_rules() {
        let mut profile = Profile::new_unsaved(model::now());
        profile.set_field(ProfileField::FirstName, "\u{FEFF}".to_string());
        profile.set_field(ProfileField::LastName, "\u{0085}".to_string());
        profile.set_field(ProfileField::Email, "a@b.co".to_string());
        assert_eq!(
            validate(&profile),
            Err(ValidationError::MissingRequiredField(ProfileField::FirstName))
        );

        profile.set_field(ProfileField::FirstName, "Ada".to_string());
        assert_eq!(validate(&profile), Ok(()));

        profile.set_field(ProfileField::Email, "a@b.co\u{FEFF}".to_string());
        assert!(matches!(
            validate(&profile),
            Err(ValidationError::MalformedEmail(EmailError::ContainsWhitespace))
        ));
    }

    #[tokio::test]
    async fn test_write_failure_keeps_draft() {
        let mut manager = ProfileManager::new(FlakyStore::default());
        manager.load().await.unwrap();
        fill(&mut manager);
        manager.store().fail_set.store(true, Ordering::SeqCst);

        let err = manager.save().await.unwrap_err();
        assert!(matches!(
            err,
            ProfileError::Persistence(PersistenceError::Write(_))
        ));
        assert_eq!(manager.mode(), ProfileMode::Editing);
        assert_eq!(manager.draft().unwrap().first_name(), "Ada");
        assert!(manager.draft().unwrap().updated_at().is_none());

        // Retry once the store recovers
        manager.store().fail_set.store(false, Ordering::SeqCst);
        assert_eq!(manager.save().await.unwrap().first_name(), "Ada");
    }

    #[tokio::test]
    async fn test_read_failure_degrades_to_new_profile() {
        let store = FlakyStore::default();
        store
            .inner
            .set(DEFAULT_PROFILE_KEY, "{\"uid\":\"user_1_a\"}".to_string())
            .await
            .unwrap();
        store.fail_get.store(true, Ordering::SeqCst);

        let mut manager = ProfileManager::new(store);
        assert_eq!(manager.load().await.unwrap(), ProfileMode::Editing);
        assert_ne!(manager.profile().unwrap().uid().as_str(), "user_1_a");
    }

    #[tokio::test]
    async fn test_unreadable_document_degrades_to_new_profile() {
        let store = MemoryStore::with_entries([(DEFAULT_PROFILE_KEY, "{not json")]);
        let mut manager = ProfileManager::new(store);
        assert_eq!(manager.load().await.unwrap(), ProfileMode::Editing);
        assert!(!manager.profile().unwrap().uid().is_empty());
    }

    #[tokio::test]
    async fn test_save_keeps_stored_text_it_does_not_edit() {
        let store = MemoryStore::with_entries([(
            DEFAULT_PROFILE_KEY,
            r#"{"uid":"user_1_abc","firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","createdAt":"2024-01-15 10:30:00","extra":"keep"}"#,
        )]);
        let mut manager = ProfileManager::new(store.clone());
        assert_eq!(manager.load().await.unwrap(), ProfileMode::Loaded);
        manager.begin_edit().unwrap();
        manager.save().await.unwrap();

        let raw = store.get(DEFAULT_PROFILE_KEY).await.unwrap().unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["createdAt"], "2024-01-15 10:30:00");
        assert_eq!(doc["extra"], "keep");
        assert_eq!(doc["uid"], "user_1_abc");
    }

    #[tokio::test]
    async fn test_partial_document_loads_verbatim() {
        let store = MemoryStore::with_entries([(
            DEFAULT_PROFILE_KEY,
            r#"{"uid":"user_1_abc","firstName":"Ada","email":"ada@example.com"}"#,
        )]);
        let mut manager = ProfileManager::new(store);
        assert_eq!(manager.load().await.unwrap(), ProfileMode::Loaded);
        assert_eq!(manager.profile().unwrap().uid().as_str(), "user_1_abc");
        assert_eq!(manager.profile().unwrap().last_name(), "");

        manager.begin_edit().unwrap();
        assert!(matches!(
            manager.save().await,
            Err(ProfileError::Validation(ValidationError::MissingRequiredField(
                ProfileField::LastName
            )))
        ));
    }

    #[tokio::test]
    async fn test_blank_stored_uid_is_assigned() {
        let store = MemoryStore::with_entries([(DEFAULT_PROFILE_KEY, r#"{"firstName":"Ada"}"#)]);
        let mut manager = ProfileManager::new(store);
        assert_eq!(manager.load().await.unwrap(), ProfileMode::Loaded);
        assert!(!manager.profile().unwrap().uid().is_empty());
        assert_eq!(manager.profile().unwrap().first_name(), "Ada");
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let store = MemoryStore::new();
        let mut manager = saved_manager(store).await;
        let saved = manager.profile().unwrap().clone();

        manager.begin_edit().unwrap();
        manager.update_field(ProfileField::FirstName, "Changed").unwrap();
        assert_eq!(manager.profile().unwrap().first_name(), "Changed");

        assert_eq!(manager.cancel_edit().await.unwrap(), ProfileMode::Loaded);
        assert_eq!(manager.profile().unwrap(), &saved);
        assert!(manager.draft().is_none());
    }

    #[tokio::test]
    async fn test_cancel_on_unsaved_profile_keeps_draft() {
        let mut manager = ProfileManager::new(MemoryStore::new());
        manager.load().await.unwrap();
        let uid = manager.profile().unwrap().uid().clone();
        let created_at = manager.profile().unwrap().created_at();
        manager.update_field(ProfileField::FirstName, "Ada").unwrap();

        assert_eq!(manager.cancel_edit().await.unwrap(), ProfileMode::Editing);
        let draft = manager.profile().unwrap();
        assert_eq!(draft.uid(), &uid);
        assert_eq!(draft.created_at(), created_at);
        assert_eq!(draft.first_name(), "Ada");
        assert!(!manager.is_persisted());
    }

    #[tokio::test]
    async fn test_cancel_with_failed_read_restores_saved_profile() {
        let mut manager = ProfileManager::new(FlakyStore::default());
        manager.load().await.unwrap();
        fill(&mut manager);
        let saved = manager.save().await.unwrap().clone();

        manager.begin_edit().unwrap();
        manager.update_field(ProfileField::Email, "x@y.z").unwrap();
        manager.store().fail_get.store(true, Ordering::SeqCst);

        assert_eq!(manager.cancel_edit().await.unwrap(), ProfileMode::Loaded);
        assert_eq!(manager.profile().unwrap(), &saved);
    }

    #[tokio::test]
    async fn test_invalid_transitions() {
        let mut manager = ProfileManager::new(MemoryStore::new());

        assert!(matches!(
            manager.begin_edit(),
            Err(ProfileError::InvalidTransition {
                mode: ProfileMode::Loading,
                ..
            })
        ));
        assert!(manager.update_field(ProfileField::Email, "x").is_err());
        assert!(manager.save().await.is_err());
        assert!(manager.cancel_edit().await.is_err());

        manager.load().await.unwrap();
        // Editing a brand-new profile; edit and load are not available
        assert!(manager.begin_edit().is_err());
        assert!(manager.load().await.is_err());

        fill(&mut manager);
        manager.save().await.unwrap();
        assert!(manager.update_field(ProfileField::Email, "x").is_err());
        assert!(matches!(
            manager.save().await,
            Err(ProfileError::InvalidTransition {
                operation: "save",
                mode: ProfileMode::Loaded,
            })
        ));
        assert_eq!(manager.mode(), ProfileMode::Loaded);
    }

    #[tokio::test]
    async fn test_custom_key() {
        let store = MemoryStore::new();
        let mut manager = ProfileManager::with_key(store.clone(), "profile:v1");
        manager.load().await.unwrap();
        fill(&mut manager);
        manager.save().await.unwrap();

        assert!(store.get("profile:v1").await.unwrap().is_some());
        assert!(store.get(DEFAULT_PROFILE_KEY).await.unwrap().is_none());
    }
}
