//! Profile commands.
//!
//! # Usage
//!
//! ```bash
//! shopeasy profile show
//! shopeasy profile edit --first-name Jane --email jane@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPEASY_DATA_DIR` - Directory holding `storage.json`
//! - `SHOPEASY_PROFILE_KEY` - Storage key of the profile document

use shopeasy_storefront::config::StorefrontConfig;
use shopeasy_storefront::error::AppError;
use shopeasy_storefront::navigation::Navigator;
use shopeasy_storefront::profile::{
    Profile, ProfileError, ProfileField, ProfileManager, ProfileMode,
};
use shopeasy_storefront::storage::JsonFileStore;

/// Field values given on the command line. `None` leaves a field alone.
#[derive(Debug, Default)]
pub struct ProfileEdits {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl ProfileEdits {
    /// No field was given.
    fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
    }

    fn fields(self) -> impl Iterator<Item = (ProfileField, String)> {
        [
            (ProfileField::FirstName, self.first_name),
            (ProfileField::LastName, self.last_name),
            (ProfileField::Email, self.email),
            (ProfileField::PhoneNumber, self.phone_number),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
    }
}

async fn open(config: &StorefrontConfig) -> Result<ProfileManager<JsonFileStore>, ProfileError> {
    let store = JsonFileStore::in_dir(&config.data_dir);
    tracing::debug!(path = %store.path().display(), "Opening profile store");
    let mut manager = ProfileManager::with_key(store, config.profile_key.clone());
    manager.load().await?;
    Ok(manager)
}

/// Print the stored profile, or the fresh one a first run starts with.
///
/// # Errors
///
/// Returns an error if the profile manager rejects the load.
#[allow(clippy::print_stdout)]
pub async fn show(config: &StorefrontConfig, navigator: &Navigator) -> Result<(), ProfileError> {
    let manager = open(config).await?;
    println!("{}", super::screen_heading(navigator));

    if manager.mode() == ProfileMode::Editing {
        println!("No profile saved yet. Run `shopeasy profile edit` to create one.");
    }
    if let Some(profile) = manager.profile() {
        print_profile(profile);
    }
    Ok(())
}

/// Apply `edits` and save.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] if no field was given, a validation error
/// if a required field ends up blank or the email is malformed, and a
/// persistence error if the store cannot be written. The stored profile is
/// unchanged in all of these cases.
#[allow(clippy::print_stdout)]
pub async fn edit(
    config: &StorefrontConfig,
    navigator: &Navigator,
    edits: ProfileEdits,
) -> Result<(), AppError> {
    if edits.is_empty() {
        return Err(AppError::BadRequest(
            "nothing to edit, pass at least one of --first-name, --last-name, --email, --phone"
                .to_string(),
        ));
    }

    let mut manager = open(config).await?;
    if manager.mode() == ProfileMode::Loaded {
        manager.begin_edit()?;
    }

    for (field, value) in edits.fields() {
        manager.update_field(field, value)?;
    }

    let saved = manager.save().await?;
    println!("{}", super::screen_heading(navigator));
    println!("Profile updated successfully!");
    print_profile(saved);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_profile(profile: &Profile) {
    println!(
        "[{}] {} {}",
        profile.initials(),
        profile.first_name(),
        profile.last_name()
    );
    for field in [
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::Email,
        ProfileField::PhoneNumber,
    ] {
        let value = profile.field(field);
        println!(
            "  {:<14} {}",
            format!("{}:", field.label()),
            if value.is_empty() { "-" } else { value }
        );
    }
    println!("  {:<14} {}", "User ID:", profile.uid());
    if let Some(created_at) = profile.created_at() {
        println!("  {:<14} {}", "Member since:", created_at.format("%B %-d, %Y"));
    }
}
