//! Profile document and its editable fields.

use core::fmt;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use shopeasy_core::ProfileUid;

/// A user profile as stored under the profile key.
///
/// The document is written whole on every save. Missing keys in a stored
/// document default to empty, so documents written by older builds still
/// load; the save-time validation catches anything that ends up blank.
///
/// `uid` and the timestamps are not reachable through [`ProfileField`], so
/// editing can never change a profile's identity or creation time. Keys this
/// build does not know about are carried through a save untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    uid: ProfileUid,
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
    created_at: Timestamp,
    updated_at: Timestamp,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Profile {
    /// A blank, never-saved profile with a fresh uid created at `now`.
    #[must_use]
    pub fn new_unsaved(now: DateTime<Utc>) -> Self {
        Self {
            uid: ProfileUid::generate(),
            created_at: Timestamp::At(now),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn uid(&self) -> &ProfileUid {
        &self.uid
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Creation time, if set and readable.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.at()
    }

    /// Time of the last save, if set and readable.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at.at()
    }

    /// Value of an editable field.
    #[must_use]
    pub fn field(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::Email => &self.email,
            ProfileField::PhoneNumber => &self.phone_number,
        }
    }

    /// Avatar initials: first character of the first and last name.
    #[must_use]
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect()
    }

    pub(crate) fn set_field(&mut self, field: ProfileField, value: String) {
        let slot = match field {
            ProfileField::FirstName => &mut self.first_name,
            ProfileField::LastName => &mut self.last_name,
            ProfileField::Email => &mut self.email,
            ProfileField::PhoneNumber => &mut self.phone_number,
        };
        *slot = value;
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Timestamp::At(now);
    }

    pub(crate) fn assign_uid(&mut self, uid: ProfileUid) {
        self.uid = uid;
    }
}

/// The user-editable fields of a [`Profile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
}

impl ProfileField {
    /// Fields that must be non-blank for a save to succeed, in check order.
    pub const REQUIRED: [Self; 3] = [Self::FirstName, Self::LastName, Self::Email];

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::PhoneNumber => "Phone Number",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current time at the precision the stored document keeps.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// An ISO-8601 timestamp stored as a string, with `""` meaning "not set".
///
/// Text that does not parse is kept verbatim, so the profile still loads and a
/// later save writes the same text back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Timestamp {
    #[default]
    Unset,
    At(DateTime<Utc>),
    Unparsed(String),
}

impl Timestamp {
    const fn at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::At(dt) => Some(*dt),
            Self::Unset | Self::Unparsed(_) => None,
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset => serializer.serialize_str(""),
            Self::At(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Self::Unparsed(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if raw.trim().is_empty() {
            return Ok(Self::Unset);
        }
        Ok(DateTime::parse_from_rfc3339(raw.trim()).map_or_else(
            |_| Self::Unparsed(raw),
            |dt| Self::At(dt.with_timezone(&Utc)),
        ))
    }
}
