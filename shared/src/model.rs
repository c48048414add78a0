use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::config::FormConfig;
use crate::tracking::TrackingId;
use crate::validation::{CountError, ValidationError};
use crate::MAX_AFFECTED_COUNT;

/// Explicit timestamp unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnixTimeMs(pub u64);

/// Identifies one outstanding geolocation request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationRequestId(pub Uuid);

impl LocationRequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LocationRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocationRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReportType {
    #[default]
    MissingPerson,
    Disaster,
}

impl ReportType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingPerson => "missing-person",
            Self::Disaster => "disaster",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MissingPerson => "Missing Person",
            Self::Disaster => "Disaster Incident",
        }
    }

    /// Only missing-person reports collect a name.
    #[must_use]
    pub const fn requires_full_name(self) -> bool {
        matches!(self, Self::MissingPerson)
    }
}

impl FromStr for ReportType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "missing-person" => Ok(Self::MissingPerson),
            "disaster" => Ok(Self::Disaster),
            other => Err(ValidationError::UnknownChoice {
                field: Field::ReportType,
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyStatus {
    #[default]
    Normal,
    Urgent,
}

impl EmergencyStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Urgent => "urgent",
        }
    }

    #[must_use]
    pub const fn is_urgent(self) -> bool {
        matches!(self, Self::Urgent)
    }
}

impl FromStr for EmergencyStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "normal" => Ok(Self::Normal),
            "urgent" => Ok(Self::Urgent),
            other => Err(ValidationError::UnknownChoice {
                field: Field::EmergencyStatus,
                value: other.to_string(),
            }),
        }
    }
}

/// Number of people affected, bounded to `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub struct Count(u8);

impl Count {
    pub const MAX: u8 = MAX_AFFECTED_COUNT;

    /// # Errors
    /// Returns [`CountError::OutOfRange`] above [`Count::MAX`].
    pub fn new(value: u8) -> Result<Self, CountError> {
        if value > Self::MAX {
            return Err(CountError::OutOfRange {
                value: u64::from(value),
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Count {
    type Error = CountError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Count> for u8 {
    fn from(count: Count) -> Self {
        count.0
    }
}

impl FromStr for Count {
    type Err = CountError;

    /// A blank input reads as zero. A fractional part is truncated, so
    /// `"7.5"` is 7; signs and exponents are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let whole = match trimmed.split_once('.') {
            Some((whole, fraction)) if fraction.bytes().all(|b| b.is_ascii_digit()) => whole,
            Some(_) => return Err(CountError::NotANumber(trimmed.to_string())),
            None => trimmed,
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CountError::NotANumber(trimmed.to_string()));
        }
        // Only digits remain, so a parse failure is an overflow.
        let value: u64 = whole.parse().map_err(|_| CountError::OutOfRange {
            value: u64::MAX,
            max: Self::MAX,
        })?;
        let value = u8::try_from(value).map_err(|_| CountError::OutOfRange {
            value,
            max: Self::MAX,
        })?;
        Self::new(value)
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Jpeg,
    Png,
    Pdf,
}

impl AttachmentKind {
    pub const ALL: [Self; 3] = [Self::Jpeg, Self::Png, Self::Pdf];

    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Pdf => "application/pdf",
        }
    }

    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Jpeg => &[".jpg", ".jpeg"],
            Self::Png => &[".png"],
            Self::Pdf => &[".pdf"],
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Jpeg => "JPG",
            Self::Png => "PNG",
            Self::Pdf => "PDF",
        }
    }

    /// MIME types compare case-insensitively; parameters are not accepted.
    #[must_use]
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        let mime = mime.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.mime_type().eq_ignore_ascii_case(mime))
    }

    #[must_use]
    pub const fn is_image(self) -> bool {
        matches!(self, Self::Jpeg | Self::Png)
    }
}

/// Metadata of a file chosen in the shell. Bytes stay in the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

impl FileRef {
    #[must_use]
    pub fn new(name: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// Draft fields that accept free-form updates from the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    ReportType,
    FullName,
    LastSeenLocation,
    Description,
    AdultsAffected,
    KidsAffected,
    Phone,
    Email,
    EmergencyStatus,
}

impl Field {
    pub const ALL: [Self; 9] = [
        Self::ReportType,
        Self::FullName,
        Self::LastSeenLocation,
        Self::Description,
        Self::AdultsAffected,
        Self::KidsAffected,
        Self::Phone,
        Self::Email,
        Self::EmergencyStatus,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReportType => "reportType",
            Self::FullName => "fullName",
            Self::LastSeenLocation => "lastSeenLocation",
            Self::Description => "description",
            Self::AdultsAffected => "adultsAffected",
            Self::KidsAffected => "kidsAffected",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::EmergencyStatus => "emergencyStatus",
        }
    }
}

impl FromStr for Field {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| ValidationError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The unsaved report being composed.
#[derive(Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReportDraft {
    pub report_type: ReportType,
    pub full_name: String,
    pub last_seen_location: String,
    /// `None` until the user picks a time; resolved to the submit time.
    pub date_time: Option<UnixTimeMs>,
    pub description: String,
    pub adults_affected: Count,
    pub kids_affected: Count,
    pub photo: Option<FileRef>,
    pub phone: String,
    pub email: String,
    pub emergency_status: EmergencyStatus,
}

// Personal data: only presence and lengths are logged.
impl fmt::Debug for ReportDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportDraft")
            .field("report_type", &self.report_type)
            .field("full_name_present", &!self.full_name.is_empty())
            .field("last_seen_location_present", &!self.last_seen_location.is_empty())
            .field("date_time", &self.date_time)
            .field("description_len", &self.description.len())
            .field("adults_affected", &self.adults_affected)
            .field("kids_affected", &self.kids_affected)
            .field("photo_present", &self.photo.is_some())
            .field("phone_present", &!self.phone.is_empty())
            .field("email_present", &!self.email.is_empty())
            .field("emergency_status", &self.emergency_status)
            .finish()
    }
}

/// State owned by the open report form. Dropped on cancel and submit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct ReportForm {
    pub draft: ReportDraft,
    /// Single in-flight geolocation slot.
    pub pending_location: Option<LocationRequestId>,
    /// Fields that blocked the last submit attempt.
    pub invalid_fields: Vec<Field>,
}

impl ReportForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_locating(&self) -> bool {
        self.pending_location.is_some()
    }

    pub fn mark_invalid(&mut self, field: Field) {
        if !self.invalid_fields.contains(&field) {
            self.invalid_fields.push(field);
        }
    }

    pub fn clear_invalid(&mut self, field: Field) {
        self.invalid_fields.retain(|f| *f != field);
    }

    /// Drops markers for fields the current report type no longer asks for.
    pub fn prune_invalid(&mut self) {
        if !self.draft.report_type.requires_full_name() {
            self.clear_invalid(Field::FullName);
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Model {
    pub config: FormConfig,
    /// `Some` while the report form is visible.
    pub form: Option<ReportForm>,
    pub last_tracking_id: Option<TrackingId>,
}

impl Model {
    #[must_use]
    pub const fn is_form_visible(&self) -> bool {
        self.form.is_some()
    }

    /// Opens the form with a fresh draft. Returns `false` if it was already open.
    pub fn open_form(&mut self) -> bool {
        if self.form.is_some() {
            return false;
        }
        self.form = Some(ReportForm::new());
        true
    }

    pub fn close_form(&mut self) -> Option<ReportForm> {
        self.form.take()
    }
}
