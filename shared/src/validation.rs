//! Field writes, the kids-affected escalation rule and attachment checks.
//!
//! Everything here is pure: the app calls these after each user event and
//! turns the `Err` side into notifications.

use thiserror::Error;
use tracing::instrument;

use crate::config::FormConfig;
use crate::model::{AttachmentKind, Count, EmergencyStatus, Field, FileRef, ReportDraft};
use crate::{AppError, ErrorKind, BYTES_PER_MB};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountError {
    #[error("'{0}' is not a whole number")]
    NotANumber(String),
    #[error("{value} is above the maximum of {max}")]
    OutOfRange { value: u64, max: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Full name is required for missing person reports")]
    FullNameRequired,
    #[error("Invalid value for {field}: {source}")]
    InvalidCount {
        field: Field,
        #[source]
        source: CountError,
    },
    #[error("Unknown option '{value}' for {field}")]
    UnknownChoice { field: Field, value: String },
    #[error("Unknown field '{0}'")]
    UnknownField(String),
}

impl ValidationError {
    /// The form field the shell should highlight, if any.
    #[must_use]
    pub const fn field(&self) -> Option<Field> {
        match self {
            Self::FullNameRequired => Some(Field::FullName),
            Self::InvalidCount { field, .. } | Self::UnknownChoice { field, .. } => Some(*field),
            Self::UnknownField(_) => None,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        let err = AppError::new(ErrorKind::Validation, e.to_string());
        match e.field() {
            Some(field) => err.with_context("field", field.name()),
            None => err,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error("File size must be less than {}MB", .max_bytes / BYTES_PER_MB)]
    TooLarge { size_bytes: u64, max_bytes: u64 },
    #[error("Only {allowed} files are allowed")]
    UnsupportedType { mime_type: String, allowed: String },
}

impl From<AttachmentError> for AppError {
    fn from(e: AttachmentError) -> Self {
        match &e {
            AttachmentError::TooLarge { size_bytes, .. } => {
                AppError::new(ErrorKind::AttachmentTooLarge, e.to_string())
                    .with_context("size_bytes", size_bytes.to_string())
            }
            AttachmentError::UnsupportedType { mime_type, .. } => {
                AppError::new(ErrorKind::AttachmentTypeUnsupported, e.to_string())
                    .with_context("mime_type", mime_type.clone())
            }
        }
    }
}

/// Writes `value` into `field`. Text fields are stored verbatim.
///
/// # Errors
/// Fails when a choice or count field receives a value it cannot represent;
/// the draft is left untouched in that case.
pub fn apply_field(draft: &mut ReportDraft, field: Field, value: &str) -> Result<(), ValidationError> {
    match field {
        Field::ReportType => draft.report_type = value.parse()?,
        Field::FullName => draft.full_name = value.to_string(),
        Field::LastSeenLocation => draft.last_seen_location = value.to_string(),
        Field::Description => draft.description = value.to_string(),
        Field::AdultsAffected => draft.adults_affected = parse_count(field, value)?,
        Field::KidsAffected => draft.kids_affected = parse_count(field, value)?,
        Field::Phone => draft.phone = value.to_string(),
        Field::Email => draft.email = value.to_string(),
        Field::EmergencyStatus => draft.emergency_status = value.parse()?,
    }
    Ok(())
}

fn parse_count(field: Field, value: &str) -> Result<Count, ValidationError> {
    value
        .parse()
        .map_err(|source| ValidationError::InvalidCount { field, source })
}

/// Forces `Urgent` whenever more than `threshold` kids are affected.
/// Below the threshold the status is left as the user set it.
#[must_use]
pub fn escalate(mut draft: ReportDraft, threshold: u8) -> ReportDraft {
    if needs_escalation(&draft, threshold) {
        draft.emergency_status = EmergencyStatus::Urgent;
    }
    draft
}

#[must_use]
pub fn needs_escalation(draft: &ReportDraft, threshold: u8) -> bool {
    draft.kids_affected.get() > threshold
}

/// Size is checked before type.
///
/// # Errors
/// [`AttachmentError::TooLarge`] above the configured size,
/// [`AttachmentError::UnsupportedType`] for MIME types outside the allowed set.
#[instrument(level = "debug", skip(file, config), fields(size_bytes = file.size_bytes, mime_type = %file.mime_type))]
pub fn validate_attachment(file: &FileRef, config: &FormConfig) -> Result<AttachmentKind, AttachmentError> {
    if file.size_bytes > config.max_attachment_bytes {
        return Err(AttachmentError::TooLarge {
            size_bytes: file.size_bytes,
            max_bytes: config.max_attachment_bytes,
        });
    }

    AttachmentKind::from_mime_type(&file.mime_type)
        .filter(|kind| config.allows(*kind))
        .ok_or_else(|| AttachmentError::UnsupportedType {
            mime_type: file.mime_type.clone(),
            allowed: allowed_labels(config),
        })
}

fn allowed_labels(config: &FormConfig) -> String {
    let labels: Vec<&str> = config.allowed_attachments.iter().map(|k| k.label()).collect();
    match labels.as_slice() {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

/// Mirrors native `required` semantics: only an empty name blocks submission.
///
/// # Errors
/// [`ValidationError::FullNameRequired`] for a missing-person report without a name.
pub fn validate_for_submit(draft: &ReportDraft) -> Result<(), ValidationError> {
    if draft.report_type.requires_full_name() && draft.full_name.is_empty() {
        return Err(ValidationError::FullNameRequired);
    }
    Ok(())
}
