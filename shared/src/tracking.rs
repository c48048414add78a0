use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{Count, EmergencyStatus, FileRef, ReportDraft, ReportType, UnixTimeMs};
use crate::validation::{validate_for_submit, ValidationError};
use crate::{TRACKING_ID_DIGITS, TRACKING_ID_PREFIX};

/// Receipt shown to the reporter. Generated locally, never persisted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TrackingId(String);

impl TrackingId {
    /// `REP` followed by the last six digits of `epoch_ms`, zero padded.
    #[must_use]
    pub fn from_epoch_ms(epoch_ms: u64) -> Self {
        let modulus = 10u64.pow(TRACKING_ID_DIGITS);
        Self(format!(
            "{TRACKING_ID_PREFIX}{:0width$}",
            epoch_ms % modulus,
            width = TRACKING_ID_DIGITS as usize
        ))
    }

    #[must_use]
    pub fn is_well_formed(s: &str) -> bool {
        s.strip_prefix(TRACKING_ID_PREFIX).is_some_and(|digits| {
            digits.len() == TRACKING_ID_DIGITS as usize
                && digits.bytes().all(|b| b.is_ascii_digit())
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated report at the moment of submission.
#[derive(Serialize, Deserialize, Clone, PartialEq)]
pub struct SubmittedReport {
    pub tracking_id: TrackingId,
    pub report_type: ReportType,
    /// Only kept for missing-person reports.
    pub full_name: Option<String>,
    pub last_seen_location: String,
    pub occurred_at: UnixTimeMs,
    pub description: String,
    pub adults_affected: Count,
    pub kids_affected: Count,
    pub photo: Option<FileRef>,
    pub phone: String,
    pub email: String,
    pub emergency_status: EmergencyStatus,
    pub submitted_at: UnixTimeMs,
}

impl SubmittedReport {
    /// # Errors
    /// Returns the first rule the draft breaks, see [`validate_for_submit`].
    pub fn from_draft(draft: &ReportDraft, submitted_at: UnixTimeMs) -> Result<Self, ValidationError> {
        validate_for_submit(draft)?;

        Ok(Self {
            tracking_id: TrackingId::from_epoch_ms(submitted_at.0),
            report_type: draft.report_type,
            full_name: draft
                .report_type
                .requires_full_name()
                .then(|| draft.full_name.clone()),
            last_seen_location: draft.last_seen_location.clone(),
            occurred_at: draft.date_time.unwrap_or(submitted_at),
            description: draft.description.clone(),
            adults_affected: draft.adults_affected,
            kids_affected: draft.kids_affected,
            photo: draft.photo.clone(),
            phone: draft.phone.clone(),
            email: draft.email.clone(),
            emergency_status: draft.emergency_status,
            submitted_at,
        })
    }

    #[must_use]
    pub fn confirmation_message(&self) -> String {
        format!(
            "Report submitted successfully!\nTracking ID: {}\nWe will contact you shortly.",
            self.tracking_id
        )
    }
}

impl fmt::Debug for SubmittedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmittedReport")
            .field("tracking_id", &self.tracking_id)
            .field("report_type", &self.report_type)
            .field("full_name_present", &self.full_name.is_some())
            .field("occurred_at", &self.occurred_at)
            .field("adults_affected", &self.adults_affected)
            .field("kids_affected", &self.kids_affected)
            .field("photo_present", &self.photo.is_some())
            .field("emergency_status", &self.emergency_status)
            .field("submitted_at", &self.submitted_at)
            .finish_non_exhaustive()
    }
}
