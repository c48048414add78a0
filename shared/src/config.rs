use serde::{Deserialize, Serialize};

use crate::model::AttachmentKind;
use crate::{
    BYTES_PER_MB, ERROR_NOTIFICATION_MS, ESCALATION_NOTIFICATION_MS, KIDS_ESCALATION_THRESHOLD,
    MAX_AFFECTED_COUNT, MAX_ATTACHMENT_BYTES, SUBMISSION_NOTIFICATION_MS, SUCCESS_NOTIFICATION_MS,
};

const MIN_NOTIFICATION_MS: u64 = 1000;
const MAX_NOTIFICATION_MS: u64 = 60_000;

/// Limits and timings for the report form. Shells may override the defaults
/// with [`crate::Event::Configure`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormConfig {
    pub max_attachment_bytes: u64,
    pub allowed_attachments: Vec<AttachmentKind>,
    pub kids_escalation_threshold: u8,
    pub success_notification_ms: u64,
    pub error_notification_ms: u64,
    pub escalation_notification_ms: u64,
    pub submission_notification_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_attachment_bytes: MAX_ATTACHMENT_BYTES,
            allowed_attachments: AttachmentKind::ALL.to_vec(),
            kids_escalation_threshold: KIDS_ESCALATION_THRESHOLD,
            success_notification_ms: SUCCESS_NOTIFICATION_MS,
            error_notification_ms: ERROR_NOTIFICATION_MS,
            escalation_notification_ms: ESCALATION_NOTIFICATION_MS,
            submission_notification_ms: SUBMISSION_NOTIFICATION_MS,
        }
    }
}

impl FormConfig {
    /// Parses a JSON config, falling back to defaults for missing keys.
    ///
    /// # Errors
    /// Returns the `serde_json` error when the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    #[must_use]
    pub fn validated(mut self) -> Self {
        self.max_attachment_bytes = self.max_attachment_bytes.clamp(1, MAX_ATTACHMENT_BYTES);
        self.kids_escalation_threshold = self.kids_escalation_threshold.min(MAX_AFFECTED_COUNT);
        if self.allowed_attachments.is_empty() {
            self.allowed_attachments = AttachmentKind::ALL.to_vec();
        }
        let mut unique = Vec::with_capacity(self.allowed_attachments.len());
        for kind in self.allowed_attachments.drain(..) {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }
        self.allowed_attachments = unique;
        for ms in [
            &mut self.success_notification_ms,
            &mut self.error_notification_ms,
            &mut self.escalation_notification_ms,
            &mut self.submission_notification_ms,
        ] {
            *ms = (*ms).clamp(MIN_NOTIFICATION_MS, MAX_NOTIFICATION_MS);
        }
        self
    }

    #[must_use]
    pub fn max_attachment_mb(&self) -> u64 {
        self.max_attachment_bytes / BYTES_PER_MB
    }

    /// File input `accept` filter, e.g. `.jpg,.jpeg,.png,.pdf`.
    #[must_use]
    pub fn accept_filter(&self) -> String {
        self.allowed_attachments
            .iter()
            .flat_map(|kind| kind.extensions().iter().copied())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Label shown next to the file input, e.g. `Max 25MB, JPG/PNG/PDF`.
    #[must_use]
    pub fn attachment_hint(&self) -> String {
        let kinds = self
            .allowed_attachments
            .iter()
            .map(|kind| kind.label())
            .collect::<Vec<_>>()
            .join("/");
        format!("Max {}MB, {kinds}", self.max_attachment_mb())
    }

    #[must_use]
    pub fn allows(&self, kind: AttachmentKind) -> bool {
        self.allowed_attachments.contains(&kind)
    }
}
