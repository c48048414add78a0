#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod capabilities;
pub mod config;
pub mod event;
pub mod model;
pub mod tracking;
pub mod validation;
pub mod view;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::FormConfig;
pub use crux_core::{render::Render, App as CruxApp};
pub use event::Event;
pub use model::{
    AttachmentKind, Count, EmergencyStatus, Field, FileRef, LocationRequestId, Model,
    ReportDraft, ReportForm, ReportType, UnixTimeMs,
};
pub use tracking::{SubmittedReport, TrackingId};
pub use view::{ReportFormView, Screen, ViewModel};

pub const BYTES_PER_MB: u64 = 1024 * 1024;
pub const MAX_ATTACHMENT_BYTES: u64 = 25 * BYTES_PER_MB;
pub const KIDS_ESCALATION_THRESHOLD: u8 = 5;
pub const MAX_AFFECTED_COUNT: u8 = 100;
pub const TRACKING_ID_PREFIX: &str = "REP";
pub const TRACKING_ID_DIGITS: u32 = 6;
pub const SUCCESS_NOTIFICATION_MS: u64 = 2000;
pub const ERROR_NOTIFICATION_MS: u64 = 4000;
pub const ESCALATION_NOTIFICATION_MS: u64 = 5000;
pub const SUBMISSION_NOTIFICATION_MS: u64 = 5000;

pub const ESCALATION_MESSAGE: &str =
    "URGENT: High number of children affected! Escalating priority.";
pub const LOCATION_DETECTED_MESSAGE: &str = "Location detected successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Validation,
    AttachmentTooLarge,
    AttachmentTypeUnsupported,
    Location,
    LocationPermissionDenied,
    LocationUnsupported,
    InvalidState,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::AttachmentTooLarge => "ATTACHMENT_TOO_LARGE",
            Self::AttachmentTypeUnsupported => "ATTACHMENT_TYPE_UNSUPPORTED",
            Self::Location => "LOCATION_ERROR",
            Self::LocationPermissionDenied => "LOCATION_PERMISSION_DENIED",
            Self::LocationUnsupported => "LOCATION_UNSUPPORTED",
            Self::InvalidState => "INVALID_STATE",
        }
    }

    /// Location failures the user can fix by typing the location by hand.
    #[must_use]
    pub const fn is_location(self) -> bool {
        matches!(
            self,
            Self::Location | Self::LocationPermissionDenied | Self::LocationUnsupported
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub context: HashMap<String, String>,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self.kind {
            ErrorKind::Validation
            | ErrorKind::AttachmentTooLarge
            | ErrorKind::AttachmentTypeUnsupported => self.message.clone(),
            ErrorKind::Location | ErrorKind::LocationPermissionDenied => {
                "Unable to detect location. Please enter manually.".into()
            }
            ErrorKind::LocationUnsupported => {
                "Geolocation is not supported by your browser".into()
            }
            ErrorKind::InvalidState => {
                "The report form is not open. Please start a new report.".into()
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;
