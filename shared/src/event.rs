use serde::{Deserialize, Serialize};

use crate::capabilities::{FilePickerOutput, GeolocationResult};
use crate::config::FormConfig;
use crate::model::{Field, FileRef, LocationRequestId, UnixTimeMs};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    Configure(Box<FormConfig>),

    // Root shell
    OpenReportForm,
    CancelReport,

    // Report form
    FieldChanged { field: Field, value: String },
    DateTimeChanged { at: UnixTimeMs },
    PickFileRequested,
    FileSelected { file: FileRef },
    DetectLocation,
    /// `at` is the shell's clock; the core never reads one.
    SubmitReport { at: UnixTimeMs },

    // Capability responses, never sent by the shell.
    #[serde(skip)]
    FilePicked(FilePickerOutput),
    #[serde(skip)]
    LocationResolved {
        request_id: LocationRequestId,
        result: GeolocationResult,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Configure(_) => "configure",
            Self::OpenReportForm => "open_report_form",
            Self::CancelReport => "cancel_report",
            Self::FieldChanged { .. } => "field_changed",
            Self::DateTimeChanged { .. } => "date_time_changed",
            Self::PickFileRequested => "pick_file_requested",
            Self::FileSelected { .. } => "file_selected",
            Self::DetectLocation => "detect_location",
            Self::SubmitReport { .. } => "submit_report",
            Self::FilePicked(_) => "file_picked",
            Self::LocationResolved { .. } => "location_resolved",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::OpenReportForm
                | Self::CancelReport
                | Self::FieldChanged { .. }
                | Self::DateTimeChanged { .. }
                | Self::PickFileRequested
                | Self::FileSelected { .. }
                | Self::DetectLocation
                | Self::SubmitReport { .. }
        )
    }

    /// Whether the event only makes sense while the report form is open.
    #[must_use]
    pub const fn requires_open_form(&self) -> bool {
        !matches!(
            self,
            Self::Configure(_) | Self::OpenReportForm | Self::CancelReport | Self::LocationResolved { .. }
        )
    }
}
