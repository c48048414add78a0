use serde::{Deserialize, Serialize};

use crate::config::FormConfig;
use crate::model::{AttachmentKind, EmergencyStatus, Field, Model, ReportForm, ReportType};
use crate::validation::needs_escalation;
use crate::MAX_AFFECTED_COUNT;

pub const CALL_TO_ACTION: &str = "Report Missing Person / Disaster";
pub const FORM_TITLE: &str = "Report Missing Person / Disaster";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttachmentView {
    pub name: String,
    pub size_bytes: u64,
    pub is_image: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportFormView {
    pub title: String,
    pub report_type: ReportType,
    pub show_full_name: bool,
    pub full_name: String,
    pub last_seen_location: String,
    pub is_detecting_location: bool,
    pub date_time_ms: Option<u64>,
    pub description: String,
    pub adults_affected: u8,
    pub kids_affected: u8,
    pub max_affected: u8,
    pub photo: Option<AttachmentView>,
    pub attachment_accept: String,
    pub attachment_hint: String,
    pub phone: String,
    pub email: String,
    pub emergency_status: EmergencyStatus,
    /// Set while the kids-affected count pins the status to urgent.
    pub emergency_status_locked: bool,
    pub invalid_fields: Vec<Field>,
}

impl ReportFormView {
    fn build(form: &ReportForm, config: &FormConfig) -> Self {
        let draft = &form.draft;
        Self {
            title: FORM_TITLE.into(),
            report_type: draft.report_type,
            show_full_name: draft.report_type.requires_full_name(),
            full_name: draft.full_name.clone(),
            last_seen_location: draft.last_seen_location.clone(),
            is_detecting_location: form.is_locating(),
            date_time_ms: draft.date_time.map(|t| t.0),
            description: draft.description.clone(),
            adults_affected: draft.adults_affected.get(),
            kids_affected: draft.kids_affected.get(),
            max_affected: MAX_AFFECTED_COUNT,
            photo: draft.photo.as_ref().map(|file| AttachmentView {
                name: file.name.clone(),
                size_bytes: file.size_bytes,
                is_image: AttachmentKind::from_mime_type(&file.mime_type)
                    .is_some_and(AttachmentKind::is_image),
            }),
            attachment_accept: config.accept_filter(),
            attachment_hint: config.attachment_hint(),
            phone: draft.phone.clone(),
            email: draft.email.clone(),
            emergency_status: draft.emergency_status,
            emergency_status_locked: needs_escalation(draft, config.kids_escalation_threshold),
            invalid_fields: form.invalid_fields.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Screen {
    Home {
        call_to_action: String,
        last_tracking_id: Option<String>,
    },
    ReportForm {
        form: Box<ReportFormView>,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub screen: Screen,
}

impl ViewModel {
    #[must_use]
    pub fn build(model: &Model) -> Self {
        let screen = match &model.form {
            None => Screen::Home {
                call_to_action: CALL_TO_ACTION.into(),
                last_tracking_id: model.last_tracking_id.as_ref().map(|id| id.to_string()),
            },
            Some(form) => Screen::ReportForm {
                form: Box::new(ReportFormView::build(form, &model.config)),
            },
        };
        Self { screen }
    }

    #[must_use]
    pub fn form(&self) -> Option<&ReportFormView> {
        match &self.screen {
            Screen::ReportForm { form } => Some(&**form),
            Screen::Home { .. } => None,
        }
    }
}
