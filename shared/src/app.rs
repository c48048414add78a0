use tracing::{debug, info, warn};

use crate::capabilities::{Capabilities, GeolocationResult, Notification, Position, Priority};
use crate::event::Event;
use crate::model::{Field, FileRef, LocationRequestId, Model, ReportForm, UnixTimeMs};
use crate::tracking::SubmittedReport;
use crate::validation::{apply_field, escalate, needs_escalation, validate_attachment};
use crate::view::ViewModel;
use crate::{AppError, ErrorKind, ESCALATION_MESSAGE, LOCATION_DETECTED_MESSAGE};

#[derive(Default)]
pub struct App;

impl App {
    fn handle_field_changed(model: &mut Model, caps: &Capabilities, field: Field, value: &str) {
        let threshold = model.config.kids_escalation_threshold;
        let Some(form) = model.form.as_mut() else {
            return;
        };

        if let Err(e) = apply_field(&mut form.draft, field, value) {
            warn!(field = field.name(), error = %e, "field update rejected");
            caps.render.render();
            return;
        }
        form.clear_invalid(field);
        form.prune_invalid();

        let draft = std::mem::take(&mut form.draft);
        form.draft = escalate(draft, threshold);

        if field == Field::KidsAffected && needs_escalation(&form.draft, threshold) {
            warn!(
                kids_affected = form.draft.kids_affected.get(),
                threshold, "escalating report to urgent"
            );
            caps.notify.show(
                Notification::error(ESCALATION_MESSAGE, model.config.escalation_notification_ms)
                    .with_priority(Priority::High),
            );
        }

        caps.render.render();
    }

    fn handle_file_selected(model: &mut Model, caps: &Capabilities, file: FileRef) {
        let Some(form) = model.form.as_mut() else {
            return;
        };

        match validate_attachment(&file, &model.config) {
            Ok(kind) => {
                info!(?kind, size_bytes = file.size_bytes, "attachment accepted");
                form.draft.photo = Some(file);
            }
            Err(e) => {
                warn!(error = %e, "attachment rejected");
                // Keep the draft in step with the cleared input.
                form.draft.photo = None;
                let err = AppError::from(e);
                caps.notify.show(Notification::error(
                    err.user_facing_message(),
                    model.config.error_notification_ms,
                ));
                caps.file_picker.clear_selection();
            }
        }

        caps.render.render();
    }

    fn handle_detect_location(form: &mut ReportForm, caps: &Capabilities) {
        if let Some(pending) = form.pending_location {
            warn!(request_id = %pending, "location request already in flight");
            return;
        }

        let request_id = LocationRequestId::new();
        form.pending_location = Some(request_id);
        debug!(%request_id, "requesting device location");

        caps.geolocation
            .get_current_position(move |result| Event::LocationResolved { request_id, result });
        caps.render.render();
    }

    fn handle_location_resolved(
        model: &mut Model,
        caps: &Capabilities,
        request_id: LocationRequestId,
        result: GeolocationResult,
    ) {
        let Some(form) = model.form.as_mut() else {
            debug!(%request_id, "location arrived after form closed, dropping");
            return;
        };
        if form.pending_location != Some(request_id) {
            debug!(%request_id, "stale location response, dropping");
            return;
        }
        form.pending_location = None;

        match result.and_then(Position::validated) {
            Ok(position) => {
                form.draft.last_seen_location = position.to_string();
                form.clear_invalid(Field::LastSeenLocation);
                info!(accuracy_m = ?position.accuracy_m, "location detected");
                caps.notify.show(Notification::success(
                    LOCATION_DETECTED_MESSAGE,
                    model.config.success_notification_ms,
                ));
            }
            Err(e) => {
                warn!(error = %e, "location detection failed");
                let err = AppError::from(e);
                caps.notify.show(Notification::error(
                    err.user_facing_message(),
                    model.config.error_notification_ms,
                ));
            }
        }

        caps.render.render();
    }

    fn handle_submit(model: &mut Model, caps: &Capabilities, submitted_at: UnixTimeMs) {
        let Some(form) = model.form.as_mut() else {
            return;
        };

        match SubmittedReport::from_draft(&form.draft, submitted_at) {
            Err(e) => {
                info!(error = %e, "submission blocked by required field");
                if let Some(field) = e.field() {
                    form.mark_invalid(field);
                }
            }
            Ok(report) => {
                model.close_form();
                info!(?report, "report submitted");
                caps.notify.show(Notification::success(
                    report.confirmation_message(),
                    model.config.submission_notification_ms,
                ));
                model.last_tracking_id = Some(report.tracking_id);
            }
        }

        caps.render.render();
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        let event_name = event.name();
        debug!(event = event_name, user_initiated = event.is_user_initiated(), "update");

        if event.requires_open_form() && !model.is_form_visible() {
            let err = AppError::new(ErrorKind::InvalidState, "report form is not open")
                .with_context("event", event_name);
            warn!(error = %err, "event ignored");
            return;
        }

        match event {
            Event::Configure(config) => {
                model.config = (*config).validated();
                info!(config = ?model.config, "form configured");
                caps.render.render();
            }

            Event::OpenReportForm => {
                if model.open_form() {
                    info!("report form opened");
                }
                caps.render.render();
            }

            Event::CancelReport => {
                if model.close_form().is_some() {
                    info!("report form cancelled, draft discarded");
                }
                caps.render.render();
            }

            Event::FieldChanged { field, value } => {
                Self::handle_field_changed(model, caps, field, &value);
            }

            Event::DateTimeChanged { at } => {
                if let Some(form) = model.form.as_mut() {
                    form.draft.date_time = Some(at);
                }
                caps.render.render();
            }

            Event::PickFileRequested => {
                caps.file_picker
                    .open(model.config.accept_filter(), Event::FilePicked);
            }

            Event::FilePicked(output) => match output.into_file() {
                Some(file) => Self::handle_file_selected(model, caps, file),
                None => debug!("file pick cancelled"),
            },

            Event::FileSelected { file } => Self::handle_file_selected(model, caps, file),

            Event::DetectLocation => {
                if let Some(form) = model.form.as_mut() {
                    Self::handle_detect_location(form, caps);
                }
            }

            Event::LocationResolved { request_id, result } => {
                Self::handle_location_resolved(model, caps, request_id, result);
            }

            Event::SubmitReport { at } => Self::handle_submit(model, caps, at),
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel::build(model)
    }
}
