use assert_matches::assert_matches;
use crux_core::testing::AppTester;
use incident_report::capabilities::{
    FilePickerOperation, FilePickerOutput, Notification, NotifyOperation, Priority, Severity,
};
use incident_report::{
    App, EmergencyStatus, Effect, Event, Field, FileRef, Model, ReportType, Screen, TrackingId,
    UnixTimeMs, ESCALATION_MESSAGE,
};

fn notifications(effects: &[Effect]) -> Vec<Notification> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Notify(request) => match &request.operation {
                NotifyOperation::Show(notification) => Some(notification.clone()),
            },
            _ => None,
        })
        .collect()
}

fn file_picker_ops(effects: &[Effect]) -> Vec<FilePickerOperation> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::FilePicker(request) => Some(request.operation.clone()),
            _ => None,
        })
        .collect()
}

fn has_render(effects: &[Effect]) -> bool {
    effects.iter().any(|e| matches!(e, Effect::Render(_)))
}

fn open_form(app: &AppTester<App, Effect>) -> Model {
    let mut model = Model::default();
    let update = app.update(Event::OpenReportForm, &mut model);
    assert!(has_render(&update.effects));
    assert!(model.is_form_visible());
    model
}

fn submit(app: &AppTester<App, Effect>, model: &mut Model) -> Vec<Effect> {
    app.update(
        Event::SubmitReport {
            at: UnixTimeMs(1_700_000_123_456),
        },
        model,
    )
    .effects
}

fn change(app: &AppTester<App, Effect>, model: &mut Model, field: Field, value: &str) -> Vec<Effect> {
    app.update(
        Event::FieldChanged {
            field,
            value: value.into(),
        },
        model,
    )
    .effects
}

#[test]
fn call_to_action_toggles_form() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();
    assert_matches!(app.view(&model).screen, Screen::Home { .. });

    app.update(Event::OpenReportForm, &mut model);
    assert_matches!(app.view(&model).screen, Screen::ReportForm { .. });

    change(&app, &mut model, Field::Description, "flooded basement");
    let update = app.update(Event::CancelReport, &mut model);
    assert!(has_render(&update.effects));
    assert!(!model.is_form_visible());

    app.update(Event::OpenReportForm, &mut model);
    assert_eq!(model.form.as_ref().unwrap().draft.description, "");
}

#[test]
fn six_kids_escalates_with_high_priority_warning() {
    let app = AppTester::<App, Effect>::default();
    let mut model = open_form(&app);

    let effects = change(&app, &mut model, Field::KidsAffected, "6");

    let draft = &model.form.as_ref().unwrap().draft;
    assert_eq!(draft.emergency_status, EmergencyStatus::Urgent);
    assert_eq!(draft.kids_affected.get(), 6);

    let shown = notifications(&effects);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].message, ESCALATION_MESSAGE);
    assert_eq!(shown[0].severity, Severity::Error);
    assert_eq!(shown[0].priority, Priority::High);
    assert_eq!(shown[0].duration_ms, 5000);
}

#[test]
fn five_kids_leaves_status_alone() {
    let app = AppTester::<App, Effect>::default();
    let mut model = open_form(&app);

    let effects = change(&app, &mut model, Field::KidsAffected, "5");
    assert!(notifications(&effects).is_empty());
    assert_eq!(
        model.form.as_ref().unwrap().draft.emergency_status,
        EmergencyStatus::Normal
    );

    change(&app, &mut model, Field::EmergencyStatus, "urgent");
    change(&app, &mut model, Field::KidsAffected, "2");
    assert_eq!(
        model.form.as_ref().unwrap().draft.emergency_status,
        EmergencyStatus::Urgent
    );
}

#[test]
fn status_cannot_be_downgraded_while_kids_above_threshold() {
    let app = AppTester::<App, Effect>::default();
    let mut model = open_form(&app);

    change(&app, &mut model, Field::KidsAffected, "9");
    let effects = change(&app, &mut model, Field::EmergencyStatus, "normal");

    assert!(notifications(&effects).is_empty());
    assert_eq!(
        model.form.as_ref().unwrap().draft.emergency_status,
        EmergencyStatus::Urgent
    );
    assert!(app.view(&model).form().unwrap().emergency_status_locked);
}

#[test]
fn malformed_count_is_ignored() {
    let app = AppTester::<App, Effect>::default();
    let mut model = open_form(&app);

    change(&app, &mut model, Field::AdultsAffected, "3");
    let effects = change(&app, &mut model, Field::AdultsAffected, "three");

    assert!(has_render(&effects));
    assert!(notifications(&effects).is_empty());
    assert_eq!(model.form.as_ref().unwrap().draft.adults_affected.get(), 3);
}

#[test]
fn cleared_count_reads_as_zero() {
    let app = AppTester::<App, Effect>::default();
    let mut model = open_form(&app);

    change(&app, &mut model, Field::KidsAffected, "3");
    let effects = change(&app, &mut model, Field::KidsAffected, "");

    assert!(has_render(&effects));
    assert!(notifications(&effects).is_empty());
    assert_eq!(model.form.as_ref().unwrap().draft.kids_affected.get(), 0);
    assert_eq!(app.view(&model).form().unwrap().kids_affected, 0);

    change(&app, &mut model, Field::AdultsAffected, "4");
    change(&app, &mut model, Field::AdultsAffected, "  ");
    assert_eq!(app.view(&model).form().unwrap().adults_affected, 0);
}

#[test]
fn fractional_count_is_truncated() {
    let app = AppTester::<App, Effect>::default();
    let mut model = open_form(&app);

    let effects = change(&app, &mut model, Field::KidsAffected, "5.9");
    assert!(notifications(&effects).is_empty());
    assert_eq!(model.form.as_ref().unwrap().draft.kids_affected.get(), 5);
    assert_eq!(
        model.form.as_ref().unwrap().draft.emergency_status,
        EmergencyStatus::Normal
    );

    let effects = change(&app, &mut model, Field::KidsAffected, "7.5");
    let draft = &model.form.as_ref().unwrap().draft;
    assert_eq!(draft.kids_affected.get(), 7);
    assert_eq!(draft.emergency_status, EmergencyStatus::Urgent);
    assert_eq!(notifications(&effects)[0].message, ESCALATION_MESSAGE);
}

#[test]
fn oversized_file_is_rejected_and_input_cleared() {
    let app = AppTester::<App, Effect>::default();
    let mut model = open_form(&app);

    let update = app.update(
        Event::FileSelected {
            file: FileRef::new("big.png", 26_000_000, "image/png"),
        },
        &mut model,
    );

    assert_eq!(model.form.as_ref().unwrap().draft.photo, None);
    let shown = notifications(&update.effects);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].message, "File size must be less than 25MB");
    assert_eq!(shown[0].severity, Severity::Error);
    assert_eq!(
        file_picker_ops(&update.effects),
        vec![FilePickerOperation::ClearSelection]
    );
}

#[test]
fn wrong_type_is_rejected_regardless_of_size() {
    let app = AppTester::<App, Effect>::default();
    let mut model = open_form(&app);

    let update = app.update(
        Event::FileSelected {
            file: FileRef::new("tiny.gif", 1, "image/gif"),
        },
        &mut model,
    );

    assert_eq!(model.form.as_ref().unwrap().draft.photo, None);
    let shown = notifications(&update.effects);
    assert_eq!(shown[0].message, "Only JPG, PNG, and PDF files are allowed");
    assert_eq!(
        file_picker_ops(&update.effects),
        vec![FilePickerOperation::ClearSelection]
    );
}

#[test]
fn valid_pdf_is_attached() {
    let app = AppTester::<App, Effect>::default();
    let mut model = open_form(&app);
    let file = FileRef::new("scan.pdf", 1_000_000, "application/pdf");

    let update = app.update(Event::FileSelected { file: file.clone() }, &mut model);

    assert_eq!(model.form.as_ref().unwrap().draft.photo, Some(file));
    assert!(notifications(&update.effects).is_empty());
    assert!(file_picker_ops(&update.effects).is_empty());
}

#[test]
fn picker_selection_flows_into_draft() {
    let app = AppTester::<App, Effect>::default();
    let mut model = open_form(&app);

    let update = app.update(Event::PickFileRequested, &mut model);
    let mut request = update
        .effects
        .into_iter()
        .find_map(|e| match e {
            Effect::FilePicker(request) => Some(request),
            _ => None,
        })
        .expect("file picker should open");
    assert_eq!(
        request.operation,
        FilePickerOperation::Open {
            accept: ".jpg,.jpeg,.png,.pdf".into()
        }
    );

    let file = FileRef::new("me.jpg", 2_000, "image/jpeg");
    let resolved = app
        .resolve(&mut request, FilePickerOutput::Selected(file.clone()))
        .expect("picker resolves");
    for event in resolved.events {
        app.update(event, &mut model);
    }

    assert_eq!(model.form.as_ref().unwrap().draft.photo, Some(file));
}

#[test]
fn disaster_report_submits_without_name() {
    let app = AppTester::<App, Effect>::default();
    let mut model = open_form(&app);

    change(&app, &mut model, Field::ReportType, "disaster");
    assert!(!app.view(&model).form().unwrap().show_full_name);

    let effects = submit(&app, &mut model);

    assert!(!model.is_form_visible());
    let tracking_id = model.last_tracking_id.clone().expect("tracking id");
    assert_eq!(tracking_id.as_str(), "REP123456");
    assert!(TrackingId::is_well_formed(tracking_id.as_str()));

    let shown = notifications(&effects);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].severity, Severity::Success);
    assert_eq!(shown[0].duration_ms, 5000);
    assert!(shown[0]
        .message
        .contains(&format!("Tracking ID: {tracking_id}")));

    assert_eq!(
        app.view(&model).screen,
        Screen::Home {
            call_to_action: "Report Missing Person / Disaster".into(),
            last_tracking_id: Some(tracking_id.to_string()),
        }
    );
}

#[test]
fn missing_person_without_name_is_blocked_silently() {
    let app = AppTester::<App, Effect>::default();
    let mut model = open_form(&app);
    assert_eq!(
        model.form.as_ref().unwrap().draft.report_type,
        ReportType::MissingPerson
    );

    let effects = submit(&app, &mut model);

    assert!(model.is_form_visible());
    assert!(notifications(&effects).is_empty());
    assert_eq!(model.last_tracking_id, None);
    assert_eq!(
        app.view(&model).form().unwrap().invalid_fields,
        vec![Field::FullName]
    );

    change(&app, &mut model, Field::FullName, "Jane Roe");
    assert!(app.view(&model).form().unwrap().invalid_fields.is_empty());

    submit(&app, &mut model);
    assert!(!model.is_form_visible());
}

#[test]
fn switching_to_disaster_drops_name_marker() {
    let app = AppTester::<App, Effect>::default();
    let mut model = open_form(&app);

    submit(&app, &mut model);
    assert_eq!(
        app.view(&model).form().unwrap().invalid_fields,
        vec![Field::FullName]
    );

    change(&app, &mut model, Field::ReportType, "disaster");
    let view = app.view(&model);
    let form = view.form().unwrap();
    assert!(!form.show_full_name);
    assert!(form.invalid_fields.is_empty());
}

#[test]
fn form_events_are_ignored_when_closed() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    assert!(submit(&app, &mut model).is_empty());

    let update = app.update(Event::DetectLocation, &mut model);
    assert!(update.effects.is_empty());
    assert!(!model.is_form_visible());
}

#[test]
fn configure_restricts_attachments() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();
    let config = incident_report::FormConfig::from_json(r#"{"allowed_attachments":["pdf"]}"#)
        .expect("valid config");
    app.update(Event::Configure(Box::new(config)), &mut model);
    app.update(Event::OpenReportForm, &mut model);

    let update = app.update(
        Event::FileSelected {
            file: FileRef::new("photo.png", 10, "image/png"),
        },
        &mut model,
    );

    assert_eq!(
        notifications(&update.effects)[0].message,
        "Only PDF files are allowed"
    );
    assert_eq!(app.view(&model).form().unwrap().attachment_accept, ".pdf");
}
