//! Add, edit and delete flows for every entity, routed through the dialogs.

use sd_core::{
    CalendarEvent, Choice, Client, ClientDraft, ClientStatus, Collections, CoreError, CoreResult,
    EntityKind, EventDraft, Job, JobDraft, JobStatus, LocationDraft, MapLocation, Quote,
    QuoteDraft, QuoteStatus, RecordId, RecordStore, Service, ServiceDraft, SettingsDraft, Theme,
};

use crate::app::App;
use crate::calendar::EventChange;
use crate::input::{FieldKind, Form, FormField};
use crate::modal::{ConfirmDialog, ConfirmIntent, FormDialog, FormIntent};
use crate::upload::{Upload, Uploader};

const EVENT_INPUT_ERROR: &str = "Please provide at least a title and start date/time for the event.";
const SETTINGS_INPUT_ERROR: &str = "Please provide your name and email.";
const UPLOAD_INPUT_ERROR: &str = "Please provide the path of an image file.";

fn client_form(draft: &ClientDraft) -> Form {
    Form::new(vec![
        FormField::text("Client Name", draft.name.clone()),
        FormField::text("Contact Person", draft.contact.clone()),
        FormField::new("Last Interaction", FieldKind::Date, draft.last_interaction.clone()),
        FormField::choice("Status", ClientStatus::labels(), &draft.status),
    ])
}

fn client_draft(form: &Form) -> ClientDraft {
    ClientDraft {
        name: form.value("Client Name"),
        contact: form.value("Contact Person"),
        last_interaction: form.value("Last Interaction"),
        status: form.value("Status"),
    }
}

fn job_form(draft: &JobDraft, clients: Vec<String>) -> Form {
    Form::new(vec![
        FormField::text("Job Title", draft.title.clone()),
        FormField::new("Client", FieldKind::Suggest(clients), draft.client.clone()),
        FormField::choice("Status", JobStatus::labels(), &draft.status),
        FormField::new("Due Date", FieldKind::Date, draft.due_date.clone()),
    ])
}

fn job_draft(form: &Form) -> JobDraft {
    JobDraft {
        title: form.value("Job Title"),
        client: form.value("Client"),
        status: form.value("Status"),
        due_date: form.value("Due Date"),
    }
}

fn quote_form(draft: &QuoteDraft, clients: Vec<String>) -> Form {
    Form::new(vec![
        FormField::new("Client", FieldKind::Suggest(clients), draft.client.clone()),
        FormField::new("Amount", FieldKind::Number, draft.amount.clone()),
        FormField::choice("Status", QuoteStatus::labels(), &draft.status),
        FormField::new("Created Date", FieldKind::Date, draft.created_date.clone()),
    ])
}

fn quote_draft(form: &Form) -> QuoteDraft {
    QuoteDraft {
        client: form.value("Client"),
        amount: form.value("Amount"),
        status: form.value("Status"),
        created_date: form.value("Created Date"),
    }
}

fn service_form(draft: &ServiceDraft) -> Form {
    Form::new(vec![FormField::text("Service Name", draft.name.clone())])
}

fn service_draft(form: &Form) -> ServiceDraft {
    ServiceDraft {
        name: form.value("Service Name"),
    }
}

fn location_form(latitude: f64, longitude: f64, draft: &LocationDraft) -> Form {
    Form::new(vec![
        FormField::new("Latitude", FieldKind::ReadOnly, format!("{latitude:.6}")),
        FormField::new("Longitude", FieldKind::ReadOnly, format!("{longitude:.6}")),
        FormField::text("Name", draft.name.clone()),
        FormField::text("Description", draft.description.clone()),
    ])
}

fn location_draft(form: &Form) -> LocationDraft {
    LocationDraft {
        name: form.value("Name"),
        description: form.value("Description"),
    }
}

fn event_draft(form: &Form) -> EventDraft {
    EventDraft {
        title: form.value("Event Title"),
        start: form.value("Start"),
        end: form.value("End"),
    }
}

/// Open an empty form for a new record.
pub(crate) fn start_add<S: RecordStore>(app: &mut App<S>, kind: EntityKind) {
    let clients = app.data.client_names();
    let form = match kind {
        EntityKind::Client => client_form(&ClientDraft::default()),
        EntityKind::Job => job_form(&JobDraft::default(), clients),
        EntityKind::Quote => quote_form(&QuoteDraft::default(), clients),
        EntityKind::Service => service_form(&ServiceDraft::default()),
        // Locations are added by clicking the map.
        EntityKind::Location => return,
    };
    let title = format!("Add New {}", kind.title());
    app.modal.open(FormDialog::new(title, form, FormIntent::Add(kind)));
}

/// Open a form pre-filled from an existing record. Unknown ids are ignored.
pub(crate) fn start_edit<S: RecordStore>(app: &mut App<S>, kind: EntityKind, id: &RecordId) {
    let clients = app.data.client_names();
    let data = &app.data;
    let form = match kind {
        EntityKind::Client => find(&data.clients, id).map(|client| client_form(&client.into())),
        EntityKind::Job => find(&data.jobs, id).map(|job| job_form(&job.into(), clients)),
        EntityKind::Quote => find(&data.quotes, id).map(|quote| quote_form(&quote.into(), clients)),
        EntityKind::Service => find(&data.services, id).map(|service| service_form(&service.into())),
        EntityKind::Location => find(&data.locations, id).map(|location| {
            location_form(location.latitude, location.longitude, &location.into())
        }),
    };
    let Some(form) = form else {
        tracing::debug!(id = %id, kind = kind.label(), "edit target no longer exists");
        return;
    };
    let title = format!("Edit {}", kind.title());
    app.modal
        .open(FormDialog::new(title, form, FormIntent::Edit(kind, id.clone())));
}

/// Ask for confirmation before deleting a record.
pub(crate) fn start_delete<S: RecordStore>(app: &mut App<S>, kind: EntityKind, id: &RecordId) {
    if !app.data.contains(kind, id) {
        return;
    }
    app.modal.confirm(ConfirmDialog::new(
        format!("Delete {}", kind.title()),
        kind.delete_message(),
        ConfirmIntent::Delete(kind, id.clone()),
    ));
}

pub(crate) fn start_add_event<S: RecordStore>(app: &mut App<S>) {
    let start = app
        .calendar
        .widget()
        .map_or(app.today, |widget| widget.cursor())
        .format("%Y-%m-%d")
        .to_string();
    let form = Form::new(vec![
        FormField::text("Event Title", ""),
        FormField::new("Start", FieldKind::DateTime, start),
        FormField::new("End", FieldKind::DateTime, ""),
    ]);
    app.modal
        .open(FormDialog::new("Add New Event", form, FormIntent::AddEvent));
}

/// Show a read-only summary of an event with a delete action.
pub(crate) fn show_event_details<S: RecordStore>(app: &mut App<S>, id: &RecordId) {
    let Some(event) = find(&app.data.events, id) else {
        return;
    };
    let mut body = format!("Start: {}", event.start);
    if let Some(end) = event.end {
        body.push_str(&format!("\nEnd: {end}"));
    }
    body.push_str("\n\nPress d to delete this event.");
    let dialog = FormDialog::new(
        event.title.clone(),
        Form::default(),
        FormIntent::EventDetails(id.clone()),
    )
    .with_body(body)
    .with_delete();
    app.modal.open(dialog);
}

/// Ask whether to add a location where the map was clicked.
pub(crate) fn request_location_at<S: RecordStore>(app: &mut App<S>, latitude: f64, longitude: f64) {
    app.modal.confirm(ConfirmDialog::new(
        "Add Location Here?",
        format!("Do you want to add a new location at Lat: {latitude:.6}, Lon: {longitude:.6}?"),
        ConfirmIntent::AddLocationHere {
            latitude,
            longitude,
        },
    ));
}

pub(crate) fn start_clear_locations<S: RecordStore>(app: &mut App<S>) {
    app.modal.confirm(ConfirmDialog::new(
        "Clear All Markers",
        "Are you sure you want to delete all map markers? This cannot be undone.",
        ConfirmIntent::ClearLocations,
    ));
}

pub(crate) fn open_settings<S: RecordStore>(app: &mut App<S>) {
    let draft = SettingsDraft::from(&app.data.settings);
    let form = Form::new(vec![
        FormField::text("Your Name", draft.user_name),
        FormField::text("Email", draft.user_email),
        FormField::choice("Theme", Theme::labels(), &draft.theme),
    ]);
    app.modal
        .open(FormDialog::new("Settings", form, FormIntent::Settings));
}

pub(crate) fn open_upload<S: RecordStore>(app: &mut App<S>) {
    let form = Form::new(vec![FormField::text("Image Path", "")]);
    app.modal.open(
        FormDialog::new("Upload Profile Picture", form, FormIntent::UploadPicture)
            .with_body("PNG, JPEG, GIF, WebP or SVG."),
    );
}

/// Validate and apply the open form. Invalid input leaves the form open under
/// an error dialog and changes nothing.
pub(crate) fn save_form<S: RecordStore>(app: &mut App<S>) {
    let Some(dialog) = app.modal.form() else {
        return;
    };
    let intent = dialog.intent.clone();
    let form = dialog.form.clone();
    let (result, error_message) = match &intent {
        FormIntent::Add(kind) => (add_record(app, *kind, &form), kind.input_error_message()),
        FormIntent::Edit(kind, id) => (edit_record(app, *kind, id, &form), kind.input_error_message()),
        FormIntent::AddEvent => (add_event(app, &form), EVENT_INPUT_ERROR),
        FormIntent::AddLocation {
            latitude,
            longitude,
        } => (
            add_location(app, *latitude, *longitude, &form),
            EntityKind::Location.input_error_message(),
        ),
        FormIntent::Settings => (save_settings(app, &form), SETTINGS_INPUT_ERROR),
        FormIntent::UploadPicture => (start_upload(app, &form), UPLOAD_INPUT_ERROR),
        FormIntent::EventDetails(_) => (Ok(()), ""),
    };
    match result {
        Ok(()) => app.modal.close(),
        Err(CoreError::Validation(detail)) => {
            tracing::debug!(detail = %detail, "form rejected");
            app.modal.confirm(ConfirmDialog::notice(
                "Input Error",
                format!("{error_message}\n({detail})"),
            ));
        }
        Err(err) => {
            app.status = Some(err.to_string());
        }
    }
}

/// Handle the delete action of a details dialog.
pub(crate) fn delete_from_form<S: RecordStore>(app: &mut App<S>) {
    let Some(FormIntent::EventDetails(id)) = app.modal.form().map(|dialog| dialog.intent.clone())
    else {
        return;
    };
    app.modal.confirm(ConfirmDialog::new(
        "Delete Event",
        "Are you sure you want to delete this event?",
        ConfirmIntent::DeleteEvent(id),
    ));
}

/// Apply the answer to a confirmation dialog.
pub(crate) fn resolve_confirm<S: RecordStore>(app: &mut App<S>, intent: ConfirmIntent, confirmed: bool) {
    if !confirmed {
        return;
    }
    match intent {
        ConfirmIntent::Delete(kind, id) => {
            if !app.data.remove(kind, &id) {
                tracing::debug!(id = %id, kind = kind.label(), "delete target no longer exists");
                return;
            }
            tracing::info!(id = %id, kind = kind.label(), "deleted record");
            app.refresh(kind);
            app.persist_all();
        }
        ConfirmIntent::DeleteEvent(id) => {
            if app.data.remove_event(&id) {
                tracing::info!(id = %id, "deleted event");
                app.persist_all();
                if let Some(widget) = app.calendar.widget_mut() {
                    widget.remove_event(&id);
                }
            }
            app.modal.close();
        }
        ConfirmIntent::AddLocationHere {
            latitude,
            longitude,
        } => {
            let form = location_form(latitude, longitude, &LocationDraft::default());
            app.modal.open(FormDialog::new(
                "Add Map Location",
                form,
                FormIntent::AddLocation {
                    latitude,
                    longitude,
                },
            ));
        }
        ConfirmIntent::ClearLocations => {
            let removed = app.data.len(EntityKind::Location);
            app.data.locations.clear();
            tracing::info!(removed, "cleared map locations");
            app.refresh(EntityKind::Location);
            app.persist_all();
        }
        ConfirmIntent::Notice => {}
    }
}

/// Store a dragged or resized event's new times.
pub(crate) fn apply_event_change<S: RecordStore>(app: &mut App<S>, change: &EventChange) {
    let Some(event) = app.data.event_mut(&change.id) else {
        return;
    };
    event.start = change.start;
    event.end = change.end;
    tracing::info!(id = %change.id, start = %change.start, "moved event");
    app.persist_all();
}

/// Store a dropped marker's new coordinates.
pub(crate) fn move_location<S: RecordStore>(app: &mut App<S>, id: &RecordId, latitude: f64, longitude: f64) {
    let Some(location) = app.data.location_mut(id) else {
        return;
    };
    location.latitude = latitude;
    location.longitude = longitude;
    tracing::info!(id = %id, latitude, longitude, "moved map location");
    app.views.refresh(EntityKind::Location, &app.data);
    app.persist_all();
}

/// Assign a finished upload to the profile picture.
pub(crate) fn finish_upload<S: RecordStore>(app: &mut App<S>, upload: Upload) {
    match upload.outcome {
        Ok(data_uri) => {
            app.status = None;
            app.data.settings.profile_picture = data_uri;
            tracing::info!(path = %upload.path.display(), "profile picture updated");
            if app.persist_all() {
                app.modal.confirm(ConfirmDialog::notice(
                    "Profile Picture Updated",
                    "Your profile picture has been updated!",
                ));
            }
        }
        Err(reason) => {
            tracing::warn!(path = %upload.path.display(), reason = %reason, "profile picture upload failed");
            app.status = Some(format!("Upload failed: {reason}"));
        }
    }
}

fn find<'a, T: sd_core::Record>(records: &'a [T], id: &RecordId) -> Option<&'a T> {
    records.iter().find(|record| record.id() == id)
}

fn add_record<S: RecordStore>(app: &mut App<S>, kind: EntityKind, form: &Form) -> CoreResult<()> {
    let id = Collections::new_id(kind);
    match kind {
        EntityKind::Client => app.data.clients.push(Client::from_draft(id.clone(), &client_draft(form))?),
        EntityKind::Job => app.data.jobs.push(Job::from_draft(id.clone(), &job_draft(form))?),
        EntityKind::Quote => app.data.quotes.push(Quote::from_draft(id.clone(), &quote_draft(form))?),
        EntityKind::Service => {
            app.data.services.push(Service::from_draft(id.clone(), &service_draft(form))?);
        }
        EntityKind::Location => {
            return Err(CoreError::Validation(
                "locations are added from the map".into(),
            ))
        }
    }
    tracing::info!(id = %id, kind = kind.label(), "added record");
    app.refresh(kind);
    app.persist_all();
    Ok(())
}

fn edit_record<S: RecordStore>(
    app: &mut App<S>,
    kind: EntityKind,
    id: &RecordId,
    form: &Form,
) -> CoreResult<()> {
    let data = &mut app.data;
    let applied = match kind {
        EntityKind::Client => data.client_mut(id).map(|client| client.apply(&client_draft(form))),
        EntityKind::Job => data.job_mut(id).map(|job| job.apply(&job_draft(form))),
        EntityKind::Quote => data.quote_mut(id).map(|quote| quote.apply(&quote_draft(form))),
        EntityKind::Service => data
            .service_mut(id)
            .map(|service| service.apply(&service_draft(form))),
        EntityKind::Location => data
            .location_mut(id)
            .map(|location| location.apply(&location_draft(form))),
    };
    match applied {
        Some(result) => result?,
        None => {
            tracing::debug!(id = %id, kind = kind.label(), "edit target vanished before save");
            return Ok(());
        }
    }
    tracing::info!(id = %id, kind = kind.label(), "updated record");
    app.refresh(kind);
    app.persist_all();
    Ok(())
}

fn add_event<S: RecordStore>(app: &mut App<S>, form: &Form) -> CoreResult<()> {
    let event = CalendarEvent::from_draft(Collections::new_event_id(), &event_draft(form))?;
    tracing::info!(id = %event.id, "added event");
    app.data.events.push(event);
    app.persist_all();
    app.calendar.show(&app.data.events, app.today);
    Ok(())
}

fn add_location<S: RecordStore>(
    app: &mut App<S>,
    latitude: f64,
    longitude: f64,
    form: &Form,
) -> CoreResult<()> {
    let id = Collections::new_id(EntityKind::Location);
    let location = MapLocation::from_draft(id, latitude, longitude, &location_draft(form))?;
    tracing::info!(id = %location.id, latitude, longitude, "added map location");
    app.data.locations.push(location);
    app.persist_all();
    app.refresh(EntityKind::Location);
    Ok(())
}

fn save_settings<S: RecordStore>(app: &mut App<S>, form: &Form) -> CoreResult<()> {
    let draft = SettingsDraft {
        user_name: form.value("Your Name"),
        user_email: form.value("Email"),
        theme: form.value("Theme"),
    };
    app.data.settings.apply(&draft)?;
    tracing::info!(theme = app.data.settings.theme.label(), "settings updated");
    if app.persist_all() {
        app.modal.confirm(ConfirmDialog::notice(
            "Settings Saved",
            "Your settings have been updated successfully!",
        ));
    }
    Ok(())
}

fn start_upload<S: RecordStore>(app: &mut App<S>, form: &Form) -> CoreResult<()> {
    let path = form.value("Image Path");
    let path = path.trim();
    if path.is_empty() {
        return Err(CoreError::Validation("image path cannot be empty".into()));
    }
    if app.uploader.is_none() {
        match Uploader::new() {
            Ok(uploader) => app.uploader = Some(uploader),
            Err(err) => {
                tracing::error!(error = %err, "cannot start uploads");
                return Err(CoreError::Storage(format!("{err:#}")));
            }
        }
    }
    if let Some(uploader) = app.uploader.as_mut() {
        uploader.start(path.into());
        app.status = Some(format!("Uploading {path}…"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::{Section, SectionView};
    use chrono::NaiveDate;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use sd_core::{MemoryStore, StoreKey};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 20).unwrap()
    }

    fn empty_app() -> App<MemoryStore> {
        let store = MemoryStore::new();
        Collections::default().persist_all(&store).unwrap();
        App::new(store, Section::Home, today())
    }

    fn seeded_app(section: Section) -> App<MemoryStore> {
        App::new(MemoryStore::new(), section, today())
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn fill(app: &mut App<MemoryStore>, values: &[(&str, &str)]) {
        let dialog = app.modal.form_mut().expect("form open");
        for (label, value) in values {
            dialog.form.set_value(label, *value);
        }
    }

    #[test]
    fn adding_first_client_replaces_placeholder() {
        let mut app = empty_app();
        app.show_section(Section::Clients);
        assert!(matches!(app.views.get(EntityKind::Client).view, SectionView::Empty(_)));

        start_add(&mut app, EntityKind::Client);
        fill(
            &mut app,
            &[
                ("Client Name", "Acme Corp"),
                ("Contact Person", "John Doe"),
                ("Last Interaction", "2025-08-15"),
                ("Status", "Active"),
            ],
        );
        let writes = app.store().writes();
        save_form(&mut app);

        let rows = app.views.get(EntityKind::Client).view.rows().to_vec();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells, vec!["Acme Corp", "John Doe", "2025-08-15", "Active"]);
        assert!(app.modal.form().is_none());
        assert!(app.store().writes() > writes);
    }

    #[test]
    fn job_keeps_unknown_client_name() {
        let mut app = seeded_app(Section::Jobs);
        start_add(&mut app, EntityKind::Job);
        fill(
            &mut app,
            &[
                ("Job Title", "Warehouse Fit-out"),
                ("Client", "Nonexistent LLC"),
                ("Status", "Planned"),
                ("Due Date", "2025-12-01"),
            ],
        );
        save_form(&mut app);
        let job = app.data().jobs.last().unwrap();
        assert_eq!(job.client, "Nonexistent LLC");
        assert!(job.id.as_str().starts_with("job_"));
    }

    #[test]
    fn invalid_quote_amount_changes_nothing() {
        let mut app = seeded_app(Section::Quotes);
        let before = app.data().quotes.clone();
        let writes = app.store().writes();
        start_add(&mut app, EntityKind::Quote);
        fill(
            &mut app,
            &[
                ("Client", "Acme Corp"),
                ("Amount", "abc"),
                ("Status", "Pending"),
                ("Created Date", "2025-08-01"),
            ],
        );
        save_form(&mut app);

        assert_eq!(app.data().quotes, before);
        assert_eq!(app.store().writes(), writes);
        let error = app.modal.confirm_dialog().expect("error dialog");
        assert_eq!(error.title, "Input Error");
        assert!(error.message.starts_with("Please fill all required fields for the quote."));
        assert!(app.modal.form().is_some());
    }

    #[test]
    fn empty_field_blocks_save_until_corrected() {
        let mut app = seeded_app(Section::MyServices);
        start_add(&mut app, EntityKind::Service);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.data().services.len(), 3);
        press(&mut app, KeyCode::Esc);
        assert!(app.modal.confirm_dialog().is_none());
        for c in "Landscaping".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.data().services.len(), 4);
        assert_eq!(app.data().services[3].name, "Landscaping");
    }

    #[test]
    fn edit_keeps_id_and_updates_fields() {
        let mut app = seeded_app(Section::Clients);
        let id = RecordId::from("cli_002");
        start_edit(&mut app, EntityKind::Client, &id);
        assert_eq!(app.modal.form().unwrap().form.value("Client Name"), "Globex Inc.");
        fill(&mut app, &[("Status", "Active"), ("Contact Person", "Hank Scorpio")]);
        save_form(&mut app);

        let client = app.data().clients.iter().find(|client| client.id == id).unwrap();
        assert_eq!(client.name, "Globex Inc.");
        assert_eq!(client.contact, "Hank Scorpio");
        assert_eq!(client.status, ClientStatus::Active);
        assert_eq!(app.summary.new_leads, 0);
    }

    #[test]
    fn edit_of_missing_record_is_ignored() {
        let mut app = seeded_app(Section::Clients);
        start_edit(&mut app, EntityKind::Client, &RecordId::from("cli_404"));
        assert!(app.modal.form().is_none());
    }

    #[test]
    fn delete_requires_confirmation_and_is_idempotent() {
        let mut app = seeded_app(Section::Jobs);
        let id = RecordId::from("job_001");

        start_delete(&mut app, EntityKind::Job, &id);
        assert_eq!(app.modal.confirm_dialog().unwrap().title, "Delete Job");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.data().jobs.len(), 2);

        start_delete(&mut app, EntityKind::Job, &id);
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.data().len(EntityKind::Job), 1);
        start_delete(&mut app, EntityKind::Job, &id);
        assert!(app.modal.confirm_dialog().is_none());
        let writes = app.store().writes();

        resolve_confirm(&mut app, ConfirmIntent::Delete(EntityKind::Job, id), true);
        assert_eq!(app.data().jobs.len(), 1);
        assert_eq!(app.store().writes(), writes);
    }

    #[test]
    fn list_keys_target_selected_row() {
        let mut app = seeded_app(Section::Clients);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));
        let intent = app.modal.confirm_dialog().map(|dialog| dialog.intent.clone());
        assert_eq!(
            intent,
            Some(ConfirmIntent::Delete(EntityKind::Client, RecordId::from("cli_002")))
        );
    }

    #[test]
    fn added_records_survive_reload() {
        let mut app = empty_app();
        start_add(&mut app, EntityKind::Service);
        fill(&mut app, &[("Service Name", "Plumbing")]);
        save_form(&mut app);
        start_add(&mut app, EntityKind::Quote);
        fill(
            &mut app,
            &[
                ("Client", "Acme Corp"),
                ("Amount", "2500.5"),
                ("Created Date", "2025-08-02"),
            ],
        );
        save_form(&mut app);

        let reloaded = Collections::load(app.store());
        assert_eq!(&reloaded, app.data());
        assert_eq!(reloaded.quotes[0].status, QuoteStatus::Pending);
    }

    #[test]
    fn dragging_event_changes_only_its_times() {
        let mut app = seeded_app(Section::Calendar);
        press(&mut app, KeyCode::Char('>'));

        let stored = app.store().contents(StoreKey::CalendarEvents).unwrap();
        let events: Vec<CalendarEvent> = serde_json::from_str(&stored).unwrap();
        let seeded = Collections::seeded().events;
        assert_eq!(events.len(), seeded.len());
        assert_eq!(events[0].start.to_string(), "2025-08-21 10:00");
        assert_eq!(events[0].title, seeded[0].title);
        assert_eq!(events[0].end, None);
        assert_eq!(events[1..], seeded[1..]);
    }

    #[test]
    fn event_details_delete_updates_widget_without_rebuild() {
        let mut app = seeded_app(Section::Calendar);
        let builds = app.calendar.builds();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.modal.form().unwrap().title, "Team Meeting");
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.modal.confirm_dialog().unwrap().title, "Delete Event");
        press(&mut app, KeyCode::Char('y'));

        assert_eq!(app.data().events.len(), 2);
        assert!(app.modal.form().is_none());
        assert_eq!(app.calendar.widget().unwrap().event_count(), 2);
        assert_eq!(app.calendar.builds(), builds);
    }

    #[test]
    fn event_without_end_is_stored_as_absent() {
        let mut app = seeded_app(Section::Calendar);
        press(&mut app, KeyCode::Char('a'));
        fill(&mut app, &[("Event Title", "Site Visit"), ("Start", "2025-08-28 09:30")]);
        press(&mut app, KeyCode::Enter);
        let event = app.data().events.last().unwrap();
        assert_eq!(event.title, "Site Visit");
        assert_eq!(event.end, None);
        assert!(event.id.as_str().starts_with("event_"));
        assert_eq!(app.calendar.widget().unwrap().event_count(), 4);
    }

    #[test]
    fn event_without_title_is_rejected() {
        let mut app = seeded_app(Section::Calendar);
        start_add_event(&mut app);
        save_form(&mut app);
        let error = app.modal.confirm_dialog().unwrap();
        assert!(error.message.starts_with(EVENT_INPUT_ERROR));
        assert_eq!(app.data().events.len(), 3);
    }

    #[test]
    fn map_click_with_empty_name_adds_nothing() {
        let mut app = seeded_app(Section::Map);
        press(&mut app, KeyCode::Enter);
        let confirm = app.modal.confirm_dialog().unwrap();
        assert_eq!(confirm.title, "Add Location Here?");
        assert_eq!(
            confirm.message,
            "Do you want to add a new location at Lat: 51.505000, Lon: -0.090000?"
        );
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.modal.form().unwrap().form.value("Latitude"), "51.505000");

        press(&mut app, KeyCode::Enter);
        let error = app.modal.confirm_dialog().unwrap();
        assert_eq!(error.title, "Input Error");
        assert!(error.message.starts_with("Please provide a name for the location."));
        assert_eq!(app.data().locations.len(), 2);
    }

    #[test]
    fn map_click_with_name_adds_marker() {
        let mut app = seeded_app(Section::Map);
        let inits = app.map.inits();
        request_location_at(&mut app, 51.52, -0.1);
        press(&mut app, KeyCode::Char('y'));
        fill(&mut app, &[("Name", "Depot"), ("Description", "")]);
        press(&mut app, KeyCode::Enter);

        let location = app.data().locations.last().unwrap();
        assert_eq!(location.name, "Depot");
        assert_eq!(location.description, None);
        assert!((location.latitude - 51.52).abs() < 1e-9);
        assert_eq!(app.map.view().unwrap().markers().len(), 3);
        assert_eq!(app.map.inits(), inits + 1);
        assert_eq!(app.views.get(EntityKind::Location).view.rows().len(), 3);
    }

    #[test]
    fn dropping_marker_persists_coordinates() {
        let mut app = seeded_app(Section::Map);
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Char('m'));

        let stored = app.store().contents(StoreKey::MapLocations).unwrap();
        let locations: Vec<MapLocation> = serde_json::from_str(&stored).unwrap();
        assert!(locations[0].latitude > 51.505);
        assert!((locations[0].longitude + 0.09).abs() < 1e-9);
        assert_eq!(locations[1], Collections::seeded().locations[1]);
    }

    #[test]
    fn clear_markers_empties_map() {
        let mut app = seeded_app(Section::Map);
        press(&mut app, KeyCode::Char('C'));
        assert_eq!(app.modal.confirm_dialog().unwrap().title, "Clear All Markers");
        press(&mut app, KeyCode::Char('y'));
        assert!(app.data().locations.is_empty());
        assert!(app.map.view().unwrap().markers().is_empty());
    }

    #[test]
    fn settings_save_shows_notice_and_switches_theme() {
        let mut app = seeded_app(Section::Home);
        press(&mut app, KeyCode::Char('s'));
        fill(&mut app, &[("Your Name", "Jo Park"), ("Theme", "dark")]);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.data().settings.user_name, "Jo Park");
        assert_eq!(app.data().settings.theme, Theme::Dark);
        assert_eq!(app.modal.confirm_dialog().unwrap().title, "Settings Saved");
        press(&mut app, KeyCode::Enter);
        assert!(!app.modal.is_open());
    }

    #[test]
    fn invalid_edit_changes_nothing() {
        let mut app = seeded_app(Section::Clients);
        let id = RecordId::from("cli_001");
        let before = app.data().clients.clone();
        let writes = app.store().writes();
        start_edit(&mut app, EntityKind::Client, &id);
        fill(&mut app, &[("Contact Person", "  ")]);
        save_form(&mut app);

        assert_eq!(app.data().clients, before);
        assert_eq!(app.store().writes(), writes);
        let error = app.modal.confirm_dialog().expect("error dialog");
        assert_eq!(error.title, "Input Error");
        assert!(error.message.starts_with("Please fill all required fields for the client."));
        let form = app.modal.form().expect("form still open");
        assert_eq!(form.form.value("Client Name"), "Acme Corp");
    }

    #[test]
    fn failed_persist_is_reported_not_fatal() {
        let mut app = seeded_app(Section::MyServices);
        app.store().set_fail_writes(true);
        start_add(&mut app, EntityKind::Service);
        fill(&mut app, &[("Service Name", "Roofing")]);
        save_form(&mut app);
        assert_eq!(app.data().services.len(), 4);
        assert!(app.status.as_deref().unwrap().starts_with("Could not save changes"));
    }

    #[test]
    fn finished_upload_replaces_picture() {
        let mut app = seeded_app(Section::Home);
        finish_upload(
            &mut app,
            Upload {
                path: "me.png".into(),
                outcome: Ok("data:image/png;base64,aGk=".into()),
            },
        );
        assert_eq!(app.data().settings.profile_picture, "data:image/png;base64,aGk=");
        assert_eq!(app.modal.confirm_dialog().unwrap().title, "Profile Picture Updated");
        let stored = app.store().contents(StoreKey::UserSettings).unwrap();
        assert!(stored.contains("data:image/png;base64,aGk="));
    }

    #[test]
    fn last_finished_upload_wins() {
        let mut app = seeded_app(Section::Home);
        for (path, data_uri) in [
            ("first.png", "data:image/png;base64,Zmlyc3Q="),
            ("second.png", "data:image/png;base64,c2Vjb25k"),
        ] {
            finish_upload(
                &mut app,
                Upload {
                    path: path.into(),
                    outcome: Ok(data_uri.into()),
                },
            );
        }
        assert_eq!(
            app.data().settings.profile_picture,
            "data:image/png;base64,c2Vjb25k"
        );
        let stored = app.store().contents(StoreKey::UserSettings).unwrap();
        assert!(stored.contains("c2Vjb25k"));
        assert!(!stored.contains("Zmlyc3Q="));
    }

    #[test]
    fn failed_upload_keeps_picture() {
        let mut app = seeded_app(Section::Home);
        let before = app.data().settings.profile_picture.clone();
        let writes = app.store().writes();
        finish_upload(
            &mut app,
            Upload {
                path: "notes.txt".into(),
                outcome: Err(sd_utils::UtilsError::Parse("unsupported image type".into())),
            },
        );
        assert_eq!(app.data().settings.profile_picture, before);
        assert_eq!(app.store().writes(), writes);
        assert!(app.status.as_deref().unwrap().starts_with("Upload failed"));
    }
}
