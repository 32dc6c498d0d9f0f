use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use sd_core::{Collections, DashboardSummary, EntityKind, RecordStore};

use crate::calendar::CalendarIntegration;
use crate::dispatch;
use crate::map::{MapEvent, MapIntegration};
use crate::modal::{FormOutcome, ModalHost};
use crate::sections::{ListViews, Section};
use crate::upload::Uploader;

/// Dashboard state: the collections, their rendered views, open dialogs and
/// the calendar and map integrations.
#[derive(Debug)]
pub struct App<S: RecordStore> {
    pub(crate) store: S,
    pub(crate) data: Collections,
    pub(crate) summary: DashboardSummary,
    pub(crate) section: Section,
    pub(crate) views: ListViews,
    pub(crate) modal: ModalHost,
    pub(crate) calendar: CalendarIntegration,
    pub(crate) map: MapIntegration,
    pub(crate) uploader: Option<Uploader>,
    pub(crate) status: Option<String>,
    pub(crate) show_help: bool,
    pub(crate) today: NaiveDate,
}

impl<S: RecordStore> App<S> {
    /// Load every collection from `store` and display `section`.
    pub fn new(store: S, section: Section, today: NaiveDate) -> Self {
        let data = Collections::load(&store);
        let mut app = Self {
            summary: DashboardSummary::compute(&data),
            views: ListViews::new(&data),
            store,
            data,
            section: Section::Home,
            modal: ModalHost::default(),
            calendar: CalendarIntegration::default(),
            map: MapIntegration::default(),
            uploader: None,
            status: None,
            show_help: false,
            today,
        };
        app.show_section(section);
        app
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn data(&self) -> &Collections {
        &self.data
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write every collection to the store and refresh the dashboard summary.
    /// A failed write is logged and reported in the status bar.
    pub(crate) fn persist_all(&mut self) -> bool {
        self.summary = DashboardSummary::compute(&self.data);
        match self.data.persist_all(&self.store) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(error = %err, "failed to persist dashboard data");
                self.status = Some(format!("Could not save changes: {err}"));
                false
            }
        }
    }

    /// Re-render a list view, and the map when locations changed.
    pub(crate) fn refresh(&mut self, kind: EntityKind) {
        self.views.refresh(kind, &self.data);
        if kind == EntityKind::Location && self.section == Section::Map {
            self.map.show(&self.data.locations);
        }
    }

    /// Switch sections. The calendar and map are rebuilt each time they are shown.
    pub fn show_section(&mut self, section: Section) {
        self.section = section;
        match section {
            Section::Calendar => self.calendar.show(&self.data.events, self.today),
            Section::Map => self.map.show(&self.data.locations),
            Section::Home
            | Section::Clients
            | Section::Jobs
            | Section::Quotes
            | Section::MyServices => {}
        }
        tracing::debug!(section = section.name(), "showing section");
    }

    /// Deliver finished profile picture uploads.
    pub fn tick(&mut self) {
        let finished = self
            .uploader
            .as_mut()
            .map(Uploader::poll)
            .unwrap_or_default();
        for upload in finished {
            dispatch::finish_upload(self, upload);
        }
    }

    /// Handle a key press. Returns true when the dashboard should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(true);
        }

        if self.modal.confirm_dialog().is_some() {
            if let Some((intent, confirmed)) = self.modal.handle_confirm_key(key) {
                dispatch::resolve_confirm(self, intent, confirmed);
            }
            return Ok(false);
        }

        if self.modal.form().is_some() {
            match self.modal.handle_form_key(key) {
                FormOutcome::Save => dispatch::save_form(self),
                FormOutcome::Delete => dispatch::delete_from_form(self),
                FormOutcome::Pending | FormOutcome::Cancelled => {}
            }
            return Ok(false);
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?' | 'q')) {
                self.show_help = false;
            }
            return Ok(false);
        }

        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.show_section(self.section.next()),
            KeyCode::BackTab => self.show_section(self.section.prev()),
            KeyCode::Char(digit @ '1'..='7') => {
                let index = digit as usize - '1' as usize;
                self.show_section(Section::ALL[index]);
            }
            KeyCode::Char('s') => dispatch::open_settings(self),
            KeyCode::Char('u') => dispatch::open_upload(self),
            _ => match self.section {
                Section::Home => {}
                Section::Clients | Section::Jobs | Section::Quotes | Section::MyServices => {
                    self.handle_list_key(key);
                }
                Section::Calendar => self.handle_calendar_key(key),
                Section::Map => self.handle_map_key(key),
            },
        }
        Ok(false)
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        let Some(kind) = self.section.entity() else {
            return;
        };
        let selected = self
            .views
            .get(kind)
            .selected_row()
            .map(|row| row.id.clone());
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.views.get_mut(kind).select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.views.get_mut(kind).select_prev(),
            KeyCode::Char('a') => dispatch::start_add(self, kind),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = selected {
                    dispatch::start_edit(self, kind, &id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = selected {
                    dispatch::start_delete(self, kind, &id);
                }
            }
            _ => {}
        }
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('a') {
            dispatch::start_add_event(self);
            return;
        }
        let today = self.today;
        let Some(widget) = self.calendar.widget_mut() else {
            return;
        };
        let change = match key.code {
            KeyCode::Char('h') | KeyCode::Left => {
                widget.move_cursor(-1);
                None
            }
            KeyCode::Char('l') | KeyCode::Right => {
                widget.move_cursor(1);
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                widget.select_next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                widget.select_prev();
                None
            }
            KeyCode::Char('[') => {
                widget.step_period(false);
                None
            }
            KeyCode::Char(']') => {
                widget.step_period(true);
                None
            }
            KeyCode::Char('t') => {
                widget.jump_to(today);
                None
            }
            KeyCode::Char('v') => {
                widget.cycle_mode();
                None
            }
            KeyCode::Char('<') => widget.drag_selected(false),
            KeyCode::Char('>') => widget.drag_selected(true),
            KeyCode::Char('-') => widget.resize_selected(false),
            KeyCode::Char('+' | '=') => widget.resize_selected(true),
            KeyCode::Enter => {
                if let Some(id) = widget.selected_event().map(|event| event.id.clone()) {
                    dispatch::show_event_details(self, &id);
                }
                None
            }
            _ => None,
        };
        if let Some(change) = change {
            dispatch::apply_event_change(self, &change);
        }
    }

    fn handle_map_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('C') => {
                dispatch::start_clear_locations(self);
                return;
            }
            KeyCode::Char('e') | KeyCode::Char('d') => {
                let selected = self
                    .map
                    .view()
                    .and_then(|view| view.selected())
                    .map(|marker| marker.location.id.clone());
                if let Some(id) = selected {
                    if key.code == KeyCode::Char('e') {
                        dispatch::start_edit(self, EntityKind::Location, &id);
                    } else {
                        dispatch::start_delete(self, EntityKind::Location, &id);
                    }
                }
                return;
            }
            _ => {}
        }
        let Some(view) = self.map.view_mut() else {
            return;
        };
        let events = match key.code {
            KeyCode::Char('k') | KeyCode::Up => {
                view.pan(1, 0);
                Vec::new()
            }
            KeyCode::Char('j') | KeyCode::Down => {
                view.pan(-1, 0);
                Vec::new()
            }
            KeyCode::Char('h') | KeyCode::Left => {
                view.pan(0, -1);
                Vec::new()
            }
            KeyCode::Char('l') | KeyCode::Right => {
                view.pan(0, 1);
                Vec::new()
            }
            KeyCode::Char('n') => {
                view.select_next();
                Vec::new()
            }
            KeyCode::Char('p') => {
                view.select_prev();
                Vec::new()
            }
            KeyCode::Char('+' | '=') => {
                view.zoom_in();
                Vec::new()
            }
            KeyCode::Char('-') => {
                view.zoom_out();
                Vec::new()
            }
            KeyCode::Char('m') => view.toggle_drag().into_iter().collect(),
            KeyCode::Enter if !view.is_dragging() => view.click(),
            KeyCode::Enter => view.toggle_drag().into_iter().collect(),
            _ => Vec::new(),
        };
        if let Some(index) = self.map.view().and_then(|view| view.selected_index()) {
            self.views.get_mut(EntityKind::Location).select_index(index);
        }
        for event in events {
            match event {
                MapEvent::AddLocationAt {
                    latitude,
                    longitude,
                } => dispatch::request_location_at(self, latitude, longitude),
                MapEvent::MarkerMoved {
                    id,
                    latitude,
                    longitude,
                } => dispatch::move_location(self, &id, latitude, longitude),
            }
        }
    }
}
