//! The application's record collections and the dashboard summary derived from them.

use chrono::NaiveDate;
use serde::Serialize;

use crate::records::{
    CalendarEvent, Client, ClientStatus, EventTime, Job, JobStatus, MapLocation, Quote,
    QuoteStatus, Record, RecordId, Service, UserSettings,
};
use crate::{load, CoreError, CoreResult, RecordStore, StoreKey};

/// Entity types handled by the generic edit/delete dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Client,
    Job,
    Quote,
    Service,
    Location,
}

impl EntityKind {
    /// Lower-case name used in messages, e.g. "client".
    pub fn label(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Job => "job",
            Self::Quote => "quote",
            Self::Service => "service",
            Self::Location => "map location",
        }
    }

    /// Capitalized name used in dialog titles, e.g. "Client".
    pub fn title(self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Job => "Job",
            Self::Quote => "Quote",
            Self::Service => "Service",
            Self::Location => "Map Location",
        }
    }

    /// Prefix of generated identifiers.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Client => "cli",
            Self::Job => "job",
            Self::Quote => "quo",
            Self::Service => "serv",
            Self::Location => "loc",
        }
    }

    /// Body of the delete confirmation dialog.
    pub fn delete_message(self) -> String {
        match self {
            Self::Location => "Are you sure you want to delete this map location?".into(),
            other => format!(
                "Are you sure you want to delete this {}? This cannot be undone.",
                other.label()
            ),
        }
    }

    /// Body of the error dialog shown when a form fails validation.
    pub fn input_error_message(self) -> &'static str {
        match self {
            Self::Client => "Please fill all required fields for the client.",
            Self::Job => "Please fill all required fields for the job.",
            Self::Quote => "Please fill all required fields for the quote.",
            Self::Service => "Please provide a service name.",
            Self::Location => "Please provide a name for the location.",
        }
    }
}

/// Prefix of generated calendar event identifiers.
pub(crate) const EVENT_ID_PREFIX: &str = "event";

/// Every collection of the dashboard plus the settings record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collections {
    pub clients: Vec<Client>,
    pub jobs: Vec<Job>,
    pub quotes: Vec<Quote>,
    pub services: Vec<Service>,
    pub events: Vec<CalendarEvent>,
    pub locations: Vec<MapLocation>,
    pub settings: UserSettings,
}

impl Collections {
    /// Load every key, substituting the seed dataset for absent or corrupt keys.
    pub fn load<S: RecordStore + ?Sized>(store: &S) -> Self {
        let seed = Self::seeded();
        Self {
            clients: load(store, StoreKey::Clients, seed.clients),
            jobs: load(store, StoreKey::Jobs, seed.jobs),
            quotes: load(store, StoreKey::Quotes, seed.quotes),
            services: load(store, StoreKey::Services, seed.services),
            events: load(store, StoreKey::CalendarEvents, seed.events),
            locations: load(store, StoreKey::MapLocations, seed.locations),
            settings: load(store, StoreKey::UserSettings, seed.settings),
        }
    }

    /// Write every collection and the settings record, whether changed or not.
    pub fn persist_all<S: RecordStore + ?Sized>(&self, store: &S) -> CoreResult<()> {
        write_key(store, StoreKey::Clients, &self.clients)?;
        write_key(store, StoreKey::Jobs, &self.jobs)?;
        write_key(store, StoreKey::Quotes, &self.quotes)?;
        write_key(store, StoreKey::Services, &self.services)?;
        write_key(store, StoreKey::CalendarEvents, &self.events)?;
        write_key(store, StoreKey::MapLocations, &self.locations)?;
        write_key(store, StoreKey::UserSettings, &self.settings)?;
        Ok(())
    }

    /// Sample data shown on first launch.
    pub fn seeded() -> Self {
        Self {
            clients: vec![
                Client {
                    id: "cli_001".into(),
                    name: "Acme Corp".into(),
                    contact: "John Doe".into(),
                    last_interaction: seed_date(2025, 8, 15),
                    status: ClientStatus::Active,
                },
                Client {
                    id: "cli_002".into(),
                    name: "Globex Inc.".into(),
                    contact: "Jane Smith".into(),
                    last_interaction: seed_date(2025, 8, 10),
                    status: ClientStatus::Pending,
                },
            ],
            jobs: vec![
                Job {
                    id: "job_001".into(),
                    title: "Office Renovation".into(),
                    client: "Acme Corp".into(),
                    status: JobStatus::InProgress,
                    due_date: seed_date(2025, 9, 30),
                },
                Job {
                    id: "job_002".into(),
                    title: "Retail Store Setup".into(),
                    client: "Globex Inc.".into(),
                    status: JobStatus::Completed,
                    due_date: seed_date(2025, 7, 20),
                },
            ],
            quotes: vec![
                Quote {
                    id: "quo_001".into(),
                    client: "Acme Corp".into(),
                    amount: 15000.0,
                    status: QuoteStatus::Pending,
                    created_date: seed_date(2025, 8, 1),
                },
                Quote {
                    id: "quo_002".into(),
                    client: "Globex Inc.".into(),
                    amount: 10000.0,
                    status: QuoteStatus::Accepted,
                    created_date: seed_date(2025, 7, 15),
                },
            ],
            services: vec![
                Service {
                    id: "serv_001".into(),
                    name: "Interior Design".into(),
                },
                Service {
                    id: "serv_002".into(),
                    name: "Construction Management".into(),
                },
                Service {
                    id: "serv_003".into(),
                    name: "Consultation".into(),
                },
            ],
            events: vec![
                seed_event("event_001", "Team Meeting", "2025-08-20T10:00"),
                seed_event("event_002", "Client Presentation", "2025-08-22T14:00"),
                seed_event("event_003", "Project Deadline", "2025-08-25"),
            ],
            locations: vec![
                MapLocation {
                    id: "loc_001".into(),
                    name: "Acme HQ".into(),
                    latitude: 51.505,
                    longitude: -0.09,
                    description: Some("Main office of Acme Corp".into()),
                },
                MapLocation {
                    id: "loc_002".into(),
                    name: "Globex Retail".into(),
                    latitude: 51.515,
                    longitude: -0.12,
                    description: Some("New retail outlet for Globex Inc.".into()),
                },
            ],
            settings: UserSettings::default(),
        }
    }

    /// Number of records of a kind.
    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Client => self.clients.len(),
            EntityKind::Job => self.jobs.len(),
            EntityKind::Quote => self.quotes.len(),
            EntityKind::Service => self.services.len(),
            EntityKind::Location => self.locations.len(),
        }
    }

    /// Whether a record of the given kind and id exists.
    pub fn contains(&self, kind: EntityKind, id: &RecordId) -> bool {
        match kind {
            EntityKind::Client => position(&self.clients, id).is_some(),
            EntityKind::Job => position(&self.jobs, id).is_some(),
            EntityKind::Quote => position(&self.quotes, id).is_some(),
            EntityKind::Service => position(&self.services, id).is_some(),
            EntityKind::Location => position(&self.locations, id).is_some(),
        }
    }

    /// Remove a record by id. Returns false when the id is not present.
    pub fn remove(&mut self, kind: EntityKind, id: &RecordId) -> bool {
        match kind {
            EntityKind::Client => remove_by_id(&mut self.clients, id),
            EntityKind::Job => remove_by_id(&mut self.jobs, id),
            EntityKind::Quote => remove_by_id(&mut self.quotes, id),
            EntityKind::Service => remove_by_id(&mut self.services, id),
            EntityKind::Location => remove_by_id(&mut self.locations, id),
        }
    }

    pub fn client_mut(&mut self, id: &RecordId) -> Option<&mut Client> {
        self.clients.iter_mut().find(|record| record.id() == id)
    }

    pub fn job_mut(&mut self, id: &RecordId) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|record| record.id() == id)
    }

    pub fn quote_mut(&mut self, id: &RecordId) -> Option<&mut Quote> {
        self.quotes.iter_mut().find(|record| record.id() == id)
    }

    pub fn service_mut(&mut self, id: &RecordId) -> Option<&mut Service> {
        self.services.iter_mut().find(|record| record.id() == id)
    }

    pub fn location_mut(&mut self, id: &RecordId) -> Option<&mut MapLocation> {
        self.locations.iter_mut().find(|record| record.id() == id)
    }

    pub fn event_mut(&mut self, id: &RecordId) -> Option<&mut CalendarEvent> {
        self.events.iter_mut().find(|record| record.id() == id)
    }

    /// Remove a calendar event by id. Returns false when the id is not present.
    pub fn remove_event(&mut self, id: &RecordId) -> bool {
        remove_by_id(&mut self.events, id)
    }

    /// Client names, offered as suggestions by job and quote forms.
    pub fn client_names(&self) -> Vec<String> {
        self.clients.iter().map(|client| client.name.clone()).collect()
    }

    /// Generate an identifier for a new record of a kind.
    pub fn new_id(kind: EntityKind) -> RecordId {
        RecordId::generate(kind.id_prefix())
    }

    /// Generate an identifier for a new calendar event.
    pub fn new_event_id() -> RecordId {
        RecordId::generate(EVENT_ID_PREFIX)
    }
}

/// Counts shown on the dashboard home section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Jobs that are planned or in progress.
    pub active_jobs: usize,
    pub jobs_in_progress: usize,
    /// Completed jobs.
    pub finished_jobs: usize,
    /// Clients still pending.
    pub new_leads: usize,
    pub total_jobs: usize,
    pub total_clients: usize,
}

impl DashboardSummary {
    pub fn compute(collections: &Collections) -> Self {
        let count_jobs = |wanted: &[JobStatus]| {
            collections
                .jobs
                .iter()
                .filter(|job| wanted.contains(&job.status))
                .count()
        };
        Self {
            active_jobs: count_jobs(&[JobStatus::Planned, JobStatus::InProgress]),
            jobs_in_progress: count_jobs(&[JobStatus::InProgress]),
            finished_jobs: count_jobs(&[JobStatus::Completed]),
            new_leads: collections
                .clients
                .iter()
                .filter(|client| client.status == ClientStatus::Pending)
                .count(),
            total_jobs: collections.jobs.len(),
            total_clients: collections.clients.len(),
        }
    }

    pub fn active_jobs_share(&self) -> String {
        share(self.active_jobs, self.total_jobs, '+')
    }

    pub fn jobs_in_progress_share(&self) -> String {
        share(self.jobs_in_progress, self.total_jobs, '-')
    }

    pub fn finished_jobs_share(&self) -> String {
        share(self.finished_jobs, self.total_jobs, '+')
    }

    pub fn new_leads_share(&self) -> String {
        share(self.new_leads, self.total_clients, '+')
    }
}

fn share(count: usize, total: usize, sign: char) -> String {
    if total == 0 {
        return "0%".into();
    }
    #[allow(clippy::cast_precision_loss)]
    let percent = count as f64 * 100.0 / total as f64;
    format!("{sign}{percent:.1}%")
}

fn write_key<S, T>(store: &S, key: StoreKey, value: &T) -> CoreResult<()>
where
    S: RecordStore + ?Sized,
    T: Serialize + ?Sized,
{
    let contents =
        serde_json::to_string_pretty(value).map_err(|err| CoreError::Storage(err.to_string()))?;
    store.write(key, &contents)
}

fn position<T: Record>(records: &[T], id: &RecordId) -> Option<usize> {
    records.iter().position(|record| record.id() == id)
}

fn remove_by_id<T: Record>(records: &mut Vec<T>, id: &RecordId) -> bool {
    match position(records, id) {
        Some(index) => {
            records.remove(index);
            true
        }
        None => false,
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn seed_event(id: &str, title: &str, start: &str) -> CalendarEvent {
    CalendarEvent {
        id: id.into(),
        title: title.into(),
        start: EventTime::parse(start).unwrap_or(EventTime::Date(NaiveDate::default())),
        end: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ClientDraft, JobDraft};
    use crate::MemoryStore;

    #[test]
    fn empty_store_loads_seed_dataset() {
        let store = MemoryStore::new();
        let collections = Collections::load(&store);
        assert_eq!(collections, Collections::seeded());
        assert_eq!(collections.clients[0].name, "Acme Corp");
        assert_eq!(collections.services.len(), 3);
    }

    #[test]
    fn corrupt_key_falls_back_independently() {
        let store = MemoryStore::new();
        store.insert_raw(StoreKey::Clients, "[]");
        store.insert_raw(StoreKey::Jobs, "][");
        let collections = Collections::load(&store);
        assert!(collections.clients.is_empty());
        assert_eq!(collections.jobs, Collections::seeded().jobs);
    }

    #[test]
    fn persist_writes_every_key() {
        let store = MemoryStore::new();
        Collections::seeded().persist_all(&store).unwrap();
        assert_eq!(store.writes(), StoreKey::ALL.len());
        for key in StoreKey::ALL {
            assert!(store.contents(key).is_some(), "{} missing", key.as_str());
        }
    }

    #[test]
    fn round_trip_preserves_added_records() {
        let store = MemoryStore::new();
        let mut collections = Collections::default();
        let client = Client::from_draft(
            Collections::new_id(EntityKind::Client),
            &ClientDraft {
                name: "Initech".into(),
                contact: "Bill Lumbergh".into(),
                last_interaction: "2025-09-01".into(),
                status: "Pending".into(),
            },
        )
        .unwrap();
        let job = Job::from_draft(
            Collections::new_id(EntityKind::Job),
            &JobDraft {
                title: "Server room".into(),
                client: "Initech".into(),
                status: "On Hold".into(),
                due_date: "2025-10-01".into(),
            },
        )
        .unwrap();
        collections.clients.push(client);
        collections.jobs.push(job);
        collections.persist_all(&store).unwrap();

        let reloaded = Collections::load(&store);
        assert_eq!(reloaded, collections);
    }

    #[test]
    fn stored_layout_uses_camel_case_fields() {
        let store = MemoryStore::new();
        Collections::seeded().persist_all(&store).unwrap();
        let clients = store.contents(StoreKey::Clients).unwrap();
        assert!(clients.contains("\"lastInteraction\": \"2025-08-15\""));
        let settings = store.contents(StoreKey::UserSettings).unwrap();
        assert!(settings.contains("\"userName\": \"User\""));
        assert!(settings.contains("\"theme\": \"light\""));
    }

    #[test]
    fn remove_missing_id_is_a_no_op() {
        let mut collections = Collections::seeded();
        let id = RecordId::from("cli_001");
        assert!(collections.remove(EntityKind::Client, &id));
        assert!(!collections.remove(EntityKind::Client, &id));
        assert_eq!(collections.len(EntityKind::Client), 1);
    }

    #[test]
    fn summary_counts_seed_dataset() {
        let summary = DashboardSummary::compute(&Collections::seeded());
        assert_eq!(summary.active_jobs, 1);
        assert_eq!(summary.jobs_in_progress, 1);
        assert_eq!(summary.finished_jobs, 1);
        assert_eq!(summary.new_leads, 1);
        assert_eq!(summary.active_jobs_share(), "+50.0%");
        assert_eq!(summary.jobs_in_progress_share(), "-50.0%");
        assert_eq!(summary.new_leads_share(), "+50.0%");
    }

    #[test]
    fn summary_shares_are_zero_without_records() {
        let summary = DashboardSummary::compute(&Collections::default());
        assert_eq!(summary.finished_jobs_share(), "0%");
        assert_eq!(summary.new_leads_share(), "0%");
    }
}
