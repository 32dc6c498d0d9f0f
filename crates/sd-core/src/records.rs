//! Record types stored in the dashboard collections, with their form drafts.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

/// Placeholder profile picture used until the user uploads one.
pub const DEFAULT_PROFILE_PICTURE: &str = "https://placehold.co/40x40/ADD8E6/000?text=JP";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// String identifier of a record: a type prefix followed by a time-ordered UUID.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh identifier with the given prefix, e.g. `cli_0190...`.
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{prefix}_{}", Uuid::now_v7().simple()))
    }

    /// Access the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything stored in a collection keyed by a [`RecordId`].
pub trait Record {
    fn id(&self) -> &RecordId;
}

/// Closed set of display values offered by a form's choice field.
pub trait Choice: Sized + Copy + PartialEq + 'static {
    /// Every value in display order.
    const ALL: &'static [Self];

    /// Display label, identical to the stored value.
    fn label(self) -> &'static str;

    /// Parse a label, ignoring surrounding whitespace and case.
    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|value| value.label().eq_ignore_ascii_case(input))
    }

    /// Labels of every value, for building pickers.
    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|value| value.label()).collect()
    }
}

/// Relationship status of a client.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ClientStatus {
    Active,
    Pending,
    Inactive,
}

impl Choice for ClientStatus {
    const ALL: &'static [Self] = &[Self::Active, Self::Pending, Self::Inactive];

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Inactive => "Inactive",
        }
    }
}

/// Progress of a job.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum JobStatus {
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl Choice for JobStatus {
    const ALL: &'static [Self] = &[Self::Planned, Self::InProgress, Self::Completed, Self::OnHold];

    fn label(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
        }
    }
}

/// Decision state of a quote.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum QuoteStatus {
    Pending,
    Accepted,
    Rejected,
}

impl Choice for QuoteStatus {
    const ALL: &'static [Self] = &[Self::Pending, Self::Accepted, Self::Rejected];

    fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }
}

/// Colour scheme of the dashboard.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Choice for Theme {
    const ALL: &'static [Self] = &[Self::Light, Self::Dark];

    fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// A customer of the business.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: RecordId,
    pub name: String,
    pub contact: String,
    pub last_interaction: NaiveDate,
    pub status: ClientStatus,
}

/// A unit of work for a client. `client` is a copy of the client's name.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: RecordId,
    pub title: String,
    pub client: String,
    pub status: JobStatus,
    pub due_date: NaiveDate,
}

/// A priced offer to a client. `client` is a copy of the client's name.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: RecordId,
    pub client: String,
    pub amount: f64,
    pub status: QuoteStatus,
    pub created_date: NaiveDate,
}

/// A service the business offers.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Service {
    pub id: RecordId,
    pub name: String,
}

/// Start or end of a calendar event: a whole day or a point in time.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum EventTime {
    DateTime(NaiveDateTime),
    Date(NaiveDate),
}

impl EventTime {
    /// Parse `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]` or `YYYY-MM-DDTHH:MM[:SS]`.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        for format in [
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d %H:%M",
        ] {
            if let Ok(value) = NaiveDateTime::parse_from_str(input, format) {
                return Some(Self::DateTime(value));
            }
        }
        NaiveDate::parse_from_str(input, DATE_FORMAT)
            .ok()
            .map(Self::Date)
    }

    /// The moment this time starts at; whole days start at midnight.
    pub fn as_datetime(self) -> NaiveDateTime {
        match self {
            Self::DateTime(value) => value,
            Self::Date(date) => date.and_time(NaiveTime::MIN),
        }
    }

    /// Calendar day this time falls on.
    pub fn date(self) -> NaiveDate {
        match self {
            Self::DateTime(value) => value.date(),
            Self::Date(date) => date,
        }
    }

    pub fn is_all_day(self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Move by `delta`. Whole days stay whole days when moved by whole days.
    pub fn shifted(self, delta: Duration) -> Self {
        match self {
            Self::Date(date) if delta.num_seconds() % 86_400 == 0 => {
                Self::Date(date + Duration::days(delta.num_days()))
            }
            other => Self::DateTime(other.as_datetime() + delta),
        }
    }

    /// Text suitable for pre-filling a form field.
    pub fn to_input(self) -> String {
        match self {
            Self::DateTime(value) => value.format("%Y-%m-%d %H:%M").to_string(),
            Self::Date(date) => date.format(DATE_FORMAT).to_string(),
        }
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_input())
    }
}

/// An entry on the calendar.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: RecordId,
    pub title: String,
    pub start: EventTime,
    pub end: Option<EventTime>,
}

/// A named point on the map.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MapLocation {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    #[serde(rename = "lon", alias = "longitude")]
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MapLocation {
    /// Popup text shown on the location's marker.
    pub fn popup_text(&self) -> String {
        format!(
            "{} | {} | Lat: {:.4}, Lon: {:.4}",
            self.name,
            self.description.as_deref().unwrap_or("No description"),
            self.latitude,
            self.longitude
        )
    }
}

/// Profile and display preferences of the dashboard user.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub user_name: String,
    pub user_email: String,
    pub theme: Theme,
    pub profile_picture: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            user_name: "User".into(),
            user_email: "User.p@example.com".into(),
            theme: Theme::Light,
            profile_picture: DEFAULT_PROFILE_PICTURE.into(),
        }
    }
}

impl UserSettings {
    /// True while the placeholder picture has not been replaced by an upload.
    pub fn has_placeholder_picture(&self) -> bool {
        self.profile_picture.contains("placehold.co")
    }

    /// Validate a settings form and apply it. Nothing changes on error.
    pub fn apply(&mut self, draft: &SettingsDraft) -> CoreResult<()> {
        let user_name = required(&draft.user_name, "user name")?;
        let user_email = required(&draft.user_email, "email")?;
        let theme = required_choice::<Theme>(&draft.theme, "theme")?;
        self.user_name = user_name;
        self.user_email = user_email;
        self.theme = theme;
        Ok(())
    }
}

macro_rules! impl_record {
    ($($ty:ty),*) => {
        $(impl Record for $ty {
            fn id(&self) -> &RecordId {
                &self.id
            }
        })*
    };
}

impl_record!(Client, Job, Quote, Service, CalendarEvent, MapLocation);

/// Raw form values for a client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientDraft {
    pub name: String,
    pub contact: String,
    pub last_interaction: String,
    pub status: String,
}

/// Raw form values for a job.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobDraft {
    pub title: String,
    pub client: String,
    pub status: String,
    pub due_date: String,
}

/// Raw form values for a quote.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteDraft {
    pub client: String,
    pub amount: String,
    pub status: String,
    pub created_date: String,
}

/// Raw form values for a service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceDraft {
    pub name: String,
}

/// Raw form values for a calendar event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub start: String,
    pub end: String,
}

/// Raw form values for a map location. Coordinates are not user-editable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocationDraft {
    pub name: String,
    pub description: String,
}

/// Raw form values for the settings dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsDraft {
    pub user_name: String,
    pub user_email: String,
    pub theme: String,
}

impl Client {
    /// Build a client from a validated draft.
    pub fn from_draft(id: RecordId, draft: &ClientDraft) -> CoreResult<Self> {
        Ok(Self {
            id,
            name: required(&draft.name, "name")?,
            contact: required(&draft.contact, "contact")?,
            last_interaction: required_date(&draft.last_interaction, "last interaction")?,
            status: required_choice(&draft.status, "status")?,
        })
    }

    /// Validate a draft and overwrite every field except the id.
    pub fn apply(&mut self, draft: &ClientDraft) -> CoreResult<()> {
        *self = Self::from_draft(self.id.clone(), draft)?;
        Ok(())
    }
}

impl From<&Client> for ClientDraft {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            contact: client.contact.clone(),
            last_interaction: client.last_interaction.format(DATE_FORMAT).to_string(),
            status: client.status.label().into(),
        }
    }
}

impl Job {
    /// Build a job from a validated draft. The client name is not checked
    /// against the client collection.
    pub fn from_draft(id: RecordId, draft: &JobDraft) -> CoreResult<Self> {
        Ok(Self {
            id,
            title: required(&draft.title, "title")?,
            client: required(&draft.client, "client")?,
            status: required_choice(&draft.status, "status")?,
            due_date: required_date(&draft.due_date, "due date")?,
        })
    }

    pub fn apply(&mut self, draft: &JobDraft) -> CoreResult<()> {
        *self = Self::from_draft(self.id.clone(), draft)?;
        Ok(())
    }
}

impl From<&Job> for JobDraft {
    fn from(job: &Job) -> Self {
        Self {
            title: job.title.clone(),
            client: job.client.clone(),
            status: job.status.label().into(),
            due_date: job.due_date.format(DATE_FORMAT).to_string(),
        }
    }
}

impl Quote {
    pub fn from_draft(id: RecordId, draft: &QuoteDraft) -> CoreResult<Self> {
        Ok(Self {
            id,
            client: required(&draft.client, "client")?,
            amount: required_amount(&draft.amount)?,
            status: required_choice(&draft.status, "status")?,
            created_date: required_date(&draft.created_date, "created date")?,
        })
    }

    pub fn apply(&mut self, draft: &QuoteDraft) -> CoreResult<()> {
        *self = Self::from_draft(self.id.clone(), draft)?;
        Ok(())
    }
}

impl From<&Quote> for QuoteDraft {
    fn from(quote: &Quote) -> Self {
        Self {
            client: quote.client.clone(),
            amount: quote.amount.to_string(),
            status: quote.status.label().into(),
            created_date: quote.created_date.format(DATE_FORMAT).to_string(),
        }
    }
}

impl Service {
    pub fn from_draft(id: RecordId, draft: &ServiceDraft) -> CoreResult<Self> {
        Ok(Self {
            id,
            name: required(&draft.name, "service name")?,
        })
    }

    pub fn apply(&mut self, draft: &ServiceDraft) -> CoreResult<()> {
        *self = Self::from_draft(self.id.clone(), draft)?;
        Ok(())
    }
}

impl From<&Service> for ServiceDraft {
    fn from(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
        }
    }
}

impl CalendarEvent {
    /// Build an event; title and start are required, a blank end means none.
    pub fn from_draft(id: RecordId, draft: &EventDraft) -> CoreResult<Self> {
        let title = required(&draft.title, "title")?;
        let start = EventTime::parse(&draft.start).ok_or_else(|| {
            CoreError::Validation("start must be a date or date/time".into())
        })?;
        let end = if draft.end.trim().is_empty() {
            None
        } else {
            let end = EventTime::parse(&draft.end).ok_or_else(|| {
                CoreError::Validation("end must be a date or date/time".into())
            })?;
            if end.as_datetime() < start.as_datetime() {
                return Err(CoreError::Validation("end cannot be before start".into()));
            }
            Some(end)
        };
        Ok(Self {
            id,
            title,
            start,
            end,
        })
    }
}

impl MapLocation {
    /// Build a location at fixed coordinates from a name/description draft.
    pub fn from_draft(
        id: RecordId,
        latitude: f64,
        longitude: f64,
        draft: &LocationDraft,
    ) -> CoreResult<Self> {
        Ok(Self {
            id,
            name: required(&draft.name, "name")?,
            latitude,
            longitude,
            description: optional(&draft.description),
        })
    }

    /// Update name and description; coordinates only change by dragging.
    pub fn apply(&mut self, draft: &LocationDraft) -> CoreResult<()> {
        let name = required(&draft.name, "name")?;
        self.name = name;
        self.description = optional(&draft.description);
        Ok(())
    }
}

impl From<&MapLocation> for LocationDraft {
    fn from(location: &MapLocation) -> Self {
        Self {
            name: location.name.clone(),
            description: location.description.clone().unwrap_or_default(),
        }
    }
}

impl From<&UserSettings> for SettingsDraft {
    fn from(settings: &UserSettings) -> Self {
        Self {
            user_name: settings.user_name.clone(),
            user_email: settings.user_email.clone(),
            theme: settings.theme.label().into(),
        }
    }
}

fn required(value: &str, field: &str) -> CoreResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{field} cannot be empty")));
    }
    Ok(value.to_string())
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn required_date(value: &str, field: &str) -> CoreResult<NaiveDate> {
    let value = required(value, field)?;
    NaiveDate::parse_from_str(&value, DATE_FORMAT)
        .map_err(|_| CoreError::Validation(format!("{field} must be a YYYY-MM-DD date")))
}

fn required_amount(value: &str) -> CoreResult<f64> {
    let value = required(value, "amount")?;
    match value.parse::<f64>() {
        // `-0` parses to a sign-bit zero; store it as plain zero.
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount.abs()),
        _ => Err(CoreError::Validation(
            "amount must be a non-negative number".into(),
        )),
    }
}

fn required_choice<T: Choice>(value: &str, field: &str) -> CoreResult<T> {
    let value = required(value, field)?;
    T::parse(&value).ok_or_else(|| {
        CoreError::Validation(format!(
            "{field} must be one of {}",
            T::labels().join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_draft() -> ClientDraft {
        ClientDraft {
            name: "Acme Corp".into(),
            contact: "John Doe".into(),
            last_interaction: "2025-08-15".into(),
            status: "Active".into(),
        }
    }

    #[test]
    fn generated_ids_carry_prefix_and_differ() {
        let first = RecordId::generate("cli");
        let second = RecordId::generate("cli");
        assert!(first.as_str().starts_with("cli_"));
        assert_ne!(first, second);
    }

    #[test]
    fn generated_ids_sort_in_creation_order() {
        let ids: Vec<_> = (0..32).map(|_| RecordId::generate("job")).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn client_requires_every_field() {
        let mut draft = client_draft();
        draft.contact = "   ".into();
        let result = Client::from_draft(RecordId::from("cli_1"), &draft);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn client_trims_text_fields() {
        let mut draft = client_draft();
        draft.name = "  Acme Corp ".into();
        let client = Client::from_draft(RecordId::from("cli_1"), &draft).unwrap();
        assert_eq!(client.name, "Acme Corp");
        assert_eq!(client.status, ClientStatus::Active);
    }

    #[test]
    fn failed_apply_leaves_record_untouched() {
        let mut client = Client::from_draft(RecordId::from("cli_1"), &client_draft()).unwrap();
        let before = client.clone();
        let mut draft = client_draft();
        draft.name = "Renamed".into();
        draft.last_interaction = "yesterday".into();
        assert!(client.apply(&draft).is_err());
        assert_eq!(client, before);
    }

    #[test]
    fn apply_keeps_identifier() {
        let mut client = Client::from_draft(RecordId::from("cli_1"), &client_draft()).unwrap();
        let mut draft = client_draft();
        draft.name = "Acme Holdings".into();
        draft.status = "Inactive".into();
        client.apply(&draft).unwrap();
        assert_eq!(client.id.as_str(), "cli_1");
        assert_eq!(client.name, "Acme Holdings");
        assert_eq!(client.status, ClientStatus::Inactive);
    }

    #[test]
    fn quote_rejects_non_numeric_amount() {
        let draft = QuoteDraft {
            client: "Acme Corp".into(),
            amount: "abc".into(),
            status: "Pending".into(),
            created_date: "2025-08-01".into(),
        };
        let result = Quote::from_draft(RecordId::from("quo_1"), &draft);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn quote_rejects_negative_amount() {
        let draft = QuoteDraft {
            client: "Acme Corp".into(),
            amount: "-5".into(),
            status: "Pending".into(),
            created_date: "2025-08-01".into(),
        };
        assert!(Quote::from_draft(RecordId::from("quo_1"), &draft).is_err());
    }

    #[test]
    fn quote_negative_zero_amount_is_plain_zero() {
        let draft = QuoteDraft {
            client: "Acme Corp".into(),
            amount: "-0".into(),
            status: "Pending".into(),
            created_date: "2025-08-01".into(),
        };
        let quote = Quote::from_draft(RecordId::from("quo_1"), &draft).unwrap();
        assert_eq!(quote.amount, 0.0);
        assert!(quote.amount.is_sign_positive());
    }

    #[test]
    fn job_status_parses_display_labels() {
        assert_eq!(JobStatus::parse("in progress"), Some(JobStatus::InProgress));
        assert_eq!(JobStatus::parse("On Hold"), Some(JobStatus::OnHold));
        assert_eq!(JobStatus::parse("done"), None);
    }

    #[test]
    fn job_status_serializes_as_label() {
        let json = serde_json::to_string(&JobStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
    }

    #[test]
    fn event_end_is_optional() {
        let draft = EventDraft {
            title: "Site visit".into(),
            start: "2025-08-20 10:00".into(),
            end: "  ".into(),
        };
        let event = CalendarEvent::from_draft(RecordId::from("event_1"), &draft).unwrap();
        assert!(event.end.is_none());
        assert!(!event.start.is_all_day());
    }

    #[test]
    fn event_requires_title_and_start() {
        let draft = EventDraft {
            title: "Site visit".into(),
            start: String::new(),
            end: String::new(),
        };
        assert!(CalendarEvent::from_draft(RecordId::from("event_1"), &draft).is_err());
    }

    #[test]
    fn event_time_reads_both_stored_shapes() {
        let timed: EventTime = serde_json::from_str("\"2025-08-20T10:00:00\"").unwrap();
        let all_day: EventTime = serde_json::from_str("\"2025-08-25\"").unwrap();
        assert!(matches!(timed, EventTime::DateTime(_)));
        assert!(matches!(all_day, EventTime::Date(_)));
    }

    #[test]
    fn whole_day_shift_keeps_all_day_events() {
        let start = EventTime::parse("2025-08-25").unwrap();
        assert_eq!(
            start.shifted(Duration::days(2)),
            EventTime::parse("2025-08-27").unwrap()
        );
        assert_eq!(
            start.shifted(Duration::hours(3)),
            EventTime::parse("2025-08-25 03:00").unwrap()
        );
    }

    #[test]
    fn location_uses_lat_lon_keys() {
        let location = MapLocation {
            id: RecordId::from("loc_1"),
            name: "Acme HQ".into(),
            latitude: 51.5,
            longitude: -0.09,
            description: None,
        };
        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(json["lat"], 51.5);
        assert_eq!(json["lon"], -0.09);
        assert!(json.get("description").is_none());
    }

    #[test]
    fn location_edit_keeps_coordinates() {
        let mut location = MapLocation {
            id: RecordId::from("loc_1"),
            name: "Acme HQ".into(),
            latitude: 51.5,
            longitude: -0.09,
            description: Some("Main office".into()),
        };
        let draft = LocationDraft {
            name: "Acme Head Office".into(),
            description: String::new(),
        };
        location.apply(&draft).unwrap();
        assert_eq!(location.name, "Acme Head Office");
        assert_eq!(location.description, None);
        assert!((location.latitude - 51.5).abs() < f64::EPSILON);
    }

    #[test]
    fn settings_reject_unknown_theme() {
        let mut settings = UserSettings::default();
        let draft = SettingsDraft {
            user_name: "Jo Park".into(),
            user_email: "jo@example.com".into(),
            theme: "solarized".into(),
        };
        assert!(settings.apply(&draft).is_err());
        assert_eq!(settings, UserSettings::default());
    }
}
