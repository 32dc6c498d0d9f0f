//! Dashboard sections and the row views rebuilt from each collection.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use sd_core::{Choice, Client, Collections, EntityKind, Job, MapLocation, Quote, RecordId, Service};

use crate::ui::Palette;

/// Top-level navigation targets, addressed by fragment names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Clients,
    Jobs,
    Quotes,
    MyServices,
    Calendar,
    Map,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Home,
        Section::Clients,
        Section::Jobs,
        Section::Quotes,
        Section::MyServices,
        Section::Calendar,
        Section::Map,
    ];

    /// Resolve a fragment such as `#clients` or `map`. A blank fragment is
    /// `Home`; unknown names yield `None`.
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        let name = fragment.trim().trim_start_matches('#').trim();
        if name.is_empty() {
            return Some(Section::Home);
        }
        Self::ALL
            .into_iter()
            .find(|section| section.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Clients => "clients",
            Section::Jobs => "jobs",
            Section::Quotes => "quotes",
            Section::MyServices => "myservices",
            Section::Calendar => "calendar",
            Section::Map => "map",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Clients => "Clients",
            Section::Jobs => "Jobs",
            Section::Quotes => "Quotes",
            Section::MyServices => "My Services",
            Section::Calendar => "Calendar",
            Section::Map => "Map",
        }
    }

    pub(crate) fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|section| *section == self)
            .unwrap_or_default()
    }

    pub(crate) fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub(crate) fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Entity listed by this section, if it is a list section.
    pub(crate) fn entity(self) -> Option<EntityKind> {
        match self {
            Section::Clients => Some(EntityKind::Client),
            Section::Jobs => Some(EntityKind::Job),
            Section::Quotes => Some(EntityKind::Quote),
            Section::MyServices => Some(EntityKind::Service),
            Section::Home | Section::Calendar | Section::Map => None,
        }
    }
}

/// One rendered record, tagged with the id and kind its actions target.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RowView {
    pub(crate) id: RecordId,
    pub(crate) kind: EntityKind,
    pub(crate) cells: Vec<String>,
}

/// Rendered contents of a list section.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SectionView {
    Empty(&'static str),
    Rows {
        headers: &'static [&'static str],
        rows: Vec<RowView>,
    },
}

impl SectionView {
    pub(crate) fn rows(&self) -> &[RowView] {
        match self {
            SectionView::Empty(_) => &[],
            SectionView::Rows { rows, .. } => rows,
        }
    }
}

fn build<T>(
    kind: EntityKind,
    records: &[T],
    placeholder: &'static str,
    headers: &'static [&'static str],
    row: impl Fn(&T) -> (RecordId, Vec<String>),
) -> SectionView {
    if records.is_empty() {
        return SectionView::Empty(placeholder);
    }
    let rows = records
        .iter()
        .map(|record| {
            let (id, cells) = row(record);
            RowView { id, kind, cells }
        })
        .collect();
    SectionView::Rows { headers, rows }
}

pub(crate) fn render_clients(clients: &[Client]) -> SectionView {
    build(
        EntityKind::Client,
        clients,
        "No clients yet. Press 'a' to add one.",
        &["Name", "Contact", "Last Interaction", "Status"],
        |client| {
            (
                client.id.clone(),
                vec![
                    client.name.clone(),
                    client.contact.clone(),
                    client.last_interaction.format("%Y-%m-%d").to_string(),
                    client.status.label().to_string(),
                ],
            )
        },
    )
}

pub(crate) fn render_jobs(jobs: &[Job]) -> SectionView {
    build(
        EntityKind::Job,
        jobs,
        "No jobs yet. Press 'a' to add one.",
        &["Title", "Client", "Status", "Due Date"],
        |job| {
            (
                job.id.clone(),
                vec![
                    job.title.clone(),
                    job.client.clone(),
                    job.status.label().to_string(),
                    job.due_date.format("%Y-%m-%d").to_string(),
                ],
            )
        },
    )
}

pub(crate) fn render_quotes(quotes: &[Quote]) -> SectionView {
    build(
        EntityKind::Quote,
        quotes,
        "No quotes yet. Press 'a' to add one.",
        &["Client", "Amount", "Status", "Created"],
        |quote| {
            (
                quote.id.clone(),
                vec![
                    quote.client.clone(),
                    format_amount(quote.amount),
                    quote.status.label().to_string(),
                    quote.created_date.format("%Y-%m-%d").to_string(),
                ],
            )
        },
    )
}

pub(crate) fn render_services(services: &[Service]) -> SectionView {
    build(
        EntityKind::Service,
        services,
        "No services yet. Press 'a' to add one.",
        &["Service"],
        |service| (service.id.clone(), vec![service.name.clone()]),
    )
}

pub(crate) fn render_locations(locations: &[MapLocation]) -> SectionView {
    build(
        EntityKind::Location,
        locations,
        "No saved locations. Press Enter on the map to add one.",
        &["Name", "Coordinates"],
        |location| {
            (
                location.id.clone(),
                vec![
                    location.name.clone(),
                    format!("{:.4}, {:.4}", location.latitude, location.longitude),
                ],
            )
        },
    )
}

/// Currency-style amount with thousands separators, e.g. `$15,000.00`.
pub(crate) fn format_amount(amount: f64) -> String {
    let fixed = format!("{amount:.2}");
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (sign, digits) = whole
        .strip_prefix('-')
        .map_or(("", whole), |digits| ("-", digits));
    let mut grouped = String::new();
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}${grouped}.{cents}")
}

/// A section view together with its selection.
#[derive(Debug, Clone)]
pub(crate) struct ListView {
    pub(crate) view: SectionView,
    pub(crate) state: TableState,
}

impl ListView {
    fn new(view: SectionView) -> Self {
        let mut list = Self {
            view,
            state: TableState::default(),
        };
        list.clamp();
        list
    }

    /// Replace the view, keeping the selection index where it still fits.
    pub(crate) fn replace(&mut self, view: SectionView) {
        self.view = view;
        self.clamp();
    }

    fn clamp(&mut self) {
        let len = self.view.rows().len();
        let selected = match (self.state.selected(), len) {
            (_, 0) => None,
            (Some(index), _) => Some(index.min(len - 1)),
            (None, _) => Some(0),
        };
        self.state.select(selected);
    }

    pub(crate) fn selected_row(&self) -> Option<&RowView> {
        self.state
            .selected()
            .and_then(|index| self.view.rows().get(index))
    }

    pub(crate) fn select_next(&mut self) {
        let len = self.view.rows().len();
        if len == 0 {
            return;
        }
        let next = self.state.selected().map_or(0, |index| (index + 1).min(len - 1));
        self.state.select(Some(next));
    }

    pub(crate) fn select_prev(&mut self) {
        if self.view.rows().is_empty() {
            return;
        }
        let prev = self.state.selected().map_or(0, |index| index.saturating_sub(1));
        self.state.select(Some(prev));
    }

    pub(crate) fn select_index(&mut self, index: usize) {
        if index < self.view.rows().len() {
            self.state.select(Some(index));
        }
    }
}

/// Row views for every list-backed entity.
#[derive(Debug, Clone)]
pub(crate) struct ListViews {
    clients: ListView,
    jobs: ListView,
    quotes: ListView,
    services: ListView,
    locations: ListView,
}

impl ListViews {
    pub(crate) fn new(data: &Collections) -> Self {
        Self {
            clients: ListView::new(render_clients(&data.clients)),
            jobs: ListView::new(render_jobs(&data.jobs)),
            quotes: ListView::new(render_quotes(&data.quotes)),
            services: ListView::new(render_services(&data.services)),
            locations: ListView::new(render_locations(&data.locations)),
        }
    }

    /// Re-render the view of one entity from its collection.
    pub(crate) fn refresh(&mut self, kind: EntityKind, data: &Collections) {
        let view = match kind {
            EntityKind::Client => render_clients(&data.clients),
            EntityKind::Job => render_jobs(&data.jobs),
            EntityKind::Quote => render_quotes(&data.quotes),
            EntityKind::Service => render_services(&data.services),
            EntityKind::Location => render_locations(&data.locations),
        };
        self.get_mut(kind).replace(view);
    }

    pub(crate) fn get(&self, kind: EntityKind) -> &ListView {
        match kind {
            EntityKind::Client => &self.clients,
            EntityKind::Job => &self.jobs,
            EntityKind::Quote => &self.quotes,
            EntityKind::Service => &self.services,
            EntityKind::Location => &self.locations,
        }
    }

    pub(crate) fn get_mut(&mut self, kind: EntityKind) -> &mut ListView {
        match kind {
            EntityKind::Client => &mut self.clients,
            EntityKind::Job => &mut self.jobs,
            EntityKind::Quote => &mut self.quotes,
            EntityKind::Service => &mut self.services,
            EntityKind::Location => &mut self.locations,
        }
    }
}

pub(crate) fn draw_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    list: &mut ListView,
    palette: &Palette,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .style(palette.base());
    match &list.view {
        SectionView::Empty(placeholder) => {
            let text = Paragraph::new(*placeholder)
                .style(palette.muted())
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(text, area);
        }
        SectionView::Rows { headers, rows } => {
            let header = Row::new(headers.iter().map(|header| Cell::from(*header)))
                .style(palette.accent().add_modifier(Modifier::BOLD));
            let body = rows
                .iter()
                .map(|row| Row::new(row.cells.iter().map(|cell| Cell::from(cell.clone()))));
            #[allow(clippy::cast_possible_truncation)]
            let share = (100 / headers.len().max(1)) as u16;
            let widths = vec![Constraint::Percentage(share); headers.len()];
            let table = Table::new(body, widths)
                .header(header)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            frame.render_stateful_widget(table, area, &mut list.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_resolve_sections() {
        assert_eq!(Section::from_fragment("#clients"), Some(Section::Clients));
        assert_eq!(Section::from_fragment("myservices"), Some(Section::MyServices));
        assert_eq!(Section::from_fragment("#nowhere"), None);
    }

    #[test]
    fn blank_fragment_opens_home() {
        assert_eq!(Section::from_fragment("#"), Some(Section::Home));
        assert_eq!(Section::from_fragment(""), Some(Section::Home));
        assert_eq!(Section::from_fragment("  # "), Some(Section::Home));
    }

    #[test]
    fn section_cycle_wraps() {
        assert_eq!(Section::Map.next(), Section::Home);
        assert_eq!(Section::Home.prev(), Section::Map);
    }

    #[test]
    fn empty_collection_renders_placeholder() {
        assert!(matches!(render_clients(&[]), SectionView::Empty(_)));
        assert!(render_jobs(&[]).rows().is_empty());
    }

    #[test]
    fn rows_follow_collection_order_and_carry_ids() {
        let data = Collections::seeded();
        let view = render_jobs(&data.jobs);
        let rows = view.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, RecordId::from("job_001"));
        assert_eq!(rows[0].kind, EntityKind::Job);
        assert_eq!(
            rows[0].cells,
            vec!["Office Renovation", "Acme Corp", "In Progress", "2025-09-30"]
        );
        assert_eq!(rows[1].cells[0], "Retail Store Setup");
    }

    #[test]
    fn rendering_twice_is_stable() {
        let data = Collections::seeded();
        assert_eq!(render_quotes(&data.quotes), render_quotes(&data.quotes));
    }

    #[test]
    fn amounts_are_grouped() {
        assert_eq!(format_amount(15000.0), "$15,000.00");
        assert_eq!(format_amount(999.5), "$999.50");
        assert_eq!(format_amount(1_234_567.0), "$1,234,567.00");
    }

    #[test]
    fn selection_clamps_after_removal() {
        let mut data = Collections::seeded();
        let mut views = ListViews::new(&data);
        views.get_mut(EntityKind::Service).select_index(2);
        data.services.pop();
        views.refresh(EntityKind::Service, &data);
        let selected = views.get(EntityKind::Service).selected_row().map(|row| row.id.clone());
        assert_eq!(selected, Some(RecordId::from("serv_002")));
    }
}
