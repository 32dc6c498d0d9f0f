//! Calendar widget and the integration that owns it.

use chrono::{Datelike, Duration, NaiveDate};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use sd_core::{CalendarEvent, EventTime, RecordId};

use crate::ui::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum CalendarMode {
    #[default]
    Month,
    Week,
    Day,
}

impl CalendarMode {
    fn next(self) -> Self {
        match self {
            CalendarMode::Month => CalendarMode::Week,
            CalendarMode::Week => CalendarMode::Day,
            CalendarMode::Day => CalendarMode::Month,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            CalendarMode::Month => "Month",
            CalendarMode::Week => "Week",
            CalendarMode::Day => "Day",
        }
    }
}

/// New start/end of an event after a drag or resize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EventChange {
    pub(crate) id: RecordId,
    pub(crate) start: EventTime,
    pub(crate) end: Option<EventTime>,
}

/// A rendered calendar. Holds its own copy of the events it displays.
#[derive(Debug)]
pub(crate) struct CalendarView {
    events: Vec<CalendarEvent>,
    mode: CalendarMode,
    cursor: NaiveDate,
    selected: ListState,
}

impl CalendarView {
    fn new(events: &[CalendarEvent], mode: CalendarMode, cursor: NaiveDate) -> Self {
        let mut view = Self {
            events: events.to_vec(),
            mode,
            cursor,
            selected: ListState::default(),
        };
        view.clamp_selection();
        view
    }

    pub(crate) fn mode(&self) -> CalendarMode {
        self.mode
    }

    pub(crate) fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub(crate) fn event_count(&self) -> usize {
        self.events.len()
    }

    /// First and last day of the visible period.
    pub(crate) fn period(&self) -> (NaiveDate, NaiveDate) {
        match self.mode {
            CalendarMode::Month => {
                let first = self.cursor.with_day(1).unwrap_or(self.cursor);
                let next_month = first + Duration::days(32);
                let last = next_month.with_day(1).unwrap_or(next_month) - Duration::days(1);
                (first, last)
            }
            CalendarMode::Week => {
                let offset = i64::from(self.cursor.weekday().num_days_from_monday());
                let monday = self.cursor - Duration::days(offset);
                (monday, monday + Duration::days(6))
            }
            CalendarMode::Day => (self.cursor, self.cursor),
        }
    }

    /// Events overlapping the visible period, ordered by start.
    pub(crate) fn visible(&self) -> Vec<&CalendarEvent> {
        let (first, last) = self.period();
        let mut visible: Vec<_> = self
            .events
            .iter()
            .filter(|event| {
                let end = event.end.unwrap_or(event.start).date();
                event.start.date() <= last && end >= first
            })
            .collect();
        visible.sort_by_key(|event| (event.start.as_datetime(), event.id.clone()));
        visible
    }

    pub(crate) fn selected_event(&self) -> Option<&CalendarEvent> {
        let index = self.selected.selected()?;
        self.visible().get(index).copied()
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        let selected = match (self.selected.selected(), len) {
            (_, 0) => None,
            (Some(index), _) => Some(index.min(len - 1)),
            (None, _) => Some(0),
        };
        self.selected.select(selected);
    }

    pub(crate) fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            let next = self.selected.selected().map_or(0, |index| (index + 1) % len);
            self.selected.select(Some(next));
        }
    }

    pub(crate) fn select_prev(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            let prev = self
                .selected
                .selected()
                .map_or(0, |index| (index + len - 1) % len);
            self.selected.select(Some(prev));
        }
    }

    pub(crate) fn cycle_mode(&mut self) {
        self.mode = self.mode.next();
        self.clamp_selection();
    }

    pub(crate) fn move_cursor(&mut self, days: i64) {
        self.cursor += Duration::days(days);
        self.clamp_selection();
    }

    /// Step to the previous or next month, week or day.
    pub(crate) fn step_period(&mut self, forward: bool) {
        let sign = if forward { 1 } else { -1 };
        match self.mode {
            CalendarMode::Month => {
                let month0 = i32::try_from(self.cursor.month0()).unwrap_or_default();
                let months = self.cursor.year() * 12 + month0 + sign;
                let year = months.div_euclid(12);
                let month = u32::try_from(months.rem_euclid(12)).unwrap_or_default() + 1;
                self.cursor = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(self.cursor);
            }
            CalendarMode::Week => self.cursor += Duration::days(7 * i64::from(sign)),
            CalendarMode::Day => self.cursor += Duration::days(i64::from(sign)),
        }
        self.clamp_selection();
    }

    pub(crate) fn jump_to(&mut self, date: NaiveDate) {
        self.cursor = date;
        self.clamp_selection();
    }

    fn step(&self) -> Duration {
        match self.mode {
            CalendarMode::Day => Duration::hours(1),
            CalendarMode::Month | CalendarMode::Week => Duration::days(1),
        }
    }

    /// Move the selected event by one step, keeping its length.
    pub(crate) fn drag_selected(&mut self, forward: bool) -> Option<EventChange> {
        let step = if forward { self.step() } else { -self.step() };
        let event = self.selected_event()?;
        let change = EventChange {
            id: event.id.clone(),
            start: event.start.shifted(step),
            end: event.end.map(|end| end.shifted(step)),
        };
        self.apply_change(&change);
        Some(change)
    }

    /// Extend or shrink the selected event's end by one step. The end never
    /// moves before the start; shrinking an event without an end does nothing.
    pub(crate) fn resize_selected(&mut self, grow: bool) -> Option<EventChange> {
        let step = self.step();
        let event = self.selected_event()?;
        let end = match (event.end, grow) {
            (Some(end), true) => end.shifted(step),
            (None, true) => event.start.shifted(step),
            (Some(end), false) => {
                let shrunk = end.shifted(-step);
                if shrunk.as_datetime() < event.start.as_datetime() {
                    return None;
                }
                shrunk
            }
            (None, false) => return None,
        };
        let change = EventChange {
            id: event.id.clone(),
            start: event.start,
            end: Some(end),
        };
        self.apply_change(&change);
        Some(change)
    }

    fn apply_change(&mut self, change: &EventChange) {
        let selected_id = self.selected_event().map(|event| event.id.clone());
        if let Some(event) = self.events.iter_mut().find(|event| event.id == change.id) {
            event.start = change.start;
            event.end = change.end;
        }
        if let Some(id) = selected_id {
            let index = self.visible().iter().position(|event| event.id == id);
            self.selected.select(index);
        }
        self.clamp_selection();
    }

    /// Remove an event from the displayed copy without rebuilding.
    pub(crate) fn remove_event(&mut self, id: &RecordId) {
        self.events.retain(|event| &event.id != id);
        self.clamp_selection();
    }

    fn events_on(&self, day: NaiveDate) -> Vec<&CalendarEvent> {
        self.events
            .iter()
            .filter(|event| {
                let end = event.end.unwrap_or(event.start).date();
                event.start.date() <= day && end >= day
            })
            .collect()
    }

    pub(crate) fn draw(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)].as_ref())
            .split(area);

        let (first, last) = self.period();
        let title = match self.mode {
            CalendarMode::Month => first.format("%B %Y").to_string(),
            CalendarMode::Week => format!("{} – {}", first.format("%b %d"), last.format("%b %d, %Y")),
            CalendarMode::Day => first.format("%A, %B %d, %Y").to_string(),
        };
        let lines = match self.mode {
            CalendarMode::Month => self.month_lines(first, last, palette),
            CalendarMode::Week | CalendarMode::Day => self.agenda_lines(first, last, palette),
        };
        let grid = Paragraph::new(lines).style(palette.base()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{title} [{}]", self.mode.label())),
        );
        frame.render_widget(grid, chunks[0]);

        let items = self
            .visible()
            .into_iter()
            .map(|event| {
                let when = match event.end {
                    Some(end) => format!("{} → {}", event.start, end),
                    None => event.start.to_string(),
                };
                ListItem::new(vec![
                    Line::from(Span::styled(event.title.clone(), palette.accent())),
                    Line::from(Span::styled(when, palette.muted())),
                ])
            })
            .collect::<Vec<_>>();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Events"))
            .style(palette.base())
            .highlight_style(palette.highlight())
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[1], &mut self.selected);
    }

    fn month_lines(&self, first: NaiveDate, last: NaiveDate, palette: &Palette) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            " Mo  Tu  We  Th  Fr  Sa  Su",
            palette.muted(),
        ))];
        let lead = first.weekday().num_days_from_monday() as usize;
        let mut spans = vec![Span::raw("    ".repeat(lead))];
        let mut day = first;
        while day <= last {
            let mut style = if self.events_on(day).is_empty() {
                palette.base()
            } else {
                palette.accent().add_modifier(Modifier::BOLD)
            };
            if day == self.cursor {
                style = palette.highlight();
            }
            let marker = if self.events_on(day).is_empty() { ' ' } else { '•' };
            spans.push(Span::styled(format!("{:>3}{marker}", day.day()), style));
            if day.weekday().num_days_from_monday() == 6 {
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
            day += Duration::days(1);
        }
        if !spans.is_empty() {
            lines.push(Line::from(spans));
        }
        lines
    }

    fn agenda_lines(&self, first: NaiveDate, last: NaiveDate, palette: &Palette) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let mut day = first;
        while day <= last {
            let style = if day == self.cursor {
                palette.highlight()
            } else {
                palette.accent()
            };
            lines.push(Line::from(Span::styled(day.format("%a %d %b").to_string(), style)));
            let events = self.events_on(day);
            if events.is_empty() {
                lines.push(Line::from(Span::styled("  —", palette.muted())));
            }
            for event in events {
                let time = match event.start {
                    EventTime::DateTime(start) if start.date() == day => {
                        start.format("%H:%M").to_string()
                    }
                    _ => "all-day".to_string(),
                };
                lines.push(Line::from(format!("  {time:>7}  {}", event.title)));
            }
            day += Duration::days(1);
        }
        lines
    }
}

/// Owns at most one calendar widget, rebuilt on every display.
#[derive(Debug, Default)]
pub(crate) struct CalendarIntegration {
    widget: Option<CalendarView>,
    mode: CalendarMode,
    cursor: Option<NaiveDate>,
    builds: usize,
}

impl CalendarIntegration {
    /// Destroy any existing widget and build a new one from `events`.
    pub(crate) fn show(&mut self, events: &[CalendarEvent], today: NaiveDate) {
        if let Some(old) = self.widget.take() {
            self.mode = old.mode;
            self.cursor = Some(old.cursor);
        }
        let cursor = self.cursor.unwrap_or(today);
        self.widget = Some(CalendarView::new(events, self.mode, cursor));
        self.builds += 1;
        tracing::debug!(builds = self.builds, events = events.len(), "rebuilt calendar");
    }

    pub(crate) fn widget(&self) -> Option<&CalendarView> {
        self.widget.as_ref()
    }

    pub(crate) fn widget_mut(&mut self) -> Option<&mut CalendarView> {
        self.widget.as_mut()
    }

    pub(crate) fn builds(&self) -> usize {
        self.builds
    }
}
