use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::block::Title;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use sd_core::{EntityKind, RecordStore, Theme};

use crate::app::App;
use crate::input::{FieldKind, FormField, TextInput};
use crate::modal::{ConfirmDialog, FormDialog};
use crate::sections::{draw_list, Section};

/// Colors for the active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Palette {
    pub(crate) fg: Color,
    pub(crate) bg: Color,
    pub(crate) accent: Color,
    pub(crate) muted: Color,
    pub(crate) marker: Color,
}

impl Palette {
    pub(crate) fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                muted: Color::Gray,
                marker: Color::Red,
            },
            Theme::Dark => Self {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                marker: Color::Yellow,
            },
        }
    }

    pub(crate) fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub(crate) fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub(crate) fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub(crate) fn highlight(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}

pub(crate) fn render_app<S: RecordStore>(frame: &mut Frame, app: &mut App<S>) {
    let size = frame.size();
    let palette = Palette::for_theme(app.data.settings.theme);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(size);

    render_header(frame, chunks[0], app, &palette);

    match app.section {
        Section::Home => render_home(frame, chunks[1], app, &palette),
        Section::Clients | Section::Jobs | Section::Quotes | Section::MyServices => {
            if let Some(kind) = app.section.entity() {
                draw_list(frame, chunks[1], app.section.title(), app.views.get_mut(kind), &palette);
            }
        }
        Section::Calendar => {
            if let Some(widget) = app.calendar.widget_mut() {
                widget.draw(frame, chunks[1], &palette);
            }
        }
        Section::Map => render_map(frame, chunks[1], app, &palette),
    }

    render_guide_bar(frame, chunks[2], app);

    if app.show_help {
        render_help_popup(frame, size, &help_text(app.section));
    }
    if let Some(dialog) = app.modal.form() {
        render_form_popup(frame, size, dialog, &palette);
    }
    if let Some(dialog) = app.modal.confirm_dialog() {
        render_confirm_popup(frame, size, dialog);
    }
}

fn render_header<S: RecordStore>(frame: &mut Frame, area: Rect, app: &App<S>, palette: &Palette) {
    let settings = &app.data.settings;
    let badge = if settings.has_placeholder_picture() {
        format!("({})", sd_utils::profile_initials(&settings.user_name))
    } else {
        "◉".to_string()
    };
    let profile = Title::from(Line::from(vec![
        Span::styled(badge, palette.accent().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" {} ", sd_utils::truncate(&settings.user_name, 24))),
    ]))
    .alignment(Alignment::Right);

    let titles = Section::ALL
        .iter()
        .map(|section| Line::from(Span::raw(section.title())))
        .collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .select(app.section.index())
        .style(palette.base())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("ServiceDesk")
                .title(profile),
        )
        .highlight_style(palette.accent().add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn render_home<S: RecordStore>(frame: &mut Frame, area: Rect, app: &App<S>, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Greeting
            Constraint::Length(5), // Summary cards
            Constraint::Min(3),    // Upcoming events
        ])
        .margin(1)
        .split(area);

    let greeting = Paragraph::new(format!("Welcome back, {}", app.data.settings.user_name))
        .style(palette.accent().add_modifier(Modifier::BOLD));
    frame.render_widget(greeting, chunks[0]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4].as_ref())
        .split(chunks[1]);
    let summary = &app.summary;
    let stats = [
        ("Active Jobs", summary.active_jobs, summary.active_jobs_share()),
        ("Jobs In Progress", summary.jobs_in_progress, summary.jobs_in_progress_share()),
        ("Finished Jobs", summary.finished_jobs, summary.finished_jobs_share()),
        ("New Leads", summary.new_leads, summary.new_leads_share()),
    ];
    for ((title, count, share), card) in stats.into_iter().zip(cards.iter()) {
        let body = vec![
            Line::from(Span::styled(count.to_string(), palette.accent().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(share, palette.muted())),
        ];
        let widget = Paragraph::new(body)
            .alignment(Alignment::Center)
            .style(palette.base())
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(widget, *card);
    }

    let mut upcoming = app
        .data
        .events
        .iter()
        .filter(|event| event.start.date() >= app.today)
        .collect::<Vec<_>>();
    upcoming.sort_by_key(|event| event.start.as_datetime());
    let items = upcoming
        .into_iter()
        .take(5)
        .map(|event| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}  ", event.start), palette.muted()),
                Span::raw(event.title.clone()),
            ]))
        })
        .collect::<Vec<_>>();
    let list = List::new(items)
        .style(palette.base())
        .block(Block::default().borders(Borders::ALL).title("Upcoming Events"));
    frame.render_widget(list, chunks[2]);
}

fn render_map<S: RecordStore>(frame: &mut Frame, area: Rect, app: &mut App<S>, palette: &Palette) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)].as_ref())
        .split(columns[0]);

    if let Some(view) = app.map.view_mut() {
        view.draw(frame, left[0], palette);
    }
    let popup = app
        .map
        .view()
        .and_then(|view| view.selected())
        .map_or_else(
            || "Enter: add a location at the crosshair".to_string(),
            |marker| marker.popup.clone(),
        );
    let info = Paragraph::new(popup)
        .style(palette.base())
        .block(Block::default().borders(Borders::ALL).title("Marker"));
    frame.render_widget(info, left[1]);

    draw_list(
        frame,
        columns[1],
        "Locations",
        app.views.get_mut(EntityKind::Location),
        palette,
    );
}

fn render_guide_bar<S: RecordStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let hints = key_hints(app);
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(
                    format!(" [{key}] "),
                    Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan),
                ),
                Span::raw(format!("{desc}  ")),
            ]
        })
        .collect();
    let uploading = app.uploader.as_ref().map_or(0, |uploader| uploader.in_flight());
    let title = match &app.status {
        Some(status) => Span::styled(status.clone(), Style::default().fg(Color::Yellow)),
        None if uploading > 0 => Span::raw(format!("Guide (uploading {uploading})")),
        None => Span::raw("Guide"),
    };
    let guide = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(guide, area);
}

fn key_hints<S: RecordStore>(app: &App<S>) -> Vec<(&'static str, &'static str)> {
    if let Some(dialog) = app.modal.confirm_dialog() {
        if dialog.is_notice() {
            return vec![("Enter", "OK")];
        }
        return vec![("y", "Confirm"), ("n", "Cancel")];
    }
    if let Some(dialog) = app.modal.form() {
        if dialog.allows_delete {
            return vec![("d", "Delete"), ("Esc", "Close")];
        }
        return vec![("Enter", "Save"), ("Tab", "Next Field"), ("Esc", "Cancel")];
    }
    if app.show_help {
        return vec![("?", "Close Help")];
    }

    let mut hints = vec![("q", "Quit"), ("?", "Help"), ("Tab", "Sections")];
    match app.section {
        Section::Home => hints.extend_from_slice(&[("s", "Settings"), ("u", "Picture")]),
        Section::Clients | Section::Jobs | Section::Quotes | Section::MyServices => {
            hints.extend_from_slice(&[("↑/↓", "Nav"), ("a", "Add"), ("e", "Edit"), ("d", "Delete")]);
        }
        Section::Calendar => hints.extend_from_slice(&[
            ("a", "Add"),
            ("v", "View"),
            ("[/]", "Period"),
            ("</>", "Move"),
            ("-/+", "Resize"),
            ("Enter", "Details"),
        ]),
        Section::Map => hints.extend_from_slice(&[
            ("hjkl", "Pan"),
            ("Enter", "Add Here"),
            ("n/p", "Marker"),
            ("m", "Drag"),
            ("e", "Edit"),
            ("C", "Clear"),
        ]),
    }
    hints
}

fn help_text(section: Section) -> String {
    let common = "tab/shift-tab: switch sections\n1-7: jump to section\ns: settings\nu: upload profile picture\nq: quit";
    let specific = match section {
        Section::Home => "",
        Section::Clients | Section::Jobs | Section::Quotes | Section::MyServices => {
            "a: add\ne/enter: edit selected\nd: delete selected\n↑/↓: navigate\n"
        }
        Section::Calendar => {
            "a: add event\nenter: event details\nv: month/week/day\n[ ]: previous/next period\nt: today\nh/l: move day cursor\n< >: move selected event\n- +: shrink/extend event\n"
        }
        Section::Map => {
            "hjkl/arrows: pan\nenter: add location here\nn/p: select marker\nm: pick up/drop marker\ne: edit marker\nd: delete marker\n+/-: zoom\nC: clear all markers\n"
        }
    };
    format!("{specific}{common}")
}

fn render_help_popup(frame: &mut Frame, area: Rect, content: &str) {
    let popup_area = centered_rect(70, 60, area);
    frame.render_widget(Clear, popup_area);
    let block = Block::default().borders(Borders::ALL).title("Help");
    let help = Paragraph::new(content).block(block).wrap(Wrap { trim: true });
    frame.render_widget(help, popup_area);
}

fn render_form_popup(frame: &mut Frame, area: Rect, dialog: &FormDialog, palette: &Palette) {
    let body_lines = dialog
        .body
        .as_deref()
        .map_or(0, |body| u16::try_from(body.lines().count()).unwrap_or(u16::MAX));
    let field_rows = u16::try_from(dialog.form.fields.len()).unwrap_or(u16::MAX);
    let height = body_lines
        .saturating_add(field_rows.saturating_mul(3))
        .saturating_add(5);
    let popup_area = fixed_height_rect(60, height, area);
    frame.render_widget(Clear, popup_area);

    let mut constraints = Vec::new();
    if body_lines > 0 {
        constraints.push(Constraint::Length(body_lines));
    }
    constraints.extend(dialog.form.fields.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Min(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(popup_area);

    let mut next = 0;
    if let Some(body) = &dialog.body {
        frame.render_widget(Paragraph::new(body.as_str()).wrap(Wrap { trim: false }), chunks[0]);
        next = 1;
    }
    for (index, field) in dialog.form.fields.iter().enumerate() {
        let chunk = chunks[next + index];
        let focused = index == dialog.form.focus && field.is_editable();
        render_field(frame, chunk, field, focused, palette);
    }

    let help = if dialog.allows_delete {
        "d: Delete | Esc: Close"
    } else {
        "Enter: Save | Tab: Next field | Esc: Cancel"
    };
    frame.render_widget(Paragraph::new(help).style(palette.muted()), chunks[chunks.len() - 1]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(dialog.title.as_str())
        .style(palette.base());
    frame.render_widget(block, popup_area);
}

fn render_field(frame: &mut Frame, area: Rect, field: &FormField, focused: bool, palette: &Palette) {
    let title = match field.hint() {
        Some(hint) => format!("{} ({hint})", field.label),
        None => field.label.to_string(),
    };
    let border = if focused { palette.accent() } else { palette.muted() };
    let content = field.input.content.as_str();
    let mut spans = match &field.kind {
        FieldKind::Choice(_) => vec![Span::raw(format!("< {content} >"))],
        FieldKind::ReadOnly => vec![Span::styled(content.to_string(), palette.muted())],
        _ => vec![Span::raw(content.to_string())],
    };
    if let Some(completion) = field.completion() {
        let rest: String = completion.chars().skip(content.chars().count()).collect();
        spans.push(Span::styled(rest, palette.muted()));
    }
    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title),
    );
    frame.render_widget(widget, area);

    if focused && !matches!(field.kind, FieldKind::Choice(_)) {
        set_input_cursor(frame, area, &field.input);
    }
}

fn set_input_cursor(frame: &mut Frame, area: Rect, input: &TextInput) {
    let offset = u16::try_from(input.cursor).unwrap_or(u16::MAX);
    let cx = area.x + 1 + offset.min(area.width.saturating_sub(3));
    frame.set_cursor(cx, area.y + 1);
}

fn render_confirm_popup(frame: &mut Frame, area: Rect, dialog: &ConfirmDialog) {
    let popup_area = centered_rect(60, 30, area);
    frame.render_widget(Clear, popup_area);
    let block = Block::default().borders(Borders::ALL).title(dialog.title.as_str());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)].as_ref())
        .margin(1)
        .split(popup_area);

    let text = Paragraph::new(dialog.message.as_str()).wrap(Wrap { trim: true });
    frame.render_widget(text, chunks[0]);

    let help = if dialog.is_notice() {
        "Enter: OK"
    } else {
        "y: Confirm | n/Esc: Cancel"
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
    frame.render_widget(block, popup_area);
}

/// Prompt shown before the data directory exists.
pub(crate) fn render_init_popup(frame: &mut Frame, input: &TextInput) {
    let popup_area = centered_rect(60, 40, frame.size());
    frame.render_widget(Clear, popup_area);
    let block = Block::default().borders(Borders::ALL).title("Initialize ServiceDesk");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .margin(1)
        .split(popup_area);

    let text = Paragraph::new("No dashboard data found. Please confirm the data location:")
        .wrap(Wrap { trim: true });
    frame.render_widget(text, chunks[0]);

    let input_widget = Paragraph::new(input.content.as_str())
        .block(Block::default().borders(Borders::ALL).title("Path"));
    frame.render_widget(input_widget, chunks[1]);
    set_input_cursor(frame, chunks[1], input);

    let help = Paragraph::new("Enter: Initialize | Esc: Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);

    frame.render_widget(block, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}

/// Like `centered_rect`, but `height` rows tall (clipped to `r`).
fn fixed_height_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let top = r.y + (r.height - height) / 2;
    let column = centered_rect(percent_x, 100, r);
    Rect::new(column.x, top, column.width, height)
}
