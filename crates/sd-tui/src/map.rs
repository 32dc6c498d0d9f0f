//! Map widget with draggable markers and the integration that owns it.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use sd_core::{MapLocation, RecordId};

use crate::ui::Palette;

/// Initial view: central London.
pub(crate) const DEFAULT_CENTER: (f64, f64) = (51.505, -0.09);
pub(crate) const DEFAULT_ZOOM: u8 = 13;
const MIN_ZOOM: u8 = 1;
const MAX_ZOOM: u8 = 18;
/// Fraction of the visible span moved per pan step.
const PAN_STEPS: f64 = 20.0;

/// Handlers attached to a map's click event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MapListener {
    AddLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MapEvent {
    /// The crosshair was clicked, asking to add a location there.
    AddLocationAt { latitude: f64, longitude: f64 },
    /// A dragged marker was dropped.
    MarkerMoved {
        id: RecordId,
        latitude: f64,
        longitude: f64,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct Marker {
    pub(crate) location: MapLocation,
    pub(crate) popup: String,
}

impl Marker {
    fn new(location: &MapLocation) -> Self {
        Self {
            popup: location.popup_text(),
            location: location.clone(),
        }
    }

    fn set_position(&mut self, latitude: f64, longitude: f64) {
        self.location.latitude = latitude;
        self.location.longitude = longitude;
        self.popup = self.location.popup_text();
    }
}

#[derive(Debug)]
pub(crate) struct MapView {
    center: (f64, f64),
    zoom: u8,
    crosshair: (f64, f64),
    markers: Vec<Marker>,
    selected: Option<usize>,
    grabbed: Option<usize>,
    listeners: Vec<MapListener>,
    /// Area the widget was last measured at; `None` until first drawn.
    measured: Option<Rect>,
}

impl MapView {
    fn new(locations: &[MapLocation], center: (f64, f64), zoom: u8) -> Self {
        Self {
            center,
            zoom,
            crosshair: center,
            markers: locations.iter().map(Marker::new).collect(),
            selected: None,
            grabbed: None,
            listeners: Vec::new(),
            measured: None,
        }
    }

    pub(crate) fn on_click(&mut self, listener: MapListener) {
        self.listeners.push(listener);
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Click at the crosshair, notifying every attached listener.
    pub(crate) fn click(&self) -> Vec<MapEvent> {
        let (latitude, longitude) = self.crosshair;
        self.listeners
            .iter()
            .map(|listener| match listener {
                MapListener::AddLocation => MapEvent::AddLocationAt {
                    latitude,
                    longitude,
                },
            })
            .collect()
    }

    /// Re-measure the widget against the area it is drawn in. Returns
    /// whether the size changed since the last measurement.
    pub(crate) fn invalidate_size(&mut self, area: Rect) -> bool {
        if self.measured == Some(area) {
            return false;
        }
        tracing::debug!(width = area.width, height = area.height, "map size invalidated");
        self.measured = Some(area);
        true
    }

    pub(crate) fn measured(&self) -> Option<Rect> {
        self.measured
    }

    pub(crate) fn center(&self) -> (f64, f64) {
        self.center
    }

    pub(crate) fn zoom(&self) -> u8 {
        self.zoom
    }

    pub(crate) fn crosshair(&self) -> (f64, f64) {
        self.crosshair
    }

    pub(crate) fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Degrees of longitude across the view; latitude spans half as much.
    fn span(&self) -> f64 {
        360.0 / 2f64.powi(i32::from(self.zoom))
    }

    fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let span = self.span();
        let (lat, lon) = self.center;
        (
            [lon - span / 2.0, lon + span / 2.0],
            [lat - span / 4.0, lat + span / 4.0],
        )
    }

    pub(crate) fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub(crate) fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM);
    }

    /// Move the crosshair (and a grabbed marker) by whole pan steps.
    pub(crate) fn pan(&mut self, north: i8, east: i8) {
        let step = self.span() / PAN_STEPS;
        let (lat, lon) = self.crosshair;
        let lat = (lat + f64::from(north) * step / 2.0).clamp(-85.0, 85.0);
        let lon = wrap_longitude(lon + f64::from(east) * step);
        self.crosshair = (lat, lon);
        if let Some(index) = self.grabbed {
            if let Some(marker) = self.markers.get_mut(index) {
                marker.set_position(lat, lon);
            }
        }
        let ([west, east_edge], [south, north_edge]) = self.bounds();
        if lon < west || lon > east_edge || lat < south || lat > north_edge {
            self.center = self.crosshair;
        }
    }

    /// Select the next marker and move the crosshair onto it.
    pub(crate) fn select_next(&mut self) {
        if self.markers.is_empty() || self.grabbed.is_some() {
            return;
        }
        let next = self.selected.map_or(0, |index| (index + 1) % self.markers.len());
        self.select(next);
    }

    pub(crate) fn select_prev(&mut self) {
        if self.markers.is_empty() || self.grabbed.is_some() {
            return;
        }
        let len = self.markers.len();
        let prev = self.selected.map_or(len - 1, |index| (index + len - 1) % len);
        self.select(prev);
    }

    pub(crate) fn select_id(&mut self, id: &RecordId) {
        if let Some(index) = self
            .markers
            .iter()
            .position(|marker| &marker.location.id == id)
        {
            self.select(index);
        }
    }

    fn select(&mut self, index: usize) {
        if let Some(marker) = self.markers.get(index) {
            self.selected = Some(index);
            self.crosshair = (marker.location.latitude, marker.location.longitude);
            self.center = self.crosshair;
        }
    }

    pub(crate) fn selected(&self) -> Option<&Marker> {
        self.selected.and_then(|index| self.markers.get(index))
    }

    pub(crate) fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub(crate) fn is_dragging(&self) -> bool {
        self.grabbed.is_some()
    }

    /// Pick up the selected marker, or drop the one being dragged. Dropping
    /// yields the marker's new position.
    pub(crate) fn toggle_drag(&mut self) -> Option<MapEvent> {
        if let Some(index) = self.grabbed.take() {
            let marker = self.markers.get(index)?;
            return Some(MapEvent::MarkerMoved {
                id: marker.location.id.clone(),
                latitude: marker.location.latitude,
                longitude: marker.location.longitude,
            });
        }
        let index = self.selected?;
        let marker = self.markers.get(index)?;
        self.crosshair = (marker.location.latitude, marker.location.longitude);
        self.grabbed = Some(index);
        None
    }

    pub(crate) fn draw(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        self.invalidate_size(area);
        let (x_bounds, y_bounds) = self.bounds();
        let (cross_lat, cross_lon) = self.crosshair;
        let title = format!(
            "Map  {cross_lat:.4}, {cross_lon:.4}  zoom {}{}",
            self.zoom,
            if self.is_dragging() { "  [dragging]" } else { "" }
        );
        let marker_color = palette.marker;
        let selected = self.selected;
        let markers = &self.markers;
        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL).title(title))
            .background_color(palette.bg)
            .marker(symbols::Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(move |ctx| {
                ctx.draw(&Map {
                    color: Color::DarkGray,
                    resolution: MapResolution::High,
                });
                ctx.layer();
                let coords: Vec<(f64, f64)> = markers
                    .iter()
                    .map(|marker| (marker.location.longitude, marker.location.latitude))
                    .collect();
                ctx.draw(&Points {
                    coords: &coords,
                    color: marker_color,
                });
                for (index, marker) in markers.iter().enumerate() {
                    let mut style = Style::default().fg(marker_color);
                    if Some(index) == selected {
                        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    }
                    ctx.print(
                        marker.location.longitude,
                        marker.location.latitude,
                        Span::styled(format!("◆ {}", marker.location.name), style),
                    );
                }
                ctx.print(
                    cross_lon,
                    cross_lat,
                    Span::styled("+", Style::default().fg(Color::Red)),
                );
            });
        frame.render_widget(canvas, area);
    }
}

fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Owns at most one map widget, rebuilt on every display.
#[derive(Debug)]
pub(crate) struct MapIntegration {
    view: Option<MapView>,
    center: (f64, f64),
    zoom: u8,
    inits: usize,
}

impl Default for MapIntegration {
    fn default() -> Self {
        Self {
            view: None,
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            inits: 0,
        }
    }
}

impl MapIntegration {
    /// Destroy any existing widget and build a new one with one click listener.
    /// Center, zoom and the selected marker carry over.
    pub(crate) fn show(&mut self, locations: &[MapLocation]) {
        let mut selected = None;
        if let Some(old) = self.view.take() {
            self.center = old.center;
            self.zoom = old.zoom;
            selected = old.selected().map(|marker| marker.location.id.clone());
        }
        let mut view = MapView::new(locations, self.center, self.zoom);
        view.on_click(MapListener::AddLocation);
        if let Some(id) = selected {
            view.select_id(&id);
        }
        self.view = Some(view);
        self.inits += 1;
        tracing::debug!(inits = self.inits, markers = locations.len(), "rebuilt map");
    }

    pub(crate) fn view(&self) -> Option<&MapView> {
        self.view.as_ref()
    }

    pub(crate) fn view_mut(&mut self) -> Option<&mut MapView> {
        self.view.as_mut()
    }

    pub(crate) fn inits(&self) -> usize {
        self.inits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_core::Collections;

    fn shown() -> MapIntegration {
        let mut map = MapIntegration::default();
        map.show(&Collections::seeded().locations);
        map
    }

    #[test]
    fn starts_over_london_at_street_zoom() {
        let map = shown();
        let view = map.view().unwrap();
        assert_eq!(view.center(), DEFAULT_CENTER);
        assert_eq!(view.zoom(), DEFAULT_ZOOM);
        assert_eq!(view.markers().len(), 2);
    }

    #[test]
    fn repeated_shows_keep_one_click_listener() {
        let mut map = shown();
        let locations = Collections::seeded().locations;
        map.show(&locations);
        map.show(&locations);
        let view = map.view().unwrap();
        assert_eq!(map.inits(), 3);
        assert_eq!(view.listener_count(), 1);
        assert_eq!(view.click().len(), 1);
    }

    #[test]
    fn click_reports_crosshair_position() {
        let map = shown();
        let events = map.view().unwrap().click();
        assert_eq!(
            events,
            vec![MapEvent::AddLocationAt {
                latitude: 51.505,
                longitude: -0.09
            }]
        );
    }

    #[test]
    fn size_is_remeasured_when_area_changes() {
        let mut map = shown();
        let view = map.view_mut().unwrap();
        assert_eq!(view.measured(), None);
        let area = Rect::new(0, 0, 40, 20);
        assert!(view.invalidate_size(area));
        assert!(!view.invalidate_size(area));
        assert_eq!(view.measured(), Some(area));

        let wider = Rect::new(0, 0, 80, 20);
        assert!(view.invalidate_size(wider));
        assert_eq!(view.measured(), Some(wider));
    }

    #[test]
    fn drag_and_drop_moves_marker_and_refreshes_popup() {
        let mut map = shown();
        let view = map.view_mut().unwrap();
        view.select_next();
        assert!(view.toggle_drag().is_none());
        view.pan(0, 2);
        let Some(MapEvent::MarkerMoved { id, latitude, longitude }) = view.toggle_drag() else {
            panic!("expected a drop");
        };
        assert_eq!(id, RecordId::from("loc_001"));
        assert!((latitude - 51.505).abs() < 1e-9);
        assert!(longitude > -0.09);
        let marker = view.selected().unwrap();
        assert!(marker.popup.contains(&format!("Lon: {longitude:.4}")));
        assert!(!view.is_dragging());
    }

    #[test]
    fn selection_survives_rebuild() {
        let mut map = shown();
        map.view_mut().unwrap().select_prev();
        map.show(&Collections::seeded().locations);
        let selected = map.view().unwrap().selected().map(|marker| marker.location.id.clone());
        assert_eq!(selected, Some(RecordId::from("loc_002")));
    }

    #[test]
    fn zoom_is_bounded() {
        let mut map = shown();
        let view = map.view_mut().unwrap();
        for _ in 0..30 {
            view.zoom_in();
        }
        assert_eq!(view.zoom(), MAX_ZOOM);
        for _ in 0..30 {
            view.zoom_out();
        }
        assert_eq!(view.zoom(), MIN_ZOOM);
    }

    #[test]
    fn longitude_wraps_around_antimeridian() {
        assert!((wrap_longitude(190.0) + 170.0).abs() < 1e-9);
        assert!((wrap_longitude(-181.0) - 179.0).abs() < 1e-9);
    }
}
