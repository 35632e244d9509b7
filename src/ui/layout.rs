//! Widget geometry and hit-testing.
//!
//! Every widget occupies a fixed fraction of the terminal. Fractions are
//! turned into cells with `floor` on the leading edge and `ceil` on the
//! trailing edge, so a point at a given fractional position inside a widget
//! lands in that widget's cells at every size.

use ratatui::layout::Rect;

/// Smallest terminal the layout is designed for.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 12;

// Guards against `0.15 * 40.0 == 6.0000002` style float noise.
const EDGE_EPSILON: f64 = 1e-6;

/// A clickable region of the player.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Widget {
    Prev,
    Play,
    Next,
    Open,
    Progress,
    Volume,
}

impl Widget {
    pub const ALL: [Widget; 6] = [
        Widget::Prev,
        Widget::Play,
        Widget::Next,
        Widget::Open,
        Widget::Progress,
        Widget::Volume,
    ];

    /// `(left, top, right, bottom)` as fractions of the terminal size.
    pub fn fractions(self) -> (f64, f64, f64, f64) {
        match self {
            Widget::Prev => (0.05, 0.72, 0.15, 0.92),
            Widget::Play => (0.20, 0.70, 0.35, 0.94),
            Widget::Next => (0.40, 0.72, 0.50, 0.92),
            Widget::Open => (0.55, 0.72, 0.65, 0.92),
            Widget::Progress => (0.05, 0.50, 0.95, 0.58),
            Widget::Volume => (0.70, 0.78, 0.95, 0.86),
        }
    }
}

const PANEL_FRACTIONS: (f64, f64, f64, f64) = (0.05, 0.04, 0.95, 0.46);

/// Rectangles of every widget for one terminal size.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct WidgetLayout {
    pub area: Rect,
    pub prev: Rect,
    pub play: Rect,
    pub next: Rect,
    pub open: Rect,
    pub progress: Rect,
    pub volume: Rect,
    /// Now-playing text; not clickable.
    pub panel: Rect,
}

impl WidgetLayout {
    /// Compute the layout for `area`. Pure function of its size and origin.
    pub fn compute(area: Rect) -> Self {
        let rect = |w: Widget| fraction_rect(area, w.fractions());
        Self {
            area,
            prev: rect(Widget::Prev),
            play: rect(Widget::Play),
            next: rect(Widget::Next),
            open: rect(Widget::Open),
            progress: rect(Widget::Progress),
            volume: rect(Widget::Volume),
            panel: fraction_rect(area, PANEL_FRACTIONS),
        }
    }

    pub fn rect(&self, widget: Widget) -> Rect {
        match widget {
            Widget::Prev => self.prev,
            Widget::Play => self.play,
            Widget::Next => self.next,
            Widget::Open => self.open,
            Widget::Progress => self.progress,
            Widget::Volume => self.volume,
        }
    }

    /// Whether the terminal is at least the designed minimum size.
    pub fn fits(&self) -> bool {
        self.area.width >= MIN_WIDTH && self.area.height >= MIN_HEIGHT
    }
}

fn span(total: u16, from: f64, to: f64) -> (u16, u16) {
    if total == 0 {
        return (0, 0);
    }
    let t = f64::from(total);
    let start = ((t * from + EDGE_EPSILON).floor() as u16).min(total - 1);
    let end = ((t * to - EDGE_EPSILON).ceil() as u16).clamp(start + 1, total);
    (start, end)
}

fn fraction_rect(area: Rect, (left, top, right, bottom): (f64, f64, f64, f64)) -> Rect {
    let (x0, x1) = span(area.width, left, right);
    let (y0, y1) = span(area.height, top, bottom);
    Rect::new(area.x + x0, area.y + y0, x1 - x0, y1 - y0)
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Map a pointer position to the widget under it.
pub fn hit_test(layout: &WidgetLayout, column: u16, row: u16) -> Option<Widget> {
    Widget::ALL
        .into_iter()
        .find(|&w| contains(layout.rect(w), column, row))
}

/// Slider value for a pointer at `column`, clamped to the slider bounds.
pub fn slider_value(rect: Rect, column: u16) -> f32 {
    if rect.width <= 1 {
        return 0.0;
    }
    let last = rect.x + rect.width - 1;
    let column = column.clamp(rect.x, last);
    f32::from(column - rect.x) / f32::from(rect.width - 1)
}

/// Column of a slider thumb for `value`, the inverse of `slider_value`.
pub fn thumb_column(rect: Rect, value: f32) -> u16 {
    if rect.width <= 1 {
        return rect.x;
    }
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    rect.x + (value * f32::from(rect.width - 1)).round() as u16
}
