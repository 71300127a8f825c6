//! Page layout rendering.
//!
//! Pure layout logic: splits the frame into navigation bar, page viewport
//! and status bar, and draws the already-rendered page lines into the
//! viewport at the current scroll position.

use super::constants::{NAV_BAR_HEIGHT, STATUS_BAR_HEIGHT};
use super::sections::content_width;
use super::styles::Palette;
use crate::model::SectionId;
use crate::state::{AppState, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageAreas {
    /// Navigation bar row.
    pub nav: Rect,
    /// Scrollable page.
    pub page: Rect,
    /// Status bar row.
    pub status: Rect,
}

/// Split `area` into navigation bar, page and status bar.
pub fn page_areas(area: Rect) -> PageAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(NAV_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    PageAreas {
        nav: chunks[0],
        page: chunks[1],
        status: chunks[2],
    }
}

/// Render navigation bar, visible page slice and status bar.
pub fn render_layout(
    frame: &mut Frame,
    state: &AppState,
    palette: &Palette,
    lines: &[Line<'static>],
) {
    let areas = page_areas(frame.area());

    render_nav_bar(frame, areas.nav, state, palette);
    render_page(frame, areas.page, state, lines);
    render_status_bar(frame, areas.status, state, palette);
}

/// Center the content column inside `area`.
fn content_column(area: Rect) -> Rect {
    let width = content_width(area.width).min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}

fn render_page(frame: &mut Frame, area: Rect, state: &AppState, lines: &[Line<'static>]) {
    let start = usize::try_from(state.page.scroll())
        .unwrap_or(usize::MAX)
        .min(lines.len());
    let end = start
        .saturating_add(usize::from(area.height))
        .min(lines.len());

    let paragraph = Paragraph::new(lines[start..end].to_vec());
    frame.render_widget(paragraph, content_column(area));
}

/// Name on the left, then one label per section. Sections in view are
/// highlighted.
fn render_nav_bar(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let in_view: Vec<SectionId> = state.page.intersecting().collect();

    let mut spans = vec![
        Span::styled(format!(" {} ", state.portfolio().profile.name), palette.name),
        Span::raw(" "),
    ];
    for id in SectionId::ALL {
        let style = if in_view.contains(&id) {
            palette.nav_active
        } else {
            palette.muted
        };
        spans.push(Span::styled(id.label(), style));
        spans.push(Span::raw("  "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Keyboard hints for the current focus.
pub fn build_keyboard_hints(focus: Option<Focus>) -> &'static str {
    match focus {
        None => "q quit · j/k scroll · n/p section · Tab contact · ? help",
        Some(Focus::ContactMethod(_)) => "Enter activate · Tab next · Esc leave · ? help",
        Some(Focus::Field(_)) => "type to edit · Tab next field · Esc leave",
        Some(Focus::Submit) => "Enter send · Tab next · Esc leave · ? help",
    }
}

/// Scroll position as shown in the status bar.
pub fn scroll_label(scroll: u32, max_scroll: u32) -> String {
    if max_scroll == 0 {
        return "All".to_string();
    }
    if scroll == 0 {
        return "Top".to_string();
    }
    if scroll >= max_scroll {
        return "Bot".to_string();
    }
    format!("{}%", u64::from(scroll) * 100 / u64::from(max_scroll))
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let position = format!(
        "{} {} ",
        state.page.current_section().label(),
        scroll_label(state.page.scroll(), state.page.max_scroll())
    );
    let hints = build_keyboard_hints(state.focus);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(u16::try_from(position.chars().count()).unwrap_or(u16::MAX)),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {hints}"), palette.muted))),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(position, palette.accent))),
        chunks[1],
    );
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
