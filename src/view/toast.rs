//! Toast notifications, stacked in the top-right corner.
//!
//! Toasts slide in from the right edge: a toast that is 40% visible shows
//! only its left 40% columns, flush against the edge.

use super::constants::{NAV_BAR_HEIGHT, TOAST_HEIGHT, TOAST_WIDTH};
use super::styles::Palette;
use crate::state::{ToastKind, ToastQueue};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Duration;

/// Screen rect of a toast in slot `slot` that is `fraction` on screen, or
/// `None` if it would not show at all.
pub fn toast_rect(area: Rect, slot: u16, fraction: f64) -> Option<Rect> {
    let width = TOAST_WIDTH.min(area.width);
    let shown = ((f64::from(width) * fraction.clamp(0.0, 1.0)).round() as u16).min(width);
    let y = area.y + NAV_BAR_HEIGHT + slot * TOAST_HEIGHT;
    if shown == 0 || y + TOAST_HEIGHT > area.bottom() {
        return None;
    }
    Some(Rect {
        x: area.right() - shown,
        y,
        width: shown,
        height: TOAST_HEIGHT,
    })
}

/// Draw every toast that is on screen at `now`, oldest on top.
pub fn render_toasts(frame: &mut Frame, toasts: &ToastQueue, palette: &Palette, now: Duration) {
    let area = frame.area();
    let mut slot = 0;
    for (toast, phase) in toasts.visible(now) {
        let Some(rect) = toast_rect(area, slot, phase.visible_fraction()) else {
            continue;
        };
        slot += 1;

        let style = match toast.kind() {
            ToastKind::Info => palette.info,
            ToastKind::Error => palette.error,
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(toast.message().to_string(), style)))
            .block(Block::default().borders(Borders::ALL).border_style(style));

        frame.render_widget(Clear, rect);
        frame.render_widget(paragraph, rect);
    }
}
