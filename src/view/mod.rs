//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod help;
mod helpers;
mod layout;
pub mod sections;
pub mod styles;
mod toast;

pub use help::{key_label, render_help_overlay};
pub use helpers::{centered_rect, empty_line, tail_fit, wrap_text};
pub use layout::{build_keyboard_hints, page_areas, render_layout, scroll_label, PageAreas};
pub use sections::{content_width, render_page_lines, section_lines, RenderContext};
pub use styles::{ColorConfig, Palette};
pub use toast::{render_toasts, toast_rect};

use crate::anim::clock::{Clock, SystemClock};
use crate::anim::ticker::Ticker;
use crate::config::{KeyBindings, ResolvedConfig};
use crate::contact::{self, ContactPlatform, SystemPlatform};
use crate::model::{AppError, KeyAction, Portfolio, SectionId};
use crate::state::{handle_form_key, handle_scroll_action, AppState, Focus};
use chrono::Utc;
use constants::{NAV_BAR_HEIGHT, STATUS_BAR_HEIGHT};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Rows moved by one mouse wheel notch.
const WHEEL_ROWS: i64 = 3;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    palette: Palette,
    /// Drives the headline typewriter; fires at the configured tick.
    ticker: Ticker,
    clock: Box<dyn Clock>,
    platform: Box<dyn ContactPlatform>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(portfolio: Portfolio, config: &ResolvedConfig, args: CliArgs) -> Result<Self, TuiError> {
        let clock = SystemClock::new();
        let mut app_state =
            AppState::new(portfolio, config, clock.now()).map_err(AppError::from)?;
        if let Some(section) = args.section {
            app_state.page.jump_when_ready(section);
        }

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let palette = Palette::with_color_config(ColorConfig::from_env_and_args(args.no_color));

        Ok(Self::assemble(
            terminal,
            app_state,
            KeyBindings::default(),
            palette,
            config.tick_interval,
            Box::new(clock),
            Box::new(SystemPlatform),
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). The loop blocks on terminal
    /// events until the next tick is due. An idle page sleeps until the
    /// headline's next keystroke.
    pub fn run(&mut self) -> Result<(), TuiError> {
        // Initial render - ensures screen has content immediately
        self.draw()?;

        loop {
            let timeout = self.poll_timeout(self.clock.now());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key) {
                            info!("quit requested");
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Mouse(mouse) => {
                        if self.handle_mouse(mouse) {
                            self.draw()?;
                        }
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "terminal resized");
                        self.draw()?;
                    }
                    _ => {}
                }
            }

            let now = self.clock.now();
            if self.ticker.is_due(now) && self.tick(now) {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn assemble(
        terminal: Terminal<B>,
        app_state: AppState,
        key_bindings: KeyBindings,
        palette: Palette,
        tick_interval: Duration,
        clock: Box<dyn Clock>,
        platform: Box<dyn ContactPlatform>,
    ) -> Self {
        let mut ticker = Ticker::new(tick_interval);
        if app_state.page.animations() {
            ticker.subscribe(app_state.headline_handle());
        }

        Self {
            terminal,
            app_state,
            key_bindings,
            palette,
            ticker,
            clock,
            platform,
        }
    }

    /// How long to wait for input. Toasts and section reveals need every
    /// tick; otherwise only the headline's next keystroke matters.
    fn poll_timeout(&self, now: Duration) -> Duration {
        let busy = !self.app_state.toasts.is_empty() || self.app_state.page.is_animating(now);
        self.ticker.poll_timeout(now, busy)
    }

    /// Advance everything time-driven to `now`.
    ///
    /// Returns true if the next frame would look different.
    fn tick(&mut self, now: Duration) -> bool {
        let mut changed = self.ticker.tick(now);
        changed |= self.app_state.toasts.update(now);
        changed |= self.app_state.toasts.is_animating(now);
        changed |= self.app_state.page.is_animating(now);
        changed
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Special case: Ctrl+C should always quit, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Help overlay is modal: only scrolling, help and quit get through
        if self.app_state.help_visible {
            if key.code == KeyCode::Esc {
                self.app_state.help_visible = false;
                return false;
            }
            match self.key_bindings.get(key) {
                Some(KeyAction::Quit) => return true,
                Some(KeyAction::Help) => self.app_state.toggle_help(),
                Some(action) if action.is_scroll() => {
                    handle_scroll_action(&mut self.app_state, action)
                }
                _ => {}
            }
            return false;
        }

        // Typing into a focused form field takes precedence over bindings
        if handle_form_key(&mut self.app_state, key) {
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.app_state.toggle_help(),
            KeyAction::FocusNext => self.app_state.focus_next(),
            KeyAction::FocusPrev => self.app_state.focus_prev(),
            KeyAction::ClearFocus => self.app_state.clear_focus(),
            KeyAction::Activate => self.activate(),
            scroll => handle_scroll_action(&mut self.app_state, scroll),
        }
        false
    }

    /// Run whatever has focus: a contact action, the next field, or submit.
    fn activate(&mut self) {
        let now = self.clock.now();
        match self.app_state.focus {
            Some(Focus::ContactMethod(index)) => {
                let Some(method) = self.app_state.portfolio().contact.methods.get(index) else {
                    return;
                };
                let action = method.action.clone();
                if let Err(e) = contact::dispatch(
                    &action,
                    self.platform.as_mut(),
                    &mut self.app_state.toasts,
                    now,
                ) {
                    debug!(error = %e, "contact action failed, error toast shown");
                }
            }
            Some(Focus::Field(_)) => self.app_state.focus_next(),
            Some(Focus::Submit) => {
                self.app_state.submit_form(now, Utc::now());
            }
            None => {}
        }
    }

    /// Handle a mouse event. Returns true if the page moved.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let before = self.app_state.page.scroll();
        match mouse.kind {
            MouseEventKind::ScrollDown => self.app_state.page.scroll_by(WHEEL_ROWS),
            MouseEventKind::ScrollUp => self.app_state.page.scroll_by(-WHEEL_ROWS),
            _ => return false,
        }
        self.app_state.page.scroll() != before
    }

    /// Render the current frame
    ///
    /// Measures the page at the current width, hands the layout to the
    /// reveal trackers, then draws.
    fn draw(&mut self) -> Result<(), TuiError> {
        let now = self.clock.now();
        let size = self.terminal.size()?;
        let width = size.width.max(1);
        self.app_state
            .page
            .set_viewport_height(size.height.saturating_sub(NAV_BAR_HEIGHT + STATUS_BAR_HEIGHT));

        let (lines, layout) = render_page_lines(&RenderContext {
            state: &self.app_state,
            palette: &self.palette,
            width,
            now,
        });
        if self.app_state.page.layout_width() != Some(width) || *self.app_state.page.layout() != layout {
            self.app_state.page.set_layout(width, layout);
        }
        self.app_state.page.sync(now);

        let state = &self.app_state;
        let palette = &self.palette;
        let bindings = &self.key_bindings;
        self.terminal.draw(|frame| {
            render_layout(frame, state, palette, &lines);
            render_toasts(frame, &state.toasts, palette, now);
            if state.help_visible {
                render_help_overlay(frame, bindings, palette);
            }
        })?;

        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without touching the real terminal.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        clock: Box<dyn Clock>,
        platform: Box<dyn ContactPlatform>,
    ) -> Self {
        Self::assemble(
            terminal,
            app_state,
            KeyBindings::default(),
            Palette::with_color_config(ColorConfig::from_env_and_args(true)),
            crate::config::loader::DEFAULT_TICK_INTERVAL,
            clock,
            platform,
        )
    }
}

/// CLI arguments for TUI initialization
///
/// The subset of command-line arguments that affect the TUI's initial
/// state. Everything else is resolved into [`ResolvedConfig`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CliArgs {
    /// Disable colors (`--no-color`). `NO_COLOR` is honored too.
    pub no_color: bool,

    /// Section to start scrolled to (`--section`).
    pub section: Option<SectionId>,
}

impl CliArgs {
    /// Bundle the TUI-relevant flags.
    pub fn new(no_color: bool, section: Option<SectionId>) -> Self {
        Self { no_color, section }
    }
}

/// Initialize and run the TUI application
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_config(
    portfolio: Portfolio,
    config: &ResolvedConfig,
    args: CliArgs,
) -> Result<(), TuiError> {
    // Run the app and ensure cleanup happens even on error
    let result = TuiApp::new(portfolio, config, args).and_then(|mut app| app.run());

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
