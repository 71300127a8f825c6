//! Tests for AppState.

use super::*;
use crate::anim::intersection::RegionLayout;
use crate::anim::ticker::Animated;
use crate::state::page::region_of;
use crate::state::toast::ToastKind;

fn state_with(config: ResolvedConfig) -> AppState {
    AppState::new(Portfolio::embedded().unwrap(), &config, Duration::ZERO).unwrap()
}

fn state() -> AppState {
    state_with(ResolvedConfig::default())
}

/// Lay every section out 10 rows tall in a 12-row viewport.
fn with_layout(mut state: AppState) -> AppState {
    let mut layout = RegionLayout::new();
    for id in SectionId::ALL {
        layout.push(region_of(id), 10);
    }
    state.page.set_viewport_height(12);
    state.page.set_layout(80, layout);
    state.page.sync(Duration::ZERO);
    state
}

fn fill_form(state: &mut AppState) {
    for (field, text) in [
        (FormField::Name, "Ada"),
        (FormField::Email, "ada@example.com"),
        (FormField::Subject, "Hi"),
        (FormField::Message, "Hello there"),
    ] {
        for ch in text.chars() {
            state.form.insert_char(field, ch);
        }
    }
}

#[test]
fn new_state_starts_unfocused_at_top() {
    let state = state();
    assert_eq!(state.focus, None);
    assert!(!state.help_visible);
    assert!(state.toasts.is_empty());
    assert_eq!(state.page.scroll(), 0);
}

#[test]
fn empty_phrases_fail_construction() {
    let mut portfolio = Portfolio::embedded().unwrap();
    portfolio.profile.phrases.clear();
    let err = AppState::new(portfolio, &ResolvedConfig::default(), Duration::ZERO).unwrap_err();
    assert_eq!(err, TypewriterError::NoPhrases);
}

#[test]
fn headline_types_with_animations() {
    let state = state();
    assert_eq!(state.headline_text(), "");
    state
        .headline_handle()
        .borrow_mut()
        .advance(Duration::from_millis(100));
    let first = state.portfolio().profile.phrases[0].chars().next().unwrap();
    assert_eq!(state.headline_text(), first.to_string());
}

#[test]
fn headline_shows_full_phrase_without_animations() {
    let state = state_with(ResolvedConfig {
        animations: false,
        ..ResolvedConfig::default()
    });
    assert_eq!(state.headline_text(), state.portfolio().profile.phrases[0]);
}

#[test]
fn focus_order_lists_cards_then_fields_then_submit() {
    let state = state();
    let order = state.focus_order();
    let cards = state.portfolio().contact.methods.len();

    assert_eq!(order.len(), cards + FormField::ALL.len() + 1);
    assert_eq!(order[0], Focus::ContactMethod(0));
    assert_eq!(order[cards], Focus::Field(FormField::Name));
    assert_eq!(order.last(), Some(&Focus::Submit));
}

#[test]
fn focus_next_wraps_around() {
    let mut state = with_layout(state());
    let len = state.focus_order().len();

    state.focus_next();
    assert_eq!(state.focus, Some(Focus::ContactMethod(0)));
    for _ in 0..len {
        state.focus_next();
    }
    assert_eq!(state.focus, Some(Focus::ContactMethod(0)));
}

#[test]
fn focus_prev_from_nothing_lands_on_submit() {
    let mut state = with_layout(state());
    state.focus_prev();
    assert_eq!(state.focus, Some(Focus::Submit));
    state.focus_prev();
    assert_eq!(state.focus, Some(Focus::Field(FormField::Message)));
    assert_eq!(state.focused_field(), Some(FormField::Message));
}

#[test]
fn focusing_scrolls_contact_into_view() {
    let mut state = with_layout(state());
    assert_eq!(state.page.scroll(), 0);

    state.focus_next();
    assert_eq!(
        Some(state.page.scroll()),
        state.page.section_top(SectionId::Contact)
    );
}

#[test]
fn clear_focus_drops_focus() {
    let mut state = with_layout(state());
    state.focus_next();
    state.clear_focus();
    assert_eq!(state.focus, None);
    assert_eq!(state.focused_field(), None);
}

#[test]
fn valid_submit_clears_form_and_toasts() {
    let mut state = state();
    fill_form(&mut state);
    state.focus = Some(Focus::Submit);

    let submission = state.submit_form(Duration::from_secs(1), Utc::now());

    assert_eq!(submission.map(|s| s.name), Some("Ada".to_string()));
    assert!(state.form.is_empty());
    assert_eq!(state.focus, None);
    let toast = state.toasts.iter().next().unwrap();
    assert_eq!(toast.message(), "Message sent!");
    assert_eq!(toast.kind(), ToastKind::Info);
}

#[test]
fn invalid_submit_keeps_form_and_shows_error() {
    let mut state = state();
    state.form.insert_char(FormField::Name, 'A');

    assert!(state.submit_form(Duration::ZERO, Utc::now()).is_none());

    assert_eq!(state.form.value(FormField::Name), "A");
    let toast = state.toasts.iter().next().unwrap();
    assert_eq!(toast.kind(), ToastKind::Error);
    assert_eq!(toast.message(), "Email is required");
}

#[test]
fn toggle_help_flips_visibility() {
    let mut state = state();
    state.toggle_help();
    assert!(state.help_visible);
    state.toggle_help();
    assert!(!state.help_visible);
}
