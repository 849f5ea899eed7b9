//! Keyboard and mouse handling.
//!
//! Maps terminal input onto [`ReviewWidget`](crate::form::ReviewWidget)
//! operations and focus changes. Key bindings:
//!
//! | View | Key | Action |
//! |------|-----|--------|
//! | any | `Ctrl+C` | quit |
//! | notice shown | `Enter` / `Esc` | dismiss (all other keys ignored) |
//! | splash | `q` | quit |
//! | form | `Tab` / `Down`, `Shift+Tab` / `Up` | move focus |
//! | form, name | printable / `Backspace` | edit name |
//! | form, rating | `Left` / `Right` | move preview |
//! | form, rating | `Enter` / `Space` | commit preview |
//! | form, rating | `1`-`5` | commit rating |
//! | form, rating | `Esc` | clear preview |
//! | form, submit | `Enter` / `Space` | submit |
//! | form, outside name | `q` | quit |
//! | thank-you | `r` / `Enter` | start over |
//! | thank-you | `q` / `Esc` | quit |
//!
//! Rejections from the component are logged at debug level. The only
//! user-facing one, incomplete ratings, is stored by the component as its
//! notice and drawn by the UI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use crate::error::FormError;
use crate::form::ViewState;
use crate::review::{Aspect, MAX_RATING};
use crate::tui::app::{App, FormFocus};
use crate::tui::widgets::FormLayout;

/// Applies a key press to the application.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        app.quit();
        return;
    }

    if app.widget.notice().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.widget.dismiss_notice();
        }
        return;
    }

    match app.widget.view() {
        ViewState::Splash => {
            if key.code == KeyCode::Char('q') {
                app.quit();
            }
        }
        ViewState::FormActive => handle_form_key(app, key),
        ViewState::ThankYou => match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => app.reset(),
            KeyCode::Char('q') | KeyCode::Esc => app.quit(),
            _ => {}
        },
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            app.set_focus(app.focus.next());
            return;
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.set_focus(app.focus.prev());
            return;
        }
        _ => {}
    }

    match app.focus {
        FormFocus::Name => handle_name_key(app, key),
        FormFocus::Rating(aspect) => handle_rating_key(app, aspect, key),
        FormFocus::Submit => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => report(app.widget.submit()),
            KeyCode::Char('q') => app.quit(),
            _ => {}
        },
    }
}

fn handle_name_key(app: &mut App, key: KeyEvent) {
    let mut name = app.widget.input().name.clone();
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            name.push(c);
        }
        KeyCode::Backspace => {
            if name.pop().is_none() {
                return;
            }
        }
        KeyCode::Enter => {
            app.set_focus(app.focus.next());
            return;
        }
        _ => return,
    }
    report(app.widget.set_name(name));
}

fn handle_rating_key(app: &mut App, aspect: Aspect, key: KeyEvent) {
    let hover = app.widget.hover().get(aspect);
    let cursor = if hover > 0 {
        hover
    } else {
        app.widget.rating(aspect)
    };

    match key.code {
        KeyCode::Right => report(app.widget.set_hover(aspect, (cursor + 1).min(MAX_RATING))),
        KeyCode::Left => report(app.widget.set_hover(aspect, cursor.saturating_sub(1).max(1))),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if hover > 0 {
                commit(app, aspect, hover);
            }
        }
        KeyCode::Char(c @ '1'..='5') => {
            let value = c as u8 - b'0';
            commit(app, aspect, value);
        }
        KeyCode::Esc => app.widget.clear_hover(aspect),
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

fn commit(app: &mut App, aspect: Aspect, value: u8) {
    let result = app.widget.set_rating(aspect, value);
    if result.is_ok() {
        app.widget.clear_hover(aspect);
    }
    report(result);
}

/// Applies a mouse event to the application.
///
/// Only the form view reacts to the pointer, and nothing does while a
/// notice is shown.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.widget.notice().is_some() || !app.widget.is_form() {
        return;
    }
    let Some(layout) = FormLayout::compute(app.area) else {
        return;
    };

    let hit = layout.star_at(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Moved => {
            let hit_aspect = hit.map(|(aspect, _)| aspect);
            if let Some(previous) = app.pointer {
                if Some(previous) != hit_aspect {
                    app.widget.clear_hover(previous);
                }
            }
            app.pointer = hit_aspect;
            if let Some((aspect, position)) = hit {
                report(app.widget.set_hover(aspect, position));
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((aspect, position)) = hit {
                app.set_focus(FormFocus::Rating(aspect));
                report(app.widget.set_rating(aspect, position));
            } else if layout.in_name_input(mouse.column, mouse.row) {
                app.set_focus(FormFocus::Name);
            } else if layout.in_submit(mouse.column, mouse.row) {
                app.set_focus(FormFocus::Submit);
                report(app.widget.submit());
            }
        }
        _ => {}
    }
}

fn report(result: Result<(), FormError>) {
    if let Err(e) = result {
        debug!(error = %e, "Form operation rejected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ReviewWidget, TimerFired, WidgetConfig};
    use ratatui::layout::Rect;
    use tokio::sync::mpsc;

    fn form_app() -> App {
        let (tx, _rx) = mpsc::channel(8);
        let config = WidgetConfig {
            splash: None,
            ..WidgetConfig::default()
        };
        let mut app = App::new(ReviewWidget::new(config, tx), "Acme");
        app.area = Rect::new(0, 0, 80, 24);
        app
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_keys(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            handle_key(app, press(*code));
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn layout(app: &App) -> FormLayout {
        FormLayout::compute(app.area).unwrap()
    }

    // Keyboard: focus and name

    #[test]
    fn tab_and_backtab_move_focus() {
        let mut app = form_app();
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.focus, FormFocus::Rating(Aspect::Quality));
        handle_key(&mut app, press(KeyCode::Down));
        assert_eq!(app.focus, FormFocus::Rating(Aspect::Punctuality));
        handle_key(&mut app, press(KeyCode::BackTab));
        handle_key(&mut app, press(KeyCode::Up));
        assert_eq!(app.focus, FormFocus::Name);
    }

    #[test]
    fn typing_edits_name() {
        let mut app = form_app();
        type_keys(
            &mut app,
            &[
                KeyCode::Char('A'),
                KeyCode::Char('n'),
                KeyCode::Char('x'),
                KeyCode::Backspace,
                KeyCode::Char('a'),
            ],
        );
        assert_eq!(app.widget.input().name, "Ana");
    }

    #[test]
    fn q_in_name_field_is_text() {
        let mut app = form_app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.should_quit());
        assert_eq!(app.widget.input().name, "q");
    }

    #[test]
    fn backspace_on_empty_name_is_noop() {
        let mut app = form_app();
        handle_key(&mut app, press(KeyCode::Backspace));
        assert_eq!(app.widget.input().name, "");
    }

    #[test]
    fn enter_in_name_moves_to_first_rating() {
        let mut app = form_app();
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.focus, FormFocus::Rating(Aspect::Quality));
    }

    #[test]
    fn ctrl_c_quits_from_any_field() {
        let mut app = form_app();
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
        assert_eq!(app.widget.input().name, "");
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = form_app();
        let mut key = press(KeyCode::Char('x'));
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert_eq!(app.widget.input().name, "");
    }

    // Keyboard: ratings

    #[test]
    fn digits_commit_rating() {
        let mut app = form_app();
        app.set_focus(FormFocus::Rating(Aspect::Service));
        handle_key(&mut app, press(KeyCode::Char('4')));
        assert_eq!(app.widget.rating(Aspect::Service), 4);
        handle_key(&mut app, press(KeyCode::Char('2')));
        assert_eq!(app.widget.rating(Aspect::Service), 2);
        handle_key(&mut app, press(KeyCode::Char('9')));
        assert_eq!(app.widget.rating(Aspect::Service), 2);
    }

    #[test]
    fn arrows_preview_and_enter_commits() {
        let mut app = form_app();
        app.set_focus(FormFocus::Rating(Aspect::Quality));

        type_keys(&mut app, &[KeyCode::Right, KeyCode::Right, KeyCode::Right]);
        assert_eq!(app.widget.hover().get(Aspect::Quality), 3);
        assert_eq!(app.widget.rating(Aspect::Quality), 0);
        assert_eq!(app.widget.display_level(Aspect::Quality), 3);

        handle_key(&mut app, press(KeyCode::Left));
        assert_eq!(app.widget.hover().get(Aspect::Quality), 2);

        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.widget.rating(Aspect::Quality), 2);
        assert_eq!(app.widget.hover().get(Aspect::Quality), 0);
    }

    #[test]
    fn preview_is_clamped_to_range() {
        let mut app = form_app();
        app.set_focus(FormFocus::Rating(Aspect::Quality));

        handle_key(&mut app, press(KeyCode::Left));
        assert_eq!(app.widget.hover().get(Aspect::Quality), 1);

        for _ in 0..8 {
            handle_key(&mut app, press(KeyCode::Right));
        }
        assert_eq!(app.widget.hover().get(Aspect::Quality), 5);
    }

    #[test]
    fn preview_starts_from_committed_rating() {
        let mut app = form_app();
        app.set_focus(FormFocus::Rating(Aspect::Quality));
        handle_key(&mut app, press(KeyCode::Char('3')));
        handle_key(&mut app, press(KeyCode::Right));
        assert_eq!(app.widget.hover().get(Aspect::Quality), 4);
    }

    #[test]
    fn esc_clears_preview_and_tab_away_clears_too() {
        let mut app = form_app();
        app.set_focus(FormFocus::Rating(Aspect::Quality));
        handle_key(&mut app, press(KeyCode::Right));
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.widget.hover().get(Aspect::Quality), 0);

        handle_key(&mut app, press(KeyCode::Right));
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.widget.hover().get(Aspect::Quality), 0);
        assert_eq!(app.widget.rating(Aspect::Quality), 0);
    }

    #[test]
    fn enter_without_preview_keeps_rating() {
        let mut app = form_app();
        app.set_focus(FormFocus::Rating(Aspect::Punctuality));
        handle_key(&mut app, press(KeyCode::Char('5')));
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.widget.rating(Aspect::Punctuality), 5);
    }

    #[test]
    fn q_quits_on_rating_row() {
        let mut app = form_app();
        app.set_focus(FormFocus::Rating(Aspect::Quality));
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    // Keyboard: submit and notice

    #[test]
    fn incomplete_submit_shows_notice_that_blocks_input() {
        let mut app = form_app();
        app.set_focus(FormFocus::Submit);
        handle_key(&mut app, press(KeyCode::Enter));

        assert!(matches!(
            app.widget.notice(),
            Some(FormError::IncompleteRatings { .. })
        ));

        // Blocked while the notice is up.
        handle_key(&mut app, press(KeyCode::Tab));
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert_eq!(app.focus, FormFocus::Submit);
        assert!(!app.should_quit());

        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.widget.notice().is_none());
        assert!(app.widget.is_form());
    }

    #[tokio::test]
    async fn complete_submit_starts_submission() {
        let mut app = form_app();
        for aspect in Aspect::ALL {
            app.set_focus(FormFocus::Rating(aspect));
            handle_key(&mut app, press(KeyCode::Char('5')));
        }
        app.set_focus(FormFocus::Submit);
        handle_key(&mut app, press(KeyCode::Char(' ')));

        assert!(app.widget.is_submitting());
        assert!(app.widget.notice().is_none());
    }

    #[tokio::test]
    async fn edits_ignored_while_submitting() {
        let mut app = form_app();
        for aspect in Aspect::ALL {
            app.widget.set_rating(aspect, 3).unwrap();
        }
        app.widget.submit().unwrap();

        app.set_focus(FormFocus::Rating(Aspect::Quality));
        handle_key(&mut app, press(KeyCode::Char('5')));
        assert_eq!(app.widget.rating(Aspect::Quality), 3);

        app.set_focus(FormFocus::Name);
        handle_key(&mut app, press(KeyCode::Char('x')));
        assert_eq!(app.widget.input().name, "");
    }

    // Keyboard: other views

    #[tokio::test]
    async fn thank_you_r_resets_form() {
        let mut app = form_app();
        for aspect in Aspect::ALL {
            app.widget.set_rating(aspect, 5).unwrap();
        }
        app.widget.submit().unwrap();
        app.handle_timer(TimerFired::Submission(1));
        app.focus = FormFocus::Submit;

        handle_key(&mut app, press(KeyCode::Char('r')));

        assert!(app.widget.is_form());
        assert_eq!(app.focus, FormFocus::Name);
        assert!(!app.widget.input().is_complete());
    }

    #[tokio::test]
    async fn thank_you_q_quits() {
        let mut app = form_app();
        for aspect in Aspect::ALL {
            app.widget.set_rating(aspect, 5).unwrap();
        }
        app.widget.submit().unwrap();
        app.handle_timer(TimerFired::Submission(1));

        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn splash_ignores_form_keys() {
        let (tx, _rx) = mpsc::channel(8);
        let mut app = App::new(ReviewWidget::new(WidgetConfig::default(), tx), "Acme");

        handle_key(&mut app, press(KeyCode::Char('x')));
        assert!(app.widget.is_splash());
        assert_eq!(app.widget.input().name, "");

        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    // Mouse

    #[test]
    fn pointer_over_star_sets_hover() {
        let mut app = form_app();
        let row = layout(&app).star_rows.get(Aspect::Punctuality);

        handle_mouse(&mut app, mouse(MouseEventKind::Moved, row.x + 4, row.y));

        assert_eq!(app.widget.hover().get(Aspect::Punctuality), 3);
        assert_eq!(app.widget.rating(Aspect::Punctuality), 0);
        assert_eq!(app.pointer, Some(Aspect::Punctuality));
    }

    #[test]
    fn pointer_leaving_row_clears_hover() {
        let mut app = form_app();
        let row = layout(&app).star_rows.get(Aspect::Service);

        handle_mouse(&mut app, mouse(MouseEventKind::Moved, row.x + 8, row.y));
        assert_eq!(app.widget.hover().get(Aspect::Service), 5);

        handle_mouse(&mut app, mouse(MouseEventKind::Moved, 0, 0));
        assert_eq!(app.widget.hover().get(Aspect::Service), 0);
        assert_eq!(app.pointer, None);
    }

    #[test]
    fn pointer_moving_between_rows_clears_previous() {
        let mut app = form_app();
        let layout = layout(&app);
        let quality = layout.star_rows.get(Aspect::Quality);
        let service = layout.star_rows.get(Aspect::Service);

        handle_mouse(&mut app, mouse(MouseEventKind::Moved, quality.x, quality.y));
        handle_mouse(&mut app, mouse(MouseEventKind::Moved, service.x + 2, service.y));

        assert_eq!(app.widget.hover().get(Aspect::Quality), 0);
        assert_eq!(app.widget.hover().get(Aspect::Service), 2);
    }

    #[test]
    fn click_on_star_commits_and_focuses() {
        let mut app = form_app();
        let row = layout(&app).star_rows.get(Aspect::Quality);

        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), row.x + 6, row.y),
        );

        assert_eq!(app.widget.rating(Aspect::Quality), 4);
        assert_eq!(app.focus, FormFocus::Rating(Aspect::Quality));
    }

    #[test]
    fn click_on_name_focuses_it() {
        let mut app = form_app();
        app.set_focus(FormFocus::Submit);
        let input = layout(&app).name_input;

        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), input.x + 2, input.y + 1),
        );

        assert_eq!(app.focus, FormFocus::Name);
    }

    #[test]
    fn click_on_submit_with_missing_ratings_shows_notice() {
        let mut app = form_app();
        let submit = layout(&app).submit;

        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), submit.x + 10, submit.y),
        );

        assert_eq!(app.focus, FormFocus::Submit);
        assert!(app.widget.notice().is_some());
    }

    #[test]
    fn mouse_ignored_while_notice_shown() {
        let mut app = form_app();
        let _ = app.widget.submit();
        let row = layout(&app).star_rows.get(Aspect::Quality);

        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), row.x, row.y),
        );

        assert_eq!(app.widget.rating(Aspect::Quality), 0);
    }

    #[test]
    fn mouse_ignored_when_window_too_small() {
        let mut app = form_app();
        app.area = Rect::new(0, 0, 20, 5);

        handle_mouse(&mut app, mouse(MouseEventKind::Moved, 3, 3));

        assert_eq!(app.widget.hover(), &crate::review::HoverState::default());
    }
}
