use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use crate::app::{point_in_rect, App};
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::QuoteFetched(ticket, outcome) => app.on_quote_fetched(ticket, outcome),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.panel_open() {
        handle_panel(app, key);
    } else {
        handle_card(app, key);
    }
}

fn handle_card(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Enter is the global "new quote" shortcut
        KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char(' ') => app.request_quote(),

        KeyCode::Char('f') => app.toggle_favorite(),
        KeyCode::Char('s') => app.show_share_link(),
        KeyCode::Char('p') | KeyCode::Tab => app.open_panel(),
        KeyCode::Esc => app.status = None,

        _ => {}
    }
}

fn handle_panel(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Tab => app.close_panel(),

        KeyCode::Char('j') | KeyCode::Down => app.panel_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.panel_nav_up(),

        KeyCode::Enter | KeyCode::Char('l') => app.select_highlighted(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_highlighted(),

        // Saving the quote on screen still works with the panel open
        KeyCode::Char('f') => app.toggle_favorite(),

        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;
    let in_panel = app.panel_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let hit = |area: Option<ratatui::layout::Rect>| area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);

    match mouse.kind {
        MouseEventKind::Moved => app.hover_at(x, y),
        MouseEventKind::Down(MouseButton::Left) => {
            if app.panel_open() {
                // Clicking the dimmed area outside the panel closes it
                if !in_panel {
                    app.close_panel();
                }
            } else if hit(app.quote_button_area) {
                app.request_quote();
            } else if hit(app.share_button_area) {
                app.show_share_link();
            }
        }
        MouseEventKind::ScrollDown if in_panel => app.panel_nav_down(),
        MouseEventKind::ScrollUp if in_panel => app.panel_nav_up(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use quote_machine_core::{Config, FavoritesStore, MemoryStorage, Quote};
    use tokio::sync::mpsc;

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(&Config::new(), FavoritesStore::new(MemoryStorage::new()), tx)
    }

    fn press(app: &mut App, code: KeyCode) {
        let key = KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        handle_event(app, AppEvent::Key(key));
    }

    fn show(app: &mut App, id: &str) {
        let ticket = app.machine.begin_request();
        handle_event(app, AppEvent::QuoteFetched(ticket, Ok(Quote::new(id, "Hello", "World"))));
    }

    #[test]
    fn test_save_then_open_panel_and_delete() {
        let mut app = app();
        show(&mut app, "abc");
        press(&mut app, KeyCode::Char('f'));
        assert!(app.machine.is_saved("abc"));

        press(&mut app, KeyCode::Char('p'));
        assert!(app.panel_open());

        press(&mut app, KeyCode::Char('d'));
        assert!(!app.machine.is_saved("abc"));
        assert_eq!(app.machine.view().current_id(), Some("abc"));

        press(&mut app, KeyCode::Esc);
        assert!(!app.panel_open());
    }

    #[test]
    fn test_enter_in_panel_shows_saved_quote() {
        let mut app = app();
        show(&mut app, "first");
        press(&mut app, KeyCode::Char('f'));
        show(&mut app, "second");

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert!(!app.panel_open());
        assert_eq!(app.machine.view().current_id(), Some("first"));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = self::app();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        handle_event(&mut app, AppEvent::Key(key));
        assert!(app.should_quit);
    }

    #[test]
    fn test_share_sets_status() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.status, None);

        show(&mut app, "abc");
        press(&mut app, KeyCode::Char('s'));
        assert!(matches!(app.status, Some(crate::app::Status::Info(ref url)) if url.contains("twitter.com")));
    }
}
