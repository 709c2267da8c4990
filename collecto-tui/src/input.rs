use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.schedule_here`(...) with the device position
    Locate,
    /// Run `service.schedule_near`(...) with the typed coordinates
    SearchCoordinates,
}

fn is_text(key: &KeyEvent) -> bool {
    !key.modifiers.contains(KeyModifiers::CONTROL) && !key.modifiers.contains(KeyModifiers::ALT)
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, Char, Down, Enter, Esc, Left, Right, Tab, Up};

    // Global quit shortcut
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::CommuneSelect => match key.code {
            Up => {
                app.commune_list_index = app.commune_list_index.saturating_sub(1);
            }
            Down => {
                if app.commune_list_index + 1 < app.filtered_communes().len() {
                    app.commune_list_index += 1;
                }
            }
            Enter => app.select_current_commune(),
            Tab => app.next_screen(),
            Backspace => app.pop_filter(),
            Esc => {
                if app.commune_filter.is_empty() {
                    action = Action::Quit;
                } else {
                    app.commune_filter.clear();
                    app.commune_list_index = 0;
                }
            }
            Char(character) if is_text(&key) => app.push_filter(character),
            _ => {}
        },

        Screen::LocationInput => match key.code {
            Char(character) if is_text(&key) => app.coordinate_input.push(character),
            Backspace => {
                app.coordinate_input.pop();
            }
            Enter => {
                action = if app.coordinate_input.trim().is_empty() {
                    Action::Locate
                } else {
                    Action::SearchCoordinates
                };
            }
            Tab => app.next_screen(),
            Esc => app.screen = Screen::CommuneSelect,
            _ => {}
        },

        Screen::ScheduleView => match key.code {
            Left | Esc | Char('b') => {
                app.screen = app.previous_screen;
            }
            Tab => app.next_screen(),
            Char('q') => action = Action::Quit,
            _ => {}
        },

        Screen::Tips => match key.code {
            Right | Down | Char('n') => app.next_tip(),
            Left | Up | Char('p') => app.previous_tip(),
            Tab => app.next_screen(),
            Esc => app.screen = Screen::CommuneSelect,
            Char('q') => action = Action::Quit,
            _ => {}
        },
    }
    action
}
