//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::SortKey;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // List navigation
    SelectNext,
    SelectPrev,

    // Search
    StartSearch,
    StopSearch,
    SearchChar(char),
    SearchBackspace,

    // Sorting
    SortBy(SortKey),

    // Collection
    Refresh,

    // Book form
    NewBook,
    EditSelected,
    FormChar(char),
    FormBackspace,
    NextField,
    PrevField,
    SubmitForm,
    CloseForm,

    // Delete confirmation
    DeleteSelected,
    ConfirmDelete,
    CancelDelete,

    // Error banner
    DismissError,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode of the browsing screen
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

/// Which layer of the screen currently owns the keyboard
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Screen {
    Browse,
    Search,
    Form,
    ConfirmDelete,
    Help,
}

/// Convert a key event to a UiEvent based on which screen has focus
pub fn key_to_ui_event(key: KeyEvent, screen: Screen) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    match screen {
        Screen::Help => Some(UiEvent::CloseHelp),
        Screen::ConfirmDelete => handle_confirm_keys(key),
        Screen::Form => handle_form_keys(key),
        Screen::Search => handle_search_keys(key),
        Screen::Browse => handle_browse_keys(key),
    }
}

fn handle_browse_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('/') => Some(UiEvent::StartSearch),
        KeyCode::Char('t') => Some(UiEvent::SortBy(SortKey::Title)),
        KeyCode::Char('a') => Some(UiEvent::SortBy(SortKey::Author)),
        KeyCode::Char('n') => Some(UiEvent::NewBook),
        KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::EditSelected),
        KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::DeleteSelected),
        KeyCode::Char('r') => Some(UiEvent::Refresh),
        KeyCode::Char('x') => Some(UiEvent::DismissError),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        _ => None,
    }
}

fn handle_search_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopSearch),
        KeyCode::Backspace => Some(UiEvent::SearchBackspace),
        KeyCode::Char(c) => Some(UiEvent::SearchChar(c)),
        _ => None,
    }
}

fn handle_form_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::CloseForm),
        KeyCode::Enter => Some(UiEvent::SubmitForm),
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::Backspace => Some(UiEvent::FormBackspace),
        KeyCode::Char(c) => Some(UiEvent::FormChar(c)),
        _ => None,
    }
}

fn handle_confirm_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(UiEvent::ConfirmDelete)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(UiEvent::CancelDelete),
        _ => None,
    }
}
