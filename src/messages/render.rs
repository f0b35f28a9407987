//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Local};

use crate::messages::ui_events::{InputMode, Screen};
use crate::models::{Book, BookForm, SortKey};

/// Snapshot of the open book form
#[derive(Debug, Clone)]
pub struct FormView {
    /// Editing an existing book (otherwise creating)
    pub editing: bool,
    pub form: BookForm,
    /// Values that would be sent for the numeric fields
    pub price_preview: f64,
    pub stock_preview: u32,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub api_url: String,

    // Collection
    pub total_books: usize,
    pub view: Vec<Book>,
    pub selected: usize,
    pub last_synced: Option<DateTime<Local>>,

    // Controls
    pub search: String,
    pub input_mode: InputMode,
    pub sort_key: SortKey,

    // Popups
    pub form: Option<FormView>,
    /// Title of the book awaiting delete confirmation
    pub confirm_delete: Option<String>,
    pub show_help: bool,

    // Status
    pub is_loading: bool,
    pub error: Option<String>,
}

impl RenderState {
    /// Which layer owns the keyboard, topmost first
    pub fn screen(&self) -> Screen {
        if self.show_help {
            Screen::Help
        } else if self.confirm_delete.is_some() {
            Screen::ConfirmDelete
        } else if self.form.is_some() {
            Screen::Form
        } else if self.input_mode == InputMode::Search {
            Screen::Search
        } else {
            Screen::Browse
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        use crate::constants::DEFAULT_API_URL;
        RenderState {
            api_url: String::from(DEFAULT_API_URL),
            total_books: 0,
            view: Vec::new(),
            selected: 0,
            last_synced: None,
            search: String::new(),
            input_mode: InputMode::Normal,
            sort_key: SortKey::Title,
            form: None,
            confirm_delete: None,
            show_help: false,
            // the first fetch is issued before the first frame arrives
            is_loading: true,
            error: None,
        }
    }
}
