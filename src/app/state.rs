//! App state - pure data structure with no I/O logic

use chrono::{DateTime, Local};

use crate::messages::ui_events::InputMode;
use crate::messages::{FormView, RenderState};
use crate::models::{parse_amount, parse_count, Book, BookForm, BookId, FormMode, SortKey};
use crate::view::derive_view;

/// Main application state - pure data, no I/O
pub struct AppState {
    pub api_url: String,

    // Collection as last fetched, and its derived view
    pub books: Vec<Book>,
    pub view: Vec<Book>,
    pub selected: usize,
    pub last_synced: Option<DateTime<Local>>,

    // Controls
    pub search: String,
    pub input_mode: InputMode,
    pub sort_key: SortKey,

    // Book form
    pub form_mode: FormMode,
    pub form: BookForm,
    /// Bumped every time a form opens
    pub form_session: u64,
    /// Form session whose save is in flight
    pub saving_session: Option<u64>,

    // Delete confirmation
    pub pending_delete: Option<BookId>,

    // Requests (single-flight)
    pub is_loading: bool,
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,

    // Error banner
    pub error: Option<String>,

    // Popups
    pub show_help: bool,
}

impl AppState {
    pub fn new(api_url: impl Into<String>) -> Self {
        AppState {
            api_url: api_url.into(),
            books: Vec::new(),
            view: Vec::new(),
            selected: 0,
            last_synced: None,
            search: String::new(),
            input_mode: InputMode::Normal,
            sort_key: SortKey::Title,
            form_mode: FormMode::Browsing,
            form: BookForm::default(),
            form_session: 0,
            saving_session: None,
            pending_delete: None,
            is_loading: false,
            next_request_id: 1,
            pending_request_id: None,
            error: None,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Recompute the derived view and keep the selection in range
    pub fn refresh_view(&mut self) {
        self.view = derive_view(&self.search, self.sort_key, &self.books);
        self.selected = self.selected.min(self.view.len().saturating_sub(1));
    }

    pub fn selected_book(&self) -> Option<&Book> {
        self.view.get(self.selected)
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let form = self.form_mode.is_open().then(|| FormView {
            editing: self.form_mode.edit_target().is_some(),
            form: self.form.clone(),
            price_preview: parse_amount(&self.form.price),
            stock_preview: parse_count(&self.form.stock),
        });

        let confirm_delete = self.pending_delete.as_ref().map(|id| {
            self.books
                .iter()
                .find(|b| &b.id == id)
                .map(|b| b.title.clone())
                .unwrap_or_else(|| id.to_string())
        });

        RenderState {
            api_url: self.api_url.clone(),
            total_books: self.books.len(),
            view: self.view.clone(),
            selected: self.selected,
            last_synced: self.last_synced,
            search: self.search.clone(),
            input_mode: self.input_mode,
            sort_key: self.sort_key,
            form,
            confirm_delete,
            show_help: self.show_help,
            is_loading: self.is_loading,
            error: self.error.clone(),
        }
    }
}
