//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse, Operation};
use crate::models::{Book, BookDraft, BookForm, FormMode, SortKey};

impl AppState {
    // ========================
    // List navigation
    // ========================

    pub fn select_next(&mut self) {
        if !self.view.is_empty() {
            self.selected = (self.selected + 1) % self.view.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.view.is_empty() {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.view.len() - 1);
        }
    }

    // ========================
    // Search & sort
    // ========================

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn stop_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn search_char(&mut self, c: char) {
        self.search.push(c);
        self.refresh_view();
    }

    pub fn search_backspace(&mut self) {
        self.search.pop();
        self.refresh_view();
    }

    pub fn set_sort(&mut self, sort_key: SortKey) {
        self.sort_key = sort_key;
        self.refresh_view();
    }

    // ========================
    // Book form
    // ========================

    pub fn begin_create(&mut self) {
        self.form = BookForm::default();
        self.form_mode = FormMode::Creating;
        self.form_session += 1;
        tracing::debug!("Form opened for a new book");
    }

    pub fn begin_edit(&mut self, book: &Book) {
        self.form = BookForm::from_book(book);
        self.form_mode = FormMode::Editing(book.id.clone());
        self.form_session += 1;
        tracing::debug!(book_id = %book.id, "Form opened for editing");
    }

    pub fn edit_selected(&mut self) {
        // Clone to avoid borrow conflict
        if let Some(book) = self.selected_book().cloned() {
            self.begin_edit(&book);
        }
    }

    pub fn close_form(&mut self) {
        self.form_mode = FormMode::Browsing;
        self.form = BookForm::default();
    }

    pub fn form_char(&mut self, c: char) {
        self.form.focused_mut().push(c);
    }

    pub fn form_backspace(&mut self) {
        self.form.focused_mut().pop();
    }

    pub fn next_field(&mut self) {
        self.form.focus = self.form.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.form.focus = self.form.focus.prev();
    }

    // ========================
    // Error banner & help
    // ========================

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Requests
    // ========================

    /// Request the full collection. Refused while another request is in flight.
    pub fn fetch_all(&mut self) -> Option<NetworkCommand> {
        if self.is_loading {
            return None;
        }
        let id = self.begin_request();
        Some(NetworkCommand::FetchBooks { id })
    }

    /// Validate the open form and build a create or update command.
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        let target = match &self.form_mode {
            FormMode::Browsing => return None,
            FormMode::Creating => None,
            FormMode::Editing(id) => Some(id.clone()),
        };

        if self.is_loading {
            return None;
        }

        let draft = match BookDraft::from_form(&self.form) {
            Ok(draft) => draft,
            Err(e) => {
                let operation = match target {
                    Some(_) => Operation::Update,
                    None => Operation::Create,
                };
                self.error = Some(e.user_message(operation).to_string());
                return None;
            }
        };

        let id = self.begin_request();
        self.saving_session = Some(self.form_session);
        Some(match target {
            Some(book_id) => NetworkCommand::UpdateBook { id, book_id, draft },
            None => NetworkCommand::CreateBook { id, draft },
        })
    }

    /// Ask for confirmation before deleting the selected book. No prompt
    /// opens while a request is in flight.
    pub fn request_delete(&mut self) {
        if self.is_loading {
            return;
        }
        if let Some(book) = self.selected_book() {
            self.pending_delete = Some(book.id.clone());
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The user answered yes: send the delete. While another request is in
    /// flight the prompt stays open.
    pub fn confirm_delete(&mut self) -> Option<NetworkCommand> {
        if self.is_loading {
            return None;
        }
        let book_id = self.pending_delete.take()?;
        tracing::debug!(%book_id, "Delete confirmed");
        let id = self.begin_request();
        Some(NetworkCommand::DeleteBook { id, book_id })
    }

    fn begin_request(&mut self) -> u64 {
        self.is_loading = true;
        let id = self.next_id();
        self.pending_request_id = Some(id);
        id
    }

    fn finish_request(&mut self) {
        self.is_loading = false;
        self.pending_request_id = None;
        self.saving_session = None;
    }

    /// Follow a successful mutation with one full re-fetch, keeping the
    /// loading flag raised until it lands.
    fn chain_fetch(&mut self) -> NetworkCommand {
        let id = self.next_id();
        self.pending_request_id = Some(id);
        NetworkCommand::FetchBooks { id }
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a network response; returns the follow-up command, if any.
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        let response_id = response.id();
        if self.pending_request_id != Some(response_id) {
            tracing::debug!(id = response_id, "Ignoring stale response");
            return None;
        }

        match response {
            NetworkResponse::BooksLoaded { books, .. } => {
                self.books = books;
                self.error = None;
                self.last_synced = Some(chrono::Local::now());
                self.refresh_view();
                self.finish_request();
                None
            }
            NetworkResponse::Saved { .. } => {
                // A form reopened since the submit keeps its input
                if self.saving_session.take() == Some(self.form_session) {
                    self.close_form();
                }
                self.error = None;
                Some(self.chain_fetch())
            }
            NetworkResponse::Deleted { .. } => {
                self.error = None;
                Some(self.chain_fetch())
            }
            NetworkResponse::Failed { operation, error, .. } => {
                tracing::debug!(
                    id = response_id,
                    operation = operation.as_str(),
                    "Error banner raised"
                );
                self.error = Some(error.user_message(operation).to_string());
                self.finish_request();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{
        MSG_DELETE_FAILED, MSG_LOAD_FAILED, MSG_REQUIRED_FIELDS, MSG_SAVE_FAILED,
    };
    use crate::error::BookError;
    use crate::models::{BookId, FormField};

    fn book(id: &str, title: &str, author: &str) -> Book {
        Book {
            id: BookId::new(id),
            title: title.into(),
            author: author.into(),
            price: 12.0,
            stock: 3,
        }
    }

    /// State with a loaded collection and no request in flight
    fn loaded(books: Vec<Book>) -> AppState {
        let mut state = AppState::new("http://localhost/api/books");
        let cmd = state.fetch_all().unwrap();
        let id = match cmd {
            NetworkCommand::FetchBooks { id } => id,
            other => panic!("unexpected command {:?}", other),
        };
        assert!(state.handle_response(NetworkResponse::BooksLoaded { id, books }).is_none());
        state
    }

    fn type_into(state: &mut AppState, field: FormField, text: &str) {
        state.form.focus = field;
        for c in text.chars() {
            state.form_char(c);
        }
    }

    #[test]
    fn test_fetch_replaces_collection_and_clears_error() {
        let mut state = loaded(vec![book("1", "Beta", "Alfa")]);
        state.error = Some("old".into());

        let Some(NetworkCommand::FetchBooks { id }) = state.fetch_all() else {
            panic!("expected fetch");
        };
        assert!(state.is_loading);
        state.handle_response(NetworkResponse::BooksLoaded {
            id,
            books: vec![book("2", "Ánimo", "Zeta"), book("1", "Beta", "Alfa")],
        });

        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert_eq!(state.books.len(), 2);
        assert_eq!(state.view[0].title, "Ánimo");
        assert!(state.last_synced.is_some());
    }

    #[test]
    fn test_fetch_failure_keeps_collection() {
        let mut state = loaded(vec![book("1", "Beta", "Alfa")]);
        let Some(NetworkCommand::FetchBooks { id }) = state.fetch_all() else {
            panic!("expected fetch");
        };

        let follow_up = state.handle_response(NetworkResponse::Failed {
            id,
            operation: Operation::Load,
            error: BookError::Transport("connection refused".into()),
        });

        assert!(follow_up.is_none());
        assert_eq!(state.books.len(), 1);
        assert_eq!(state.error.as_deref(), Some(MSG_LOAD_FAILED));
        assert!(!state.is_loading);
    }

    #[test]
    fn test_submit_without_title_sends_nothing() {
        let mut state = loaded(vec![]);
        state.begin_create();
        type_into(&mut state, FormField::Author, "Borges");

        assert!(state.submit().is_none());
        assert_eq!(state.error.as_deref(), Some(MSG_REQUIRED_FIELDS));
        assert!(!state.is_loading);
        assert!(state.form_mode.is_open());
    }

    #[test]
    fn test_submit_without_author_sends_nothing() {
        let mut state = loaded(vec![]);
        state.begin_create();
        type_into(&mut state, FormField::Title, "Ficciones");

        assert!(state.submit().is_none());
        assert_eq!(state.error.as_deref(), Some(MSG_REQUIRED_FIELDS));
    }

    #[test]
    fn test_create_sends_zero_for_unparseable_price() {
        let mut state = loaded(vec![]);
        state.begin_create();
        type_into(&mut state, FormField::Title, "Ficciones");
        type_into(&mut state, FormField::Author, "Borges");
        type_into(&mut state, FormField::Price, "abc");
        type_into(&mut state, FormField::Stock, "7");

        match state.submit() {
            Some(NetworkCommand::CreateBook { draft, .. }) => {
                assert_eq!(draft.price, 0.0);
                assert_eq!(draft.stock, 7);
            }
            other => panic!("expected create, got {:?}", other),
        }
        assert!(state.is_loading);
    }

    #[test]
    fn test_edit_submits_update_for_target() {
        let mut state = loaded(vec![book("42", "Aura", "Fuentes")]);
        state.edit_selected();
        assert_eq!(state.form_mode, FormMode::Editing(BookId::new("42")));
        assert_eq!(state.form.title, "Aura");
        assert_eq!(state.form.price, "12");

        match state.submit() {
            Some(NetworkCommand::UpdateBook { book_id, draft, .. }) => {
                assert_eq!(book_id, BookId::new("42"));
                assert_eq!(draft.author, "Fuentes");
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_successful_save_refetches_exactly_once() {
        let mut state = loaded(vec![]);
        state.begin_create();
        type_into(&mut state, FormField::Title, "Ficciones");
        type_into(&mut state, FormField::Author, "Borges");
        let Some(NetworkCommand::CreateBook { id, .. }) = state.submit() else {
            panic!("expected create");
        };

        let follow_up = state.handle_response(NetworkResponse::Saved { id });
        let Some(NetworkCommand::FetchBooks { id: fetch_id }) = follow_up else {
            panic!("expected a re-fetch, got {:?}", follow_up);
        };
        assert!(!state.form_mode.is_open());
        assert_eq!(state.form, BookForm::default());
        assert!(state.is_loading);

        let follow_up = state.handle_response(NetworkResponse::BooksLoaded {
            id: fetch_id,
            books: vec![book("1", "Ficciones", "Borges")],
        });
        assert!(follow_up.is_none());
        assert!(!state.is_loading);
        assert_eq!(state.view.len(), 1);
    }

    #[test]
    fn test_failed_save_keeps_form_input() {
        let mut state = loaded(vec![]);
        state.begin_create();
        type_into(&mut state, FormField::Title, "Ficciones");
        type_into(&mut state, FormField::Author, "Borges");
        let Some(NetworkCommand::CreateBook { id, .. }) = state.submit() else {
            panic!("expected create");
        };

        let follow_up = state.handle_response(NetworkResponse::Failed {
            id,
            operation: Operation::Create,
            error: BookError::Request(500),
        });

        assert!(follow_up.is_none());
        assert_eq!(state.error.as_deref(), Some(MSG_SAVE_FAILED));
        assert_eq!(state.form_mode, FormMode::Creating);
        assert_eq!(state.form.title, "Ficciones");
        assert!(!state.is_loading);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut state = loaded(vec![book("1", "Aura", "Fuentes")]);

        state.request_delete();
        assert_eq!(state.pending_delete, Some(BookId::new("1")));
        state.cancel_delete();
        assert!(state.pending_delete.is_none());
        assert!(state.confirm_delete().is_none());
        assert!(!state.is_loading);

        state.request_delete();
        match state.confirm_delete() {
            Some(NetworkCommand::DeleteBook { book_id, .. }) => {
                assert_eq!(book_id, BookId::new("1"))
            }
            other => panic!("expected delete, got {:?}", other),
        }
    }

    #[test]
    fn test_successful_delete_refetches() {
        let mut state = loaded(vec![book("1", "Aura", "Fuentes")]);
        state.request_delete();
        let Some(NetworkCommand::DeleteBook { id, .. }) = state.confirm_delete() else {
            panic!("expected delete");
        };

        assert!(matches!(
            state.handle_response(NetworkResponse::Deleted { id }),
            Some(NetworkCommand::FetchBooks { .. })
        ));
    }

    #[test]
    fn test_requests_are_single_flight() {
        let mut state = loaded(vec![book("1", "Aura", "Fuentes")]);
        assert!(state.fetch_all().is_some());

        assert!(state.fetch_all().is_none());
        state.begin_create();
        type_into(&mut state, FormField::Title, "Ficciones");
        type_into(&mut state, FormField::Author, "Borges");
        assert!(state.submit().is_none());
        state.close_form();
        state.request_delete();
        assert!(state.confirm_delete().is_none());
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut state = loaded(vec![book("1", "Aura", "Fuentes")]);
        let Some(NetworkCommand::FetchBooks { id }) = state.fetch_all() else {
            panic!("expected fetch");
        };

        let stale = NetworkResponse::BooksLoaded { id: id + 100, books: vec![] };
        let follow_up = state.handle_response(stale);
        assert!(follow_up.is_none());
        assert_eq!(state.books.len(), 1);
        assert!(state.is_loading);
    }

    #[test]
    fn test_search_and_sort_recompute_view() {
        let mut state = loaded(vec![book("1", "Ánimo", "Zeta"), book("2", "Beta", "Alfa")]);
        state.set_sort(SortKey::Author);
        assert_eq!(state.view[0].title, "Beta");

        for c in "zet".chars() {
            state.search_char(c);
        }
        assert_eq!(state.view.len(), 1);
        assert_eq!(state.view[0].author, "Zeta");
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_close_form_resets_fields() {
        let mut state = loaded(vec![book("1", "Aura", "Fuentes")]);
        state.edit_selected();
        state.close_form();

        assert_eq!(state.form_mode, FormMode::Browsing);
        assert_eq!(state.form, BookForm::default());
        assert!(state.to_render_state().form.is_none());
    }

    #[test]
    fn test_delete_prompt_does_not_open_while_loading() {
        let mut state = loaded(vec![book("1", "Aura", "Fuentes")]);
        assert!(state.fetch_all().is_some());

        state.request_delete();
        assert!(state.pending_delete.is_none());
        assert!(state.confirm_delete().is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_confirm_while_loading_keeps_prompt_open() {
        let mut state = loaded(vec![book("1", "Aura", "Fuentes")]);
        state.request_delete();
        let Some(NetworkCommand::FetchBooks { id }) = state.fetch_all() else {
            panic!("expected fetch");
        };

        assert!(state.confirm_delete().is_none());
        assert_eq!(state.pending_delete, Some(BookId::new("1")));

        state.handle_response(NetworkResponse::BooksLoaded {
            id,
            books: vec![book("1", "Aura", "Fuentes")],
        });
        assert!(matches!(
            state.confirm_delete(),
            Some(NetworkCommand::DeleteBook { .. })
        ));
    }

    #[test]
    fn test_failed_delete_sets_banner_without_refetch() {
        let mut state = loaded(vec![book("1", "Aura", "Fuentes")]);
        state.request_delete();
        let Some(NetworkCommand::DeleteBook { id, .. }) = state.confirm_delete() else {
            panic!("expected delete");
        };

        let follow_up = state.handle_response(NetworkResponse::Failed {
            id,
            operation: Operation::Delete,
            error: BookError::Request(404),
        });

        assert!(follow_up.is_none());
        assert_eq!(state.error.as_deref(), Some(MSG_DELETE_FAILED));
        assert!(!state.is_loading);
        assert_eq!(state.books.len(), 1);
        assert!(state.pending_delete.is_none());
    }

    #[test]
    fn test_dismiss_error_clears_banner() {
        let mut state = loaded(vec![]);
        state.begin_create();
        assert!(state.submit().is_none());
        assert_eq!(state.error.as_deref(), Some(MSG_REQUIRED_FIELDS));

        state.dismiss_error();
        assert!(state.error.is_none());
        assert!(state.to_render_state().error.is_none());
        assert!(state.form_mode.is_open());
    }

    #[test]
    fn test_begin_create_after_edit_drops_target() {
        let mut state = loaded(vec![book("42", "Aura", "Fuentes")]);
        state.edit_selected();
        type_into(&mut state, FormField::Stock, "9");

        state.begin_create();
        assert_eq!(state.form_mode, FormMode::Creating);
        assert!(state.form_mode.edit_target().is_none());
        assert_eq!(state.form, BookForm::default());

        type_into(&mut state, FormField::Title, "Ficciones");
        type_into(&mut state, FormField::Author, "Borges");
        assert!(matches!(state.submit(), Some(NetworkCommand::CreateBook { .. })));
    }

    #[test]
    fn test_late_save_keeps_reopened_form() {
        let mut state = loaded(vec![]);
        state.begin_create();
        type_into(&mut state, FormField::Title, "Ficciones");
        type_into(&mut state, FormField::Author, "Borges");
        let Some(NetworkCommand::CreateBook { id, .. }) = state.submit() else {
            panic!("expected create");
        };

        state.close_form();
        state.begin_create();
        type_into(&mut state, FormField::Title, "Aura");

        let follow_up = state.handle_response(NetworkResponse::Saved { id });
        assert!(matches!(follow_up, Some(NetworkCommand::FetchBooks { .. })));
        assert_eq!(state.form_mode, FormMode::Creating);
        assert_eq!(state.form.title, "Aura");
    }
}
