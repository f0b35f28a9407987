//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Initial load
        let initial = self.state.fetch_all();
        self.dispatch(initial);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    let follow_up = self.state.handle_response(response);
                    self.dispatch(follow_up);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn dispatch(&self, command: Option<NetworkCommand>) {
        if let Some(cmd) = command {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // List navigation
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SelectPrev => self.state.select_prev(),

            // Search & sort
            UiEvent::StartSearch => self.state.start_search(),
            UiEvent::StopSearch => self.state.stop_search(),
            UiEvent::SearchChar(c) => self.state.search_char(c),
            UiEvent::SearchBackspace => self.state.search_backspace(),
            UiEvent::SortBy(key) => self.state.set_sort(key),

            // Collection
            UiEvent::Refresh => {
                let cmd = self.state.fetch_all();
                self.dispatch(cmd);
            }

            // Book form
            UiEvent::NewBook => self.state.begin_create(),
            UiEvent::EditSelected => self.state.edit_selected(),
            UiEvent::FormChar(c) => self.state.form_char(c),
            UiEvent::FormBackspace => self.state.form_backspace(),
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),
            UiEvent::SubmitForm => {
                let cmd = self.state.submit();
                self.dispatch(cmd);
            }
            UiEvent::CloseForm => self.state.close_form(),

            // Delete
            UiEvent::DeleteSelected => self.state.request_delete(),
            UiEvent::ConfirmDelete => {
                let cmd = self.state.confirm_delete();
                self.dispatch(cmd);
            }
            UiEvent::CancelDelete => self.state.cancel_delete(),

            // Banner & popups
            UiEvent::DismissError => self.state.dismiss_error(),
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
