//! Network actor - runs book API requests in the Tokio async runtime

use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::BooksClient;

/// Network actor that executes REST commands against the collection endpoint
pub struct NetworkActor {
    client: BooksClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: BooksClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                        Some(command) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                if let Some(result) = execute(&client, command).await {
                                    let _ = response_tx.send(result);
                                }
                            });
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

/// Execute one command and map its outcome to a response
pub async fn execute(client: &BooksClient, command: NetworkCommand) -> Option<NetworkResponse> {
    let operation = command.operation()?;
    let start = Instant::now();

    let (id, result) = match command {
        NetworkCommand::FetchBooks { id } => {
            tracing::info!(id, "GET books");
            (id, client.list().await.map(|books| NetworkResponse::BooksLoaded { id, books }))
        }
        NetworkCommand::CreateBook { id, draft } => {
            tracing::info!(id, title = %draft.title, "POST book");
            (id, client.create(&draft).await.map(|_| NetworkResponse::Saved { id }))
        }
        NetworkCommand::UpdateBook { id, book_id, draft } => {
            tracing::info!(id, %book_id, "PUT book");
            (id, client.update(&book_id, &draft).await.map(|_| NetworkResponse::Saved { id }))
        }
        NetworkCommand::DeleteBook { id, book_id } => {
            tracing::info!(id, %book_id, "DELETE book");
            (id, client.delete(&book_id).await.map(|_| NetworkResponse::Deleted { id }))
        }
        NetworkCommand::Shutdown => return None,
    };

    let elapsed_ms = start.elapsed().as_millis() as u64;
    Some(match result {
        Ok(response) => {
            tracing::info!(id, elapsed_ms, operation = operation.as_str(), "Request completed");
            response
        }
        Err(error) => {
            tracing::warn!(
                id,
                elapsed_ms,
                operation = operation.as_str(),
                %error,
                "Request failed"
            );
            NetworkResponse::Failed { id, operation, error }
        }
    })
}
