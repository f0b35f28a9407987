//! Bookshelf TUI - actor-based book inventory manager
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - book screen state processing events
//! - Network Layer (Tokio) - async REST calls to the collection endpoint

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use bookshelf_tui::constants::{APP_TITLE, APP_VERSION, CONFIRM_DELETE_PROMPT, DEFAULT_LOG_FILTER};
use bookshelf_tui::messages::ui_events::{key_to_ui_event, InputMode};
use bookshelf_tui::messages::{FormView, NetworkCommand, NetworkResponse, RenderState, UiEvent};
use bookshelf_tui::models::FormField;
use bookshelf_tui::ui::{book_line, centered_rect, form_footer, render_input, render_tabs};
use bookshelf_tui::{AppActor, AppConfig, AppState, BooksClient, NetworkActor};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // Logging goes to a file; the terminal belongs to the UI
    let (log_dir, log_file) = config.log_location();
    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();

    tracing::info!(version = APP_VERSION, api_url = %config.api_url, "Starting bookshelf");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let client = BooksClient::new(config.api_url.clone(), config.timeout);
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let state = AppState::new(config.api_url.as_str());
    let app_actor = AppActor::new(state, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.screen()) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let banner_height = if state.error.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Length(banner_height), // Error banner
            Constraint::Length(3),             // Search + sort
            Constraint::Min(3),                // Book list
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    draw_header(f, state, chunks[0]);
    if let Some(error) = &state.error {
        draw_error_banner(f, error, chunks[1]);
    }
    draw_controls(f, state, chunks[2]);
    draw_books(f, state, chunks[3]);
    draw_status_bar(f, state, chunks[4]);

    // Popups
    if let Some(form) = &state.form {
        draw_form_popup(f, form, state, area);
    }

    if let Some(title) = &state.confirm_delete {
        draw_confirm_popup(f, title, area);
    }

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" 📚 {} ", APP_TITLE))
        .title_style(Style::default().bold());

    let subtitle = Line::from(vec![
        Span::raw("Sistema de administración de inventario  "),
        Span::styled(state.api_url.as_str(), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(subtitle).block(block), area);
}

fn draw_error_banner(f: &mut Frame, error: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Error (x: cerrar) ");

    let banner = Paragraph::new(error)
        .style(Style::default().fg(Color::Red).bold())
        .block(block);
    f.render_widget(banner, area);
}

fn draw_controls(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let is_searching = state.input_mode == InputMode::Search;
    let content = if state.search.is_empty() && !is_searching {
        "Buscar por título o autor... (/)"
    } else {
        state.search.as_str()
    };
    f.render_widget(render_input(content, " Buscar ", is_searching), chunks[0]);

    if is_searching {
        let max_x = chunks[0].x + chunks[0].width.saturating_sub(2);
        let cursor_x = (chunks[0].x + state.search.chars().count() as u16 + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, chunks[0].y + 1));
    }

    let sort_area = Block::default().borders(Borders::ALL).title(" Ordenar (t/a) ");
    let inner = sort_area.inner(chunks[1]);
    f.render_widget(sort_area, chunks[1]);
    f.render_widget(render_tabs(&["Título", "Autor"], state.sort_key.index()), inner);
}

fn draw_books(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = format!(" Libros ({}/{}) ", state.view.len(), state.total_books);
    let block = Block::default().borders(Borders::ALL).title(title);

    if state.is_loading && state.form.is_none() {
        let loading = Paragraph::new("Cargando...")
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        f.render_widget(loading, area);
        return;
    }

    if state.view.is_empty() {
        let empty = Paragraph::new("No se encontraron libros")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    // price + stock columns and separators take 28 cells
    let column_width = (area.width.saturating_sub(2 + 28) / 2).max(8) as usize;
    let items: Vec<ListItem> = state
        .view
        .iter()
        .map(|book| ListItem::new(book_line(book, column_width)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let hints = if state.is_loading {
        " Cargando... ".to_string()
    } else if state.input_mode == InputMode::Search {
        " Esc/Enter: terminar búsqueda ".to_string()
    } else {
        concat!(
            " n:nuevo | e:editar | d:eliminar | /:buscar | t/a:ordenar",
            " | r:recargar | ?:ayuda | q:salir "
        )
        .to_string()
    };

    let synced = state
        .last_synced
        .map(|t| format!(" Actualizado {} ", t.format("%H:%M:%S")))
        .unwrap_or_default();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(synced.chars().count() as u16)])
        .split(area);

    f.render_widget(Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)), chunks[0]);
    f.render_widget(Paragraph::new(synced).style(Style::default().fg(Color::DarkGray)), chunks[1]);
}

fn draw_form_popup(f: &mut Frame, view: &FormView, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let title = if view.editing { " Editar Libro " } else { " Nuevo Libro " };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Author
            Constraint::Length(3), // Price
            Constraint::Length(3), // Stock
            Constraint::Min(1),    // Footer
        ])
        .split(inner);

    for (i, field) in FormField::ALL.iter().enumerate() {
        let focused = view.form.focus == *field;
        let content = view.form.field(*field);
        let title = format!(" {} ", field.label());
        f.render_widget(render_input(content, &title, focused), rows[i]);

        if focused {
            let max_x = rows[i].x + rows[i].width.saturating_sub(2);
            let cursor_x = (rows[i].x + content.chars().count() as u16 + 1).min(max_x);
            f.set_cursor_position(Position::new(cursor_x, rows[i].y + 1));
        }
    }

    let footer = form_footer(view, state.is_loading, state.error.as_deref());
    f.render_widget(Paragraph::new(footer).wrap(Wrap { trim: false }), rows[4]);
}

fn draw_confirm_popup(f: &mut Frame, title: &str, area: Rect) {
    let popup_area = centered_rect(50, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Eliminar ")
        .style(Style::default().bg(Color::Black));

    let text = vec![
        Line::from(CONFIRM_DELETE_PROMPT),
        Line::from(Span::styled(title.to_string(), Style::default().bold())),
        Line::from(""),
        Line::from("s/y: sí   n/Esc: no"),
    ];

    let prompt = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(prompt, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 BOOKSHELF - Atajos de teclado

 LISTA
   ↑ / ↓  (k / j)     Mover selección
   /                  Buscar por título o autor
   t / a              Ordenar por título / autor
   r                  Recargar libros
   x                  Cerrar mensaje de error

 LIBROS
   n                  Nuevo libro
   e / Enter          Editar libro seleccionado
   d / Supr           Eliminar libro seleccionado

 FORMULARIO
   Tab / Shift+Tab    Cambiar de campo
   Enter              Guardar
   Esc                Cancelar

 GENERAL
   ?                  Mostrar/ocultar ayuda
   q / Ctrl+C         Salir

 Pulsa cualquier tecla para cerrar...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Ayuda ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
