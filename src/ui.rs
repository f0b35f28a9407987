use ratatui::{prelude::*, widgets::*};

use crate::messages::FormView;
use crate::models::{format_price, Book};

/// Renders a single-line input field
pub fn render_input<'a>(content: &'a str, title: &'a str, is_focused: bool) -> Paragraph<'a> {
    let style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title);

    Paragraph::new(content).block(block)
}

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// One row of the book list: title, author, price and stock
pub fn book_line(book: &Book, title_width: usize) -> Line<'static> {
    let title = if book.title.is_empty() { "(sin título)" } else { book.title.as_str() };
    let author = if book.author.is_empty() { "(sin autor)" } else { book.author.as_str() };

    Line::from(vec![
        Span::styled(pad(title, title_width), Style::default().bold()),
        Span::raw("  "),
        Span::styled(pad(author, title_width), Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::styled(format!("{:>10}", book.display_price()), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(format!("stock {:>4}", book.stock), stock_style(book)),
    ])
}

/// Stock colour: green when available, red when sold out
pub fn stock_style(book: &Book) -> Style {
    if book.in_stock() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    }
}

/// Footer of the book form: values to be sent, the current error (the
/// banner is hidden behind the popup) and key hints
pub fn form_footer(view: &FormView, is_loading: bool, error: Option<&str>) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "Se enviará: precio {}  stock {}",
            format_price(view.price_preview),
            view.stock_preview
        ),
        Style::default().fg(Color::DarkGray),
    ))];

    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red).bold(),
        )));
    }

    let save = if is_loading { "Guardando..." } else { "Enter: Guardar" };
    lines.push(Line::from(vec![
        Span::styled(save, Style::default().fg(Color::Green).bold()),
        Span::raw("  |  Esc: Cancelar  |  Tab: siguiente campo"),
    ]));
    lines
}

/// Truncate or pad to exactly `width` characters
fn pad(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        format!("{}{}", text, " ".repeat(width - count))
    }
}

/// Rectangle centered in `r`, sized by percentage
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MSG_REQUIRED_FIELDS;
    use crate::models::BookForm;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn form_view() -> FormView {
        FormView {
            editing: false,
            form: BookForm::default(),
            price_preview: 9.5,
            stock_preview: 0,
        }
    }

    #[test]
    fn test_form_footer_shows_error() {
        let lines = form_footer(&form_view(), false, Some(MSG_REQUIRED_FIELDS));
        assert_eq!(lines.len(), 3);
        assert_eq!(text(&lines[0]), "Se enviará: precio $9.50  stock 0");
        assert_eq!(text(&lines[1]), MSG_REQUIRED_FIELDS);
        assert!(text(&lines[2]).starts_with("Enter: Guardar"));
    }

    #[test]
    fn test_form_footer_while_saving() {
        let lines = form_footer(&form_view(), true, None);
        assert_eq!(lines.len(), 2);
        assert!(text(&lines[1]).starts_with("Guardando..."));
    }

    #[test]
    fn test_pad_truncates_long_titles() {
        assert_eq!(pad("Rayuela", 10), "Rayuela   ");
        assert_eq!(pad("Cien años de soledad", 8), "Cien añ…");
    }
}
