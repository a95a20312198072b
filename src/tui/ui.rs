//! UI rendering using ratatui

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::{client::session::LoadState, schema::advocate::AdvocateDetail};

use super::app::{App, Mode};

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for borders and less important text
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for the current page and search term
const HIGHLIGHT: Color = Color::Yellow;
/// Error color
const ERROR: Color = Color::Red;

const TITLE: &str = " Advocates ";

const COLUMNS: [&str; 7] = [
    "First Name",
    "Last Name",
    "City",
    "Degree",
    "Specialties",
    "Years of Experience",
    "Phone Number",
];

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Search box
            Constraint::Length(1), // Pagination info
            Constraint::Min(5),    // Table
            Constraint::Length(3), // Pager
            Constraint::Length(1), // Key help
        ])
        .split(area);

    render_search(frame, app, chunks[0]);

    // Nothing to show yet, keep the whole body as a loading view
    if app.session.is_loading() && app.session.pagination().is_none() {
        render_message(frame, chunks[2], "Loading advocates...", ACCENT);
        render_help(frame, app, chunks[4]);
        return;
    }

    if let LoadState::Errored(message) = app.session.state() {
        render_error(frame, chunks[2], message);
        render_help(frame, app, chunks[4]);
        return;
    }

    render_pagination_info(frame, app, chunks[1]);
    render_table(frame, app, chunks[2]);
    render_pager(frame, app, chunks[3]);
    render_help(frame, app, chunks[4]);
}

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let is_editing = app.mode == Mode::Search;
    let border_style = if is_editing {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(SECONDARY)
    };

    let searching_for = if app.search_input.is_empty() {
        "all advocates".to_string()
    } else {
        app.search_input.clone()
    };
    let cursor = if is_editing { "|" } else { "" };

    let text = Text::from(vec![
        Line::from(vec![
            Span::raw("Searching for: "),
            Span::styled(searching_for, Style::default().fg(HIGHLIGHT)),
        ]),
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(SECONDARY)),
            Span::raw(format!("{}{}", app.search_input, cursor)),
        ]),
    ]);

    let block = Block::default()
        .title(TITLE)
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_pagination_info(frame: &mut Frame, app: &App, area: Rect) {
    let Some(pagination) = app.session.pagination() else {
        return;
    };
    let mut spans = vec![
        Span::raw(format!(
            " Showing {} to {} of {} advocates",
            pagination.first_row(),
            pagination.last_row(),
            pagination.total
        )),
        Span::styled(
            format!("   Per page: {}", pagination.limit),
            Style::default().fg(SECONDARY),
        ),
    ];
    if app.session.is_loading() {
        spans.push(Span::styled("   Loading...", Style::default().fg(ACCENT)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let advocates = app.session.visible_records();
    if advocates.is_empty() {
        let message = if app.search_input.is_empty() {
            "No advocates available."
        } else {
            "No advocates found matching your search."
        };
        render_message(frame, area, message, SECONDARY);
        return;
    }

    let header = Row::new(COLUMNS.iter().map(|title| Cell::from(*title)))
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = advocates.iter().map(|advocate| advocate_row(advocate)).collect();
    let widths = [
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(7),
        Constraint::Min(30),
        Constraint::Length(20),
        Constraint::Length(13),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(SECONDARY)),
    );
    frame.render_widget(table, area);
}

fn advocate_row(advocate: &AdvocateDetail) -> Row<'static> {
    Row::new(vec![
        Cell::from(advocate.first_name.clone()),
        Cell::from(advocate.last_name.clone()),
        Cell::from(advocate.city.clone()),
        Cell::from(advocate.degree.clone()),
        Cell::from(advocate.specialties.join(", ")),
        Cell::from(advocate.years_of_experience.to_string()),
        Cell::from(advocate.phone_number.to_string()),
    ])
}

fn render_pager(frame: &mut Frame, app: &App, area: Rect) {
    let Some(pagination) = app.session.pagination() else {
        return;
    };
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(SECONDARY);

    let mut spans = vec![Span::styled(
        "< Previous ",
        if pagination.has_prev { enabled } else { disabled },
    )];
    for page in 1..=pagination.total_pages {
        let style = if page == pagination.page {
            Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
        } else {
            enabled
        };
        let label = if page == pagination.page {
            format!("[{}]", page)
        } else {
            page.to_string()
        };
        spans.push(Span::styled(format!(" {} ", label), style));
    }
    spans.push(Span::styled(
        " Next >",
        if pagination.has_next { enabled } else { disabled },
    ));

    let pager = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(SECONDARY)),
        );
    frame.render_widget(pager, area);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let text = Text::from(vec![
        Line::from(Span::styled(
            format!("Error: {}", message),
            Style::default().fg(ERROR),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press r to try again",
            Style::default().fg(SECONDARY),
        )),
    ]);
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), area);
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let paragraph = Paragraph::new(Span::styled(message.to_string(), Style::default().fg(color)));
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help = match app.mode {
        Mode::Search => "type to search · Backspace delete · Enter/Esc done · Ctrl+R reset",
        Mode::Normal => {
            "/ search · x reset · ←/→ page · 1-9 jump · s page size · r reload · q quit"
        }
    };
    frame.render_widget(
        Paragraph::new(Span::styled(help, Style::default().fg(SECONDARY))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};
    use reqwest::StatusCode;

    use crate::{
        client::api::{AdvocatePage, ClientError},
        schema::common::PaginationInfo,
        tui::app::FetchOutcome,
    };

    use super::*;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn advocate(id: i32, first_name: &str) -> AdvocateDetail {
        AdvocateDetail {
            id,
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            city: "Chicago".to_string(),
            degree: "PhD".to_string(),
            specialties: vec!["Bipolar".to_string(), "LGBTQ".to_string()],
            years_of_experience: 9,
            phone_number: 5559876543,
            created_at: None,
        }
    }

    fn complete(app: &mut App, generation: u64, result: Result<AdvocatePage, ClientError>) {
        app.apply(FetchOutcome { generation, result });
    }

    #[test]
    fn test_render_loading() {
        let mut app = App::new(10);
        app.session.load();
        let screen = draw(&app);
        assert!(screen.contains("Loading advocates..."));
        assert!(screen.contains("Searching for: all advocates"));
    }

    #[test]
    fn test_render_table() {
        let mut app = App::new(10);
        let request = app.session.load();
        complete(
            &mut app,
            request.generation,
            Ok(AdvocatePage {
                data: vec![advocate(1, "Jane"), advocate(2, "John")],
                pagination: PaginationInfo::new(1, 10, 12),
            }),
        );
        let screen = draw(&app);
        assert!(screen.contains("Showing 1 to 10 of 12 advocates"));
        assert!(screen.contains("First Name"));
        assert!(screen.contains("Jane"));
        assert!(screen.contains("Bipolar, LGBTQ"));
        assert!(screen.contains("5559876543"));
        assert!(screen.contains("[1]"));
        assert!(screen.contains("Next >"));
    }

    #[test]
    fn test_render_empty_states() {
        let mut app = App::new(10);
        let request = app.session.load();
        complete(
            &mut app,
            request.generation,
            Ok(AdvocatePage {
                data: vec![],
                pagination: PaginationInfo::new(1, 10, 0),
            }),
        );
        assert!(draw(&app).contains("No advocates available."));

        app.search_input = "zzz".to_string();
        assert!(draw(&app).contains("No advocates found matching your search."));
    }

    #[test]
    fn test_render_error() {
        let mut app = App::new(10);
        let request = app.session.load();
        complete(
            &mut app,
            request.generation,
            Err(ClientError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: Some("Database not configured".to_string()),
            }),
        );
        let screen = draw(&app);
        assert!(screen.contains("Error: HTTP error! status: 500"));
        assert!(screen.contains("Press r to try again"));
    }
}
