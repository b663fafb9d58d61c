use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::tui::app::App;

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    // Header and Main Content Split
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    // Header
    let header = Paragraph::new("MATRIZ PER-DIEM")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(header, main_chunks[0]);

    // Split Content into Left (List) and Right (Detail)
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_chunks[1]);

    draw_request_list(f, app, content_chunks[0]);
    draw_detail_view(f, app, content_chunks[1]);

    // Footer
    let footer = Paragraph::new("j/k: Navigate | d: Delete | r: Reload | q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[2]);
}

fn draw_request_list(f: &mut Frame, app: &mut App, area: Rect) {
    let rows: Vec<Row> = app
        .requests
        .iter()
        .map(|request| {
            let id_short = request.id.to_string()[..8].to_string();
            let nights = request.overnights.to_string();

            Row::new(vec![
                Span::raw(id_short),
                Span::raw(request.collaborator.clone()),
                Span::raw(request.destination.clone()),
                Span::raw(nights),
                Span::styled(
                    request.total_value.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(9),  // ID
            Constraint::Length(14), // Collaborator
            Constraint::Min(10),    // Destination
            Constraint::Length(3),  // Nights
            Constraint::Length(9),  // Total
        ],
    )
    .header(
        Row::new(vec!["ID", "Collaborator", "Destination", "N", "Total"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(
        Block::default()
            .title(" Requests ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_detail_view(f: &mut Frame, app: &App, area: Rect) {
    if let Some(request) = app.selected_request() {
        let mut detail_text = vec![
            Line::from(vec![
                Span::styled("Requester: ", Style::default().fg(Color::Blue)),
                Span::styled(
                    request.requester.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("ID: ", Style::default().fg(Color::DarkGray)),
                Span::raw(request.id.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Collaborator: ", Style::default().fg(Color::Blue)),
                Span::raw(request.collaborator.clone()),
            ]),
            Line::from(vec![
                Span::styled("Period: ", Style::default().fg(Color::Blue)),
                Span::raw(request.period.clone()),
            ]),
            Line::from(vec![
                Span::styled("Destination: ", Style::default().fg(Color::Blue)),
                Span::raw(request.destination.clone()),
            ]),
            Line::from(vec![
                Span::styled("Cost center: ", Style::default().fg(Color::Blue)),
                Span::raw(request.cost_center.as_deref().unwrap_or("None").to_string()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Meals: ", Style::default().fg(Color::Blue)),
                Span::raw(format!(
                    "B{} L{} D{}  ({})",
                    request.breakfasts, request.lunches, request.dinners, request.meals_value
                )),
            ]),
            Line::from(vec![
                Span::styled("Overnights: ", Style::default().fg(Color::Blue)),
                Span::raw(format!("{}  ({})", request.overnights, request.overnight_value)),
            ]),
            Line::from(vec![
                Span::styled("Total: ", Style::default().fg(Color::Blue)),
                Span::styled(
                    request.total_value.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        if let Some(note) = &request.note {
            detail_text.push(Line::from(Span::styled(
                "Note:",
                Style::default().fg(Color::Blue),
            )));
            detail_text.push(Line::from(note.as_str()));
        }

        let detail_block = Paragraph::new(detail_text)
            .block(
                Block::default()
                    .title(" Detail ")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(detail_block, area);
    } else {
        let detail_block = Block::default()
            .title(" Detail ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);
        f.render_widget(detail_block, area);
    }
}
