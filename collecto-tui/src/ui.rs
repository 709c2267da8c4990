use collecto_core::{Locale, StreamSummary, WasteType, all_tips};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};

use crate::app::{App, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new("collecto – waste collection days and sorting tips")
        .block(Block::default().borders(Borders::ALL).title("Collecto"));
    frame.render_widget(header, *header_area);

    match app.screen {
        Screen::CommuneSelect => draw_commune_select(frame, app, *content_area),
        Screen::LocationInput => draw_location_input(frame, app, *content_area),
        Screen::ScheduleView => draw_schedule_view(frame, app, *content_area),
        Screen::Tips => draw_tips(frame, app, *content_area),
    }

    let nav_hint = match app.screen {
        Screen::CommuneSelect => {
            "Type to filter · ↑/↓ move · Enter open · Tab location · Esc clear/quit · Ctrl-C quit"
        }
        Screen::LocationInput => {
            "Type \"lat lon\" and Enter · empty Enter uses your position · Tab tips · Esc back"
        }
        Screen::ScheduleView => "Esc/←/b back · Tab communes · q/Ctrl-C quit",
        Screen::Tips => "←/→ browse tips · Tab communes · Esc back · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_commune_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // filter
            Constraint::Min(0),    // communes
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [filter_area, list_area] = chunks else {
        return;
    };

    let filter = Paragraph::new(app.commune_filter.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Filter communes"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(filter, *filter_area);

    let communes = app.filtered_communes();
    let items = if communes.is_empty() {
        vec![ListItem::new("No commune matches the filter.")]
    } else {
        communes
            .iter()
            .map(|commune| ListItem::new(*commune))
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Communes ({})", communes.len())),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !communes.is_empty() {
        state.select(Some(app.commune_list_index));
    }
    frame.render_stateful_widget(list, *list_area, &mut state);
}

fn draw_location_input(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [input_area, help_area] = chunks else {
        return;
    };

    let input = Paragraph::new(app.coordinate_input.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Coordinates (latitude longitude, Enter)"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(input, *input_area);

    let help = Paragraph::new(
        "Enter a position such as \"44.8378 -0.5792\" to find the nearest collection zone.\n\
         Leave the field empty and press Enter to use the configured device position.",
    )
    .block(Block::default().borders(Borders::ALL).title("Nearest commune"))
    .wrap(Wrap { trim: true });
    frame.render_widget(help, *help_area);
}

fn draw_schedule_view(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(schedule) = app.schedule.as_ref() else {
        let paragraph = Paragraph::new("No schedule loaded.")
            .block(Block::default().borders(Borders::ALL).title("Schedule"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let title = match &app.origin {
        Some(origin) => format!("Collection days for {} ({origin})", schedule.info.commune),
        None => format!("Collection days for {}", schedule.info.commune),
    };

    let locale = app.service.locale();
    let rows = [
        stream_row(WasteType::HouseholdRefuse, &schedule.household, locale, Color::Gray),
        stream_row(WasteType::Recyclables, &schedule.recyclables, locale, Color::Yellow),
    ];

    let column_widths = [
        Constraint::Length(18),
        Constraint::Min(24),
        Constraint::Length(8),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["Stream", "Days", "Passage", "Next"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);

    frame.render_widget(table, area);
}

fn stream_row(
    waste_type: WasteType,
    stream: &StreamSummary,
    locale: Locale,
    color: Color,
) -> Row<'static> {
    let passage = stream
        .passage
        .map(|passage| locale.passage_name(passage))
        .unwrap_or_default();

    let mut style = Style::default().fg(color);
    let next = match stream.next {
        Some(next) => {
            if next.in_days() == 0 {
                style = style.add_modifier(Modifier::BOLD);
            }
            next.relative_label(locale)
        }
        None => "–".to_owned(),
    };

    Row::new(vec![
        Cell::from(locale.stream_name(waste_type)),
        Cell::from(stream.days.clone()),
        Cell::from(passage),
        Cell::from(next),
    ])
    .style(style)
}

fn draw_tips(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(tip) = app.current_tip() else {
        return;
    };

    let text = vec![
        Line::from(Span::styled(
            tip.title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            tip.bin.to_string(),
            Style::default().fg(Color::Green),
        )),
        Line::from(""),
        Line::from(tip.text),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Tip {}/{}",
            app.tip_index + 1,
            all_tips().len()
        )))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
