use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, LineGauge, Paragraph},
    Frame,
};
use studypunch::{
    category::Category,
    form::{AddTaskForm, MAX_DURATION, MIN_DURATION},
};

use crate::App;

const POPUP_WIDTH: u16 = 60;
const POPUP_HEIGHT: u16 = 13;

/// Rect of at most `width` x `height` centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn category_line(form: &AddTaskForm) -> Line<'static> {
    let mut spans = vec![Span::raw("Category  ")];
    for cat in Category::ALL {
        let style = if cat == form.category {
            Style::default()
                .fg(Color::Black)
                .bg(cat.color())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", cat.label()), style));
    }
    Line::from(spans)
}

pub fn render_add_task(app: &App, f: &mut Frame) {
    let form = &app.form;
    let area = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, f.area());

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Add Study Task")
        .style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(1)
        .constraints([
            Constraint::Length(1), // name
            Constraint::Length(1),
            Constraint::Length(1), // categories
            Constraint::Length(1),
            Constraint::Length(1), // duration label
            Constraint::Length(1), // duration slider
            Constraint::Length(1),
            Constraint::Length(1), // points preview
            Constraint::Length(1), // validation error
            Constraint::Min(1),    // keys
        ])
        .split(inner);

    let name = Paragraph::new(Line::from(vec![
        Span::raw("Name      "),
        Span::styled(
            form.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]));
    f.render_widget(name, rows[0]);

    f.render_widget(Paragraph::new(category_line(form)), rows[2]);

    f.render_widget(
        Paragraph::new(format!("Duration  {} min", form.duration)),
        rows[4],
    );

    let ratio = form.duration.saturating_sub(MIN_DURATION) as f64
        / (MAX_DURATION - MIN_DURATION) as f64;
    let slider = LineGauge::default()
        .filled_style(Style::default().fg(Color::Cyan))
        .unfilled_style(Style::default().fg(Color::DarkGray))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{MIN_DURATION}-{MAX_DURATION}"));
    f.render_widget(slider, rows[5]);

    let preview = Paragraph::new(Line::from(vec![
        Span::raw("Completing earns "),
        Span::styled(
            form.preview_points().to_string(),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" points"),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(preview, rows[7]);

    if let Some(err) = &app.form_error {
        f.render_widget(
            Paragraph::new(Span::styled(
                err.to_string(),
                Style::default().fg(Color::Red),
            ))
            .alignment(Alignment::Center),
            rows[8],
        );
    }

    let keys = Paragraph::new(Span::styled(
        "(tab) category (←/→) duration (enter) add (esc) cancel",
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    f.render_widget(keys, rows[9]);
}
