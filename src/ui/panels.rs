use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, LineGauge, Paragraph, Row, Table, Widget, Wrap},
};
use studypunch::{
    category::Category,
    records::{sample_records, StudyRecord},
    tracker::{TrackerState, PUNCH_BONUS},
};

pub fn render_punch(tracker: &TrackerState, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let lines = if tracker.today_punched() {
        vec![
            Line::from(Span::styled(
                "✓ Checked in today",
                Style::default().fg(Color::Green).patch(bold_style),
            )),
            Line::from(Span::styled(
                format!("+{PUNCH_BONUS} points credited"),
                Style::default().fg(Color::Gray),
            )),
        ]
    } else {
        vec![
            Line::from(Span::styled(
                "Press (p) to check in",
                Style::default().fg(Color::LightCyan).patch(bold_style),
            )),
            Line::from(Span::styled(
                format!("earn {PUNCH_BONUS} points"),
                Style::default().fg(Color::Gray),
            )),
        ]
    };

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Daily Check-in"))
        .render(area, buf);
}

/// One gauge row per category with completed/total counts
pub fn render_categories(tracker: &TrackerState, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("By Category");
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            Category::ALL
                .iter()
                .map(|_| Constraint::Length(1))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(inner);

    for (cat, row) in Category::ALL.iter().zip(rows.iter()) {
        let stats = tracker.category_stats(*cat);
        LineGauge::default()
            .filled_style(Style::default().fg(cat.color()))
            .unfilled_style(Style::default().fg(Color::DarkGray))
            .ratio(stats.percent / 100.0)
            .label(format!(
                "{} {:<9}{:>2}/{:<2}",
                cat.glyph(),
                cat.label(),
                stats.completed,
                stats.total
            ))
            .render(*row, buf);
    }
}

fn record_row(record: &StudyRecord) -> Row<'static> {
    Row::new(vec![
        Cell::from(record.date),
        Cell::from(record.duration_label()).style(Style::default().fg(Color::LightBlue)),
        Cell::from(format!("{} tasks", record.tasks))
            .style(Style::default().fg(Color::LightMagenta)),
        Cell::from(format!("+{}", record.points)).style(
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

pub fn render_records(area: Rect, buf: &mut Buffer) {
    let header = Row::new(vec!["Date", "Studied", "Completed", "Points"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = sample_records().iter().map(record_row).collect();

    Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Study Log"))
    .render(area, buf);
}

pub fn render_motto(area: Rect, buf: &mut Buffer) {
    Paragraph::new(Span::styled(
        "\"Persistence wins. Keep going today!\"",
        Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL))
    .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(buffer: &Buffer) -> String {
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_punch_panel_states() {
        let mut tracker = TrackerState::seeded();
        let area = Rect::new(0, 0, 40, 5);

        let mut buffer = Buffer::empty(area);
        render_punch(&tracker, area, &mut buffer);
        assert!(rendered(&buffer).contains("earn 50 points"));

        tracker.punch();
        let mut buffer = Buffer::empty(area);
        render_punch(&tracker, area, &mut buffer);
        assert!(rendered(&buffer).contains("+50 points credited"));
    }

    #[test]
    fn test_category_panel_counts() {
        let tracker = TrackerState::seeded();
        let area = Rect::new(0, 0, 40, 8);
        let mut buffer = Buffer::empty(area);

        render_categories(&tracker, area, &mut buffer);

        let text = rendered(&buffer);
        assert!(text.contains("Coding"));
        assert!(text.contains(" 1/2"));
        assert!(text.contains(" 0/0"));
    }

    #[test]
    fn test_records_table() {
        let area = Rect::new(0, 0, 45, 9);
        let mut buffer = Buffer::empty(area);

        render_records(area, &mut buffer);

        let text = rendered(&buffer);
        assert!(text.contains("Dec 13"));
        assert!(text.contains("3h 0m"));
        assert!(text.contains("+150"));
    }

    #[test]
    fn test_record_row_cells() {
        // a row never borrows from the record
        let record = sample_records()[1];
        let _row: Row<'static> = record_row(&record);
    }

    #[test]
    fn test_panels_tolerate_tiny_areas() {
        let tracker = TrackerState::seeded();
        let area = Rect::new(0, 0, 3, 2);
        let mut buffer = Buffer::empty(area);

        render_punch(&tracker, area, &mut buffer);
        render_categories(&tracker, area, &mut buffer);
        render_records(area, &mut buffer);
        render_motto(area, &mut buffer);
    }
}
