pub mod add_task;
pub mod panels;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};
use studypunch::util::truncate_to_width;
use unicode_width::UnicodeWidthStr;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 1;
const VERTICAL_MARGIN: u16 = 0;

// check box, category tag, duration and points columns around the task name
const TASK_ROW_FIXED_WIDTH: u16 = 38;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(5), // profile, streak and points cards
                Constraint::Min(8),    // tasks and side panels
                Constraint::Length(1), // legend
            ])
            .split(area);

        render_title(rows[0], buf);
        render_header(self, rows[1], buf);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
            .split(rows[2]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // progress
                Constraint::Min(4),    // task list
                Constraint::Length(9), // study records
            ])
            .split(body[0]);

        render_progress(self, left[0], buf);
        render_tasks(self, left[1], buf);
        panels::render_records(left[2], buf);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // punch
                Constraint::Min(7),    // categories
                Constraint::Length(3), // motto
            ])
            .split(body[1]);

        panels::render_punch(&self.tracker, right[0], buf);
        panels::render_categories(&self.tracker, right[1], buf);
        panels::render_motto(right[2], buf);

        render_legend(rows[3], buf);
    }
}

fn render_title(area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from(vec![
        Span::styled(
            "Study ",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Check-in",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  a little progress every day",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        ),
    ]))
    .alignment(Alignment::Center)
    .render(area, buf);
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let tracker = &app.tracker;
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let profile = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                format!(" Lv.{} ", tracker.level()),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} day streak", tracker.streak()),
                Style::default().fg(Color::LightRed).patch(bold_style),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("now ", Style::default().fg(Color::Gray)),
            Span::styled(app.clock_label(), bold_style),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Study Master"),
    );
    profile.render(cards[0], buf);

    let streak = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} days", tracker.streak()),
            Style::default().fg(Color::LightRed).patch(bold_style),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "keep it going!",
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title("Streak"));
    streak.render(cards[1], buf);

    let points = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} pts", tracker.total_points()),
            Style::default().fg(Color::LightMagenta).patch(bold_style),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} to next level", tracker.points_to_next_level()),
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title("Points"));
    points.render(cards[2], buf);
}

fn render_progress(app: &App, area: Rect, buf: &mut Buffer) {
    let tracker = &app.tracker;
    let percent = tracker.progress_percent();

    let block = Block::default().borders(Borders::ALL).title(format!(
        "Today's Tasks  {}/{} done  {} min studied",
        tracker.completed_count(),
        tracker.tasks().len(),
        tracker.today_duration()
    ));
    let inner = block.inner(area);
    block.render(area, buf);

    let lines = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .percent(percent.round().clamp(0.0, 100.0) as u16)
        .label("")
        .render(lines[0], buf);

    Paragraph::new(Line::from(vec![
        Span::raw(format!("progress {}%", percent.round())),
        Span::raw("   "),
        Span::styled(
            format!("{} points available today", tracker.available_points()),
            Style::default().fg(Color::Gray),
        ),
    ]))
    .render(lines[1], buf);
}

/// Truncate `name` and pad it with spaces to exactly `width` terminal cells
fn pad_to_width(name: &str, width: usize) -> String {
    let mut cell = truncate_to_width(name, width);
    let used = UnicodeWidthStr::width(cell.as_str());
    cell.push_str(&" ".repeat(width.saturating_sub(used)));
    cell
}

fn render_tasks(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default().borders(Borders::ALL).title("Task List");
    let tasks = app.tracker.tasks();

    if tasks.is_empty() {
        Paragraph::new(vec![
            Line::from(""),
            Line::from("No tasks yet, press (a) to add one"),
        ])
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(block)
        .render(area, buf);
        return;
    }

    let name_width = area.width.saturating_sub(TASK_ROW_FIXED_WIDTH) as usize;
    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let (check, name_style, points_style) = if task.completed {
                (
                    Span::styled("[✓] ", Style::default().fg(Color::Green)),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                    Style::default().fg(Color::Green),
                )
            } else {
                (
                    Span::raw("[ ] "),
                    Style::default().add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::LightYellow),
                )
            };

            ListItem::new(Line::from(vec![
                check,
                Span::styled(pad_to_width(&task.name, name_width), name_style),
                Span::styled(
                    format!(" {} {:<9}", task.category.glyph(), task.category.label()),
                    Style::default().fg(task.category.color()),
                ),
                Span::styled(
                    format!("{:>4} min ", task.duration),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(format!("+{} pts", task.points), points_style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    StatefulWidget::render(list, area, buf, &mut state);
}

fn render_legend(area: Rect, buf: &mut Buffer) {
    let legend = [
        "(↑/↓) select",
        "(space) toggle",
        "(a)dd",
        "(d)elete",
        "(p)unch",
        "(q)uit",
    ]
    .iter()
    .join(" / ");

    Paragraph::new(Span::styled(
        legend,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(area, buf);
}
