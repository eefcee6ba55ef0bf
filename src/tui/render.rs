use std::borrow::Cow;

use super::state::{AppState, InputMode};
use crate::engine::{ScoreClass, StatusClass};
use crate::notify::ToastVariant;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn draw(f: &mut Frame, state: &AppState, spinner_frame: u8) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, state, chunks[0], spinner_frame);
    draw_filters(f, state, chunks[1]);
    draw_leads(f, state, chunks[2]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);
    draw_toasts(f, state, bottom[0]);
    draw_logs(f, state, bottom[1]);
    draw_footer(f, state, chunks[4]);
}

fn score_color(class: ScoreClass) -> Color {
    match class {
        ScoreClass::High => Color::Green,
        ScoreClass::Medium => Color::Yellow,
        ScoreClass::Low => Color::DarkGray,
    }
}

fn status_color(class: StatusClass) -> Color {
    match class {
        StatusClass::Success => Color::Green,
        StatusClass::Weak => Color::DarkGray,
    }
}

fn toast_color(variant: ToastVariant) -> Color {
    match variant {
        ToastVariant::Success => Color::Green,
        ToastVariant::Error => Color::Red,
    }
}

fn draw_header(f: &mut Frame, state: &AppState, area: Rect, spinner_frame: u8) {
    let dash = &state.dashboard;

    let activity = if dash.is_loading() {
        let ch = SPINNER_FRAMES[(spinner_frame as usize) % SPINNER_FRAMES.len()];
        Span::styled(format!(" {} Loading", ch), Style::default().fg(Color::Cyan))
    } else {
        Span::styled(" Ready", Style::default().fg(Color::DarkGray))
    };

    let qualified_color = if dash.has_qualified_leads() {
        Color::Green
    } else {
        Color::DarkGray
    };

    let mut spans = vec![
        Span::styled(
            format!(" {}", dash.results_label()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(dash.qualified_label(), Style::default().fg(qualified_color)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{} total", dash.leads().len())),
        Span::styled(" |", Style::default().fg(Color::DarkGray)),
        activity,
        Span::styled(format!(" | up {}", state.uptime()), Style::default().fg(Color::DarkGray)),
    ];
    if state.demo_mode {
        spans.push(Span::styled(
            "  DEMO",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ));
    }

    let block = Block::default().title(" Lead Desk ").borders(Borders::ALL);
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_filters(f: &mut Frame, state: &AppState, area: Rect) {
    let criteria = state.dashboard.criteria();

    let score_span = if state.input_mode == InputMode::EditScore {
        Span::styled(
            format!("{}_", state.score_buffer),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )
    } else if criteria.min_score == 0 {
        Span::styled("any", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(format!(">= {}", criteria.min_score), Style::default().fg(Color::Cyan))
    };

    let industry = state.current_industry();
    let industry_style = if industry.value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let (check, check_style) = if criteria.qualified_only {
        ("[x]", Style::default().fg(Color::Green))
    } else {
        ("[ ]", Style::default().fg(Color::DarkGray))
    };

    let line = Line::from(vec![
        Span::raw(" Min score: "),
        score_span,
        Span::styled("   Industry: ", Style::default()),
        Span::styled(industry.label.clone(), industry_style),
        Span::raw("   Qualified only: "),
        Span::styled(check, check_style),
    ]);

    let title = if criteria.is_active() {
        " Filters [active] "
    } else {
        " Filters "
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_leads(f: &mut Frame, state: &AppState, area: Rect) {
    let dash = &state.dashboard;
    let inner_width = area.width.saturating_sub(2) as usize;

    if !dash.has_leads() {
        let (headline, hint) = if dash.is_loading() && dash.leads().is_empty() {
            ("Loading leads...", "")
        } else if dash.leads().is_empty() {
            ("No leads found", "[r] refresh")
        } else {
            ("No leads match the current filters", "[x] reset filters")
        };
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                headline,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        ];
        let block = Block::default().title(" Leads ").borders(Borders::ALL);
        let para = Paragraph::new(lines).alignment(Alignment::Center).block(block);
        f.render_widget(para, area);
        return;
    }

    // score + industry + status + action + column gaps
    let fixed = 6 + 14 + 14 + 13 + 5;
    let flexible = inner_width.saturating_sub(fixed);
    let drop_email = flexible < 30;
    let (name_w, email_w) = if drop_email {
        (flexible.max(6), 0)
    } else {
        (flexible * 2 / 5, flexible - flexible * 2 / 5)
    };

    let mut headers = vec!["Name"];
    let mut constraints = vec![Constraint::Length(name_w as u16)];
    if !drop_email {
        headers.push("Email");
        constraints.push(Constraint::Length(email_w as u16));
    }
    headers.extend(["Score", "Industry", "Status", ""]);
    constraints.extend([
        Constraint::Length(6),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(13),
    ]);

    let header = Row::new(headers).style(Style::default().add_modifier(Modifier::BOLD));

    let visible_lines = area.height.saturating_sub(4) as usize; // borders + header row + padding
    let total = dash.filtered().len();
    let offset = state.selected.saturating_sub(visible_lines.saturating_sub(1));

    let rows: Vec<Row> = dash
        .filtered()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_lines)
        .map(|(i, lead)| {
            let mut cells = vec![Cell::from(
                truncate_with_ellipsis(lead.name(), name_w).into_owned(),
            )];
            if !drop_email {
                cells.push(Cell::from(
                    truncate_with_ellipsis(&lead.lead.email, email_w).into_owned(),
                ));
            }
            let action = if lead.assign_disabled {
                Cell::from("assigning...").style(Style::default().fg(Color::DarkGray))
            } else {
                Cell::from("Assign to Me").style(Style::default().fg(Color::Cyan))
            };
            cells.extend([
                Cell::from(lead.score().to_string())
                    .style(Style::default().fg(score_color(lead.score_class))),
                Cell::from(truncate_with_ellipsis(lead.industry(), 13).into_owned()),
                Cell::from(lead.status_label)
                    .style(Style::default().fg(status_color(lead.status_class))),
                action,
            ]);
            let row = Row::new(cells);
            if i == state.selected {
                row.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                row
            }
        })
        .collect();

    let title = format!(" Leads [{}/{}] ", (state.selected + 1).min(total), total);
    let table = Table::new(rows, constraints)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL));

    f.render_widget(table, area);
}

fn draw_toasts(f: &mut Frame, state: &AppState, area: Rect) {
    let max_width = area.width.saturating_sub(2) as usize;
    let visible_lines = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = state
        .toasts
        .iter()
        .take(visible_lines)
        .map(|t| {
            let color = toast_color(t.toast.variant);
            let prefix = format!(" {} {} ", t.time, t.toast.title);
            let msg_max = max_width.saturating_sub(prefix.chars().count());
            let msg = truncate_with_ellipsis(&t.toast.message, msg_max);
            Line::from(vec![
                Span::styled(prefix, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw(msg.into_owned()),
            ])
        })
        .collect();

    let block = Block::default().title(" Notifications ").borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_logs(f: &mut Frame, state: &AppState, area: Rect) {
    let max_width = area.width.saturating_sub(2) as usize;
    let visible_lines = area.height.saturating_sub(2) as usize;

    // newest at the top
    let lines: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(visible_lines)
        .map(|l| {
            let color = match l.level.as_str() {
                "ERROR" => Color::Red,
                "WARN" => Color::Yellow,
                "SUCCESS" => Color::Green,
                _ => Color::DarkGray,
            };
            let prefix = format!(" {} [{}] ", l.time, l.level);
            let msg_max = max_width.saturating_sub(prefix.chars().count());
            let msg = truncate_with_ellipsis(&l.message, msg_max);
            Line::from(vec![
                Span::styled(prefix, Style::default().fg(color)),
                Span::raw(msg.into_owned()),
            ])
        })
        .collect();

    let block = Block::default().title(" Activity ").borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_footer(f: &mut Frame, state: &AppState, area: Rect) {
    let line = if state.input_mode == InputMode::EditScore {
        Line::from(vec![
            Span::styled("  [0-9]", Style::default().fg(Color::Yellow)),
            Span::raw(" min score  "),
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::raw(" apply  "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" cancel  "),
        ])
    } else {
        Line::from(vec![
            Span::styled("  [q]", Style::default().fg(Color::Yellow)),
            Span::raw("uit  "),
            Span::styled("[j/k]", Style::default().fg(Color::Yellow)),
            Span::raw(" move  "),
            Span::styled("[a]", Style::default().fg(Color::Yellow)),
            Span::raw("ssign  "),
            Span::styled("[r]", Style::default().fg(Color::Yellow)),
            Span::raw("efresh  "),
            Span::styled("[s]", Style::default().fg(Color::Yellow)),
            Span::raw("core  "),
            Span::styled("[+/-]", Style::default().fg(Color::Yellow)),
            Span::raw(" step  "),
            Span::styled("[i]", Style::default().fg(Color::Yellow)),
            Span::raw("ndustry  "),
            Span::styled("[f]", Style::default().fg(Color::Yellow)),
            Span::raw(" qualified  "),
            Span::styled("[x]", Style::default().fg(Color::Yellow)),
            Span::raw(" reset  "),
            Span::styled("[c]", Style::default().fg(Color::Yellow)),
            Span::raw("lear  "),
        ])
    };
    f.render_widget(Paragraph::new(line), area);
}

fn truncate_with_ellipsis(s: &str, max_width: usize) -> Cow<'_, str> {
    let char_count = s.chars().count();
    if char_count <= max_width {
        Cow::Borrowed(s)
    } else if max_width <= 3 {
        Cow::Owned(".".repeat(max_width))
    } else {
        let end = s
            .char_indices()
            .nth(max_width - 3)
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        Cow::Owned(format!("{}...", &s[..end]))
    }
}
