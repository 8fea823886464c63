use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, LineGauge, Paragraph},
    Frame,
};
use std::time::Duration;
use steakr::{
    cooking::mm_to_inch,
    timer::{SessionTimer, TimerState},
    util::{format_clock, percent},
};
use time_humanize::HumanTime;

use super::{legend, spread, HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::App;

const CARD_HEIGHT: u16 = 6;
const WARN_SECS: u32 = 10;

pub fn render_cooking(app: &mut App, f: &mut Frame) {
    let Some(session) = app.session.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(2), // legend
        ])
        .split(f.area());

    let subtitle = if session.is_synchronized() {
        "Timers are synchronized. Starting one will start all."
    } else {
        "Cooking each steak independently."
    };
    let eta = if session.all_finished() {
        "Everything is ready!".to_string()
    } else {
        let left = session.seconds_left();
        format!(
            "Last steak ready {} ({})",
            HumanTime::from(Duration::from_secs(u64::from(left))),
            format_clock(left)
        )
    };
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Cooking in Progress",
            Style::default().add_modifier(Modifier::BOLD).fg(Color::Red),
        )),
        Line::from(Span::styled(
            subtitle,
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(Span::styled(eta, Style::default().fg(Color::Cyan))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    let cards = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            session
                .timers()
                .iter()
                .map(|_| Constraint::Length(CARD_HEIGHT))
                .collect::<Vec<_>>(),
        )
        .split(chunks[1]);

    for (idx, (timer, area)) in session.timers().iter().zip(cards.iter()).enumerate() {
        render_card(
            f,
            *area,
            timer,
            idx,
            idx == app.selected,
            app.config.show_inches,
        );
    }

    f.render_widget(
        legend("↑/↓ or 1-9 select | (space) start/pause | (s)kip delay/step | (f)inish cooking | (esc)ape"),
        chunks[2],
    );
}

fn card_title(timer: &SessionTimer, idx: usize, show_inches: bool) -> String {
    let steak = timer.steak();
    let marker = match (timer.state(), timer.is_running()) {
        (TimerState::Finished, _) => "✓",
        (_, true) => "▶",
        (_, false) => "⏸",
    };
    let inches = if show_inches {
        format!(" ({}\")", mm_to_inch(steak.thickness_mm))
    } else {
        String::new()
    };
    format!(
        " {marker} Steak #{} · {} · {}mm{inches} · total {} ",
        idx + 1,
        steak.doneness,
        steak.thickness_mm,
        format_clock(steak.total_duration())
    )
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    timer: &SessionTimer,
    idx: usize,
    selected: bool,
    show_inches: bool,
) {
    let state = timer.state();
    let waiting = timer.is_waiting();

    let border_style = match (selected, state) {
        (_, TimerState::Finished) => Style::default().fg(Color::Green),
        (true, _) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        (false, _) if waiting => Style::default().fg(Color::Yellow).add_modifier(Modifier::DIM),
        _ => Style::default(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(card_title(timer, idx, show_inches));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status + clock
            Constraint::Length(1), // step gauge
            Constraint::Length(1), // description
            Constraint::Length(1), // total progress
        ])
        .split(inner);

    let (status, status_style) = if state == TimerState::Finished {
        ("Ready!", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else if waiting {
        ("Delayed Start", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else {
        (
            timer.current_step().name,
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )
    };
    let clock = if state == TimerState::Finished {
        String::new()
    } else {
        format_clock(timer.clock_secs())
    };
    let clock_style = if waiting {
        Style::default().fg(Color::Yellow)
    } else if timer.clock_secs() < WARN_SECS && state != TimerState::Finished {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let (left, right) = spread(status, &clock, inner.width);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(left, status_style),
            Span::styled(right, clock_style),
        ])),
        rows[0],
    );

    if state != TimerState::Finished {
        let (ratio, color) = if waiting {
            (timer.delay_progress(), Color::Yellow)
        } else {
            (timer.step_progress(), Color::Magenta)
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .percent(percent(ratio));
        f.render_widget(gauge, rows[1]);

        let description = if waiting {
            "Wait for the timer to finish before starting this steak to synchronize with others."
        } else {
            timer.current_step().description
        };
        f.render_widget(
            Paragraph::new(Span::styled(
                description,
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )),
            rows[2],
        );
    } else {
        f.render_widget(
            Paragraph::new(Span::styled(
                "Rested and ready to serve.",
                Style::default().fg(Color::Green),
            )),
            rows[1],
        );
    }

    let total_color = if state == TimerState::Finished {
        Color::Green
    } else {
        Color::Cyan
    };
    let total = LineGauge::default()
        .filled_style(Style::default().fg(total_color))
        .label(format!("total {:>3}%", percent(timer.total_progress())))
        .ratio(timer.total_progress().clamp(0.0, 1.0));
    f.render_widget(total, rows[3]);
}
