use itertools::Itertools;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, LineGauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use steakr::{
    cooking::{mm_to_inch, Doneness, MAX_THICKNESS_MM, MIN_THICKNESS_MM},
    sync::total_duration,
    util::format_clock,
};

use super::{centered_rect, legend, HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::App;

fn thickness_label(mm: u32, show_inches: bool) -> String {
    if show_inches {
        format!("{mm} mm ({}\")", mm_to_inch(mm))
    } else {
        format!("{mm} mm")
    }
}

pub fn render_setup(app: &mut App, f: &mut Frame) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let setup = &app.setup;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(3), // thickness slider
            Constraint::Length(3), // doneness chips
            Constraint::Min(3),    // order list
            Constraint::Length(2), // legend
        ])
        .split(f.area());

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Steak Timer",
            Style::default().patch(bold_style).fg(Color::Red),
        )),
        Line::from(Span::styled(
            "Configure your feast",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let span = f64::from(MAX_THICKNESS_MM - MIN_THICKNESS_MM);
    let slider = LineGauge::default()
        .block(Block::default().borders(Borders::ALL).title("Thickness"))
        .filled_style(Style::default().fg(Color::Magenta))
        .label(Span::styled(
            thickness_label(setup.thickness_mm, app.config.show_inches),
            bold_style,
        ))
        .ratio(f64::from(setup.thickness_mm - MIN_THICKNESS_MM) / span);
    f.render_widget(slider, chunks[1]);

    let chips = Doneness::ALL
        .iter()
        .map(|d| {
            let label = format!(" {d} ");
            if *d == setup.doneness {
                Span::styled(
                    label,
                    Style::default()
                        .patch(bold_style)
                        .fg(Color::Black)
                        .bg(Color::Red),
                )
            } else {
                Span::styled(label, Style::default().fg(Color::Gray))
            }
        })
        .interleave_shortest(std::iter::repeat(Span::raw(" ")))
        .collect::<Vec<Span>>();
    let doneness = Paragraph::new(Line::from(chips))
        .block(Block::default().borders(Borders::ALL).title("Doneness"))
        .alignment(Alignment::Center);
    f.render_widget(doneness, chunks[2]);

    let items: Vec<ListItem> = setup
        .steaks()
        .iter()
        .enumerate()
        .map(|(idx, steak)| {
            let steps = steak
                .steps
                .iter()
                .map(|s| format_clock(s.duration))
                .join(" + ");
            ListItem::new(Line::from(vec![
                Span::styled(format!("Steak #{} - {}", idx + 1, steak.doneness), bold_style),
                Span::raw(format!(
                    "  {}  {}  = {}",
                    thickness_label(steak.thickness_mm, app.config.show_inches),
                    steps,
                    format_clock(total_duration(&steak.steps))
                )),
            ]))
        })
        .collect();

    let order_title = format!("Current Order ({})", setup.steaks().len());
    if items.is_empty() {
        let empty = Paragraph::new("No steaks yet. Press (a) to add one with the settings above.")
            .block(Block::default().borders(Borders::ALL).title(order_title))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(empty, chunks[3]);
    } else {
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(order_title))
            .highlight_style(Style::default().bg(Color::DarkGray));
        let mut state = ListState::default().with_selected(setup.selected());
        f.render_stateful_widget(list, chunks[3], &mut state);
    }

    f.render_widget(
        legend("←/→ thickness (pgup/pgdn ±5) | ↑/↓ doneness | (a)dd | tab select | (d)elete | (s)tart cooking | (esc)ape"),
        chunks[4],
    );
}

pub fn render_sync_prompt(f: &mut Frame) {
    let area = centered_rect(64, 9, f.area());
    let text = vec![
        Line::from("Start delays can make every steak finish at the exact same time."),
        Line::from(""),
        Line::from(vec![
            Span::styled("(y) Yes, Synchronize: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("some timers will wait to start."),
        ]),
        Line::from(vec![
            Span::styled("(n) No, Cook Now: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("all timers start when you start them."),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "(esc) back to the order",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];

    let prompt = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Synchronize Cooking Times?")
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(prompt, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thickness_label() {
        assert_eq!(thickness_label(25, true), "25 mm (1.0\")");
        assert_eq!(thickness_label(50, false), "50 mm");
    }
}
