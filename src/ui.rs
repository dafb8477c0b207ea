use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{app::App, catalog, session::Mode};

const SIDEBAR_WIDTH: u16 = 28;
const VERTICAL_MARGIN: u16 = 1;

/// Green when full, fading through orange to red as time runs out
fn timer_color(ratio: f64) -> Color {
    let ratio = ratio.clamp(0.0, 1.0);
    Color::Rgb((255.0 - ratio * 105.0) as u8, (ratio * 204.0) as u8, 0)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.session.snapshot();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let key_style = Style::default()
            .patch(bold_style)
            .fg(Color::Black)
            .bg(Color::Gray);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);

        // Deck sidebar
        let mut deck_lines = vec![Line::from(Span::styled("Decks", bold_style)), Line::raw("")];
        for (idx, (deck, on)) in snap.enabled.iter().enumerate() {
            let check = if on { "[x]" } else { "[ ]" };
            let style = if on { Style::default() } else { dim_style };
            deck_lines.push(Line::from(vec![
                Span::styled(format!("F{} ", idx + 1), dim_style),
                Span::styled(format!("{check} "), style),
                Span::styled(format!("{} ", deck.emoji()), dim_style),
                Span::styled(deck.label(), style),
            ]));
        }
        Paragraph::new(deck_lines)
            .block(Block::default().borders(Borders::RIGHT))
            .render(columns[0], buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .vertical_margin(VERTICAL_MARGIN)
            .horizontal_margin(2)
            .constraints([
                Constraint::Length(1), // streak / mode
                Constraint::Min(1),    // spacer
                Constraint::Length(1), // target
                Constraint::Length(1), // spacer
                Constraint::Length(1), // sequence
                Constraint::Length(1), // spacer
                Constraint::Length(1), // timer
                Constraint::Length(3), // input
                Constraint::Min(1),    // spacer
                Constraint::Length(1), // help
            ])
            .split(columns[1]);

        let status = match snap.mode {
            Mode::Challenge => format!("Streak: {}", snap.success_streak),
            Mode::Practice => format!("Practice · {} matched", snap.matches_total),
        };
        Paragraph::new(Span::styled(status, bold_style))
            .alignment(Alignment::Center)
            .render(rows[0], buf);

        let target = snap.target.character;
        let padded = format!("  {target}  ");
        let target_area = centered(rows[2], padded.width() as u16);
        Paragraph::new(Span::styled(
            padded,
            Style::default()
                .patch(bold_style)
                .fg(Color::Black)
                .bg(Color::White),
        ))
        .render(target_area, buf);

        let mut sequence = Vec::new();
        for (i, key) in catalog::display_sequence(snap.target).into_iter().enumerate() {
            if i > 0 {
                sequence.push(Span::raw(" + "));
            }
            sequence.push(Span::styled(format!(" {key} "), key_style));
        }
        Paragraph::new(Line::from(sequence))
            .alignment(Alignment::Center)
            .render(rows[4], buf);

        match snap.mode {
            Mode::Challenge => {
                let ratio = if snap.duration_ms == 0 {
                    0.0
                } else {
                    snap.time_remaining_ms as f64 / snap.duration_ms as f64
                };
                Gauge::default()
                    .gauge_style(Style::default().fg(timer_color(ratio)))
                    .ratio(ratio.clamp(0.0, 1.0))
                    .label(format!("{:.1}s", snap.time_remaining_ms as f64 / 1000.0))
                    .render(rows[6], buf);
            }
            Mode::Practice => {
                Paragraph::new(Span::styled("no timer", dim_style.patch(italic_style)))
                    .alignment(Alignment::Center)
                    .render(rows[6], buf);
            }
        }

        let input = if snap.user_input.is_empty() {
            Span::styled("Type here...", dim_style.patch(italic_style))
        } else {
            Span::raw(snap.user_input.clone())
        };
        Paragraph::new(input)
            .block(Block::default().borders(Borders::ALL))
            .render(rows[7], buf);

        Paragraph::new(Span::styled(
            "(F1-F7) decks  (tab) practice/challenge  (esc) quit",
            italic_style,
        ))
        .alignment(Alignment::Center)
        .render(rows[9], buf);
    }
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
