use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use klack::diff::CharState;
use klack::session::SessionState;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let controller = &self.controller;

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let underlined_dim_bold_style = Style::default()
            .patch(dim_bold_style)
            .add_modifier(Modifier::UNDERLINED);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);
        let magenta_style = Style::default().fg(Color::Magenta);

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let passage_width = controller.passage().text().width();
        let passage_lines = ((passage_width as f64 / max_chars_per_line as f64).ceil() as u16).max(1);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints(
                [
                    Constraint::Min(1),
                    Constraint::Length(passage_lines),
                    Constraint::Length(2),
                    Constraint::Length(2),
                    Constraint::Length(2 + self.history_display as u16),
                    Constraint::Length(1),
                ]
                .as_ref(),
            )
            .split(area);

        // target passage with per-position state styling; mistyped
        // positions echo what the user actually typed, spaces as a dot
        let target: Vec<char> = controller.passage().chars();
        let typed: Vec<char> = controller.typed().chars().collect();
        let spans = controller
            .char_states()
            .iter()
            .enumerate()
            .map(|(idx, state)| match state {
                CharState::Correct => Span::styled(target[idx].to_string(), green_bold_style),
                CharState::Incorrect => Span::styled(
                    match typed.get(idx) {
                        Some(' ') => "·".to_owned(),
                        Some(c) => c.to_string(),
                        None => target[idx].to_string(),
                    },
                    red_bold_style,
                ),
                CharState::Current => {
                    Span::styled(target[idx].to_string(), underlined_dim_bold_style)
                }
                CharState::Untyped => Span::styled(target[idx].to_string(), dim_bold_style),
            })
            .collect::<Vec<Span>>();

        let passage_widget = Paragraph::new(Line::from(spans))
            .alignment(if passage_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: false });
        passage_widget.render(chunks[1], buf);

        // live status: elapsed display clock and current error count
        let status = Paragraph::new(Span::styled(
            format!(
                "{}s   errors: {}",
                controller.elapsed_display_seconds(),
                controller.error_count()
            ),
            bold_style,
        ))
        .alignment(Alignment::Center);
        status.render(chunks[2], buf);

        // completion panel or key hint
        let message = match controller.state() {
            SessionState::Completed => {
                let mut lines = Vec::new();
                if let Some(result) = controller.result() {
                    lines.push(Line::from(Span::styled(
                        format!("{} wpm   {}% acc", result.wpm, result.accuracy),
                        magenta_style.patch(bold_style),
                    )));
                }
                if let Some(feedback) = controller.feedback() {
                    lines.push(Line::from(Span::styled(
                        feedback.to_string(),
                        italic_style,
                    )));
                }
                Paragraph::new(lines).alignment(Alignment::Center)
            }
            _ => Paragraph::new(Span::styled(
                "start typing to begin",
                dim_bold_style.patch(italic_style),
            ))
            .alignment(Alignment::Center),
        };
        message.render(chunks[3], buf);

        // rolling history, most recent first, bounded for display only
        let mut history_lines = vec![Line::from(Span::styled("recent scores", bold_style))];
        let recent = controller.history().recent(self.history_display);
        if recent.is_empty() {
            history_lines.push(Line::from(Span::styled("No scores yet.", dim_bold_style)));
        } else {
            let total = recent.len();
            for (i, result) in recent.iter().enumerate() {
                history_lines.push(Line::from(Span::raw(format!(
                    "Run {}: {} WPM | {}% Accuracy",
                    total - i,
                    result.wpm,
                    result.accuracy
                ))));
            }
        }
        Paragraph::new(history_lines)
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        let footer = Paragraph::new(Span::styled(
            "(esc)quit (tab)restart",
            italic_style.patch(dim_bold_style),
        ))
        .alignment(Alignment::Center);
        footer.render(chunks[5], buf);
    }
}
