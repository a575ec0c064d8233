use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use super::{App, UiMode, ui_helpers, view_style};

impl App {
    pub(super) fn render_question_modal(&self, f: &mut Frame, terminal_size: Rect) {
        let Some(question) = self.session.current_question() else {
            return;
        };

        let modal_rect = self.modal_rect(terminal_size, 2, 3);
        let final_round = question.final_round;

        let border_color = if self.return_mode == UiMode::FinalBoard {
            view_style::POINTS_COLOR
        } else {
            view_style::category_color(self.cursor_col)
        };

        let help = if final_round {
            "left/right player · type wager · y correct · n incorrect · a toggle answer · esc"
        } else {
            "left/right player · y correct · n incorrect · a toggle answer · esc"
        };

        let frame_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(
                Line::from(Span::styled(
                    question.category.trim().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Left),
            )
            .title(
                Line::from(Span::styled(
                    if final_round {
                        "final round".to_string()
                    } else {
                        ui_helpers::format_points(question.points)
                    },
                    Style::default().fg(view_style::POINTS_COLOR),
                ))
                .alignment(Alignment::Right),
            )
            .title_bottom(
                Line::from(Span::styled(help, Style::default().fg(Color::DarkGray)))
                    .alignment(Alignment::Center),
            );

        f.render_widget(Clear, modal_rect);
        f.render_widget(frame_block.clone(), modal_rect);

        let inner = frame_block.inner(modal_rect);
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(4)])
            .split(inner);

        let (label, text) = if self.session.prompt_shown() {
            ("question", question.prompt.as_str())
        } else {
            ("answer", question.answer.as_str())
        };

        let body = Paragraph::new(vec![
            Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
            Line::raw(""),
            Line::from(Span::styled(
                text.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(body, sections[0]);

        self.render_grading_strip(f, sections[1], final_round);
    }

    fn render_grading_strip(&self, f: &mut Frame, area: Rect, final_round: bool) {
        let players = &self.session.players;
        if players.is_empty() {
            return;
        }

        let constraints: Vec<Constraint> = players
            .iter()
            .map(|_| Constraint::Ratio(1, players.len() as u32))
            .collect();
        let slots = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (i, player) in players.iter().enumerate() {
            let selected = i == self.grade_cursor;
            let open = self.session.grade_open(i);

            let border_style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if open {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let name = ui_helpers::truncate_label(
                &player.name,
                (slots[i].width as usize).saturating_sub(4),
            );
            let name_style = if open {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let detail = if !open {
                Span::styled(
                    format!("done · {}", ui_helpers::format_points(player.score)),
                    Style::default().fg(view_style::score_color(player.score)),
                )
            } else if final_round {
                let wager = self
                    .wager_inputs
                    .get(i)
                    .map(String::as_str)
                    .unwrap_or_default();
                let cursor = if selected { "_" } else { "" };
                Span::styled(
                    format!("wager {}{}", wager, cursor),
                    Style::default().fg(view_style::POINTS_COLOR),
                )
            } else {
                Span::styled(
                    format!("playing for {}", self.playing_for(i)),
                    Style::default().fg(view_style::POINTS_COLOR),
                )
            };

            let paragraph = Paragraph::new(Line::from(detail))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(border_style)
                        .title(
                            Line::from(Span::styled(name, name_style))
                                .alignment(Alignment::Center),
                        ),
                );
            f.render_widget(paragraph, slots[i]);
        }
    }

    fn playing_for(&self, player: usize) -> String {
        let amount = self
            .wager_inputs
            .get(player)
            .and_then(|input| input.trim().parse::<i64>().ok());
        match amount {
            Some(points) => ui_helpers::format_points(points),
            None => "nothing".to_string(),
        }
    }
}
