use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::{constants::BOARD_SETTINGS, domain::CellRef};

use super::{App, UiMode, ui_helpers, view_style};

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();

        match self.ui_mode {
            UiMode::Board => self.render_board(f, size),
            UiMode::FinalBoard => self.render_final_board(f, size),
            UiMode::PlayerModal => {
                self.render_board(f, size);
                self.render_player_modal(f, size);
            }
            UiMode::Question => {
                if self.return_mode == UiMode::FinalBoard {
                    self.render_final_board(f, size);
                } else {
                    self.render_board(f, size);
                }
                self.render_question_modal(f, size);
            }
        }
    }

    fn render_board(&self, f: &mut Frame, size: Rect) {
        let set_name = self
            .meta
            .set_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(
                Line::from(Span::styled(
                    "quizboard",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Left),
            )
            .title(
                Line::from(Span::styled(set_name, Style::default().fg(Color::Gray)))
                    .alignment(Alignment::Right),
            );
        let inner = block.inner(size);
        f.render_widget(block, size);

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(4),
                Constraint::Length(BOARD_SETTINGS.player_bar_height),
                Constraint::Length(1),
            ])
            .split(inner);

        self.render_grid(f, sections[0]);
        self.render_player_bar(f, sections[1]);
        self.render_footer(
            f,
            sections[2],
            "arrows move · enter reveal · f final round · p players · q quit",
        );
    }

    fn render_grid(&self, f: &mut Frame, area: Rect) {
        let categories = &self.session.catalog.categories;
        let max_rows = self.session.catalog.max_in_category;

        let column_constraints: Vec<Constraint> = categories
            .iter()
            .map(|_| Constraint::Ratio(1, categories.len() as u32))
            .collect();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(column_constraints)
            .split(area);

        for (col, bucket) in categories.iter().enumerate() {
            let mut cell_constraints = vec![Constraint::Length(BOARD_SETTINGS.header_height)];
            cell_constraints
                .extend((0..max_rows).map(|_| Constraint::Length(BOARD_SETTINGS.cell_height)));
            cell_constraints.push(Constraint::Min(0));
            let cells = Layout::default()
                .direction(Direction::Vertical)
                .constraints(cell_constraints)
                .split(columns[col]);

            let header_bg = view_style::category_color(col);
            let header = Paragraph::new(ui_helpers::truncate_label(
                &bucket.name,
                (cells[0].width as usize) * 2,
            ))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(
                Style::default()
                    .bg(header_bg)
                    .fg(view_style::text_color_for_bg(header_bg))
                    .add_modifier(Modifier::BOLD),
            );
            f.render_widget(header, cells[0]);

            for row in 0..max_rows {
                let Some(question) = bucket.questions.get(row) else {
                    continue;
                };
                let rect = cells[row + 1];
                let cell = CellRef::Board { col, row };
                let selected = self.ui_mode == UiMode::Board
                    && self.cursor_col == col
                    && self.cursor_row == row;

                let border_style = if selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };

                let body = if self.session.is_used(cell) {
                    Span::raw("")
                } else {
                    Span::styled(
                        ui_helpers::format_points(question.points),
                        Style::default()
                            .fg(view_style::POINTS_COLOR)
                            .add_modifier(Modifier::BOLD),
                    )
                };

                let paragraph = Paragraph::new(Line::from(body))
                    .alignment(Alignment::Center)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_type(BorderType::Rounded)
                            .border_style(border_style),
                    );
                f.render_widget(paragraph, rect);
            }
        }
    }

    fn render_player_bar(&self, f: &mut Frame, area: Rect) {
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
            let name = ui_helpers::truncate_label(
                &player.name,
                (slots[i].width as usize).saturating_sub(4),
            );
            let score = Span::styled(
                ui_helpers::format_points(player.score),
                Style::default()
                    .fg(view_style::score_color(player.score))
                    .add_modifier(Modifier::BOLD),
            );
            let paragraph = Paragraph::new(Line::from(score))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(Color::DarkGray))
                        .title(
                            Line::from(Span::styled(name, Style::default().fg(Color::White)))
                                .alignment(Alignment::Center),
                        ),
                );
            f.render_widget(paragraph, slots[i]);
        }
    }

    pub(super) fn render_footer(&self, f: &mut Frame, area: Rect, help: &str) {
        let line = match &self.status {
            Some(status) => Line::from(Span::styled(
                status.clone(),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(Span::styled(
                help.to_string(),
                Style::default().fg(Color::DarkGray),
            )),
        };
        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }

    fn render_final_board(&self, f: &mut Frame, size: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(
                Line::from(Span::styled(
                    "final round",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            );
        let inner = block.inner(size);
        f.render_widget(block, size);

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(inner);

        let questions = &self.session.catalog.final_round;
        let mut row_constraints: Vec<Constraint> = questions
            .iter()
            .map(|_| Constraint::Length(BOARD_SETTINGS.cell_height))
            .collect();
        row_constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(row_constraints)
            .split(sections[0]);

        for (row, question) in questions.iter().enumerate() {
            let cell = CellRef::Final { row };
            let selected = self.ui_mode == UiMode::FinalBoard && self.final_cursor == row;
            let played = self.session.is_used(cell);

            let border_style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let label = if played {
                Span::styled(
                    format!("{} (played)", question.category.trim()),
                    Style::default().fg(Color::DarkGray),
                )
            } else {
                Span::styled(
                    question.category.trim().to_string(),
                    Style::default()
                        .fg(view_style::POINTS_COLOR)
                        .add_modifier(Modifier::BOLD),
                )
            };

            let paragraph = Paragraph::new(Line::from(label))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(border_style),
                );
            f.render_widget(paragraph, rows[row]);
        }

        self.render_footer(f, sections[1], "enter open · b back to board · q quit");
    }
}
