use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState},
};

use super::{App, ui_helpers, view_style};

impl App {
    pub(super) fn render_player_modal(&self, f: &mut Frame, terminal_size: Rect) {
        let modal_rect = self.modal_rect(terminal_size, 1, 3);
        let name_width = (modal_rect.width as usize).saturating_sub(14).max(4);

        let items: Vec<ListItem> = self
            .session
            .players
            .iter()
            .enumerate()
            .map(|(i, player)| {
                let is_selected = i == self.player_cursor;
                let dot_color = view_style::category_color(i);
                let name = ui_helpers::truncate_label(&player.name, name_width);
                let score = ui_helpers::format_points(player.score);

                if is_selected {
                    let text_color = view_style::text_color_for_bg(dot_color);
                    ListItem::new(Line::from(vec![
                        Span::raw("● ").fg(text_color),
                        Span::raw(format!("{}  ", name)).fg(text_color),
                        Span::raw(score).fg(text_color),
                    ]))
                    .style(Style::default().fg(text_color).bg(dot_color))
                } else {
                    ListItem::new(Line::from(vec![
                        Span::raw("● ").fg(dot_color),
                        Span::raw(format!("{}  ", name)).fg(Color::White),
                        Span::raw(score).fg(view_style::score_color(player.score)),
                    ]))
                }
            })
            .chain(std::iter::once({
                let is_selected = self.is_on_player_insert();
                let label = if self.new_player_name.is_empty() {
                    "+ Add player...".to_string()
                } else {
                    self.new_player_name.clone()
                };

                if is_selected {
                    ListItem::new(Line::from(vec![Span::raw(format!("● {}", label))]))
                        .style(Style::default().fg(Color::Black).bg(Color::White))
                } else {
                    ListItem::new(Line::from(vec![
                        Span::raw("● ").fg(Color::DarkGray),
                        Span::raw(label).fg(Color::White),
                    ]))
                }
            }))
            .collect();

        let mut list_state = ListState::default();
        list_state.select(Some(self.player_cursor));

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(Line::from(Span::styled(
                        "players",
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    )))
                    .title_alignment(Alignment::Center)
                    .title_bottom(
                        Line::from(Span::styled(
                            "type rename · +/- score · del remove · enter add · esc",
                            Style::default().fg(Color::DarkGray),
                        ))
                        .alignment(Alignment::Center),
                    ),
            )
            .highlight_style(Style::default());

        f.render_widget(Clear, modal_rect);
        f.render_stateful_widget(list, modal_rect, &mut list_state);
    }
}
