use crossterm::event::{KeyCode, KeyEvent};

use crate::domain::CellRef;

use super::{App, UiMode, ui_helpers};

impl App {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.ui_mode {
            UiMode::Board => self.handle_board_key(key),
            UiMode::FinalBoard => self.handle_final_key(key),
            UiMode::Question => {
                self.handle_question_key(key);
                false
            }
            UiMode::PlayerModal => {
                self.handle_player_modal_key(key);
                false
            }
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) -> bool {
        let cols = self.session.catalog.categories.len();
        let rows = self.session.catalog.max_in_category;

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Left => {
                self.cursor_col = ui_helpers::wrap_prev_index(self.cursor_col, cols);
                self.clear_status();
                self.render_needed = true;
            }
            KeyCode::Right => {
                self.cursor_col = ui_helpers::wrap_next_index(self.cursor_col, cols);
                self.clear_status();
                self.render_needed = true;
            }
            KeyCode::Up => {
                self.cursor_row = ui_helpers::wrap_prev_index(self.cursor_row, rows);
                self.clear_status();
                self.render_needed = true;
            }
            KeyCode::Down => {
                self.cursor_row = ui_helpers::wrap_next_index(self.cursor_row, rows);
                self.clear_status();
                self.render_needed = true;
            }
            KeyCode::Enter => {
                self.clear_status();
                self.activate_cell(CellRef::Board {
                    col: self.cursor_col,
                    row: self.cursor_row,
                });
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                if self.session.catalog.final_round.is_empty() {
                    self.set_status("This set has no final round questions");
                } else {
                    self.ui_mode = UiMode::FinalBoard;
                    self.final_cursor = 0;
                    self.clear_status();
                    self.render_needed = true;
                }
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.clear_status();
                self.open_player_modal();
            }
            _ => {}
        }
        false
    }

    fn handle_final_key(&mut self, key: KeyEvent) -> bool {
        let rows = self.session.catalog.final_round.len();

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                self.ui_mode = UiMode::Board;
                self.pending_final_confirm = false;
                self.clear_status();
                self.render_needed = true;
            }
            KeyCode::Up => {
                self.final_cursor = ui_helpers::wrap_prev_index(self.final_cursor, rows);
                self.pending_final_confirm = false;
                self.clear_status();
                self.render_needed = true;
            }
            KeyCode::Down => {
                self.final_cursor = ui_helpers::wrap_next_index(self.final_cursor, rows);
                self.pending_final_confirm = false;
                self.clear_status();
                self.render_needed = true;
            }
            KeyCode::Enter => {
                let cell = CellRef::Final {
                    row: self.final_cursor,
                };
                // Opening the final round while the board still has questions
                // takes a second confirming press. Restoring a played row
                // needs none.
                if !self.session.is_used(cell)
                    && !self.session.board_empty()
                    && !self.pending_final_confirm
                {
                    self.pending_final_confirm = true;
                    self.set_status(
                        "Items still exist on the board; press enter again for the final round",
                    );
                } else {
                    self.pending_final_confirm = false;
                    self.clear_status();
                    self.activate_cell(cell);
                }
            }
            _ => {}
        }
        false
    }

    fn handle_question_key(&mut self, key: KeyEvent) {
        let player_count = self.session.players.len();
        let final_round = self
            .session
            .current_question()
            .map(|question| question.final_round)
            .unwrap_or(false);

        match key.code {
            KeyCode::Esc => self.close_question(),
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.session.toggle_reveal();
                self.render_needed = true;
            }
            KeyCode::Left => {
                self.grade_cursor = ui_helpers::wrap_prev_index(self.grade_cursor, player_count);
                self.render_needed = true;
            }
            KeyCode::Right => {
                self.grade_cursor = ui_helpers::wrap_next_index(self.grade_cursor, player_count);
                self.render_needed = true;
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => self.grade_selected(true),
            KeyCode::Char('n') | KeyCode::Char('N') => self.grade_selected(false),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                // Wagers are only adjustable on the final round; normal
                // questions always play for their printed points.
                if final_round && self.session.grade_open(self.grade_cursor) {
                    if let Some(input) = self.wager_inputs.get_mut(self.grade_cursor) {
                        input.push(c);
                        self.render_needed = true;
                    }
                }
            }
            KeyCode::Backspace => {
                if final_round && self.session.grade_open(self.grade_cursor) {
                    if let Some(input) = self.wager_inputs.get_mut(self.grade_cursor) {
                        input.pop();
                        self.render_needed = true;
                    }
                }
            }
            _ => {}
        }
    }

    fn grade_selected(&mut self, correct: bool) {
        let wager = self
            .wager_inputs
            .get(self.grade_cursor)
            .and_then(|input| input.trim().parse::<i64>().ok());
        self.session.grade(self.grade_cursor, correct, wager);
        self.render_needed = true;
    }

    fn handle_player_modal_key(&mut self, key: KeyEvent) {
        let total_rows = self.session.players.len() + 1;

        match key.code {
            KeyCode::Esc => self.close_player_modal(),
            KeyCode::Up => {
                self.player_cursor = ui_helpers::wrap_prev_index(self.player_cursor, total_rows);
                self.render_needed = true;
            }
            KeyCode::Down => {
                self.player_cursor = ui_helpers::wrap_next_index(self.player_cursor, total_rows);
                self.render_needed = true;
            }
            KeyCode::Enter => {
                if self.is_on_player_insert() {
                    self.add_player_from_input();
                } else {
                    self.close_player_modal();
                }
            }
            KeyCode::Delete => self.delete_selected_player(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_selected_score(100),
            KeyCode::Char('-') | KeyCode::Char('_') => self.adjust_selected_score(-100),
            KeyCode::Char(c) => self.rename_push(c),
            KeyCode::Backspace => self.rename_pop(),
            _ => {}
        }
    }
}
