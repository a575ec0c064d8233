use std::{
    io,
    path::PathBuf,
    time::Duration,
};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::{
    domain::{CellRef, GameSession, SelectOutcome},
    storage,
};

mod board_view;
mod event_handlers;
mod player_modal_view;
mod player_state;
mod question_view;
mod ui_helpers;
mod view_style;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UiMode {
    Board,
    FinalBoard,
    Question,
    PlayerModal,
}

/// How the running game was loaded; recorded in the snapshot so `--resume`
/// can rebuild the same board.
pub struct GameMeta {
    pub set_path: PathBuf,
    pub delimiter: String,
    pub qualifier: String,
}

struct App {
    session: GameSession,
    meta: GameMeta,
    ui_mode: UiMode,
    cursor_col: usize,
    cursor_row: usize,
    final_cursor: usize,
    /// Where closing the question view returns to.
    return_mode: UiMode,
    pending_final_confirm: bool,
    grade_cursor: usize,
    wager_inputs: Vec<String>,
    player_cursor: usize,
    new_player_name: String,
    status: Option<String>,
    render_needed: bool,
}

impl App {
    fn new(session: GameSession, meta: GameMeta) -> Self {
        App {
            session,
            meta,
            ui_mode: UiMode::Board,
            cursor_col: 0,
            cursor_row: 0,
            final_cursor: 0,
            return_mode: UiMode::Board,
            pending_final_confirm: false,
            grade_cursor: 0,
            wager_inputs: Vec::new(),
            player_cursor: 0,
            new_player_name: String::new(),
            status: None,
            render_needed: true,
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.render_needed = true;
    }

    fn clear_status(&mut self) {
        if self.status.take().is_some() {
            self.render_needed = true;
        }
    }

    /// Selects `cell` and, when it opens, switches to the question view with
    /// fresh wager inputs. A used cell toggles back onto the board instead.
    fn activate_cell(&mut self, cell: CellRef) {
        match self.session.select(cell) {
            SelectOutcome::Opened => {
                let points = self
                    .session
                    .current_question()
                    .map(|question| question.points)
                    .unwrap_or(0);
                self.wager_inputs = self
                    .session
                    .players
                    .iter()
                    .map(|_| points.to_string())
                    .collect();
                self.grade_cursor = 0;
                self.return_mode = self.ui_mode;
                self.ui_mode = UiMode::Question;
            }
            SelectOutcome::Restored => {}
            SelectOutcome::Empty => {}
        }
        self.render_needed = true;
    }

    fn close_question(&mut self) {
        self.session.close_current();
        self.wager_inputs.clear();
        self.ui_mode = self.return_mode;
        self.render_needed = true;
    }

    fn open_player_modal(&mut self) {
        self.ui_mode = UiMode::PlayerModal;
        self.player_cursor = 0;
        self.new_player_name = String::new();
        self.render_needed = true;
    }

    fn close_player_modal(&mut self) {
        self.ui_mode = UiMode::Board;
        self.render_needed = true;
    }

    fn modal_rect(&self, terminal_size: Rect, numerator: u16, denominator: u16) -> Rect {
        let target_width = terminal_size.width.saturating_mul(numerator) / denominator;
        let target_height = (terminal_size.height.saturating_mul(numerator) / denominator).max(10);

        let max_width = terminal_size.width.saturating_sub(2).max(1);
        let max_height = terminal_size.height.saturating_sub(2).max(1);

        let modal_width = target_width.clamp(1, max_width);
        let modal_height = target_height.clamp(1, max_height);

        let modal_x = (terminal_size.width.saturating_sub(modal_width)) / 2;
        let modal_y = (terminal_size.height.saturating_sub(modal_height)) / 2;

        Rect::new(modal_x, modal_y, modal_width, modal_height)
    }

    fn persist_snapshot(&self) {
        let snapshot = storage::snapshot_from_session(
            &self.session,
            &self.meta.set_path,
            &self.meta.delimiter,
            &self.meta.qualifier,
        );
        let path = storage::get_snapshot_path();
        let _ = storage::save_snapshot(&path, &snapshot);
    }
}

pub fn run_ui(session: GameSession, meta: GameMeta) -> Result<(), io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, meta);

    loop {
        if app.render_needed {
            terminal.draw(|f| {
                app.draw_frame(f);
            })?;
            app.render_needed = false;
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if app.handle_key(key) {
                        break;
                    }
                }
                Event::Resize(_, _) => app.render_needed = true,
                _ => {}
            }
        }
    }

    app.persist_snapshot();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
