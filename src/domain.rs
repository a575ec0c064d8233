use std::collections::HashSet;

use crate::catalog::{Question, QuestionCatalog};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub score: i64,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Player {
            name: name.into(),
            score: 0,
        }
    }
}

/// Position of a question on the play surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellRef {
    Board { col: usize, row: usize },
    Final { row: usize },
}

/// What happened when a cell was selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The question became the current question and its cell was consumed.
    Opened,
    /// The cell had already been played and was put back on the board.
    Restored,
    /// No question exists at that position.
    Empty,
}

/// All mutable game state: the catalog under play, the player roster, which
/// cells have been consumed and the question currently on screen. Built once
/// per game from a freshly constructed catalog.
pub struct GameSession {
    pub catalog: QuestionCatalog,
    pub players: Vec<Player>,
    used: HashSet<CellRef>,
    current: Option<CellRef>,
    grades_open: Vec<bool>,
    prompt_shown: bool,
}

impl GameSession {
    pub fn new(catalog: QuestionCatalog, team_names: &[String]) -> Self {
        let players = if team_names.is_empty() {
            vec![Player::new("Team 1")]
        } else {
            team_names.iter().map(Player::new).collect()
        };

        GameSession {
            catalog,
            players,
            used: HashSet::new(),
            current: None,
            grades_open: Vec::new(),
            prompt_shown: false,
        }
    }

    pub fn question(&self, cell: CellRef) -> Option<&Question> {
        match cell {
            CellRef::Board { col, row } => self
                .catalog
                .categories
                .get(col)
                .and_then(|bucket| bucket.questions.get(row)),
            CellRef::Final { row } => self.catalog.final_round.get(row),
        }
    }

    /// Stamps every question with its display id, board columns counted from
    /// one and the final round as column zero.
    pub fn assign_grid_ids(&mut self) {
        for (col, bucket) in self.catalog.categories.iter_mut().enumerate() {
            for (row, question) in bucket.questions.iter_mut().enumerate() {
                question.grid_id = format!("grid{}-{}", col + 1, row);
            }
        }
        for (row, question) in self.catalog.final_round.iter_mut().enumerate() {
            question.grid_id = format!("grid0-{}", row);
        }
    }

    /// Opens the question at `cell`, or restores the cell if it was already
    /// played. Opening resets the grading state for all players.
    pub fn select(&mut self, cell: CellRef) -> SelectOutcome {
        if self.question(cell).is_none() {
            return SelectOutcome::Empty;
        }

        if self.used.remove(&cell) {
            return SelectOutcome::Restored;
        }

        self.used.insert(cell);
        self.current = Some(cell);
        self.grades_open = vec![true; self.players.len()];
        self.prompt_shown = false;
        SelectOutcome::Opened
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.and_then(|cell| self.question(cell))
    }

    pub fn close_current(&mut self) {
        self.current = None;
        self.grades_open.clear();
        self.prompt_shown = false;
    }

    pub fn is_used(&self, cell: CellRef) -> bool {
        self.used.contains(&cell)
    }

    /// Marks a cell as already played without opening it. Used when resuming
    /// a saved game.
    pub fn mark_used(&mut self, cell: CellRef) {
        if self.question(cell).is_some() {
            self.used.insert(cell);
        }
    }

    pub fn used_cells(&self) -> Vec<CellRef> {
        let mut cells: Vec<CellRef> = self.used.iter().copied().collect();
        cells.sort_by_key(|cell| match *cell {
            CellRef::Board { col, row } => (0, col, row),
            CellRef::Final { row } => (1, 0, row),
        });
        cells
    }

    /// True when every board cell has been played. The final round does not
    /// count.
    pub fn board_empty(&self) -> bool {
        for (col, bucket) in self.catalog.categories.iter().enumerate() {
            for row in 0..bucket.questions.len() {
                if !self.used.contains(&CellRef::Board { col, row }) {
                    return false;
                }
            }
        }
        true
    }

    pub fn prompt_shown(&self) -> bool {
        self.prompt_shown
    }

    pub fn toggle_reveal(&mut self) {
        if self.current.is_some() {
            self.prompt_shown = !self.prompt_shown;
        }
    }

    pub fn grade_open(&self, player: usize) -> bool {
        self.grades_open.get(player).copied().unwrap_or(false)
    }

    pub fn grading_finished(&self) -> bool {
        !self.grades_open.iter().any(|open| *open)
    }

    /// Scores the current question for one player. `wager` is the amount at
    /// stake; `None` (an unreadable wager) changes no score but still
    /// consumes the player's grading slot. On a normal question a correct
    /// answer ends grading for everyone; on the final round each player is
    /// graded independently. When the last slot closes the prompt is shown.
    pub fn grade(&mut self, player: usize, correct: bool, wager: Option<i64>) {
        let Some(question) = self.current_question() else {
            return;
        };
        let final_round = question.final_round;

        if !self.grade_open(player) {
            return;
        }

        if let Some(amount) = wager {
            self.players[player].score += if correct { amount } else { -amount };
        }

        if !final_round && correct {
            self.grades_open.fill(false);
        } else {
            self.grades_open[player] = false;
        }

        if self.grading_finished() {
            self.prompt_shown = true;
        }
    }

    pub fn add_player_at(&mut self, index: usize) -> usize {
        let index = index.min(self.players.len());
        let name = format!("Player {}", self.players.len() + 1);
        self.players.insert(index, Player::new(name));
        if self.current.is_some() {
            // Keep the grading strip in step with the roster.
            let open = !self.grading_finished();
            self.grades_open.insert(index.min(self.grades_open.len()), open);
        }
        index
    }

    /// Refuses to delete the last player; the game needs at least one.
    pub fn delete_player(&mut self, index: usize) -> bool {
        if self.players.len() <= 1 || index >= self.players.len() {
            return false;
        }
        self.players.remove(index);
        if index < self.grades_open.len() {
            self.grades_open.remove(index);
        }
        true
    }

    pub fn rename_player(&mut self, index: usize, name: String) -> bool {
        match self.players.get_mut(index) {
            Some(player) => {
                player.name = name;
                true
            }
            None => false,
        }
    }

    pub fn adjust_score(&mut self, index: usize, delta: i64) -> bool {
        match self.players.get_mut(index) {
            Some(player) => {
                player.score += delta;
                true
            }
            None => false,
        }
    }
}
