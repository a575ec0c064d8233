use super::App;

impl App {
    /// The last row of the player modal is the add-player input.
    pub(super) fn is_on_player_insert(&self) -> bool {
        self.player_cursor == self.session.players.len()
    }

    pub(super) fn add_player_from_input(&mut self) {
        if self.new_player_name.is_empty() {
            return;
        }
        let index = self.session.add_player_at(self.session.players.len());
        self.session.rename_player(index, self.new_player_name.clone());
        self.new_player_name = String::new();
        self.player_cursor = index;
        self.render_needed = true;
    }

    pub(super) fn delete_selected_player(&mut self) {
        if self.is_on_player_insert() {
            return;
        }
        if !self.session.delete_player(self.player_cursor) {
            self.set_status("The game wouldn't be any fun without at least one player");
            return;
        }
        if self.player_cursor >= self.session.players.len() {
            self.player_cursor = self.session.players.len();
        }
        self.render_needed = true;
    }

    pub(super) fn rename_push(&mut self, c: char) {
        if self.is_on_player_insert() {
            self.new_player_name.push(c);
        } else if let Some(player) = self.session.players.get_mut(self.player_cursor) {
            player.name.push(c);
        }
        self.render_needed = true;
    }

    pub(super) fn rename_pop(&mut self) {
        if self.is_on_player_insert() {
            self.new_player_name.pop();
        } else if let Some(player) = self.session.players.get_mut(self.player_cursor) {
            player.name.pop();
        }
        self.render_needed = true;
    }

    pub(super) fn adjust_selected_score(&mut self, delta: i64) {
        if !self.is_on_player_insert() && self.session.adjust_score(self.player_cursor, delta) {
            self.render_needed = true;
        }
    }
}
