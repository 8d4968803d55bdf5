use std::fmt;

use super::board::{self, Board, SLOTS};
use super::player::Player;

/// Undo uses allowed per player before the turn is forfeited.
pub const MAX_UNDOS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("This pit is empty")]
    EmptyPit,
    #[error("Can't access this pit")]
    WrongOwner,
    #[error("That's a mancala")]
    SelectedStore,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UndoError {
    #[error("Make a move first!")]
    NothingToUndo,
    /// Carries the player who must move now that the other side's budget is spent
    #[error("Ran out of undos, {} has to move!", .0.name())]
    Exhausted(Player),
}

/// Read-only view handed to observers on every broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub pits: [u8; SLOTS],
    pub turn: Player,
    pub outcome: Option<GameOutcome>,
    pub error_msg: String,
    pub free_turn_msg: String,
}

type Listener = Box<dyn FnMut(&StateSnapshot)>;

/// Full game state machine: board, turn, undo buffer, transient status
/// text, and the observer registry.
///
/// Invalid input never aborts an operation: `move_pit` and `undo` record a
/// status message and still broadcast, so the UI layer only ever reads
/// accessors after the fact.
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
    last_stone_placed: usize,
    // Single-level undo buffer: one prior board plus its last-stone index
    undo_board: Board,
    prev_last_stone: usize,
    can_undo: bool,
    undos_used: [u8; 2],
    error_msg: String,
    free_turn_msg: String,
    listeners: Vec<Listener>,
}

impl GameState {
    /// Create a state with every pit empty; call [`reset`](Self::reset) or
    /// start from [`with_stones`](Self::with_stones) to begin a game
    pub fn new() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::A, // Player A starts
            outcome: None,
            last_stone_placed: 0,
            undo_board: Board::new(),
            prev_last_stone: 0,
            can_undo: false,
            undos_used: [0, 0],
            error_msg: String::new(),
            free_turn_msg: String::new(),
            listeners: Vec::new(),
        }
    }

    /// Create a fresh game with `stones` in every playable pit
    pub fn with_stones(stones: u8) -> Self {
        let mut state = Self::new();
        state.board = Board::with_stones(stones);
        state.undo_board = state.board;
        state
    }

    /// Restart the game with `stones` per pit, clearing all transient state
    pub fn reset(&mut self, stones: u8) {
        self.board = Board::with_stones(stones);
        self.undo_board = self.board;
        self.current_player = Player::A;
        self.outcome = None;
        self.last_stone_placed = 0;
        self.prev_last_stone = 0;
        self.can_undo = false;
        self.undos_used = [0, 0];
        self.error_msg.clear();
        self.free_turn_msg.clear();
        self.notify();
    }

    /// Refill every playable pit, leaving everything else as-is
    pub fn set_stones(&mut self, stones: u8) {
        self.board.set_stones(stones);
        self.notify();
    }

    /// Check whether `pit` is playable for the current player.
    ///
    /// Order matters: an empty pit reports [`MoveError::EmptyPit`] even when
    /// it also belongs to the opponent.
    pub fn validate_move(&self, pit: usize) -> Result<(), MoveError> {
        assert!(pit < SLOTS, "pit index out of range: {pit}");
        if !board::is_store(pit) && self.board.get(pit) == 0 {
            return Err(MoveError::EmptyPit);
        }
        if board::is_store(pit) {
            return Err(MoveError::SelectedStore);
        }
        if !self.current_player.owns_pit(pit) {
            return Err(MoveError::WrongOwner);
        }
        Ok(())
    }

    /// Resolve a full move: sowing, capture, free turn, game-over sweep and
    /// turn alternation. On invalid input only the status message changes.
    /// Observers are notified either way.
    pub fn move_pit(&mut self, pit: usize) {
        self.free_turn_msg.clear();
        match self.validate_move(pit) {
            Err(e) => {
                self.error_msg = e.to_string();
            }
            Ok(()) => {
                self.error_msg.clear();
                self.undo_board = self.board;
                self.prev_last_stone = self.last_stone_placed;

                let mover = self.current_player;
                let last = self.board.sow(pit, mover);
                self.last_stone_placed = last;

                if board::is_store(last) {
                    self.free_turn_msg = "Congratulations! You get a free turn!".to_string();
                } else if self.board.get(last) == 1 && mover.owns_pit(last) {
                    // The last stone landed in a previously-empty own pit
                    self.board.capture_across(last);
                }

                if self.board.is_exhausted() {
                    self.board.sweep_into_stores();
                    self.outcome = Some(self.compare_stores());
                    self.can_undo = false;
                } else {
                    self.can_undo = true;
                    self.undos_used[mover.other().index()] = 0;
                    self.advance_turn();
                }
            }
        }
        self.notify();
    }

    /// Roll back the most recent move, if the mover still has budget.
    ///
    /// The mover is re-derived by applying the turn rule once more: it flips
    /// back unless the last stone landed in the current player's own store
    /// (a free turn, where the turn never changed). An exhausted budget
    /// forfeits the turn to the opponent instead of restoring.
    pub fn undo(&mut self) {
        if !self.can_undo {
            self.error_msg = UndoError::NothingToUndo.to_string();
            self.notify();
            return;
        }

        self.advance_turn();
        let mover = self.current_player;
        if self.undos_used[mover.index()] < MAX_UNDOS {
            self.board = self.undo_board;
            self.last_stone_placed = self.prev_last_stone;
            self.undos_used[mover.index()] += 1;
            self.undos_used[mover.other().index()] = 0;
            self.can_undo = false;
        } else {
            self.error_msg = UndoError::Exhausted(mover.other()).to_string();
            self.current_player = mover.other();
        }
        self.notify();
    }

    /// Apply the turn rule: the mover keeps the turn only when the last
    /// stone landed in their own store, which also resets their undo uses
    fn advance_turn(&mut self) {
        let p = self.current_player;
        if self.last_stone_placed == p.store_index() {
            self.undos_used[p.index()] = 0;
        } else {
            self.current_player = p.other();
        }
    }

    /// Compare the two stores once a side has run out of stones
    fn compare_stores(&self) -> GameOutcome {
        let a = self.board.store(Player::A);
        let b = self.board.store(Player::B);
        match a.cmp(&b) {
            std::cmp::Ordering::Greater => GameOutcome::Winner(Player::A),
            std::cmp::Ordering::Less => GameOutcome::Winner(Player::B),
            std::cmp::Ordering::Equal => GameOutcome::Draw,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Display label for the current turn
    pub fn turn_label(&self) -> &'static str {
        self.current_player.name()
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Copy of all 14 slot counts, safe to hold across later mutations
    pub fn board_data(&self) -> [u8; SLOTS] {
        self.board.slots()
    }

    /// Latest validation or undo failure text, empty when the last
    /// operation succeeded
    pub fn error_msg(&self) -> &str {
        &self.error_msg
    }

    /// Free-turn announcement from the most recent move, if any
    pub fn free_turn_msg(&self) -> &str {
        &self.free_turn_msg
    }

    /// Undos a player may still use before forfeiting the turn
    pub fn undos_remaining(&self, player: Player) -> u8 {
        MAX_UNDOS - self.undos_used[player.index()]
    }

    /// Slot that received the final stone of the most recent move
    pub fn last_stone_placed(&self) -> usize {
        self.last_stone_placed
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Human-readable result of comparing the two stores
    pub fn winner_message(&self) -> String {
        match self.compare_stores() {
            GameOutcome::Winner(p) => format!("GAMEOVER: {} is the winner!", p.name()),
            GameOutcome::Draw => "GAMEOVER: It's a draw!".to_string(),
        }
    }

    /// Register an observer; broadcasts run synchronously in registration
    /// order after every mutating operation
    pub fn attach(&mut self, listener: impl FnMut(&StateSnapshot) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self) {
        let snapshot = StateSnapshot {
            pits: self.board.slots(),
            turn: self.current_player,
            outcome: self.outcome,
            error_msg: self.error_msg.clone(),
            free_turn_msg: self.free_turn_msg.clone(),
        };
        for listener in &mut self.listeners {
            listener(&snapshot);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("board", &self.board)
            .field("current_player", &self.current_player)
            .field("outcome", &self.outcome)
            .field("last_stone_placed", &self.last_stone_placed)
            .field("can_undo", &self.can_undo)
            .field("undos_used", &self.undos_used)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Build a state with exact slot counts, Player A to move
    fn state_with_pits(pits: [u8; SLOTS]) -> GameState {
        let mut state = GameState::new();
        state.board = Board::from_slots(pits);
        state.undo_board = state.board;
        state
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::with_stones(4);
        assert_eq!(state.current_player(), Player::A);
        assert_eq!(state.turn_label(), "Player A");
        assert!(!state.is_terminal());
        assert_eq!(state.board().total_stones(), 48);
        assert_eq!(state.undos_remaining(Player::A), 3);
        assert_eq!(state.undos_remaining(Player::B), 3);
    }

    #[test]
    fn test_store_selection_always_rejected() {
        let state = GameState::with_stones(4);
        assert_eq!(state.validate_move(6), Err(MoveError::SelectedStore));
        assert_eq!(state.validate_move(13), Err(MoveError::SelectedStore));

        let mut state = GameState::with_stones(4);
        state.current_player = Player::B;
        assert_eq!(state.validate_move(6), Err(MoveError::SelectedStore));
        assert_eq!(state.validate_move(13), Err(MoveError::SelectedStore));
    }

    #[test]
    fn test_empty_pit_rejected() {
        let mut pits = [4u8; SLOTS];
        pits[3] = 0;
        pits[6] = 0;
        pits[13] = 0;
        let state = state_with_pits(pits);
        assert_eq!(state.validate_move(3), Err(MoveError::EmptyPit));
    }

    #[test]
    fn test_opponent_pit_rejected() {
        let state = GameState::with_stones(4);
        assert_eq!(state.validate_move(9), Err(MoveError::WrongOwner));
    }

    #[test]
    fn test_invalid_move_sets_message_and_keeps_board() {
        let mut state = GameState::with_stones(4);
        let before = state.board_data();
        state.move_pit(9); // Player B's pit on Player A's turn
        assert_eq!(state.board_data(), before);
        assert_eq!(state.error_msg(), "Can't access this pit");
        assert_eq!(state.current_player(), Player::A);
    }

    #[test]
    fn test_spec_example_free_turn_from_pit_two() {
        // Fresh board, 4 stones per pit: Player A plays pit 2, stones land
        // in 3, 4, 5 and the store. Last stone in own store grants a free turn.
        let mut state = GameState::with_stones(4);
        state.move_pit(2);
        assert_eq!(state.board().get(2), 0);
        assert_eq!(state.board().get(3), 5);
        assert_eq!(state.board().get(5), 5);
        assert_eq!(state.board().store(Player::A), 1);
        assert_eq!(state.last_stone_placed(), 6);
        assert_eq!(state.current_player(), Player::A);
        assert!(!state.free_turn_msg().is_empty());
    }

    #[test]
    fn test_ordinary_move_passes_turn() {
        let mut state = GameState::with_stones(4);
        state.move_pit(0); // lands in pit 4, not the store
        assert_eq!(state.last_stone_placed(), 4);
        assert_eq!(state.current_player(), Player::B);
        assert!(state.free_turn_msg().is_empty());
    }

    #[test]
    fn test_capture_collects_mirror_pit() {
        // Player A's pit 0 holds 2 stones, pit 2 is empty, and the mirror
        // pit 10 holds 5. The last stone lands in pit 2 and captures.
        let mut pits = [0u8; SLOTS];
        pits[0] = 2;
        pits[10] = 5;
        pits[8] = 1; // keep Player B's side alive past the move
        let mut state = state_with_pits(pits);
        state.move_pit(0);
        assert_eq!(state.board().get(1), 1);
        assert_eq!(state.board().get(2), 6); // landing stone plus the mirror's 5
        assert_eq!(state.board().get(10), 0);
        assert_eq!(state.current_player(), Player::B);
    }

    #[test]
    fn test_no_capture_on_opponent_side() {
        // Player A's last stone lands in Player B's empty pit 7: no capture.
        let mut pits = [0u8; SLOTS];
        pits[4] = 3; // sows into 5, 6 (store), 7
        pits[5] = 1;
        pits[9] = 4;
        let mut state = state_with_pits(pits);
        state.move_pit(4);
        assert_eq!(state.last_stone_placed(), 7);
        assert_eq!(state.board().get(7), 1);
        assert_eq!(state.board().get(5), 2); // mirror of 7 keeps its stones
    }

    #[test]
    fn test_stone_conservation_across_moves_and_undo() {
        let mut state = GameState::with_stones(4);
        let total = state.board().total_stones();
        for pit in [2usize, 0, 8, 3, 10] {
            state.move_pit(pit);
            assert_eq!(state.board().total_stones(), total);
        }
        state.undo();
        assert_eq!(state.board().total_stones(), total);
    }

    #[test]
    fn test_undo_roundtrip() {
        let mut state = GameState::with_stones(4);
        let before = state.board_data();
        state.move_pit(0);
        assert_eq!(state.current_player(), Player::B);

        state.undo();
        assert_eq!(state.board_data(), before);
        assert_eq!(state.current_player(), Player::A);
        assert_eq!(state.undos_remaining(Player::A), 2);

        // Second consecutive undo has nothing to restore
        state.undo();
        assert_eq!(state.error_msg(), "Make a move first!");
        assert_eq!(state.board_data(), before);
    }

    #[test]
    fn test_undo_after_free_turn_keeps_mover() {
        let mut state = GameState::with_stones(4);
        let before = state.board_data();
        state.move_pit(2); // free turn, Player A keeps the move
        state.undo();
        assert_eq!(state.board_data(), before);
        assert_eq!(state.current_player(), Player::A);
    }

    #[test]
    fn test_undo_budget_exhausted_forfeits_turn() {
        let mut state = GameState::with_stones(4);
        state.undos_used[Player::A.index()] = MAX_UNDOS;
        state.move_pit(0);
        assert_eq!(state.current_player(), Player::B);

        let after_move = state.board_data();
        state.undo();
        assert_eq!(state.board_data(), after_move);
        assert_eq!(state.error_msg(), "Ran out of undos, Player B has to move!");
        assert_eq!(state.current_player(), Player::B);
    }

    #[test]
    fn test_opponent_move_resets_undo_budget() {
        let mut state = GameState::with_stones(4);
        state.move_pit(0);
        state.undo();
        assert_eq!(state.undos_remaining(Player::A), 2);

        // Player A moves again (no undo this time), then Player B completes
        // a move, which restores Player A's full budget.
        state.move_pit(0);
        state.move_pit(8);
        assert_eq!(state.undos_remaining(Player::A), 3);
    }

    #[test]
    fn test_game_over_sweeps_and_declares_winner() {
        // Player A's only stone sits in pit 5; sowing it into the store
        // empties Player A's side and ends the game.
        let mut pits = [0u8; SLOTS];
        pits[5] = 1;
        pits[6] = 10;
        pits[9] = 3;
        pits[13] = 2;
        let mut state = state_with_pits(pits);
        state.move_pit(5);

        assert!(state.is_terminal());
        assert_eq!(state.board().side_total(Player::A), 0);
        assert_eq!(state.board().side_total(Player::B), 0);
        assert_eq!(state.board().store(Player::A), 11);
        assert_eq!(state.board().store(Player::B), 5);
        assert_eq!(state.outcome(), Some(GameOutcome::Winner(Player::A)));
        assert_eq!(state.winner_message(), "GAMEOVER: Player A is the winner!");

        // No rollback once the game has ended
        state.undo();
        assert_eq!(state.error_msg(), "Make a move first!");
    }

    #[test]
    fn test_game_over_draw() {
        let mut pits = [0u8; SLOTS];
        pits[5] = 1;
        pits[6] = 4;
        pits[9] = 3;
        pits[13] = 2;
        let mut state = state_with_pits(pits);
        state.move_pit(5);
        assert_eq!(state.board().store(Player::A), 5);
        assert_eq!(state.board().store(Player::B), 5);
        assert_eq!(state.outcome(), Some(GameOutcome::Draw));
        assert_eq!(state.winner_message(), "GAMEOVER: It's a draw!");
    }

    #[test]
    fn test_game_over_from_three_stone_start() {
        // Drive a full 3-stone game by always playing each side's first
        // non-empty pit; the machine must terminate with everything swept.
        let mut state = GameState::with_stones(3);
        let total = state.board().total_stones();
        let mut guard = 0;
        while !state.is_terminal() {
            let mover = state.current_player();
            let pit = mover
                .pit_range()
                .find(|&p| state.board().get(p) > 0)
                .expect("non-terminal state has a playable pit");
            state.move_pit(pit);
            guard += 1;
            assert!(guard < 1000, "game failed to terminate");
        }
        assert_eq!(state.board().side_total(Player::A), 0);
        assert_eq!(state.board().side_total(Player::B), 0);
        let a = state.board().store(Player::A);
        let b = state.board().store(Player::B);
        assert_eq!(u32::from(a) + u32::from(b), total);
        let expected = match a.cmp(&b) {
            std::cmp::Ordering::Greater => GameOutcome::Winner(Player::A),
            std::cmp::Ordering::Less => GameOutcome::Winner(Player::B),
            std::cmp::Ordering::Equal => GameOutcome::Draw,
        };
        assert_eq!(state.outcome(), Some(expected));
    }

    #[test]
    fn test_reset_clears_transient_state() {
        let mut state = GameState::with_stones(4);
        state.move_pit(0);
        state.move_pit(13); // leaves an error message behind
        state.reset(3);
        assert_eq!(state.current_player(), Player::A);
        assert_eq!(state.error_msg(), "");
        assert_eq!(state.free_turn_msg(), "");
        assert_eq!(state.undos_remaining(Player::A), 3);
        assert_eq!(state.board().total_stones(), 36);

        state.undo();
        assert_eq!(state.error_msg(), "Make a move first!");
    }

    #[test]
    fn test_observers_notified_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut state = GameState::with_stones(4);

        let first = Rc::clone(&log);
        state.attach(move |snap: &StateSnapshot| {
            first.borrow_mut().push((1, snap.turn));
        });
        let second = Rc::clone(&log);
        state.attach(move |snap: &StateSnapshot| {
            second.borrow_mut().push((2, snap.turn));
        });

        state.move_pit(0);
        assert_eq!(
            log.borrow().as_slice(),
            &[(1, Player::B), (2, Player::B)]
        );
    }

    #[test]
    fn test_observers_notified_on_invalid_move() {
        let calls = Rc::new(RefCell::new(0));
        let mut state = GameState::with_stones(4);
        let counter = Rc::clone(&calls);
        state.attach(move |snap: &StateSnapshot| {
            *counter.borrow_mut() += 1;
            assert_eq!(snap.error_msg, "That's a mancala");
        });
        state.move_pit(6);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_board_data_is_a_copy() {
        let mut state = GameState::with_stones(4);
        let data = state.board_data();
        state.move_pit(0);
        assert_eq!(data[0], 4); // unaffected by the later move
        assert_eq!(state.board().get(0), 0);
    }

    #[test]
    #[should_panic(expected = "pit index out of range")]
    fn test_out_of_range_pit_panics() {
        let state = GameState::with_stones(4);
        let _ = state.validate_move(14);
    }
}
