/// Number of playable pits per side.
pub const PITS_PER_SIDE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Index of this player's store (mancala)
    pub fn store_index(self) -> usize {
        match self {
            Player::A => 6,
            Player::B => 13,
        }
    }

    /// Indices of this player's six playable pits
    pub fn pit_range(self) -> std::ops::Range<usize> {
        match self {
            Player::A => 0..6,
            Player::B => 7..13,
        }
    }

    /// Whether `pit` is one of this player's playable pits (stores excluded)
    pub fn owns_pit(self, pit: usize) -> bool {
        self.pit_range().contains(&pit)
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::A => "Player A",
            Player::B => "Player B",
        }
    }

    /// Stable index for per-player bookkeeping arrays
    pub fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }
}
