use super::player::{Player, PITS_PER_SIDE};

/// Total slots: six pits per side plus one store per side.
pub const SLOTS: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pits: [u8; SLOTS],
}

impl Board {
    /// Create a board with every playable pit empty
    pub fn new() -> Self {
        Board { pits: [0; SLOTS] }
    }

    /// Build a board with exact slot counts. Test setup only.
    #[cfg(test)]
    pub(crate) fn from_slots(slots: [u8; SLOTS]) -> Self {
        Board { pits: slots }
    }

    /// Create a board with `stones` in every playable pit and empty stores
    pub fn with_stones(stones: u8) -> Self {
        let mut board = Board::new();
        board.set_stones(stones);
        board
    }

    /// Fill every playable pit with `stones`, leaving the stores untouched
    pub fn set_stones(&mut self, stones: u8) {
        for i in 0..SLOTS {
            if !is_store(i) {
                self.pits[i] = stones;
            }
        }
    }

    /// Get the stone count of a slot
    pub fn get(&self, slot: usize) -> u8 {
        self.pits[slot]
    }

    /// Read-only snapshot of all 14 slots
    pub fn slots(&self) -> [u8; SLOTS] {
        self.pits
    }

    /// Stones in a player's store
    pub fn store(&self, player: Player) -> u8 {
        self.pits[player.store_index()]
    }

    /// Total stones in a player's six playable pits
    pub fn side_total(&self, player: Player) -> u32 {
        player.pit_range().map(|i| u32::from(self.pits[i])).sum()
    }

    /// Total stones everywhere, stores included
    pub fn total_stones(&self) -> u32 {
        self.pits.iter().map(|&s| u32::from(s)).sum()
    }

    /// Lift all stones from `pit` and sow them counter-clockwise, one per
    /// slot, skipping the opponent's store. Returns the slot that received
    /// the last stone.
    ///
    /// Callers must have validated that `pit` belongs to `player` and is
    /// non-empty; an empty pit would leave no stone to place.
    pub fn sow(&mut self, pit: usize, player: Player) -> usize {
        debug_assert!(player.owns_pit(pit));
        debug_assert!(self.pits[pit] > 0);

        let skipped = player.other().store_index();
        let mut remaining = self.pits[pit];
        self.pits[pit] = 0;
        let mut cursor = pit;

        while remaining > 0 {
            cursor = (cursor + 1) % SLOTS;
            if cursor == skipped {
                // The opponent's store is passed over without consuming a stone
                continue;
            }
            self.pits[cursor] += 1;
            remaining -= 1;
        }

        cursor
    }

    /// Move the mirror pit's stones into `pit`. Used when the last sown
    /// stone lands in a previously-empty pit on the mover's own side; the
    /// captured stones stay in the landing pit until the game-over sweep.
    pub fn capture_across(&mut self, pit: usize) {
        debug_assert!(!is_store(pit));
        let mirror = 12 - pit;
        self.pits[pit] += self.pits[mirror];
        self.pits[mirror] = 0;
    }

    /// Sweep every remaining pit stone into its owner's store
    pub fn sweep_into_stores(&mut self) {
        for i in 0..PITS_PER_SIDE {
            self.pits[6] += self.pits[i];
            self.pits[i] = 0;
            self.pits[13] += self.pits[i + 7];
            self.pits[i + 7] = 0;
        }
    }

    /// True once either side's six playable pits are all empty
    pub fn is_exhausted(&self) -> bool {
        self.side_total(Player::A) == 0 || self.side_total(Player::B) == 0
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `slot` is one of the two stores
pub fn is_store(slot: usize) -> bool {
    slot == Player::A.store_index() || slot == Player::B.store_index()
}
