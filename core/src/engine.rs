use core::fmt;
use core::str::FromStr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Ready,
    Running,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What mass-reveal on a numbered cell requires before opening its neighbors.
///
/// Flagged neighbors are never opened under either policy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChordPolicy {
    /// Open every hidden neighbor right away (press-and-hold on touch screens).
    #[default]
    Unchecked,
    /// Only open when the flagged neighbors add up to the hint.
    MatchFlags,
}

impl ChordPolicy {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unchecked => "unchecked",
            Self::MatchFlags => "match-flags",
        }
    }
}

impl fmt::Display for ChordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown chord policy {0:?}, expected unchecked or match-flags")]
pub struct ParsePolicyError(pub String);

impl FromStr for ChordPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unchecked" => Ok(Self::Unchecked),
            "match-flags" => Ok(Self::MatchFlags),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// The game state machine: owns the board and applies player actions to it.
///
/// Every action computes the next display grid on a copy and commits it at once, and the win
/// check only ever looks at committed state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    board: Board,
    flags_remaining: CellCount,
    state: EngineState,
    triggered_mine: Option<Coord2>,
    chord_policy: ChordPolicy,
}

impl PlayEngine {
    pub fn new(mines: MineGrid) -> Self {
        Self::with_policy(mines, ChordPolicy::default())
    }

    pub fn with_policy(mines: MineGrid, chord_policy: ChordPolicy) -> Self {
        let flags_remaining = mines.mine_count();
        Self {
            board: Board::new(mines),
            flags_remaining,
            state: Default::default(),
            triggered_mine: None,
            chord_policy,
        }
    }

    /// Back to `Ready` on a fresh mine grid, everything hidden.
    pub fn reset(&mut self, mines: MineGrid) {
        log::debug!("reset from {:?}", self.state);
        self.flags_remaining = mines.mine_count();
        self.board.replace_mines(mines);
        self.state = EngineState::Ready;
        self.triggered_mine = None;
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mines().mine_count()
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.flags_remaining
    }

    pub fn cell_at(&self, coords: Coord2) -> DisplayCell {
        self.board.cell_at(coords)
    }

    pub fn display(&self) -> &Array2<DisplayCell> {
        self.board.display()
    }

    pub fn mine_grid(&self) -> &MineGrid {
        self.board.mines()
    }

    /// The mine shown as exploded after a loss.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn chord_policy(&self) -> ChordPolicy {
        self.chord_policy
    }

    pub fn set_chord_policy(&mut self, chord_policy: ChordPolicy) {
        self.chord_policy = chord_policy;
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        self.board.validate_coords(coords)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use DisplayCell::*;
        use MarkOutcome::*;

        let coords = self.board.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(NoChange);
        }

        let next_cell = match self.board.cell_at(coords) {
            Hidden if self.flags_remaining == 0 => {
                log::debug!("no flags left for {:?}", coords);
                return Ok(NoChange);
            }
            Hidden => {
                self.flags_remaining -= 1;
                Flagged
            }
            Flagged => {
                self.flags_remaining += 1;
                Hidden
            }
            _ => return Ok(NoChange),
        };

        let mut next = self.board.snapshot();
        next[coords.to_nd_index()] = next_cell;
        self.board.commit(next);
        log::debug!(
            "{:?} is now {:?}, {} flags left",
            coords,
            next_cell,
            self.flags_remaining
        );
        Ok(Changed)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() || self.board.cell_at(coords) != DisplayCell::Hidden {
            return Ok(RevealOutcome::NoChange);
        }

        self.mark_started();
        let mut next = self.board.snapshot();

        if self.board.mines().contains_mine(coords) {
            self.lose(next, coords);
            return Ok(RevealOutcome::HitMine);
        }

        flood_reveal(coords, self.board.mines(), &mut next);
        self.board.commit(next);
        Ok(self.check_win())
    }

    /// Opens every hidden neighbor of a revealed hint.
    ///
    /// Every hidden neighbor is visited. If any of them is a mine the game is lost, with the first
    /// one in scan order as the exploded cell.
    pub fn reveal_neighbors(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        let DisplayCell::Revealed(hint) = self.board.cell_at(coords) else {
            return Ok(RevealOutcome::NoChange);
        };
        if hint == 0 {
            return Ok(RevealOutcome::NoChange);
        }
        if self.chord_policy == ChordPolicy::MatchFlags
            && self.count_flagged_neighbors(coords) != hint
        {
            log::debug!("flags around {:?} do not match hint {}", coords, hint);
            return Ok(RevealOutcome::NoChange);
        }

        self.mark_started();
        let mut next = self.board.snapshot();
        let mut revealed: CellCount = 0;
        let mut exploded: Option<Coord2> = None;

        for neighbor in self.board.mines().iter_neighbors(coords) {
            if next[neighbor.to_nd_index()] != DisplayCell::Hidden {
                continue;
            }
            if self.board.mines().contains_mine(neighbor) {
                // the first mine in scan order is the one that explodes
                exploded.get_or_insert(neighbor);
                continue;
            }
            revealed += flood_reveal(neighbor, self.board.mines(), &mut next);
        }

        if let Some(exploded) = exploded {
            self.lose(next, exploded);
            return Ok(RevealOutcome::HitMine);
        }
        if revealed == 0 {
            return Ok(RevealOutcome::NoChange);
        }

        self.board.commit(next);
        Ok(self.check_win())
    }

    /// Whether every safe cell is revealed.
    pub fn is_cleared(&self) -> bool {
        !self.board.has_unrevealed_safe_cell()
    }

    fn check_win(&mut self) -> RevealOutcome {
        if !self.is_cleared() {
            return RevealOutcome::Revealed;
        }

        let mut next = self.board.snapshot();
        for coords in self.board.mines().mine_coords() {
            next[coords.to_nd_index()] = DisplayCell::AllClearSuccess;
        }
        self.board.commit(next);
        self.flags_remaining = 0;
        self.state = EngineState::Won;
        log::debug!("board cleared");
        RevealOutcome::Won
    }

    fn lose(&mut self, mut next: Array2<DisplayCell>, exploded: Coord2) {
        for coords in self.board.mines().mine_coords() {
            let cell = &mut next[coords.to_nd_index()];
            *cell = match *cell {
                DisplayCell::Flagged => DisplayCell::MineMarkedCorrect,
                _ => DisplayCell::MineShown,
            };
        }
        next[exploded.to_nd_index()] = DisplayCell::Exploded;

        self.board.commit(next);
        self.triggered_mine = Some(exploded);
        self.state = EngineState::Lost;
        log::debug!("mine hit at {:?}", exploded);
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            log::debug!("first move, game running");
            self.state = EngineState::Running;
        }
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.board
            .mines()
            .iter_neighbors(coords)
            .filter(|&pos| self.board.cell_at(pos) == DisplayCell::Flagged)
            .count() as u8
    }
}
