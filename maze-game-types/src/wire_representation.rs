//! A concrete maze board with a JSON wire representation.
//!
//! One agent (the player) collects pellets while the chasers pursue it. The
//! board is deterministic: all of the game's stochasticity, if any, is
//! modeled by whoever searches it, never here.
//!
//! Rules applied by [`MazeGame::successor`]:
//!
//! - Every player move costs [`TIME_PENALTY`] points.
//! - Walking onto a pellet eats it for [`PELLET_SCORE`]; eating the last
//!   pellet wins the game for [`WIN_SCORE`].
//! - Walking onto a power pellet scores [`POWER_PELLET_SCORE`] and makes
//!   every chaser frightened for [`FRIGHTENED_TURNS`] of its own turns.
//! - A player and an active chaser meeting loses the game for
//!   [`LOSE_PENALTY`]; meeting a frightened chaser instead eats it for
//!   [`EAT_CHASER_SCORE`] and sends it back to its spawn, no longer
//!   frightened. The agent count never changes.
//! - Chasers may not stand still unless boxed in, and their frightened
//!   timers tick down once per own move.

use itertools::Itertools;

use crate::types::{
    ActionQueryableGame, AgentCountableGame, AgentIndex, Move, SimulableGame,
    TerminalDeterminableGame,
};

/// Points lost per player move.
pub const TIME_PENALTY: i64 = 1;
/// Points for eating a pellet.
pub const PELLET_SCORE: i64 = 10;
/// Points for eating a power pellet.
pub const POWER_PELLET_SCORE: i64 = 50;
/// Points for eating a frightened chaser.
pub const EAT_CHASER_SCORE: i64 = 200;
/// Points for eating the last pellet.
pub const WIN_SCORE: i64 = 500;
/// Points lost for being caught.
pub const LOSE_PENALTY: i64 = 500;
/// How many of a chaser's own turns a power pellet frightens it for.
pub const FRIGHTENED_TURNS: u32 = 40;

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// The cell this position moves to under `m`.
    pub fn shifted(&self, m: Move) -> Position {
        let (dx, dy) = m.to_offset();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance to `other`.
    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// An adversary on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chaser {
    /// Where the chaser currently is.
    pub position: Position,
    /// Where the chaser returns after being eaten.
    pub spawn: Position,
    /// Remaining frightened turns; 0 means the chaser is dangerous.
    #[serde(default)]
    pub frightened: u32,
}

/// The full game state. This is what fixtures deserialize into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeGame {
    /// Board width in cells.
    pub width: i32,
    /// Board height in cells.
    pub height: i32,
    /// Impassable cells.
    pub walls: Vec<Position>,
    /// The controlling agent's position.
    pub player: Position,
    /// The adversaries, in agent-index order (chaser `i` is agent `i + 1`).
    pub chasers: Vec<Chaser>,
    /// Uncollected pellets.
    pub pellets: Vec<Position>,
    /// Uncollected power pellets.
    #[serde(default)]
    pub power_pellets: Vec<Position>,
    /// Score so far.
    #[serde(default)]
    pub score: i64,
    /// Set once the last pellet has been eaten.
    #[serde(default)]
    pub won: bool,
    /// Set once the player has been caught.
    #[serde(default)]
    pub lost: bool,
}

impl MazeGame {
    fn in_bounds(&self, pos: &Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    fn is_wall(&self, pos: &Position) -> bool {
        self.walls.contains(pos)
    }

    fn passable(&self, pos: &Position) -> bool {
        self.in_bounds(pos) && !self.is_wall(pos)
    }

    fn resolve_player_collision(&mut self, chaser_index: usize) {
        let chaser = &mut self.chasers[chaser_index];
        if chaser.frightened > 0 {
            chaser.position = chaser.spawn;
            chaser.frightened = 0;
            self.score += EAT_CHASER_SCORE;
        } else {
            self.lost = true;
            self.score -= LOSE_PENALTY;
        }
    }

    fn apply_player_move(&mut self, action: Move) {
        self.player = self.player.shifted(action);
        self.score -= TIME_PENALTY;

        if let Some(hit) = self
            .chasers
            .iter()
            .position(|c| c.position == self.player)
        {
            self.resolve_player_collision(hit);
            if self.lost {
                return;
            }
        }

        if let Some(eaten) = self.pellets.iter().position(|p| p == &self.player) {
            self.pellets.remove(eaten);
            self.score += PELLET_SCORE;
            if self.pellets.is_empty() {
                self.won = true;
                self.score += WIN_SCORE;
            }
        }

        if let Some(eaten) = self.power_pellets.iter().position(|p| p == &self.player) {
            self.power_pellets.remove(eaten);
            self.score += POWER_PELLET_SCORE;
            for chaser in self.chasers.iter_mut() {
                chaser.frightened = FRIGHTENED_TURNS;
            }
        }
    }

    fn apply_chaser_move(&mut self, chaser_index: usize, action: Move) {
        let chaser = &mut self.chasers[chaser_index];
        chaser.position = chaser.position.shifted(action);
        chaser.frightened = chaser.frightened.saturating_sub(1);

        if self.chasers[chaser_index].position == self.player {
            self.resolve_player_collision(chaser_index);
        }
    }
}

impl TerminalDeterminableGame for MazeGame {
    fn is_terminal(&self) -> bool {
        self.won || self.lost
    }
}

impl AgentCountableGame for MazeGame {
    fn agent_count(&self) -> usize {
        1 + self.chasers.len()
    }
}

impl ActionQueryableGame for MazeGame {
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Move> {
        assert!(
            agent.0 < self.agent_count(),
            "legal_actions queried for nonexistent {}",
            agent
        );

        if self.is_terminal() {
            return vec![];
        }

        if agent.is_controlling() {
            return Move::all()
                .iter()
                .copied()
                .filter(|m| self.passable(&self.player.shifted(*m)))
                .collect_vec();
        }

        let position = self.chasers[agent.0 - 1].position;
        let moves = Move::all()
            .iter()
            .copied()
            .filter(|m| *m != Move::Stop && self.passable(&position.shifted(*m)))
            .collect_vec();
        if moves.is_empty() {
            // Boxed in. Standing still keeps the action set non-empty.
            return vec![Move::Stop];
        }
        moves
    }
}

impl SimulableGame for MazeGame {
    fn successor(&self, agent: AgentIndex, action: Move) -> Self {
        assert!(
            !self.is_terminal(),
            "successor requested for a terminal state"
        );
        assert!(
            self.legal_actions(agent).contains(&action),
            "{} is not legal for {}",
            action,
            agent
        );

        let mut next = self.clone();
        if agent.is_controlling() {
            next.apply_player_move(action);
        } else {
            next.apply_chaser_move(agent.0 - 1, action);
        }
        next
    }
}
