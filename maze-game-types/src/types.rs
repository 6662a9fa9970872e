//! The game-model contract: moves, agent indices and the capability traits a
//! game must provide for the search engines to explore it.
//!
//! The traits are deliberately small and single-purpose so that an engine can
//! name exactly the capabilities it needs, and so that a synthetic game used
//! in a test only has to implement the handful of operations that test
//! exercises.

use std::fmt;

/// The closed set of actions an agent can take.
///
/// [`Move::all()`] fixes the iteration order, and every deterministic
/// tie-break in the engines ("first maximal action wins") is relative to the
/// order in which a game yields legal actions, which for [`MazeGame`] is this
/// one.
///
/// [`MazeGame`]: crate::wire_representation::MazeGame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    North,
    South,
    East,
    West,
    /// Stay in place. Always legal for the controlling agent, never for a
    /// chaser unless it has no other move.
    Stop,
}

impl Move {
    /// All moves, in the canonical order.
    pub fn all() -> [Move; 5] {
        [Move::North, Move::South, Move::East, Move::West, Move::Stop]
    }

    /// The (dx, dy) this move applies to a position. North is +y.
    pub fn to_offset(self) -> (i32, i32) {
        match self {
            Move::North => (0, 1),
            Move::South => (0, -1),
            Move::East => (1, 0),
            Move::West => (-1, 0),
            Move::Stop => (0, 0),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::North => "north",
            Move::South => "south",
            Move::East => "east",
            Move::West => "west",
            Move::Stop => "stop",
        };
        write!(f, "{}", s)
    }
}

/// Identifies whose turn it is. Index 0 is always the controlling agent;
/// indices `1..agent_count` are the adversaries.
///
/// The engines advance the index with [`AgentIndex::next`] as they walk down
/// the tree and reduce it with [`AgentIndex::normalized`] on entry, so an
/// index may transiently be out of range between the two calls. Anything that
/// hands an out-of-range index to a game query is a bug and the game is
/// expected to panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgentIndex(pub usize);

impl AgentIndex {
    /// The controlling agent. Always index 0.
    pub const CONTROLLING: AgentIndex = AgentIndex(0);

    /// Whether this is the controlling agent.
    pub fn is_controlling(self) -> bool {
        self.0 == 0
    }

    /// Whether this is the last agent of a round, i.e. the next [`next`]
    /// wraps back to the controlling agent.
    ///
    /// [`next`]: AgentIndex::next
    pub fn is_last(self, agent_count: usize) -> bool {
        self.0 == agent_count - 1
    }

    /// The next agent in the round, without wrapping.
    pub fn next(self) -> AgentIndex {
        AgentIndex(self.0 + 1)
    }

    /// This index reduced modulo the agent count.
    pub fn normalized(self, agent_count: usize) -> AgentIndex {
        AgentIndex(self.0 % agent_count)
    }
}

impl fmt::Display for AgentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent {}", self.0)
    }
}

/// A game that knows when it is over.
pub trait TerminalDeterminableGame {
    /// True once the game has been won or lost. Terminal states have no
    /// legal actions for any agent.
    fn is_terminal(&self) -> bool;
}

/// A game that knows how many agents are playing.
pub trait AgentCountableGame {
    /// The number of agents, controlling agent included. At least 2 in any
    /// real game.
    fn agent_count(&self) -> usize;
}

/// A game that can enumerate an agent's legal actions.
pub trait ActionQueryableGame: AgentCountableGame {
    /// The legal actions for `agent`, in a deterministic order.
    ///
    /// Empty exactly when the state is terminal. Panics if `agent` is out of
    /// range: that is a malformed query, not a condition to report back.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Move>;
}

/// A game that can generate successor states.
pub trait SimulableGame: ActionQueryableGame {
    /// The state after `agent` takes `action`. Deterministic and pure: the
    /// receiver is never mutated, and the same (state, agent, action) triple
    /// always produces the same successor.
    ///
    /// Panics if the state is terminal, `agent` is out of range, or `action`
    /// is not legal for `agent`.
    #[must_use]
    fn successor(&self, agent: AgentIndex, action: Move) -> Self;
}
