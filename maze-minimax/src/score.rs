use maze_game_types::types::{AgentCountableGame, AgentIndex, TerminalDeterminableGame};

/// Something that can turn a game state into a score.
///
/// Only the relative order of scores matters. The function must be total:
/// every reachable state, terminal ones included, gets a finite value. A
/// scorer that cannot score a state should panic, not smuggle out a
/// sentinel.
pub trait Scorable<GameType> {
    /// Score the given state.
    fn score(&self, node: &GameType) -> f64;
}

impl<GameType, FnLike: Fn(&GameType) -> f64> Scorable<GameType> for FnLike {
    fn score(&self, node: &GameType) -> f64 {
        (self)(node)
    }
}

/// Provides the shared frontier rule for the bounded-depth engines, so the
/// individual recursions only differ in how they combine child values.
pub trait FrontierScorable<GameType>
where
    GameType: TerminalDeterminableGame + AgentCountableGame,
{
    /// The injected evaluation function.
    fn score(&self, node: &GameType) -> f64;

    /// Decides whether `node` is a frontier node and, if so, scores it.
    ///
    /// Terminal states are scored immediately, whatever the remaining
    /// budget. Otherwise the search stops exactly when the last agent of a
    /// round is about to move and the ply budget has been spent, so one ply
    /// equals one full round. `agent` must already be normalized.
    fn frontier_score(
        &self,
        node: &GameType,
        depth: usize,
        agent: AgentIndex,
        max_depth: usize,
    ) -> Option<f64> {
        if node.is_terminal() {
            return Some(self.score(node));
        }

        if agent.is_last(node.agent_count()) && depth == max_depth {
            return Some(self.score(node));
        }

        None
    }
}
