use std::fmt::Debug;

use derivative::Derivative;
use itertools::Itertools;
use tracing::{info, info_span};

use maze_game_types::types::{AgentIndex, Move, SimulableGame, TerminalDeterminableGame};

use crate::score::{FrontierScorable, Scorable};

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// Expectimax: the same tree and depth semantics as
/// [`MinimaxAgent`](crate::MinimaxAgent), but each adversary is modeled as
/// choosing uniformly at random among its legal moves, so adversary nodes
/// average their children instead of minimizing them.
///
/// Against adversaries that do not actually play optimally this backs up a
/// truer picture of what a position is worth, at the price of no pruning:
/// every child contributes to a mean, so none can be skipped.
pub struct ExpectimaxAgent<GameType, ScorableType>
where
    ScorableType: Scorable<GameType>,
{
    /// The state the next decision is for.
    pub game: GameType,
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    /// How many full rounds to look ahead. At least 1.
    pub ply_budget: usize,
    /// Name used in decision spans.
    pub name: &'static str,
}

impl<GameType, ScorableType> FrontierScorable<GameType> for ExpectimaxAgent<GameType, ScorableType>
where
    GameType: TerminalDeterminableGame + SimulableGame,
    ScorableType: Scorable<GameType>,
{
    fn score(&self, node: &GameType) -> f64 {
        self.score_function.score(node)
    }
}

impl<GameType, ScorableType> ExpectimaxAgent<GameType, ScorableType>
where
    GameType: TerminalDeterminableGame + SimulableGame + Clone + Debug,
    ScorableType: Scorable<GameType>,
{
    /// Construct a new `ExpectimaxAgent`.
    ///
    /// Panics if `ply_budget` is 0.
    pub fn new(
        game: GameType,
        score_function: ScorableType,
        ply_budget: usize,
        name: &'static str,
    ) -> Self {
        assert!(ply_budget >= 1, "ply budget must be at least 1");
        Self {
            game,
            score_function,
            ply_budget,
            name,
        }
    }

    /// The expectimax value of `node` with `agent` to move and `depth` plies
    /// already consumed.
    ///
    /// Panics if a non-terminal node has no legal actions for the agent to
    /// move: besides meaning the game model and its terminal test disagree,
    /// an empty action set here would divide by zero, and a quiet 0 or NaN
    /// must never leak into the tree.
    pub fn value(&self, node: &GameType, depth: usize, agent: AgentIndex) -> f64 {
        if node.is_terminal() {
            return self.score(node);
        }

        let agent = agent.normalized(node.agent_count());
        if let Some(score) = self.frontier_score(node, depth, agent, self.ply_budget) {
            return score;
        }

        let actions = node.legal_actions(agent);
        assert!(
            !actions.is_empty(),
            "no legal actions for {} in a non-terminal state",
            agent
        );

        if agent.is_controlling() {
            actions
                .into_iter()
                .map(|action| self.value(&node.successor(agent, action), depth + 1, agent.next()))
                .fold(f64::NEG_INFINITY, f64::max)
        } else {
            let count = actions.len() as f64;
            let total: f64 = actions
                .into_iter()
                .map(|action| self.value(&node.successor(agent, action), depth, agent.next()))
                .sum();
            total / count
        }
    }

    /// Evaluate every legal root action and return the best one together
    /// with its expectimax value. Ties go to the first maximal action in the
    /// game's action order.
    ///
    /// Panics if the wrapped state is terminal.
    pub fn choose(&self) -> (Move, f64) {
        let root_actions = self.game.legal_actions(AgentIndex::CONTROLLING);
        assert!(
            !root_actions.is_empty(),
            "decision requested for a state with no legal actions"
        );

        let scored = root_actions
            .into_iter()
            .map(|action| {
                let successor = self.game.successor(AgentIndex::CONTROLLING, action);
                let value = self.value(&successor, 0, AgentIndex::CONTROLLING.next());
                (action, value)
            })
            .collect_vec();

        let mut best = scored[0];
        for candidate in scored.into_iter().skip(1) {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best
    }

    /// Pick the next move to make.
    pub fn decide(&self) -> Move {
        info_span!(
            "expectimax_decide",
            agent_name = self.name,
            ply_budget = self.ply_budget,
            chosen_score = tracing::field::Empty,
            chosen_direction = tracing::field::Empty,
        )
        .in_scope(|| {
            let (chosen, value) = self.choose();

            let current_span = tracing::Span::current();
            current_span.record("chosen_score", value);
            current_span.record("chosen_direction", format!("{}", chosen).as_str());
            info!(%chosen, value, "expectimax finished");

            chosen
        })
    }
}
