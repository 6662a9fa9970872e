use std::fmt::Debug;

use derivative::Derivative;
use tracing::{info, info_span};

use maze_game_types::types::{AgentIndex, Move, SimulableGame, TerminalDeterminableGame};

use crate::score::{FrontierScorable, Scorable};

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// Minimax with alpha-beta pruning.
///
/// Explores the same tree with the same depth semantics as
/// [`MinimaxAgent`](crate::MinimaxAgent) and returns the identical move and
/// value for any fixed action ordering; the bounds only cut off siblings
/// that provably cannot change the answer.
///
/// `alpha` is the best value the controlling agent can already guarantee on
/// the current path, `beta` the best an adversary can. Once they cross, the
/// remaining siblings at that node are irrelevant.
pub struct AlphaBetaAgent<GameType, ScorableType>
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

impl<GameType, ScorableType> FrontierScorable<GameType> for AlphaBetaAgent<GameType, ScorableType>
where
    GameType: TerminalDeterminableGame + SimulableGame,
    ScorableType: Scorable<GameType>,
{
    fn score(&self, node: &GameType) -> f64 {
        self.score_function.score(node)
    }
}

impl<GameType, ScorableType> AlphaBetaAgent<GameType, ScorableType>
where
    GameType: TerminalDeterminableGame + SimulableGame + Clone + Debug,
    ScorableType: Scorable<GameType>,
{
    /// Construct a new `AlphaBetaAgent`.
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

    /// The minimax value of `node` within the `(alpha, beta)` window.
    ///
    /// Start a fresh search with `(f64::NEG_INFINITY, f64::INFINITY)`.
    pub fn value(
        &self,
        node: &GameType,
        depth: usize,
        agent: AgentIndex,
        alpha: f64,
        beta: f64,
    ) -> f64 {
        if node.is_terminal() {
            return self.score(node);
        }

        let agent = agent.normalized(node.agent_count());
        if let Some(score) = self.frontier_score(node, depth, agent, self.ply_budget) {
            return score;
        }

        if agent.is_controlling() {
            self.max_value(node, depth, agent, alpha, beta)
        } else {
            self.min_value(node, depth, agent, alpha, beta)
        }
    }

    fn max_value(
        &self,
        node: &GameType,
        depth: usize,
        agent: AgentIndex,
        mut alpha: f64,
        beta: f64,
    ) -> f64 {
        let actions = node.legal_actions(agent);
        assert!(
            !actions.is_empty(),
            "no legal actions for {} in a non-terminal state",
            agent
        );

        let mut best = f64::NEG_INFINITY;
        for action in actions {
            let value = self.value(
                &node.successor(agent, action),
                depth + 1,
                agent.next(),
                alpha,
                beta,
            );
            best = best.max(value);
            if best >= beta {
                return best;
            }
            alpha = alpha.max(best);
        }
        best
    }

    fn min_value(
        &self,
        node: &GameType,
        depth: usize,
        agent: AgentIndex,
        alpha: f64,
        mut beta: f64,
    ) -> f64 {
        let actions = node.legal_actions(agent);
        assert!(
            !actions.is_empty(),
            "no legal actions for {} in a non-terminal state",
            agent
        );

        let mut best = f64::INFINITY;
        for action in actions {
            let value = self.value(
                &node.successor(agent, action),
                depth,
                agent.next(),
                alpha,
                beta,
            );
            best = best.min(value);
            if best <= alpha {
                return best;
            }
            beta = beta.min(best);
        }
        best
    }

    /// Evaluate the root actions inside a widening alpha window and return
    /// the best action with its value.
    ///
    /// The best action is replaced only on a strictly greater value, so ties
    /// go to the first maximal action in the game's action order, exactly as
    /// in the unpruned engine. A pruned adversary node can only report a
    /// value that is at most the current alpha, which a strict comparison
    /// never prefers, so the chosen action matches
    /// [`MinimaxAgent::choose`](crate::MinimaxAgent::choose).
    ///
    /// Panics if the wrapped state is terminal.
    pub fn choose(&self) -> (Move, f64) {
        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;

        let root_actions = self.game.legal_actions(AgentIndex::CONTROLLING);
        assert!(
            !root_actions.is_empty(),
            "decision requested for a state with no legal actions"
        );

        let mut best: Option<(Move, f64)> = None;
        for action in root_actions {
            let successor = self.game.successor(AgentIndex::CONTROLLING, action);
            let value = self.value(
                &successor,
                0,
                AgentIndex::CONTROLLING.next(),
                alpha,
                beta,
            );

            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }

            let (_, best_value) = best.expect("just set");
            if best_value >= beta {
                break;
            }
            alpha = alpha.max(best_value);
        }

        best.expect("at least one root action was evaluated")
    }

    /// Pick the next move to make.
    pub fn decide(&self) -> Move {
        info_span!(
            "alpha_beta_decide",
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
            info!(%chosen, value, "alpha-beta finished");

            chosen
        })
    }
}
