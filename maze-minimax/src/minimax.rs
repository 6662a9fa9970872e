use std::fmt::Debug;

use derivative::Derivative;
use itertools::Itertools;
use tracing::{info, info_span};

use maze_game_types::types::{AgentIndex, Move, SimulableGame, TerminalDeterminableGame};

use crate::score::{FrontierScorable, Scorable};

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// The plain depth-limited minimax engine.
///
/// Wraps the state the next decision is for, an injected scoring function
/// and a ply budget. Every adversary is assumed to pick the move that
/// minimizes the controlling agent's backed-up score.
pub struct MinimaxAgent<GameType, ScorableType>
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

impl<GameType, ScorableType> FrontierScorable<GameType> for MinimaxAgent<GameType, ScorableType>
where
    GameType: TerminalDeterminableGame + SimulableGame,
    ScorableType: Scorable<GameType>,
{
    fn score(&self, node: &GameType) -> f64 {
        self.score_function.score(node)
    }
}

impl<GameType, ScorableType> MinimaxAgent<GameType, ScorableType>
where
    GameType: TerminalDeterminableGame + SimulableGame + Clone + Debug,
    ScorableType: Scorable<GameType>,
{
    /// Construct a new `MinimaxAgent`.
    ///
    /// Panics if `ply_budget` is 0: a budget of zero degenerates into
    /// scoring root successors directly and is never what a caller wants.
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

    /// The minimax value of `node` with `agent` to move and `depth` plies
    /// already consumed.
    ///
    /// Panics if a non-terminal node has no legal actions for the agent to
    /// move; that means the game model and its terminal test disagree.
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
            actions
                .into_iter()
                .map(|action| self.value(&node.successor(agent, action), depth, agent.next()))
                .fold(f64::INFINITY, f64::min)
        }
    }

    /// Evaluate every legal root action and return the best one together
    /// with its minimax value. Ties go to the first maximal action in the
    /// game's action order.
    ///
    /// Panics if the wrapped state is terminal; screening the root is the
    /// caller's job.
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
            "minimax_decide",
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
            info!(%chosen, value, "minimax finished");

            chosen
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix_game::MatrixGame;
    use std::cell::Cell;

    #[test]
    fn adversary_gets_the_minimum() {
        // Row 'north' can be punished down to 1; row 'south' guarantees 3.
        let game = MatrixGame::new(vec![
            (Move::North, vec![(Move::East, 9.0), (Move::West, 1.0)]),
            (Move::South, vec![(Move::East, 3.0), (Move::West, 4.0)]),
        ]);

        let agent = MinimaxAgent::new(game, MatrixGame::payoff_of, 1, "minimax");
        assert_eq!(agent.choose(), (Move::South, 3.0));
    }

    #[test]
    fn ties_go_to_the_first_action() {
        let game = MatrixGame::new(vec![
            (Move::North, vec![(Move::East, 5.0), (Move::West, 7.0)]),
            (Move::South, vec![(Move::East, 8.0), (Move::West, 5.0)]),
        ]);

        let agent = MinimaxAgent::new(game, MatrixGame::payoff_of, 1, "minimax");
        assert_eq!(agent.choose(), (Move::North, 5.0));
    }

    #[test]
    fn terminal_states_are_scored_immediately() {
        let game = MatrixGame::new(vec![(
            Move::North,
            vec![(Move::East, 2.0), (Move::West, 6.0)],
        )]);
        let finished = game
            .successor(AgentIndex::CONTROLLING, Move::North)
            .successor(AgentIndex(1), Move::West);

        let evals = Cell::new(0_u32);
        let count_scores = |node: &MatrixGame| {
            evals.set(evals.get() + 1);
            node.payoff()
        };
        let agent = MinimaxAgent::new(finished.clone(), &count_scores, 4, "minimax");

        assert_eq!(agent.value(&finished, 0, AgentIndex::CONTROLLING), 6.0);
        assert_eq!(evals.get(), 1);
    }

    #[test]
    fn depth_is_respected() {
        // Budget 1 on a two-agent game: exactly one full round gets
        // explored, so every cell of the table is scored exactly once.
        let game = MatrixGame::new(vec![
            (Move::North, vec![(Move::East, 9.0), (Move::West, 1.0)]),
            (Move::South, vec![(Move::East, 3.0), (Move::West, 4.0)]),
        ]);

        let evals = Cell::new(0_u32);
        let count_scores = |node: &MatrixGame| {
            evals.set(evals.get() + 1);
            node.payoff()
        };
        let agent = MinimaxAgent::new(game, &count_scores, 1, "minimax");

        agent.choose();
        assert_eq!(evals.get(), 4);
    }

    #[test]
    #[should_panic(expected = "at least 1")]
    fn zero_ply_budget_is_rejected() {
        let game = MatrixGame::new(vec![(Move::North, vec![(Move::East, 1.0)])]);
        let _ = MinimaxAgent::new(game, MatrixGame::payoff_of, 0, "minimax");
    }

    #[test]
    fn repeated_decisions_agree() {
        let game = MatrixGame::new(vec![
            (Move::North, vec![(Move::East, 2.0), (Move::West, 8.0)]),
            (Move::South, vec![(Move::East, 6.0), (Move::West, 3.0)]),
        ]);
        let agent = MinimaxAgent::new(game, MatrixGame::payoff_of, 1, "minimax");

        let first = agent.decide();
        for _ in 0..5 {
            assert_eq!(agent.decide(), first);
        }
    }
}
