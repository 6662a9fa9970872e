//! Ready-made agents for the maze-chase game: the evaluation functions, the
//! search engines from `maze-minimax` wired to them, and the value-iteration
//! companion planner.

use maze_game_types::wire_representation::MazeGame;
use maze_minimax::{AlphaBetaAgent, ExpectimaxAgent, MinimaxAgent};

pub mod evaluation;
pub mod value_iteration;

use evaluation::masterful_evaluation;

/// The evaluator signature the stock agents use.
pub type Evaluation = fn(&MazeGame) -> f64;

/// A minimax agent over [`masterful_evaluation`].
pub fn minimax_agent(game: MazeGame, ply_budget: usize) -> MinimaxAgent<MazeGame, Evaluation> {
    MinimaxAgent::new(
        game,
        masterful_evaluation as Evaluation,
        ply_budget,
        "maze-minimax",
    )
}

/// An alpha-beta agent over [`masterful_evaluation`]. Same decisions as
/// [`minimax_agent`], less work.
pub fn alpha_beta_agent(game: MazeGame, ply_budget: usize) -> AlphaBetaAgent<MazeGame, Evaluation> {
    AlphaBetaAgent::new(
        game,
        masterful_evaluation as Evaluation,
        ply_budget,
        "maze-alpha-beta",
    )
}

/// An expectimax agent over [`masterful_evaluation`], for opponents that
/// blunder rather than conspire.
pub fn expectimax_agent(
    game: MazeGame,
    ply_budget: usize,
) -> ExpectimaxAgent<MazeGame, Evaluation> {
    ExpectimaxAgent::new(
        game,
        masterful_evaluation as Evaluation,
        ply_budget,
        "maze-expectimax",
    )
}
