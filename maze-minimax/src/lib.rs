#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Depth-limited adversarial search for the maze-chase game. You provide a
//! scoring function that turns a board into an `f64` and a ply budget; the
//! engines explore the game tree through the capability traits in
//! `maze-game-types` and hand back the best move for the controlling agent.
//!
//! Three engines share the same tree shape and depth semantics and differ
//! only in how they back values up:
//!
//! - [`MinimaxAgent`] assumes every adversary plays the move that is worst
//!   for you.
//! - [`AlphaBetaAgent`] is [`MinimaxAgent`] with alpha-beta pruning. It
//!   visits less of the tree and returns the identical move and value.
//! - [`ExpectimaxAgent`] models each adversary as picking uniformly at
//!   random among its legal moves and averages instead of minimizing.
//!
//! One ply is one full round: the controlling agent and then every
//! adversary. Depth only increases when the controlling agent moves.
//!
//! ```rust
//! use maze_game_types::{types::Move, wire_representation::MazeGame};
//! use maze_minimax::AlphaBetaAgent;
//!
//! // A small board; this fixture matches what the wire representation
//! // deserializes from.
//! let fixture = include_str!("../../maze-agents/fixtures/crossroads.json");
//! let game: MazeGame = serde_json::from_str(fixture).unwrap();
//!
//! // The scoring function decides which frontier states look better than
//! // others. Here it is just the running score.
//! fn score_function(board: &MazeGame) -> f64 {
//!     board.score as f64
//! }
//!
//! let agent = AlphaBetaAgent::new(game, score_function, 2, "docs");
//! let chosen = agent.decide();
//! assert!(Move::all().contains(&chosen));
//! ```

mod score;
pub use score::{FrontierScorable, Scorable};

mod minimax;
pub use minimax::MinimaxAgent;

mod alpha_beta;
pub use alpha_beta::AlphaBetaAgent;

mod expectimax;
pub use expectimax::ExpectimaxAgent;

#[cfg(test)]
pub(crate) mod matrix_game;
