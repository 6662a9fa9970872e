//! Evaluation functions over concrete maze boards.
//!
//! These only ever see a single state. They know nothing about search depth
//! or whose turn it is; the engines call them at the frontier and compare
//! the numbers.

use maze_game_types::wire_representation::MazeGame;

/// The game score itself. The baseline evaluation for adversarial search:
/// an engine maximizing this plays to win, it just cannot tell two states
/// with equal score apart.
pub fn score_evaluation(state: &MazeGame) -> f64 {
    state.score as f64
}

/// Score plus positional judgment.
///
/// On top of the raw score this rewards standing near uncollected pellets
/// (`10 / nearest distance`) and fears chasers quadratically: an active
/// chaser at distance `d` costs `10 / d²` (collision: 100), which near a
/// threat dwarfs any pellet reward; a frightened one costs only `5 / d²`
/// (collision: 10), small enough that the eat bonus already sitting in the
/// score wins out.
///
/// Total on every reachable state: collisions are handled before any
/// division, and an empty pellet list falls back to a huge distance rather
/// than none at all.
pub fn masterful_evaluation(state: &MazeGame) -> f64 {
    let mut score = state.score as f64;

    for chaser in &state.chasers {
        let distance = state.player.manhattan_distance(&chaser.position) as f64;
        if chaser.frightened > 0 {
            if distance > 0.0 {
                score -= 5.0 / (distance * distance);
            } else {
                score -= 10.0;
            }
        } else if distance > 0.0 {
            score -= 10.0 / (distance * distance);
        } else {
            score -= 100.0;
        }
    }

    let nearest_pellet = state
        .pellets
        .iter()
        .map(|pellet| state.player.manhattan_distance(pellet) as f64)
        .fold(1_000_000.0_f64, f64::min)
        .max(1.0);

    score + 10.0 / nearest_pellet
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_game_types::wire_representation::{Chaser, Position};

    fn open_board() -> MazeGame {
        MazeGame {
            width: 9,
            height: 9,
            walls: vec![],
            player: Position { x: 4, y: 4 },
            chasers: vec![Chaser {
                position: Position { x: 8, y: 8 },
                spawn: Position { x: 8, y: 8 },
                frightened: 0,
            }],
            pellets: vec![Position { x: 6, y: 4 }],
            power_pellets: vec![],
            score: 0,
            won: false,
            lost: false,
        }
    }

    #[test]
    fn closer_pellets_score_higher() {
        let far = open_board();
        let mut near = open_board();
        near.pellets = vec![Position { x: 5, y: 4 }];

        assert!(masterful_evaluation(&near) > masterful_evaluation(&far));
    }

    #[test]
    fn a_nearby_active_chaser_dominates_pellet_pull() {
        // Pellet one step east, active chaser right behind it.
        let mut threatened = open_board();
        threatened.pellets = vec![Position { x: 5, y: 4 }];
        threatened.chasers[0].position = Position { x: 5, y: 4 };

        let safe = open_board();
        assert!(masterful_evaluation(&safe) > masterful_evaluation(&threatened));
    }

    #[test]
    fn frightened_chasers_are_less_scary_than_active_ones() {
        let mut active = open_board();
        active.chasers[0].position = Position { x: 5, y: 4 };

        let mut frightened = active.clone();
        frightened.chasers[0].frightened = 20;

        assert!(masterful_evaluation(&frightened) > masterful_evaluation(&active));
    }

    #[test]
    fn no_pellets_left_is_still_scored() {
        let mut cleared = open_board();
        cleared.pellets = vec![];
        cleared.won = true;
        cleared.score = 500;

        let value = masterful_evaluation(&cleared);
        assert!(value.is_finite());
        assert!(value > 400.0);
    }

    #[test]
    fn score_evaluation_is_just_the_score() {
        let mut board = open_board();
        board.score = -37;
        assert_eq!(score_evaluation(&board), -37.0);
    }
}
