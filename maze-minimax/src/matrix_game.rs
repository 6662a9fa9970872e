//! A tiny two-agent game for engine tests: the controlling agent picks a
//! row, the single adversary picks a column, and the game ends on the table
//! entry at that cell. Small enough to work tree values out by hand.

use maze_game_types::types::{
    ActionQueryableGame, AgentCountableGame, AgentIndex, Move, SimulableGame,
    TerminalDeterminableGame,
};

#[derive(Debug, Clone)]
pub(crate) struct MatrixGame {
    rows: Vec<(Move, Vec<(Move, f64)>)>,
    row: Option<usize>,
    col: Option<usize>,
}

impl MatrixGame {
    pub(crate) fn new(rows: Vec<(Move, Vec<(Move, f64)>)>) -> Self {
        Self {
            rows,
            row: None,
            col: None,
        }
    }

    /// The table entry once both agents have moved; 0 beforehand.
    pub(crate) fn payoff(&self) -> f64 {
        match (self.row, self.col) {
            (Some(row), Some(col)) => self.rows[row].1[col].1,
            _ => 0.0,
        }
    }

    /// `payoff` as a free function, for use as an evaluator.
    pub(crate) fn payoff_of(node: &MatrixGame) -> f64 {
        node.payoff()
    }
}

impl TerminalDeterminableGame for MatrixGame {
    fn is_terminal(&self) -> bool {
        self.row.is_some() && self.col.is_some()
    }
}

impl AgentCountableGame for MatrixGame {
    fn agent_count(&self) -> usize {
        2
    }
}

impl ActionQueryableGame for MatrixGame {
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Move> {
        match agent.0 {
            0 => self.rows.iter().map(|(m, _)| *m).collect(),
            1 => {
                let row = self
                    .row
                    .expect("the adversary moves after the controlling agent");
                self.rows[row].1.iter().map(|(m, _)| *m).collect()
            }
            _ => panic!("no such agent: {}", agent),
        }
    }
}

impl SimulableGame for MatrixGame {
    fn successor(&self, agent: AgentIndex, action: Move) -> Self {
        let mut next = self.clone();
        match agent.0 {
            0 => {
                let row = self
                    .rows
                    .iter()
                    .position(|(m, _)| *m == action)
                    .unwrap_or_else(|| panic!("{} is not a row of this game", action));
                next.row = Some(row);
            }
            1 => {
                let row = self
                    .row
                    .expect("the adversary moves after the controlling agent");
                let col = self.rows[row]
                    .1
                    .iter()
                    .position(|(m, _)| *m == action)
                    .unwrap_or_else(|| panic!("{} is not a column of this game", action));
                next.col = Some(col);
            }
            _ => panic!("no such agent: {}", agent),
        }
        next
    }
}
