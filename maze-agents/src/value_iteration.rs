//! Value iteration over a fully known Markov Decision Process.
//!
//! A companion planner to the tree-search engines, solving a different
//! problem: given the complete transition and reward model up front, compute
//! an optimal stationary policy by running synchronous full-sweep Bellman
//! updates to a fixed iteration count. It is a batch computation with no
//! interaction with the adversarial search; nothing here touches the game
//! traits.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

/// A fully enumerable MDP.
///
/// States with no available actions are terminal; their value is 0 and they
/// have no policy.
pub trait MarkovDecisionProcess {
    /// State identifier. Cheap to clone; used as a map key.
    type State: Clone + Eq + Hash + Debug;
    /// Action identifier.
    type Action: Clone + PartialEq + Debug;

    /// Every state of the process.
    fn states(&self) -> Vec<Self::State>;

    /// The actions available in `state`, in a deterministic order. Empty at
    /// terminal states.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The `(next_state, probability)` pairs for taking `action` in
    /// `state`. Probabilities sum to 1 for a legal pair.
    fn transitions(&self, state: &Self::State, action: &Self::Action)
        -> Vec<(Self::State, f64)>;

    /// The reward for landing in `next` after taking `action` in `state`.
    fn reward(&self, state: &Self::State, action: &Self::Action, next: &Self::State) -> f64;
}

/// Runs value iteration at construction and answers value and policy
/// queries afterwards.
///
/// Each sweep computes every state's new value from the *previous* sweep's
/// table (synchronous updates): states updated earlier in a sweep never leak
/// into later ones.
#[derive(Debug, Clone)]
pub struct ValueIterationSolver<M: MarkovDecisionProcess> {
    mdp: M,
    discount: f64,
    values: HashMap<M::State, f64>,
}

impl<M: MarkovDecisionProcess> ValueIterationSolver<M> {
    /// Run `iterations` full sweeps over `mdp` with the given discount
    /// factor.
    pub fn new(mdp: M, discount: f64, iterations: usize) -> Self {
        let mut solver = Self {
            mdp,
            discount,
            values: HashMap::new(),
        };

        for sweep in 0..iterations {
            let mut new_values = solver.values.clone();
            for state in solver.mdp.states() {
                let best = solver
                    .mdp
                    .actions(&state)
                    .iter()
                    .map(|action| solver.q_value(&state, action))
                    .fold(None, |best: Option<f64>, q| match best {
                        Some(b) if b >= q => Some(b),
                        _ => Some(q),
                    });
                new_values.insert(state, best.unwrap_or(0.0));
            }
            solver.values = new_values;
            debug!(sweep, "completed value iteration sweep");
        }

        solver
    }

    /// V(state) after the configured number of sweeps. States never swept
    /// (or terminal) are worth 0.
    pub fn value_of(&self, state: &M::State) -> f64 {
        self.values.get(state).copied().unwrap_or(0.0)
    }

    /// Q(state, action), derived on the fly from the current value table.
    pub fn q_value(&self, state: &M::State, action: &M::Action) -> f64 {
        self.mdp
            .transitions(state, action)
            .into_iter()
            .map(|(next, probability)| {
                probability
                    * (self.mdp.reward(state, action, &next)
                        + self.discount * self.value_of(&next))
            })
            .sum()
    }

    /// The best action in `state` by Q-value, or `None` at terminal states.
    /// Ties go to the first maximal action in the MDP's action order.
    pub fn policy_of(&self, state: &M::State) -> Option<M::Action> {
        let mut best: Option<(M::Action, f64)> = None;
        for action in self.mdp.actions(state) {
            let q = self.q_value(state, &action);
            match &best {
                Some((_, best_q)) if q <= *best_q => {}
                _ => best = Some((action, q)),
            }
        }
        best.map(|(action, _)| action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 -go-> 1 -go-> 2, with the only reward on the 1 -> 2 step. State 2
    // is terminal. States are deliberately listed worst-first so an
    // in-place (non-synchronous) sweep would be caught below.
    struct Chain;

    impl MarkovDecisionProcess for Chain {
        type State = u8;
        type Action = &'static str;

        fn states(&self) -> Vec<u8> {
            vec![1, 0, 2]
        }

        fn actions(&self, state: &u8) -> Vec<&'static str> {
            match state {
                0 | 1 => vec!["go"],
                _ => vec![],
            }
        }

        fn transitions(&self, state: &u8, _action: &&'static str) -> Vec<(u8, f64)> {
            vec![(state + 1, 1.0)]
        }

        fn reward(&self, state: &u8, _action: &&'static str, _next: &u8) -> f64 {
            if *state == 1 {
                10.0
            } else {
                0.0
            }
        }
    }

    // One decision: a fair 10-or-nothing gamble against a certain 4.
    struct Casino;

    impl MarkovDecisionProcess for Casino {
        type State = &'static str;
        type Action = &'static str;

        fn states(&self) -> Vec<&'static str> {
            vec!["start", "won", "lost"]
        }

        fn actions(&self, state: &&'static str) -> Vec<&'static str> {
            if *state == "start" {
                vec!["safe", "gamble"]
            } else {
                vec![]
            }
        }

        fn transitions(
            &self,
            _state: &&'static str,
            action: &&'static str,
        ) -> Vec<(&'static str, f64)> {
            match *action {
                "gamble" => vec![("won", 0.5), ("lost", 0.5)],
                _ => vec![("lost", 1.0)],
            }
        }

        fn reward(&self, _state: &&'static str, action: &&'static str, next: &&'static str) -> f64 {
            match (*action, *next) {
                ("gamble", "won") => 10.0,
                ("safe", _) => 4.0,
                _ => 0.0,
            }
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn values_converge_on_the_chain() {
        let solver = ValueIterationSolver::new(Chain, 0.9, 50);

        assert_eq!(solver.value_of(&2), 0.0);
        assert!(close(solver.value_of(&1), 10.0));
        assert!(close(solver.value_of(&0), 9.0));
    }

    #[test]
    fn sweeps_are_synchronous() {
        // After exactly one sweep, state 0 must still see state 1's initial
        // value of 0 even though 1 was updated earlier in the same sweep.
        let solver = ValueIterationSolver::new(Chain, 0.9, 1);

        assert!(close(solver.value_of(&1), 10.0));
        assert_eq!(solver.value_of(&0), 0.0);
    }

    #[test]
    fn zero_iterations_leaves_everything_at_zero() {
        let solver = ValueIterationSolver::new(Chain, 0.9, 0);
        assert_eq!(solver.value_of(&0), 0.0);
        assert_eq!(solver.value_of(&1), 0.0);
    }

    #[test]
    fn policy_prefers_the_higher_expected_value() {
        let solver = ValueIterationSolver::new(Casino, 0.9, 10);

        assert!(close(solver.q_value(&"start", &"gamble"), 5.0));
        assert!(close(solver.q_value(&"start", &"safe"), 4.0));
        assert_eq!(solver.policy_of(&"start"), Some("gamble"));
        assert!(close(solver.value_of(&"start"), 5.0));
    }

    #[test]
    fn terminal_states_have_no_policy() {
        let solver = ValueIterationSolver::new(Casino, 0.9, 10);
        assert_eq!(solver.policy_of(&"won"), None);
    }
}
