// Harness boundary
//
// The game itself (state representation, move legality, scoring) lives in the
// course harness. These traits are the narrow surface the agents call through.

use std::fmt::Debug;
use std::hash::Hash;

use crate::types::{AgentId, Coord};

/// A world snapshot owned by the harness
///
/// The agents never mutate a state; they only fork it through `successor`.
pub trait GameState: Sized {
    type Move: Clone + Debug;

    /// Legal moves for `agent`, in the order the harness provides them
    fn legal_moves(&self, agent: AgentId) -> Vec<Self::Move>;

    /// The state after `agent` plays `mv`
    fn successor(&self, agent: AgentId, mv: &Self::Move) -> Self;

    /// True once the game is won or lost
    fn is_terminal(&self) -> bool;

    /// Baseline evaluation shown by the harness
    fn score(&self) -> f64;

    fn num_agents(&self) -> usize;
}

/// A single-agent search problem over an implicit state graph
pub trait SearchProblem {
    type State: Clone + Eq + Hash + Debug;
    type Move: Clone + Debug;

    fn start_state(&self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Successor triples `(state, move, step cost)`
    fn successors(&self, state: &Self::State) -> Vec<(Self::State, Self::Move, u32)>;
}

/// Read-only grid queries used to phrase food search as a `SearchProblem`
pub trait MazeView {
    fn is_wall(&self, coord: Coord) -> bool;

    fn has_food(&self, coord: Coord) -> bool;

    fn food_count(&self) -> usize;

    /// Current position of `agent`, `None` when it is not observable
    fn agent_position(&self, agent: AgentId) -> Option<Coord>;
}
