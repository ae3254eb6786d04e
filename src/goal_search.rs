// Breadth-first goal search with claimed-goal exclusion and an expansion budget

use log::debug;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::game::SearchProblem;
use crate::outcome::Outcome;

/// Expansion budget for the exclusion-aware search
pub const DEFAULT_EXPANSION_BUDGET: usize = 601;

/// Expansion budget for the fallback search that ignores claims
pub const DEFAULT_FALLBACK_BUDGET: usize = 18;

/// Route to a goal
#[derive(Debug, Clone, PartialEq)]
pub struct Path<M, S> {
    /// Moves in goal-to-start order; consume with `pop()`
    pub actions: Vec<M>,
    pub goal: S,
}

/// Budgeted breadth-first search to the nearest unexcluded goal
#[derive(Debug, Clone, Copy)]
pub struct GoalSearch {
    budget: usize,
}

impl GoalSearch {
    pub fn new(budget: usize) -> Self {
        GoalSearch { budget }
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Finds a shortest path (by edge count) to the nearest goal outside `excluded`
    ///
    /// A state enters the frontier at most once. The expansion counter is
    /// bumped on every dequeue and the search gives up once it exceeds the
    /// budget, so latency is bounded on large mazes.
    ///
    /// # Returns
    /// * `Outcome::Found(path)` - moves in goal-to-start order and the goal reached
    /// * `Outcome::NotFound` - no unexcluded goal within budget
    pub fn search<P: SearchProblem>(
        &self,
        problem: &P,
        excluded: &HashSet<P::State>,
    ) -> Outcome<Path<P::Move, P::State>> {
        let start = problem.start_state();

        let mut frontier = VecDeque::new();
        let mut seen: HashSet<P::State> = HashSet::new();
        let mut came_from: HashMap<P::State, (P::State, P::Move)> = HashMap::new();

        seen.insert(start.clone());
        frontier.push_back(start);

        let mut expanded = 0usize;
        let mut goal = None;

        while let Some(state) = frontier.pop_front() {
            expanded += 1;

            if problem.is_goal(&state) && !excluded.contains(&state) {
                goal = Some(state);
                break;
            }

            for (next, step, _cost) in problem.successors(&state) {
                if seen.insert(next.clone()) {
                    came_from.insert(next.clone(), (state.clone(), step));
                    frontier.push_back(next);
                }
            }

            if expanded > self.budget {
                debug!(
                    "Goal search gave up after {} expansions (budget {})",
                    expanded, self.budget
                );
                return Outcome::NotFound;
            }
        }

        let goal = match goal {
            Some(goal) => goal,
            None => {
                debug!("Goal search exhausted {} states without a free goal", expanded);
                return Outcome::NotFound;
            }
        };

        let mut actions = Vec::new();
        let mut current = &goal;
        while let Some((previous, step)) = came_from.get(current) {
            actions.push(step.clone());
            current = previous;
        }

        debug!(
            "Goal search reached {:?} in {} moves ({} expansions)",
            goal,
            actions.len(),
            expanded
        );

        Outcome::Found(Path { actions, goal })
    }
}

impl Default for GoalSearch {
    fn default() -> Self {
        GoalSearch::new(DEFAULT_EXPANSION_BUDGET)
    }
}
