// Per-agent plan cache over the goal search
//
// Each call hands out exactly one move. A plan is computed on the first call
// and again whenever the cached one has been fully consumed; the claim on the
// old goal is dropped right before replanning and the new goal is claimed
// right after.

use log::{debug, warn};
use std::fmt::Debug;
use std::hash::Hash;

use crate::claims::ClaimBoard;
use crate::game::SearchProblem;
use crate::goal_search::{GoalSearch, Path};
use crate::outcome::Outcome;

/// Caches one agent's route and claims its goal on a shared board
#[derive(Debug, Clone)]
pub struct PlanController<M, S> {
    plan: Option<Path<M, S>>,
    search: GoalSearch,
    fallback: GoalSearch,
    idle: M,
}

impl<M, S> PlanController<M, S>
where
    M: Clone + Debug,
    S: Clone + Eq + Hash + Debug,
{
    /// # Arguments
    /// * `search` - exclusion-aware search used while goals outnumber claims
    /// * `fallback` - search that ignores claims, used once they outnumber goals
    /// * `idle` - the no-op move returned when no route is available
    pub fn new(search: GoalSearch, fallback: GoalSearch, idle: M) -> Self {
        PlanController {
            plan: None,
            search,
            fallback,
            idle,
        }
    }

    /// The cached plan, if any
    pub fn plan(&self) -> Option<&Path<M, S>> {
        self.plan.as_ref()
    }

    /// Returns this turn's move
    ///
    /// # Arguments
    /// * `problem` - search problem rooted at the agent's current state
    /// * `remaining_goals` - goals left in the world, for the fallback rule
    /// * `claims` - the episode's shared claim board
    pub fn next_move<P>(&mut self, problem: &P, remaining_goals: usize, claims: &ClaimBoard<S>) -> M
    where
        P: SearchProblem<State = S, Move = M>,
    {
        if let Some(plan) = self.plan.as_mut() {
            if let Some(mv) = plan.actions.pop() {
                return mv;
            }
            claims.release(&plan.goal);
            debug!("Reached {:?}, replanning", plan.goal);
            self.plan = None;
        }

        match self.replan(problem, remaining_goals, claims) {
            Outcome::Found(mut path) => match path.actions.pop() {
                Some(mv) => {
                    claims.claim(path.goal.clone());
                    self.plan = Some(path);
                    mv
                }
                None => {
                    debug!("Already standing on goal {:?}", path.goal);
                    self.idle.clone()
                }
            },
            Outcome::NotFound => {
                debug!("No reachable goal this turn, idling");
                self.idle.clone()
            }
            Outcome::NotImplemented(name) => {
                warn!("Goal search '{}' is not implemented, idling", name);
                self.idle.clone()
            }
        }
    }

    /// Drops the cached plan and its claim (episode teardown)
    pub fn reset(&mut self, claims: &ClaimBoard<S>) {
        if let Some(plan) = self.plan.take() {
            claims.release(&plan.goal);
        }
    }

    fn replan<P>(
        &self,
        problem: &P,
        remaining_goals: usize,
        claims: &ClaimBoard<S>,
    ) -> Outcome<Path<M, S>>
    where
        P: SearchProblem<State = S, Move = M>,
    {
        let claimed = claims.snapshot();
        if remaining_goals < claimed.len() {
            debug!(
                "{} goals left for {} claims, using fallback search",
                remaining_goals,
                claimed.len()
            );
            self.fallback.search(problem, &Default::default())
        } else {
            self.search.search(problem, &claimed)
        }
    }
}
