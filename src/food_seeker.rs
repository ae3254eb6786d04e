// Cooperative food collection
//
// Several Pacmen share one maze. Each runs its own plan controller and they
// coordinate only through the claim board, so two agents rarely chase the
// same pellet.

use log::info;

use crate::claims::ClaimBoard;
use crate::config::{Config, GoalSearchConfig};
use crate::debug_logger::DecisionLog;
use crate::game::{MazeView, SearchProblem};
use crate::goal_search::GoalSearch;
use crate::planner::PlanController;
use crate::types::{AgentId, Coord, Direction};

/// Reach any cell holding food, moving through non-wall cells
pub struct AnyFoodProblem<'a, V> {
    view: &'a V,
    start: Coord,
}

impl<'a, V: MazeView> AnyFoodProblem<'a, V> {
    /// Returns `None` when the agent's position is not observable
    pub fn new(view: &'a V, agent: AgentId) -> Option<Self> {
        let start = view.agent_position(agent)?;
        Some(AnyFoodProblem { view, start })
    }

    pub fn from_position(view: &'a V, start: Coord) -> Self {
        AnyFoodProblem { view, start }
    }
}

impl<'a, V: MazeView> SearchProblem for AnyFoodProblem<'a, V> {
    type State = Coord;
    type Move = Direction;

    fn start_state(&self) -> Coord {
        self.start
    }

    fn is_goal(&self, state: &Coord) -> bool {
        self.view.has_food(*state)
    }

    fn successors(&self, state: &Coord) -> Vec<(Coord, Direction, u32)> {
        Direction::all()
            .iter()
            .map(|dir| (dir.apply(state), *dir))
            .filter(|(next, _)| !self.view.is_wall(*next))
            .map(|(next, dir)| (next, dir, 1))
            .collect()
    }
}

/// One Pacman of a cooperating food-collecting team
#[derive(Debug, Clone)]
pub struct FoodSeekingAgent {
    index: AgentId,
    planner: PlanController<Direction, Coord>,
    log: DecisionLog,
}

impl FoodSeekingAgent {
    pub fn new(index: AgentId, config: &GoalSearchConfig) -> Self {
        FoodSeekingAgent {
            index,
            planner: PlanController::new(
                GoalSearch::new(config.expansion_budget),
                GoalSearch::new(config.fallback_budget),
                Direction::Stop,
            ),
            log: DecisionLog::disabled(),
        }
    }

    pub fn with_decision_log(mut self, log: DecisionLog) -> Self {
        self.log = log;
        self
    }

    pub fn index(&self) -> AgentId {
        self.index
    }

    /// Remaining moves of the current plan, next move last
    pub fn remaining_plan(&self) -> Option<&[Direction]> {
        self.planner.plan().map(|plan| plan.actions.as_slice())
    }

    pub fn current_goal(&self) -> Option<Coord> {
        self.planner.plan().map(|plan| plan.goal)
    }

    /// Chooses this turn's move; `Stop` when there is nowhere to go
    pub fn get_action<V: MazeView>(&mut self, state: &V, claims: &ClaimBoard<Coord>) -> Direction {
        let problem = match AnyFoodProblem::new(state, self.index) {
            Some(problem) => problem,
            None => return Direction::Stop,
        };

        let action = self
            .planner
            .next_move(&problem, state.food_count(), claims);

        info!(
            "Agent {}: {} (goal {:?}, {} claims)",
            self.index,
            action.as_str(),
            self.current_goal(),
            claims.len()
        );
        self.log
            .record(self.index, "food_seeker", action.as_str(), None, None);
        action
    }

    /// Releases any claim this agent still holds
    pub fn end_episode(&mut self, claims: &ClaimBoard<Coord>) {
        self.planner.reset(claims);
    }
}

/// Builds one agent per Pacman index, all sharing the same budgets and
/// decision trace
pub fn create_agents(num_pacmen: usize, config: &Config) -> Vec<FoodSeekingAgent> {
    let log = config.decision_log();
    (0..num_pacmen)
        .map(|index| {
            FoodSeekingAgent::new(index, &config.goal_search).with_decision_log(log.clone())
        })
        .collect()
}
