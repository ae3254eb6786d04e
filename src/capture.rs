// Capture-the-flag team
//
// Both team members run the same depth-limited alpha-beta search over
// `[self, opponents...]`; they differ only in the linear evaluation they
// plug in. The offense raids enemy food and brings it home, the defense
// guards its own food and chases invaders.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::adversarial::{AdversarialSearch, SearchMode, TieBreak};
use crate::config::{CaptureConfig, Config};
use crate::debug_logger::DecisionLog;
use crate::evaluation::{inverse_distance, FeatureExtractor, Features, LinearEvaluator, Weights};
use crate::game::GameState;
use crate::types::{AgentId, Coord, Direction};

/// Board queries the capture agents need
pub trait CaptureView {
    /// `None` when the agent is out of sight
    fn agent_position(&self, agent: AgentId) -> Option<Coord>;

    /// Shortest walking distance through the maze
    fn maze_distance(&self, from: Coord, to: Coord) -> u32;

    /// Enemy food `agent` can eat
    fn food_to_eat(&self, agent: AgentId) -> Vec<Coord>;

    /// Food on `agent`'s own side
    fn food_to_defend(&self, agent: AgentId) -> Vec<Coord>;

    fn capsules_to_eat(&self, agent: AgentId) -> Vec<Coord>;

    fn capsules_to_defend(&self, agent: AgentId) -> Vec<Coord>;

    fn opponents(&self, agent: AgentId) -> Vec<AgentId>;

    /// True while `agent` is on the enemy side
    fn is_pacman(&self, agent: AgentId) -> bool;

    fn scared_timer(&self, agent: AgentId) -> u32;

    /// Food `agent` is carrying back home
    fn carrying(&self, agent: AgentId) -> u32;

    /// Score from `agent`'s team perspective
    fn team_score(&self, agent: AgentId) -> f64;
}

fn nearest<S: CaptureView>(view: &S, from: Coord, targets: &[Coord]) -> Option<u32> {
    targets.iter().map(|to| view.maze_distance(from, *to)).min()
}

/// Raiding features
#[derive(Debug, Clone)]
pub struct OffenseFeatures {
    agent: AgentId,
    home: Coord,
    no_ghost_distance: f64,
    food_contact_bonus: f64,
    scared_ghost_contact_bonus: f64,
    capsule_contact_bonus: f64,
    trap_move_threshold: usize,
    trap_ghost_distance: u32,
    weights: Weights,
}

impl OffenseFeatures {
    pub fn new(agent: AgentId, home: Coord, config: &CaptureConfig) -> Self {
        OffenseFeatures {
            agent,
            home,
            no_ghost_distance: config.no_ghost_distance,
            food_contact_bonus: config.food_contact_bonus,
            scared_ghost_contact_bonus: config.scared_ghost_contact_bonus,
            capsule_contact_bonus: config.offense_capsule_contact_bonus,
            trap_move_threshold: config.trap_move_threshold,
            trap_ghost_distance: config.trap_ghost_distance,
            weights: config.offense_weights.clone(),
        }
    }
}

impl<S> FeatureExtractor<S> for OffenseFeatures
where
    S: GameState + CaptureView,
{
    fn features(&self, state: &S) -> Features {
        let mut features = Features::new();

        let food = state.food_to_eat(self.agent);
        let capsules = state.capsules_to_eat(self.agent);
        features.set("food_count", -(food.len() as f64));
        features.set("capsule_count", -(capsules.len() as f64));
        features.set("score", state.team_score(self.agent));

        let position = match state.agent_position(self.agent) {
            Some(position) => position,
            None => return features,
        };

        if let Some(distance) = nearest(state, position, &food) {
            features.set(
                "inv_food_distance",
                inverse_distance(distance, self.food_contact_bonus),
            );
        }

        let (scared, active): (Vec<AgentId>, Vec<AgentId>) = state
            .opponents(self.agent)
            .into_iter()
            .filter(|&enemy| !state.is_pacman(enemy))
            .filter(|&enemy| state.agent_position(enemy).is_some())
            .partition(|&enemy| state.scared_timer(enemy) > 0);
        let positions_of = |agents: &[AgentId]| -> Vec<Coord> {
            agents
                .iter()
                .filter_map(|&agent| state.agent_position(agent))
                .collect()
        };

        features.set("scared_ghost_count", -(scared.len() as f64));

        let ghost_distance = nearest(state, position, &positions_of(&active));
        features.set(
            "ghost_distance",
            ghost_distance.map_or(self.no_ghost_distance, |d| d as f64),
        );

        if let Some(distance) = nearest(state, position, &positions_of(&scared)) {
            features.set(
                "inv_scared_ghost_distance",
                inverse_distance(distance, self.scared_ghost_contact_bonus),
            );
        }

        let carrying = state.carrying(self.agent);
        if carrying > 0 {
            let distance = state.maze_distance(position, self.home);
            if distance > 0 {
                features.set("inv_home_distance", carrying as f64 / distance as f64);
            }
        }

        if let Some(distance) = nearest(state, position, &capsules) {
            features.set(
                "inv_capsule_distance",
                inverse_distance(distance, self.capsule_contact_bonus),
            );
        }

        let cornered = state.legal_moves(self.agent).len() <= self.trap_move_threshold;
        let hunted = ghost_distance.is_some_and(|d| d < self.trap_ghost_distance);
        if cornered && hunted {
            features.set("trapped", -1.0);
        }

        features
    }

    fn weights(&self, _state: &S) -> &Weights {
        &self.weights
    }
}

/// Guarding features
#[derive(Debug, Clone)]
pub struct DefenseFeatures {
    agent: AgentId,
    no_invader_score: f64,
    invader_contact_bonus: f64,
    capsule_contact_bonus: f64,
    weights: Weights,
}

impl DefenseFeatures {
    pub fn new(agent: AgentId, config: &CaptureConfig) -> Self {
        DefenseFeatures {
            agent,
            no_invader_score: config.no_invader_score,
            invader_contact_bonus: config.invader_contact_bonus,
            capsule_contact_bonus: config.defense_capsule_contact_bonus,
            weights: config.defense_weights.clone(),
        }
    }
}

impl<S> FeatureExtractor<S> for DefenseFeatures
where
    S: GameState + CaptureView,
{
    fn features(&self, state: &S) -> Features {
        let mut features = Features::new();

        let food = state.food_to_defend(self.agent);
        features.set("score", state.team_score(self.agent));
        features.set("food_count", food.len() as f64);

        let position = match state.agent_position(self.agent) {
            Some(position) => position,
            None => return features,
        };

        let invaders: Vec<Coord> = state
            .opponents(self.agent)
            .into_iter()
            .filter(|&enemy| state.is_pacman(enemy))
            .filter_map(|enemy| state.agent_position(enemy))
            .collect();

        match nearest(state, position, &invaders) {
            Some(distance) => {
                features.set(
                    "inv_invader_distance",
                    inverse_distance(distance, self.invader_contact_bonus),
                );
                features.set("invader_count", -(invaders.len() as f64));
            }
            None => features.set("inv_invader_distance", self.no_invader_score),
        }

        let capsules = state.capsules_to_defend(self.agent);
        if let Some(distance) = nearest(state, position, &capsules) {
            features.set(
                "inv_capsule_distance",
                inverse_distance(distance, self.capsule_contact_bonus),
            );
        }

        features
    }

    fn weights(&self, _state: &S) -> &Weights {
        &self.weights
    }
}

/// One member of a capture team
#[derive(Debug)]
pub struct CaptureTeamAgent<F> {
    index: AgentId,
    start: Coord,
    search: AdversarialSearch,
    evaluator: LinearEvaluator<F>,
    endgame_food_threshold: usize,
    rng: StdRng,
    log: DecisionLog,
}

impl<F> CaptureTeamAgent<F> {
    /// # Arguments
    /// * `index` - this agent's index in the game
    /// * `start` - spawn position, also where carried food is cashed in
    /// * `features` - role-specific scoring
    pub fn new(index: AgentId, start: Coord, features: F, config: &CaptureConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => StdRng::from_os_rng(),
        };

        CaptureTeamAgent {
            index,
            start,
            search: AdversarialSearch::new(config.depth_limit, SearchMode::AlphaBeta)
                .with_tie_break(TieBreak::Random),
            evaluator: LinearEvaluator::new(features),
            endgame_food_threshold: config.endgame_food_threshold,
            rng,
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

    pub fn features(&self) -> &F {
        self.evaluator.extractor()
    }

    /// Chooses this turn's move; `Stop` if no legal move exists
    pub fn choose_action<S>(&mut self, state: &S) -> Direction
    where
        S: GameState<Move = Direction> + CaptureView,
        F: FeatureExtractor<S>,
    {
        let legal_moves = state.legal_moves(self.index);
        if legal_moves.is_empty() {
            return Direction::Stop;
        }

        let food_left = state.food_to_eat(self.index).len();
        if food_left <= self.endgame_food_threshold {
            let action = self.head_home(state, &legal_moves);
            debug!(
                "Agent {}: {} food left, heading home via {}",
                self.index,
                food_left,
                action.as_str()
            );
            self.log.record(self.index, "capture_home", action.as_str(), None, None);
            return action;
        }

        let mut order = vec![self.index];
        order.extend(state.opponents(self.index));

        match self
            .search
            .decide(state, &order, &self.evaluator, &mut self.rng)
        {
            Some(decision) => {
                info!(
                    "Agent {}: {} (value {}, {} tied, {} cutoffs)",
                    self.index,
                    decision.action.as_str(),
                    decision.value,
                    decision.candidates.len(),
                    decision.stats.cutoffs
                );
                self.log.record(
                    self.index,
                    "capture_alpha_beta",
                    decision.action.as_str(),
                    Some(decision.value),
                    Some(decision.stats),
                );
                decision.action
            }
            None => Direction::Stop,
        }
    }

    /// The first legal move minimising the maze distance back to the start
    fn head_home<S>(&self, state: &S, legal_moves: &[Direction]) -> Direction
    where
        S: GameState<Move = Direction> + CaptureView,
    {
        let mut best = Direction::Stop;
        let mut best_distance = u32::MAX;
        for action in legal_moves {
            let successor = state.successor(self.index, action);
            let distance = successor
                .agent_position(self.index)
                .map_or(u32::MAX, |position| state.maze_distance(self.start, position));
            if distance < best_distance {
                best = *action;
                best_distance = distance;
            }
        }
        if best_distance == u32::MAX {
            legal_moves[0]
        } else {
            best
        }
    }
}

/// Builds the default offense/defense pair
///
/// Both members share the decision trace configured under `[debug]`.
pub fn create_team<S>(
    state: &S,
    first: AgentId,
    second: AgentId,
    config: &Config,
) -> (
    CaptureTeamAgent<OffenseFeatures>,
    CaptureTeamAgent<DefenseFeatures>,
)
where
    S: CaptureView,
{
    let capture = &config.capture;
    let log = config.decision_log();
    let first_start = state.agent_position(first).unwrap_or(Coord::new(0, 0));
    let second_start = state.agent_position(second).unwrap_or(Coord::new(0, 0));

    (
        CaptureTeamAgent::new(
            first,
            first_start,
            OffenseFeatures::new(first, first_start, capture),
            capture,
        )
        .with_decision_log(log.clone()),
        CaptureTeamAgent::new(
            second,
            second_start,
            DefenseFeatures::new(second, capture),
            capture,
        )
        .with_decision_log(log),
    )
}
