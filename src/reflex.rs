// One-step reflex agent
//
// Scores each legal move by looking only at the state it leads to and picks
// uniformly among the best.

use log::info;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::config::{Config, ReflexConfig};
use crate::debug_logger::DecisionLog;
use crate::evaluation::inverse_distance;
use crate::game::GameState;
use crate::types::{manhattan, Coord, Direction};

/// A ghost as seen by Pacman
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostView {
    pub position: Coord,
    /// Moves left before the ghost stops being edible
    pub scared_timer: u32,
}

/// Board queries the Pacman-side evaluations need
pub trait PacmanView {
    fn pacman_position(&self) -> Coord;

    fn food(&self) -> Vec<Coord>;

    fn ghosts(&self) -> Vec<GhostView>;
}

/// Scores `action` from `current`
///
/// Food is rewarded by the reciprocal distance to the nearest pellet of the
/// current state (with a fixed bonus when the move lands on one). A ghost adds
/// its distance while it can still be eaten and subtracts it once it is
/// inside the danger radius.
pub fn reflex_evaluation<S>(current: &S, action: &Direction, config: &ReflexConfig) -> f64
where
    S: GameState<Move = Direction> + PacmanView,
{
    let successor = current.successor(0, action);
    let position = successor.pacman_position();

    let mut score = 0.0;

    let nearest_food = current
        .food()
        .iter()
        .map(|food| manhattan(position, *food))
        .min();
    if let Some(distance) = nearest_food {
        score += inverse_distance(distance, config.food_contact_bonus);
    }

    for ghost in successor.ghosts() {
        let distance = manhattan(position, ghost.position);
        if distance <= ghost.scared_timer {
            score += distance as f64;
        }
        if distance <= config.danger_radius {
            score -= distance as f64;
        }
    }

    score
}

/// Pacman agent that picks among the best immediate moves
#[derive(Debug)]
pub struct ReflexAgent {
    config: ReflexConfig,
    rng: StdRng,
    log: DecisionLog,
}

impl ReflexAgent {
    pub fn new(config: ReflexConfig) -> Self {
        ReflexAgent {
            config,
            rng: StdRng::from_os_rng(),
            log: DecisionLog::disabled(),
        }
    }

    /// Reflex constants and decision trace from a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        ReflexAgent::new(config.reflex.clone()).with_decision_log(config.decision_log())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_decision_log(mut self, log: DecisionLog) -> Self {
        self.log = log;
        self
    }

    /// Chooses among the best-scoring legal moves; `Stop` if there are none
    pub fn get_action<S>(&mut self, state: &S) -> Direction
    where
        S: GameState<Move = Direction> + PacmanView,
    {
        let legal_moves = state.legal_moves(0);
        let scores: Vec<f64> = legal_moves
            .iter()
            .map(|action| reflex_evaluation(state, action, &self.config))
            .collect();

        let best_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let best_moves: Vec<Direction> = legal_moves
            .iter()
            .zip(&scores)
            .filter(|(_, score)| **score == best_score)
            .map(|(action, _)| *action)
            .collect();

        let chosen = best_moves
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Direction::Stop);

        info!(
            "Reflex: {} (score {}, {} tied)",
            chosen.as_str(),
            best_score,
            best_moves.len()
        );
        self.log
            .record(0, "reflex", chosen.as_str(), Some(best_score), None);
        chosen
    }
}
