// Decision policies for the Pacman course games
// The harness owns the game; these modules only decide what to play.

pub mod adversarial;
pub mod capture;
pub mod claims;
pub mod config;
pub mod debug_logger;
pub mod error;
pub mod evaluation;
pub mod food_seeker;
pub mod game;
pub mod goal_search;
pub mod multi_agent;
pub mod outcome;
pub mod planner;
pub mod reflex;
pub mod types;

use std::env;

/// Initialises `env_logger`, defaulting to `info` unless `RUST_LOG` is set
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = env_logger::Builder::new().parse_filters(&filter).try_init();
}
