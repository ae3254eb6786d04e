// Configuration module for reading Pacman.toml
// Every tunable of the agents lives here; problems are reported at load time,
// never mid-search.

use log::warn;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::adversarial::{SearchMode, TieBreak};
use crate::debug_logger::DecisionLog;
use crate::error::ConfigError;
use crate::evaluation::{EvaluationFn, Weights};
use crate::outcome::Outcome;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub search: SearchConfig,
    pub goal_search: GoalSearchConfig,
    pub reflex: ReflexConfig,
    pub capture: CaptureConfig,
    pub debug: DebugConfig,
}

/// Pacman-versus-ghosts adversarial search
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub depth: u32,
    pub evaluation: String,
    pub mode: SearchMode,
    pub tie_break: TieBreak,
    /// Fixed RNG seed for reproducible tie-breaking; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SearchConfig {
    /// Resolves the configured evaluation function name
    pub fn evaluation_fn(&self) -> Result<EvaluationFn, ConfigError> {
        match EvaluationFn::lookup(&self.evaluation) {
            Outcome::Found(eval) => Ok(eval),
            Outcome::NotFound => Err(ConfigError::UnknownEvaluation(self.evaluation.clone())),
            Outcome::NotImplemented(name) => Err(ConfigError::NotImplemented(name.to_string())),
        }
    }
}

/// Breadth-first food search budgets
#[derive(Debug, Deserialize, Clone)]
pub struct GoalSearchConfig {
    pub expansion_budget: usize,
    pub fallback_budget: usize,
}

/// Reflex agent evaluation constants
#[derive(Debug, Deserialize, Clone)]
pub struct ReflexConfig {
    /// Stands in for the reciprocal food distance when the move lands on food
    pub food_contact_bonus: f64,
    /// Ghosts closer than this are penalised by their distance
    pub danger_radius: u32,
}

/// Capture-the-flag team constants
#[derive(Debug, Deserialize, Clone)]
pub struct CaptureConfig {
    pub depth_limit: u32,
    /// At or below this much food left to eat, agents head home
    pub endgame_food_threshold: usize,
    #[serde(default)]
    pub seed: Option<u64>,

    // Offense
    pub no_ghost_distance: f64,
    pub food_contact_bonus: f64,
    pub scared_ghost_contact_bonus: f64,
    pub offense_capsule_contact_bonus: f64,
    pub trap_move_threshold: usize,
    pub trap_ghost_distance: u32,

    // Defense
    pub no_invader_score: f64,
    pub invader_contact_bonus: f64,
    pub defense_capsule_contact_bonus: f64,

    pub offense_weights: Weights,
    pub defense_weights: Weights,
}

/// Decision trace configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Pacman.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, ConfigError>` - Parsed and validated configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::FileRead {
            path: path.as_ref().to_path_buf(),
            source,
        })?;

        Self::parse(&contents)
    }

    /// Parses and validates TOML text
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Pacman.toml in the project root
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_file("Pacman.toml")
    }

    /// Rejects values that would only surface as failures during play
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.search.evaluation_fn()?;

        if self.goal_search.expansion_budget == 0 {
            return Err(ConfigError::Validation(
                "goal_search.expansion_budget must be > 0".to_string(),
            ));
        }
        if self.goal_search.fallback_budget == 0 {
            return Err(ConfigError::Validation(
                "goal_search.fallback_budget must be > 0".to_string(),
            ));
        }
        if self.capture.depth_limit == 0 {
            return Err(ConfigError::Validation(
                "capture.depth_limit must be > 0".to_string(),
            ));
        }
        if self.capture.offense_weights.is_empty() || self.capture.defense_weights.is_empty() {
            return Err(ConfigError::Validation(
                "capture weights must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Pacman.toml
    pub fn default_hardcoded() -> Self {
        Config {
            search: SearchConfig {
                depth: 2,
                evaluation: "score".to_string(),
                mode: SearchMode::AlphaBeta,
                tie_break: TieBreak::First,
                seed: None,
            },
            goal_search: GoalSearchConfig {
                expansion_budget: 601,
                fallback_budget: 18,
            },
            reflex: ReflexConfig {
                food_contact_bonus: 1.0,
                danger_radius: 2,
            },
            capture: CaptureConfig {
                depth_limit: 2,
                endgame_food_threshold: 2,
                seed: None,
                no_ghost_distance: 80.0,
                food_contact_bonus: 2.0,
                scared_ghost_contact_bonus: 2.0,
                offense_capsule_contact_bonus: 5000.0,
                trap_move_threshold: 2,
                trap_ghost_distance: 5,
                no_invader_score: 150.0,
                invader_contact_bonus: 2.0,
                defense_capsule_contact_bonus: 1000.0,
                offense_weights: weights(&[
                    ("food_count", 1000.0),
                    ("capsule_count", 700.0),
                    ("score", 10000.0),
                    ("inv_food_distance", 600.0),
                    ("scared_ghost_count", 200.0),
                    ("ghost_distance", 0.1),
                    ("inv_scared_ghost_distance", 150.0),
                    ("inv_home_distance", 70000.0),
                    ("inv_capsule_distance", 300.0),
                    ("trapped", 1_000_000.0),
                ]),
                defense_weights: weights(&[
                    ("score", 20.0),
                    ("food_count", 3000.0),
                    ("inv_invader_distance", 10000.0),
                    ("invader_count", 100000.0),
                    ("inv_capsule_distance", 30.0),
                ]),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "pacman_decisions.jsonl".to_string(),
            },
        }
    }

    /// Opens the decision trace described by `[debug]`
    ///
    /// Each call truncates the file, so build one log per run and clone it
    /// into every agent that should share it.
    pub fn decision_log(&self) -> DecisionLog {
        DecisionLog::from_config(&self.debug)
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            warn!("Could not load Pacman.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}

fn weights(entries: &[(&str, f64)]) -> Weights {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect::<HashMap<_, _>>()
}
