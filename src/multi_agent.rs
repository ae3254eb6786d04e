// Pacman against every ghost
//
// Pacman is agent 0 and maximizes; ghosts 1..n minimize (or, under
// expectimax, move uniformly at random) in index order.

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::adversarial::{AdversarialSearch, Decision, SearchMode, TieBreak};
use crate::config::Config;
use crate::debug_logger::DecisionLog;
use crate::error::ConfigError;
use crate::evaluation::{EvaluationFn, Evaluator};
use crate::game::GameState;
use crate::types::AgentId;

/// Adversarial search agent for the single-Pacman game
#[derive(Debug)]
pub struct MultiAgentSearchAgent {
    search: AdversarialSearch,
    evaluation: EvaluationFn,
    rng: StdRng,
    log: DecisionLog,
}

impl MultiAgentSearchAgent {
    pub fn new(search: AdversarialSearch, evaluation: EvaluationFn) -> Self {
        MultiAgentSearchAgent {
            search,
            evaluation,
            rng: StdRng::from_os_rng(),
            log: DecisionLog::disabled(),
        }
    }

    /// Builds the agent from configuration, resolving the evaluation function
    ///
    /// Unknown or unimplemented evaluation names are rejected here, before any
    /// turn is played. The decision trace follows the `[debug]` section.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let search_config = &config.search;
        let evaluation = search_config.evaluation_fn()?;
        let search = AdversarialSearch::new(search_config.depth, search_config.mode)
            .with_tie_break(search_config.tie_break);

        let mut agent = MultiAgentSearchAgent::new(search, evaluation)
            .with_decision_log(config.decision_log());
        if let Some(seed) = search_config.seed {
            agent.rng = StdRng::seed_from_u64(seed);
        }
        Ok(agent)
    }

    pub fn minimax(depth: u32) -> Self {
        Self::new(
            AdversarialSearch::new(depth, SearchMode::Minimax),
            EvaluationFn::Score,
        )
    }

    pub fn alpha_beta(depth: u32) -> Self {
        Self::new(
            AdversarialSearch::new(depth, SearchMode::AlphaBeta),
            EvaluationFn::Score,
        )
    }

    pub fn expectimax(depth: u32) -> Self {
        Self::new(
            AdversarialSearch::new(depth, SearchMode::Expectimax),
            EvaluationFn::Score,
        )
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.search = self.search.with_tie_break(tie_break);
        self
    }

    pub fn with_decision_log(mut self, log: DecisionLog) -> Self {
        self.log = log;
        self
    }

    pub fn search(&self) -> &AdversarialSearch {
        &self.search
    }

    /// Pacman's move, or `None` when Pacman has no legal move
    pub fn get_action<S: GameState>(&mut self, state: &S) -> Option<S::Move> {
        let evaluation = self.evaluation;
        self.decide_with(state, &evaluation).map(|decision| decision.action)
    }

    /// Full decision report using an injected evaluator
    pub fn decide_with<S, E>(&mut self, state: &S, evaluator: &E) -> Option<Decision<S::Move>>
    where
        S: GameState,
        E: Evaluator<S> + ?Sized,
    {
        let order: Vec<AgentId> = (0..state.num_agents()).collect();
        let decision = self.search.decide(state, &order, evaluator, &mut self.rng)?;

        let chosen = format!("{:?}", decision.action);
        info!(
            "{:?}: {} (value {}, {} nodes, {} cutoffs)",
            self.search.mode(),
            chosen,
            decision.value,
            decision.stats.nodes,
            decision.stats.cutoffs
        );
        self.log.record(
            0,
            policy_name(self.search.mode()),
            &chosen,
            Some(decision.value),
            Some(decision.stats),
        );
        Some(decision)
    }
}

fn policy_name(mode: SearchMode) -> &'static str {
    match mode {
        SearchMode::Minimax => "minimax",
        SearchMode::AlphaBeta => "alpha_beta",
        SearchMode::Expectimax => "expectimax",
    }
}
