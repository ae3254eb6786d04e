// Depth-limited adversarial search
//
// One maximizer against an ordered list of opponents. A ply is a full round:
// the maximizer moves, then every opponent in `order[1..]`, and only after the
// last opponent does the depth counter advance. The tree is never
// materialised; each branch is expanded recursively and dropped.

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::evaluation::Evaluator;
use crate::game::GameState;
use crate::types::AgentId;

/// How opponent nodes are backed up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Plain minimax, every node visited
    Minimax,
    /// Minimax with alpha-beta pruning on strict bound violations
    AlphaBeta,
    /// Opponents pick uniformly at random; their nodes average their children
    Expectimax,
}

/// How the root resolves several moves sharing the maximal value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the first maximal move in harness order
    First,
    /// Draw uniformly among every maximal move
    Random,
}

/// Counters collected over one decision
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Calls to the value recursion, root children included
    pub nodes: u64,
    /// Evaluator invocations
    pub leaves: u64,
    /// Alpha-beta cutoffs taken
    pub cutoffs: u64,
}

/// Outcome of a root decision
#[derive(Debug, Clone)]
pub struct Decision<M> {
    pub action: M,
    pub value: f64,
    /// Every root move that reached `value` (just `action` under `TieBreak::First`)
    pub candidates: Vec<M>,
    pub stats: SearchStats,
}

/// Depth-limited minimax / alpha-beta / expectimax over a `GameState`
#[derive(Debug, Clone, Copy)]
pub struct AdversarialSearch {
    depth: u32,
    mode: SearchMode,
    tie_break: TieBreak,
}

impl AdversarialSearch {
    pub fn new(depth: u32, mode: SearchMode) -> Self {
        AdversarialSearch {
            depth,
            mode,
            tie_break: TieBreak::First,
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Chooses the maximizer's move
    ///
    /// `order[0]` is the maximizer and `order[1..]` the opponents in the order
    /// they move. Under `TieBreak::First` the root alpha is carried across
    /// sibling branches; under `TieBreak::Random` each root branch gets a fresh
    /// window so that every tied value is exact.
    ///
    /// # Returns
    /// * `None` when the maximizer has no legal move
    pub fn decide<S, E, R>(
        &self,
        state: &S,
        order: &[AgentId],
        evaluator: &E,
        rng: &mut R,
    ) -> Option<Decision<S::Move>>
    where
        S: GameState,
        E: Evaluator<S> + ?Sized,
        R: Rng + ?Sized,
    {
        let maximizer = *order.first()?;
        let moves = state.legal_moves(maximizer);
        if moves.is_empty() {
            return None;
        }

        let mut walk = Walk {
            order,
            evaluator,
            limit: self.depth,
            mode: self.mode,
            stats: SearchStats::default(),
        };
        let (next_turn, next_depth) = walk.advance(0, 0);

        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut best_value = f64::NEG_INFINITY;
        let mut candidates: Vec<S::Move> = Vec::new();

        for mv in moves {
            let child = state.successor(maximizer, &mv);
            let window = match self.tie_break {
                TieBreak::First => alpha,
                TieBreak::Random => f64::NEG_INFINITY,
            };
            let value = walk.value(&child, next_turn, next_depth, window, beta);
            debug!("Root move {:?} -> {}", mv, value);

            if candidates.is_empty() || value > best_value {
                best_value = value;
                candidates.clear();
                candidates.push(mv);
                alpha = alpha.max(value);
            } else if value == best_value && self.tie_break == TieBreak::Random {
                candidates.push(mv);
            }
        }

        let action = match self.tie_break {
            TieBreak::First => candidates.first().cloned(),
            TieBreak::Random => candidates.choose(rng).cloned(),
        }?;

        debug!(
            "{:?} depth {}: value {} over {} candidate(s), stats {:?}",
            self.mode,
            self.depth,
            best_value,
            candidates.len(),
            walk.stats
        );

        Some(Decision {
            action,
            value: best_value,
            candidates,
            stats: walk.stats,
        })
    }
}

/// Per-decision recursion context
struct Walk<'a, E: ?Sized> {
    order: &'a [AgentId],
    evaluator: &'a E,
    limit: u32,
    mode: SearchMode,
    stats: SearchStats,
}

impl<'a, E: ?Sized> Walk<'a, E> {
    /// Next `(turn, depth)` after `turn` has moved
    fn advance(&self, turn: usize, depth: u32) -> (usize, u32) {
        if turn + 1 >= self.order.len() {
            (0, depth + 1)
        } else {
            (turn + 1, depth)
        }
    }

    fn leaf<S>(&mut self, state: &S) -> f64
    where
        E: Evaluator<S>,
    {
        self.stats.leaves += 1;
        self.evaluator.evaluate(state)
    }

    fn value<S>(&mut self, state: &S, turn: usize, depth: u32, alpha: f64, beta: f64) -> f64
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.stats.nodes += 1;

        if depth >= self.limit || state.is_terminal() {
            return self.leaf(state);
        }

        let agent = self.order[turn];
        let moves = state.legal_moves(agent);
        if moves.is_empty() {
            return self.leaf(state);
        }

        if turn == 0 {
            self.max_value(state, agent, moves, turn, depth, alpha, beta)
        } else if self.mode == SearchMode::Expectimax {
            self.chance_value(state, agent, moves, turn, depth)
        } else {
            self.min_value(state, agent, moves, turn, depth, alpha, beta)
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn max_value<S>(
        &mut self,
        state: &S,
        agent: AgentId,
        moves: Vec<S::Move>,
        turn: usize,
        depth: u32,
        mut alpha: f64,
        beta: f64,
    ) -> f64
    where
        S: GameState,
        E: Evaluator<S>,
    {
        let (next_turn, next_depth) = self.advance(turn, depth);
        let prune = self.mode == SearchMode::AlphaBeta;

        let mut v = f64::NEG_INFINITY;
        for mv in &moves {
            let child = state.successor(agent, mv);
            v = v.max(self.value(&child, next_turn, next_depth, alpha, beta));
            if prune && v > beta {
                self.stats.cutoffs += 1;
                return v;
            }
            alpha = alpha.max(v);
        }
        v
    }

    #[allow(clippy::too_many_arguments)]
    fn min_value<S>(
        &mut self,
        state: &S,
        agent: AgentId,
        moves: Vec<S::Move>,
        turn: usize,
        depth: u32,
        alpha: f64,
        mut beta: f64,
    ) -> f64
    where
        S: GameState,
        E: Evaluator<S>,
    {
        let (next_turn, next_depth) = self.advance(turn, depth);
        let prune = self.mode == SearchMode::AlphaBeta;

        let mut v = f64::INFINITY;
        for mv in &moves {
            let child = state.successor(agent, mv);
            v = v.min(self.value(&child, next_turn, next_depth, alpha, beta));
            if prune && v < alpha {
                self.stats.cutoffs += 1;
                return v;
            }
            beta = beta.min(v);
        }
        v
    }

    fn chance_value<S>(
        &mut self,
        state: &S,
        agent: AgentId,
        moves: Vec<S::Move>,
        turn: usize,
        depth: u32,
    ) -> f64
    where
        S: GameState,
        E: Evaluator<S>,
    {
        let (next_turn, next_depth) = self.advance(turn, depth);
        let count = moves.len() as f64;

        let mut total = 0.0;
        for mv in &moves {
            let child = state.successor(agent, mv);
            total += self.value(
                &child,
                next_turn,
                next_depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
            );
        }
        total / count
    }
}
