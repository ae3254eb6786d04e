// Evaluation functions
//
// Scoring is injected into the searches rather than inherited: anything that
// implements `Evaluator` can drive a search, and hand-tuned linear scoring is
// expressed as a `FeatureExtractor` wrapped in a `LinearEvaluator`.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::game::GameState;
use crate::outcome::Outcome;

/// Scalar score of a state; higher is better for the maximizer
pub trait Evaluator<S> {
    fn evaluate(&self, state: &S) -> f64;
}

impl<S, F> Evaluator<S> for F
where
    F: Fn(&S) -> f64,
{
    fn evaluate(&self, state: &S) -> f64 {
        self(state)
    }
}

/// Evaluation functions selectable by name from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationFn {
    /// The harness score of the state
    Score,
}

impl EvaluationFn {
    /// Resolves a configured name
    ///
    /// `better` is a declared slot with no implementation behind it; it comes
    /// back as `NotImplemented` so configuration can refuse it up front.
    pub fn lookup(name: &str) -> Outcome<EvaluationFn> {
        match name {
            "score" | "scoreEvaluationFunction" => Outcome::Found(EvaluationFn::Score),
            "better" | "betterEvaluationFunction" => Outcome::NotImplemented("better"),
            _ => Outcome::NotFound,
        }
    }
}

impl<S: GameState> Evaluator<S> for EvaluationFn {
    fn evaluate(&self, state: &S) -> f64 {
        match self {
            EvaluationFn::Score => ScoreEvaluator.evaluate(state),
        }
    }
}

/// Returns the harness score unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEvaluator;

impl<S: GameState> Evaluator<S> for ScoreEvaluator {
    fn evaluate(&self, state: &S) -> f64 {
        state.score()
    }
}

/// Reciprocal of a distance, with `at_bonus` standing in when already there
pub fn inverse_distance(distance: u32, at_bonus: f64) -> f64 {
    if distance == 0 {
        at_bonus
    } else {
        1.0 / distance as f64
    }
}

/// Named feature values; a feature that was never set reads as zero
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Features(BTreeMap<&'static str, f64>);

impl Features {
    pub fn new() -> Self {
        Features(BTreeMap::new())
    }

    pub fn set(&mut self, name: &'static str, value: f64) {
        self.0.insert(name, value);
    }

    pub fn get(&self, name: &str) -> f64 {
        self.0.get(name).copied().unwrap_or(0.0)
    }

    /// Weighted sum; features without a weight contribute nothing
    pub fn dot(&self, weights: &Weights) -> f64 {
        self.0
            .iter()
            .map(|(name, value)| value * weights.get(*name).copied().unwrap_or(0.0))
            .sum()
    }
}

/// Hand-tuned feature weights, keyed by feature name
pub type Weights = HashMap<String, f64>;

/// Produces the features and weights of a linear evaluation
pub trait FeatureExtractor<S> {
    fn features(&self, state: &S) -> Features;

    fn weights(&self, state: &S) -> &Weights;
}

/// Scores a state as `features · weights`
#[derive(Debug, Clone)]
pub struct LinearEvaluator<F> {
    extractor: F,
}

impl<F> LinearEvaluator<F> {
    pub fn new(extractor: F) -> Self {
        LinearEvaluator { extractor }
    }

    pub fn extractor(&self) -> &F {
        &self.extractor
    }
}

impl<S, F: FeatureExtractor<S>> Evaluator<S> for LinearEvaluator<F> {
    fn evaluate(&self, state: &S) -> f64 {
        let features = self.extractor.features(state);
        features.dot(self.extractor.weights(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_distance_guards_zero() {
        assert_eq!(inverse_distance(0, 5000.0), 5000.0);
        assert_eq!(inverse_distance(4, 5000.0), 0.25);
    }

    #[test]
    fn test_dot_ignores_unweighted_features() {
        let mut features = Features::new();
        features.set("food_count", -3.0);
        features.set("score", 2.0);
        features.set("unweighted", 99.0);

        let mut weights = Weights::new();
        weights.insert("food_count".to_string(), 100.0);
        weights.insert("score".to_string(), 10.0);
        weights.insert("missing_feature".to_string(), 7.0);

        assert_eq!(features.dot(&weights), -280.0);
    }

    #[test]
    fn test_unset_feature_reads_zero() {
        let features = Features::new();
        assert_eq!(features.get("anything"), 0.0);
    }

    #[test]
    fn test_lookup_distinguishes_unknown_from_unimplemented() {
        assert_eq!(EvaluationFn::lookup("score"), Outcome::Found(EvaluationFn::Score));
        assert_eq!(
            EvaluationFn::lookup("scoreEvaluationFunction"),
            Outcome::Found(EvaluationFn::Score)
        );
        assert_eq!(EvaluationFn::lookup("better"), Outcome::NotImplemented("better"));
        assert_eq!(EvaluationFn::lookup("nonsense"), Outcome::NotFound);
    }

    struct Doubler;

    impl FeatureExtractor<i32> for Doubler {
        fn features(&self, state: &i32) -> Features {
            let mut features = Features::new();
            features.set("value", *state as f64);
            features
        }

        fn weights(&self, _state: &i32) -> &Weights {
            use std::sync::OnceLock;
            static WEIGHTS: OnceLock<Weights> = OnceLock::new();
            WEIGHTS.get_or_init(|| {
                let mut weights = Weights::new();
                weights.insert("value".to_string(), 2.0);
                weights
            })
        }
    }

    #[test]
    fn test_linear_evaluator_uses_extractor() {
        let evaluator = LinearEvaluator::new(Doubler);
        assert_eq!(evaluator.evaluate(&21), 42.0);
    }

    #[test]
    fn test_closure_is_an_evaluator() {
        let eval = |state: &i32| (*state as f64) * 0.5;
        assert_eq!(eval.evaluate(&8), 4.0);
    }
}
