// File: src/core/combiner.rs
//! Reduction of per-token scores into one message-level probability.

use crate::core::types::Score;
use serde::{Deserialize, Serialize};

/// Combines the scores of a message's tokens for one pool.
///
/// `probs` holds the message tokens that have a cached score in `pool`,
/// sorted by token, and is never empty.
pub trait Combiner: Send + Sync {
    fn combine(&self, probs: &[(&str, Score)], pool: &str) -> f64;
}

/// Named combiner variants, selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinerKind {
    #[default]
    Robinson,
    RobinsonFisher,
}

impl CombinerKind {
    pub fn build(self) -> Box<dyn Combiner> {
        match self {
            CombinerKind::Robinson => Box::new(Robinson),
            CombinerKind::RobinsonFisher => Box::new(RobinsonFisher),
        }
    }
}

/// Geometric-mean combination of belonging and not-belonging evidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Robinson;

impl Combiner for Robinson {
    fn combine(&self, probs: &[(&str, Score)], _pool: &str) -> f64 {
        let nth = 1.0 / probs.len() as f64;
        let p = 1.0 - probs.iter().map(|(_, s)| 1.0 - s).product::<f64>().powf(nth);
        let q = 1.0 - probs.iter().map(|(_, s)| s).product::<f64>().powf(nth);
        let s = (p - q) / (p + q);
        (1.0 + s) / 2.0
    }
}

/// Fisher's chi-square combination of the same evidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct RobinsonFisher;

impl RobinsonFisher {
    /// chi2p of `-2 ln(product)`, or 0.0 when the product has underflowed.
    fn tail(product: f64, df: usize) -> f64 {
        if product <= 0.0 || !product.is_finite() {
            return 0.0;
        }
        let p = chi2p(-2.0 * product.ln(), df);
        if p.is_nan() {
            0.0
        } else {
            p
        }
    }
}

impl Combiner for RobinsonFisher {
    fn combine(&self, probs: &[(&str, Score)], _pool: &str) -> f64 {
        let df = 2 * probs.len();
        let h = Self::tail(probs.iter().map(|(_, s)| s).product(), df);
        let s = Self::tail(probs.iter().map(|(_, s)| 1.0 - s).product(), df);
        (1.0 + h - s) / 2.0
    }
}

/// Upper tail of the chi-square distribution with `df` degrees of freedom,
/// as a truncated series. Capped at 1.0.
pub fn chi2p(chi: f64, df: usize) -> f64 {
    let m = chi / 2.0;
    let mut term = (-m).exp();
    let mut sum = term;
    for i in 1..=df / 2 {
        term *= m / i as f64;
        sum += term;
    }
    sum.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probs(scores: &[f64]) -> Vec<(&'static str, Score)> {
        scores.iter().map(|&s| ("t", s)).collect()
    }

    #[test]
    fn robinson_single_score() {
        // n = 1: P = s, Q = 1 - s, S = 2s - 1, result = s.
        let r = Robinson.combine(&probs(&[0.9999]), "p");
        assert!((r - 0.9999).abs() < 1e-9);
        let r = Robinson.combine(&probs(&[0.2]), "p");
        assert!((r - 0.2).abs() < 1e-9);
    }

    #[test]
    fn robinson_is_symmetric_around_half() {
        let r = Robinson.combine(&probs(&[0.9, 0.1]), "p");
        assert!((r - 0.5).abs() < 1e-9);
    }

    #[test]
    fn robinson_stays_in_unit_interval() {
        let r = Robinson.combine(&probs(&[0.0001, 0.9999, 0.9999, 0.3]), "p");
        assert!((0.0..=1.0).contains(&r));
    }

    #[test]
    fn chi2p_known_values() {
        // The series runs through i = df / 2 inclusive: e^-m * (1 + m) for df = 2.
        assert!((chi2p(2.0, 2) - 2.0 * (-1.0f64).exp()).abs() < 1e-12);
        assert_eq!(chi2p(0.0, 4), 1.0);
        assert!(chi2p(200.0, 2) < 1e-40);
    }

    #[test]
    fn fisher_favours_high_scores() {
        let high = RobinsonFisher.combine(&probs(&[0.99, 0.95, 0.9]), "p");
        let low = RobinsonFisher.combine(&probs(&[0.01, 0.05, 0.1]), "p");
        assert!(high > 0.9, "high = {high}");
        assert!(low < 0.1, "low = {low}");
    }

    #[test]
    fn fisher_treats_underflowed_product_as_zero() {
        let scores = vec![0.0001; 400];
        let r = RobinsonFisher.combine(&probs(&scores), "p");
        assert!(r.is_finite());
        assert!((0.0..=1.0).contains(&r));
    }

    #[test]
    fn kinds_build_their_variant() {
        let p = probs(&[0.8]);
        let a = CombinerKind::Robinson.build().combine(&p, "x");
        assert!((a - Robinson.combine(&p, "x")).abs() < 1e-12);
        let b = CombinerKind::RobinsonFisher.build().combine(&p, "x");
        assert!((b - RobinsonFisher.combine(&p, "x")).abs() < 1e-12);
    }
}
