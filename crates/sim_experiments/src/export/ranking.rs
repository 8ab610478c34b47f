use crate::metrics::RunMetrics;

/// Weights for ranking configurations. Lower score is better: dropping
/// packets and making them wait are both penalties.
#[derive(Debug, Clone, Copy)]
pub struct RankingWeights {
    pub drop_weight: f64,
    pub wait_weight: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            drop_weight: 1.0,
            wait_weight: 0.5,
        }
    }
}

impl RankingWeights {
    fn score(&self, metrics: &RunMetrics) -> f64 {
        self.drop_weight * metrics.drop_ratio + self.wait_weight * metrics.mean_wait_time
    }
}

pub(crate) fn find_best_index_impl(
    results: &[RunMetrics],
    weights: &RankingWeights,
) -> Option<usize> {
    results
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| weights.score(a).total_cmp(&weights.score(b)))
        .map(|(index, _)| index)
}
