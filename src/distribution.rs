//! Class distribution binner: fixed-width histogram over raw 0-100 scores.
//!
//! The chart legend draws twenty 5%-wide buckets (0-5%, 5-10%, ...), so the
//! bin layout here must match it exactly: bin = min(floor(score / 5), 19),
//! with a score of exactly 100 absorbed by the top bin.

use serde::Serialize;

pub const BIN_COUNT: usize = 20;
pub const BIN_WIDTH: f64 = 5.0;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinnedDistribution {
  /// Count of population scores per bucket.
  pub distribution: [u32; BIN_COUNT],
  /// Bucket containing the query score.
  pub student_bucket: usize,
}

/// Bucket index for one score.
pub fn bin_index(score: f64) -> usize {
  ((score.max(0.0) / BIN_WIDTH) as usize).min(BIN_COUNT - 1)
}

/// Histogram the population and locate the query score. An empty population
/// yields an all-zero histogram; the query bucket is computed regardless.
pub fn bin_scores(population: &[f64], query: f64) -> BinnedDistribution {
  let mut distribution = [0u32; BIN_COUNT];
  for &s in population {
    distribution[bin_index(s)] += 1;
  }
  BinnedDistribution { distribution, student_bucket: bin_index(query) }
}
