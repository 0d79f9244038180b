use serde::{Deserialize, Serialize};

use super::measurement::Timing;
use crate::Error;
use crate::routing::HeuristicMode;

/// Parameters of one benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Accepted origin/destination pairs to collect
    pub pairs: usize,
    /// Timed runs per algorithm and pair
    pub repetitions: usize,
    /// Discarded runs before timing
    pub warmup: usize,
    pub seed: u64,
    /// Give up once more pairs than this were rejected; `None` never gives up
    pub max_invalid_pairs: Option<usize>,
    pub heuristic: HeuristicMode,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            pairs: 50,
            repetitions: 20,
            warmup: 3,
            seed: 42,
            max_invalid_pairs: Some(1000),
            heuristic: HeuristicMode::default(),
        }
    }
}

impl BenchmarkConfig {
    pub fn timing(&self) -> Timing {
        Timing {
            warmup: self.warmup,
            repetitions: self.repetitions,
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] when no timed repetition would run
    pub fn validate(&self) -> Result<(), Error> {
        if self.repetitions == 0 {
            return Err(Error::InvalidData(
                "benchmark needs at least one repetition".to_string(),
            ));
        }
        Ok(())
    }
}
