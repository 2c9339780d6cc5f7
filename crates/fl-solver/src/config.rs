//! Solver tunables.

use crate::error::{SolverError, SolverResult};

/// Relaxation ceiling for the network flow solver.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowConfig {
    /// Maximum passes over every open connection per group and tick.
    pub max_passes: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self { max_passes: 8 }
    }
}

impl FlowConfig {
    pub fn validate(&self) -> SolverResult<()> {
        if self.max_passes == 0 {
            return Err(SolverError::Config {
                what: "max_passes must be at least 1",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_eight_passes() {
        assert_eq!(FlowConfig::default().max_passes, 8);
        assert!(FlowConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_passes_rejected() {
        assert!(FlowConfig { max_passes: 0 }.validate().is_err());
    }
}
