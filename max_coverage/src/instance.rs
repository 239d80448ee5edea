use shared::CoverageMatrix;

use crate::OptimizeError;

/// Response-unit allocation bounds. Every opened site receives at least
/// `per_site_min` units and at most `per_site_max`; closed sites receive
/// none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehiclePolicy {
    pub budget: usize,
    pub per_site_min: usize,
    pub per_site_max: usize,
}

impl VehiclePolicy {
    pub fn with_budget(budget: usize) -> VehiclePolicy {
        VehiclePolicy {
            budget,
            per_site_min: 1,
            per_site_max: 4,
        }
    }
}

/// Everything one solve needs, validated up front and immutable after
/// construction. Re-solving the same instance always starts from the same
/// data.
#[derive(Debug, Clone)]
pub struct OptimizationInstance {
    pub coverage: CoverageMatrix,
    pub weights: Vec<f64>,
    pub p_stations: usize,
    pub vehicles: Option<VehiclePolicy>,
}

impl OptimizationInstance {
    /// Fail-fast validation; violations surface as
    /// [`OptimizeError::InvalidInput`] and nothing is repaired. The matrix
    /// shape itself is enforced by the `Array2` type.
    pub fn new(
        coverage: CoverageMatrix,
        weights: Vec<f64>,
        p_stations: usize,
        vehicles: Option<VehiclePolicy>,
    ) -> Result<OptimizationInstance, OptimizeError> {
        let n_demand = coverage.n_demand();
        let n_candidates = coverage.n_candidates();

        if weights.len() != n_demand {
            return Err(OptimizeError::InvalidInput(format!(
                "demand weights ({}) must match rows in coverage matrix ({})",
                weights.len(),
                n_demand
            )));
        }

        if p_stations == 0 || p_stations > n_candidates {
            return Err(OptimizeError::InvalidInput(format!(
                "invalid station budget: p={} must be positive and <= n_candidates ({})",
                p_stations, n_candidates
            )));
        }

        if weights.iter().any(|weight| *weight < 0.0) {
            return Err(OptimizeError::InvalidInput(
                "demand weights cannot be negative".to_string(),
            ));
        }

        if let Some(policy) = &vehicles {
            if policy.per_site_min > policy.per_site_max {
                return Err(OptimizeError::InvalidInput(format!(
                    "per-site vehicle minimum ({}) exceeds maximum ({})",
                    policy.per_site_min, policy.per_site_max
                )));
            }
        }

        Ok(OptimizationInstance {
            coverage,
            weights,
            p_stations,
            vehicles,
        })
    }

    pub fn n_demand(&self) -> usize {
        self.coverage.n_demand()
    }

    pub fn n_candidates(&self) -> usize {
        self.coverage.n_candidates()
    }
}
