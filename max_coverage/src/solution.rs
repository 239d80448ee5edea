use serde::Serialize;
use std::fmt;

use crate::formulate::VarLayout;
use crate::solver::Backend;
use crate::BINARY_THRESHOLD;

/// Canonical terminal states, normalized across backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    Optimal,
    /// The wall-clock limit expired with an incumbent available. Valid
    /// terminal state, not an error.
    TimeLimitFeasible,
    Infeasible,
    Unknown,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "OPTIMAL"),
            SolveStatus::TimeLimitFeasible => write!(f, "TIME_LIMIT_FEASIBLE"),
            SolveStatus::Infeasible => write!(f, "INFEASIBLE"),
            SolveStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// One solver outcome. Never mutated after creation; re-solving an
/// instance produces a fresh value.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Opened candidate columns, |open_sites| <= p.
    pub open_sites: Vec<usize>,
    /// Response units per candidate column; empty when allocation is
    /// disabled.
    pub vehicles: Vec<usize>,
    pub objective: f64,
    pub status: SolveStatus,
    /// Relative optimality gap as reported by the backend: 0 when proven
    /// optimal, None when the backend does not expose one.
    pub optimality_gap: Option<f64>,
    pub solve_time_secs: f64,
    pub backend: Backend,
}

impl Solution {
    /// Terminal states without a usable assignment map to the empty
    /// network, which is always feasible.
    #[cfg(feature = "gurobi")]
    pub(crate) fn unknown(layout: &VarLayout, backend: Backend, solve_time_secs: f64) -> Solution {
        Solution {
            open_sites: Vec::new(),
            vehicles: if layout.has_vehicles {
                vec![0; layout.n_candidates]
            } else {
                Vec::new()
            },
            objective: 0.0,
            status: SolveStatus::Unknown,
            optimality_gap: None,
            solve_time_secs,
            backend,
        }
    }
}

/// Split a raw variable-value vector back into opened columns and vehicle
/// counts using the model layout.
pub(crate) fn decode_assignment(values: &[f64], layout: &VarLayout) -> (Vec<usize>, Vec<usize>) {
    let open_sites: Vec<usize> = (0..layout.n_candidates)
        .filter(|&j| values[layout.x(j)] > BINARY_THRESHOLD)
        .collect();

    let vehicles: Vec<usize> = if layout.has_vehicles {
        (0..layout.n_candidates)
            .map(|j| values[layout.v(j)].round() as usize)
            .collect()
    } else {
        Vec::new()
    };

    (open_sites, vehicles)
}
