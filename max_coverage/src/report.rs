use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;

use crate::solution::SolveStatus;

/// Parameter block echoed into the output record so downstream consumers
/// can tell which run produced it.
#[derive(Debug, Clone, Serialize)]
pub struct RecordParameters {
    pub p_stations: usize,
    pub p_vehicles: Option<usize>,
    pub threshold_minutes: f64,
}

/// Flat result record handed to the spatial-statistics and visualization
/// collaborators. Site ids (not matrix columns) are used throughout.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationRecord {
    pub solver_backend: String,
    pub status: SolveStatus,
    pub objective_value: f64,
    pub coverage_pct: f64,
    pub open_sites: Vec<u32>,
    /// Insertion-ordered so repeated runs serialize identically.
    pub vehicles_per_site: IndexMap<u32, usize>,
    pub solve_time_seconds: f64,
    pub optimality_gap_pct: Option<f64>,
    pub baseline_coverage_pct: f64,
    pub gap_closure_pct: f64,
    pub parameters: RecordParameters,
}

impl OptimizationRecord {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Banner-formatted text report of the run.
    pub fn summary(&self) -> String {
        let vehicles_used: usize = self.vehicles_per_site.values().sum();
        let vehicles_line = match self.parameters.p_vehicles {
            Some(budget) => format!("{} / {}", vehicles_used, budget),
            None => "N/A".to_string(),
        };

        let lines = [
            "=".repeat(40),
            "MAXIMUM COVERAGE SUMMARY".to_string(),
            "=".repeat(40),
            format!("Solver:      {}", self.solver_backend.to_uppercase()),
            format!("Status:      {}", self.status),
            format!("Coverage %:  {:.2}%", self.coverage_pct * 100.0),
            format!(
                "Stations:    {} / {}",
                self.open_sites.len(),
                self.parameters.p_stations
            ),
            format!("Vehicles:    {}", vehicles_line),
            format!(
                "Open sites:  {}",
                self.open_sites.iter().map(|id| format!("s{}", id)).join(", ")
            ),
            format!("Gap closed:  {:.2}%", self.gap_closure_pct * 100.0),
            format!("Solve Time:  {:.2} sec", self.solve_time_seconds),
            "=".repeat(40),
        ];

        lines.join("\n")
    }
}
