use indexmap::IndexMap;
use log::info;

use shared::{coverage_stats, gap_closure, travel_time_matrix, CandidateSite, CoverageMatrix, DemandPoint};

use crate::formulate::build_model;
use crate::instance::{OptimizationInstance, VehiclePolicy};
use crate::report::{OptimizationRecord, RecordParameters};
use crate::solver::{Backend, SolverAdapter};
use crate::OptimizeError;

/// Recognized configuration surface of one planning run.
#[derive(Debug, Clone)]
pub struct SolveParameters {
    /// Station budget p, positive and at most the candidate count.
    pub p_stations: usize,
    /// Total response-unit budget; None disables the allocation layer.
    pub p_vehicles: Option<usize>,
    pub threshold_minutes: f64,
    pub time_limit_secs: f64,
    /// Explicit backend override; None selects by detection.
    pub backend: Option<Backend>,
    pub verbose: bool,
}

impl Default for SolveParameters {
    fn default() -> SolveParameters {
        SolveParameters {
            p_stations: 12,
            p_vehicles: Some(24),
            threshold_minutes: 8.0,
            time_limit_secs: 300.0,
            backend: None,
            verbose: false,
        }
    }
}

/// One end-to-end planning run: travel times, coverage matrix, baseline
/// stats, formulation, solve, optimized stats and gap closure, in that
/// order. `existing_columns` are the candidate columns of the already
/// built stations forming the baseline network.
///
/// Runs are self-contained; sweeping budgets concurrently needs no
/// synchronization beyond collecting the records afterwards.
pub fn run_optimization(
    demand: &[DemandPoint],
    candidates: &[CandidateSite],
    existing_columns: &[usize],
    params: &SolveParameters,
) -> Result<OptimizationRecord, OptimizeError> {
    let weights: Vec<f64> = demand.iter().map(|point| point.weight).collect();

    info!(
        "computing travel times ({} demand x {} candidates, threshold {} min)",
        demand.len(),
        candidates.len(),
        params.threshold_minutes
    );
    let times = travel_time_matrix(demand, candidates);
    let coverage = CoverageMatrix::build(&times, params.threshold_minutes);

    let baseline = coverage_stats(existing_columns, &coverage, &weights);
    info!("baseline coverage {:.2}%", baseline.coverage_pct * 100.0);

    let vehicles = params.p_vehicles.map(VehiclePolicy::with_budget);
    let instance = OptimizationInstance::new(coverage, weights, params.p_stations, vehicles)?;

    let model = build_model(&instance);
    let adapter = SolverAdapter::new(params.backend)?;
    let solution = adapter.solve(&model, params.time_limit_secs, params.verbose)?;

    let optimized = coverage_stats(&solution.open_sites, &instance.coverage, &instance.weights);
    let closure = gap_closure(baseline.coverage_pct, optimized.coverage_pct);
    info!(
        "optimized coverage {:.2}%, gap closed {:.2}%",
        optimized.coverage_pct * 100.0,
        closure.pct_closed * 100.0
    );

    let open_ids: Vec<u32> = solution
        .open_sites
        .iter()
        .map(|&column| candidates[column].id)
        .collect();

    let mut vehicles_per_site: IndexMap<u32, usize> = IndexMap::default();
    if !solution.vehicles.is_empty() {
        for &column in &solution.open_sites {
            vehicles_per_site.insert(candidates[column].id, solution.vehicles[column]);
        }
    }

    Ok(OptimizationRecord {
        solver_backend: solution.backend.to_string(),
        status: solution.status,
        objective_value: solution.objective,
        coverage_pct: optimized.coverage_pct,
        open_sites: open_ids,
        vehicles_per_site,
        solve_time_seconds: solution.solve_time_secs,
        optimality_gap_pct: solution.optimality_gap.map(|gap| gap * 100.0),
        baseline_coverage_pct: baseline.coverage_pct,
        gap_closure_pct: closure.pct_closed,
        parameters: RecordParameters {
            p_stations: params.p_stations,
            p_vehicles: params.p_vehicles,
            threshold_minutes: params.threshold_minutes,
        },
    })
}
