//! Open-source fallback backend built on HiGHS.

use highs::{Col, HighsModelStatus, RowProblem, Sense, SolvedModel};
use log::debug;
use std::time::Instant;

use crate::formulate::{LinSense, MipModel};
use crate::solution::{decode_assignment, Solution};
use crate::solver::Backend;
use crate::{OptimizeError, SolveStatus};

fn extract(
    solved: &SolvedModel,
    cols: &[Col],
    model: &MipModel,
    status: SolveStatus,
    optimality_gap: Option<f64>,
    solve_time_secs: f64,
) -> Solution {
    let raw = solved.get_solution();
    let values: Vec<f64> = cols.iter().map(|&col| raw[col]).collect();
    let (open_sites, vehicles) = decode_assignment(&values, &model.layout);

    Solution {
        open_sites,
        vehicles,
        objective: solved.objective_value(),
        status,
        optimality_gap,
        solve_time_secs,
        backend: Backend::Highs,
    }
}

pub fn solve(
    model: &MipModel,
    time_limit_secs: f64,
    verbose: bool,
) -> Result<Solution, OptimizeError> {
    let mut pb = RowProblem::new();

    // integrality must be declared when the column is added
    let mut cols: Vec<Col> = Vec::with_capacity(model.variables.len());
    for var in &model.variables {
        let (lb, ub) = var.kind.bounds();
        let col = pb.add_column_with_integrality(var.obj_coeff, lb..=ub, true);
        cols.push(col);
    }

    for constr in &model.constraints {
        let terms: Vec<(Col, f64)> = constr
            .terms
            .iter()
            .map(|&(idx, coeff)| (cols[idx], coeff))
            .collect();

        match constr.sense {
            LinSense::Le => pb.add_row(..=constr.rhs, terms),
            LinSense::Ge => pb.add_row(constr.rhs.., terms),
            LinSense::Eq => pb.add_row(constr.rhs..=constr.rhs, terms),
        };
    }

    let sense = if model.maximize {
        Sense::Maximise
    } else {
        Sense::Minimise
    };
    let mut highs_model = pb.optimise(sense);
    highs_model.set_option("time_limit", time_limit_secs);
    highs_model.set_option("output_flag", verbose);

    let start = Instant::now();
    let solved = highs_model.solve();
    let solve_time_secs = start.elapsed().as_secs_f64();

    let status = solved.status();
    debug!("highs finished with {:?} after {:.2}s", status, solve_time_secs);

    match status {
        HighsModelStatus::Optimal | HighsModelStatus::ModelEmpty => Ok(extract(
            &solved,
            &cols,
            model,
            SolveStatus::Optimal,
            Some(0.0),
            solve_time_secs,
        )),
        HighsModelStatus::Infeasible => Err(OptimizeError::InfeasibleModel),
        other => {
            // the status enum spells the time-limit case differently
            // across highs releases; its debug name is stable
            if format!("{:?}", other).contains("TimeLimit") {
                // the incumbent is still exposed at expiry; the bindings
                // do not surface the final relative gap
                Ok(extract(
                    &solved,
                    &cols,
                    model,
                    SolveStatus::TimeLimitFeasible,
                    None,
                    solve_time_secs,
                ))
            } else {
                Err(OptimizeError::Backend(format!(
                    "highs returned status {:?}",
                    other
                )))
            }
        }
    }
}
