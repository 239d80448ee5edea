//! Commercial backend driven through the Gurobi C API.

use grb::constr::IneqExpr;
use grb::prelude::*;
use log::debug;
use std::time::Instant;

use crate::formulate::{LinSense, MipModel, VarKind};
use crate::solution::{decode_assignment, Solution};
use crate::solver::Backend;
use crate::{OptimizeError, SolveStatus};

/// Starting an environment fails without a readable license, which makes
/// this a pure probe of the host state.
pub fn license_available() -> bool {
    Env::new("").is_ok()
}

fn backend_err(err: grb::Error) -> OptimizeError {
    OptimizeError::Backend(format!("gurobi: {}", err))
}

pub fn solve(
    model: &MipModel,
    time_limit_secs: f64,
    verbose: bool,
) -> Result<Solution, OptimizeError> {
    let mut env = Env::new("").map_err(backend_err)?;
    env.set(param::OutputFlag, if verbose { 1 } else { 0 })
        .map_err(backend_err)?;
    // single thread and a fixed seed keep repeated solves reproducible
    env.set(param::Threads, 1).map_err(backend_err)?;
    env.set(param::Seed, 12345).map_err(backend_err)?;
    env.set(param::TimeLimit, time_limit_secs)
        .map_err(backend_err)?;

    let mut m = Model::with_env("max_coverage", &env).map_err(backend_err)?;

    // objective coefficients go in at variable creation
    let mut vars: Vec<Var> = Vec::with_capacity(model.variables.len());
    for var in &model.variables {
        let added = match var.kind {
            VarKind::Binary => m.add_var(&var.name, Binary, var.obj_coeff, 0.0, 1.0, []),
            VarKind::Integer { lb, ub } => m.add_var(&var.name, Integer, var.obj_coeff, lb, ub, []),
        }
        .map_err(backend_err)?;
        vars.push(added);
    }

    let sense = if model.maximize {
        ModelSense::Maximize
    } else {
        ModelSense::Minimize
    };
    m.set_attr(attr::ModelSense, sense).map_err(backend_err)?;

    for constr in &model.constraints {
        let ineq = IneqExpr {
            lhs: Expr::sum(
                constr
                    .terms
                    .iter()
                    .map(|&(idx, coeff)| coeff * vars[idx]),
            ),
            sense: match constr.sense {
                LinSense::Le => ConstrSense::Less,
                LinSense::Ge => ConstrSense::Greater,
                LinSense::Eq => ConstrSense::Equal,
            },
            rhs: Expr::Constant(constr.rhs),
        };
        m.add_constr(&constr.name, ineq).map_err(backend_err)?;
    }

    let start = Instant::now();
    m.optimize().map_err(backend_err)?;
    let solve_time_secs = start.elapsed().as_secs_f64();

    let status = m.status().map_err(backend_err)?;
    debug!("gurobi finished with {:?} after {:.2}s", status, solve_time_secs);

    match status {
        Status::Optimal => {
            let values = m
                .get_obj_attr_batch(attr::X, vars.clone())
                .map_err(backend_err)?;
            let objective = m.get_attr(attr::ObjVal).map_err(backend_err)?;
            let (open_sites, vehicles) = decode_assignment(&values, &model.layout);

            Ok(Solution {
                open_sites,
                vehicles,
                objective,
                status: SolveStatus::Optimal,
                optimality_gap: Some(0.0),
                solve_time_secs,
                backend: Backend::Gurobi,
            })
        }
        Status::TimeLimit => {
            let incumbents = m.get_attr(attr::SolCount).map_err(backend_err)?;
            if incumbents == 0 {
                return Ok(Solution::unknown(
                    &model.layout,
                    Backend::Gurobi,
                    solve_time_secs,
                ));
            }

            let values = m
                .get_obj_attr_batch(attr::X, vars.clone())
                .map_err(backend_err)?;
            let objective = m.get_attr(attr::ObjVal).map_err(backend_err)?;
            let gap = m.get_attr(attr::MIPGap).map_err(backend_err)?;
            let (open_sites, vehicles) = decode_assignment(&values, &model.layout);

            Ok(Solution {
                open_sites,
                vehicles,
                objective,
                status: SolveStatus::TimeLimitFeasible,
                optimality_gap: Some(gap),
                solve_time_secs,
                backend: Backend::Gurobi,
            })
        }
        Status::Infeasible | Status::InfOrUnbd => Err(OptimizeError::InfeasibleModel),
        other => Err(OptimizeError::Backend(format!(
            "gurobi returned status {:?}",
            other
        ))),
    }
}
