//! Backend selection and the uniform solve boundary.
//!
//! Backend choice is an injected strategy: an explicit override wins,
//! then the `COVERAGE_SOLVER` environment variable, then a runtime probe
//! for a usable Gurobi license, then the open-source fallback.

#[cfg(feature = "gurobi")]
mod gurobi;
mod highs;

use log::info;
use serde::Serialize;
use std::env;
use std::fmt;

use crate::formulate::MipModel;
use crate::solution::Solution;
use crate::OptimizeError;

/// Environment variable that forces a backend, overriding detection.
pub const BACKEND_ENV_VAR: &str = "COVERAGE_SOLVER";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Gurobi,
    Highs,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Backend::Gurobi => write!(f, "gurobi"),
            Backend::Highs => write!(f, "highs"),
        }
    }
}

/// Pure function of the process environment: reads [`BACKEND_ENV_VAR`],
/// then probes for a Gurobi license, and falls back to HiGHS. Carries no
/// state and makes no solve decisions beyond returning an identifier.
pub fn detect_backend() -> Backend {
    match env::var(BACKEND_ENV_VAR).ok().as_deref() {
        Some("gurobi") => return Backend::Gurobi,
        Some("highs") => return Backend::Highs,
        Some(other) => info!("ignoring unknown {} value {:?}", BACKEND_ENV_VAR, other),
        None => {}
    }

    if gurobi_license_available() {
        return Backend::Gurobi;
    }

    Backend::Highs
}

#[cfg(feature = "gurobi")]
fn gurobi_license_available() -> bool {
    gurobi::license_available()
}

#[cfg(not(feature = "gurobi"))]
fn gurobi_license_available() -> bool {
    false
}

/// Submits a formulated model to one backend and hands back a normalized
/// [`Solution`]. Construction fails before any solve attempt if the
/// requested backend cannot run in this build or environment.
pub struct SolverAdapter {
    backend: Backend,
}

impl SolverAdapter {
    pub fn new(override_backend: Option<Backend>) -> Result<SolverAdapter, OptimizeError> {
        let backend = match override_backend {
            Some(chosen) => chosen,
            None => detect_backend(),
        };

        if backend == Backend::Gurobi {
            if !cfg!(feature = "gurobi") {
                return Err(OptimizeError::SolverUnavailable(
                    "gurobi backend requested but not compiled in (enable the `gurobi` feature)"
                        .to_string(),
                ));
            }
            if !gurobi_license_available() {
                return Err(OptimizeError::SolverUnavailable(
                    "no usable gurobi license found".to_string(),
                ));
            }
        }

        info!("solving with {} backend", backend);
        Ok(SolverAdapter { backend })
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Blocking solve under a wall-clock limit. Expiry is not an error;
    /// the incumbent comes back as `TimeLimitFeasible` together with the
    /// reported gap. Results are deterministic only within a single
    /// backend and seed.
    pub fn solve(
        &self,
        model: &MipModel,
        time_limit_secs: f64,
        verbose: bool,
    ) -> Result<Solution, OptimizeError> {
        match self.backend {
            #[cfg(feature = "gurobi")]
            Backend::Gurobi => gurobi::solve(model, time_limit_secs, verbose),
            #[cfg(not(feature = "gurobi"))]
            Backend::Gurobi => Err(OptimizeError::SolverUnavailable(
                "gurobi backend not compiled in".to_string(),
            )),
            Backend::Highs => highs::solve(model, time_limit_secs, verbose),
        }
    }
}
