use crate::coverage::CoverageMatrix;

/// Tolerance below which a coverage gap counts as already closed.
pub const GAP_EPSILON: f64 = 1e-9;

/// Coverage share of one station subset. Stateless derived value,
/// recomputed per subset and never cached across subsets.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    pub coverage_pct: f64,
    pub covered_weight: f64,
    pub total_weight: f64,
}

/// A demand row counts as covered iff at least one column of the subset
/// is true for that row. Works the same for the baseline network and for
/// an optimized set of open sites.
///
/// Zero demand points or zero total weight is vacuously full coverage
/// (1.0), never a division error.
pub fn coverage_stats(
    subset_columns: &[usize],
    coverage: &CoverageMatrix,
    weights: &[f64],
) -> CoverageReport {
    let total_weight: f64 = weights.iter().sum();

    let covered_weight: f64 = weights
        .iter()
        .enumerate()
        .filter(|(i, _)| subset_columns.iter().any(|&j| coverage.reachable[[*i, j]]))
        .map(|(_, weight)| *weight)
        .sum();

    let coverage_pct = if total_weight <= 0.0 {
        1.0
    } else {
        covered_weight / total_weight
    };

    CoverageReport {
        coverage_pct,
        covered_weight,
        total_weight,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GapClosure {
    pub gap_before: f64,
    pub gap_after: f64,
    pub gap_closed: f64,
    pub pct_closed: f64,
}

/// Fraction of the uncovered-demand gap eliminated between a baseline and
/// an optimized network.
///
/// gap_before = 1 - baseline, gap_after = 1 - optimized,
/// pct_closed = (gap_before - gap_after) / gap_before. A baseline gap
/// within [`GAP_EPSILON`] of zero closes to 1.0 when the optimized gap is
/// also zero and to 0.0 otherwise.
pub fn gap_closure(baseline_pct: f64, optimized_pct: f64) -> GapClosure {
    let gap_before = 1.0 - baseline_pct;
    let gap_after = 1.0 - optimized_pct;

    let pct_closed = if gap_before <= GAP_EPSILON {
        if gap_after <= GAP_EPSILON {
            1.0
        } else {
            0.0
        }
    } else {
        (gap_before - gap_after) / gap_before
    };

    GapClosure {
        gap_before,
        gap_after,
        gap_closed: gap_before - gap_after,
        pct_closed,
    }
}
