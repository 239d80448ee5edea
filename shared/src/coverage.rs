use crate::demand::DemandPoint;
use crate::site::CandidateSite;
use crate::AVG_SPEED_KMH;

use log::info;
use ndarray::Array2;

/// Pairwise travel time in minutes from every candidate site to every
/// demand point, dimensions (n_demand x n_candidates).
///
/// Both point sets are projected into a planar frame anchored at the mean
/// demand latitude before distances are taken, then converted to minutes
/// at [`AVG_SPEED_KMH`].
pub fn travel_time_matrix(demand: &[DemandPoint], sites: &[CandidateSite]) -> Array2<f64> {
    let ref_lat = if demand.is_empty() {
        0.0
    } else {
        demand.iter().map(|d| d.location.lat).sum::<f64>() / demand.len() as f64
    };

    let mut times = Array2::zeros((demand.len(), sites.len()));
    for (i, point) in demand.iter().enumerate() {
        for (j, site) in sites.iter().enumerate() {
            let dist_km = point.location.distance_m(&site.location, ref_lat) / 1000.0;
            times[[i, j]] = dist_km / AVG_SPEED_KMH * 60.0;
        }
    }

    times
}

/// Boolean reachability, dimensions (n_demand x n_candidates). Entry
/// [i, j] is true iff candidate j reaches demand i within the threshold.
/// Derived data: rebuilt whenever the threshold or the point sets change.
#[derive(Debug, Clone)]
pub struct CoverageMatrix {
    pub reachable: Array2<bool>,
}

impl CoverageMatrix {
    /// The comparison is inclusive: a demand point exactly at the
    /// threshold counts as covered.
    pub fn build(times: &Array2<f64>, threshold_minutes: f64) -> CoverageMatrix {
        let matrix = CoverageMatrix {
            reachable: times.mapv(|t| t <= threshold_minutes),
        };

        let unreachable = matrix.unreachable_rows().len();
        if unreachable > 0 {
            info!(
                "{} of {} demand points have no candidate within {} min",
                unreachable,
                matrix.n_demand(),
                threshold_minutes
            );
        }

        matrix
    }

    pub fn n_demand(&self) -> usize {
        self.reachable.nrows()
    }

    pub fn n_candidates(&self) -> usize {
        self.reachable.ncols()
    }

    /// Candidate columns covering demand row i (the covering set of i).
    pub fn covering_sites(&self, i: usize) -> Vec<usize> {
        self.reachable
            .row(i)
            .iter()
            .enumerate()
            .filter(|(_, &covered)| covered)
            .map(|(j, _)| j)
            .collect()
    }

    /// Demand rows with an empty covering set. The formulator pins the
    /// coverage variable of these rows to zero instead of leaving it free.
    pub fn unreachable_rows(&self) -> Vec<usize> {
        (0..self.n_demand())
            .filter(|&i| self.reachable.row(i).iter().all(|&covered| !covered))
            .collect()
    }
}
