use ndarray::{arr2, Array2};
use shared::{
    coverage_stats, gap_closure, travel_time_matrix, CandidateSite, CoverageMatrix, DemandPoint,
    Location,
};

fn demand_at(index: usize, lat: f64, lon: f64, weight: f64) -> DemandPoint {
    DemandPoint {
        id: index as u32,
        index,
        location: Location::new(lat, lon),
        weight,
    }
}

fn site_at(index: usize, lat: f64, lon: f64) -> CandidateSite {
    CandidateSite {
        id: index as u32,
        index,
        location: Location::new(lat, lon),
    }
}

#[test]
fn test_meridian_distance_and_time() {
    // 0.1 degree of latitude is 11119.5 m on the sphere, independent of
    // the reference latitude
    let demand = vec![demand_at(0, 24.0, 54.0, 100.0)];
    let sites = vec![site_at(0, 24.1, 54.0)];

    let times = travel_time_matrix(&demand, &sites);

    // 11.1195 km at 65 km/h
    let expected_min = 11.11949 / 65.0 * 60.0;
    assert!((times[[0, 0]] - expected_min).abs() < 0.01);
}

#[test]
fn test_parallel_distance_shrinks_with_latitude() {
    // at 24.45 N a 0.1 degree step in longitude is about 10122 m, not the
    // 11119 m an unprojected degree would give
    let a = Location::new(24.45, 54.0);
    let b = Location::new(24.45, 54.1);

    let dist = a.distance_m(&b, 24.45);

    assert!((dist - 10122.0).abs() < 50.0);
    assert!(dist < 11000.0);
}

#[test]
fn test_coverage_threshold_inclusive() {
    let times = arr2(&[[8.0, 8.0001]]);
    let matrix = CoverageMatrix::build(&times, 8.0);

    assert!(matrix.reachable[[0, 0]]);
    assert!(!matrix.reachable[[0, 1]]);
}

#[test]
fn test_coverage_monotone_in_threshold() {
    let times = arr2(&[
        [1.0, 5.0, 9.0],
        [2.5, 7.5, 12.0],
        [6.0, 6.0, 6.0],
        [11.0, 13.0, 15.0],
    ]);

    let mut previous_count = 0;
    for threshold in [2.0, 4.0, 6.0, 8.0, 12.0, 20.0] {
        let matrix = CoverageMatrix::build(&times, threshold);
        let count = matrix.reachable.iter().filter(|&&covered| covered).count();
        assert!(count >= previous_count);
        previous_count = count;
    }

    // an entry that is true at a lower threshold stays true at a higher one
    let low = CoverageMatrix::build(&times, 6.0);
    let high = CoverageMatrix::build(&times, 9.0);
    for i in 0..low.n_demand() {
        for j in 0..low.n_candidates() {
            if low.reachable[[i, j]] {
                assert!(high.reachable[[i, j]]);
            }
        }
    }
}

#[test]
fn test_unreachable_rows_and_covering_sites() {
    let times = arr2(&[[1.0, 2.0], [20.0, 30.0], [3.0, 20.0]]);
    let matrix = CoverageMatrix::build(&times, 8.0);

    assert_eq!(matrix.unreachable_rows(), vec![1]);
    assert_eq!(matrix.covering_sites(0), vec![0, 1]);
    assert_eq!(matrix.covering_sites(1), Vec::<usize>::new());
    assert_eq!(matrix.covering_sites(2), vec![0]);
}

#[test]
fn test_coverage_stats_subset() {
    let matrix = CoverageMatrix {
        reachable: arr2(&[
            [true, false, false],
            [false, true, false],
            [false, false, true],
        ]),
    };
    let weights = [100.0, 50.0, 25.0];

    let report = coverage_stats(&[0, 1], &matrix, &weights);
    assert!((report.covered_weight - 150.0).abs() < 1e-12);
    assert!((report.total_weight - 175.0).abs() < 1e-12);
    assert!((report.coverage_pct - 150.0 / 175.0).abs() < 1e-12);

    let empty = coverage_stats(&[], &matrix, &weights);
    assert_eq!(empty.covered_weight, 0.0);
    assert_eq!(empty.coverage_pct, 0.0);
}

#[test]
fn test_coverage_stats_degenerate_is_fully_covered() {
    // zero total weight is vacuously full coverage, not a division error
    let matrix = CoverageMatrix {
        reachable: arr2(&[[true, false], [false, false]]),
    };
    let report = coverage_stats(&[0], &matrix, &[0.0, 0.0]);
    assert_eq!(report.coverage_pct, 1.0);

    // same for an empty demand set
    let empty_matrix = CoverageMatrix {
        reachable: Array2::from_elem((0, 2), false),
    };
    let report = coverage_stats(&[0, 1], &empty_matrix, &[]);
    assert_eq!(report.coverage_pct, 1.0);
}

#[test]
fn test_gap_closure_reference_case() {
    let closure = gap_closure(0.60, 0.948);
    assert!((closure.pct_closed - 0.87).abs() < 1e-6);
    assert!((closure.gap_before - 0.40).abs() < 1e-12);
    assert!((closure.gap_after - 0.052).abs() < 1e-12);
}

#[test]
fn test_gap_closure_edge_cases() {
    assert_eq!(gap_closure(0.5, 1.0).pct_closed, 1.0);
    assert_eq!(gap_closure(0.6, 0.6).pct_closed, 0.0);

    // saturated baseline: nothing left to close
    assert_eq!(gap_closure(1.0, 1.0).pct_closed, 1.0);
    assert_eq!(gap_closure(1.0, 0.9).pct_closed, 0.0);
}
