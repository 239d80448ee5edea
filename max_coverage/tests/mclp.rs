use max_coverage::{
    build_model, Backend, LinSense, OptimizationInstance, OptimizeError, Solution, SolveStatus,
    SolverAdapter, VehiclePolicy,
};
use ndarray::{arr2, Array2};
use rand::prelude::StdRng;
use rand::{Rng, SeedableRng};
use shared::{coverage_stats, CoverageMatrix};

fn solve_highs(instance: &OptimizationInstance) -> Solution {
    let model = build_model(instance);
    let adapter = SolverAdapter::new(Some(Backend::Highs)).unwrap();
    adapter.solve(&model, 60.0, false).unwrap()
}

#[test]
fn test_two_by_two_picks_heavier_site() {
    // node 0 covered only by site 0, node 1 only by site 1, one station
    // to place: the heavier node wins
    let coverage = CoverageMatrix {
        reachable: arr2(&[[true, false], [false, true]]),
    };
    let weights = vec![100.0, 50.0];

    let instance = OptimizationInstance::new(coverage, weights, 1, None).unwrap();
    let solution = solve_highs(&instance);

    assert_eq!(solution.status, SolveStatus::Optimal);
    assert_eq!(solution.open_sites, vec![0]);

    let report = coverage_stats(&solution.open_sites, &instance.coverage, &instance.weights);
    assert!((report.coverage_pct - 100.0 / 150.0).abs() < 1e-9);
}

#[test]
fn test_budget_respected_when_everything_covers() {
    let coverage = CoverageMatrix {
        reachable: Array2::from_elem((10, 10), true),
    };
    let weights = vec![1.0; 10];

    let instance = OptimizationInstance::new(coverage, weights, 3, None).unwrap();
    let solution = solve_highs(&instance);

    assert_eq!(solution.status, SolveStatus::Optimal);
    assert!(solution.open_sites.len() <= 3);

    let report = coverage_stats(&solution.open_sites, &instance.coverage, &instance.weights);
    assert!((report.coverage_pct - 1.0).abs() < 1e-9);
}

#[test]
fn test_coverage_monotone_in_station_budget() {
    let mut rng = StdRng::seed_from_u64(42);
    let n_demand = 25;
    let n_candidates = 8;

    let reachable =
        Array2::from_shape_fn((n_demand, n_candidates), |_| rng.gen_bool(0.3));
    let weights: Vec<f64> = (0..n_demand).map(|_| rng.gen_range(1.0..10.0)).collect();

    let mut previous_pct = 0.0;
    for p in 1..=n_candidates {
        let instance = OptimizationInstance::new(
            CoverageMatrix {
                reachable: reachable.clone(),
            },
            weights.clone(),
            p,
            None,
        )
        .unwrap();

        let solution = solve_highs(&instance);
        assert_eq!(solution.status, SolveStatus::Optimal);
        assert!(solution.open_sites.len() <= p);

        let report = coverage_stats(&solution.open_sites, &instance.coverage, &instance.weights);
        assert!(report.coverage_pct >= previous_pct - 1e-9);
        previous_pct = report.coverage_pct;
    }
}

#[test]
fn test_vehicle_allocation_respects_bounds() {
    let coverage = CoverageMatrix {
        reachable: arr2(&[
            [true, false, false, false],
            [true, true, false, false],
            [false, true, true, false],
            [false, false, true, true],
            [false, false, false, true],
            [true, false, false, true],
        ]),
    };
    let weights = vec![120.0, 80.0, 200.0, 65.0, 90.0, 30.0];
    let policy = VehiclePolicy {
        budget: 5,
        per_site_min: 1,
        per_site_max: 2,
    };

    let instance = OptimizationInstance::new(coverage, weights, 3, Some(policy)).unwrap();
    let solution = solve_highs(&instance);

    assert_eq!(solution.status, SolveStatus::Optimal);
    assert!(solution.open_sites.len() <= 3);
    assert_eq!(solution.vehicles.len(), 4);

    let total: usize = solution.vehicles.iter().sum();
    assert!(total <= policy.budget);

    for column in 0..4 {
        if solution.open_sites.contains(&column) {
            assert!(solution.vehicles[column] >= policy.per_site_min);
            assert!(solution.vehicles[column] <= policy.per_site_max);
        } else {
            assert_eq!(solution.vehicles[column], 0);
        }
    }
}

#[test]
fn test_unreachable_demand_never_counted() {
    // the second row has no covering candidate; its huge weight must not
    // leak into the objective
    let coverage = CoverageMatrix {
        reachable: arr2(&[[true], [false]]),
    };
    let weights = vec![10.0, 1000.0];

    let instance = OptimizationInstance::new(coverage, weights, 1, None).unwrap();
    let solution = solve_highs(&instance);

    assert_eq!(solution.status, SolveStatus::Optimal);
    assert_eq!(solution.open_sites, vec![0]);
    assert!((solution.objective - 10.0).abs() < 1e-6);
}

#[test]
fn test_formulation_structure() {
    let coverage = CoverageMatrix {
        reachable: arr2(&[[true, true], [false, false], [false, true]]),
    };
    let weights = vec![1.0, 2.0, 3.0];
    let policy = VehiclePolicy::with_budget(4);

    let instance = OptimizationInstance::new(coverage, weights, 2, Some(policy)).unwrap();
    let model = build_model(&instance);

    // x block, y block, v block
    assert_eq!(model.variables.len(), 2 + 3 + 2);
    assert!(model.maximize);

    // 3 coverage rows + station budget + vehicle budget + 2x2 linkage
    assert_eq!(model.constraints.len(), 3 + 1 + 1 + 4);

    // the uncoverable row is pinned to zero, not left free
    let pinned = &model.constraints[1];
    assert_eq!(pinned.name, "unreachable[1]");
    assert_eq!(pinned.sense, LinSense::Eq);
    assert_eq!(pinned.rhs, 0.0);
    assert_eq!(pinned.terms, vec![(model.layout.y(1), 1.0)]);

    // station budget row caps the x block at p
    let budget = model
        .constraints
        .iter()
        .find(|constr| constr.name == "budget")
        .unwrap();
    assert_eq!(budget.sense, LinSense::Le);
    assert_eq!(budget.rhs, 2.0);
    assert_eq!(budget.terms.len(), 2);
}

#[test]
fn test_validation_rejects_bad_inputs() {
    let reachable = arr2(&[[true, false], [false, true]]);

    // weight vector length mismatch
    let result = OptimizationInstance::new(
        CoverageMatrix {
            reachable: reachable.clone(),
        },
        vec![1.0],
        1,
        None,
    );
    assert!(matches!(result, Err(OptimizeError::InvalidInput(_))));

    // zero budget
    let result = OptimizationInstance::new(
        CoverageMatrix {
            reachable: reachable.clone(),
        },
        vec![1.0, 1.0],
        0,
        None,
    );
    assert!(matches!(result, Err(OptimizeError::InvalidInput(_))));

    // budget above candidate count
    let result = OptimizationInstance::new(
        CoverageMatrix {
            reachable: reachable.clone(),
        },
        vec![1.0, 1.0],
        3,
        None,
    );
    assert!(matches!(result, Err(OptimizeError::InvalidInput(_))));

    // negative weight
    let result = OptimizationInstance::new(
        CoverageMatrix {
            reachable: reachable.clone(),
        },
        vec![1.0, -1.0],
        1,
        None,
    );
    assert!(matches!(result, Err(OptimizeError::InvalidInput(_))));

    // inverted vehicle bounds
    let result = OptimizationInstance::new(
        CoverageMatrix { reachable },
        vec![1.0, 1.0],
        1,
        Some(VehiclePolicy {
            budget: 4,
            per_site_min: 3,
            per_site_max: 2,
        }),
    );
    assert!(matches!(result, Err(OptimizeError::InvalidInput(_))));
}

#[cfg(not(feature = "gurobi"))]
#[test]
fn test_gurobi_override_fails_fast_when_not_compiled() {
    let result = SolverAdapter::new(Some(Backend::Gurobi));
    assert!(matches!(result, Err(OptimizeError::SolverUnavailable(_))));
}
