use crate::instance::OptimizationInstance;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarKind {
    Binary,
    Integer { lb: f64, ub: f64 },
}

impl VarKind {
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            VarKind::Binary => (0.0, 1.0),
            VarKind::Integer { lb, ub } => (lb, ub),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub kind: VarKind,
    pub obj_coeff: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinSense {
    Le,
    Ge,
    Eq,
}

/// One linear row: sum of (column, coefficient) terms compared against a
/// right hand side.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub name: String,
    pub terms: Vec<(usize, f64)>,
    pub sense: LinSense,
    pub rhs: f64,
}

/// Column layout of the assembled program: the x block (one binary per
/// candidate), then the y block (one binary per demand point), then the
/// optional v block (one integer per candidate).
#[derive(Debug, Clone, Copy)]
pub struct VarLayout {
    pub n_candidates: usize,
    pub n_demand: usize,
    pub has_vehicles: bool,
}

impl VarLayout {
    pub fn x(&self, j: usize) -> usize {
        j
    }

    pub fn y(&self, i: usize) -> usize {
        self.n_candidates + i
    }

    pub fn v(&self, j: usize) -> usize {
        debug_assert!(self.has_vehicles);
        self.n_candidates + self.n_demand + j
    }

    pub fn n_vars(&self) -> usize {
        self.n_candidates
            + self.n_demand
            + if self.has_vehicles {
                self.n_candidates
            } else {
                0
            }
    }
}

/// Backend-independent description of the program. Each solver backend
/// translates this into its native variable/constraint calls.
#[derive(Debug, Clone)]
pub struct MipModel {
    pub variables: Vec<Variable>,
    pub constraints: Vec<Constraint>,
    pub maximize: bool,
    pub layout: VarLayout,
}

/// Assemble the maximum-coverage program for a validated instance.
///
/// Objective: maximize sum of weight_i * y_i; station and vehicle
/// variables carry no objective weight. Coverage linking uses
/// sum_{j in C_i} x_j >= y_i; with non-negative weights the maximizer
/// never leaves a reachable y_i at zero, so y could be relaxed to a
/// continuous [0, 1] variable without changing the optimum. Rows with an
/// empty covering set get y_i pinned to zero instead of left free.
pub fn build_model(instance: &OptimizationInstance) -> MipModel {
    let layout = VarLayout {
        n_candidates: instance.n_candidates(),
        n_demand: instance.n_demand(),
        has_vehicles: instance.vehicles.is_some(),
    };

    let mut variables = Vec::with_capacity(layout.n_vars());
    for j in 0..layout.n_candidates {
        variables.push(Variable {
            name: format!("station[{}]", j),
            kind: VarKind::Binary,
            obj_coeff: 0.0,
        });
    }
    for i in 0..layout.n_demand {
        variables.push(Variable {
            name: format!("covered[{}]", i),
            kind: VarKind::Binary,
            obj_coeff: instance.weights[i],
        });
    }
    if let Some(policy) = &instance.vehicles {
        for j in 0..layout.n_candidates {
            variables.push(Variable {
                name: format!("vehicles[{}]", j),
                kind: VarKind::Integer {
                    lb: 0.0,
                    ub: policy.per_site_max as f64,
                },
                obj_coeff: 0.0,
            });
        }
    }

    let mut constraints = Vec::new();

    // coverage linking, one row per demand point
    for i in 0..layout.n_demand {
        let covering = instance.coverage.covering_sites(i);
        if covering.is_empty() {
            constraints.push(Constraint {
                name: format!("unreachable[{}]", i),
                terms: vec![(layout.y(i), 1.0)],
                sense: LinSense::Eq,
                rhs: 0.0,
            });
        } else {
            let mut terms: Vec<(usize, f64)> =
                covering.iter().map(|&j| (layout.x(j), 1.0)).collect();
            terms.push((layout.y(i), -1.0));
            constraints.push(Constraint {
                name: format!("cov[{}]", i),
                terms,
                sense: LinSense::Ge,
                rhs: 0.0,
            });
        }
    }

    // station budget
    constraints.push(Constraint {
        name: "budget".to_string(),
        terms: (0..layout.n_candidates).map(|j| (layout.x(j), 1.0)).collect(),
        sense: LinSense::Le,
        rhs: instance.p_stations as f64,
    });

    if let Some(policy) = &instance.vehicles {
        constraints.push(Constraint {
            name: "vehicle_budget".to_string(),
            terms: (0..layout.n_candidates).map(|j| (layout.v(j), 1.0)).collect(),
            sense: LinSense::Le,
            rhs: policy.budget as f64,
        });

        for j in 0..layout.n_candidates {
            // no units at closed sites
            constraints.push(Constraint {
                name: format!("vehicle_max[{}]", j),
                terms: vec![(layout.v(j), 1.0), (layout.x(j), -(policy.per_site_max as f64))],
                sense: LinSense::Le,
                rhs: 0.0,
            });
            // every opened site receives at least the minimum
            constraints.push(Constraint {
                name: format!("vehicle_min[{}]", j),
                terms: vec![(layout.v(j), 1.0), (layout.x(j), -(policy.per_site_min as f64))],
                sense: LinSense::Ge,
                rhs: 0.0,
            });
        }
    }

    MipModel {
        variables,
        constraints,
        maximize: true,
        layout,
    }
}
