use log::{debug, info};

use crate::error::ValidationError;
use crate::feasibility::EPSILON;
use crate::problem::TransportationProblem;
use crate::solution::{AllocationCell, TransportationSolution};

/// Northwest-corner allocator for balanced transportation problems.
///
/// Produces a feasible starting allocation, not necessarily the cheapest one.
pub struct TransportationSolver {
    /// Allowed gap between total supply and total demand
    tolerance: f64,
}

impl Default for TransportationSolver {
    fn default() -> Self {
        Self { tolerance: EPSILON }
    }
}

impl TransportationSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn solve(&self, problem: &TransportationProblem) -> Result<TransportationSolution, ValidationError> {
        problem.validate(self.tolerance)?;

        let (m, n) = (problem.supply.len(), problem.demand.len());
        let mut allocation = vec![vec![0.0; n]; m];
        let mut supply_left = problem.supply.clone();
        let mut demand_left = problem.demand.clone();
        let mut total_cost = 0.0;
        let mut cells = Vec::new();
        let mut steps = vec![format!(
            "Total supply {} equals total demand {}",
            problem.total_supply(),
            problem.total_demand()
        )];

        let (mut i, mut j) = (0, 0);
        while i < m && j < n {
            let quantity = supply_left[i].min(demand_left[j]);
            let unit_cost = problem.costs[i][j];
            allocation[i][j] = quantity;
            total_cost += quantity * unit_cost;
            supply_left[i] -= quantity;
            demand_left[j] -= quantity;

            debug!("allocate {} to ({}, {}) at unit cost {}", quantity, i, j, unit_cost);
            steps.push(format!(
                "Allocate {} from source {} to destination {} at cost {} each",
                quantity,
                i + 1,
                j + 1,
                unit_cost
            ));
            cells.push(AllocationCell {
                source: i,
                destination: j,
                quantity,
                unit_cost,
            });

            // min() leaves an exact zero on at least one side
            let row_done = supply_left[i] == 0.0;
            let column_done = demand_left[j] == 0.0;
            if row_done {
                i += 1;
            }
            if column_done {
                j += 1;
            }
        }

        steps.push(format!("Total transportation cost: {}", total_cost));
        info!("northwest corner placed {} cells, total cost {}", cells.len(), total_cost);

        Ok(TransportationSolution {
            allocation,
            total_cost,
            cells,
            steps,
        })
    }
}

/// Northwest-corner allocation with the default balance tolerance
pub fn solve_transportation(
    supply: &[f64],
    demand: &[f64],
    costs: &[Vec<f64>],
) -> Result<TransportationSolution, ValidationError> {
    let problem = TransportationProblem::new(supply.to_vec(), demand.to_vec(), costs.to_vec());
    TransportationSolver::new().solve(&problem)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_within_limits(problem: &TransportationProblem, solution: &TransportationSolution) {
        for (i, &supply) in problem.supply.iter().enumerate() {
            assert!(solution.shipped_from(i) <= supply + 1e-9, "row {} over supply", i);
        }
        for (j, &demand) in problem.demand.iter().enumerate() {
            assert!(solution.shipped_to(j) <= demand + 1e-9, "column {} over demand", j);
        }
        let expected = problem.total_supply().min(problem.total_demand());
        assert!((solution.total_shipped() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_scenario_c() {
        let problem = TransportationProblem::new(
            vec![20.0, 30.0],
            vec![10.0, 40.0],
            vec![vec![2.0, 3.0], vec![1.0, 4.0]],
        );
        let solution = TransportationSolver::new().solve(&problem).unwrap();

        assert_eq!(solution.allocation, vec![vec![10.0, 10.0], vec![0.0, 30.0]]);
        assert_eq!(solution.total_cost, 170.0);
        assert_eq!(solution.cells.len(), 3);
        assert_within_limits(&problem, &solution);
    }

    #[test]
    fn test_three_by_four() {
        let problem = TransportationProblem::new(
            vec![250.0, 300.0, 400.0],
            vec![200.0, 225.0, 275.0, 250.0],
            vec![
                vec![11.0, 13.0, 17.0, 14.0],
                vec![16.0, 18.0, 14.0, 10.0],
                vec![21.0, 24.0, 13.0, 10.0],
            ],
        );
        let solution = TransportationSolver::new().solve(&problem).unwrap();

        assert_eq!(
            solution.allocation,
            vec![
                vec![200.0, 50.0, 0.0, 0.0],
                vec![0.0, 175.0, 125.0, 0.0],
                vec![0.0, 0.0, 150.0, 250.0],
            ]
        );
        // 2200 + 650 + 3150 + 1750 + 1950 + 2500
        assert_eq!(solution.total_cost, 12200.0);
        assert_within_limits(&problem, &solution);
    }

    #[test]
    fn test_degenerate_step_advances_both() {
        // Row 0 and column 0 run out together
        let problem = TransportationProblem::new(
            vec![10.0, 20.0],
            vec![10.0, 20.0],
            vec![vec![1.0, 5.0], vec![5.0, 2.0]],
        );
        let solution = TransportationSolver::new().solve(&problem).unwrap();
        assert_eq!(solution.allocation, vec![vec![10.0, 0.0], vec![0.0, 20.0]]);
        assert_eq!(solution.cells.len(), 2);
        assert_eq!(solution.total_cost, 50.0);
    }

    #[test]
    fn test_zero_supply_row() {
        let problem = TransportationProblem::new(
            vec![0.0, 15.0],
            vec![5.0, 10.0],
            vec![vec![9.0, 9.0], vec![1.0, 2.0]],
        );
        let solution = TransportationSolver::new().solve(&problem).unwrap();
        assert_eq!(solution.allocation, vec![vec![0.0, 0.0], vec![5.0, 10.0]]);
        assert_eq!(solution.total_cost, 25.0);
        assert_within_limits(&problem, &solution);
    }

    #[test]
    fn test_fractional_quantities() {
        let problem = TransportationProblem::new(
            vec![0.1, 0.2],
            vec![0.15, 0.15],
            vec![vec![1.0, 1.0], vec![1.0, 1.0]],
        );
        let solution = TransportationSolver::new().solve(&problem).unwrap();
        assert_within_limits(&problem, &solution);
    }

    #[test]
    fn test_unbalanced_rejected_before_allocation() {
        let result = solve_transportation(&[20.0, 30.0], &[10.0, 30.0], &[vec![2.0, 3.0], vec![1.0, 4.0]]);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::Unbalanced { supply: 50.0, demand: 40.0 }
        );
    }

    #[test]
    fn test_free_function() {
        let solution = solve_transportation(&[20.0, 30.0], &[10.0, 40.0], &[vec![2.0, 3.0], vec![1.0, 4.0]]).unwrap();
        assert_eq!(solution.total_cost, 170.0);
        assert_eq!(solution.steps.first().unwrap(), "Total supply 50 equals total demand 50");
    }
}
