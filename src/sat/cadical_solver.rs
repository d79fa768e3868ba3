use super::{Assignment, Literal, SatSolver, SolvingListener, SolvingResult};
use cadical::Solver as CadicalCSolver;

/// A wrapper around the CaDiCaL SAT solver.
#[derive(Default)]
pub struct CadicalSolver {
    solver: CadicalCSolver,
    listeners: Vec<Box<dyn SolvingListener>>,
    n_vars: usize,
    n_clauses: usize,
}

impl SatSolver for CadicalSolver {
    fn add_clause(&mut self, cl: Vec<Literal>) {
        cl.iter()
            .for_each(|l| self.n_vars = usize::max(self.n_vars, usize::from(l.var())));
        self.solver
            .add_clause(cl.into_iter().map(|l| isize::from(l) as i32));
        self.n_clauses += 1;
    }

    fn solve_under_assumptions(&mut self, assumptions: &[Literal]) -> SolvingResult {
        self.listeners
            .iter()
            .for_each(|l| l.solving_start(self.n_vars, self.n_clauses));
        let solving_result = match self
            .solver
            .solve_with(assumptions.iter().map(|l| isize::from(*l) as i32))
        {
            Some(true) => {
                let known_vars = self.solver.max_variable() as usize;
                let assignment = Assignment::new(
                    (1..=usize::max(self.n_vars, known_vars))
                        .map(|i| {
                            if i <= known_vars {
                                self.solver.value(i as i32)
                            } else {
                                None
                            }
                        })
                        .collect(),
                );
                SolvingResult::Satisfiable(assignment)
            }
            Some(false) => SolvingResult::Unsatisfiable,
            None => SolvingResult::Unknown,
        };
        self.listeners
            .iter()
            .for_each(|l| l.solving_end(&solving_result));
        solving_result
    }

    fn n_vars(&self) -> usize {
        self.n_vars
    }

    fn reserve(&mut self, new_max_id: usize) {
        self.n_vars = usize::max(self.n_vars, new_max_id)
    }

    fn add_listener(&mut self, listener: Box<dyn SolvingListener>) {
        self.listeners.push(listener);
    }
}
