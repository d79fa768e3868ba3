use super::{Literal, SatSolver, SolvingListener, SolvingResult, Variable};

/// A scoped SAT solving resource.
///
/// A state wraps an incremental SAT solver and adds some conveniences on top of it:
/// assumptions are accumulated by [assume](Self::assume) and consumed by the next satisfiability check,
/// fresh variables may be requested, and witnesses can be restricted to a set of atoms.
///
/// A state is released either by an explicit call to [close](Self::close) or when it is dropped.
/// Using a closed state is a programming error and leads to a panic.
pub struct SatSolverState {
    solver: Option<Box<dyn SatSolver>>,
    assumptions: Vec<Literal>,
}

impl SatSolverState {
    /// Builds a new state on top of a solver.
    pub fn new(solver: Box<dyn SatSolver>) -> Self {
        Self {
            solver: Some(solver),
            assumptions: vec![],
        }
    }

    fn solver(&mut self) -> &mut Box<dyn SatSolver> {
        match self.solver.as_mut() {
            Some(s) => s,
            None => panic!("cannot use a closed SAT solver state"),
        }
    }

    /// Adds a clause to the underlying solver.
    pub fn add(&mut self, clause: Vec<Literal>) {
        self.solver().add_clause(clause);
    }

    /// Adds some assumptions for the next satisfiability check.
    pub fn assume(&mut self, assumptions: &[Literal]) {
        if self.solver.is_none() {
            panic!("cannot use a closed SAT solver state");
        }
        self.assumptions.extend_from_slice(assumptions);
    }

    fn check(&mut self) -> SolvingResult {
        let assumptions = std::mem::take(&mut self.assumptions);
        self.solver().solve_under_assumptions(&assumptions)
    }

    /// Checks the satisfiability of the clauses and the pending assumptions.
    ///
    /// The pending assumptions are discarded by this call.
    pub fn satisfiable(&mut self) -> bool {
        self.check().unwrap_satisfiable()
    }

    /// Checks the satisfiability of the clauses and the pending assumptions, and returns the atoms set to true among the provided ones.
    ///
    /// If the problem is unsatisfiable, [Option::None] is returned.
    /// Atoms left unassigned by the solver are considered false.
    /// The pending assumptions are discarded by this call.
    pub fn witness(&mut self, atoms: &[Variable]) -> Option<Vec<Variable>> {
        self.check().unwrap_model().map(|assignment| {
            atoms
                .iter()
                .filter(|a| assignment.value_of(**a) == Some(true))
                .copied()
                .collect()
        })
    }

    /// Returns a variable that was never used before in this state.
    pub fn new_var(&mut self) -> Variable {
        let solver = self.solver();
        let v = solver.n_vars() + 1;
        solver.reserve(v);
        Variable::from(v)
    }

    /// Releases the underlying solver.
    ///
    /// Closing an already closed state has no effect.
    pub fn close(&mut self) {
        if self.solver.take().is_some() {
            log::debug!("closed a SAT solver state");
        }
        self.assumptions.clear();
    }

    /// Returns `true` iff this state has been closed.
    pub fn is_closed(&self) -> bool {
        self.solver.is_none()
    }
}

impl SatSolver for SatSolverState {
    fn add_clause(&mut self, cl: Vec<Literal>) {
        self.add(cl)
    }

    fn solve_under_assumptions(&mut self, assumptions: &[Literal]) -> SolvingResult {
        self.assume(assumptions);
        self.check()
    }

    fn n_vars(&self) -> usize {
        match self.solver.as_ref() {
            Some(s) => s.n_vars(),
            None => panic!("cannot use a closed SAT solver state"),
        }
    }

    fn reserve(&mut self, new_max_id: usize) {
        self.solver().reserve(new_max_id)
    }

    fn add_listener(&mut self, listener: Box<dyn SolvingListener>) {
        self.solver().add_listener(listener)
    }
}

impl Drop for SatSolverState {
    fn drop(&mut self) {
        self.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::{clause, default_solver};

    #[test]
    fn test_assumptions_are_consumed() {
        let mut state = SatSolverState::new(default_solver());
        state.add(clause![1, 2]);
        state.assume(&[Literal::from(-1), Literal::from(-2)]);
        assert!(!state.satisfiable());
        assert!(state.satisfiable());
    }

    #[test]
    fn test_assumptions_accumulate() {
        let mut state = SatSolverState::new(default_solver());
        state.add(clause![1, 2]);
        state.assume(&[Literal::from(-1)]);
        state.assume(&[Literal::from(-2)]);
        assert!(!state.satisfiable());
    }

    #[test]
    fn test_witness() {
        let mut state = SatSolverState::new(default_solver());
        state.add(clause![1]);
        state.add(clause![-2]);
        state.add(clause![3]);
        let atoms = vec![Variable::from(1), Variable::from(2)];
        assert_eq!(Some(vec![Variable::from(1)]), state.witness(&atoms));
        state.assume(&[Literal::from(2)]);
        assert_eq!(None, state.witness(&atoms));
    }

    #[test]
    fn test_new_var() {
        let mut state = SatSolverState::new(default_solver());
        state.add(clause![1, 2]);
        let v = state.new_var();
        assert_eq!(Variable::from(3), v);
        assert_eq!(Variable::from(4), state.new_var());
        state.add(clause![v]);
        state.add(clause![v.negative()]);
        assert!(!state.satisfiable());
    }

    #[test]
    fn test_close() {
        let mut state = SatSolverState::new(default_solver());
        assert!(!state.is_closed());
        state.close();
        assert!(state.is_closed());
        state.close();
        assert!(state.is_closed());
    }

    #[test]
    #[should_panic(expected = "cannot use a closed SAT solver state")]
    fn test_use_after_close() {
        let mut state = SatSolverState::new(default_solver());
        state.close();
        state.add(clause![1]);
    } // kcov-ignore
}
