use super::{Assignment, Literal, SatSolver, SatSolverFactory, SolvingListener, SolvingResult};
use ipasir_loading::IpasirSolverWrapper;

/// A wrapper for solvers that implement the IPASIR interface.
pub struct IpasirSatSolver {
    solver: IpasirSolverWrapper,
    listeners: Vec<Box<dyn SolvingListener>>,
    n_vars: usize,
    n_clauses: usize,
}

impl IpasirSatSolver {
    /// Builds a new [`IpasirSatSolver`] given the underlying solver.
    pub fn new(solver: IpasirSolverWrapper) -> Self {
        Self {
            solver,
            listeners: vec![],
            n_vars: 0,
            n_clauses: 0,
        }
    }
}

impl SatSolver for IpasirSatSolver {
    fn add_clause(&mut self, cl: Vec<Literal>) {
        for l in cl {
            self.n_vars = usize::max(self.n_vars, usize::from(l.var()));
            self.solver
                .ipasir_add(isize::from(l) as i32)
                .expect("IPASIR solver failed to add a literal");
        }
        self.solver
            .ipasir_add(0)
            .expect("IPASIR solver failed to close a clause");
        self.n_clauses += 1;
    }

    fn solve_under_assumptions(&mut self, assumptions: &[Literal]) -> SolvingResult {
        self.listeners
            .iter()
            .for_each(|l| l.solving_start(self.n_vars, self.n_clauses));
        for l in assumptions {
            self.n_vars = usize::max(self.n_vars, usize::from(l.var()));
            self.solver
                .ipasir_assume(isize::from(*l) as i32)
                .expect("IPASIR solver failed to set an assumption");
        }
        let solving_result = match self
            .solver
            .ipasir_solve()
            .expect("IPASIR solver failed to solve")
        {
            Some(true) => {
                let assignment = (1..=self.n_vars)
                    .map(|i| {
                        self.solver
                            .ipasir_val(i as i32)
                            .expect("IPASIR solver failed to give a value")
                    })
                    .collect();
                SolvingResult::Satisfiable(Assignment::new(assignment))
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

type SolverBuilderFn = dyn Fn() -> IpasirSolverWrapper;

type ListenerFactoryFn = dyn Fn() -> Box<dyn SolvingListener>;

/// A factory building [`IpasirSatSolver`] instances.
///
/// The underlying IPASIR solvers are given by a builder function, usually relying on a loaded shared library.
pub struct IpasirSatSolverFactory {
    solver_builder: Box<SolverBuilderFn>,
    listener_factories: Vec<Box<ListenerFactoryFn>>,
}

impl IpasirSatSolverFactory {
    /// Builds a new factory given the function used to create the underlying IPASIR solvers.
    pub fn new(solver_builder: Box<SolverBuilderFn>) -> Self {
        Self {
            solver_builder,
            listener_factories: vec![],
        }
    }

    /// Registers a function building a listener for each new solver.
    pub fn add_solver_listener(&mut self, listener_factory: Box<ListenerFactoryFn>) {
        self.listener_factories.push(listener_factory);
    }
}

impl SatSolverFactory for IpasirSatSolverFactory {
    fn new_solver(&self) -> Box<dyn SatSolver> {
        let mut solver = IpasirSatSolver::new((self.solver_builder)());
        self.listener_factories
            .iter()
            .for_each(|f| solver.add_listener(f()));
        Box::new(solver)
    }
}
