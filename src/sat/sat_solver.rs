use super::cadical_solver::CadicalSolver;
use std::{
    fmt::Display,
    num::{NonZeroIsize, NonZeroUsize},
};

/// A variable in a SAT solver.
///
/// A variable is represented by a non-null positive integer.
/// In this library, variables are also called atoms, following the propositional logic vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(NonZeroUsize);

impl Variable {
    /// Returns the positive literal of this variable.
    pub fn positive(self) -> Literal {
        Literal(NonZeroIsize::new(usize::from(self) as isize).unwrap())
    }

    /// Returns the negative literal of this variable.
    pub fn negative(self) -> Literal {
        self.positive().negate()
    }

    /// Returns the literal of this variable with the given polarity.
    pub fn literal(self, polarity: bool) -> Literal {
        if polarity {
            self.positive()
        } else {
            self.negative()
        }
    }
}

impl From<usize> for Variable {
    fn from(v: usize) -> Self {
        match NonZeroUsize::new(v) {
            Some(n) => Self(n),
            None => panic!("cannot build a variable from 0"),
        }
    }
}

impl From<Variable> for usize {
    fn from(v: Variable) -> Self {
        v.0.into()
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A literal in a SAT solver.
///
/// A literal is represented by a non-null integer, following the DIMACS convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal(NonZeroIsize);

impl Literal {
    /// Returns the opposite literal.
    pub fn negate(self) -> Self {
        Self(-self.0)
    }

    /// Returns the underlying variable.
    pub fn var(&self) -> Variable {
        Variable(self.0.unsigned_abs())
    }

    /// Returns `true` iff this literal is the positive one of its variable.
    pub fn is_positive(&self) -> bool {
        self.0.get() > 0
    }
}

impl From<isize> for Literal {
    fn from(l: isize) -> Self {
        match NonZeroIsize::new(l) {
            Some(n) => Self(n),
            None => panic!("cannot build a literal from 0"),
        }
    }
}

impl From<Variable> for Literal {
    fn from(v: Variable) -> Self {
        v.positive()
    }
}

impl From<Literal> for isize {
    fn from(l: Literal) -> Self {
        l.0.into()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds a clause from a list of values convertible into literals (signed integers, variables or literals).
macro_rules! clause {
    () => (
        vec![] as Vec<$crate::sat::Literal>
    );
    ($($x:expr),+ $(,)?) => (
        vec![$($crate::sat::Literal::from($x)),+]
    );
}
pub(crate) use clause;

/// An assignment of the variables of a SAT solver.
///
/// Some variables may be unassigned.
/// This is the reason why accessors to assigned value returns an [Option<bool>].
#[derive(Debug, PartialEq, Eq)]
pub struct Assignment(Vec<Option<bool>>);

impl Assignment {
    pub(crate) fn new(assignment: Vec<Option<bool>>) -> Self {
        Self(assignment)
    }

    /// Returns the value potentially assigned to the variable.
    ///
    /// In case the variable is not assigned (or is unknown to the solver), [Option::None] is returned.
    pub fn value_of(&self, v: Variable) -> Option<bool> {
        self.0.get(usize::from(v) - 1).copied().flatten()
    }

    /// Returns the number of variables involved in this assignment.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` iff the assignment involves no variables.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The result of a call to a SAT solver.
#[derive(Debug, PartialEq, Eq)]
pub enum SolvingResult {
    /// The problem is satisfiable, and a model is given.
    Satisfiable(Assignment),
    /// The problem is unsatisfiable.
    Unsatisfiable,
    /// The solver was not able to conclude.
    Unknown,
}

impl SolvingResult {
    /// Returns the underlying model if it exists, or [Option::None].
    ///
    /// # Panics
    ///
    /// If the solving result is set [SolvingResult::Unknown], this function panics.
    pub fn unwrap_model(self) -> Option<Assignment> {
        match self {
            SolvingResult::Satisfiable(assignment) => Some(assignment),
            SolvingResult::Unsatisfiable => None,
            SolvingResult::Unknown => {
                panic!(r#"cannot unwrap solving result when the solver returned "Unknown""#)
            }
        }
    }

    /// Returns `true` iff the result is [SolvingResult::Satisfiable].
    ///
    /// # Panics
    ///
    /// If the solving result is set [SolvingResult::Unknown], this function panics.
    pub fn unwrap_satisfiable(&self) -> bool {
        match self {
            SolvingResult::Satisfiable(_) => true,
            SolvingResult::Unsatisfiable => false,
            SolvingResult::Unknown => {
                panic!(r#"cannot unwrap solving result when the solver returned "Unknown""#)
            }
        }
    }
}

/// A trait for objects listening to the SAT solver calls.
pub trait SolvingListener {
    /// Called when a solving process is launched, with the size of the problem.
    fn solving_start(&self, n_vars: usize, n_clauses: usize);

    /// Called when a solving process ends.
    fn solving_end(&self, result: &SolvingResult);
}

/// A [SolvingListener] logging the calls at the `trace` level.
#[derive(Default)]
pub struct LoggingSolvingListener;

impl SolvingListener for LoggingSolvingListener {
    fn solving_start(&self, n_vars: usize, n_clauses: usize) {
        log::trace!(
            "launching SAT solver on an instance with {} variables and {} clauses",
            n_vars,
            n_clauses
        );
    }

    fn solving_end(&self, result: &SolvingResult) {
        let r = match result {
            SolvingResult::Satisfiable(_) => "SAT",
            SolvingResult::Unsatisfiable => "UNSAT",
            SolvingResult::Unknown => "UNKNOWN",
        };
        log::trace!("SAT solver ended with result {}", r);
    }
}

/// A trait for incremental SAT solvers.
pub trait SatSolver {
    /// Adds a clause to this solver.
    ///
    /// Clauses accumulate for the whole lifetime of the solver.
    fn add_clause(&mut self, cl: Vec<Literal>);

    /// Solves the problem formed by the clauses added so far.
    fn solve(&mut self) -> SolvingResult {
        self.solve_under_assumptions(&[])
    }

    /// Solves the problem formed by the clauses added so far and the provided assumptions.
    ///
    /// Assumptions are only considered for this call.
    fn solve_under_assumptions(&mut self, assumptions: &[Literal]) -> SolvingResult;

    /// Returns the highest variable index known by the solver.
    ///
    /// This index takes into account the variables involved in the clauses and the ones given to [reserve](Self::reserve).
    fn n_vars(&self) -> usize;

    /// Declares that the variables up to `new_max_id` are in use, even if they do not appear in the clauses yet.
    fn reserve(&mut self, new_max_id: usize);

    /// Adds a listener to this solver.
    fn add_listener(&mut self, listener: Box<dyn SolvingListener>);
}

/// A trait for objects building new SAT solvers.
///
/// A factory is the only construction-time dependency of the reasoning components: it keeps them independent of the SAT engine in use.
pub trait SatSolverFactory {
    /// Builds a new SAT solver.
    fn new_solver(&self) -> Box<dyn SatSolver>;
}

/// The default SAT solver factory, which builds solvers given by [default_solver].
#[derive(Default)]
pub struct DefaultSatSolverFactory;

impl SatSolverFactory for DefaultSatSolverFactory {
    fn new_solver(&self) -> Box<dyn SatSolver> {
        default_solver()
    }
}

/// The default SAT solver (CaDiCaL).
pub fn default_solver() -> Box<dyn SatSolver> {
    Box::new(CadicalSolver::default())
}
