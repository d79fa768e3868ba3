use crate::{
    adf::AcceptanceCondition,
    sat::{clause, Literal, SatSolver, Variable},
};

/// The polarity used by a [`TseitinTransformer`].
///
/// Given a formula `φ` and its name `N`, the positive polarity only encodes `N → φ`,
/// the negative polarity only encodes `φ → N`, and both polarities encode `N ↔ φ`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// The name implies the formula.
    Positive,
    /// The formula implies the name.
    Negative,
    /// The name is equivalent to the formula.
    Both,
}

impl Polarity {
    fn flip(self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
            Polarity::Both => Polarity::Both,
        }
    }

    fn has_positive(self) -> bool {
        self != Polarity::Negative
    }

    fn has_negative(self) -> bool {
        self != Polarity::Positive
    }
}

/// Returns a fresh variable for a solver, and reserves it.
fn new_var(solver: &mut dyn SatSolver) -> Variable {
    let v = solver.n_vars() + 1;
    solver.reserve(v);
    Variable::from(v)
}

/// Translates acceptance conditions into clauses, and returns a literal naming them.
///
/// The leaves of the condition (the arguments) are translated into literals by a user-provided function.
/// This allows the same condition to be encoded over different sets of atoms (e.g. the link atoms of a propositional mapping).
/// Auxiliary variables are taken after the highest variable known by the solver.
///
/// # Example
///
/// ```
/// # use crustadf::adf::AcceptanceCondition;
/// # use crustadf::encodings::{Polarity, TseitinTransformer};
/// # use crustadf::sat::{self, Literal, SatSolver, Variable};
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// let cond = AcceptanceCondition::and(AcceptanceCondition::argument(0), AcceptanceCondition::argument(1))?;
/// let mut solver = sat::default_solver();
/// solver.reserve(2);
/// let leaf = |id: usize| Variable::from(id + 1).positive();
/// let name = TseitinTransformer::new(Polarity::Both, &leaf).transform(&cond, solver.as_mut());
/// assert!(solver.solve_under_assumptions(&[name, Literal::from(-1)]).unwrap_model().is_none());
/// assert!(solver.solve_under_assumptions(&[name]).unwrap_model().is_some());
/// # Ok(())
/// # }
/// ```
pub struct TseitinTransformer<'a> {
    polarity: Polarity,
    leaf: &'a dyn Fn(usize) -> Literal,
}

impl<'a> TseitinTransformer<'a> {
    /// Builds a new transformer given the polarity and the function translating arguments into literals.
    pub fn new(polarity: Polarity, leaf: &'a dyn Fn(usize) -> Literal) -> Self {
        Self { polarity, leaf }
    }

    /// Adds the clauses encoding the condition to the solver and returns its name.
    pub fn transform(&self, condition: &AcceptanceCondition, solver: &mut dyn SatSolver) -> Literal {
        self.transform_with(condition, self.polarity, solver)
    }

    fn transform_with(
        &self,
        condition: &AcceptanceCondition,
        polarity: Polarity,
        solver: &mut dyn SatSolver,
    ) -> Literal {
        match condition {
            AcceptanceCondition::Tautology => {
                let name = new_var(solver).positive();
                solver.add_clause(clause![name]);
                name
            }
            AcceptanceCondition::Contradiction => {
                let name = new_var(solver).positive();
                solver.add_clause(clause![name.negate()]);
                name
            }
            AcceptanceCondition::Argument(id) => (self.leaf)(*id),
            AcceptanceCondition::Negation(child) => self
                .transform_with(child, polarity.flip(), solver)
                .negate(),
            AcceptanceCondition::Conjunction(l, r) => {
                let a = self.transform_with(l, polarity, solver);
                let b = self.transform_with(r, polarity, solver);
                let n = new_var(solver).positive();
                if polarity.has_positive() {
                    solver.add_clause(clause![n.negate(), a]);
                    solver.add_clause(clause![n.negate(), b]);
                }
                if polarity.has_negative() {
                    solver.add_clause(clause![n, a.negate(), b.negate()]);
                }
                n
            }
            AcceptanceCondition::Disjunction(l, r) => {
                let a = self.transform_with(l, polarity, solver);
                let b = self.transform_with(r, polarity, solver);
                let n = new_var(solver).positive();
                if polarity.has_positive() {
                    solver.add_clause(clause![n.negate(), a, b]);
                }
                if polarity.has_negative() {
                    solver.add_clause(clause![n, a.negate()]);
                    solver.add_clause(clause![n, b.negate()]);
                }
                n
            }
            AcceptanceCondition::Implication(l, r) => {
                let a = self.transform_with(l, polarity.flip(), solver);
                let b = self.transform_with(r, polarity, solver);
                let n = new_var(solver).positive();
                if polarity.has_positive() {
                    solver.add_clause(clause![n.negate(), a.negate(), b]);
                }
                if polarity.has_negative() {
                    solver.add_clause(clause![n, a]);
                    solver.add_clause(clause![n, b.negate()]);
                }
                n
            }
            AcceptanceCondition::Equivalence(l, r) => {
                let a = self.transform_with(l, Polarity::Both, solver);
                let b = self.transform_with(r, Polarity::Both, solver);
                let n = new_var(solver).positive();
                if polarity.has_positive() {
                    solver.add_clause(clause![n.negate(), a.negate(), b]);
                    solver.add_clause(clause![n.negate(), a, b.negate()]);
                }
                if polarity.has_negative() {
                    solver.add_clause(clause![n, a, b]);
                    solver.add_clause(clause![n, a.negate(), b.negate()]);
                }
                n
            }
            AcceptanceCondition::ExclusiveDisjunction(l, r) => {
                let a = self.transform_with(l, Polarity::Both, solver);
                let b = self.transform_with(r, Polarity::Both, solver);
                let n = new_var(solver).positive();
                if polarity.has_positive() {
                    solver.add_clause(clause![n.negate(), a, b]);
                    solver.add_clause(clause![n.negate(), a.negate(), b.negate()]);
                }
                if polarity.has_negative() {
                    solver.add_clause(clause![n, a.negate(), b]);
                    solver.add_clause(clause![n, a, b.negate()]);
                }
                n
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::default_solver;
    use permutator::CartesianProduct;
    use AcceptanceCondition as AC;

    fn leaf(id: usize) -> Literal {
        Variable::from(id + 1).positive()
    }

    fn assert_equivalent(condition: &AC, n_args: usize) {
        let domains = vec![[false, true]; n_args];
        let domain_refs = domains.iter().map(|d| &d[..]).collect::<Vec<&[bool]>>();
        domain_refs.cart_prod().for_each(|values| {
            let mut solver = default_solver();
            solver.reserve(n_args);
            let name = TseitinTransformer::new(Polarity::Both, &leaf)
                .transform(condition, solver.as_mut());
            let assumptions = values
                .iter()
                .enumerate()
                .map(|(i, v)| leaf(i).var().literal(**v))
                .collect::<Vec<Literal>>();
            let expected = condition.evaluate(&|id| *values[id]);
            let mut with_name = assumptions.clone();
            with_name.push(name);
            assert_eq!(
                expected,
                solver
                    .solve_under_assumptions(&with_name)
                    .unwrap_model()
                    .is_some()
            );
            let mut with_neg_name = assumptions;
            with_neg_name.push(name.negate());
            assert_eq!(
                !expected,
                solver
                    .solve_under_assumptions(&with_neg_name)
                    .unwrap_model()
                    .is_some()
            );
        });
    }

    #[test]
    fn test_connectives() {
        let a = || AC::argument(0);
        let b = || AC::argument(1);
        assert_equivalent(&AC::and(a(), b()).unwrap(), 2);
        assert_equivalent(&AC::or(a(), b()).unwrap(), 2);
        assert_equivalent(&AC::imp(a(), b()).unwrap(), 2);
        assert_equivalent(&AC::iff(a(), b()).unwrap(), 2);
        assert_equivalent(&AC::xor(a(), b()).unwrap(), 2);
        assert_equivalent(&AC::neg(a()), 1);
    }

    #[test]
    fn test_constants() {
        let mut solver = default_solver();
        let top = TseitinTransformer::new(Polarity::Both, &leaf).transform(&AC::Tautology, solver.as_mut());
        let bot = TseitinTransformer::new(Polarity::Both, &leaf).transform(&AC::Contradiction, solver.as_mut());
        assert!(solver.solve_under_assumptions(&[top.negate()]).unwrap_model().is_none());
        assert!(solver.solve_under_assumptions(&[bot]).unwrap_model().is_none());
        assert!(solver.solve_under_assumptions(&[top, bot.negate()]).unwrap_model().is_some());
        assert_equivalent(&AC::or(AC::argument(0), AC::Contradiction).unwrap(), 1);
    }

    #[test]
    fn test_nested() {
        let cond = AC::xor(
            AC::imp(AC::argument(0), AC::neg(AC::argument(2))).unwrap(),
            AC::iff(AC::argument(1), AC::and(AC::argument(0), AC::argument(2)).unwrap()).unwrap(),
        )
        .unwrap();
        assert_equivalent(&cond, 3);
    }

    #[test]
    fn test_positive_polarity() {
        let cond = AC::and(AC::argument(0), AC::neg(AC::argument(1))).unwrap();
        let mut solver = default_solver();
        solver.reserve(2);
        let name =
            TseitinTransformer::new(Polarity::Positive, &leaf).transform(&cond, solver.as_mut());
        assert!(solver
            .solve_under_assumptions(&[name, leaf(1)])
            .unwrap_model()
            .is_none());
        assert!(solver
            .solve_under_assumptions(&[name.negate(), leaf(0), leaf(1).negate()])
            .unwrap_model()
            .is_some());
    }

    #[test]
    fn test_negative_polarity() {
        let cond = AC::or(AC::argument(0), AC::argument(1)).unwrap();
        let mut solver = default_solver();
        solver.reserve(2);
        let name =
            TseitinTransformer::new(Polarity::Negative, &leaf).transform(&cond, solver.as_mut());
        assert!(solver
            .solve_under_assumptions(&[name.negate(), leaf(0)])
            .unwrap_model()
            .is_none());
        assert!(solver
            .solve_under_assumptions(&[name, leaf(0).negate(), leaf(1).negate()])
            .unwrap_model()
            .is_some());
    }

    #[test]
    fn test_aux_vars_after_reserved() {
        let cond = AC::and(AC::argument(0), AC::argument(1)).unwrap();
        let mut solver = default_solver();
        solver.reserve(10);
        let name = TseitinTransformer::new(Polarity::Both, &leaf).transform(&cond, solver.as_mut());
        assert_eq!(Variable::from(11), name.var());
    }
}
