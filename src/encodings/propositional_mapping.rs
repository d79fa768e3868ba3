use crate::{
    adf::{AbstractDialecticalFramework, Link},
    sat::{SatSolver, SatSolverFactory, SatSolverState, Variable},
    utils::LabelType,
};
use std::collections::HashMap;

/// The mapping between the elements of an ADF and the atoms of SAT solvers.
///
/// Each argument `a` is given two atoms: the "true" atom `t_a` and the "false" atom `f_a`.
/// Setting `t_a` (resp. `f_a`) means the argument is satisfied (resp. unsatisfied); none of them means it is undecided.
/// Each link `(r, s)` is given an atom standing for the value of `r` as seen by the acceptance condition of `s`.
///
/// The argument atoms come first (`t_a = 2a + 1` and `f_a = 2a + 2`), followed by the link atoms.
/// The mapping is built once per ADF and shared by all the reasoning components working on it.
#[derive(Clone, Debug)]
pub struct PropositionalMapping {
    n_arguments: usize,
    links: HashMap<Link, Variable>,
}

impl PropositionalMapping {
    /// Builds the mapping of an ADF.
    pub fn new<T>(adf: &AbstractDialecticalFramework<T>) -> Self
    where
        T: LabelType,
    {
        let n_arguments = adf.n_arguments();
        let links = adf
            .links()
            .enumerate()
            .map(|(i, l)| (l, Variable::from(2 * n_arguments + i + 1)))
            .collect();
        Self { n_arguments, links }
    }

    /// Returns the number of arguments handled by this mapping.
    pub fn n_arguments(&self) -> usize {
        self.n_arguments
    }

    /// Returns the number of atoms used by this mapping.
    pub fn n_vars(&self) -> usize {
        2 * self.n_arguments + self.links.len()
    }

    /// Returns the "true" atom of an argument.
    pub fn true_atom(&self, arg: usize) -> Variable {
        Variable::from(2 * arg + 1)
    }

    /// Returns the "false" atom of an argument.
    pub fn false_atom(&self, arg: usize) -> Variable {
        Variable::from(2 * arg + 2)
    }

    /// Returns the atom of a link.
    ///
    /// # Panics
    ///
    /// Panics if the link does not belong to the ADF this mapping was built from.
    pub fn link(&self, parent: usize, child: usize) -> Variable {
        match self.links.get(&Link::new(parent, child)) {
            Some(v) => *v,
            None => panic!("no such link: ({}, {})", parent, child),
        }
    }

    /// Returns the "true" and "false" atoms of all the arguments.
    pub fn argument_atoms(&self) -> Vec<Variable> {
        (0..self.n_arguments)
            .flat_map(|a| [self.true_atom(a), self.false_atom(a)])
            .collect()
    }

    /// Returns the argument an atom refers to, with `true` for a "true" atom and `false` for a "false" atom.
    ///
    /// Link atoms and auxiliary atoms give [Option::None].
    pub fn argument_of_atom(&self, atom: Variable) -> Option<(usize, bool)> {
        let index = usize::from(atom) - 1;
        if index < 2 * self.n_arguments {
            Some((index / 2, index % 2 == 0))
        } else {
            None
        }
    }

    /// Creates a new solver state in which the atoms of this mapping are reserved.
    ///
    /// Auxiliary variables created in this state never collide with the atoms of the mapping.
    pub fn new_state(&self, factory: &dyn SatSolverFactory) -> SatSolverState {
        let mut state = SatSolverState::new(factory.new_solver());
        state.reserve(self.n_vars());
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adf::{AcceptanceCondition, AdfBuilder};

    fn adf() -> AbstractDialecticalFramework<&'static str> {
        let mut builder = AdfBuilder::new_with_labels(&["a", "b"]);
        builder
            .set_condition(
                &"a",
                AcceptanceCondition::and(builder.arg(&"a").unwrap(), builder.arg(&"b").unwrap())
                    .unwrap(),
            )
            .unwrap();
        builder
            .set_condition(&"b", AcceptanceCondition::Tautology)
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_atoms() {
        let mapping = PropositionalMapping::new(&adf());
        assert_eq!(2, mapping.n_arguments());
        assert_eq!(6, mapping.n_vars());
        assert_eq!(Variable::from(1), mapping.true_atom(0));
        assert_eq!(Variable::from(2), mapping.false_atom(0));
        assert_eq!(Variable::from(3), mapping.true_atom(1));
        assert_eq!(Variable::from(4), mapping.false_atom(1));
        assert_eq!(Variable::from(5), mapping.link(0, 0));
        assert_eq!(Variable::from(6), mapping.link(1, 0));
        assert_eq!(4, mapping.argument_atoms().len());
    }

    #[test]
    fn test_argument_of_atom() {
        let mapping = PropositionalMapping::new(&adf());
        assert_eq!(Some((0, true)), mapping.argument_of_atom(Variable::from(1)));
        assert_eq!(Some((1, false)), mapping.argument_of_atom(Variable::from(4)));
        assert_eq!(None, mapping.argument_of_atom(Variable::from(5)));
    }

    #[test]
    #[should_panic(expected = "no such link: (0, 1)")]
    fn test_unknown_link() {
        PropositionalMapping::new(&adf()).link(0, 1);
    } // kcov-ignore
}
