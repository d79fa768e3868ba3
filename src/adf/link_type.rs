use super::{AbstractDialecticalFramework, Link};
use crate::{
    encodings::{Polarity, TseitinTransformer},
    sat::{SatSolver, SatSolverFactory, SatSolverState, Variable},
    utils::LabelType,
};
use std::collections::HashMap;
use strum_macros::{Display, EnumIter};

/// The type of a link `(r, s)`, given by the way the value of `r` influences the acceptance condition of `s`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum LinkType {
    /// Setting `r` to true never turns the condition from true to false.
    Supporting,
    /// Setting `r` to true never turns the condition from false to true.
    Attacking,
    /// Both supporting and attacking: the value of `r` never changes the condition.
    Redundant,
    /// Neither supporting nor attacking.
    Dependent,
}

impl LinkType {
    /// Returns `true` iff the link is not dependent.
    pub fn is_bipolar(&self) -> bool {
        *self != LinkType::Dependent
    }

    /// Returns `true` iff the link is supporting or redundant.
    pub fn is_supporting(&self) -> bool {
        matches!(self, LinkType::Supporting | LinkType::Redundant)
    }

    /// Returns `true` iff the link is attacking or redundant.
    pub fn is_attacking(&self) -> bool {
        matches!(self, LinkType::Attacking | LinkType::Redundant)
    }

    fn from_properties(supporting: bool, attacking: bool) -> Self {
        match (supporting, attacking) {
            (true, true) => LinkType::Redundant,
            (true, false) => LinkType::Supporting,
            (false, true) => LinkType::Attacking,
            (false, false) => LinkType::Dependent,
        }
    }
}

/// Computes the exact types of all the links of an ADF.
///
/// For each link `(r, s)`, the condition of `s` is instantiated with `r` set to false and to true;
/// the link is supporting iff no assignment makes the first instance true and the second one false (and reciprocally for attacking).
/// One SAT solver is used for each argument having parents.
pub fn compute_link_types<T>(
    adf: &AbstractDialecticalFramework<T>,
    solver_factory: &dyn SatSolverFactory,
) -> HashMap<Link, LinkType>
where
    T: LabelType,
{
    let mut result = HashMap::with_capacity(adf.n_links());
    let leaf = |id: usize| Variable::from(id + 1).positive();
    let transformer = TseitinTransformer::new(Polarity::Both, &leaf);
    for child in 0..adf.n_arguments() {
        let parents = adf.parents(child);
        if parents.is_empty() {
            continue;
        }
        let mut state = SatSolverState::new(solver_factory.new_solver());
        state.reserve(adf.n_arguments());
        let condition = adf.condition(child);
        for parent in parents {
            let with_value = |value: bool| {
                condition.substitute(&|id| if id == *parent { Some(value) } else { None })
            };
            let name_false = transformer.transform(&with_value(false), &mut state);
            let name_true = transformer.transform(&with_value(true), &mut state);
            state.assume(&[name_false, name_true.negate()]);
            let supporting = !state.satisfiable();
            state.assume(&[name_true, name_false.negate()]);
            let attacking = !state.satisfiable();
            let link_type = LinkType::from_properties(supporting, attacking);
            log::trace!("link ({}, {}) is {}", parent, child, link_type);
            result.insert(Link::new(*parent, child), link_type);
        }
        state.close();
    }
    result
}
