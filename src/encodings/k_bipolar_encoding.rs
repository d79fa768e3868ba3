use super::{Polarity, PropositionalMapping, SatEncoding, TseitinTransformer};
use crate::{
    adf::{AbstractDialecticalFramework, Link, LinkType},
    sat::{clause, Literal, SatSolver},
    utils::LabelType,
};
use permutator::CartesianProduct;
use std::collections::HashMap;

/// The default bound on the number of dependent parents handled by [`KBipolarEncoding`].
pub const DEFAULT_K: usize = 2;

/// An encoding strengthening the conflict-free one with the worst cases of the links.
///
/// For a satisfied (resp. unsatisfied) argument, its condition must stay true (resp. false) whatever the values of its undecided parents.
/// For bipolar links, the worst value is known: an attacking link is considered present for satisfied arguments and absent for unsatisfied ones, and reciprocally for supporting links.
/// For arguments having at most `k` dependent parents, all the values of these parents are enumerated.
///
/// All the admissible interpretations satisfy this encoding; thus, it may be used to prune the search space of admissibility-based semantics.
pub struct KBipolarEncoding<'a, T>
where
    T: LabelType,
{
    adf: &'a AbstractDialecticalFramework<T>,
    mapping: &'a PropositionalMapping,
    link_types: &'a HashMap<Link, LinkType>,
    k: usize,
}

impl<'a, T> KBipolarEncoding<'a, T>
where
    T: LabelType,
{
    /// Builds a new encoding given the link types of the ADF and the bound on the number of dependent parents.
    pub fn new(
        adf: &'a AbstractDialecticalFramework<T>,
        mapping: &'a PropositionalMapping,
        link_types: &'a HashMap<Link, LinkType>,
        k: usize,
    ) -> Self {
        Self {
            adf,
            mapping,
            link_types,
            k,
        }
    }

    fn encode_bipolar_link(&self, solver: &mut dyn SatSolver, r: usize, s: usize, link_type: LinkType) {
        let t_s = self.mapping.true_atom(s);
        let f_s = self.mapping.false_atom(s);
        let t_r = self.mapping.true_atom(r);
        let f_r = self.mapping.false_atom(r);
        let link = self.mapping.link(r, s);
        match link_type {
            LinkType::Attacking => {
                solver.add_clause(clause![t_s.negative(), f_r, link]);
                solver.add_clause(clause![f_s.negative(), t_r, link.negative()]);
            }
            LinkType::Supporting => {
                solver.add_clause(clause![t_s.negative(), t_r, link.negative()]);
                solver.add_clause(clause![f_s.negative(), f_r, link]);
            }
            LinkType::Redundant | LinkType::Dependent => {}
        }
    }

    fn encode_dependent_parents(&self, solver: &mut dyn SatSolver, s: usize, dependent: &[usize]) {
        let t_s = self.mapping.true_atom(s);
        let f_s = self.mapping.false_atom(s);
        let leaf = |r: usize| self.mapping.link(r, s).positive();
        let transformer = TseitinTransformer::new(Polarity::Both, &leaf);
        let domains = vec![[false, true]; dependent.len()];
        let domain_refs = domains.iter().map(|d| &d[..]).collect::<Vec<&[bool]>>();
        domain_refs.cart_prod().for_each(|values| {
            let condition = self.adf.condition(s).substitute(&|id| {
                dependent
                    .iter()
                    .position(|d| *d == id)
                    .map(|i| *values[i])
            });
            let name = transformer.transform(&condition, solver);
            let compatible = dependent
                .iter()
                .zip(values.iter())
                .map(|(r, v)| {
                    if **v {
                        self.mapping.false_atom(*r).positive()
                    } else {
                        self.mapping.true_atom(*r).positive()
                    }
                })
                .collect::<Vec<Literal>>();
            let mut cl_t = Vec::with_capacity(compatible.len() + 2);
            cl_t.push(t_s.negative());
            cl_t.push(name);
            cl_t.extend_from_slice(&compatible);
            solver.add_clause(cl_t);
            let mut cl_f = Vec::with_capacity(compatible.len() + 2);
            cl_f.push(f_s.negative());
            cl_f.push(name.negate());
            cl_f.extend_from_slice(&compatible);
            solver.add_clause(cl_f);
        });
    }
}

impl<T> SatEncoding for KBipolarEncoding<'_, T>
where
    T: LabelType,
{
    fn encode(&self, solver: &mut dyn SatSolver) {
        let mut n_bipolar = 0;
        let mut n_enumerated = 0;
        for s in 0..self.adf.n_arguments() {
            let mut dependent = vec![];
            for r in self.adf.parents(s) {
                let link_type = self.link_types[&Link::new(*r, s)];
                if link_type.is_bipolar() {
                    self.encode_bipolar_link(solver, *r, s, link_type);
                    n_bipolar += 1;
                } else {
                    dependent.push(*r);
                }
            }
            if !dependent.is_empty() && dependent.len() <= self.k {
                self.encode_dependent_parents(solver, s, &dependent);
                n_enumerated += 1;
            }
        }
        log::debug!(
            "k-bipolar encoding handled {} bipolar links and enumerated the dependent parents of {} arguments",
            n_bipolar,
            n_enumerated
        );
    }
}
