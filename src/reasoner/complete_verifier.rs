use super::Verifier;
use crate::{
    adf::AbstractDialecticalFramework,
    encodings::{Polarity, PropositionalMapping, TseitinTransformer},
    sat::{Literal, SatSolverFactory, SatSolverState},
    semantics::{Interpretation, Status},
    utils::LabelType,
};

/// A verifier checking the completeness of interpretations.
///
/// An interpretation is complete if it is a fixpoint of the characteristic operator:
/// the condition of each satisfied (resp. unsatisfied) argument is a tautology (resp. a contradiction) given the decided arguments,
/// while the condition of each undecided argument is neither.
///
/// The acceptance conditions are encoded once in a persistent state; the decided part of each candidate is given by assumptions.
pub struct CompleteVerifier<'a, T>
where
    T: LabelType,
{
    adf: &'a AbstractDialecticalFramework<T>,
    mapping: &'a PropositionalMapping,
    factory: &'a dyn SatSolverFactory,
    state: Option<SatSolverState>,
    acceptance_names: Vec<Literal>,
    closed: bool,
}

impl<'a, T> CompleteVerifier<'a, T>
where
    T: LabelType,
{
    /// Builds a new completeness verifier.
    pub fn new(
        adf: &'a AbstractDialecticalFramework<T>,
        mapping: &'a PropositionalMapping,
        factory: &'a dyn SatSolverFactory,
    ) -> Self {
        Self {
            adf,
            mapping,
            factory,
            state: None,
            acceptance_names: vec![],
            closed: false,
        }
    }

    fn state(&mut self) -> &mut SatSolverState {
        if self.closed {
            panic!("cannot use a closed verifier");
        }
        let (adf, mapping, factory) = (self.adf, self.mapping, self.factory);
        let acceptance_names = &mut self.acceptance_names;
        self.state.get_or_insert_with(|| {
            let mut state = mapping.new_state(factory);
            *acceptance_names = (0..adf.n_arguments())
                .map(|s| {
                    let leaf = |r: usize| mapping.link(r, s).positive();
                    TseitinTransformer::new(Polarity::Both, &leaf).transform(adf.condition(s), &mut state)
                })
                .collect();
            state
        })
    }

    fn fixed_links(&self, candidate: &Interpretation, s: usize) -> Vec<Literal> {
        self.adf
            .parents(s)
            .iter()
            .filter(|r| candidate.is_decided(**r))
            .map(|r| self.mapping.link(*r, s).literal(candidate.is_satisfied(*r)))
            .collect()
    }

    fn satisfiable_with(&mut self, mut assumptions: Vec<Literal>, name: Literal) -> bool {
        assumptions.push(name);
        let state = self.state();
        state.assume(&assumptions);
        state.satisfiable()
    }
}

impl<T> Verifier for CompleteVerifier<'_, T>
where
    T: LabelType,
{
    fn prepare(&mut self) {
        self.state();
    }

    fn verify(&mut self, candidate: &Interpretation) -> bool {
        self.prepare();
        for (s, status) in candidate.iter() {
            let fixed = self.fixed_links(candidate, s);
            let name = self.acceptance_names[s];
            let complete = match status {
                Status::Satisfied => !self.satisfiable_with(fixed, name.negate()),
                Status::Unsatisfied => !self.satisfiable_with(fixed, name),
                Status::Undecided => {
                    self.satisfiable_with(fixed.clone(), name)
                        && self.satisfiable_with(fixed, name.negate())
                }
            };
            if !complete {
                return false;
            }
        }
        true
    }

    fn close(&mut self) {
        if let Some(mut state) = self.state.take() {
            state.close();
        }
        self.closed = true;
    }
}

impl<T> Drop for CompleteVerifier<'_, T>
where
    T: LabelType,
{
    fn drop(&mut self) {
        self.close()
    }
}
