use super::CandidateGenerator;
use crate::{
    adf::AbstractDialecticalFramework,
    encodings::{ConflictFreeEncoding, Polarity, PropositionalMapping, SatEncoding, TseitinTransformer},
    sat::{clause, Literal, SatSolverFactory, SatSolverState},
    semantics::{Interpretation, Status},
    utils::LabelType,
};

/// A generator computing the ground interpretation of an ADF.
///
/// The ground interpretation is the least fixpoint of the characteristic operator of the ADF.
/// It is computed by rounds: an undecided argument becomes satisfied (resp. unsatisfied) when its acceptance condition
/// is a tautology (resp. a contradiction) given the decisions made so far.
/// Rounds are repeated until no more decision can be made.
///
/// A restricted generator must produce an interpretation extending a given prefix.
/// The computation stops as soon as a decision contradicts the prefix, in which case no interpretation is produced.
///
/// This generator produces at most one interpretation; the state is then made unsatisfiable to signal its exhaustion.
///
/// # Example
///
/// ```
/// # use crustadf::adf::{AcceptanceCondition, AdfBuilder};
/// # use crustadf::encodings::PropositionalMapping;
/// # use crustadf::reasoner::{CandidateGenerator, GroundGenerator};
/// # use crustadf::sat::DefaultSatSolverFactory;
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// let mut builder = AdfBuilder::new_with_labels(&["a", "b"]);
/// builder.set_condition(&"a", builder.arg(&"b")?)?;
/// builder.set_condition(&"b", AcceptanceCondition::Tautology)?;
/// let adf = builder.build()?;
/// let mapping = PropositionalMapping::new(&adf);
/// let mut generator = GroundGenerator::unrestricted(&adf, &mapping, &DefaultSatSolverFactory);
/// let ground = generator.generate().unwrap();
/// assert_eq!(vec![0, 1], ground.satisfied());
/// assert!(generator.generate().is_none());
/// # Ok(())
/// # }
/// ```
pub struct GroundGenerator<'a, T>
where
    T: LabelType,
{
    adf: &'a AbstractDialecticalFramework<T>,
    mapping: &'a PropositionalMapping,
    factory: &'a dyn SatSolverFactory,
    prefix: Option<Interpretation>,
    state: Option<SatSolverState>,
    acceptance_names: Vec<Literal>,
    closed: bool,
}

impl<'a, T> GroundGenerator<'a, T>
where
    T: LabelType,
{
    /// Builds a generator computing the ground interpretation.
    pub fn unrestricted(
        adf: &'a AbstractDialecticalFramework<T>,
        mapping: &'a PropositionalMapping,
        factory: &'a dyn SatSolverFactory,
    ) -> Self {
        Self::new(adf, mapping, factory, None)
    }

    /// Builds a generator computing the ground interpretation, given that it must extend the prefix.
    pub fn restricted(
        adf: &'a AbstractDialecticalFramework<T>,
        mapping: &'a PropositionalMapping,
        factory: &'a dyn SatSolverFactory,
        prefix: Interpretation,
    ) -> Self {
        Self::new(adf, mapping, factory, Some(prefix))
    }

    fn new(
        adf: &'a AbstractDialecticalFramework<T>,
        mapping: &'a PropositionalMapping,
        factory: &'a dyn SatSolverFactory,
        prefix: Option<Interpretation>,
    ) -> Self {
        Self {
            adf,
            mapping,
            factory,
            prefix,
            state: None,
            acceptance_names: vec![],
            closed: false,
        }
    }

    fn state(&mut self) -> &mut SatSolverState {
        if self.closed {
            panic!("cannot use a closed candidate generator");
        }
        let (adf, mapping, factory) = (self.adf, self.mapping, self.factory);
        let restricted = self.prefix.is_some();
        let acceptance_names = &mut self.acceptance_names;
        self.state.get_or_insert_with(|| {
            let mut state = mapping.new_state(factory);
            ConflictFreeEncoding::new(adf, mapping).encode(&mut state);
            *acceptance_names = (0..adf.n_arguments())
                .map(|s| {
                    let leaf = |r: usize| mapping.link(r, s).positive();
                    TseitinTransformer::new(Polarity::Both, &leaf).transform(adf.condition(s), &mut state)
                })
                .collect();
            log::debug!(
                "opened the state of a ground generator (restricted: {})",
                restricted
            );
            state
        })
    }

    fn contradicts_prefix(&self, arg: usize, status: Status) -> bool {
        match &self.prefix {
            Some(p) => p.is_decided(arg) && p.status(arg) != status,
            None => false,
        }
    }

    fn compute_fixpoint(&mut self) -> Option<Interpretation> {
        let n_arguments = self.adf.n_arguments();
        let mut builder = Interpretation::builder(n_arguments);
        let mut current = builder.build();
        let mut n_rounds = 0;
        loop {
            n_rounds += 1;
            for arg in current.undecided() {
                let name = self.acceptance_names[arg];
                let t_arg = self.mapping.true_atom(arg);
                let f_arg = self.mapping.false_atom(arg);
                let state = self.state();
                state.assume(&[name.negate()]);
                let status = if !state.satisfiable() {
                    state.add(clause![t_arg]);
                    Status::Satisfied
                } else {
                    state.assume(&[name]);
                    if !state.satisfiable() {
                        state.add(clause![f_arg]);
                        Status::Unsatisfied
                    } else {
                        continue;
                    }
                };
                if self.contradicts_prefix(arg, status) {
                    log::debug!(
                        "ground computation contradicts its prefix on argument {}",
                        self.adf.labels().get_label_by_id(arg)
                    );
                    return None;
                }
                builder.status(arg, status);
            }
            let next = builder.build();
            if next == current {
                break;
            }
            current = next;
        }
        log::debug!(
            "ground fixpoint reached after {} rounds with {} decided arguments",
            n_rounds,
            current.n_decided()
        );
        match &self.prefix {
            Some(p) if !current.extends(p) => {
                log::debug!("ground interpretation does not extend its prefix");
                None
            }
            _ => Some(current),
        }
    }

    fn make_unsat(&mut self) {
        let state = self.state();
        let p = state.new_var();
        state.add(clause![p]);
        state.add(clause![p.negative()]);
    }
}

impl<T> CandidateGenerator for GroundGenerator<'_, T>
where
    T: LabelType,
{
    fn prepare(&mut self) {
        self.state();
    }

    fn generate(&mut self) -> Option<Interpretation> {
        if !self.state().satisfiable() {
            return None;
        }
        let result = self.compute_fixpoint();
        self.make_unsat();
        result
    }

    fn update(&mut self, update_fn: &mut dyn FnMut(&mut SatSolverState)) {
        update_fn(self.state())
    }

    fn close(&mut self) {
        if let Some(mut state) = self.state.take() {
            state.close();
        }
        self.closed = true;
    }
}

impl<T> Drop for GroundGenerator<'_, T>
where
    T: LabelType,
{
    fn drop(&mut self) {
        self.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adf::{AcceptanceCondition as AC, AdfBuilder},
        sat::DefaultSatSolverFactory,
    };

    fn ground_of(adf: &AbstractDialecticalFramework<&str>) -> Option<Interpretation> {
        let mapping = PropositionalMapping::new(adf);
        let mut generator = GroundGenerator::unrestricted(adf, &mapping, &DefaultSatSolverFactory);
        let result = generator.generate();
        assert!(generator.generate().is_none());
        assert!(generator.generate().is_none());
        generator.close();
        result
    }

    #[test]
    fn test_paradox_is_undecided() {
        let mut builder = AdfBuilder::new_with_labels(&["a"]);
        builder
            .set_condition(&"a", AC::neg(builder.arg(&"a").unwrap()))
            .unwrap();
        let adf = builder.build().unwrap();
        assert_eq!(Some(Interpretation::empty(1)), ground_of(&adf));
    }

    #[test]
    fn test_chain() {
        let mut builder = AdfBuilder::new_with_labels(&["a", "b", "c"]);
        builder.set_condition(&"a", AC::Tautology).unwrap();
        builder
            .set_condition(&"b", AC::neg(builder.arg(&"a").unwrap()))
            .unwrap();
        builder
            .set_condition(&"c", AC::neg(builder.arg(&"b").unwrap()))
            .unwrap();
        let adf = builder.build().unwrap();
        assert_eq!(
            Some(Interpretation::builder(3).satisfied(0).unsatisfied(1).satisfied(2).build()),
            ground_of(&adf)
        );
    }

    #[test]
    fn test_mixed() {
        let mut builder = AdfBuilder::new_with_labels(&["a", "b", "c", "d", "e", "f"]);
        let a = builder.arg(&"a").unwrap();
        let b = builder.arg(&"b").unwrap();
        builder.set_condition(&"a", AC::Tautology).unwrap();
        builder.set_condition(&"b", b.clone()).unwrap();
        builder
            .set_condition(&"c", AC::and(a.clone(), b.clone()).unwrap())
            .unwrap();
        builder.set_condition(&"d", AC::neg(b.clone())).unwrap();
        let e = AC::and(
            b.clone(),
            AC::or(AC::neg(b), AC::Contradiction).unwrap(),
        )
        .unwrap();
        builder.set_condition(&"e", e).unwrap();
        builder
            .set_condition(&"f", AC::xor(a, builder.arg(&"e").unwrap()).unwrap())
            .unwrap();
        let adf = builder.build().unwrap();
        assert_eq!(
            Some(
                Interpretation::builder(6)
                    .satisfied(0)
                    .unsatisfied(4)
                    .satisfied(5)
                    .build()
            ),
            ground_of(&adf)
        );
    }

    #[test]
    fn test_restricted_consistent() {
        let mut builder = AdfBuilder::new_with_labels(&["a", "b"]);
        builder.set_condition(&"a", AC::Tautology).unwrap();
        builder
            .set_condition(&"b", AC::neg(builder.arg(&"a").unwrap()))
            .unwrap();
        let adf = builder.build().unwrap();
        let mapping = PropositionalMapping::new(&adf);
        let prefix = Interpretation::builder(2).unsatisfied(1).build();
        let mut generator =
            GroundGenerator::restricted(&adf, &mapping, &DefaultSatSolverFactory, prefix);
        assert_eq!(
            Some(Interpretation::builder(2).satisfied(0).unsatisfied(1).build()),
            generator.generate()
        );
        assert!(generator.generate().is_none());
    }

    #[test]
    fn test_restricted_contradiction() {
        let mut builder = AdfBuilder::new_with_labels(&["a", "b"]);
        builder.set_condition(&"a", AC::Tautology).unwrap();
        builder
            .set_condition(&"b", AC::neg(builder.arg(&"a").unwrap()))
            .unwrap();
        let adf = builder.build().unwrap();
        let mapping = PropositionalMapping::new(&adf);
        let prefix = Interpretation::builder(2).satisfied(1).build();
        let mut generator =
            GroundGenerator::restricted(&adf, &mapping, &DefaultSatSolverFactory, prefix);
        assert!(generator.generate().is_none());
        assert!(generator.generate().is_none());
    }

    #[test]
    fn test_restricted_undecided_in_result() {
        let mut builder = AdfBuilder::new_with_labels(&["a"]);
        builder
            .set_condition(&"a", builder.arg(&"a").unwrap())
            .unwrap();
        let adf = builder.build().unwrap();
        let mapping = PropositionalMapping::new(&adf);
        let prefix = Interpretation::builder(1).satisfied(0).build();
        let mut generator =
            GroundGenerator::restricted(&adf, &mapping, &DefaultSatSolverFactory, prefix);
        assert!(generator.generate().is_none());
    }

    #[test]
    #[should_panic(expected = "cannot use a closed candidate generator")]
    fn test_generate_after_close() {
        let mut builder = AdfBuilder::new_with_labels(&["a"]);
        builder.set_condition(&"a", AC::Tautology).unwrap();
        let adf = builder.build().unwrap();
        let mapping = PropositionalMapping::new(&adf);
        let mut generator = GroundGenerator::unrestricted(&adf, &mapping, &DefaultSatSolverFactory);
        generator.prepare();
        generator.close();
        generator.generate();
    } // kcov-ignore
}
