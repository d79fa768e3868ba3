use super::CandidateGenerator;
use crate::{
    adf::AbstractDialecticalFramework,
    encodings::{
        ConflictFreeEncoding, FixPartialEncoding, PropositionalMapping, RefineUnequalEncoding,
        RelativeSatEncoding, SatEncoding, TwoValuedEncoding,
    },
    sat::{SatSolverFactory, SatSolverState},
    semantics::Interpretation,
    utils::LabelType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BaseEncoding {
    ConflictFree,
    TwoValued,
}

// The common part of the generators enumerating the witnesses of a base encoding.
struct WitnessGenerator<'a, T>
where
    T: LabelType,
{
    adf: &'a AbstractDialecticalFramework<T>,
    mapping: &'a PropositionalMapping,
    factory: &'a dyn SatSolverFactory,
    base: BaseEncoding,
    prefix: Option<Interpretation>,
    state: Option<SatSolverState>,
    closed: bool,
}

impl<'a, T> WitnessGenerator<'a, T>
where
    T: LabelType,
{
    fn new(
        adf: &'a AbstractDialecticalFramework<T>,
        mapping: &'a PropositionalMapping,
        factory: &'a dyn SatSolverFactory,
        base: BaseEncoding,
        prefix: Option<Interpretation>,
    ) -> Self {
        Self {
            adf,
            mapping,
            factory,
            base,
            prefix,
            state: None,
            closed: false,
        }
    }

    fn state(&mut self) -> &mut SatSolverState {
        if self.closed {
            panic!("cannot use a closed candidate generator");
        }
        let (adf, mapping, factory, base) = (self.adf, self.mapping, self.factory, self.base);
        let prefix = self.prefix.as_ref();
        self.state.get_or_insert_with(|| {
            let mut state = mapping.new_state(factory);
            match base {
                BaseEncoding::ConflictFree => ConflictFreeEncoding::new(adf, mapping).encode(&mut state),
                BaseEncoding::TwoValued => TwoValuedEncoding::new(adf, mapping).encode(&mut state),
            }
            if let Some(p) = prefix {
                FixPartialEncoding::new(mapping).encode(&mut state, p);
            }
            log::debug!(
                "opened the state of a {:?} generator (restricted: {})",
                base,
                prefix.is_some()
            );
            state
        })
    }

    fn prepare(&mut self) {
        self.state();
    }

    fn generate(&mut self) -> Option<Interpretation> {
        let mapping = self.mapping;
        let atoms = mapping.argument_atoms();
        let state = self.state();
        let witness = state.witness(&atoms)?;
        let interpretation = Interpretation::from_witness(&witness, mapping);
        RefineUnequalEncoding::new(mapping).encode(state, &interpretation);
        Some(interpretation)
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

/// A generator enumerating the conflict-free interpretations of an ADF.
///
/// A restricted generator only produces the interpretations extending a given prefix.
///
/// # Example
///
/// ```
/// # use crustadf::adf::{AcceptanceCondition, AdfBuilder};
/// # use crustadf::encodings::PropositionalMapping;
/// # use crustadf::reasoner::{CandidateGenerator, ConflictFreeGenerator};
/// # use crustadf::sat::DefaultSatSolverFactory;
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// let mut builder = AdfBuilder::new_with_labels(&["a"]);
/// builder.set_condition(&"a", AcceptanceCondition::Tautology)?;
/// let adf = builder.build()?;
/// let mapping = PropositionalMapping::new(&adf);
/// let mut generator = ConflictFreeGenerator::unrestricted(&adf, &mapping, &DefaultSatSolverFactory);
/// let mut n = 0;
/// while generator.generate().is_some() {
///     n += 1;
/// }
/// assert_eq!(2, n);
/// generator.close();
/// # Ok(())
/// # }
/// ```
pub struct ConflictFreeGenerator<'a, T>
where
    T: LabelType,
{
    generator: WitnessGenerator<'a, T>,
}

impl<'a, T> ConflictFreeGenerator<'a, T>
where
    T: LabelType,
{
    /// Builds a generator enumerating all the conflict-free interpretations.
    pub fn unrestricted(
        adf: &'a AbstractDialecticalFramework<T>,
        mapping: &'a PropositionalMapping,
        factory: &'a dyn SatSolverFactory,
    ) -> Self {
        Self {
            generator: WitnessGenerator::new(adf, mapping, factory, BaseEncoding::ConflictFree, None),
        }
    }

    /// Builds a generator enumerating the conflict-free interpretations which extend the prefix.
    pub fn restricted(
        adf: &'a AbstractDialecticalFramework<T>,
        mapping: &'a PropositionalMapping,
        factory: &'a dyn SatSolverFactory,
        prefix: Interpretation,
    ) -> Self {
        Self {
            generator: WitnessGenerator::new(
                adf,
                mapping,
                factory,
                BaseEncoding::ConflictFree,
                Some(prefix),
            ),
        }
    }
}

impl<T> CandidateGenerator for ConflictFreeGenerator<'_, T>
where
    T: LabelType,
{
    fn prepare(&mut self) {
        self.generator.prepare()
    }

    fn generate(&mut self) -> Option<Interpretation> {
        self.generator.generate()
    }

    fn update(&mut self, update_fn: &mut dyn FnMut(&mut SatSolverState)) {
        self.generator.update(update_fn)
    }

    fn close(&mut self) {
        self.generator.close()
    }
}

impl<T> Drop for ConflictFreeGenerator<'_, T>
where
    T: LabelType,
{
    fn drop(&mut self) {
        self.generator.close()
    }
}

/// A generator enumerating the two-valued models of an ADF.
///
/// A two-valued model decides all the arguments, in a way that is consistent with their acceptance conditions.
/// A restricted generator only produces the models extending a given prefix.
pub struct ModelGenerator<'a, T>
where
    T: LabelType,
{
    generator: WitnessGenerator<'a, T>,
}

impl<'a, T> ModelGenerator<'a, T>
where
    T: LabelType,
{
    /// Builds a generator enumerating all the two-valued models.
    pub fn unrestricted(
        adf: &'a AbstractDialecticalFramework<T>,
        mapping: &'a PropositionalMapping,
        factory: &'a dyn SatSolverFactory,
    ) -> Self {
        Self {
            generator: WitnessGenerator::new(adf, mapping, factory, BaseEncoding::TwoValued, None),
        }
    }

    /// Builds a generator enumerating the two-valued models which extend the prefix.
    pub fn restricted(
        adf: &'a AbstractDialecticalFramework<T>,
        mapping: &'a PropositionalMapping,
        factory: &'a dyn SatSolverFactory,
        prefix: Interpretation,
    ) -> Self {
        Self {
            generator: WitnessGenerator::new(
                adf,
                mapping,
                factory,
                BaseEncoding::TwoValued,
                Some(prefix),
            ),
        }
    }
}

impl<T> CandidateGenerator for ModelGenerator<'_, T>
where
    T: LabelType,
{
    fn prepare(&mut self) {
        self.generator.prepare()
    }

    fn generate(&mut self) -> Option<Interpretation> {
        self.generator.generate()
    }

    fn update(&mut self, update_fn: &mut dyn FnMut(&mut SatSolverState)) {
        self.generator.update(update_fn)
    }

    fn close(&mut self) {
        self.generator.close()
    }
}

impl<T> Drop for ModelGenerator<'_, T>
where
    T: LabelType,
{
    fn drop(&mut self) {
        self.generator.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adf::{AcceptanceCondition as AC, AdfBuilder},
        sat::{clause, DefaultSatSolverFactory},
    };
    use std::collections::HashSet;

    fn mutual_attack() -> AbstractDialecticalFramework<&'static str> {
        let mut builder = AdfBuilder::new_with_labels(&["a", "b"]);
        let a = builder.arg(&"a").unwrap();
        let b = builder.arg(&"b").unwrap();
        builder.set_condition(&"a", AC::neg(b)).unwrap();
        builder.set_condition(&"b", AC::neg(a)).unwrap();
        builder.build().unwrap()
    }

    fn collect(generator: &mut dyn CandidateGenerator) -> Vec<Interpretation> {
        let mut result = vec![];
        while let Some(i) = generator.generate() {
            result.push(i);
        }
        result
    }

    #[test]
    fn test_conflict_free_no_duplicates() {
        let adf = mutual_attack();
        let mapping = PropositionalMapping::new(&adf);
        let mut generator =
            ConflictFreeGenerator::unrestricted(&adf, &mapping, &DefaultSatSolverFactory);
        let interpretations = collect(&mut generator);
        let distinct = interpretations.iter().collect::<HashSet<_>>();
        assert_eq!(interpretations.len(), distinct.len());
        assert_eq!(7, interpretations.len());
        assert!(generator.generate().is_none());
        generator.close();
    }

    #[test]
    fn test_conflict_free_restricted() {
        let adf = mutual_attack();
        let mapping = PropositionalMapping::new(&adf);
        let prefix = Interpretation::builder(2).satisfied(0).build();
        let mut generator =
            ConflictFreeGenerator::restricted(&adf, &mapping, &DefaultSatSolverFactory, prefix.clone());
        let interpretations = collect(&mut generator);
        assert_eq!(2, interpretations.len());
        assert!(interpretations.iter().all(|i| i.extends(&prefix)));
    }

    #[test]
    fn test_models() {
        let adf = mutual_attack();
        let mapping = PropositionalMapping::new(&adf);
        let mut generator = ModelGenerator::unrestricted(&adf, &mapping, &DefaultSatSolverFactory);
        let interpretations = collect(&mut generator)
            .into_iter()
            .collect::<HashSet<Interpretation>>();
        let expected = vec![
            Interpretation::builder(2).satisfied(0).unsatisfied(1).build(),
            Interpretation::builder(2).unsatisfied(0).satisfied(1).build(),
        ]
        .into_iter()
        .collect::<HashSet<_>>();
        assert_eq!(expected, interpretations);
    }

    #[test]
    fn test_update() {
        let adf = mutual_attack();
        let mapping = PropositionalMapping::new(&adf);
        let mut generator = ModelGenerator::unrestricted(&adf, &mapping, &DefaultSatSolverFactory);
        generator.update(&mut |state| state.add(clause![mapping.true_atom(0)]));
        let interpretations = collect(&mut generator);
        assert_eq!(
            vec![Interpretation::builder(2).satisfied(0).unsatisfied(1).build()],
            interpretations
        );
    }

    #[test]
    fn test_close_twice() {
        let adf = mutual_attack();
        let mapping = PropositionalMapping::new(&adf);
        let mut generator =
            ConflictFreeGenerator::unrestricted(&adf, &mapping, &DefaultSatSolverFactory);
        generator.close();
        generator.close();
    }

    #[test]
    #[should_panic(expected = "cannot use a closed candidate generator")]
    fn test_generate_after_close() {
        let adf = mutual_attack();
        let mapping = PropositionalMapping::new(&adf);
        let mut generator =
            ConflictFreeGenerator::unrestricted(&adf, &mapping, &DefaultSatSolverFactory);
        generator.generate();
        generator.close();
        generator.generate();
    } // kcov-ignore
}
