use crustadf::{
    adf::{AbstractDialecticalFramework, AcceptanceCondition as AC, AdfBuilder},
    encodings::PropositionalMapping,
    reasoner::{
        CandidateGenerator, ConflictFreeGenerator, CredulousAcceptanceComputer, GroundGenerator,
        ModelsComputer, Semantics, SemanticsReasoner, SingleModelComputer,
    },
    sat::{
        CadicalSolver, Literal, SatSolver, SatSolverFactory, SolvingListener, SolvingResult,
    },
};
use std::{cell::Cell, rc::Rc};
use strum::IntoEnumIterator;

#[derive(Default)]
struct Counters {
    opened: Cell<usize>,
    released: Cell<usize>,
}

impl Counters {
    fn n_open(&self) -> usize {
        self.opened.get() - self.released.get()
    }
}

struct CountingSolver {
    solver: CadicalSolver,
    counters: Rc<Counters>,
}

impl SatSolver for CountingSolver {
    fn add_clause(&mut self, cl: Vec<Literal>) {
        self.solver.add_clause(cl)
    }

    fn solve_under_assumptions(&mut self, assumptions: &[Literal]) -> SolvingResult {
        self.solver.solve_under_assumptions(assumptions)
    }

    fn n_vars(&self) -> usize {
        self.solver.n_vars()
    }

    fn reserve(&mut self, new_max_id: usize) {
        self.solver.reserve(new_max_id)
    }

    fn add_listener(&mut self, listener: Box<dyn SolvingListener>) {
        self.solver.add_listener(listener)
    }
}

impl Drop for CountingSolver {
    fn drop(&mut self) {
        self.counters.released.set(self.counters.released.get() + 1);
    }
}

#[derive(Default)]
struct CountingFactory {
    counters: Rc<Counters>,
}

impl SatSolverFactory for CountingFactory {
    fn new_solver(&self) -> Box<dyn SatSolver> {
        self.counters.opened.set(self.counters.opened.get() + 1);
        Box::new(CountingSolver {
            solver: CadicalSolver::default(),
            counters: Rc::clone(&self.counters),
        })
    }
}

fn mutual_attack() -> AbstractDialecticalFramework<&'static str> {
    let mut builder = AdfBuilder::new_with_labels(&["a", "b", "c"]);
    let a = builder.arg(&"a").unwrap();
    let b = builder.arg(&"b").unwrap();
    builder.set_condition(&"a", AC::neg(b.clone())).unwrap();
    builder.set_condition(&"b", AC::neg(a)).unwrap();
    builder
        .set_condition(&"c", AC::or(b, AC::Tautology).unwrap())
        .unwrap();
    builder.build().unwrap()
}

#[test]
fn test_full_iteration_releases_all_states() {
    let adf = mutual_attack();
    let factory = CountingFactory::default();
    for semantics in Semantics::iter() {
        let mut reasoner = SemanticsReasoner::new(&adf, semantics, &factory);
        reasoner.compute_all_models();
        assert_eq!(0, factory.counters.n_open(), "leak for {}", semantics);
    }
    assert!(factory.counters.opened.get() > 0);
}

#[test]
fn test_partial_iteration_then_close() {
    let adf = mutual_attack();
    let factory = CountingFactory::default();
    for semantics in Semantics::iter() {
        let reasoner = SemanticsReasoner::new(&adf, semantics, &factory);
        let mut pipeline = reasoner.pipeline(None);
        pipeline.next();
        pipeline.close();
        assert_eq!(0, factory.counters.n_open(), "leak for {}", semantics);
        assert!(pipeline.next().is_none());
    }
}

#[test]
fn test_queries_release_all_states() {
    let adf = mutual_attack();
    let factory = CountingFactory::default();
    for semantics in Semantics::iter() {
        let mut reasoner = SemanticsReasoner::new(&adf, semantics, &factory);
        reasoner.compute_one_model();
        for label in adf.labels().iter() {
            reasoner.is_credulously_accepted(label);
        }
        assert_eq!(0, factory.counters.n_open(), "leak for {}", semantics);
    }
}

#[test]
fn test_dropped_pipeline_releases_states() {
    let adf = mutual_attack();
    let factory = CountingFactory::default();
    let reasoner = SemanticsReasoner::new(&adf, Semantics::Preferred, &factory);
    {
        let mut pipeline = reasoner.pipeline(None);
        pipeline.next();
        assert!(factory.counters.n_open() > 0);
    }
    assert_eq!(0, factory.counters.n_open());
}

#[test]
fn test_unused_generator_opens_nothing() {
    let adf = mutual_attack();
    let mapping = PropositionalMapping::new(&adf);
    let factory = CountingFactory::default();
    let mut generator = GroundGenerator::unrestricted(&adf, &mapping, &factory);
    generator.close();
    let generator = ConflictFreeGenerator::unrestricted(&adf, &mapping, &factory);
    drop(generator);
    assert_eq!(0, factory.counters.opened.get());
}

#[test]
fn test_generator_close() {
    let adf = mutual_attack();
    let mapping = PropositionalMapping::new(&adf);
    let factory = CountingFactory::default();
    let mut generator = ConflictFreeGenerator::unrestricted(&adf, &mapping, &factory);
    assert!(generator.generate().is_some());
    assert_eq!(1, factory.counters.n_open());
    generator.close();
    assert_eq!(0, factory.counters.n_open());
    generator.close();
    assert_eq!(1, factory.counters.opened.get());
}

#[test]
fn test_prepared_generator_reuses_its_state() {
    let adf = mutual_attack();
    let mapping = PropositionalMapping::new(&adf);
    let factory = CountingFactory::default();
    let mut generator = GroundGenerator::unrestricted(&adf, &mapping, &factory);
    generator.prepare();
    generator.prepare();
    assert!(generator.generate().is_some());
    assert!(generator.generate().is_none());
    assert_eq!(1, factory.counters.opened.get());
    generator.close();
    assert_eq!(0, factory.counters.n_open());
}
