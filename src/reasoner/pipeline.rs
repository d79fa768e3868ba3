use super::{CandidateGenerator, InterpretationProcessor, StateProcessor, Verifier};
use crate::semantics::Interpretation;

/// The states of a [`Pipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No candidate was requested yet.
    Idle,
    /// The generator is computing a candidate.
    Generating,
    /// A candidate is being processed and checked.
    Verifying,
    /// The generator is exhausted or the pipeline was closed.
    Done,
}

/// A lazy sequence of interpretations produced by a generator and filtered by a verifier.
///
/// Each time a new interpretation is requested, the generator produces candidates until one of them is accepted.
/// Candidates go through the unverified processors, then through the verifier, and finally through the verified processors.
/// When a candidate is rejected, the verifier may prune the state of the generator.
///
/// A pipeline is an [Iterator]; it cannot be restarted.
/// All its components are closed when the generator is exhausted, when [close](Self::close) is called, or when the pipeline is dropped.
///
/// # Example
///
/// ```
/// # use crustadf::adf::{AcceptanceCondition, AdfBuilder};
/// # use crustadf::encodings::PropositionalMapping;
/// # use crustadf::reasoner::{AdmissibleVerifier, ConflictFreeGenerator, Pipeline};
/// # use crustadf::sat::DefaultSatSolverFactory;
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// let mut builder = AdfBuilder::new_with_labels(&["a", "b"]);
/// builder.set_condition(&"a", AcceptanceCondition::neg(builder.arg(&"b")?))?;
/// builder.set_condition(&"b", AcceptanceCondition::Tautology)?;
/// let adf = builder.build()?;
/// let mapping = PropositionalMapping::new(&adf);
/// let factory = DefaultSatSolverFactory;
/// let pipeline = Pipeline::builder(Box::new(ConflictFreeGenerator::unrestricted(&adf, &mapping, &factory)))
///     .verifier(Box::new(AdmissibleVerifier::new(&adf, &mapping, &factory)))
///     .build();
/// assert_eq!(3, pipeline.count());
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<'a> {
    generator: Box<dyn CandidateGenerator + 'a>,
    state_processors: Vec<Box<dyn StateProcessor + 'a>>,
    unverified_processors: Vec<Box<dyn InterpretationProcessor + 'a>>,
    verifier: Option<Box<dyn Verifier + 'a>>,
    verified_processors: Vec<Box<dyn InterpretationProcessor + 'a>>,
    state: PipelineState,
    n_candidates: usize,
    n_results: usize,
}

impl<'a> Pipeline<'a> {
    /// Returns a builder for a pipeline using the given generator.
    pub fn builder(generator: Box<dyn CandidateGenerator + 'a>) -> PipelineBuilder<'a> {
        PipelineBuilder {
            generator,
            state_processors: vec![],
            unverified_processors: vec![],
            verifier: None,
            verified_processors: vec![],
        }
    }

    /// Returns the current state of the pipeline.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    fn start(&mut self) {
        self.generator.prepare();
        for processor in self.state_processors.iter_mut() {
            self.generator
                .update(&mut |generator_state| processor.process(generator_state));
        }
        if let Some(v) = self.verifier.as_mut() {
            v.prepare();
        }
        log::debug!(
            "pipeline started ({} state processors, {} interpretation processors, with verifier: {})",
            self.state_processors.len(),
            self.unverified_processors.len() + self.verified_processors.len(),
            self.verifier.is_some()
        );
    }

    fn apply_processors(
        generator: &mut Box<dyn CandidateGenerator + 'a>,
        processors: &mut [Box<dyn InterpretationProcessor + 'a>],
        candidate: Interpretation,
    ) -> Interpretation {
        let mut candidate = candidate;
        for processor in processors.iter_mut() {
            candidate = processor.process(candidate);
            generator.update(&mut |generator_state| processor.update_state(generator_state, &candidate));
        }
        candidate
    }

    fn next_result(&mut self) -> Option<Interpretation> {
        loop {
            self.state = PipelineState::Generating;
            let candidate = self.generator.generate()?;
            self.n_candidates += 1;
            let candidate = Self::apply_processors(
                &mut self.generator,
                &mut self.unverified_processors,
                candidate,
            );
            self.state = PipelineState::Verifying;
            let accepted = match self.verifier.as_mut() {
                Some(v) => v.verify(&candidate),
                None => true,
            };
            log::debug!(
                "candidate #{} with {} decided arguments {}",
                self.n_candidates,
                candidate.n_decided(),
                if accepted { "accepted" } else { "rejected" }
            );
            if accepted {
                return Some(Self::apply_processors(
                    &mut self.generator,
                    &mut self.verified_processors,
                    candidate,
                ));
            }
            if let Some(v) = self.verifier.as_mut() {
                self.generator
                    .update(&mut |generator_state| v.prune(&candidate, generator_state));
            }
        }
    }

    /// Closes the pipeline and all its components.
    ///
    /// The pipeline produces no more interpretations after this call.
    /// Closing a pipeline twice has no effect.
    pub fn close(&mut self) {
        if self.state == PipelineState::Done {
            return;
        }
        self.generator.close();
        if let Some(v) = self.verifier.as_mut() {
            v.close();
        }
        self.unverified_processors
            .iter_mut()
            .chain(self.verified_processors.iter_mut())
            .for_each(|p| p.close());
        self.state = PipelineState::Done;
        log::debug!("pipeline closed");
    }
}

impl Iterator for Pipeline<'_> {
    type Item = Interpretation;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            PipelineState::Done => return None,
            PipelineState::Idle => self.start(),
            PipelineState::Generating | PipelineState::Verifying => {}
        }
        match self.next_result() {
            Some(i) => {
                self.n_results += 1;
                self.state = PipelineState::Generating;
                Some(i)
            }
            None => {
                log::info!(
                    "pipeline exhausted after {} candidates and {} results",
                    self.n_candidates,
                    self.n_results
                );
                self.close();
                None
            }
        }
    }
}

impl Drop for Pipeline<'_> {
    fn drop(&mut self) {
        self.close()
    }
}

/// A builder for [`Pipeline`] objects.
pub struct PipelineBuilder<'a> {
    generator: Box<dyn CandidateGenerator + 'a>,
    state_processors: Vec<Box<dyn StateProcessor + 'a>>,
    unverified_processors: Vec<Box<dyn InterpretationProcessor + 'a>>,
    verifier: Option<Box<dyn Verifier + 'a>>,
    verified_processors: Vec<Box<dyn InterpretationProcessor + 'a>>,
}

impl<'a> PipelineBuilder<'a> {
    /// Adds a processor applied to the state of the generator before the first candidate is generated.
    pub fn state_processor(mut self, processor: Box<dyn StateProcessor + 'a>) -> Self {
        self.state_processors.push(processor);
        self
    }

    /// Adds a processor applied to the candidates before their verification.
    pub fn unverified_processor(mut self, processor: Box<dyn InterpretationProcessor + 'a>) -> Self {
        self.unverified_processors.push(processor);
        self
    }

    /// Sets the verifier; without verifier, all the candidates are accepted.
    pub fn verifier(mut self, verifier: Box<dyn Verifier + 'a>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Adds a processor applied to the candidates accepted by the verifier.
    pub fn verified_processor(mut self, processor: Box<dyn InterpretationProcessor + 'a>) -> Self {
        self.verified_processors.push(processor);
        self
    }

    /// Builds the pipeline.
    ///
    /// No SAT solver state is opened before the first interpretation is requested.
    pub fn build(self) -> Pipeline<'a> {
        Pipeline {
            generator: self.generator,
            state_processors: self.state_processors,
            unverified_processors: self.unverified_processors,
            verifier: self.verifier,
            verified_processors: self.verified_processors,
            state: PipelineState::Idle,
            n_candidates: 0,
            n_results: 0,
        }
    }
}
