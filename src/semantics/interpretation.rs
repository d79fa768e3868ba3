use crate::{encodings::PropositionalMapping, sat::Variable};
use strum_macros::{Display, EnumIter};

/// The status of an argument in a three-valued interpretation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Status {
    /// The argument is accepted (true).
    #[strum(serialize = "t")]
    Satisfied,
    /// The argument is rejected (false).
    #[strum(serialize = "f")]
    Unsatisfied,
    /// The status of the argument is unknown.
    #[strum(serialize = "u")]
    Undecided,
}

/// A three-valued interpretation of the arguments of an ADF.
///
/// Each argument (given by its identifier) is either satisfied, unsatisfied or undecided.
/// Interpretations are immutable; they are built by [`InterpretationBuilder`] objects or by the reasoning components.
/// Equality and hashing are structural.
///
/// When an interpretation is used as a prefix to restrict a computation, its undecided arguments are unconstrained.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interpretation {
    statuses: Vec<Status>,
}

impl Interpretation {
    /// Builds the interpretation in which all the `n_arguments` arguments are undecided.
    pub fn empty(n_arguments: usize) -> Self {
        Self {
            statuses: vec![Status::Undecided; n_arguments],
        }
    }

    /// Returns a builder for interpretations over `n_arguments` arguments.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustadf::semantics::{Interpretation, Status};
    /// let mut builder = Interpretation::builder(3);
    /// builder.satisfied(0).unsatisfied(2);
    /// let interpretation = builder.build();
    /// assert_eq!(vec![0], interpretation.satisfied());
    /// assert_eq!(vec![2], interpretation.unsatisfied());
    /// assert_eq!(vec![1], interpretation.undecided());
    /// ```
    pub fn builder(n_arguments: usize) -> InterpretationBuilder {
        InterpretationBuilder {
            statuses: vec![Status::Undecided; n_arguments],
        }
    }

    /// Builds an interpretation from the atoms set to true in a SAT witness.
    ///
    /// An argument is satisfied (resp. unsatisfied) if its "true" (resp. "false") atom is in the witness, and undecided otherwise.
    pub fn from_witness(witness: &[Variable], mapping: &PropositionalMapping) -> Self {
        let mut statuses = vec![Status::Undecided; mapping.n_arguments()];
        for v in witness {
            if let Some((arg, value)) = mapping.argument_of_atom(*v) {
                statuses[arg] = if value {
                    Status::Satisfied
                } else {
                    Status::Unsatisfied
                };
            }
        }
        Self { statuses }
    }

    /// Returns the number of arguments of this interpretation.
    pub fn n_arguments(&self) -> usize {
        self.statuses.len()
    }

    /// Returns the status of an argument.
    ///
    /// # Panics
    ///
    /// Panics if the identifier is out of range.
    pub fn status(&self, arg: usize) -> Status {
        self.statuses[arg]
    }

    /// Returns `true` iff the argument is satisfied.
    pub fn is_satisfied(&self, arg: usize) -> bool {
        self.statuses[arg] == Status::Satisfied
    }

    /// Returns `true` iff the argument is unsatisfied.
    pub fn is_unsatisfied(&self, arg: usize) -> bool {
        self.statuses[arg] == Status::Unsatisfied
    }

    /// Returns `true` iff the argument is undecided.
    pub fn is_undecided(&self, arg: usize) -> bool {
        self.statuses[arg] == Status::Undecided
    }

    /// Returns `true` iff the argument is either satisfied or unsatisfied.
    pub fn is_decided(&self, arg: usize) -> bool {
        self.statuses[arg] != Status::Undecided
    }

    /// Returns the identifiers of the arguments with the given status, in increasing order.
    pub fn with_status(&self, status: Status) -> Vec<usize> {
        self.iter()
            .filter_map(|(arg, s)| if s == status { Some(arg) } else { None })
            .collect()
    }

    /// Returns the identifiers of the satisfied arguments.
    pub fn satisfied(&self) -> Vec<usize> {
        self.with_status(Status::Satisfied)
    }

    /// Returns the identifiers of the unsatisfied arguments.
    pub fn unsatisfied(&self) -> Vec<usize> {
        self.with_status(Status::Unsatisfied)
    }

    /// Returns the identifiers of the undecided arguments.
    pub fn undecided(&self) -> Vec<usize> {
        self.with_status(Status::Undecided)
    }

    /// Returns the number of decided arguments.
    pub fn n_decided(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| **s != Status::Undecided)
            .count()
    }

    /// Returns `true` iff no argument is undecided.
    pub fn is_two_valued(&self) -> bool {
        self.statuses.iter().all(|s| *s != Status::Undecided)
    }

    /// Iterates over the couples made of an argument identifier and its status.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Status)> + '_ {
        self.statuses.iter().copied().enumerate()
    }

    /// Returns `true` iff this interpretation is at least as informative as the other one.
    ///
    /// This is the information order: each argument decided in `other` must have the same status in `self`.
    /// In particular, an interpretation extends the prefixes it was computed from.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustadf::semantics::Interpretation;
    /// let mut builder = Interpretation::builder(2);
    /// builder.satisfied(0);
    /// let small = builder.build();
    /// builder.unsatisfied(1);
    /// let large = builder.build();
    /// assert!(large.extends(&small));
    /// assert!(!small.extends(&large));
    /// assert!(small.extends(&Interpretation::empty(2)));
    /// ```
    pub fn extends(&self, other: &Interpretation) -> bool {
        self.statuses
            .iter()
            .zip(other.statuses.iter())
            .all(|(s, o)| *o == Status::Undecided || s == o)
    }

    /// Returns the interpretation keeping only the unsatisfied arguments of this one.
    pub fn only_unsatisfied(&self) -> Interpretation {
        Self {
            statuses: self
                .statuses
                .iter()
                .map(|s| match s {
                    Status::Unsatisfied => Status::Unsatisfied,
                    _ => Status::Undecided,
                })
                .collect(),
        }
    }
}

/// A builder for [`Interpretation`] objects.
///
/// All the arguments are undecided until a status is set.
/// Building an interpretation does not consume the builder, which can be used to build larger interpretations afterwards.
#[derive(Clone, Debug)]
pub struct InterpretationBuilder {
    statuses: Vec<Status>,
}

impl InterpretationBuilder {
    /// Sets the status of an argument.
    pub fn status(&mut self, arg: usize, status: Status) -> &mut Self {
        self.statuses[arg] = status;
        self
    }

    /// Sets an argument as satisfied.
    pub fn satisfied(&mut self, arg: usize) -> &mut Self {
        self.status(arg, Status::Satisfied)
    }

    /// Sets an argument as unsatisfied.
    pub fn unsatisfied(&mut self, arg: usize) -> &mut Self {
        self.status(arg, Status::Unsatisfied)
    }

    /// Sets an argument as undecided.
    pub fn undecided(&mut self, arg: usize) -> &mut Self {
        self.status(arg, Status::Undecided)
    }

    /// Returns a snapshot of the interpretation under construction.
    pub fn build(&self) -> Interpretation {
        Interpretation {
            statuses: self.statuses.clone(),
        }
    }
}
