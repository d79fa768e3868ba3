use super::AcceptanceCondition;
use crate::{
    semantics::Interpretation,
    utils::{Label, LabelSet, LabelType},
};
use anyhow::{anyhow, Context, Result};

/// A link of an ADF, from a parent argument to one of its children.
///
/// A link `(r, s)` exists iff `r` occurs in the acceptance condition of `s`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link {
    parent: usize,
    child: usize,
}

impl Link {
    /// Builds a new link given the identifiers of the parent and the child.
    pub fn new(parent: usize, child: usize) -> Self {
        Self { parent, child }
    }

    /// Returns the identifier of the parent argument.
    pub fn parent(&self) -> usize {
        self.parent
    }

    /// Returns the identifier of the child argument.
    pub fn child(&self) -> usize {
        self.child
    }
}

/// An Abstract Dialectical Framework.
///
/// Each argument is governed by an acceptance condition, which is a propositional formula over the arguments of the framework.
/// ADFs are immutable; they are built using [`AdfBuilder`] objects.
#[derive(Clone, Debug)]
pub struct AbstractDialecticalFramework<T>
where
    T: LabelType,
{
    labels: LabelSet<T>,
    conditions: Vec<AcceptanceCondition>,
    parents: Vec<Vec<usize>>,
    children: Vec<Vec<usize>>,
}

impl<T> AbstractDialecticalFramework<T>
where
    T: LabelType,
{
    fn new_with_conditions(labels: LabelSet<T>, conditions: Vec<AcceptanceCondition>) -> Self {
        let parents = conditions
            .iter()
            .map(|c| c.arguments())
            .collect::<Vec<Vec<usize>>>();
        let mut children = vec![vec![]; labels.len()];
        parents.iter().enumerate().for_each(|(child, ps)| {
            ps.iter().for_each(|p| children[*p].push(child));
        });
        Self {
            labels,
            conditions,
            parents,
            children,
        }
    }

    /// Returns the labels of the arguments of this framework.
    pub fn labels(&self) -> &LabelSet<T> {
        &self.labels
    }

    /// Returns the number of arguments.
    pub fn n_arguments(&self) -> usize {
        self.labels.len()
    }

    /// Returns the acceptance condition of an argument, given its identifier.
    ///
    /// # Panics
    ///
    /// Panics if the identifier is out of range.
    pub fn condition(&self, arg: usize) -> &AcceptanceCondition {
        &self.conditions[arg]
    }

    /// Returns the acceptance condition of an argument, given its label.
    ///
    /// An error is returned if the label does not belong to this framework.
    pub fn condition_of(&self, label: &T) -> Result<&AcceptanceCondition> {
        let id = self.labels.get_label(label)?.id();
        Ok(&self.conditions[id])
    }

    /// Returns the parents of an argument, that is the arguments occurring in its acceptance condition.
    pub fn parents(&self, arg: usize) -> &[usize] {
        &self.parents[arg]
    }

    /// Returns the children of an argument, that is the arguments in which acceptance conditions it occurs.
    pub fn children(&self, arg: usize) -> &[usize] {
        &self.children[arg]
    }

    /// Iterates over the links of this framework, ordered by child and then by order of occurrence in its condition.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.parents
            .iter()
            .enumerate()
            .flat_map(|(child, ps)| ps.iter().map(move |p| Link::new(*p, child)))
    }

    /// Returns the number of links.
    pub fn n_links(&self) -> usize {
        self.parents.iter().map(|ps| ps.len()).sum()
    }

    /// Returns the labels associated with a set of argument identifiers.
    pub fn labels_of(&self, args: &[usize]) -> Vec<&Label<T>> {
        args.iter()
            .map(|id| self.labels.get_label_by_id(*id))
            .collect()
    }

    /// Computes the reduct of this framework under an interpretation.
    ///
    /// Each argument that is unsatisfied by the interpretation gets the contradiction as acceptance condition,
    /// and its occurrences in the other conditions are replaced by the contradiction.
    /// Other arguments are left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the interpretation does not have the same number of arguments as the framework.
    pub fn reduct(&self, interpretation: &Interpretation) -> Self {
        if interpretation.n_arguments() != self.n_arguments() {
            panic!("interpretation and framework sizes differ");
        }
        let valuation = |id: usize| {
            if interpretation.is_unsatisfied(id) {
                Some(false)
            } else {
                None
            }
        };
        let conditions = self
            .conditions
            .iter()
            .enumerate()
            .map(|(id, c)| {
                if interpretation.is_unsatisfied(id) {
                    AcceptanceCondition::Contradiction
                } else {
                    c.substitute(&valuation)
                }
            })
            .collect();
        Self::new_with_conditions(self.labels.clone(), conditions)
    }

    /// Returns a string representing the acceptance condition of an argument, using the argument labels.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustadf::adf::{AcceptanceCondition, AdfBuilder};
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let mut builder = AdfBuilder::new_with_labels(&["a", "b"]);
    /// builder.set_condition(&"a", AcceptanceCondition::neg(builder.arg(&"b")?))?;
    /// builder.set_condition(&"b", AcceptanceCondition::Tautology)?;
    /// let adf = builder.build()?;
    /// assert_eq!("neg(b)", adf.format_condition(0));
    /// # Ok(())
    /// # }
    /// ```
    pub fn format_condition(&self, arg: usize) -> String {
        struct Formatter<'a, T: LabelType>(&'a AcceptanceCondition, &'a LabelSet<T>);
        impl<T: LabelType> std::fmt::Display for Formatter<'_, T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0
                    .fmt_with(f, &|id| self.1.get_label_by_id(id).label().to_string())
            }
        }
        Formatter(&self.conditions[arg], &self.labels).to_string()
    }
}

/// A builder for [`AbstractDialecticalFramework`] objects.
///
/// The arguments are declared first; then, each argument must be given an acceptance condition.
/// Leaves referring to arguments are obtained by their labels using [arg](Self::arg).
pub struct AdfBuilder<T>
where
    T: LabelType,
{
    labels: LabelSet<T>,
    conditions: Vec<Option<AcceptanceCondition>>,
}

impl<T> AdfBuilder<T>
where
    T: LabelType,
{
    /// Builds a new ADF builder given the labels of the arguments.
    ///
    /// Duplicate labels are ignored.
    pub fn new_with_labels(labels: &[T]) -> Self {
        let labels = LabelSet::new_with_labels(labels);
        let conditions = vec![None; labels.len()];
        Self { labels, conditions }
    }

    /// Adds a new argument.
    ///
    /// If the label is already in use, nothing happens.
    pub fn new_argument(&mut self, label: T) {
        self.labels.new_label(label);
        self.conditions.resize(self.labels.len(), None);
    }

    /// Returns a leaf referring to an argument.
    ///
    /// An error is returned if the label is undefined.
    pub fn arg(&self, label: &T) -> Result<AcceptanceCondition> {
        self.labels
            .get_label(label)
            .map(|l| AcceptanceCondition::argument(l.id()))
    }

    /// Sets the acceptance condition of an argument.
    ///
    /// If a condition was already set for this argument, it is replaced.
    /// An error is returned if the label is undefined.
    pub fn set_condition(&mut self, label: &T, condition: AcceptanceCondition) -> Result<()> {
        let id = self
            .labels
            .get_label(label)
            .with_context(|| format!("while setting the acceptance condition of {}", label))?
            .id();
        self.conditions[id] = Some(condition);
        Ok(())
    }

    /// Builds the framework.
    ///
    /// An error is returned if an argument has no acceptance condition,
    /// or if an acceptance condition refers to an argument that does not belong to the framework.
    pub fn build(self) -> Result<AbstractDialecticalFramework<T>> {
        let n_arguments = self.labels.len();
        let mut conditions = Vec::with_capacity(n_arguments);
        for (id, c) in self.conditions.into_iter().enumerate() {
            let label = self.labels.get_label_by_id(id);
            let condition = c.ok_or_else(|| anyhow!("no acceptance condition for {}", label))?;
            if let Some(unknown) = condition.arguments().iter().find(|a| **a >= n_arguments) {
                return Err(anyhow!(
                    "the acceptance condition of {} refers to the undefined argument #{}",
                    label,
                    unknown
                ));
            }
            conditions.push(condition);
        }
        Ok(AbstractDialecticalFramework::new_with_conditions(
            self.labels,
            conditions,
        ))
    }
}
