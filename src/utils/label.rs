use anyhow::{anyhow, Result};
use std::{
    collections::HashMap,
    fmt::{Debug, Display},
    hash::Hash,
};

/// The trait for argument labels.
///
/// Arguments may be labeled by any type implementing some traits allowing their use in maps and their display.
/// This trait is just a shortcut used to combine them.
///
/// Simple types like [usize], [&str] and [String] implements [LabelType].
pub trait LabelType: Clone + Debug + Display + Eq + Hash {}
impl<T: Clone + Debug + Display + Eq + Hash> LabelType for T {}

/// An argument of an ADF, made of its label and a unique identifier.
///
/// Identifiers are given by [`LabelSet`] objects; they range from `0` to `n - 1` where `n` is the number of labels of the set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Label<T>
where
    T: LabelType,
{
    id: usize,
    label: T,
}

impl<T> Label<T>
where
    T: LabelType,
{
    /// Returns the label.
    pub fn label(&self) -> &T {
        &self.label
    }

    /// Returns the identifier associated with the label.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl<T> Display for Label<T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Handles a set of labels, each one with a unique id.
///
/// Labels are never removed from a set; thus, the identifiers are contiguous.
/// This allows the structures indexed by arguments (interpretations, propositional mappings) to be plain vectors.
#[derive(Clone, Debug, Default)]
pub struct LabelSet<T>
where
    T: LabelType,
{
    labels: Vec<Label<T>>,
    label_to_id: HashMap<T, usize>,
}

impl<T> LabelSet<T>
where
    T: LabelType,
{
    /// Builds a new label set initialized with a set of labels.
    ///
    /// If a label appears multiple times, the first occurrence is the only one that is considered.
    /// Each label will be assigned an id equal to its index in the provided slice of labels (after the removal of the duplicates).
    ///
    /// # Example
    ///
    /// ```
    /// # use crustadf::utils::LabelSet;
    /// let labels = LabelSet::new_with_labels(&["a", "b", "a"]);
    /// assert_eq!(2, labels.len());
    /// assert_eq!(0, labels.get_label(&"a").unwrap().id());
    /// assert_eq!(1, labels.get_label(&"b").unwrap().id());
    /// ```
    pub fn new_with_labels(labels: &[T]) -> Self {
        let mut label_set = LabelSet {
            labels: Vec::with_capacity(labels.len()),
            label_to_id: HashMap::with_capacity(labels.len()),
        };
        labels.iter().for_each(|l| label_set.new_label(l.clone()));
        label_set.labels.shrink_to_fit();
        label_set.label_to_id.shrink_to_fit();
        label_set
    }

    /// Adds a new label to this set.
    ///
    /// The id of the new label is the number of labels in the set before the insertion.
    /// In the label is already present in the set, nothing is added.
    pub fn new_label(&mut self, label: T) {
        self.label_to_id.entry(label.clone()).or_insert_with(|| {
            self.labels.push(Label {
                id: self.labels.len(),
                label,
            });
            self.labels.len() - 1
        });
    }

    /// Returns the number of labels in the set.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if and only if the set has no label.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the label object associated to a label.
    ///
    /// In case no such label exists, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustadf::utils::LabelSet;
    /// let labels = LabelSet::new_with_labels(&["a", "b", "c"]);
    /// assert!(labels.get_label(&"a").is_ok());
    /// assert!(labels.get_label(&"d").is_err());
    /// ```
    pub fn get_label(&self, label: &T) -> Result<&Label<T>> {
        self.label_to_id
            .get(label)
            .map(|i| &self.labels[*i])
            .ok_or_else(|| anyhow!("no such label: {}", label))
    }

    /// Returns the label with the corresponding id.
    ///
    /// # Panics
    ///
    /// Panics if no label has such id.
    pub fn get_label_by_id(&self, id: usize) -> &Label<T> {
        &self.labels[id]
    }

    /// Returns an iterator to the labels, in increasing id order.
    pub fn iter(&self) -> impl Iterator<Item = &Label<T>> + '_ {
        self.labels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_labels() {
        let str_labels = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let labels = LabelSet::new_with_labels(&str_labels);
        assert_eq!(3, labels.len());
        assert_eq!(3, labels.label_to_id.len());
        assert!(!labels.is_empty());
        for (i, l) in labels.iter().enumerate() {
            assert_eq!(i, l.id());
            assert_eq!(&str_labels[i], l.label());
        }
    }

    #[test]
    fn test_new_with_empty_labels() {
        let labels = LabelSet::new_with_labels(&[] as &[String]);
        assert_eq!(0, labels.len());
        assert!(labels.is_empty());
    }

    #[test]
    fn test_new_label_twice() {
        let mut labels = LabelSet::new_with_labels(&["a", "b"]);
        labels.new_label("c");
        labels.new_label("c");
        assert_eq!(3, labels.len());
        assert_eq!(2, labels.get_label(&"c").unwrap().id())
    }

    #[test]
    fn test_get_label_by_id() {
        let labels = LabelSet::new_with_labels(&["a", "b"]);
        assert_eq!(&"b", labels.get_label_by_id(1).label());
    }

    #[test]
    #[should_panic(expected = "no such label: c")]
    fn test_get_nonexisting_label() {
        let labels = LabelSet::new_with_labels(&["a", "b"]);
        labels.get_label(&"c").unwrap();
    }
}
