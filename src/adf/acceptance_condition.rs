use anyhow::{anyhow, Result};
use std::fmt::Display;

/// An acceptance condition, that is a propositional formula over the arguments of an ADF.
///
/// Arguments are referred by their identifiers (see [`LabelSet`](crate::utils::LabelSet)).
/// The binary connectives cannot be built with two identical children using the construction functions of this type.
/// The derived conditions (see [substitute](Self::substitute)) keep this property.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AcceptanceCondition {
    /// The formula that is always true.
    Tautology,
    /// The formula that is always false.
    Contradiction,
    /// An argument, given by its identifier.
    Argument(usize),
    /// The negation of a formula.
    Negation(Box<AcceptanceCondition>),
    /// The conjunction of two formulas.
    Conjunction(Box<AcceptanceCondition>, Box<AcceptanceCondition>),
    /// The disjunction of two formulas.
    Disjunction(Box<AcceptanceCondition>, Box<AcceptanceCondition>),
    /// The implication from the first formula to the second one.
    Implication(Box<AcceptanceCondition>, Box<AcceptanceCondition>),
    /// The equivalence of two formulas.
    Equivalence(Box<AcceptanceCondition>, Box<AcceptanceCondition>),
    /// The exclusive disjunction of two formulas.
    ExclusiveDisjunction(Box<AcceptanceCondition>, Box<AcceptanceCondition>),
}

fn check_children(
    connective: &str,
    left: &AcceptanceCondition,
    right: &AcceptanceCondition,
) -> Result<()> {
    if left == right {
        Err(anyhow!(
            "cannot build {} with identical operands {}",
            connective,
            left
        ))
    } else {
        Ok(())
    }
}

impl AcceptanceCondition {
    /// Builds a leaf referring to an argument.
    pub fn argument(id: usize) -> Self {
        AcceptanceCondition::Argument(id)
    }

    /// Builds the negation of a condition.
    #[allow(clippy::should_implement_trait)]
    pub fn neg(child: AcceptanceCondition) -> Self {
        AcceptanceCondition::Negation(Box::new(child))
    }

    /// Builds the conjunction of two conditions.
    ///
    /// An error is returned if both conditions are identical.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustadf::adf::AcceptanceCondition;
    /// let a = AcceptanceCondition::argument(0);
    /// let b = AcceptanceCondition::argument(1);
    /// assert!(AcceptanceCondition::and(a.clone(), b).is_ok());
    /// assert!(AcceptanceCondition::and(a.clone(), a).is_err());
    /// ```
    pub fn and(left: AcceptanceCondition, right: AcceptanceCondition) -> Result<Self> {
        check_children("a conjunction", &left, &right)?;
        Ok(AcceptanceCondition::Conjunction(
            Box::new(left),
            Box::new(right),
        ))
    }

    /// Builds the disjunction of two conditions.
    ///
    /// An error is returned if both conditions are identical.
    pub fn or(left: AcceptanceCondition, right: AcceptanceCondition) -> Result<Self> {
        check_children("a disjunction", &left, &right)?;
        Ok(AcceptanceCondition::Disjunction(
            Box::new(left),
            Box::new(right),
        ))
    }

    /// Builds the implication between two conditions.
    ///
    /// An error is returned if both conditions are identical.
    pub fn imp(left: AcceptanceCondition, right: AcceptanceCondition) -> Result<Self> {
        check_children("an implication", &left, &right)?;
        Ok(AcceptanceCondition::Implication(
            Box::new(left),
            Box::new(right),
        ))
    }

    /// Builds the equivalence between two conditions.
    ///
    /// An error is returned if both conditions are identical.
    pub fn iff(left: AcceptanceCondition, right: AcceptanceCondition) -> Result<Self> {
        check_children("an equivalence", &left, &right)?;
        Ok(AcceptanceCondition::Equivalence(
            Box::new(left),
            Box::new(right),
        ))
    }

    /// Builds the exclusive disjunction of two conditions.
    ///
    /// An error is returned if both conditions are identical.
    pub fn xor(left: AcceptanceCondition, right: AcceptanceCondition) -> Result<Self> {
        check_children("an exclusive disjunction", &left, &right)?;
        Ok(AcceptanceCondition::ExclusiveDisjunction(
            Box::new(left),
            Box::new(right),
        ))
    }

    /// Returns the identifiers of the arguments occurring in this condition.
    ///
    /// Each argument is given once, in the order of its first occurrence in a left-to-right traversal.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustadf::adf::AcceptanceCondition;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let b_or_a = AcceptanceCondition::or(AcceptanceCondition::argument(1), AcceptanceCondition::argument(0))?;
    /// let cond = AcceptanceCondition::and(b_or_a, AcceptanceCondition::argument(1))?;
    /// assert_eq!(vec![1, 0], cond.arguments());
    /// # Ok(())
    /// # }
    /// ```
    pub fn arguments(&self) -> Vec<usize> {
        let mut result = vec![];
        self.collect_arguments(&mut result);
        result
    }

    fn collect_arguments(&self, result: &mut Vec<usize>) {
        match self {
            AcceptanceCondition::Tautology | AcceptanceCondition::Contradiction => {}
            AcceptanceCondition::Argument(id) => {
                if !result.contains(id) {
                    result.push(*id)
                }
            }
            AcceptanceCondition::Negation(child) => child.collect_arguments(result),
            AcceptanceCondition::Conjunction(l, r)
            | AcceptanceCondition::Disjunction(l, r)
            | AcceptanceCondition::Implication(l, r)
            | AcceptanceCondition::Equivalence(l, r)
            | AcceptanceCondition::ExclusiveDisjunction(l, r) => {
                l.collect_arguments(result);
                r.collect_arguments(result);
            }
        }
    }

    /// Evaluates this condition given the truth values of the arguments.
    pub fn evaluate(&self, valuation: &dyn Fn(usize) -> bool) -> bool {
        match self {
            AcceptanceCondition::Tautology => true,
            AcceptanceCondition::Contradiction => false,
            AcceptanceCondition::Argument(id) => valuation(*id),
            AcceptanceCondition::Negation(child) => !child.evaluate(valuation),
            AcceptanceCondition::Conjunction(l, r) => l.evaluate(valuation) && r.evaluate(valuation),
            AcceptanceCondition::Disjunction(l, r) => l.evaluate(valuation) || r.evaluate(valuation),
            AcceptanceCondition::Implication(l, r) => !l.evaluate(valuation) || r.evaluate(valuation),
            AcceptanceCondition::Equivalence(l, r) => l.evaluate(valuation) == r.evaluate(valuation),
            AcceptanceCondition::ExclusiveDisjunction(l, r) => {
                l.evaluate(valuation) != r.evaluate(valuation)
            }
        }
    }

    /// Replaces some arguments by constants and simplifies the result.
    ///
    /// The arguments for which `valuation` returns [Option::None] are kept as is.
    /// The constants are propagated upward, so the returned condition is either a constant or a formula without constants under binary connectives.
    /// Binary connectives whose children become identical are simplified too.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustadf::adf::AcceptanceCondition;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let a = AcceptanceCondition::argument(0);
    /// let b = AcceptanceCondition::argument(1);
    /// let cond = AcceptanceCondition::and(a.clone(), b)?;
    /// assert_eq!(a, cond.substitute(&|id| if id == 1 { Some(true) } else { None }));
    /// assert_eq!(
    ///     AcceptanceCondition::Contradiction,
    ///     cond.substitute(&|id| if id == 1 { Some(false) } else { None })
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn substitute(&self, valuation: &dyn Fn(usize) -> Option<bool>) -> AcceptanceCondition {
        use AcceptanceCondition::*;
        match self {
            Tautology => Tautology,
            Contradiction => Contradiction,
            Argument(id) => match valuation(*id) {
                Some(true) => Tautology,
                Some(false) => Contradiction,
                None => Argument(*id),
            },
            Negation(child) => simplified_neg(child.substitute(valuation)),
            Conjunction(l, r) => {
                match (l.substitute(valuation), r.substitute(valuation)) {
                    (Contradiction, _) | (_, Contradiction) => Contradiction,
                    (Tautology, other) | (other, Tautology) => other,
                    (l, r) if l == r => l,
                    (l, r) => Conjunction(Box::new(l), Box::new(r)),
                }
            }
            Disjunction(l, r) => match (l.substitute(valuation), r.substitute(valuation)) {
                (Tautology, _) | (_, Tautology) => Tautology,
                (Contradiction, other) | (other, Contradiction) => other,
                (l, r) if l == r => l,
                (l, r) => Disjunction(Box::new(l), Box::new(r)),
            },
            Implication(l, r) => match (l.substitute(valuation), r.substitute(valuation)) {
                (Contradiction, _) | (_, Tautology) => Tautology,
                (Tautology, other) => other,
                (other, Contradiction) => simplified_neg(other),
                (l, r) if l == r => Tautology,
                (l, r) => Implication(Box::new(l), Box::new(r)),
            },
            Equivalence(l, r) => match (l.substitute(valuation), r.substitute(valuation)) {
                (Tautology, other) | (other, Tautology) => other,
                (Contradiction, other) | (other, Contradiction) => simplified_neg(other),
                (l, r) if l == r => Tautology,
                (l, r) => Equivalence(Box::new(l), Box::new(r)),
            },
            ExclusiveDisjunction(l, r) => {
                match (l.substitute(valuation), r.substitute(valuation)) {
                    (Contradiction, other) | (other, Contradiction) => other,
                    (Tautology, other) | (other, Tautology) => simplified_neg(other),
                    (l, r) if l == r => Contradiction,
                    (l, r) => ExclusiveDisjunction(Box::new(l), Box::new(r)),
                }
            }
        }
    }

    pub(crate) fn fmt_with(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        arg_name: &dyn Fn(usize) -> String,
    ) -> std::fmt::Result {
        fn fmt_binary(
            f: &mut std::fmt::Formatter<'_>,
            arg_name: &dyn Fn(usize) -> String,
            name: &str,
            l: &AcceptanceCondition,
            r: &AcceptanceCondition,
        ) -> std::fmt::Result {
            write!(f, "{}(", name)?;
            l.fmt_with(f, arg_name)?;
            write!(f, ",")?;
            r.fmt_with(f, arg_name)?;
            write!(f, ")")
        }
        match self {
            AcceptanceCondition::Tautology => write!(f, "c(v)"),
            AcceptanceCondition::Contradiction => write!(f, "c(f)"),
            AcceptanceCondition::Argument(id) => write!(f, "{}", arg_name(*id)),
            AcceptanceCondition::Negation(child) => {
                write!(f, "neg(")?;
                child.fmt_with(f, arg_name)?;
                write!(f, ")")
            }
            AcceptanceCondition::Conjunction(l, r) => fmt_binary(f, arg_name, "and", l, r),
            AcceptanceCondition::Disjunction(l, r) => fmt_binary(f, arg_name, "or", l, r),
            AcceptanceCondition::Implication(l, r) => fmt_binary(f, arg_name, "imp", l, r),
            AcceptanceCondition::Equivalence(l, r) => fmt_binary(f, arg_name, "iff", l, r),
            AcceptanceCondition::ExclusiveDisjunction(l, r) => fmt_binary(f, arg_name, "xor", l, r),
        }
    }
}

fn simplified_neg(child: AcceptanceCondition) -> AcceptanceCondition {
    match child {
        AcceptanceCondition::Tautology => AcceptanceCondition::Contradiction,
        AcceptanceCondition::Contradiction => AcceptanceCondition::Tautology,
        AcceptanceCondition::Negation(c) => *c,
        other => AcceptanceCondition::neg(other),
    }
}

impl Display for AcceptanceCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_with(f, &|id| format!("#{}", id))
    }
}
